//! # Tabular display for located exoplanets
//!
//! [`ExoplanetsDisplay`] borrows a slice of [`Exoplanet`] records and renders them as a
//! `comfy-table` table when formatted with `{}`:
//!
//! ```text
//! # | Name | Distance [ly] | RA [rad] | DEC [deg] | l [deg] | b [deg] | Status
//! ```
//!
//! Records that could not be located show `-` in the distance, RA and galactic columns and
//! the failure message in the status column.
//!
//! ## Example
//!
//! ```rust,no_run
//! use exofinder::display::ExoplanetsDisplayExt;
//! use exofinder::exoplanet::Exoplanet;
//!
//! let mut planet = Exoplanet::default();
//! planet.locate_at(1.7e9).unwrap();
//! println!("{}", [planet].show().with_distance_precision(9));
//! ```

use std::fmt;

use comfy_table::{presets::UTF8_FULL, Cell, CellAlignment, ContentArrangement, Row, Table};

use crate::{constants::KEPLER_FAILURE_MESSAGE, exoplanet::Exoplanet};

/// Display adaptor rendering a batch of [`Exoplanet`] as a table.
///
/// Precision
/// -----------------
/// * `dist_prec` controls the fixed-point digits of the light-year distance (default = 8).
/// * `angle_prec` controls the digits of RA, declination and galactic angles (default = 6).
pub struct ExoplanetsDisplay<'a> {
    planets: &'a [Exoplanet],
    dist_prec: usize,
    angle_prec: usize,
}

impl<'a> ExoplanetsDisplay<'a> {
    pub fn new(planets: &'a [Exoplanet]) -> Self {
        Self {
            planets,
            dist_prec: 8,
            angle_prec: 6,
        }
    }

    /// Set the number of fractional digits of the distance column.
    pub fn with_distance_precision(mut self, p: usize) -> Self {
        self.dist_prec = p;
        self
    }

    /// Set the number of fractional digits of the angle columns.
    pub fn with_angle_precision(mut self, p: usize) -> Self {
        self.angle_prec = p;
        self
    }

    fn render(&self) -> String {
        let mut table = Table::new();
        table
            .load_preset(UTF8_FULL)
            .set_content_arrangement(ContentArrangement::Dynamic);

        table.set_header(vec![
            Cell::new("#"),
            Cell::new("Name"),
            Cell::new("Distance [ly]"),
            Cell::new("RA [rad]"),
            Cell::new("DEC [deg]"),
            Cell::new("l [deg]"),
            Cell::new("b [deg]"),
            Cell::new("Status"),
        ]);

        let (dp, ap) = (self.dist_prec, self.angle_prec);
        for (i, planet) in self.planets.iter().enumerate() {
            let distance = planet
                .distance
                .map_or_else(|| "-".to_string(), |d| format!("{d:.dp$}"));
            let angle = |value: Option<f64>| {
                value.map_or_else(|| "-".to_string(), |v| format!("{v:.ap$}"))
            };
            let status = if planet.is_located() {
                "ok"
            } else {
                KEPLER_FAILURE_MESSAGE
            };

            table.add_row(Row::from(vec![
                Cell::new(i).set_alignment(CellAlignment::Right),
                Cell::new(&planet.name),
                Cell::new(distance).set_alignment(CellAlignment::Right),
                Cell::new(angle(planet.ra)).set_alignment(CellAlignment::Right),
                Cell::new(format!("{:.ap$}", planet.declination))
                    .set_alignment(CellAlignment::Right),
                Cell::new(angle(planet.galactic_longitude)).set_alignment(CellAlignment::Right),
                Cell::new(angle(planet.galactic_latitude)).set_alignment(CellAlignment::Right),
                Cell::new(status),
            ]));
        }

        table.to_string()
    }
}

impl fmt::Display for ExoplanetsDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

/// Ergonomic entry point: `planets.show()`.
pub trait ExoplanetsDisplayExt {
    fn show(&self) -> ExoplanetsDisplay<'_>;
}

impl ExoplanetsDisplayExt for [Exoplanet] {
    fn show(&self) -> ExoplanetsDisplay<'_> {
        ExoplanetsDisplay::new(self)
    }
}
