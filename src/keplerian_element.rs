//! # Keplerian orbital elements of an exoplanet
//!
//! This module defines [`OrbitalElements`], the element set consumed by the position pipeline.
//! It differs from the classical osculating set in two ways:
//!
//! - the orbit is parameterized by its **period** instead of a mean anomaly at epoch, the
//!   planet being assumed at periapsis at `t = 0` (Unix epoch);
//! - the three orientation angles are kept in **degrees**, as they arrive on the wire.
//!
//! ## Provided functionality
//!
//! - [`OrbitalElements::mean_anomaly`] – time reduction `M = 2π·t / P`.
//! - [`OrbitalElements::heliocentric_distance`] – `r = a·(1 − e·cos E)`.
//! - [`OrbitalElements::true_anomaly`] – `ν = 2·atan(√((1+e)/(1−e))·tan(E/2))`.
//! - [`OrbitalElements::orbital_plane_position`] – `(r·(cos ν − e), r·√(1−e²)·sin ν)`.
//!
//! ## Units
//!
//! - Lengths: **AU**
//! - Period: **Julian years**
//! - Angles: **degrees** (inputs), **radians** (anomalies)
//! - Time: **seconds** since the Unix epoch

use nalgebra::Vector2;
use std::fmt;

use crate::constants::{
    AstronomicalUnit, Degree, Radian, UnixSeconds, DPI, SECONDS_PER_JULIAN_YEAR,
};

/// Orbital elements of a body on a bound Keplerian orbit.
///
/// Units
/// -----
/// * `semi_major_axis`: AU.
/// * `orbital_period`: Julian years.
/// * `eccentricity`: unitless, expected in `[0, 1)`.
/// * `inclination`: degrees (i).
/// * `ascending_node_longitude`: degrees (Ω).
/// * `periapsis_argument`: degrees (ω).
///
/// No range validation is performed: out-of-range values (`e ≥ 1`, negative period) surface
/// later as a Kepler failure.
#[derive(Debug, PartialEq, Clone, Copy)]
pub struct OrbitalElements {
    pub semi_major_axis: AstronomicalUnit,
    pub orbital_period: f64,
    pub eccentricity: f64,
    pub inclination: Degree,
    pub ascending_node_longitude: Degree,
    pub periapsis_argument: Degree,
}

impl OrbitalElements {
    /// Orbital period converted to seconds (`P · 365.25 · 86400`).
    pub fn period_seconds(&self) -> f64 {
        self.orbital_period * SECONDS_PER_JULIAN_YEAR
    }

    /// Mean anomaly at `epoch`, in radians.
    ///
    /// The result is not reduced modulo 2π; the Kepler solver accepts any real value.
    pub fn mean_anomaly(&self, epoch: UnixSeconds) -> Radian {
        DPI * (epoch / self.period_seconds())
    }

    /// Distance from the focus for a given eccentric anomaly, in AU.
    pub fn heliocentric_distance(&self, eccentric_anomaly: Radian) -> AstronomicalUnit {
        self.semi_major_axis * (1.0 - self.eccentricity * eccentric_anomaly.cos())
    }

    /// True anomaly for a given eccentric anomaly, in radians.
    ///
    /// For `e ≥ 1` the square root factor is NaN and so is the result.
    pub fn true_anomaly(&self, eccentric_anomaly: Radian) -> Radian {
        let e = self.eccentricity;
        2.0 * (((1.0 + e) / (1.0 - e)).sqrt() * (eccentric_anomaly / 2.0).tan()).atan()
    }

    /// Position in the orbital plane, x axis toward periapsis, in AU.
    ///
    /// Arguments
    /// ---------
    /// * `distance`: heliocentric distance `r` (AU).
    /// * `true_anomaly`: `ν` (radians).
    pub fn orbital_plane_position(
        &self,
        distance: AstronomicalUnit,
        true_anomaly: Radian,
    ) -> Vector2<f64> {
        let e = self.eccentricity;
        Vector2::new(
            distance * (true_anomaly.cos() - e),
            distance * (1.0 - e * e).sqrt() * true_anomaly.sin(),
        )
    }
}

impl fmt::Display for OrbitalElements {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Orbital Elements")?;
        writeln!(f, "-------------------------------------------")?;
        writeln!(
            f,
            "  a   (semi-major axis)       = {:.6} AU",
            self.semi_major_axis
        )?;
        writeln!(
            f,
            "  P   (orbital period)        = {:.6} yr",
            self.orbital_period
        )?;
        writeln!(
            f,
            "  e   (eccentricity)          = {:.6}",
            self.eccentricity
        )?;
        writeln!(
            f,
            "  i   (inclination)           = {:.6}°",
            self.inclination
        )?;
        writeln!(
            f,
            "  Ω   (longitude of node)     = {:.6}°",
            self.ascending_node_longitude
        )?;
        writeln!(
            f,
            "  ω   (argument of periapsis) = {:.6}°",
            self.periapsis_argument
        )
    }
}
