//! # Point-cloud export
//!
//! Turn a batch of located [`Exoplanet`]s into a Wavefront-OBJ-like text, one line per body:
//!
//! ```text
//! v 10.000000 0.000000 0.000000
//! v 0.000000 10.000000 0.000000
//! ```
//!
//! Each body is placed with spherical → Cartesian conversion of
//! `(distance, galacticLongitude, galacticLatitude)`, then the whole cloud is multiplied by a
//! single scale factor chosen from the spread of distances and the target screen size
//! (see [`scaling_factor`]).
//!
//! Two element kinds are supported, [`ObjElement::Vertex`] (`v`) and [`ObjElement::Point`]
//! (`p`); they only differ by the leading tag.

use itertools::{Itertools, MinMaxResult};
use nalgebra::Vector3;
use std::fmt::{self, Write};

use crate::{
    constants::{Degree, LightYear, RADEG},
    exofinder_errors::ExofinderError,
    exoplanet::Exoplanet,
};

/// Leading tag of each emitted line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ObjElement {
    /// `v x y z`
    #[default]
    Vertex,
    /// `p x y z`
    Point,
}

impl ObjElement {
    pub fn tag(&self) -> char {
        match self {
            ObjElement::Vertex => 'v',
            ObjElement::Point => 'p',
        }
    }
}

impl fmt::Display for ObjElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.tag())
    }
}

/// Serialized point cloud and its length in bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObjData {
    pub data: String,
    pub size: usize,
}

/// Spherical (distance, longitude, latitude) → Cartesian.
///
/// ```text
/// x = r·cos θ·cos φ,  y = r·sin θ·cos φ,  z = r·sin φ
/// ```
pub fn galactic_to_cartesian(
    distance: LightYear,
    longitude: Degree,
    latitude: Degree,
) -> Vector3<f64> {
    let (sin_theta, cos_theta) = (longitude * RADEG).sin_cos();
    let (sin_phi, cos_phi) = (latitude * RADEG).sin_cos();

    Vector3::new(
        distance * cos_theta * cos_phi,
        distance * sin_theta * cos_phi,
        distance * sin_phi,
    )
}

/// Scale factor fitting the spread of distances to the screen.
///
/// Arguments
/// ---------
/// * `max_distance`, `min_distance`: extreme distances of the batch.
/// * `screen_width`, `screen_height`: target extent along x and y.
///
/// Return
/// ------
/// * `min(W / Δ, H / Δ, 1)` with `Δ = max − min`; depth is never magnified.
/// * `1.0` when `Δ = 0` (all bodies at the same distance).
pub fn scaling_factor(
    max_distance: LightYear,
    min_distance: LightYear,
    screen_width: f64,
    screen_height: f64,
) -> f64 {
    let distance_range = max_distance - min_distance;
    if distance_range == 0.0 {
        return 1.0;
    }

    let scale_x = screen_width / distance_range;
    let scale_y = screen_height / distance_range;
    let scale_z = 1.0;

    scale_x.min(scale_y).min(scale_z)
}

/// Build the point cloud of a batch of located exoplanets.
///
/// Arguments
/// ---------
/// * `exoplanets`: the batch; every record must have been located.
/// * `screen_width`, `screen_height`: target screen extent, see [`scaling_factor`].
/// * `element`: line tag to emit.
///
/// Return
/// ------
/// * The OBJ text (`{tag} {x:.6} {y:.6} {z:.6}\n` per body) and its byte length.
/// * [`ExofinderError::EmptyBatch`] for an empty batch.
/// * [`ExofinderError::UnsolvedBody`] if a record has no distance or galactic coordinates.
pub fn generate_obj_data(
    exoplanets: &[Exoplanet],
    screen_width: f64,
    screen_height: f64,
    element: ObjElement,
) -> Result<ObjData, ExofinderError> {
    let bodies = exoplanets
        .iter()
        .map(|planet| match planet {
            Exoplanet {
                distance: Some(distance),
                galactic_longitude: Some(longitude),
                galactic_latitude: Some(latitude),
                ..
            } => Ok((*distance, *longitude, *latitude)),
            _ => Err(ExofinderError::UnsolvedBody(planet.name.clone())),
        })
        .collect::<Result<Vec<(LightYear, Degree, Degree)>, _>>()?;

    let distances = bodies.iter().map(|&(distance, _, _)| distance);
    let (min_distance, max_distance) = match distances.minmax_by(|a, b| a.total_cmp(b)) {
        MinMaxResult::NoElements => return Err(ExofinderError::EmptyBatch),
        MinMaxResult::OneElement(d) => (d, d),
        MinMaxResult::MinMax(min, max) => (min, max),
    };

    let scale = scaling_factor(max_distance, min_distance, screen_width, screen_height);

    let mut data = String::with_capacity(bodies.len() * 48);
    for &(distance, longitude, latitude) in &bodies {
        let point = galactic_to_cartesian(distance, longitude, latitude) * scale;

        // writing into a String cannot fail
        let _ = writeln!(
            data,
            "{} {:.6} {:.6} {:.6}",
            element, point.x, point.y, point.z
        );
    }

    let size = data.len();
    Ok(ObjData { data, size })
}
