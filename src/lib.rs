//! # exofinder
//!
//! Locate an exoplanet on the sky from its Keplerian orbital elements.
//!
//! The core is a pure pipeline: time reduction to a mean anomaly, Newton–Raphson solve of
//! Kepler's equation, projection to equatorial coordinates, then rotation into galactic
//! coordinates. Around it sit a JSON request/response record ([`exoplanet::Exoplanet`]), an
//! OBJ point-cloud exporter, a table renderer and a TCP service.
//!
//! ```rust,no_run
//! use exofinder::exoplanet::process_request;
//!
//! let reply = process_request(br#"{"unix_time": 1700000000, "eccentricity": 0.1}"#).unwrap();
//! println!("{reply}");
//! ```

pub mod constants;
pub mod display;
pub mod exofinder_errors;
pub mod exoplanet;
pub mod kepler;
pub mod keplerian_element;
pub mod positions;
mod ref_system;
pub mod server;
pub mod time;
pub mod visualization;
