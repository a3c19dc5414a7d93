//! # Constants and type definitions for Exofinder
//!
//! This module centralizes the **physical constants**, **conversion factors**, and **common type
//! aliases** used throughout the `exofinder` library, together with the default orbital values
//! used to seed a fresh [`Exoplanet`](crate::exoplanet::Exoplanet) record.
//!
//! ## Overview
//!
//! - Unit conversions (degrees ↔ radians, Julian years → seconds, AU → light-years)
//! - Orientation of the galactic frame (North Galactic Pole, North Celestial Pole)
//! - Core type aliases used across the crate
//! - Default record values and wire-level literals

// -------------------------------------------------------------------------------------------------
// Physical constants and unit conversions
// -------------------------------------------------------------------------------------------------

/// 2π, useful for trigonometric conversions
pub const DPI: f64 = 2. * std::f64::consts::PI;

/// Number of seconds in a day
pub const SECONDS_PER_DAY: f64 = 86_400.0;

/// Number of days in a Julian year
pub const DAYS_PER_JULIAN_YEAR: f64 = 365.25;

/// Number of seconds in a Julian year
pub const SECONDS_PER_JULIAN_YEAR: f64 = DAYS_PER_JULIAN_YEAR * SECONDS_PER_DAY;

/// Astronomical units → light-years
pub const LY_PER_AU: f64 = 1.58125074e-5;

/// Degrees → radians
pub const RADEG: f64 = std::f64::consts::PI / 180.0;

/// Radians → degrees
pub const DEGRAD: f64 = 180.0 / std::f64::consts::PI;

// -------------------------------------------------------------------------------------------------
// Galactic frame orientation
// -------------------------------------------------------------------------------------------------

/// Position angle of the North Celestial Pole in galactic coordinates (degrees)
pub const ANGLE_NCP: Degree = 123.932;

/// Declination of the North Galactic Pole (degrees)
pub const DEC_NGP: Degree = 27.12825;

/// Right ascension of the North Galactic Pole (degrees)
pub const RA_NGP: Degree = 192.85948;

// -------------------------------------------------------------------------------------------------
// Kepler solver controls
// -------------------------------------------------------------------------------------------------

/// Convergence threshold on the Newton step of the Kepler solver (radians)
pub const KEPLER_TOLERANCE: f64 = 1e-6;

/// Iteration cap of the Kepler solver
pub const KEPLER_MAX_ITER: usize = 100;

// -------------------------------------------------------------------------------------------------
// Type aliases
// -------------------------------------------------------------------------------------------------

/// Angle in degrees
pub type Degree = f64;
/// Angle in radians
pub type Radian = f64;
/// Distance in astronomical units
pub type AstronomicalUnit = f64;
/// Distance in light-years
pub type LightYear = f64;
/// Seconds elapsed since 1970-01-01T00:00:00 UTC
pub type UnixSeconds = f64;

// -------------------------------------------------------------------------------------------------
// Record defaults and wire literals
// -------------------------------------------------------------------------------------------------

/// Display label of a record built without a name
pub const DEFAULT_NAME: &str = "Gas Giant";
/// Default planetary mass (Jupiter masses)
pub const DEFAULT_MASS: f64 = 8.053;
/// Default planetary radius (Jupiter radii)
pub const DEFAULT_PLANET_RADIUS: f64 = 1.12;
/// Default semi-major axis (AU)
pub const DEFAULT_ORBITAL_RADIUS: AstronomicalUnit = 2.774;
/// Default orbital period (Julian years)
pub const DEFAULT_ORBITAL_PERIOD: f64 = 4.8;
/// Default eccentricity
pub const DEFAULT_ECCENTRICITY: f64 = 0.37;

/// Message carried by the `error` key of a response when the orbit could not be solved
pub const KEPLER_FAILURE_MESSAGE: &str = "Failed to solve Kepler's equation given the input.";

/// Largest request payload read from the transport in one exchange (bytes)
pub const MAX_REQUEST_BYTES: usize = 255;

/// Default listening address of the service
pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:2222";
