#![allow(dead_code)]

use approx::assert_relative_eq;
use exofinder::exoplanet::Exoplanet;
use serde_json::Value;

pub fn assert_located_close(
    actual: &Exoplanet,
    distance: f64,
    ra: f64,
    declination: f64,
    epsilon: f64,
) {
    assert!(actual.is_located(), "{} was not located", actual.name);
    assert_relative_eq!(
        actual.distance.unwrap_or(f64::NAN),
        distance,
        epsilon = epsilon
    );
    assert_relative_eq!(actual.ra.unwrap_or(f64::NAN), ra, epsilon = epsilon);
    assert_relative_eq!(actual.declination, declination, epsilon = epsilon);
}

pub fn parse_reply(reply: &str) -> Value {
    serde_json::from_str(reply).unwrap_or_else(|e| panic!("reply is not JSON ({e}): {reply}"))
}
