use approx::assert_abs_diff_eq;
use serde_json::{json, Value};
use std::f64::consts::PI;

use exofinder::{
    constants::{DEC_NGP, KEPLER_FAILURE_MESSAGE, LY_PER_AU, RA_NGP},
    exoplanet::{process_request, Exoplanet},
    positions::GalacticPosition,
};

mod common;
use common::{assert_located_close, parse_reply};

const HALF_JULIAN_YEAR: f64 = 15_778_800.0;

fn planet(request: Value) -> Exoplanet {
    Exoplanet::from_request(&request).unwrap()
}

#[test]
fn default_body_at_unix_epoch() {
    let mut body = Exoplanet::default();
    body.locate_at(0.0).unwrap();

    assert_located_close(&body, 2.7634254182388e-5, 0.0, 0.0, 1e-15);
    assert_abs_diff_eq!(body.distance.unwrap(), 2.7635e-5, epsilon = 1e-8);

    let origin = GalacticPosition::from_equatorial(0.0, 0.0);
    assert_eq!(body.galactic_longitude, Some(origin.longitude));
    assert_eq!(body.galactic_latitude, Some(origin.latitude));
}

#[test]
fn unbound_orbit_reports_kepler_failure() {
    let reply = parse_reply(&process_request(br#"{"eccentricity": 1.5}"#).unwrap());

    assert_eq!(reply["error"], KEPLER_FAILURE_MESSAGE);
    assert_eq!(reply["distance"], Value::Null);
    assert_eq!(reply["ra"], Value::Null);
    assert_eq!(reply["eccentricity"], 1.5);
}

#[test]
fn half_period_circular_unrotated() {
    let mut body = planet(json!({
        "orbital_radius": 1.0,
        "orbital_period": 1.0,
        "eccentricity": 0.0
    }));
    body.locate_at(HALF_JULIAN_YEAR).unwrap();

    assert_located_close(&body, LY_PER_AU, PI, 0.0, 1e-9);
}

#[test]
fn polar_orbit_lifts_out_of_equator() {
    let mut body = planet(json!({
        "orbital_radius": 1.0,
        "orbital_period": 1.0,
        "eccentricity": 0.0,
        "inclination": 90.0,
        "argument_of_periapsis": 90.0
    }));
    body.locate_at(0.0).unwrap();

    // projected vector is (0, 1, 1)
    assert_located_close(&body, LY_PER_AU, PI / 2.0, 45.0, 1e-9);
}

#[test]
fn galactic_of_celestial_pole() {
    let pole = GalacticPosition::from_equatorial(0.0, 90.0);

    assert_abs_diff_eq!(pole.latitude, DEC_NGP, epsilon = 1e-9);
    assert_abs_diff_eq!(pole.longitude, 90.0 - RA_NGP + 360.0, epsilon = 1e-9);
    assert_abs_diff_eq!(pole.longitude, 257.14052, epsilon = 1e-9);
}

#[test]
fn reply_keys_follow_record_layout() {
    let reply = process_request(br#"{"unix_time": 1700000000, "stay_alive": true}"#).unwrap();

    let keys = [
        "name",
        "mass",
        "planet_radius",
        "orbital_radius",
        "orbital_period",
        "eccentricity",
        "inclination",
        "longitude_of_node",
        "argument_of_periapsis",
        "galacticLongitude",
        "galacticLatitude",
        "declination",
        "stay_alive",
        "unix_time",
        "distance",
        "ra",
    ];
    let positions: Vec<usize> = keys
        .iter()
        .map(|k| {
            reply
                .find(&format!("\"{k}\":"))
                .unwrap_or_else(|| panic!("missing {k} in {reply}"))
        })
        .collect();
    assert!(positions.windows(2).all(|w| w[0] < w[1]), "{reply}");

    let reply = parse_reply(&reply);
    assert_eq!(reply["stay_alive"], true);
    assert_eq!(reply["unix_time"], 1700000000.0);
    assert!(reply.get("error").is_none());
}

#[test]
fn failed_reply_keeps_declination_and_drops_galactic() {
    let reply = process_request(
        br#"{"unix_time": 5, "eccentricity": 2.0, "declination": -3.5, "galacticLongitude": 12.0}"#,
    )
    .unwrap();
    let reply = parse_reply(&reply);

    assert_eq!(reply["declination"], -3.5);
    // no position, so no galactic coordinates either
    assert!(reply.get("galacticLongitude").is_none());
    assert!(reply.get("galacticLatitude").is_none());
    assert_eq!(reply["error"], KEPLER_FAILURE_MESSAGE);
}

#[test]
fn located_outputs_stay_in_range() {
    for k in 0..48 {
        let mut body = planet(json!({
            "eccentricity": 0.6,
            "inclination": 33.0,
            "longitude_of_node": 120.0,
            "argument_of_periapsis": 250.0
        }));
        body.locate_at(-3.0e8 + k as f64 * 1.3e7).unwrap();

        let ra = body.ra.unwrap();
        assert!((0.0..2.0 * PI).contains(&ra), "ra = {ra}");
        assert!(body.distance.unwrap() > 0.0);
        assert!((-90.0..=90.0).contains(&body.declination));
        assert!((0.0..360.0).contains(&body.galactic_longitude.unwrap()));
        assert!((-90.0..=90.0).contains(&body.galactic_latitude.unwrap()));
    }
}
