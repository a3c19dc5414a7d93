//! # Exoplanet request/result record
//!
//! [`Exoplanet`] bundles the orbital inputs of one request together with the computed sky
//! position. A record lives for exactly one exchange:
//!
//! 1. it starts from the defaults ([`Exoplanet::default`], a "Gas Giant" on a 2.774 AU orbit),
//! 2. numeric request fields are overlaid with [`Exoplanet::from_request`],
//! 3. [`Exoplanet::locate`] runs the position pipeline once and stores the outcome,
//! 4. [`Exoplanet::to_response`] renders the JSON reply.
//!
//! ## Wire format
//!
//! Request keys are optional and ignored unless their value is a JSON number
//! (`stay_alive` must be a boolean). On success the response echoes the inputs and carries
//! `distance` (ly), `ra` (rad), `declination`, `galacticLongitude` and `galacticLatitude`
//! (degrees). On failure `distance` and `ra` are `null`, `galacticLongitude` and
//! `galacticLatitude` are left out, and an `error` key holds [`KEPLER_FAILURE_MESSAGE`].

use serde::Serialize;
use serde_json::{Map, Value};

use crate::{
    constants::{
        AstronomicalUnit, Degree, LightYear, Radian, UnixSeconds, DEFAULT_ECCENTRICITY,
        DEFAULT_MASS, DEFAULT_NAME, DEFAULT_ORBITAL_PERIOD, DEFAULT_ORBITAL_RADIUS,
        DEFAULT_PLANET_RADIUS, KEPLER_FAILURE_MESSAGE,
    },
    exofinder_errors::ExofinderError,
    keplerian_element::OrbitalElements,
    positions::{EquatorialPosition, GalacticPosition},
    time::resolve_epoch,
};

/// Orbital elements of an exoplanet and, once located, its position on the sky.
///
/// `distance` and `ra` are `None` until [`Exoplanet::locate`] succeeds. `declination` and the
/// galactic coordinates hold their request (or default) values until then; a failed locate
/// clears the galactic coordinates, which have no meaning without a position.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Exoplanet {
    pub name: String,
    /// Jupiter masses, informational.
    pub mass: f64,
    /// Jupiter radii, informational.
    pub planet_radius: f64,
    pub orbital_radius: AstronomicalUnit,
    /// Julian years.
    pub orbital_period: f64,
    pub eccentricity: f64,
    pub inclination: Degree,
    pub longitude_of_node: Degree,
    pub argument_of_periapsis: Degree,
    #[serde(rename = "galacticLongitude", skip_serializing_if = "Option::is_none")]
    pub galactic_longitude: Option<Degree>,
    #[serde(rename = "galacticLatitude", skip_serializing_if = "Option::is_none")]
    pub galactic_latitude: Option<Degree>,
    pub declination: Degree,
    pub stay_alive: bool,
    /// Requested epoch; `0` (or negative) means "now".
    pub unix_time: UnixSeconds,
    pub distance: Option<LightYear>,
    pub ra: Option<Radian>,
}

/// JSON reply for one request.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExoplanetResponse {
    #[serde(flatten)]
    pub exoplanet: Exoplanet,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl Default for Exoplanet {
    fn default() -> Self {
        Exoplanet {
            name: DEFAULT_NAME.to_string(),
            mass: DEFAULT_MASS,
            planet_radius: DEFAULT_PLANET_RADIUS,
            orbital_radius: DEFAULT_ORBITAL_RADIUS,
            orbital_period: DEFAULT_ORBITAL_PERIOD,
            eccentricity: DEFAULT_ECCENTRICITY,
            inclination: 0.0,
            longitude_of_node: 0.0,
            argument_of_periapsis: 0.0,
            galactic_longitude: Some(0.0),
            galactic_latitude: Some(0.0),
            declination: 0.0,
            stay_alive: false,
            unix_time: 0.0,
            distance: None,
            ra: None,
        }
    }
}

/// Overwrite `slot` when `key` holds a JSON number.
fn overlay_number(fields: &Map<String, Value>, key: &str, slot: &mut f64) {
    if let Some(v) = fields.get(key).and_then(Value::as_f64) {
        *slot = v;
    }
}

/// Set `slot` when `key` holds a JSON number.
fn overlay_optional(fields: &Map<String, Value>, key: &str, slot: &mut Option<f64>) {
    if let Some(v) = fields.get(key).and_then(Value::as_f64) {
        *slot = Some(v);
    }
}

impl Exoplanet {
    /// Build a record from a parsed JSON request.
    ///
    /// Arguments
    /// ---------
    /// * `request`: the decoded request; must be a JSON object.
    ///
    /// Return
    /// ------
    /// * The default record with every numeric field present in `request` overlaid.
    /// * [`ExofinderError::MalformedRequest`] if `request` is not an object.
    ///
    /// Remarks
    /// -------
    /// * `distance` and `ra` are accepted for compatibility, then overwritten by
    ///   [`Exoplanet::locate`].
    /// * `stay_alive` is kept only when it is a boolean; anything else means `false`.
    pub fn from_request(request: &Value) -> Result<Self, ExofinderError> {
        let fields = request.as_object().ok_or_else(|| {
            ExofinderError::MalformedRequest("request must be a JSON object".into())
        })?;

        let mut planet = Exoplanet::default();

        overlay_number(fields, "mass", &mut planet.mass);
        overlay_number(fields, "planet_radius", &mut planet.planet_radius);
        overlay_number(fields, "orbital_radius", &mut planet.orbital_radius);
        overlay_number(fields, "orbital_period", &mut planet.orbital_period);
        overlay_number(fields, "eccentricity", &mut planet.eccentricity);
        overlay_number(fields, "inclination", &mut planet.inclination);
        overlay_number(fields, "longitude_of_node", &mut planet.longitude_of_node);
        overlay_number(fields, "argument_of_periapsis", &mut planet.argument_of_periapsis);
        overlay_number(fields, "unix_time", &mut planet.unix_time);
        overlay_number(fields, "declination", &mut planet.declination);
        overlay_optional(fields, "galacticLongitude", &mut planet.galactic_longitude);
        overlay_optional(fields, "galacticLatitude", &mut planet.galactic_latitude);

        // no-ops: both are recomputed
        planet.distance = fields.get("distance").and_then(Value::as_f64);
        planet.ra = fields.get("ra").and_then(Value::as_f64);

        planet.stay_alive = fields
            .get("stay_alive")
            .and_then(Value::as_bool)
            .unwrap_or(false);

        Ok(planet)
    }

    /// Decode a raw request payload and build the record.
    ///
    /// Trailing NUL bytes and surrounding whitespace are ignored.
    pub fn from_request_bytes(payload: &[u8]) -> Result<Self, ExofinderError> {
        let text = std::str::from_utf8(payload)
            .map_err(|e| ExofinderError::MalformedRequest(e.to_string()))?
            .trim_end_matches('\0')
            .trim();
        let request: Value = serde_json::from_str(text)
            .map_err(|e| ExofinderError::MalformedRequest(e.to_string()))?;
        Exoplanet::from_request(&request)
    }

    /// The orbital elements carried by this record.
    pub fn orbital_elements(&self) -> OrbitalElements {
        OrbitalElements {
            semi_major_axis: self.orbital_radius,
            orbital_period: self.orbital_period,
            eccentricity: self.eccentricity,
            inclination: self.inclination,
            ascending_node_longitude: self.longitude_of_node,
            periapsis_argument: self.argument_of_periapsis,
        }
    }

    /// Compute the position of the planet at `epoch` and store it in the record.
    ///
    /// On success `distance`, `ra`, `declination` and both galactic coordinates are set.
    /// On failure `distance`, `ra` and the galactic coordinates are cleared, `declination` is
    /// left untouched and the error is returned.
    pub fn locate_at(&mut self, epoch: UnixSeconds) -> Result<(), ExofinderError> {
        match EquatorialPosition::from_orbit(&self.orbital_elements(), epoch) {
            Ok(eq) => {
                let gal = GalacticPosition::from(&eq);
                self.distance = Some(eq.distance);
                self.ra = Some(eq.ra);
                self.declination = eq.declination;
                self.galactic_longitude = Some(gal.longitude);
                self.galactic_latitude = Some(gal.latitude);
                Ok(())
            }
            Err(err) => {
                self.distance = None;
                self.ra = None;
                self.galactic_longitude = None;
                self.galactic_latitude = None;
                Err(err)
            }
        }
    }

    /// Compute the position at the requested epoch, or now when `unix_time ≤ 0`.
    ///
    /// Return
    /// ------
    /// * [`ExofinderError::KeplerNotConverged`] when the orbit could not be solved.
    /// * [`ExofinderError::SystemClock`] if the wall clock was needed and could not be read.
    pub fn locate(&mut self) -> Result<(), ExofinderError> {
        let epoch = resolve_epoch(self.unix_time)?;
        self.locate_at(epoch)
    }

    /// `true` once both `distance` and `ra` are known.
    pub fn is_located(&self) -> bool {
        self.distance.is_some() && self.ra.is_some()
    }

    /// Locate the record, then render its compact JSON reply.
    ///
    /// A failed Kepler solve is not an error here: it yields a regular reply carrying the
    /// `error` key. Any other failure (e.g. an unreadable clock) is returned.
    pub fn reply(&mut self) -> Result<String, ExofinderError> {
        match self.locate() {
            Ok(()) | Err(ExofinderError::KeplerNotConverged { .. }) => {}
            Err(err) => return Err(err),
        }
        Ok(serde_json::to_string(&self.to_response())?)
    }

    /// Render the reply, attaching the Kepler failure message when the record is not located.
    pub fn to_response(&self) -> ExoplanetResponse {
        let mut exoplanet = self.clone();
        let error = if self.is_located() {
            None
        } else {
            exoplanet.distance = None;
            exoplanet.ra = None;
            exoplanet.galactic_longitude = None;
            exoplanet.galactic_latitude = None;
            Some(KEPLER_FAILURE_MESSAGE.to_string())
        };
        ExoplanetResponse { exoplanet, error }
    }
}

/// Run one complete exchange on a raw payload: decode, locate, encode.
///
/// Return
/// ------
/// * The compact JSON reply. A failed Kepler solve is a regular reply with an `error` key.
/// * [`ExofinderError::MalformedRequest`] when the payload is not a JSON object; no reply
///   must be sent in that case.
pub fn process_request(payload: &[u8]) -> Result<String, ExofinderError> {
    Exoplanet::from_request_bytes(payload)?.reply()
}

#[cfg(test)]
mod exoplanet_test {
    use super::*;
    use approx::assert_abs_diff_eq;
    use serde_json::json;

    use crate::constants::LY_PER_AU;

    #[test]
    fn test_defaults() {
        let planet = Exoplanet::default();
        assert_eq!(planet.name, "Gas Giant");
        assert_eq!(planet.orbital_radius, 2.774);
        assert_eq!(planet.orbital_period, 4.8);
        assert_eq!(planet.eccentricity, 0.37);
        assert_eq!(planet.unix_time, 0.0);
        assert!(!planet.is_located());
    }

    #[test]
    fn test_request_overlay() {
        let request = json!({
            "mass": 1.5,
            "orbital_radius": 1,
            "eccentricity": "0.9",
            "inclination": null,
            "unknown": 42,
            "galacticLatitude": 4.5,
            "stay_alive": true
        });
        let planet = Exoplanet::from_request(&request).unwrap();

        assert_eq!(planet.mass, 1.5);
        assert_eq!(planet.orbital_radius, 1.0);
        // non-numeric values keep the default
        assert_eq!(planet.eccentricity, 0.37);
        assert_eq!(planet.inclination, 0.0);
        assert_eq!(planet.planet_radius, 1.12);
        assert_eq!(planet.galactic_latitude, Some(4.5));
        assert_eq!(planet.galactic_longitude, Some(0.0));
        assert!(planet.stay_alive);
    }

    #[test]
    fn test_stay_alive_must_be_boolean() {
        let planet = Exoplanet::from_request(&json!({"stay_alive": 1})).unwrap();
        assert!(!planet.stay_alive);
    }

    #[test]
    fn test_request_must_be_object() {
        assert_eq!(
            Exoplanet::from_request(&json!([1, 2, 3])),
            Err(ExofinderError::MalformedRequest(
                "request must be a JSON object".into()
            ))
        );
        assert!(matches!(
            Exoplanet::from_request_bytes(b"{\"mass\": "),
            Err(ExofinderError::MalformedRequest(_))
        ));
    }

    #[test]
    fn test_payload_with_trailing_nul() {
        let planet = Exoplanet::from_request_bytes(b"{\"orbital_period\": 2.0}\0\0").unwrap();
        assert_eq!(planet.orbital_period, 2.0);
    }

    #[test]
    fn test_locate_default_body() {
        let mut planet = Exoplanet::default();
        planet.locate_at(0.0).unwrap();

        assert_abs_diff_eq!(
            planet.distance.unwrap(),
            2.774 * (1.0 - 0.37) * LY_PER_AU,
            epsilon = 1e-18
        );
        assert_eq!(planet.ra, Some(0.0));
        assert_eq!(planet.declination, 0.0);
        assert_abs_diff_eq!(
            planet.galactic_longitude.unwrap(),
            330.08564893604387,
            epsilon = 1e-9
        );
        assert_abs_diff_eq!(
            planet.galactic_latitude.unwrap(),
            -29.788448146563177,
            epsilon = 1e-9
        );
    }

    #[test]
    fn test_request_distance_and_ra_are_overwritten() {
        let request = json!({"unix_time": 1, "distance": 99.0, "ra": 3.0});
        let mut planet = Exoplanet::from_request(&request).unwrap();
        assert_eq!(planet.distance, Some(99.0));

        planet.locate().unwrap();
        assert!(planet.distance.unwrap() < 1e-3);
        assert!(planet.ra.unwrap() < 1e-3);
    }

    #[test]
    fn test_failed_response_shape() {
        let request = json!({"unix_time": 1, "eccentricity": 1.5, "declination": 12.5});
        let mut planet = Exoplanet::from_request(&request).unwrap();
        assert!(planet.locate().is_err());

        let response = serde_json::to_value(planet.to_response()).unwrap();
        assert_eq!(response["error"], KEPLER_FAILURE_MESSAGE);
        assert_eq!(response["distance"], Value::Null);
        assert_eq!(response["ra"], Value::Null);
        assert_eq!(response["declination"], 12.5);
        assert_eq!(response["eccentricity"], 1.5);
        assert!(response.get("galacticLongitude").is_none());
        assert!(response.get("galacticLatitude").is_none());
    }

    #[test]
    fn test_success_response_shape() {
        let reply = process_request(br#"{"unix_time": 1, "orbital_radius": 1.0}"#).unwrap();
        let response: Value = serde_json::from_str(&reply).unwrap();

        assert!(response.get("error").is_none());
        assert!(response["distance"].is_f64());
        assert!(response["ra"].is_f64());
        assert_eq!(response["name"], "Gas Giant");
        assert_eq!(response["stay_alive"], false);
        for key in [
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
            "unix_time",
        ] {
            assert!(response[key].is_number(), "missing {key}");
        }
    }

    #[test]
    fn test_malformed_payload_has_no_reply() {
        assert!(matches!(
            process_request(b"not json"),
            Err(ExofinderError::MalformedRequest(_))
        ));
    }
}
