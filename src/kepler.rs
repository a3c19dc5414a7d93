use super::constants::{Radian, DPI, KEPLER_MAX_ITER, KEPLER_TOLERANCE};
use crate::exofinder_errors::ExofinderError;

/// Bring an angle that lies in (-2π, 2π) into the half-open range [0, 2π).
///
/// Negative angles are shifted by one turn. An angle that rounds onto 2π after the
/// shift is folded back to 0 so that the upper bound stays open.
pub(crate) fn wrap_two_pi(a: Radian) -> Radian {
    let mut wrapped = if a < 0.0 { a + DPI } else { a };
    if wrapped >= DPI {
        wrapped -= DPI;
    }
    wrapped
}

/// Solve Kepler's equation `E - e·sin(E) = M` for the eccentric anomaly.
///
/// Newton–Raphson iteration started at `E₀ = M`. No reduction of `M` modulo 2π is
/// performed, the iteration works for any real mean anomaly.
///
/// Arguments
/// ---------
/// * `mean_anomaly`: mean anomaly `M` in radians.
/// * `eccentricity`: orbital eccentricity `e`, expected in `[0, 1)`.
///
/// Return
/// ------
/// * `Ok(E)` as soon as a Newton step is smaller than [`KEPLER_TOLERANCE`].
/// * [`ExofinderError::KeplerNotConverged`] after [`KEPLER_MAX_ITER`] steps, or when the
///   iteration runs into a non-finite value (e ≥ 1, infinite `M`).
pub fn solve_kepler_equation(
    mean_anomaly: Radian,
    eccentricity: f64,
) -> Result<Radian, ExofinderError> {
    let not_converged = || ExofinderError::KeplerNotConverged {
        mean_anomaly,
        eccentricity,
    };

    let mut ecc_anom = mean_anomaly;

    for _ in 0..KEPLER_MAX_ITER {
        let f = ecc_anom - eccentricity * ecc_anom.sin() - mean_anomaly;
        let f_prime = 1.0 - eccentricity * ecc_anom.cos();

        let ecc_anom_new = ecc_anom - f / f_prime;

        // NaN compares false and keeps iterating, as the step test below would
        if !ecc_anom_new.is_finite() {
            return Err(not_converged());
        }

        if (ecc_anom_new - ecc_anom).abs() < KEPLER_TOLERANCE {
            return Ok(ecc_anom_new);
        }

        ecc_anom = ecc_anom_new;
    }

    Err(not_converged())
}

#[cfg(test)]
mod kepler_test {

    use super::*;
    use approx::assert_abs_diff_eq;
    use std::f64::consts::PI;

    fn kepler_residual(ecc_anom: f64, e: f64, m: f64) -> f64 {
        ecc_anom - e * ecc_anom.sin() - m
    }

    #[test]
    fn test_zero_mean_anomaly() {
        assert_eq!(solve_kepler_equation(0.0, 0.37), Ok(0.0));
        assert_eq!(solve_kepler_equation(0.0, 0.0), Ok(0.0));
    }

    #[test]
    fn test_circular_orbit_is_identity() {
        for m in [-7.5, -1.0, 0.3, PI, 12.0] {
            let ecc_anom = solve_kepler_equation(m, 0.0).unwrap();
            assert_abs_diff_eq!(ecc_anom, m, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_solve_kepler_equation() {
        let ecc_anom = solve_kepler_equation(1.0, 0.5).unwrap();
        assert_abs_diff_eq!(ecc_anom, 1.4987011335179377, epsilon = 1e-9);

        let ecc_anom = solve_kepler_equation(2.0, 0.99).unwrap();
        assert_abs_diff_eq!(ecc_anom, 2.551156310065832, epsilon = 1e-9);
    }

    #[test]
    fn test_residual_below_tolerance() {
        let eccentricities = [0.0, 0.1, 0.37, 0.6, 0.8, 0.95];
        let anomalies = [-20.0, -3.0, -0.5, 0.01, 1.2, 2.9, 4.4, 6.2, 100.0];

        for &e in &eccentricities {
            for &m in &anomalies {
                let ecc_anom = solve_kepler_equation(m, e).unwrap();
                assert!(
                    kepler_residual(ecc_anom, e, m).abs() < 1e-5,
                    "residual too large for M = {m}, e = {e}"
                );
            }
        }
    }

    #[test]
    fn test_near_parabolic_at_aphelion() {
        let ecc_anom = solve_kepler_equation(PI, 0.9999).unwrap();
        assert_abs_diff_eq!(ecc_anom, PI, epsilon = 1e-9);
    }

    #[test]
    fn test_hyperbolic_input_does_not_converge() {
        let res = solve_kepler_equation(0.5, 1.5);
        assert_eq!(
            res,
            Err(ExofinderError::KeplerNotConverged {
                mean_anomaly: 0.5,
                eccentricity: 1.5,
            })
        );
        assert_eq!(
            res.unwrap_err().to_string(),
            "Failed to solve Kepler's equation given the input."
        );
    }

    #[test]
    fn test_infinite_mean_anomaly_does_not_converge() {
        assert!(solve_kepler_equation(f64::INFINITY, 0.3).is_err());
        assert!(solve_kepler_equation(f64::NAN, 0.3).is_err());
    }

    #[test]
    fn test_wrap_two_pi() {
        assert_eq!(wrap_two_pi(0.0), 0.0);
        assert_abs_diff_eq!(wrap_two_pi(-PI / 2.0), 1.5 * PI, epsilon = 1e-15);
        assert_eq!(wrap_two_pi(-1e-17), 0.0);
        assert_eq!(wrap_two_pi(DPI), 0.0);
    }
}
