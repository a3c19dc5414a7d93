use hifitime::Epoch;
use std::str::FromStr;

use crate::constants::UnixSeconds;
use crate::exofinder_errors::ExofinderError;

/// Current wall-clock time in seconds since the Unix epoch.
///
/// Return
/// ------
/// * The UTC time of the host clock as Unix seconds, or [`ExofinderError::SystemClock`]
///   when the clock cannot be read.
pub fn now_unix_seconds() -> Result<UnixSeconds, ExofinderError> {
    let now = Epoch::now().map_err(|e| ExofinderError::SystemClock(e.to_string()))?;
    Ok(now.to_unix_seconds())
}

/// Pick the epoch at which a body is located.
///
/// A strictly positive `unix_time` is used as is; zero or negative values fall back to the
/// wall clock.
pub fn resolve_epoch(unix_time: UnixSeconds) -> Result<UnixSeconds, ExofinderError> {
    if unix_time > 0.0 {
        Ok(unix_time)
    } else {
        now_unix_seconds()
    }
}

/// Transformation from a date string to Unix seconds
///
/// Argument
/// --------
/// * `date`: a date understood by hifitime, e.g. `2024-03-01T12:00:00 UTC` or
///   `2024-03-01T12:00:00` (UTC is assumed when no time scale is given)
///
/// Return
/// ------
/// * the date as seconds since 1970-01-01T00:00:00 UTC
pub fn date_to_unix_seconds(date: &str) -> Result<UnixSeconds, ExofinderError> {
    Epoch::from_str(date.trim())
        .map(|epoch| epoch.to_unix_seconds())
        .map_err(|e| ExofinderError::InvalidEpoch(format!("{date}: {e}")))
}

#[cfg(test)]
mod time_test {
    use super::*;

    #[test]
    fn test_resolve_epoch_keeps_positive_time() {
        assert_eq!(resolve_epoch(1_700_000_000.0), Ok(1_700_000_000.0));
    }

    #[test]
    fn test_resolve_epoch_uses_clock() {
        // 2020-09-13T12:26:40 UTC
        let epoch = resolve_epoch(0.0).unwrap();
        assert!(epoch > 1_600_000_000.0);

        let epoch = resolve_epoch(-5.0).unwrap();
        assert!(epoch > 1_600_000_000.0);
    }

    #[test]
    fn test_date_to_unix_seconds() {
        // leap seconds stay well under a minute
        let t = date_to_unix_seconds("1970-01-02T00:00:00 UTC").unwrap();
        assert!((t - 86_400.0).abs() < 60.0);

        let t = date_to_unix_seconds("2000-01-01T00:00:00 UTC").unwrap();
        assert!((t - 946_684_800.0).abs() < 60.0);

        assert!(matches!(
            date_to_unix_seconds("yesterday"),
            Err(ExofinderError::InvalidEpoch(_))
        ));
    }
}
