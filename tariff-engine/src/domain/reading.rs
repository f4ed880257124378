use serde::{Deserialize, Serialize};
use time::macros::datetime;
use time::OffsetDateTime;

/// Hours covered by one metering interval (15 minutes).
pub const INTERVAL_HOURS: f64 = 0.25;

/// A single 15-minute meter reading: average power over the interval.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reading {
    #[serde(with = "time::serde::rfc3339")]
    pub ts: OffsetDateTime,
    pub power_kw: f64,
}

impl Reading {
    pub fn new(ts: OffsetDateTime, power_kw: f64) -> Self {
        Self { ts, power_kw }
    }

    /// Energy consumed over the interval, in kWh.
    pub fn energy_kwh(&self) -> f64 {
        self.power_kw * INTERVAL_HOURS
    }
}

#[derive(thiserror::Error, Debug)]
pub enum ValidationError {
    #[error("power_kw must be non-negative, got {0}")]
    NegativePower(f64),
    #[error("timestamp out of allowed range: {0}")]
    TimestampOutOfRange(OffsetDateTime),
}

/// Pure validation of a `Reading`.
///
/// Rules:
/// - power must be non-negative.
/// - ts must be within a broad sanity window [2000-01-01, 2100-01-01).
pub fn validate_reading(reading: &Reading) -> Result<(), ValidationError> {
    if reading.power_kw < 0.0 {
        return Err(ValidationError::NegativePower(reading.power_kw));
    }

    let min_ts = datetime!(2000-01-01 00:00:00 UTC);
    let max_ts = datetime!(2100-01-01 00:00:00 UTC);

    if reading.ts < min_ts || reading.ts >= max_ts {
        return Err(ValidationError::TimestampOutOfRange(reading.ts));
    }

    Ok(())
}
