//! Feature preparation for the external forecast model.
//!
//! The model itself (training and inference) lives outside this crate;
//! only its input contract is produced here: one row per 15-minute
//! interval of the target day with calendar features and the prior-day
//! same-time lag value. A missing lag reading is zero-filled and the
//! degradation surfaced to the caller rather than silently absorbed.

use std::collections::HashMap;

use serde::Serialize;
use time::{Date, Duration, OffsetDateTime, Weekday};

use crate::domain::Reading;

/// One feature row for the forecast model.
#[derive(Debug, Clone, Serialize)]
pub struct FeatureRow {
    #[serde(with = "time::serde::rfc3339")]
    pub ts: OffsetDateTime,
    pub hour: u8,
    /// Monday = 0 through Sunday = 6.
    pub day_of_week: u8,
    pub quarter: u8,
    pub month: u8,
    pub is_weekend: bool,
    pub lag_1_day: f64,
}

/// Feature matrix for one target day, 96 rows.
#[derive(Debug, Clone, Serialize)]
pub struct FeatureSet {
    pub rows: Vec<FeatureRow>,
    /// Number of rows whose lag value had to be zero-filled.
    pub zero_filled: usize,
}

impl FeatureSet {
    /// True when any lag value was substituted; callers should treat
    /// predictions from a degraded matrix accordingly.
    pub fn is_degraded(&self) -> bool {
        self.zero_filled > 0
    }
}

fn day_of_week(ts: OffsetDateTime) -> u8 {
    ts.weekday().number_days_from_monday()
}

/// Build the 96-row feature matrix for `target_date`, pulling the
/// prior-day lag values out of `history` by exact timestamp match.
pub fn build_feature_rows(history: &[Reading], target_date: Date) -> FeatureSet {
    let by_ts: HashMap<OffsetDateTime, f64> =
        history.iter().map(|r| (r.ts, r.power_kw)).collect();

    let day_start = target_date.midnight().assume_utc();
    let mut rows = Vec::with_capacity(96);
    let mut zero_filled = 0;

    for i in 0..96i64 {
        let ts = day_start + Duration::minutes(15 * i);
        let lag_ts = ts - Duration::days(1);
        let lag_1_day = match by_ts.get(&lag_ts) {
            Some(power) => *power,
            None => {
                zero_filled += 1;
                0.0
            }
        };

        let month = u8::from(ts.month());
        rows.push(FeatureRow {
            ts,
            hour: ts.hour(),
            day_of_week: day_of_week(ts),
            quarter: (month - 1) / 3 + 1,
            month,
            is_weekend: matches!(ts.weekday(), Weekday::Saturday | Weekday::Sunday),
            lag_1_day,
        });
    }

    if zero_filled > 0 {
        tracing::warn!(
            target_date = %target_date,
            zero_filled,
            "prior-day lag readings missing, feature matrix is degraded"
        );
    }

    FeatureSet { rows, zero_filled }
}
