//! Time-of-use classification.
//!
//! Single source of truth for peak/off-peak semantics; every component
//! that needs a TOU split (tariff comparison, the 30-day KPI breakdown)
//! goes through [`classify`] so the definitions cannot drift apart.

use serde::Serialize;
use time::{OffsetDateTime, Weekday};

use crate::schedule::RateSchedule;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Season {
    Summer,
    NonSummer,
}

impl Season {
    /// Summer covers June through September.
    pub fn from_month(month: u8) -> Self {
        if (6..=9).contains(&month) {
            Self::Summer
        } else {
            Self::NonSummer
        }
    }

    pub fn of(ts: OffsetDateTime) -> Self {
        Self::from_month(u8::from(ts.month()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TouCategory {
    Peak,
    OffPeak,
}

/// Per-reading classification, recomputed from the timestamp alone.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TouClassification {
    pub category: TouCategory,
    pub rate: f64,
    pub season: Season,
}

fn is_weekend(ts: OffsetDateTime) -> bool {
    matches!(ts.weekday(), Weekday::Saturday | Weekday::Sunday)
}

/// Classify a timestamp into (category, rate, season).
///
/// Weekends are off-peak unconditionally. Weekday peak windows:
/// summer 09:00-24:00; non-summer 06:00-11:00 and 14:00-24:00 (the
/// 11:00-14:00 gap is part of the published rate table).
pub fn classify(ts: OffsetDateTime, schedule: &RateSchedule) -> TouClassification {
    let season = Season::of(ts);
    let hour = ts.hour();

    let category = if is_weekend(ts) {
        TouCategory::OffPeak
    } else {
        let peak = match season {
            Season::Summer => hour >= 9,
            Season::NonSummer => (6..11).contains(&hour) || hour >= 14,
        };
        if peak {
            TouCategory::Peak
        } else {
            TouCategory::OffPeak
        }
    };

    TouClassification {
        category,
        rate: schedule.tou_rates.rate(season, category),
        season,
    }
}

/// Batched variant; element-for-element identical to repeated
/// [`classify`] calls.
pub fn classify_all<'a, I>(timestamps: I, schedule: &RateSchedule) -> Vec<TouClassification>
where
    I: IntoIterator<Item = &'a OffsetDateTime>,
{
    timestamps
        .into_iter()
        .map(|ts| classify(*ts, schedule))
        .collect()
}
