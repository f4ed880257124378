use serde::Serialize;

use crate::tou::{Season, TouCategory};

/// One step of the progressive (block) tariff. Capacity is the number of
/// kWh billable at this bracket's rate; the last bracket is unbounded.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct ProgressiveBracket {
    pub capacity_kwh: f64,
    pub summer_rate: f64,
    pub nonsummer_rate: f64,
}

impl ProgressiveBracket {
    pub fn rate(&self, season: Season) -> f64 {
        match season {
            Season::Summer => self.summer_rate,
            Season::NonSummer => self.nonsummer_rate,
        }
    }
}

/// Flow rates for the two-tier time-of-use scheme, per season.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct TouRateTable {
    pub summer_peak: f64,
    pub summer_off_peak: f64,
    pub nonsummer_peak: f64,
    pub nonsummer_off_peak: f64,
}

impl TouRateTable {
    pub fn rate(&self, season: Season, category: TouCategory) -> f64 {
        match (season, category) {
            (Season::Summer, TouCategory::Peak) => self.summer_peak,
            (Season::Summer, TouCategory::OffPeak) => self.summer_off_peak,
            (Season::NonSummer, TouCategory::Peak) => self.nonsummer_peak,
            (Season::NonSummer, TouCategory::OffPeak) => self.nonsummer_off_peak,
        }
    }
}

/// Immutable rate configuration for both billing schemes.
#[derive(Debug, Clone, Serialize)]
pub struct RateSchedule {
    /// Effective date of the published rate tables.
    pub version: &'static str,
    /// Ordered ascending; the last bracket has infinite capacity.
    pub progressive_brackets: &'static [ProgressiveBracket],
    pub basic_fee_monthly: f64,
    pub surcharge_threshold_kwh: f64,
    pub surcharge_rate_per_kwh: f64,
    pub tou_rates: TouRateTable,
}

/// Residential rates effective 2024-04-01.
pub const RESIDENTIAL_2024: RateSchedule = RateSchedule {
    version: "2024-04-01",
    progressive_brackets: &[
        ProgressiveBracket { capacity_kwh: 120.0, summer_rate: 1.68, nonsummer_rate: 1.68 },
        ProgressiveBracket { capacity_kwh: 210.0, summer_rate: 2.45, nonsummer_rate: 2.16 },
        ProgressiveBracket { capacity_kwh: 170.0, summer_rate: 3.70, nonsummer_rate: 3.03 },
        ProgressiveBracket { capacity_kwh: 200.0, summer_rate: 5.04, nonsummer_rate: 4.14 },
        ProgressiveBracket { capacity_kwh: 300.0, summer_rate: 6.24, nonsummer_rate: 5.07 },
        ProgressiveBracket { capacity_kwh: f64::INFINITY, summer_rate: 8.46, nonsummer_rate: 6.63 },
    ],
    basic_fee_monthly: 75.0,
    surcharge_threshold_kwh: 2000.0,
    surcharge_rate_per_kwh: 0.99,
    tou_rates: TouRateTable {
        summer_peak: 4.71,
        summer_off_peak: 1.85,
        nonsummer_peak: 4.48,
        nonsummer_off_peak: 1.78,
    },
};

impl Default for RateSchedule {
    fn default() -> Self {
        RESIDENTIAL_2024
    }
}
