//! Month-aware tariff comparison.
//!
//! Both schemes reset every calendar month (progressive brackets and
//! the TOU surcharge threshold), so readings are always bucketed by
//! month first and the per-scheme formulas applied per bucket; the
//! range total is the sum of the monthly results. Trailing-window KPIs
//! deliberately do not share this bucketing (see `kpi`).

use std::collections::BTreeMap;

use serde::Serialize;
use time::Date;

use crate::domain::Reading;
use crate::error::EngineError;
use crate::progressive::progressive_cost;
use crate::schedule::RateSchedule;
use crate::tou::{classify, Season, TouClassification};

/// Inclusive calendar-date range for an analysis pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DateRange {
    pub start: Date,
    pub end: Date,
}

impl DateRange {
    pub fn new(start: Date, end: Date) -> Result<Self, EngineError> {
        if end < start {
            return Err(EngineError::InvalidRange(format!(
                "end {end} precedes start {start}"
            )));
        }
        Ok(Self { start, end })
    }

    pub fn contains(&self, date: Date) -> bool {
        date >= self.start && date <= self.end
    }
}

/// One calendar month's bill under a single scheme.
#[derive(Debug, Clone, Copy, Default, Serialize)]
pub struct MonthlyBill {
    pub total_kwh: f64,
    pub flow_cost: f64,
    pub basic_fee: f64,
    pub surcharge: f64,
    pub total_cost: f64,
}

/// Both schemes evaluated over the same calendar month.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct MonthlyComparison {
    pub year: i32,
    pub month: u8,
    pub season: Season,
    pub tou: MonthlyBill,
    pub progressive: MonthlyBill,
}

/// Per-reading classification and incremental TOU cost, retained for
/// downstream charting.
#[derive(Debug, Clone, Serialize)]
pub struct ReadingDetail {
    pub reading: Reading,
    pub classification: TouClassification,
    pub energy_kwh: f64,
    pub flow_cost: f64,
}

#[derive(Debug, Clone, Copy, Default, Serialize)]
pub struct TariffSummary {
    pub total_kwh: f64,
    pub cost_progressive: f64,
    pub cost_tou: f64,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct TariffAnalysis {
    pub summary: TariffSummary,
    pub monthly: Vec<MonthlyComparison>,
    pub detail: Vec<ReadingDetail>,
}

#[derive(Default)]
struct MonthAccumulator {
    kwh: f64,
    flow_cost: f64,
}

/// Evaluate both tariff schemes over the readings whose date falls in
/// `range`. An empty selection yields a zeroed summary and no detail.
pub fn analyze_tariffs(
    readings: &[Reading],
    range: DateRange,
    schedule: &RateSchedule,
) -> TariffAnalysis {
    let mut detail = Vec::new();
    let mut months: BTreeMap<(i32, u8), MonthAccumulator> = BTreeMap::new();

    for reading in readings {
        let date = reading.ts.date();
        if !range.contains(date) {
            continue;
        }

        let classification = classify(reading.ts, schedule);
        let energy_kwh = reading.energy_kwh();
        let flow_cost = energy_kwh * classification.rate;

        let acc = months
            .entry((date.year(), u8::from(date.month())))
            .or_default();
        acc.kwh += energy_kwh;
        acc.flow_cost += flow_cost;

        detail.push(ReadingDetail {
            reading: reading.clone(),
            classification,
            energy_kwh,
            flow_cost,
        });
    }

    let mut summary = TariffSummary::default();
    let mut monthly = Vec::with_capacity(months.len());

    for ((year, month), acc) in months {
        let season = Season::from_month(month);

        let surcharge =
            (acc.kwh - schedule.surcharge_threshold_kwh).max(0.0) * schedule.surcharge_rate_per_kwh;
        let tou = MonthlyBill {
            total_kwh: acc.kwh,
            flow_cost: acc.flow_cost,
            basic_fee: schedule.basic_fee_monthly,
            surcharge,
            total_cost: acc.flow_cost + schedule.basic_fee_monthly + surcharge,
        };

        let progressive = MonthlyBill {
            total_kwh: acc.kwh,
            total_cost: progressive_cost(acc.kwh, season, schedule),
            ..MonthlyBill::default()
        };

        summary.total_kwh += acc.kwh;
        summary.cost_tou += tou.total_cost;
        summary.cost_progressive += progressive.total_cost;

        monthly.push(MonthlyComparison {
            year,
            month,
            season,
            tou,
            progressive,
        });
    }

    TariffAnalysis {
        summary,
        monthly,
        detail,
    }
}
