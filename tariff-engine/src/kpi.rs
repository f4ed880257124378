//! Rolling/period KPI snapshot.
//!
//! All relative windows are anchored to the latest timestamp in the
//! loaded history, not the wall clock, so a given snapshot is fully
//! deterministic. Trailing windows are half-open `(anchor - N days,
//! anchor]`; calendar-month bucketing is reserved for the tariff
//! comparison and never used here.

use serde::Serialize;
use time::{Date, Duration, OffsetDateTime, Time};

use crate::domain::Reading;
use crate::error::EngineError;
use crate::progressive::progressive_cost;
use crate::schedule::RateSchedule;
use crate::tou::{classify, Season, TouCategory};

/// Blended price fallback when there is no trailing consumption to
/// derive one from.
pub const DEFAULT_PRICE_PER_KWH: f64 = 3.5;

/// Snapshot of period metrics derived from one history pass.
///
/// When `available` is false the weekly comparison fields are zeroed
/// and must not be trusted; the remaining fields are still computed on
/// a best-effort basis when any history exists.
#[derive(Debug, Clone, Serialize)]
pub struct KpiSet {
    pub kwh_last_7_days: f64,
    pub kwh_previous_7_days: f64,
    pub weekly_delta_percent: f64,
    pub kwh_today: f64,
    pub cost_today: f64,
    pub kwh_month_to_date: f64,
    pub kwh_last_30_days: f64,
    pub peak_kwh_30d: f64,
    pub off_peak_kwh_30d: f64,
    pub projected_monthly_cost: f64,
    pub avg_price_per_kwh: f64,
    pub available: bool,
    pub latest: Option<Reading>,
}

impl KpiSet {
    /// Zeroed snapshot, the single fallback path for callers.
    pub fn unavailable() -> Self {
        Self {
            kwh_last_7_days: 0.0,
            kwh_previous_7_days: 0.0,
            weekly_delta_percent: 0.0,
            kwh_today: 0.0,
            cost_today: 0.0,
            kwh_month_to_date: 0.0,
            kwh_last_30_days: 0.0,
            peak_kwh_30d: 0.0,
            off_peak_kwh_30d: 0.0,
            projected_monthly_cost: 0.0,
            avg_price_per_kwh: DEFAULT_PRICE_PER_KWH,
            available: false,
            latest: None,
        }
    }
}

/// Compute the KPI snapshot for an immutable history.
///
/// Never fails: any internal error is logged and converted into the
/// zeroed unavailable snapshot at this boundary.
pub fn compute_kpis(history: &[Reading], schedule: &RateSchedule) -> KpiSet {
    match compute(history, schedule) {
        Ok(kpis) => kpis,
        Err(e) => {
            tracing::warn!(error = %e, "kpi computation failed, returning unavailable snapshot");
            KpiSet::unavailable()
        }
    }
}

fn kwh_between(history: &[Reading], after: OffsetDateTime, until: OffsetDateTime) -> f64 {
    history
        .iter()
        .filter(|r| r.ts > after && r.ts <= until)
        .map(Reading::energy_kwh)
        .sum()
}

fn compute(history: &[Reading], schedule: &RateSchedule) -> Result<KpiSet, EngineError> {
    let Some(latest) = history.iter().max_by_key(|r| r.ts) else {
        return Ok(KpiSet::unavailable());
    };
    let anchor = latest.ts;
    let earliest = history
        .iter()
        .map(|r| r.ts)
        .min()
        .unwrap_or(anchor);

    let mut kpis = KpiSet::unavailable();
    kpis.latest = Some(latest.clone());

    // Trailing 30 days drive the projected bill and the blended price.
    kpis.kwh_last_30_days = kwh_between(history, anchor - Duration::days(30), anchor);
    kpis.projected_monthly_cost =
        progressive_cost(kpis.kwh_last_30_days, Season::of(anchor), schedule);
    if kpis.kwh_last_30_days > 0.0 {
        kpis.avg_price_per_kwh = kpis.projected_monthly_cost / kpis.kwh_last_30_days;
    }

    // Today: start of the anchor's day through the anchor.
    let midnight = anchor.replace_time(Time::MIDNIGHT);
    kpis.kwh_today = history
        .iter()
        .filter(|r| r.ts >= midnight && r.ts <= anchor)
        .map(Reading::energy_kwh)
        .sum();
    kpis.cost_today = kpis.kwh_today * kpis.avg_price_per_kwh;

    // Month to date, clamped to the earliest available date when the
    // history starts mid-month.
    let month_start = Date::from_calendar_date(anchor.year(), anchor.month(), 1)?;
    let mtd_start = month_start.max(earliest.date());
    kpis.kwh_month_to_date = history
        .iter()
        .filter(|r| r.ts.date() >= mtd_start && r.ts <= anchor)
        .map(Reading::energy_kwh)
        .sum();

    // Weekly comparison needs a full preceding week in history.
    kpis.kwh_last_7_days = kwh_between(history, anchor - Duration::days(7), anchor);
    if earliest <= anchor - Duration::days(14) {
        kpis.kwh_previous_7_days =
            kwh_between(history, anchor - Duration::days(14), anchor - Duration::days(7));
        if kpis.kwh_previous_7_days > 0.0 {
            kpis.weekly_delta_percent = (kpis.kwh_last_7_days - kpis.kwh_previous_7_days)
                / kpis.kwh_previous_7_days
                * 100.0;
        }
        kpis.available = true;
    }

    // 30-day peak/off-peak split, through the shared classifier.
    let window_start = anchor - Duration::days(30);
    for reading in history.iter().filter(|r| r.ts > window_start && r.ts <= anchor) {
        match classify(reading.ts, schedule).category {
            TouCategory::Peak => kpis.peak_kwh_30d += reading.energy_kwh(),
            TouCategory::OffPeak => kpis.off_peak_kwh_30d += reading.energy_kwh(),
        }
    }

    Ok(kpis)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schedule::RESIDENTIAL_2024;
    use time::macros::datetime;

    fn constant_series(start: OffsetDateTime, days: i64, power_kw: f64) -> Vec<Reading> {
        (0..days * 96)
            .map(|i| Reading::new(start + Duration::minutes(15 * i), power_kw))
            .collect()
    }

    #[test]
    fn empty_history_is_unavailable() {
        let kpis = compute_kpis(&[], &RESIDENTIAL_2024);
        assert!(!kpis.available);
        assert!(kpis.latest.is_none());
        assert_eq!(kpis.avg_price_per_kwh, DEFAULT_PRICE_PER_KWH);
    }

    #[test]
    fn short_history_is_unavailable_with_zero_weekly_fields() {
        let history = constant_series(datetime!(2024-01-01 00:00:00 UTC), 10, 1.0);
        let kpis = compute_kpis(&history, &RESIDENTIAL_2024);
        assert!(!kpis.available);
        assert_eq!(kpis.kwh_previous_7_days, 0.0);
        assert_eq!(kpis.weekly_delta_percent, 0.0);
        // Non-weekly fields are still best-effort.
        assert!(kpis.kwh_today > 0.0);
        assert!(kpis.kwh_month_to_date > 0.0);
    }

    #[test]
    fn exactly_14_days_is_still_unavailable() {
        // The preceding-week window starts one sample before the
        // history does, so the comparison is not trustworthy yet.
        let history = constant_series(datetime!(2024-01-01 00:00:00 UTC), 14, 1.0);
        let kpis = compute_kpis(&history, &RESIDENTIAL_2024);
        assert!(!kpis.available);
    }

    #[test]
    fn constant_load_sixty_days() {
        // Jan 1 through Feb 29, 2024 (60 days); anchor 2024-02-29 23:45.
        let history = constant_series(datetime!(2024-01-01 00:00:00 UTC), 60, 1.0);
        let kpis = compute_kpis(&history, &RESIDENTIAL_2024);

        assert!(kpis.available);
        assert_eq!(
            kpis.latest.as_ref().map(|r| r.ts),
            Some(datetime!(2024-02-29 23:45:00 UTC))
        );

        // 30 days * 96 intervals * 0.25 kWh.
        assert!((kpis.kwh_last_30_days - 720.0).abs() < 1e-9);
        assert!((kpis.kwh_last_7_days - 168.0).abs() < 1e-9);
        assert!((kpis.kwh_previous_7_days - 168.0).abs() < 1e-9);
        assert_eq!(kpis.weekly_delta_percent, 0.0);
        assert!((kpis.kwh_today - 24.0).abs() < 1e-9);
        // February 2024 has 29 days, all in history.
        assert!((kpis.kwh_month_to_date - 29.0 * 24.0).abs() < 1e-9);

        let expected_cost = progressive_cost(720.0, Season::NonSummer, &RESIDENTIAL_2024);
        assert!((kpis.projected_monthly_cost - expected_cost).abs() < 1e-9);
        assert!((kpis.avg_price_per_kwh - expected_cost / 720.0).abs() < 1e-12);
        assert!((kpis.cost_today - 24.0 * kpis.avg_price_per_kwh).abs() < 1e-9);

        // TOU split covers the whole trailing window.
        assert!((kpis.peak_kwh_30d + kpis.off_peak_kwh_30d - 720.0).abs() < 1e-9);
        assert!(kpis.peak_kwh_30d > 0.0);
        assert!(kpis.off_peak_kwh_30d > 0.0);
    }

    #[test]
    fn weekly_delta_reflects_doubled_consumption() {
        let start = datetime!(2024-01-01 00:00:00 UTC);
        let mut history = constant_series(start, 14, 1.0);
        history.extend(constant_series(start + Duration::days(14), 7, 2.0));

        let kpis = compute_kpis(&history, &RESIDENTIAL_2024);
        assert!(kpis.available);
        assert!((kpis.kwh_last_7_days - 336.0).abs() < 1e-9);
        assert!((kpis.kwh_previous_7_days - 168.0).abs() < 1e-9);
        assert!((kpis.weekly_delta_percent - 100.0).abs() < 1e-9);
    }

    #[test]
    fn zero_consumption_uses_default_price() {
        let history = constant_series(datetime!(2024-01-01 00:00:00 UTC), 20, 0.0);
        let kpis = compute_kpis(&history, &RESIDENTIAL_2024);
        assert!(kpis.available);
        assert_eq!(kpis.kwh_last_30_days, 0.0);
        assert_eq!(kpis.projected_monthly_cost, 0.0);
        assert_eq!(kpis.avg_price_per_kwh, DEFAULT_PRICE_PER_KWH);
        assert_eq!(kpis.cost_today, 0.0);
        // No consumption in either week: delta stays at its guarded default.
        assert_eq!(kpis.weekly_delta_percent, 0.0);
    }

    #[test]
    fn month_to_date_clamps_to_history_start() {
        // History starts mid-month: Jan 20 through Jan 29.
        let history = constant_series(datetime!(2024-01-20 00:00:00 UTC), 10, 1.0);
        let kpis = compute_kpis(&history, &RESIDENTIAL_2024);
        // Month-to-date falls back to the earliest available date.
        assert!((kpis.kwh_month_to_date - 10.0 * 24.0).abs() < 1e-9);
    }

    #[test]
    fn month_to_date_starts_on_the_first_when_covered() {
        // Jan 20 through Feb 3; anchor is Feb 3 23:45.
        let history = constant_series(datetime!(2024-01-20 00:00:00 UTC), 15, 1.0);
        let kpis = compute_kpis(&history, &RESIDENTIAL_2024);
        assert!((kpis.kwh_month_to_date - 3.0 * 24.0).abs() < 1e-9);
    }
}
