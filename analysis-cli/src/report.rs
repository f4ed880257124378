//! Plain-text rendering of engine results. All user-facing formatting
//! lives here, outside the engine.

use tariff_engine::anomaly::AnomalyRecord;
use tariff_engine::kpi::KpiSet;
use tariff_engine::tariff::{DateRange, TariffAnalysis};

pub fn print_kpis(kpis: &KpiSet) {
    println!("== Consumption KPIs ==");
    if !kpis.available {
        println!("(insufficient history for weekly comparison: need more than 14 days)");
    }
    if let Some(latest) = &kpis.latest {
        println!("latest reading        : {:.3} kW at {}", latest.power_kw, latest.ts);
    }
    println!("today so far          : {:.2} kWh (~{:.0} cost)", kpis.kwh_today, kpis.cost_today);
    println!("month to date         : {:.1} kWh", kpis.kwh_month_to_date);
    println!("last 7 days           : {:.2} kWh", kpis.kwh_last_7_days);
    if kpis.available {
        println!("previous 7 days       : {:.2} kWh", kpis.kwh_previous_7_days);
        println!("weekly delta          : {:+.1} %", kpis.weekly_delta_percent);
    }
    println!("last 30 days          : {:.1} kWh", kpis.kwh_last_30_days);
    println!(
        "  peak / off-peak     : {:.1} / {:.1} kWh",
        kpis.peak_kwh_30d, kpis.off_peak_kwh_30d
    );
    println!(
        "projected monthly cost: {:.0} (avg {:.2}/kWh, progressive)",
        kpis.projected_monthly_cost, kpis.avg_price_per_kwh
    );
    println!();
}

pub fn print_tariff_comparison(analysis: &TariffAnalysis, range: DateRange) {
    println!("== Tariff comparison {} .. {} ==", range.start, range.end);
    if analysis.monthly.is_empty() {
        println!("(no readings in range)");
        println!();
        return;
    }

    for month in &analysis.monthly {
        println!(
            "{}-{:02}: {:.1} kWh | TOU {:.0} (flow {:.0} + fee {:.0} + surcharge {:.0}) | progressive {:.0}",
            month.year,
            month.month,
            month.tou.total_kwh,
            month.tou.total_cost,
            month.tou.flow_cost,
            month.tou.basic_fee,
            month.tou.surcharge,
            month.progressive.total_cost,
        );
    }

    let s = &analysis.summary;
    println!(
        "total: {:.1} kWh | TOU {:.0} | progressive {:.0}",
        s.total_kwh, s.cost_tou, s.cost_progressive
    );

    let difference = s.cost_progressive - s.cost_tou;
    if difference > 0.0 {
        println!("time-of-use would save {difference:.0} over this range");
    } else if difference < 0.0 {
        println!("the progressive plan is cheaper by {:.0} over this range", -difference);
    } else {
        println!("both plans cost the same over this range");
    }
    println!();
}

pub fn print_anomalies(anomalies: &[AnomalyRecord]) {
    println!("== Anomalies ==");
    if anomalies.is_empty() {
        println!("no anomalous intervals detected");
        return;
    }

    println!("{} anomalous 15-minute interval(s):", anomalies.len());
    for a in anomalies {
        println!(
            "{}: {:.3} kW (7-day avg {:.3}, threshold {:.3})",
            a.reading.ts, a.reading.power_kw, a.rolling_avg, a.threshold
        );
    }
}
