use analysis_cli::{
    config::{parse_config_date, AppConfig},
    observability, report, sources,
};
use anyhow::Result;
use tariff_engine::anomaly::detect_anomalies;
use tariff_engine::fingerprint::analysis_fingerprint;
use tariff_engine::kpi::compute_kpis;
use tariff_engine::schedule::RESIDENTIAL_2024;
use tariff_engine::tariff::{analyze_tariffs, DateRange};

fn main() -> Result<()> {
    observability::init_tracing();

    let cfg = AppConfig::load()?;
    let schedule = RESIDENTIAL_2024;

    let history = sources::load_history(&cfg.history)?;
    if history.is_empty() {
        tracing::warn!("history is empty, nothing to analyze");
        return Ok(());
    }
    tracing::info!(
        readings = history.len(),
        schedule_version = schedule.version,
        fingerprint = %analysis_fingerprint(&history, schedule.version),
        "history loaded"
    );

    let kpis = compute_kpis(&history, &schedule);
    report::print_kpis(&kpis);

    // Configured range, clamped to the history when bounds are omitted.
    let first_date = history[0].ts.date();
    let last_date = history[history.len() - 1].ts.date();
    let start = match &cfg.analysis.start_date {
        Some(s) => parse_config_date(s)?,
        None => first_date,
    };
    let end = match &cfg.analysis.end_date {
        Some(s) => parse_config_date(s)?,
        None => last_date,
    };
    let range = DateRange::new(start, end)?;

    let analysis = analyze_tariffs(&history, range, &schedule);
    report::print_tariff_comparison(&analysis, range);

    let anomalies = detect_anomalies(&history);
    report::print_anomalies(&anomalies);

    Ok(())
}
