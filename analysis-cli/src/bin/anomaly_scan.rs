use analysis_cli::{config::AppConfig, observability, report, sources};
use anyhow::Result;
use tariff_engine::anomaly::detect_anomalies;

fn main() -> Result<()> {
    observability::init_tracing();

    let cfg = AppConfig::load()?;
    let history = sources::load_history(&cfg.history)?;
    tracing::info!(readings = history.len(), "scanning history for anomalies");

    let anomalies = detect_anomalies(&history);
    report::print_anomalies(&anomalies);

    Ok(())
}
