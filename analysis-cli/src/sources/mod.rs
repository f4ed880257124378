pub mod readings_csv_file;
pub mod readings_json_file;

use tariff_engine::domain::{validate_reading, Reading, ValidationError};

use crate::config::{HistoryConfig, HistoryFormat};

#[derive(thiserror::Error, Debug)]
pub enum SourceError {
    #[error("failed to read history file: {0}")]
    Io(#[from] std::io::Error),
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid record: {0}")]
    InvalidRecord(String),
}

impl From<ValidationError> for SourceError {
    fn from(e: ValidationError) -> Self {
        Self::InvalidRecord(e.to_string())
    }
}

/// Load the complete history snapshot described by the config,
/// validated and ready for the engine (sorted, unique timestamps).
pub fn load_history(cfg: &HistoryConfig) -> Result<Vec<Reading>, SourceError> {
    let readings = match cfg.format {
        HistoryFormat::Csv => readings_csv_file::ReadingsCsvFileSource::new(&cfg.path).load()?,
        HistoryFormat::Json => readings_json_file::ReadingsJsonFileSource::new(&cfg.path).load()?,
    };
    finalize(readings)
}

/// Enforce the engine's ordering contract: validate every reading,
/// sort chronologically and drop exact-duplicate timestamps (first
/// occurrence wins).
pub fn finalize(mut readings: Vec<Reading>) -> Result<Vec<Reading>, SourceError> {
    for reading in &readings {
        validate_reading(reading)?;
    }

    readings.sort_by_key(|r| r.ts);
    let before = readings.len();
    readings.dedup_by_key(|r| r.ts);
    let dropped = before - readings.len();
    if dropped > 0 {
        tracing::warn!(dropped, "dropped readings with duplicate timestamps");
    }

    Ok(readings)
}
