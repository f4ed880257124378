use std::{fs, path::PathBuf};

use serde::Deserialize;
use tariff_engine::domain::Reading;
use time::OffsetDateTime;

use super::SourceError;

/// JSON history source: an array of `{"ts": "<RFC3339>", "power_kw": <f64>}`
/// objects.
pub struct ReadingsJsonFileSource {
    path: PathBuf,
}

#[derive(Debug, Deserialize)]
struct RawReading {
    ts: String,
    power_kw: f64,
}

impl ReadingsJsonFileSource {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self { path: path.into() }
    }

    pub fn load(&self) -> Result<Vec<Reading>, SourceError> {
        let contents = fs::read_to_string(&self.path)?;
        parse_records(&contents)
    }
}

fn parse_records(contents: &str) -> Result<Vec<Reading>, SourceError> {
    let raw: Vec<RawReading> = serde_json::from_str(contents)?;
    raw.into_iter()
        .map(|r| {
            let ts = OffsetDateTime::parse(
                r.ts.trim(),
                &time::format_description::well_known::Rfc3339,
            )
            .map_err(|e| SourceError::InvalidRecord(format!("invalid ts '{}': {e}", r.ts)))?;
            Ok(Reading::new(ts, r.power_kw))
        })
        .collect()
}
