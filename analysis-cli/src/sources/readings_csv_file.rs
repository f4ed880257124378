use std::{fs::File, path::PathBuf};

use csv::StringRecord;
use tariff_engine::domain::Reading;
use time::OffsetDateTime;

use super::SourceError;

/// CSV history source.
///
/// Expected header columns (by name):
/// - ts (RFC3339 timestamp)
/// - power_kw
pub struct ReadingsCsvFileSource {
    path: PathBuf,
}

impl ReadingsCsvFileSource {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self { path: path.into() }
    }

    pub fn load(&self) -> Result<Vec<Reading>, SourceError> {
        let file = File::open(&self.path)?;
        read_from(file)
    }
}

fn record_to_reading(record: &StringRecord, headers: &StringRecord) -> Result<Reading, SourceError> {
    let get = |name: &str| -> Result<&str, SourceError> {
        headers
            .iter()
            .position(|h| h == name)
            .and_then(|idx| record.get(idx))
            .ok_or_else(|| SourceError::InvalidRecord(format!("missing column '{name}' in CSV record")))
    };

    let ts_str = get("ts")?;
    let ts = OffsetDateTime::parse(ts_str.trim(), &time::format_description::well_known::Rfc3339)
        .map_err(|e| SourceError::InvalidRecord(format!("invalid ts '{ts_str}': {e}")))?;

    let power_str = get("power_kw")?;
    let power_kw: f64 = power_str
        .trim()
        .parse()
        .map_err(|e| SourceError::InvalidRecord(format!("invalid power_kw '{power_str}': {e}")))?;

    Ok(Reading::new(ts, power_kw))
}

fn read_from<R: std::io::Read>(reader: R) -> Result<Vec<Reading>, SourceError> {
    let mut rdr = csv::Reader::from_reader(reader);
    let headers = rdr.headers()?.clone();

    let mut readings = Vec::new();
    for result in rdr.records() {
        let record = result?;
        readings.push(record_to_reading(&record, &headers)?);
    }

    Ok(readings)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;
    use time::macros::datetime;

    #[test]
    fn parses_well_formed_csv() {
        let data = "\
ts,power_kw
2024-01-01T00:00:00Z,1.25
2024-01-01T00:15:00Z,0.75
";
        let readings = read_from(Cursor::new(data)).unwrap();
        assert_eq!(readings.len(), 2);
        assert_eq!(readings[0].ts, datetime!(2024-01-01 00:00:00 UTC));
        assert_eq!(readings[0].power_kw, 1.25);
        assert_eq!(readings[1].power_kw, 0.75);
    }

    #[test]
    fn column_order_does_not_matter() {
        let data = "\
power_kw,ts
2.0,2024-01-01T00:00:00+08:00
";
        let readings = read_from(Cursor::new(data)).unwrap();
        assert_eq!(readings[0].power_kw, 2.0);
        // Same instant as midnight at +08:00.
        assert_eq!(readings[0].ts, datetime!(2023-12-31 16:00:00 UTC));
    }

    #[test]
    fn rejects_bad_timestamp() {
        let data = "\
ts,power_kw
not-a-timestamp,1.0
";
        assert!(matches!(
            read_from(Cursor::new(data)),
            Err(SourceError::InvalidRecord(_))
        ));
    }

    #[test]
    fn rejects_missing_column() {
        let data = "\
ts
2024-01-01T00:00:00Z
";
        assert!(matches!(
            read_from(Cursor::new(data)),
            Err(SourceError::InvalidRecord(_))
        ));
    }
}
