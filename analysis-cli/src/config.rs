use serde::Deserialize;
use std::fs;
use time::macros::format_description;
use time::Date;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HistoryFormat {
    Csv,
    Json,
}

#[derive(Debug, Clone, Deserialize)]
pub struct HistoryConfig {
    pub path: String,
    pub format: HistoryFormat,
}

/// Optional explicit analysis range; omitted bounds fall back to the
/// full extent of the loaded history.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AnalysisConfig {
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub history: HistoryConfig,
    #[serde(default)]
    pub analysis: AnalysisConfig,
}

impl AppConfig {
    pub fn load() -> anyhow::Result<Self> {
        use std::env;

        let path = env::var("ANALYSIS_CONFIG").unwrap_or_else(|_| "analysis-config.toml".to_string());
        let contents = fs::read_to_string(&path)?;
        let cfg: AppConfig = toml::from_str(&contents)?;
        Ok(cfg)
    }
}

/// Parse a `YYYY-MM-DD` config date.
pub fn parse_config_date(s: &str) -> anyhow::Result<Date> {
    let format = format_description!("[year]-[month]-[day]");
    Ok(Date::parse(s, &format)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::date;

    #[test]
    fn parses_full_config() {
        let cfg: AppConfig = toml::from_str(
            r#"
            [history]
            path = "readings.csv"
            format = "csv"

            [analysis]
            start_date = "2024-01-01"
            end_date = "2024-02-29"
            "#,
        )
        .unwrap();

        assert_eq!(cfg.history.format, HistoryFormat::Csv);
        assert_eq!(cfg.analysis.start_date.as_deref(), Some("2024-01-01"));
    }

    #[test]
    fn analysis_section_is_optional() {
        let cfg: AppConfig = toml::from_str(
            r#"
            [history]
            path = "readings.json"
            format = "json"
            "#,
        )
        .unwrap();

        assert_eq!(cfg.history.format, HistoryFormat::Json);
        assert!(cfg.analysis.start_date.is_none());
        assert!(cfg.analysis.end_date.is_none());
    }

    #[test]
    fn config_dates_parse_as_calendar_dates() {
        assert_eq!(parse_config_date("2024-02-29").unwrap(), date!(2024 - 02 - 29));
        assert!(parse_config_date("2024-13-01").is_err());
    }
}
