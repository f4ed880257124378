#[derive(thiserror::Error, Debug)]
pub enum EngineError {
    #[error("invalid date range: {0}")]
    InvalidRange(String),
    #[error("invalid calendar component: {0}")]
    Calendar(String),
}

impl From<time::error::ComponentRange> for EngineError {
    fn from(e: time::error::ComponentRange) -> Self {
        Self::Calendar(e.to_string())
    }
}
