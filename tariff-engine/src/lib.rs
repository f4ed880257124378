pub mod anomaly;
pub mod domain;
pub mod error;
pub mod fingerprint;
pub mod forecast;
pub mod kpi;
pub mod progressive;
pub mod schedule;
pub mod tariff;
pub mod tou;

pub use domain::Reading;
pub use error::EngineError;
pub use schedule::RateSchedule;
