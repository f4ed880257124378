pub mod config;
pub mod observability;
pub mod report;
pub mod sources;
