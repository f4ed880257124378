//! Stable memoization key for one analysis pass.
//!
//! Rate schedules are compile-time constants and a history snapshot is
//! immutable for the lifetime of a pass, so (history range, schedule
//! version) identifies a result. Cache ownership stays with the
//! calling layer; the engine only supplies the key.

use crate::domain::Reading;

/// Hex fingerprint of (schedule version, first ts, last ts, count).
pub fn analysis_fingerprint(readings: &[Reading], schedule_version: &str) -> String {
    let mut hasher = blake3::Hasher::new();
    hasher.update(schedule_version.as_bytes());
    hasher.update(&(readings.len() as u64).to_le_bytes());
    if let Some(first) = readings.first() {
        hasher.update(&first.ts.unix_timestamp_nanos().to_le_bytes());
    }
    if let Some(last) = readings.last() {
        hasher.update(&last.ts.unix_timestamp_nanos().to_le_bytes());
    }
    hasher.finalize().to_hex().to_string()
}
