//! Rolling anomaly detection over the raw power series.
//!
//! Independent of all tariff logic. Each position gets a centered
//! 7-day (672-sample) rolling mean and standard deviation; positions
//! with fewer than one day (96) of surrounding samples produce no
//! classification at all. The threshold is one-sided: only consumption
//! above `mean + 2*std` is flagged, never under-consumption.

use serde::Serialize;

use crate::domain::Reading;

/// Centered rolling window: 7 days of 15-minute samples.
pub const ROLLING_WINDOW: usize = 96 * 7;
/// Minimum in-window samples (1 day) before a position is classified.
pub const MIN_SAMPLES: usize = 96;
/// Standard deviations above the rolling mean that mark an anomaly.
pub const THRESHOLD_SIGMA: f64 = 2.0;

/// A flagged reading together with the rolling statistics that
/// condemned it, for auditability.
#[derive(Debug, Clone, Serialize)]
pub struct AnomalyRecord {
    pub reading: Reading,
    pub rolling_avg: f64,
    pub threshold: f64,
}

/// Scan the full history and return flagged readings in chronological
/// order (input order is preserved).
pub fn detect_anomalies(history: &[Reading]) -> Vec<AnomalyRecord> {
    let n = history.len();
    if n == 0 {
        return Vec::new();
    }

    // Prefix sums of power and squared power for O(1) window stats.
    let mut sum = vec![0.0f64; n + 1];
    let mut sum_sq = vec![0.0f64; n + 1];
    for (i, r) in history.iter().enumerate() {
        sum[i + 1] = sum[i] + r.power_kw;
        sum_sq[i + 1] = sum_sq[i] + r.power_kw * r.power_kw;
    }

    let mut anomalies = Vec::new();
    let half = ROLLING_WINDOW / 2;

    for (i, reading) in history.iter().enumerate() {
        // Centered window [i - 336, i + 335], clamped to the series.
        let lo = i.saturating_sub(half);
        let hi = (i + half).min(n);
        let count = hi - lo;
        if count < MIN_SAMPLES {
            continue;
        }

        let s = sum[hi] - sum[lo];
        let s2 = sum_sq[hi] - sum_sq[lo];
        let mean = s / count as f64;
        // Sample variance (n - 1 divisor), clamped against rounding.
        let var = ((s2 - s * s / count as f64) / (count as f64 - 1.0)).max(0.0);
        let threshold = mean + THRESHOLD_SIGMA * var.sqrt();

        if reading.power_kw > threshold {
            anomalies.push(AnomalyRecord {
                reading: reading.clone(),
                rolling_avg: mean,
                threshold,
            });
        }
    }

    anomalies
}
