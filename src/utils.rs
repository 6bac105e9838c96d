//! Utility functions for the scoring service

use chrono::{DateTime, Utc};

/// Get the current UTC timestamp
pub fn current_timestamp() -> DateTime<Utc> {
    Utc::now()
}

/// Format a swim time in seconds as `m:ss.cc`
pub fn format_time(seconds: f64) -> String {
    let hundredths = (seconds * 100.0).round() as i64;
    let sign = if hundredths < 0 { "-" } else { "" };
    let hundredths = hundredths.abs();
    let minutes = hundredths / 6000;
    let secs = (hundredths % 6000) / 100;
    let frac = hundredths % 100;
    format!("{}{}:{:02}.{:02}", sign, minutes, secs, frac)
}

/// Arithmetic mean, `None` for an empty slice
pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}
