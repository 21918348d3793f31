//! Utility functions

use crate::types::PostId;

/// Format a byte count for human display ("1.5 MB", "0 B", "N/A" for negatives).
///
/// Used by the pipeline when composing slot status strings; the progress
/// renderer itself never recomputes sizes.
pub fn format_bytes(bytes: i64) -> String {
    if bytes < 0 {
        return "N/A".to_string();
    }
    if bytes == 0 {
        return "0 B".to_string();
    }

    const SCALE: f64 = 1024.0;
    const ORDERS: [&str; 5] = ["B", "KB", "MB", "GB", "TB"];

    let exponent = ((bytes as f64).log(SCALE).floor() as usize).min(ORDERS.len() - 1);
    let adjusted = bytes as f64 / SCALE.powi(exponent as i32);

    // Up to two decimals, trailing zeros trimmed ("1.5 MB", not "1.50 MB")
    let value = format!("{:.2}", adjusted);
    let value = value.trim_end_matches('0').trim_end_matches('.');
    format!("{} {}", value, ORDERS[exponent])
}

/// Canonical web URL of a post, used for error list entries.
pub fn canonical_post_url(base_url: &str, id: PostId) -> String {
    format!("{}/post/show/{}", base_url.trim_end_matches('/'), id)
}
