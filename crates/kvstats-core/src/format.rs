//! Human-readable byte sizes.

const UNITS: [&str; 5] = ["B", "KB", "MB", "GB", "TB"];

/// Format a byte count with base-1024 scaling and two decimals.
///
/// Zero renders as `"0.00 MB"`. Values past the TB range stay in TB.
pub fn format_size(bytes: u64) -> String {
    if bytes == 0 {
        return "0.00 MB".to_string();
    }

    let mut idx = 0;
    let mut scale: u64 = 1;
    while idx + 1 < UNITS.len() && bytes / scale >= 1024 {
        scale *= 1024;
        idx += 1;
    }

    format!("{:.2} {}", bytes as f64 / scale as f64, UNITS[idx])
}
