//! File size helpers
//!
//! Human-readable size labels and the megabyte conversion used by the
//! size limit. Both use decimal kilobytes; the label switches to megabytes
//! at 1024 KB to match what upload widgets traditionally display.

/// Bytes per kilobyte in size labels
pub const KILOBYTE: u64 = 1000;

/// Kilobytes per megabyte in size labels
pub const MEGABYTE: u64 = 1024;

/// Bytes per megabyte for size limit checks
pub const BYTES_PER_MEGABYTE: f64 = 1_000_000.0;

/// Format a byte count as a short label such as `"12KB"` or `"3.50MB"`
///
/// Absent and zero sizes render as `"0KB"`.
pub fn pretty_file_size(size: Option<u64>) -> String {
    let bytes = size.unwrap_or(0);
    if bytes == 0 {
        return "0KB".to_string();
    }

    let size_in_kb = (bytes as f64 / KILOBYTE as f64).round();
    if size_in_kb < MEGABYTE as f64 {
        format!("{size_in_kb}KB")
    } else {
        format!("{:.2}MB", size_in_kb / MEGABYTE as f64)
    }
}

/// Convert a byte count to megabytes (absent sizes are zero)
pub fn bytes_to_mb(size: Option<u64>) -> f64 {
    size.unwrap_or(0) as f64 / BYTES_PER_MEGABYTE
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pretty_file_size_default() {
        assert_eq!(pretty_file_size(None), "0KB");
        assert_eq!(pretty_file_size(Some(0)), "0KB");
    }

    #[test]
    fn test_pretty_file_size_kilobytes() {
        assert_eq!(pretty_file_size(Some(1023)), "1KB");
        assert_eq!(pretty_file_size(Some(499)), "0KB");
        assert_eq!(pretty_file_size(Some(1500)), "2KB");
        assert_eq!(pretty_file_size(Some(1_023_000)), "1023KB");
    }

    #[test]
    fn test_pretty_file_size_megabytes() {
        assert_eq!(pretty_file_size(Some(1024 * 1000)), "1.00MB");
        assert_eq!(pretty_file_size(Some(2048 * 1000)), "2.00MB");
        assert_eq!(pretty_file_size(Some(1536 * 1000)), "1.50MB");
    }

    #[test]
    fn test_bytes_to_mb() {
        assert_eq!(bytes_to_mb(None), 0.0);
        assert_eq!(bytes_to_mb(Some(56_972_009_037)), 56972.009037);
        assert_eq!(bytes_to_mb(Some(1_000_000)), 1.0);
    }
}
