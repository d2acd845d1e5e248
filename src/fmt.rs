//! Shared formatting utilities for size display and console output

/// Format bytes as human-readable size string
///
/// # Examples
///
/// ```
/// use src_slim::fmt::format_bytes;
///
/// assert_eq!(format_bytes(512), "512 B");
/// assert_eq!(format_bytes(1024), "1.00 KB");
/// assert_eq!(format_bytes(1_048_576), "1.00 MB");
/// ```
pub fn format_bytes(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;

    if bytes >= MB {
        format!("{:.2} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.2} KB", bytes as f64 / KB as f64)
    } else {
        format!("{} B", bytes)
    }
}

/// Format bytes as a KB figure, the unit the report columns promise
///
/// # Examples
///
/// ```
/// use src_slim::fmt::format_kb;
///
/// assert_eq!(format_kb(2048), "2.0 KB");
/// assert_eq!(format_kb(512), "0.5 KB");
/// ```
pub fn format_kb(bytes: u64) -> String {
    format!("{:.1} KB", bytes as f64 / 1024.0)
}

/// Format percentage with one decimal place
///
/// # Examples
///
/// ```
/// use src_slim::fmt::format_percent;
///
/// assert_eq!(format_percent(42.56), "42.6%");
/// ```
pub fn format_percent(value: f64) -> String {
    format!("{:.1}%", value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_bytes_various_sizes() {
        assert_eq!(format_bytes(512), "512 B");
        assert_eq!(format_bytes(1024), "1.00 KB");
        assert_eq!(format_bytes(1536), "1.50 KB");
        assert_eq!(format_bytes(1_048_576), "1.00 MB");
        assert_eq!(format_bytes(2_621_440), "2.50 MB");
    }

    #[test]
    fn test_format_kb_always_uses_kb_unit() {
        assert_eq!(format_kb(0), "0.0 KB");
        assert_eq!(format_kb(512), "0.5 KB");
        assert_eq!(format_kb(1_048_576), "1024.0 KB");
    }

    #[test]
    fn test_format_percent_rounds_to_1_decimal() {
        assert_eq!(format_percent(42.56), "42.6%");
        assert_eq!(format_percent(100.0), "100.0%");
        assert_eq!(format_percent(0.04), "0.0%");
    }
}
