/// Format milliseconds as `MM:SS`, truncating partial seconds.
///
/// Minutes are not capped, so long tracks render as e.g. `125:03`.
pub fn format_mmss(ms: u64) -> String {
    let secs = ms / 1000;
    format!("{:02}:{:02}", secs / 60, secs % 60)
}

/// The `elapsed / total` label shown under the slider.
pub fn time_label(position_ms: u64, duration_ms: u64) -> String {
    format!("{} / {}", format_mmss(position_ms), format_mmss(duration_ms))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_truncates_instead_of_rounding() {
        assert_eq!(format_mmss(0), "00:00");
        assert_eq!(format_mmss(999), "00:00");
        assert_eq!(format_mmss(59_999), "00:59");
        assert_eq!(format_mmss(60_000), "01:00");
        assert_eq!(format_mmss(7_503_000), "125:03");
    }

    #[test]
    fn time_label_joins_elapsed_and_total() {
        assert_eq!(time_label(65_000, 125_000), "01:05 / 02:05");
        assert_eq!(time_label(0, 0), "00:00 / 00:00");
    }
}
