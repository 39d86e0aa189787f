//! Time and percentage formatting shared by the engines and the renderer

/// Format a number of seconds as `m:ss`
///
/// # Examples
/// ```
/// # use kodegen_tools_footprint::utils::format_clock;
/// assert_eq!(format_clock(90), "1:30");
/// assert_eq!(format_clock(5), "0:05");
/// ```
#[must_use]
pub fn format_clock(secs: u32) -> String {
    format!("{}:{:02}", secs / 60, secs % 60)
}

/// `part / whole` as a percentage clamped to `[0, 100]`
///
/// A zero `whole` yields 100, the only value that can't be mistaken for
/// unfinished work.
#[must_use]
pub fn percent_of(part: u32, whole: u32) -> f64 {
    if whole == 0 {
        return 100.0;
    }
    (f64::from(part) / f64::from(whole) * 100.0).clamp(0.0, 100.0)
}

/// Percentage rounded half away from zero for display
#[must_use]
pub fn rounded_percent(percent: f64) -> u32 {
    percent.clamp(0.0, 100.0).round() as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clock_pads_seconds() {
        assert_eq!(format_clock(0), "0:00");
        assert_eq!(format_clock(59), "0:59");
        assert_eq!(format_clock(60), "1:00");
        assert_eq!(format_clock(754), "12:34");
    }

    #[test]
    fn percent_clamps_and_handles_zero_total() {
        assert_eq!(percent_of(45, 90), 50.0);
        assert_eq!(percent_of(120, 90), 100.0);
        assert_eq!(percent_of(0, 0), 100.0);
    }

    #[test]
    fn rounded_percent_rounds_half_up() {
        assert_eq!(rounded_percent(1.111), 1);
        assert_eq!(rounded_percent(2.5), 3);
        assert_eq!(rounded_percent(150.0), 100);
    }
}
