//! Compact numeric formatting for CSS values and chart labels.

/// Format a number with the shortest faithful representation: integers
/// through `itoa`, everything else through `ryu`.
pub fn fmt_num(v: f64) -> String {
    if v.fract() == 0.0 && v.abs() < i64::MAX as f64 {
        let mut buf = itoa::Buffer::new();
        buf.format(v as i64).to_string()
    } else {
        let mut buf = ryu::Buffer::new();
        buf.format(v).to_string()
    }
}

/// Round to two decimal places, then format compactly.
#[inline]
pub fn fmt_num_2dp(v: f64) -> String {
    fmt_num((v * 100.0).round() / 100.0)
}

/// CSS point length, rounded to two decimal places.
#[inline]
pub fn fmt_pt(v: f64) -> String {
    format!("{}pt", fmt_num_2dp(v))
}

/// CSS pixel length, rounded to two decimal places.
#[inline]
pub fn fmt_px(v: f64) -> String {
    format!("{}px", fmt_num_2dp(v))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fmt_num() {
        assert_eq!(fmt_num(12.0), "12");
        assert_eq!(fmt_num(1.5), "1.5");
        assert_eq!(fmt_num(-3.0), "-3");
        assert_eq!(fmt_num(0.0), "0");
    }

    #[test]
    fn test_css_lengths() {
        assert_eq!(fmt_pt(12.0), "12pt");
        assert_eq!(fmt_pt(10.666666), "10.67pt");
        assert_eq!(fmt_px(45.720001), "45.72px");
    }
}
