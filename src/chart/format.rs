//! Numeric display formatting for axis and data labels.

use crate::common::fmt::fmt_num;

/// Format a raw number under an optional spreadsheet-style format code.
///
/// Only the handful of code shapes that matter for chart labels are
/// recognized; anything else falls back to the general rendering
/// (integers verbatim, non-integers to at most two decimals with
/// trailing zeros stripped).
pub fn format_value(raw: f64, code: Option<&str>) -> String {
    let code = match code {
        Some(c) if !c.is_empty() && c != "General" => c,
        _ => return general(raw),
    };

    if code.contains('%') {
        let decimals = percent_decimals(code);
        return format!("{:.*}%", decimals, raw * 100.0);
    }
    if let Some(decimals) = decimal_places(code) {
        return strip_zeros(format!("{raw:.decimals$}"));
    }
    if is_integer_code(code) {
        return fmt_num(raw.round());
    }
    general(raw)
}

fn general(raw: f64) -> String {
    if raw.fract() == 0.0 {
        fmt_num(raw)
    } else {
        strip_zeros(format!("{raw:.2}"))
    }
}

/// Zeros after the decimal point in a `0.0+%` pattern; 0 without one.
fn percent_decimals(code: &str) -> usize {
    code.find("0.")
        .map(|i| code[i + 2..].chars().take_while(|c| *c == '0').count())
        .unwrap_or(0)
}

/// Length of a `.`-introduced `0`/`#` decimal pattern, if the code has one.
fn decimal_places(code: &str) -> Option<usize> {
    let rest = &code[code.find('.')? + 1..];
    let n = rest.chars().take_while(|c| matches!(c, '0' | '#')).count();
    (n > 0).then_some(n)
}

/// A digit/`#`/`,`/bracket-only code rounds to the nearest integer.
fn is_integer_code(code: &str) -> bool {
    !code.contains('.')
        && code
            .chars()
            .all(|c| c.is_ascii_digit() || matches!(c, '#' | ',' | '[' | ']'))
}

fn strip_zeros(mut s: String) -> String {
    if s.contains('.') {
        while s.ends_with('0') {
            s.pop();
        }
        if s.ends_with('.') {
            s.pop();
        }
    }
    s
}
