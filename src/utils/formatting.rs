//! Small text helpers shared by listings and reports.

use regex::Regex;
use std::sync::OnceLock;
use unicode_width::UnicodeWidthStr;

fn ansi_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\x1B\[[0-9;]*[mK]").expect("static regex"))
}

pub fn strip_ansi(s: &str) -> String {
    ansi_re().replace_all(s, "").into_owned()
}

/// Terminal columns taken by `s`, ignoring colour codes.
pub fn visible_width(s: &str) -> usize {
    UnicodeWidthStr::width(strip_ansi(s).as_str())
}

/// `yes` / `no`.
pub fn yes_no(v: bool) -> &'static str {
    if v { "yes" } else { "no" }
}

/// Whole hours are printed without decimals (`4h`), others with two (`2.50h`).
pub fn hours_label(h: f64) -> String {
    if (h - h.round()).abs() < f64::EPSILON {
        format!("{}h", h.round() as i64)
    } else {
        format!("{:.2}h", h)
    }
}
