//! ANSI colour codes for terminal listings.

pub const RESET: &str = "\x1b[0m";
pub const GREY: &str = "\x1b[90m";
pub const RED: &str = "\x1b[31m";
pub const GREEN: &str = "\x1b[32m";
pub const YELLOW: &str = "\x1b[33m";
pub const BLUE: &str = "\x1b[34m";
pub const CYAN: &str = "\x1b[36m";

pub fn paint(value: &str, colour: &str) -> String {
    format!("{colour}{value}{RESET}")
}

/// Grey for blank or placeholder cells.
pub fn colorize_optional(value: &str) -> String {
    let v = value.trim();
    if v.is_empty() || v == "--" || v == "--:--" {
        paint(value, GREY)
    } else {
        value.to_string()
    }
}

pub fn colorize_presence(present: bool) -> String {
    if present {
        paint("present", GREEN)
    } else {
        paint("absent", RED)
    }
}

pub fn colour_for_status(label: &str) -> &'static str {
    match label {
        "verified" => GREEN,
        "to verify" => YELLOW,
        "scheduled" => BLUE,
        _ => RESET,
    }
}
