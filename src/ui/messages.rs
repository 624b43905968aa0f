//! Coloured one-line messages for the terminal.

use std::fmt;

const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Info,
    Success,
    Warning,
    Error,
}

impl Level {
    fn colour(self) -> &'static str {
        match self {
            Level::Info => "\x1b[34m",
            Level::Success => "\x1b[32m",
            Level::Warning => "\x1b[33m",
            Level::Error => "\x1b[31m",
        }
    }

    fn icon(self) -> &'static str {
        match self {
            Level::Info => "ℹ️",
            Level::Success => "✅",
            Level::Warning => "⚠️",
            Level::Error => "❌",
        }
    }
}

/// Format without printing.
pub fn render<T: fmt::Display>(level: Level, msg: T) -> String {
    format!("{}{}{} {}{}", level.colour(), BOLD, level.icon(), RESET, msg)
}

/// Errors go to stderr, everything else to stdout.
pub fn emit<T: fmt::Display>(level: Level, msg: T) {
    match level {
        Level::Error => eprintln!("{}", render(level, msg)),
        _ => println!("{}", render(level, msg)),
    }
}

pub fn info<T: fmt::Display>(msg: T) {
    emit(Level::Info, msg);
}

pub fn success<T: fmt::Display>(msg: T) {
    emit(Level::Success, msg);
}

pub fn warning<T: fmt::Display>(msg: T) {
    emit(Level::Warning, msg);
}

pub fn error<T: fmt::Display>(msg: T) {
    emit(Level::Error, msg);
}

/// Section header above a listing.
pub fn header<T: fmt::Display>(msg: T) {
    println!("{}{}== {} =={}\n", Level::Info.colour(), BOLD, msg, RESET);
}
