mod excel_date;
mod fs_utils;
mod json_csv;
pub mod logic;
mod model;
mod pdf;
mod pdf_export;
pub(crate) mod range;
pub mod reports;
mod xlsx;

pub use logic::{ExportLogic, ExportRequest};
pub use model::{Report, ReportSection, SectionLayout};

use crate::ui::messages::success;
use clap::ValueEnum;
use std::path::Path;

pub(crate) fn notify_export_success(label: &str, path: &Path) {
    success(format!("{label} export completed: {}", path.display()));
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ExportFormat {
    Csv,
    Json,
    Xlsx,
    Pdf,
}

impl ExportFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Json => "json",
            ExportFormat::Xlsx => "xlsx",
            ExportFormat::Pdf => "pdf",
        }
    }
}

/// What to export.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ExportKind {
    /// Attendance register of one class on one day
    Register,
    /// Every verified lesson's register
    Registers,
    /// Activity summary with totals
    Activities,
    /// Lessons of a month
    Lessons,
    /// Every table of the database
    Database,
}

impl ExportKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExportKind::Register => "register",
            ExportKind::Registers => "registers",
            ExportKind::Activities => "activities",
            ExportKind::Lessons => "lessons",
            ExportKind::Database => "database",
        }
    }
}
