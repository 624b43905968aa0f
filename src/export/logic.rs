use crate::config::Config;
use crate::core::attendance::AttendanceLogic;
use crate::core::activities::ActivityLogic;
use crate::core::lessons::LessonLogic;
use crate::core::notes::NoteLogic;
use crate::core::query::{ActivityQuery, Period, SortDirection, parse_month};
use crate::db::lessons;
use crate::db::pool::DbPool;
use crate::errors::{AppError, AppResult};
use crate::export::fs_utils::ensure_writable;
use crate::export::json_csv::{export_csv, export_json, write_json_value};
use crate::export::model::Report;
use crate::export::pdf_export::export_pdf;
use crate::export::reports;
use crate::export::xlsx::export_xlsx;
use crate::export::{ExportFormat, ExportKind};
use crate::ui::messages::warning;
use crate::utils::path::absolute_output;
use chrono::{Datelike, NaiveDate};
use std::path::{Path, PathBuf};

/// Everything `export` needs, as given on the command line.
#[derive(Debug, Clone)]
pub struct ExportRequest {
    pub kind: ExportKind,
    pub format: ExportFormat,
    pub file: String,
    pub force: bool,
    pub school: Option<String>,
    pub class: Option<String>,
    pub date: Option<NaiveDate>,
    pub month: Option<String>,
    pub range: Option<String>,
    pub period: Period,
    pub sort: SortDirection,
    /// Append day notes to the lessons report
    pub notes: bool,
}

impl ExportRequest {
    fn activity_query(&self) -> ActivityQuery {
        ActivityQuery {
            period: self.period,
            month: self.month.clone(),
            range: self.range.clone(),
            school: self.school.clone(),
            class: self.class.clone(),
            sort: self.sort,
        }
    }

    fn school_and_class(&self) -> AppResult<(&str, &str)> {
        match (self.school.as_deref(), self.class.as_deref()) {
            (Some(s), Some(c)) => Ok((s, c)),
            _ => Err(AppError::Validation(format!(
                "--school and --class are required for the {} export",
                self.kind.as_str()
            ))),
        }
    }
}

pub struct ExportLogic;

impl ExportLogic {
    /// Build the requested report and write it.
    ///
    /// Returns the written path, or `None` when there was nothing to export.
    pub fn export(pool: &DbPool, cfg: &Config, req: &ExportRequest, today: NaiveDate) -> AppResult<Option<PathBuf>> {
        let path = absolute_output(&req.file)?;

        if req.kind == ExportKind::Database && req.format == ExportFormat::Csv {
            return Err(AppError::InvalidExportFormat(
                "csv cannot hold several tables, use json, xlsx or pdf".into(),
            ));
        }

        let report = build_report(pool, cfg, req, today)?;

        if report.is_empty() {
            warning(format!(
                "No data found for the {} export, nothing written.",
                req.kind.as_str()
            ));
            return Ok(None);
        }

        ensure_writable(&path, req.force)?;

        match (req.kind, req.format) {
            (ExportKind::Database, ExportFormat::Json) => {
                write_json_value(&reports::database_json(&pool.conn)?, &path)?
            }
            _ => write_report(&report, req.format, &path)?,
        }

        Ok(Some(path))
    }
}

fn write_report(report: &Report, format: ExportFormat, path: &Path) -> AppResult<()> {
    match format {
        ExportFormat::Csv => export_csv(report, path),
        ExportFormat::Json => export_json(report, path),
        ExportFormat::Xlsx => export_xlsx(report, path),
        ExportFormat::Pdf => export_pdf(report, path),
    }
}

fn build_report(pool: &DbPool, cfg: &Config, req: &ExportRequest, today: NaiveDate) -> AppResult<Report> {
    match req.kind {
        ExportKind::Register => {
            let (school, class) = req.school_and_class()?;
            let date = req.date.unwrap_or(today);
            let view = AttendanceLogic::register(pool, cfg, school, class, date)?;
            Ok(reports::register_report(&view, &cfg.report_title))
        }

        ExportKind::Registers => {
            let verified = lessons::verified(&pool.conn, req.school.as_deref(), req.class.as_deref())?;
            let mut views = Vec::new();
            for l in verified.iter().filter(|l| !l.class.is_empty()) {
                views.push(AttendanceLogic::load_register(pool, &l.school, &l.class, l.date)?);
            }
            Ok(reports::registers_report(views, &cfg.report_title))
        }

        ExportKind::Activities => {
            let query = req.activity_query();
            let (list, totals) = ActivityLogic::summary(pool, cfg, &query, today)?;
            Ok(reports::activities_report(list, &totals, query.describe(today)))
        }

        ExportKind::Lessons => {
            let (year, month) = match &req.month {
                Some(m) => parse_month(m)?,
                None => (today.year(), today.month()),
            };
            let data = LessonLogic::month(
                pool,
                cfg,
                year,
                month,
                req.school.as_deref(),
                req.class.as_deref(),
            )?;
            let day_notes = if req.notes {
                Some(NoteLogic::month(pool, year, month)?)
            } else {
                None
            };
            Ok(reports::lessons_report(&data, day_notes.as_deref(), &cfg.report_title))
        }

        ExportKind::Database => reports::database_report(&pool.conn),
    }
}
