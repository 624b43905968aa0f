use crate::errors::{AppError, AppResult};
use crate::export::model::{Report, SectionLayout, rows_as_objects};
use crate::export::notify_export_success;
use crate::ui::messages::info;
use serde_json::{Map, Value, json};
use std::fs::File;
use std::io::Write;
use std::path::Path;

pub(crate) fn report_to_json(report: &Report) -> Value {
    if report.layout == SectionLayout::SeparateTables {
        let tables: Map<String, Value> = report
            .sections
            .iter()
            .map(|s| (s.title.clone(), Value::Array(rows_as_objects(&s.headers, &s.rows))))
            .collect();
        return Value::Object(tables);
    }

    let (headers, rows) = report.flatten();
    json!({
        "title": report.title,
        "subtitle": report.subtitle,
        "rows": rows_as_objects(&headers, &rows),
        "notes": report.footer_lines(),
    })
}

pub(crate) fn write_json_value(value: &Value, path: &Path) -> AppResult<()> {
    info(format!("Exporting to JSON: {}", path.display()));

    let text = serde_json::to_string_pretty(value)
        .map_err(|e| AppError::Export(format!("JSON serialization error: {e}")))?;

    let mut file = File::create(path)?;
    file.write_all(text.as_bytes())?;

    notify_export_success("JSON", path);
    Ok(())
}

pub(crate) fn export_json(report: &Report, path: &Path) -> AppResult<()> {
    write_json_value(&report_to_json(report), path)
}

/// Header row, data rows, then footer lines as single-cell records after a
/// blank line.
pub(crate) fn export_csv(report: &Report, path: &Path) -> AppResult<()> {
    if report.layout == SectionLayout::SeparateTables {
        return Err(AppError::InvalidExportFormat(
            "csv holds a single table; use xlsx or json".into(),
        ));
    }

    info(format!("Exporting to CSV: {}", path.display()));

    let csv_err = |e: csv::Error| AppError::Export(format!("CSV write error: {e}"));

    let mut wtr = csv::WriterBuilder::new()
        .flexible(true)
        .from_path(path)
        .map_err(csv_err)?;

    let (headers, rows) = report.flatten();
    wtr.write_record(&headers).map_err(csv_err)?;
    for row in &rows {
        wtr.write_record(row).map_err(csv_err)?;
    }

    let footer = report.footer_lines();
    if !footer.is_empty() {
        wtr.write_record([""]).map_err(csv_err)?;
        for line in &footer {
            wtr.write_record([line]).map_err(csv_err)?;
        }
    }

    wtr.flush()?;

    notify_export_success("CSV", path);
    Ok(())
}
