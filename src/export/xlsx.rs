use crate::errors::{AppError, AppResult};
use crate::export::excel_date::parse_to_excel_date;
use crate::export::model::{Report, SectionLayout};
use crate::export::notify_export_success;
use crate::ui::messages::info;
use rust_xlsxwriter::{Color, Format, FormatAlign, FormatBorder, FormatPattern, Workbook, Worksheet};
use std::path::Path;
use unicode_width::UnicodeWidthStr;

const MAX_COL_WIDTH: usize = 60;

/// One sheet per section for separate tables, otherwise a single sheet with
/// the flattened rows and the footer lines underneath.
pub(crate) fn export_xlsx(report: &Report, path: &Path) -> AppResult<()> {
    info(format!("Exporting to XLSX: {}", path.display()));

    let mut workbook = Workbook::new();

    if report.layout == SectionLayout::SeparateTables {
        for section in &report.sections {
            let sheet = workbook.add_worksheet();
            sheet.set_name(sheet_name(&section.title)).map_err(xlsx_err)?;
            write_table(sheet, &section.headers, &section.rows, &section.footer)?;
        }
    } else {
        let (headers, rows) = report.flatten();
        let sheet = workbook.add_worksheet();
        sheet.set_name(sheet_name(&report.title)).map_err(xlsx_err)?;
        write_table(sheet, &headers, &rows, &report.footer_lines())?;
    }

    workbook.save(path).map_err(xlsx_err)?;

    notify_export_success("XLSX", path);
    Ok(())
}

/// Sheet names are limited to 31 characters and cannot contain `[]:*?/\`.
fn sheet_name(title: &str) -> String {
    let cleaned: String = title
        .chars()
        .map(|c| if "[]:*?/\\".contains(c) { '-' } else { c })
        .take(31)
        .collect();
    if cleaned.trim().is_empty() {
        "Sheet1".to_string()
    } else {
        cleaned
    }
}

fn write_table(
    sheet: &mut Worksheet,
    headers: &[String],
    rows: &[Vec<String>],
    footer: &[String],
) -> AppResult<()> {
    if rows.is_empty() {
        sheet.write(0, 0, "No data available").map_err(xlsx_err)?;
        return Ok(());
    }

    let header_format = Format::new()
        .set_bold()
        .set_font_color(Color::RGB(0xFFFFFF))
        .set_background_color(Color::RGB(0x2F75B5))
        .set_pattern(FormatPattern::Solid)
        .set_border(FormatBorder::Thin);

    for (col, header) in headers.iter().enumerate() {
        sheet
            .write_with_format(0, col as u16, header.as_str(), &header_format)
            .map_err(xlsx_err)?;
    }
    sheet.set_freeze_panes(1, 0).map_err(xlsx_err)?;

    let mut col_widths: Vec<usize> = headers.iter().map(|h| UnicodeWidthStr::width(h.as_str())).collect();

    for (i, values) in rows.iter().enumerate() {
        let row = (i + 1) as u32;
        let band = if i % 2 == 0 { Color::RGB(0xEAF3FB) } else { Color::RGB(0xFFFFFF) };
        let total = values.first().is_some_and(|v| v == "TOTAL");

        for (col, value) in values.iter().enumerate() {
            write_cell(sheet, row, col as u16, value, band, total)?;
            if let Some(w) = col_widths.get_mut(col) {
                *w = (*w).max(UnicodeWidthStr::width(value.as_str()));
            }
        }
    }

    let mut row = rows.len() as u32 + 2;
    for line in footer {
        sheet.write(row, 0, line.as_str()).map_err(xlsx_err)?;
        row += 1;
    }

    for (c, w) in col_widths.iter().enumerate() {
        sheet
            .set_column_width(c as u16, (*w).min(MAX_COL_WIDTH) as f64 + 2.0)
            .map_err(xlsx_err)?;
    }

    Ok(())
}

/// Dates, times and numbers become native Excel values; everything else is
/// text.
fn write_cell(sheet: &mut Worksheet, row: u32, col: u16, s: &str, bg: Color, bold: bool) -> AppResult<()> {
    let mut fmt = Format::new()
        .set_background_color(bg)
        .set_pattern(FormatPattern::Solid)
        .set_border(FormatBorder::Thin);
    if bold {
        fmt = fmt.set_bold();
    }

    if let Some((num_format, serial)) = parse_to_excel_date(s) {
        let fmt = fmt.set_num_format(num_format);
        sheet.write_with_format(row, col, serial, &fmt).map_err(xlsx_err)?;
        return Ok(());
    }

    if let Ok(num) = s.parse::<f64>()
        && num.is_finite()
    {
        let fmt = fmt.set_align(FormatAlign::Right);
        sheet.write_with_format(row, col, num, &fmt).map_err(xlsx_err)?;
        return Ok(());
    }

    sheet.write_with_format(row, col, s, &fmt).map_err(xlsx_err)?;
    Ok(())
}

fn xlsx_err<E: std::fmt::Display>(e: E) -> AppError {
    AppError::Export(format!("XLSX error: {e}"))
}

#[cfg(test)]
mod tests {
    use super::sheet_name;

    #[test]
    fn sheet_names_are_sanitized() {
        assert_eq!(sheet_name("a/b:c"), "a-b-c");
        assert_eq!(sheet_name(""), "Sheet1");
        assert_eq!(sheet_name(&"x".repeat(40)).len(), 31);
    }
}
