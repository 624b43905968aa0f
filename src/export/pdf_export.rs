use crate::errors::{AppError, AppResult};
use crate::export::model::{Report, SectionLayout};
use crate::export::notify_export_success;
use crate::export::pdf::PdfManager;
use crate::ui::messages::info;
use std::path::Path;

pub(crate) fn export_pdf(report: &Report, path: &Path) -> AppResult<()> {
    info(format!("Exporting to PDF: {}", path.display()));

    let mut pdf = PdfManager::new(&report.title);
    pdf.new_page();

    if let Some(sub) = &report.subtitle {
        pdf.paragraph(sub);
        pdf.spacer(6.0);
    }

    for (i, section) in report.sections.iter().enumerate() {
        if i > 0 && report.layout == SectionLayout::PagePerSection {
            pdf.new_page();
        }

        if !section.title.is_empty() {
            pdf.heading(&section.title);
        }

        if section.rows.is_empty() {
            pdf.paragraph("No data available");
        } else {
            pdf.table(&section.headers, &section.rows);
        }

        if !section.footer.is_empty() {
            pdf.spacer(6.0);
            for line in &section.footer {
                pdf.paragraph(line);
            }
        }
        pdf.spacer(12.0);
    }

    pdf.save(path)
        .map_err(|e| AppError::Export(format!("PDF export error: {e}")))?;

    notify_export_success("PDF", path);
    Ok(())
}
