//! Minimal flowing PDF layout on top of `pdf-writer`: page header with title
//! and page number, headings, wrapped paragraphs and tables that continue on
//! the next page with the header row repeated.

use pdf_writer::{Content, Name, Pdf, Rect, Ref, Str};
use std::fs::File;
use std::io::Write;
use std::path::Path;

const REGULAR: Name<'static> = Name(b"F1");
const BOLD: Name<'static> = Name(b"F2");

/// Average Helvetica glyph width as a fraction of the font size.
const GLYPH_RATIO: f32 = 0.52;

struct OpenPage {
    content_id: Ref,
    content: Content,
}

pub struct PdfManager {
    pdf: Pdf,
    catalog_id: Ref,
    pages_id: Ref,
    font_id: Ref,
    bold_id: Ref,
    next_id: i32,
    page_refs: Vec<Ref>,
    page: Option<OpenPage>,

    title: String,
    y: f32,

    page_w: f32,
    page_h: f32,
    margin: f32,
    row_h: f32,

    font_size: f32,
    header_font_size: f32,
    title_font_size: f32,
}

/// WinAnsi bytes for the standard fonts; characters outside Latin-1 become `?`.
fn encode(text: &str) -> Vec<u8> {
    text.chars()
        .map(|c| if (c as u32) < 0x100 { c as u32 as u8 } else { b'?' })
        .collect()
}

impl PdfManager {
    pub fn new(title: &str) -> Self {
        let mut pdf = Pdf::new();

        let catalog_id = Ref::new(1);
        let pages_id = Ref::new(2);
        let font_id = Ref::new(3);
        let bold_id = Ref::new(4);

        pdf.type1_font(font_id)
            .base_font(Name(b"Helvetica"))
            .encoding_predefined(Name(b"WinAnsiEncoding"));
        pdf.type1_font(bold_id)
            .base_font(Name(b"Helvetica-Bold"))
            .encoding_predefined(Name(b"WinAnsiEncoding"));

        Self {
            pdf,
            catalog_id,
            pages_id,
            font_id,
            bold_id,
            next_id: 5,
            page_refs: Vec::new(),
            page: None,

            title: title.to_string(),
            y: 0.0,

            page_w: 595.0,
            page_h: 842.0,
            margin: 50.0,
            row_h: 18.0,

            font_size: 9.0,
            header_font_size: 9.5,
            title_font_size: 14.0,
        }
    }

    fn fresh_ref(&mut self) -> Ref {
        let id = self.next_id;
        self.next_id += 1;
        Ref::new(id)
    }

    fn usable_width(&self) -> f32 {
        self.page_w - 2.0 * self.margin
    }

    fn text_width(&self, text: &str, size: f32) -> f32 {
        text.chars().count() as f32 * size * GLYPH_RATIO
    }

    /// Close the current page (if any) and open a new one.
    pub fn new_page(&mut self) {
        self.finish_page();

        let page_id = self.fresh_ref();
        let content_id = self.fresh_ref();
        self.page_refs.push(page_id);

        {
            let mut page = self.pdf.page(page_id);
            page.parent(self.pages_id)
                .media_box(Rect::new(0.0, 0.0, self.page_w, self.page_h))
                .contents(content_id);
            page.resources()
                .fonts()
                .pair(REGULAR, self.font_id)
                .pair(BOLD, self.bold_id);
        }

        let mut content = Content::new();
        let page_no = self.page_refs.len();
        let title = self.title.clone();

        self.draw_text_on(&mut content, self.margin, self.page_h - self.margin + 10.0, BOLD, self.title_font_size, &title);
        self.draw_text_on(
            &mut content,
            self.page_w - self.margin - 40.0,
            self.margin - 30.0,
            REGULAR,
            self.font_size,
            &format!("Page {page_no}"),
        );

        self.page = Some(OpenPage { content_id, content });
        self.y = self.page_h - self.margin - 20.0;
    }

    fn finish_page(&mut self) {
        if let Some(open) = self.page.take() {
            self.pdf.stream(open.content_id, &open.content.finish());
        }
    }

    /// Start a new page unless `height` still fits on the current one.
    fn ensure_space(&mut self, height: f32) {
        if self.page.is_none() || self.y - height < self.margin {
            self.new_page();
        }
    }

    fn draw_text_on(&self, content: &mut Content, x: f32, y: f32, font: Name, size: f32, text: &str) {
        content.begin_text();
        content.set_font(font, size);
        content.set_text_matrix([1.0, 0.0, 0.0, 1.0, x, y]);
        content.show(Str(&encode(text)));
        content.end_text();
    }

    fn with_content(&mut self, f: impl FnOnce(&Self, &mut Content)) {
        if let Some(mut open) = self.page.take() {
            f(self, &mut open.content);
            self.page = Some(open);
        }
    }

    pub fn heading(&mut self, text: &str) {
        let size = self.header_font_size + 2.0;
        self.ensure_space(size * 2.0 + self.row_h);
        self.y -= size * 1.5;
        let (x, y) = (self.margin, self.y);
        self.with_content(|me, c| me.draw_text_on(c, x, y, BOLD, size, text));
        self.y -= size * 0.5;
    }

    /// Text wrapped to the usable width.
    pub fn paragraph(&mut self, text: &str) {
        let size = self.font_size;
        let cols = (self.usable_width() / (size * GLYPH_RATIO)).max(10.0) as usize;
        for line in textwrap::wrap(text, cols) {
            self.ensure_space(size * 1.6);
            self.y -= size * 1.4;
            let (x, y) = (self.margin, self.y);
            self.with_content(|me, c| me.draw_text_on(c, x, y, REGULAR, size, &line));
        }
    }

    pub fn spacer(&mut self, height: f32) {
        self.y -= height;
    }

    /// Column widths from content, scaled down to fit the page.
    fn col_widths(&self, headers: &[String], rows: &[Vec<String>]) -> Vec<f32> {
        let pad = 8.0;
        let mut widths: Vec<f32> = headers
            .iter()
            .map(|h| self.text_width(h, self.header_font_size) + pad)
            .collect();

        for row in rows {
            for (i, cell) in row.iter().enumerate() {
                if let Some(w) = widths.get_mut(i) {
                    *w = w.max(self.text_width(cell, self.font_size) + pad);
                }
            }
        }

        let total: f32 = widths.iter().sum();
        let max = self.usable_width();
        if total > max {
            let scale = max / total;
            for w in &mut widths {
                *w *= scale;
            }
        }
        widths
    }

    /// Cut `text` so it fits in `width`.
    fn fit(&self, text: &str, width: f32, size: f32) -> String {
        let max_chars = ((width - 8.0) / (size * GLYPH_RATIO)).max(1.0) as usize;
        if text.chars().count() <= max_chars {
            return text.to_string();
        }
        let mut s: String = text.chars().take(max_chars.saturating_sub(3)).collect();
        s.push_str("...");
        s
    }

    fn draw_row(&mut self, widths: &[f32], cells: &[String], font: Name<'static>, size: f32, fill: Option<(f32, f32, f32)>) {
        let y = self.y - self.row_h;
        let x0 = self.margin;
        let total: f32 = widths.iter().sum();
        let row_h = self.row_h;
        let fitted: Vec<String> = cells
            .iter()
            .zip(widths)
            .map(|(c, w)| self.fit(c, *w, size))
            .collect();

        self.with_content(|me, c| {
            if let Some((r, g, b)) = fill {
                c.save_state();
                c.set_fill_rgb(r, g, b);
                c.rect(x0, y, total, row_h);
                c.fill_nonzero();
                c.restore_state();
            }

            let mut x = x0;
            for (text, w) in fitted.iter().zip(widths) {
                me.draw_text_on(c, x + 4.0, y + 5.0, font, size, text);
                c.save_state();
                c.set_stroke_rgb(0.65, 0.65, 0.65);
                c.rect(x, y, *w, row_h);
                c.stroke();
                c.restore_state();
                x += w;
            }
        });

        self.y = y;
    }

    /// Table with a shaded header row, zebra stripes and a bold `TOTAL` row.
    pub fn table(&mut self, headers: &[String], rows: &[Vec<String>]) {
        let widths = self.col_widths(headers, rows);
        let header_fill = Some((0.85, 0.87, 0.90));

        self.ensure_space(self.row_h * 2.0);
        self.draw_row(&widths, headers, BOLD, self.header_font_size, header_fill);

        for (i, row) in rows.iter().enumerate() {
            if self.y - self.row_h < self.margin {
                self.new_page();
                self.draw_row(&widths, headers, BOLD, self.header_font_size, header_fill);
            }

            let total = row.first().is_some_and(|c| c == "TOTAL");
            let font = if total { BOLD } else { REGULAR };
            let fill = if i % 2 == 0 { Some((0.96, 0.96, 0.96)) } else { None };
            self.draw_row(&widths, row, font, self.font_size, fill);
        }
    }

    pub fn save(mut self, path: &Path) -> std::io::Result<()> {
        if self.page_refs.is_empty() {
            self.new_page();
        }
        self.finish_page();

        self.pdf.catalog(self.catalog_id).pages(self.pages_id);
        self.pdf
            .pages(self.pages_id)
            .count(self.page_refs.len() as i32)
            .kids(self.page_refs.iter().copied());

        let bytes = self.pdf.finish();
        let mut f = File::create(path)?;
        f.write_all(&bytes)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encodes_latin1_and_replaces_the_rest() {
        assert_eq!(encode("Attività"), b"Attivit\xe0".to_vec());
        assert_eq!(encode("€"), b"?".to_vec());
    }

    #[test]
    fn long_cells_are_cut() {
        let m = PdfManager::new("t");
        let out = m.fit(&"x".repeat(200), 60.0, 9.0);
        assert!(out.ends_with("..."));
        assert!(out.chars().count() < 200);
    }
}
