use serde::Serialize;
use serde_json::{Map, Value};

/// How the sections of a report relate to each other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SectionLayout {
    /// Sections follow each other; tabular formats merge them.
    Continuous,
    /// Like `Continuous`, but each section starts a new PDF page.
    PagePerSection,
    /// Unrelated tables: one sheet / JSON array each.
    SeparateTables,
}

#[derive(Debug, Clone, Serialize)]
pub struct ReportSection {
    pub title: String,
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
    /// Free text printed under the table.
    pub footer: Vec<String>,
}

impl ReportSection {
    pub fn new(title: impl Into<String>, headers: &[&str]) -> Self {
        Self {
            title: title.into(),
            headers: headers.iter().map(|h| h.to_string()).collect(),
            rows: Vec::new(),
            footer: Vec::new(),
        }
    }
}

/// Format-independent document handed to the writers.
#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub title: String,
    pub subtitle: Option<String>,
    pub sections: Vec<ReportSection>,
    pub layout: SectionLayout,
}

impl Report {
    pub fn is_empty(&self) -> bool {
        self.sections.iter().all(|s| s.rows.is_empty())
    }

    /// Single table view. With several sections a leading `section` column
    /// tells the rows apart.
    pub(crate) fn flatten(&self) -> (Vec<String>, Vec<Vec<String>>) {
        match self.sections.as_slice() {
            [] => (Vec::new(), Vec::new()),
            [only] => (only.headers.clone(), only.rows.clone()),
            [first, ..] => {
                let mut headers = vec!["section".to_string()];
                headers.extend(first.headers.iter().cloned());

                let rows = self
                    .sections
                    .iter()
                    .flat_map(|s| {
                        s.rows.iter().map(move |r| {
                            let mut row = vec![s.title.clone()];
                            row.extend(r.iter().cloned());
                            row
                        })
                    })
                    .collect();
                (headers, rows)
            }
        }
    }

    pub(crate) fn footer_lines(&self) -> Vec<String> {
        self.sections
            .iter()
            .flat_map(|s| s.footer.iter().cloned())
            .collect()
    }
}

/// Rows as JSON objects keyed by header.
pub(crate) fn rows_as_objects(headers: &[String], rows: &[Vec<String>]) -> Vec<Value> {
    rows.iter()
        .map(|row| {
            let obj: Map<String, Value> = headers
                .iter()
                .zip(row.iter())
                .map(|(h, v)| (h.clone(), Value::String(v.clone())))
                .collect();
            Value::Object(obj)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn section(title: &str, rows: &[&[&str]]) -> ReportSection {
        let mut s = ReportSection::new(title, &["name", "status"]);
        s.rows = rows
            .iter()
            .map(|r| r.iter().map(|c| c.to_string()).collect())
            .collect();
        s
    }

    #[test]
    fn flatten_prefixes_section_when_several() {
        let report = Report {
            title: "t".into(),
            subtitle: None,
            sections: vec![
                section("day 1", &[&["Rossi", "present"]]),
                section("day 2", &[&["Rossi", "absent"], &["Bianchi", "present"]]),
            ],
            layout: SectionLayout::PagePerSection,
        };

        let (headers, rows) = report.flatten();
        assert_eq!(headers, vec!["section", "name", "status"]);
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[2], vec!["day 2", "Bianchi", "present"]);
        assert!(!report.is_empty());
    }

    #[test]
    fn objects_keyed_by_header() {
        let objs = rows_as_objects(&["a".to_string(), "b".to_string()], &[vec!["1".into(), "x".into()]]);
        assert_eq!(objs[0]["a"], "1");
        assert_eq!(objs[0]["b"], "x");
    }
}
