use crate::config::Config;
use crate::db::log::audit_quiet;
use crate::db::pool::DbPool;
use crate::db::students;
use crate::errors::{AppError, AppResult};
use crate::models::Student;
use std::fs;
use std::path::Path;

pub struct StudentLogic;

fn clean_name(name: &str) -> AppResult<String> {
    let n = name.trim();
    if n.is_empty() {
        return Err(AppError::Validation("Student name cannot be empty".into()));
    }
    Ok(n.to_string())
}

impl StudentLogic {
    pub fn add(pool: &mut DbPool, cfg: &Config, name: &str, school: &str, class: &str) -> AppResult<Student> {
        let name = clean_name(name)?;
        cfg.schools.require_class(school, class)?;

        let id = students::insert(&pool.conn, &name, school, class)?;
        audit_quiet(
            &pool.conn,
            "add",
            &format!("student {id}"),
            &format!("{name} added to {school} {class}"),
        );

        students::find(&pool.conn, id)?
            .ok_or_else(|| AppError::Other(format!("student {id} vanished after insert")))
    }

    pub fn list(pool: &DbPool, school: Option<&str>, class: Option<&str>) -> AppResult<Vec<Student>> {
        students::list(&pool.conn, school, class)
    }

    pub fn get(pool: &DbPool, id: i64) -> AppResult<Student> {
        students::find(&pool.conn, id)?.ok_or_else(|| AppError::NotFound(format!("student {id}")))
    }

    pub fn rename(pool: &mut DbPool, id: i64, name: &str) -> AppResult<Student> {
        let name = clean_name(name)?;
        let before = Self::get(pool, id)?;

        students::rename(&pool.conn, id, &name)?;
        audit_quiet(
            &pool.conn,
            "edit",
            &format!("student {id}"),
            &format!("renamed '{}' to '{}'", before.name, name),
        );

        Self::get(pool, id)
    }

    /// Remove a student and every attendance mark they had.
    pub fn delete(pool: &mut DbPool, id: i64) -> AppResult<Student> {
        let student = Self::get(pool, id)?;

        pool.with_transaction(|tx| students::delete(tx, id))?;
        audit_quiet(
            &pool.conn,
            "del",
            &format!("student {id}"),
            &format!("{} removed from {} {}", student.name, student.school, student.class),
        );

        Ok(student)
    }

    /// Load a whole class from a file. Refused when the class already has
    /// students. Returns how many were imported.
    pub fn import(
        pool: &mut DbPool,
        cfg: &Config,
        school: &str,
        class: &str,
        file: &Path,
    ) -> AppResult<usize> {
        cfg.schools.require_class(school, class)?;

        if students::count_in_class(&pool.conn, school, class)? > 0 {
            return Err(AppError::Validation(format!(
                "{school} {class} already has students; import refused"
            )));
        }

        let content = fs::read_to_string(file)?;
        let names = parse_names(&content)?;
        if names.is_empty() {
            return Err(AppError::Validation(format!(
                "no student names found in {}",
                file.display()
            )));
        }

        let n = pool.with_transaction(|tx| {
            for name in &names {
                students::insert(tx, name, school, class)?;
            }
            Ok(names.len())
        })?;

        audit_quiet(
            &pool.conn,
            "import",
            &format!("{school} {class}"),
            &format!("{n} students imported from {}", file.display()),
        );

        Ok(n)
    }
}

/// Names from an import file: either one per line, or CSV whose header has a
/// `name` column. Blank entries are dropped.
pub fn parse_names(content: &str) -> AppResult<Vec<String>> {
    let header = content.lines().find(|l| !l.trim().is_empty()).unwrap_or("");
    let is_csv = header
        .split([',', ';'])
        .any(|h| h.trim().eq_ignore_ascii_case("name"));

    let raw: Vec<String> = if is_csv {
        let delimiter = if header.contains(';') { b';' } else { b',' };
        let mut rdr = csv::ReaderBuilder::new()
            .delimiter(delimiter)
            .trim(csv::Trim::All)
            .flexible(true)
            .from_reader(content.trim_start().as_bytes());

        let idx = rdr
            .headers()
            .map_err(|e| AppError::Validation(format!("invalid CSV header: {e}")))?
            .iter()
            .position(|h| h.eq_ignore_ascii_case("name"))
            .ok_or_else(|| AppError::Validation("CSV file has no 'name' column".into()))?;

        let mut out = Vec::new();
        for rec in rdr.records() {
            let rec = rec.map_err(|e| AppError::Validation(format!("invalid CSV row: {e}")))?;
            if let Some(n) = rec.get(idx) {
                out.push(n.to_string());
            }
        }
        out
    } else {
        content.lines().map(str::to_string).collect()
    };

    Ok(raw
        .into_iter()
        .map(|n| n.trim().to_string())
        .filter(|n| !n.is_empty())
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_list_one_per_line() {
        let names = parse_names("Rossi Mario\n\n  Bianchi Anna  \n").unwrap();
        assert_eq!(names, vec!["Rossi Mario", "Bianchi Anna"]);
    }

    #[test]
    fn csv_with_name_column() {
        let names = parse_names("id,Name,email\n1,Verdi Luca,l@x\n2,,n@x\n3,Neri Sara,s@x\n").unwrap();
        assert_eq!(names, vec!["Verdi Luca", "Neri Sara"]);

        let names = parse_names("name;class\nGialli Paolo;4C\n").unwrap();
        assert_eq!(names, vec!["Gialli Paolo"]);
    }
}
