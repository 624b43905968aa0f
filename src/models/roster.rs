use crate::errors::{AppError, AppResult};
use serde::{Deserialize, Serialize};

/// One school and the classes taught there.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchoolRoster {
    pub name: String,
    #[serde(default)]
    pub classes: Vec<String>,
}

impl SchoolRoster {
    pub fn new(name: &str, classes: &[&str]) -> Self {
        Self {
            name: name.to_string(),
            classes: classes.iter().map(|c| c.to_string()).collect(),
        }
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }
}

/// The fixed list of schools/classes the register works with.
/// Loaded from the configuration file instead of being hard-coded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Roster(pub Vec<SchoolRoster>);

impl Default for Roster {
    fn default() -> Self {
        Roster(vec![
            SchoolRoster::new("Pitagora", &["4ASA", "4FSA", "4C", "4A"]),
            SchoolRoster::new("Falcone", &["4AX", "4BX"]),
        ])
    }
}

impl Roster {
    pub fn find(&self, school: &str) -> Option<&SchoolRoster> {
        self.0.iter().find(|s| s.name == school)
    }

    /// Check that `school` exists.
    pub fn require_school(&self, school: &str) -> AppResult<&SchoolRoster> {
        self.find(school)
            .ok_or_else(|| AppError::InvalidSchool(school.to_string()))
    }

    /// Check that `class` belongs to `school`.
    pub fn require_class(&self, school: &str, class: &str) -> AppResult<()> {
        let s = self.require_school(school)?;
        if s.has_class(class) {
            Ok(())
        } else {
            Err(AppError::InvalidClass {
                school: school.to_string(),
                class: class.to_string(),
            })
        }
    }

    /// Structural problems: duplicated schools, duplicated or empty classes.
    pub fn problems(&self) -> Vec<String> {
        let mut out = Vec::new();

        if self.0.is_empty() {
            out.push("no schools configured".to_string());
        }

        for (i, s) in self.0.iter().enumerate() {
            if s.name.trim().is_empty() {
                out.push(format!("school #{} has an empty name", i + 1));
            }
            if self.0[..i].iter().any(|o| o.name == s.name) {
                out.push(format!("school '{}' is listed more than once", s.name));
            }
            if s.classes.is_empty() {
                out.push(format!("school '{}' has no classes", s.name));
            }
            for (j, c) in s.classes.iter().enumerate() {
                if c.trim().is_empty() {
                    out.push(format!("school '{}' has an empty class name", s.name));
                } else if s.classes[..j].contains(c) {
                    out.push(format!("class '{}' repeated in school '{}'", c, s.name));
                }
            }
        }

        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_roster_knows_the_configured_classes() {
        let r = Roster::default();
        assert!(r.require_class("Pitagora", "4FSA").is_ok());
        assert!(r.require_class("Falcone", "4BX").is_ok());
        assert!(matches!(
            r.require_class("Falcone", "4C"),
            Err(AppError::InvalidClass { .. })
        ));
        assert!(matches!(
            r.require_school("Archimede"),
            Err(AppError::InvalidSchool(_))
        ));
        assert!(r.problems().is_empty());
    }

    #[test]
    fn problems_reports_duplicates() {
        let r = Roster(vec![
            SchoolRoster::new("A", &["1A", "1A"]),
            SchoolRoster::new("A", &[]),
        ]);
        let p = r.problems();
        assert!(p.iter().any(|m| m.contains("more than once")));
        assert!(p.iter().any(|m| m.contains("repeated")));
        assert!(p.iter().any(|m| m.contains("no classes")));
    }
}
