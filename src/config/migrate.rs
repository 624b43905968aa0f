//! Keeps an existing configuration file in step with the current `Config`
//! layout: keys added in newer releases are reported and filled in with their
//! defaults, keys the program no longer reads are reported.

use super::Config;
use crate::errors::{AppError, AppResult};
use serde_yaml::{Mapping, Value};
use std::fs;
use std::path::Path;

#[derive(Debug, Default, PartialEq)]
pub struct ConfigDiff {
    pub missing: Vec<String>,
    pub unknown: Vec<String>,
}

impl ConfigDiff {
    pub fn is_clean(&self) -> bool {
        self.missing.is_empty() && self.unknown.is_empty()
    }
}

fn to_mapping(content: &str) -> AppResult<Mapping> {
    match serde_yaml::from_str::<Value>(content) {
        Ok(Value::Mapping(m)) => Ok(m),
        Ok(Value::Null) => Ok(Mapping::new()),
        Ok(_) => Err(AppError::Config("top level must be a mapping".into())),
        Err(e) => Err(AppError::Config(e.to_string())),
    }
}

fn reference() -> AppResult<Mapping> {
    match serde_yaml::to_value(Config::default()) {
        Ok(Value::Mapping(m)) => Ok(m),
        Ok(_) => Err(AppError::Config("unexpected default layout".into())),
        Err(e) => Err(AppError::Config(e.to_string())),
    }
}

fn key_name(k: &Value) -> String {
    k.as_str().map(str::to_string).unwrap_or_else(|| format!("{k:?}"))
}

/// Compare the keys in `content` with the current layout.
pub fn diff(content: &str) -> AppResult<ConfigDiff> {
    let current = to_mapping(content)?;
    let expected = reference()?;

    Ok(ConfigDiff {
        missing: expected
            .keys()
            .filter(|k| !current.contains_key(*k))
            .map(key_name)
            .collect(),
        unknown: current
            .keys()
            .filter(|k| !expected.contains_key(*k))
            .map(key_name)
            .collect(),
    })
}

/// Add missing keys with default values. Unknown keys are kept.
/// Returns the names of the keys that were added.
pub fn fill_missing(path: &Path) -> AppResult<Vec<String>> {
    let content = fs::read_to_string(path)?;
    let mut current = to_mapping(&content)?;
    let expected = reference()?;

    let mut added = Vec::new();
    for (k, v) in expected {
        if !current.contains_key(&k) {
            added.push(key_name(&k));
            current.insert(k, v);
        }
    }

    if !added.is_empty() {
        let yaml = serde_yaml::to_string(&Value::Mapping(current))
            .map_err(|e| AppError::Config(e.to_string()))?;
        fs::write(path, yaml)?;
    }

    Ok(added)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finds_missing_and_unknown_keys() {
        let d = diff("database: x.sqlite\nshow_weekday: None\n").unwrap();
        assert!(d.missing.contains(&"schools".to_string()));
        assert!(d.missing.contains(&"merge_strategy".to_string()));
        assert_eq!(d.unknown, vec!["show_weekday".to_string()]);
        assert!(!d.is_clean());
    }

    #[test]
    fn fill_missing_rewrites_file() {
        let path = std::env::temp_dir().join("registro_cfg_fill_test.conf");
        fs::write(&path, "database: /tmp/reg.sqlite\n").unwrap();

        let added = fill_missing(&path).unwrap();
        assert!(added.contains(&"report_title".to_string()));

        let cfg = Config::load_from(&path).unwrap();
        assert_eq!(cfg.database, "/tmp/reg.sqlite");
        assert!(diff(&fs::read_to_string(&path).unwrap()).unwrap().is_clean());

        fs::remove_file(&path).ok();
    }
}
