use crate::core::calculator::MergeStrategy;
use crate::errors::{AppError, AppResult};
use crate::models::Roster;
use crate::utils::time::parse_time;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

pub mod migrate;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub database: String,

    #[serde(default = "default_start_time")]
    pub default_start_time: String,

    #[serde(default = "default_end_time")]
    pub default_end_time: String,

    #[serde(default)]
    pub merge_strategy: MergeStrategy,

    /// Name recorded as `verified_by` when `--by` is not given
    #[serde(default)]
    pub operator: Option<String>,

    #[serde(default = "default_report_title")]
    pub report_title: String,

    #[serde(default)]
    pub schools: Roster,
}

fn default_start_time() -> String {
    "08:00".to_string()
}

fn default_end_time() -> String {
    "12:00".to_string()
}

fn default_report_title() -> String {
    "Class register".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self::with_database(Self::database_file())
    }
}

impl Config {
    fn with_database(db: PathBuf) -> Self {
        Self {
            database: db.to_string_lossy().to_string(),
            default_start_time: default_start_time(),
            default_end_time: default_end_time(),
            merge_strategy: MergeStrategy::default(),
            operator: None,
            report_title: default_report_title(),
            schools: Roster::default(),
        }
    }

    /// Return the standard configuration directory depending on the platform
    pub fn config_dir() -> PathBuf {
        if cfg!(target_os = "windows") {
            let appdata = env::var("APPDATA").unwrap_or_else(|_| ".".to_string());
            PathBuf::from(appdata).join("registro")
        } else {
            let home = dirs::home_dir()
                .or_else(|| env::var("HOME").ok().map(PathBuf::from))
                .unwrap_or_else(|| PathBuf::from("."));
            home.join(".registro")
        }
    }

    pub fn config_file() -> PathBuf {
        Self::config_dir().join("registro.conf")
    }

    pub fn database_file() -> PathBuf {
        Self::config_dir().join("registro.sqlite")
    }

    /// Load configuration from file, or return defaults if not found
    pub fn load() -> AppResult<Self> {
        Self::load_from(&Self::config_file())
    }

    pub fn load_from(path: &Path) -> AppResult<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)?;
        serde_yaml::from_str(&content)
            .map_err(|e| AppError::Config(format!("{}: {}", path.display(), e)))
    }

    /// Problems that would make commands misbehave. Empty when the file is usable.
    pub fn problems(&self) -> Vec<String> {
        let mut out = Vec::new();

        if self.database.trim().is_empty() {
            out.push("database path is empty".to_string());
        }

        let start = parse_time(&self.default_start_time);
        let end = parse_time(&self.default_end_time);
        if start.is_none() {
            out.push(format!(
                "default_start_time '{}' is not HH:MM",
                self.default_start_time
            ));
        }
        if end.is_none() {
            out.push(format!(
                "default_end_time '{}' is not HH:MM",
                self.default_end_time
            ));
        }
        if let (Some(s), Some(e)) = (start, end)
            && e <= s
        {
            out.push("default_end_time must be after default_start_time".to_string());
        }

        out.extend(self.schools.problems());
        out
    }

    /// Create the configuration directory, the configuration file and an empty
    /// database file. `custom_db` is taken relative to the configuration
    /// directory unless absolute. In test mode the configuration file is left
    /// untouched.
    pub fn init_all(custom_db: Option<String>, is_test: bool) -> AppResult<Self> {
        let dir = Self::config_dir();

        let db_path = match custom_db {
            Some(name) => {
                let p = Path::new(&name);
                if p.is_absolute() {
                    p.to_path_buf()
                } else {
                    dir.join(p)
                }
            }
            None => Self::database_file(),
        };

        let config = Self::with_database(db_path.clone());

        if !is_test {
            fs::create_dir_all(&dir)?;
            let yaml = serde_yaml::to_string(&config)
                .map_err(|e| AppError::Config(e.to_string()))?;
            let mut file = fs::File::create(Self::config_file())?;
            file.write_all(yaml.as_bytes())?;
        }

        if let Some(parent) = db_path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }
        if !db_path.exists() {
            fs::File::create(&db_path)?;
        }

        Ok(config)
    }
}
