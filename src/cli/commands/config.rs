use crate::cli::parser::Commands;
use crate::config::{Config, migrate};
use crate::errors::{AppError, AppResult};
use crate::ui::messages::{error, header, info, success, warning};
use std::fs;
use std::process::Command;

/// Handle the `config` subcommand
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Config {
        print_config,
        check,
        migrate: run_migrate,
        edit_config,
        editor,
    } = cmd
    {
        let path = Config::config_file();

        if *print_config {
            header("Current configuration");
            let yaml = serde_yaml::to_string(cfg).map_err(|e| AppError::Config(e.to_string()))?;
            println!("{yaml}");
        }

        if *check {
            let mut clean = true;

            if path.exists() {
                let diff = migrate::diff(&fs::read_to_string(&path)?)?;
                for k in &diff.missing {
                    warning(format!("missing key: {k} (default used)"));
                }
                for k in &diff.unknown {
                    warning(format!("unknown key: {k}"));
                }
                clean &= diff.is_clean();
            } else {
                info(format!("{} not found, defaults in use", path.display()));
            }

            for p in cfg.problems() {
                error(p);
                clean = false;
            }

            if clean {
                success("Configuration is valid.");
            }
        }

        if *run_migrate {
            if !path.exists() {
                return Err(AppError::Config(format!(
                    "{} not found, run `registro init` first",
                    path.display()
                )));
            }
            let added = migrate::fill_missing(&path)?;
            if added.is_empty() {
                info("Configuration already up to date.");
            } else {
                success(format!("Added keys: {}", added.join(", ")));
            }
        }

        if *edit_config {
            let default_editor = std::env::var("EDITOR")
                .or_else(|_| std::env::var("VISUAL"))
                .unwrap_or_else(|_| {
                    if cfg!(target_os = "windows") {
                        "notepad".to_string()
                    } else {
                        "nano".to_string()
                    }
                });

            let editor_to_use = editor.clone().unwrap_or_else(|| default_editor.clone());

            match Command::new(&editor_to_use).arg(&path).status() {
                Ok(s) if s.success() => {
                    success(format!("Configuration file edited using '{editor_to_use}'"));
                }
                _ => {
                    warning(format!(
                        "Editor '{editor_to_use}' not available, falling back to '{default_editor}'"
                    ));
                    match Command::new(&default_editor).arg(&path).status() {
                        Ok(s) if s.success() => success(format!(
                            "Configuration file edited using fallback '{default_editor}'"
                        )),
                        _ => error(format!(
                            "Failed to edit configuration file using fallback '{default_editor}'"
                        )),
                    }
                }
            }
        }
    }

    Ok(())
}
