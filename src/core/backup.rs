use crate::config::Config;
use crate::db::log::audit_quiet;
use crate::db::pool::DbPool;
use crate::errors::{AppError, AppResult};
use crate::ui::messages::{info, success, warning};
use crate::utils::prompt::confirm;
use std::fs;
use std::path::{Path, PathBuf};
use zip::ZipWriter;
use zip::write::FileOptions;

pub struct BackupLogic;

impl BackupLogic {
    /// Copy the database to `dest_file`, optionally replacing the copy with a
    /// zip archive. An existing destination is overwritten only after
    /// confirmation (or with `force`). Returns the written path, or `None` when
    /// the user declined.
    pub fn backup(cfg: &Config, dest_file: &str, compress: bool, force: bool) -> AppResult<Option<PathBuf>> {
        let src = Path::new(&cfg.database);
        let dest = Path::new(dest_file);

        if !src.exists() {
            return Err(AppError::NotFound(format!("database {}", src.display())));
        }

        if let Some(parent) = dest.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }

        let final_target = if compress { dest.with_extension("zip") } else { dest.to_path_buf() };
        if final_target.exists() && !force {
            warning(format!("The file '{}' already exists.", final_target.display()));
            if !confirm("Overwrite it?")? {
                info("Backup cancelled.");
                return Ok(None);
            }
        }

        let final_path = if compress {
            let copy = if dest.extension().is_some_and(|e| e == "zip") {
                dest.with_extension("sqlite")
            } else {
                dest.to_path_buf()
            };
            fs::copy(src, &copy)?;
            let zipped = compress_backup(&copy)?;
            fs::remove_file(&copy)?;
            zipped
        } else {
            fs::copy(src, dest)?;
            dest.to_path_buf()
        };

        success(format!("Backup created: {}", final_path.display()));

        let pool = DbPool::new(&cfg.database)?;
        audit_quiet(
            &pool.conn,
            "backup",
            &final_path.to_string_lossy(),
            if compress {
                "Backup created and compressed"
            } else {
                "Backup created"
            },
        );

        Ok(Some(final_path))
    }
}

fn compress_backup(path: &Path) -> AppResult<PathBuf> {
    let zip_path = path.with_extension("zip");
    let file = fs::File::create(&zip_path)?;
    let mut zip = ZipWriter::new(file);

    let options: FileOptions<'_, ()> =
        FileOptions::default().compression_method(zip::CompressionMethod::Deflated);

    let entry = path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| "registro.sqlite".to_string());

    let mut f = fs::File::open(path)?;
    zip.start_file(entry, options).map_err(std::io::Error::other)?;
    std::io::copy(&mut f, &mut zip)?;
    zip.finish().map_err(std::io::Error::other)?;

    Ok(zip_path)
}
