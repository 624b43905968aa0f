use crate::errors::{AppError, AppResult};
use crate::ui::messages::{info, warning};
use crate::utils::prompt::confirm;
use std::path::Path;

/// Whether the output file may be written.
///
/// - missing file → Ok
/// - existing file with `force` → Ok
/// - existing file without `force` → ask; a "no" cancels the export
pub(crate) fn ensure_writable(path: &Path, force: bool) -> AppResult<()> {
    if !path.exists() || force {
        return Ok(());
    }

    warning(format!("The file '{}' already exists.", path.display()));

    if confirm("Overwrite?")? {
        info("Existing file will be overwritten.");
        Ok(())
    } else {
        Err(AppError::Export(
            "export cancelled: existing file not overwritten".into(),
        ))
    }
}
