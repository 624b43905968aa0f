use super::optional_day;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::export::{ExportLogic, ExportRequest};
use crate::utils::date::today;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Export {
        kind,
        format,
        file,
        school,
        class,
        date,
        month,
        range,
        period,
        sort,
        notes,
        force,
    } = cmd
    {
        let req = ExportRequest {
            kind: *kind,
            format: *format,
            file: file.clone(),
            force: *force,
            school: school.clone(),
            class: class.clone(),
            date: optional_day(date.as_deref())?,
            month: month.clone(),
            range: range.clone(),
            period: *period,
            sort: *sort,
            notes: *notes,
        };

        let pool = DbPool::open(&cfg.database)?;
        ExportLogic::export(&pool, cfg, &req, today())?;
    }
    Ok(())
}
