use crate::cli::parser::Cli;
use crate::config::Config;
use crate::db::initialize::init_db;
use crate::db::log::audit_quiet;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::ui::messages::{info, success};

/// Handle the `init` command
///
/// This initializes:
///  - the config directory and file (skipped in test mode)
///  - the SQLite database file
///  - all pending DB migrations
pub fn handle(cli: &Cli) -> AppResult<()> {
    let cfg = Config::init_all(cli.db.clone(), cli.test)?;

    info("Initializing registro…");
    if !cli.test {
        info(format!("Config file : {}", Config::config_file().display()));
    }
    info(format!("Database    : {}", cfg.database));

    let pool = DbPool::new(&cfg.database)?;
    let applied = init_db(&pool.conn)?;

    audit_quiet(
        &pool.conn,
        "init",
        "",
        &format!("Database initialized at {} ({applied} migrations)", cfg.database),
    );

    success(format!("Database initialized at {}", cfg.database));
    Ok(())
}
