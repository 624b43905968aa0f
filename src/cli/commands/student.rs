use crate::cli::parser::{Commands, StudentAction};
use crate::config::Config;
use crate::core::StudentLogic;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::ui::messages::{info, success};
use crate::utils::path::expand_tilde;
use crate::utils::prompt::confirm;
use crate::utils::table::{Column, Table};

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    let Commands::Student { action } = cmd else {
        return Ok(());
    };

    let mut pool = DbPool::open(&cfg.database)?;

    match action {
        StudentAction::Add {
            name,
            school,
            class,
        } => {
            let s = StudentLogic::add(&mut pool, cfg, name, school, class)?;
            success(format!("Added {} (id {}) to {} {}", s.name, s.id, s.school, s.class));
        }

        StudentAction::List { school, class } => {
            let list = StudentLogic::list(&pool, school.as_deref(), class.as_deref())?;
            if list.is_empty() {
                info("No students found.");
                return Ok(());
            }

            let mut table = Table::new(vec![
                Column::right("ID"),
                Column::left("Name"),
                Column::left("School"),
                Column::left("Class"),
            ]);
            for s in &list {
                table.add_row(vec![s.id.to_string(), s.name.clone(), s.school.clone(), s.class.clone()]);
            }
            print!("{}", table.render());
            println!("{} student(s)", list.len());
        }

        StudentAction::Rename { id, name } => {
            let s = StudentLogic::rename(&mut pool, *id, name)?;
            success(format!("Student {} renamed to {}", s.id, s.name));
        }

        StudentAction::Del { id, yes } => {
            let s = StudentLogic::get(&pool, *id)?;
            if !*yes && !confirm(&format!("Delete {} ({} {}) and their attendance?", s.name, s.school, s.class))? {
                info("Nothing deleted.");
                return Ok(());
            }
            StudentLogic::delete(&mut pool, *id)?;
            success(format!("Deleted {}", s.name));
        }

        StudentAction::Import {
            file,
            school,
            class,
        } => {
            let n = StudentLogic::import(&mut pool, cfg, school, class, &expand_tilde(file))?;
            success(format!("{n} students imported into {school} {class}"));
        }
    }

    Ok(())
}
