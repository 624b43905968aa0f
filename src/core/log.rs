use crate::db::log::{LogEntry, load_log};
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::utils::formatting::strip_ansi;
use ansi_term::Colour;

const OP_WIDTH: usize = 48;

fn color_for_operation(op: &str) -> Colour {
    match op {
        "add" | "import" => Colour::Green,
        "del" => Colour::Red,
        "edit" | "note" => Colour::Yellow,
        "attend" => Colour::Cyan,
        "verify" | "unverify" => Colour::Blue,
        "migration_applied" => Colour::Purple,
        "backup" => Colour::Blue,
        "init" => Colour::RGB(255, 153, 51),
        _ => Colour::White,
    }
}

/// `op (target)` with only the operation coloured, cut to `width` visible
/// characters.
fn render_op(entry: &LogEntry, width: usize) -> String {
    let colour = color_for_operation(&entry.operation);

    let plain = if entry.target.is_empty() {
        entry.operation.clone()
    } else {
        format!("{} ({})", entry.operation, entry.target)
    };

    let visible = if plain.chars().count() > width {
        let mut s: String = plain.chars().take(width.saturating_sub(3)).collect();
        s.push_str("...");
        s
    } else {
        plain
    };

    let coloured = match visible.split_once(' ') {
        Some((op, rest)) => format!("{} {}", colour.paint(op), rest),
        None => colour.paint(visible.as_str()).to_string(),
    };

    let pad = " ".repeat(width.saturating_sub(strip_ansi(&coloured).chars().count()));
    format!("{coloured}{pad}")
}

pub struct LogLogic;

impl LogLogic {
    pub fn print_log(pool: &DbPool, last: Option<usize>) -> AppResult<()> {
        let entries = load_log(&pool.conn, last)?;

        if entries.is_empty() {
            println!("📜 Internal log is empty.");
            return Ok(());
        }

        let id_w = entries.iter().map(|e| e.id.to_string().len()).max().unwrap_or(1);
        let op_w = entries
            .iter()
            .map(|e| e.operation.len() + e.target.len() + 3)
            .max()
            .unwrap_or(10)
            .min(OP_WIDTH);

        println!("📜 Internal log:\n");
        for e in &entries {
            let date = chrono::DateTime::parse_from_rfc3339(&e.date)
                .map(|dt| dt.format("%Y-%m-%d %H:%M:%S").to_string())
                .unwrap_or_else(|_| e.date.clone());

            println!(
                "{:>id_w$}: {} | {} => {}",
                e.id,
                date,
                render_op(e, op_w),
                e.message,
            );
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(op: &str, target: &str) -> LogEntry {
        LogEntry {
            id: 1,
            date: String::new(),
            operation: op.into(),
            target: target.into(),
            message: String::new(),
        }
    }

    #[test]
    fn render_pads_to_visible_width() {
        let out = render_op(&entry("add", "lesson 3"), 20);
        assert_eq!(strip_ansi(&out).chars().count(), 20);
        assert!(strip_ansi(&out).starts_with("add (lesson 3)"));
    }

    #[test]
    fn render_truncates_long_targets() {
        let out = render_op(&entry("migration_applied", "20240901_0001_students_attendance"), 24);
        let plain = strip_ansi(&out);
        assert_eq!(plain.chars().count(), 24);
        assert!(plain.ends_with("..."));
    }
}
