//! Builders turning register data into [`Report`]s.

use crate::core::calculator::ActivityTotals;
use crate::core::lessons::LessonMonth;
use crate::db::log::load_log;
use crate::db::{activities, attendance, lessons, notes, students, verifications};
use crate::errors::AppResult;
use crate::export::model::{Report, ReportSection, SectionLayout};
use crate::models::{Activity, DailyNote, RegisterView};
use crate::utils::date::{long_date, month_name, short_date};
use crate::utils::formatting::yes_no;
use crate::utils::time::format_hours;
use rusqlite::Connection;
use serde_json::{Value, json};
use std::cmp::Ordering;

fn register_section(view: &RegisterView, title: String) -> ReportSection {
    let mut section = ReportSection::new(title, &["#", "Student", "Status", "Notes"]);

    section.rows = view
        .rows
        .iter()
        .enumerate()
        .map(|(i, r)| {
            vec![
                (i + 1).to_string(),
                r.student.name.clone(),
                if r.present { "present" } else { "absent" }.to_string(),
                r.notes.clone(),
            ]
        })
        .collect();

    section.footer.push(format!(
        "Present: {} / {}",
        view.present_count(),
        view.rows.len()
    ));
    if let Some(l) = &view.lesson {
        section.footer.push(format!("Lesson: {}", l.time_range()));
    }
    match &view.activity {
        Some(a) => section.footer.push(format!(
            "Activity: {} ({} - {})",
            a.description, a.start_time, a.end_time
        )),
        None => section.footer.push("Activity: -".to_string()),
    }

    let verified_by = view
        .lesson
        .as_ref()
        .and_then(|l| l.verified_by.clone())
        .map(|b| format!(" by {b}"))
        .unwrap_or_default();
    section.footer.push(format!(
        "Attendance verified: {}{}",
        yes_no(view.verified),
        if view.verified { verified_by.as_str() } else { "" }
    ));

    section
}

pub fn register_report(view: &RegisterView, report_title: &str) -> Report {
    Report {
        title: format!("{report_title} - {} {}", view.school, view.class),
        subtitle: Some(long_date(view.date)),
        sections: vec![register_section(view, String::new())],
        layout: SectionLayout::Continuous,
    }
}

/// One section per register, ordered by date, school and class.
pub fn registers_report(mut views: Vec<RegisterView>, report_title: &str) -> Report {
    views.sort_by(|a, b| {
        a.date
            .cmp(&b.date)
            .then_with(|| a.school.cmp(&b.school))
            .then_with(|| a.class.cmp(&b.class))
    });

    Report {
        title: format!("{report_title} - verified registers"),
        subtitle: None,
        sections: views
            .iter()
            .map(|v| register_section(v, format!("{} - {} {}", long_date(v.date), v.school, v.class)))
            .collect(),
        layout: SectionLayout::PagePerSection,
    }
}

/// Date ascending, then hours descending, then school.
pub fn sort_for_export(list: &mut [Activity]) {
    list.sort_by(|a, b| {
        a.date
            .cmp(&b.date)
            .then_with(|| b.hours.partial_cmp(&a.hours).unwrap_or(Ordering::Equal))
            .then_with(|| a.school.cmp(&b.school))
    });
}

pub fn activities_report(
    mut list: Vec<Activity>,
    totals: &ActivityTotals,
    subtitle: String,
) -> Report {
    sort_for_export(&mut list);

    let mut section = ReportSection::new(
        "",
        &["Date", "School", "Class", "Start", "End", "Hours", "Description"],
    );
    section.rows = list
        .iter()
        .map(|a| {
            vec![
                a.date_str(),
                a.school.clone(),
                a.class.clone(),
                a.start_time.clone(),
                a.end_time.clone(),
                format_hours(a.hours),
                a.description.clone(),
            ]
        })
        .collect();

    if !section.rows.is_empty() {
        section.rows.push(vec![
            "TOTAL".to_string(),
            String::new(),
            String::new(),
            String::new(),
            String::new(),
            format_hours(totals.total),
            String::new(),
        ]);
    }

    section.footer = vec![
        format!("Real hours (overlaps merged): {}", format_hours(totals.real)),
        format!("Hours this week: {}", format_hours(totals.week)),
        format!("Hours this month: {}", format_hours(totals.month)),
    ];

    Report {
        title: "Activity summary".to_string(),
        subtitle: Some(subtitle),
        sections: vec![section],
        layout: SectionLayout::Continuous,
    }
}

pub fn lessons_report(month: &LessonMonth, day_notes: Option<&[DailyNote]>, report_title: &str) -> Report {
    let mut section = ReportSection::new(
        "",
        &["Date", "Time", "School", "Class", "Hours", "Completed", "Verified"],
    );

    section.rows = month
        .lessons
        .iter()
        .map(|l| {
            vec![
                l.date_str(),
                l.time_range(),
                l.school.clone(),
                l.class.clone(),
                LessonMonth::listed_hours(l).to_string(),
                yes_no(l.completed).to_string(),
                yes_no(l.attendance_verified).to_string(),
            ]
        })
        .collect();

    section.footer.push(format!(
        "Completed lessons: real hours {} / billed hours {}",
        format_hours(month.real_hours),
        month.billed_hours
    ));

    if let Some(day_notes) = day_notes
        && !day_notes.is_empty()
    {
        section.footer.push("Day notes:".to_string());
        for n in day_notes {
            section.footer.push(format!("{}: {}", short_date(n.date), n.content));
        }
    }

    Report {
        title: format!("{report_title} - lessons"),
        subtitle: Some(format!("{} {}", month_name(month.month), month.year)),
        sections: vec![section],
        layout: SectionLayout::Continuous,
    }
}

/// Serialize every row of `items` as a JSON object and turn it into a table.
fn table_section<T: serde::Serialize>(name: &str, items: &[T]) -> AppResult<ReportSection> {
    let values: Vec<Value> = items
        .iter()
        .map(serde_json::to_value)
        .collect::<Result<_, _>>()
        .map_err(|e| crate::errors::AppError::Export(e.to_string()))?;

    let headers: Vec<String> = match values.first() {
        Some(Value::Object(m)) => m.keys().cloned().collect(),
        _ => Vec::new(),
    };

    let rows = values
        .iter()
        .map(|v| {
            headers
                .iter()
                .map(|h| match &v[h.as_str()] {
                    Value::Null => String::new(),
                    Value::String(s) => s.clone(),
                    Value::Bool(b) => (if *b { "1" } else { "0" }).to_string(),
                    other => other.to_string(),
                })
                .collect()
        })
        .collect();

    Ok(ReportSection {
        title: name.to_string(),
        headers,
        rows,
        footer: Vec::new(),
    })
}

pub fn database_json(conn: &Connection) -> AppResult<Value> {
    Ok(json!({
        "students": students::list(conn, None, None)?,
        "attendance": attendance::all(conn)?,
        "verifications": verifications::all(conn)?,
        "lessons": lessons::all(conn)?,
        "activities": activities::list(conn, None, None)?,
        "daily_notes": notes::all(conn)?,
        "log": load_log(conn, None)?,
    }))
}

/// Every table as its own section.
pub fn database_report(conn: &Connection) -> AppResult<Report> {
    let Value::Object(tables) = database_json(conn)? else {
        return Err(crate::errors::AppError::Other("unexpected database dump".into()));
    };

    let mut sections = Vec::new();
    for (name, rows) in tables {
        let items = match rows {
            Value::Array(a) => a,
            _ => Vec::new(),
        };
        sections.push(table_section(&name, &items)?);
    }

    Ok(Report {
        title: "Database".to_string(),
        subtitle: None,
        sections,
        layout: SectionLayout::SeparateTables,
    })
}
