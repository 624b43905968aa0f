use crate::core::query::{Period, SortDirection};
use crate::export::{ExportFormat, ExportKind};
use clap::{Parser, Subcommand};

/// Command-line interface definition for registro
/// A school register: attendance, lessons, activities and real hours on SQLite
#[derive(Parser)]
#[command(
    name = "registro",
    version = env!("CARGO_PKG_VERSION"),
    about = "A school register CLI: attendance, lessons, activities and real-hours reports on SQLite",
    long_about = None
)]
pub struct Cli {
    /// Override database path (useful for tests or custom DB)
    #[arg(global = true, long = "db")]
    pub db: Option<String>,

    /// Run in test mode (no config file update)
    #[arg(global = true, long = "test", hide = true)]
    pub test: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the database and configuration
    Init,

    /// Manage the configuration file (view, check or edit)
    Config {
        #[arg(long = "print", help = "Print the current configuration")]
        print_config: bool,

        #[arg(long = "check", help = "Check the configuration for missing keys and invalid values")]
        check: bool,

        #[arg(long = "migrate", help = "Add missing keys to the configuration file")]
        migrate: bool,

        #[arg(
            long = "edit",
            help = "Edit the configuration file (default editor: $EDITOR, or nano/notepad)"
        )]
        edit_config: bool,

        #[arg(
            long = "editor",
            help = "Specify the editor to use (vim, nano, or custom path)"
        )]
        editor: Option<String>,
    },

    /// Manage the database (migrations, integrity checks, etc.)
    Db {
        #[arg(long = "migrate", help = "Run pending database migrations")]
        migrate: bool,

        #[arg(long = "check", help = "Check database integrity")]
        check: bool,

        #[arg(long = "vacuum", help = "Optimize the database using VACUUM")]
        vacuum: bool,

        #[arg(long = "info", help = "Show database information")]
        info: bool,
    },

    /// Print the internal log table
    Log {
        #[arg(long = "print", help = "Print rows from the internal log table")]
        print: bool,

        #[arg(long = "last", help = "Only the last N rows")]
        last: Option<usize>,
    },

    /// Copy the database to a backup file
    Backup {
        /// Absolute destination path
        #[arg(long)]
        file: String,

        /// Compress the copy into a zip archive
        #[arg(long)]
        compress: bool,

        /// Overwrite an existing file without asking
        #[arg(long)]
        force: bool,
    },

    /// Manage the students of a class
    Student {
        #[command(subcommand)]
        action: StudentAction,
    },

    /// Mark a student present or absent
    Attend {
        /// Student id
        student: i64,

        /// Day (YYYY-MM-DD, default today)
        #[arg(long)]
        date: Option<String>,

        /// Mark absent instead of present
        #[arg(long, conflicts_with = "present")]
        absent: bool,

        /// Mark present (default)
        #[arg(long)]
        present: bool,
    },

    /// Set the note of a student for a day
    Note {
        /// Student id
        student: i64,

        /// Note text (empty string clears it)
        text: String,

        /// Day (YYYY-MM-DD, default today)
        #[arg(long)]
        date: Option<String>,
    },

    /// Show the attendance register of a class
    Register {
        #[arg(long)]
        school: String,

        #[arg(long)]
        class: String,

        /// Day (YYYY-MM-DD, default today)
        #[arg(long)]
        date: Option<String>,
    },

    /// Verify (or un-verify) the attendance of a class lesson
    Verify {
        #[arg(long)]
        school: String,

        #[arg(long)]
        class: String,

        /// Day (YYYY-MM-DD, default today)
        #[arg(long)]
        date: Option<String>,

        /// Remove the verification
        #[arg(long)]
        undo: bool,

        /// Who verified (default: `operator` from the configuration)
        #[arg(long)]
        by: Option<String>,
    },

    /// Manage lessons
    Lesson {
        #[command(subcommand)]
        action: LessonAction,
    },

    /// Manage activities
    Activity {
        #[command(subcommand)]
        action: ActivityAction,
    },

    /// Manage day notes
    DayNote {
        #[command(subcommand)]
        action: DayNoteAction,
    },

    /// Export registers, activities, lessons or the whole database
    Export {
        /// What to export
        #[arg(long, value_enum)]
        kind: ExportKind,

        /// Output format
        #[arg(long, value_enum)]
        format: ExportFormat,

        /// Absolute output file path
        #[arg(long)]
        file: String,

        #[arg(long)]
        school: Option<String>,

        #[arg(long)]
        class: Option<String>,

        /// Day of the register (YYYY-MM-DD, default today)
        #[arg(long)]
        date: Option<String>,

        /// Month (YYYY-MM) for lessons, or for activities with `--period month`
        #[arg(long)]
        month: Option<String>,

        /// Activity date range: YYYY, YYYY-MM, YYYY-MM-DD or FROM:TO
        #[arg(long)]
        range: Option<String>,

        #[arg(long, value_enum, default_value_t = Period::Week)]
        period: Period,

        #[arg(long, value_enum, default_value_t = SortDirection::Desc)]
        sort: SortDirection,

        /// Append the day notes of the month to the lessons export
        #[arg(long)]
        notes: bool,

        /// Overwrite an existing file without asking
        #[arg(long)]
        force: bool,
    },
}

#[derive(Subcommand)]
pub enum StudentAction {
    /// Add a student to a class
    Add {
        name: String,
        #[arg(long)]
        school: String,
        #[arg(long)]
        class: String,
    },
    /// List students, optionally of one school/class
    List {
        #[arg(long)]
        school: Option<String>,
        #[arg(long)]
        class: Option<String>,
    },
    /// Rename a student
    Rename { id: i64, name: String },
    /// Delete a student and their attendance
    Del {
        id: i64,
        /// Do not ask for confirmation
        #[arg(long)]
        yes: bool,
    },
    /// Import a class from a file (one name per line, or CSV with a `name` column)
    Import {
        file: String,
        #[arg(long)]
        school: String,
        #[arg(long)]
        class: String,
    },
}

#[derive(Subcommand)]
pub enum LessonAction {
    /// Add a lesson for one or more classes of a school
    Add {
        #[arg(long)]
        school: String,
        /// Class (repeatable); none means a school-wide lesson
        #[arg(long = "class")]
        classes: Vec<String>,
        /// Day (YYYY-MM-DD, default today)
        #[arg(long)]
        date: Option<String>,
        /// Start time (HH:MM)
        #[arg(long)]
        start: Option<String>,
        /// End time (HH:MM)
        #[arg(long)]
        end: Option<String>,
        /// Hours to store instead of the computed ones
        #[arg(long)]
        hours: Option<f64>,
        /// Mark the attendance as already verified
        #[arg(long)]
        verified: bool,
        #[arg(long)]
        notes: Option<String>,
    },
    /// Change fields of a lesson
    Edit {
        id: i64,
        #[arg(long)]
        date: Option<String>,
        #[arg(long)]
        school: Option<String>,
        #[arg(long)]
        class: Option<String>,
        #[arg(long)]
        start: Option<String>,
        #[arg(long)]
        end: Option<String>,
        #[arg(long)]
        hours: Option<f64>,
        #[arg(long)]
        notes: Option<String>,
    },
    /// Delete a lesson
    Del {
        id: i64,
        #[arg(long)]
        yes: bool,
    },
    /// Toggle the completed flag of a lesson
    Complete { id: i64 },
    /// List the lessons of a month with totals
    List {
        /// Month (YYYY-MM, default the current one)
        #[arg(long)]
        month: Option<String>,
        #[arg(long)]
        school: Option<String>,
        #[arg(long)]
        class: Option<String>,
    },
}

#[derive(Subcommand)]
pub enum ActivityAction {
    /// Record an activity
    Add {
        description: String,
        #[arg(long)]
        school: String,
        #[arg(long)]
        class: String,
        /// Day (YYYY-MM-DD, default today)
        #[arg(long)]
        date: Option<String>,
        #[arg(long)]
        start: Option<String>,
        #[arg(long)]
        end: Option<String>,
        #[arg(long)]
        hours: Option<f64>,
    },
    /// Change fields of an activity
    Edit {
        id: i64,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        date: Option<String>,
        #[arg(long)]
        school: Option<String>,
        #[arg(long)]
        class: Option<String>,
        #[arg(long)]
        start: Option<String>,
        #[arg(long)]
        end: Option<String>,
        #[arg(long)]
        hours: Option<f64>,
    },
    /// Delete an activity
    Del {
        id: i64,
        #[arg(long)]
        yes: bool,
    },
    /// List activities
    List {
        #[command(flatten)]
        filter: ActivityFilter,
    },
    /// List activities with total, weekly, monthly and real hours
    Summary {
        #[command(flatten)]
        filter: ActivityFilter,
    },
}

#[derive(clap::Args, Clone)]
pub struct ActivityFilter {
    #[arg(long, value_enum, default_value_t = Period::Week)]
    pub period: Period,
    /// Month (YYYY-MM) used with `--period month`
    #[arg(long)]
    pub month: Option<String>,
    /// YYYY, YYYY-MM, YYYY-MM-DD or FROM:TO; wins over `--period`
    #[arg(long)]
    pub range: Option<String>,
    #[arg(long)]
    pub school: Option<String>,
    #[arg(long)]
    pub class: Option<String>,
    #[arg(long, value_enum, default_value_t = SortDirection::Desc)]
    pub sort: SortDirection,
}

#[derive(Subcommand)]
pub enum DayNoteAction {
    /// Set the note of a day (replaces an existing one)
    Set {
        text: String,
        /// Day (YYYY-MM-DD, default today)
        #[arg(long)]
        date: Option<String>,
    },
    /// Delete the note of a day
    Del {
        #[arg(long)]
        date: Option<String>,
    },
    /// List the notes of a month
    List {
        /// Month (YYYY-MM, default the current one)
        #[arg(long)]
        month: Option<String>,
    },
}
