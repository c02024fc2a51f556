use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "rollcall")]
#[command(version)]
#[command(about = "Command-line client for a student roster REST service", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Backend base URL (overrides ROLLCALL_URL and the config file)
    #[arg(long, global = true)]
    pub url: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Add a student
    #[command(alias = "a")]
    Add {
        name: String,
        age: u32,
        grade: String,
    },

    /// List students
    #[command(alias = "ls")]
    List {
        /// Only students in this grade (exact match)
        #[arg(short, long, conflicts_with = "search")]
        grade: Option<String>,

        /// Search term (name or grade)
        #[arg(short, long)]
        search: Option<String>,
    },

    /// Show one student
    Get {
        /// Server-assigned student id
        id: i64,
    },

    /// Update fields on a student
    #[command(alias = "e")]
    Edit {
        /// Server-assigned student id
        id: i64,

        #[arg(long)]
        name: Option<String>,

        #[arg(long)]
        age: Option<u32>,

        #[arg(long)]
        grade: Option<String>,
    },

    /// Delete a student (asks for confirmation)
    #[command(alias = "rm")]
    Delete {
        /// Server-assigned student id
        id: i64,

        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },

    /// Search students by name or grade
    Search { query: String },

    /// Roster totals and per-grade breakdown
    Stats,

    /// Get or set configuration (base-url, api-prefix, timeout)
    Config {
        /// Configuration key
        key: Option<String>,

        /// Value to set (if omitted, prints current value)
        value: Option<String>,
    },

    /// Interactive form-and-list session with search-as-you-type
    #[command(alias = "b")]
    Browse,
}
