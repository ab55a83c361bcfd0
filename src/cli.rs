use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Termin - appointment manager with AI-assisted entry
#[derive(Debug, Parser)]
#[command(name = "termin")]
#[command(about = "Appointment manager with AI-assisted parsing of free-text descriptions", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Command to execute (if not specified, enters interactive terminal mode)
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Use this config file instead of the default location
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Add an appointment, optionally pre-filled from a description
    #[command(alias = "create")]
    Add(AddArgs),

    /// Show what the smart parser extracts from a description, without saving
    Parse {
        /// Free-text description of the appointment
        #[arg(required = true, num_args = 1..)]
        text: Vec<String>,

        /// Reference date for relative expressions (YYYY-MM-DD), defaults to today
        #[arg(long)]
        today: Option<NaiveDate>,
    },

    /// List appointments in chronological order
    #[command(alias = "ls")]
    List {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },

    /// Delete an appointment by id
    #[command(alias = "remove")]
    Delete {
        /// Appointment id as shown by `list`
        #[arg(required = true)]
        id: String,
    },

    /// Print the current location as it would fill the location field
    Locate,

    /// View or modify configuration
    Config {
        #[command(subcommand)]
        action: ConfigActions,
    },
}

#[derive(Debug, Args, Default)]
pub struct AddArgs {
    /// Description to parse first; explicit fields below override the result
    #[arg(long = "from-text", short = 's')]
    pub from_text: Option<String>,

    /// Appointment title
    #[arg(long)]
    pub title: Option<String>,

    /// Date (YYYY-MM-DD)
    #[arg(long)]
    pub date: Option<String>,

    /// Time (HH:MM, 24-hour)
    #[arg(long)]
    pub time: Option<String>,

    /// Location
    #[arg(long)]
    pub location: Option<String>,

    /// Additional notes
    #[arg(long)]
    pub notes: Option<String>,

    /// Use the current location
    #[arg(long, conflicts_with = "location")]
    pub here: bool,
}

#[derive(Debug, Subcommand)]
pub enum ConfigActions {
    /// Print the active configuration
    Show,

    /// Print the config file location
    Path,

    /// Set a value, e.g. `language_model.model gemini-2.5-flash`
    Set {
        #[arg(required = true)]
        key: String,
        #[arg(required = true)]
        value: String,
    },
}
