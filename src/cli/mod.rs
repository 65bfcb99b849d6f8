//! Command-line interface for tm
//!
//! This module defines the CLI structure using clap derive macros.
//! Command implementations live in the submodules.

use clap::{Parser, Subcommand};

use crate::error::Result;

mod task;
mod theme;

/// tm - TaskMaster
///
/// A keyboard-driven personal task tracker. Tasks live in a local JSON
/// store; every command works on it directly, and `tm ui` opens an
/// interactive viewer.
#[derive(Parser, Debug)]
#[command(name = "tm")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Store directory (defaults to the configured or platform data dir)
    #[arg(long, global = true)]
    pub store: Option<std::path::PathBuf>,

    /// Output in JSON format
    #[arg(long, global = true)]
    pub json: bool,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Add a new task
    Add {
        /// Task title
        title: String,

        /// Priority: low, medium, high (default from config, normally medium)
        #[arg(long)]
        priority: Option<String>,

        /// Due date: RFC 3339, "YYYY-MM-DDTHH:MM", or "YYYY-MM-DD"
        #[arg(long)]
        due: Option<String>,
    },

    /// List tasks with counts
    List {
        /// Show only this subset: all, active, completed
        #[arg(long, default_value = "all")]
        filter: String,
    },

    /// Toggle a task between active and completed
    Toggle {
        /// Task id (unique prefixes accepted)
        id: String,
    },

    /// Edit a task's title, priority, or due date
    Edit {
        /// Task id (unique prefixes accepted)
        id: String,

        /// New title
        #[arg(long)]
        title: Option<String>,

        /// New priority: low, medium, high
        #[arg(long)]
        priority: Option<String>,

        /// New due date: RFC 3339, "YYYY-MM-DDTHH:MM", or "YYYY-MM-DD"
        #[arg(long, conflicts_with = "clear_due")]
        due: Option<String>,

        /// Remove the due date
        #[arg(long)]
        clear_due: bool,
    },

    /// Delete a task
    Rm {
        /// Task id (unique prefixes accepted)
        id: String,
    },

    /// Emit the calendar event feed (one entry per task)
    Events,

    /// Show or set the theme preference
    Theme {
        /// "dark" or "light"; omit to show the current preference
        mode: Option<String>,
    },

    /// Open the interactive task viewer
    Ui,
}

impl Cli {
    pub fn run(self) -> Result<()> {
        let Cli {
            store,
            json,
            quiet,
            command,
        } = self;

        match command {
            Commands::Add {
                title,
                priority,
                due,
            } => task::run_add(task::AddOptions {
                title,
                priority,
                due,
                store,
                json,
                quiet,
            }),
            Commands::List { filter } => task::run_list(task::ListOptions {
                filter,
                store,
                json,
                quiet,
            }),
            Commands::Toggle { id } => task::run_toggle(task::ToggleOptions {
                id,
                store,
                json,
                quiet,
            }),
            Commands::Edit {
                id,
                title,
                priority,
                due,
                clear_due,
            } => task::run_edit(task::EditOptions {
                id,
                title,
                priority,
                due,
                clear_due,
                store,
                json,
                quiet,
            }),
            Commands::Rm { id } => task::run_rm(task::RmOptions {
                id,
                store,
                json,
                quiet,
            }),
            Commands::Events => task::run_events(task::EventsOptions { store, json, quiet }),
            Commands::Theme { mode } => theme::run_theme(theme::ThemeOptions {
                mode,
                store,
                json,
                quiet,
            }),
            Commands::Ui => task::run_ui(task::UiOptions { store }),
        }
    }
}
