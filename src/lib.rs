//! tm - TaskMaster Library
//!
//! Core functionality for the tm CLI: a personal task tracker persisted in
//! a local JSON key-value store.
//!
//! # Core Concepts
//!
//! - **Tasks**: title, completion flag, priority, optional due date
//! - **Write-through persistence**: every mutation lands on disk before the
//!   operation reports back
//! - **Derived views**: filtering, counts, due/overdue badges, and the
//!   calendar feed are pure functions over the collection
//!
//! # Module Organization
//!
//! - `cli`: command-line interface using clap
//! - `config`: configuration loading from `config.toml`
//! - `error`: error types and result aliases
//! - `kv`: JSON-file key-value store with atomic writes
//! - `output`: human/JSON output envelopes
//! - `store`: the task collection and its mutations
//! - `task`: the task domain model
//! - `ui`: interactive ratatui viewer
//! - `view`: derived views (filters, counts, calendar events)

pub mod cli;
pub mod config;
pub mod error;
pub mod kv;
pub mod output;
pub mod store;
pub mod task;
pub mod ui;
pub mod view;

pub use error::{Error, Result};
