//! tm theme command.

use std::path::PathBuf;

use serde::Serialize;

use crate::config::Config;
use crate::error::{Error, Result};
use crate::kv::KvStore;
use crate::output::{emit_success, HumanOutput, OutputOptions};
use crate::store::TaskStore;

pub struct ThemeOptions {
    pub mode: Option<String>,
    pub store: Option<PathBuf>,
    pub json: bool,
    pub quiet: bool,
}

#[derive(Serialize)]
struct ThemeOutput {
    dark: bool,
}

pub fn run_theme(options: ThemeOptions) -> Result<()> {
    let config = Config::load();
    let dir = config.resolve_store_dir(options.store.as_deref());
    let mut store = TaskStore::open(KvStore::new(dir));

    if let Some(mode) = options.mode.as_deref() {
        let dark = match mode.trim().to_ascii_lowercase().as_str() {
            "dark" => true,
            "light" => false,
            other => {
                return Err(Error::InvalidArgument(format!(
                    "unknown theme '{other}' (expected dark or light)"
                )))
            }
        };
        store.set_dark_mode(dark);
    }

    let dark = store.dark_mode();
    let mut human = HumanOutput::new("Theme");
    human.push_summary("Mode", if dark { "dark" } else { "light" });

    emit_success(
        OutputOptions {
            json: options.json,
            quiet: options.quiet,
        },
        "theme",
        &ThemeOutput { dark },
        Some(&human),
    )
}
