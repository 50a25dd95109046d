// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright (c) 2025 Misti contributors

//! Configuration for the misti front end.
//!
//! Read from `<config_dir>/misti/config.toml` when present, or from the file
//! given with `--config`. Every field is optional.
//!
//! ```toml
//! history_file = "/tmp/misti_history"
//! max_history_size = 500
//! show_positions = true
//! mode = "expr"
//! color = false
//! ```

use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

const CONFIG_FILE: &str = "config.toml";
const HISTORY_FILE: &str = ".misti_history";

/// What the REPL does with each entry.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// Print every token
    #[default]
    Tokens,
    /// Parse one primary expression
    Expr,
}

impl Mode {
    /// Parses a mode name as typed in the REPL.
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_lowercase().as_str() {
            "tokens" | "t" => Some(Mode::Tokens),
            "expr" | "e" => Some(Mode::Expr),
            _ => None,
        }
    }

    /// The name used in config files and the REPL.
    pub fn name(&self) -> &'static str {
        match self {
            Mode::Tokens => "tokens",
            Mode::Expr => "expr",
        }
    }
}

/// Configuration for misti.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// REPL history file; defaults under the local data directory
    pub history_file: Option<PathBuf>,

    /// Maximum number of history entries kept
    pub max_history_size: usize,

    /// Print `line:offset` next to every token
    pub show_positions: bool,

    /// Initial REPL mode
    pub mode: Mode,

    /// Colored terminal output
    pub color: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            history_file: None,
            max_history_size: 1000,
            show_positions: false,
            mode: Mode::Tokens,
            color: true,
        }
    }
}

impl Config {
    /// Load configuration from `path`, or from the default location.
    ///
    /// An explicit path must exist; a missing default file means defaults.
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        let mut config = Config::default();

        match path {
            Some(path) => config.merge_from_file(path)?,
            None => {
                if let Some(default_path) = default_config_path() {
                    if default_path.exists() {
                        config.merge_from_file(&default_path)?;
                    }
                }
            }
        }

        Ok(config)
    }

    /// Parse configuration from TOML text.
    pub fn from_toml(content: &str) -> anyhow::Result<Self> {
        toml::from_str(content).context("invalid configuration")
    }

    fn merge_from_file(&mut self, path: &Path) -> anyhow::Result<()> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        *self = Self::from_toml(&content)
            .with_context(|| format!("in config file {}", path.display()))?;
        tracing::debug!(path = %path.display(), "loaded configuration");
        Ok(())
    }

    /// Where REPL history is stored.
    pub fn history_path(&self) -> PathBuf {
        self.history_file.clone().unwrap_or_else(|| {
            dirs::data_local_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join("misti")
                .join(HISTORY_FILE)
        })
    }
}

/// Default config file location.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("misti").join(CONFIG_FILE))
}
