// Copyright (C) 2026  Caprica Software Limited
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.

//! Application configuration.
//!
//! This module manages the application configuration file: the default shell
//! settings a new session starts with and an optional override for where the
//! match history document is kept.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::model::Settings;

const CONFIG_NAME: &str = "tavla";

const HISTORY_FILE: &str = "match_history.json";

const LOG_FILE: &str = "tavla.log";

#[derive(Serialize, Deserialize, Debug, Clone)]
pub(crate) struct AppConfig {
    pub(crate) version: u32,
    /// Override for the match history file location.
    pub(crate) history_file: Option<String>,
    pub(crate) settings: Settings,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            version: 1,
            history_file: None,
            settings: Settings::default(),
        }
    }
}

pub(crate) fn load_config() -> AppConfig {
    confy::load(CONFIG_NAME, None).unwrap_or_default()
}

/// Resolves the match history file location: the configured override, or a
/// file next to the configuration file.
pub(crate) fn history_path(config: &AppConfig) -> PathBuf {
    if let Some(path) = &config.history_file {
        return PathBuf::from(path);
    }
    confy::get_configuration_file_path(CONFIG_NAME, None)
        .map(|path| path.with_file_name(HISTORY_FILE))
        .unwrap_or_else(|_| PathBuf::from(HISTORY_FILE))
}

/// Resolves the log file location, next to the configuration file.
pub(crate) fn log_path() -> PathBuf {
    confy::get_configuration_file_path(CONFIG_NAME, None)
        .map(|path| path.with_file_name(LOG_FILE))
        .unwrap_or_else(|_| PathBuf::from(LOG_FILE))
}
