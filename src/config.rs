// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2026 The mailpreset contributors

//! Start-up configuration: where the JSON stores and rendered drafts live.

use std::path::PathBuf;

use directories::ProjectDirs;

/// Environment variable overriding the data directory.
pub const DATA_DIR_ENV: &str = "MAILPRESET_DATA_DIR";

const APP_NAME: &str = "mailpreset";

/// Resolved filesystem locations.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AppConfig {
    /// Directory holding `presets.json`, `signatures.json` and `contacts.json`.
    pub data_dir: PathBuf,
    /// Directory receiving `.eml` drafts handed to the mail client.
    pub drafts_dir: PathBuf,
}

impl AppConfig {
    /// Build a config rooted at `data_dir`.
    pub fn with_data_dir(data_dir: PathBuf) -> Self {
        let drafts_dir = data_dir.join("drafts");
        Self {
            data_dir,
            drafts_dir,
        }
    }

    /// Resolve from the environment: explicit override, then the per-user data
    /// directory, then the current directory.
    pub fn from_env() -> Self {
        let override_dir = std::env::var_os(DATA_DIR_ENV)
            .map(PathBuf::from)
            .filter(|p| !p.as_os_str().is_empty());
        Self::resolve(override_dir, project_data_dir())
    }

    fn resolve(override_dir: Option<PathBuf>, project_dir: Option<PathBuf>) -> Self {
        let data_dir = override_dir
            .or(project_dir)
            .unwrap_or_else(|| PathBuf::from("."));
        Self::with_data_dir(data_dir)
    }
}

fn project_data_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", APP_NAME).map(|dirs| dirs.data_dir().to_path_buf())
}
