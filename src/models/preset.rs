// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2026 The mailpreset contributors

//! Preset payload: the reusable set of compose fields stored under a preset name.

use serde::{Deserialize, Serialize};

/// Compose fields saved as a preset. Fields missing on disk read as empty strings.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Preset {
    pub to: String,
    pub cc: String,
    pub bcc: String,
    pub subject: String,
    pub body: String,
}
