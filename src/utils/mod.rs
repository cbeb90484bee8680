// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2026 The mailpreset contributors

//! Shared helper utilities reused by UI and business logic.

pub mod file_name;

/// Derive an ASCII file stem from a subject line.
pub use file_name::draft_stem;
