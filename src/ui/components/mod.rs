// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2026 The mailpreset contributors

//! Reusable egui components structured for MVU-style updates.

pub mod attachments;
pub mod compose;
pub mod entry_manager;
