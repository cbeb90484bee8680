// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2026 The mailpreset contributors

//! Domain layer: payload and draft types shared between the UI, the stores and dispatch.

pub mod draft;
pub mod entry;
pub mod preset;
