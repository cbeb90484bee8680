// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2026 The mailpreset contributors

//! Business logic: JSON-backed named-entry stores and mail-client dispatch.

pub mod dispatch;
pub mod store;
