// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2026 The mailpreset contributors

//! File names for rendered drafts.

/// Longest stem kept from a subject line.
const MAX_STEM_LEN: usize = 60;

/// Turn a subject line into an ASCII file stem.
///
/// Transliterates with `deunicode`, keeps alphanumerics plus `-` and `_`, collapses every
/// other run into a single `_`, and falls back to `draft` when nothing is left.
pub fn draft_stem(subject: &str) -> String {
    let ascii = deunicode::deunicode(subject);
    let mut out = String::with_capacity(ascii.len().min(MAX_STEM_LEN));

    for ch in ascii.chars() {
        if out.len() >= MAX_STEM_LEN {
            break;
        }
        if ch.is_ascii_alphanumeric() || ch == '-' {
            out.push(ch);
        } else if !out.is_empty() && !out.ends_with('_') {
            out.push('_');
        }
    }

    let trimmed = out.trim_end_matches('_');
    if trimmed.is_empty() {
        "draft".to_string()
    } else {
        trimmed.to_string()
    }
}
