// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2026 The mailpreset contributors

//! Compose session state and the assembled draft handed to mail dispatch (UI-agnostic).

use std::path::PathBuf;

/// Snapshot of the compose form, owned by whoever dispatches it.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ComposeSession {
    pub to: String,
    pub cc: String,
    pub bcc: String,
    pub subject: String,
    pub body: String,
    /// Name of the selected signature; resolved to its content at dispatch time.
    pub signature_name: String,
    pub attachments: Vec<PathBuf>,
}

impl ComposeSession {
    /// Combine the session with the resolved signature content.
    pub fn into_draft(self, signature: String) -> DraftMessage {
        DraftMessage {
            to: self.to,
            cc: self.cc,
            bcc: self.bcc,
            subject: self.subject,
            body: self.body,
            signature,
            attachments: self.attachments,
        }
    }
}

/// Everything the mail client needs to open a reviewable message.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DraftMessage {
    pub to: String,
    pub cc: String,
    pub bcc: String,
    pub subject: String,
    pub body: String,
    /// Resolved signature content (not the signature name).
    pub signature: String,
    pub attachments: Vec<PathBuf>,
}

impl DraftMessage {
    /// Body followed by a blank line and the signature.
    ///
    /// The separator is always inserted, even when the signature is empty.
    pub fn full_body(&self) -> String {
        format!("{}\n\n{}", self.body, self.signature)
    }

    /// Attachment paths that currently exist on disk, in selection order.
    pub fn existing_attachments(&self) -> Vec<&PathBuf> {
        self.attachments.iter().filter(|p| p.exists()).collect()
    }
}
