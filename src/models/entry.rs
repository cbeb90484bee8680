// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2026 The mailpreset contributors

//! Store kinds and the payload variants they hold.

use crate::models::preset::Preset;

/// The three named-entry collections managed by the app.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum StoreKind {
    Presets,
    Signatures,
    Contacts,
}

impl StoreKind {
    /// Backing file name inside the data directory.
    pub fn file_name(self) -> &'static str {
        match self {
            StoreKind::Presets => "presets.json",
            StoreKind::Signatures => "signatures.json",
            StoreKind::Contacts => "contacts.json",
        }
    }

    /// Dialog title for the management window.
    pub fn title(self) -> &'static str {
        match self {
            StoreKind::Presets => "Manage presets",
            StoreKind::Signatures => "Manage signatures",
            StoreKind::Contacts => "Manage contacts",
        }
    }

    /// Lowercase singular noun used in status and confirmation messages.
    pub fn noun(self) -> &'static str {
        match self {
            StoreKind::Presets => "preset",
            StoreKind::Signatures => "signature",
            StoreKind::Contacts => "contact",
        }
    }

    /// Name prefilled in the editor for a new entry.
    pub fn placeholder_name(self) -> &'static str {
        match self {
            StoreKind::Presets => "New preset",
            StoreKind::Signatures => "New signature",
            StoreKind::Contacts => "New contact",
        }
    }
}

/// Payload of a single entry, tagged by the store it belongs to.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EntryPayload {
    Preset(Preset),
    /// Signature text appended below the body.
    Signature(String),
    /// Contact email address.
    Contact(String),
}

impl EntryPayload {
    /// Empty payload for a new entry of `kind`.
    pub fn empty(kind: StoreKind) -> Self {
        match kind {
            StoreKind::Presets => EntryPayload::Preset(Preset::default()),
            StoreKind::Signatures => EntryPayload::Signature(String::new()),
            StoreKind::Contacts => EntryPayload::Contact(String::new()),
        }
    }

    pub fn kind(&self) -> StoreKind {
        match self {
            EntryPayload::Preset(_) => StoreKind::Presets,
            EntryPayload::Signature(_) => StoreKind::Signatures,
            EntryPayload::Contact(_) => StoreKind::Contacts,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_payload_matches_kind() {
        for kind in [StoreKind::Presets, StoreKind::Signatures, StoreKind::Contacts] {
            assert_eq!(EntryPayload::empty(kind).kind(), kind);
        }
    }

    #[test]
    fn file_names_are_distinct() {
        assert_ne!(
            StoreKind::Presets.file_name(),
            StoreKind::Signatures.file_name()
        );
        assert_ne!(
            StoreKind::Signatures.file_name(),
            StoreKind::Contacts.file_name()
        );
    }
}
