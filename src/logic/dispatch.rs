// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2026 The mailpreset contributors

//! Mail dispatch: hand an assembled draft to the user's mail client for review.
//!
//! The desktop client is reached through an `.eml` file flagged `X-Unsent: 1`, which
//! Outlook and most other clients open as an editable draft instead of a received
//! message. Nothing is ever sent from here.

use std::fs;
use std::io;
use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::Local;
use mail_builder::MessageBuilder;
use mail_builder::headers::address::{Address, EmailAddress};
use mail_builder::headers::date::Date;
use mail_builder::headers::raw::Raw;
use thiserror::Error;
use uuid::Uuid;

use crate::models::draft::DraftMessage;
use crate::utils::draft_stem;

/// Failures while handing a draft to the mail client.
#[derive(Debug, Error)]
pub enum DispatchError {
    /// The message could not be assembled or written.
    #[error("Failed to prepare the draft: {0}")]
    Build(String),
    /// The draft was written but the mail client could not be started.
    #[error("Failed to open {} in the mail client: {source}", .path.display())]
    Launch {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Boundary to whatever turns a draft into a message the user can review.
pub trait MailClient {
    /// Open `draft` for review. Returns the location of the handed-over draft.
    fn open_draft(&self, draft: &DraftMessage) -> Result<PathBuf, DispatchError>;
}

/// Writes drafts as `.eml` files and opens them with the system handler.
#[derive(Clone, Debug)]
pub struct EmlDraftClient {
    drafts_dir: PathBuf,
}

impl EmlDraftClient {
    pub fn new(drafts_dir: impl Into<PathBuf>) -> Self {
        Self {
            drafts_dir: drafts_dir.into(),
        }
    }

    /// Render `draft` and write it below the drafts directory.
    pub fn write_draft(&self, draft: &DraftMessage) -> Result<PathBuf> {
        fs::create_dir_all(&self.drafts_dir).with_context(|| {
            format!("Failed to create drafts directory {:?}", self.drafts_dir)
        })?;

        let id = Uuid::new_v4();
        let bytes = render_eml(draft, &id)?;
        let short_id = id.simple().to_string();
        let file_name = format!("{}-{}.eml", draft_stem(&draft.subject), &short_id[..8]);
        let path = self.drafts_dir.join(file_name);

        fs::write(&path, bytes).with_context(|| format!("Failed to write draft {:?}", path))?;
        Ok(path)
    }
}

impl MailClient for EmlDraftClient {
    fn open_draft(&self, draft: &DraftMessage) -> Result<PathBuf, DispatchError> {
        let path = self
            .write_draft(draft)
            .map_err(|err| DispatchError::Build(format!("{err:#}")))?;

        open::that(&path).map_err(|source| DispatchError::Launch {
            path: path.clone(),
            source,
        })?;

        log::info!("Opened draft {}", path.display());
        Ok(path)
    }
}

/// Build the RFC 5322 / MIME bytes for `draft`.
///
/// Attachments that no longer exist are skipped; attachments that exist but cannot be read
/// fail the whole draft.
pub fn render_eml(draft: &DraftMessage, id: &Uuid) -> Result<Vec<u8>> {
    let mut message = MessageBuilder::new()
        .subject(single_line(&draft.subject))
        .date(Date::new(Local::now().timestamp()))
        .message_id(format!("{}@mailpreset.local", id.simple()))
        .header("X-Unsent", Raw::new("1"))
        .text_body(draft.full_body());

    if let Some(to) = address_list(&draft.to) {
        message = message.to(to);
    }
    if let Some(cc) = address_list(&draft.cc) {
        message = message.cc(cc);
    }
    if let Some(bcc) = address_list(&draft.bcc) {
        message = message.bcc(bcc);
    }

    for skipped in draft.attachments.iter().filter(|p| !p.exists()) {
        log::warn!("Skipping missing attachment {}", skipped.display());
    }
    for path in draft.existing_attachments() {
        let content =
            fs::read(path).with_context(|| format!("Failed to read attachment {:?}", path))?;
        let file_name = path
            .file_name()
            .map(|n| single_line(&n.to_string_lossy()))
            .unwrap_or_else(|| "attachment".to_string());
        let mime = mime_guess::from_path(path).first_or_octet_stream();
        message = message.attachment(mime.essence_str().to_string(), file_name, content);
    }

    message
        .write_to_vec()
        .context("Failed to encode the draft message")
}

/// Split a typed recipient list (`;` or `,` separated) into addresses.
fn split_addresses(raw: &str) -> Vec<String> {
    raw.split([';', ','])
        .map(|addr| single_line(addr).trim().to_string())
        .filter(|addr| !addr.is_empty())
        .collect()
}

fn address_list(raw: &str) -> Option<Address<'static>> {
    let addresses = split_addresses(raw);
    if addresses.is_empty() {
        return None;
    }
    Some(Address::List(
        addresses
            .into_iter()
            .map(|email| {
                Address::Address(EmailAddress {
                    name: None,
                    email: email.into(),
                })
            })
            .collect(),
    ))
}

/// Header text never spans lines; line breaks become spaces.
fn single_line(value: &str) -> String {
    value.replace(['\r', '\n'], " ")
}
