// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2026 The mailpreset contributors

//! Named-entry stores persisted as flat JSON objects.
//!
//! Responsibilities:
//! - Map unique display names to payloads (presets, signatures, contacts).
//! - Reload the backing file on every operation; nothing is cached between calls.
//! - Replace the file as a whole on save so readers never see a half-written object.
//!
//! There is no locking. Two processes writing the same file lose updates (last save wins).

use std::collections::BTreeMap;
use std::fs;
use std::io::{self, Write};
use std::marker::PhantomData;
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;

use crate::models::entry::{EntryPayload, StoreKind};
use crate::models::preset::Preset;

/// In-memory view of one store, ordered by name.
pub type Entries<P> = BTreeMap<String, P>;

/// Name of the signature picked by default when present.
pub const DEFAULT_SIGNATURE: &str = "default";

/// Failures surfaced by store operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The backing file exists but does not hold a JSON object of the expected shape.
    #[error("Failed to parse {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("Failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("Failed to save {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("Failed to encode entries for {}: {source}", .path.display())]
    Encode {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

impl StoreError {
    /// True for the "file exists but is unreadable JSON" case.
    pub fn is_parse(&self) -> bool {
        matches!(self, StoreError::Parse { .. })
    }
}

/// A mapping from unique names to payloads of type `P`, backed by one JSON file.
#[derive(Clone, Debug)]
pub struct NamedEntryStore<P> {
    path: PathBuf,
    _payload: PhantomData<fn() -> P>,
}

impl<P> NamedEntryStore<P>
where
    P: Serialize + DeserializeOwned,
{
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            _payload: PhantomData,
        }
    }

    /// Backing file location.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the backing file, reporting parse and I/O failures to the caller.
    ///
    /// A missing file is an empty store, not an error.
    pub fn try_load(&self) -> Result<Entries<P>, StoreError> {
        let text = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(Entries::new()),
            Err(source) => {
                return Err(StoreError::Read {
                    path: self.path.clone(),
                    source,
                });
            }
        };

        serde_json::from_str(&text).map_err(|source| StoreError::Parse {
            path: self.path.clone(),
            source,
        })
    }

    /// Read the backing file, falling back to an empty store on any failure.
    ///
    /// The failure is logged; the file on disk is left as it is.
    pub fn load(&self) -> Entries<P> {
        self.try_load().unwrap_or_else(|err| {
            if err.is_parse() {
                log::error!("{err}; using an empty store and leaving the file in place");
            } else {
                log::error!("{err}");
            }
            Entries::new()
        })
    }

    /// Replace the backing file with the full mapping.
    ///
    /// Output is UTF-8 with non-ASCII characters kept literally and two-space indentation.
    /// The new content is written to a sibling temp file and moved over the old one.
    pub fn save(&self, entries: &Entries<P>) -> Result<(), StoreError> {
        let json = serde_json::to_string_pretty(entries).map_err(|source| StoreError::Encode {
            path: self.path.clone(),
            source,
        })?;

        self.write_replacing(json.as_bytes())
            .map_err(|source| StoreError::Write {
                path: self.path.clone(),
                source,
            })?;

        log::debug!("Saved {} entries to {}", entries.len(), self.path.display());
        Ok(())
    }

    /// Fresh lookup of a single entry.
    pub fn get(&self, name: &str) -> Result<Option<P>, StoreError> {
        Ok(self.try_load()?.remove(name))
    }

    /// Fresh list of entry names in store order.
    pub fn names(&self) -> Result<Vec<String>, StoreError> {
        Ok(self.try_load()?.into_keys().collect())
    }

    /// Insert or overwrite `name`.
    ///
    /// Starts from the lenient [`Self::load`], so an unparseable file is replaced by a store
    /// holding only this entry.
    pub fn upsert(&self, name: &str, payload: P) -> Result<(), StoreError> {
        let mut entries = self.load();
        entries.insert(name.to_string(), payload);
        self.save(&entries)
    }

    /// Delete `name`. Removing an absent name is a no-op and does not touch the file.
    pub fn remove(&self, name: &str) -> Result<(), StoreError> {
        let mut entries = self.load();
        if entries.remove(name).is_none() {
            return Ok(());
        }
        self.save(&entries)
    }

    /// Store `payload` under `new_name`, dropping `old_name` when the names differ.
    ///
    /// Runs as two independent load/save round trips (remove, then upsert). An existing
    /// entry already named `new_name` is overwritten.
    pub fn rename_and_replace(
        &self,
        old_name: &str,
        new_name: &str,
        payload: P,
    ) -> Result<(), StoreError> {
        if old_name != new_name {
            if self.load().contains_key(new_name) {
                log::warn!(
                    "Renaming {old_name:?} to {new_name:?} replaces the existing entry {new_name:?} in {}",
                    self.path.display()
                );
            }
            self.remove(old_name)?;
        }
        self.upsert(new_name, payload)
    }

    fn write_replacing(&self, bytes: &[u8]) -> io::Result<()> {
        let parent = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        fs::create_dir_all(parent)?;

        let mut tmp = tempfile::NamedTempFile::new_in(parent)?;
        tmp.write_all(bytes)?;
        tmp.as_file().sync_all()?;
        tmp.persist(&self.path).map_err(|err| err.error)?;
        Ok(())
    }
}

/// Pick the signature selected when the form opens.
///
/// `"default"` wins when present; otherwise the first name in store order; no names
/// yields an empty name.
pub fn default_signature<'a, I>(names: I) -> String
where
    I: IntoIterator<Item = &'a String>,
{
    let mut first = None;
    for name in names {
        if name == DEFAULT_SIGNATURE {
            return DEFAULT_SIGNATURE.to_string();
        }
        first.get_or_insert(name);
    }
    first.cloned().unwrap_or_default()
}

pub type PresetStore = NamedEntryStore<Preset>;
pub type SignatureStore = NamedEntryStore<String>;
pub type ContactStore = NamedEntryStore<String>;

/// The three stores rooted in one data directory.
#[derive(Clone, Debug)]
pub struct Stores {
    pub presets: PresetStore,
    pub signatures: SignatureStore,
    pub contacts: ContactStore,
}

impl Stores {
    pub fn open(data_dir: &Path) -> Self {
        Self {
            presets: NamedEntryStore::new(data_dir.join(StoreKind::Presets.file_name())),
            signatures: NamedEntryStore::new(data_dir.join(StoreKind::Signatures.file_name())),
            contacts: NamedEntryStore::new(data_dir.join(StoreKind::Contacts.file_name())),
        }
    }

    /// Fresh list of names in the store of `kind`.
    pub fn names(&self, kind: StoreKind) -> Result<Vec<String>, StoreError> {
        match kind {
            StoreKind::Presets => self.presets.names(),
            StoreKind::Signatures => self.signatures.names(),
            StoreKind::Contacts => self.contacts.names(),
        }
    }

    /// Fresh lookup of one entry, wrapped in its payload variant.
    pub fn fetch(&self, kind: StoreKind, name: &str) -> Result<Option<EntryPayload>, StoreError> {
        Ok(match kind {
            StoreKind::Presets => self.presets.get(name)?.map(EntryPayload::Preset),
            StoreKind::Signatures => self.signatures.get(name)?.map(EntryPayload::Signature),
            StoreKind::Contacts => self.contacts.get(name)?.map(EntryPayload::Contact),
        })
    }

    /// Save an edited entry.
    ///
    /// `original` is the name the editor was opened with; `None` for new entries.
    pub fn save_entry(
        &self,
        original: Option<&str>,
        name: &str,
        payload: EntryPayload,
    ) -> Result<(), StoreError> {
        match (original, payload) {
            (None, EntryPayload::Preset(p)) => self.presets.upsert(name, p),
            (None, EntryPayload::Signature(s)) => self.signatures.upsert(name, s),
            (None, EntryPayload::Contact(c)) => self.contacts.upsert(name, c),
            (Some(old), EntryPayload::Preset(p)) => self.presets.rename_and_replace(old, name, p),
            (Some(old), EntryPayload::Signature(s)) => {
                self.signatures.rename_and_replace(old, name, s)
            }
            (Some(old), EntryPayload::Contact(c)) => self.contacts.rename_and_replace(old, name, c),
        }
    }

    pub fn delete_entry(&self, kind: StoreKind, name: &str) -> Result<(), StoreError> {
        match kind {
            StoreKind::Presets => self.presets.remove(name),
            StoreKind::Signatures => self.signatures.remove(name),
            StoreKind::Contacts => self.contacts.remove(name),
        }
    }
}
