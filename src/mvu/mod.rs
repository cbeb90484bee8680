// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2026 The mailpreset contributors

//! Root Model-View-Update kernel wiring component state, messages, and commands.

use std::path::PathBuf;

use crate::logic::dispatch::MailClient;
use crate::logic::store::{Stores, default_signature};
use crate::models::draft::ComposeSession;
use crate::models::entry::StoreKind;
use crate::ui::components::attachments::AttachmentsMsg;
use crate::ui::components::compose::{
    self, ComposeCommand, ComposeModel, ComposeMsg, RecipientField,
};
use crate::ui::components::entry_manager::{
    self, EntryManagerCommand, EntryManagerModel, EntryManagerMsg,
};

/// Top-level application state.
#[derive(Default)]
pub struct AppModel {
    /// Compose form state.
    pub compose: ComposeModel,
    /// Management dialog currently open, if any.
    pub manager: Option<EntryManagerModel>,
    /// Latest status message to display.
    pub status: Option<String>,
    /// Latest error message to display in modal.
    pub error: Option<String>,
}

/// Application messages routed through the update function.
#[derive(Debug)]
pub enum Msg {
    Startup,
    Compose(ComposeMsg),
    OpenManager(StoreKind),
    Manager(EntryManagerMsg),
    ChoicesLoaded {
        kind: StoreKind,
        result: Result<Vec<String>, String>,
    },
    DraftCompleted(Result<PathBuf, String>),
    OperationFailed(String),
    DismissError,
}

/// Commands represent side-effects executed between frames.
#[derive(Debug, PartialEq, Eq)]
pub enum Command {
    PickFiles,
    LoadPreset(String),
    ResolveContact { field: RecipientField, name: String },
    CreateDraft(ComposeSession),
    RefreshChoices(StoreKind),
    Manager(EntryManagerCommand),
}

/// Collaborators available while executing commands.
pub struct CommandContext<'a> {
    pub stores: &'a Stores,
    pub mail: &'a dyn MailClient,
}

/// Update the application model and enqueue commands.
pub fn update(model: &mut AppModel, msg: Msg, cmds: &mut Vec<Command>) {
    match msg {
        Msg::Startup => {
            for kind in [StoreKind::Presets, StoreKind::Signatures, StoreKind::Contacts] {
                cmds.push(Command::RefreshChoices(kind));
            }
        }
        Msg::DismissError => model.error = None,
        Msg::Compose(m) => {
            let mut compose_cmds = Vec::new();
            if let Some(event) = compose::update(&mut model.compose, m, &mut compose_cmds) {
                surface_event(model, event.message, event.is_error);
            }
            for c in compose_cmds {
                match c {
                    ComposeCommand::PickFiles => cmds.push(Command::PickFiles),
                    ComposeCommand::LoadPreset(name) => cmds.push(Command::LoadPreset(name)),
                    ComposeCommand::ResolveContact { field, name } => {
                        cmds.push(Command::ResolveContact { field, name })
                    }
                    ComposeCommand::CreateDraft(session) => {
                        cmds.push(Command::CreateDraft(session))
                    }
                }
            }
        }
        Msg::OpenManager(kind) => {
            model.manager = Some(EntryManagerModel::new(kind));
            cmds.push(Command::Manager(EntryManagerCommand::LoadNames(kind)));
        }
        Msg::Manager(EntryManagerMsg::CloseRequested) => {
            // Refreshing signatures also resets the selection to the default.
            if let Some(manager) = model.manager.take() {
                cmds.push(Command::RefreshChoices(manager.kind()));
            }
        }
        Msg::Manager(m) => {
            // Results can arrive after the dialog closed; they are dropped.
            let Some(manager) = model.manager.as_mut() else {
                return;
            };
            let mut manager_cmds = Vec::new();
            let event = entry_manager::update(manager, m, &mut manager_cmds);
            cmds.extend(manager_cmds.into_iter().map(Command::Manager));
            if let Some(event) = event {
                surface_event(model, event.message, event.is_error);
            }
        }
        Msg::ChoicesLoaded { kind, result } => {
            let names = match result {
                Ok(names) => names,
                Err(err) => {
                    surface_event(model, err, true);
                    Vec::new()
                }
            };
            apply_choices(&mut model.compose, kind, names);
        }
        Msg::DraftCompleted(result) => match result {
            Ok(path) => surface_event(model, format!("Draft opened: {}", path.display()), false),
            Err(err) => surface_event(model, format!("Failed to create draft:\n\n{err}"), true),
        },
        Msg::OperationFailed(err) => surface_event(model, err, true),
    }
}

/// Execute a command synchronously and return the resulting message.
pub fn run_command(cmd: Command, ctx: &CommandContext<'_>) -> Msg {
    match cmd {
        Command::PickFiles => {
            let files = rfd::FileDialog::new()
                .set_title("Select attachments")
                .pick_files()
                .unwrap_or_default();
            Msg::Compose(ComposeMsg::Attachments(AttachmentsMsg::FilesPicked(files)))
        }
        Command::LoadPreset(name) => match ctx.stores.presets.get(&name) {
            Ok(preset) => Msg::Compose(ComposeMsg::PresetLoaded { name, preset }),
            Err(err) => Msg::OperationFailed(err.to_string()),
        },
        Command::ResolveContact { field, name } => match ctx.stores.contacts.get(&name) {
            Ok(email) => Msg::Compose(ComposeMsg::ContactResolved { field, email }),
            Err(err) => Msg::OperationFailed(err.to_string()),
        },
        Command::CreateDraft(session) => {
            let signatures = ctx.stores.signatures.load();
            let signature = signatures
                .get(&session.signature_name)
                .cloned()
                .unwrap_or_default();
            let draft = session.into_draft(signature);
            Msg::DraftCompleted(ctx.mail.open_draft(&draft).map_err(|e| e.to_string()))
        }
        Command::RefreshChoices(kind) => Msg::ChoicesLoaded {
            kind,
            result: ctx.stores.names(kind).map_err(|e| e.to_string()),
        },
        Command::Manager(cmd) => Msg::Manager(run_manager_command(cmd, ctx.stores)),
    }
}

fn run_manager_command(cmd: EntryManagerCommand, stores: &Stores) -> EntryManagerMsg {
    match cmd {
        EntryManagerCommand::LoadNames(kind) => {
            EntryManagerMsg::NamesLoaded(stores.names(kind).map_err(|e| e.to_string()))
        }
        EntryManagerCommand::LoadEntry { kind, name } => {
            let result = stores.fetch(kind, &name).map_err(|e| e.to_string());
            EntryManagerMsg::EntryLoaded { name, result }
        }
        EntryManagerCommand::Save {
            original,
            name,
            payload,
        } => EntryManagerMsg::Saved(
            stores
                .save_entry(original.as_deref(), &name, payload)
                .map(|()| name)
                .map_err(|e| e.to_string()),
        ),
        EntryManagerCommand::Delete { kind, name } => EntryManagerMsg::Deleted(
            stores
                .delete_entry(kind, &name)
                .map(|()| name)
                .map_err(|e| e.to_string()),
        ),
    }
}

/// Refresh one of the compose form's choice lists.
fn apply_choices(compose: &mut ComposeModel, kind: StoreKind, names: Vec<String>) {
    match kind {
        StoreKind::Presets => {
            if !names.contains(&compose.preset_choice) {
                compose.preset_choice.clear();
            }
            compose.preset_names = names;
        }
        StoreKind::Signatures => {
            compose.signature = default_signature(&names);
            compose.signature_names = names;
        }
        StoreKind::Contacts => compose.contact_names = names,
    }
}

/// Update status/error fields consistently for user feedback.
fn surface_event(model: &mut AppModel, message: String, is_error: bool) {
    if is_error {
        log::warn!("{message}");
        model.error = Some(message.clone());
    }
    model.status = Some(message);
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::collections::VecDeque;
    use std::fs;

    use tempfile::TempDir;

    use super::*;
    use crate::logic::dispatch::DispatchError;
    use crate::models::draft::DraftMessage;
    use crate::models::entry::EntryPayload;
    use crate::models::preset::Preset;
    use crate::ui::components::compose::ComposeField;

    /// Records drafts instead of opening them.
    #[derive(Default)]
    struct RecordingClient {
        drafts: RefCell<Vec<DraftMessage>>,
        fail: bool,
    }

    impl MailClient for RecordingClient {
        fn open_draft(&self, draft: &DraftMessage) -> Result<PathBuf, DispatchError> {
            if self.fail {
                return Err(DispatchError::Build("mail client unavailable".into()));
            }
            self.drafts.borrow_mut().push(draft.clone());
            Ok(PathBuf::from("draft.eml"))
        }
    }

    struct Harness {
        _tmp: TempDir,
        stores: Stores,
        mail: RecordingClient,
        model: AppModel,
    }

    impl Harness {
        fn new() -> Self {
            let tmp = TempDir::new().unwrap();
            let stores = Stores::open(tmp.path());
            Self {
                _tmp: tmp,
                stores,
                mail: RecordingClient::default(),
                model: AppModel::default(),
            }
        }

        /// Feed `msg` and every follow-up produced by its commands, as the UI loop does.
        fn send(&mut self, msg: Msg) {
            let ctx = CommandContext {
                stores: &self.stores,
                mail: &self.mail,
            };
            let mut queue = VecDeque::from([msg]);
            while let Some(msg) = queue.pop_front() {
                let mut cmds = Vec::new();
                update(&mut self.model, msg, &mut cmds);
                for cmd in cmds {
                    queue.push_back(run_command(cmd, &ctx));
                }
            }
        }

        fn manager(&mut self, msg: EntryManagerMsg) {
            self.send(Msg::Manager(msg));
        }
    }

    #[test]
    fn startup_refreshes_all_choice_lists() {
        let mut model = AppModel::default();
        let mut cmds = Vec::new();

        update(&mut model, Msg::Startup, &mut cmds);

        assert_eq!(
            cmds,
            vec![
                Command::RefreshChoices(StoreKind::Presets),
                Command::RefreshChoices(StoreKind::Signatures),
                Command::RefreshChoices(StoreKind::Contacts),
            ]
        );
    }

    #[test]
    fn startup_selects_default_signature() {
        let mut h = Harness::new();
        h.stores.signatures.upsert("work", "W".into()).unwrap();
        h.stores.signatures.upsert("default", "D".into()).unwrap();

        h.send(Msg::Startup);

        assert_eq!(h.model.compose.signature, "default");
        assert_eq!(h.model.compose.signature_names, vec!["default", "work"]);
    }

    #[test]
    fn without_default_signature_the_first_name_is_selected() {
        let mut h = Harness::new();
        h.stores.signatures.upsert("zeta", "Z".into()).unwrap();
        h.stores.signatures.upsert("alpha", "A".into()).unwrap();

        h.send(Msg::Startup);

        assert_eq!(h.model.compose.signature, "alpha");
    }

    #[test]
    fn corrupt_store_surfaces_error_and_leaves_list_empty() {
        let mut h = Harness::new();
        fs::write(h.stores.presets.path(), "{ not json").unwrap();

        h.send(Msg::Startup);

        assert!(h.model.compose.preset_names.is_empty());
        assert!(
            h.model
                .error
                .as_deref()
                .is_some_and(|e| e.contains("Failed to parse"))
        );

        let mut cmds = Vec::new();
        update(&mut h.model, Msg::DismissError, &mut cmds);
        assert!(h.model.error.is_none());
    }

    #[test]
    fn apply_preset_fills_form_from_fresh_load() {
        let mut h = Harness::new();
        h.stores
            .presets
            .upsert(
                "weekly",
                Preset {
                    to: "team@x.com".into(),
                    subject: "Weekly".into(),
                    body: "Hi all".into(),
                    ..Default::default()
                },
            )
            .unwrap();
        h.send(Msg::Startup);

        h.send(Msg::Compose(ComposeMsg::PresetChosen("weekly".into())));
        h.send(Msg::Compose(ComposeMsg::ApplyPresetRequested));

        assert_eq!(h.model.compose.to, "team@x.com");
        assert_eq!(h.model.compose.subject, "Weekly");
        assert_eq!(h.model.compose.body, "Hi all");
    }

    #[test]
    fn contact_is_appended_with_separator() {
        let mut h = Harness::new();
        h.stores.contacts.upsert("Bob", "bob@x.com".into()).unwrap();
        h.send(Msg::Compose(ComposeMsg::FieldChanged(
            ComposeField::Recipient(RecipientField::Cc),
            "alice@x.com".into(),
        )));

        h.send(Msg::Compose(ComposeMsg::ContactChosen {
            field: RecipientField::Cc,
            name: "Bob".into(),
        }));

        assert_eq!(h.model.compose.cc, "alice@x.com; bob@x.com");
    }

    #[test]
    fn create_draft_resolves_signature_content() {
        let mut h = Harness::new();
        h.stores.signatures.upsert("default", "Regards".into()).unwrap();
        h.send(Msg::Startup);
        h.send(Msg::Compose(ComposeMsg::FieldChanged(ComposeField::Body, "Hello".into())));

        h.send(Msg::Compose(ComposeMsg::CreateDraftRequested));

        let drafts = h.mail.drafts.borrow();
        assert_eq!(drafts.len(), 1);
        assert_eq!(drafts[0].signature, "Regards");
        assert_eq!(drafts[0].full_body(), "Hello\n\nRegards");
        assert!(h.model.error.is_none());
        assert!(
            h.model
                .status
                .as_deref()
                .is_some_and(|s| s.starts_with("Draft opened"))
        );
    }

    #[test]
    fn create_draft_with_unknown_signature_uses_empty_text() {
        let mut h = Harness::new();
        h.send(Msg::Compose(ComposeMsg::SignatureChosen("gone".into())));

        h.send(Msg::Compose(ComposeMsg::CreateDraftRequested));

        assert_eq!(h.mail.drafts.borrow()[0].signature, "");
    }

    #[test]
    fn failed_dispatch_surfaces_error() {
        let mut h = Harness::new();
        h.mail.fail = true;

        h.send(Msg::Compose(ComposeMsg::CreateDraftRequested));

        assert!(
            h.model
                .error
                .as_deref()
                .is_some_and(|e| e.contains("mail client unavailable"))
        );
    }

    #[test]
    fn manager_creates_entry_and_close_refreshes_form() {
        let mut h = Harness::new();
        h.send(Msg::OpenManager(StoreKind::Contacts));
        h.manager(EntryManagerMsg::NewRequested);
        h.manager(EntryManagerMsg::EditorNameChanged("Carol".into()));
        h.manager(EntryManagerMsg::EditorPayloadChanged(EntryPayload::Contact(
            "carol@x.com".into(),
        )));

        h.manager(EntryManagerMsg::SaveRequested);

        assert_eq!(h.stores.contacts.get("Carol").unwrap().as_deref(), Some("carol@x.com"));
        let manager = h.model.manager.as_ref().expect("dialog stays open");
        assert_eq!(manager.names(), &["Carol".to_string()]);
        assert!(h.model.compose.contact_names.is_empty());

        h.manager(EntryManagerMsg::CloseRequested);

        assert!(h.model.manager.is_none());
        assert_eq!(h.model.compose.contact_names, vec!["Carol"]);
    }

    #[test]
    fn manager_edit_renames_entry() {
        let mut h = Harness::new();
        h.stores.presets.upsert("A", Preset::default()).unwrap();
        h.send(Msg::OpenManager(StoreKind::Presets));
        h.manager(EntryManagerMsg::Select("A".into()));
        h.manager(EntryManagerMsg::EditRequested);
        h.manager(EntryManagerMsg::EditorNameChanged("B".into()));

        h.manager(EntryManagerMsg::SaveRequested);

        assert_eq!(h.stores.presets.names().unwrap(), vec!["B"]);
        assert!(h.model.manager.as_ref().is_some_and(|m| m.editor().is_none()));
    }

    #[test]
    fn failed_save_keeps_editor_open_and_shows_error() {
        let mut h = Harness::new();
        fs::create_dir(h.stores.contacts.path()).unwrap();
        h.send(Msg::OpenManager(StoreKind::Contacts));
        h.send(Msg::DismissError);
        h.manager(EntryManagerMsg::NewRequested);
        h.manager(EntryManagerMsg::EditorNameChanged("Carol".into()));

        h.manager(EntryManagerMsg::SaveRequested);

        assert!(
            h.model
                .error
                .as_deref()
                .is_some_and(|e| e.contains("Failed to save"))
        );
        let editor = h
            .model
            .manager
            .as_ref()
            .and_then(|m| m.editor())
            .expect("editor stays open");
        assert_eq!(editor.name(), "Carol");
    }

    #[test]
    fn untouched_edit_does_not_rename_entry() {
        let mut h = Harness::new();
        h.stores.signatures.upsert(" A", "spaced".into()).unwrap();
        h.stores.signatures.upsert("A", "plain".into()).unwrap();
        h.send(Msg::OpenManager(StoreKind::Signatures));
        h.manager(EntryManagerMsg::Select(" A".into()));
        h.manager(EntryManagerMsg::EditRequested);

        h.manager(EntryManagerMsg::SaveRequested);

        assert_eq!(h.stores.signatures.get(" A").unwrap().as_deref(), Some("spaced"));
        assert_eq!(h.stores.signatures.get("A").unwrap().as_deref(), Some("plain"));
    }

    #[test]
    fn manager_delete_after_confirmation() {
        let mut h = Harness::new();
        h.stores.contacts.upsert("Bob", "bob@x.com".into()).unwrap();
        h.send(Msg::OpenManager(StoreKind::Contacts));
        h.manager(EntryManagerMsg::Select("Bob".into()));
        h.manager(EntryManagerMsg::DeleteRequested);
        assert!(h.stores.contacts.get("Bob").unwrap().is_some());

        h.manager(EntryManagerMsg::DeleteConfirmed);

        assert!(h.stores.contacts.get("Bob").unwrap().is_none());
        assert!(h.model.manager.as_ref().is_some_and(|m| m.names().is_empty()));
    }

    #[test]
    fn closing_signature_dialog_resets_selection_to_default() {
        let mut h = Harness::new();
        h.stores.signatures.upsert("default", "D".into()).unwrap();
        h.stores.signatures.upsert("work", "W".into()).unwrap();
        h.send(Msg::Startup);
        h.send(Msg::Compose(ComposeMsg::SignatureChosen("work".into())));

        h.send(Msg::OpenManager(StoreKind::Signatures));
        h.manager(EntryManagerMsg::CloseRequested);

        assert_eq!(h.model.compose.signature, "default");
    }

    #[test]
    fn closing_other_dialogs_keeps_signature_choice() {
        let mut h = Harness::new();
        h.stores.signatures.upsert("default", "D".into()).unwrap();
        h.stores.signatures.upsert("work", "W".into()).unwrap();
        h.send(Msg::Startup);
        h.send(Msg::Compose(ComposeMsg::SignatureChosen("work".into())));

        h.send(Msg::OpenManager(StoreKind::Presets));
        h.manager(EntryManagerMsg::CloseRequested);

        assert_eq!(h.model.compose.signature, "work");
    }

    #[test]
    fn closing_dialog_refreshes_only_its_own_list() {
        let mut model = AppModel::default();
        let mut cmds = Vec::new();
        update(&mut model, Msg::OpenManager(StoreKind::Presets), &mut cmds);
        cmds.clear();

        update(&mut model, Msg::Manager(EntryManagerMsg::CloseRequested), &mut cmds);

        assert_eq!(cmds, vec![Command::RefreshChoices(StoreKind::Presets)]);
        assert!(model.manager.is_none());
    }

    #[test]
    fn manager_results_after_close_are_ignored() {
        let mut model = AppModel::default();
        let mut cmds = Vec::new();

        update(
            &mut model,
            Msg::Manager(EntryManagerMsg::Saved(Ok("late".into()))),
            &mut cmds,
        );

        assert!(cmds.is_empty());
        assert!(model.status.is_none());
    }
}
