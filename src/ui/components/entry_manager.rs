// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2026 The mailpreset contributors

//! Management dialog shared by presets, signatures and contacts.
//!
//! The dialog lists names from a fresh store load, opens an editor for new or existing
//! entries, and asks for confirmation before deleting. Store access happens through
//! commands so the update function stays pure.

use eframe::egui;
use email_address::EmailAddress;

use crate::models::entry::{EntryPayload, StoreKind};

/// Entry being edited. `original` is `None` for a new entry.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EntryEditor {
    original: Option<String>,
    name: String,
    payload: EntryPayload,
}

impl EntryEditor {
    pub fn original(&self) -> Option<&str> {
        self.original.as_deref()
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn payload(&self) -> &EntryPayload {
        &self.payload
    }

    /// Existing entry that saving under the edited name would replace.
    pub fn collision<'a>(&self, names: &'a [String]) -> Option<&'a str> {
        if self.original.as_deref() == Some(self.name.as_str()) {
            return None;
        }
        names
            .iter()
            .find(|n| **n == self.name)
            .map(String::as_str)
    }

    /// Hint shown when a contact address does not parse as an email.
    pub fn email_warning(&self) -> Option<String> {
        match &self.payload {
            EntryPayload::Contact(email)
                if !email.trim().is_empty() && !EmailAddress::is_valid(email.trim()) =>
            {
                Some(format!("\"{}\" does not look like an email address.", email.trim()))
            }
            _ => None,
        }
    }
}

/// State of one open management dialog.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EntryManagerModel {
    kind: StoreKind,
    names: Vec<String>,
    selected: Option<String>,
    editor: Option<EntryEditor>,
    confirm_delete: Option<String>,
}

/// Messages emitted by the dialog view or produced by command results.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EntryManagerMsg {
    NamesLoaded(Result<Vec<String>, String>),
    Select(String),
    NewRequested,
    EditRequested,
    EntryLoaded {
        name: String,
        result: Result<Option<EntryPayload>, String>,
    },
    EditorNameChanged(String),
    EditorPayloadChanged(EntryPayload),
    SaveRequested,
    CancelEdit,
    Saved(Result<String, String>),
    DeleteRequested,
    DeleteConfirmed,
    DeleteCancelled,
    Deleted(Result<String, String>),
    /// Handled by the owner of the dialog.
    CloseRequested,
}

/// Store operations requested by the dialog.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EntryManagerCommand {
    LoadNames(StoreKind),
    LoadEntry {
        kind: StoreKind,
        name: String,
    },
    Save {
        original: Option<String>,
        name: String,
        payload: EntryPayload,
    },
    Delete {
        kind: StoreKind,
        name: String,
    },
}

/// Feedback surfaced to the status bar/modal.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EntryManagerEvent {
    pub message: String,
    pub is_error: bool,
}

impl EntryManagerModel {
    pub fn new(kind: StoreKind) -> Self {
        Self {
            kind,
            names: Vec::new(),
            selected: None,
            editor: None,
            confirm_delete: None,
        }
    }

    pub fn kind(&self) -> StoreKind {
        self.kind
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn selected(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    pub fn editor(&self) -> Option<&EntryEditor> {
        self.editor.as_ref()
    }

    pub fn pending_delete(&self) -> Option<&str> {
        self.confirm_delete.as_deref()
    }
}

fn error(message: String) -> Option<EntryManagerEvent> {
    Some(EntryManagerEvent {
        message,
        is_error: true,
    })
}

fn info(message: String) -> Option<EntryManagerEvent> {
    Some(EntryManagerEvent {
        message,
        is_error: false,
    })
}

/// Apply a message to the dialog model. Returns a user-facing event when relevant.
pub fn update(
    model: &mut EntryManagerModel,
    msg: EntryManagerMsg,
    cmds: &mut Vec<EntryManagerCommand>,
) -> Option<EntryManagerEvent> {
    let noun = model.kind.noun();
    match msg {
        EntryManagerMsg::NamesLoaded(Ok(names)) => {
            if let Some(selected) = &model.selected
                && !names.contains(selected)
            {
                model.selected = None;
            }
            model.names = names;
            None
        }
        EntryManagerMsg::NamesLoaded(Err(err)) => {
            model.names.clear();
            model.selected = None;
            error(err)
        }
        EntryManagerMsg::Select(name) => {
            model.selected = Some(name);
            None
        }
        EntryManagerMsg::NewRequested => {
            model.editor = Some(EntryEditor {
                original: None,
                name: model.kind.placeholder_name().to_string(),
                payload: EntryPayload::empty(model.kind),
            });
            None
        }
        EntryManagerMsg::EditRequested => {
            if let Some(name) = model.selected.clone() {
                cmds.push(EntryManagerCommand::LoadEntry {
                    kind: model.kind,
                    name,
                });
            }
            None
        }
        EntryManagerMsg::EntryLoaded { name, result } => match result {
            Ok(Some(payload)) => {
                model.editor = Some(EntryEditor {
                    original: Some(name.clone()),
                    name,
                    payload,
                });
                None
            }
            Ok(None) => {
                cmds.push(EntryManagerCommand::LoadNames(model.kind));
                error(format!("The {noun} \"{name}\" no longer exists."))
            }
            Err(err) => error(err),
        },
        EntryManagerMsg::EditorNameChanged(text) => {
            if let Some(editor) = model.editor.as_mut() {
                editor.name = text;
            }
            None
        }
        EntryManagerMsg::EditorPayloadChanged(payload) => {
            if let Some(editor) = model.editor.as_mut()
                && payload.kind() == model.kind
            {
                editor.payload = payload;
            }
            None
        }
        EntryManagerMsg::SaveRequested => {
            let editor = model.editor.as_ref()?;
            // Names are stored exactly as typed; only blank names are rejected.
            if editor.name.trim().is_empty() {
                return error("Name cannot be empty.".to_string());
            }
            cmds.push(EntryManagerCommand::Save {
                original: editor.original.clone(),
                name: editor.name.clone(),
                payload: editor.payload.clone(),
            });
            None
        }
        EntryManagerMsg::CancelEdit => {
            model.editor = None;
            None
        }
        EntryManagerMsg::Saved(Ok(name)) => {
            model.editor = None;
            model.selected = Some(name.clone());
            cmds.push(EntryManagerCommand::LoadNames(model.kind));
            info(format!("Saved {noun} \"{name}\""))
        }
        EntryManagerMsg::Saved(Err(err)) => error(err),
        EntryManagerMsg::DeleteRequested => {
            model.confirm_delete = model.selected.clone();
            None
        }
        EntryManagerMsg::DeleteConfirmed => {
            if let Some(name) = model.confirm_delete.take() {
                cmds.push(EntryManagerCommand::Delete {
                    kind: model.kind,
                    name,
                });
            }
            None
        }
        EntryManagerMsg::DeleteCancelled => {
            model.confirm_delete = None;
            None
        }
        EntryManagerMsg::Deleted(Ok(name)) => {
            if model.selected.as_deref() == Some(name.as_str()) {
                model.selected = None;
            }
            cmds.push(EntryManagerCommand::LoadNames(model.kind));
            info(format!("Deleted {noun} \"{name}\""))
        }
        EntryManagerMsg::Deleted(Err(err)) => error(err),
        EntryManagerMsg::CloseRequested => None,
    }
}

/// Render the dialog windows and return triggered messages.
pub fn view(ctx: &egui::Context, model: &EntryManagerModel) -> Vec<EntryManagerMsg> {
    let mut msgs = Vec::new();

    egui::Window::new(model.kind.title())
        .id(egui::Id::new(("entry_manager", model.kind.noun())))
        .collapsible(false)
        .resizable(false)
        .anchor(egui::Align2::CENTER_CENTER, egui::Vec2::ZERO)
        .show(ctx, |ui| {
            render_list(ui, model, &mut msgs);
            ui.add_space(8.0);
            render_actions(ui, model, &mut msgs);
        });

    if let Some(editor) = &model.editor {
        render_editor(ctx, model, editor, &mut msgs);
    }

    if let Some(name) = &model.confirm_delete {
        render_confirm_delete(ctx, model.kind, name, &mut msgs);
    }

    msgs
}

fn render_list(ui: &mut egui::Ui, model: &EntryManagerModel, msgs: &mut Vec<EntryManagerMsg>) {
    egui::Frame::group(ui.style()).show(ui, |ui| {
        ui.set_min_width(260.0);
        egui::ScrollArea::vertical()
            .id_salt("entry_list")
            .max_height(160.0)
            .show(ui, |ui| {
                if model.names.is_empty() {
                    ui.label(
                        egui::RichText::new(format!("No {}s yet.", model.kind.noun()))
                            .italics()
                            .color(egui::Color32::from_gray(110)),
                    );
                }
                for name in &model.names {
                    let selected = model.selected.as_deref() == Some(name.as_str());
                    let row = ui.add(
                        egui::Button::new(name.as_str())
                            .selected(selected)
                            .frame(false),
                    );
                    if row.clicked() {
                        msgs.push(EntryManagerMsg::Select(name.clone()));
                    }
                    if row.double_clicked() {
                        msgs.push(EntryManagerMsg::EditRequested);
                    }
                }
            });
    });
}

fn render_actions(ui: &mut egui::Ui, model: &EntryManagerModel, msgs: &mut Vec<EntryManagerMsg>) {
    let has_selection = model.selected.is_some();
    ui.horizontal(|ui| {
        if ui
            .button(format!("{} New", egui_phosphor::regular::PLUS))
            .clicked()
        {
            msgs.push(EntryManagerMsg::NewRequested);
        }
        if ui
            .add_enabled(
                has_selection,
                egui::Button::new(format!("{} Edit", egui_phosphor::regular::PENCIL_SIMPLE)),
            )
            .clicked()
        {
            msgs.push(EntryManagerMsg::EditRequested);
        }
        if ui
            .add_enabled(
                has_selection,
                egui::Button::new(format!("{} Delete", egui_phosphor::regular::TRASH_SIMPLE)),
            )
            .clicked()
        {
            msgs.push(EntryManagerMsg::DeleteRequested);
        }
        if ui.button("Close").clicked() {
            msgs.push(EntryManagerMsg::CloseRequested);
        }
    });
}

fn render_editor(
    ctx: &egui::Context,
    model: &EntryManagerModel,
    editor: &EntryEditor,
    msgs: &mut Vec<EntryManagerMsg>,
) {
    let title = match &editor.original {
        Some(name) => format!("Edit {}: {}", model.kind.noun(), name),
        None => format!("New {}", model.kind.noun()),
    };

    egui::Window::new(title)
        .id(egui::Id::new("entry_editor"))
        .collapsible(false)
        .resizable(false)
        .anchor(egui::Align2::CENTER_CENTER, egui::vec2(0.0, 20.0))
        .show(ctx, |ui| {
            ui.label("Name");
            let mut name = editor.name.clone();
            if ui
                .add(egui::TextEdit::singleline(&mut name).desired_width(360.0))
                .changed()
            {
                msgs.push(EntryManagerMsg::EditorNameChanged(name));
            }
            if let Some(existing) = editor.collision(&model.names) {
                warning_label(
                    ui,
                    &format!("Saving replaces the existing {} \"{existing}\".", model.kind.noun()),
                );
            }
            ui.add_space(6.0);

            let mut payload = editor.payload.clone();
            let changed = render_payload_fields(ui, &mut payload);
            if changed {
                msgs.push(EntryManagerMsg::EditorPayloadChanged(payload));
            }
            if let Some(warning) = editor.email_warning() {
                warning_label(ui, &warning);
            }

            ui.add_space(8.0);
            ui.horizontal(|ui| {
                if ui
                    .button(format!("{} Save", egui_phosphor::regular::FLOPPY_DISK))
                    .clicked()
                {
                    msgs.push(EntryManagerMsg::SaveRequested);
                }
                if ui.button("Cancel").clicked() {
                    msgs.push(EntryManagerMsg::CancelEdit);
                }
            });
        });
}

/// Render the editable fields for one payload; returns true when any field changed.
fn render_payload_fields(ui: &mut egui::Ui, payload: &mut EntryPayload) -> bool {
    let mut changed = false;
    match payload {
        EntryPayload::Preset(preset) => {
            egui::Grid::new("preset_editor_grid")
                .num_columns(2)
                .spacing(egui::vec2(8.0, 6.0))
                .show(ui, |ui| {
                    for (label, value) in [
                        ("To", &mut preset.to),
                        ("Cc", &mut preset.cc),
                        ("Bcc", &mut preset.bcc),
                        ("Subject", &mut preset.subject),
                    ] {
                        ui.label(label);
                        changed |= ui
                            .add(egui::TextEdit::singleline(value).desired_width(300.0))
                            .changed();
                        ui.end_row();
                    }
                });
            ui.label("Body");
            changed |= ui
                .add(
                    egui::TextEdit::multiline(&mut preset.body)
                        .desired_rows(8)
                        .desired_width(360.0),
                )
                .changed();
        }
        EntryPayload::Signature(text) => {
            ui.label("Signature");
            changed |= ui
                .add(
                    egui::TextEdit::multiline(text)
                        .desired_rows(8)
                        .desired_width(360.0),
                )
                .changed();
        }
        EntryPayload::Contact(email) => {
            ui.label("Email address");
            changed |= ui
                .add(
                    egui::TextEdit::singleline(email)
                        .hint_text("name@example.com")
                        .desired_width(360.0),
                )
                .changed();
        }
    }
    changed
}

fn render_confirm_delete(
    ctx: &egui::Context,
    kind: StoreKind,
    name: &str,
    msgs: &mut Vec<EntryManagerMsg>,
) {
    egui::Window::new("Confirm")
        .id(egui::Id::new("entry_confirm_delete"))
        .collapsible(false)
        .resizable(false)
        .anchor(egui::Align2::CENTER_CENTER, egui::Vec2::ZERO)
        .show(ctx, |ui| {
            ui.label(format!("Delete {} \"{name}\"?", kind.noun()));
            ui.add_space(8.0);
            ui.horizontal(|ui| {
                if ui.button("Yes").clicked() {
                    msgs.push(EntryManagerMsg::DeleteConfirmed);
                }
                if ui.button("No").clicked() {
                    msgs.push(EntryManagerMsg::DeleteCancelled);
                }
            });
        });
}

fn warning_label(ui: &mut egui::Ui, text: &str) {
    ui.label(
        egui::RichText::new(format!("{} {text}", egui_phosphor::regular::WARNING))
            .small()
            .color(egui::Color32::from_rgb(232, 89, 12)),
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::preset::Preset;

    fn loaded(kind: StoreKind, names: &[&str]) -> EntryManagerModel {
        let mut model = EntryManagerModel::new(kind);
        let mut cmds = Vec::new();
        update(
            &mut model,
            EntryManagerMsg::NamesLoaded(Ok(names.iter().map(|n| n.to_string()).collect())),
            &mut cmds,
        );
        model
    }

    #[test]
    fn new_opens_editor_with_placeholder() {
        let mut model = loaded(StoreKind::Signatures, &[]);
        let mut cmds = Vec::new();

        update(&mut model, EntryManagerMsg::NewRequested, &mut cmds);

        let editor = model.editor().expect("editor open");
        assert_eq!(editor.name(), "New signature");
        assert_eq!(editor.original(), None);
        assert_eq!(editor.payload(), &EntryPayload::Signature(String::new()));
    }

    #[test]
    fn edit_requires_selection_and_loads_fresh_entry() {
        let mut model = loaded(StoreKind::Contacts, &["Alice"]);
        let mut cmds = Vec::new();

        update(&mut model, EntryManagerMsg::EditRequested, &mut cmds);
        assert!(cmds.is_empty());

        update(&mut model, EntryManagerMsg::Select("Alice".into()), &mut cmds);
        update(&mut model, EntryManagerMsg::EditRequested, &mut cmds);
        assert_eq!(
            cmds,
            vec![EntryManagerCommand::LoadEntry {
                kind: StoreKind::Contacts,
                name: "Alice".into()
            }]
        );
    }

    #[test]
    fn loaded_entry_opens_editor_with_original_name() {
        let mut model = loaded(StoreKind::Contacts, &["Alice"]);
        let mut cmds = Vec::new();

        update(
            &mut model,
            EntryManagerMsg::EntryLoaded {
                name: "Alice".into(),
                result: Ok(Some(EntryPayload::Contact("alice@example.com".into()))),
            },
            &mut cmds,
        );

        let editor = model.editor().expect("editor open");
        assert_eq!(editor.original(), Some("Alice"));
        assert_eq!(editor.name(), "Alice");
    }

    #[test]
    fn vanished_entry_reports_error_and_reloads() {
        let mut model = loaded(StoreKind::Presets, &["old"]);
        let mut cmds = Vec::new();

        let event = update(
            &mut model,
            EntryManagerMsg::EntryLoaded {
                name: "old".into(),
                result: Ok(None),
            },
            &mut cmds,
        )
        .expect("event expected");

        assert!(event.is_error);
        assert!(model.editor().is_none());
        assert_eq!(cmds, vec![EntryManagerCommand::LoadNames(StoreKind::Presets)]);
    }

    #[test]
    fn save_carries_original_and_edited_name() {
        let mut model = loaded(StoreKind::Presets, &["A"]);
        let mut cmds = Vec::new();
        update(
            &mut model,
            EntryManagerMsg::EntryLoaded {
                name: "A".into(),
                result: Ok(Some(EntryPayload::Preset(Preset::default()))),
            },
            &mut cmds,
        );
        update(&mut model, EntryManagerMsg::EditorNameChanged("B".into()), &mut cmds);
        let payload = EntryPayload::Preset(Preset {
            subject: "Hi".into(),
            ..Default::default()
        });
        update(
            &mut model,
            EntryManagerMsg::EditorPayloadChanged(payload.clone()),
            &mut cmds,
        );

        update(&mut model, EntryManagerMsg::SaveRequested, &mut cmds);

        assert_eq!(
            cmds,
            vec![EntryManagerCommand::Save {
                original: Some("A".into()),
                name: "B".into(),
                payload,
            }]
        );
        assert!(model.editor().is_some(), "editor stays open until the save succeeds");
    }

    #[test]
    fn untouched_edit_keeps_name_with_surrounding_whitespace() {
        let mut model = loaded(StoreKind::Signatures, &[" A", "A"]);
        let mut cmds = Vec::new();
        update(
            &mut model,
            EntryManagerMsg::EntryLoaded {
                name: " A".into(),
                result: Ok(Some(EntryPayload::Signature("sig".into()))),
            },
            &mut cmds,
        );
        let editor = model.editor().expect("editor open");
        assert_eq!(editor.collision(model.names()), None);

        update(&mut model, EntryManagerMsg::SaveRequested, &mut cmds);

        assert_eq!(
            cmds,
            vec![EntryManagerCommand::Save {
                original: Some(" A".into()),
                name: " A".into(),
                payload: EntryPayload::Signature("sig".into()),
            }]
        );
    }

    #[test]
    fn save_rejects_blank_name() {
        let mut model = loaded(StoreKind::Contacts, &[]);
        let mut cmds = Vec::new();
        update(&mut model, EntryManagerMsg::NewRequested, &mut cmds);
        update(&mut model, EntryManagerMsg::EditorNameChanged("   ".into()), &mut cmds);

        let event = update(&mut model, EntryManagerMsg::SaveRequested, &mut cmds)
            .expect("event expected");

        assert!(event.is_error);
        assert_eq!(event.message, "Name cannot be empty.");
        assert!(cmds.is_empty());
    }

    #[test]
    fn payload_of_other_kind_is_ignored() {
        let mut model = loaded(StoreKind::Contacts, &[]);
        let mut cmds = Vec::new();
        update(&mut model, EntryManagerMsg::NewRequested, &mut cmds);

        update(
            &mut model,
            EntryManagerMsg::EditorPayloadChanged(EntryPayload::Signature("sig".into())),
            &mut cmds,
        );

        assert_eq!(
            model.editor().map(|e| e.payload().clone()),
            Some(EntryPayload::Contact(String::new()))
        );
    }

    #[test]
    fn successful_save_closes_editor_and_reloads() {
        let mut model = loaded(StoreKind::Signatures, &[]);
        let mut cmds = Vec::new();
        update(&mut model, EntryManagerMsg::NewRequested, &mut cmds);

        let event = update(&mut model, EntryManagerMsg::Saved(Ok("work".into())), &mut cmds)
            .expect("event expected");

        assert!(model.editor().is_none());
        assert_eq!(model.selected(), Some("work"));
        assert_eq!(cmds, vec![EntryManagerCommand::LoadNames(StoreKind::Signatures)]);
        assert_eq!(event.message, "Saved signature \"work\"");
    }

    #[test]
    fn failed_save_keeps_editor_values() {
        let mut model = loaded(StoreKind::Signatures, &[]);
        let mut cmds = Vec::new();
        update(&mut model, EntryManagerMsg::NewRequested, &mut cmds);
        update(&mut model, EntryManagerMsg::EditorNameChanged("work".into()), &mut cmds);

        let event = update(
            &mut model,
            EntryManagerMsg::Saved(Err("disk full".into())),
            &mut cmds,
        )
        .expect("event expected");

        assert!(event.is_error);
        assert_eq!(model.editor().map(|e| e.name()), Some("work"));
    }

    #[test]
    fn delete_needs_confirmation() {
        let mut model = loaded(StoreKind::Presets, &["weekly"]);
        let mut cmds = Vec::new();
        update(&mut model, EntryManagerMsg::Select("weekly".into()), &mut cmds);

        update(&mut model, EntryManagerMsg::DeleteRequested, &mut cmds);
        assert_eq!(model.pending_delete(), Some("weekly"));
        assert!(cmds.is_empty());

        update(&mut model, EntryManagerMsg::DeleteCancelled, &mut cmds);
        assert!(model.pending_delete().is_none());
        assert!(cmds.is_empty());

        update(&mut model, EntryManagerMsg::DeleteRequested, &mut cmds);
        update(&mut model, EntryManagerMsg::DeleteConfirmed, &mut cmds);
        assert_eq!(
            cmds,
            vec![EntryManagerCommand::Delete {
                kind: StoreKind::Presets,
                name: "weekly".into()
            }]
        );
    }

    #[test]
    fn deleted_clears_selection_and_reloads() {
        let mut model = loaded(StoreKind::Presets, &["weekly"]);
        let mut cmds = Vec::new();
        update(&mut model, EntryManagerMsg::Select("weekly".into()), &mut cmds);

        update(&mut model, EntryManagerMsg::Deleted(Ok("weekly".into())), &mut cmds);

        assert_eq!(model.selected(), None);
        assert_eq!(cmds, vec![EntryManagerCommand::LoadNames(StoreKind::Presets)]);
    }

    #[test]
    fn reload_drops_stale_selection() {
        let mut model = loaded(StoreKind::Contacts, &["Alice", "Bob"]);
        let mut cmds = Vec::new();
        update(&mut model, EntryManagerMsg::Select("Bob".into()), &mut cmds);

        update(
            &mut model,
            EntryManagerMsg::NamesLoaded(Ok(vec!["Alice".into()])),
            &mut cmds,
        );

        assert_eq!(model.selected(), None);
        assert_eq!(model.names(), &["Alice".to_string()]);
    }

    #[test]
    fn editor_flags_collision_with_other_entry() {
        let names = vec!["A".to_string(), "B".to_string()];
        let editor = EntryEditor {
            original: Some("A".into()),
            name: "B".into(),
            payload: EntryPayload::Signature(String::new()),
        };
        let unchanged = EntryEditor {
            name: "A".into(),
            ..editor.clone()
        };

        assert_eq!(editor.collision(&names), Some("B"));
        assert_eq!(unchanged.collision(&names), None);
    }

    #[test]
    fn editor_warns_on_invalid_contact_email() {
        let bad = EntryEditor {
            original: None,
            name: "Bob".into(),
            payload: EntryPayload::Contact("not-an-address".into()),
        };
        let good = EntryEditor {
            payload: EntryPayload::Contact("bob@example.com".into()),
            ..bad.clone()
        };

        assert!(bad.email_warning().is_some());
        assert!(good.email_warning().is_none());
    }
}
