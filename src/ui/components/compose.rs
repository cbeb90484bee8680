// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2026 The mailpreset contributors

//! Compose form: recipients, subject, body, signature choice, attachments, and preset picker.

use eframe::egui;

use crate::models::draft::ComposeSession;
use crate::models::preset::Preset;
use crate::ui::components::attachments::{
    self, AttachmentsCommand, AttachmentsModel, AttachmentsMsg,
};

/// Separator placed before an email appended to a non-empty recipient field.
pub const RECIPIENT_SEPARATOR: &str = "; ";

/// Recipient fields that accept contacts from the contact book.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RecipientField {
    To,
    Cc,
    Bcc,
}

impl RecipientField {
    pub const ALL: [RecipientField; 3] = [
        RecipientField::To,
        RecipientField::Cc,
        RecipientField::Bcc,
    ];

    pub fn label(self) -> &'static str {
        match self {
            RecipientField::To => "To",
            RecipientField::Cc => "Cc",
            RecipientField::Bcc => "Bcc",
        }
    }
}

/// Editable text fields of the form.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ComposeField {
    Recipient(RecipientField),
    Subject,
    Body,
}

/// Compose form state. Names lists mirror the stores and are refreshed after each dialog.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ComposeModel {
    pub to: String,
    pub cc: String,
    pub bcc: String,
    pub subject: String,
    pub body: String,
    /// Selected signature name.
    pub signature: String,
    pub attachments: AttachmentsModel,
    /// Preset picked in the combo box, applied on request.
    pub preset_choice: String,
    pub preset_names: Vec<String>,
    pub signature_names: Vec<String>,
    pub contact_names: Vec<String>,
}

/// Messages emitted by the compose view or produced by command results.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ComposeMsg {
    FieldChanged(ComposeField, String),
    PresetChosen(String),
    ApplyPresetRequested,
    PresetLoaded { name: String, preset: Option<Preset> },
    ContactChosen { field: RecipientField, name: String },
    ContactResolved { field: RecipientField, email: Option<String> },
    SignatureChosen(String),
    Attachments(AttachmentsMsg),
    CreateDraftRequested,
}

/// Side effects requested by the compose form.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ComposeCommand {
    LoadPreset(String),
    ResolveContact { field: RecipientField, name: String },
    PickFiles,
    CreateDraft(ComposeSession),
}

/// Feedback surfaced to the status bar/modal.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ComposeEvent {
    pub message: String,
    pub is_error: bool,
}

impl ComposeModel {
    fn recipient_mut(&mut self, field: RecipientField) -> &mut String {
        match field {
            RecipientField::To => &mut self.to,
            RecipientField::Cc => &mut self.cc,
            RecipientField::Bcc => &mut self.bcc,
        }
    }

    pub fn recipient(&self, field: RecipientField) -> &str {
        match field {
            RecipientField::To => &self.to,
            RecipientField::Cc => &self.cc,
            RecipientField::Bcc => &self.bcc,
        }
    }

    /// Snapshot of the form handed to dispatch.
    pub fn session(&self) -> ComposeSession {
        ComposeSession {
            to: self.to.clone(),
            cc: self.cc.clone(),
            bcc: self.bcc.clone(),
            subject: self.subject.clone(),
            body: self.body.clone(),
            signature_name: self.signature.clone(),
            attachments: self.attachments.paths().to_vec(),
        }
    }

    /// Replace the five preset-backed fields.
    pub fn apply_preset(&mut self, preset: Preset) {
        self.to = preset.to;
        self.cc = preset.cc;
        self.bcc = preset.bcc;
        self.subject = preset.subject;
        self.body = preset.body;
    }

    /// Append `email` to a recipient field, separated from existing text by `"; "`.
    pub fn append_recipient(&mut self, field: RecipientField, email: &str) {
        let current = self.recipient_mut(field);
        if !current.is_empty() {
            current.push_str(RECIPIENT_SEPARATOR);
        }
        current.push_str(email);
    }
}

/// Apply a message to the compose model. Returns a user-facing event when relevant.
pub fn update(
    model: &mut ComposeModel,
    msg: ComposeMsg,
    cmds: &mut Vec<ComposeCommand>,
) -> Option<ComposeEvent> {
    match msg {
        ComposeMsg::FieldChanged(field, text) => {
            match field {
                ComposeField::Recipient(r) => *model.recipient_mut(r) = text,
                ComposeField::Subject => model.subject = text,
                ComposeField::Body => model.body = text,
            }
            None
        }
        ComposeMsg::PresetChosen(name) => {
            model.preset_choice = name;
            None
        }
        ComposeMsg::ApplyPresetRequested => {
            if !model.preset_choice.is_empty() {
                cmds.push(ComposeCommand::LoadPreset(model.preset_choice.clone()));
            }
            None
        }
        ComposeMsg::PresetLoaded { name, preset } => match preset {
            Some(preset) => {
                model.apply_preset(preset);
                Some(ComposeEvent {
                    message: format!("Applied preset \"{name}\""),
                    is_error: false,
                })
            }
            None => Some(ComposeEvent {
                message: format!("Preset \"{name}\" no longer exists"),
                is_error: false,
            }),
        },
        ComposeMsg::ContactChosen { field, name } => {
            cmds.push(ComposeCommand::ResolveContact { field, name });
            None
        }
        ComposeMsg::ContactResolved { field, email } => {
            if let Some(email) = email {
                model.append_recipient(field, &email);
            }
            None
        }
        ComposeMsg::SignatureChosen(name) => {
            model.signature = name;
            None
        }
        ComposeMsg::Attachments(m) => {
            let mut att_cmds = Vec::new();
            let event = attachments::update(&mut model.attachments, m, &mut att_cmds);
            for c in att_cmds {
                match c {
                    AttachmentsCommand::PickFiles => cmds.push(ComposeCommand::PickFiles),
                }
            }
            event.map(|e| ComposeEvent {
                message: e.message,
                is_error: e.is_error,
            })
        }
        ComposeMsg::CreateDraftRequested => {
            cmds.push(ComposeCommand::CreateDraft(model.session()));
            None
        }
    }
}

/// Render the preset picker row.
pub fn preset_view(ui: &mut egui::Ui, model: &ComposeModel) -> Vec<ComposeMsg> {
    let mut msgs = Vec::new();

    ui.horizontal(|ui| {
        let mut choice = model.preset_choice.clone();
        let selected_text = if choice.is_empty() {
            "Select a preset".to_string()
        } else {
            choice.clone()
        };
        egui::ComboBox::from_id_salt("preset_combo")
            .selected_text(selected_text)
            .width(240.0)
            .show_ui(ui, |ui| {
                for name in &model.preset_names {
                    ui.selectable_value(&mut choice, name.clone(), name);
                }
            });
        if choice != model.preset_choice {
            msgs.push(ComposeMsg::PresetChosen(choice));
        }

        let apply = egui::Button::new(format!(
            "{} Apply",
            egui_phosphor::regular::ARROW_SQUARE_DOWN
        ));
        if ui
            .add_enabled(!model.preset_choice.is_empty(), apply)
            .on_hover_text("Fill recipients, subject and body from the preset")
            .clicked()
        {
            msgs.push(ComposeMsg::ApplyPresetRequested);
        }
    });

    msgs
}

/// Render the compose form fields and return triggered messages.
pub fn view(ui: &mut egui::Ui, model: &ComposeModel) -> Vec<ComposeMsg> {
    let mut msgs = Vec::new();

    egui::Grid::new("compose_grid")
        .num_columns(3)
        .spacing(egui::vec2(8.0, 8.0))
        .min_col_width(60.0)
        .show(ui, |ui| {
            for field in RecipientField::ALL {
                ui.label(field.label());
                let mut text = model.recipient(field).to_string();
                if ui
                    .add(
                        egui::TextEdit::singleline(&mut text)
                            .hint_text("name@example.com; other@example.com")
                            .desired_width(360.0),
                    )
                    .changed()
                {
                    msgs.push(ComposeMsg::FieldChanged(ComposeField::Recipient(field), text));
                }
                render_contact_picker(ui, model, field, &mut msgs);
                ui.end_row();
            }

            ui.label("Subject");
            let mut subject = model.subject.clone();
            if ui
                .add(egui::TextEdit::singleline(&mut subject).desired_width(360.0))
                .changed()
            {
                msgs.push(ComposeMsg::FieldChanged(ComposeField::Subject, subject));
            }
            ui.end_row();
        });

    ui.add_space(8.0);
    ui.label("Body");
    let mut body = model.body.clone();
    if ui
        .add(
            egui::TextEdit::multiline(&mut body)
                .desired_rows(10)
                .desired_width(f32::INFINITY),
        )
        .changed()
    {
        msgs.push(ComposeMsg::FieldChanged(ComposeField::Body, body));
    }

    ui.add_space(8.0);
    ui.horizontal(|ui| {
        ui.label("Signature");
        let mut signature = model.signature.clone();
        let selected_text = if signature.is_empty() {
            "(none)".to_string()
        } else {
            signature.clone()
        };
        egui::ComboBox::from_id_salt("signature_combo")
            .selected_text(selected_text)
            .width(200.0)
            .show_ui(ui, |ui| {
                for name in &model.signature_names {
                    ui.selectable_value(&mut signature, name.clone(), name);
                }
            });
        if signature != model.signature {
            msgs.push(ComposeMsg::SignatureChosen(signature));
        }
    });

    ui.add_space(8.0);
    ui.label("Attachments");
    let att_msgs = attachments::view(ui, &model.attachments);
    msgs.extend(att_msgs.into_iter().map(ComposeMsg::Attachments));

    msgs
}

/// Combo box listing contacts; picking one appends its address to `field`.
fn render_contact_picker(
    ui: &mut egui::Ui,
    model: &ComposeModel,
    field: RecipientField,
    msgs: &mut Vec<ComposeMsg>,
) {
    let mut picked: Option<String> = None;
    egui::ComboBox::from_id_salt(("contact_combo", field.label()))
        .selected_text(format!("{} Contacts", egui_phosphor::regular::ADDRESS_BOOK))
        .width(160.0)
        .show_ui(ui, |ui| {
            if model.contact_names.is_empty() {
                ui.label(egui::RichText::new("No contacts").italics());
            }
            for name in &model.contact_names {
                ui.selectable_value(&mut picked, Some(name.clone()), name);
            }
        });
    if let Some(name) = picked {
        msgs.push(ComposeMsg::ContactChosen { field, name });
    }
}
