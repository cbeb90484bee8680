// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2026 The mailpreset contributors

//! Attachment list for the compose form, MVU-style.

use std::collections::BTreeSet;
use std::path::PathBuf;

use eframe::egui;

/// Picked attachment paths plus the rows currently selected for removal.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AttachmentsModel {
    paths: Vec<PathBuf>,
    selected: BTreeSet<usize>,
}

/// Messages emitted by the attachments view.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AttachmentsMsg {
    RequestPickFiles,
    FilesPicked(Vec<PathBuf>),
    ToggleSelected(usize),
    RemoveSelected,
}

/// Side effects requested by the attachments component.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AttachmentsCommand {
    PickFiles,
}

/// User-facing events for status/error surfaces.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AttachmentsEvent {
    pub message: String,
    pub is_error: bool,
}

impl AttachmentsModel {
    /// Attachment paths in the order they were added.
    pub fn paths(&self) -> &[PathBuf] {
        &self.paths
    }

    pub fn is_selected(&self, index: usize) -> bool {
        self.selected.contains(&index)
    }
}

/// Apply a message to the attachments model. Returns a user-facing event when relevant.
pub fn update(
    model: &mut AttachmentsModel,
    msg: AttachmentsMsg,
    cmds: &mut Vec<AttachmentsCommand>,
) -> Option<AttachmentsEvent> {
    match msg {
        AttachmentsMsg::RequestPickFiles => {
            cmds.push(AttachmentsCommand::PickFiles);
            None
        }
        AttachmentsMsg::FilesPicked(paths) => {
            if paths.is_empty() {
                return None;
            }
            let count = paths.len();
            model.paths.extend(paths);
            Some(AttachmentsEvent {
                message: format!("Added {count} attachment(s)"),
                is_error: false,
            })
        }
        AttachmentsMsg::ToggleSelected(index) => {
            if index < model.paths.len() && !model.selected.remove(&index) {
                model.selected.insert(index);
            }
            None
        }
        AttachmentsMsg::RemoveSelected => {
            if model.selected.is_empty() {
                return None;
            }
            let selected = std::mem::take(&mut model.selected);
            let before = model.paths.len();
            let mut index = 0;
            model.paths.retain(|_| {
                let keep = !selected.contains(&index);
                index += 1;
                keep
            });
            Some(AttachmentsEvent {
                message: format!("Removed {} attachment(s)", before - model.paths.len()),
                is_error: false,
            })
        }
    }
}

/// Render the attachment list and return any messages triggered by user interaction.
pub fn view(ui: &mut egui::Ui, model: &AttachmentsModel) -> Vec<AttachmentsMsg> {
    let mut msgs = Vec::new();

    ui.horizontal(|ui| {
        if ui
            .button(format!("{} Add files", egui_phosphor::regular::PAPERCLIP))
            .clicked()
        {
            msgs.push(AttachmentsMsg::RequestPickFiles);
        }

        let remove = egui::Button::new(format!(
            "{} Remove selected",
            egui_phosphor::regular::TRASH_SIMPLE
        ));
        if ui
            .add_enabled(!model.selected.is_empty(), remove)
            .on_disabled_hover_text("Select attachments to remove")
            .clicked()
        {
            msgs.push(AttachmentsMsg::RemoveSelected);
        }
    });

    ui.add_space(6.0);

    let visuals = ui.visuals().clone();
    egui::Frame::new()
        .fill(visuals.panel_fill)
        .stroke(visuals.window_stroke())
        .inner_margin(8.0)
        .show(ui, |ui| {
            ui.set_width(ui.available_width());
            if model.paths.is_empty() {
                ui.label(
                    egui::RichText::new("No attachments").color(egui::Color32::from_gray(150)),
                );
                return;
            }

            egui::ScrollArea::vertical()
                .id_salt("attachments_scroll")
                .max_height(90.0)
                .show(ui, |ui| {
                    for (index, path) in model.paths.iter().enumerate() {
                        let label = path.to_string_lossy().into_owned();
                        let row = ui.add(
                            egui::Button::new(label)
                                .selected(model.is_selected(index))
                                .frame(false),
                        );
                        let row = if path.exists() {
                            row
                        } else {
                            row.on_hover_text("File not found; it will be skipped")
                        };
                        if row.clicked() {
                            msgs.push(AttachmentsMsg::ToggleSelected(index));
                        }
                    }
                });
        });

    msgs
}
