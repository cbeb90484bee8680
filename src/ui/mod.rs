// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2026 The mailpreset contributors

//! Top-level egui application shell for composing a preset-based email draft.
//! Handles layout, the management dialogs, and wiring to draft dispatch.

pub mod components;

use std::collections::VecDeque;

use eframe::egui;

use crate::config::AppConfig;
use crate::logic::dispatch::{EmlDraftClient, MailClient};
use crate::logic::store::Stores;
use crate::models::entry::StoreKind;
use crate::mvu::{self, AppModel, CommandContext, Msg};
use crate::ui::components::{compose, entry_manager};

/// Stateful egui application for composing drafts from presets.
pub struct MailPresetApp {
    model: AppModel,
    inbox: VecDeque<Msg>,
    stores: Stores,
    mail: Box<dyn MailClient>,
}

impl MailPresetApp {
    pub fn new(config: &AppConfig) -> Self {
        log::info!("Using data directory {}", config.data_dir.display());
        Self {
            model: AppModel::default(),
            inbox: VecDeque::from([Msg::Startup]),
            stores: Stores::open(&config.data_dir),
            mail: Box::new(EmlDraftClient::new(config.drafts_dir.clone())),
        }
    }

    /// Apply queued messages, running their commands inline until the queue is empty.
    fn drain_inbox(&mut self) {
        let ctx = CommandContext {
            stores: &self.stores,
            mail: &*self.mail,
        };
        while let Some(msg) = self.inbox.pop_front() {
            let mut commands = Vec::new();
            mvu::update(&mut self.model, msg, &mut commands);
            for cmd in commands {
                self.inbox.push_back(mvu::run_command(cmd, &ctx));
            }
        }
    }
}

impl eframe::App for MailPresetApp {
    // Required by eframe 0.34; all rendering happens in `update`, which eframe still calls.
    fn ui(&mut self, _ui: &mut egui::Ui, _frame: &mut eframe::Frame) {}

    /// Drives a single UI frame: applies queued messages, then renders the top bar, the
    /// compose form, the action buttons, any open dialog, and the status panel. Views push
    /// their messages into the inbox for the next frame.
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.ensure_spacing(ctx);
        self.drain_inbox();

        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            ui.add_space(6.0);
            ui.horizontal(|ui| {
                ui.heading("Mail Preset");
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    self.render_theme_controls(ui);
                });
            });
            ui.add_space(4.0);
        });

        egui::TopBottomPanel::bottom("status_panel")
            .resizable(false)
            .show(ctx, |ui| {
                self.render_status(ui);
            });

        egui::TopBottomPanel::bottom("action_bar")
            .resizable(false)
            .show(ctx, |ui| {
                ui.add_space(6.0);
                self.render_actions(ui, ctx);
                ui.add_space(6.0);
            });

        let dialog_open = self.model.manager.is_some();
        egui::CentralPanel::default().show(ctx, |ui| {
            ui.add_enabled_ui(!dialog_open, |ui| {
                ui.add_space(8.0);
                egui::ScrollArea::vertical().show(ui, |ui| {
                    self.render_preset_row(ui);
                    ui.add_space(12.0);

                    let msgs = compose::view(ui, &self.model.compose);
                    self.inbox.extend(msgs.into_iter().map(Msg::Compose));
                    ui.add_space(8.0);
                });
            });
        });

        if let Some(manager) = &self.model.manager {
            let msgs = entry_manager::view(ctx, manager);
            self.inbox.extend(msgs.into_iter().map(Msg::Manager));
        }

        self.render_error_modal(ctx);

        if !self.inbox.is_empty() {
            ctx.request_repaint();
        }
    }
}

impl MailPresetApp {
    fn ensure_spacing(&self, ctx: &egui::Context) {
        ctx.style_mut(|style| {
            style.spacing.item_spacing = egui::vec2(6.0, 6.0);
        });
    }

    fn render_theme_controls(&mut self, ui: &mut egui::Ui) {
        ui.add_space(2.0);
        egui::widgets::global_theme_preference_switch(ui);
    }

    /// Preset picker with its management button.
    fn render_preset_row(&mut self, ui: &mut egui::Ui) {
        egui::Frame::group(ui.style()).show(ui, |ui| {
            ui.set_width(ui.available_width());
            ui.horizontal(|ui| {
                ui.label("Preset");
                let msgs = compose::preset_view(ui, &self.model.compose);
                self.inbox.extend(msgs.into_iter().map(Msg::Compose));
                if ui
                    .button(format!("{} Manage", egui_phosphor::regular::GEAR))
                    .on_hover_text("Add, edit or delete presets")
                    .clicked()
                {
                    self.inbox.push_back(Msg::OpenManager(StoreKind::Presets));
                }
            });
        });
    }

    /// Bottom row: create the draft, open the signature/contact dialogs, exit.
    fn render_actions(&mut self, ui: &mut egui::Ui, ctx: &egui::Context) {
        let enabled = self.model.manager.is_none();
        ui.horizontal(|ui| {
            let create = egui::Button::new(format!(
                "{} Create draft",
                egui_phosphor::regular::ENVELOPE_SIMPLE
            ));
            if ui
                .add_enabled(enabled, create)
                .on_hover_text("Open the message in your mail client for review")
                .clicked()
            {
                self.inbox
                    .push_back(Msg::Compose(compose::ComposeMsg::CreateDraftRequested));
            }

            ui.separator();

            for (kind, icon, label) in [
                (
                    StoreKind::Signatures,
                    egui_phosphor::regular::SIGNATURE,
                    "Manage signatures",
                ),
                (
                    StoreKind::Contacts,
                    egui_phosphor::regular::ADDRESS_BOOK,
                    "Manage contacts",
                ),
            ] {
                if ui
                    .add_enabled(enabled, egui::Button::new(format!("{icon} {label}")))
                    .clicked()
                {
                    self.inbox.push_back(Msg::OpenManager(kind));
                }
            }

            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if ui
                    .button(format!("{} Exit", egui_phosphor::regular::SIGN_OUT))
                    .clicked()
                {
                    ctx.send_viewport_cmd(egui::ViewportCommand::Close);
                }
            });
        });
    }

    /// Render a simple modal window for error messages.
    fn render_error_modal(&mut self, ctx: &egui::Context) {
        if let Some(message) = self.model.error.clone() {
            egui::Window::new("Error")
                .collapsible(false)
                .resizable(false)
                .anchor(egui::Align2::CENTER_CENTER, egui::Vec2::ZERO)
                .show(ctx, |ui| {
                    ui.label(message);
                    ui.add_space(8.0);
                    if ui.button("OK").clicked() {
                        self.inbox.push_back(Msg::DismissError);
                    }
                });
        }
    }

    /// Render latest status message when present.
    fn render_status(&self, ui: &mut egui::Ui) {
        if let Some(text) = &self.model.status {
            ui.horizontal(|ui| {
                ui.label(egui::RichText::new(text).color(egui::Color32::from_gray(68)));
            });
        }
    }
}
