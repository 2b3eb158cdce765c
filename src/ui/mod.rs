// SPDX-License-Identifier: MIT

//! Top-level egui application shell for the image gallery.
//! Handles layout, worker wiring, and the save-dialog delivery step.

pub mod components;

use std::sync::Arc;

use anyhow::{Context, Result};
use eframe::egui;

use crate::logic::export::{ARCHIVE_FILE_NAME, ensure_extension};
use crate::logic::fetch::HttpFetcher;
use crate::mvu::{self, Command, GalleryModel, Msg};
use crate::ui::components::{admission_form, gallery};

/// Stateful egui application for collecting images and exporting the
/// gallery archive.
pub struct GalleryApp {
    model: GalleryModel,
    inbox: Vec<Msg>,
    cmd_tx: crossbeam_channel::Sender<Command>,
    msg_rx: crossbeam_channel::Receiver<Msg>,
    /// Shared runtime driving the async fetches; kept alive for the
    /// lifetime of the app so worker threads can block on it.
    _runtime: tokio::runtime::Runtime,
}

impl GalleryApp {
    pub fn new() -> Result<Self> {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(2)
            .enable_all()
            .build()
            .context("Failed to start async runtime")?;
        let fetcher = Arc::new(HttpFetcher::new()?);

        let (cmd_tx, cmd_rx) = crossbeam_channel::unbounded::<Command>();
        let (msg_tx, msg_rx) = crossbeam_channel::unbounded::<Msg>();

        let threads = std::thread::available_parallelism()
            .map(|n| n.get().max(2))
            .unwrap_or(2);
        for _ in 0..threads {
            let cmd_rx = cmd_rx.clone();
            let msg_tx = msg_tx.clone();
            let fetcher = Arc::clone(&fetcher);
            let handle = runtime.handle().clone();
            std::thread::spawn(move || {
                for cmd in cmd_rx.iter() {
                    let msg = mvu::run_command(cmd, fetcher.as_ref(), &handle);
                    let _ = msg_tx.send(msg);
                }
            });
        }

        Ok(Self {
            model: GalleryModel::default(),
            inbox: Vec::new(),
            cmd_tx,
            msg_rx,
            _runtime: runtime,
        })
    }
}

impl eframe::App for GalleryApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.ensure_spacing(ctx);

        // Worker results arrive while egui may be idle; keep polling until
        // the queue drains.
        if self.model.pending_commands > 0 {
            ctx.request_repaint_after(std::time::Duration::from_millis(200));
        }

        // Pull messages produced by the command workers.
        while let Ok(msg) = self.msg_rx.try_recv() {
            self.model.pending_commands = self.model.pending_commands.saturating_sub(1);
            self.inbox.push(msg);
        }

        // Process pending messages until exhausted.
        let mut msgs = std::mem::take(&mut self.inbox);
        while let Some(msg) = msgs.pop() {
            match msg {
                mvu::Msg::AdmissionDecoded { name, url, image } => {
                    let texture = ctx.load_texture(
                        format!("thumb-{url}"),
                        image,
                        egui::TextureOptions::default(),
                    );
                    msgs.push(mvu::Msg::EntryAdmitted { name, url, texture });
                }
                other => {
                    let mut commands = Vec::new();
                    mvu::update(&mut self.model, other, &mut commands);
                    for cmd in commands {
                        if self.cmd_tx.send(cmd).is_ok() {
                            self.model.pending_commands += 1;
                        }
                    }
                }
            }
        }
        self.inbox = msgs;

        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            ui.add_space(6.0);
            ui.horizontal(|ui| {
                ui.heading("Image Gallery");
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    ui.add_space(2.0);
                    egui::widgets::global_theme_preference_switch(ui);
                    ui.separator();
                    self.render_download_button(ui);
                });
            });
            ui.add_space(4.0);
        });

        self.render_error_modal(ctx);

        egui::TopBottomPanel::bottom("status_panel")
            .resizable(false)
            .show(ctx, |ui| {
                self.render_status(ui);
            });

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.add_space(8.0);

            let form_msgs = admission_form::view(ui, &self.model.form);
            self.inbox.extend(form_msgs.into_iter().map(Msg::Form));

            ui.add_space(12.0);
            ui.separator();
            ui.add_space(8.0);

            egui::ScrollArea::vertical().show(ui, |ui| {
                let gallery_msgs =
                    gallery::view(ui, &self.model.tiles, self.model.gallery.entries());
                self.inbox
                    .extend(gallery_msgs.into_iter().map(Msg::Gallery));
                ui.add_space(8.0);
            });
        });
    }
}

impl GalleryApp {
    fn ensure_spacing(&self, ctx: &egui::Context) {
        ctx.style_mut(|style| {
            style.spacing.item_spacing = egui::vec2(6.0, 6.0);
        });
    }

    /// Render the "Download all" button and handle the save-file dialog.
    ///
    /// Disabled while the gallery is empty, so an empty archive is never
    /// delivered. When a path is chosen the export command is enqueued via
    /// [`Msg::ExportRequested`]; cancelling the dialog emits
    /// [`Msg::ExportCancelled`].
    fn render_download_button(&mut self, ui: &mut egui::Ui) {
        let enabled = !self.model.gallery.is_empty();
        let button = egui::Button::new(format!(
            "{} Download all",
            egui_phosphor::regular::DOWNLOAD_SIMPLE
        ));

        if ui
            .add_enabled(enabled, button)
            .on_disabled_hover_text("Add at least one image first")
            .clicked()
        {
            let dialog = rfd::FileDialog::new()
                .set_title("Save gallery archive")
                .add_filter("ZIP archive", &["zip"])
                .set_file_name(ARCHIVE_FILE_NAME);

            if let Some(path) = dialog.save_file() {
                let output_path = ensure_extension(path, "zip");
                self.inbox.push(Msg::ExportRequested(output_path));
            } else {
                self.inbox.push(Msg::ExportCancelled);
            }
        }
    }

    /// Render a simple modal window for export-level errors.
    fn render_error_modal(&mut self, ctx: &egui::Context) {
        if let Some(message) = self.model.error.clone() {
            egui::Window::new("Export error")
                .collapsible(false)
                .resizable(false)
                .anchor(egui::Align2::CENTER_CENTER, egui::Vec2::ZERO)
                .show(ctx, |ui| {
                    ui.label(message);
                    ui.add_space(8.0);
                    if ui.button("OK").clicked() {
                        self.inbox.push(Msg::DismissError);
                    }
                });
        }
    }

    /// Render latest status message when present.
    fn render_status(&self, ui: &mut egui::Ui) {
        if let Some(text) = &self.model.status {
            let display = if self.model.pending_commands > 0 {
                format!("{}  ({} working…)", text, self.model.pending_commands)
            } else {
                text.to_string()
            };
            ui.horizontal(|ui| {
                ui.label(egui::RichText::new(display).color(egui::Color32::from_gray(68)));
                if self.model.pending_commands > 0 {
                    ui.add(egui::Spinner::new().size(14.0)).on_hover_text(format!(
                        "{} task(s) running in background",
                        self.model.pending_commands
                    ));
                }
            });
        }
    }
}
