// SPDX-License-Identifier: MIT

//! Root Model-View-Update kernel wiring gallery state, messages, and
//! commands.

use std::path::PathBuf;

use eframe::egui;

use crate::logic::admission;
use crate::logic::export::{self, write_archive};
use crate::logic::fetch::ImageFetcher;
use crate::models::gallery::{GalleryState, ImageEntry};
use crate::ui::components::admission_form::{
    self, AdmissionFormCommand, AdmissionFormModel, AdmissionFormMsg,
};
use crate::ui::components::gallery::{GalleryMsg, GalleryViewModel};

/// Top-level application state.
#[derive(Default)]
pub struct GalleryModel {
    /// Admission form state, including the single inline error slot.
    pub form: AdmissionFormModel,
    /// Ordered list of admitted entries.
    pub gallery: GalleryState,
    /// Thumbnail textures per entry handle.
    pub tiles: GalleryViewModel,
    /// Latest status message to display.
    pub status: Option<String>,
    /// Latest export-level error message to display in a modal.
    pub error: Option<String>,
    /// Count of queued background commands.
    pub pending_commands: usize,
}

/// Application messages routed through the update function.
// Debug omitted because TextureHandle is not Debug.
pub enum Msg {
    Form(AdmissionFormMsg),
    Gallery(GalleryMsg),
    /// Worker result: the loadability check passed and decoded a thumbnail.
    /// Transformed into [`Msg::EntryAdmitted`] by the UI shell, where the
    /// egui context needed for texture upload is available.
    AdmissionDecoded {
        name: String,
        url: String,
        image: egui::ColorImage,
    },
    /// Worker result: the loadability check failed.
    AdmissionRejected {
        name: String,
        url: String,
        cause: String,
    },
    /// UI shell turned the decoded thumbnail into a texture.
    EntryAdmitted {
        name: String,
        url: String,
        texture: egui::TextureHandle,
    },
    ExportRequested(PathBuf),
    ExportCancelled,
    ExportSettled(Result<ExportSummary, String>),
    DismissError,
}

/// Commands represent side effects executed between frames on the workers.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    ValidateImage {
        name: String,
        url: String,
    },
    ExportArchive {
        output: PathBuf,
        entries: Vec<ImageEntry>,
    },
}

/// What a finished export delivered.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExportSummary {
    pub output: PathBuf,
    pub packed: usize,
    pub failed: usize,
}

impl ExportSummary {
    fn status_line(&self) -> String {
        if self.failed > 0 {
            format!(
                "Archive saved: {} ({} image(s), {} failed to fetch)",
                self.output.display(),
                self.packed,
                self.failed
            )
        } else {
            format!(
                "Archive saved: {} ({} image(s))",
                self.output.display(),
                self.packed
            )
        }
    }
}

/// Update the application model and enqueue commands.
pub fn update(model: &mut GalleryModel, msg: Msg, cmds: &mut Vec<Command>) {
    match msg {
        Msg::Form(m) => {
            let mut form_cmds = Vec::new();
            admission_form::update(&mut model.form, m, &mut form_cmds);
            for c in form_cmds {
                match c {
                    AdmissionFormCommand::Validate { name, url } => {
                        cmds.push(Command::ValidateImage { name, url });
                        model.status = Some("Checking image…".to_string());
                    }
                }
            }
        }
        Msg::Gallery(GalleryMsg::Remove(id)) => {
            model.gallery.remove(id);
            model.tiles.forget(id);
        }
        Msg::AdmissionDecoded { name, url, image } => {
            // Texture creation must happen in the UI shell where the egui
            // context is available; this variant is transformed before it
            // reaches update. Keeping a no-op to avoid panic.
            let _ = (name, url, image);
        }
        Msg::AdmissionRejected { name, url, cause } => {
            tracing::warn!(url = %url, cause = %cause, "image admission rejected");
            let _ = name;
            model.form.rejected();
        }
        Msg::EntryAdmitted { name, url, texture } => {
            let id = model.gallery.append(name, url);
            model.tiles.insert_texture(id, texture);
            model.form.admitted();
            model.status = Some("Image added.".to_string());
        }
        Msg::ExportRequested(output) => {
            cmds.push(Command::ExportArchive {
                output,
                entries: model.gallery.snapshot(),
            });
            model.status = Some("Exporting gallery…".to_string());
        }
        Msg::ExportCancelled => model.status = Some("Export cancelled.".to_string()),
        Msg::ExportSettled(result) => match result {
            Ok(summary) => model.status = Some(summary.status_line()),
            Err(err) => {
                model.error = Some(format!("Failed to export gallery:\n\n{err}"));
                model.status = Some("Export failed.".to_string());
            }
        },
        Msg::DismissError => model.error = None,
    }
}

/// Execute a command on a worker thread and return the resulting message.
///
/// Async fetch work is driven to completion on the shared tokio runtime;
/// the worker blocks until the command settles.
pub fn run_command(cmd: Command, fetcher: &dyn ImageFetcher, rt: &tokio::runtime::Handle) -> Msg {
    match cmd {
        Command::ValidateImage { name, url } => {
            match rt.block_on(admission::validate_image(fetcher, &url)) {
                Ok(image) => Msg::AdmissionDecoded { name, url, image },
                Err(err) => Msg::AdmissionRejected {
                    name,
                    url,
                    cause: err.to_string(),
                },
            }
        }
        Command::ExportArchive { output, entries } => {
            let result = rt
                .block_on(export::export(fetcher, &entries))
                .and_then(|report| {
                    write_archive(&output, &report.archive)?;
                    Ok(ExportSummary {
                        output: output.clone(),
                        packed: report.packed,
                        failed: report.failed,
                    })
                });

            if let Err(err) = &result {
                tracing::error!(output = %output.display(), error = %err, "gallery export failed");
            }

            Msg::ExportSettled(result.map_err(|e| e.to_string()))
        }
    }
}
