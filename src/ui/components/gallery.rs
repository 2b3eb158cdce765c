// SPDX-License-Identifier: MIT

//! Gallery grid: one tile per admitted entry with its thumbnail and a
//! per-instance remove control.

use std::collections::HashMap;

use eframe::egui;

use crate::models::gallery::{EntryId, ImageEntry};

/// Largest rendered edge of a gallery tile thumbnail.
const TILE_MAX: f32 = 160.0;

/// View-side state for the gallery: the thumbnail texture per entry handle.
/// The entry list itself lives in [`crate::models::gallery::GalleryState`].
#[derive(Default)]
pub struct GalleryViewModel {
    textures: HashMap<EntryId, egui::TextureHandle>,
}

/// Messages emitted by the gallery view.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GalleryMsg {
    Remove(EntryId),
}

impl GalleryViewModel {
    /// Attach the thumbnail texture produced during admission.
    pub fn insert_texture(&mut self, id: EntryId, texture: egui::TextureHandle) {
        self.textures.insert(id, texture);
    }

    /// Drop the texture of a removed entry.
    pub fn forget(&mut self, id: EntryId) {
        self.textures.remove(&id);
    }
}

/// Render the gallery grid and return any messages triggered by user
/// interaction.
pub fn view(
    ui: &mut egui::Ui,
    model: &GalleryViewModel,
    entries: &[ImageEntry],
) -> Vec<GalleryMsg> {
    let mut msgs = Vec::new();

    if entries.is_empty() {
        ui.label(
            egui::RichText::new("No images yet. Add one by URL above.")
                .italics()
                .color(egui::Color32::from_gray(130)),
        );
        return msgs;
    }

    let available = ui.available_width();
    let cols = (available / (TILE_MAX + 24.0)).floor().max(1.0) as usize;

    egui::Grid::new("gallery_grid")
        .num_columns(cols)
        .spacing(egui::vec2(10.0, 10.0))
        .show(ui, |ui| {
            for (i, entry) in entries.iter().enumerate() {
                render_tile(ui, model, entry, &mut msgs);
                if (i + 1) % cols == 0 {
                    ui.end_row();
                }
            }
        });

    msgs
}

fn render_tile(
    ui: &mut egui::Ui,
    model: &GalleryViewModel,
    entry: &ImageEntry,
    msgs: &mut Vec<GalleryMsg>,
) {
    ui.group(|ui| {
        ui.vertical(|ui| {
            ui.horizontal(|ui| {
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if ui
                        .button(egui::RichText::new(egui_phosphor::regular::X))
                        .on_hover_text("Remove image")
                        .clicked()
                    {
                        msgs.push(GalleryMsg::Remove(entry.id));
                    }
                });
            });

            if let Some(texture) = model.textures.get(&entry.id) {
                let size = texture.size_vec2();
                let scale = (TILE_MAX / size.x).min(TILE_MAX / size.y).min(1.0);
                ui.add(egui::Image::new((texture.id(), size * scale)))
                    .on_hover_text(&entry.source_url);
            } else {
                ui.allocate_space(egui::vec2(TILE_MAX, TILE_MAX * 0.75));
            }

            if entry.display_name.is_empty() {
                ui.label(
                    egui::RichText::new("unnamed")
                        .italics()
                        .small()
                        .color(egui::Color32::from_gray(130)),
                );
            } else {
                ui.label(egui::RichText::new(&entry.display_name).small());
            }
        });
    });
}
