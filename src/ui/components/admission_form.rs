// SPDX-License-Identifier: MIT

//! Admission form: name + URL inputs, submit wiring, and the single inline
//! error slot.

use eframe::egui;

use crate::logic::admission::AdmissionError;

/// MVU state for the admission form. The error slot holds at most one
/// message; each submission outcome supersedes it.
#[derive(Default)]
pub struct AdmissionFormModel {
    pub name: String,
    pub url: String,
    pub error: Option<AdmissionError>,
}

/// Messages emitted by the form view.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AdmissionFormMsg {
    NameChanged(String),
    UrlChanged(String),
    Submit,
}

/// Side-effectful commands mapped by the parent onto the worker queue.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AdmissionFormCommand {
    Validate { name: String, url: String },
}

impl AdmissionFormModel {
    /// A submission was admitted: clear both fields and the error slot.
    pub fn admitted(&mut self) {
        self.name.clear();
        self.url.clear();
        self.error = None;
    }

    /// A submission was rejected by the loadability check: keep the fields
    /// so the user can correct them, replace the error slot.
    pub fn rejected(&mut self) {
        self.error = Some(AdmissionError::InvalidImage);
    }
}

/// Apply a message to the form model, enqueueing validation when a
/// submission passes the local checks.
pub fn update(
    model: &mut AdmissionFormModel,
    msg: AdmissionFormMsg,
    cmds: &mut Vec<AdmissionFormCommand>,
) {
    match msg {
        AdmissionFormMsg::NameChanged(text) => model.name = text,
        AdmissionFormMsg::UrlChanged(text) => model.url = text,
        AdmissionFormMsg::Submit => {
            let name = model.name.trim().to_string();
            let url = model.url.trim().to_string();
            if url.is_empty() {
                // Rejected before any I/O; fields stay as typed.
                model.error = Some(AdmissionError::EmptyUrl);
                return;
            }
            cmds.push(AdmissionFormCommand::Validate { name, url });
        }
    }
}

/// Render the form and return any messages triggered by user interaction.
pub fn view(ui: &mut egui::Ui, model: &AdmissionFormModel) -> Vec<AdmissionFormMsg> {
    let mut msgs = Vec::new();

    egui::Frame::group(ui.style()).show(ui, |ui| {
        ui.set_width(ui.available_width());

        egui::Grid::new("admission_form_grid")
            .num_columns(2)
            .spacing(egui::vec2(8.0, 8.0))
            .min_col_width(90.0)
            .show(ui, |ui| {
                ui.label("Name");
                let mut name = model.name.clone();
                if ui
                    .add(
                        egui::TextEdit::singleline(&mut name)
                            .hint_text("Optional caption")
                            .desired_width(f32::INFINITY),
                    )
                    .changed()
                {
                    msgs.push(AdmissionFormMsg::NameChanged(name));
                }
                ui.end_row();

                ui.label("Image URL");
                let mut url = model.url.clone();
                let url_resp = ui.add(
                    egui::TextEdit::singleline(&mut url)
                        .hint_text("https://example.com/image.jpg")
                        .desired_width(f32::INFINITY),
                );
                if url_resp.changed() {
                    msgs.push(AdmissionFormMsg::UrlChanged(url));
                }
                if url_resp.lost_focus() && ui.input(|inp| inp.key_pressed(egui::Key::Enter)) {
                    msgs.push(AdmissionFormMsg::Submit);
                }
                ui.end_row();
            });

        ui.add_space(4.0);
        ui.horizontal(|ui| {
            if ui
                .add(egui::Button::new(format!(
                    "{} Add image",
                    egui_phosphor::regular::PLUS
                )))
                .clicked()
            {
                msgs.push(AdmissionFormMsg::Submit);
            }

            if let Some(error) = model.error {
                ui.label(
                    egui::RichText::new(error.to_string())
                        .color(egui::Color32::from_rgb(205, 60, 60)),
                );
            }
        });
    });

    msgs
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn submit_with_blank_url_sets_error_without_enqueueing() {
        let mut model = AdmissionFormModel {
            name: "pic".into(),
            url: "   ".into(),
            ..Default::default()
        };
        let mut cmds = Vec::new();

        update(&mut model, AdmissionFormMsg::Submit, &mut cmds);

        assert!(cmds.is_empty());
        assert_eq!(model.error, Some(AdmissionError::EmptyUrl));
        assert_eq!(model.name, "pic");
    }

    #[test]
    fn submit_trims_inputs_and_enqueues_validation() {
        let mut model = AdmissionFormModel {
            name: "  sunset  ".into(),
            url: " https://example.com/sunset.jpg ".into(),
            ..Default::default()
        };
        let mut cmds = Vec::new();

        update(&mut model, AdmissionFormMsg::Submit, &mut cmds);

        assert_eq!(
            cmds,
            vec![AdmissionFormCommand::Validate {
                name: "sunset".into(),
                url: "https://example.com/sunset.jpg".into(),
            }]
        );
        assert!(model.error.is_none());
    }

    #[test]
    fn rejection_keeps_fields_and_replaces_the_error_slot() {
        let mut model = AdmissionFormModel {
            name: "broken".into(),
            url: "https://example.com/broken".into(),
            error: Some(AdmissionError::EmptyUrl),
        };

        model.rejected();

        assert_eq!(model.error, Some(AdmissionError::InvalidImage));
        assert_eq!(model.name, "broken");
        assert_eq!(model.url, "https://example.com/broken");
    }

    #[test]
    fn admission_clears_fields_and_error() {
        let mut model = AdmissionFormModel {
            name: "ok".into(),
            url: "https://example.com/ok.png".into(),
            error: Some(AdmissionError::InvalidImage),
        };

        model.admitted();

        assert!(model.name.is_empty());
        assert!(model.url.is_empty());
        assert!(model.error.is_none());
    }
}
