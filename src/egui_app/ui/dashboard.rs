use super::EguiApp;
use super::style;
use crate::prediction::FEATURE_NAMES;
use crate::prediction::features::{feature_label, feature_placeholder};
use eframe::egui::{self, CornerRadius, Frame, Key, Margin, RichText, Stroke};

const FIELD_WIDTH: f32 = 260.0;

impl EguiApp {
    pub(super) fn render_dashboard(&mut self, ctx: &egui::Context) {
        let palette = style::palette();
        egui::CentralPanel::default()
            .frame(Frame::new().fill(palette.bg_space).inner_margin(Margin::same(24)))
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    if ui.button(RichText::new("← Back").color(palette.text_primary)).clicked() {
                        self.controller.open_landing();
                    }
                    ui.add_space(12.0);
                    ui.label(
                        RichText::new("Exoplanet Prediction")
                            .size(28.0)
                            .strong()
                            .color(palette.text_primary),
                    );
                });
                ui.add_space(16.0);
                egui::ScrollArea::vertical()
                    .id_salt("dashboard_scroll")
                    .show(ui, |ui| {
                        self.render_manual_fields(ui);
                        ui.add_space(24.0);
                        self.render_csv_upload(ui);
                        ui.add_space(24.0);
                        self.render_actions(ui);
                    });
            });
    }

    fn render_manual_fields(&mut self, ui: &mut egui::Ui) {
        let palette = style::palette();
        ui.label(
            RichText::new("Manual Input")
                .size(20.0)
                .strong()
                .color(palette.accent_cyan),
        );
        ui.add_space(8.0);
        let locked = self.controller.orchestrator().input().file().is_some();
        if locked {
            ui.label(
                RichText::new("A CSV file is selected; manual values are ignored until it is cleared.")
                    .color(palette.text_muted),
            );
        }
        egui::Grid::new("koi_fields")
            .num_columns(4)
            .spacing([16.0, 10.0])
            .show(ui, |ui| {
                for (index, name) in FEATURE_NAMES.iter().enumerate() {
                    ui.label(RichText::new(feature_label(name)).color(palette.text_primary));
                    self.render_manual_field(ui, index, name);
                    if index % 2 == 1 {
                        ui.end_row();
                    }
                }
            });
    }

    fn render_manual_field(&mut self, ui: &mut egui::Ui, index: usize, name: &str) {
        let wants_focus = self.controller.ui.dashboard.focus_field == Some(index);
        let Some(value) = self.controller.manual_field_mut(index) else {
            return;
        };
        let response = ui.add(
            egui::TextEdit::singleline(value)
                .hint_text(feature_placeholder(name))
                .desired_width(FIELD_WIDTH),
        );
        if wants_focus {
            response.request_focus();
            self.controller.ui.dashboard.focus_field = None;
        }
        if response.lost_focus() && ui.input(|i| i.key_pressed(Key::Enter)) {
            self.controller.focus_next_field(index);
        }
    }

    fn render_csv_upload(&mut self, ui: &mut egui::Ui) {
        let palette = style::palette();
        ui.label(
            RichText::new("Bulk CSV Upload")
                .size(20.0)
                .strong()
                .color(palette.accent_cyan),
        );
        ui.add_space(8.0);
        let hovered = self.controller.ui.dashboard.drop_hovered;
        let stroke = if hovered {
            Stroke::new(2.0, palette.accent_pink)
        } else {
            style::glass_border()
        };
        Frame::new()
            .fill(palette.bg_glass)
            .stroke(stroke)
            .corner_radius(CornerRadius::same(16))
            .inner_margin(Margin::same(20))
            .show(ui, |ui| {
                ui.set_min_width(ui.available_width());
                let selected = self
                    .controller
                    .orchestrator()
                    .input()
                    .file()
                    .map(|file| format!("{} ({} bytes)", file.file_name(), file.len()));
                match selected {
                    Some(label) => {
                        ui.label(RichText::new(label).color(palette.text_primary));
                    }
                    None => {
                        ui.label(
                            RichText::new("Drag & drop a .csv file here")
                                .color(palette.text_muted),
                        );
                    }
                }
                ui.add_space(8.0);
                if ui.button("Choose File").clicked() {
                    self.controller.choose_csv_via_dialog();
                }
            });
    }

    fn render_actions(&mut self, ui: &mut egui::Ui) {
        let palette = style::palette();
        let enabled = self.controller.orchestrator().submit_enabled();
        let label = if self.controller.orchestrator().is_loading() {
            "ANALYZING..."
        } else {
            "RUN PREDICTION"
        };
        ui.horizontal(|ui| {
            let run = egui::Button::new(
                RichText::new(label)
                    .size(18.0)
                    .strong()
                    .color(palette.text_primary),
            )
            .fill(style::cta_fill(enabled))
            .corner_radius(CornerRadius::same(24))
            .min_size(egui::vec2(220.0, 44.0));
            if ui.add_enabled(enabled, run).clicked() {
                self.controller.run_prediction();
            }
            ui.add_space(12.0);
            let clear = egui::Button::new(RichText::new("Clear").color(palette.text_primary))
                .min_size(egui::vec2(120.0, 44.0));
            if ui.add_enabled(!self.controller.is_busy(), clear).clicked() {
                self.controller.clear_all();
            }
        });
    }
}
