use super::EguiApp;
use super::style;
use eframe::egui::{self, Align2, Color32, Id, Order, RichText};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum ModalAction {
    None,
    Download,
    Close,
}

impl EguiApp {
    /// Render the prediction result over a dimmed backdrop.
    pub(super) fn render_result_modal(&mut self, ctx: &egui::Context) {
        let Some(result) = self.controller.result_to_show().cloned() else {
            return;
        };
        if ctx.input(|i| i.key_pressed(egui::Key::Escape)) {
            self.controller.close_result();
            return;
        }
        modal_backdrop(ctx, Id::new("result_modal"));

        let palette = style::palette();
        let accent = style::status_accent(result.status);
        let can_export = self.controller.orchestrator().can_export();
        let exporting = self.controller.orchestrator().is_exporting();
        let mut open = true;
        let mut action = ModalAction::None;
        egui::Window::new(RichText::new(result.status.title()).color(accent).strong())
            .id(Id::new("result_modal_window"))
            .anchor(Align2::CENTER_CENTER, egui::vec2(0.0, 0.0))
            .order(Order::Tooltip)
            .collapsible(false)
            .resizable(false)
            .default_width(460.0)
            .open(&mut open)
            .show(ctx, |ui| {
                ui.set_min_width(420.0);
                ui.label(RichText::new(&result.message).size(18.0).color(palette.text_primary));
                if !result.details.is_empty() {
                    ui.add_space(6.0);
                    ui.label(RichText::new(&result.details).color(palette.text_muted));
                }
                if !result.is_error() {
                    ui.add_space(12.0);
                    egui::Grid::new("result_counts")
                        .num_columns(2)
                        .spacing([24.0, 6.0])
                        .show(ui, |ui| {
                            ui.label("Processed");
                            ui.label(RichText::new(result.processed.to_string()).strong());
                            ui.end_row();
                            ui.label("Exoplanets found");
                            ui.label(
                                RichText::new(result.exoplanets_found.to_string())
                                    .strong()
                                    .color(accent),
                            );
                            ui.end_row();
                        });
                    if can_export {
                        ui.add_space(12.0);
                        let label = if exporting {
                            "Downloading..."
                        } else {
                            "Download Detailed CSV Results"
                        };
                        if ui
                            .add_enabled(!exporting, egui::Button::new(label))
                            .clicked()
                        {
                            action = ModalAction::Download;
                        }
                    }
                }
                ui.add_space(12.0);
                if ui.button("Close").clicked() {
                    action = ModalAction::Close;
                }
            });

        if !open {
            action = ModalAction::Close;
        }
        match action {
            ModalAction::None => {}
            ModalAction::Download => self.controller.download_detailed_csv(),
            ModalAction::Close => self.controller.close_result(),
        }
    }
}

fn modal_backdrop(ctx: &egui::Context, id: Id) {
    let rect = ctx.viewport_rect();
    let painter = ctx.layer_painter(egui::LayerId::new(Order::Foreground, id.with("paint")));
    painter.rect_filled(rect, 0.0, Color32::from_rgba_premultiplied(0, 0, 0, 170));
    egui::Area::new(id.with("blocker"))
        .order(Order::Foreground)
        .fixed_pos(rect.min)
        .show(ctx, |ui| {
            ui.allocate_rect(rect, egui::Sense::click_and_drag());
        });
}
