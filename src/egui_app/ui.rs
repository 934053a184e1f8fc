//! egui renderer for the application UI.

mod dashboard;
mod landing;
mod result_modal;
pub mod style;

use crate::egui_app::controller::EguiController;
use crate::egui_app::state::AppView;
use eframe::egui::{self, Frame, Margin, RichText};
use rfd::{MessageButtons, MessageDialog, MessageLevel};

/// Renders the egui UI using the shared controller state.
pub struct EguiApp {
    controller: EguiController,
    visuals_set: bool,
}

impl EguiApp {
    pub fn new(controller: EguiController) -> Self {
        Self {
            controller,
            visuals_set: false,
        }
    }

    fn prepare_frame(&mut self, ctx: &egui::Context) {
        if self.visuals_set {
            return;
        }
        let mut visuals = egui::Visuals::dark();
        style::apply_visuals(&mut visuals);
        ctx.set_visuals(visuals);
        self.controller.set_repaint_context(ctx.clone());
        self.visuals_set = true;
    }

    fn handle_file_drops(&mut self, ctx: &egui::Context) {
        let (hovering, dropped) = ctx.input(|i| {
            (
                !i.raw.hovered_files.is_empty(),
                i.raw.dropped_files.clone(),
            )
        });
        self.controller.ui.dashboard.drop_hovered = hovering;
        if dropped.is_empty() || self.controller.ui.view != AppView::Dashboard {
            return;
        }
        let paths = dropped.into_iter().filter_map(|file| file.path).collect();
        self.controller.handle_dropped_paths(paths);
    }

    fn render_status(&mut self, ctx: &egui::Context) {
        let palette = style::palette();
        egui::TopBottomPanel::bottom("status_bar")
            .frame(
                Frame::new()
                    .fill(palette.bg_glass)
                    .inner_margin(Margin::symmetric(8, 4)),
            )
            .show(ctx, |ui| {
                let status = &self.controller.ui.status;
                ui.horizontal(|ui| {
                    ui.painter().circle_filled(
                        ui.cursor().min + egui::vec2(7.0, 9.0),
                        7.0,
                        status.badge_color,
                    );
                    ui.add_space(18.0);
                    ui.label(RichText::new(&status.badge_label).color(palette.text_primary));
                    ui.separator();
                    ui.label(RichText::new(&status.text).color(palette.text_muted));
                });
            });
    }

    fn show_pending_alert(&mut self) {
        let Some(text) = self.controller.take_alert() else {
            return;
        };
        if cfg!(test) {
            return;
        }
        let _ = MessageDialog::new()
            .set_level(MessageLevel::Error)
            .set_title("Exoscope")
            .set_description(text)
            .set_buttons(MessageButtons::Ok)
            .show();
    }
}

impl eframe::App for EguiApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.prepare_frame(ctx);
        self.controller.poll_background_jobs();
        self.handle_file_drops(ctx);
        self.render_status(ctx);
        match self.controller.ui.view {
            AppView::Landing => self.render_landing(ctx),
            AppView::Dashboard => self.render_dashboard(ctx),
        }
        self.render_result_modal(ctx);
        self.show_pending_alert();
    }
}
