use super::EguiApp;
use super::style;
use eframe::egui::{self, Align, CornerRadius, Frame, Layout, Margin, RichText};

const CREW: [&str; 4] = ["Hisana Saji", "Niya L R", "Binny Thomas", "Arya S Nair"];

const WORLDS_TITLE: &str = "Unveiling the Universe's Hidden Worlds";
const WORLDS_BODY: &str = "For millennia, humanity only knew the eight planets of our Solar \
System. Today, the census of the cosmos has exploded, with over 5,000 confirmed exoplanets: \
worlds orbiting stars other than our Sun. These celestial bodies have revealed a dizzying \
diversity far beyond our expectations. Astronomers have found \"Hot Jupiters\" (massive gas \
giants hugging their stars), \"Super-Earths\" and \"Mini-Neptunes\" (sizes absent from our own \
neighborhood), and \"Terrestrial\" rocky worlds.";

impl EguiApp {
    pub(super) fn render_landing(&mut self, ctx: &egui::Context) {
        let palette = style::palette();
        egui::CentralPanel::default()
            .frame(Frame::new().fill(palette.bg_space).inner_margin(Margin::same(24)))
            .show(ctx, |ui| {
                egui::ScrollArea::vertical()
                    .id_salt("landing_scroll")
                    .show(ui, |ui| {
                        ui.with_layout(Layout::top_down(Align::Center), |ui| {
                            self.render_hero(ui);
                            ui.add_space(48.0);
                            glass_section(ui, |ui| {
                                ui.label(
                                    RichText::new(WORLDS_TITLE)
                                        .size(30.0)
                                        .strong()
                                        .color(palette.text_primary),
                                );
                                ui.add_space(12.0);
                                ui.label(RichText::new(WORLDS_BODY).size(16.0).color(palette.text_muted));
                            });
                            ui.add_space(32.0);
                            glass_section(ui, |ui| {
                                ui.label(
                                    RichText::new("Meet the Crew: Architects of the Unknown")
                                        .size(30.0)
                                        .strong()
                                        .color(palette.text_primary),
                                );
                                ui.add_space(12.0);
                                for name in CREW {
                                    ui.label(RichText::new(name).size(20.0).color(palette.accent_pink));
                                }
                            });
                            ui.add_space(24.0);
                        });
                    });
            });
    }

    fn render_hero(&mut self, ui: &mut egui::Ui) {
        let palette = style::palette();
        ui.add_space(80.0);
        ui.label(
            RichText::new("THE UNKNOWN")
                .size(72.0)
                .strong()
                .color(palette.text_primary),
        );
        ui.add_space(12.0);
        ui.label(
            RichText::new("Classify Kepler Objects of Interest with a trained model")
                .size(18.0)
                .color(palette.text_muted),
        );
        ui.add_space(32.0);
        let button = egui::Button::new(
            RichText::new("Start Prediction Now")
                .size(20.0)
                .strong()
                .color(palette.text_primary),
        )
        .fill(style::cta_fill(true))
        .corner_radius(CornerRadius::same(24))
        .min_size(egui::vec2(260.0, 52.0));
        if ui.add(button).clicked() {
            self.controller.open_dashboard();
        }
    }
}

fn glass_section(ui: &mut egui::Ui, add_contents: impl FnOnce(&mut egui::Ui)) {
    let palette = style::palette();
    Frame::new()
        .fill(palette.bg_glass)
        .stroke(style::glass_border())
        .corner_radius(CornerRadius::same(32))
        .inner_margin(Margin::same(32))
        .show(ui, |ui| {
            ui.set_max_width(820.0);
            add_contents(ui);
        });
}
