#![deny(warnings)]

//! Entry point for the egui-based Exoscope UI.
#![cfg_attr(
    all(not(debug_assertions), target_os = "windows"),
    windows_subsystem = "windows"
)]
use eframe::egui;
use exoscope::config::{self, AppSettings};
use exoscope::egui_app::controller::EguiController;
use exoscope::egui_app::ui::EguiApp;
use exoscope::logging;

const MIN_VIEWPORT_SIZE: egui::Vec2 = egui::vec2(900.0, 640.0);

fn main() -> Result<(), Box<dyn std::error::Error>> {
    if let Err(err) = logging::init() {
        eprintln!("Logging disabled: {err}");
    }

    let settings = config::load_or_default().unwrap_or_else(|err| {
        tracing::warn!("Using default settings: {err}");
        AppSettings::default()
    });

    let viewport = egui::ViewportBuilder::default()
        .with_inner_size(egui::vec2(1200.0, 860.0))
        .with_min_inner_size(MIN_VIEWPORT_SIZE)
        .with_drag_and_drop(true);
    let native_options = eframe::NativeOptions {
        viewport,
        ..Default::default()
    };

    eframe::run_native(
        "Exoscope",
        native_options,
        Box::new(move |_cc| match EguiController::from_settings(settings) {
            Ok(controller) => Ok(Box::new(EguiApp::new(controller))),
            Err(err) => Ok(Box::new(LaunchError {
                message: err.to_string(),
            })),
        }),
    )?;
    Ok(())
}

/// Minimal fallback app to display initialization errors.
struct LaunchError {
    message: String,
}

impl eframe::App for LaunchError {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::CentralPanel::default().show(ctx, |ui| {
            ui.vertical_centered(|ui| {
                ui.heading("Failed to start UI");
                ui.label(&self.message);
            });
        });
    }
}
