use eframe::egui::{
    Color32, Stroke, Visuals,
    epaint::{CornerRadius, Shadow},
    style::WidgetVisuals,
};

use crate::prediction::PredictionStatus;

#[derive(Clone, Copy)]
pub struct Palette {
    pub bg_space: Color32,
    pub bg_glass: Color32,
    pub bg_field: Color32,
    pub glass_outline: Color32,
    pub text_primary: Color32,
    pub text_muted: Color32,
    pub accent_violet: Color32,
    pub accent_pink: Color32,
    pub accent_cyan: Color32,
    pub danger: Color32,
    pub disabled: Color32,
}

pub fn palette() -> Palette {
    Palette {
        bg_space: Color32::from_rgb(5, 5, 20),
        bg_glass: Color32::from_rgb(22, 18, 44),
        bg_field: Color32::from_rgb(34, 30, 60),
        glass_outline: Color32::from_rgb(110, 72, 150),
        text_primary: Color32::from_rgb(236, 232, 248),
        text_muted: Color32::from_rgb(168, 160, 190),
        accent_violet: Color32::from_rgb(187, 110, 251),
        accent_pink: Color32::from_rgb(255, 142, 223),
        accent_cyan: Color32::from_rgb(34, 211, 238),
        danger: Color32::from_rgb(252, 129, 129),
        disabled: Color32::from_rgb(90, 90, 100),
    }
}

pub fn apply_visuals(visuals: &mut Visuals) {
    let palette = palette();
    visuals.window_fill = palette.bg_glass;
    visuals.panel_fill = palette.bg_space;
    visuals.override_text_color = Some(palette.text_primary);
    visuals.hyperlink_color = palette.accent_cyan;
    visuals.extreme_bg_color = palette.bg_field;
    visuals.faint_bg_color = palette.bg_glass;
    visuals.error_fg_color = palette.danger;
    visuals.warn_fg_color = palette.accent_pink;
    visuals.selection.bg_fill = palette.glass_outline;
    visuals.selection.stroke = Stroke::new(1.0, palette.accent_pink);
    visuals.widgets.noninteractive.bg_fill = palette.bg_glass;
    visuals.widgets.noninteractive.fg_stroke = Stroke::new(1.0, palette.text_primary);
    set_rounded(&mut visuals.widgets.inactive, palette);
    set_rounded(&mut visuals.widgets.hovered, palette);
    set_rounded(&mut visuals.widgets.active, palette);
    set_rounded(&mut visuals.widgets.open, palette);
    visuals.widgets.hovered.bg_stroke = Stroke::new(1.0, palette.accent_pink);
    visuals.window_corner_radius = CornerRadius::same(12);
    visuals.menu_corner_radius = CornerRadius::same(8);
    visuals.popup_shadow = Shadow::NONE;
    visuals.button_frame = true;
}

fn set_rounded(vis: &mut WidgetVisuals, palette: Palette) {
    vis.corner_radius = CornerRadius::same(8);
    vis.bg_fill = palette.bg_field;
    vis.weak_bg_fill = palette.bg_field;
    vis.bg_stroke = Stroke::new(1.0, palette.glass_outline);
    vis.fg_stroke = Stroke::new(1.0, palette.text_primary);
}

/// Border of the translucent content frames.
pub fn glass_border() -> Stroke {
    Stroke::new(2.0, palette().glass_outline)
}

/// Fill of the primary call-to-action buttons.
pub fn cta_fill(enabled: bool) -> Color32 {
    let palette = palette();
    if enabled {
        palette.accent_violet
    } else {
        palette.disabled
    }
}

/// Accent used for the result modal heading and border.
pub fn status_accent(status: PredictionStatus) -> Color32 {
    let palette = palette();
    match status {
        PredictionStatus::Positive => palette.accent_violet,
        PredictionStatus::Negative | PredictionStatus::Error => palette.danger,
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StatusTone {
    Idle,
    Busy,
    Info,
    Warning,
    Error,
}

impl StatusTone {
    pub fn label(self) -> &'static str {
        match self {
            Self::Idle => "Idle",
            Self::Busy => "Working",
            Self::Info => "Info",
            Self::Warning => "Warning",
            Self::Error => "Error",
        }
    }
}

pub fn status_badge_color(tone: StatusTone) -> Color32 {
    match tone {
        StatusTone::Idle => Color32::from_rgb(42, 42, 54),
        StatusTone::Busy => Color32::from_rgb(187, 110, 251),
        StatusTone::Info => Color32::from_rgb(64, 140, 112),
        StatusTone::Warning => Color32::from_rgb(192, 138, 43),
        StatusTone::Error => Color32::from_rgb(192, 57, 43),
    }
}
