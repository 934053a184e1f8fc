//! Shared state types for the egui UI.

use crate::egui_app::ui::style::{self, StatusTone};
use egui::Color32;

/// Top-level UI model consumed by the egui renderer.
#[derive(Clone, Debug)]
pub struct UiState {
    pub view: AppView,
    pub status: StatusBarState,
    pub dashboard: DashboardUiState,
    /// Message for a blocking alert dialog, shown once then cleared.
    pub pending_alert: Option<String>,
}

impl Default for UiState {
    fn default() -> Self {
        Self {
            view: AppView::Landing,
            status: StatusBarState::idle(),
            dashboard: DashboardUiState::default(),
            pending_alert: None,
        }
    }
}

/// Which page is on screen.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum AppView {
    #[default]
    Landing,
    Dashboard,
}

/// Status badge + text shown in the footer.
#[derive(Clone, Debug, PartialEq)]
pub struct StatusBarState {
    pub text: String,
    pub badge_label: String,
    pub badge_color: Color32,
}

impl StatusBarState {
    pub fn idle() -> Self {
        Self {
            text: "Enter KOI values or choose a CSV file".into(),
            badge_label: "Idle".into(),
            badge_color: style::status_badge_color(StatusTone::Idle),
        }
    }
}

/// Transient widget state for the dashboard page.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DashboardUiState {
    /// Manual field that should take keyboard focus on the next frame.
    pub focus_field: Option<usize>,
    /// True while files are dragged over the window.
    pub drop_hovered: bool,
}
