//! Bridges the prediction orchestrator to the egui renderer.

mod jobs;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use rfd::FileDialog;

use self::jobs::{ControllerJobs, ExportJobResult, JobMessage, PredictionJobResult};
use crate::config::{AppSettings, ConfigError};
use crate::egui_app::state::{AppView, UiState};
use crate::egui_app::ui::style::{self, StatusTone};
use crate::prediction::{
    CsvUpload, FEATURE_COUNT, HttpPredictionApi, PredictionApi, PredictionOrchestrator,
    PredictionResult, PredictionStatus,
};

/// Alert text when the detailed export cannot be saved.
pub const DOWNLOAD_FAILED_ALERT: &str = "Failed to download CSV file";

/// Maintains app state and bridges the orchestrator to the egui UI.
pub struct EguiController {
    pub ui: UiState,
    orchestrator: PredictionOrchestrator,
    settings: AppSettings,
    jobs: ControllerJobs,
}

impl EguiController {
    pub fn new(api: Arc<dyn PredictionApi>, settings: AppSettings) -> Self {
        Self {
            ui: UiState::default(),
            orchestrator: PredictionOrchestrator::new(),
            settings,
            jobs: ControllerJobs::new(api),
        }
    }

    /// Build a controller that talks to the service named in `settings`.
    pub fn from_settings(settings: AppSettings) -> Result<Self, ConfigError> {
        let base_url = settings.base_url()?;
        let api = HttpPredictionApi::new(&base_url, settings.timeouts());
        tracing::info!("Prediction service at {}", api.base_url());
        Ok(Self::new(Arc::new(api), settings))
    }

    pub fn orchestrator(&self) -> &PredictionOrchestrator {
        &self.orchestrator
    }

    pub fn settings(&self) -> &AppSettings {
        &self.settings
    }

    pub(crate) fn set_repaint_context(&mut self, ctx: egui::Context) {
        self.jobs.set_repaint_context(ctx);
    }

    pub fn open_dashboard(&mut self) {
        self.ui.view = AppView::Dashboard;
        self.ui.dashboard.focus_field = Some(0);
    }

    pub fn open_landing(&mut self) {
        self.ui.view = AppView::Landing;
    }

    pub fn manual_field_mut(&mut self, index: usize) -> Option<&mut String> {
        self.orchestrator.manual_field_mut(index)
    }

    pub fn set_manual_field(&mut self, index: usize, value: impl Into<String>) {
        self.orchestrator.set_manual_field(index, value);
    }

    /// Move keyboard focus to the manual field after `index`, if any.
    pub fn focus_next_field(&mut self, index: usize) {
        let next = index + 1;
        if next < FEATURE_COUNT {
            self.ui.dashboard.focus_field = Some(next);
        }
    }

    pub fn choose_csv_via_dialog(&mut self) {
        let Some(path) = FileDialog::new()
            .set_title("Choose KOI CSV")
            .add_filter("CSV", &["csv"])
            .pick_file()
        else {
            return;
        };
        if let Err(err) = self.select_csv_path(&path) {
            self.set_status(err, StatusTone::Error);
        }
    }

    /// Select a CSV from disk; non-CSV names are ignored the way the drop zone ignores them.
    pub fn select_csv_path(&mut self, path: &Path) -> Result<bool, String> {
        let name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();
        if !CsvUpload::is_csv_name(&name) {
            self.set_status(format!("Ignored {name}: only .csv files are accepted"), StatusTone::Warning);
            return Ok(false);
        }
        let upload = CsvUpload::from_path(path)
            .map_err(|err| format!("Failed to read {}: {err}", path.display()))?;
        self.select_csv(upload);
        Ok(true)
    }

    pub fn select_csv(&mut self, upload: CsvUpload) {
        let status = format!("Selected {}", upload.file_name());
        self.orchestrator.select_file(upload);
        self.set_status(status, StatusTone::Info);
    }

    /// Handle files dropped onto the window; the first `.csv` wins.
    pub fn handle_dropped_paths(&mut self, paths: Vec<PathBuf>) {
        let Some(path) = paths.into_iter().find(|path| {
            path.file_name()
                .is_some_and(|name| CsvUpload::is_csv_name(&name.to_string_lossy()))
        }) else {
            self.set_status("Drop a .csv file to upload it", StatusTone::Warning);
            return;
        };
        if let Err(err) = self.select_csv_path(&path) {
            self.set_status(err, StatusTone::Error);
        }
    }

    pub fn clear_all(&mut self) {
        self.orchestrator.clear_all();
        self.ui.dashboard.focus_field = None;
        self.set_status("Inputs cleared", StatusTone::Idle);
    }

    pub fn run_prediction(&mut self) {
        match self.orchestrator.begin_submit() {
            Ok(job) => {
                self.set_status(format!("Analyzing {}…", job.describe()), StatusTone::Busy);
                self.jobs.begin_prediction(job);
            }
            Err(reason) => self.set_status(reason.to_string(), StatusTone::Warning),
        }
    }

    pub fn result_to_show(&self) -> Option<&PredictionResult> {
        if self.orchestrator.result_visible() {
            self.orchestrator.result()
        } else {
            None
        }
    }

    pub fn close_result(&mut self) {
        self.orchestrator.dismiss_result();
    }

    pub fn download_detailed_csv(&mut self) {
        let target_dir = match self.settings.resolved_download_dir() {
            Ok(dir) => dir,
            Err(err) => {
                tracing::error!("Download error: {err}");
                self.raise_alert(DOWNLOAD_FAILED_ALERT);
                return;
            }
        };
        match self.orchestrator.begin_export(&target_dir) {
            Ok(job) => {
                self.set_status("Downloading detailed CSV…", StatusTone::Busy);
                self.jobs.begin_export(job);
            }
            Err(reason) => self.set_status(reason.to_string(), StatusTone::Warning),
        }
    }

    /// Drain finished worker messages into the orchestrator.
    pub fn poll_background_jobs(&mut self) {
        while let Ok(message) = self.jobs.try_recv_message() {
            match message {
                JobMessage::PredictionFinished(message) => self.handle_prediction_finished(message),
                JobMessage::ExportFinished(message) => self.handle_export_finished(message),
            }
        }
    }

    /// Take the pending alert text, if any, for the renderer to display.
    pub fn take_alert(&mut self) -> Option<String> {
        self.ui.pending_alert.take()
    }

    pub fn is_busy(&self) -> bool {
        self.orchestrator.is_loading() || self.orchestrator.is_exporting()
    }

    pub fn set_status(&mut self, text: impl Into<String>, tone: StatusTone) {
        self.ui.status.text = text.into();
        self.ui.status.badge_label = tone.label().to_string();
        self.ui.status.badge_color = style::status_badge_color(tone);
    }

    fn handle_prediction_finished(&mut self, message: PredictionJobResult) {
        let result = self.orchestrator.finish_submit(message.result);
        let (text, tone) = match result.status {
            PredictionStatus::Error => (format!("Prediction failed: {}", result.details), StatusTone::Error),
            _ => (
                format!(
                    "Processed {} · exoplanets found {}",
                    result.processed, result.exoplanets_found
                ),
                StatusTone::Info,
            ),
        };
        self.set_status(text, tone);
    }

    fn handle_export_finished(&mut self, message: ExportJobResult) {
        self.orchestrator.finish_export(&message.result);
        match message.result {
            Ok(path) => self.set_status(format!("Saved {}", path.display()), StatusTone::Info),
            Err(err) => {
                self.set_status(format!("Download failed: {err}"), StatusTone::Error);
                self.raise_alert(DOWNLOAD_FAILED_ALERT);
            }
        }
    }

    fn raise_alert(&mut self, text: &str) {
        self.ui.pending_alert = Some(text.to_string());
    }
}
