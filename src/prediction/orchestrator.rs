//! Input/result state machine behind the dashboard.
//!
//! The orchestrator owns the current input, the last normalized result and
//! the loading flag. Network work is split out into [`PredictionJob`] and
//! [`ExportJob`] values so the UI can run them on a worker thread and feed
//! the outcome back through [`PredictionOrchestrator::finish_submit`] and
//! [`PredictionOrchestrator::finish_export`].

use std::path::{Path, PathBuf};

use super::api::{PredictionApi, PredictionError};
use super::export::{self, ExportError};
use super::features::{FEATURE_COUNT, FeatureVector};
use super::input::{CsvUpload, InputState};
use super::result::{PredictionResponse, PredictionResult};

/// Why a submission or export could not start.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum SubmitRejected {
    #[error("Enter at least one value or choose a CSV file")]
    NothingToSubmit,
    #[error("A request is already in progress")]
    InFlight,
    #[error("No CSV result to export")]
    NoCsvResult,
}

/// One outbound prediction request, detached from the orchestrator state.
#[derive(Clone, Debug, PartialEq)]
pub enum PredictionJob {
    Single(FeatureVector),
    CsvStats(CsvUpload),
}

impl PredictionJob {
    pub fn run(&self, api: &dyn PredictionApi) -> Result<PredictionResponse, PredictionError> {
        match self {
            Self::Single(features) => api.predict(features).map(PredictionResponse::Single),
            Self::CsvStats(upload) => api
                .predict_csv_stats(upload)
                .map(PredictionResponse::CsvStats),
        }
    }

    pub fn describe(&self) -> String {
        match self {
            Self::Single(_) => "manual features".to_string(),
            Self::CsvStats(upload) => format!("CSV {}", upload.file_name()),
        }
    }
}

/// Detailed CSV export request for the file behind the current result.
#[derive(Clone, Debug, PartialEq)]
pub struct ExportJob {
    pub upload: CsvUpload,
    pub target_dir: PathBuf,
}

impl ExportJob {
    pub fn run(&self, api: &dyn PredictionApi) -> Result<PathBuf, ExportError> {
        export::save_detailed_export(api, &self.upload, &self.target_dir)
    }
}

#[derive(Debug, Default)]
pub struct PredictionOrchestrator {
    input: InputState,
    result: Option<PredictionResult>,
    /// File behind the pending or current result; `None` for manual submissions.
    analyzed_file: Option<CsvUpload>,
    loading: bool,
    exporting: bool,
    show_result: bool,
}

impl PredictionOrchestrator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn input(&self) -> &InputState {
        &self.input
    }

    pub fn result(&self) -> Option<&PredictionResult> {
        self.result.as_ref()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn is_exporting(&self) -> bool {
        self.exporting
    }

    /// Whether the result view should currently be presented.
    pub fn result_visible(&self) -> bool {
        self.show_result && self.result.is_some()
    }

    pub fn dismiss_result(&mut self) {
        self.show_result = false;
    }

    /// Switch to file mode; any previous result no longer applies.
    pub fn select_file(&mut self, file: CsvUpload) {
        tracing::info!("Selected {} ({} bytes)", file.file_name(), file.len());
        self.input.set_file(file);
        self.result = None;
        self.analyzed_file = None;
        self.show_result = false;
    }

    pub fn set_manual_field(&mut self, index: usize, value: impl Into<String>) {
        if !self.input.set_manual_field(index, value) {
            tracing::warn!("Ignoring manual field {index}; only {FEATURE_COUNT} exist");
        }
    }

    /// Text-edit binding for one manual slot.
    pub fn manual_field_mut(&mut self, index: usize) -> Option<&mut String> {
        self.input.manual_field_mut(index)
    }

    pub fn clear_all(&mut self) {
        self.input.clear();
        self.result = None;
        self.analyzed_file = None;
        self.show_result = false;
    }

    pub fn can_submit(&self) -> bool {
        self.input.can_submit()
    }

    /// Whether the submit control should accept a click right now.
    pub fn submit_enabled(&self) -> bool {
        self.can_submit() && !self.loading
    }

    /// Snapshot the input into a job and mark the orchestrator as loading.
    ///
    /// The previous result is discarded immediately. A second call before
    /// [`finish_submit`](Self::finish_submit) is rejected.
    pub fn begin_submit(&mut self) -> Result<PredictionJob, SubmitRejected> {
        if self.loading {
            return Err(SubmitRejected::InFlight);
        }
        if !self.can_submit() {
            return Err(SubmitRejected::NothingToSubmit);
        }
        let job = match self.input.file() {
            Some(file) => PredictionJob::CsvStats(file.clone()),
            None => PredictionJob::Single(self.input.feature_vector()),
        };
        self.analyzed_file = match &job {
            PredictionJob::CsvStats(upload) => Some(upload.clone()),
            PredictionJob::Single(_) => None,
        };
        self.loading = true;
        self.result = None;
        self.show_result = false;
        tracing::info!("Submitting prediction for {}", job.describe());
        Ok(job)
    }

    /// Settle a submission: normalize or convert the failure, clear the
    /// loading flag and flag the result view for display.
    pub fn finish_submit(
        &mut self,
        outcome: Result<PredictionResponse, PredictionError>,
    ) -> &PredictionResult {
        let result = match outcome {
            Ok(response) => response.normalize(),
            Err(err) => {
                tracing::error!("Prediction error: {err}");
                PredictionResult::failure(err.to_string())
            }
        };
        tracing::info!(
            "Prediction settled: {} (processed {}, found {})",
            result.status.as_str(),
            result.processed,
            result.exoplanets_found
        );
        self.loading = false;
        self.show_result = true;
        self.result.insert(result)
    }

    /// Run a whole submission on the calling thread.
    pub fn submit(&mut self, api: &dyn PredictionApi) -> Result<&PredictionResult, SubmitRejected> {
        let job = self.begin_submit()?;
        let outcome = job.run(api);
        Ok(self.finish_submit(outcome))
    }

    /// The detailed export is offered only for a successful result of the
    /// CSV that is still selected.
    pub fn can_export(&self) -> bool {
        !self.loading
            && self.analyzed_file.is_some()
            && self.result.as_ref().is_some_and(|r| !r.is_error())
    }

    pub fn begin_export(&mut self, target_dir: &Path) -> Result<ExportJob, SubmitRejected> {
        if self.exporting {
            return Err(SubmitRejected::InFlight);
        }
        let (Some(upload), true) = (self.analyzed_file.as_ref(), self.can_export()) else {
            return Err(SubmitRejected::NoCsvResult);
        };
        self.exporting = true;
        tracing::info!("Requesting detailed export for {}", upload.file_name());
        Ok(ExportJob {
            upload: upload.clone(),
            target_dir: target_dir.to_path_buf(),
        })
    }

    pub fn finish_export(&mut self, outcome: &Result<PathBuf, ExportError>) {
        self.exporting = false;
        if let Err(err) = outcome {
            tracing::error!("Download error: {err}");
        }
    }

    /// Run a whole detailed export on the calling thread.
    pub fn download_detailed_csv(
        &mut self,
        api: &dyn PredictionApi,
        target_dir: &Path,
    ) -> Result<Result<PathBuf, ExportError>, SubmitRejected> {
        let job = self.begin_export(target_dir)?;
        let outcome = job.run(api);
        self.finish_export(&outcome);
        Ok(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prediction::features::FEATURE_NAMES;
    use crate::prediction::result::{CsvStatsResponse, PredictionStatus, SinglePredictionResponse};
    use std::io::Write;
    use std::sync::Mutex;

    #[derive(Default)]
    struct ScriptedApi {
        single: Option<SinglePredictionResponse>,
        stats: Option<CsvStatsResponse>,
        fail_status: Option<u16>,
        sent_features: Mutex<Vec<FeatureVector>>,
        sent_files: Mutex<Vec<String>>,
    }

    impl ScriptedApi {
        fn failure(&self) -> Option<PredictionError> {
            self.fail_status.map(|status| PredictionError::Request {
                status,
                body: "Internal Server Error".to_string(),
            })
        }
    }

    impl PredictionApi for ScriptedApi {
        fn predict(&self, features: &FeatureVector) -> Result<SinglePredictionResponse, PredictionError> {
            self.sent_features.lock().unwrap().push(*features);
            if let Some(err) = self.failure() {
                return Err(err);
            }
            self.single
                .clone()
                .ok_or_else(|| PredictionError::Json("no body".into()))
        }

        fn predict_csv_stats(&self, upload: &CsvUpload) -> Result<CsvStatsResponse, PredictionError> {
            self.sent_files
                .lock()
                .unwrap()
                .push(upload.file_name().to_string());
            if let Some(err) = self.failure() {
                return Err(err);
            }
            self.stats
                .clone()
                .ok_or_else(|| PredictionError::Json("no body".into()))
        }

        fn export_csv(&self, upload: &CsvUpload, sink: &mut dyn Write) -> Result<u64, PredictionError> {
            if let Some(err) = self.failure() {
                return Err(err);
            }
            sink.write_all(upload.bytes())?;
            Ok(upload.len() as u64)
        }
    }

    fn verdict(status: PredictionStatus) -> SinglePredictionResponse {
        SinglePredictionResponse {
            status,
            message: "verdict".into(),
            details: "details".into(),
            processed: None,
        }
    }

    fn csv() -> CsvUpload {
        CsvUpload::new("kepler.csv", b"koi_score\n0.9\n".to_vec())
    }

    #[test]
    fn cleared_orchestrator_cannot_submit() {
        let mut orchestrator = PredictionOrchestrator::new();
        orchestrator.set_manual_field(0, "1");
        orchestrator.select_file(csv());
        orchestrator.clear_all();
        assert!(!orchestrator.can_submit());
        assert!(orchestrator.result().is_none());
        assert_eq!(
            orchestrator.begin_submit(),
            Err(SubmitRejected::NothingToSubmit)
        );
    }

    #[test]
    fn manual_submit_sends_all_features_with_zero_defaults() {
        let api = ScriptedApi {
            single: Some(verdict(PredictionStatus::Negative)),
            ..Default::default()
        };
        let mut orchestrator = PredictionOrchestrator::new();
        orchestrator.set_manual_field(0, "0.87");
        orchestrator.set_manual_field(5, "not a number");
        orchestrator.set_manual_field(13, " 14.1 ");

        let result = orchestrator.submit(&api).unwrap().clone();
        assert_eq!(result.status, PredictionStatus::Negative);
        assert_eq!(result.processed, 1);
        assert_eq!(result.exoplanets_found, 0);

        let sent = api.sent_features.lock().unwrap();
        assert_eq!(sent.len(), 1);
        let json = serde_json::to_value(sent[0]).unwrap();
        let keys: Vec<&str> = json.as_object().unwrap().keys().map(String::as_str).collect();
        let mut expected = FEATURE_NAMES.to_vec();
        expected.sort_unstable();
        let mut keys_sorted = keys.clone();
        keys_sorted.sort_unstable();
        assert_eq!(keys_sorted, expected);
        assert_eq!(sent[0].get("koi_score"), Some(0.87));
        assert_eq!(sent[0].get("koi_period"), Some(0.0));
        assert_eq!(sent[0].get("koi_kepmag"), Some(14.1));
        assert!(api.sent_files.lock().unwrap().is_empty());
    }

    #[test]
    fn file_takes_precedence_over_manual_fields() {
        let api = ScriptedApi {
            stats: Some(CsvStatsResponse::Success {
                message: "Analysis complete".into(),
                details: "done".into(),
                total_processed: 120,
                candidates_found: 7,
            }),
            ..Default::default()
        };
        let mut orchestrator = PredictionOrchestrator::new();
        orchestrator.set_manual_field(2, "1");
        orchestrator.select_file(csv());
        let result = orchestrator.submit(&api).unwrap().clone();
        assert_eq!(result.status, PredictionStatus::Positive);
        assert_eq!(result.processed, 120);
        assert_eq!(result.exoplanets_found, 7);
        assert!(api.sent_features.lock().unwrap().is_empty());
        assert_eq!(*api.sent_files.lock().unwrap(), vec!["kepler.csv".to_string()]);
    }

    #[test]
    fn positive_verdict_counts_one_planet() {
        let api = ScriptedApi {
            single: Some(verdict(PredictionStatus::Positive)),
            ..Default::default()
        };
        let mut orchestrator = PredictionOrchestrator::new();
        orchestrator.set_manual_field(1, "0");
        let result = orchestrator.submit(&api).unwrap();
        assert_eq!(result.exoplanets_found, 1);
    }

    #[test]
    fn http_error_becomes_error_result_and_clears_loading() {
        let api = ScriptedApi {
            fail_status: Some(500),
            ..Default::default()
        };
        let mut orchestrator = PredictionOrchestrator::new();
        orchestrator.set_manual_field(0, "1");
        let result = orchestrator.submit(&api).unwrap().clone();
        assert_eq!(result.status, PredictionStatus::Error);
        assert_eq!(result.message, "Prediction failed");
        assert_eq!(result.details, "HTTP 500: Internal Server Error");
        assert_eq!((result.processed, result.exoplanets_found), (0, 0));
        assert!(!orchestrator.is_loading());
        assert!(orchestrator.result_visible());
    }

    #[test]
    fn loading_flag_spans_the_request() {
        let mut orchestrator = PredictionOrchestrator::new();
        orchestrator.set_manual_field(0, "1");
        let job = orchestrator.begin_submit().unwrap();
        assert!(orchestrator.is_loading());
        assert!(!orchestrator.submit_enabled());
        assert!(orchestrator.result().is_none());
        assert_eq!(orchestrator.begin_submit(), Err(SubmitRejected::InFlight));

        let api = ScriptedApi {
            single: Some(verdict(PredictionStatus::Negative)),
            ..Default::default()
        };
        let outcome = job.run(&api);
        orchestrator.finish_submit(outcome);
        assert!(!orchestrator.is_loading());
        assert!(orchestrator.submit_enabled());
    }

    #[test]
    fn selecting_a_file_clears_the_result() {
        let api = ScriptedApi {
            single: Some(verdict(PredictionStatus::Positive)),
            ..Default::default()
        };
        let mut orchestrator = PredictionOrchestrator::new();
        orchestrator.set_manual_field(0, "1");
        orchestrator.submit(&api).unwrap();
        assert!(orchestrator.result().is_some());
        orchestrator.select_file(csv());
        assert!(orchestrator.result().is_none());
        assert!(!orchestrator.result_visible());
    }

    #[test]
    fn dismissing_hides_but_keeps_result() {
        let api = ScriptedApi {
            single: Some(verdict(PredictionStatus::Negative)),
            ..Default::default()
        };
        let mut orchestrator = PredictionOrchestrator::new();
        orchestrator.set_manual_field(0, "1");
        orchestrator.submit(&api).unwrap();
        orchestrator.dismiss_result();
        assert!(!orchestrator.result_visible());
        assert!(orchestrator.result().is_some());
    }

    #[test]
    fn export_requires_successful_csv_result() {
        let dir = tempfile::tempdir().unwrap();
        let mut orchestrator = PredictionOrchestrator::new();
        orchestrator.select_file(csv());
        assert_eq!(
            orchestrator.begin_export(dir.path()),
            Err(SubmitRejected::NoCsvResult)
        );

        let failing = ScriptedApi {
            fail_status: Some(503),
            ..Default::default()
        };
        orchestrator.submit(&failing).unwrap();
        assert!(!orchestrator.can_export());
    }

    #[test]
    fn export_writes_file_and_resets_flag() {
        let dir = tempfile::tempdir().unwrap();
        let api = ScriptedApi {
            stats: Some(CsvStatsResponse::Success {
                message: String::new(),
                details: String::new(),
                total_processed: 1,
                candidates_found: 0,
            }),
            ..Default::default()
        };
        let mut orchestrator = PredictionOrchestrator::new();
        orchestrator.select_file(csv());
        orchestrator.submit(&api).unwrap();
        let saved = orchestrator
            .download_detailed_csv(&api, dir.path())
            .unwrap()
            .unwrap();
        assert_eq!(saved, dir.path().join(export::EXPORT_FILE_NAME));
        assert!(!orchestrator.is_exporting());
    }

    #[test]
    fn file_selected_during_manual_request_is_not_exportable() {
        let dir = tempfile::tempdir().unwrap();
        let api = ScriptedApi {
            single: Some(verdict(PredictionStatus::Positive)),
            ..Default::default()
        };
        let mut orchestrator = PredictionOrchestrator::new();
        orchestrator.set_manual_field(0, "0.9");
        let job = orchestrator.begin_submit().unwrap();
        orchestrator.select_file(csv());
        orchestrator.finish_submit(job.run(&api));

        assert_eq!(orchestrator.result().unwrap().status, PredictionStatus::Positive);
        assert!(!orchestrator.can_export());
        assert_eq!(
            orchestrator.begin_export(dir.path()),
            Err(SubmitRejected::NoCsvResult)
        );
    }

    #[test]
    fn replacing_the_file_mid_request_drops_the_export() {
        let api = ScriptedApi {
            stats: Some(CsvStatsResponse::Success {
                message: String::new(),
                details: String::new(),
                total_processed: 5,
                candidates_found: 1,
            }),
            ..Default::default()
        };
        let mut orchestrator = PredictionOrchestrator::new();
        orchestrator.select_file(csv());
        let job = orchestrator.begin_submit().unwrap();
        orchestrator.select_file(CsvUpload::new("other.csv", b"koi_score
0.1
".to_vec()));
        orchestrator.finish_submit(job.run(&api));
        assert!(!orchestrator.can_export());
    }

    #[test]
    fn export_uses_the_analyzed_file() {
        let dir = tempfile::tempdir().unwrap();
        let api = ScriptedApi {
            stats: Some(CsvStatsResponse::Success {
                message: String::new(),
                details: String::new(),
                total_processed: 2,
                candidates_found: 0,
            }),
            ..Default::default()
        };
        let mut orchestrator = PredictionOrchestrator::new();
        orchestrator.set_manual_field(4, "1");
        orchestrator.select_file(csv());
        orchestrator.submit(&api).unwrap();
        let job = orchestrator.begin_export(dir.path()).unwrap();
        assert_eq!(job.upload, csv());
    }

    #[test]
    fn overlapping_exports_are_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let api = ScriptedApi {
            stats: Some(CsvStatsResponse::Success {
                message: String::new(),
                details: String::new(),
                total_processed: 3,
                candidates_found: 1,
            }),
            ..Default::default()
        };
        let mut orchestrator = PredictionOrchestrator::new();
        orchestrator.select_file(csv());
        orchestrator.submit(&api).unwrap();
        let _job = orchestrator.begin_export(dir.path()).unwrap();
        assert_eq!(
            orchestrator.begin_export(dir.path()),
            Err(SubmitRejected::InFlight)
        );
    }
}
