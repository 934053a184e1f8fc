//! Prediction requests against the remote exoplanet classifier.

pub mod api;
pub mod export;
pub mod features;
pub mod input;
mod multipart;
pub mod orchestrator;
pub mod result;

pub use api::{HttpPredictionApi, PredictionApi, PredictionError};
pub use export::{EXPORT_FILE_NAME, ExportError};
pub use features::{FEATURE_COUNT, FEATURE_NAMES, FeatureVector};
pub use input::{CsvUpload, InputState};
pub use orchestrator::{ExportJob, PredictionJob, PredictionOrchestrator, SubmitRejected};
pub use result::{PredictionResponse, PredictionResult, PredictionStatus};
