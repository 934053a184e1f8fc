//! Client for the remote prediction service.

use std::io::Write;

use serde::de::DeserializeOwned;
use url::Url;

use super::features::FeatureVector;
use super::input::CsvUpload;
use super::multipart::MultipartBody;
use super::result::{CsvStatsResponse, SinglePredictionResponse};
use crate::http_client::{self, Timeouts};

pub const PREDICT_PATH: &str = "/predict";
pub const CSV_STATS_PATH: &str = "/predict_csv_stats";
pub const CSV_EXPORT_PATH: &str = "/predict_csv";
/// Form field that carries the uploaded CSV.
pub const UPLOAD_FIELD: &str = "file";

const CSV_CONTENT_TYPE: &str = "text/csv";
const MAX_JSON_RESPONSE_BYTES: usize = 1024 * 1024;
const MAX_ERROR_BODY_BYTES: usize = 64 * 1024;
const MAX_EXPORT_BYTES: usize = 512 * 1024 * 1024;

/// Failure of a single request/response cycle.
#[derive(Debug, thiserror::Error)]
pub enum PredictionError {
    /// The service answered with a non-success status.
    #[error("HTTP {status}: {body}")]
    Request { status: u16, body: String },
    #[error("Network error: {0}")]
    Transport(String),
    #[error("Invalid response: {0}")]
    Json(String),
    #[error("Failed to transfer response: {0}")]
    Io(#[from] std::io::Error),
}

/// The three operations the prediction service offers.
pub trait PredictionApi: Send + Sync {
    /// Classify one manually entered feature vector.
    fn predict(&self, features: &FeatureVector) -> Result<SinglePredictionResponse, PredictionError>;

    /// Aggregate candidate counts over every row of an uploaded CSV.
    fn predict_csv_stats(&self, upload: &CsvUpload) -> Result<CsvStatsResponse, PredictionError>;

    /// Re-process an uploaded CSV and stream the annotated CSV into `sink`.
    fn export_csv(&self, upload: &CsvUpload, sink: &mut dyn Write) -> Result<u64, PredictionError>;
}

/// `PredictionApi` over plain HTTP using a blocking ureq agent.
#[derive(Clone, Debug)]
pub struct HttpPredictionApi {
    agent: ureq::Agent,
    base_url: String,
}

impl HttpPredictionApi {
    pub fn new(base_url: &Url, timeouts: Timeouts) -> Self {
        Self {
            agent: http_client::build_agent(timeouts),
            base_url: base_url.as_str().trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    fn post_file(&self, path: &str, upload: &CsvUpload) -> Result<ureq::Response, PredictionError> {
        let url = self.endpoint(path);
        let body = MultipartBody::single_file(
            UPLOAD_FIELD,
            upload.file_name(),
            CSV_CONTENT_TYPE,
            upload.bytes(),
        );
        tracing::debug!(
            "POST {url} with {} ({} bytes)",
            upload.file_name(),
            upload.len()
        );
        let response = self
            .agent
            .post(&url)
            .set("Content-Type", &body.content_type())
            .send_bytes(body.as_bytes());
        settle(response)
    }
}

impl PredictionApi for HttpPredictionApi {
    fn predict(&self, features: &FeatureVector) -> Result<SinglePredictionResponse, PredictionError> {
        let url = self.endpoint(PREDICT_PATH);
        tracing::debug!("POST {url}");
        let response = self
            .agent
            .post(&url)
            .set("Accept", "application/json")
            .set("Content-Type", "application/json")
            .send_json(features);
        parse_json(settle(response)?)
    }

    fn predict_csv_stats(&self, upload: &CsvUpload) -> Result<CsvStatsResponse, PredictionError> {
        parse_json(self.post_file(CSV_STATS_PATH, upload)?)
    }

    fn export_csv(&self, upload: &CsvUpload, sink: &mut dyn Write) -> Result<u64, PredictionError> {
        let response = self.post_file(CSV_EXPORT_PATH, upload)?;
        let written = http_client::copy_response_to_writer(response, sink, MAX_EXPORT_BYTES)?;
        Ok(written)
    }
}

fn settle(result: Result<ureq::Response, ureq::Error>) -> Result<ureq::Response, PredictionError> {
    match result {
        Ok(response) => Ok(response),
        Err(ureq::Error::Status(status, response)) => {
            let phrase = response.status_text().to_string();
            let body = read_body_limited(response, MAX_ERROR_BODY_BYTES).unwrap_or_default();
            let body = if body.is_empty() { phrase } else { body };
            tracing::warn!("Prediction service returned HTTP {status}");
            Err(PredictionError::Request { status, body })
        }
        Err(ureq::Error::Transport(err)) => Err(PredictionError::Transport(err.to_string())),
    }
}

fn parse_json<T: DeserializeOwned>(response: ureq::Response) -> Result<T, PredictionError> {
    let bytes = http_client::read_response_bytes(response, MAX_JSON_RESPONSE_BYTES)?;
    serde_json::from_slice(&bytes).map_err(|err| PredictionError::Json(err.to_string()))
}

fn read_body_limited(response: ureq::Response, max_bytes: usize) -> Result<String, String> {
    let bytes =
        http_client::read_response_bytes(response, max_bytes).map_err(|err| err.to_string())?;
    String::from_utf8(bytes).map_err(|err| err.to_string())
}
