//! Response schemas of the prediction service and their normalized display form.

use serde::Deserialize;
use serde::de::{Deserializer, Error as _};

/// Message shown for every failed prediction attempt.
pub const FAILURE_MESSAGE: &str = "Prediction failed";

/// Classification shown in the result view.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PredictionStatus {
    Positive,
    Negative,
    Error,
}

impl PredictionStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Positive => "positive",
            Self::Negative => "negative",
            Self::Error => "error",
        }
    }

    /// Heading for the result modal.
    pub fn title(self) -> &'static str {
        match self {
            Self::Positive => "✓ Exoplanet Detected",
            Self::Negative => "✗ No Exoplanet Detected",
            Self::Error => "⌀ Error",
        }
    }
}

/// Uniform result consumed by the presentation layer, whatever endpoint produced it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PredictionResult {
    pub status: PredictionStatus,
    pub message: String,
    pub details: String,
    pub processed: u64,
    pub exoplanets_found: u64,
}

impl PredictionResult {
    /// Result for any failed attempt; `details` carries the error text.
    pub fn failure(details: impl Into<String>) -> Self {
        Self {
            status: PredictionStatus::Error,
            message: FAILURE_MESSAGE.to_string(),
            details: details.into(),
            processed: 0,
            exoplanets_found: 0,
        }
    }

    pub fn is_error(&self) -> bool {
        self.status == PredictionStatus::Error
    }
}

/// Body returned by `/predict`.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct SinglePredictionResponse {
    pub status: PredictionStatus,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub message: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub details: String,
    #[serde(default, deserialize_with = "lenient_count")]
    pub processed: Option<u64>,
}

/// Body returned by `/predict_csv_stats`.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(try_from = "CsvStatsWire")]
pub enum CsvStatsResponse {
    Success {
        message: String,
        details: String,
        total_processed: u64,
        candidates_found: u64,
    },
    /// Any per-verdict body the stats endpoint may fall back to.
    Verdict(SinglePredictionResponse),
}

#[derive(Deserialize)]
struct CsvStatsWire {
    status: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    message: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    details: String,
    #[serde(default, rename = "totalProcessed", deserialize_with = "lenient_count")]
    total_processed: Option<u64>,
    #[serde(default, rename = "candidatesFound", deserialize_with = "lenient_count")]
    candidates_found: Option<u64>,
    #[serde(default, deserialize_with = "lenient_count")]
    processed: Option<u64>,
}

/// Text fields may be `null`; treat that like a missing key.
fn null_as_empty<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// Counts may arrive as `null`, integers or whole floats such as `120.0`.
fn lenient_count<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<u64>, D::Error> {
    let Some(number) = Option::<serde_json::Number>::deserialize(deserializer)? else {
        return Ok(None);
    };
    whole_count(&number)
        .map(Some)
        .ok_or_else(|| D::Error::custom(format!("expected a non-negative whole count, got {number}")))
}

fn whole_count(number: &serde_json::Number) -> Option<u64> {
    if let Some(count) = number.as_u64() {
        return Some(count);
    }
    let value = number.as_f64()?;
    let whole = value.is_finite() && value >= 0.0 && value.fract() == 0.0 && value <= u64::MAX as f64;
    whole.then_some(value as u64)
}

impl TryFrom<CsvStatsWire> for CsvStatsResponse {
    type Error = String;

    fn try_from(wire: CsvStatsWire) -> Result<Self, Self::Error> {
        let status = match wire.status.as_str() {
            "success" => {
                let (Some(total_processed), Some(candidates_found)) =
                    (wire.total_processed, wire.candidates_found)
                else {
                    return Err("stats response missing totalProcessed/candidatesFound".into());
                };
                return Ok(Self::Success {
                    message: wire.message,
                    details: wire.details,
                    total_processed,
                    candidates_found,
                });
            }
            "positive" => PredictionStatus::Positive,
            "negative" => PredictionStatus::Negative,
            "error" => PredictionStatus::Error,
            other => return Err(format!("unexpected status `{other}`")),
        };
        Ok(Self::Verdict(SinglePredictionResponse {
            status,
            message: wire.message,
            details: wire.details,
            processed: wire.processed,
        }))
    }
}

/// Parsed body of a successful prediction request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PredictionResponse {
    Single(SinglePredictionResponse),
    CsvStats(CsvStatsResponse),
}

impl PredictionResponse {
    /// Reshape either response schema into the single display model.
    pub fn normalize(self) -> PredictionResult {
        match self {
            Self::Single(single) => normalize_verdict(single),
            Self::CsvStats(CsvStatsResponse::Success {
                message,
                details,
                total_processed,
                candidates_found,
            }) => PredictionResult {
                status: PredictionStatus::Positive,
                message,
                details,
                processed: total_processed,
                exoplanets_found: candidates_found,
            },
            Self::CsvStats(CsvStatsResponse::Verdict(single)) => normalize_verdict(single),
        }
    }
}

fn normalize_verdict(response: SinglePredictionResponse) -> PredictionResult {
    let exoplanets_found = u64::from(response.status == PredictionStatus::Positive);
    PredictionResult {
        status: response.status,
        message: response.message,
        details: response.details,
        processed: response.processed.filter(|count| *count != 0).unwrap_or(1),
        exoplanets_found,
    }
}
