//! Kepler Object of Interest feature names and lenient numeric coercion.

use serde::ser::{Serialize, SerializeMap, Serializer};

/// Number of KOI measurements submitted for a single prediction.
pub const FEATURE_COUNT: usize = 14;

/// Feature keys in the order the prediction service expects them.
pub const FEATURE_NAMES: [&str; FEATURE_COUNT] = [
    "koi_score",
    "koi_fpflag_nt",
    "koi_fpflag_ss",
    "koi_fpflag_co",
    "koi_fpflag_ec",
    "koi_period",
    "koi_duration",
    "koi_depth",
    "koi_prad",
    "koi_impact",
    "koi_steff",
    "koi_slogg",
    "koi_srad",
    "koi_kepmag",
];

/// Human label for a feature key, e.g. `koi_fpflag_nt` -> `KOI FPFLAG NT`.
pub fn feature_label(name: &str) -> String {
    name.replace('_', " ").to_uppercase()
}

/// Input placeholder for a feature key, e.g. `Enter koi period`.
pub fn feature_placeholder(name: &str) -> String {
    format!("Enter {}", name.replace('_', " "))
}

/// Fully coerced numeric features, serialized as a JSON object keyed by name.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FeatureVector {
    values: [f64; FEATURE_COUNT],
}

impl FeatureVector {
    /// Coerce raw text slots into numbers; anything unparsable becomes zero.
    pub fn from_raw<S: AsRef<str>>(raw: &[S; FEATURE_COUNT]) -> Self {
        let mut values = [0.0; FEATURE_COUNT];
        for (value, text) in values.iter_mut().zip(raw.iter()) {
            *value = coerce_feature(text.as_ref());
        }
        Self { values }
    }

    pub fn values(&self) -> &[f64; FEATURE_COUNT] {
        &self.values
    }

    /// Look up a value by its feature key.
    pub fn get(&self, name: &str) -> Option<f64> {
        FEATURE_NAMES
            .iter()
            .position(|candidate| *candidate == name)
            .map(|index| self.values[index])
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, f64)> + '_ {
        FEATURE_NAMES.iter().copied().zip(self.values.iter().copied())
    }
}

impl Serialize for FeatureVector {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(FEATURE_COUNT))?;
        for (name, value) in self.iter() {
            map.serialize_entry(name, &value)?;
        }
        map.end()
    }
}

/// Coerce one manual field the way a browser `parseFloat(x) || 0` would.
///
/// Leading whitespace is skipped and the longest numeric prefix wins, so
/// `"12abc"` is 12. Empty, unparsable, NaN and negative-zero inputs all map
/// to `0.0`. Infinite values are kept.
pub fn coerce_feature(raw: &str) -> f64 {
    match leading_float(raw) {
        Some(value) if !value.is_nan() && value != 0.0 => value,
        _ => 0.0,
    }
}

fn leading_float(raw: &str) -> Option<f64> {
    let text = raw.trim_start();
    let bytes = text.as_bytes();
    let len = bytes.len();
    let mut end = 0usize;
    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end = 1;
    }
    if text[end..].starts_with("Infinity") {
        return text[..end + "Infinity".len()].parse().ok();
    }

    let int_start = end;
    while end < len && bytes[end].is_ascii_digit() {
        end += 1;
    }
    let mut mantissa_digits = end - int_start;
    if end < len && bytes[end] == b'.' {
        let mut cursor = end + 1;
        while cursor < len && bytes[cursor].is_ascii_digit() {
            cursor += 1;
        }
        let fraction_digits = cursor - (end + 1);
        if mantissa_digits + fraction_digits > 0 {
            mantissa_digits += fraction_digits;
            end = cursor;
        }
    }
    if mantissa_digits == 0 {
        return None;
    }

    if end < len && matches!(bytes[end], b'e' | b'E') {
        let mut cursor = end + 1;
        if cursor < len && matches!(bytes[cursor], b'+' | b'-') {
            cursor += 1;
        }
        let exponent_start = cursor;
        while cursor < len && bytes[cursor].is_ascii_digit() {
            cursor += 1;
        }
        if cursor > exponent_start {
            end = cursor;
        }
    }
    text[..end].parse().ok()
}
