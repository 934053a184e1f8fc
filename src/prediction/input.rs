//! Dashboard input state: 14 manual text slots or one uploaded CSV file.

use std::path::Path;
use std::sync::Arc;

use super::features::{FEATURE_COUNT, FeatureVector};

/// A CSV file picked by the user, held in memory so it can be re-sent for
/// the detailed export without touching disk again.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CsvUpload {
    file_name: String,
    bytes: Arc<[u8]>,
}

impl CsvUpload {
    pub fn new(file_name: impl Into<String>, bytes: impl Into<Arc<[u8]>>) -> Self {
        Self {
            file_name: file_name.into(),
            bytes: bytes.into(),
        }
    }

    /// Read a CSV file from disk, keeping only its file name.
    pub fn from_path(path: &Path) -> std::io::Result<Self> {
        let bytes = std::fs::read(path)?;
        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| "upload.csv".to_string());
        Ok(Self::new(file_name, bytes))
    }

    /// Whether a file name carries the `.csv` suffix the service accepts.
    pub fn is_csv_name(name: &str) -> bool {
        name.to_ascii_lowercase().ends_with(".csv")
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

/// Raw user input. A selected file always takes precedence over manual slots.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct InputState {
    manual: [String; FEATURE_COUNT],
    file: Option<CsvUpload>,
}

impl InputState {
    pub fn manual_fields(&self) -> &[String; FEATURE_COUNT] {
        &self.manual
    }

    pub fn manual_field(&self, index: usize) -> Option<&str> {
        self.manual.get(index).map(String::as_str)
    }

    /// Mutable access for text-edit widgets bound directly to a slot.
    pub fn manual_field_mut(&mut self, index: usize) -> Option<&mut String> {
        self.manual.get_mut(index)
    }

    /// Replace one manual slot. Returns `false` for an out-of-range index.
    pub fn set_manual_field(&mut self, index: usize, value: impl Into<String>) -> bool {
        match self.manual.get_mut(index) {
            Some(slot) => {
                *slot = value.into();
                true
            }
            None => false,
        }
    }

    pub fn file(&self) -> Option<&CsvUpload> {
        self.file.as_ref()
    }

    pub fn set_file(&mut self, file: CsvUpload) {
        self.file = Some(file);
    }

    pub fn clear(&mut self) {
        self.manual = Default::default();
        self.file = None;
    }

    pub fn has_manual_input(&self) -> bool {
        self.manual.iter().any(|value| !value.trim().is_empty())
    }

    pub fn can_submit(&self) -> bool {
        self.file.is_some() || self.has_manual_input()
    }

    pub fn feature_vector(&self) -> FeatureVector {
        FeatureVector::from_raw(&self.manual)
    }
}
