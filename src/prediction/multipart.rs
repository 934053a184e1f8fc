//! Minimal `multipart/form-data` encoding for single-file uploads.

use uuid::Uuid;

/// An encoded form body together with the header that describes it.
#[derive(Clone, Debug)]
pub struct MultipartBody {
    boundary: String,
    bytes: Vec<u8>,
}

impl MultipartBody {
    /// Encode one file part under `field`, using a fresh random boundary.
    pub fn single_file(field: &str, file_name: &str, content_type: &str, data: &[u8]) -> Self {
        let boundary = format!("----exoscope-{}", Uuid::new_v4().simple());
        Self::with_boundary(boundary, field, file_name, content_type, data)
    }

    fn with_boundary(
        boundary: String,
        field: &str,
        file_name: &str,
        content_type: &str,
        data: &[u8],
    ) -> Self {
        let mut bytes = Vec::with_capacity(data.len() + 256);
        bytes.extend_from_slice(format!("--{boundary}\r\n").as_bytes());
        bytes.extend_from_slice(
            format!(
                "Content-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\n",
                escape_quoted(field),
                escape_quoted(file_name)
            )
            .as_bytes(),
        );
        bytes.extend_from_slice(format!("Content-Type: {content_type}\r\n\r\n").as_bytes());
        bytes.extend_from_slice(data);
        bytes.extend_from_slice(format!("\r\n--{boundary}--\r\n").as_bytes());
        Self { boundary, bytes }
    }

    /// Value for the request's `Content-Type` header.
    pub fn content_type(&self) -> String {
        format!("multipart/form-data; boundary={}", self.boundary)
    }

    pub fn boundary(&self) -> &str {
        &self.boundary
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }
}

// Quote, CR and LF would terminate the header parameter.
fn escape_quoted(value: &str) -> String {
    value
        .replace('"', "%22")
        .replace('\r', "%0D")
        .replace('\n', "%0A")
}
