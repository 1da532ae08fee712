//! Stored file entity model and its persisted record envelope.

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use bytes::Bytes;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use vault_core::error::AppError;
use vault_core::result::AppResult;

/// A file held in the vault.
///
/// The record is immutable once written: there is no update path, only
/// replacement by a record with the same `id` or deletion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredFile {
    /// Primary key. Lowercase hex digest of `data`, or a random token when
    /// the file was stored without a digest.
    pub id: String,
    /// Original file name as supplied by the user.
    pub name: String,
    /// Reported MIME type (may be empty).
    #[serde(rename = "type")]
    pub mime_type: String,
    /// Size of `data` in bytes.
    pub size: u64,
    /// Raw file content.
    #[serde(serialize_with = "encode_data", deserialize_with = "decode_data")]
    pub data: Bytes,
    /// Capture time in milliseconds since the Unix epoch.
    pub timestamp: i64,
}

impl StoredFile {
    /// MIME type to present to a viewer, defaulting to a generic binary type.
    pub fn content_type(&self) -> &str {
        if self.mime_type.is_empty() {
            "application/octet-stream"
        } else {
            &self.mime_type
        }
    }

    /// Capture time as a UTC datetime.
    pub fn captured_at(&self) -> Option<chrono::DateTime<chrono::Utc>> {
        chrono::DateTime::from_timestamp_millis(self.timestamp)
    }

    /// Encode this record into the bytes handed to the object store.
    pub fn to_record(&self) -> AppResult<Bytes> {
        Ok(Bytes::from(serde_json::to_vec(self)?))
    }

    /// Decode a record read back from the object store.
    pub fn from_record(raw: &[u8]) -> AppResult<Self> {
        let file: Self = serde_json::from_slice(raw)?;
        if file.size != file.data.len() as u64 {
            return Err(AppError::serialization(format!(
                "Record {} declares {} bytes but holds {}",
                file.id,
                file.size,
                file.data.len()
            )));
        }
        Ok(file)
    }
}

fn encode_data<S: Serializer>(data: &Bytes, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&STANDARD.encode(data))
}

fn decode_data<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Bytes, D::Error> {
    let encoded = String::deserialize(deserializer)?;
    STANDARD
        .decode(encoded.as_bytes())
        .map(Bytes::from)
        .map_err(serde::de::Error::custom)
}
