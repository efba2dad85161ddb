//! Client-side checks and encoding of a selected file.

use std::collections::BTreeMap;
use std::path::Path;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;

use crate::config::AttachmentConfig;
use crate::model::{ObservationAttachment, RequestAttachment};

const BYTES_PER_MB: u64 = 1024 * 1024;

/// MIME types recognised by extension when reading from disk. Only those in
/// the policy's allow-list are accepted.
const KNOWN_TYPES: [(&str, &str); 14] = [
    ("pdf", "application/pdf"),
    ("doc", "application/msword"),
    (
        "docx",
        "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
    ),
    ("xls", "application/vnd.ms-excel"),
    (
        "xlsx",
        "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
    ),
    ("png", "image/png"),
    ("jpg", "image/jpeg"),
    ("jpeg", "image/jpeg"),
    ("gif", "image/gif"),
    ("txt", "text/plain"),
    ("csv", "text/csv"),
    ("zip", "application/zip"),
    ("exe", "application/x-msdownload"),
    ("json", "application/json"),
];

/// A file picked by the user, not yet validated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedFile {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl SelectedFile {
    pub fn new(file_name: impl Into<String>, content_type: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            content_type: content_type.into(),
            bytes,
        }
    }

    /// Reads a file and infers its MIME type from the extension.
    pub async fn from_path(path: &Path) -> std::io::Result<Self> {
        let bytes = tokio::fs::read(path).await?;
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let content_type = mime_from_extension(path);
        Ok(Self {
            file_name,
            content_type,
            bytes,
        })
    }

    pub fn size(&self) -> u64 {
        self.bytes.len() as u64
    }
}

fn mime_from_extension(path: &Path) -> String {
    let ext = path
        .extension()
        .map(|e| e.to_string_lossy().to_ascii_lowercase())
        .unwrap_or_default();
    KNOWN_TYPES
        .iter()
        .find(|(known, _)| *known == ext)
        .map(|(_, mime)| mime.to_string())
        .unwrap_or_else(|| "application/octet-stream".to_string())
}

/// Receives selection warnings so the owning form can block submission.
pub trait SelectionListener {
    /// `true` when the file exceeds the size ceiling, `false` otherwise.
    fn size_error(&mut self, exceeded: bool);

    /// Fired with a message when the MIME type is not allowed.
    fn type_error(&mut self, message: String);
}

/// Listener that remembers the last warning of each kind.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionWarnings {
    pub size_exceeded: bool,
    pub type_message: Option<String>,
}

impl SelectionWarnings {
    pub fn blocks_submission(&self) -> bool {
        self.size_exceeded || self.type_message.is_some()
    }
}

impl SelectionListener for SelectionWarnings {
    fn size_error(&mut self, exceeded: bool) {
        self.size_exceeded = exceeded;
    }

    fn type_error(&mut self, message: String) {
        self.type_message = Some(message);
    }
}

/// An accepted file, ready to be embedded in an upload body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreparedAttachment {
    pub file_name: String,
    pub content_type: String,
    pub size: u64,
    /// Plain base64, without a `data:` prefix.
    pub base64: String,
}

impl PreparedAttachment {
    pub fn data_url(&self) -> String {
        format!("data:{};base64,{}", self.content_type, self.base64)
    }

    pub fn into_observation_attachment(
        self,
        observation_id: i64,
        title: impl Into<String>,
    ) -> ObservationAttachment {
        ObservationAttachment {
            id: 0,
            observation_id,
            title: title.into(),
            file_name: self.file_name,
            file_base64: self.base64,
        }
    }

    pub fn into_request_attachment(
        self,
        request_id: i64,
        title: impl Into<String>,
    ) -> RequestAttachment {
        RequestAttachment {
            id: 0,
            request_id,
            title: title.into(),
            file_name: self.file_name,
            file_base64: self.base64,
        }
    }
}

/// Size ceiling and MIME allow-list for one upload field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttachmentPolicy {
    max_file_size_mb: u64,
    allowed: BTreeMap<String, String>,
}

impl From<&AttachmentConfig> for AttachmentPolicy {
    fn from(config: &AttachmentConfig) -> Self {
        Self::new(config.max_file_size_mb, config.allowed_types.clone())
    }
}

impl AttachmentPolicy {
    pub fn new(max_file_size_mb: u64, allowed: BTreeMap<String, String>) -> Self {
        Self {
            max_file_size_mb,
            allowed,
        }
    }

    pub fn max_file_size_mb(&self) -> u64 {
        self.max_file_size_mb
    }

    pub fn exceeds_size(&self, bytes: u64) -> bool {
        bytes > self.max_file_size_mb.saturating_mul(BYTES_PER_MB)
    }

    pub fn is_allowed(&self, content_type: &str) -> bool {
        self.allowed.contains_key(content_type)
    }

    /// Allowed extensions, sorted and without duplicates.
    pub fn allowed_extensions(&self) -> Vec<String> {
        let mut extensions: Vec<String> = self.allowed.values().cloned().collect();
        extensions.sort();
        extensions.dedup();
        extensions
    }

    /// Hint shown next to the upload field.
    pub fn disclaimer(&self) -> String {
        format!(
            "Allowed file types: {}. Maximum file size: {} MB.",
            self.allowed_extensions().join(", "),
            self.max_file_size_mb
        )
    }

    fn type_message(&self) -> String {
        format!(
            "Only the following file types are allowed: {}",
            self.allowed_extensions().join(", ")
        )
    }

    /// Validates `file` and encodes it.
    ///
    /// Policy failures are reported through `listener` and yield `None`;
    /// they are never errors.
    pub fn prepare(
        &self,
        file: &SelectedFile,
        listener: &mut dyn SelectionListener,
    ) -> Option<PreparedAttachment> {
        let too_large = self.exceeds_size(file.size());
        listener.size_error(too_large);

        let allowed = self.is_allowed(&file.content_type);
        if !allowed {
            listener.type_error(self.type_message());
        }

        if too_large || !allowed {
            tracing::debug!(
                file = %file.file_name,
                size = file.size(),
                content_type = %file.content_type,
                too_large,
                allowed,
                "Attachment rejected"
            );
            return None;
        }

        Some(PreparedAttachment {
            file_name: file.file_name.clone(),
            content_type: file.content_type.clone(),
            size: file.size(),
            base64: STANDARD.encode(&file.bytes),
        })
    }
}
