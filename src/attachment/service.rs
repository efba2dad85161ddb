use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde_json::Value;
use thiserror::Error;

use crate::api::{ApiClient, ApiError, Envelope, WireEnvelope};
use crate::attachment::disposition::{parse_filename, DEFAULT_FILE_NAME};
use crate::model::{ObservationAttachment, RequestAttachment};

const UPLOAD_OBSERVATION: &str = "/Attachment/UploadObservationAttachment";
const UPLOAD_REQUEST: &str = "/Attachment/UploadRequestAttachment";

#[derive(Debug, Error)]
pub enum AttachmentError {
    #[error(transparent)]
    Api(#[from] ApiError),

    #[error("Download failed (HTTP {status}): {message}")]
    Status { status: u16, message: String },

    #[error("Failed to write {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Which stored attachment table a download reads from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttachmentKind {
    Fatwa,
    Comment,
    Request,
}

impl AttachmentKind {
    pub const ALL: [AttachmentKind; 3] = [
        AttachmentKind::Fatwa,
        AttachmentKind::Comment,
        AttachmentKind::Request,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            AttachmentKind::Fatwa => "fatwa",
            AttachmentKind::Comment => "comment",
            AttachmentKind::Request => "request",
        }
    }

    fn path(&self) -> &'static str {
        match self {
            AttachmentKind::Fatwa => "/Attachment/GetFatwaAttachmentById",
            AttachmentKind::Comment => "/Attachment/GetCommentAttachment",
            AttachmentKind::Request => "/Attachment/GetRequestAttachment",
        }
    }

    fn id_param(&self) -> &'static str {
        match self {
            AttachmentKind::Fatwa => "attachmentID",
            AttachmentKind::Comment | AttachmentKind::Request => "requestAttachmentId",
        }
    }
}

impl fmt::Display for AttachmentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AttachmentKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown attachment kind '{}'", s))
    }
}

/// A downloaded attachment held in memory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadedFile {
    pub file_name: String,
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

impl DownloadedFile {
    /// Writes the file into `dir` and returns the full path.
    ///
    /// Only the last component of the server-suggested name is used.
    pub async fn save_into(&self, dir: &Path) -> Result<PathBuf, AttachmentError> {
        let path = dir.join(safe_file_name(&self.file_name));
        tokio::fs::write(&path, &self.bytes)
            .await
            .map_err(|source| AttachmentError::Io {
                path: path.clone(),
                source,
            })?;
        tracing::info!(path = %path.display(), size = self.bytes.len(), "Attachment saved");
        Ok(path)
    }
}

fn safe_file_name(name: &str) -> &str {
    let last = name.rsplit(|c| c == '/' || c == '\\').next().unwrap_or_default().trim();
    match last {
        "" | "." | ".." => DEFAULT_FILE_NAME,
        other => other,
    }
}

/// Upload and download of attachment blobs.
#[derive(Clone)]
pub struct AttachmentService {
    client: ApiClient,
}

impl AttachmentService {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    pub async fn upload_observation(&self, attachment: &ObservationAttachment) -> Envelope<Value> {
        tracing::info!(
            observation_id = attachment.observation_id,
            file = %attachment.file_name,
            "Uploading observation attachment"
        );
        self.client
            .post(UPLOAD_OBSERVATION, attachment, "Failed to upload attachment")
            .await
    }

    pub async fn upload_request(&self, attachment: &RequestAttachment) -> Envelope<Value> {
        tracing::info!(
            request_id = attachment.request_id,
            file = %attachment.file_name,
            "Uploading request attachment"
        );
        self.client
            .post(UPLOAD_REQUEST, attachment, "Failed to upload attachment")
            .await
    }

    pub async fn download(
        &self,
        kind: AttachmentKind,
        id: i64,
    ) -> Result<DownloadedFile, AttachmentError> {
        let response = self
            .client
            .fetch(kind.path(), &[(kind.id_param(), id.to_string())])
            .await?;

        if !response.is_success() {
            let message = serde_json::from_slice::<WireEnvelope>(&response.bytes)
                .ok()
                .and_then(|wire| wire.message)
                .filter(|m| !m.trim().is_empty())
                .unwrap_or_else(|| "Failed to download attachment".to_string());
            return Err(AttachmentError::Status {
                status: response.status,
                message,
            });
        }

        let file_name = parse_filename(response.content_disposition.as_deref());
        tracing::debug!(%kind, id, file = %file_name, size = response.bytes.len(), "Downloaded attachment");

        Ok(DownloadedFile {
            file_name,
            content_type: response.content_type,
            bytes: response.bytes,
        })
    }
}
