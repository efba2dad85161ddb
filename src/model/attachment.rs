use serde::{Deserialize, Serialize};

/// Upload body for `POST /Attachment/UploadObservationAttachment`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ObservationAttachment {
    /// Zero for a new attachment.
    pub id: i64,
    pub observation_id: i64,
    pub title: String,
    pub file_name: String,
    pub file_base64: String,
}

/// Upload body for `POST /Attachment/UploadRequestAttachment`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestAttachment {
    pub id: i64,
    #[serde(rename = "requestID")]
    pub request_id: i64,
    pub title: String,
    pub file_name: String,
    pub file_base64: String,
}
