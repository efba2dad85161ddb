use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Workflow status of an observation or article.
///
/// Closed set: an unknown status from the server fails decoding of the
/// record that carries it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum WorkflowStatus {
    #[default]
    Draft,
    Submitted,
    Approved,
    Rejected,
    Archived,
}

impl WorkflowStatus {
    pub const ALL: [WorkflowStatus; 5] = [
        WorkflowStatus::Draft,
        WorkflowStatus::Submitted,
        WorkflowStatus::Approved,
        WorkflowStatus::Rejected,
        WorkflowStatus::Archived,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            WorkflowStatus::Draft => "Draft",
            WorkflowStatus::Submitted => "Submitted",
            WorkflowStatus::Approved => "Approved",
            WorkflowStatus::Rejected => "Rejected",
            WorkflowStatus::Archived => "Archived",
        }
    }
}

impl fmt::Display for WorkflowStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for WorkflowStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown workflow status '{}'", s))
    }
}

/// An observation / article as returned by the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntityRecord {
    pub id: i64,
    #[serde(default)]
    pub observation_subject: String,
    #[serde(default)]
    pub observation_title: String,
    #[serde(default)]
    pub discussion: String,
    #[serde(default)]
    pub conclusion: String,
    #[serde(default)]
    pub initial_recommendation: String,
    #[serde(rename = "type", default)]
    pub record_type: String,
    #[serde(default)]
    pub originating_main_unit: String,
    #[serde(default)]
    pub originating_subunit: String,
    #[serde(default)]
    pub current_assignment: String,
    #[serde(default)]
    pub status: WorkflowStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub submission_status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub submitted_by: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub submitted_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub approved_by: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}

/// Create / full-replace update body.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordDraft {
    #[serde(default)]
    pub observation_subject: String,
    #[serde(default)]
    pub observation_title: String,
    #[serde(default)]
    pub discussion: String,
    #[serde(default)]
    pub conclusion: String,
    #[serde(default)]
    pub initial_recommendation: String,
    #[serde(rename = "type", default)]
    pub record_type: String,
    #[serde(default)]
    pub originating_main_unit: String,
    #[serde(default)]
    pub originating_subunit: String,
    #[serde(default)]
    pub current_assignment: String,
    #[serde(default)]
    pub status: WorkflowStatus,
}

impl From<&EntityRecord> for RecordDraft {
    fn from(record: &EntityRecord) -> Self {
        Self {
            observation_subject: record.observation_subject.clone(),
            observation_title: record.observation_title.clone(),
            discussion: record.discussion.clone(),
            conclusion: record.conclusion.clone(),
            initial_recommendation: record.initial_recommendation.clone(),
            record_type: record.record_type.clone(),
            originating_main_unit: record.originating_main_unit.clone(),
            originating_subunit: record.originating_subunit.clone(),
            current_assignment: record.current_assignment.clone(),
            status: record.status,
        }
    }
}

/// Result of a create call.
///
/// The backend answers with `{articleId}`, `{id}` or a bare number
/// depending on the deployment; anything else is a success without an id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "WireCreated")]
pub struct CreatedRecord {
    pub id: Option<i64>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum WireCreated {
    Bare(i64),
    Keyed {
        #[serde(rename = "articleId", alias = "id")]
        article_id: i64,
    },
    Other(serde::de::IgnoredAny),
}

impl From<WireCreated> for CreatedRecord {
    fn from(wire: WireCreated) -> Self {
        let id = match wire {
            WireCreated::Bare(id) => Some(id),
            WireCreated::Keyed { article_id } => Some(article_id),
            WireCreated::Other(_) => None,
        };
        Self { id }
    }
}

/// Result of a title uniqueness check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TitleAvailability {
    pub is_available: bool,
}

/// One audit entry of a record's history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEntry {
    pub id: i64,
    pub article_id: i64,
    pub action: String,
    #[serde(default)]
    pub performed_by: String,
    #[serde(default)]
    pub performed_at: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub previous_value: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub new_value: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}
