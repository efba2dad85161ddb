//! Endpoint templates for one entity type.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::config::EntityConfig;

/// Workflow transition applied to a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TransitionKind {
    Submit,
    Approve,
    Reject,
    Archive,
}

impl TransitionKind {
    pub const ALL: [TransitionKind; 4] = [
        TransitionKind::Submit,
        TransitionKind::Approve,
        TransitionKind::Reject,
        TransitionKind::Archive,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TransitionKind::Submit => "submit",
            TransitionKind::Approve => "approve",
            TransitionKind::Reject => "reject",
            TransitionKind::Archive => "archive",
        }
    }

    /// Whether the backend refuses this transition without a reason.
    pub fn requires_reason(&self) -> bool {
        matches!(self, TransitionKind::Reject | TransitionKind::Archive)
    }
}

impl fmt::Display for TransitionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TransitionKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown transition '{}'", s))
    }
}

/// A transition together with its action-specific payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransitionRequest {
    Submit { notes: Option<String> },
    Approve { notes: Option<String> },
    Reject { reason: String, notes: Option<String> },
    Archive { reason: String },
}

/// JSON body of `PUT {base}/{id}/{transition}`.
#[derive(Debug, Serialize)]
pub struct TransitionBody<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<&'a str>,
}

impl TransitionRequest {
    /// Builds a request from loose parts; reject and archive need a reason.
    pub fn new(
        kind: TransitionKind,
        reason: Option<String>,
        notes: Option<String>,
    ) -> Result<Self, String> {
        let request = match kind {
            TransitionKind::Submit => TransitionRequest::Submit { notes },
            TransitionKind::Approve => TransitionRequest::Approve { notes },
            TransitionKind::Reject => TransitionRequest::Reject {
                reason: reason.unwrap_or_default(),
                notes,
            },
            TransitionKind::Archive => TransitionRequest::Archive {
                reason: reason.unwrap_or_default(),
            },
        };
        request.validate()?;
        Ok(request)
    }

    pub fn kind(&self) -> TransitionKind {
        match self {
            TransitionRequest::Submit { .. } => TransitionKind::Submit,
            TransitionRequest::Approve { .. } => TransitionKind::Approve,
            TransitionRequest::Reject { .. } => TransitionKind::Reject,
            TransitionRequest::Archive { .. } => TransitionKind::Archive,
        }
    }

    pub fn validate(&self) -> Result<(), String> {
        match self {
            TransitionRequest::Reject { reason, .. } | TransitionRequest::Archive { reason }
                if reason.trim().is_empty() =>
            {
                Err(format!("A reason is required to {}", self.kind()))
            }
            _ => Ok(()),
        }
    }

    pub fn body(&self) -> TransitionBody<'_> {
        match self {
            TransitionRequest::Submit { notes } | TransitionRequest::Approve { notes } => {
                TransitionBody {
                    reason: None,
                    notes: notes.as_deref(),
                }
            }
            TransitionRequest::Reject { reason, notes } => TransitionBody {
                reason: Some(reason),
                notes: notes.as_deref(),
            },
            TransitionRequest::Archive { reason } => TransitionBody {
                reason: Some(reason),
                notes: None,
            },
        }
    }
}

/// Route template for each workflow action.
const fn transition_route(kind: TransitionKind) -> &'static str {
    match kind {
        TransitionKind::Submit => "{base}/{id}/submit",
        TransitionKind::Approve => "{base}/{id}/approve",
        TransitionKind::Reject => "{base}/{id}/reject",
        TransitionKind::Archive => "{base}/{id}/archive",
    }
}

/// Endpoint paths for one entity, relative to the API origin.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EndpointMap {
    entity: String,
    base_path: String,
}

impl EndpointMap {
    pub fn new(entity: impl Into<String>, base_path: impl Into<String>) -> Self {
        let base_path: String = base_path.into();
        Self {
            entity: entity.into(),
            base_path: base_path.trim_end_matches('/').to_string(),
        }
    }

    pub fn entity(&self) -> &str {
        &self.entity
    }

    pub fn search(&self) -> String {
        format!("{}/search", self.base_path)
    }

    pub fn by_id(&self, id: i64) -> String {
        format!("{}/GetArticleById/{}", self.base_path, id)
    }

    pub fn create(&self) -> String {
        format!("{}/Create?submissionStatus=Draft", self.base_path)
    }

    pub fn update(&self, id: i64) -> String {
        format!("{}/{}/UpdateArticle", self.base_path, id)
    }

    pub fn delete(&self, id: i64) -> String {
        format!("{}/DeleteArticle/{}", self.base_path, id)
    }

    pub fn transition(&self, id: i64, kind: TransitionKind) -> String {
        transition_route(kind)
            .replace("{base}", &self.base_path)
            .replace("{id}", &id.to_string())
    }

    pub fn stats(&self) -> String {
        format!("{}/GetArticleStats", self.base_path)
    }

    pub fn lookups(&self) -> String {
        format!("{}/GetLookupData", self.base_path)
    }

    pub fn history(&self) -> String {
        format!("{}/GetArticlesHistory", self.base_path)
    }

    pub fn title_check(&self) -> String {
        format!("{}/CheckArticleTitleAvailability", self.base_path)
    }
}

impl From<&EntityConfig> for EndpointMap {
    fn from(config: &EntityConfig) -> Self {
        Self::new(config.name.clone(), config.base_path.clone())
    }
}
