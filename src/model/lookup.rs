use std::fmt;

use serde::{Deserialize, Serialize};

/// Display language for lookup labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Language {
    #[default]
    En,
    Ar,
}

/// Lookup identifiers arrive as numbers or as codes depending on the list.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LookupId {
    Number(i64),
    Code(String),
}

impl fmt::Display for LookupId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LookupId::Number(n) => write!(f, "{}", n),
            LookupId::Code(code) => f.write_str(code),
        }
    }
}

/// Read-only reference value used to populate a dropdown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LookupValue {
    #[serde(alias = "value")]
    pub id: LookupId,
    #[serde(alias = "text", alias = "nameEn", alias = "lookupName")]
    pub label_en: String,
    #[serde(default, alias = "nameAr", alias = "lookupNameAr", skip_serializing_if = "Option::is_none")]
    pub label_ar: Option<String>,
}

impl LookupValue {
    /// Label in `lang`, falling back to English when no Arabic label exists.
    pub fn label(&self, lang: Language) -> &str {
        match (lang, &self.label_ar) {
            (Language::Ar, Some(ar)) if !ar.is_empty() => ar,
            _ => &self.label_en,
        }
    }
}

/// Dropdown sources for the record form, fetched once per session.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LookupData {
    #[serde(default)]
    pub types: Vec<LookupValue>,
    #[serde(default)]
    pub statuses: Vec<LookupValue>,
    #[serde(default)]
    pub main_units: Vec<LookupValue>,
    #[serde(default)]
    pub subunits: Vec<LookupValue>,
    #[serde(default)]
    pub assignments: Vec<LookupValue>,
}

/// Dashboard counters from `GetArticleStats`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArticleStats {
    #[serde(default)]
    pub total_articles: u64,
    #[serde(default)]
    pub draft_articles: u64,
    #[serde(default)]
    pub published_articles: u64,
    #[serde(default)]
    pub archived_articles: u64,
    #[serde(default)]
    pub pending_approval: u64,
    #[serde(default)]
    pub submission_rate: f64,
}
