use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::record::EntityRecord;

pub const DEFAULT_PAGE_SIZE: u32 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Asc,
    #[default]
    Desc,
}

impl FromStr for SortDirection {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "asc" => Ok(SortDirection::Asc),
            "desc" => Ok(SortDirection::Desc),
            other => Err(format!("unknown sort direction '{}'", other)),
        }
    }
}

/// Effective list filter, sent as the body of `POST {base}/search`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchParams {
    pub search_term: String,
    #[serde(rename = "type")]
    pub record_type: String,
    pub status: String,
    pub originating_main_unit: String,
    pub originating_subunit: String,
    pub current_assignment: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_from: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_to: Option<String>,
    pub page_number: u32,
    pub page_size: u32,
    pub sort_by: String,
    pub sort_direction: SortDirection,
}

impl Default for SearchParams {
    fn default() -> Self {
        Self {
            search_term: String::new(),
            record_type: String::new(),
            status: String::new(),
            originating_main_unit: String::new(),
            originating_subunit: String::new(),
            current_assignment: String::new(),
            date_from: None,
            date_to: None,
            page_number: 1,
            page_size: DEFAULT_PAGE_SIZE,
            sort_by: "createdAt".to_string(),
            sort_direction: SortDirection::Desc,
        }
    }
}

impl SearchParams {
    pub fn with_page_size(page_size: u32) -> Self {
        Self {
            page_size: page_size.max(1),
            ..Self::default()
        }
    }

    /// Shallow merge: every `Some` in `overrides` replaces the matching key.
    ///
    /// A zero page number or page size is ignored and the previous value is
    /// kept, so paging stays at `page_number >= 1`, `page_size > 0`.
    pub fn merged(&self, overrides: &SearchOverrides) -> SearchParams {
        let pick = |value: &Option<String>, current: &String| {
            value.clone().unwrap_or_else(|| current.clone())
        };

        SearchParams {
            search_term: pick(&overrides.search_term, &self.search_term),
            record_type: pick(&overrides.record_type, &self.record_type),
            status: pick(&overrides.status, &self.status),
            originating_main_unit: pick(&overrides.originating_main_unit, &self.originating_main_unit),
            originating_subunit: pick(&overrides.originating_subunit, &self.originating_subunit),
            current_assignment: pick(&overrides.current_assignment, &self.current_assignment),
            date_from: overrides.date_from.clone().or_else(|| self.date_from.clone()),
            date_to: overrides.date_to.clone().or_else(|| self.date_to.clone()),
            page_number: overrides
                .page_number
                .filter(|n| *n > 0)
                .unwrap_or(self.page_number),
            page_size: overrides
                .page_size
                .filter(|n| *n > 0)
                .unwrap_or(self.page_size),
            sort_by: pick(&overrides.sort_by, &self.sort_by),
            sort_direction: overrides.sort_direction.unwrap_or(self.sort_direction),
        }
    }
}

/// Partial filter passed to list loads.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SearchOverrides {
    pub search_term: Option<String>,
    pub record_type: Option<String>,
    pub status: Option<String>,
    pub originating_main_unit: Option<String>,
    pub originating_subunit: Option<String>,
    pub current_assignment: Option<String>,
    pub date_from: Option<String>,
    pub date_to: Option<String>,
    pub page_number: Option<u32>,
    pub page_size: Option<u32>,
    pub sort_by: Option<String>,
    pub sort_direction: Option<SortDirection>,
}

impl SearchOverrides {
    pub fn page(page_number: u32, page_size: u32) -> Self {
        Self {
            page_number: Some(page_number),
            page_size: Some(page_size),
            ..Self::default()
        }
    }

    pub fn term(term: impl Into<String>) -> Self {
        Self {
            search_term: Some(term.into()),
            ..Self::default()
        }
    }
}

/// One page of search results.
///
/// The backend returns either a bare array or an object carrying the items
/// and a server-side total.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(from = "WireSearchPage", rename_all = "camelCase")]
pub struct SearchPage {
    pub items: Vec<EntityRecord>,
    pub total_count: Option<u64>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum WireSearchPage {
    Bare(Vec<serde_json::Value>),
    Paged {
        #[serde(alias = "articles", alias = "records")]
        items: Vec<serde_json::Value>,
        #[serde(default, rename = "totalCount")]
        total_count: Option<u64>,
    },
}

impl From<WireSearchPage> for SearchPage {
    fn from(wire: WireSearchPage) -> Self {
        let (raw, total_count) = match wire {
            WireSearchPage::Bare(items) => (items, None),
            WireSearchPage::Paged { items, total_count } => (items, total_count),
        };
        Self {
            items: decode_records(raw),
            total_count,
        }
    }
}

/// Decodes each record on its own; a malformed record is skipped.
fn decode_records(raw: Vec<serde_json::Value>) -> Vec<EntityRecord> {
    raw.into_iter()
        .filter_map(|value| {
            let id = value.get("id").cloned().unwrap_or_default();
            let status = value.get("status").cloned().unwrap_or_default();
            match serde_json::from_value::<EntityRecord>(value) {
                Ok(record) => Some(record),
                Err(e) => {
                    tracing::warn!(%id, %status, error = %e, "Skipping undecodable record");
                    None
                }
            }
        })
        .collect()
}

impl SearchPage {
    /// Server-reported total, or the number of returned items when the
    /// backend sent a bare array.
    pub fn total_count(&self) -> u64 {
        self.total_count.unwrap_or(self.items.len() as u64)
    }
}

/// `ceil(total / page_size)`; zero for an empty page size.
pub fn total_pages(total: u64, page_size: u32) -> u64 {
    if page_size == 0 {
        return 0;
    }
    total.div_ceil(u64::from(page_size))
}
