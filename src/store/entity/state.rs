use serde::Serialize;

use crate::model::{ArticleStats, EntityRecord, LookupData, SearchParams};
use crate::store::mvi::UiState;

/// View state of one entity type: list, detail, flags and filters.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EntityState {
    pub records: Vec<EntityRecord>,
    pub current: Option<EntityRecord>,
    pub stats: Option<ArticleStats>,
    pub lookups: Option<LookupData>,

    pub total_count: u64,
    pub page_number: u32,
    pub page_size: u32,
    pub total_pages: u64,

    pub loading: bool,
    pub submitting: bool,
    pub deleting: bool,
    pub error: Option<String>,

    /// Filters used by the latest list request.
    pub search: SearchParams,
    /// Incremented per list request; older results are dropped.
    #[serde(skip)]
    pub list_generation: u64,
}

impl Default for EntityState {
    fn default() -> Self {
        Self::with_search(SearchParams::default())
    }
}

impl UiState for EntityState {}

impl EntityState {
    pub fn with_search(search: SearchParams) -> Self {
        Self {
            records: Vec::new(),
            current: None,
            stats: None,
            lookups: None,
            total_count: 0,
            page_number: search.page_number,
            page_size: search.page_size,
            total_pages: 0,
            loading: false,
            submitting: false,
            deleting: false,
            error: None,
            search,
            list_generation: 0,
        }
    }

    pub fn is_busy(&self) -> bool {
        self.loading || self.submitting || self.deleting
    }
}
