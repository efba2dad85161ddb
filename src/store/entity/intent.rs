use crate::model::{ArticleStats, EntityRecord, LookupData, SearchPage, SearchParams};
use crate::store::mvi::Intent;

/// Which busy flag a mutation holds while in flight.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BusyFlag {
    Submitting,
    Deleting,
}

#[derive(Debug, Clone)]
pub enum EntityIntent {
    /// A list request with the effective filters was issued.
    /// Bumps `list_generation`.
    ListRequested { search: SearchParams },
    /// Carries the paging of the request that produced `page`.
    ListLoaded {
        generation: u64,
        page_number: u32,
        page_size: u32,
        page: SearchPage,
    },
    ListFailed { generation: u64, message: String },

    DetailRequested,
    DetailLoaded { record: EntityRecord },
    DetailFailed { message: String },

    MutationStarted { flag: BusyFlag },
    MutationSucceeded { flag: BusyFlag },
    MutationFailed { flag: BusyFlag, message: String },

    StatsLoaded { stats: ArticleStats },
    LookupsLoaded { lookups: LookupData },
    /// A side request failed; only the error message changes.
    RequestFailed { message: String },

    /// Filters changed without fetching.
    SearchUpdated { search: SearchParams },
    ErrorCleared,
    CurrentReset,
}

impl Intent for EntityIntent {}
