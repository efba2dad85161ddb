//! Wire records shared by the service layer and the store.

mod attachment;
mod lookup;
mod record;
mod search;

pub use attachment::{ObservationAttachment, RequestAttachment};
pub use lookup::{ArticleStats, Language, LookupData, LookupId, LookupValue};
pub use record::{
    CreatedRecord, EntityRecord, HistoryEntry, RecordDraft, TitleAvailability, WorkflowStatus,
};
pub use search::{
    total_pages, SearchOverrides, SearchPage, SearchParams, SortDirection, DEFAULT_PAGE_SIZE,
};
