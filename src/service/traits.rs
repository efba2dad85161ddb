//! Service seam between the store and the transport.

use async_trait::async_trait;
use serde_json::Value;

use crate::api::Envelope;
use crate::model::{
    ArticleStats, CreatedRecord, EntityRecord, HistoryEntry, LookupData, RecordDraft,
    SearchPage, SearchParams, TitleAvailability,
};
use crate::service::endpoints::TransitionRequest;

/// One method per backend operation of an entity type.
///
/// Implementations never fail outward: transport errors and application
/// rejections both come back as an unsuccessful [`Envelope`].
#[async_trait]
pub trait EntityService: Send + Sync {
    /// Entity name, for logging.
    fn entity(&self) -> &str;

    async fn search(&self, params: &SearchParams) -> Envelope<SearchPage>;

    async fn get(&self, id: i64) -> Envelope<EntityRecord>;

    async fn create(&self, draft: &RecordDraft) -> Envelope<CreatedRecord>;

    async fn update(&self, id: i64, draft: &RecordDraft) -> Envelope<Value>;

    async fn delete(&self, id: i64) -> Envelope<Value>;

    async fn transition(&self, id: i64, request: &TransitionRequest) -> Envelope<Value>;

    async fn stats(&self) -> Envelope<ArticleStats>;

    async fn lookups(&self) -> Envelope<LookupData>;

    async fn history(&self, id: i64) -> Envelope<Vec<HistoryEntry>>;

    async fn check_title(&self, title: &str, exclude_id: Option<i64>)
        -> Envelope<TitleAvailability>;
}
