use async_trait::async_trait;
use serde_json::Value;

use crate::api::{ApiClient, Envelope};
use crate::model::{
    ArticleStats, CreatedRecord, EntityRecord, HistoryEntry, LookupData, RecordDraft,
    SearchPage, SearchParams, TitleAvailability,
};
use crate::service::endpoints::{EndpointMap, TransitionRequest};
use crate::service::traits::EntityService;

/// [`EntityService`] over the REST backend.
#[derive(Clone)]
pub struct HttpEntityService {
    client: ApiClient,
    endpoints: EndpointMap,
}

impl HttpEntityService {
    pub fn new(client: ApiClient, endpoints: EndpointMap) -> Self {
        Self { client, endpoints }
    }

    pub fn endpoints(&self) -> &EndpointMap {
        &self.endpoints
    }

    fn failed(&self, what: &str) -> String {
        format!("Failed to {} {}", what, self.endpoints.entity())
    }
}

#[async_trait]
impl EntityService for HttpEntityService {
    fn entity(&self) -> &str {
        self.endpoints.entity()
    }

    async fn search(&self, params: &SearchParams) -> Envelope<SearchPage> {
        self.client
            .post(&self.endpoints.search(), params, &self.failed("load"))
            .await
    }

    async fn get(&self, id: i64) -> Envelope<EntityRecord> {
        self.client
            .get(&self.endpoints.by_id(id), &[], &self.failed("load"))
            .await
    }

    async fn create(&self, draft: &RecordDraft) -> Envelope<CreatedRecord> {
        self.client
            .post(&self.endpoints.create(), draft, &self.failed("create"))
            .await
    }

    async fn update(&self, id: i64, draft: &RecordDraft) -> Envelope<Value> {
        self.client
            .put(&self.endpoints.update(id), draft, &self.failed("update"))
            .await
    }

    async fn delete(&self, id: i64) -> Envelope<Value> {
        self.client
            .delete(&self.endpoints.delete(id), &self.failed("delete"))
            .await
    }

    async fn transition(&self, id: i64, request: &TransitionRequest) -> Envelope<Value> {
        let kind = request.kind();
        tracing::info!(entity = %self.entity(), id, transition = %kind, "Applying transition");
        self.client
            .put(
                &self.endpoints.transition(id, kind),
                &request.body(),
                &self.failed(kind.as_str()),
            )
            .await
    }

    async fn stats(&self) -> Envelope<ArticleStats> {
        self.client
            .get(&self.endpoints.stats(), &[], "Failed to fetch stats")
            .await
    }

    async fn lookups(&self) -> Envelope<LookupData> {
        self.client
            .get(&self.endpoints.lookups(), &[], "Failed to fetch lookup data")
            .await
    }

    async fn history(&self, id: i64) -> Envelope<Vec<HistoryEntry>> {
        self.client
            .get(
                &self.endpoints.history(),
                &[("articleId", id.to_string())],
                "Failed to fetch history",
            )
            .await
    }

    async fn check_title(
        &self,
        title: &str,
        exclude_id: Option<i64>,
    ) -> Envelope<TitleAvailability> {
        let mut query = vec![("title", title.to_string())];
        if let Some(id) = exclude_id.filter(|id| *id != 0) {
            query.push(("excludeArticleId", id.to_string()));
        }
        self.client
            .get(
                &self.endpoints.title_check(),
                &query,
                "Failed to check title availability",
            )
            .await
    }
}
