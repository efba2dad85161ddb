use std::future::Future;
use std::sync::Arc;

use parking_lot::Mutex;

use crate::api::Envelope;
use crate::form::validate_record;
use crate::model::{
    CreatedRecord, EntityRecord, HistoryEntry, RecordDraft, SearchOverrides, SearchParams,
};
use crate::service::{EntityService, TransitionRequest};
use crate::store::entity::intent::{BusyFlag, EntityIntent};
use crate::store::entity::reducer::EntityReducer;
use crate::store::entity::state::EntityState;
use crate::store::mvi::Reducer;

/// State holder and action surface for one entity type.
///
/// Actions never return errors: every failure lands in `state().error`
/// and every busy flag is cleared before the action returns. Clones share
/// state, so a store can be driven from several tasks.
#[derive(Clone)]
pub struct EntityStore {
    service: Arc<dyn EntityService>,
    state: Arc<Mutex<EntityState>>,
}

fn apply(state: &mut EntityState, intent: EntityIntent) {
    let current = std::mem::take(state);
    *state = EntityReducer::reduce(current, intent);
}

impl EntityStore {
    pub fn new(service: Arc<dyn EntityService>) -> Self {
        Self::with_search(service, SearchParams::default())
    }

    pub fn with_page_size(service: Arc<dyn EntityService>, page_size: u32) -> Self {
        Self::with_search(service, SearchParams::with_page_size(page_size))
    }

    pub fn with_search(service: Arc<dyn EntityService>, search: SearchParams) -> Self {
        Self {
            service,
            state: Arc::new(Mutex::new(EntityState::with_search(search))),
        }
    }

    pub fn entity(&self) -> &str {
        self.service.entity()
    }

    /// Snapshot of the current state.
    pub fn state(&self) -> EntityState {
        self.state.lock().clone()
    }

    fn dispatch(&self, intent: EntityIntent) {
        apply(&mut self.state.lock(), intent);
    }

    /// Explicit page initialization: lookups, then the first page.
    pub async fn init(&self) {
        self.load_lookups().await;
        self.reload().await;
    }

    /// Loads a page with `overrides` merged onto the current filters.
    pub async fn load(&self, overrides: SearchOverrides) {
        let (generation, search) = {
            let mut state = self.state.lock();
            let search = state.search.merged(&overrides);
            apply(
                &mut state,
                EntityIntent::ListRequested {
                    search: search.clone(),
                },
            );
            (state.list_generation, search)
        };

        tracing::debug!(
            entity = %self.entity(),
            generation,
            page_number = search.page_number,
            page_size = search.page_size,
            "Loading records"
        );

        match self.service.search(&search).await.into_result() {
            Ok(page) => {
                if page.total_count.is_none() {
                    tracing::debug!(
                        entity = %self.entity(),
                        "No server total; counting returned records"
                    );
                }
                self.dispatch(EntityIntent::ListLoaded {
                    generation,
                    page_number: search.page_number,
                    page_size: search.page_size,
                    page,
                });
            }
            Err(message) => {
                self.dispatch(EntityIntent::ListFailed {
                    generation,
                    message,
                });
            }
        }
    }

    /// Re-runs the list request with the current filters.
    pub async fn reload(&self) {
        self.load(SearchOverrides::default()).await;
    }

    pub async fn load_by_id(&self, id: i64) -> Option<EntityRecord> {
        self.dispatch(EntityIntent::DetailRequested);
        match self.service.get(id).await.into_result() {
            Ok(record) => {
                self.dispatch(EntityIntent::DetailLoaded {
                    record: record.clone(),
                });
                Some(record)
            }
            Err(message) => {
                self.dispatch(EntityIntent::DetailFailed { message });
                None
            }
        }
    }

    pub async fn create(&self, draft: &RecordDraft) -> Option<CreatedRecord> {
        if let Err(errors) = validate_record(draft) {
            self.refuse(BusyFlag::Submitting, errors.summary());
            return None;
        }
        self.mutate(BusyFlag::Submitting, "create", self.service.create(draft))
            .await
    }

    pub async fn update(&self, id: i64, draft: &RecordDraft) -> bool {
        if let Err(errors) = validate_record(draft) {
            self.refuse(BusyFlag::Submitting, errors.summary());
            return false;
        }
        self.mutate(BusyFlag::Submitting, "update", self.service.update(id, draft))
            .await
            .is_some()
    }

    pub async fn remove(&self, id: i64) -> bool {
        self.mutate(BusyFlag::Deleting, "delete", self.service.delete(id))
            .await
            .is_some()
    }

    /// Applies a workflow transition; reloads the list on success.
    pub async fn transition(&self, id: i64, request: TransitionRequest) -> bool {
        if let Err(message) = request.validate() {
            self.refuse(BusyFlag::Submitting, message);
            return false;
        }
        let action = request.kind().as_str();
        self.mutate(
            BusyFlag::Submitting,
            action,
            self.service.transition(id, &request),
        )
        .await
        .is_some()
    }

    pub async fn submit(&self, id: i64, notes: Option<String>) -> bool {
        self.transition(id, TransitionRequest::Submit { notes }).await
    }

    pub async fn approve(&self, id: i64, notes: Option<String>) -> bool {
        self.transition(id, TransitionRequest::Approve { notes }).await
    }

    pub async fn reject(&self, id: i64, reason: impl Into<String>, notes: Option<String>) -> bool {
        self.transition(
            id,
            TransitionRequest::Reject {
                reason: reason.into(),
                notes,
            },
        )
        .await
    }

    pub async fn archive(&self, id: i64, reason: impl Into<String>) -> bool {
        self.transition(
            id,
            TransitionRequest::Archive {
                reason: reason.into(),
            },
        )
        .await
    }

    /// Fail-closed uniqueness check: any failure reads as "not available".
    pub async fn check_title_availability(&self, title: &str, exclude_id: Option<i64>) -> bool {
        match self.service.check_title(title, exclude_id).await.into_result() {
            Ok(availability) => availability.is_available,
            Err(message) => {
                tracing::debug!(entity = %self.entity(), %message, "Title check failed");
                false
            }
        }
    }

    pub async fn load_stats(&self) {
        match self.service.stats().await.into_result() {
            Ok(stats) => self.dispatch(EntityIntent::StatsLoaded { stats }),
            Err(message) => {
                tracing::warn!(entity = %self.entity(), %message, "Failed to load stats");
            }
        }
    }

    pub async fn load_lookups(&self) {
        match self.service.lookups().await.into_result() {
            Ok(lookups) => self.dispatch(EntityIntent::LookupsLoaded { lookups }),
            Err(message) => {
                tracing::warn!(entity = %self.entity(), %message, "Failed to load lookups");
            }
        }
    }

    pub async fn history(&self, id: i64) -> Option<Vec<HistoryEntry>> {
        match self.service.history(id).await.into_result() {
            Ok(entries) => Some(entries),
            Err(message) => {
                self.dispatch(EntityIntent::RequestFailed { message });
                None
            }
        }
    }

    pub fn clear_error(&self) {
        self.dispatch(EntityIntent::ErrorCleared);
    }

    pub fn reset_current(&self) {
        self.dispatch(EntityIntent::CurrentReset);
    }

    /// Merges filters into state without fetching.
    pub fn update_search_params(&self, overrides: &SearchOverrides) {
        let mut state = self.state.lock();
        let search = state.search.merged(overrides);
        apply(&mut state, EntityIntent::SearchUpdated { search });
    }

    fn refuse(&self, flag: BusyFlag, message: String) {
        tracing::debug!(entity = %self.entity(), %message, "Request refused before sending");
        self.dispatch(EntityIntent::MutationFailed { flag, message });
    }

    async fn mutate<T, F>(&self, flag: BusyFlag, action: &str, request: F) -> Option<T>
    where
        F: Future<Output = Envelope<T>>,
    {
        self.dispatch(EntityIntent::MutationStarted { flag });

        match request.await.into_result() {
            Ok(data) => {
                self.dispatch(EntityIntent::MutationSucceeded { flag });
                tracing::info!(entity = %self.entity(), action, "Mutation succeeded");
                self.reload().await;
                Some(data)
            }
            Err(message) => {
                tracing::warn!(entity = %self.entity(), action, %message, "Mutation failed");
                self.dispatch(EntityIntent::MutationFailed { flag, message });
                None
            }
        }
    }
}
