//! Shared test utilities and mock infrastructure.

#![allow(dead_code, unused_imports)]

pub mod mock_backend;

use async_trait::async_trait;
use obsdesk::api::{ApiClient, Envelope};
use obsdesk::config::ApiConfig;
use obsdesk::model::{
    ArticleStats, CreatedRecord, EntityRecord, HistoryEntry, LookupData, RecordDraft, SearchPage,
    SearchParams, TitleAvailability, WorkflowStatus,
};
use obsdesk::service::{
    EndpointMap, EntityService, HttpEntityService, TransitionKind, TransitionRequest,
};
use obsdesk::store::EntityStore;
use parking_lot::Mutex;
use serde_json::Value;
use std::collections::{HashMap, VecDeque};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tempfile::TempDir;

use mock_backend::MockBackend;

/// Create a temporary config file with the given TOML content.
pub fn temp_config(content: &str) -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let config_path = temp_dir.path().join("config.toml");
    std::fs::write(&config_path, content).expect("Failed to write config");
    (temp_dir, config_path)
}

// -- Sample data --------------------------------------------------------------

pub fn sample_record(id: i64) -> EntityRecord {
    EntityRecord {
        id,
        observation_subject: "Perimeter".to_string(),
        observation_title: format!("Observation {}", id),
        discussion: "Seen during the night round".to_string(),
        conclusion: "Procedure gap".to_string(),
        initial_recommendation: "Add a checklist".to_string(),
        record_type: "security".to_string(),
        originating_main_unit: "Operations".to_string(),
        originating_subunit: "Night shift".to_string(),
        current_assignment: "Facilities".to_string(),
        status: WorkflowStatus::Draft,
        submission_status: None,
        submitted_by: None,
        submitted_date: None,
        approved_by: None,
        created_at: Some("2024-05-01T08:00:00Z".to_string()),
        updated_at: None,
    }
}

pub fn sample_records(count: usize) -> Vec<EntityRecord> {
    (1..=count as i64).map(sample_record).collect()
}

/// The same records as JSON, the way the backend returns them.
pub fn records_json(count: usize) -> Value {
    serde_json::to_value(sample_records(count)).unwrap()
}

pub fn valid_draft() -> RecordDraft {
    RecordDraft::from(&sample_record(0))
}

// -- Fake service -------------------------------------------------------------

fn ok<T>(data: T) -> Envelope<T> {
    Envelope::ok(data, "Success")
}

/// In-memory [`EntityService`] with scripted results and call counters.
pub struct FakeService {
    calls: Mutex<HashMap<&'static str, usize>>,
    /// Queued list results, each with a delay in milliseconds.
    search_results: Mutex<VecDeque<(Envelope<SearchPage>, u64)>>,
    pub searches: Mutex<Vec<SearchParams>>,
    pub get_result: Mutex<Envelope<EntityRecord>>,
    pub create_result: Mutex<Envelope<CreatedRecord>>,
    /// Shared by update, delete and transitions.
    pub mutation_result: Mutex<Envelope<Value>>,
    pub transitions: Mutex<Vec<(i64, TransitionRequest)>>,
    pub stats_result: Mutex<Envelope<ArticleStats>>,
    pub lookups_result: Mutex<Envelope<LookupData>>,
    pub history_result: Mutex<Envelope<Vec<HistoryEntry>>>,
    pub title_result: Mutex<Envelope<TitleAvailability>>,
}

impl Default for FakeService {
    fn default() -> Self {
        Self {
            calls: Mutex::new(HashMap::new()),
            search_results: Mutex::new(VecDeque::new()),
            searches: Mutex::new(Vec::new()),
            get_result: Mutex::new(ok(sample_record(1))),
            create_result: Mutex::new(ok(CreatedRecord { id: Some(101) })),
            mutation_result: Mutex::new(ok(Value::Bool(true))),
            transitions: Mutex::new(Vec::new()),
            stats_result: Mutex::new(ok(ArticleStats::default())),
            lookups_result: Mutex::new(ok(LookupData::default())),
            history_result: Mutex::new(ok(Vec::new())),
            title_result: Mutex::new(ok(TitleAvailability { is_available: true })),
        }
    }
}

impl FakeService {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn calls(&self, method: &str) -> usize {
        self.calls.lock().get(method).copied().unwrap_or(0)
    }

    fn record(&self, method: &'static str) {
        *self.calls.lock().entry(method).or_insert(0) += 1;
    }

    /// Queue a list result returned after `delay_ms`.
    pub fn push_search(&self, result: Envelope<SearchPage>, delay_ms: u64) {
        self.search_results.lock().push_back((result, delay_ms));
    }

    pub fn push_records(&self, count: usize) {
        self.push_search(
            ok(SearchPage {
                items: sample_records(count),
                total_count: None,
            }),
            0,
        );
    }

    pub fn fail_mutations(&self, status: u16, message: &str) {
        *self.mutation_result.lock() = Envelope::failure(status, message);
        *self.create_result.lock() = Envelope::failure(status, message);
    }
}

#[async_trait]
impl EntityService for FakeService {
    fn entity(&self) -> &str {
        "observation"
    }

    async fn search(&self, params: &SearchParams) -> Envelope<SearchPage> {
        self.record("search");
        self.searches.lock().push(params.clone());
        let next = self.search_results.lock().pop_front();
        match next {
            Some((result, delay_ms)) => {
                if delay_ms > 0 {
                    tokio::time::sleep(Duration::from_millis(delay_ms)).await;
                }
                result
            }
            None => ok(SearchPage::default()),
        }
    }

    async fn get(&self, _id: i64) -> Envelope<EntityRecord> {
        self.record("get");
        self.get_result.lock().clone()
    }

    async fn create(&self, _draft: &RecordDraft) -> Envelope<CreatedRecord> {
        self.record("create");
        self.create_result.lock().clone()
    }

    async fn update(&self, _id: i64, _draft: &RecordDraft) -> Envelope<Value> {
        self.record("update");
        self.mutation_result.lock().clone()
    }

    async fn delete(&self, _id: i64) -> Envelope<Value> {
        self.record("delete");
        self.mutation_result.lock().clone()
    }

    async fn transition(&self, id: i64, request: &TransitionRequest) -> Envelope<Value> {
        self.record("transition");
        self.transitions.lock().push((id, request.clone()));
        self.mutation_result.lock().clone()
    }

    async fn stats(&self) -> Envelope<ArticleStats> {
        self.record("stats");
        self.stats_result.lock().clone()
    }

    async fn lookups(&self) -> Envelope<LookupData> {
        self.record("lookups");
        self.lookups_result.lock().clone()
    }

    async fn history(&self, _id: i64) -> Envelope<Vec<HistoryEntry>> {
        self.record("history");
        self.history_result.lock().clone()
    }

    async fn check_title(
        &self,
        _title: &str,
        _exclude_id: Option<i64>,
    ) -> Envelope<TitleAvailability> {
        self.record("check_title");
        self.title_result.lock().clone()
    }
}

// -- Composite builders -------------------------------------------------------

/// A store wired to a fresh [`FakeService`].
pub fn fake_store() -> (EntityStore, Arc<FakeService>) {
    let service = FakeService::new();
    let store = EntityStore::new(service.clone());
    (store, service)
}

pub fn api_client(base_url: &str) -> ApiClient {
    let config = ApiConfig {
        base_url: base_url.to_string(),
        timeout_seconds: 5,
        connect_timeout_seconds: 2,
    };
    ApiClient::new(&config).expect("Failed to build client")
}

/// HTTP service for the observation entity against a mock backend.
pub fn http_service(backend: &MockBackend) -> HttpEntityService {
    HttpEntityService::new(
        api_client(&backend.base_url()),
        EndpointMap::new("observation", "/Observation"),
    )
}

pub fn http_store(backend: &MockBackend) -> EntityStore {
    EntityStore::new(Arc::new(http_service(backend)))
}
