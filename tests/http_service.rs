//! HTTP service and store against the mock backend.

mod common;

use common::mock_backend::{MockBackend, MockResponse};
use common::{api_client, http_service, http_store, records_json, valid_draft};
use obsdesk::api::ApiClient;
use obsdesk::config::ApiConfig;
use obsdesk::model::{SearchOverrides, SearchParams};
use obsdesk::service::{EndpointMap, EntityService, HttpEntityService, TransitionRequest};
use serde_json::json;
use std::sync::Arc;

#[tokio::test]
async fn test_search_posts_filters() {
    let backend = MockBackend::start().await;
    backend
        .enqueue_response(MockResponse::ok(records_json(2)))
        .await;

    let params = SearchParams {
        status: "Submitted".to_string(),
        ..SearchParams::default()
    };
    let envelope = http_service(&backend).search(&params).await;

    assert!(envelope.success);
    assert_eq!(envelope.data.unwrap().items.len(), 2);

    let req = backend.last_request().await;
    assert_eq!(req.method, "POST");
    assert_eq!(req.path, "/api/Observation/search");
    let body = req.json();
    assert_eq!(body["status"], "Submitted");
    assert_eq!(body["pageNumber"], 1);
    assert_eq!(body["sortDirection"], "desc");
}

#[tokio::test]
async fn test_paged_load_against_bare_array() {
    let backend = MockBackend::start().await;
    backend
        .enqueue_response(MockResponse::ok(records_json(12)))
        .await;
    let store = http_store(&backend);

    store.load(SearchOverrides::page(2, 5)).await;

    let state = store.state();
    assert_eq!(state.error, None);
    assert_eq!(state.page_number, 2);
    assert_eq!(state.page_size, 5);
    assert_eq!(state.total_pages, 3);
    assert_eq!(state.records.len(), 12);
}

#[tokio::test]
async fn test_paged_object_uses_server_total() {
    let backend = MockBackend::start().await;
    backend
        .enqueue_response(MockResponse::ok(json!({
            "items": records_json(5),
            "totalCount": 41
        })))
        .await;
    let store = http_store(&backend);

    store.load(SearchOverrides::page(1, 5)).await;

    let state = store.state();
    assert_eq!(state.total_count, 41);
    assert_eq!(state.total_pages, 9);
}

#[tokio::test]
async fn test_bad_record_does_not_sink_the_page() {
    let backend = MockBackend::start().await;
    let mut records = records_json(3);
    records[1]["status"] = json!("Pending");
    backend.enqueue_response(MockResponse::ok(records)).await;
    let store = http_store(&backend);

    store.reload().await;

    let state = store.state();
    assert_eq!(state.error, None);
    let ids: Vec<i64> = state.records.iter().map(|r| r.id).collect();
    assert_eq!(ids, vec![1, 3]);
}

#[tokio::test]
async fn test_create_application_error() {
    let backend = MockBackend::start().await;
    backend
        .enqueue_response(MockResponse::envelope(500, "boom", serde_json::Value::Null))
        .await;
    let store = http_store(&backend);

    let created = store.create(&valid_draft()).await;

    assert_eq!(created, None);
    let state = store.state();
    assert_eq!(state.error.as_deref(), Some("boom"));
    assert!(!state.submitting);

    let requests = backend.captured_requests().await;
    assert_eq!(requests.len(), 1, "no reload after a failed create");
    assert_eq!(requests[0].target(), "/api/Observation/Create?submissionStatus=Draft");
}

#[tokio::test]
async fn test_create_reloads_list() {
    let backend = MockBackend::start().await;
    backend
        .enqueue_response(MockResponse::ok(json!({"articleId": 77})))
        .await;
    backend
        .enqueue_response(MockResponse::ok(records_json(1)))
        .await;
    let store = http_store(&backend);

    let created = store.create(&valid_draft()).await;

    assert_eq!(created.and_then(|c| c.id), Some(77));
    let requests = backend.captured_requests().await;
    assert_eq!(requests.len(), 2);
    assert_eq!(requests[0].json()["observationTitle"], "Observation 0");
    assert_eq!(requests[1].path, "/api/Observation/search");
    assert_eq!(store.state().records.len(), 1);
}

#[tokio::test]
async fn test_non_2xx_keeps_server_message() {
    let backend = MockBackend::start().await;
    backend
        .enqueue_response(MockResponse::error(409, "Title already used"))
        .await;

    let envelope = http_service(&backend).update(3, &valid_draft()).await;

    assert!(!envelope.success);
    assert_eq!(envelope.status_code, 409);
    assert_eq!(envelope.message, "Title already used");
    let req = backend.last_request().await;
    assert_eq!(req.method, "PUT");
    assert_eq!(req.path, "/api/Observation/3/UpdateArticle");
}

#[tokio::test]
async fn test_missing_data_is_failure() {
    let backend = MockBackend::start().await;
    backend
        .enqueue_response(MockResponse::envelope(200, "", serde_json::Value::Null))
        .await;

    let envelope = http_service(&backend).get(5).await;

    assert!(!envelope.success);
    assert_eq!(envelope.message, "Failed to load observation");
    assert_eq!(backend.last_request().await.path, "/api/Observation/GetArticleById/5");
}

#[tokio::test]
async fn test_false_payload_fails_remove_without_reload() {
    let backend = MockBackend::start().await;
    backend
        .enqueue_response(MockResponse::envelope(200, "not deleted", json!(false)))
        .await;
    let store = http_store(&backend);

    assert!(!store.remove(3).await);

    assert_eq!(store.state().error.as_deref(), Some("not deleted"));
    assert_eq!(backend.captured_requests().await.len(), 1);
}

#[tokio::test]
async fn test_delete_and_transition_routes() {
    let backend = MockBackend::start().await;
    let service = http_service(&backend);

    assert!(service.delete(8).await.success);
    assert!(
        service
            .transition(
                8,
                &TransitionRequest::Reject {
                    reason: "incomplete".to_string(),
                    notes: None,
                },
            )
            .await
            .success
    );
    assert!(
        service
            .transition(8, &TransitionRequest::Submit { notes: None })
            .await
            .success
    );

    let requests = backend.captured_requests().await;
    assert_eq!(requests[0].method, "DELETE");
    assert_eq!(requests[0].path, "/api/Observation/DeleteArticle/8");
    assert_eq!(requests[1].method, "PUT");
    assert_eq!(requests[1].path, "/api/Observation/8/reject");
    assert_eq!(requests[1].json(), json!({"reason": "incomplete"}));
    assert_eq!(requests[2].path, "/api/Observation/8/submit");
    assert_eq!(requests[2].json(), json!({}));
}

#[tokio::test]
async fn test_title_check_query() {
    let backend = MockBackend::start().await;
    backend
        .enqueue_response(MockResponse::ok(json!({"isAvailable": false})))
        .await;
    let store = http_store(&backend);

    let available = store
        .check_title_availability("Fire & safety", Some(12))
        .await;

    assert!(!available);
    let req = backend.last_request().await;
    assert_eq!(req.path, "/api/Observation/CheckArticleTitleAvailability");
    assert_eq!(
        req.query.as_deref(),
        Some("title=Fire+%26+safety&excludeArticleId=12")
    );
}

#[tokio::test]
async fn test_title_check_omits_zero_exclude() {
    let backend = MockBackend::start().await;
    backend
        .enqueue_response(MockResponse::ok(json!({"isAvailable": true})))
        .await;

    let envelope = http_service(&backend).check_title("Gate", Some(0)).await;

    assert!(envelope.success);
    assert_eq!(backend.last_request().await.query.as_deref(), Some("title=Gate"));
}

#[tokio::test]
async fn test_history_lookups_stats() {
    let backend = MockBackend::start().await;
    backend
        .enqueue_response(MockResponse::ok(json!([
            {"id": 1, "articleId": 4, "action": "Submitted", "performedBy": "amal"}
        ])))
        .await;
    backend
        .enqueue_response(MockResponse::ok(json!({
            "types": [{"id": 1, "nameEn": "Security", "nameAr": "أمن"}]
        })))
        .await;
    backend
        .enqueue_response(MockResponse::ok(json!({
            "totalArticles": 10,
            "draftArticles": 4,
            "submissionRate": 0.6
        })))
        .await;
    let service = http_service(&backend);

    let history = service.history(4).await.data.unwrap();
    let lookups = service.lookups().await.data.unwrap();
    let stats = service.stats().await.data.unwrap();

    assert_eq!(history[0].performed_by, "amal");
    assert_eq!(lookups.types[0].label_en, "Security");
    assert_eq!(stats.draft_articles, 4);

    let requests = backend.captured_requests().await;
    assert_eq!(requests[0].target(), "/api/Observation/GetArticlesHistory?articleId=4");
    assert_eq!(requests[1].path, "/api/Observation/GetLookupData");
    assert_eq!(requests[2].path, "/api/Observation/GetArticleStats");
}

#[tokio::test]
async fn test_unreachable_backend_is_an_envelope() {
    // Nothing listens on port 9 locally.
    let service = HttpEntityService::new(
        api_client("http://127.0.0.1:9/api"),
        EndpointMap::new("observation", "/Observation"),
    );

    let envelope = service.get(1).await;

    assert!(!envelope.success);
    assert_eq!(envelope.status_code, 502);
    assert!(!envelope.message.is_empty());
}

#[tokio::test]
async fn test_timeout_is_an_envelope() {
    let backend = MockBackend::start().await;
    backend
        .enqueue_response(MockResponse::ok(json!(true)).with_delay(2_000))
        .await;
    let config = ApiConfig {
        base_url: backend.base_url(),
        timeout_seconds: 1,
        connect_timeout_seconds: 1,
    };
    let service = HttpEntityService::new(
        ApiClient::new(&config).unwrap(),
        EndpointMap::new("observation", "/Observation"),
    );
    let store = obsdesk::store::EntityStore::new(Arc::new(service));

    assert!(!store.remove(1).await);

    let state = store.state();
    assert!(!state.deleting);
    assert!(state.error.unwrap().contains("timeout"));
}
