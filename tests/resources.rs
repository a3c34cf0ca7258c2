//! Billing, datacenter and repo resource tests against a mock server.

use cycleapi::{
    ActiveServices, BillingMethods, BuildParams, CycleClient, Datacenters, Get, List,
    QueryParams, Repos,
};
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn test_make_primary_posts_task() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/billing/methods/m1/tasks"))
        .and(body_json(json!({ "type": "make_primary" })))
        .respond_with(ResponseTemplate::new(202).set_body_json(json!({
            "data": { "id": "job1", "type": "make_primary" }
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = CycleClient::new("test-token", &mock_server.uri()).unwrap();
    let response = BillingMethods::make_primary(&client, "m1").await.unwrap();

    assert!(response.is_success());
}

#[tokio::test]
async fn test_get_billing_method() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/billing/methods/m1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": {
                "id": "m1",
                "type": "billing_methods",
                "attributes": {
                    "name": "Company card",
                    "primary": true,
                    "credit_card": {
                        "name": "A Person",
                        "brand": "visa",
                        "expiration": { "month": 4, "year": 2030 }
                    },
                    "state": { "current": "active" }
                }
            }
        })))
        .mount(&mock_server)
        .await;

    let client = CycleClient::new("test-token", &mock_server.uri()).unwrap();
    let billing = BillingMethods::get(&client, "m1", None)
        .await
        .unwrap()
        .into_result()
        .unwrap()
        .data
        .unwrap();

    let attrs = billing.attributes.unwrap();
    assert!(attrs.primary);
    assert_eq!(attrs.credit_card.unwrap().expiration.year, 2030);
}

#[tokio::test]
async fn test_active_services_cached_per_team() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/billing/current"))
        .and(header("x-team-id", "billing-team"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": {
                "id": "svc",
                "type": "active_services",
                "attributes": { "due": 12.5, "containers": [] }
            }
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = CycleClient::new("test-token", &mock_server.uri())
        .unwrap()
        .with_team("billing-team");

    let first = ActiveServices::current(&client, None).await.unwrap();
    let second = ActiveServices::current(&client, None).await.unwrap();

    let due = |r: &cycleapi::ApiResponse<cycleapi::Single<cycleapi::ActiveServicesAttributes>>| {
        r.document()
            .and_then(|d| d.data.as_ref())
            .and_then(|s| s.attributes.as_ref())
            .map(|a| a.due)
    };
    assert_eq!(due(&first), Some(12.5));
    assert_eq!(due(&second), Some(12.5));

    ActiveServices::invalidate();
}

#[tokio::test]
async fn test_active_services_failure_not_cached() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/billing/current"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({
            "errors": [{ "status": "500", "title": "Internal error" }]
        })))
        .expect(2)
        .mount(&mock_server)
        .await;

    let client = CycleClient::new("test-token", &mock_server.uri())
        .unwrap()
        .with_team("failing-team");

    assert!(ActiveServices::current(&client, None).await.unwrap().is_failure());
    assert!(ActiveServices::current(&client, None).await.unwrap().is_failure());
}

#[tokio::test]
async fn test_datacenters_cached_per_query() {
    let mock_server = MockServer::start().await;
    let body = json!({
        "data": [{
            "id": "dc1",
            "type": "datacenters",
            "attributes": { "name": "Tokyo", "provider": "vultr", "active": true }
        }]
    });

    Mock::given(method("GET"))
        .and(path("/datacenters"))
        .and(query_param("filter[provider]", "vultr"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/datacenters"))
        .and(query_param("filter[provider]", "gcp"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "data": [] })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = CycleClient::new("test-token", &mock_server.uri())
        .unwrap()
        .with_team("dc-team");
    let vultr = QueryParams::new().filter("provider", "vultr");
    let gcp = QueryParams::new().filter("provider", "gcp");

    for _ in 0..2 {
        let document = Datacenters::list_cached(&client, Some(&vultr))
            .await
            .unwrap()
            .into_result()
            .unwrap();
        assert_eq!(document.data.len(), 1);
    }

    let document = Datacenters::list_cached(&client, Some(&gcp))
        .await
        .unwrap()
        .into_result()
        .unwrap();
    assert!(document.data.is_empty());
}

#[tokio::test]
async fn test_datacenters_uncached_list_always_fetches() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/datacenters"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "data": [] })))
        .expect(2)
        .mount(&mock_server)
        .await;

    let client = CycleClient::new("test-token", &mock_server.uri()).unwrap();
    Datacenters::list(&client, None).await.unwrap();
    Datacenters::list(&client, None).await.unwrap();
}

#[tokio::test]
async fn test_repo_build_posts_task() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/repos/r1/tasks"))
        .and(body_json(json!({
            "type": "build",
            "attributes": { "latest": false, "commit": "abc123", "description": "release" }
        })))
        .respond_with(ResponseTemplate::new(202).set_body_json(json!({
            "data": { "id": "job2", "type": "build" }
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = CycleClient::new("test-token", &mock_server.uri()).unwrap();
    let params = BuildParams {
        latest: false,
        commit: "abc123".to_string(),
        description: "release".to_string(),
    };

    let response = Repos::build(&client, "r1", &params).await.unwrap();
    assert!(response.is_success());
}
