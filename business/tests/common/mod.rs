//! Mock-server harness for driving business commands end to end.

#![allow(dead_code)]

use std::time::Duration;

use estate_business::models::{Listing, Media, Place, Subscription};
use estate_business::{BusinessConfig, ResourceScreen, register_shared};
use estate_states::StateCtx;
use serde_json::{Value, json};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// A mock server plus a `StateCtx` whose config points at it.
pub struct TestContext {
    pub mock_server: MockServer,
    pub ctx: StateCtx,
}

impl TestContext {
    pub async fn new() -> Self {
        let mock_server = MockServer::start().await;
        let config = BusinessConfig::new(mock_server.uri()).with_token("test_token");

        let mut ctx = StateCtx::new();
        register_shared(&mut ctx, config);
        ResourceScreen::<Listing>::register(&mut ctx);
        ResourceScreen::<Subscription>::register(&mut ctx);
        ResourceScreen::<Media>::register(&mut ctx);
        ResourceScreen::<Place>::register(&mut ctx);
        ResourceScreen::<Place>::register_import(&mut ctx);

        Self { mock_server, ctx }
    }

    /// Spawn queued commands and wait until every task has reported.
    pub async fn flush_and_wait(&mut self) {
        tokio::time::timeout(Duration::from_secs(5), self.ctx.run_until_idle())
            .await
            .expect("timed out waiting for pending tasks");
    }

    pub async fn shutdown(&mut self) {
        self.ctx.shutdown().await;
    }
}

pub fn success(data: Value) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({ "status": "success", "data": data }))
}

pub fn message(text: &str) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({ "status": "success", "message": text }))
}

pub fn server_error(text: &str) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({ "status": "error", "message": text }))
}

/// Mount a list endpoint that must be hit exactly `times` times.
pub async fn mock_list(server: &MockServer, endpoint: &str, rows: Value, times: u64) {
    Mock::given(method("GET"))
        .and(path(endpoint))
        .respond_with(success(rows))
        .expect(times)
        .mount(server)
        .await;
}

pub async fn mock_post(server: &MockServer, endpoint: &str, response: ResponseTemplate) {
    Mock::given(method("POST"))
        .and(path(endpoint))
        .respond_with(response)
        .mount(server)
        .await;
}

pub fn listing_rows() -> Value {
    json!([
        {
            "unique_property_id": "P-1",
            "property_name": "Lake View",
            "property_for": "Sell",
            "property_in": "Residential",
            "user_type": 4,
            "property_status": 0,
            "created_date": "2024-05-02 09:30:00"
        },
        {
            "unique_property_id": "P-2",
            "property_name": "Hill Top",
            "property_for": "Rent",
            "property_in": "Commercial",
            "user_type": "5",
            "property_status": "1",
            "created_date": "2024-05-03"
        }
    ])
}
