#![allow(dead_code)]

use std::time::Duration;

use egui_kittest::Harness;
use estate_ui::EstateApp;
use estate_ui::state::State;
use serde_json::{Value, json};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Frames rendered while waiting for the mock server to answer.
pub const SETTLE_FRAMES: usize = 30;

pub struct TestCtx<'a> {
    mock_server: MockServer,
    harness: Harness<'a, EstateApp>,
}

impl<'a> TestCtx<'a> {
    /// Mount mocks on `mock_server` before calling this: the first frame already fetches.
    pub fn new_app(mock_server: MockServer) -> Self {
        let state = State::test(mock_server.uri());
        let app = EstateApp::new(state);
        let harness = Harness::builder()
            .with_size(egui::vec2(1280.0, 800.0))
            .build_eframe(|_| app);
        Self {
            mock_server,
            harness,
        }
    }

    pub fn mock_server(&self) -> &MockServer {
        &self.mock_server
    }

    pub fn harness_mut(&mut self) -> &mut Harness<'a, EstateApp> {
        &mut self.harness
    }

    pub fn harness(&self) -> &Harness<'a, EstateApp> {
        &self.harness
    }

    /// Alternate frames and short sleeps so spawned requests complete and get synced.
    pub async fn settle(&mut self) {
        for _ in 0..SETTLE_FRAMES {
            self.harness.step();
            yield_wait_for_network(20).await;
        }
        self.harness.step();
    }
}

pub async fn yield_wait_for_network(ms: u64) {
    tokio::time::sleep(Duration::from_millis(ms)).await;
}

pub fn success(data: Value) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({ "status": "success", "data": data }))
}

pub fn message(text: &str) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({ "status": "success", "message": text }))
}

pub async fn mock_list(server: &MockServer, endpoint: &str, rows: Value) {
    Mock::given(method("GET"))
        .and(path(endpoint))
        .respond_with(success(rows))
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
