//! The listings screen driven through the real app against a mock API.

mod common;

use common::{TestCtx, listing_rows, message, mock_list};
use estate_business::models::Listing;
use estate_business::{Notifications, ResourceCompute, ResourceScreen, ToastKind};
use kittest::Queryable;
use serde_json::json;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer};

#[tokio::test]
async fn test_listings_render_fetched_rows() {
    let server = MockServer::start().await;
    mock_list(&server, "/listings/v1/getAllListings", listing_rows()).await;

    let mut ctx = TestCtx::new_app(server);
    ctx.settle().await;

    let harness = ctx.harness_mut();
    assert!(harness.query_by_label("Lake View").is_some());
    assert!(harness.query_by_label("Hill Top").is_some());
    assert!(harness.query_by_label("2 records").is_some());
    assert!(harness.query_by_label("P-1").is_some());
}

#[tokio::test]
async fn test_search_narrows_rows_until_cleared() {
    let server = MockServer::start().await;
    mock_list(&server, "/listings/v1/getAllListings", listing_rows()).await;

    let mut ctx = TestCtx::new_app(server);
    ctx.settle().await;

    let harness = ctx.harness_mut();
    harness
        .state_mut()
        .state
        .ctx
        .update::<ResourceScreen<Listing>>(|screen| {
            screen.table_mut().set_query("hill");
        });
    harness.step();
    harness.step();

    assert!(harness.query_by_label("Hill Top").is_some());
    assert!(harness.query_by_label("Lake View").is_none());
    assert!(harness.query_by_label("1 records").is_some());

    harness.get_by_label("Clear Filters").click();
    harness.step();
    harness.step();

    assert!(harness.query_by_label("Lake View").is_some());
    assert!(harness.query_by_label("2 records").is_some());
}

#[tokio::test]
async fn test_approve_from_menu_toasts_and_refetches() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/listings/v1/getAllListings"))
        .respond_with(common::success(listing_rows()))
        .expect(2)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/listings/v1/updateStatus"))
        .and(body_json(json!({ "unique_property_id": "P-1", "property_status": 1 })))
        .respond_with(message("Listing approved"))
        .expect(1)
        .mount(&server)
        .await;

    let mut ctx = TestCtx::new_app(server);
    ctx.settle().await;

    {
        let harness = ctx.harness_mut();
        let first_menu = harness.get_all_by_label("⋮").next();
        first_menu.expect("a menu button per row").click();
        harness.step();
        harness.get_by_label("Approve").click();
        harness.step();
    }
    ctx.settle().await;

    let harness = ctx.harness_mut();
    assert!(harness.query_by_label("Listing approved").is_some());
    assert!(harness.query_by_label("Approve").is_none(), "menu should close");

    let app = harness.state();
    let toasts = app.state.ctx.state::<Notifications>().toasts();
    assert_eq!(toasts.len(), 1);
    assert_eq!(toasts[0].kind, ToastKind::Success);
    assert_eq!(app.state.ctx.compute::<ResourceCompute<Listing>>().version, 2);
}
