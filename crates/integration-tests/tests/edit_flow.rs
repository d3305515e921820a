//! Edit submissions: partial patches, staged-only uploads, deal changes.

use std::sync::Arc;

use myswipe_core::ListingMode;
use myswipe_dashboard::api::types::ProductDto;
use myswipe_dashboard::form::draft::ProductDraft;
use myswipe_dashboard::form::media::{InMemoryPreviews, PreviewAllocator};
use myswipe_dashboard::form::submit::SubmitOrchestrator;
use serde_json::json;
use wiremock::matchers::{body_json, method, path, path_regex};
use wiremock::{Mock, MockServer, ResponseTemplate};

use myswipe_integration_tests::{
    RecordingNotifier, staged_image, test_api_client, test_storage_client,
};

fn remote_product() -> ProductDto {
    serde_json::from_value(json!({
        "id": "p_9",
        "title": "Wool coat",
        "description": "Heavy winter coat",
        "price_minor": 250_00,
        "currency": "THB",
        "category": "Outerwear (Jackets, Coats, Blazers)",
        "brand": "Ekkamai Vintage",
        "active": true,
        "deal_active": false,
        "is_swipe_hour": false,
        "images": [
            {"id": "m_1", "url": "https://cdn.example.com/coat.jpg", "position": 0}
        ],
        "videos": [],
        "variants": [
            {"id": "v_1", "size": "M", "color": null, "sku": "WC-M", "price_minor": 250_00,
             "stock": 4, "active": true, "title": "M"}
        ],
        "created_at": "2026-05-01T10:00:00Z"
    }))
    .expect("product dto")
}

fn edit_draft(product: &ProductDto) -> (Arc<InMemoryPreviews>, ProductDraft) {
    let previews = Arc::new(InMemoryPreviews::new());
    let draft = ProductDraft::edit(product, Arc::clone(&previews) as Arc<dyn PreviewAllocator>);
    // The edit form requires a SKU like the create form does.
    (previews, draft)
}

#[tokio::test]
async fn patch_carries_only_changed_fields() {
    let server = MockServer::start().await;

    Mock::given(method("PATCH"))
        .and(path("/v1/products/p_9"))
        .and(body_json(json!({"title": "Wool coat (lined)"})))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let notifier = Arc::new(RecordingNotifier::new());
    let orchestrator = SubmitOrchestrator::new(
        test_api_client(&server.uri()),
        test_storage_client(&server.uri()),
        Arc::clone(&notifier) as Arc<dyn myswipe_dashboard::form::submit::Notifier>,
    );

    let product = remote_product();
    let (_previews, mut draft) = edit_draft(&product);
    draft.sku = "WC-M".to_string();
    draft.title = "Wool coat (lined)".to_string();

    let outcome = orchestrator.submit(&mut draft).await.expect("edit succeeds");
    assert_eq!(outcome.product_id.as_str(), "p_9");
    assert_eq!(notifier.successes(), vec!["Product updated".to_string()]);

    // Exactly one call: the patch. No media, no deal.
    let requests = server.received_requests().await.expect("recording enabled");
    assert_eq!(requests.len(), 1);
}

#[tokio::test]
async fn unchanged_edit_makes_no_calls() {
    let server = MockServer::start().await;

    let orchestrator = SubmitOrchestrator::new(
        test_api_client(&server.uri()),
        test_storage_client(&server.uri()),
        Arc::new(RecordingNotifier::new()),
    );

    let product = remote_product();
    let (_previews, mut draft) = edit_draft(&product);
    draft.sku = "WC-M".to_string();

    orchestrator.submit(&mut draft).await.expect("no-op edit succeeds");

    let requests = server.received_requests().await.expect("recording enabled");
    assert!(requests.is_empty());
}

#[tokio::test]
async fn edit_uploads_only_newly_staged_media() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/media/image-signed-url"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "path": "p_9/back.jpg",
            "token": "tok",
            "uploadUrl": format!("{}/raw/back.jpg", server.uri()),
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .and(path_regex(r"^/storage/v1/object/upload/sign/product-images/.*$"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/v1/products/p_9/images"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"ok": true})))
        .expect(1)
        .mount(&server)
        .await;

    let orchestrator = SubmitOrchestrator::new(
        test_api_client(&server.uri()),
        test_storage_client(&server.uri()),
        Arc::new(RecordingNotifier::new()),
    );

    let product = remote_product();
    let (_previews, mut draft) = edit_draft(&product);
    draft.sku = "WC-M".to_string();

    // One remote image already attached; stage one more.
    assert_eq!(draft.images.len(), 1);
    draft.images.add_files(vec![staged_image("back.jpg")]);
    assert_eq!(draft.images.staged_items().count(), 1);

    orchestrator.submit(&mut draft).await.expect("edit succeeds");

    // The remote item produced no signed-url call: exactly one pipeline ran.
    let requests = server.received_requests().await.expect("recording enabled");
    let signed_calls = requests
        .iter()
        .filter(|r| r.url.path() == "/v1/media/image-signed-url")
        .count();
    assert_eq!(signed_calls, 1);
}

#[tokio::test]
async fn enabling_a_deal_patches_the_deal_endpoint() {
    let server = MockServer::start().await;

    // price 250.00 at 30% -> 175.00 = 17500 minor units.
    Mock::given(method("PATCH"))
        .and(path("/v1/products/p_9/deal"))
        .and(body_json(json!({
            "deal_active": true,
            "deal_percent": 30,
            "deal_price_minor": 17500
        })))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let orchestrator = SubmitOrchestrator::new(
        test_api_client(&server.uri()),
        test_storage_client(&server.uri()),
        Arc::new(RecordingNotifier::new()),
    );

    let product = remote_product();
    let (_previews, mut draft) = edit_draft(&product);
    draft.sku = "WC-M".to_string();
    draft.set_mode(ListingMode::Deal);
    draft.discount_percent = Some(30);

    orchestrator.submit(&mut draft).await.expect("edit succeeds");

    let requests = server.received_requests().await.expect("recording enabled");
    assert_eq!(requests.len(), 1, "only the deal patch should run");
}

#[tokio::test]
async fn edit_hydration_seeds_matrix_and_overrides() {
    let product = remote_product();
    let (_previews, draft) = edit_draft(&product);

    assert!(draft.is_edit());
    assert_eq!(draft.title, "Wool coat");
    assert!((draft.price - 250.0).abs() < f64::EPSILON);

    let keys = draft.variant_keys();
    assert_eq!(keys.len(), 1);
    assert_eq!(keys[0].label(), "M");

    let resolved = draft.resolved_variants();
    assert_eq!(resolved[0].sku.as_deref(), Some("WC-M"));
    assert_eq!(resolved[0].stock, 4);
    assert!(resolved[0].available);
}
