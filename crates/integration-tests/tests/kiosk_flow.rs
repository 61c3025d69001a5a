//! Integration tests for the full kiosk journey.
//!
//! These tests require:
//! - A migrated kiosk database (cargo run -p photo-kiosk-cli -- migrate)
//! - The server running (cargo run -p photo-kiosk-server)
//!
//! Run with: cargo test -p photo-kiosk-integration-tests -- --ignored

use photo_kiosk_integration_tests::base_url;
use reqwest::{Client, StatusCode};
use reqwest::multipart::{Form, Part};
use serde_json::Value;

/// A tiny valid-enough JPEG payload for upload tests.
const FAKE_JPEG: &[u8] = &[0xFF, 0xD8, 0xFF, 0xE0, 0x00, 0x10, 0x4A, 0x46, 0x49, 0x46, 0xFF, 0xD9];

fn client() -> Client {
    Client::new()
}

/// Read a decimal field that the API serializes as a string.
fn decimal_field(value: &Value, key: &str) -> f64 {
    let field = &value[key];
    field
        .as_str()
        .and_then(|s| s.parse::<f64>().ok())
        .or_else(|| field.as_f64())
        .unwrap_or_else(|| panic!("field {key} is not a decimal: {field}"))
}

/// Test helper: create a session and return its JSON.
async fn create_session(client: &Client) -> Value {
    let resp = client
        .post(format!("{}/api/sessions", base_url()))
        .send()
        .await
        .expect("Failed to create session");
    assert_eq!(resp.status(), StatusCode::OK);
    resp.json().await.expect("Failed to parse session response")
}

/// Test helper: upload `count` fake photos into a session.
async fn upload_photos(client: &Client, session_id: &str, count: usize) -> Value {
    let mut form = Form::new();
    for i in 0..count {
        let part = Part::bytes(FAKE_JPEG.to_vec())
            .file_name(format!("IMG_{i:04}.jpg"))
            .mime_str("image/jpeg")
            .expect("Failed to build multipart part");
        form = form.part("files", part);
    }

    let resp = client
        .post(format!("{}/api/sessions/{session_id}/photos", base_url()))
        .multipart(form)
        .send()
        .await
        .expect("Failed to upload photos");
    assert_eq!(resp.status(), StatusCode::OK);
    resp.json().await.expect("Failed to parse upload response")
}

// ============================================================================
// Full Flow
// ============================================================================

#[tokio::test]
#[ignore = "Requires running kiosk server"]
async fn test_full_kiosk_flow() {
    let client = client();
    let base = base_url();

    // The kiosk shows current settings on the home screen.
    let settings: Value = client
        .get(format!("{base}/api/settings"))
        .send()
        .await
        .expect("Failed to get settings")
        .json()
        .await
        .expect("Failed to parse settings");
    let price = decimal_field(&settings, "price_per_photo");

    // Kiosk creates a session and renders the QR code.
    let session = create_session(&client).await;
    let session_id = session["session_id"].as_str().expect("session_id missing");
    assert_eq!(
        session["upload_path"].as_str().expect("upload_path missing"),
        format!("/upload/{session_id}")
    );
    assert!(
        session["upload_url"]
            .as_str()
            .expect("upload_url missing")
            .ends_with(&format!("/upload/{session_id}"))
    );

    // Kiosk poll: empty session.
    let polled: Value = client
        .get(format!("{base}/api/sessions/{session_id}"))
        .send()
        .await
        .expect("Failed to poll session")
        .json()
        .await
        .expect("Failed to parse session poll");
    assert_eq!(polled["photos_count"], 0);
    assert!(polled["last_uploaded_at"].is_null());

    // Phone uploads two photos.
    let uploaded = upload_photos(&client, session_id, 2).await;
    assert_eq!(uploaded.as_array().expect("upload response is a list").len(), 2);

    // Kiosk poll reflects the uploads.
    let polled: Value = client
        .get(format!("{base}/api/sessions/{session_id}"))
        .send()
        .await
        .expect("Failed to poll session")
        .json()
        .await
        .expect("Failed to parse session poll");
    assert_eq!(polled["photos_count"], 2);
    assert!(polled["last_uploaded_at"].is_string());

    // Kiosk creates the order; total must be count x price.
    let resp = client
        .post(format!("{base}/api/sessions/{session_id}/orders"))
        .json(&serde_json::json!({}))
        .send()
        .await
        .expect("Failed to create order");
    assert_eq!(resp.status(), StatusCode::OK);
    let order: Value = resp.json().await.expect("Failed to parse order");

    let order_number = order["order_number"].as_str().expect("order_number missing");
    assert!(order_number.starts_with("PK-"));
    assert_eq!(order["photo_count"], 2);
    assert_eq!(order["status"], "pending_print");
    let total = decimal_field(&order, "total_amount");
    assert!((total - price * 2.0).abs() < 1e-9, "total {total} != 2 x {price}");

    // Print view fetches the order with its photos.
    let fetched: Value = client
        .get(format!("{base}/api/orders/{order_number}"))
        .send()
        .await
        .expect("Failed to fetch order")
        .json()
        .await
        .expect("Failed to parse fetched order");
    assert_eq!(fetched["photos"].as_array().expect("photos missing").len(), 2);

    // afterprint marks the order printed.
    let printed: Value = client
        .post(format!("{base}/api/orders/{order_number}/mark-printed"))
        .send()
        .await
        .expect("Failed to mark printed")
        .json()
        .await
        .expect("Failed to parse printed order");
    assert_eq!(printed["status"], "printed");
    assert!(printed["printed_at"].is_string());
}

#[tokio::test]
#[ignore = "Requires running kiosk server"]
async fn test_uploaded_file_is_served() {
    let client = client();
    let base = base_url();

    let session = create_session(&client).await;
    let session_id = session["session_id"].as_str().expect("session_id missing");

    let uploaded = upload_photos(&client, session_id, 1).await;
    let url_path = uploaded[0]["url_path"].as_str().expect("url_path missing");

    let resp = client
        .get(format!("{base}{url_path}"))
        .send()
        .await
        .expect("Failed to fetch stored photo");
    assert_eq!(resp.status(), StatusCode::OK);
    let body = resp.bytes().await.expect("Failed to read photo bytes");
    assert_eq!(body.as_ref(), FAKE_JPEG);
}

#[tokio::test]
#[ignore = "Requires running kiosk server"]
async fn test_order_with_selected_photos_prices_the_subset() {
    let client = client();
    let base = base_url();

    let session = create_session(&client).await;
    let session_id = session["session_id"].as_str().expect("session_id missing");

    let uploaded = upload_photos(&client, session_id, 3).await;
    let photos = uploaded.as_array().expect("upload response is a list");
    let selected: Vec<&str> = photos
        .iter()
        .take(2)
        .map(|p| p["photo_id"].as_str().expect("photo_id missing"))
        .collect();

    let resp = client
        .post(format!("{base}/api/sessions/{session_id}/orders"))
        .json(&serde_json::json!({ "selected_photo_ids": selected }))
        .send()
        .await
        .expect("Failed to create order");
    assert_eq!(resp.status(), StatusCode::OK);

    let order: Value = resp.json().await.expect("Failed to parse order");
    assert_eq!(order["photo_count"], 2);
    assert_eq!(order["photos"].as_array().expect("photos missing").len(), 2);
}

// ============================================================================
// Error Paths
// ============================================================================

#[tokio::test]
#[ignore = "Requires running kiosk server"]
async fn test_unknown_session_is_404() {
    let client = client();
    let bogus = uuid::Uuid::new_v4().simple().to_string();

    let resp = client
        .get(format!("{}/api/sessions/{bogus}", base_url()))
        .send()
        .await
        .expect("Failed to query session");
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let body: Value = resp.json().await.expect("Failed to parse error body");
    assert_eq!(body["detail"], "Session not found");
}

#[tokio::test]
#[ignore = "Requires running kiosk server"]
async fn test_order_with_no_photos_is_400() {
    let client = client();
    let base = base_url();

    let session = create_session(&client).await;
    let session_id = session["session_id"].as_str().expect("session_id missing");

    let resp = client
        .post(format!("{base}/api/sessions/{session_id}/orders"))
        .json(&serde_json::json!({}))
        .send()
        .await
        .expect("Failed to post order");
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
#[ignore = "Requires running kiosk server"]
async fn test_upload_with_no_files_is_400() {
    let client = client();
    let base = base_url();

    let session = create_session(&client).await;
    let session_id = session["session_id"].as_str().expect("session_id missing");

    // A form with only plain fields carries no photos.
    let form = Form::new().text("note", "hello");
    let resp = client
        .post(format!("{base}/api/sessions/{session_id}/photos"))
        .multipart(form)
        .send()
        .await
        .expect("Failed to post upload");
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
#[ignore = "Requires running kiosk server"]
async fn test_unknown_order_is_404() {
    let client = client();

    let resp = client
        .get(format!("{}/api/orders/PK-00000000000000-FFFFFF", base_url()))
        .send()
        .await
        .expect("Failed to query order");
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}
