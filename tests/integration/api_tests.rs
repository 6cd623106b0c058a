//! API integration tests
//!
//! Require a running server backed by a fresh database.

use reqwest::{
    multipart::{Form, Part},
    Client,
};
use serde_json::{json, Value};
use uuid::Uuid;

const BASE_URL: &str = "http://localhost:5000/api";

/// 1x1 transparent PNG
const PNG_PIXEL: &[u8] = &[
    0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A, 0x00, 0x00, 0x00, 0x0D, 0x49, 0x48, 0x44,
    0x52, 0x00, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00, 0x01, 0x08, 0x06, 0x00, 0x00, 0x00, 0x1F,
    0x15, 0xC4, 0x89, 0x00, 0x00, 0x00, 0x0A, 0x49, 0x44, 0x41, 0x54, 0x78, 0x9C, 0x63, 0x00,
    0x01, 0x00, 0x00, 0x05, 0x00, 0x01, 0x0D, 0x0A, 0x2D, 0xB4, 0x00, 0x00, 0x00, 0x00, 0x49,
    0x45, 0x4E, 0x44, 0xAE, 0x42, 0x60, 0x82,
];

/// Register a throwaway admin, returning its username and token
async fn register_admin(client: &Client) -> (String, String) {
    let suffix = Uuid::new_v4().simple().to_string();
    let username = format!("admin{}", &suffix[..8]);
    let response = client
        .post(format!("{}/admin/register", BASE_URL))
        .json(&json!({
            "username": username,
            "email": format!("{}@rentalhub.test", username),
            "password": "secret123"
        }))
        .send()
        .await
        .expect("Failed to send register request");

    assert_eq!(response.status(), 201);
    let body: Value = response.json().await.expect("Failed to parse register response");
    let token = body["token"].as_str().expect("No token in response").to_string();
    (username, token)
}

async fn get_auth_token(client: &Client) -> String {
    register_admin(client).await.1
}

fn product_form(name: &str, with_image: bool) -> Form {
    let form = Form::new()
        .text("name", name.to_string())
        .text("description", "Adjustable hospital bed for home care")
        .text("category", "Health & Fitness")
        .text("features", "Remote control, Side rails, ,Wheels")
        .text("specifications", r#"{"Weight":"80kg","Warranty":"1 year"}"#);

    if with_image {
        let image = Part::bytes(PNG_PIXEL.to_vec())
            .file_name("bed.png")
            .mime_str("image/png")
            .expect("Invalid mime type");
        form.part("images", image)
    } else {
        form
    }
}

async fn create_product(client: &Client, token: &str, name: &str) -> Value {
    let response = client
        .post(format!("{}/products", BASE_URL))
        .bearer_auth(token)
        .multipart(product_form(name, true))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 201);
    response.json().await.expect("Failed to parse response")
}

async fn submit_inquiry(client: &Client, product_id: &str) -> reqwest::Response {
    client
        .post(format!("{}/inquiries", BASE_URL))
        .json(&json!({
            "customerName": "Asha Rao",
            "email": "asha@example.com",
            "phone": "9876543210",
            "whatsappNumber": "9876543210",
            "productId": product_id,
            "rentalDuration": "3 months",
            "location": "Pune"
        }))
        .send()
        .await
        .expect("Failed to send request")
}

#[tokio::test]
#[ignore] // Run with: cargo test -- --ignored
async fn test_health_check() {
    let client = Client::new();

    let response = client
        .get(format!("{}/health", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["status"], "ok");
    assert_eq!(body["database"], "connected");
}

#[tokio::test]
#[ignore]
async fn test_register_then_login() {
    let client = Client::new();
    let suffix = &Uuid::new_v4().simple().to_string()[..8];
    let username = format!("owner{}", suffix);

    let response = client
        .post(format!("{}/admin/register", BASE_URL))
        .json(&json!({
            "username": username,
            "email": format!("{}@rentalhub.test", username),
            "password": "secret123"
        }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 201);

    // Duplicate identity
    let response = client
        .post(format!("{}/admin/register", BASE_URL))
        .json(&json!({
            "username": username.to_uppercase(),
            "email": format!("other{}@rentalhub.test", suffix),
            "password": "secret123"
        }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 409);

    // Login by email
    let response = client
        .post(format!("{}/admin/login", BASE_URL))
        .json(&json!({
            "username": format!("{}@rentalhub.test", username),
            "password": "secret123"
        }))
        .send()
        .await
        .expect("Failed to send request");
    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    let token = body["token"].as_str().expect("No token in response");
    assert_eq!(body["admin"]["username"], username.as_str());
    assert!(body["admin"].get("password").is_none());

    let response = client
        .get(format!("{}/admin/verify", BASE_URL))
        .bearer_auth(token)
        .send()
        .await
        .expect("Failed to send request");
    assert!(response.status().is_success());
}

#[tokio::test]
#[ignore]
async fn test_login_errors_do_not_reveal_accounts() {
    let client = Client::new();
    let (username, _) = register_admin(&client).await;

    let unknown = client
        .post(format!("{}/admin/login", BASE_URL))
        .json(&json!({ "username": "nobody-here", "password": "whatever" }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(unknown.status(), 401);
    let unknown: Value = unknown.json().await.expect("Failed to parse response");

    let wrong = client
        .post(format!("{}/admin/login", BASE_URL))
        .json(&json!({ "username": username, "password": "wrong-password" }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(wrong.status(), 401);
    let wrong: Value = wrong.json().await.expect("Failed to parse response");

    assert_eq!(unknown["message"], wrong["message"]);
}

#[tokio::test]
#[ignore]
async fn test_create_product_with_image() {
    let client = Client::new();
    let token = get_auth_token(&client).await;

    let product = create_product(&client, &token, "Hospital Bed").await;
    assert_eq!(product["category"], "Health & Fitness");
    assert_eq!(product["isActive"], true);
    assert_eq!(product["features"], json!(["Remote control", "Side rails", "Wheels"]));
    assert_eq!(product["specifications"]["Weight"], "80kg");

    let images = product["images"].as_array().expect("No images");
    assert_eq!(images.len(), 1);
    let filename = images[0].as_str().expect("Image is not a string");
    assert!(filename.ends_with(".png"));

    let response = client
        .get(format!("http://localhost:5000/uploads/{}", filename))
        .send()
        .await
        .expect("Failed to send request");
    assert!(response.status().is_success());
}

#[tokio::test]
#[ignore]
async fn test_create_product_requires_an_image() {
    let client = Client::new();
    let token = get_auth_token(&client).await;

    let response = client
        .post(format!("{}/products", BASE_URL))
        .bearer_auth(&token)
        .multipart(product_form("Imageless", false))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 400);
}

#[tokio::test]
#[ignore]
async fn test_hidden_products_only_listed_for_admins() {
    let client = Client::new();
    let token = get_auth_token(&client).await;

    let product = create_product(&client, &token, "Baby Gate").await;
    let id = product["id"].as_str().expect("No id").to_string();

    let toggle = |token: String| {
        let client = client.clone();
        let id = id.clone();
        async move {
            let response = client
                .patch(format!("{}/products/{}/toggle-status", BASE_URL, id))
                .bearer_auth(token)
                .send()
                .await
                .expect("Failed to send request");
            assert!(response.status().is_success());
            response.json::<Value>().await.expect("Failed to parse response")
        }
    };

    let hidden = toggle(token.clone()).await;
    assert_eq!(hidden["isActive"], false);

    let public: Value = client
        .get(format!("{}/products", BASE_URL))
        .send()
        .await
        .expect("Failed to send request")
        .json()
        .await
        .expect("Failed to parse response");
    assert!(!public.as_array().expect("Not a list").iter().any(|p| p["id"] == id.as_str()));

    let all: Value = client
        .get(format!("{}/products/admin/all", BASE_URL))
        .bearer_auth(&token)
        .send()
        .await
        .expect("Failed to send request")
        .json()
        .await
        .expect("Failed to parse response");
    assert!(all.as_array().expect("Not a list").iter().any(|p| p["id"] == id.as_str()));

    let shown = toggle(token).await;
    assert_eq!(shown["isActive"], true);
}

#[tokio::test]
#[ignore]
async fn test_inquiry_for_missing_product() {
    let client = Client::new();

    let response = submit_inquiry(&client, &Uuid::new_v4().to_string()).await;
    assert_eq!(response.status(), 404);
}

#[tokio::test]
#[ignore]
async fn test_inquiry_lifecycle() {
    let client = Client::new();
    let token = get_auth_token(&client).await;

    let product = create_product(&client, &token, "Treadmill").await;
    let product_id = product["id"].as_str().expect("No id").to_string();

    let response = submit_inquiry(&client, &product_id).await;
    assert_eq!(response.status(), 201);
    let receipt: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(receipt["inquiry"]["productName"], "Treadmill");
    let inquiry_id = receipt["inquiry"]["id"].as_str().expect("No id").to_string();

    // Unknown status is rejected and leaves the inquiry untouched
    let response = client
        .patch(format!("{}/inquiries/{}/status", BASE_URL, inquiry_id))
        .bearer_auth(&token)
        .json(&json!({ "status": "archived" }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 400);

    let inquiry: Value = client
        .get(format!("{}/inquiries/{}", BASE_URL, inquiry_id))
        .bearer_auth(&token)
        .send()
        .await
        .expect("Failed to send request")
        .json()
        .await
        .expect("Failed to parse response");
    assert_eq!(inquiry["status"], "new");
    assert_eq!(inquiry["product"]["name"], "Treadmill");

    let response = client
        .patch(format!("{}/inquiries/{}/status", BASE_URL, inquiry_id))
        .bearer_auth(&token)
        .json(&json!({ "status": "contacted" }))
        .send()
        .await
        .expect("Failed to send request");
    assert!(response.status().is_success());

    let stats: Value = client
        .get(format!("{}/inquiries/stats/overview", BASE_URL))
        .bearer_auth(&token)
        .send()
        .await
        .expect("Failed to send request")
        .json()
        .await
        .expect("Failed to parse response");
    let by_status: i64 = ["new", "contacted", "converted", "closed"]
        .iter()
        .map(|s| stats[s].as_i64().expect("Missing counter"))
        .sum();
    assert_eq!(by_status, stats["total"].as_i64().expect("Missing total"));

    // Renaming the product with a new image leaves the snapshot alone
    let original_image = product["images"][0].as_str().expect("No image").to_string();
    let replacement = Part::bytes(PNG_PIXEL.to_vec())
        .file_name("treadmill-v2.png")
        .mime_str("image/png")
        .expect("Invalid mime type");
    let response = client
        .put(format!("{}/products/{}", BASE_URL, product_id))
        .bearer_auth(&token)
        .multipart(Form::new().text("name", "Treadmill Pro").part("images", replacement))
        .send()
        .await
        .expect("Failed to send request");
    assert!(response.status().is_success());

    let updated: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(updated["name"], "Treadmill Pro");
    // Untouched fields are kept, images are replaced wholesale
    assert_eq!(updated["category"], "Health & Fitness");
    assert_eq!(updated["features"], json!(["Remote control", "Side rails", "Wheels"]));
    let images = updated["images"].as_array().expect("No images");
    assert_eq!(images.len(), 1);
    assert_ne!(images[0].as_str(), Some(original_image.as_str()));

    let inquiry: Value = client
        .get(format!("{}/inquiries/{}", BASE_URL, inquiry_id))
        .bearer_auth(&token)
        .send()
        .await
        .expect("Failed to send request")
        .json()
        .await
        .expect("Failed to parse response");
    assert_eq!(inquiry["productName"], "Treadmill");
    assert_eq!(inquiry["product"]["name"], "Treadmill Pro");

    // Deleting the product keeps the inquiry and its snapshot
    let response = client
        .delete(format!("{}/products/{}", BASE_URL, product_id))
        .bearer_auth(&token)
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 204);

    let inquiry: Value = client
        .get(format!("{}/inquiries/{}", BASE_URL, inquiry_id))
        .bearer_auth(&token)
        .send()
        .await
        .expect("Failed to send request")
        .json()
        .await
        .expect("Failed to parse response");
    assert_eq!(inquiry["productName"], "Treadmill");
    assert!(inquiry["product"].is_null());
}
