//! Live server tests
//!
//! Run against a running server with: cargo test -- --ignored

use reqwest::{multipart::Form, Client};
use serde_json::{json, Value};

const BASE_URL: &str = "http://localhost:8000/api/v1";

async fn create_animal(client: &Client, name: &str) -> Value {
    let form = Form::new()
        .text("name", name.to_string())
        .text("type", "Dog")
        .text("age", "2.5")
        .text("breed", "Labrador Retriever")
        .text("health_status", "Healthy")
        .text("description", "Friendly and energetic dog who loves to play fetch.");

    let response = client
        .post(format!("{}/animals", BASE_URL))
        .multipart(form)
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 201);
    response.json().await.expect("Failed to parse response")
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
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
#[ignore]
async fn test_adoption_round_trip() {
    let client = Client::new();
    let animal = create_animal(&client, "Buddy").await;

    let response = client
        .post(format!("{}/adoptions", BASE_URL))
        .json(&json!({
            "full_name": "Jane Doe",
            "email": "jane@example.com",
            "phone": "555-0100",
            "address": "1 Main St",
            "housing_situation": "Apartment",
            "home_ownership": "Rent",
            "adoption_reason": "Companionship",
            "animal_id": animal["id"]
        }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 201);
    let adoption: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(adoption["status"], "Pending");

    let response = client
        .patch(format!("{}/adoptions/{}/approve", BASE_URL, adoption["id"]))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());
    let approved: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(approved["status"], "Approved");
}

#[tokio::test]
#[ignore]
async fn test_get_missing_animal() {
    let client = Client::new();

    let response = client
        .get(format!("{}/animals/999999999", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 404);
}

#[tokio::test]
#[ignore]
async fn test_statistics_shape() {
    let client = Client::new();

    let response = client
        .get(format!("{}/statistics/adoptions", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());
    let body: Value = response.json().await.expect("Failed to parse response");
    assert!(body["adoption_rate"].is_number());
    assert!(body["pending_adoptions"].is_i64());
}
