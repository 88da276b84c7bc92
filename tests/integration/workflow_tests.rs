//! Database-backed workflow tests
//!
//! Run with: DATABASE_URL=postgres://... cargo test -- --ignored

use axum::{http::StatusCode, Router};
use serde_json::{json, Value};

use crate::common::{
    animal_fields, app, application_body, database_pool, empty, get, json_request, multipart, send, DB_LOCK,
};

async fn create_animal(app: &Router, name: &str, animal_type: &str) -> Value {
    let request = multipart("POST", "/api/v1/animals", &animal_fields(name, animal_type), None);
    let (status, body) = send(app, request).await;
    assert_eq!(status, StatusCode::CREATED, "{}", body);
    body
}

async fn submit(app: &Router, animal_id: i64) -> (StatusCode, Value) {
    send(app, json_request("POST", "/api/v1/adoptions", &application_body(animal_id))).await
}

async fn type_distribution(app: &Router) -> Value {
    let (status, body) = send(app, get("/api/v1/statistics/animal-types")).await;
    assert_eq!(status, StatusCode::OK);
    body["type_distribution"].clone()
}

fn unique(prefix: &str) -> String {
    format!("{}-{}", prefix, &uuid::Uuid::new_v4().simple().to_string()[..8])
}

#[tokio::test]
#[ignore]
async fn test_submit_reserves_animal_and_blocks_second_application() {
    let _guard = DB_LOCK.lock().await;
    let app = app(database_pool().await);

    let buddy = create_animal(&app, &unique("Buddy"), "Dog").await;
    assert_eq!(buddy["is_adopted"], false);
    assert_eq!(buddy["type"], "Dog");
    assert_eq!(buddy["age"], 2.5);
    let id = buddy["id"].as_i64().unwrap();

    let (status, adoption) = submit(&app, id).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(adoption["status"], "Pending");
    assert_eq!(adoption["animal_id"], id);

    let (_, animal) = send(&app, get(&format!("/api/v1/animals/{}", id))).await;
    assert_eq!(animal["is_adopted"], true);

    let (_, before) = send(&app, get("/api/v1/statistics/adoptions")).await;
    let (status, body) = submit(&app, id).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"], "Conflict");
    let (_, after) = send(&app, get("/api/v1/statistics/adoptions")).await;
    assert_eq!(before["total_adoptions"], after["total_adoptions"]);
}

#[tokio::test]
#[ignore]
async fn test_submit_for_missing_animal() {
    let _guard = DB_LOCK.lock().await;
    let app = app(database_pool().await);

    let (_, before) = send(&app, get("/api/v1/statistics/adoptions")).await;
    let (status, body) = submit(&app, 999_999_999).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Animal with ID 999999999 not found");

    // Nothing is stored for a missing animal
    let (_, after) = send(&app, get("/api/v1/statistics/adoptions")).await;
    assert_eq!(before["total_adoptions"], after["total_adoptions"]);
}

#[tokio::test]
#[ignore]
async fn test_approve_reserved_animal() {
    let _guard = DB_LOCK.lock().await;
    let app = app(database_pool().await);

    let animal = create_animal(&app, &unique("Milo"), "Cat").await;
    let (_, adoption) = submit(&app, animal["id"].as_i64().unwrap()).await;
    let adoption_id = adoption["id"].as_i64().unwrap();

    let uri = format!("/api/v1/adoptions/{}/approve", adoption_id);
    let (status, approved) = send(&app, empty("PATCH", &uri)).await;
    assert_eq!(status, StatusCode::OK, "{}", approved);
    assert_eq!(approved["status"], "Approved");

    // Only pending applications transition
    let (status, _) = send(&app, empty("PATCH", &uri)).await;
    assert_eq!(status, StatusCode::CONFLICT);
    let reject = format!("/api/v1/adoptions/{}/reject", adoption_id);
    let (status, _) = send(&app, empty("PATCH", &reject)).await;
    assert_eq!(status, StatusCode::CONFLICT);
}

#[tokio::test]
#[ignore]
async fn test_reject_keeps_animal_reserved() {
    let _guard = DB_LOCK.lock().await;
    let app = app(database_pool().await);

    let animal = create_animal(&app, &unique("Kiwi"), "Bird").await;
    let animal_id = animal["id"].as_i64().unwrap();
    let (_, adoption) = submit(&app, animal_id).await;

    let uri = format!("/api/v1/adoptions/{}/reject", adoption["id"]);
    let (status, rejected) = send(&app, empty("PATCH", &uri)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(rejected["status"], "Rejected");

    let (_, animal) = send(&app, get(&format!("/api/v1/animals/{}", animal_id))).await;
    assert_eq!(animal["is_adopted"], true);
}

#[tokio::test]
#[ignore]
async fn test_partial_update_touches_only_supplied_fields() {
    let _guard = DB_LOCK.lock().await;
    let app = app(database_pool().await);

    let original = create_animal(&app, &unique("Rex"), "Dog").await;
    let uri = format!("/api/v1/animals/{}", original["id"]);

    let request = multipart("PUT", &uri, &[("age", "3"), ("health_status", "Vaccinated")], None);
    let (status, updated) = send(&app, request).await;
    assert_eq!(status, StatusCode::OK);

    assert_eq!(updated["age"], 3.0);
    assert_eq!(updated["health_status"], "Vaccinated");
    for field in ["name", "type", "breed", "gender", "description", "is_adopted", "created_at"] {
        assert_eq!(updated[field], original[field], "{} changed", field);
    }
    assert_ne!(updated["updated_at"], original["updated_at"]);
}

#[tokio::test]
#[ignore]
async fn test_update_missing_animal() {
    let _guard = DB_LOCK.lock().await;
    let app = app(database_pool().await);

    let request = multipart("PUT", "/api/v1/animals/999999999", &[("age", "3")], None);
    let (status, _) = send(&app, request).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
#[ignore]
async fn test_image_upload_is_served() {
    let _guard = DB_LOCK.lock().await;
    let app = app(database_pool().await);

    let name = unique("Snowball");
    let request = multipart(
        "POST",
        "/api/v1/animals",
        &animal_fields(&name, "Rabbit"),
        Some(("snowball.PNG", &b"not-really-a-png"[..])),
    );
    let (status, animal) = send(&app, request).await;
    assert_eq!(status, StatusCode::CREATED);

    let image_path = animal["image_path"].as_str().unwrap().to_string();
    assert!(image_path.starts_with(&format!("uploads/animals/{}_", name)));
    assert!(image_path.ends_with(".png"));
    assert_eq!(
        animal["image_url"],
        json!(format!("http://localhost:8000/{}", image_path))
    );

    let (status, _) = send(&app, get(&format!("/{}", image_path))).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
#[ignore]
async fn test_new_image_replaces_old_file() {
    let _guard = DB_LOCK.lock().await;
    let app = app(database_pool().await);

    let request = multipart(
        "POST",
        "/api/v1/animals",
        &animal_fields(&unique("Pepper"), "Cat"),
        Some(("first.jpg", &b"first"[..])),
    );
    let (status, animal) = send(&app, request).await;
    assert_eq!(status, StatusCode::CREATED);
    let old_path = animal["image_path"].as_str().unwrap().to_string();

    let uri = format!("/api/v1/animals/{}", animal["id"]);
    let request = multipart("PUT", &uri, &[("age", "4")], Some(("second.jpg", &b"second"[..])));
    let (status, updated) = send(&app, request).await;
    assert_eq!(status, StatusCode::OK);
    let new_path = updated["image_path"].as_str().unwrap().to_string();
    assert_ne!(new_path, old_path);

    let (status, _) = send(&app, get(&format!("/{}", new_path))).await;
    assert_eq!(status, StatusCode::OK);
    let (status, _) = send(&app, get(&format!("/{}", old_path))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    // Updates without an image keep the current file
    let (status, _) = send(&app, multipart("PUT", &uri, &[("age", "5")], None)).await;
    assert_eq!(status, StatusCode::OK);
    let (status, _) = send(&app, get(&format!("/{}", new_path))).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
#[ignore]
async fn test_search_filters() {
    let _guard = DB_LOCK.lock().await;
    let app = app(database_pool().await);

    let name = unique("Searchable");
    let animal = create_animal(&app, &name, "Dog").await;

    let (status, found) = send(&app, get(&format!("/api/v1/animals?name={}&type=Dog", name))).await;
    assert_eq!(status, StatusCode::OK);
    let found = found.as_array().unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0]["id"], animal["id"]);

    // Substring matching is case-sensitive
    let (_, found) = send(&app, get(&format!("/api/v1/animals?name={}", name.to_lowercase()))).await;
    assert!(found.as_array().unwrap().is_empty());
}

#[tokio::test]
#[ignore]
async fn test_list_adoptions_by_animal() {
    let _guard = DB_LOCK.lock().await;
    let app = app(database_pool().await);

    let animal = create_animal(&app, &unique("Luna"), "Cat").await;
    let animal_id = animal["id"].as_i64().unwrap();
    let (_, adoption) = submit(&app, animal_id).await;

    let (status, list) = send(&app, get(&format!("/api/v1/adoptions?animal_id={}", animal_id))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(list, json!([adoption]));
}

#[tokio::test]
#[ignore]
async fn test_delete_animal_with_applications_conflicts() {
    let _guard = DB_LOCK.lock().await;
    let app = app(database_pool().await);

    let animal = create_animal(&app, &unique("Shadow"), "Dog").await;
    let animal_id = animal["id"].as_i64().unwrap();
    let (_, adoption) = submit(&app, animal_id).await;

    let animal_uri = format!("/api/v1/animals/{}", animal_id);
    let (status, _) = send(&app, empty("DELETE", &animal_uri)).await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, _) = send(&app, empty("DELETE", &format!("/api/v1/adoptions/{}", adoption["id"]))).await;
    assert_eq!(status, StatusCode::OK);

    // Deleting the application keeps the reservation
    let (status, reserved) = send(&app, get(&animal_uri)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(reserved["is_adopted"], true);

    let (status, body) = send(&app, empty("DELETE", &animal_uri)).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["message"].as_str().unwrap().contains("deleted"));

    let (status, _) = send(&app, get(&animal_uri)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
#[ignore]
async fn test_type_distribution_counts_new_animals() {
    let _guard = DB_LOCK.lock().await;
    let app = app(database_pool().await);

    let before = type_distribution(&app).await;
    for animal_type in ["Dog", "Dog", "Cat", "Parrot"] {
        create_animal(&app, &unique("Stats"), animal_type).await;
    }
    let after = type_distribution(&app).await;

    let delta = |key: &str| after[key].as_i64().unwrap() - before[key].as_i64().unwrap();
    assert_eq!(delta("dog"), 2);
    assert_eq!(delta("cat"), 1);
    assert_eq!(delta("bird"), 0);
    assert_eq!(delta("rabbit"), 0);
    assert_eq!(delta("other"), 1);
}

#[tokio::test]
#[ignore]
async fn test_summary_counts_new_admissions() {
    let _guard = DB_LOCK.lock().await;
    let app = app(database_pool().await);

    let (_, before) = send(&app, get("/api/v1/statistics")).await;
    create_animal(&app, &unique("Fresh"), "Dog").await;
    let (status, after) = send(&app, get("/api/v1/statistics")).await;
    assert_eq!(status, StatusCode::OK);

    let total = after["total_animals"].as_i64().unwrap();
    assert_eq!(total, before["total_animals"].as_i64().unwrap() + 1);
    assert_eq!(
        after["new_admissions"].as_i64().unwrap(),
        before["new_admissions"].as_i64().unwrap() + 1
    );
    assert_eq!(after["rescued_animals"].as_i64().unwrap(), total / 2);
}
