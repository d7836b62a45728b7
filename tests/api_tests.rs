//! API integration tests
//!
//! These run against a live server with the bootstrap admin account
//! configured (admin/admin). Run with: cargo test -- --ignored

use reqwest::Client;
use serde_json::{json, Value};
use std::time::{SystemTime, UNIX_EPOCH};

const BASE_URL: &str = "http://localhost:8080/api/v1";

/// Helper to get a token for the given credentials
async fn get_token(client: &Client, username: &str, password: &str) -> String {
    let response = client
        .post(format!("{}/auth/login", BASE_URL))
        .json(&json!({
            "username": username,
            "password": password
        }))
        .send()
        .await
        .expect("Failed to send login request");

    let body: Value = response.json().await.expect("Failed to parse login response");
    body["token"].as_str().expect("No token in response").to_string()
}

/// Helper to get an admin (staff) token
async fn get_admin_token(client: &Client) -> String {
    get_token(client, "admin", "admin").await
}

/// Helper to create a fresh non-staff user and return (username, token)
async fn create_user(client: &Client, admin_token: &str) -> (String, String) {
    let suffix = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .subsec_nanos();
    let username = format!("reader{}", suffix);

    let response = client
        .post(format!("{}/users", BASE_URL))
        .header("Authorization", format!("Bearer {}", admin_token))
        .json(&json!({
            "username": username,
            "password": "password"
        }))
        .send()
        .await
        .expect("Failed to send create user request");
    assert_eq!(response.status(), 201);

    let token = get_token(client, &username, "password").await;
    (username, token)
}

/// Helper to create a book as the given user, returning its id
async fn create_book(client: &Client, token: &str, name: &str, price: &str) -> i64 {
    let response = client
        .post(format!("{}/books", BASE_URL))
        .header("Authorization", format!("Bearer {}", token))
        .json(&json!({
            "name": name,
            "price": price,
            "author": "Author 1"
        }))
        .send()
        .await
        .expect("Failed to send create book request");
    assert_eq!(response.status(), 201);

    let body: Value = response.json().await.expect("Failed to parse response");
    body["id"].as_i64().expect("No book ID")
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
async fn test_login() {
    let client = Client::new();

    let response = client
        .post(format!("{}/auth/login", BASE_URL))
        .json(&json!({
            "username": "admin",
            "password": "admin"
        }))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert!(body["token"].is_string());
    assert_eq!(body["token_type"], "Bearer");
    assert_eq!(body["user"]["is_staff"], true);
}

#[tokio::test]
#[ignore]
async fn test_login_invalid_credentials() {
    let client = Client::new();

    let response = client
        .post(format!("{}/auth/login", BASE_URL))
        .json(&json!({
            "username": "admin",
            "password": "wrong"
        }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 401);
}

#[tokio::test]
#[ignore]
async fn test_list_books_is_public() {
    let client = Client::new();

    let response = client
        .get(format!("{}/books", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert!(body.is_array());
}

#[tokio::test]
#[ignore]
async fn test_create_book_requires_authentication() {
    let client = Client::new();

    let response = client
        .post(format!("{}/books", BASE_URL))
        .json(&json!({
            "name": "Rework",
            "price": "75.00"
        }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 401);
}

#[tokio::test]
#[ignore]
async fn test_create_book_sets_owner_and_price_format() {
    let client = Client::new();
    let admin_token = get_admin_token(&client).await;
    let (_, token) = create_user(&client, &admin_token).await;

    let response = client
        .post(format!("{}/books", BASE_URL))
        .header("Authorization", format!("Bearer {}", token))
        .json(&json!({
            "name": "Rework",
            "price": 75,
            "author": "Author 1"
        }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 201);

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["price"], "75.00");
    assert!(body["owner"].is_number());
}

#[tokio::test]
#[ignore]
async fn test_update_book_by_non_owner_is_forbidden() {
    let client = Client::new();
    let admin_token = get_admin_token(&client).await;
    let (_, owner_token) = create_user(&client, &admin_token).await;
    let (_, other_token) = create_user(&client, &admin_token).await;

    let book_id = create_book(&client, &owner_token, "Rework", "75.00").await;

    let response = client
        .put(format!("{}/books/{}", BASE_URL, book_id))
        .header("Authorization", format!("Bearer {}", other_token))
        .json(&json!({
            "name": "Rework",
            "price": 575,
            "author": "Author 1"
        }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 403);

    // Stored record must be unchanged
    let body: Value = client
        .get(format!("{}/books/{}", BASE_URL, book_id))
        .send()
        .await
        .expect("Failed to send request")
        .json()
        .await
        .expect("Failed to parse response");
    assert_eq!(body["price"], "75.00");
}

#[tokio::test]
#[ignore]
async fn test_update_book_by_owner() {
    let client = Client::new();
    let admin_token = get_admin_token(&client).await;
    let (_, owner_token) = create_user(&client, &admin_token).await;

    let book_id = create_book(&client, &owner_token, "Rework", "75.00").await;

    let response = client
        .put(format!("{}/books/{}", BASE_URL, book_id))
        .header("Authorization", format!("Bearer {}", owner_token))
        .json(&json!({
            "name": "Rework",
            "price": 575,
            "author": "Author 1"
        }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 200);

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["price"], "575.00");
}

#[tokio::test]
#[ignore]
async fn test_update_book_by_staff() {
    let client = Client::new();
    let admin_token = get_admin_token(&client).await;
    let (_, owner_token) = create_user(&client, &admin_token).await;

    let book_id = create_book(&client, &owner_token, "Rework", "75.00").await;

    let response = client
        .put(format!("{}/books/{}", BASE_URL, book_id))
        .header("Authorization", format!("Bearer {}", admin_token))
        .json(&json!({
            "name": "Rework",
            "price": 575,
            "author": "Author 1"
        }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 200);

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["price"], "575.00");
}

#[tokio::test]
#[ignore]
async fn test_search_books() {
    let client = Client::new();
    let admin_token = get_admin_token(&client).await;
    let (_, token) = create_user(&client, &admin_token).await;

    let suffix = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .subsec_nanos();
    let name = format!("Figureoutable {}", suffix);
    create_book(&client, &token, &name, "80.00").await;

    let response = client
        .get(format!("{}/books", BASE_URL))
        .query(&[("search", format!("figureoutable {}", suffix))])
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    let books = body.as_array().expect("Expected a list");
    assert_eq!(books.len(), 1);
    assert_eq!(books[0]["name"], name);
}

#[tokio::test]
#[ignore]
async fn test_relation_partial_update_merges() {
    let client = Client::new();
    let admin_token = get_admin_token(&client).await;
    let (_, owner_token) = create_user(&client, &admin_token).await;
    let (_, reader_token) = create_user(&client, &admin_token).await;

    let book_id = create_book(&client, &owner_token, "Rework", "75.00").await;

    // First touch: rate only
    let response = client
        .patch(format!("{}/relations/{}", BASE_URL, book_id))
        .header("Authorization", format!("Bearer {}", reader_token))
        .json(&json!({"rate": 4}))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 200);

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["rate"], 4);
    assert_eq!(body["like"], false);
    assert_eq!(body["in_bookmarks"], false);

    // Second touch: bookmark only; rate must survive
    let response = client
        .patch(format!("{}/relations/{}", BASE_URL, book_id))
        .header("Authorization", format!("Bearer {}", reader_token))
        .json(&json!({"in_bookmarks": true}))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 200);

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["rate"], 4);
    assert_eq!(body["like"], false);
    assert_eq!(body["in_bookmarks"], true);
}

#[tokio::test]
#[ignore]
async fn test_relation_rate_out_of_range() {
    let client = Client::new();
    let admin_token = get_admin_token(&client).await;
    let (_, token) = create_user(&client, &admin_token).await;

    let book_id = create_book(&client, &token, "Rework", "75.00").await;

    let response = client
        .patch(format!("{}/relations/{}", BASE_URL, book_id))
        .header("Authorization", format!("Bearer {}", token))
        .json(&json!({"rate": 6}))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 400);
}

#[tokio::test]
#[ignore]
async fn test_relation_for_unknown_book() {
    let client = Client::new();
    let admin_token = get_admin_token(&client).await;

    let response = client
        .patch(format!("{}/relations/999999999", BASE_URL))
        .header("Authorization", format!("Bearer {}", admin_token))
        .json(&json!({"rate": 3}))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 404);
}

#[tokio::test]
#[ignore]
async fn test_delete_book_by_owner() {
    let client = Client::new();
    let admin_token = get_admin_token(&client).await;
    let (_, owner_token) = create_user(&client, &admin_token).await;

    let book_id = create_book(&client, &owner_token, "Rework", "75.00").await;

    let response = client
        .delete(format!("{}/books/{}", BASE_URL, book_id))
        .header("Authorization", format!("Bearer {}", owner_token))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 204);

    let response = client
        .get(format!("{}/books/{}", BASE_URL, book_id))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 404);
}
