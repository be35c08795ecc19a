mod common;

use common::{TestApp, png_bytes, recipe_payload};
use http::{StatusCode, header};
use serde_json::Value;

async fn recipe_id(app: &TestApp, token: &str) -> i64 {
    let res = app
        .post("/api/recipe/recipes", Some(token), recipe_payload("Sample recipe"))
        .await;
    assert_eq!(res.status, StatusCode::CREATED);
    res.json()["id"].as_i64().unwrap()
}

fn upload_url(id: i64) -> String {
    format!("/api/recipe/recipes/{id}/upload-image")
}

/// `/media/uploads/recipe/x.png` -> file under the media root
fn stored_path(app: &TestApp, url: &Value) -> std::path::PathBuf {
    let relative = url.as_str().unwrap().trim_start_matches("/media/");
    app.state.media.root().join(relative)
}

#[tokio::test]
async fn test_upload_image() {
    let app = TestApp::new().await;
    let token = app.user_with_token("user@example.com", "testpass123").await;
    let id = recipe_id(&app, &token).await;

    let res = app
        .upload(&upload_url(id), &token, "image", "photo.png", &png_bytes())
        .await;

    assert_eq!(res.status, StatusCode::OK, "{:?}", res.json());
    let body = res.json();
    assert_eq!(body["id"], id);
    let url = body["image"].as_str().unwrap();
    assert!(url.starts_with("/media/uploads/recipe/"));
    assert!(url.ends_with(".png"));
    assert!(stored_path(&app, &body["image"]).exists());

    let detail = app
        .get(&format!("/api/recipe/recipes/{id}"), Some(&token))
        .await
        .json();
    assert_eq!(detail["image"], body["image"]);
}

#[tokio::test]
async fn test_uploaded_image_is_served() {
    let app = TestApp::new().await;
    let token = app.user_with_token("user@example.com", "testpass123").await;
    let id = recipe_id(&app, &token).await;
    let png = png_bytes();
    let body = app
        .upload(&upload_url(id), &token, "image", "photo.png", &png)
        .await
        .json();

    let res = app.get(body["image"].as_str().unwrap(), None).await;

    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.headers[header::CONTENT_TYPE], "image/png");
    assert_eq!(res.body, png);

    let missing = app.get("/media/uploads/recipe/nope.png", None).await;
    assert_eq!(missing.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_upload_replaces_previous_file() {
    let app = TestApp::new().await;
    let token = app.user_with_token("user@example.com", "testpass123").await;
    let id = recipe_id(&app, &token).await;

    let first = app
        .upload(&upload_url(id), &token, "image", "one.png", &png_bytes())
        .await
        .json();
    let second = app
        .upload(&upload_url(id), &token, "image", "two.png", &png_bytes())
        .await
        .json();

    assert_ne!(first["image"], second["image"]);
    assert!(!stored_path(&app, &first["image"]).exists());
    assert!(stored_path(&app, &second["image"]).exists());
}

#[tokio::test]
async fn test_upload_image_bad_request() {
    let app = TestApp::new().await;
    let token = app.user_with_token("user@example.com", "testpass123").await;
    let id = recipe_id(&app, &token).await;

    let res = app
        .upload(&upload_url(id), &token, "image", "photo.png", b"notanimage")
        .await;

    assert_eq!(res.status, StatusCode::BAD_REQUEST);
    assert!(res.json()["details"]["image"].is_array());

    let detail = app
        .get(&format!("/api/recipe/recipes/{id}"), Some(&token))
        .await
        .json();
    assert_eq!(detail["image"], Value::Null);
}

#[tokio::test]
async fn test_upload_unsupported_extension() {
    let app = TestApp::new().await;
    let token = app.user_with_token("user@example.com", "testpass123").await;
    let id = recipe_id(&app, &token).await;

    let res = app
        .upload(&upload_url(id), &token, "image", "photo.gif", &png_bytes())
        .await;

    assert_eq!(res.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_upload_missing_field() {
    let app = TestApp::new().await;
    let token = app.user_with_token("user@example.com", "testpass123").await;
    let id = recipe_id(&app, &token).await;

    let res = app
        .upload(&upload_url(id), &token, "file", "photo.png", &png_bytes())
        .await;

    assert_eq!(res.status, StatusCode::BAD_REQUEST);
    assert!(res.json()["details"]["image"].is_array());
}

#[tokio::test]
async fn test_upload_to_other_users_recipe() {
    let app = TestApp::new().await;
    let token = app.user_with_token("user@example.com", "testpass123").await;
    let other = app.user_with_token("other@example.com", "password123").await;
    let id = recipe_id(&app, &other).await;

    let res = app
        .upload(&upload_url(id), &token, "image", "photo.png", &png_bytes())
        .await;

    assert_eq!(res.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_recipe_removes_image() {
    let app = TestApp::new().await;
    let token = app.user_with_token("user@example.com", "testpass123").await;
    let id = recipe_id(&app, &token).await;
    let body = app
        .upload(&upload_url(id), &token, "image", "photo.png", &png_bytes())
        .await
        .json();
    let path = stored_path(&app, &body["image"]);
    assert!(path.exists());

    let res = app
        .delete(&format!("/api/recipe/recipes/{id}"), Some(&token))
        .await;

    assert_eq!(res.status, StatusCode::NO_CONTENT);
    assert!(!path.exists());
}
