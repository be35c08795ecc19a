mod common;

use common::{TestApp, recipe_payload};
use http::StatusCode;
use serde_json::{Value, json};

const TAGS_URL: &str = "/api/recipe/tags";

fn detail_url(id: &Value) -> String {
    format!("{TAGS_URL}/{id}")
}

/// Create a recipe carrying the given tag names, returning its tags
async fn tagged_recipe(app: &TestApp, token: &str, title: &str, tags: &[&str]) -> Value {
    let mut payload = recipe_payload(title);
    payload["tags"] = tags.iter().map(|name| json!({"name": name})).collect();
    let res = app.post("/api/recipe/recipes", Some(token), payload).await;
    assert_eq!(res.status, StatusCode::CREATED);
    res.json()["tags"].clone()
}

fn names(list: &Value) -> Vec<&str> {
    list.as_array()
        .unwrap()
        .iter()
        .map(|t| t["name"].as_str().unwrap())
        .collect()
}

#[tokio::test]
async fn test_auth_is_needed() {
    let app = TestApp::new().await;
    let res = app.get(TAGS_URL, None).await;
    assert_eq!(res.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_retrieve_tags() {
    let app = TestApp::new().await;
    let token = app.user_with_token("user@example.com", "testpass123").await;
    tagged_recipe(&app, &token, "Curry", &["Vegan", "Dessert"]).await;

    let res = app.get(TAGS_URL, Some(&token)).await;

    assert_eq!(res.status, StatusCode::OK);
    let body = res.json();
    assert_eq!(names(&body), ["Vegan", "Dessert"]);
    assert!(body[0].get("user_id").is_none());
}

#[tokio::test]
async fn test_tags_limited_to_user() {
    let app = TestApp::new().await;
    let token = app.user_with_token("user@example.com", "testpass123").await;
    let other = app.user_with_token("other@example.com", "password123").await;
    tagged_recipe(&app, &other, "Fruity", &["Fruity"]).await;
    let mine = tagged_recipe(&app, &token, "Comfort", &["Comfort Food"]).await;

    let body = app.get(TAGS_URL, Some(&token)).await.json();

    assert_eq!(body.as_array().unwrap().len(), 1);
    assert_eq!(body[0]["name"], "Comfort Food");
    assert_eq!(body[0]["id"], mine[0]["id"]);
}

#[tokio::test]
async fn test_update_tag() {
    let app = TestApp::new().await;
    let token = app.user_with_token("user@example.com", "testpass123").await;
    let tags = tagged_recipe(&app, &token, "Late meal", &["After Dinner"]).await;

    let res = app
        .patch(&detail_url(&tags[0]["id"]), Some(&token), json!({"name": "Dessert"}))
        .await;

    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.json()["name"], "Dessert");
    let body = app.get(TAGS_URL, Some(&token)).await.json();
    assert_eq!(names(&body), ["Dessert"]);
}

#[tokio::test]
async fn test_replace_tag_requires_name() {
    let app = TestApp::new().await;
    let token = app.user_with_token("user@example.com", "testpass123").await;
    let tags = tagged_recipe(&app, &token, "Late meal", &["After Dinner"]).await;
    let url = detail_url(&tags[0]["id"]);

    let res = app.put(&url, Some(&token), json!({})).await;
    assert_eq!(res.status, StatusCode::BAD_REQUEST);
    assert!(res.json()["details"]["name"].is_array());

    let res = app.patch(&url, Some(&token), json!({"name": "  "})).await;
    assert_eq!(res.status, StatusCode::BAD_REQUEST);

    let res = app.put(&url, Some(&token), json!({"name": "Supper"})).await;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.json()["name"], "Supper");
}

#[tokio::test]
async fn test_delete_tag() {
    let app = TestApp::new().await;
    let token = app.user_with_token("user@example.com", "testpass123").await;
    let tags = tagged_recipe(&app, &token, "Breakfast plate", &["Breakfast"]).await;

    let res = app.delete(&detail_url(&tags[0]["id"]), Some(&token)).await;

    assert_eq!(res.status, StatusCode::NO_CONTENT);
    let body = app.get(TAGS_URL, Some(&token)).await.json();
    assert_eq!(body, json!([]));

    // The recipe loses the link but survives
    let recipes = app.get("/api/recipe/recipes", Some(&token)).await.json();
    assert_eq!(recipes[0]["tags"], json!([]));
}

#[tokio::test]
async fn test_other_users_tag_is_not_found() {
    let app = TestApp::new().await;
    let token = app.user_with_token("user@example.com", "testpass123").await;
    let other = app.user_with_token("other@example.com", "password123").await;
    let theirs = tagged_recipe(&app, &other, "Theirs", &["Private"]).await;
    let url = detail_url(&theirs[0]["id"]);

    let res = app.patch(&url, Some(&token), json!({"name": "Mine"})).await;
    assert_eq!(res.status, StatusCode::NOT_FOUND);
    assert_eq!(app.delete(&url, Some(&token)).await.status, StatusCode::NOT_FOUND);

    let body = app.get(TAGS_URL, Some(&other)).await.json();
    assert_eq!(names(&body), ["Private"]);
}

#[tokio::test]
async fn test_non_numeric_id_is_not_found() {
    let app = TestApp::new().await;
    let token = app.user_with_token("user@example.com", "testpass123").await;

    let res = app
        .patch(&format!("{TAGS_URL}/abc"), Some(&token), json!({"name": "x"}))
        .await;
    assert_eq!(res.status, StatusCode::NOT_FOUND);
    assert!(res.json()["code"].is_number());

    let res = app.delete(&format!("{TAGS_URL}/abc"), Some(&token)).await;
    assert_eq!(res.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_detail_get_and_create_not_allowed() {
    let app = TestApp::new().await;
    let token = app.user_with_token("user@example.com", "testpass123").await;
    let tags = tagged_recipe(&app, &token, "Soup", &["Warm"]).await;

    let res = app.get(&detail_url(&tags[0]["id"]), Some(&token)).await;
    assert_eq!(res.status, StatusCode::METHOD_NOT_ALLOWED);

    let res = app.post(TAGS_URL, Some(&token), json!({"name": "New"})).await;
    assert_eq!(res.status, StatusCode::METHOD_NOT_ALLOWED);
}

#[tokio::test]
async fn test_filter_tags_assigned_to_recipes() {
    let app = TestApp::new().await;
    let token = app.user_with_token("user@example.com", "testpass123").await;
    tagged_recipe(&app, &token, "Green eggs", &["Breakfast", "Lunch"]).await;
    // Unassign Lunch by replacing the tag list
    let recipes = app.get("/api/recipe/recipes", Some(&token)).await.json();
    let url = format!("/api/recipe/recipes/{}", recipes[0]["id"]);
    app.patch(&url, Some(&token), json!({"tags": [{"name": "Breakfast"}]}))
        .await;

    let body = app
        .get(&format!("{TAGS_URL}?assigned_only=1"), Some(&token))
        .await
        .json();

    assert_eq!(names(&body), ["Breakfast"]);

    let all = app
        .get(&format!("{TAGS_URL}?assigned_only=0"), Some(&token))
        .await
        .json();
    assert_eq!(names(&all), ["Lunch", "Breakfast"]);
}

#[tokio::test]
async fn test_filtered_tags_unique() {
    let app = TestApp::new().await;
    let token = app.user_with_token("user@example.com", "testpass123").await;
    tagged_recipe(&app, &token, "Pancakes", &["Breakfast"]).await;
    tagged_recipe(&app, &token, "Porridge", &["Breakfast"]).await;
    tagged_recipe(&app, &token, "Roast", &["Dinner"]).await;

    let body = app
        .get(&format!("{TAGS_URL}?assigned_only=1"), Some(&token))
        .await
        .json();

    assert_eq!(names(&body), ["Dinner", "Breakfast"]);
}

#[tokio::test]
async fn test_invalid_assigned_only_flag() {
    let app = TestApp::new().await;
    let token = app.user_with_token("user@example.com", "testpass123").await;

    let res = app
        .get(&format!("{TAGS_URL}?assigned_only=yes"), Some(&token))
        .await;

    assert_eq!(res.status, StatusCode::BAD_REQUEST);
}
