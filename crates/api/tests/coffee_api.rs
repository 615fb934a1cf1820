mod common;

use reqwest::StatusCode;
use serde_json::{Value, json};

use common::{TestServer, mint_jwt, token};

const MANAGER: &[&str] = &["get:drinks-detail", "post:drinks", "patch:drinks", "delete:drinks"];

async fn create_drink(client: &reqwest::Client, srv: &TestServer, title: &str) -> i64 {
    let res = client
        .post(srv.url("/drinks"))
        .bearer_auth(token(MANAGER))
        .json(&json!({
            "title": title,
            "recipe": [
                {"name": "espresso", "color": "brown", "parts": 1},
                {"name": "milk", "color": "white", "parts": 3},
            ],
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = res.json().await.unwrap();
    body["drinks"][0]["id"].as_i64().unwrap()
}

#[tokio::test]
async fn public_listing_hides_ingredient_names() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();
    create_drink(&client, &srv, "latte").await;

    let res = client.get(srv.url("/drinks")).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["success"], true);
    assert_eq!(body["drinks"][0]["title"], "latte");
    assert_eq!(body["drinks"][0]["recipe"][0], json!({"color": "brown", "parts": 1}));

    let res = client
        .get(srv.url("/drinks-detail"))
        .bearer_auth(token(&["get:drinks-detail"]))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["drinks"][0]["recipe"][1]["name"], "milk");
}

#[tokio::test]
async fn auth_failures_are_structured_401s() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let res = client.get(srv.url("/drinks-detail")).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    let body: Value = res.json().await.unwrap();
    assert_eq!(
        body,
        json!({
            "success": false,
            "error": 401,
            "code": "authorization_header_missing",
            "message": "Authorization header is expected.",
        })
    );

    let cases = [
        ("Basic abc", "invalid_header", "Authorization header must start with \"Bearer\"."),
        ("Bearer", "invalid_header", "Token not found."),
        ("Bearer a b", "invalid_header", "Authorization header must be bearer token."),
        ("Bearer not-a-jwt", "invalid_header", "Unable to parse authentication token."),
    ];
    for (header, code, message) in cases {
        let res = client
            .get(srv.url("/drinks-detail"))
            .header("Authorization", header)
            .send()
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED, "header {header:?}");
        let body: Value = res.json().await.unwrap();
        assert_eq!(body["code"], code);
        assert_eq!(body["message"], message);
    }

    let expired = mint_jwt(Some(&["get:drinks-detail"]), -3600);
    let res = client.get(srv.url("/drinks-detail")).bearer_auth(expired).send().await.unwrap();
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["code"], "token_expired");

    let no_permissions = mint_jwt(None, 600);
    let res = client.get(srv.url("/drinks-detail")).bearer_auth(no_permissions).send().await.unwrap();
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["code"], "invalid_claims");
    assert_eq!(body["message"], "Permissions not included in JWT.");
}

#[tokio::test]
async fn missing_scope_blocks_patch_and_delete() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();
    let id = create_drink(&client, &srv, "latte").await;
    let barista = token(&["get:drinks-detail"]);

    let res = client
        .patch(srv.url(&format!("/drinks/{id}")))
        .bearer_auth(&barista)
        .json(&json!({"title": "flat white"}))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["code"], "unauthorized");
    assert_eq!(body["message"], "Permission not found.");

    let res = client
        .delete(srv.url(&format!("/drinks/{id}")))
        .bearer_auth(&barista)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn manager_can_patch_and_delete() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();
    let id = create_drink(&client, &srv, "latte").await;
    let manager = token(MANAGER);

    let res = client
        .patch(srv.url(&format!("/drinks/{id}")))
        .bearer_auth(&manager)
        .json(&json!({"title": "flat white"}))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["drinks"][0]["id"], id);
    assert_eq!(body["drinks"][0]["title"], "flat white");
    assert_eq!(body["drinks"][0]["recipe"].as_array().unwrap().len(), 2);

    let res = client
        .patch(srv.url(&format!("/drinks/{id}")))
        .bearer_auth(&manager)
        .json(&json!({}))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    let res = client
        .patch(srv.url("/drinks/999"))
        .bearer_auth(&manager)
        .json(&json!({"title": "mocha"}))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);

    let res = client
        .delete(srv.url(&format!("/drinks/{id}")))
        .bearer_auth(&manager)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body, json!({"success": true, "delete": id}));

    let res = client
        .delete(srv.url(&format!("/drinks/{id}")))
        .bearer_auth(&manager)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn invalid_or_duplicate_drinks_are_unprocessable() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();
    create_drink(&client, &srv, "latte").await;
    let manager = token(MANAGER);

    for body in [
        json!({"title": "latte", "recipe": {"name": "water", "color": "blue", "parts": 1}}),
        json!({"title": "", "recipe": [{"name": "water", "color": "blue", "parts": 1}]}),
        json!({"title": "water", "recipe": []}),
        json!({"title": "water"}),
    ] {
        let res = client
            .post(srv.url("/drinks"))
            .bearer_auth(&manager)
            .json(&body)
            .send()
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::UNPROCESSABLE_ENTITY, "body {body}");
    }

    // A single ingredient object is accepted as a one-element recipe.
    let res = client
        .post(srv.url("/drinks"))
        .bearer_auth(&manager)
        .json(&json!({"title": "water", "recipe": {"name": "water", "color": "blue", "parts": 1}}))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["drinks"][0]["recipe"].as_array().unwrap().len(), 1);
}
