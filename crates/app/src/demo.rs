//! In-process demo API and the suite run against it.

use apicheck_domain::{ContentType, TestRequestSpec};
use axum::extract::Path;
use axum::http::{HeaderMap, StatusCode, header};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

const TOKEN: &str = "demo-token";

#[derive(Debug, Serialize, Deserialize)]
struct NewUser {
    name: String,
    email: String,
}

/// Routes served by the demo session.
pub fn router() -> Router {
    Router::new()
        .route("/ping", get(|| async { "pong" }))
        .route("/echo", post(echo))
        .route("/users", post(create_user))
        .route("/users/{id}", get(get_user).delete(delete_user))
}

async fn echo(Json(body): Json<Value>) -> Json<Value> {
    Json(body)
}

async fn create_user(Json(user): Json<NewUser>) -> (StatusCode, Json<Value>) {
    (
        StatusCode::CREATED,
        Json(json!({ "id": 1, "name": user.name, "email": user.email })),
    )
}

async fn get_user(headers: HeaderMap, Path(id): Path<u32>) -> Result<Json<Value>, StatusCode> {
    authorize(&headers)?;
    if id == 1 {
        Ok(Json(json!({ "id": 1, "name": "Ada" })))
    } else {
        Err(StatusCode::NOT_FOUND)
    }
}

async fn delete_user(headers: HeaderMap, Path(_id): Path<u32>) -> StatusCode {
    match authorize(&headers) {
        Ok(()) => StatusCode::NO_CONTENT,
        Err(status) => status,
    }
}

fn authorize(headers: &HeaderMap) -> Result<(), StatusCode> {
    let expected = format!("Bearer {TOKEN}");
    match headers.get(header::AUTHORIZATION).and_then(|v| v.to_str().ok()) {
        Some(value) if value == expected => Ok(()),
        _ => Err(StatusCode::UNAUTHORIZED),
    }
}

/// Requests run by the demo, each with the status it should get.
pub fn suite() -> Vec<TestRequestSpec> {
    vec![
        TestRequestSpec::get("Ping answers", "/ping", 200),
        TestRequestSpec::post("Echo returns the body", "/echo", 200)
            .with_content_type(ContentType::Json)
            .with_body(json!({ "message": "hello" })),
        TestRequestSpec::post("Create user", "/users", 201)
            .with_content_type(ContentType::Json)
            .with_body(NewUser {
                name: "Ada".into(),
                email: "ada@example.com".into(),
            }),
        TestRequestSpec::get("Read user without token", "/users", 401).with_path_suffix("/1"),
        TestRequestSpec::get("Read user", "/users", 200)
            .with_path_suffix("/1")
            .with_bearer_token(TOKEN),
        TestRequestSpec::get("Read missing user", "/users", 404)
            .with_path_suffix("/99")
            .with_bearer_token(TOKEN),
        TestRequestSpec::delete("Delete user", "/users", 204)
            .with_path_suffix("/1")
            .with_bearer_token(TOKEN),
        TestRequestSpec::get("Unknown route", "/nope", 404),
    ]
}
