mod common;

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use jsonwebtoken::{encode, EncodingKey, Header};
use serde_json::{json, Value};
use tower::ServiceExt;
use uuid::Uuid;

use common::{setup, Fixture};
use vehicle_maintenance::config::EnvironmentConfig;
use vehicle_maintenance::middleware::auth::Claims;
use vehicle_maintenance::routes::create_router;
use vehicle_maintenance::state::AppState;

const SECRET: &str = "test-secret";

fn test_app(fx: &Fixture) -> Router {
    app_for_environment(fx, "test")
}

fn app_for_environment(fx: &Fixture, environment: &str) -> Router {
    let config = EnvironmentConfig {
        environment: environment.to_string(),
        port: 0,
        host: "127.0.0.1".to_string(),
        jwt_secret: SECRET.to_string(),
        cors_origins: Vec::new(),
        log_level: tracing::Level::INFO,
    };
    create_router(AppState::new(fx.dyn_store(), config))
}

fn token_for(owner_id: Uuid) -> String {
    let now = chrono::Utc::now().timestamp() as usize;
    let claims = Claims {
        sub: owner_id.to_string(),
        exp: now + 3600,
        iat: now,
    };
    encode(&Header::default(), &claims, &EncodingKey::from_secret(SECRET.as_ref())).unwrap()
}

async fn call(app: &Router, method: Method, uri: &str, token: Option<&str>, body: Option<Value>) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }
    let request = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, value)
}

#[tokio::test]
async fn test_health_check() {
    let fx = setup(0).await;
    let app = test_app(&fx);

    let (status, body) = call(&app, Method::GET, "/health", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn test_list_is_wrapped_in_api_response() {
    let fx = setup(0).await;
    let app = test_app(&fx);
    let token = token_for(fx.owner_id);
    let uri = format!("/api/maintenances?vehicle_id={}", fx.vehicle.id);

    let (status, body) = call(&app, Method::GET, &uri, Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["data"].as_array().map(|a| a.len()), Some(0));

    let (status, _) = call(
        &app,
        Method::POST,
        "/api/maintenances",
        Some(&token),
        Some(json!({
            "vehicle_id": fx.vehicle.id,
            "item_name": "Filtro de ar",
            "control_by": "KM",
            "control_value": 10000
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (_, body) = call(&app, Method::GET, &uri, Some(&token), None).await;
    assert_eq!(body["data"][0]["item_name"], "Filtro de ar");
    assert_eq!(body["data"][0]["control_by"], "KM");
}

#[tokio::test]
async fn test_cors_without_origins_only_open_in_development() {
    let fx = setup(0).await;

    for (environment, expect_header) in [("development", true), ("production", false)] {
        let app = app_for_environment(&fx, environment);
        let request = Request::builder()
            .uri("/health")
            .header(header::ORIGIN, "http://localhost:5173")
            .body(Body::empty())
            .unwrap();

        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response
                .headers()
                .contains_key(header::ACCESS_CONTROL_ALLOW_ORIGIN),
            expect_header,
            "environment {}",
            environment
        );
    }
}

#[tokio::test]
async fn test_requires_bearer_token() {
    let fx = setup(0).await;
    let app = test_app(&fx);
    let uri = format!("/api/maintenances?vehicle_id={}", fx.vehicle.id);

    let (status, body) = call(&app, Method::GET, &uri, None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["code"], "UNAUTHORIZED");

    let (status, _) = call(&app, Method::GET, &uri, Some("garbage"), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_maintenance_lifecycle_over_http() {
    let fx = setup(10_000).await;
    let app = test_app(&fx);
    let token = token_for(fx.owner_id);

    let (status, body) = call(
        &app,
        Method::POST,
        "/api/maintenances",
        Some(&token),
        Some(json!({
            "vehicle_id": fx.vehicle.id,
            "item_name": "Troca de óleo",
            "control_by": "KM",
            "control_value": 5000,
            "last_changed_km": 9000
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["next_change_km"], 14000);
    assert_eq!(body["data"]["status"], "PENDING");
    assert!(body["data"]["next_change_date"].is_null());
    let id = body["data"]["id"].as_str().unwrap().to_string();

    let (status, body) = call(
        &app,
        Method::POST,
        "/api/history",
        Some(&token),
        Some(json!({
            "maintenance_id": id,
            "paid_price": "189.90",
            "informed_km": 10500
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["data"]["informed_km"], 10500);
    let history_id = body["data"]["id"].as_str().unwrap().to_string();

    let (status, body) = call(&app, Method::GET, &format!("/api/maintenances/{}", id), Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["next_change_km"], 15500);
    assert_eq!(body["data"]["status"], "OK");

    let (status, body) = call(
        &app,
        Method::GET,
        &format!("/api/history/details/{}", history_id),
        Some(&token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["maintenance"]["id"], id.as_str());

    let (status, body) = call(
        &app,
        Method::PATCH,
        &format!("/api/maintenances/{}", id),
        Some(&token),
        Some(json!({ "control_by": "TIME" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "VALIDATION_ERROR");

    let (status, _) = call(&app, Method::DELETE, &format!("/api/maintenances/{}", id), Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = call(
        &app,
        Method::GET,
        &format!("/api/history/list/{}", id),
        Some(&token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"].as_array().map(|a| a.len()), Some(0));

    let (status, body) = call(&app, Method::GET, &format!("/api/maintenances/{}", id), Some(&token), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "NOT_FOUND");
}

#[tokio::test]
async fn test_other_owner_cannot_see_items() {
    let fx = setup(0).await;
    let app = test_app(&fx);

    let (status, body) = call(
        &app,
        Method::POST,
        "/api/maintenances",
        Some(&token_for(fx.owner_id)),
        Some(json!({
            "vehicle_id": fx.vehicle.id,
            "item_name": "Pneus",
            "control_by": "TIME",
            "control_value": 365
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let id = body["data"]["id"].as_str().unwrap().to_string();

    let intruder = token_for(Uuid::new_v4());
    let (status, _) = call(&app, Method::GET, &format!("/api/maintenances/{}", id), Some(&intruder), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = call(
        &app,
        Method::POST,
        "/api/maintenances",
        Some(&intruder),
        Some(json!({
            "vehicle_id": fx.vehicle.id,
            "item_name": "Pneus",
            "control_by": "KM",
            "control_value": 40000
        })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
