//! HTTP router.
//!
//! `GET /` plus everything under `/api/`. Layers (outermost → innermost):
//! CORS → request log → handler.

use axum::http::{HeaderValue, Method};
use axum::routing::get;
use axum::Router;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};

use crate::api::endpoints;
use crate::api::error::ApiError;
use crate::api::middleware;
use crate::api::types::ApiContext;

/// Build the application router.
///
/// NOTE: Path params use `:param` syntax (matchit 0.7 / axum 0.7).
pub fn api_router(ctx: ApiContext) -> Router {
    let cors = cors_layer(&ctx.config.cors_origins);

    let api = Router::new()
        .route("/health", get(endpoints::health::check))
        .route(
            "/patients",
            get(endpoints::patients::list).post(endpoints::patients::create),
        )
        .route(
            "/patients/:id",
            get(endpoints::patients::detail)
                .put(endpoints::patients::update)
                .delete(endpoints::patients::remove),
        )
        .route(
            "/patients/:id/medications",
            get(endpoints::medications::list),
        );

    Router::new()
        .route("/", get(endpoints::health::root))
        .nest("/api", api)
        .fallback(route_not_found)
        .with_state(ctx)
        .layer(axum::middleware::from_fn(middleware::request_log::log_request))
        .layer(cors)
}

async fn route_not_found() -> ApiError {
    ApiError::NotFound("Route not found".into())
}

/// CORS from the configured origins. `*` allows any origin.
fn cors_layer(origins: &[String]) -> CorsLayer {
    let allow_origin = if origins.iter().any(|o| o == "*") {
        AllowOrigin::from(Any)
    } else {
        let values: Vec<HeaderValue> = origins
            .iter()
            .filter_map(|o| match HeaderValue::from_str(o) {
                Ok(v) => Some(v),
                Err(_) => {
                    tracing::warn!(origin = %o, "Skipping invalid CORS origin");
                    None
                }
            })
            .collect();
        AllowOrigin::list(values)
    };

    CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers(Any)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use axum::response::Response;
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    use crate::config::{AppConfig, ENV_CORS_ORIGINS, ENV_DATABASE_PATH};
    use crate::db::{insert_demographic, insert_labs, insert_medication};
    use crate::models::{Demographic, Labs, Medication};

    /// Context backed by a temp database. Keep the guard alive for the test.
    fn test_ctx() -> (ApiContext, tempfile::TempDir) {
        let tmp = tempfile::tempdir().unwrap();
        let db_path = tmp.path().join("test.db").display().to_string();
        let config = AppConfig::from_lookup(|key| match key {
            ENV_DATABASE_PATH => Some(db_path.clone()),
            ENV_CORS_ORIGINS => Some("http://localhost:3000".into()),
            _ => None,
        })
        .unwrap();
        (ApiContext::new(config), tmp)
    }

    fn seed_patients(ctx: &ApiContext, count: i64) {
        let conn = ctx.open_db().unwrap();
        for seqn in 1..=count {
            insert_demographic(
                &conn,
                &Demographic {
                    seqn,
                    riagendr: Some(1 + seqn % 2),
                    ridageyr: Some(20 + seqn),
                    ..Default::default()
                },
            )
            .unwrap();
        }
    }

    fn make_request(method: &str, uri: &str) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .body(Body::empty())
            .unwrap()
    }

    fn json_request(method: &str, uri: &str, body: &str) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .header("Content-Type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn response_json(response: Response) -> serde_json::Value {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    async fn send(ctx: &ApiContext, req: Request<Body>) -> Response {
        api_router(ctx.clone()).oneshot(req).await.unwrap()
    }

    // ── service ──

    #[tokio::test]
    async fn root_reports_name_and_version() {
        let (ctx, _tmp) = test_ctx();
        let response = send(&ctx, make_request("GET", "/")).await;

        assert_eq!(response.status(), StatusCode::OK);
        let json = response_json(response).await;
        assert_eq!(json["name"], crate::config::APP_NAME);
        assert_eq!(json["version"], crate::config::APP_VERSION);
        assert_eq!(json["status"], "healthy");
    }

    #[tokio::test]
    async fn health_is_healthy() {
        let (ctx, _tmp) = test_ctx();
        let response = send(&ctx, make_request("GET", "/api/health")).await;

        assert_eq!(response.status(), StatusCode::OK);
        let json = response_json(response).await;
        assert_eq!(json["status"], "healthy");
        assert_eq!(json["version"], crate::config::APP_VERSION);
    }

    #[tokio::test]
    async fn responses_carry_request_id() {
        let (ctx, _tmp) = test_ctx();
        let response = send(&ctx, make_request("GET", "/api/health")).await;

        let id = response
            .headers()
            .get(middleware::request_log::REQUEST_ID_HEADER)
            .unwrap()
            .to_str()
            .unwrap();
        assert!(uuid::Uuid::parse_str(id).is_ok());
    }

    #[tokio::test]
    async fn unknown_route_is_json_404() {
        let (ctx, _tmp) = test_ctx();
        let response = send(&ctx, make_request("GET", "/api/nonexistent")).await;

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let json = response_json(response).await;
        assert_eq!(json["error"]["code"], "NOT_FOUND");
    }

    #[tokio::test]
    async fn cors_allows_configured_origin() {
        let (ctx, _tmp) = test_ctx();
        let req = Request::builder()
            .method("OPTIONS")
            .uri("/api/patients")
            .header("Origin", "http://localhost:3000")
            .header("Access-Control-Request-Method", "POST")
            .body(Body::empty())
            .unwrap();
        let response = send(&ctx, req).await;

        assert_eq!(
            response
                .headers()
                .get("access-control-allow-origin")
                .unwrap(),
            "http://localhost:3000"
        );
    }

    #[tokio::test]
    async fn cors_ignores_unknown_origin() {
        let (ctx, _tmp) = test_ctx();
        let req = Request::builder()
            .method("GET")
            .uri("/api/health")
            .header("Origin", "http://evil.example")
            .body(Body::empty())
            .unwrap();
        let response = send(&ctx, req).await;

        assert!(response
            .headers()
            .get("access-control-allow-origin")
            .is_none());
    }

    // ── list ──

    #[tokio::test]
    async fn list_empty() {
        let (ctx, _tmp) = test_ctx();
        let response = send(&ctx, make_request("GET", "/api/patients")).await;

        assert_eq!(response.status(), StatusCode::OK);
        let json = response_json(response).await;
        assert_eq!(json["items"].as_array().unwrap().len(), 0);
        assert_eq!(json["total"], 0);
        assert_eq!(json["page"], 1);
        assert_eq!(json["page_size"], 20);
        assert_eq!(json["pages"], 0);
    }

    #[tokio::test]
    async fn list_second_page() {
        let (ctx, _tmp) = test_ctx();
        seed_patients(&ctx, 45);

        let response = send(&ctx, make_request("GET", "/api/patients?page=2&page_size=20")).await;
        assert_eq!(response.status(), StatusCode::OK);

        let json = response_json(response).await;
        let items = json["items"].as_array().unwrap();
        assert_eq!(items.len(), 20);
        assert_eq!(items[0]["seqn"], 21);
        assert_eq!(items[0]["id"], "21");
        assert_eq!(items[19]["seqn"], 40);
        assert_eq!(json["total"], 45);
        assert_eq!(json["pages"], 3);
    }

    #[tokio::test]
    async fn list_filters_by_gender() {
        let (ctx, _tmp) = test_ctx();
        seed_patients(&ctx, 10);

        let response = send(&ctx, make_request("GET", "/api/patients?gender=male")).await;
        let json = response_json(response).await;
        let items = json["items"].as_array().unwrap();
        assert_eq!(json["total"], 5);
        assert!(items.iter().all(|i| i["gender"] == "male"));
    }

    #[tokio::test]
    async fn list_rejects_page_size_over_limit() {
        let (ctx, _tmp) = test_ctx();
        let response = send(&ctx, make_request("GET", "/api/patients?page_size=101")).await;

        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        let json = response_json(response).await;
        assert_eq!(json["error"]["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn list_rejects_unknown_risk_level() {
        let (ctx, _tmp) = test_ctx();
        let response = send(&ctx, make_request("GET", "/api/patients?risk_level=extreme")).await;
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn list_rejects_non_numeric_page() {
        let (ctx, _tmp) = test_ctx();
        let response = send(&ctx, make_request("GET", "/api/patients?page=two")).await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = response_json(response).await;
        assert_eq!(json["error"]["code"], "BAD_REQUEST");
    }

    // ── detail ──

    #[tokio::test]
    async fn detail_not_found() {
        let (ctx, _tmp) = test_ctx();
        let response = send(&ctx, make_request("GET", "/api/patients/99999")).await;

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let json = response_json(response).await;
        assert_eq!(json["error"]["code"], "NOT_FOUND");
        assert_eq!(json["error"]["message"], "Patient not found");
    }

    #[tokio::test]
    async fn detail_rejects_non_integer_id() {
        let (ctx, _tmp) = test_ctx();
        let response = send(&ctx, make_request("GET", "/api/patients/abc")).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn detail_includes_derived_values() {
        let (ctx, _tmp) = test_ctx();
        {
            let conn = ctx.open_db().unwrap();
            insert_demographic(
                &conn,
                &Demographic {
                    seqn: 500,
                    riagendr: Some(2),
                    ridageyr: Some(50),
                    ..Default::default()
                },
            )
            .unwrap();
            insert_labs(
                &conn,
                &Labs {
                    lbxscr: Some(0.6),
                    lbxgh: Some(9.1),
                    ..Labs::empty(500)
                },
            )
            .unwrap();
        }

        let response = send(&ctx, make_request("GET", "/api/patients/500")).await;
        assert_eq!(response.status(), StatusCode::OK);

        let json = response_json(response).await;
        assert_eq!(json["gender"], "female");
        assert_eq!(json["egfr"], 106.6);
        assert_eq!(json["hba1c"], 9.1);
        assert_eq!(json["risk_level"], "moderate");
        assert_eq!(json["status"], "active");
        assert!(json["blood_pressure_systolic"].is_null());
        assert_eq!(json["medications"].as_array().unwrap().len(), 0);
    }

    // ── create ──

    #[tokio::test]
    async fn create_returns_201_with_bmi() {
        let (ctx, _tmp) = test_ctx();
        let body = r#"{"gender":"male","age":45,"weight":70,"height":175,"smoker":true}"#;
        let response = send(&ctx, json_request("POST", "/api/patients", body)).await;

        assert_eq!(response.status(), StatusCode::CREATED);
        let json = response_json(response).await;
        assert_eq!(json["seqn"], 1);
        assert_eq!(json["bmi"], 22.9);
        assert_eq!(json["gender"], "male");
        assert_eq!(json["smoker"], true);
        assert_eq!(json["diabetes_history"], false);

        let response = send(&ctx, make_request("GET", "/api/patients/1")).await;
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn create_rejects_out_of_range() {
        let (ctx, _tmp) = test_ctx();
        let body = r#"{"gender":"female","age":30,"blood_pressure_systolic":300}"#;
        let response = send(&ctx, json_request("POST", "/api/patients", body)).await;

        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        let json = response_json(response).await;
        assert_eq!(json["error"]["code"], "VALIDATION_ERROR");
        assert!(json["error"]["message"]
            .as_str()
            .unwrap()
            .contains("blood_pressure_systolic"));
    }

    #[tokio::test]
    async fn create_rejects_unknown_gender() {
        let (ctx, _tmp) = test_ctx();
        let body = r#"{"gender":"unknown","age":30}"#;
        let response = send(&ctx, json_request("POST", "/api/patients", body)).await;
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn create_requires_age() {
        let (ctx, _tmp) = test_ctx();
        let body = r#"{"gender":"male"}"#;
        let response = send(&ctx, json_request("POST", "/api/patients", body)).await;
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn create_rejects_malformed_json() {
        let (ctx, _tmp) = test_ctx();
        let response = send(&ctx, json_request("POST", "/api/patients", "{not json")).await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = response_json(response).await;
        assert_eq!(json["error"]["code"], "BAD_REQUEST");
    }

    // ── update ──

    #[tokio::test]
    async fn update_weight_recomputes_bmi() {
        let (ctx, _tmp) = test_ctx();
        let body = r#"{"gender":"male","age":45,"weight":70,"height":175}"#;
        send(&ctx, json_request("POST", "/api/patients", body)).await;

        let response = send(&ctx, json_request("PUT", "/api/patients/1", r#"{"weight":80}"#)).await;
        assert_eq!(response.status(), StatusCode::OK);

        let json = response_json(response).await;
        assert_eq!(json["weight"], 80.0);
        assert_eq!(json["height"], 175.0);
        assert_eq!(json["bmi"], 26.1);
    }

    #[tokio::test]
    async fn update_not_found() {
        let (ctx, _tmp) = test_ctx();
        let response = send(&ctx, json_request("PUT", "/api/patients/42", r#"{"heart_rate":70}"#)).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn update_rejects_out_of_range() {
        let (ctx, _tmp) = test_ctx();
        seed_patients(&ctx, 1);
        let response = send(&ctx, json_request("PUT", "/api/patients/1", r#"{"creatinine":25}"#)).await;
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    // ── delete ──

    #[tokio::test]
    async fn delete_then_not_found() {
        let (ctx, _tmp) = test_ctx();
        seed_patients(&ctx, 2);

        let response = send(&ctx, make_request("DELETE", "/api/patients/1")).await;
        assert_eq!(response.status(), StatusCode::NO_CONTENT);

        let response = send(&ctx, make_request("GET", "/api/patients/1")).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let response = send(&ctx, make_request("DELETE", "/api/patients/1")).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let response = send(&ctx, make_request("GET", "/api/patients/2")).await;
        assert_eq!(response.status(), StatusCode::OK);
    }

    // ── medications ──

    #[tokio::test]
    async fn medications_exclude_sentinels() {
        let (ctx, _tmp) = test_ctx();
        seed_patients(&ctx, 1);
        {
            let conn = ctx.open_db().unwrap();
            for drug in ["METFORMIN", "99999", "55555", "LISINOPRIL"] {
                insert_medication(
                    &conn,
                    &Medication {
                        seqn: 1,
                        rxddrug: Some(drug.into()),
                        ..Default::default()
                    },
                )
                .unwrap();
            }
        }

        let response = send(&ctx, make_request("GET", "/api/patients/1/medications")).await;
        assert_eq!(response.status(), StatusCode::OK);

        let json = response_json(response).await;
        let drugs: Vec<&str> = json
            .as_array()
            .unwrap()
            .iter()
            .map(|m| m["rxddrug"].as_str().unwrap())
            .collect();
        assert_eq!(drugs, vec!["METFORMIN", "LISINOPRIL"]);
    }

    #[tokio::test]
    async fn medications_for_missing_patient() {
        let (ctx, _tmp) = test_ctx();
        let response = send(&ctx, make_request("GET", "/api/patients/7/medications")).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
