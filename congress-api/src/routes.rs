//! API route configuration.

use std::sync::Arc;

use axum::{routing::get, Router};
use tower_http::services::ServeDir;

use crate::handlers;
use crate::state::AppState;

/// Creates the API router with all routes configured.
///
/// Paths that match no route are served from the public directory.
pub fn create_router(state: Arc<AppState>) -> Router {
    let static_files = ServeDir::new(&state.config.public_dir);

    Router::new()
        // Health check
        .route("/health", get(handlers::health_check))

        // Legislation
        .route("/congress/v1/legislation", get(handlers::upcoming_bills))
        .route("/congress/v1/legislation/:bill_slug", get(handlers::get_bill))
        .route(
            "/congress/v1/legislation/:bill_slug/representatives",
            get(handlers::bill_cosponsors),
        )
        .route(
            "/congress/v1/congress/:congress_id/legislation/:bill_slug/statements",
            get(handlers::bill_statements),
        )

        .fallback_service(static_files)
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;
    use axum::body::Body;
    use axum::http::{header, Request, StatusCode};
    use tower::ServiceExt;

    use congress_core::error::{CongressError, Result};
    use congress_core::traits::LegislationSource;
    use congress_core::types::*;
    use congress_core::JSONAPI_MEDIA_TYPE;

    use crate::config::ServerConfig;

    #[derive(Default)]
    struct StubSource {
        calls: AtomicUsize,
        fail_senate: bool,
    }

    #[async_trait]
    impl LegislationSource for StubSource {
        fn endpoint_url(&self, endpoint: &Endpoint) -> String {
            endpoint.url("stub://congress/v1")
        }

        async fn upcoming_bills(&self, chamber: Chamber) -> Result<Vec<UpcomingBill>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if chamber == Chamber::Senate && self.fail_senate {
                return Err(CongressError::BadStatus("ERROR".into()));
            }
            Ok(vec![UpcomingBill {
                bill_id: format!("{}-bill", chamber),
                chamber: chamber.to_string(),
                ..Default::default()
            }])
        }

        async fn bill_cosponsors(&self, _bill: &BillRef) -> Result<Vec<Representative>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(vec![Representative {
                cosponsor_id: "A000374".into(),
                cosponsor_party: "R".into(),
                ..Default::default()
            }])
        }

        async fn bill_statements(&self, bill: &BillRef) -> Result<Vec<Statement>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(vec![Statement {
                url: format!("https://example.gov/{}", bill),
                ..Default::default()
            }])
        }

        async fn bill(&self, bill: &BillRef) -> Result<Bill> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if bill.slug == "missing" {
                return Err(CongressError::NoData);
            }
            Ok(Bill {
                bill_id: bill.to_string(),
                bill_slug: bill.slug.clone(),
                ..Default::default()
            })
        }
    }

    fn test_app_with(source: Arc<StubSource>, config: ServerConfig) -> Router {
        let state = Arc::new(AppState::with_source(config, source));
        create_router(state)
    }

    fn test_app(source: Arc<StubSource>) -> Router {
        test_app_with(source, ServerConfig::default())
    }

    async fn get(app: Router, uri: &str) -> (StatusCode, Option<String>, serde_json::Value) {
        let response = app
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();

        let status = response.status();
        let content_type = response
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json = serde_json::from_slice(&body).unwrap_or(serde_json::Value::Null);

        (status, content_type, json)
    }

    #[tokio::test]
    async fn test_health_check() {
        let (status, _, body) = get(test_app(Arc::default()), "/health").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
        assert_eq!(body["cache"]["total_entries"], 0);
    }

    #[tokio::test]
    async fn test_upcoming_bills_house_first() {
        let (status, content_type, body) =
            get(test_app(Arc::default()), "/congress/v1/legislation").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(content_type.as_deref(), Some(JSONAPI_MEDIA_TYPE));

        let data = body["data"].as_array().unwrap();
        assert_eq!(data.len(), 2);
        assert_eq!(data[0]["id"], "house-bill");
        assert_eq!(data[1]["id"], "senate-bill");
        assert_eq!(data[0]["type"], "legislation");
    }

    #[tokio::test]
    async fn test_upcoming_bills_failure_is_not_partial() {
        let source = Arc::new(StubSource {
            fail_senate: true,
            ..Default::default()
        });
        let (status, _, body) = get(test_app(source), "/congress/v1/legislation").await;

        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert!(body.get("data").is_none());
        assert_eq!(body["error"]["code"], "UPSTREAM_ERROR");
    }

    #[tokio::test]
    async fn test_repeated_requests_hit_cache() {
        let source = Arc::new(StubSource::default());
        let state = Arc::new(AppState::with_source(ServerConfig::default(), source.clone()));

        for _ in 0..3 {
            let (status, _, _) =
                get(create_router(state.clone()), "/congress/v1/legislation/hr4249-115").await;
            assert_eq!(status, StatusCode::OK);
        }

        assert_eq!(source.calls.load(Ordering::SeqCst), 1);

        let (_, _, health) = get(create_router(state), "/health").await;
        assert_eq!(health["cache"]["valid_entries"], 1);
    }

    #[tokio::test]
    async fn test_get_bill() {
        let (status, _, body) =
            get(test_app(Arc::default()), "/congress/v1/legislation/hr4249-115").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["id"], "hr4249-115");
        assert_eq!(body["data"]["attributes"]["slug"], "hr4249");
    }

    #[tokio::test]
    async fn test_get_bill_invalid_slug() {
        let source = Arc::new(StubSource::default());
        let (status, _, body) =
            get(test_app(source.clone()), "/congress/v1/legislation/hr4249").await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "BAD_REQUEST");
        assert_eq!(source.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_get_bill_no_data() {
        let (status, _, _) =
            get(test_app(Arc::default()), "/congress/v1/legislation/missing-115").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_bill_cosponsors() {
        let (status, _, body) = get(
            test_app(Arc::default()),
            "/congress/v1/legislation/hr4249-115/representatives",
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"][0]["type"], "representative");
        assert_eq!(body["data"][0]["attributes"]["party-id"], "R");
    }

    #[tokio::test]
    async fn test_bill_statements() {
        let (status, _, body) = get(
            test_app(Arc::default()),
            "/congress/v1/congress/115/legislation/hr4249/statements",
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"][0]["id"], "https://example.gov/hr4249-115");
    }

    #[tokio::test]
    async fn test_bill_statements_non_numeric_congress() {
        let (status, _, _) = get(
            test_app(Arc::default()),
            "/congress/v1/congress/abc/legislation/hr4249/statements",
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_static_fallback() {
        let public = tempfile::tempdir().unwrap();
        std::fs::write(public.path().join("index.html"), "<h1>congress</h1>").unwrap();

        let config = ServerConfig {
            public_dir: public.path().to_path_buf(),
            ..Default::default()
        };
        let app = test_app_with(Arc::default(), config);

        let response = app
            .clone()
            .oneshot(Request::builder().uri("/index.html").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let (status, _, _) = get(app, "/missing.js").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }
}
