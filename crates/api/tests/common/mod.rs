#![allow(dead_code)] // each test binary uses its own subset of these helpers

use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::extract::DefaultBodyLimit;
use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use axum::http::{HeaderName, Method, Request, Response, StatusCode};
use axum::Router;
use sqlx::PgPool;
use tempfile::TempDir;
use tower::ServiceExt;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::CorsLayer;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

use ctei_api::config::{ScoringConfig, ServerConfig};
use ctei_api::routes;
use ctei_api::state::AppState;
use ctei_api::uploads::UploadStore;
use ctei_events::InvalidationBus;
use ctei_scoring::{
    Assessment, HeuristicScoringOracle, OracleError, ProposalInput, ScoringOracle,
};

/// Multipart boundary used by the request builders below.
pub const BOUNDARY: &str = "x-ctei-test-boundary";

/// Build a test `ServerConfig` with safe defaults and the given upload dir.
pub fn test_config(upload_dir: PathBuf) -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        upload_dir,
        scoring: ScoringConfig::Heuristic,
    }
}

/// A built application plus the tempdir its uploads live in (kept alive for
/// the duration of the test).
pub struct TestApp {
    pub app: Router,
    pub uploads: TempDir,
}

/// Build the full application router with all middleware layers, the given
/// pool, and the heuristic oracle.
pub fn build_test_app(pool: PgPool) -> TestApp {
    build_test_app_with_oracle(pool, Arc::new(HeuristicScoringOracle::new()))
}

/// Build the application with an injected scoring oracle.
///
/// This mirrors the router construction in `main.rs` so integration tests
/// exercise the same middleware stack (CORS, request ID, timeout, tracing,
/// panic recovery, body limit) that production uses.
pub fn build_test_app_with_oracle(pool: PgPool, oracle: Arc<dyn ScoringOracle>) -> TestApp {
    let uploads_dir = tempfile::tempdir().expect("tempdir");
    let config = test_config(uploads_dir.path().to_path_buf());
    let uploads = UploadStore::new(uploads_dir.path());

    let state = AppState {
        pool,
        config: Arc::new(config),
        oracle,
        invalidations: Arc::new(InvalidationBus::default()),
        uploads,
    };

    let cors = CorsLayer::new()
        .allow_origin(["http://localhost:5173".parse().unwrap()])
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::PATCH,
        ])
        .allow_headers([CONTENT_TYPE, AUTHORIZATION])
        .allow_credentials(true)
        .max_age(Duration::from_secs(3600));

    let request_id_header = HeaderName::from_static("x-request-id");

    let app = Router::new()
        .merge(routes::health::router())
        .nest("/api/v1", routes::api_routes())
        .layer(CatchPanicLayer::new())
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            Duration::from_secs(30),
        ))
        .layer(PropagateRequestIdLayer::new(request_id_header.clone()))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(SetRequestIdLayer::new(request_id_header, MakeRequestUuid))
        .layer(DefaultBodyLimit::max(64 * 1024 * 1024))
        .layer(cors)
        .with_state(state);

    TestApp {
        app,
        uploads: uploads_dir,
    }
}

// ---------------------------------------------------------------------------
// Scoring oracle doubles
// ---------------------------------------------------------------------------

/// Oracle double that counts calls and returns a fixed assessment.
pub struct CountingOracle {
    pub calls: Arc<AtomicUsize>,
    pub score: i32,
}

impl CountingOracle {
    /// Returns the oracle and a handle to its call counter.
    pub fn new(score: i32) -> (Arc<Self>, Arc<AtomicUsize>) {
        let calls = Arc::new(AtomicUsize::new(0));
        (
            Arc::new(Self {
                calls: Arc::clone(&calls),
                score,
            }),
            calls,
        )
    }
}

#[async_trait::async_trait]
impl ScoringOracle for CountingOracle {
    async fn assess(&self, _input: &ProposalInput) -> Result<Assessment, OracleError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(Assessment {
            score: self.score,
            summary: "AI Summary".to_string(),
            rationale: "AI Rationale".to_string(),
            recommendations: "AI Recommendations".to_string(),
        })
    }
}

/// Oracle double that always fails with a transport error.
pub struct FailingOracle;

#[async_trait::async_trait]
impl ScoringOracle for FailingOracle {
    async fn assess(&self, _input: &ProposalInput) -> Result<Assessment, OracleError> {
        Err(OracleError::Transport("assistant unavailable".to_string()))
    }
}

/// Oracle double that answers with an out-of-bounds score.
pub struct OutOfRangeOracle;

#[async_trait::async_trait]
impl ScoringOracle for OutOfRangeOracle {
    async fn assess(&self, _input: &ProposalInput) -> Result<Assessment, OracleError> {
        Ok(Assessment {
            score: 150,
            summary: "AI Summary".to_string(),
            rationale: "AI Rationale".to_string(),
            recommendations: "AI Recommendations".to_string(),
        })
    }
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

/// Assemble a multipart body from text fields and `attachments` file parts.
pub fn multipart_body(fields: &[(&str, &str)], files: &[(&str, &[u8])]) -> Vec<u8> {
    let mut body = Vec::new();
    for (name, value) in fields {
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n"
            )
            .as_bytes(),
        );
    }
    for (filename, bytes) in files {
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"attachments\"; \
                 filename=\"{filename}\"\r\nContent-Type: application/pdf\r\n\r\n"
            )
            .as_bytes(),
        );
        body.extend_from_slice(bytes);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
    body
}

async fn send_multipart(
    app: &Router,
    method: Method,
    uri: &str,
    fields: &[(&str, &str)],
    files: &[(&str, &[u8])],
) -> Response<Body> {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header(
            CONTENT_TYPE,
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(Body::from(multipart_body(fields, files)))
        .unwrap();
    app.clone().oneshot(request).await.unwrap()
}

pub async fn post_multipart(
    app: &Router,
    uri: &str,
    fields: &[(&str, &str)],
    files: &[(&str, &[u8])],
) -> Response<Body> {
    send_multipart(app, Method::POST, uri, fields, files).await
}

pub async fn put_multipart(
    app: &Router,
    uri: &str,
    fields: &[(&str, &str)],
    files: &[(&str, &[u8])],
) -> Response<Body> {
    send_multipart(app, Method::PUT, uri, fields, files).await
}

pub async fn get(app: &Router, uri: &str) -> Response<Body> {
    let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
    app.clone().oneshot(request).await.unwrap()
}

pub async fn delete(app: &Router, uri: &str) -> Response<Body> {
    let request = Request::builder()
        .method(Method::DELETE)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    app.clone().oneshot(request).await.unwrap()
}

/// Collect a response body into JSON.
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    use http_body_util::BodyExt;
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap_or_else(|e| panic!("invalid JSON body: {e}"))
}

/// The standard valid project form used across tests.
pub fn valid_project_fields() -> Vec<(&'static str, &'static str)> {
    vec![
        ("titulo", "Plataforma de Monitoreo de Biodiversidad"),
        (
            "resumen",
            "Desarrollo de una plataforma de ciencia ciudadana para registrar observaciones \
             de flora y fauna en entornos urbanos.",
        ),
        ("presupuesto", "300000"),
        ("estado", "PROPUESTO"),
        ("entidadProponente", "Fundación ConCiencia"),
        ("isPublic", "on"),
        ("description", "Aplicación móvil y web con base de datos abierta."),
    ]
}

/// The standard valid product form (without `projectId`, which comes from
/// the route path).
pub fn valid_product_fields() -> Vec<(&'static str, &'static str)> {
    vec![
        ("titulo", "Artículo de resultados"),
        (
            "descripcion",
            "Artículo con los resultados del primer año del proyecto.",
        ),
        ("productType", "ART_OPEN_A1"),
        ("isPublic", "true"),
    ]
}
