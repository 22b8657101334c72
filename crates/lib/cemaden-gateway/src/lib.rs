//! JSON over HTTP gateway for cemaden-mcp.
//!
//! Exposes the same four tools to hosts that do not speak MCP: a call names
//! the tool and carries its arguments, and the answer is the tool's response
//! envelope.

use std::net::SocketAddr;
use std::time::Duration;

use axum::Router;
use axum::extract::rejection::JsonRejection;
use axum::extract::{DefaultBodyLimit, Json, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use cemaden_core::control::ErrorCode;
use cemaden_mcp::CemadenMcp;
use cemaden_mcp::adapter::{AdapterError, OPERATION_NAMES, Operation};
use cemaden_mcp::response::ToolResponse;
use serde::Deserialize;
use serde_json::{Map, Value};
use tracing::{info, warn};

pub const DEFAULT_GATEWAY_ADDR: &str = "127.0.0.1:4031";

/// Configuration for the gateway HTTP server.
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    pub addr: SocketAddr,
    pub max_body_bytes: usize,
    pub request_timeout: Duration,
}

impl GatewayConfig {
    #[must_use]
    pub const fn new(addr: SocketAddr) -> Self {
        Self {
            addr,
            max_body_bytes: 64 * 1024,
            request_timeout: Duration::from_secs(30),
        }
    }

    #[must_use]
    pub const fn with_max_body_bytes(mut self, max_body_bytes: usize) -> Self {
        self.max_body_bytes = max_body_bytes;
        self
    }

    #[must_use]
    pub const fn with_request_timeout(mut self, request_timeout: Duration) -> Self {
        self.request_timeout = request_timeout;
        self
    }
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self::new(SocketAddr::from(([127, 0, 0, 1], 4031)))
    }
}

/// HTTP gateway wrapper.
pub struct GatewayServer {
    config: GatewayConfig,
    state: AppState,
}

impl GatewayServer {
    #[must_use]
    pub const fn new(mcp: CemadenMcp, config: GatewayConfig) -> Self {
        let state = AppState {
            mcp,
            request_timeout: config.request_timeout,
        };
        Self { config, state }
    }

    /// Runs the HTTP server until shutdown.
    ///
    /// # Errors
    /// Returns any listener or server error.
    pub async fn serve(self) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let addr = self.config.addr;
        let listener = tokio::net::TcpListener::bind(addr).await?;
        let app = build_router(self.state, self.config.max_body_bytes);

        info!("cemaden-gateway listening on {addr}");
        axum::serve(listener, app).await?;
        Ok(())
    }
}

#[derive(Clone)]
struct AppState {
    mcp: CemadenMcp,
    request_timeout: Duration,
}

#[derive(Debug)]
struct ApiError {
    status: StatusCode,
    body: ToolResponse,
}

impl ApiError {
    fn timeout() -> Self {
        Self {
            status: StatusCode::REQUEST_TIMEOUT,
            body: ToolResponse::failure(
                ErrorCode::Timeout,
                "Tempo limite da requisição esgotado",
            ),
        }
    }

    fn malformed_body(rejection: &JsonRejection) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            body: ToolResponse::failure(
                ErrorCode::InvalidArguments,
                format!("Requisição inválida: {}", rejection.body_text()),
            ),
        }
    }

    fn internal(err: &serde_json::Error) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            body: ToolResponse::failure(
                ErrorCode::Unavailable,
                format!("Falha ao serializar resposta: {err}"),
            ),
        }
    }
}

impl From<AdapterError> for ApiError {
    fn from(err: AdapterError) -> Self {
        let status = match err {
            AdapterError::UnknownOperation(_) => StatusCode::NOT_FOUND,
            AdapterError::InvalidArguments { .. } => StatusCode::BAD_REQUEST,
        };
        Self {
            status,
            body: ToolResponse::from_adapter_error(&err),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(self.body)).into_response()
    }
}

#[derive(Debug, Deserialize)]
struct ToolCallPayload {
    name: String,
    #[serde(default)]
    arguments: Option<Map<String, Value>>,
}

fn build_router(state: AppState, max_body_bytes: usize) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/tools", get(list_tools))
        .route("/tools/call", post(call_tool))
        .layer(DefaultBodyLimit::max(max_body_bytes))
        .with_state(state)
}

async fn health() -> &'static str {
    "ok"
}

async fn list_tools() -> Json<Vec<&'static str>> {
    Json(OPERATION_NAMES.to_vec())
}

async fn call_tool(
    State(state): State<AppState>,
    payload: Result<Json<ToolCallPayload>, JsonRejection>,
) -> Result<Json<ToolResponse>, ApiError> {
    let Json(payload) = payload.map_err(|rejection| {
        warn!(error = %rejection.body_text(), "rejected gateway body");
        ApiError::malformed_body(&rejection)
    })?;
    let operation = Operation::parse(&payload.name, payload.arguments).map_err(|err| {
        warn!(tool = %payload.name, error = %err, "rejected gateway call");
        ApiError::from(err)
    })?;

    let response = tokio::time::timeout(state.request_timeout, state.mcp.dispatch(operation))
        .await
        .map_err(|_| ApiError::timeout())?
        .map_err(|err| ApiError::internal(&err))?;

    Ok(Json(response))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::body::Body;
    use axum::http::Request;
    use cemaden_core::control::CemadenControlPlane;
    use cemaden_core::dataset::MunicipalityDataset;
    use cemaden_core::panel::{PanelConfig, PanelProxy};
    use cemaden_core::services::Catalog;
    use serde_json::json;
    use tower::ServiceExt;
    use wiremock::matchers::method;
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    const DATASET: &str = r#"{"SP": ["São Paulo", "Campinas"], "RJ": ["Rio de Janeiro"]}"#;

    fn router_with(panel_url: &str, request_timeout: Duration) -> Router {
        let table = MunicipalityDataset::parse(DATASET).expect("dataset should parse");
        let panel = PanelProxy::new(PanelConfig::new(panel_url)).expect("client should build");
        let control = CemadenControlPlane::new(Arc::new(Catalog::new(table)), panel);
        let state = AppState {
            mcp: CemadenMcp::new(control),
            request_timeout,
        };
        build_router(state, 64 * 1024)
    }

    fn test_router() -> Router {
        router_with("http://127.0.0.1:9/", Duration::from_secs(5))
    }

    async fn post_raw(router: Router, body: String) -> (StatusCode, Value) {
        let request = Request::post("/tools/call")
            .header("content-type", "application/json")
            .body(Body::from(body))
            .expect("request should build");
        let response = router.oneshot(request).await.expect("router should respond");
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body should be readable");
        let value = serde_json::from_slice(&bytes).expect("body should be JSON");
        (status, value)
    }

    async fn post_call(router: Router, body: Value) -> (StatusCode, Value) {
        post_raw(router, body.to_string()).await
    }

    #[tokio::test]
    async fn health_is_ok() {
        let request = Request::get("/health")
            .body(Body::empty())
            .expect("request should build");
        let response = test_router()
            .oneshot(request)
            .await
            .expect("router should respond");
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn lists_operation_names() {
        let request = Request::get("/tools")
            .body(Body::empty())
            .expect("request should build");
        let response = test_router()
            .oneshot(request)
            .await
            .expect("router should respond");
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body should be readable");
        let names: Vec<String> = serde_json::from_slice(&bytes).expect("body should be JSON");
        assert_eq!(names, OPERATION_NAMES);
    }

    #[tokio::test]
    async fn call_returns_envelope() {
        let (status, body) = post_call(
            test_router(),
            json!({"name": "listar_municipios_monitorados", "arguments": {"estado": "rj"}}),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["sucesso"], json!(true));
        assert_eq!(body["municipios"], json!(["Rio de Janeiro"]));
    }

    #[tokio::test]
    async fn domain_failures_are_still_ok_responses() {
        let (status, body) = post_call(
            test_router(),
            json!({"name": "listar_municipios_monitorados", "arguments": {"estado": "XX"}}),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["sucesso"], json!(false));
        assert_eq!(body["estados_disponiveis"], json!(["SP", "RJ"]));
    }

    #[tokio::test]
    async fn unknown_operation_is_not_found() {
        let (status, body) = post_call(test_router(), json!({"name": "nonexistent_tool"})).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["sucesso"], json!(false));
        assert_eq!(body["codigo"], json!("unknown_operation"));
    }

    #[tokio::test]
    async fn bad_arguments_are_bad_request() {
        let (status, body) = post_call(
            test_router(),
            json!({"name": "links_cemaden", "arguments": {"tipo": 7}}),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["codigo"], json!("invalid_arguments"));
    }

    #[tokio::test]
    async fn non_object_arguments_are_bad_request() {
        let (status, body) = post_call(
            test_router(),
            json!({"name": "listar_municipios_monitorados", "arguments": "SP"}),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["sucesso"], json!(false));
        assert_eq!(body["codigo"], json!("invalid_arguments"));
    }

    #[tokio::test]
    async fn missing_name_is_bad_request() {
        let (status, body) = post_call(test_router(), json!({"arguments": {}})).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["codigo"], json!("invalid_arguments"));
    }

    #[tokio::test]
    async fn invalid_json_is_bad_request() {
        let (status, body) = post_raw(test_router(), "{not json".to_string()).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["sucesso"], json!(false));
        assert_eq!(body["codigo"], json!("invalid_arguments"));
    }

    #[tokio::test]
    async fn slow_call_is_request_timeout() {
        let panel = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(3)))
            .mount(&panel)
            .await;

        let router = router_with(&panel.uri(), Duration::from_millis(200));
        let (status, body) =
            post_call(router, json!({"name": "consultar_painel_alertas"})).await;
        assert_eq!(status, StatusCode::REQUEST_TIMEOUT);
        assert_eq!(body["sucesso"], json!(false));
        assert_eq!(body["codigo"], json!("timeout"));
    }
}
