//! MCP server implementation for cemaden-mcp.
//!
//! This crate wires the control plane into rmcp tool handlers. Every tool goes
//! through the typed [`adapter::Operation`] contract and answers with a
//! [`response::ToolResponse`] envelope, so failures reach the host as
//! structured results instead of protocol errors.

mod helpers;
mod tools;
pub mod adapter;
pub mod response;
pub mod server;

use cemaden_core::control::{CemadenControlPlane, ControlError};
use rmcp::{
    ErrorData,
    RoleServer,
    ServerHandler,
    handler::server::tool::{ToolCallContext, ToolRouter},
    service::RequestContext,
    tool,
    tool_router,
};
use rmcp::model::{
    CallToolRequestParams,
    CallToolResult,
    Content,
    ListToolsResult,
    PaginatedRequestParams,
    ServerCapabilities,
    ServerInfo,
};
use serde::Serialize;
use serde_json::{Map, Value};
use tracing::{info, warn};

use crate::adapter::{OPERATION_NAMES, Operation};
use crate::response::ToolResponse;

pub use tools::municipalities::ListMunicipalitiesParams;
pub use tools::reference::LinksParams;

const SERVER_INSTRUCTIONS: &str = r"cemaden-mcp exposes reference data about CEMADEN, the Brazilian national centre for natural disaster monitoring and alerts.

Tools:
- `consultar_painel_alertas`: checks that the alert panel (https://painelalertas.cemaden.gov.br/) is reachable and returns its link. Active alerts are only visible on the panel itself.
- `listar_municipios_monitorados`: lists monitored municipalities. Pass `estado` (e.g. `SP`) to filter by state; unknown states return `estados_disponiveis`.
- `info_sistema_monitoramento`: agency, mission, alert types and levels, observation network.
- `links_cemaden`: useful links, optionally filtered by `tipo` (`alertas`, `dados`, `educacao`).
- `health` returns `ok`.

Every response is JSON with `sucesso`. When `sucesso` is false, read `erro` and the hint fields (`estados_disponiveis`, `url_alternativa`) to correct the request.";

/// MCP server wrapper around the control plane and tool routers.
#[derive(Clone)]
pub struct CemadenMcp {
    tool_router: ToolRouter<Self>,
    control: CemadenControlPlane,
}

impl CemadenMcp {
    #[must_use]
    pub fn new(control: CemadenControlPlane) -> Self {
        let tool_router = Self::tool_router_core()
            + Self::tool_router_alerts()
            + Self::tool_router_municipalities()
            + Self::tool_router_reference();
        Self {
            tool_router,
            control,
        }
    }

    #[must_use]
    pub const fn control(&self) -> &CemadenControlPlane {
        &self.control
    }

    /// Resolves a tool name and raw arguments, then runs the operation.
    ///
    /// Unknown names and undecodable arguments come back as failure envelopes.
    ///
    /// # Errors
    /// Returns an error only if a successful payload cannot be serialized.
    pub async fn call(
        &self,
        name: &str,
        arguments: Option<Map<String, Value>>,
    ) -> Result<ToolResponse, serde_json::Error> {
        match Operation::parse(name, arguments) {
            Ok(operation) => self.dispatch(operation).await,
            Err(err) => {
                warn!(tool = name, error = %err, "rejected tool call");
                Ok(ToolResponse::from_adapter_error(&err))
            }
        }
    }

    /// Runs a parsed operation against the control plane.
    ///
    /// # Errors
    /// Returns an error only if a successful payload cannot be serialized.
    pub async fn dispatch(&self, operation: Operation) -> Result<ToolResponse, serde_json::Error> {
        let name = operation.name();
        let response = match operation {
            Operation::ConsultAlertsPanel => respond(self.control.consult_alerts_panel().await)?,
            Operation::ListMunicipalities(params) => {
                respond(self.control.list_municipalities(params.estado.as_deref()))?
            }
            Operation::SystemInfo => ToolResponse::success(&self.control.system_info())?,
            Operation::Links(params) => {
                ToolResponse::success(&self.control.links(params.tipo.as_deref()))?
            }
        };
        info!(tool = name, sucesso = response.sucesso, "tool call handled");
        Ok(response)
    }

    pub(crate) async fn run(&self, operation: Operation) -> Result<CallToolResult, ErrorData> {
        let response = self
            .dispatch(operation)
            .await
            .map_err(helpers::map_serde_err)?;
        helpers::into_call_result(&response)
    }
}

fn respond<T: Serialize>(
    result: Result<T, ControlError>,
) -> Result<ToolResponse, serde_json::Error> {
    match result {
        Ok(payload) => ToolResponse::success(&payload),
        Err(err) => Ok(ToolResponse::from_control_error(&err)),
    }
}

#[tool_router(router = tool_router_core, vis = "pub")]
impl CemadenMcp {
    #[tool(description = "Health check. Returns 'ok'.")]
    async fn health(&self) -> Result<CallToolResult, ErrorData> {
        Ok(CallToolResult::success(vec![Content::text("ok")]))
    }
}

impl ServerHandler for CemadenMcp {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            instructions: Some(SERVER_INSTRUCTIONS.to_string()),
            capabilities: ServerCapabilities::builder()
                .enable_tools()
                .build(),
            ..Default::default()
        }
    }

    /// Unknown tool names and undecodable arguments answer with a failure
    /// envelope; everything else goes through the tool router.
    async fn call_tool(
        &self,
        request: CallToolRequestParams,
        context: RequestContext<RoleServer>,
    ) -> Result<CallToolResult, ErrorData> {
        let auxiliary = self.tool_router.has_route(&request.name)
            && !OPERATION_NAMES.iter().any(|name| request.name == *name);
        if !auxiliary
            && let Err(err) = Operation::parse(&request.name, request.arguments.clone())
        {
            warn!(tool = %request.name, error = %err, "rejected tool call");
            return helpers::into_call_result(&ToolResponse::from_adapter_error(&err));
        }
        let call = ToolCallContext::new(self, request, context);
        self.tool_router.call(call).await
    }

    async fn list_tools(
        &self,
        _request: Option<PaginatedRequestParams>,
        _context: RequestContext<RoleServer>,
    ) -> Result<ListToolsResult, ErrorData> {
        Ok(ListToolsResult {
            tools: self.tool_router.list_all(),
            meta: None,
            next_cursor: None,
        })
    }
}
