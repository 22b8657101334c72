use rmcp::{
    ErrorData,
    handler::server::wrapper::Parameters,
    model::CallToolResult,
    schemars,
    tool,
    tool_router,
};
use serde::{Deserialize, Serialize};

use crate::CemadenMcp;
use crate::adapter::Operation;

/// Parameters for listing monitored municipalities.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, schemars::JsonSchema)]
pub struct ListMunicipalitiesParams {
    /// Sigla do estado (SP, RJ, MG, RS, PR, SC, BA, PE, CE, ES, etc.). Opcional.
    #[serde(default)]
    pub estado: Option<String>,
}

#[tool_router(router = tool_router_municipalities, vis = "pub")]
impl CemadenMcp {
    #[tool(
        name = "listar_municipios_monitorados",
        description = "Lista municípios brasileiros monitorados pelo CEMADEN. O CEMADEN monitora \
                       959 municípios vulneráveis a desastres naturais. Pode filtrar por estado \
                       (sigla: SP, RJ, MG, etc.); estados desconhecidos retornam a lista de \
                       estados disponíveis."
    )]
    async fn list_municipalities(
        &self,
        Parameters(params): Parameters<ListMunicipalitiesParams>,
    ) -> Result<CallToolResult, ErrorData> {
        self.run(Operation::ListMunicipalities(params)).await
    }
}
