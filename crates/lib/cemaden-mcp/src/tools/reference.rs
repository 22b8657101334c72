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

/// Parameters for the link directory.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, schemars::JsonSchema)]
pub struct LinksParams {
    /// Categoria de links: 'alertas', 'dados' ou 'educacao'. Opcional.
    #[serde(default)]
    pub tipo: Option<String>,
}

#[tool_router(router = tool_router_reference, vis = "pub")]
impl CemadenMcp {
    #[tool(
        name = "info_sistema_monitoramento",
        description = "Retorna informações sobre o sistema de monitoramento do CEMADEN: órgão \
                       responsável, missão, tipos e níveis de alerta, rede observacional e como \
                       acessar os dados."
    )]
    async fn system_info(&self) -> Result<CallToolResult, ErrorData> {
        self.run(Operation::SystemInfo).await
    }

    #[tool(
        name = "links_cemaden",
        description = "Retorna links úteis do CEMADEN organizados por categoria (alertas, dados, \
                       educacao). Sem categoria, retorna todos os links."
    )]
    async fn links(
        &self,
        Parameters(params): Parameters<LinksParams>,
    ) -> Result<CallToolResult, ErrorData> {
        self.run(Operation::Links(params)).await
    }
}
