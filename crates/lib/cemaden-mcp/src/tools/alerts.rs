use rmcp::{ErrorData, model::CallToolResult, tool, tool_router};

use crate::CemadenMcp;
use crate::adapter::Operation;

#[tool_router(router = tool_router_alerts, vis = "pub")]
impl CemadenMcp {
    #[tool(
        name = "consultar_painel_alertas",
        description = "Acessa o painel de alertas do CEMADEN para verificar sua disponibilidade e \
                       retorna o link direto para consultar alertas ativos de desastres naturais \
                       no Brasil (Movimento de Massa e Risco Hidrológico; níveis Moderado, Alto e \
                       Muito Alto) por estado e município."
    )]
    async fn consult_alerts_panel(&self) -> Result<CallToolResult, ErrorData> {
        self.run(Operation::ConsultAlertsPanel).await
    }
}
