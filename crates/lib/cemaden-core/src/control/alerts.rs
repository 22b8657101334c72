use cemaden_store::schema::{NATIONAL_MONITORED_MUNICIPALITIES, alert_levels, alert_types};
use chrono::{DateTime, Utc};
use serde::Serialize;

use super::{CemadenControlPlane, ControlError};

/// Fixed description of what the panel shows.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct PanelDescription {
    pub descricao: String,
    pub niveis: Vec<String>,
    pub tipos: Vec<String>,
    pub total_municipios_monitorados: u32,
}

/// Result of a successful alert panel check.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct PanelReport {
    pub url_painel: String,
    pub mensagem: String,
    pub info: PanelDescription,
    pub acesso_direto: String,
    pub status_http: u16,
    pub consultado_em: DateTime<Utc>,
}

impl CemadenControlPlane {
    /// Checks that the alert panel answers and describes how to use it.
    ///
    /// The panel content itself is not read.
    ///
    /// # Errors
    /// Returns `ControlError::Timeout` if the panel does not answer in time
    /// and `ControlError::Unavailable` for any other failure.
    pub async fn consult_alerts_panel(&self) -> Result<PanelReport, ControlError> {
        let status = self.panel().check().await?;
        Ok(PanelReport {
            mensagem: format!(
                "O CEMADEN disponibiliza alertas através do painel interativo. Acesse {} \
                 para visualizar alertas ativos de movimento de massa e riscos hidrológicos.",
                status.url
            ),
            info: PanelDescription {
                descricao: "Painel mostra alertas por UF e município".to_string(),
                niveis: alert_levels(),
                tipos: alert_types(),
                total_municipios_monitorados: NATIONAL_MONITORED_MUNICIPALITIES,
            },
            acesso_direto: status.url.clone(),
            url_painel: status.url,
            status_http: status.http_status,
            consultado_em: status.checked_at,
        })
    }
}
