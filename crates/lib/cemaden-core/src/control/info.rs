use cemaden_store::models::{
    AgencyInfo,
    AlertLevel,
    AlertType,
    MonitoringInfo,
    ObservationNetwork,
    SystemInfo,
    UsageHints,
};
use cemaden_store::schema::{
    ALERT_LEVEL_HIGH,
    ALERT_LEVEL_MODERATE,
    ALERT_LEVEL_VERY_HIGH,
    ALERT_TYPE_HYDROLOGICAL,
    ALERT_TYPE_MASS_MOVEMENT,
    CEMADEN_ACRONYM,
    CEMADEN_FULL_NAME,
    CEMADEN_GOVERNING_BODY,
    CEMADEN_MISSION,
    NATIONAL_MONITORED_MUNICIPALITIES,
    URL_ALERT_PANEL,
    URL_INTERACTIVE_MAP,
    URL_WEBSITE,
};

use super::CemadenControlPlane;

impl CemadenControlPlane {
    /// Returns the fixed description of the monitoring system.
    ///
    /// The municipality total is the published national figure and is not
    /// derived from the loaded dataset.
    #[must_use]
    pub fn system_info(&self) -> SystemInfo {
        cemaden_system_info()
    }
}

#[must_use]
pub fn cemaden_system_info() -> SystemInfo {
    SystemInfo {
        cemaden: AgencyInfo {
            sigla: CEMADEN_ACRONYM.to_string(),
            nome_completo: CEMADEN_FULL_NAME.to_string(),
            orgao_vinculado: CEMADEN_GOVERNING_BODY.to_string(),
            missao: CEMADEN_MISSION.to_string(),
            website: URL_WEBSITE.to_string(),
            painel_alertas: URL_ALERT_PANEL.to_string(),
            mapa_interativo: URL_INTERACTIVE_MAP.to_string(),
        },
        monitoramento: MonitoringInfo {
            total_municipios: NATIONAL_MONITORED_MUNICIPALITIES,
            tipos_alerta: vec![
                AlertType {
                    tipo: ALERT_TYPE_MASS_MOVEMENT.to_string(),
                    descricao: "Deslizamentos de terra, corridas de massa e outros movimentos \
                                geológicos"
                        .to_string(),
                },
                AlertType {
                    tipo: ALERT_TYPE_HYDROLOGICAL.to_string(),
                    descricao: "Enchentes, enxurradas, inundações e alagamentos".to_string(),
                },
            ],
            niveis_alerta: vec![
                AlertLevel {
                    nivel: ALERT_LEVEL_MODERATE.to_string(),
                    cor: "Amarelo".to_string(),
                    descricao: "Potencial de ocorrência de desastres".to_string(),
                },
                AlertLevel {
                    nivel: ALERT_LEVEL_HIGH.to_string(),
                    cor: "Laranja".to_string(),
                    descricao: "Risco elevado de ocorrência de desastres".to_string(),
                },
                AlertLevel {
                    nivel: ALERT_LEVEL_VERY_HIGH.to_string(),
                    cor: "Vermelho".to_string(),
                    descricao: "Risco muito elevado de ocorrência de desastres".to_string(),
                },
            ],
        },
        rede_observacional: ObservationNetwork {
            pluviometros_automaticos: "Medem chuva a cada 10 minutos".to_string(),
            pluviometros_comunitarios: "~1150 distribuídos em +300 municípios".to_string(),
            radares_meteorologicos: "9 radares de dupla polarização".to_string(),
            estacoes_hidrologicas: "Monitoram nível de rios".to_string(),
        },
        como_usar: UsageHints {
            alertas: format!("Acesse {URL_ALERT_PANEL} para ver alertas ativos"),
            dados_chuva: format!("Acesse {URL_INTERACTIVE_MAP} para dados de pluviômetros"),
            download_dados: "Disponível no Mapa Interativo por UF e município".to_string(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn national_total_is_the_published_figure() {
        let info = cemaden_system_info();
        assert_eq!(info.monitoramento.total_municipios, 959);
        assert_eq!(info.monitoramento.niveis_alerta.len(), 3);
        assert_eq!(info.cemaden.painel_alertas, URL_ALERT_PANEL);
    }
}
