pub const CEMADEN_ACRONYM: &str = "CEMADEN";
pub const CEMADEN_FULL_NAME: &str =
    "Centro Nacional de Monitoramento e Alertas de Desastres Naturais";
pub const CEMADEN_SOURCE: &str =
    "CEMADEN - Centro Nacional de Monitoramento e Alertas de Desastres Naturais";
pub const CEMADEN_GOVERNING_BODY: &str = "Ministério da Ciência, Tecnologia e Inovação (MCTI)";
pub const CEMADEN_MISSION: &str = "Realizar o monitoramento das ameaças naturais em áreas de risco \
    em municípios brasileiros suscetíveis à ocorrência de desastres naturais e emitir alertas \
    antecipados que permitam a proteção da população.";

pub const URL_WEBSITE: &str = "http://www.cemaden.gov.br";
pub const URL_ALERT_PANEL: &str = "https://painelalertas.cemaden.gov.br/";
pub const URL_INTERACTIVE_MAP: &str = "https://mapainterativo.cemaden.gov.br/";
pub const URL_EDUCATION: &str = "https://educacao.cemaden.gov.br/";
pub const URL_FULL_MUNICIPALITY_LIST: &str = "http://www2.cemaden.gov.br/";

/// Nationally monitored municipality count as published by CEMADEN.
///
/// Stated independently of the local dataset, which only carries a curated
/// subset of the monitored municipalities.
pub const NATIONAL_MONITORED_MUNICIPALITIES: u32 = 959;

pub const ALERT_TYPE_MASS_MOVEMENT: &str = "Movimento de Massa";
pub const ALERT_TYPE_HYDROLOGICAL: &str = "Risco Hidrológico";

pub const ALERT_LEVEL_MODERATE: &str = "Moderado";
pub const ALERT_LEVEL_HIGH: &str = "Alto";
pub const ALERT_LEVEL_VERY_HIGH: &str = "Muito Alto";

pub const LINK_CATEGORY_ALERTS: &str = "alertas";
pub const LINK_CATEGORY_DATA: &str = "dados";
pub const LINK_CATEGORY_EDUCATION: &str = "educacao";

#[must_use]
pub fn alert_types() -> Vec<String> {
    vec![
        ALERT_TYPE_MASS_MOVEMENT.to_string(),
        ALERT_TYPE_HYDROLOGICAL.to_string(),
    ]
}

#[must_use]
pub fn alert_levels() -> Vec<String> {
    vec![
        ALERT_LEVEL_MODERATE.to_string(),
        ALERT_LEVEL_HIGH.to_string(),
        ALERT_LEVEL_VERY_HIGH.to_string(),
    ]
}

/// Normalizes a state code for lookup: trimmed and upper-cased.
///
/// Returns `None` when nothing is left after trimming.
#[must_use]
pub fn normalize_state_code(code: &str) -> Option<String> {
    let trimmed = code.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_uppercase())
    }
}
