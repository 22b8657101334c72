//! Response envelope returned by every tool.
//!
//! Each response carries `sucesso`; successful payload fields are flattened
//! next to it, failures carry `erro`, `codigo`, and whatever hints let the
//! caller correct the request.

use cemaden_core::control::{ControlError, ErrorCode};
use cemaden_store::schema::{NATIONAL_MONITORED_MUNICIPALITIES, URL_FULL_MUNICIPALITY_LIST};
use serde::Serialize;
use serde_json::{Map, Value};

use crate::adapter::{AdapterError, OPERATION_NAMES};

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ToolResponse {
    pub sucesso: bool,
    #[serde(flatten)]
    pub body: Map<String, Value>,
}

impl ToolResponse {
    /// Wraps a payload; non-object payloads land under `resultado`.
    ///
    /// # Errors
    /// Returns the serialization error if the payload cannot become JSON.
    pub fn success<T: Serialize>(payload: &T) -> Result<Self, serde_json::Error> {
        let body = match serde_json::to_value(payload)? {
            Value::Object(map) => map,
            other => {
                let mut map = Map::new();
                map.insert("resultado".to_string(), other);
                map
            }
        };
        Ok(Self {
            sucesso: true,
            body,
        })
    }

    #[must_use]
    pub fn failure(code: ErrorCode, message: impl Into<String>) -> Self {
        let mut body = Map::new();
        body.insert("erro".to_string(), Value::String(message.into()));
        body.insert("codigo".to_string(), Value::String(code.as_str().to_string()));
        Self {
            sucesso: false,
            body,
        }
    }

    #[must_use]
    pub fn with_hint(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.body.insert(key.to_string(), value.into());
        self
    }

    #[must_use]
    pub fn from_control_error(err: &ControlError) -> Self {
        let response = Self::failure(err.code(), err.to_string());
        match err {
            ControlError::DataUnavailable(_) => response
                .with_hint("url_alternativa", URL_FULL_MUNICIPALITY_LIST)
                .with_hint(
                    "nota",
                    "Verifique o arquivo de municípios configurado (CEMADEN_DATASET_PATH).",
                ),
            ControlError::NotFound { available, .. } => response
                .with_hint("estados_disponiveis", available.clone())
                .with_hint(
                    "nota",
                    format!(
                        "O CEMADEN monitora {NATIONAL_MONITORED_MUNICIPALITIES} municípios em \
                         todo o Brasil. Para lista completa, acesse: {URL_FULL_MUNICIPALITY_LIST}"
                    ),
                ),
            ControlError::Timeout { url } | ControlError::Unavailable { url, .. } => response
                .with_hint("url_alternativa", url.clone())
                .with_hint(
                    "nota",
                    "Acesse o link diretamente no navegador para visualizar alertas ativos",
                ),
        }
    }

    #[must_use]
    pub fn from_adapter_error(err: &AdapterError) -> Self {
        let response = Self::failure(err.code(), err.to_string());
        match err {
            AdapterError::UnknownOperation(_) => {
                response.with_hint("operacoes_disponiveis", OPERATION_NAMES.to_vec())
            }
            AdapterError::InvalidArguments { .. } => response,
        }
    }

    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.sucesso
    }

    #[must_use]
    pub fn field(&self, key: &str) -> Option<&Value> {
        self.body.get(key)
    }

    #[must_use]
    pub fn code(&self) -> Option<&str> {
        self.body.get("codigo").and_then(Value::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn success_flattens_payload_after_flag() {
        let response = ToolResponse::success(&serde_json::json!({"estado": "SP"}))
            .expect("payload should serialize");
        let json = serde_json::to_string(&response).expect("response should serialize");
        assert_eq!(json, r#"{"sucesso":true,"estado":"SP"}"#);
    }

    #[test]
    fn not_found_carries_valid_codes() {
        let err = ControlError::NotFound {
            state: "XX".to_string(),
            available: vec!["SP".to_string(), "RJ".to_string()],
        };
        let response = ToolResponse::from_control_error(&err);
        assert!(!response.is_success());
        assert_eq!(
            response.field("erro"),
            Some(&Value::from("Estado 'XX' não encontrado"))
        );
        assert_eq!(
            response.field("estados_disponiveis"),
            Some(&serde_json::json!(["SP", "RJ"]))
        );
        assert_eq!(response.code(), Some("not_found"));
    }

    #[test]
    fn panel_failures_point_at_the_panel() {
        let err = ControlError::Timeout {
            url: "https://painelalertas.cemaden.gov.br/".to_string(),
        };
        let response = ToolResponse::from_control_error(&err);
        assert_eq!(response.code(), Some("timeout"));
        assert_eq!(
            response.field("url_alternativa"),
            Some(&Value::from("https://painelalertas.cemaden.gov.br/"))
        );
    }
}
