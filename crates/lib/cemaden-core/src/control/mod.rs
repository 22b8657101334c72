use std::{error::Error, fmt, sync::Arc};

use serde::{Deserialize, Serialize};

use crate::panel::{PanelError, PanelProxy};
use crate::services::Catalog;

pub mod alerts;
pub mod info;
pub mod links;
pub mod municipalities;

pub use alerts::{PanelDescription, PanelReport};
pub use links::LinksView;
pub use municipalities::{MunicipalityListing, NationalListing, StateListing};

/// Machine-readable failure kind reported alongside error messages.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    DataUnavailable,
    NotFound,
    Timeout,
    Unavailable,
    UnknownOperation,
    InvalidArguments,
}

impl ErrorCode {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::DataUnavailable => "data_unavailable",
            Self::NotFound => "not_found",
            Self::Timeout => "timeout",
            Self::Unavailable => "unavailable",
            Self::UnknownOperation => "unknown_operation",
            Self::InvalidArguments => "invalid_arguments",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug)]
pub enum ControlError {
    DataUnavailable(String),
    NotFound { state: String, available: Vec<String> },
    Timeout { url: String },
    Unavailable { url: String, message: String },
}

impl ControlError {
    #[must_use]
    pub const fn code(&self) -> ErrorCode {
        match self {
            Self::DataUnavailable(_) => ErrorCode::DataUnavailable,
            Self::NotFound { .. } => ErrorCode::NotFound,
            Self::Timeout { .. } => ErrorCode::Timeout,
            Self::Unavailable { .. } => ErrorCode::Unavailable,
        }
    }
}

impl fmt::Display for ControlError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DataUnavailable(reason) => {
                write!(f, "Base de municípios indisponível: {reason}")
            }
            Self::NotFound { state, .. } => write!(f, "Estado '{state}' não encontrado"),
            Self::Timeout { url } => {
                write!(f, "Tempo esgotado ao acessar painel de alertas ({url})")
            }
            Self::Unavailable { message, .. } => {
                write!(f, "Erro ao acessar painel de alertas: {message}")
            }
        }
    }
}

impl Error for ControlError {}

impl From<PanelError> for ControlError {
    fn from(err: PanelError) -> Self {
        match err {
            PanelError::Timeout { url, .. } => Self::Timeout { url },
            PanelError::Unavailable { url, message } => Self::Unavailable { url, message },
            PanelError::Client(message) => Self::Unavailable {
                url: cemaden_store::schema::URL_ALERT_PANEL.to_string(),
                message,
            },
        }
    }
}

/// Entry point for every lookup the tools expose.
#[derive(Debug, Clone)]
pub struct CemadenControlPlane {
    catalog: Arc<Catalog>,
    panel: PanelProxy,
}

impl CemadenControlPlane {
    #[must_use]
    pub const fn new(catalog: Arc<Catalog>, panel: PanelProxy) -> Self {
        Self { catalog, panel }
    }

    #[must_use]
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    #[must_use]
    pub const fn panel(&self) -> &PanelProxy {
        &self.panel
    }
}
