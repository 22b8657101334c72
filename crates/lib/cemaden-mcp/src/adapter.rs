//! Typed tool-call contract.
//!
//! Host requests name an operation and carry an optional argument object.
//! Names are checked against the known operations and arguments are decoded
//! into per-operation parameter structs before anything runs.

use std::{error::Error, fmt};

use cemaden_core::control::ErrorCode;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use crate::tools::municipalities::ListMunicipalitiesParams;
use crate::tools::reference::LinksParams;

pub const CONSULT_ALERTS_PANEL: &str = "consultar_painel_alertas";
pub const LIST_MUNICIPALITIES: &str = "listar_municipios_monitorados";
pub const SYSTEM_INFO: &str = "info_sistema_monitoramento";
pub const LINKS: &str = "links_cemaden";

pub const OPERATION_NAMES: [&str; 4] = [
    CONSULT_ALERTS_PANEL,
    LIST_MUNICIPALITIES,
    SYSTEM_INFO,
    LINKS,
];

#[derive(Debug)]
pub enum AdapterError {
    UnknownOperation(String),
    InvalidArguments {
        operation: &'static str,
        message: String,
    },
}

impl AdapterError {
    #[must_use]
    pub const fn code(&self) -> ErrorCode {
        match self {
            Self::UnknownOperation(_) => ErrorCode::UnknownOperation,
            Self::InvalidArguments { .. } => ErrorCode::InvalidArguments,
        }
    }
}

impl fmt::Display for AdapterError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownOperation(name) => write!(f, "Ferramenta desconhecida: {name}"),
            Self::InvalidArguments { operation, message } => {
                write!(f, "Argumentos inválidos para {operation}: {message}")
            }
        }
    }
}

impl Error for AdapterError {}

/// One of the four operations the server exposes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operation {
    ConsultAlertsPanel,
    ListMunicipalities(ListMunicipalitiesParams),
    SystemInfo,
    Links(LinksParams),
}

impl Operation {
    /// Resolves a tool name and its raw arguments.
    ///
    /// Operations without parameters ignore any arguments they receive.
    ///
    /// # Errors
    /// Returns `AdapterError::UnknownOperation` for unrecognized names and
    /// `AdapterError::InvalidArguments` if the arguments do not decode.
    pub fn parse(name: &str, arguments: Option<Map<String, Value>>) -> Result<Self, AdapterError> {
        match name {
            CONSULT_ALERTS_PANEL => Ok(Self::ConsultAlertsPanel),
            LIST_MUNICIPALITIES => {
                decode_params(LIST_MUNICIPALITIES, arguments).map(Self::ListMunicipalities)
            }
            SYSTEM_INFO => Ok(Self::SystemInfo),
            LINKS => decode_params(LINKS, arguments).map(Self::Links),
            _ => Err(AdapterError::UnknownOperation(name.to_string())),
        }
    }

    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::ConsultAlertsPanel => CONSULT_ALERTS_PANEL,
            Self::ListMunicipalities(_) => LIST_MUNICIPALITIES,
            Self::SystemInfo => SYSTEM_INFO,
            Self::Links(_) => LINKS,
        }
    }
}

fn decode_params<T>(
    operation: &'static str,
    arguments: Option<Map<String, Value>>,
) -> Result<T, AdapterError>
where
    T: DeserializeOwned + Default,
{
    let Some(arguments) = arguments else {
        return Ok(T::default());
    };
    serde_json::from_value(Value::Object(arguments)).map_err(|err| {
        AdapterError::InvalidArguments {
            operation,
            message: err.to_string(),
        }
    })
}
