use cemaden_store::models::MunicipalityTable;
use cemaden_store::schema::{
    CEMADEN_ACRONYM,
    CEMADEN_SOURCE,
    NATIONAL_MONITORED_MUNICIPALITIES,
    URL_FULL_MUNICIPALITY_LIST,
    normalize_state_code,
};
use serde::Serialize;

use super::{CemadenControlPlane, ControlError};

/// Municipalities for a single state.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct StateListing {
    pub estado: String,
    pub total: usize,
    pub municipios: Vec<String>,
    pub nota: String,
    pub fonte: String,
}

/// Every state in the dataset.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct NationalListing {
    pub total_nacional: u32,
    pub total_estados: usize,
    pub total_municipios: usize,
    pub estados_disponiveis: Vec<String>,
    pub municipios_por_estado: MunicipalityTable,
    pub fonte: String,
    pub nota: String,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum MunicipalityListing {
    State(StateListing),
    National(NationalListing),
}

impl CemadenControlPlane {
    /// Lists monitored municipalities, optionally for one state.
    ///
    /// A blank `estado` is treated as absent. Codes are matched after trimming
    /// and upper-casing; there is no partial matching.
    ///
    /// # Errors
    /// Returns `ControlError::DataUnavailable` if the dataset failed to load
    /// and `ControlError::NotFound` with every valid code for unknown states.
    pub fn list_municipalities(
        &self,
        estado: Option<&str>,
    ) -> Result<MunicipalityListing, ControlError> {
        let catalog = self.catalog();
        if let Some(reason) = catalog.load_error() {
            return Err(ControlError::DataUnavailable(reason.to_string()));
        }
        let table = catalog.table();

        let Some(code) = estado.and_then(normalize_state_code) else {
            return Ok(MunicipalityListing::National(national_listing(table)));
        };

        let Some(municipalities) = table.get(&code) else {
            return Err(ControlError::NotFound {
                state: code,
                available: table.state_codes(),
            });
        };

        Ok(MunicipalityListing::State(StateListing {
            estado: code,
            total: municipalities.len(),
            municipios: municipalities.to_vec(),
            nota: format!(
                "Lista parcial de municípios monitorados. Total nacional: \
                 {NATIONAL_MONITORED_MUNICIPALITIES} municípios."
            ),
            fonte: CEMADEN_SOURCE.to_string(),
        }))
    }
}

fn national_listing(table: &MunicipalityTable) -> NationalListing {
    NationalListing {
        total_nacional: NATIONAL_MONITORED_MUNICIPALITIES,
        total_estados: table.len(),
        total_municipios: table.total_municipalities(),
        estados_disponiveis: table.state_codes(),
        municipios_por_estado: table.clone(),
        fonte: CEMADEN_ACRONYM.to_string(),
        nota: format!(
            "Estes são exemplos de municípios monitorados. Total nacional: \
             {NATIONAL_MONITORED_MUNICIPALITIES} municípios. Lista completa em \
             {URL_FULL_MUNICIPALITY_LIST}"
        ),
    }
}
