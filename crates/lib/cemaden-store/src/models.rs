use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};

/// Municipalities listed for a single state.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct StateMunicipalities {
    pub code: String,
    pub municipalities: Vec<String>,
}

/// Ordered mapping of state code to monitored municipality names.
///
/// Entries keep the order of the source file. Serializes as a JSON object
/// keyed by state code.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MunicipalityTable {
    entries: Vec<StateMunicipalities>,
}

impl MunicipalityTable {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Builds a table from entries that already carry normalized codes.
    #[must_use]
    pub const fn from_entries(entries: Vec<StateMunicipalities>) -> Self {
        Self { entries }
    }

    /// Looks up a state by its normalized code.
    #[must_use]
    pub fn get(&self, code: &str) -> Option<&[String]> {
        self.entries
            .iter()
            .find(|entry| entry.code == code)
            .map(|entry| entry.municipalities.as_slice())
    }

    /// State codes in insertion order.
    #[must_use]
    pub fn state_codes(&self) -> Vec<String> {
        self.entries.iter().map(|entry| entry.code.clone()).collect()
    }

    #[must_use]
    pub fn total_municipalities(&self) -> usize {
        self.entries
            .iter()
            .map(|entry| entry.municipalities.len())
            .sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = &StateMunicipalities> {
        self.entries.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Serialize for MunicipalityTable {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for entry in &self.entries {
            map.serialize_entry(&entry.code, &entry.municipalities)?;
        }
        map.end()
    }
}

/// A labelled CEMADEN link.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LinkEntry {
    pub nome: String,
    pub url: String,
    pub descricao: String,
}

/// A named group of links.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LinkCategory {
    #[serde(skip)]
    pub key: String,
    pub titulo: String,
    pub links: Vec<LinkEntry>,
}

/// The fixed link directory, in presentation order.
///
/// Serializes as a JSON object keyed by category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkDirectory {
    categories: Vec<LinkCategory>,
}

impl LinkDirectory {
    #[must_use]
    pub const fn new(categories: Vec<LinkCategory>) -> Self {
        Self { categories }
    }

    /// Finds a category by key, ignoring case and surrounding whitespace.
    #[must_use]
    pub fn category(&self, key: &str) -> Option<&LinkCategory> {
        let key = key.trim().to_lowercase();
        self.categories.iter().find(|category| category.key == key)
    }

    #[must_use]
    pub fn keys(&self) -> Vec<String> {
        self.categories
            .iter()
            .map(|category| category.key.clone())
            .collect()
    }
}

impl Serialize for LinkDirectory {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.categories.len()))?;
        for category in &self.categories {
            map.serialize_entry(&category.key, category)?;
        }
        map.end()
    }
}

/// Kind of hazard an alert refers to.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AlertType {
    pub tipo: String,
    pub descricao: String,
}

/// Alert severity level with its panel colour.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AlertLevel {
    pub nivel: String,
    pub cor: String,
    pub descricao: String,
}

/// Identification of the monitoring agency.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AgencyInfo {
    pub sigla: String,
    pub nome_completo: String,
    pub orgao_vinculado: String,
    pub missao: String,
    pub website: String,
    pub painel_alertas: String,
    pub mapa_interativo: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MonitoringInfo {
    pub total_municipios: u32,
    pub tipos_alerta: Vec<AlertType>,
    pub niveis_alerta: Vec<AlertLevel>,
}

/// Instruments that feed the monitoring network.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ObservationNetwork {
    pub pluviometros_automaticos: String,
    pub pluviometros_comunitarios: String,
    pub radares_meteorologicos: String,
    pub estacoes_hidrologicas: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct UsageHints {
    pub alertas: String,
    pub dados_chuva: String,
    pub download_dados: String,
}

/// Fixed description of the CEMADEN monitoring system.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SystemInfo {
    pub cemaden: AgencyInfo,
    pub monitoramento: MonitoringInfo,
    pub rede_observacional: ObservationNetwork,
    pub como_usar: UsageHints,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_table() -> MunicipalityTable {
        MunicipalityTable::from_entries(vec![
            StateMunicipalities {
                code: "SP".to_string(),
                municipalities: vec!["São Paulo".to_string(), "Campinas".to_string()],
            },
            StateMunicipalities {
                code: "RJ".to_string(),
                municipalities: vec!["Rio de Janeiro".to_string()],
            },
        ])
    }

    #[test]
    fn table_serializes_in_insertion_order() {
        let json = serde_json::to_string(&sample_table()).expect("table should serialize");
        assert_eq!(
            json,
            r#"{"SP":["São Paulo","Campinas"],"RJ":["Rio de Janeiro"]}"#
        );
    }

    #[test]
    fn table_lookup_and_totals() {
        let table = sample_table();
        assert_eq!(table.state_codes(), vec!["SP", "RJ"]);
        assert_eq!(table.total_municipalities(), 3);
        assert_eq!(table.get("RJ"), Some(&["Rio de Janeiro".to_string()][..]));
        assert!(table.get("sp").is_none());
    }

    #[test]
    fn link_directory_matches_category_case_insensitively() {
        let directory = LinkDirectory::new(vec![LinkCategory {
            key: "dados".to_string(),
            titulo: "Dados".to_string(),
            links: Vec::new(),
        }]);
        assert!(directory.category(" DADOS ").is_some());
        assert!(directory.category("alertas").is_none());
    }
}
