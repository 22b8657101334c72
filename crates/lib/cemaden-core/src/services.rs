use std::path::Path;

use cemaden_store::models::MunicipalityTable;
use tracing::{info, warn};

use crate::dataset::MunicipalityDataset;

/// Municipality dataset loaded once at startup.
///
/// When loading fails the catalog keeps an empty table and remembers why, so
/// lookups can report the dataset as unavailable while the remaining tools
/// keep working.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    table: MunicipalityTable,
    load_error: Option<String>,
}

impl Catalog {
    #[must_use]
    pub const fn new(table: MunicipalityTable) -> Self {
        Self {
            table,
            load_error: None,
        }
    }

    /// Creates an empty catalog flagged as unavailable.
    #[must_use]
    pub fn unavailable(reason: impl Into<String>) -> Self {
        Self {
            table: MunicipalityTable::new(),
            load_error: Some(reason.into()),
        }
    }

    /// Loads the dataset file, degrading to an unavailable catalog on failure.
    pub async fn load_or_empty(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref().to_path_buf();
        match MunicipalityDataset::load_file(&path).await {
            Ok(table) => {
                info!(
                    path = %path.display(),
                    states = table.len(),
                    municipalities = table.total_municipalities(),
                    "municipality dataset loaded"
                );
                Self {
                    table,
                    load_error: None,
                }
            }
            Err(err) => {
                warn!(path = %path.display(), error = %err, "municipality dataset unavailable");
                Self {
                    table: MunicipalityTable::new(),
                    load_error: Some(err.to_string()),
                }
            }
        }
    }

    #[must_use]
    pub const fn table(&self) -> &MunicipalityTable {
        &self.table
    }

    #[must_use]
    pub fn load_error(&self) -> Option<&str> {
        self.load_error.as_deref()
    }

    #[must_use]
    pub const fn is_available(&self) -> bool {
        self.load_error.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn missing_file_leaves_empty_unavailable_catalog() {
        let dir = tempfile::tempdir().expect("temp dir");
        let catalog = Catalog::load_or_empty(dir.path().join("missing.json")).await;
        assert!(!catalog.is_available());
        assert!(catalog.table().is_empty());
        assert!(catalog.load_error().is_some());
    }

    #[tokio::test]
    async fn malformed_file_leaves_empty_unavailable_catalog() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("municipios.json");
        std::fs::write(&path, r#"{"SP": "São Paulo"}"#).expect("write dataset");
        let catalog = Catalog::load_or_empty(&path).await;
        assert!(!catalog.is_available());
        assert!(catalog.load_error().is_some_and(|reason| reason.contains("SP")));
    }
}
