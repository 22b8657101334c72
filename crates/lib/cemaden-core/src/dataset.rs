use std::{
    error::Error,
    fmt,
    path::{Path, PathBuf},
};

use cemaden_store::models::{MunicipalityTable, StateMunicipalities};
use cemaden_store::schema::normalize_state_code;
use serde_json::Value;

/// Error type for dataset load failures.
#[derive(Debug)]
pub enum DatasetError {
    Io { path: PathBuf, source: std::io::Error },
    Malformed(String),
    Task(String),
}

impl fmt::Display for DatasetError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io { path, source } => {
                write!(f, "failed to read dataset {}: {source}", path.display())
            }
            Self::Malformed(message) => write!(f, "malformed dataset: {message}"),
            Self::Task(message) => write!(f, "dataset load task failed: {message}"),
        }
    }
}

impl Error for DatasetError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Malformed(_) | Self::Task(_) => None,
        }
    }
}

impl From<serde_json::Error> for DatasetError {
    fn from(err: serde_json::Error) -> Self {
        Self::Malformed(err.to_string())
    }
}

impl From<tokio::task::JoinError> for DatasetError {
    fn from(err: tokio::task::JoinError) -> Self {
        Self::Task(err.to_string())
    }
}

/// Reader for the state to municipalities JSON file.
///
/// The file is a single object whose keys are state codes and whose values
/// are arrays of municipality names, e.g. `{"SP": ["São Paulo", "Campinas"]}`.
pub struct MunicipalityDataset;

impl MunicipalityDataset {
    /// Parses dataset JSON, keeping the key order of the document.
    ///
    /// # Errors
    /// Returns `DatasetError::Malformed` if the document is not an object of
    /// non-empty string arrays, a key is not a two-letter code, two keys
    /// collide once normalized, or a municipality name is blank.
    pub fn parse(json: &str) -> Result<MunicipalityTable, DatasetError> {
        let value: Value = serde_json::from_str(json)?;
        let Value::Object(states) = value else {
            return Err(DatasetError::Malformed(
                "expected an object of state code to municipality list".to_string(),
            ));
        };

        let mut entries: Vec<StateMunicipalities> = Vec::with_capacity(states.len());
        for (raw_code, municipalities) in states {
            let Some(code) = normalize_state_code(&raw_code) else {
                return Err(DatasetError::Malformed("blank state code".to_string()));
            };
            if code.len() != 2 || !code.chars().all(|c| c.is_ascii_uppercase()) {
                return Err(DatasetError::Malformed(format!(
                    "state code must be two letters: {raw_code}"
                )));
            }
            if entries.iter().any(|entry| entry.code == code) {
                return Err(DatasetError::Malformed(format!(
                    "duplicate state code: {code}"
                )));
            }
            let municipalities = parse_municipalities(&code, municipalities)?;
            entries.push(StateMunicipalities {
                code,
                municipalities,
            });
        }

        Ok(MunicipalityTable::from_entries(entries))
    }

    /// Reads and parses a dataset file on a blocking task.
    ///
    /// # Errors
    /// Returns `DatasetError` if the file cannot be read or is malformed.
    pub async fn load_file(path: impl AsRef<Path>) -> Result<MunicipalityTable, DatasetError> {
        let path = path.as_ref().to_path_buf();
        tokio::task::spawn_blocking(move || {
            let json = std::fs::read_to_string(&path)
                .map_err(|source| DatasetError::Io { path, source })?;
            Self::parse(&json)
        })
        .await?
    }
}

fn parse_municipalities(code: &str, value: Value) -> Result<Vec<String>, DatasetError> {
    let Value::Array(items) = value else {
        return Err(DatasetError::Malformed(format!(
            "municipalities for {code} must be a list"
        )));
    };
    if items.is_empty() {
        return Err(DatasetError::Malformed(format!(
            "municipalities for {code} must not be empty"
        )));
    }
    items
        .into_iter()
        .map(|item| match item {
            Value::String(name) if name.trim().is_empty() => Err(DatasetError::Malformed(
                format!("blank municipality name for {code}"),
            )),
            Value::String(name) => Ok(name),
            other => Err(DatasetError::Malformed(format!(
                "municipality for {code} must be a string, got {other}"
            ))),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_keeps_file_order() {
        let table = MunicipalityDataset::parse(
            r#"{"SP": ["São Paulo", "Campinas"], "RJ": ["Rio de Janeiro"], "AM": ["Manaus"]}"#,
        )
        .expect("dataset should parse");
        assert_eq!(table.state_codes(), vec!["SP", "RJ", "AM"]);
        assert_eq!(
            table.get("SP"),
            Some(&["São Paulo".to_string(), "Campinas".to_string()][..])
        );
    }

    #[test]
    fn parse_normalizes_state_codes() {
        let table = MunicipalityDataset::parse(r#"{" sc ": ["Blumenau"]}"#)
            .expect("dataset should parse");
        assert_eq!(table.state_codes(), vec!["SC"]);
    }

    #[test]
    fn parse_rejects_non_object_documents() {
        let err = MunicipalityDataset::parse(r#"["SP"]"#).unwrap_err();
        assert!(matches!(err, DatasetError::Malformed(_)));
    }

    #[test]
    fn parse_rejects_non_string_municipalities() {
        let err = MunicipalityDataset::parse(r#"{"SP": ["São Paulo", 3]}"#).unwrap_err();
        assert!(err.to_string().contains("SP"));
    }

    #[test]
    fn parse_rejects_codes_colliding_after_normalization() {
        let err = MunicipalityDataset::parse(r#"{"SP": ["Santos"], "sp": ["Sorocaba"]}"#)
            .unwrap_err();
        assert!(err.to_string().contains("duplicate state code: SP"));
    }

    #[test]
    fn parse_rejects_codes_that_are_not_two_letters() {
        for json in [r#"{"SPX": ["Santos"]}"#, r#"{"S": ["Santos"]}"#, r#"{"S1": ["Santos"]}"#] {
            let err = MunicipalityDataset::parse(json).unwrap_err();
            assert!(
                err.to_string().contains("two letters"),
                "{json} should be rejected, got {err}"
            );
        }
    }

    #[test]
    fn parse_rejects_empty_municipality_lists() {
        let err = MunicipalityDataset::parse(r#"{"SP": []}"#).unwrap_err();
        assert!(err.to_string().contains("must not be empty"));
    }

    #[test]
    fn parse_rejects_blank_municipality_names() {
        let err = MunicipalityDataset::parse(r#"{"SP": ["Santos", " "]}"#).unwrap_err();
        assert!(err.to_string().contains("blank municipality name for SP"));
    }

    #[test]
    fn parse_rejects_invalid_json() {
        let err = MunicipalityDataset::parse("{not json").unwrap_err();
        assert!(matches!(err, DatasetError::Malformed(_)));
    }

    #[tokio::test]
    async fn load_file_reports_missing_path() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("absent.json");
        let err = MunicipalityDataset::load_file(&path).await.unwrap_err();
        assert!(matches!(err, DatasetError::Io { .. }));
    }

    #[tokio::test]
    async fn load_file_reads_dataset_from_disk() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("municipios.json");
        std::fs::write(&path, r#"{"ES": ["Vitória", "Serra"]}"#).expect("write dataset");
        let table = MunicipalityDataset::load_file(&path)
            .await
            .expect("dataset should load");
        assert_eq!(table.total_municipalities(), 2);
    }
}
