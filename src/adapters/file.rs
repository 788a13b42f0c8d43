use crate::domain::ports::{DataSource, Resource};
use crate::utils::error::{ElexError, Result};
use async_trait::async_trait;
use std::fs;
use std::path::{Path, PathBuf};

/// Serves saved payloads from local JSON files.
#[derive(Debug, Clone, Default)]
pub struct FileSource {
    data_file: Option<PathBuf>,
    delegate_sum_file: Option<PathBuf>,
    delegate_super_file: Option<PathBuf>,
}

impl FileSource {
    /// Election feeds and the calendar both come from `data_file`.
    pub fn new(data_file: impl Into<PathBuf>) -> Self {
        Self {
            data_file: Some(data_file.into()),
            ..Self::default()
        }
    }

    pub fn with_data_file(mut self, path: Option<PathBuf>) -> Self {
        self.data_file = path;
        self
    }

    pub fn with_delegate_files(mut self, sum: Option<PathBuf>, super_report: Option<PathBuf>) -> Self {
        self.delegate_sum_file = sum;
        self.delegate_super_file = super_report;
        self
    }

    pub fn is_empty(&self) -> bool {
        self.data_file.is_none()
            && self.delegate_sum_file.is_none()
            && self.delegate_super_file.is_none()
    }

    fn path_for(&self, resource: &Resource) -> Option<&Path> {
        match resource {
            Resource::Election { .. } | Resource::Calendar => self.data_file.as_deref(),
            Resource::DelegateSum => self.delegate_sum_file.as_deref(),
            Resource::DelegateSuper => self.delegate_super_file.as_deref(),
        }
    }
}

#[async_trait]
impl DataSource for FileSource {
    async fn load(&self, resource: &Resource) -> Result<serde_json::Value> {
        let path = self.path_for(resource).ok_or_else(|| {
            ElexError::data_access(resource.to_string(), "no data file given for it")
        })?;
        let location = path.display().to_string();

        tracing::debug!("Reading {} from {}", resource, location);
        let data = fs::read(path).map_err(|e| ElexError::data_access(&location, e))?;

        serde_json::from_slice(&data)
            .map_err(|e| ElexError::data_access(&location, format!("not valid JSON: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[tokio::test]
    async fn test_reads_json_document() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(br#"{"elections": []}"#).unwrap();

        let source = FileSource::new(file.path());
        let value = source.load(&Resource::Calendar).await.unwrap();

        assert_eq!(value, serde_json::json!({"elections": []}));
    }

    #[tokio::test]
    async fn test_missing_file_is_data_access_error() {
        let source = FileSource::new("tests/data/does-not-exist.json");

        let err = source.load(&Resource::Calendar).await.unwrap_err();
        match err {
            ElexError::DataAccess { location, .. } => {
                assert_eq!(location, "tests/data/does-not-exist.json")
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_corrupt_file_is_data_access_error() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(b"{\"races\": [").unwrap();

        let source = FileSource::new(file.path());
        let err = source
            .load(&Resource::Election {
                date: "2015-11-03".to_string(),
            })
            .await
            .unwrap_err();

        assert!(matches!(err, ElexError::DataAccess { .. }));
    }

    #[tokio::test]
    async fn test_unconfigured_resource() {
        let source = FileSource::new("tests/data/00000000_elections.json");

        let err = source.load(&Resource::DelegateSum).await.unwrap_err();
        assert!(err.to_string().contains("delegate summary report"));
        assert!(!source.is_empty());
        assert!(FileSource::default().is_empty());
    }
}
