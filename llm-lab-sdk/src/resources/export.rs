//! Export resource client
//!
//! Exports are opaque bytes produced by the backend. They are returned as an
//! [`ExportFile`] and can be written to a directory under the conventional
//! `experiment_{id}.{ext}` name.

use crate::client::HttpClient;
use crate::error::{SdkError, SdkResult};
use llm_lab_core::ExperimentId;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::sync::Arc;
use tracing::info;

/// Export file format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    Csv,
    Json,
}

impl ExportFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Json => "json",
        }
    }

    /// Local file name for an experiment's export.
    pub fn filename(&self, experiment_id: ExperimentId) -> String {
        format!("experiment_{}.{}", experiment_id, self.extension())
    }

    fn path(&self, experiment_id: ExperimentId) -> String {
        format!("/export/experiment/{}/{}", experiment_id, self.extension())
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

impl FromStr for ExportFormat {
    type Err = SdkError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "csv" => Ok(ExportFormat::Csv),
            "json" => Ok(ExportFormat::Json),
            other => Err(SdkError::Validation(format!(
                "Unsupported export format: {}",
                other
            ))),
        }
    }
}

/// Downloaded export payload
#[derive(Debug, Clone, PartialEq)]
pub struct ExportFile {
    pub filename: String,
    pub bytes: Vec<u8>,
}

impl ExportFile {
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Write the file into `dir`, creating the directory if needed. Returns the full path.
    pub async fn save_to(&self, dir: impl AsRef<Path>) -> SdkResult<PathBuf> {
        let dir = dir.as_ref();
        tokio::fs::create_dir_all(dir).await?;
        let path = dir.join(&self.filename);
        tokio::fs::write(&path, &self.bytes).await?;
        info!(path = %path.display(), bytes = self.bytes.len(), "Saved export");
        Ok(path)
    }
}

/// Client for experiment exports
#[derive(Debug, Clone)]
pub struct ExportClient {
    client: Arc<HttpClient>,
}

impl ExportClient {
    /// Create a new export client
    pub fn new(client: Arc<HttpClient>) -> Self {
        Self { client }
    }

    /// Fetch an export in the given format
    pub async fn export(&self, experiment_id: ExperimentId, format: ExportFormat) -> SdkResult<ExportFile> {
        let bytes = self.client.get_bytes(&format.path(experiment_id)).await?;
        Ok(ExportFile {
            filename: format.filename(experiment_id),
            bytes,
        })
    }

    pub async fn export_csv(&self, experiment_id: ExperimentId) -> SdkResult<ExportFile> {
        self.export(experiment_id, ExportFormat::Csv).await
    }

    pub async fn export_json(&self, experiment_id: ExperimentId) -> SdkResult<ExportFile> {
        self.export(experiment_id, ExportFormat::Json).await
    }

    /// Fetch an export and save it into `dir`
    pub async fn download(
        &self,
        experiment_id: ExperimentId,
        format: ExportFormat,
        dir: impl AsRef<Path>,
    ) -> SdkResult<PathBuf> {
        self.export(experiment_id, format).await?.save_to(dir).await
    }

    pub async fn download_csv(&self, experiment_id: ExperimentId, dir: impl AsRef<Path>) -> SdkResult<PathBuf> {
        self.download(experiment_id, ExportFormat::Csv, dir).await
    }

    pub async fn download_json(&self, experiment_id: ExperimentId, dir: impl AsRef<Path>) -> SdkResult<PathBuf> {
        self.download(experiment_id, ExportFormat::Json, dir).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filenames() {
        let id = ExperimentId::new(42);
        assert_eq!(ExportFormat::Csv.filename(id), "experiment_42.csv");
        assert_eq!(ExportFormat::Json.filename(id), "experiment_42.json");
        assert_eq!(ExportFormat::Csv.path(id), "/export/experiment/42/csv");
    }

    #[test]
    fn test_format_parsing() {
        assert_eq!("CSV".parse::<ExportFormat>().unwrap(), ExportFormat::Csv);
        assert_eq!(" json ".parse::<ExportFormat>().unwrap(), ExportFormat::Json);
        assert!("xml".parse::<ExportFormat>().is_err());
    }

    #[tokio::test]
    async fn test_save_creates_directory() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("nested");
        let file = ExportFile {
            filename: "experiment_1.csv".to_string(),
            bytes: b"id,text\n1,hello\n".to_vec(),
        };

        let path = file.save_to(&target).await.unwrap();

        assert_eq!(path, target.join("experiment_1.csv"));
        assert_eq!(std::fs::read(&path).unwrap(), file.bytes);
    }
}
