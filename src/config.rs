//! Process-wide configuration, read from the environment once at startup.
//!
//! Everything here is immutable after `AppConfig::from_env()` returns; the
//! struct is handed to handlers through `AppState` rather than re-read per
//! request.

use serde::Serialize;
use std::path::PathBuf;

use crate::constants::{DEFAULT_PORT, DEFAULT_UPLOAD_DIR};

/// Static metadata describing the deployed model.
///
/// Returned verbatim by `GET /model/metadata`. A missing license serializes
/// as `null`, never a placeholder.
#[derive(Debug, Clone, Serialize)]
pub struct ModelMetadata {
    pub id: String,
    pub name: String,
    pub description: String,
    #[serde(rename = "type")]
    pub model_type: String,
    pub license: Option<String>,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub metadata: ModelMetadata,
    /// Directory uploaded videos are persisted to before inference.
    pub upload_dir: PathBuf,
    pub port: String,
    /// Command (plus leading args) that runs the external inference backend.
    pub model_command: String,
    pub model_args: Vec<String>,
    /// Concurrent invocations allowed against the inference backend.
    pub predict_concurrency: usize,
}

impl AppConfig {
    /// Build the configuration from environment variables.
    ///
    /// `MODEL_COMMAND` has no sensible default and missing it is a
    /// startup-time failure, so this panics rather than limping along.
    pub fn from_env() -> Self {
        let metadata = ModelMetadata {
            id: std::env::var("MODEL_ID")
                .unwrap_or_else(|_| "video-action-classifier".to_string()),
            name: std::env::var("MODEL_NAME")
                .unwrap_or_else(|_| "Video Action Classifier".to_string()),
            description: std::env::var("MODEL_DESCRIPTION").unwrap_or_else(|_| {
                "3D CNN action classifier for MPEG-4 video clips".to_string()
            }),
            model_type: std::env::var("MODEL_TYPE")
                .unwrap_or_else(|_| "video-classification".to_string()),
            license: std::env::var("MODEL_LICENSE").ok(),
        };

        let command_line =
            std::env::var("MODEL_COMMAND").expect("MODEL_COMMAND must be set");
        let mut parts = command_line.split_whitespace().map(String::from);
        let model_command = parts.next().expect("MODEL_COMMAND must not be empty");
        let model_args: Vec<String> = parts.collect();

        let predict_concurrency: usize = std::env::var("PREDICT_CONCURRENCY")
            .ok()
            .and_then(|v| v.parse().ok())
            .filter(|&n| n > 0)
            .unwrap_or(1);

        AppConfig {
            metadata,
            upload_dir: std::env::var("UPLOAD_DIR")
                .unwrap_or_else(|_| DEFAULT_UPLOAD_DIR.to_string())
                .into(),
            port: std::env::var("PORT").unwrap_or_else(|_| DEFAULT_PORT.to_string()),
            model_command,
            model_args,
            predict_concurrency,
        }
    }
}
