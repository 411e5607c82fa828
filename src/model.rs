//! Inference collaborator seam.
//!
//! The actual model lives outside this process. `ModelWrapper` shells out to
//! the configured backend command and parses its stdout; everything behind
//! the `Model` trait is substitutable, so tests run against a stub instead.

use std::fmt;
use std::path::Path;
use tokio::process::Command;
use tokio::sync::Semaphore;

use crate::config::AppConfig;

/// One classification result from the collaborator, in collaborator order.
#[derive(Debug, Clone, PartialEq)]
pub struct Prediction {
    pub label_id: Option<String>,
    pub label: String,
    pub probability: f64,
}

#[derive(Debug)]
pub enum ModelError {
    /// Failed to spawn or talk to the backend process.
    Io(std::io::Error),
    /// The backend ran but produced an error or unparseable output.
    Backend(String),
}

impl fmt::Display for ModelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ModelError::Io(e) => write!(f, "model backend io error: {}", e),
            ModelError::Backend(msg) => write!(f, "model backend error: {}", msg),
        }
    }
}

impl std::error::Error for ModelError {}

impl From<std::io::Error> for ModelError {
    fn from(e: std::io::Error) -> Self {
        ModelError::Io(e)
    }
}

/// The single seam to the out-of-process model implementation.
pub trait Model: Send + Sync + 'static {
    fn predict(
        &self,
        path: &Path,
    ) -> impl Future<Output = Result<Vec<Prediction>, ModelError>> + Send;
}

/// Production collaborator: runs `MODEL_COMMAND <filepath>` and reads a JSON
/// array of `[label_id, label, probability]` triples from stdout.
pub struct ModelWrapper {
    command: String,
    args: Vec<String>,
    /// Gates concurrent backend invocations; the backend is not assumed to
    /// be safe for parallel calls, so this defaults to one permit.
    permits: Semaphore,
}

impl ModelWrapper {
    pub fn new(config: &AppConfig) -> Self {
        ModelWrapper {
            command: config.model_command.clone(),
            args: config.model_args.clone(),
            permits: Semaphore::new(config.predict_concurrency),
        }
    }
}

impl Model for ModelWrapper {
    async fn predict(&self, path: &Path) -> Result<Vec<Prediction>, ModelError> {
        // Semaphore is never closed, acquire cannot fail.
        let _permit = self.permits.acquire().await.map_err(|e| {
            ModelError::Backend(format!("inference gate closed: {}", e))
        })?;

        let output = Command::new(&self.command)
            .args(&self.args)
            .arg(path)
            .output()
            .await?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(ModelError::Backend(format!(
                "backend exited with {}: {}",
                output.status,
                stderr.trim()
            )));
        }

        parse_predictions(&output.stdout)
    }
}

/// Parse backend stdout: a JSON array of `[label_id, label, probability]`
/// triples, order preserved.
fn parse_predictions(stdout: &[u8]) -> Result<Vec<Prediction>, ModelError> {
    let triples: Vec<(Option<String>, String, f64)> = serde_json::from_slice(stdout)
        .map_err(|e| ModelError::Backend(format!("unparseable backend output: {}", e)))?;

    Ok(triples
        .into_iter()
        .map(|(label_id, label, probability)| Prediction {
            label_id,
            label,
            probability,
        })
        .collect())
}
