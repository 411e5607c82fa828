//! Model metadata and inference endpoints (/model/*)

use axum::{
    Json, Router,
    extract::{Multipart, State},
    http::StatusCode,
    routing::{get, post},
};
use bytes::Bytes;
use serde::Serialize;
use std::sync::Arc;

use crate::AppState;
use crate::config::ModelMetadata;
use crate::model::Model;
use crate::services::error::{ApiError, LogErr, bad_request};
use crate::storage;

pub fn routes<M: Model>() -> Router<Arc<AppState<M>>> {
    Router::new()
        .route("/model/metadata", get(metadata::<M>))
        .route("/model/predict", post(predict::<M>))
}

#[derive(Serialize)]
struct LabelPrediction {
    label_id: Option<String>,
    label: String,
    probability: f64,
}

#[derive(Serialize)]
struct PredictResponse {
    status: &'static str,
    predictions: Vec<LabelPrediction>,
}

impl PredictResponse {
    /// Well-formed failure response: the request reached the handler but the
    /// write or the inference call failed.
    fn error() -> Self {
        PredictResponse {
            status: "error",
            predictions: Vec::new(),
        }
    }
}

/// GET /model/metadata - Return the metadata associated with the model
async fn metadata<M: Model>(State(state): State<Arc<AppState<M>>>) -> Json<ModelMetadata> {
    Json(state.config.metadata.clone())
}

/// POST /model/predict - Persist the uploaded video, run inference on it and
/// return the labeled predictions in backend order.
async fn predict<M: Model>(
    State(state): State<Arc<AppState<M>>>,
    mut multipart: Multipart,
) -> Result<Json<PredictResponse>, ApiError> {
    let mut video: Option<(String, Bytes)> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .log_err("Malformed multipart body", StatusCode::BAD_REQUEST)?
    {
        if field.name() != Some("video") {
            continue;
        }

        let filename = field
            .file_name()
            .map(str::to_string)
            .ok_or_else(|| bad_request("The 'video' field must be a file upload"))?;
        let data = field
            .bytes()
            .await
            .log_err("Failed to read 'video' field", StatusCode::BAD_REQUEST)?;
        video = Some((filename, data));
    }

    let (filename, data) =
        video.ok_or_else(|| bad_request("Missing required file field 'video'"))?;

    if !storage::is_safe_filename(&filename) {
        return Err(bad_request("Invalid upload filename"));
    }

    let filepath = match storage::save_upload(&state.config.upload_dir, &filename, &data).await
    {
        Ok(path) => path,
        Err(e) => {
            eprintln!("[predict] Failed to persist upload '{}': {}", filename, e);
            return Ok(Json(PredictResponse::error()));
        }
    };

    let preds = match state.model.predict(&filepath).await {
        Ok(preds) => preds,
        Err(e) => {
            eprintln!("[predict] Inference failed for {:?}: {}", filepath, e);
            return Ok(Json(PredictResponse::error()));
        }
    };

    let predictions = preds
        .into_iter()
        .map(|p| LabelPrediction {
            label_id: p.label_id,
            label: p.label,
            probability: p.probability,
        })
        .collect();

    Ok(Json(PredictResponse {
        status: "ok",
        predictions,
    }))
}
