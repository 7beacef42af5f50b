// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! POST /predict and POST /v1/predict handlers

use axum::{
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
    Json,
};
use axum_extra::extract::multipart::{Multipart, MultipartRejection};
use std::sync::Arc;
use std::time::Instant;
use thiserror::Error;
use tracing::{error, info, warn};

use super::request::{read_upload, Rejection, UploadField};
use super::response::PredictResponse;
use crate::api::errors::ApiError;
use crate::api::http_server::AppState;
use crate::api::pages::{render_error, render_result};
use crate::classifier::{classify_image_file, ClassificationResult, PipelineError};
use crate::upload::{StoredUpload, UploadError};

/// A stored and classified upload
#[derive(Debug, Clone)]
pub struct Prediction {
    pub stored: StoredUpload,
    pub result: ClassificationResult,
}

/// Everything that can stop a prediction request
#[derive(Debug, Error)]
pub enum PredictError {
    #[error("Upload rejected: {0:?}")]
    Rejected(Rejection),

    #[error("{0}")]
    BadRequest(ApiError),

    #[error(transparent)]
    Storage(UploadError),

    #[error(transparent)]
    Pipeline(#[from] PipelineError),

    #[error("Classification task failed: {0}")]
    Task(String),
}

impl PredictError {
    /// Message safe to show a client; full details only go to the log
    fn public_message(&self) -> &'static str {
        match self {
            PredictError::Rejected(_) => "The upload was rejected.",
            PredictError::BadRequest(_) => "The upload could not be read.",
            PredictError::Storage(_) => "The upload could not be stored.",
            PredictError::Pipeline(PipelineError::Image(_)) => {
                "The uploaded file could not be decoded as an image."
            }
            PredictError::Pipeline(_) | PredictError::Task(_) => {
                "The image could not be classified."
            }
        }
    }

    fn to_api_error(&self) -> ApiError {
        match self {
            PredictError::Rejected(rejection) => rejection.to_api_error(),
            PredictError::BadRequest(_) => {
                ApiError::InvalidRequest(self.public_message().to_string())
            }
            _ => ApiError::InternalError(self.public_message().to_string()),
        }
    }
}

/// Read, admit, store and classify one upload
///
/// Rejected uploads never reach the classifier and are never written.
pub async fn process_upload(
    state: &AppState,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Prediction, PredictError> {
    let upload = match read_upload(multipart)
        .await
        .map_err(PredictError::BadRequest)?
    {
        UploadField::Accepted(upload) => upload,
        UploadField::Rejected(rejection) => return Err(PredictError::Rejected(rejection)),
    };

    let stored = match state.upload_store.save(&upload.filename, &upload.bytes).await {
        Ok(stored) => stored,
        Err(UploadError::InvalidFilename(name)) => {
            warn!("Filename '{}' sanitized to nothing", name);
            return Err(PredictError::Rejected(Rejection::DisallowedFile));
        }
        Err(e) => return Err(PredictError::Storage(e)),
    };

    let classifier = state.classifier.clone();
    let path = stored.path.clone();
    let result = tokio::task::spawn_blocking(move || classify_image_file(classifier.as_ref(), &path))
        .await
        .map_err(|e| PredictError::Task(e.to_string()))??;

    Ok(Prediction { stored, result })
}

/// POST /predict - form flow
///
/// Validation failures redirect silently. Decode and model failures render
/// an error page.
pub async fn predict_page_handler(
    State(state): State<Arc<AppState>>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Response {
    match process_upload(&state, multipart).await {
        Ok(prediction) => {
            Html(render_result(&prediction.result, &prediction.stored.filename)).into_response()
        }
        Err(PredictError::Rejected(rejection)) => {
            warn!("Upload rejected ({:?}), redirecting", rejection);
            Redirect::to(rejection.redirect_target()).into_response()
        }
        Err(e) => {
            let api_error = e.to_api_error();
            error!("Prediction failed: {}", e);
            (
                api_error.status(),
                Html(render_error(api_error.status_code(), e.public_message())),
            )
                .into_response()
        }
    }
}

/// POST /v1/predict - JSON flow
pub async fn predict_json_handler(
    State(state): State<Arc<AppState>>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<PredictResponse>, (StatusCode, Json<crate::api::errors::ErrorResponse>)> {
    let request_id = uuid::Uuid::new_v4().to_string();
    let started = Instant::now();

    match process_upload(&state, multipart).await {
        Ok(prediction) => {
            let elapsed = started.elapsed().as_millis() as u64;
            info!(
                "[{}] {} -> {} ({}%)",
                request_id,
                prediction.stored.filename,
                prediction.result.label,
                prediction.result.confidence_display()
            );
            Ok(Json(PredictResponse::new(
                request_id,
                prediction.stored.filename,
                prediction.result,
                elapsed,
                state.classifier.name(),
            )))
        }
        Err(e) => {
            let api_error = e.to_api_error();
            if api_error.status_code() >= 500 {
                error!("[{}] Prediction failed: {}", request_id, e);
            } else {
                warn!("[{}] Prediction rejected: {}", request_id, e);
            }
            Err((api_error.status(), Json(api_error.to_response(Some(request_id)))))
        }
    }
}
