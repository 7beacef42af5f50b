// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
pub mod errors;
pub mod http_server;
pub mod pages;
pub mod predict;

pub use errors::{ApiError, ErrorResponse};
pub use http_server::{create_app, start_server, AppState};
pub use pages::{render_error, render_index, render_result, upload_url, UPLOADS_URL_PREFIX};
pub use predict::{
    predict_json_handler, predict_page_handler, process_upload, PredictError, PredictResponse,
    Prediction, Rejection,
};
