// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Upload -> classify -> render endpoints
//!
//! `POST /predict` serves the HTML form flow, `POST /v1/predict` returns JSON.
//! Both share `process_upload`.

pub mod handler;
pub mod request;
pub mod response;

pub use handler::{
    predict_json_handler, predict_page_handler, process_upload, PredictError, Prediction,
};
pub use request::{read_upload, Rejection, UploadField, FILE_FIELD};
pub use response::PredictResponse;
