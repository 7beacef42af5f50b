// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Shared helpers: stub classifier, multipart bodies, app construction
#![allow(dead_code)]

use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, Response},
    Router,
};
use image::{DynamicImage, ImageFormat};
use ndarray::Array4;
use retina_screen_node::{
    api::http_server::{create_app, AppState},
    classifier::Classifier,
    upload::UploadStore,
};
use std::io::Cursor;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tempfile::TempDir;

pub const BOUNDARY: &str = "retina-test-boundary";

/// Moderate at 70%
pub const MODERATE: [f32; 5] = [0.1, 0.05, 0.7, 0.1, 0.05];

/// Classifier returning fixed probabilities and counting calls
pub struct StubClassifier {
    probabilities: Vec<f32>,
    fail: bool,
    calls: AtomicUsize,
}

impl StubClassifier {
    pub fn returning(probabilities: &[f32]) -> Self {
        Self {
            probabilities: probabilities.to_vec(),
            fail: false,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn failing() -> Self {
        Self {
            probabilities: Vec::new(),
            fail: true,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl Classifier for StubClassifier {
    fn classify(&self, input: &Array4<f32>) -> anyhow::Result<Vec<f32>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        assert_eq!(input.shape(), &[1, 224, 224, 3]);
        if self.fail {
            anyhow::bail!("stub classifier failure");
        }
        Ok(self.probabilities.clone())
    }

    fn name(&self) -> &str {
        "stub-cnn"
    }
}

/// App wired to a stub classifier and a temporary upload directory
pub struct TestApp {
    pub app: Router,
    pub classifier: Arc<StubClassifier>,
    pub upload_dir: TempDir,
}

impl TestApp {
    pub fn new(classifier: StubClassifier) -> Self {
        Self::with_limit(classifier, 10 * 1024 * 1024)
    }

    /// App with a custom request body limit
    pub fn with_limit(classifier: StubClassifier, max_upload_bytes: usize) -> Self {
        let upload_dir = TempDir::new().unwrap();
        let classifier = Arc::new(classifier);
        let state = AppState::new(
            classifier.clone() as Arc<dyn Classifier>,
            UploadStore::new(upload_dir.path()),
            max_upload_bytes,
        );

        Self {
            app: create_app(Arc::new(state)),
            classifier,
            upload_dir,
        }
    }

    pub fn moderate() -> Self {
        Self::new(StubClassifier::returning(&MODERATE))
    }

    pub async fn send(&self, request: Request<Body>) -> Response<Body> {
        use tower::util::ServiceExt;
        self.app.clone().oneshot(request).await.unwrap()
    }

    pub async fn get(&self, uri: &str) -> Response<Body> {
        self.send(
            Request::builder()
                .method(Method::GET)
                .uri(uri)
                .body(Body::empty())
                .unwrap(),
        )
        .await
    }

    pub async fn post_multipart(&self, uri: &str, body: Vec<u8>) -> Response<Body> {
        self.send(
            Request::builder()
                .method(Method::POST)
                .uri(uri)
                .header(
                    header::CONTENT_TYPE,
                    format!("multipart/form-data; boundary={}", BOUNDARY),
                )
                .body(Body::from(body))
                .unwrap(),
        )
        .await
    }
}

/// Multipart body with a single field
pub fn multipart_body(field: &str, filename: &str, bytes: &[u8]) -> Vec<u8> {
    let mut body = Vec::new();
    body.extend_from_slice(format!("--{}\r\n", BOUNDARY).as_bytes());
    body.extend_from_slice(
        format!(
            "Content-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\n",
            field, filename
        )
        .as_bytes(),
    );
    body.extend_from_slice(b"Content-Type: application/octet-stream\r\n\r\n");
    body.extend_from_slice(bytes);
    body.extend_from_slice(format!("\r\n--{}--\r\n", BOUNDARY).as_bytes());
    body
}

/// Multipart body with a plain text field and no file
pub fn multipart_text_only(field: &str, value: &str) -> Vec<u8> {
    format!(
        "--{b}\r\nContent-Disposition: form-data; name=\"{f}\"\r\n\r\n{v}\r\n--{b}--\r\n",
        b = BOUNDARY,
        f = field,
        v = value
    )
    .into_bytes()
}

pub fn png_bytes(width: u32, height: u32) -> Vec<u8> {
    let mut out = Cursor::new(Vec::new());
    DynamicImage::new_rgb8(width, height)
        .write_to(&mut out, ImageFormat::Png)
        .unwrap();
    out.into_inner()
}

/// PNG of pseudo-random pixels; barely compresses, so the file is about
/// `width * height * 3` bytes
pub fn noise_png_bytes(width: u32, height: u32) -> Vec<u8> {
    let mut state: u32 = 0x9E37_79B9;
    let img = image::RgbImage::from_fn(width, height, |_, _| {
        state ^= state << 13;
        state ^= state >> 17;
        state ^= state << 5;
        let [r, g, b, _] = state.to_le_bytes();
        image::Rgb([r, g, b])
    });

    let mut out = Cursor::new(Vec::new());
    DynamicImage::ImageRgb8(img)
        .write_to(&mut out, ImageFormat::Png)
        .unwrap();
    out.into_inner()
}

/// Text as it appears in a rendered page
pub fn escaped(text: &str) -> String {
    ammonia::clean_text(text)
}

pub fn jpeg_bytes(width: u32, height: u32) -> Vec<u8> {
    let mut out = Cursor::new(Vec::new());
    DynamicImage::new_rgb8(width, height)
        .write_to(&mut out, ImageFormat::Jpeg)
        .unwrap();
    out.into_inner()
}

pub async fn body_string(response: Response<Body>) -> String {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

pub fn location(response: &Response<Body>) -> &str {
    response
        .headers()
        .get(header::LOCATION)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
}
