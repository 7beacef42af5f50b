// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1

//! POST /predict form flow
//!
//! Covers the result page, the silent redirects for rejected uploads, and
//! the error page for images that cannot be classified.

use super::support::*;
use axum::http::StatusCode;

#[tokio::test]
async fn test_valid_png_renders_result() {
    let test = TestApp::moderate();

    let response = test
        .post_multipart("/predict", multipart_body("file", "eye.png", &png_bytes(64, 48)))
        .await;

    assert_eq!(response.status(), StatusCode::OK);
    let html = body_string(response).await;
    assert!(html.contains("Moderate"));
    assert!(html.contains("70.0%"));
    assert!(html.contains(&escaped("/static/uploads/eye.png")));
    assert!(html.contains(&escaped("Moderate diabetic retinopathy detected. Medical evaluation is advised.")));

    assert_eq!(test.classifier.calls(), 1);
    assert!(test.upload_dir.path().join("eye.png").is_file());
}

#[tokio::test]
async fn test_valid_jpeg_uppercase_extension() {
    let test = TestApp::new(StubClassifier::returning(&[0.9, 0.02, 0.02, 0.02, 0.04]));

    let response = test
        .post_multipart("/predict", multipart_body("file", "Fundus.JPEG", &jpeg_bytes(32, 32)))
        .await;

    assert_eq!(response.status(), StatusCode::OK);
    let html = body_string(response).await;
    assert!(html.contains(&escaped("No DR")));
    assert!(html.contains("90.0%"));
    assert!(html.contains(&escaped("Continue regular check-ups.")));
}

#[tokio::test]
async fn test_missing_file_field_redirects_to_predict() {
    let test = TestApp::moderate();

    let response = test
        .post_multipart("/predict", multipart_text_only("comment", "no image here"))
        .await;

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/predict");
    assert_eq!(test.classifier.calls(), 0);
}

#[tokio::test]
async fn test_wrong_field_name_redirects_to_predict() {
    let test = TestApp::moderate();

    let response = test
        .post_multipart("/predict", multipart_body("image", "eye.png", &png_bytes(8, 8)))
        .await;

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/predict");
    assert_eq!(test.classifier.calls(), 0);
}

#[tokio::test]
async fn test_non_multipart_body_redirects_to_predict() {
    use axum::body::Body;
    use axum::http::{header, Method, Request};

    let test = TestApp::moderate();
    let response = test
        .send(
            Request::builder()
                .method(Method::POST)
                .uri("/predict")
                .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
                .body(Body::from("file=eye.png"))
                .unwrap(),
        )
        .await;

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/predict");
    assert_eq!(test.classifier.calls(), 0);
}

#[tokio::test]
async fn test_empty_filename_redirects_to_predict() {
    let test = TestApp::moderate();

    let response = test
        .post_multipart("/predict", multipart_body("file", "", &png_bytes(8, 8)))
        .await;

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/predict");
    assert_eq!(test.classifier.calls(), 0);
}

#[tokio::test]
async fn test_disallowed_extension_redirects_to_index() {
    let test = TestApp::moderate();

    for name in ["eye.gif", "eye.png.exe", "noextension", "eye.tiff"] {
        let response = test
            .post_multipart("/predict", multipart_body("file", name, &png_bytes(8, 8)))
            .await;

        assert_eq!(response.status(), StatusCode::SEE_OTHER, "{}", name);
        assert_eq!(location(&response), "/", "{}", name);
    }

    assert_eq!(test.classifier.calls(), 0);
    assert_eq!(std::fs::read_dir(test.upload_dir.path()).unwrap().count(), 0);
}

#[tokio::test]
async fn test_filename_sanitized_before_store() {
    let test = TestApp::moderate();

    let response = test
        .post_multipart("/predict", multipart_body("file", "my scan (1).png", &png_bytes(8, 8)))
        .await;

    assert_eq!(response.status(), StatusCode::OK);
    let html = body_string(response).await;
    assert!(html.contains(&escaped("/static/uploads/my_scan_1.png")));
    assert!(test.upload_dir.path().join("my_scan_1.png").is_file());
}

#[tokio::test]
async fn test_traversal_filename_stored_inside_upload_dir() {
    let test = TestApp::moderate();

    let response = test
        .post_multipart(
            "/predict",
            multipart_body("file", "../../escape.png", &png_bytes(8, 8)),
        )
        .await;

    assert_eq!(response.status(), StatusCode::OK);
    let html = body_string(response).await;
    assert!(html.contains(&escaped("/static/uploads/escape.png")));
    assert!(test.upload_dir.path().join("escape.png").is_file());
}

#[tokio::test]
async fn test_undecodable_image_is_server_error() {
    let test = TestApp::moderate();

    let response = test
        .post_multipart(
            "/predict",
            multipart_body("file", "fake.png", b"this is not an image"),
        )
        .await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let html = body_string(response).await;
    assert!(html.contains("Error 500"));
    assert!(html.contains(&escaped("The uploaded file could not be decoded as an image.")));
    assert!(!html.contains(&escaped(&test.upload_dir.path().display().to_string())));
    assert_eq!(test.classifier.calls(), 0);
}

#[tokio::test]
async fn test_classifier_failure_is_server_error() {
    let test = TestApp::new(StubClassifier::failing());

    let response = test
        .post_multipart("/predict", multipart_body("file", "eye.png", &png_bytes(8, 8)))
        .await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(test.classifier.calls(), 1);
}

#[tokio::test]
async fn test_out_of_range_index_uses_fallback_message() {
    let test = TestApp::new(StubClassifier::returning(&[0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.9]));

    let response = test
        .post_multipart("/predict", multipart_body("file", "eye.png", &png_bytes(8, 8)))
        .await;

    assert_eq!(response.status(), StatusCode::OK);
    let html = body_string(response).await;
    assert!(html.contains(&escaped("Unable to determine the retinopathy level.")));
}

#[tokio::test]
async fn test_same_name_upload_overwrites() {
    let test = TestApp::moderate();
    let first = png_bytes(8, 8);
    let second = png_bytes(16, 16);

    test.post_multipart("/predict", multipart_body("file", "eye.png", &first))
        .await;
    test.post_multipart("/predict", multipart_body("file", "eye.png", &second))
        .await;

    let stored = std::fs::read(test.upload_dir.path().join("eye.png")).unwrap();
    assert_eq!(stored, second);
}

#[tokio::test]
async fn test_image_above_ten_mib_accepted_under_raised_limit() {
    let test = TestApp::with_limit(StubClassifier::returning(&MODERATE), 64 * 1024 * 1024);
    let big = noise_png_bytes(2000, 2000);
    assert!(big.len() > 10 * 1024 * 1024);

    let response = test
        .post_multipart("/predict", multipart_body("file", "big.png", &big))
        .await;

    assert_eq!(response.status(), StatusCode::OK);
    let html = body_string(response).await;
    assert!(html.contains("Moderate"));
    assert_eq!(test.classifier.calls(), 1);
    assert_eq!(
        std::fs::metadata(test.upload_dir.path().join("big.png")).unwrap().len() as usize,
        big.len()
    );
}
