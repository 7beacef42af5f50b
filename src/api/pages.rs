// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! HTML views: upload form, result page, error page

use crate::classifier::ClassificationResult;

/// URL prefix the upload directory is served under
pub const UPLOADS_URL_PREFIX: &str = "/static/uploads";

/// Public URL of a stored upload
pub fn upload_url(filename: &str) -> String {
    format!("{}/{}", UPLOADS_URL_PREFIX, filename)
}

/// Escape text for element content and quoted attribute values
pub fn escape(text: &str) -> String {
    ammonia::clean_text(text)
}

fn layout(title: &str, body: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="utf-8">
    <meta name="viewport" content="width=device-width, initial-scale=1">
    <title>{title}</title>
</head>
<body>
    <main class="container">
{body}
    </main>
</body>
</html>
"#,
        title = escape(title),
        body = body
    )
}

/// GET / - upload form
pub fn render_index() -> String {
    layout(
        "Diabetic Retinopathy Detection",
        r#"        <h1>Diabetic Retinopathy Detection</h1>
        <p>Upload a retinal fundus image (PNG or JPEG) to estimate its severity grade.</p>
        <form action="/predict" method="post" enctype="multipart/form-data">
            <input type="file" name="file" accept=".png,.jpg,.jpeg" required>
            <button type="submit">Predict</button>
        </form>"#,
    )
}

/// POST /predict - result view
pub fn render_result(result: &ClassificationResult, filename: &str) -> String {
    let body = format!(
        r#"        <h1>Prediction Result</h1>
        <img src="{image_url}" alt="Uploaded retinal image" width="300">
        <p><strong>Severity Level:</strong> <span class="severity">{severity}</span></p>
        <p><strong>Confidence:</strong> <span class="confidence">{confidence}%</span></p>
        <p class="message">{message}</p>
        <a href="/">Upload another image</a>"#,
        image_url = escape(&upload_url(filename)),
        severity = escape(&result.label),
        confidence = result.confidence_display(),
        message = escape(&result.message),
    );

    layout("Prediction Result", &body)
}

/// Error page for failures that are not silent redirects
pub fn render_error(status: u16, message: &str) -> String {
    let body = format!(
        r#"        <h1>Error {status}</h1>
        <p class="error">{message}</p>
        <a href="/">Back to upload</a>"#,
        status = status,
        message = escape(message),
    );

    layout("Error", &body)
}
