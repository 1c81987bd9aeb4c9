// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Tests for prompt tooling and the static catalog endpoints

use super::common::{get, post_empty, test_app};
use axum::http::StatusCode;

#[tokio::test]
async fn test_validate_prompt_short() {
    let (status, body) =
        post_empty(test_app(), "/api/v1/images/validate-prompt?prompt=cat").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["prompt"], "cat");
    assert_eq!(body["validation"]["is_valid"], false);
    assert!(body["validation"]["warnings"][0]
        .as_str()
        .unwrap()
        .contains("short"));
    assert_eq!(body["content_check"]["is_allowed"], true);
}

#[tokio::test]
async fn test_validate_prompt_flags_blocked_terms() {
    let (status, body) = post_empty(
        test_app(),
        "/api/v1/images/validate-prompt?prompt=some%20inappropriate%20scene",
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["content_check"]["is_allowed"], false);
    assert_eq!(body["content_check"]["category"], "inappropriate");
}

#[tokio::test]
async fn test_validate_prompt_requires_prompt() {
    let (status, body) = post_empty(test_app(), "/api/v1/images/validate-prompt").await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["error"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_enhance_prompt_with_style() {
    let (status, body) = post_empty(
        test_app(),
        "/api/v1/images/enhance-prompt?prompt=a%20cat&style_preset=anime",
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["original"], "a cat");
    assert_eq!(
        body["enhanced"],
        "anime style, manga art, a cat, detailed anime illustration"
    );
    assert_eq!(
        body["suggested_negative"],
        "low quality, blurry, pixelated, distorted, realistic, photo, 3d render"
    );
}

#[tokio::test]
async fn test_enhance_prompt_without_or_unknown_style() {
    for uri in [
        "/api/v1/images/enhance-prompt?prompt=x",
        "/api/v1/images/enhance-prompt?prompt=x&style_preset=watercolor",
    ] {
        let (status, body) = post_empty(test_app(), uri).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["enhanced"], "x");
        assert_eq!(
            body["suggested_negative"],
            "low quality, blurry, pixelated, distorted"
        );
    }
}

#[tokio::test]
async fn test_preset_sizes() {
    let (status, body) = get(test_app(), "/api/v1/images/sizes").await;
    assert_eq!(status, StatusCode::OK);
    let sizes = body.as_array().unwrap();
    assert_eq!(sizes.len(), 5);
    assert_eq!(sizes[0]["width"], 512);
    assert_eq!(sizes[0]["label"], "Small (512x512)");
    assert_eq!(sizes[3]["height"], 1080);
    assert_eq!(sizes[4]["label"], "Ultra HD (2048x2048)");
}

#[tokio::test]
async fn test_style_presets() {
    let (status, body) = get(test_app(), "/api/v1/images/styles").await;
    assert_eq!(status, StatusCode::OK);
    let styles = body.as_array().unwrap();
    assert_eq!(styles.len(), 15);
    assert_eq!(styles[0]["value"], "none");
    assert_eq!(styles[0]["name"], "None");
    assert!(styles
        .iter()
        .any(|s| s["value"] == "digital-art" && s["name"] == "Digital Art"));
    assert!(styles
        .iter()
        .any(|s| s["value"] == "modeling-compound" && s["name"] == "Modeling Compound"));
}
