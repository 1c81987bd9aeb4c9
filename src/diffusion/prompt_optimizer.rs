// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Style-based prompt enhancement and heuristic prompt review

use serde::{Deserialize, Serialize};

use crate::diffusion::types::StylePreset;

/// Negative prompt applied regardless of style
pub const BASE_NEGATIVE_PROMPT: &str = "low quality, blurry, pixelated, distorted";

const SHORT_PROMPT_CHARS: usize = 10;
const LONG_PROMPT_CHARS: usize = 500;

struct StyleTemplate {
    prefix: &'static str,
    suffix: &'static str,
    negative: &'static str,
}

const ANIME: StyleTemplate = StyleTemplate {
    prefix: "anime style, manga art, ",
    suffix: ", detailed anime illustration",
    negative: "realistic, photo, 3d render",
};

const PHOTOGRAPHIC: StyleTemplate = StyleTemplate {
    prefix: "photograph, realistic, ",
    suffix: ", high quality photo, dslr",
    negative: "cartoon, illustration, painting",
};

const DIGITAL_ART: StyleTemplate = StyleTemplate {
    prefix: "digital art, digital painting, ",
    suffix: ", artstation, concept art",
    negative: "photo, realistic",
};

const CINEMATIC: StyleTemplate = StyleTemplate {
    prefix: "cinematic shot, movie still, ",
    suffix: ", dramatic lighting, film grain",
    negative: "cartoon, anime, illustration",
};

fn template(style: StylePreset) -> Option<&'static StyleTemplate> {
    match style {
        StylePreset::Anime => Some(&ANIME),
        StylePreset::Photographic => Some(&PHOTOGRAPHIC),
        StylePreset::DigitalArt => Some(&DIGITAL_ART),
        StylePreset::Cinematic => Some(&CINEMATIC),
        _ => None,
    }
}

/// Outcome of [`PromptOptimizer::validate_prompt`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PromptValidation {
    pub is_valid: bool,
    pub warnings: Vec<String>,
    pub suggestions: Vec<String>,
}

/// Rewrites prompts using per-style templates
#[derive(Debug, Clone, Copy, Default)]
pub struct PromptOptimizer;

impl PromptOptimizer {
    pub fn new() -> Self {
        Self
    }

    /// Wrap the prompt in the style's prefix and suffix. Styles without a
    /// template leave the prompt unchanged.
    pub fn enhance_prompt(&self, prompt: &str, style: Option<StylePreset>) -> String {
        match style.and_then(template) {
            Some(t) => format!("{}{}{}", t.prefix, prompt, t.suffix),
            None => prompt.to_string(),
        }
    }

    /// Suggest a negative prompt for the style. The prompt itself is not consulted.
    pub fn suggest_negative_prompt(&self, _prompt: &str, style: Option<StylePreset>) -> String {
        match style.and_then(template) {
            Some(t) if !t.negative.is_empty() => format!("{}, {}", BASE_NEGATIVE_PROMPT, t.negative),
            _ => BASE_NEGATIVE_PROMPT.to_string(),
        }
    }

    pub fn validate_prompt(&self, prompt: &str) -> PromptValidation {
        let mut warnings = Vec::new();
        let mut suggestions = Vec::new();

        let len = prompt.chars().count();
        if len < SHORT_PROMPT_CHARS {
            warnings.push("Prompt is very short. Consider adding more detail.".to_string());
        }
        if len > LONG_PROMPT_CHARS {
            warnings.push("Prompt is very long. Consider being more concise.".to_string());
        }
        if is_all_caps(prompt) {
            warnings.push("Avoid using all caps in prompts.".to_string());
        }

        let lower = prompt.to_lowercase();
        if !lower.contains("beautiful") && !lower.contains("quality") {
            suggestions.push(
                "Consider adding quality descriptors like 'high quality' or 'detailed'".to_string(),
            );
        }

        PromptValidation {
            is_valid: warnings.is_empty(),
            warnings,
            suggestions,
        }
    }
}

/// True when the text has at least one cased letter and none are lowercase
fn is_all_caps(text: &str) -> bool {
    text.chars().any(char::is_uppercase) && !text.chars().any(char::is_lowercase)
}
