// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Shared value types for image generation: presets, enums and stored records

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Named style selecting a prompt-rewriting template
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StylePreset {
    #[default]
    None,
    Anime,
    Photographic,
    DigitalArt,
    ComicBook,
    FantasyArt,
    LineArt,
    AnalogFilm,
    NeonPunk,
    Isometric,
    LowPoly,
    Origami,
    ModelingCompound,
    Cinematic,
    TileTexture,
}

impl StylePreset {
    /// Every preset, in declaration order
    pub const ALL: [StylePreset; 15] = [
        StylePreset::None,
        StylePreset::Anime,
        StylePreset::Photographic,
        StylePreset::DigitalArt,
        StylePreset::ComicBook,
        StylePreset::FantasyArt,
        StylePreset::LineArt,
        StylePreset::AnalogFilm,
        StylePreset::NeonPunk,
        StylePreset::Isometric,
        StylePreset::LowPoly,
        StylePreset::Origami,
        StylePreset::ModelingCompound,
        StylePreset::Cinematic,
        StylePreset::TileTexture,
    ];

    /// Wire value, e.g. `digital-art`
    pub fn as_str(&self) -> &'static str {
        match self {
            StylePreset::None => "none",
            StylePreset::Anime => "anime",
            StylePreset::Photographic => "photographic",
            StylePreset::DigitalArt => "digital-art",
            StylePreset::ComicBook => "comic-book",
            StylePreset::FantasyArt => "fantasy-art",
            StylePreset::LineArt => "line-art",
            StylePreset::AnalogFilm => "analog-film",
            StylePreset::NeonPunk => "neon-punk",
            StylePreset::Isometric => "isometric",
            StylePreset::LowPoly => "low-poly",
            StylePreset::Origami => "origami",
            StylePreset::ModelingCompound => "modeling-compound",
            StylePreset::Cinematic => "cinematic",
            StylePreset::TileTexture => "tile-texture",
        }
    }

    /// Human readable label, e.g. `Digital Art`
    pub fn display_name(&self) -> String {
        self.as_str()
            .split('-')
            .map(|word| {
                let mut chars = word.chars();
                match chars.next() {
                    Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                    None => String::new(),
                }
            })
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl fmt::Display for StylePreset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StylePreset {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        StylePreset::ALL
            .iter()
            .copied()
            .find(|style| style.as_str() == s)
            .ok_or_else(|| format!("unknown style preset '{}'", s))
    }
}

/// Aspect ratio alternative to explicit width/height
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AspectRatio {
    #[serde(rename = "1:1")]
    Square,
    #[serde(rename = "16:9")]
    Landscape,
    #[serde(rename = "9:16")]
    Portrait,
    #[serde(rename = "21:9")]
    Wide,
    #[serde(rename = "custom")]
    Custom,
}

impl AspectRatio {
    /// Default dimensions for the ratio; every side is a multiple of 64
    pub fn dimensions(&self) -> (u32, u32) {
        match self {
            AspectRatio::Square | AspectRatio::Custom => (1024, 1024),
            AspectRatio::Landscape => (1024, 576),
            AspectRatio::Portrait => (576, 1024),
            AspectRatio::Wide => (1344, 576),
        }
    }
}

/// How the inpainting mask is interpreted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MaskMode {
    #[default]
    Black,
    White,
}

impl FromStr for MaskMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "black" => Ok(MaskMode::Black),
            "white" => Ok(MaskMode::White),
            other => Err(format!("mask_mode must be 'black' or 'white', got '{}'", other)),
        }
    }
}

/// Upscaling model
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum UpscaleModel {
    #[default]
    Esrgan,
    RealEsrgan,
    Ldm,
}

impl UpscaleModel {
    pub fn as_str(&self) -> &'static str {
        match self {
            UpscaleModel::Esrgan => "esrgan",
            UpscaleModel::RealEsrgan => "real-esrgan",
            UpscaleModel::Ldm => "ldm",
        }
    }
}

/// A preset output size offered to clients
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PresetSize {
    pub width: u32,
    pub height: u32,
    pub label: &'static str,
}

/// Preset sizes, smallest first
pub const PRESET_SIZES: &[PresetSize] = &[
    PresetSize {
        width: 512,
        height: 512,
        label: "Small (512x512)",
    },
    PresetSize {
        width: 768,
        height: 768,
        label: "Medium (768x768)",
    },
    PresetSize {
        width: 1024,
        height: 1024,
        label: "Large (1024x1024)",
    },
    PresetSize {
        width: 1920,
        height: 1080,
        label: "HD (1920x1080)",
    },
    PresetSize {
        width: 2048,
        height: 2048,
        label: "Ultra HD (2048x2048)",
    },
];

/// Metadata describing how a stored image was produced
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageMetadata {
    /// Prompt after style enhancement
    pub prompt: String,
    pub width: u32,
    pub height: u32,
    pub model: String,
    pub timestamp: DateTime<Utc>,
    #[serde(default)]
    pub style_preset: Option<StylePreset>,
    #[serde(default)]
    pub seed: Option<i64>,
}

/// A generated image record as returned to clients
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationResponse {
    pub image_url: String,
    pub image_id: String,
    pub metadata: ImageMetadata,
}
