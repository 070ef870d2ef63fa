//! OCR engine capability used by the `ocr-lines` shim.
//!
//! The engine itself lives outside this crate. What is here is the contract the
//! shim depends on ([`OcrEngine`]), the shape of what an engine returns
//! ([`Detection`]), and a backend that drives PaddleOCR through a Python
//! interpreter ([`PaddleOcr`]).

mod config;
mod error;
mod paddle;
mod result;

use std::path::Path;

use async_trait::async_trait;
use serde::Deserialize;

pub use config::EngineConfig;
pub use error::EngineError;
pub use paddle::PaddleOcr;
pub use result::parse_bridge_output;

/// One located text region.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(from = "result::RawDetection")]
pub struct Detection {
    /// Bounding quadrilateral, clockwise from the top-left corner.
    pub polygon: Vec<[f32; 2]>,
    pub text: String,
    /// Recognition score in `[0, 1]`.
    pub confidence: f32,
}

impl Detection {
    pub fn new(polygon: Vec<[f32; 2]>, text: impl Into<String>, confidence: f32) -> Self {
        Self {
            polygon,
            text: text.into(),
            confidence,
        }
    }
}

/// Recognition language passed to the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, strum::Display)]
pub enum Language {
    #[default]
    #[strum(serialize = "ch")]
    Chinese,
}

/// Fixed per-process engine settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineOptions {
    /// Load the text line orientation classifier.
    pub use_angle_cls: bool,
    pub lang: Language,
    /// Let the engine print its own progress logs.
    pub show_log: bool,
}

impl Default for EngineOptions {
    fn default() -> Self {
        Self {
            use_angle_cls: true,
            lang: Language::Chinese,
            show_log: false,
        }
    }
}

#[async_trait]
pub trait OcrEngine: Send + Sync {
    /// Whether the engine can be loaded at all. Checked before any recognition.
    async fn is_available(&self) -> bool;

    /// Detections of the first page of `image`, in the engine's order.
    async fn recognize(
        &self,
        image: &Path,
        classify_orientation: bool,
    ) -> Result<Vec<Detection>, EngineError>;
}
