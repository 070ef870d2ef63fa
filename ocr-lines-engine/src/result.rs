use serde::Deserialize;

use crate::{Detection, EngineError};

/// A detection as PaddleOCR emits it: `[polygon, [text, confidence]]`.
#[derive(Debug, Deserialize)]
pub(crate) struct RawDetection(Vec<[f32; 2]>, (String, f32));

impl From<RawDetection> for Detection {
    fn from(RawDetection(polygon, (text, confidence)): RawDetection) -> Self {
        Self {
            polygon,
            text,
            confidence,
        }
    }
}

/// `ocr()` returns one entry per page; a page without text is `null`.
type Pages = Option<Vec<Option<Vec<Detection>>>>;

/// Parses what the bridge script printed.
///
/// The result is the last non-blank line of stdout; anything before it is
/// engine chatter (model download progress and the like). Only the first page
/// is kept.
pub fn parse_bridge_output(stdout: &str) -> Result<Vec<Detection>, EngineError> {
    let line = stdout
        .lines()
        .map(str::trim)
        .rfind(|line| !line.is_empty())
        .ok_or(EngineError::EmptyOutput)?;

    let pages: Pages = serde_json::from_str(line)?;

    Ok(pages
        .and_then(|pages| pages.into_iter().next())
        .flatten()
        .unwrap_or_default())
}
