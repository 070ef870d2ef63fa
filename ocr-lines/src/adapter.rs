use ocr_lines_engine::{Detection, OcrEngine};
use tracing::{debug, instrument};

use crate::error::{Result, ShimError};
use crate::invocation::Invocation;

/// Runs one invocation against `engine` and returns the recognized lines.
///
/// Availability is checked before the arguments, mirroring an import that
/// happens when the program loads.
#[instrument(level = "debug", skip_all)]
pub async fn run<E>(engine: &E, invocation: Invocation) -> Result<Vec<String>>
where
    E: OcrEngine + ?Sized,
{
    if !engine.is_available().await {
        return Err(ShimError::EngineUnavailable);
    }

    let image_path = invocation.image_path.ok_or(ShimError::MissingArgument)?;
    debug!(image = %image_path.display(), "recognizing");

    let detections = engine.recognize(&image_path, true).await?;
    Ok(text_lines(detections))
}

/// Keeps only the recognized text of each detection, in order.
/// Geometry and confidence are not part of the output.
pub fn text_lines(detections: Vec<Detection>) -> Vec<String> {
    detections
        .into_iter()
        .map(|Detection { text, .. }| text)
        .collect()
}
