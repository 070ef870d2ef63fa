use std::process::ExitCode;

use ocr_lines_engine::EngineError;

#[derive(Debug, thiserror::Error)]
pub enum ShimError {
    #[error("No image path provided")]
    MissingArgument,

    #[error("paddleocr not installed. Please run: pip install paddlepaddle paddleocr")]
    EngineUnavailable,

    #[error("OCR processing timeout")]
    Timeout,

    #[error("OCR processing failed: {0}")]
    RecognitionFailed(#[source] EngineError),
}

impl From<EngineError> for ShimError {
    fn from(err: EngineError) -> Self {
        match err {
            EngineError::Timeout(_) => ShimError::Timeout,
            err => ShimError::RecognitionFailed(err),
        }
    }
}

impl ShimError {
    /// Every failure is terminal and exits with status 1.
    pub fn exit_code(&self) -> ExitCode {
        ExitCode::FAILURE
    }
}

pub type Result<T> = std::result::Result<T, ShimError>;
