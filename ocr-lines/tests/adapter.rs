use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use ocr_lines::{Invocation, OutputPayload, ShimError, run};
use ocr_lines_engine::{Detection, EngineError, OcrEngine};

/// Deterministic engine that records every call it receives.
struct MockEngine {
    available: bool,
    outcome: fn() -> Result<Vec<Detection>, EngineError>,
    calls: Mutex<Vec<(PathBuf, bool)>>,
}

impl MockEngine {
    fn new(available: bool, outcome: fn() -> Result<Vec<Detection>, EngineError>) -> Self {
        Self {
            available,
            outcome,
            calls: Mutex::new(Vec::new()),
        }
    }

    fn calls(&self) -> Vec<(PathBuf, bool)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl OcrEngine for MockEngine {
    async fn is_available(&self) -> bool {
        self.available
    }

    async fn recognize(
        &self,
        image: &Path,
        classify_orientation: bool,
    ) -> Result<Vec<Detection>, EngineError> {
        self.calls
            .lock()
            .unwrap()
            .push((image.to_path_buf(), classify_orientation));
        (self.outcome)()
    }
}

fn quad(y: f32) -> Vec<[f32; 2]> {
    vec![[0.0, y], [100.0, y], [100.0, y + 20.0], [0.0, y + 20.0]]
}

fn three_lines() -> Result<Vec<Detection>, EngineError> {
    Ok(vec![
        Detection::new(quad(0.0), "text1", 0.99),
        Detection::new(quad(30.0), "text2", 0.87),
        Detection::new(quad(60.0), "你好", 0.93),
    ])
}

fn nothing() -> Result<Vec<Detection>, EngineError> {
    Ok(vec![])
}

fn crashes() -> Result<Vec<Detection>, EngineError> {
    Err(EngineError::EmptyOutput)
}

fn stalls() -> Result<Vec<Detection>, EngineError> {
    Err(EngineError::Timeout(Duration::from_secs(60)))
}

fn invocation(path: &str) -> Invocation {
    Invocation {
        image_path: Some(PathBuf::from(path)),
    }
}

async fn render(engine: &MockEngine, invocation: Invocation) -> anyhow::Result<String> {
    let outcome = run(engine, invocation).await;
    Ok(OutputPayload::from(outcome).to_json()?)
}

#[tokio::test]
async fn missing_argument() -> anyhow::Result<()> {
    let engine = MockEngine::new(true, three_lines);

    let outcome = run(&engine, Invocation::default()).await;
    assert!(matches!(outcome, Err(ShimError::MissingArgument)));
    assert_eq!(
        render(&engine, Invocation::default()).await?,
        r#"{"error": "No image path provided"}"#
    );
    assert!(engine.calls().is_empty());
    Ok(())
}

#[tokio::test]
async fn engine_unavailable_skips_recognition() -> anyhow::Result<()> {
    let engine = MockEngine::new(false, three_lines);

    assert_eq!(
        render(&engine, invocation("page.png")).await?,
        r#"{"error": "paddleocr not installed. Please run: pip install paddlepaddle paddleocr"}"#
    );
    assert!(engine.calls().is_empty());
    Ok(())
}

#[tokio::test]
async fn availability_is_checked_before_arguments() -> anyhow::Result<()> {
    let engine = MockEngine::new(false, three_lines);

    let outcome = run(&engine, Invocation::default()).await;
    assert!(matches!(outcome, Err(ShimError::EngineUnavailable)));
    Ok(())
}

#[tokio::test]
async fn no_detections() -> anyhow::Result<()> {
    let engine = MockEngine::new(true, nothing);

    assert_eq!(render(&engine, invocation("blank.png")).await?, r#"{"lines": []}"#);
    Ok(())
}

#[tokio::test]
async fn lines_keep_detection_order_and_non_ascii() -> anyhow::Result<()> {
    let engine = MockEngine::new(true, three_lines);

    assert_eq!(
        render(&engine, invocation("receipt.png")).await?,
        r#"{"lines": ["text1", "text2", "你好"]}"#
    );
    assert_eq!(engine.calls(), [(PathBuf::from("receipt.png"), true)]);
    Ok(())
}

#[tokio::test]
async fn repeated_runs_are_byte_identical() -> anyhow::Result<()> {
    let engine = MockEngine::new(true, three_lines);

    let first = render(&engine, invocation("receipt.png")).await?;
    let second = render(&engine, invocation("receipt.png")).await?;
    assert_eq!(first.as_bytes(), second.as_bytes());
    Ok(())
}

#[tokio::test]
async fn engine_failures_are_reported() -> anyhow::Result<()> {
    let engine = MockEngine::new(true, crashes);
    assert_eq!(
        render(&engine, invocation("page.png")).await?,
        r#"{"error": "OCR processing failed: engine printed no result"}"#
    );

    let engine = MockEngine::new(true, stalls);
    assert_eq!(
        render(&engine, invocation("page.png")).await?,
        r#"{"error": "OCR processing timeout"}"#
    );
    Ok(())
}
