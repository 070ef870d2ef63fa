use std::path::Path;
use std::process::Stdio;
use std::time::Duration;

use async_trait::async_trait;
use tokio::process::Command;
use tracing::{debug, info, instrument, warn};

use crate::{Detection, EngineConfig, EngineError, EngineOptions, OcrEngine, parse_bridge_output};

/// Exits 0 iff the interpreter can load PaddleOCR.
pub const IMPORT_CHECK_SCRIPT: &str = "import paddleocr";

/// Runs one recognition and prints the raw result as the last stdout line.
/// Arguments: image path, language, use_angle_cls, cls, show_log (flags are `0`/`1`).
pub const BRIDGE_SCRIPT: &str = include_str!("bridge.py");

/// Lower bound for the import check; a cold `import paddleocr` loads the whole framework.
const IMPORT_CHECK_TIMEOUT: Duration = Duration::from_secs(120);

/// PaddleOCR, driven through a Python interpreter in a child process.
#[derive(Debug, Clone)]
pub struct PaddleOcr {
    config: EngineConfig,
    options: EngineOptions,
}

impl PaddleOcr {
    pub fn new(config: EngineConfig, options: EngineOptions) -> Self {
        Self { config, options }
    }

    fn python(&self) -> Command {
        let mut command = Command::new(&self.config.python);
        // the bridge prints non-ASCII text; keep it UTF-8 whatever the console code page
        command
            .env("PYTHONIOENCODING", "utf-8")
            .stdin(Stdio::null())
            .kill_on_drop(true);
        command
    }

    fn import_check_timeout(&self) -> Duration {
        self.config.timeout.max(IMPORT_CHECK_TIMEOUT)
    }
}

fn flag(on: bool) -> &'static str {
    if on { "1" } else { "0" }
}

/// Last non-blank stderr line; for a Python traceback that is the exception.
fn stderr_tail(stderr: &str) -> String {
    stderr
        .lines()
        .map(str::trim)
        .rfind(|line| !line.is_empty())
        .unwrap_or_default()
        .to_string()
}

#[async_trait]
impl OcrEngine for PaddleOcr {
    #[instrument(level = "debug", skip(self), fields(python = %self.config.python))]
    async fn is_available(&self) -> bool {
        let mut command = self.python();
        command
            .args(["-c", IMPORT_CHECK_SCRIPT])
            .stdout(Stdio::null())
            .stderr(Stdio::null());

        let timeout = self.import_check_timeout();
        match tokio::time::timeout(timeout, command.status()).await {
            Ok(Ok(status)) if status.success() => true,
            Ok(Ok(status)) => {
                debug!(%status, "paddleocr is not importable");
                false
            }
            Ok(Err(err)) => {
                debug!(%err, "interpreter could not be started");
                false
            }
            Err(_) => {
                warn!(?timeout, "import paddleocr did not finish, treating engine as unavailable");
                false
            }
        }
    }

    #[instrument(level = "info", skip(self, image), fields(image = %image.display()))]
    async fn recognize(
        &self,
        image: &Path,
        classify_orientation: bool,
    ) -> Result<Vec<Detection>, EngineError> {
        let mut command = self.python();
        command
            .arg("-c")
            .arg(BRIDGE_SCRIPT)
            .arg(image)
            .arg(self.options.lang.to_string())
            .arg(flag(self.options.use_angle_cls))
            .arg(flag(classify_orientation))
            .arg(flag(self.options.show_log))
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());

        let child = command.spawn().map_err(|source| EngineError::Spawn {
            program: self.config.python.clone(),
            source,
        })?;

        // dropping the pending wait kills the child
        let output = tokio::time::timeout(self.config.timeout, child.wait_with_output())
            .await
            .map_err(|_| EngineError::Timeout(self.config.timeout))??;

        let stderr = String::from_utf8_lossy(&output.stderr);
        if !stderr.trim().is_empty() {
            debug!(stderr = %stderr.trim_end(), "engine stderr");
        }

        if !output.status.success() {
            return Err(EngineError::Exited {
                status: output.status,
                stderr: stderr_tail(&stderr),
            });
        }

        let stdout = String::from_utf8(output.stdout)?;
        let detections = parse_bridge_output(&stdout)?;
        info!(detections = detections.len(), "recognition finished");

        Ok(detections)
    }
}
