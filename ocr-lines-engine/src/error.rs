use std::process::ExitStatus;
use std::time::Duration;

#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("failed to start {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("engine exited with {status}: {stderr}")]
    Exited { status: ExitStatus, stderr: String },

    #[error("engine did not finish within {0:?}")]
    Timeout(Duration),

    #[error("engine printed no result")]
    EmptyOutput,

    #[error("engine output is not valid UTF-8")]
    Encoding(#[from] std::string::FromUtf8Error),

    #[error("failed to parse engine output: {0}")]
    Parse(#[from] serde_json::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
