use std::process::ExitCode;

use ocr_lines::{Invocation, OutputPayload, adapter, telemetry};
use ocr_lines_engine::{EngineConfig, EngineOptions, PaddleOcr};
use tracing::{error, info};

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    telemetry::init_tracing();

    let invocation = Invocation::from_env();
    let engine = PaddleOcr::new(EngineConfig::from_env(), EngineOptions::default());

    let outcome = adapter::run(&engine, invocation).await;
    let code = match &outcome {
        Ok(_) => ExitCode::SUCCESS,
        Err(err) => {
            info!(%err, "ocr failed");
            err.exit_code()
        }
    };

    if let Err(err) = OutputPayload::from(outcome).emit(&mut std::io::stdout().lock()) {
        error!(%err, "failed to write output");
        return ExitCode::FAILURE;
    }

    code
}
