//! Prints the text lines PaddleOCR finds in an image as a single JSON object.
//!
//! ```text
//! $ ocr-lines receipt.png
//! {"lines": ["收据", "合计 128.00"]}
//! ```

pub mod adapter;
pub mod error;
pub mod invocation;
pub mod payload;
pub mod telemetry;

pub use adapter::{run, text_lines};
pub use error::ShimError;
pub use invocation::Invocation;
pub use payload::OutputPayload;
