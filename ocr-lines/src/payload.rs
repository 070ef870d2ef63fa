use std::io::{self, Write};

use serde::Serialize;
use serde_json::ser::{Formatter, Serializer};

use crate::error::ShimError;

/// The single JSON object printed per invocation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputPayload {
    Lines(Vec<String>),
    Error(String),
}

impl From<Result<Vec<String>, ShimError>> for OutputPayload {
    fn from(outcome: Result<Vec<String>, ShimError>) -> Self {
        match outcome {
            Ok(lines) => OutputPayload::Lines(lines),
            Err(err) => OutputPayload::Error(err.to_string()),
        }
    }
}

impl OutputPayload {
    pub fn to_json(&self) -> serde_json::Result<String> {
        let mut buf = Vec::with_capacity(128);
        self.serialize(&mut Serializer::with_formatter(&mut buf, SpacedFormatter))?;
        // serde_json only ever writes valid UTF-8
        Ok(String::from_utf8_lossy(&buf).into_owned())
    }

    /// Writes the payload and a trailing newline, then flushes.
    pub fn emit(&self, out: &mut impl Write) -> io::Result<()> {
        let json = self.to_json().map_err(io::Error::other)?;
        writeln!(out, "{json}")?;
        out.flush()
    }
}

/// Compact JSON with `", "` and `": "` separators, non-ASCII left as is.
#[derive(Debug, Clone, Copy, Default)]
struct SpacedFormatter;

impl Formatter for SpacedFormatter {
    fn begin_array_value<W>(&mut self, writer: &mut W, first: bool) -> io::Result<()>
    where
        W: ?Sized + Write,
    {
        if first { Ok(()) } else { writer.write_all(b", ") }
    }

    fn begin_object_key<W>(&mut self, writer: &mut W, first: bool) -> io::Result<()>
    where
        W: ?Sized + Write,
    {
        if first { Ok(()) } else { writer.write_all(b", ") }
    }

    fn begin_object_value<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + Write,
    {
        writer.write_all(b": ")
    }
}
