use std::io::{Read, Write};

use serde::Serialize;
use serde_json::{Value, ser::PrettyFormatter};

use crate::error::ArtifactError;

/// Writes the documents as a pretty printed (4 space indent) JSON array to the writer (W)
///
/// # Errors
///
/// Failed to serialize or to write
pub fn write_customer_documents<S, W>(documents: &[S], w: W) -> Result<(), serde_json::Error>
where
    S: Serialize,
    W: Write,
{
    let mut ser = serde_json::Serializer::with_formatter(w, PrettyFormatter::with_indent(b"    "));
    documents.serialize(&mut ser)
}

/// Reads the handoff artifact. Only the top-level shape is checked here, each element is
/// validated on its own when it's loaded.
///
/// # Errors
///
/// Invalid JSON or a top-level value that isn't an array
pub fn read_customer_documents<R: Read>(r: R) -> Result<Vec<Value>, ArtifactError> {
    match serde_json::from_reader(r)? {
        Value::Array(documents) => Ok(documents),
        _ => Err(ArtifactError::NotAnArray),
    }
}
