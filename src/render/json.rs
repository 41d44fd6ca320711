//! JSON mirror of analyzed documents.
//!
//! Works for any model type: a single page, a multi-page document, or an
//! individual table or list.

use std::io::{Read, Write};

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::Result;

/// JSON output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JsonFormat {
    /// Pretty-printed JSON with indentation
    #[default]
    Pretty,
    /// Compact JSON without extra whitespace
    Compact,
}

/// Serialize a value to a JSON string.
pub fn to_json<T: Serialize + ?Sized>(value: &T, format: JsonFormat) -> Result<String> {
    let json = match format {
        JsonFormat::Pretty => serde_json::to_string_pretty(value)?,
        JsonFormat::Compact => serde_json::to_string(value)?,
    };
    Ok(json)
}

/// Deserialize a value from a JSON string.
pub fn from_json<T: DeserializeOwned>(json: &str) -> Result<T> {
    Ok(serde_json::from_str(json)?)
}

/// Serialize a value as JSON into a writer.
pub fn write_json<W, T>(mut writer: W, value: &T, format: JsonFormat) -> Result<()>
where
    W: Write,
    T: Serialize + ?Sized,
{
    match format {
        JsonFormat::Pretty => serde_json::to_writer_pretty(&mut writer, value)?,
        JsonFormat::Compact => serde_json::to_writer(&mut writer, value)?,
    }
    writer.flush()?;
    Ok(())
}

/// Deserialize a value from a JSON reader.
pub fn read_json<R: Read, T: DeserializeOwned>(reader: R) -> Result<T> {
    Ok(serde_json::from_reader(reader)?)
}
