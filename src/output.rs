//! Compact, ASCII-only JSON output.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use serde::Serialize;
use serde_json::ser::{Formatter, Serializer};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum OutputError {
    #[error("failed to write {path}: {source}")]
    Io { path: String, source: io::Error },
    #[error("failed to serialize program: {0}")]
    Json(#[from] serde_json::Error),
}

/// Compact separators (the `Formatter` defaults); any non-ASCII code point
/// is written as `\uXXXX`
#[derive(Debug, Default, Clone, Copy)]
pub struct AsciiFormatter;

impl Formatter for AsciiFormatter {
    fn write_string_fragment<W: ?Sized + Write>(&mut self, writer: &mut W, fragment: &str) -> io::Result<()> {
        if fragment.is_ascii() {
            return writer.write_all(fragment.as_bytes());
        }
        let mut units = [0u16; 2];
        for c in fragment.chars() {
            if c.is_ascii() {
                writer.write_all(&[c as u8])?;
            } else {
                for unit in c.encode_utf16(&mut units) {
                    write!(writer, "\\u{:04x}", unit)?;
                }
            }
        }
        Ok(())
    }
}

/// Serialize `value` with [`AsciiFormatter`] into `writer`
pub fn to_ascii_writer<W: Write, T: Serialize + ?Sized>(writer: W, value: &T) -> Result<(), serde_json::Error> {
    let mut ser = Serializer::with_formatter(writer, AsciiFormatter);
    value.serialize(&mut ser)
}

/// Serialize `value` to an ASCII-only string
pub fn to_ascii_string<T: Serialize + ?Sized>(value: &T) -> Result<String, serde_json::Error> {
    let mut buf = Vec::new();
    to_ascii_writer(&mut buf, value)?;
    // Only ASCII bytes are ever written
    Ok(String::from_utf8_lossy(&buf).into_owned())
}

/// Write `value` to `path`, returning the number of bytes written
pub fn write_program<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<u64, OutputError> {
    let io_err = |source| OutputError::Io {
        path: path.display().to_string(),
        source,
    };

    let file = File::create(path).map_err(io_err)?;
    let mut writer = BufWriter::new(file);
    to_ascii_writer(&mut writer, value)?;
    writer.flush().map_err(io_err)?;

    let size = writer.get_ref().metadata().map_err(io_err)?.len();
    Ok(size)
}
