//! Byte-stream collaborators: whole-file reads and encoded writes.

use std::fs;
use std::path::Path;

use byteorder::{BigEndian, ByteOrder};
use log::debug;

use super::encoding::Encoding;
use super::error::Result;

/// Read the full byte content of a file.
///
/// I/O failures propagate; a missing file is never treated as empty
/// content.
pub fn read_all(path: &Path) -> Result<Vec<u8>> {
    let bytes = fs::read(path)?;
    debug!("read {} bytes from {}", bytes.len(), path.display());
    Ok(bytes)
}

/// Encode text with the encoding's charset.
///
/// encoding_rs carries no UTF-16 encoder, so UTF-16BE code units are
/// assembled explicitly.
pub fn encode_text(encoding: &Encoding, text: &str) -> Vec<u8> {
    if encoding.charset() == encoding_rs::UTF_16BE {
        let mut bytes = Vec::with_capacity(text.len() * 2);
        for unit in text.encode_utf16() {
            let mut pair = [0u8; 2];
            BigEndian::write_u16(&mut pair, unit);
            bytes.extend_from_slice(&pair);
        }
        return bytes;
    }
    let (bytes, _, _) = encoding.charset().encode(text);
    bytes.into_owned()
}

/// Overwrite a file with the given lines, one per line with a trailing
/// newline, encoded to the dictionary encoding.
///
/// The content lands in a sibling temporary file first and is renamed over
/// the target, so a crash mid-write cannot leave a half-written dictionary.
pub fn write_all(path: &Path, encoding: &Encoding, lines: &[String]) -> Result<()> {
    let mut text = String::new();
    for line in lines {
        text.push_str(line);
        text.push('\n');
    }
    let bytes = encode_text(encoding, &text);

    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();
    let staging = path.with_file_name(format!("{}.tmp", file_name));
    fs::write(&staging, &bytes)?;
    fs::rename(&staging, path)?;
    debug!(
        "wrote {} bytes ({} lines) to {}",
        bytes.len(),
        lines.len(),
        path.display()
    );
    Ok(())
}
