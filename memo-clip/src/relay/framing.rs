//! Native messaging framing
//!
//! Every message is a 4-byte length in native byte order followed by that
//! many bytes of UTF-8 JSON. A clean EOF before a header, or a zero length,
//! ends the stream.

use crate::error::ClipError;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::io::{self, Read, Write};

/// Largest frame accepted from the browser side (its own limit is 64 MiB)
pub const MAX_FRAME_LEN: usize = 64 * 1024 * 1024;

/// Read one raw frame; `None` when the stream has ended
pub fn read_frame(reader: &mut impl Read) -> Result<Option<Vec<u8>>, ClipError> {
    let mut length_bytes = [0u8; 4];

    match reader.read_exact(&mut length_bytes) {
        Ok(_) => {}
        Err(e) if e.kind() == io::ErrorKind::UnexpectedEof => return Ok(None),
        Err(e) => return Err(e.into()),
    }

    let length = u32::from_ne_bytes(length_bytes) as usize;
    if length == 0 {
        return Ok(None);
    }
    if length > MAX_FRAME_LEN {
        return Err(ClipError::Protocol(format!(
            "frame of {length} bytes exceeds the {MAX_FRAME_LEN} byte limit"
        )));
    }

    let mut message = vec![0u8; length];
    reader.read_exact(&mut message)?;

    Ok(Some(message))
}

/// Write one raw frame and flush
pub fn write_frame(writer: &mut impl Write, message: &[u8]) -> Result<(), ClipError> {
    let length = u32::try_from(message.len()).map_err(|_| {
        ClipError::Protocol(format!("message of {} bytes is too long", message.len()))
    })?;

    writer.write_all(&length.to_ne_bytes())?;
    writer.write_all(message)?;
    writer.flush()?;

    Ok(())
}

/// Read and deserialize one message; `None` when the stream has ended
pub fn read_message<T: DeserializeOwned>(reader: &mut impl Read) -> Result<Option<T>, ClipError> {
    match read_frame(reader)? {
        Some(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
        None => Ok(None),
    }
}

pub fn write_message<T: Serialize>(writer: &mut impl Write, message: &T) -> Result<(), ClipError> {
    let bytes = serde_json::to_vec(message)?;
    write_frame(writer, &bytes)
}
