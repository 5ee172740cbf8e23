//! Framing of a single serialized value.
//!
//! Each frame is self-terminating, so frames can be concatenated without delimiters:
//!
//! ```text
//! Frame := IDLen(u64) ID(bytes[IDLen]) PayloadLen(u64) Payload(bytes[PayloadLen])
//! ```
//!
//! Both length fields are little-endian and count exactly the bytes that follow them.
//! Reading is split in two ([read_id], then [read_payload]) so that the identifier can
//! be resolved before the payload is consumed.

use crate::{Config, Error};
use bytes::{Buf, BufMut, Bytes};

/// Size of each length prefix.
pub const LENGTH_SIZE: usize = 8;

/// Returns the number of bytes [write] emits for `id` and `payload`.
pub fn encode_size(id: &str, payload: &[u8]) -> usize {
    2 * LENGTH_SIZE + id.len() + payload.len()
}

/// Writes one frame to `buf`.
pub fn write(buf: &mut impl BufMut, id: &str, payload: &[u8]) {
    buf.put_u64_le(id.len() as u64);
    buf.put_slice(id.as_bytes());
    buf.put_u64_le(payload.len() as u64);
    buf.put_slice(payload);
}

/// Reads the identifier of frame `index`.
///
/// Identifiers that are not valid UTF-8 cannot have been registered, so they are reported
/// as [Error::UnknownType].
pub fn read_id(buf: &mut impl Buf, index: usize) -> Result<String, Error> {
    let len = read_length(buf, index, None, "identifier length")?;
    let raw = read_exact(buf, index, None, "identifier", len)?;
    String::from_utf8(raw.to_vec()).map_err(|err| Error::UnknownType {
        index,
        id: String::from_utf8_lossy(err.as_bytes()).into_owned(),
    })
}

/// Reads the payload of frame `index` (identified by `id`), enforcing [Config::max_payload].
pub fn read_payload(
    buf: &mut impl Buf,
    index: usize,
    id: &str,
    cfg: &Config,
) -> Result<Bytes, Error> {
    let len = read_length(buf, index, Some(id), "payload length")?;
    if let Some(max) = cfg.max_payload {
        if len > max {
            return Err(Error::LengthExceeded {
                index,
                id: id.to_string(),
                found: len,
                max,
            });
        }
    }
    read_exact(buf, index, Some(id), "payload", len)
}

fn read_length(
    buf: &mut impl Buf,
    index: usize,
    id: Option<&str>,
    field: &'static str,
) -> Result<u64, Error> {
    let remaining = buf.remaining();
    if remaining < LENGTH_SIZE {
        return Err(Error::TruncatedInput {
            index,
            id: id.map(str::to_string),
            field,
            needed: LENGTH_SIZE as u64,
            remaining,
        });
    }
    Ok(buf.get_u64_le())
}

fn read_exact(
    buf: &mut impl Buf,
    index: usize,
    id: Option<&str>,
    field: &'static str,
    len: u64,
) -> Result<Bytes, Error> {
    let remaining = buf.remaining();
    if (remaining as u64) < len {
        return Err(Error::TruncatedInput {
            index,
            id: id.map(str::to_string),
            field,
            needed: len,
            remaining,
        });
    }

    // `len` fits in `usize` because it does not exceed `remaining`.
    Ok(buf.copy_to_bytes(len as usize))
}
