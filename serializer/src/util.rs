//! Buffer helpers shared by frame and payload decoding.

use crate::Error;
use bytes::Buf;

/// Checks that at least `len` bytes remain in `buf`.
#[inline]
pub fn at_least<B: Buf>(buf: &B, len: usize) -> Result<(), Error> {
    if buf.remaining() < len {
        return Err(Error::EndOfBuffer);
    }
    Ok(())
}

/// Checks that `buf` has been fully consumed.
#[inline]
pub fn exhausted<B: Buf>(buf: &B) -> Result<(), Error> {
    match buf.remaining() {
        0 => Ok(()),
        n => Err(Error::ExtraData(n)),
    }
}
