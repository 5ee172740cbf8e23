//! Encoding and decoding of heterogeneous sequences.
//!
//! A sequence is the concatenation of one [crate::frame] per value, in input order.
//! Decoding walks the frames from the start of the buffer, resolves each identifier in a
//! [Registry], and writes the decoded value into the caller's [Outputs].
//!
//! Decoding is not transactional: if frame `i` fails, the slots before `i` have already been
//! filled.

use crate::{frame, Config, Error, Outputs, Registry, Serialize, Token};
use bytes::{Buf, Bytes, BytesMut};
use std::any::Any;

/// Encodes `values` into a single sequence.
///
/// Fails only if a value fails to serialize.
pub fn serialize_any(values: &[&dyn Serialize]) -> Result<Bytes, Error> {
    let mut buf = BytesMut::new();
    for (index, value) in values.iter().enumerate() {
        let id = value.serializer_type();
        let payload = value.serialize().map_err(|source| Error::Serialize {
            index,
            id,
            source: Box::new(source),
        })?;
        buf.reserve(frame::encode_size(id, &payload));
        frame::write(&mut buf, id, &payload);
    }
    Ok(buf.freeze())
}

/// Encodes a single value as a one-frame sequence.
pub fn serialize_with_type(value: &dyn Serialize) -> Result<Bytes, Error> {
    serialize_any(&[value])
}

/// A value decoded without a caller-supplied slot.
pub struct Decoded {
    index: usize,
    id: String,
    token: Token,
    value: Box<dyn Any + Send>,
}

impl Decoded {
    /// Returns the identifier of the frame this value was decoded from.
    pub fn serializer_type(&self) -> &str {
        &self.id
    }

    /// Returns the type of the decoded value.
    pub fn token(&self) -> Token {
        self.token
    }

    /// Returns whether the decoded value is a `T`.
    pub fn is<T: 'static>(&self) -> bool {
        self.token == Token::of::<T>()
    }

    /// Returns the decoded value as a `T`.
    pub fn downcast<T: 'static>(self) -> Result<T, Error> {
        let index = self.index;
        let found = self.token.name();
        self.value
            .downcast::<T>()
            .map(|value| *value)
            .map_err(|_| Error::TypeMismatch {
                index,
                expected: Token::of::<T>().name(),
                found,
            })
    }
}

impl std::fmt::Debug for Decoded {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Decoded")
            .field("index", &self.index)
            .field("id", &self.id)
            .field("token", &self.token)
            .finish()
    }
}

impl Registry {
    /// Decodes one frame per slot of `outputs` with the default [Config].
    ///
    /// See [Registry::deserialize_any_cfg].
    pub fn deserialize_any<O: Outputs + ?Sized>(
        &self,
        buf: impl Buf,
        outputs: &mut O,
    ) -> Result<(), Error> {
        self.deserialize_any_cfg(buf, outputs, &Config::default())
    }

    /// Decodes one frame per slot of `outputs`, in order.
    ///
    /// Frames beyond the last slot are left unread; they are an error only if
    /// [Config::strict] is set. Running out of frames before the last slot is
    /// [Error::TruncatedInput].
    pub fn deserialize_any_cfg<O: Outputs + ?Sized>(
        &self,
        mut buf: impl Buf,
        outputs: &mut O,
        cfg: &Config,
    ) -> Result<(), Error> {
        let mut index = 0;
        while let Some(expected) = outputs.token(index) {
            let decoded = self.read_frame(&mut buf, index, cfg)?;
            let found = decoded.token.name();
            let mismatch = || Error::TypeMismatch {
                index,
                expected: expected.name(),
                found,
            };
            if decoded.token != expected {
                return Err(mismatch());
            }
            outputs.fill(index, decoded.value).map_err(|_| mismatch())?;
            index += 1;
        }

        if cfg.strict && buf.has_remaining() {
            return Err(Error::ExtraData(buf.remaining()));
        }
        Ok(())
    }

    /// Decodes a sequence produced by [serialize_with_type].
    ///
    /// The buffer must contain exactly one frame.
    pub fn deserialize_with_type(&self, mut buf: impl Buf) -> Result<Decoded, Error> {
        let decoded = self.read_frame(&mut buf, 0, &Config::default())?;
        if buf.has_remaining() {
            return Err(Error::ExtraData(buf.remaining()));
        }
        Ok(decoded)
    }

    /// Decodes every frame in `buf`, without knowing their number or types in advance.
    pub fn deserialize_all(
        &self,
        mut buf: impl Buf,
        cfg: &Config,
    ) -> Result<Vec<Decoded>, Error> {
        let mut values = Vec::new();
        while buf.has_remaining() {
            values.push(self.read_frame(&mut buf, values.len(), cfg)?);
        }
        Ok(values)
    }

    fn read_frame(
        &self,
        buf: &mut impl Buf,
        index: usize,
        cfg: &Config,
    ) -> Result<Decoded, Error> {
        let id = frame::read_id(buf, index)?;
        let decoder = self.lookup(&id).ok_or_else(|| Error::UnknownType {
            index,
            id: id.clone(),
        })?;
        let payload = frame::read_payload(buf, index, &id, cfg)?;
        let value = decoder.decode(payload).map_err(|source| Error::Decode {
            index,
            id: id.clone(),
            source: Box::new(source),
        })?;
        Ok(Decoded {
            index,
            id,
            token: decoder.token(),
            value,
        })
    }
}
