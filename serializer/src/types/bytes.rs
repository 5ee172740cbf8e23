//! Serializer implementation for raw bytes.
//!
//! The payload is the bytes themselves, with no extra framing.

use crate::{Deserialize, Error, Serialize};

/// Raw bytes.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Bytes(pub bytes::Bytes);

impl Serialize for Bytes {
    fn serializer_type(&self) -> &'static str {
        Self::SERIALIZER_TYPE
    }

    fn serialize(&self) -> Result<bytes::Bytes, Error> {
        Ok(self.0.clone())
    }
}

impl Deserialize for Bytes {
    const SERIALIZER_TYPE: &'static str = "[]byte";

    fn deserialize(payload: bytes::Bytes) -> Result<Self, Error> {
        Ok(Self(payload))
    }
}

impl From<bytes::Bytes> for Bytes {
    fn from(value: bytes::Bytes) -> Self {
        Self(value)
    }
}

impl From<Vec<u8>> for Bytes {
    fn from(value: Vec<u8>) -> Self {
        Self(value.into())
    }
}

impl From<&'static [u8]> for Bytes {
    fn from(value: &'static [u8]) -> Self {
        Self(bytes::Bytes::from_static(value))
    }
}

impl AsRef<[u8]> for Bytes {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}
