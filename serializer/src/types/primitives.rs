//! Serializer implementations for scalar types.
//!
//! # Encodings
//!
//! [Int] is written as decimal ASCII text (not fixed-width), so small values produce small
//! payloads. [Float64] is written as 8 little-endian bytes, so every value (including NaN
//! payloads, infinities, and `-0.0`) survives a round trip bit-for-bit.

use crate::{
    util::{at_least, exhausted},
    Deserialize, Error, Serialize,
};
use bytes::{Buf, BufMut, Bytes, BytesMut};

/// A signed integer.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Int(pub i64);

impl Serialize for Int {
    fn serializer_type(&self) -> &'static str {
        Self::SERIALIZER_TYPE
    }

    fn serialize(&self) -> Result<Bytes, Error> {
        Ok(Bytes::from(self.0.to_string()))
    }
}

impl Deserialize for Int {
    const SERIALIZER_TYPE: &'static str = "int";

    fn deserialize(payload: Bytes) -> Result<Self, Error> {
        let text = std::str::from_utf8(&payload)
            .map_err(|err| Error::InvalidData("int", err.to_string()))?;
        let value = text
            .parse::<i64>()
            .map_err(|err| Error::InvalidData("int", format!("{err}: {text:?}")))?;
        Ok(Self(value))
    }
}

impl From<i64> for Int {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

/// A 64-bit float.
#[derive(Clone, Copy, Debug, Default, PartialEq, PartialOrd)]
pub struct Float64(pub f64);

impl Serialize for Float64 {
    fn serializer_type(&self) -> &'static str {
        Self::SERIALIZER_TYPE
    }

    fn serialize(&self) -> Result<Bytes, Error> {
        let mut buf = BytesMut::with_capacity(std::mem::size_of::<f64>());
        buf.put_f64_le(self.0);
        Ok(buf.freeze())
    }
}

impl Deserialize for Float64 {
    const SERIALIZER_TYPE: &'static str = "float64";

    fn deserialize(mut payload: Bytes) -> Result<Self, Error> {
        at_least(&payload, std::mem::size_of::<f64>())?;
        let value = payload.get_f64_le();
        exhausted(&payload)?;
        Ok(Self(value))
    }
}

impl From<f64> for Float64 {
    fn from(value: f64) -> Self {
        Self(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case(0; "zero")]
    #[test_case(1337; "positive")]
    #[test_case(-(1 << 30); "negative")]
    #[test_case(i64::MAX; "max")]
    #[test_case(i64::MIN; "min")]
    fn test_int(value: i64) {
        let encoded = Int(value).serialize().unwrap();
        assert_eq!(encoded, value.to_string().as_bytes());
        assert_eq!(Int::deserialize(encoded).unwrap(), Int(value));
    }

    #[test_case(b""; "empty")]
    #[test_case(b"12a"; "trailing garbage")]
    #[test_case(b" 1"; "leading space")]
    #[test_case(b"1.5"; "fraction")]
    #[test_case(b"9223372036854775808"; "overflow")]
    #[test_case(b"\xff"; "not utf8")]
    fn test_int_invalid(payload: &'static [u8]) {
        assert!(matches!(
            Int::deserialize(Bytes::from_static(payload)),
            Err(Error::InvalidData("int", _))
        ));
    }

    #[test_case(0.0; "zero")]
    #[test_case(-0.0; "negative zero")]
    #[test_case(3.1415; "pi")]
    #[test_case(-5.15e20; "large negative")]
    #[test_case(f64::MAX; "max")]
    #[test_case(f64::MIN_POSITIVE; "min positive")]
    #[test_case(f64::INFINITY; "infinity")]
    #[test_case(f64::NAN; "nan")]
    fn test_float64(value: f64) {
        let encoded = Float64(value).serialize().unwrap();
        assert_eq!(encoded, &value.to_le_bytes()[..]);
        let decoded = Float64::deserialize(encoded).unwrap();
        assert_eq!(decoded.0.to_bits(), value.to_bits());
    }

    #[test]
    fn test_float64_invalid_length() {
        assert!(matches!(
            Float64::deserialize(Bytes::from_static(&[0; 7])),
            Err(Error::EndOfBuffer)
        ));
        assert!(matches!(
            Float64::deserialize(Bytes::from_static(&[0; 9])),
            Err(Error::ExtraData(1))
        ));
    }

    #[test]
    fn test_identifiers() {
        assert_eq!(Int::default().serializer_type(), "int");
        assert_eq!(Float64::default().serializer_type(), "float64");
    }
}
