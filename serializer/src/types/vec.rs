//! Serializer implementations for float vectors.
//!
//! A vector is written as its element count (`u64`, little-endian) followed by each element
//! in little-endian IEEE-754. The count is checked against the remaining payload before
//! anything is allocated, so a corrupt count cannot trigger an oversized allocation.

use crate::{
    util::{at_least, exhausted},
    Deserialize, Error, Serialize,
};
use bytes::{Buf, BufMut, Bytes, BytesMut};

/// Size of the element count.
const COUNT_SIZE: usize = std::mem::size_of::<u64>();

macro_rules! impl_float_slice {
    ($(#[$doc:meta])* $name:ident, $type:ty, $id:literal, $get:ident, $put:ident) => {
        $(#[$doc])*
        #[derive(Clone, Debug, Default, PartialEq)]
        pub struct $name(pub Vec<$type>);

        impl Serialize for $name {
            fn serializer_type(&self) -> &'static str {
                Self::SERIALIZER_TYPE
            }

            fn serialize(&self) -> Result<Bytes, Error> {
                let width = std::mem::size_of::<$type>();
                let mut buf = BytesMut::with_capacity(COUNT_SIZE + self.0.len() * width);
                buf.put_u64_le(self.0.len() as u64);
                for value in &self.0 {
                    buf.$put(*value);
                }
                Ok(buf.freeze())
            }
        }

        impl Deserialize for $name {
            const SERIALIZER_TYPE: &'static str = $id;

            fn deserialize(mut payload: Bytes) -> Result<Self, Error> {
                at_least(&payload, COUNT_SIZE)?;
                let count = payload.get_u64_le();
                let width = std::mem::size_of::<$type>() as u64;
                match count.checked_mul(width) {
                    Some(len) if len <= payload.remaining() as u64 => {}
                    _ => return Err(Error::EndOfBuffer),
                }

                // `count` fits in `usize` because the elements fit in the payload.
                let mut values = Vec::with_capacity(count as usize);
                for _ in 0..count {
                    values.push(payload.$get());
                }
                exhausted(&payload)?;
                Ok(Self(values))
            }
        }

        impl From<Vec<$type>> for $name {
            fn from(value: Vec<$type>) -> Self {
                Self(value)
            }
        }
    };
}

impl_float_slice!(
    /// A vector of 64-bit floats.
    Float64Slice,
    f64,
    "[]float64",
    get_f64_le,
    put_f64_le
);

impl_float_slice!(
    /// A vector of 32-bit floats.
    Float32Slice,
    f32,
    "[]float32",
    get_f32_le,
    put_f32_le
);
