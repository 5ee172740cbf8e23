//! Serialize heterogeneous sequences of self-describing values.
//!
//! # Overview
//!
//! Any type can become serializable by implementing [Serialize] (a type identifier and a
//! payload encoder) and [Deserialize] (a payload decoder). A [Registry] maps each identifier
//! to its decoder, so new types can be added without touching the encoder or decoder.
//!
//! [serialize_any] writes a list of values as one byte string, tagging each with its
//! identifier. [deserialize_any] reads them back, in order, into caller-supplied slots,
//! checking that each decoded value has the type its slot expects.
//!
//! # Format
//!
//! Little-endian throughout:
//!
//! ```text
//! Sequence  := Frame*
//! Frame     := IDLen(u64) ID(bytes[IDLen]) PayloadLen(u64) Payload(bytes[PayloadLen])
//! ```
//!
//! # Registries
//!
//! The free functions in this crate use a process-wide [registry()], created on first use
//! with every type in [types] already registered. Additional types should be registered
//! during initialization, before decoding starts on other threads (registration is
//! synchronized regardless). Tests and embedders that need isolation can create their own
//! [Registry] and call its methods directly.
//!
//! # Example
//!
//! ```
//! use commonware_serializer::{
//!     deserialize_any, serialize_any,
//!     types::{primitives::Int, vec::Float64Slice},
//!     Serialize,
//! };
//!
//! let values: [&dyn Serialize; 2] = [&Int(1337), &Float64Slice(vec![1.0, 0.5])];
//! let encoded = serialize_any(&values).unwrap();
//!
//! let mut int = Int::default();
//! let mut floats = Float64Slice::default();
//! deserialize_any(encoded, &mut (&mut int, &mut floats)).unwrap();
//! assert_eq!(int, Int(1337));
//! assert_eq!(floats, Float64Slice(vec![1.0, 0.5]));
//! ```
//!
//! # Example (Custom Type)
//!
//! ```
//! use bytes::{BufMut, Bytes, BytesMut};
//! use commonware_serializer::{
//!     deserialize_any, register, serialize_any, Deserialize, Error, Serialize,
//! };
//!
//! #[derive(Debug, Default, PartialEq)]
//! struct Flag(bool);
//!
//! impl Serialize for Flag {
//!     fn serializer_type(&self) -> &'static str {
//!         Self::SERIALIZER_TYPE
//!     }
//!
//!     fn serialize(&self) -> Result<Bytes, Error> {
//!         let mut buf = BytesMut::with_capacity(1);
//!         buf.put_u8(self.0 as u8);
//!         Ok(buf.freeze())
//!     }
//! }
//!
//! impl Deserialize for Flag {
//!     const SERIALIZER_TYPE: &'static str = "flag";
//!
//!     fn deserialize(payload: Bytes) -> Result<Self, Error> {
//!         match &payload[..] {
//!             [0] => Ok(Self(false)),
//!             [1] => Ok(Self(true)),
//!             _ => Err(Error::InvalidData("flag", "expected 0 or 1".into())),
//!         }
//!     }
//! }
//!
//! register::<Flag>();
//!
//! let values: [&dyn Serialize; 1] = [&Flag(true)];
//! let encoded = serialize_any(&values).unwrap();
//! let mut flag = Flag::default();
//! deserialize_any(encoded, &mut (&mut flag,)).unwrap();
//! assert_eq!(flag, Flag(true));
//! ```

use bytes::{Buf, Bytes};
use std::sync::LazyLock;

pub mod codec;
pub mod config;
pub mod error;
pub mod frame;
pub mod registry;
pub mod sequence;
pub mod types;
pub mod util;

// Re-export main types and traits
pub use codec::{Deserialize, Outputs, Serialize, Serializer, Slot, Token};
pub use config::Config;
pub use error::Error;
pub use registry::{Decoder, Registry};
pub use sequence::{serialize_any, serialize_with_type, Decoded};

static REGISTRY: LazyLock<Registry> = LazyLock::new(Registry::with_primitives);

/// Returns the process-wide registry.
pub fn registry() -> &'static Registry {
    &REGISTRY
}

/// Registers `T` with the process-wide registry.
pub fn register<T: Deserialize>() {
    registry().register::<T>();
}

/// Registers `decoder` under `id` with the process-wide registry.
pub fn register_decoder<T, F>(id: impl Into<String>, decoder: F)
where
    T: Send + 'static,
    F: Fn(Bytes) -> Result<T, Error> + Send + Sync + 'static,
{
    registry().register_decoder(id, decoder);
}

/// Decodes one frame per slot of `outputs` using the process-wide registry.
pub fn deserialize_any<O: Outputs + ?Sized>(buf: impl Buf, outputs: &mut O) -> Result<(), Error> {
    registry().deserialize_any(buf, outputs)
}

/// Decodes one frame per slot of `outputs` using the process-wide registry and `cfg`.
pub fn deserialize_any_cfg<O: Outputs + ?Sized>(
    buf: impl Buf,
    outputs: &mut O,
    cfg: &Config,
) -> Result<(), Error> {
    registry().deserialize_any_cfg(buf, outputs, cfg)
}

/// Decodes a single-frame sequence using the process-wide registry.
pub fn deserialize_with_type(buf: impl Buf) -> Result<Decoded, Error> {
    registry().deserialize_with_type(buf)
}

/// Decodes every frame in `buf` using the process-wide registry.
pub fn deserialize_all(buf: impl Buf, cfg: &Config) -> Result<Vec<Decoded>, Error> {
    registry().deserialize_all(buf, cfg)
}
