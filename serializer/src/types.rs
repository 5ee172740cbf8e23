//! Serializer implementations for common types.
//!
//! | Type | Identifier | Payload |
//! |---|---|---|
//! | [bytes::Bytes] | `[]byte` | the bytes themselves |
//! | [primitives::Int] | `int` | decimal ASCII text |
//! | [primitives::Float64] | `float64` | 8 bytes, little-endian IEEE-754 |
//! | [vec::Float64Slice] | `[]float64` | `u64` count, then 8-byte little-endian elements |
//! | [vec::Float32Slice] | `[]float32` | `u64` count, then 4-byte little-endian elements |

use crate::Registry;

pub mod bytes;
pub mod primitives;
pub mod vec;

/// Registers every type in this module with `registry`.
pub fn register_all(registry: &Registry) {
    registry.register::<bytes::Bytes>();
    registry.register::<primitives::Int>();
    registry.register::<primitives::Float64>();
    registry.register::<vec::Float64Slice>();
    registry.register::<vec::Float32Slice>();
}
