#![no_main]

use bytes::Bytes;
use commonware_serializer::{
    registry,
    types::{primitives::Int, vec::Float64Slice},
    Config,
};
use libfuzzer_sys::fuzz_target;

// Arbitrary input must never panic, only return errors.
fuzz_target!(|data: &[u8]| {
    let buf = Bytes::copy_from_slice(data);
    let _ = registry().deserialize_all(buf.clone(), &Config::default());
    let _ = registry().deserialize_with_type(buf.clone());

    let mut int = Int::default();
    let mut floats = Float64Slice::default();
    let _ = registry().deserialize_any_cfg(buf, &mut (&mut int, &mut floats), &Config::strict());
});
