#![no_main]

use arbitrary::Arbitrary;
use commonware_serializer::{
    registry, serialize_any,
    types::{
        bytes::Bytes,
        primitives::{Float64, Int},
        vec::{Float32Slice, Float64Slice},
    },
    Config, Serialize,
};
use libfuzzer_sys::fuzz_target;

#[derive(Arbitrary, Debug)]
enum Value {
    Bytes(Vec<u8>),
    Int(i64),
    Float64(f64),
    Float64Slice(Vec<f64>),
    Float32Slice(Vec<f32>),
}

impl Value {
    fn boxed(&self) -> Box<dyn Serialize> {
        match self {
            Value::Bytes(v) => Box::new(Bytes::from(v.clone())),
            Value::Int(v) => Box::new(Int(*v)),
            Value::Float64(v) => Box::new(Float64(*v)),
            Value::Float64Slice(v) => Box::new(Float64Slice(v.clone())),
            Value::Float32Slice(v) => Box::new(Float32Slice(v.clone())),
        }
    }

    fn check(&self, decoded: commonware_serializer::Decoded) {
        match self {
            Value::Bytes(v) => {
                let decoded = decoded.downcast::<Bytes>().expect("wrong type for []byte");
                assert_eq!(decoded.0, v[..]);
            }
            Value::Int(v) => {
                let decoded = decoded.downcast::<Int>().expect("wrong type for int");
                assert_eq!(decoded.0, *v);
            }
            Value::Float64(v) => {
                let decoded = decoded.downcast::<Float64>().expect("wrong type for float64");
                assert_eq!(decoded.0.to_bits(), v.to_bits());
            }
            Value::Float64Slice(v) => {
                let decoded = decoded
                    .downcast::<Float64Slice>()
                    .expect("wrong type for []float64");
                let expected: Vec<u64> = v.iter().map(|x| x.to_bits()).collect();
                let actual: Vec<u64> = decoded.0.iter().map(|x| x.to_bits()).collect();
                assert_eq!(actual, expected);
            }
            Value::Float32Slice(v) => {
                let decoded = decoded
                    .downcast::<Float32Slice>()
                    .expect("wrong type for []float32");
                let expected: Vec<u32> = v.iter().map(|x| x.to_bits()).collect();
                let actual: Vec<u32> = decoded.0.iter().map(|x| x.to_bits()).collect();
                assert_eq!(actual, expected);
            }
        }
    }
}

fuzz_target!(|values: Vec<Value>| {
    let boxed: Vec<Box<dyn Serialize>> = values.iter().map(Value::boxed).collect();
    let refs: Vec<&dyn Serialize> = boxed.iter().map(|value| value.as_ref()).collect();
    let encoded = serialize_any(&refs).expect("Failed to serialize primitives!");

    let decoded = registry()
        .deserialize_all(encoded, &Config::strict())
        .expect("Failed to decode a successfully encoded input!");
    assert_eq!(decoded.len(), values.len());
    for (value, decoded) in values.iter().zip(decoded) {
        value.check(decoded);
    }
});
