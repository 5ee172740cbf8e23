//! Mapping from type identifiers to decoders.
//!
//! A [Registry] is written during initialization (possibly by several independent modules,
//! in any order) and read concurrently afterwards. Writes are linearized by a lock and
//! decoders are handed out as shared handles, so a reader never observes a partially
//! inserted entry and never runs a decoder while holding the lock.

use crate::{types, Deserialize, Error, Token};
use bytes::Bytes;
use std::{
    any::Any,
    collections::HashMap,
    fmt,
    sync::{Arc, PoisonError, RwLock},
};
use tracing::{debug, warn};

type DecodeFn = dyn Fn(Bytes) -> Result<Box<dyn Any + Send>, Error> + Send + Sync;

/// A registered decoder and the type it produces.
#[derive(Clone)]
pub struct Decoder {
    token: Token,
    decode: Arc<DecodeFn>,
}

impl Decoder {
    fn new<T, F>(decode: F) -> Self
    where
        T: Send + 'static,
        F: Fn(Bytes) -> Result<T, Error> + Send + Sync + 'static,
    {
        Self {
            token: Token::of::<T>(),
            decode: Arc::new(move |payload| {
                decode(payload).map(|value| Box::new(value) as Box<dyn Any + Send>)
            }),
        }
    }

    /// Returns the type produced by this decoder.
    pub fn token(&self) -> Token {
        self.token
    }

    /// Decodes a payload into a boxed value of type [Decoder::token].
    pub fn decode(&self, payload: Bytes) -> Result<Box<dyn Any + Send>, Error> {
        (self.decode)(payload)
    }
}

impl fmt::Debug for Decoder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Decoder")
            .field("token", &self.token)
            .finish()
    }
}

/// A thread-safe table from type identifier to [Decoder].
#[derive(Default)]
pub struct Registry {
    decoders: RwLock<HashMap<String, Decoder>>,
}

impl Registry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a registry containing every type in [crate::types].
    pub fn with_primitives() -> Self {
        let registry = Self::new();
        types::register_all(&registry);
        registry
    }

    /// Registers `T` under [Deserialize::SERIALIZER_TYPE].
    pub fn register<T: Deserialize>(&self) {
        self.register_decoder(T::SERIALIZER_TYPE, T::deserialize);
    }

    /// Registers `decoder` under `id`.
    ///
    /// If `id` is already registered, the previous decoder is replaced (and a warning is
    /// logged). Replacing a decoder does not affect decodes already in progress.
    pub fn register_decoder<T, F>(&self, id: impl Into<String>, decoder: F)
    where
        T: Send + 'static,
        F: Fn(Bytes) -> Result<T, Error> + Send + Sync + 'static,
    {
        let id = id.into();
        let decoder = Decoder::new(decoder);
        let token = decoder.token();
        let previous = self
            .decoders
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(id.clone(), decoder);
        match previous {
            Some(previous) => warn!(
                id = %id,
                previous = previous.token().name(),
                current = token.name(),
                "replaced registered decoder"
            ),
            None => debug!(id = %id, produces = token.name(), "registered decoder"),
        }
    }

    /// Returns the decoder registered under `id`, if any.
    pub fn lookup(&self, id: &str) -> Option<Decoder> {
        self.decoders
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(id)
            .cloned()
    }

    /// Returns whether `id` is registered.
    pub fn contains(&self, id: &str) -> bool {
        self.decoders
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .contains_key(id)
    }

    /// Returns the number of registered identifiers.
    pub fn len(&self) -> usize {
        self.decoders
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Returns whether no identifiers are registered.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns all registered identifiers, sorted.
    pub fn identifiers(&self) -> Vec<String> {
        let mut ids: Vec<String> = self
            .decoders
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .keys()
            .cloned()
            .collect();
        ids.sort();
        ids
    }
}

impl fmt::Debug for Registry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registry")
            .field("identifiers", &self.identifiers())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{
        bytes::Bytes as RawBytes,
        primitives::{Float64, Int},
        vec::{Float32Slice, Float64Slice},
    };
    use std::{sync::Barrier, thread};

    #[test]
    fn test_empty() {
        let registry = Registry::new();
        assert!(registry.is_empty());
        assert!(registry.lookup("int").is_none());
        assert!(!registry.contains("int"));
    }

    #[test]
    fn test_with_primitives() {
        let registry = Registry::with_primitives();
        assert_eq!(
            registry.identifiers(),
            vec!["[]byte", "[]float32", "[]float64", "float64", "int"]
        );
        assert_eq!(
            registry.lookup("int").unwrap().token(),
            Token::of::<Int>()
        );
        assert_eq!(
            registry.lookup("[]byte").unwrap().token(),
            Token::of::<RawBytes>()
        );
        assert_eq!(
            registry.lookup("float64").unwrap().token(),
            Token::of::<Float64>()
        );
        assert_eq!(
            registry.lookup("[]float64").unwrap().token(),
            Token::of::<Float64Slice>()
        );
        assert_eq!(
            registry.lookup("[]float32").unwrap().token(),
            Token::of::<Float32Slice>()
        );
    }

    #[test]
    fn test_decode() {
        let registry = Registry::with_primitives();
        let decoder = registry.lookup("int").unwrap();
        let value = decoder.decode(Bytes::from_static(b"-12")).unwrap();
        assert_eq!(*value.downcast::<Int>().unwrap(), Int(-12));

        assert!(matches!(
            decoder.decode(Bytes::from_static(b"twelve")),
            Err(Error::InvalidData("int", _))
        ));
    }

    #[test]
    fn test_register_idempotent() {
        let registry = Registry::with_primitives();
        let len = registry.len();
        registry.register::<Int>();
        registry.register::<Int>();
        assert_eq!(registry.len(), len);
        assert_eq!(
            registry.lookup("int").unwrap().token(),
            Token::of::<Int>()
        );
    }

    #[test]
    fn test_register_overwrite() {
        let _ = tracing_subscriber::fmt().with_test_writer().try_init();

        let registry = Registry::with_primitives();
        registry.register_decoder("int", |payload: Bytes| {
            Ok(Float64(payload.len() as f64))
        });
        let decoder = registry.lookup("int").unwrap();
        assert_eq!(decoder.token(), Token::of::<Float64>());
        let value = decoder.decode(Bytes::from_static(b"123")).unwrap();
        assert_eq!(*value.downcast::<Float64>().unwrap(), Float64(3.0));
    }

    #[test]
    fn test_register_alias() {
        let registry = Registry::new();
        registry.register_decoder("integer", Int::deserialize);
        registry.register::<Int>();
        assert_eq!(registry.identifiers(), vec!["int", "integer"]);
        assert_eq!(
            registry.lookup("integer").unwrap().token(),
            registry.lookup("int").unwrap().token()
        );
    }

    #[test]
    fn test_lookup_survives_overwrite() {
        let registry = Registry::with_primitives();
        let before = registry.lookup("int").unwrap();
        registry.register_decoder("int", |_: Bytes| Ok(Int(0)));

        // Handles obtained before the overwrite keep the old decoder
        let value = before.decode(Bytes::from_static(b"99")).unwrap();
        assert_eq!(*value.downcast::<Int>().unwrap(), Int(99));
    }

    #[test]
    fn test_concurrent_register_and_lookup() {
        const READERS: usize = 8;
        const WRITES: usize = 64;

        let registry = Arc::new(Registry::with_primitives());
        let barrier = Arc::new(Barrier::new(READERS + 1));

        let writer = {
            let registry = registry.clone();
            let barrier = barrier.clone();
            thread::spawn(move || {
                barrier.wait();
                for i in 0..WRITES {
                    registry.register_decoder(format!("custom-{i}"), Int::deserialize);
                }
            })
        };
        let readers: Vec<_> = (0..READERS)
            .map(|_| {
                let registry = registry.clone();
                let barrier = barrier.clone();
                thread::spawn(move || {
                    barrier.wait();
                    for i in 0..WRITES {
                        let decoder = registry.lookup("int").unwrap();
                        let value = decoder.decode(Bytes::from(i.to_string())).unwrap();
                        assert_eq!(*value.downcast::<Int>().unwrap(), Int(i as i64));

                        // Any visible custom entry must be complete
                        if let Some(decoder) = registry.lookup(&format!("custom-{i}")) {
                            assert_eq!(decoder.token(), Token::of::<Int>());
                        }
                    }
                })
            })
            .collect();

        writer.join().unwrap();
        for reader in readers {
            reader.join().unwrap();
        }
        assert_eq!(registry.len(), 5 + WRITES);
    }
}
