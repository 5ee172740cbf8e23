//! Core serializer traits and output slots

use crate::error::Error;
use bytes::Bytes;
use paste::paste;
use std::{
    any::{type_name, Any, TypeId},
    fmt,
};

/// Trait for values that can be written into a frame.
///
/// This trait is object safe so that heterogeneous values can be passed to
/// [crate::serialize_any] as `&dyn Serialize`.
pub trait Serialize {
    /// Returns the identifier written ahead of the payload.
    ///
    /// This MUST be constant for a type, non-empty, and unique among all registered types.
    fn serializer_type(&self) -> &'static str;

    /// Encodes the payload of this value (without its identifier).
    fn serialize(&self) -> Result<Bytes, Error>;
}

/// Trait for types that can be reconstructed from a payload.
///
/// The decoder is an associated function (no instance is needed to decode) and is invoked
/// by the [crate::Registry], never by the type itself.
pub trait Deserialize: Sized + Send + 'static {
    /// The identifier this type is registered under.
    const SERIALIZER_TYPE: &'static str;

    /// Decodes a value from its payload.
    fn deserialize(payload: Bytes) -> Result<Self, Error>;
}

/// Trait for types that can be serialized and deserialized.
pub trait Serializer: Serialize + Deserialize {}

/// Automatically implement `Serializer` for types that implement `Serialize` and `Deserialize`.
impl<T: Serialize + Deserialize> Serializer for T {}

/// The Rust type produced by a decoder or accepted by a [Slot].
///
/// Two tokens are equal if and only if they refer to the same type.
#[derive(Clone, Copy)]
pub struct Token {
    id: TypeId,
    name: &'static str,
}

impl Token {
    /// Returns the token for `T`.
    pub fn of<T: 'static>() -> Self {
        Self {
            id: TypeId::of::<T>(),
            name: type_name::<T>(),
        }
    }

    /// Returns the name of the type (for diagnostics only).
    pub fn name(&self) -> &'static str {
        self.name
    }
}

impl PartialEq for Token {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Token {}

impl fmt::Debug for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

/// A caller-supplied destination for one decoded value.
pub trait Slot {
    /// Returns the type this slot accepts.
    fn token(&self) -> Token;

    /// Stores `value` in the slot.
    ///
    /// Returns the value unchanged if it is not of the accepted type.
    fn fill(&mut self, value: Box<dyn Any + Send>) -> Result<(), Box<dyn Any + Send>>;
}

impl<T: Deserialize> Slot for T {
    fn token(&self) -> Token {
        Token::of::<T>()
    }

    fn fill(&mut self, value: Box<dyn Any + Send>) -> Result<(), Box<dyn Any + Send>> {
        *self = *value.downcast::<T>()?;
        Ok(())
    }
}

/// An ordered list of [Slot]s to decode into.
///
/// Implemented for tuples of `&mut T` (up to 12 elements) and for slices, arrays, and
/// vectors of `&mut dyn Slot`.
pub trait Outputs {
    /// Returns the type accepted by the slot at `index`, or `None` past the last slot.
    fn token(&self, index: usize) -> Option<Token>;

    /// Stores `value` in the slot at `index`.
    ///
    /// Returns the value unchanged if there is no such slot or it is of the wrong type.
    fn fill(
        &mut self,
        index: usize,
        value: Box<dyn Any + Send>,
    ) -> Result<(), Box<dyn Any + Send>>;
}

impl Outputs for [&mut dyn Slot] {
    fn token(&self, index: usize) -> Option<Token> {
        self.get(index).map(|slot| slot.token())
    }

    fn fill(
        &mut self,
        index: usize,
        value: Box<dyn Any + Send>,
    ) -> Result<(), Box<dyn Any + Send>> {
        match self.get_mut(index) {
            Some(slot) => slot.fill(value),
            None => Err(value),
        }
    }
}

impl<const N: usize> Outputs for [&mut dyn Slot; N] {
    fn token(&self, index: usize) -> Option<Token> {
        Outputs::token(&self[..], index)
    }

    fn fill(
        &mut self,
        index: usize,
        value: Box<dyn Any + Send>,
    ) -> Result<(), Box<dyn Any + Send>> {
        Outputs::fill(&mut self[..], index, value)
    }
}

impl Outputs for Vec<&mut dyn Slot> {
    fn token(&self, index: usize) -> Option<Token> {
        Outputs::token(&self[..], index)
    }

    fn fill(
        &mut self,
        index: usize,
        value: Box<dyn Any + Send>,
    ) -> Result<(), Box<dyn Any + Send>> {
        Outputs::fill(&mut self[..], index, value)
    }
}

// Tuple implementation
macro_rules! impl_outputs_for_tuple {
    ($($index:tt),*) => {
        paste! {
            impl<$( [<T $index>]: Slot ),*> Outputs for ( $( &mut [<T $index>], )* ) {
                fn token(&self, index: usize) -> Option<Token> {
                    match index {
                        $( $index => Some(self.$index.token()), )*
                        _ => None,
                    }
                }

                fn fill(
                    &mut self,
                    index: usize,
                    value: Box<dyn Any + Send>,
                ) -> Result<(), Box<dyn Any + Send>> {
                    match index {
                        $( $index => self.$index.fill(value), )*
                        _ => Err(value),
                    }
                }
            }
        }
    };
}

// Generate implementations for tuple sizes 1 through 12
impl_outputs_for_tuple!(0);
impl_outputs_for_tuple!(0, 1);
impl_outputs_for_tuple!(0, 1, 2);
impl_outputs_for_tuple!(0, 1, 2, 3);
impl_outputs_for_tuple!(0, 1, 2, 3, 4);
impl_outputs_for_tuple!(0, 1, 2, 3, 4, 5);
impl_outputs_for_tuple!(0, 1, 2, 3, 4, 5, 6);
impl_outputs_for_tuple!(0, 1, 2, 3, 4, 5, 6, 7);
impl_outputs_for_tuple!(0, 1, 2, 3, 4, 5, 6, 7, 8);
impl_outputs_for_tuple!(0, 1, 2, 3, 4, 5, 6, 7, 8, 9);
impl_outputs_for_tuple!(0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10);
impl_outputs_for_tuple!(0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{
        primitives::{Float64, Int},
        vec::Float64Slice,
    };

    #[test]
    fn test_token_equality() {
        assert_eq!(Token::of::<Int>(), Token::of::<Int>());
        assert_ne!(Token::of::<Int>(), Token::of::<Float64>());
        assert!(Token::of::<Int>().name().ends_with("Int"));
    }

    #[test]
    fn test_slot_fill() {
        let mut slot = Int::default();
        assert!(slot.fill(Box::new(Int(7))).is_ok());
        assert_eq!(slot, Int(7));

        // Wrong type is handed back untouched
        let rejected = slot.fill(Box::new(Float64(1.0))).unwrap_err();
        assert_eq!(*rejected.downcast::<Float64>().unwrap(), Float64(1.0));
        assert_eq!(slot, Int(7));
    }

    #[test]
    fn test_tuple_outputs() {
        let mut a = Int::default();
        let mut b = Float64Slice::default();
        let mut outputs = (&mut a, &mut b);
        assert_eq!(outputs.token(0), Some(Token::of::<Int>()));
        assert_eq!(outputs.token(1), Some(Token::of::<Float64Slice>()));
        assert_eq!(outputs.token(2), None);

        assert!(outputs.fill(0, Box::new(Int(-1))).is_ok());
        assert!(outputs.fill(1, Box::new(Int(-1))).is_err());
        assert!(outputs.fill(2, Box::new(Int(-1))).is_err());
        assert_eq!(a, Int(-1));
        assert!(b.0.is_empty());
    }

    #[test]
    fn test_slice_outputs() {
        let mut a = Int::default();
        let mut b = Float64::default();
        let mut outputs: Vec<&mut dyn Slot> = vec![&mut a, &mut b];
        assert_eq!(outputs.token(1), Some(Token::of::<Float64>()));
        assert_eq!(outputs.token(2), None);
        assert!(outputs.fill(1, Box::new(Float64(2.5))).is_ok());
        assert!(outputs.fill(2, Box::new(Float64(2.5))).is_err());
        drop(outputs);
        assert_eq!(b, Float64(2.5));
    }

    #[test]
    fn test_array_outputs() {
        let mut a = Int::default();
        let mut b = Float64Slice::default();
        let mut outputs: [&mut dyn Slot; 2] = [&mut a, &mut b];
        assert_eq!(outputs.token(0), Some(Token::of::<Int>()));
        assert_eq!(outputs.token(2), None);
        assert!(outputs.fill(0, Box::new(Int(3))).is_ok());
        assert!(outputs.fill(1, Box::new(Int(3))).is_err());
        assert!(outputs.fill(1, Box::new(Float64Slice(vec![1.5]))).is_ok());
        assert!(outputs.fill(2, Box::new(Int(3))).is_err());
        assert_eq!(a, Int(3));
        assert_eq!(b, Float64Slice(vec![1.5]));
    }
}
