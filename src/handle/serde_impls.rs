//! Optional serde integration (`feature = "serde"`).
//!
//! A handle serializes like `Option<&T>`: the referent by value when
//! non-empty, a unit `None` when empty. Deserialization cannot reconstruct a
//! storage strategy, so it always produces an empty or an owned handle.

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::uniform::UniformHandle;

impl<T: ?Sized + Serialize> Serialize for UniformHandle<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.as_ref().serialize(serializer)
    }
}

impl<'de, T: Deserialize<'de> + 'static> Deserialize<'de> for UniformHandle<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(match Option::<T>::deserialize(deserializer)? {
            Some(value) => UniformHandle::owned(value),
            None => UniformHandle::empty(),
        })
    }
}
