//! Core [`Component`] trait and its type-erased counterpart.
//!
//! Every piece of data stored in the [`World`](crate::World) or recorded in a
//! [`Stamp`](crate::Stamp) must implement [`Component`]. The trait requires
//! `Clone` so that stamps (and the blueprints that carry them) can be deep
//! copied, and `Serialize` so that entity contents can be dumped for
//! inspection.
//!
//! ## Type Identity
//!
//! [`ComponentTypeId`] is derived from the component's **string name** using
//! the FNV-1a 64-bit hash algorithm, so the same name always produces the same
//! identifier regardless of build or platform.

use std::any::Any;

use serde::{Deserialize, Serialize};

/// A unique identifier for a component type, derived from its string name
/// using the FNV-1a 64-bit hash algorithm.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, PartialOrd, Ord)]
pub struct ComponentTypeId(pub u64);

impl ComponentTypeId {
    /// FNV-1a 64-bit offset basis.
    const FNV_OFFSET_BASIS: u64 = 0xcbf2_9ce4_8422_2325;

    /// FNV-1a 64-bit prime.
    const FNV_PRIME: u64 = 0x0100_0000_01b3;

    /// Compute the [`ComponentTypeId`] from a component's string name.
    ///
    /// # Algorithm (FNV-1a 64-bit)
    ///
    /// ```text
    /// hash = 0xcbf29ce484222325          (offset basis)
    /// for each byte in name.as_bytes():
    ///     hash = hash XOR byte
    ///     hash = hash * 0x00000100000001b3  (prime)
    /// return hash
    /// ```
    #[must_use]
    pub const fn from_name(name: &str) -> Self {
        let bytes = name.as_bytes();
        let mut hash = Self::FNV_OFFSET_BASIS;
        let mut i = 0;
        while i < bytes.len() {
            hash ^= bytes[i] as u64;
            hash = hash.wrapping_mul(Self::FNV_PRIME);
            i += 1;
        }
        Self(hash)
    }

    /// Compute the [`ComponentTypeId`] for a Rust component type `T`.
    #[must_use]
    pub fn of<T: Component>() -> Self {
        Self::from_name(T::type_name())
    }
}

/// The core component trait.
///
/// # Examples
///
/// ```rust
/// use serde::{Serialize, Deserialize};
/// use engine_component::Component;
///
/// #[derive(Debug, Clone, Serialize, Deserialize)]
/// struct Health {
///     current: f32,
///     max: f32,
/// }
///
/// impl Component for Health {
///     fn type_name() -> &'static str { "Health" }
/// }
/// ```
pub trait Component:
    Clone + Send + Sync + 'static + Serialize + for<'de> Deserialize<'de>
{
    /// A human-readable name for this component type.
    fn type_name() -> &'static str;

    /// Returns the [`ComponentTypeId`] for this component.
    fn component_type_id() -> ComponentTypeId {
        ComponentTypeId::from_name(Self::type_name())
    }
}

/// Object-safe view of a [`Component`] value.
///
/// Implemented for every [`Component`]; lets the store and stamps hold
/// heterogeneous component values behind `Box<dyn ErasedComponent>`.
pub trait ErasedComponent: Send + Sync {
    /// The identifier of the concrete component type.
    fn id(&self) -> ComponentTypeId;

    /// The name of the concrete component type.
    fn name(&self) -> &'static str;

    /// Deep copy into a new heap allocation.
    fn clone_box(&self) -> Box<dyn ErasedComponent>;

    /// Downcasting support.
    fn as_any(&self) -> &dyn Any;

    /// Serialise the value to JSON.
    fn to_json(&self) -> serde_json::Result<serde_json::Value>;
}

impl<T: Component> ErasedComponent for T {
    fn id(&self) -> ComponentTypeId {
        T::component_type_id()
    }

    fn name(&self) -> &'static str {
        T::type_name()
    }

    fn clone_box(&self) -> Box<dyn ErasedComponent> {
        Box::new(self.clone())
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn to_json(&self) -> serde_json::Result<serde_json::Value> {
        serde_json::to_value(self)
    }
}

impl Clone for Box<dyn ErasedComponent> {
    fn clone(&self) -> Self {
        self.clone_box()
    }
}

impl std::fmt::Debug for dyn ErasedComponent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("ErasedComponent")
            .field(&self.name())
            .finish()
    }
}
