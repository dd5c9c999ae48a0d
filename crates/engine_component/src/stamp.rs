//! Component stamps.
//!
//! A [`Stamp`] records component values before any entity exists. The
//! [`World`](crate::World) later consumes it with
//! [`World::spawn`](crate::World::spawn) to create an entity pre-populated
//! with every recorded component.

use crate::component::{Component, ComponentTypeId, ErasedComponent};

/// An ordered record of component values, at most one per component type.
///
/// Recording a type that is already present replaces the earlier value in
/// place, so the recording order of the first write is kept.
#[derive(Debug, Clone, Default)]
pub struct Stamp {
    components: Vec<Box<dyn ErasedComponent>>,
}

impl Stamp {
    /// Create an empty stamp.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a component value, replacing any value of the same type.
    pub fn set<T: Component>(&mut self, value: T) {
        self.set_erased(Box::new(value));
    }

    /// Record a type-erased component value, replacing any value of the same
    /// type.
    pub fn set_erased(&mut self, value: Box<dyn ErasedComponent>) {
        let id = value.id();
        match self.components.iter_mut().find(|c| c.id() == id) {
            Some(slot) => *slot = value,
            None => self.components.push(value),
        }
    }

    /// Returns `true` if a component of type `T` has been recorded.
    #[must_use]
    pub fn has<T: Component>(&self) -> bool {
        self.contains(T::component_type_id())
    }

    /// Returns `true` if a component with the given type id has been recorded.
    #[must_use]
    pub fn contains(&self, id: ComponentTypeId) -> bool {
        self.components.iter().any(|c| c.id() == id)
    }

    /// Get the recorded value of type `T`, if any.
    #[must_use]
    pub fn get<T: Component>(&self) -> Option<&T> {
        self.components
            .iter()
            .find(|c| c.id() == T::component_type_id())?
            .as_any()
            .downcast_ref::<T>()
    }

    /// Names of the recorded components, in recording order.
    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.components.iter().map(|c| c.name())
    }

    /// Number of recorded components.
    #[must_use]
    pub fn len(&self) -> usize {
        self.components.len()
    }

    /// Returns `true` if nothing has been recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }

    /// Consume the stamp, yielding its values in recording order.
    pub fn into_components(self) -> impl Iterator<Item = Box<dyn ErasedComponent>> {
        self.components.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
    struct Speed(f32);

    impl Component for Speed {
        fn type_name() -> &'static str {
            "Speed"
        }
    }

    #[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
    struct Label(String);

    impl Component for Label {
        fn type_name() -> &'static str {
            "Label"
        }
    }

    #[test]
    fn test_set_preserves_recording_order() {
        let mut stamp = Stamp::new();
        stamp.set(Label("a".into()));
        stamp.set(Speed(1.0));
        assert_eq!(stamp.names().collect::<Vec<_>>(), vec!["Label", "Speed"]);
    }

    #[test]
    fn test_set_replaces_in_place() {
        let mut stamp = Stamp::new();
        stamp.set(Speed(1.0));
        stamp.set(Label("a".into()));
        stamp.set(Speed(2.0));

        assert_eq!(stamp.len(), 2);
        assert_eq!(stamp.get::<Speed>(), Some(&Speed(2.0)));
        assert_eq!(stamp.names().collect::<Vec<_>>(), vec!["Speed", "Label"]);
    }

    #[test]
    fn test_clone_is_independent() {
        let mut original = Stamp::new();
        original.set(Speed(1.0));
        let mut copy = original.clone();
        copy.set(Speed(9.0));

        assert_eq!(original.get::<Speed>(), Some(&Speed(1.0)));
        assert_eq!(copy.get::<Speed>(), Some(&Speed(9.0)));
    }

    #[test]
    fn test_empty_stamp() {
        let stamp = Stamp::new();
        assert!(stamp.is_empty());
        assert!(!stamp.has::<Speed>());
    }
}
