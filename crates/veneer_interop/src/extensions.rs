//! Type-keyed values attached to a set of bindings by its modules.

use core::any::{Any, TypeId};
use hashbrown::HashMap;

/// Storage for one value per type.
///
/// Modules insert values while building; once the bindings are frozen the
/// values are read-only.
#[derive(Default)]
pub struct Extensions {
    storage: HashMap<TypeId, Box<dyn Any + Send + Sync>>,
}

impl Extensions {
    /// Creates empty storage.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a value, returning the one it replaced.
    pub fn insert<T: Send + Sync + 'static>(&mut self, value: T) -> Option<T> {
        self.storage
            .insert(TypeId::of::<T>(), Box::new(value))
            .and_then(|old| old.downcast::<T>().ok())
            .map(|old| *old)
    }

    /// Returns the value of type `T`, if present.
    #[must_use]
    pub fn get<T: Send + Sync + 'static>(&self) -> Option<&T> {
        self.storage
            .get(&TypeId::of::<T>())
            .and_then(|boxed| boxed.downcast_ref::<T>())
    }

    /// Returns the value of type `T` mutably, if present.
    pub fn get_mut<T: Send + Sync + 'static>(&mut self) -> Option<&mut T> {
        self.storage
            .get_mut(&TypeId::of::<T>())
            .and_then(|boxed| boxed.downcast_mut::<T>())
    }

    /// Returns whether a value of type `T` is present.
    #[must_use]
    pub fn contains<T: Send + Sync + 'static>(&self) -> bool {
        self.storage.contains_key(&TypeId::of::<T>())
    }

    /// Removes and returns the value of type `T`.
    pub fn remove<T: Send + Sync + 'static>(&mut self) -> Option<T> {
        self.storage
            .remove(&TypeId::of::<T>())
            .and_then(|old| old.downcast::<T>().ok())
            .map(|old| *old)
    }

    /// Number of stored values.
    #[must_use]
    pub fn len(&self) -> usize {
        self.storage.len()
    }

    /// Returns whether nothing is stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.storage.is_empty()
    }
}

impl core::fmt::Debug for Extensions {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Extensions")
            .field("len", &self.storage.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, PartialEq)]
    struct Precision(u32);

    #[test]
    fn insert_replaces_and_returns_previous() {
        let mut ext = Extensions::new();
        assert!(ext.insert(Precision(3)).is_none());
        assert_eq!(ext.insert(Precision(5)), Some(Precision(3)));
        assert_eq!(ext.get::<Precision>(), Some(&Precision(5)));
        assert_eq!(ext.len(), 1);
    }

    #[test]
    fn get_mut_and_remove() {
        let mut ext = Extensions::new();
        ext.insert(Precision(1));
        if let Some(p) = ext.get_mut::<Precision>() {
            p.0 = 9;
        }
        assert_eq!(ext.remove::<Precision>(), Some(Precision(9)));
        assert!(!ext.contains::<Precision>());
        assert!(ext.is_empty());
    }
}
