//! Registry locator
//!
//! A [`RegistryLocator`] is a flat snapshot of the registries of a model tree,
//! keyed by the identity of their owners. It is used when registries need to
//! be matched back to objects, e.g. while assembling a tree or when reporting.

use crate::error::Result;
use crate::model::{walk, ModelObject};
use crate::object_id::ObjectId;
use crate::parameters::ParamRegistry;

/// Ordered `(ObjectId, ParamRegistry)` pairs
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RegistryLocator {
    entries: Vec<(ObjectId, ParamRegistry)>,
}

impl RegistryLocator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, id: ObjectId, registry: ParamRegistry) {
        self.entries.push((id, registry));
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Find the registry of the object `id`
    ///
    /// Linear scan, first match. Returns the position of the entry and the
    /// registry, or `None` if no entry has that id.
    ///
    /// # Examples
    ///
    /// ```
    /// use modelparams_rs::{ObjectId, ParamRegistry, RegistryLocator};
    ///
    /// let id = ObjectId::new("model").child("utility");
    /// let mut locator = RegistryLocator::new();
    /// locator.push(ObjectId::new("model"), ParamRegistry::new(ObjectId::new("model")));
    /// locator.push(id.clone(), ParamRegistry::new(id.clone()));
    ///
    /// let (index, registry) = locator.find(&id).unwrap();
    /// assert_eq!(index, 1);
    /// assert_eq!(registry.owner(), &id);
    /// assert!(locator.find(&ObjectId::new("firm")).is_none());
    /// ```
    pub fn find(&self, id: &ObjectId) -> Option<(usize, &ParamRegistry)> {
        self.entries
            .iter()
            .enumerate()
            .find(|(_, (entry_id, _))| entry_id == id)
            .map(|(i, (_, registry))| (i, registry))
    }

    pub fn find_mut(&mut self, id: &ObjectId) -> Option<(usize, &mut ParamRegistry)> {
        self.entries
            .iter_mut()
            .enumerate()
            .find(|(_, (entry_id, _))| entry_id == id)
            .map(|(i, (_, registry))| (i, registry))
    }

    pub fn iter(&self) -> impl Iterator<Item = (&ObjectId, &ParamRegistry)> {
        self.entries.iter().map(|(id, registry)| (id, registry))
    }
}

/// Collect a snapshot of every registry in the tree, in traversal order
pub fn collect_registries(root: &dyn ModelObject) -> Result<RegistryLocator> {
    let mut locator = RegistryLocator::new();
    walk(root, &mut |object| {
        locator.push(object.object_id().clone(), object.pvector().clone());
        Ok(())
    })?;
    Ok(locator)
}
