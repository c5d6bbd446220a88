//! Model object trait and tree helpers.
//!
//! A model is a tree of model objects (a household containing a utility
//! function, a firm containing a technology, ...). Each object owns exactly
//! one [`ParamRegistry`] and keeps plain fields for its parameters so that
//! solvers can read them cheaply. The registry is the source of truth: values
//! flow one way, from the registry into the fields, through
//! [`ModelObject::sync_param`].

use crate::error::{ModelParamsError, Result};
use crate::object_id::ObjectId;
use crate::parameters::ParamRegistry;

/// A node of a model-object tree.
///
/// Implementors must return their children in the same order from
/// [`children`](ModelObject::children) and
/// [`children_mut`](ModelObject::children_mut), and that order must be stable
/// across calls on an unmodified object. Guess vectors are aligned with the
/// parameters only through this order.
pub trait ModelObject {
    /// Identity of this object. Defaults to the owner of its registry.
    fn object_id(&self) -> &ObjectId {
        self.pvector().owner()
    }

    /// Returns a reference to the object's parameter registry.
    fn pvector(&self) -> &ParamRegistry;

    /// Returns a mutable reference to the object's parameter registry.
    fn pvector_mut(&mut self) -> &mut ParamRegistry;

    /// Child objects in declaration order.
    fn children(&self) -> Vec<&dyn ModelObject> {
        Vec::new()
    }

    /// Child objects in the same order as [`children`](ModelObject::children).
    fn children_mut(&mut self) -> Vec<&mut dyn ModelObject> {
        Vec::new()
    }

    /// Copy element `index` of parameter `name` into the object's own field.
    ///
    /// Called after the registry has been updated. Objects that keep no field
    /// for a parameter should return `Ok(())`; unknown names should fail with
    /// `NotFound`.
    fn sync_param(&mut self, name: &str, index: usize, value: f64) -> Result<()>;
}

/// Visit `root` and all its descendants depth first, parents before children.
pub fn walk<'a, F>(root: &'a dyn ModelObject, visit: &mut F) -> Result<()>
where
    F: FnMut(&'a dyn ModelObject) -> Result<()>,
{
    visit(root)?;
    for child in root.children() {
        walk(child, visit)?;
    }
    Ok(())
}

/// Mutable counterpart of [`walk`], using `children_mut`.
pub fn walk_mut<F>(root: &mut dyn ModelObject, visit: &mut F) -> Result<()>
where
    F: FnMut(&mut dyn ModelObject) -> Result<()>,
{
    visit(&mut *root)?;
    for child in root.children_mut() {
        walk_mut(child, visit)?;
    }
    Ok(())
}

/// Find the object with the given id in the tree rooted at `root`.
pub fn find_object<'a>(root: &'a dyn ModelObject, id: &ObjectId) -> Option<&'a dyn ModelObject> {
    if root.object_id() == id {
        return Some(root);
    }
    root.children()
        .into_iter()
        .find_map(|child| find_object(child, id))
}

/// Find the object with the given id, mutably.
pub fn find_object_mut<'a>(
    root: &'a mut dyn ModelObject,
    id: &ObjectId,
) -> Option<&'a mut dyn ModelObject> {
    if root.object_id() == id {
        return Some(root);
    }
    root.children_mut()
        .into_iter()
        .find_map(|child| find_object_mut(child, id))
}

/// Push every current registry value of `object` into its fields.
pub fn sync_from_pvector(object: &mut dyn ModelObject) -> Result<()> {
    let updates: Vec<(String, usize, f64)> = object
        .pvector()
        .iter()
        .flat_map(|p| {
            p.value()
                .iter()
                .enumerate()
                .map(move |(i, &v)| (p.name().to_string(), i, v))
        })
        .collect();

    for (name, index, value) in updates {
        object.sync_param(&name, index, value)?;
    }
    Ok(())
}

/// Push every current registry value into the fields of every object in the
/// tree, fixed and calibrated alike.
pub fn sync_tree(root: &mut dyn ModelObject) -> Result<()> {
    walk_mut(root, &mut |object| sync_from_pvector(object))
}

/// Change the value of parameter `name` of the object `id` in the tree, in
/// its registry and in its fields.
///
/// # Returns
///
/// `ObjectNotFound` if no object has that id, otherwise whatever
/// [`ParamRegistry::change_value`] returns
pub fn change_value(
    root: &mut dyn ModelObject,
    id: &ObjectId,
    name: &str,
    value: &[f64],
) -> Result<()> {
    let object =
        find_object_mut(root, id).ok_or_else(|| ModelParamsError::ObjectNotFound(id.clone()))?;
    object.pvector_mut().change_value(name, value)?;
    for (index, &v) in value.iter().enumerate() {
        object.sync_param(name, index, v)?;
    }
    Ok(())
}
