//! Parameter registry implementation
//!
//! A [`ParamRegistry`] is the ordered collection of [`Parameter`]s owned by one
//! model object. Insertion order is part of its contract: every traversal of
//! an unmodified registry yields the parameters in the same order, which is
//! what keeps guess vectors aligned with the parameters they came from.

use crate::error::{ModelParamsError, Result};
use crate::object_id::ObjectId;
use crate::parameters::parameter::Parameter;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// An ordered, name-unique collection of parameters owned by one model object
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParamRegistry {
    /// Identity of the owning model object
    owner: ObjectId,

    /// Parameters in insertion order
    params: Vec<Parameter>,
}

impl ParamRegistry {
    /// Create an empty registry for the object `owner`
    ///
    /// # Examples
    ///
    /// ```
    /// use modelparams_rs::{ObjectId, ParamRegistry};
    ///
    /// let registry = ParamRegistry::new(ObjectId::new("household"));
    /// assert!(registry.is_empty());
    /// assert_eq!(registry.owner(), &ObjectId::new("household"));
    /// ```
    pub fn new(owner: ObjectId) -> Self {
        Self {
            owner,
            params: Vec::new(),
        }
    }

    pub fn owner(&self) -> &ObjectId {
        &self.owner
    }

    pub fn len(&self) -> usize {
        self.params.len()
    }

    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    /// Find a parameter and its position by name
    ///
    /// Returns `None` when the parameter does not exist; probing for optional
    /// parameters is a normal use.
    ///
    /// # Examples
    ///
    /// ```
    /// use modelparams_rs::{ObjectId, ParamRegistry, Parameter};
    ///
    /// let mut registry = ParamRegistry::new(ObjectId::new("utility"));
    /// registry.append(Parameter::scalar("sigma", 2.0)).unwrap();
    /// registry.append(Parameter::scalar("theta", 0.5)).unwrap();
    ///
    /// let (param, index) = registry.retrieve("theta").unwrap();
    /// assert_eq!(param.value(), &[0.5]);
    /// assert_eq!(index, 1);
    /// assert!(registry.retrieve("gamma").is_none());
    /// ```
    pub fn retrieve(&self, name: &str) -> Option<(&Parameter, usize)> {
        self.params
            .iter()
            .enumerate()
            .find(|(_, p)| p.name() == name)
            .map(|(i, p)| (p, i))
    }

    pub fn get(&self, name: &str) -> Option<&Parameter> {
        self.retrieve(name).map(|(p, _)| p)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.retrieve(name).is_some()
    }

    /// Append a parameter at the end
    ///
    /// # Returns
    ///
    /// `Ok(())`, or `DuplicateName` if a parameter of that name exists
    pub fn append(&mut self, param: Parameter) -> Result<()> {
        if self.contains(param.name()) {
            return Err(ModelParamsError::DuplicateName {
                name: param.name().to_string(),
                owner: self.owner.clone(),
            });
        }
        self.params.push(param);
        Ok(())
    }

    /// Remove a parameter by name
    ///
    /// Later parameters move up one position.
    ///
    /// # Returns
    ///
    /// The removed parameter, or `NotFound`
    pub fn remove(&mut self, name: &str) -> Result<Parameter> {
        let index = self.position(name)?;
        Ok(self.params.remove(index))
    }

    /// Replace the parameter with the same name as `param`
    ///
    /// The replacement keeps the position of the old entry and must have the
    /// same length, since a changed length would invalidate every outstanding
    /// guess vector.
    pub fn replace(&mut self, param: Parameter) -> Result<()> {
        let index = self.position(param.name())?;
        let expected = self.params[index].len();
        if param.len() != expected {
            return Err(ModelParamsError::SizeMismatch {
                name: param.name().to_string(),
                expected,
                actual: param.len(),
            });
        }
        self.params[index] = param;
        Ok(())
    }

    /// Set whether the named parameter is calibrated (all elements)
    pub fn change_calibration_status(&mut self, name: &str, calibrated: bool) -> Result<()> {
        self.get_mut(name)?.set_calibrated(calibrated)
    }

    /// Set whether one element of the named parameter is calibrated
    pub fn change_element_calibration(
        &mut self,
        name: &str,
        index: usize,
        calibrated: bool,
    ) -> Result<()> {
        self.get_mut(name)?.set_element_calibrated(index, calibrated)
    }

    /// Change the current value of the named parameter
    ///
    /// # Returns
    ///
    /// `NotFound`, `SizeMismatch` on a length mismatch, or `OutOfBounds` if a
    /// calibrated element violates its bounds
    pub fn change_value(&mut self, name: &str, value: &[f64]) -> Result<()> {
        self.get_mut(name)?.set_value(value)
    }

    /// Write one element without a bounds check
    pub fn set_element(&mut self, name: &str, index: usize, value: f64) -> Result<()> {
        self.get_mut(name)?.set_element(index, value)
    }

    /// Mutable access to the named parameter
    pub fn get_mut(&mut self, name: &str) -> Result<&mut Parameter> {
        let index = self.position(name)?;
        Ok(&mut self.params[index])
    }

    pub fn iter(&self) -> impl Iterator<Item = &Parameter> {
        self.params.iter()
    }

    pub fn names(&self) -> Vec<&str> {
        self.params.iter().map(|p| p.name()).collect()
    }

    /// Parameters with at least one calibrated element
    pub fn calibrated(&self) -> Vec<&Parameter> {
        self.params.iter().filter(|p| p.is_calibrated()).collect()
    }

    /// Parameters with no calibrated element
    pub fn fixed(&self) -> Vec<&Parameter> {
        self.params.iter().filter(|p| !p.is_calibrated()).collect()
    }

    /// Number of calibrated scalar elements across all parameters
    pub fn n_calibrated(&self) -> usize {
        self.params.iter().map(|p| p.n_calibrated()).sum()
    }

    /// Reset every parameter to its default value
    pub fn reset(&mut self) {
        for param in &mut self.params {
            param.reset();
        }
    }

    fn position(&self, name: &str) -> Result<usize> {
        self.retrieve(name)
            .map(|(_, i)| i)
            .ok_or_else(|| ModelParamsError::NotFound {
                name: name.to_string(),
                owner: self.owner.clone(),
            })
    }

    /// Check name uniqueness and every parameter's own invariants
    pub fn validate(&self) -> Result<()> {
        let mut seen = HashSet::new();
        for param in &self.params {
            if !seen.insert(param.name()) {
                return Err(ModelParamsError::DuplicateName {
                    name: param.name().to_string(),
                    owner: self.owner.clone(),
                });
            }
            param.validate()?;
        }
        Ok(())
    }

    /// Serialize the registry to a JSON string
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Load a registry from a JSON string
    ///
    /// The loaded registry is validated, so duplicate names or inconsistent
    /// lengths are rejected.
    pub fn from_json(json: &str) -> Result<Self> {
        let registry: ParamRegistry = serde_json::from_str(json)?;
        registry.validate()?;
        Ok(registry)
    }
}
