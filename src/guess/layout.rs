//! Guess layout
//!
//! The layout records, for every element of a guess vector, which object,
//! parameter and element it came from.

use crate::object_id::ObjectId;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Origin of one guess element
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GuessSlot {
    pub object_id: ObjectId,
    pub param_name: String,
    pub element: usize,
}

impl GuessSlot {
    pub fn new(object_id: ObjectId, param_name: &str, element: usize) -> Self {
        Self {
            object_id,
            param_name: param_name.to_string(),
            element,
        }
    }

    /// True if this slot names the given object, parameter and element
    pub fn matches(&self, object_id: &ObjectId, param_name: &str, element: usize) -> bool {
        self.element == element && self.param_name == param_name && &self.object_id == object_id
    }
}

impl fmt::Display for GuessSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}::{}[{}]", self.object_id, self.param_name, self.element)
    }
}

/// One [`GuessSlot`] per guess element, in guess order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuessLayout {
    slots: Vec<GuessSlot>,
}

impl GuessLayout {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, slot: GuessSlot) {
        self.slots.push(slot);
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn get(&self, position: usize) -> Option<&GuessSlot> {
        self.slots.get(position)
    }

    pub fn iter(&self) -> impl Iterator<Item = &GuessSlot> {
        self.slots.iter()
    }

    /// Position of the given element in the guess vector
    pub fn position_of(&self, object_id: &ObjectId, param_name: &str, element: usize) -> Option<usize> {
        self.slots
            .iter()
            .position(|s| s.matches(object_id, param_name, element))
    }

    /// Positions of all calibrated elements of one parameter
    pub fn positions_of_param(&self, object_id: &ObjectId, param_name: &str) -> Vec<usize> {
        self.slots
            .iter()
            .enumerate()
            .filter(|(_, s)| s.param_name == param_name && &s.object_id == object_id)
            .map(|(i, _)| i)
            .collect()
    }
}
