//! Object identities
//!
//! An [`ObjectId`] is the hierarchical path that names one model object inside
//! a model tree, e.g. `model > household[2] > utility`. Registries carry the
//! id of their owner so they can be matched back to objects after they have
//! been collected out of the tree.

use serde::{Deserialize, Serialize};
use std::fmt;

/// One segment of an [`ObjectId`]: a name plus an optional index for objects
/// that come in numbered collections.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct IdSegment {
    pub name: String,
    pub index: Option<usize>,
}

impl IdSegment {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            index: None,
        }
    }

    pub fn indexed(name: &str, index: usize) -> Self {
        Self {
            name: name.to_string(),
            index: Some(index),
        }
    }
}

impl fmt::Display for IdSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.index {
            Some(index) => write!(f, "{}[{}]", self.name, index),
            None => write!(f, "{}", self.name),
        }
    }
}

/// Hierarchical identity of a model object.
///
/// Two ids are equal iff their segment sequences are equal element-wise.
/// Ids are values: the `child*` constructors return new ids and never modify
/// the parent.
///
/// # Examples
///
/// ```
/// use modelparams_rs::ObjectId;
///
/// let model = ObjectId::new("model");
/// let hh = model.child_indexed("household", 2);
/// let util = hh.child("utility");
///
/// assert_eq!(util.to_string(), "model > household[2] > utility");
/// assert_eq!(util.parent().unwrap(), hh);
/// assert!(util.is_descendant_of(&model));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ObjectId {
    segments: Vec<IdSegment>,
}

impl ObjectId {
    /// A top-level id with a single segment.
    pub fn new(name: &str) -> Self {
        Self {
            segments: vec![IdSegment::new(name)],
        }
    }

    /// A top-level id with a single indexed segment.
    pub fn indexed(name: &str, index: usize) -> Self {
        Self {
            segments: vec![IdSegment::indexed(name, index)],
        }
    }

    /// Build an id from explicit segments.
    pub fn from_segments(segments: Vec<IdSegment>) -> Self {
        Self { segments }
    }

    pub fn child(&self, name: &str) -> Self {
        self.with_segment(IdSegment::new(name))
    }

    pub fn child_indexed(&self, name: &str, index: usize) -> Self {
        self.with_segment(IdSegment::indexed(name, index))
    }

    fn with_segment(&self, segment: IdSegment) -> Self {
        let mut segments = self.segments.clone();
        segments.push(segment);
        Self { segments }
    }

    /// The id one level up, or `None` for a top-level id.
    pub fn parent(&self) -> Option<Self> {
        if self.segments.len() <= 1 {
            return None;
        }
        Some(Self {
            segments: self.segments[..self.segments.len() - 1].to_vec(),
        })
    }

    pub fn segments(&self) -> &[IdSegment] {
        &self.segments
    }

    /// The last segment, which names the object itself.
    pub fn own_segment(&self) -> Option<&IdSegment> {
        self.segments.last()
    }

    pub fn depth(&self) -> usize {
        self.segments.len()
    }

    /// True if `self` lies strictly below `other` in the hierarchy.
    pub fn is_descendant_of(&self, other: &ObjectId) -> bool {
        self.segments.len() > other.segments.len()
            && self.segments[..other.segments.len()] == other.segments[..]
    }
}

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, segment) in self.segments.iter().enumerate() {
            if i > 0 {
                write!(f, " > ")?;
            }
            write!(f, "{}", segment)?;
        }
        Ok(())
    }
}
