//! Specialized set containers used as the currency of dataflow facts.
//!
//! Both sets are unordered and deduplicated with value semantics. Iteration
//! order is unspecified; no analysis may depend on it. The `Display`
//! implementations sort their contents so diagnostics stay stable.

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::il::{MemoryLocation, Variable};

/// An unordered, deduplicated set of variables.
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct VariableSet {
    variables: FxHashSet<Variable>,
}

impl VariableSet {
    pub fn new() -> VariableSet {
        VariableSet {
            variables: FxHashSet::default(),
        }
    }

    /// Insert a variable, returning false if it was already present.
    pub fn insert(&mut self, variable: Variable) -> bool {
        self.variables.insert(variable)
    }

    pub fn contains(&self, variable: &Variable) -> bool {
        self.variables.contains(variable)
    }

    /// The union of this set and another, as a new set.
    pub fn union(&self, other: &VariableSet) -> VariableSet {
        let mut variables = self.variables.clone();
        variables.extend(other.variables.iter().cloned());
        VariableSet { variables }
    }

    pub fn iter(&self) -> impl Iterator<Item = &Variable> {
        self.variables.iter()
    }

    pub fn len(&self) -> usize {
        self.variables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.variables.is_empty()
    }
}

impl FromIterator<Variable> for VariableSet {
    fn from_iter<I: IntoIterator<Item = Variable>>(iter: I) -> VariableSet {
        VariableSet {
            variables: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a VariableSet {
    type Item = &'a Variable;
    type IntoIter = std::collections::hash_set::Iter<'a, Variable>;

    fn into_iter(self) -> Self::IntoIter {
        self.variables.iter()
    }
}

impl fmt::Display for VariableSet {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let mut variables: Vec<&Variable> = self.variables.iter().collect();
        variables.sort();
        write!(
            f,
            "{{{}}}",
            variables
                .iter()
                .map(|v| v.to_string())
                .collect::<Vec<String>>()
                .join(", ")
        )
    }
}

/// An unordered, deduplicated set of memory locations.
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct MemoryLocationSet {
    locations: FxHashSet<MemoryLocation>,
}

impl MemoryLocationSet {
    pub fn new() -> MemoryLocationSet {
        MemoryLocationSet {
            locations: FxHashSet::default(),
        }
    }

    /// Insert a memory location, returning false if it was already present.
    pub fn insert(&mut self, location: MemoryLocation) -> bool {
        self.locations.insert(location)
    }

    pub fn contains(&self, location: &MemoryLocation) -> bool {
        self.locations.contains(location)
    }

    /// The union of this set and another, as a new set.
    pub fn union(&self, other: &MemoryLocationSet) -> MemoryLocationSet {
        let mut locations = self.locations.clone();
        locations.extend(other.locations.iter().cloned());
        MemoryLocationSet { locations }
    }

    pub fn iter(&self) -> impl Iterator<Item = &MemoryLocation> {
        self.locations.iter()
    }

    pub fn len(&self) -> usize {
        self.locations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.locations.is_empty()
    }
}

impl FromIterator<MemoryLocation> for MemoryLocationSet {
    fn from_iter<I: IntoIterator<Item = MemoryLocation>>(iter: I) -> MemoryLocationSet {
        MemoryLocationSet {
            locations: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a MemoryLocationSet {
    type Item = &'a MemoryLocation;
    type IntoIter = std::collections::hash_set::Iter<'a, MemoryLocation>;

    fn into_iter(self) -> Self::IntoIter {
        self.locations.iter()
    }
}

impl fmt::Display for MemoryLocationSet {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let mut locations: Vec<&MemoryLocation> = self.locations.iter().collect();
        locations.sort();
        write!(
            f,
            "{{{}}}",
            locations
                .iter()
                .map(|l| l.to_string())
                .collect::<Vec<String>>()
                .join(", ")
        )
    }
}
