//! A `MemoryLocation` is an address expression paired with an access width.
//!
//! Memory locations only ever appear as *used* locations. A write to memory
//! is modeled as a `Store` statement, and contributes the variables of its
//! address expression as uses, never a define.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::il::Expression;

/// A memory access of `bits` width at the address given by `address`.
#[derive(Clone, Debug, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
pub struct MemoryLocation {
    address: Expression,
    bits: usize,
}

impl MemoryLocation {
    pub fn new(address: Expression, bits: usize) -> MemoryLocation {
        MemoryLocation { address, bits }
    }

    pub fn address(&self) -> &Expression {
        &self.address
    }

    pub fn bits(&self) -> usize {
        self.bits
    }
}

impl fmt::Display for MemoryLocation {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "mem{}[{}]", self.bits, self.address)
    }
}
