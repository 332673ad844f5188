//! A `Variable` is a named storage location, a CPU register or a
//! pseudo-register introduced by a decoder.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::il::Expression;

/// An RTL variable.
///
/// Two variables are equal iff they agree on both name and bitness.
#[derive(Clone, Debug, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
pub struct Variable {
    name: String,
    bits: usize,
}

impl Variable {
    pub fn new<S>(name: S, bits: usize) -> Variable
    where
        S: Into<String>,
    {
        Variable {
            name: name.into(),
            bits,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn bits(&self) -> usize {
        self.bits
    }

    /// An identifier uniquely identifying this variable in the form
    /// `<name>:<bits>`.
    pub fn identifier(&self) -> String {
        format!("{}:{}", self.name, self.bits)
    }
}

impl fmt::Display for Variable {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        // Diagnostics render registers by bare name; use `identifier` when
        // the bitness matters.
        write!(f, "{}", self.name)
    }
}

impl From<Variable> for Expression {
    fn from(variable: Variable) -> Expression {
        Expression::variable(variable)
    }
}
