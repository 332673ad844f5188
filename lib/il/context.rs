//! A `Context` is a substitution environment mapping variables to the
//! expressions known to hold their values.
//!
//! A context stands in for a machine state during evaluation: a fully
//! concrete state binds every variable to a constant, a partial abstract
//! state binds only what the solver has learned so far. Substitution is a
//! pure function; neither the context nor the substituted expression is
//! mutated.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::il::{Expression, MemoryLocation, Variable};

/// A set of variable bindings used to specialize statements.
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct Context {
    bindings: FxHashMap<Variable, Expression>,
}

impl Context {
    pub fn new() -> Context {
        Context {
            bindings: FxHashMap::default(),
        }
    }

    /// Bind a variable to an expression.
    /// # Error
    /// The expression's sort differs from the variable's.
    pub fn bind(&mut self, variable: Variable, expression: Expression) -> Result<()> {
        if variable.bits() != expression.bits() {
            return Err(Error::Sort);
        }
        self.bindings.insert(variable, expression);
        Ok(())
    }

    /// The expression bound to a variable, if any.
    pub fn binding(&self, variable: &Variable) -> Option<&Expression> {
        self.bindings.get(variable)
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Variable, &Expression)> {
        self.bindings.iter()
    }

    /// Replace every bound variable in the given expression with its
    /// binding, producing a new expression.
    ///
    /// Substitution is not transitive: a binding's own variables are not
    /// substituted again. The solver re-evaluates across iterations instead.
    pub fn substitute(&self, expression: &Expression) -> Expression {
        match expression {
            Expression::Variable(variable) => self
                .binding(variable)
                .cloned()
                .unwrap_or_else(|| expression.clone()),
            Expression::Constant(_) => expression.clone(),
            Expression::Memory(memory) => Expression::Memory(Box::new(MemoryLocation::new(
                self.substitute(memory.address()),
                memory.bits(),
            ))),
            Expression::Add(lhs, rhs) => {
                Expression::Add(Box::new(self.substitute(lhs)), Box::new(self.substitute(rhs)))
            }
            Expression::Sub(lhs, rhs) => {
                Expression::Sub(Box::new(self.substitute(lhs)), Box::new(self.substitute(rhs)))
            }
            Expression::Mul(lhs, rhs) => {
                Expression::Mul(Box::new(self.substitute(lhs)), Box::new(self.substitute(rhs)))
            }
            Expression::Divu(lhs, rhs) => {
                Expression::Divu(Box::new(self.substitute(lhs)), Box::new(self.substitute(rhs)))
            }
            Expression::Modu(lhs, rhs) => {
                Expression::Modu(Box::new(self.substitute(lhs)), Box::new(self.substitute(rhs)))
            }
            Expression::Divs(lhs, rhs) => {
                Expression::Divs(Box::new(self.substitute(lhs)), Box::new(self.substitute(rhs)))
            }
            Expression::Mods(lhs, rhs) => {
                Expression::Mods(Box::new(self.substitute(lhs)), Box::new(self.substitute(rhs)))
            }
            Expression::And(lhs, rhs) => {
                Expression::And(Box::new(self.substitute(lhs)), Box::new(self.substitute(rhs)))
            }
            Expression::Or(lhs, rhs) => {
                Expression::Or(Box::new(self.substitute(lhs)), Box::new(self.substitute(rhs)))
            }
            Expression::Xor(lhs, rhs) => {
                Expression::Xor(Box::new(self.substitute(lhs)), Box::new(self.substitute(rhs)))
            }
            Expression::Shl(lhs, rhs) => {
                Expression::Shl(Box::new(self.substitute(lhs)), Box::new(self.substitute(rhs)))
            }
            Expression::Shr(lhs, rhs) => {
                Expression::Shr(Box::new(self.substitute(lhs)), Box::new(self.substitute(rhs)))
            }
            Expression::Cmpeq(lhs, rhs) => {
                Expression::Cmpeq(Box::new(self.substitute(lhs)), Box::new(self.substitute(rhs)))
            }
            Expression::Cmpneq(lhs, rhs) => {
                Expression::Cmpneq(Box::new(self.substitute(lhs)), Box::new(self.substitute(rhs)))
            }
            Expression::Cmplts(lhs, rhs) => {
                Expression::Cmplts(Box::new(self.substitute(lhs)), Box::new(self.substitute(rhs)))
            }
            Expression::Cmpltu(lhs, rhs) => {
                Expression::Cmpltu(Box::new(self.substitute(lhs)), Box::new(self.substitute(rhs)))
            }
            Expression::Zext(bits, src) => {
                Expression::Zext(*bits, Box::new(self.substitute(src)))
            }
            Expression::Sext(bits, src) => {
                Expression::Sext(*bits, Box::new(self.substitute(src)))
            }
            Expression::Trun(bits, src) => {
                Expression::Trun(*bits, Box::new(self.substitute(src)))
            }
        }
    }
}
