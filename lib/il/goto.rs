//! A `Goto` transfers control to a target expression, optionally guarded by
//! a condition, and carries the call metadata of the originating
//! instruction.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{Error, Result};
use crate::il::Expression;

/// The role a control transfer plays in the program.
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub enum GotoKind {
    /// An intra-procedural jump.
    Jump,
    /// A procedure call. The return address has already been pushed by the
    /// preceding statements of the decoded instruction.
    Call,
    /// A return to the caller.
    Return,
}

/// A control-transfer statement.
///
/// The target may be symbolic. Resolving it, where possible, is the job of
/// `Statement::evaluate` and the external solver; an unresolvable call
/// target gives rise to an `UnknownProcedureCall` fallthrough instead.
#[derive(Clone, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub struct Goto {
    target: Expression,
    condition: Option<Expression>,
    kind: GotoKind,
}

impl Goto {
    /// Create a new control transfer.
    /// # Error
    /// The condition, if present, is not 1 bit wide.
    pub fn new(target: Expression, condition: Option<Expression>, kind: GotoKind) -> Result<Goto> {
        if let Some(condition) = &condition {
            if condition.bits() != 1 {
                return Err(Error::Sort);
            }
        }
        Ok(Goto {
            target,
            condition,
            kind,
        })
    }

    /// Create an unconditional jump.
    pub fn jump(target: Expression) -> Goto {
        Goto {
            target,
            condition: None,
            kind: GotoKind::Jump,
        }
    }

    /// Create a conditional jump.
    /// # Error
    /// The condition is not 1 bit wide.
    pub fn conditional_jump(target: Expression, condition: Expression) -> Result<Goto> {
        Goto::new(target, Some(condition), GotoKind::Jump)
    }

    /// Create a procedure call.
    pub fn call(target: Expression) -> Goto {
        Goto {
            target,
            condition: None,
            kind: GotoKind::Call,
        }
    }

    /// Create a procedure return.
    pub fn ret(target: Expression) -> Goto {
        Goto {
            target,
            condition: None,
            kind: GotoKind::Return,
        }
    }

    pub fn target(&self) -> &Expression {
        &self.target
    }

    pub fn condition(&self) -> Option<&Expression> {
        self.condition.as_ref()
    }

    pub fn kind(&self) -> GotoKind {
        self.kind
    }

    pub fn is_call(&self) -> bool {
        self.kind == GotoKind::Call
    }
}

impl fmt::Display for Goto {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let transfer = match self.kind {
            GotoKind::Jump => format!("goto {}", self.target),
            GotoKind::Call => format!("call {}", self.target),
            GotoKind::Return => format!("return to {}", self.target),
        };
        match &self.condition {
            Some(condition) => write!(f, "if {} {}", condition, transfer),
            None => write!(f, "{}", transfer),
        }
    }
}
