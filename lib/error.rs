//! Error types for kestrel.

use thiserror::Error;

/// The crate-wide error type.
#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum Error {
    /// Operand bitness of an expression's operands differ, or an operand has
    /// an invalid zero-width sort.
    #[error("operand sorts are incompatible")]
    Sort,

    /// Constant evaluation attempted to divide by zero.
    #[error("division by zero during constant evaluation")]
    DivideByZero,

    /// Concrete evaluation reached a variable with no binding.
    #[error("cannot evaluate unbound variable {0}")]
    UnboundVariable(String),

    /// Concrete evaluation reached a memory read.
    #[error("cannot evaluate memory location {0}")]
    UnboundMemory(String),

    /// An unresolved-call fallthrough was constructed from a statement that
    /// is not a procedure call.
    #[error("unresolved-call fallthrough requires a call, got {0}")]
    NotACall(String),
}

pub type Result<T> = std::result::Result<T, Error>;
