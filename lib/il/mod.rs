//! The kestrel Register-Transfer Language.
//!
//! # An Introduction
//!
//! Kestrel RTL models decoded machine instructions as statements over an
//! immutable expression tree.
//!
//! * **Expression-based** - Statements operate over [`Expression`]s built
//!   from the terminals [`Variable`] and [`Constant`] plus explicit memory
//!   reads, rather than a three-address form.
//! * **Closed statement set** - The statement variants are a Rust enum,
//!   matched exhaustively by every operation. Adding a variant forces every
//!   operation, including every [`StatementVisitor`], to be updated; the
//!   compiler enforces it.
//! * **Immutable** - Expressions and statements never change after
//!   construction. Transformations produce new values, so everything here is
//!   safe to share by reference across concurrent analysis workers.
//!
//! # Components
//!
//! ## `Constant` and `Variable`
//!
//! The terminals. A `Constant` is a value up to 64 bits wide; a `Variable`
//! is a named register or pseudo-register, equal to another iff name and
//! bitness agree.
//!
//! ## `Expression`
//!
//! Arithmetic, comparison and width-change operators over the terminals and
//! over [`MemoryLocation`] reads. It is an error to build an expression
//! whose operands differ in bitness; this is checked at construction and a
//! `Sort` error is emitted. Comparisons evaluate to a 1-bit expression.
//!
//! ## `Statement`
//!
//! The discriminated union the solver iterates over: `Assign`, `Store`,
//! `Goto` (jumps, calls and returns, optionally guarded),
//! `UnknownProcedureCall`, `Assume`, `Nop` and `Halt`. Every statement
//! exposes three derived dataflow sets, an `evaluate` transformer over a
//! [`Context`], and visitor dispatch via `accept`. The derived sets are
//! conservative over-approximations computed once and memoized.
//!
//! ## `UnknownProcedureCall`
//!
//! The fallthrough edge inserted after a call whose target cannot be
//! resolved. Its used/defined sets come from the process-wide ABI sets in
//! [`crate::abi`]; its memory-location set is empty because the memory
//! effects of an unknown call belong to the solver's memory abstraction.

mod constant;
mod context;
mod expression;
mod goto;
mod memory_location;
mod sets;
mod statement;
mod unknown_procedure_call;
mod variable;

pub use self::constant::*;
pub use self::context::*;
pub use self::expression::*;
pub use self::goto::*;
pub use self::memory_location::*;
pub use self::sets::*;
pub use self::statement::*;
pub use self::unknown_procedure_call::*;
pub use self::variable::*;

/// A convenience function to create a new constant.
pub fn const_(value: u64, bits: usize) -> Constant {
    Constant::new(value, bits)
}

/// A convenience function to create a new constant expression.
pub fn expr_const(value: u64, bits: usize) -> Expression {
    Expression::constant(Constant::new(value, bits))
}

/// A convenience function to create a new variable.
pub fn var<S>(name: S, bits: usize) -> Variable
where
    S: Into<String>,
{
    Variable::new(name, bits)
}

/// A convenience function to create a new variable expression.
pub fn expr_var<S>(name: S, bits: usize) -> Expression
where
    S: Into<String>,
{
    Expression::variable(Variable::new(name, bits))
}
