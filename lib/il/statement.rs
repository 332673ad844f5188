//! An RTL `Statement` and the operations the solver relies on.
//!
//! The statement-variant set is closed: `StatementKind` is a plain enum and
//! every operation over it matches exhaustively, so adding a variant forces
//! every operation (including every [`StatementVisitor`]) to be updated.
//! The operation set is open; external analyses add visitors without
//! touching this module.

use log::trace;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::{Arc, OnceLock};

use crate::abi;
use crate::error::{Error, Result};
use crate::eval;
use crate::il::{
    Context, Expression, Goto, MemoryLocation, MemoryLocationSet, UnknownProcedureCall, Variable,
    VariableSet,
};

/// The discriminated union over statement kinds.
#[derive(Clone, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub enum StatementKind {
    /// Assign the value of `src` to the variable `dst`.
    Assign { dst: Variable, src: Expression },
    /// Store the value of `src` to the memory location `dst`.
    Store { dst: MemoryLocation, src: Expression },
    /// Transfer control, possibly guarded, possibly a call or return.
    Goto(Goto),
    /// The fallthrough edge of an unresolved procedure call.
    UnknownProcedureCall(UnknownProcedureCall),
    /// Constrain the current path with a 1-bit condition.
    Assume { condition: Expression },
    /// No operation.
    Nop,
    /// Terminate execution.
    Halt,
}

/// An RTL statement.
///
/// Statements are immutable after construction. The used/defined sets are
/// derived from the statement's own fields on first access and memoized in
/// single-assignment cells, so concurrent first access cannot produce torn
/// results. Equality and hashing ignore the memoization and depend only on
/// the statement's kind.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct Statement {
    kind: StatementKind,
    #[serde(skip)]
    defined_variables: OnceLock<VariableSet>,
    #[serde(skip)]
    used_variables: OnceLock<VariableSet>,
    #[serde(skip)]
    used_memory_locations: OnceLock<MemoryLocationSet>,
}

impl Statement {
    fn new(kind: StatementKind) -> Statement {
        Statement {
            kind,
            defined_variables: OnceLock::new(),
            used_variables: OnceLock::new(),
            used_memory_locations: OnceLock::new(),
        }
    }

    /// Create an assignment to a variable.
    /// # Error
    /// The sorts of `dst` and `src` differ.
    pub fn assign(dst: Variable, src: Expression) -> Result<Statement> {
        if dst.bits() != src.bits() {
            return Err(Error::Sort);
        }
        Ok(Statement::new(StatementKind::Assign { dst, src }))
    }

    /// Create a store to memory.
    /// # Error
    /// The sorts of `dst` and `src` differ.
    pub fn store(dst: MemoryLocation, src: Expression) -> Result<Statement> {
        if dst.bits() != src.bits() {
            return Err(Error::Sort);
        }
        Ok(Statement::new(StatementKind::Store { dst, src }))
    }

    /// Create a control-transfer statement.
    pub fn goto(goto: Goto) -> Statement {
        Statement::new(StatementKind::Goto(goto))
    }

    /// Create the fallthrough statement for an unresolved procedure call.
    /// # Error
    /// The source statement is not a procedure call.
    pub fn unknown_procedure_call(source: Arc<Goto>) -> Result<Statement> {
        Ok(Statement::new(StatementKind::UnknownProcedureCall(
            UnknownProcedureCall::new(source)?,
        )))
    }

    /// Create a path assumption.
    /// # Error
    /// The condition is not 1 bit wide.
    pub fn assume(condition: Expression) -> Result<Statement> {
        if condition.bits() != 1 {
            return Err(Error::Sort);
        }
        Ok(Statement::new(StatementKind::Assume { condition }))
    }

    pub fn nop() -> Statement {
        Statement::new(StatementKind::Nop)
    }

    pub fn halt() -> Statement {
        Statement::new(StatementKind::Halt)
    }

    pub fn kind(&self) -> &StatementKind {
        &self.kind
    }

    pub fn is_nop(&self) -> bool {
        matches!(self.kind, StatementKind::Nop)
    }

    /// The variables this statement may overwrite.
    ///
    /// A conservative over-approximation; a location the statement might
    /// touch is never omitted.
    pub fn defined_variables(&self) -> &VariableSet {
        self.defined_variables
            .get_or_init(|| self.compute_defined_variables())
    }

    /// The variables this statement reads to compute its effect.
    pub fn used_variables(&self) -> &VariableSet {
        self.used_variables
            .get_or_init(|| self.compute_used_variables())
    }

    /// The memory locations this statement reads.
    pub fn used_memory_locations(&self) -> &MemoryLocationSet {
        self.used_memory_locations
            .get_or_init(|| self.compute_used_memory_locations())
    }

    fn compute_defined_variables(&self) -> VariableSet {
        match &self.kind {
            StatementKind::Assign { dst, .. } => {
                let mut variables = VariableSet::new();
                variables.insert(dst.clone());
                variables
            }
            // A store defines no variable. The written cell is handled by
            // the solver's memory abstraction.
            StatementKind::Store { .. } => VariableSet::new(),
            StatementKind::Goto(_) => VariableSet::new(),
            StatementKind::UnknownProcedureCall(_) => abi::INTEL_ABI_DEFINED.clone(),
            StatementKind::Assume { .. } => VariableSet::new(),
            StatementKind::Nop | StatementKind::Halt => VariableSet::new(),
        }
    }

    fn compute_used_variables(&self) -> VariableSet {
        fn variables_of(expression: &Expression) -> VariableSet {
            expression
                .collect_variables()
                .into_iter()
                .cloned()
                .collect()
        }

        match &self.kind {
            StatementKind::Assign { src, .. } => variables_of(src),
            StatementKind::Store { dst, src } => {
                variables_of(dst.address()).union(&variables_of(src))
            }
            StatementKind::Goto(goto) => {
                let mut used = variables_of(goto.target());
                if let Some(condition) = goto.condition() {
                    used = used.union(&variables_of(condition));
                }
                used
            }
            StatementKind::UnknownProcedureCall(_) => abi::FASTCALL_USED.clone(),
            StatementKind::Assume { condition } => variables_of(condition),
            StatementKind::Nop | StatementKind::Halt => VariableSet::new(),
        }
    }

    fn compute_used_memory_locations(&self) -> MemoryLocationSet {
        fn locations_of(expression: &Expression) -> MemoryLocationSet {
            expression
                .collect_memory_locations()
                .into_iter()
                .cloned()
                .collect()
        }

        match &self.kind {
            StatementKind::Assign { src, .. } => locations_of(src),
            // The written cell is not a read; only loads nested in the
            // address or the stored value count.
            StatementKind::Store { dst, src } => {
                locations_of(dst.address()).union(&locations_of(src))
            }
            StatementKind::Goto(goto) => {
                let mut used = locations_of(goto.target());
                if let Some(condition) = goto.condition() {
                    used = used.union(&locations_of(condition));
                }
                used
            }
            // Conservative scope boundary: all memory is possibly touched by
            // an unknown call, which the solver's memory abstraction models.
            // This statement's location set stays empty.
            StatementKind::UnknownProcedureCall(_) => MemoryLocationSet::new(),
            StatementKind::Assume { condition } => locations_of(condition),
            StatementKind::Nop | StatementKind::Halt => MemoryLocationSet::new(),
        }
    }

    /// Specialize this statement under the given context.
    ///
    /// Substitutes bound variables, folds constant subtrees, and simplifies
    /// away decided branches. Returns the statement unchanged when no useful
    /// specialization exists. Pure: neither the context nor this statement
    /// is mutated, and re-evaluating the result under the same context
    /// changes nothing further.
    pub fn evaluate(&self, context: &Context) -> Result<Statement> {
        let evaluated = match &self.kind {
            StatementKind::Assign { dst, src } => {
                Statement::assign(dst.clone(), eval::simplify(&context.substitute(src))?)?
            }
            StatementKind::Store { dst, src } => Statement::store(
                MemoryLocation::new(
                    eval::simplify(&context.substitute(dst.address()))?,
                    dst.bits(),
                ),
                eval::simplify(&context.substitute(src))?,
            )?,
            StatementKind::Goto(goto) => {
                let target = eval::simplify(&context.substitute(goto.target()))?;
                match goto.condition() {
                    Some(condition) => {
                        let condition = eval::simplify(&context.substitute(condition))?;
                        match &condition {
                            Expression::Constant(c) if c.is_zero() => Statement::nop(),
                            Expression::Constant(_) => {
                                Statement::goto(Goto::new(target, None, goto.kind())?)
                            }
                            _ => Statement::goto(Goto::new(
                                target,
                                Some(condition),
                                goto.kind(),
                            )?),
                        }
                    }
                    None => Statement::goto(Goto::new(target, None, goto.kind())?),
                }
            }
            StatementKind::Assume { condition } => {
                let condition = eval::simplify(&context.substitute(condition))?;
                match &condition {
                    // An assumption known to hold carries no information.
                    // One known to fail is kept; the solver prunes the path.
                    Expression::Constant(c) if c.is_one() => Statement::nop(),
                    _ => Statement::assume(condition)?,
                }
            }
            // No structural evaluation models the unknown call's effect.
            // The solver applies the defined/used sets in its merge step.
            StatementKind::UnknownProcedureCall(_) => self.clone(),
            StatementKind::Nop | StatementKind::Halt => self.clone(),
        };
        if evaluated != *self {
            trace!("specialized `{}` to `{}`", self, evaluated);
        }
        Ok(evaluated)
    }

    /// Dispatch to the visitor operation matching this statement's kind.
    pub fn accept<T, V: StatementVisitor<T>>(&self, visitor: &mut V) -> T {
        match &self.kind {
            StatementKind::Assign { dst, src } => visitor.visit_assign(dst, src),
            StatementKind::Store { dst, src } => visitor.visit_store(dst, src),
            StatementKind::Goto(goto) => visitor.visit_goto(goto),
            StatementKind::UnknownProcedureCall(call) => {
                visitor.visit_unknown_procedure_call(call)
            }
            StatementKind::Assume { condition } => visitor.visit_assume(condition),
            StatementKind::Nop => visitor.visit_nop(),
            StatementKind::Halt => visitor.visit_halt(),
        }
    }
}

impl PartialEq for Statement {
    fn eq(&self, other: &Statement) -> bool {
        self.kind == other.kind
    }
}

impl Eq for Statement {}

impl Hash for Statement {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.kind.hash(state);
    }
}

impl fmt::Display for Statement {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match &self.kind {
            StatementKind::Assign { dst, src } => write!(f, "{} = {}", dst, src),
            StatementKind::Store { dst, src } => write!(f, "{} = {}", dst, src),
            StatementKind::Goto(goto) => goto.fmt(f),
            StatementKind::UnknownProcedureCall(call) => call.fmt(f),
            StatementKind::Assume { condition } => write!(f, "assume {}", condition),
            StatementKind::Nop => write!(f, "nop"),
            StatementKind::Halt => write!(f, "halt"),
        }
    }
}

/// An operation over every statement kind.
///
/// `Statement::accept` selects the method matching the statement's kind.
/// Implementors must handle every kind; the closed variant set makes the
/// compiler enforce this when a kind is added.
pub trait StatementVisitor<T> {
    fn visit_assign(&mut self, dst: &Variable, src: &Expression) -> T;
    fn visit_store(&mut self, dst: &MemoryLocation, src: &Expression) -> T;
    fn visit_goto(&mut self, goto: &Goto) -> T;
    fn visit_unknown_procedure_call(&mut self, call: &UnknownProcedureCall) -> T;
    fn visit_assume(&mut self, condition: &Expression) -> T;
    fn visit_nop(&mut self) -> T;
    fn visit_halt(&mut self) -> T;
}
