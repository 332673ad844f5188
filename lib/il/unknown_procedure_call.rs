//! The fallthrough edge of an unresolved procedure call.
//!
//! When CFG construction cannot statically resolve a call target, it cannot
//! stall the analysis or declare it unsound. Instead it inserts this
//! statement on the fallthrough edge: a conservative, ABI-based
//! approximation of what a standard-convention callee may read and clobber.
//! The approximation is deliberately register-only; the memory effects of an
//! unknown call are the business of the solver's memory abstraction, not of
//! this statement's location sets.

use log::debug;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

use crate::error::{Error, Result};
use crate::il::Goto;

/// The synthetic statement on the fallthrough edge after a call whose
/// callee is unknown.
///
/// It holds a shared, read-only reference to the originating call, used only
/// to recover a human-readable target for diagnostics. The CFG edge owns
/// this statement's lifetime; the call statement is owned elsewhere.
#[derive(Clone, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub struct UnknownProcedureCall {
    source: Arc<Goto>,
}

impl UnknownProcedureCall {
    /// Create the fallthrough statement for an unresolved call.
    /// # Error
    /// The source statement is not a procedure call.
    pub fn new(source: Arc<Goto>) -> Result<UnknownProcedureCall> {
        if !source.is_call() {
            return Err(Error::NotACall(source.to_string()));
        }
        debug!(
            "unresolved call target {}, inserting ABI fallthrough approximation",
            source.target()
        );
        Ok(UnknownProcedureCall { source })
    }

    /// The originating call statement.
    pub fn source(&self) -> &Goto {
        &self.source
    }
}

impl fmt::Display for UnknownProcedureCall {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "return from call({})", self.source.target())
    }
}
