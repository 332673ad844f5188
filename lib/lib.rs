//! Kestrel is the RTL core of a static binary analysis platform.
//!
//! Kestrel models machine-code semantics as Register-Transfer-Language
//! statements over an immutable expression tree, and defines how each
//! statement contributes to dataflow facts (used/defined locations) and to
//! abstract evaluation during control-flow-graph reconstruction.
//!
//! The crate is deliberately small. Decoders produce [`il::Statement`]s, a
//! CFG builder links them into a graph, and a worklist solver repeatedly
//! calls [`il::Statement::evaluate`] against an abstract context, using the
//! used/defined sets to decide which facts to propagate. None of those
//! collaborators live here; this crate is the data model and the
//! per-statement contracts they rely on.

pub mod abi;
pub mod error;
pub mod eval;
pub mod il;

#[cfg(test)]
mod tests;

pub use error::{Error, Result};
