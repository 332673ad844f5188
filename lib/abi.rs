//! Calling-convention information and the process-wide register sets used
//! to approximate unresolved procedure calls.
//!
//! Precise call-target resolution is undecidable for indirect calls, so the
//! analysis assumes an unresolved callee behaves like a standard-convention
//! function: it may read the convention's argument registers and may clobber
//! its scratch/return registers, and nothing else. The sets below encode
//! that assumption for a 32-bit Intel-style convention, are initialized
//! once, and are shared read-only by every unresolved-call statement.

use lazy_static::lazy_static;

use crate::il::{Variable, VariableSet};

fn register(name: &str) -> Variable {
    Variable::new(name, 32)
}

lazy_static! {
    /// Registers an unresolved callee is assumed to read as arguments.
    pub static ref FASTCALL_USED: VariableSet = {
        CallingConvention::new(CallingConventionType::Fastcall).argument_register_set()
    };

    /// Registers an unresolved callee may clobber as return value or
    /// scratch. The solver treats these as unknown after the call and all
    /// other registers as unaffected.
    pub static ref INTEL_ABI_DEFINED: VariableSet = {
        CallingConvention::new(CallingConventionType::Fastcall)
            .trashed_registers()
            .clone()
    };
}

/// Available types of calling conventions.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum CallingConventionType {
    /// The 32-bit Intel-style convention assumed for unresolved calls.
    /// Argument registers double as the caller-saved scratch set.
    Fastcall,
    Cdecl,
}

/// Represents the calling convention of a particular platform.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CallingConvention {
    /// Arguments passed in registers, in order.
    argument_registers: Vec<Variable>,

    /// These registers are preserved across function calls.
    preserved_registers: VariableSet,

    /// These registers are not preserved across function calls.
    trashed_registers: VariableSet,

    /// The register the returned value is given in.
    return_register: Variable,
}

impl CallingConvention {
    /// Create a new `CallingConvention` based on the given
    /// `CallingConventionType`.
    pub fn new(typ: CallingConventionType) -> CallingConvention {
        match typ {
            CallingConventionType::Fastcall => {
                let argument_registers =
                    vec![register("eax"), register("ecx"), register("edx")];

                let mut preserved_registers = VariableSet::new();
                preserved_registers.insert(register("ebx"));
                preserved_registers.insert(register("edi"));
                preserved_registers.insert(register("esi"));
                preserved_registers.insert(register("ebp"));
                preserved_registers.insert(register("esp"));

                let mut trashed_registers = VariableSet::new();
                trashed_registers.insert(register("eax"));
                trashed_registers.insert(register("ecx"));
                trashed_registers.insert(register("edx"));

                CallingConvention {
                    argument_registers,
                    preserved_registers,
                    trashed_registers,
                    return_register: register("eax"),
                }
            }
            CallingConventionType::Cdecl => {
                let mut preserved_registers = VariableSet::new();
                preserved_registers.insert(register("ebx"));
                preserved_registers.insert(register("edi"));
                preserved_registers.insert(register("esi"));
                preserved_registers.insert(register("ebp"));
                preserved_registers.insert(register("esp"));

                let mut trashed_registers = VariableSet::new();
                trashed_registers.insert(register("eax"));
                trashed_registers.insert(register("ecx"));
                trashed_registers.insert(register("edx"));

                CallingConvention {
                    argument_registers: Vec::new(),
                    preserved_registers,
                    trashed_registers,
                    return_register: register("eax"),
                }
            }
        }
    }

    /// Get the registers arguments are passed in, in order.
    pub fn argument_registers(&self) -> &[Variable] {
        &self.argument_registers
    }

    /// The argument registers as an unordered set.
    pub fn argument_register_set(&self) -> VariableSet {
        self.argument_registers.iter().cloned().collect()
    }

    /// Get the registers preserved across function calls.
    pub fn preserved_registers(&self) -> &VariableSet {
        &self.preserved_registers
    }

    /// Get the registers trashed across function calls.
    pub fn trashed_registers(&self) -> &VariableSet {
        &self.trashed_registers
    }

    /// The register returned values are given in.
    pub fn return_register(&self) -> &Variable {
        &self.return_register
    }

    /// Is the given register preserved across a call. `None` when the
    /// convention says nothing about the register.
    pub fn is_preserved(&self, variable: &Variable) -> Option<bool> {
        if self.preserved_registers.contains(variable) {
            Some(true)
        } else if self.trashed_registers.contains(variable) {
            Some(false)
        } else {
            None
        }
    }

    /// Is the given register trashed across a call. `None` when the
    /// convention says nothing about the register.
    pub fn is_trashed(&self, variable: &Variable) -> Option<bool> {
        if self.trashed_registers.contains(variable) {
            Some(true)
        } else if self.preserved_registers.contains(variable) {
            Some(false)
        } else {
            None
        }
    }
}
