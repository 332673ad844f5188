use std::sync::Arc;

use crate::abi;
use crate::error::Error;
use crate::il::*;

fn fallthrough_of(target: Expression) -> Statement {
    Statement::unknown_procedure_call(Arc::new(Goto::call(target))).unwrap()
}

#[test]
fn abi_sets_are_sound_and_shared() {
    let a = fallthrough_of(expr_var("eax", 32));
    let b = fallthrough_of(Expression::memory(expr_var("ebx", 32), 32).unwrap());

    for statement in [&a, &b] {
        assert_eq!(statement.used_variables(), &*abi::FASTCALL_USED);
        assert_eq!(statement.defined_variables(), &*abi::INTEL_ABI_DEFINED);
        assert!(!statement.used_variables().is_empty());
    }
    assert_eq!(a.used_variables(), b.used_variables());
    assert_eq!(a.defined_variables(), b.defined_variables());
}

#[test]
fn memory_locations_are_always_empty() {
    // Even when the originating call itself reads memory: the memory
    // effects of an unknown call are the solver's business.
    let load = Expression::memory(expr_var("ebx", 32), 32).unwrap();
    let statement = fallthrough_of(load);
    assert!(statement.used_memory_locations().is_empty());
}

#[test]
fn construction_requires_a_call() {
    let result = Statement::unknown_procedure_call(Arc::new(Goto::jump(expr_var("eax", 32))));
    assert_eq!(result, Err(Error::NotACall("goto eax".to_string())));

    let result = Statement::unknown_procedure_call(Arc::new(Goto::ret(expr_var("eax", 32))));
    assert!(result.is_err());
}

#[test]
fn equality_follows_the_originating_call() {
    use std::collections::hash_map::DefaultHasher;
    use std::hash::{Hash, Hasher};

    fn hash(statement: &Statement) -> u64 {
        let mut hasher = DefaultHasher::new();
        statement.hash(&mut hasher);
        hasher.finish()
    }

    let a = fallthrough_of(expr_var("eax", 32));
    let b = fallthrough_of(expr_var("eax", 32));
    let c = fallthrough_of(expr_var("ebx", 32));

    assert_eq!(a, b);
    assert_eq!(hash(&a), hash(&b));
    assert_ne!(a, c);
}

#[test]
fn renders_originating_target() {
    let statement = fallthrough_of(expr_var("eax", 32));
    assert_eq!(statement.to_string(), "return from call(eax)");
}

#[test]
fn evaluate_is_the_identity() {
    let mut context = Context::new();
    context.bind(var("eax", 32), expr_const(0x8048000, 32)).unwrap();

    let statement = fallthrough_of(expr_var("eax", 32));
    let once = statement.evaluate(&context).unwrap();
    let twice = once.evaluate(&context).unwrap();

    // No structural evaluation models the unknown call; even a context that
    // could resolve the target leaves the statement unchanged.
    assert_eq!(once, statement);
    assert_eq!(twice, once);
}

#[test]
fn source_is_shared_not_copied() {
    let source = Arc::new(Goto::call(expr_var("eax", 32)));
    let statement = Statement::unknown_procedure_call(Arc::clone(&source)).unwrap();

    if let StatementKind::UnknownProcedureCall(call) = statement.kind() {
        assert_eq!(call.source(), source.as_ref());
    } else {
        unreachable!();
    }
}
