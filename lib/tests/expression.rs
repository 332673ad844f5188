use crate::error::Error;
use crate::eval;
use crate::il::*;

#[test]
fn structural_equality_and_hashing() {
    use std::collections::hash_map::DefaultHasher;
    use std::hash::{Hash, Hasher};

    fn hash(expression: &Expression) -> u64 {
        let mut hasher = DefaultHasher::new();
        expression.hash(&mut hasher);
        hasher.finish()
    }

    let a = Expression::add(expr_var("eax", 32), expr_const(4, 32)).unwrap();
    let b = Expression::add(expr_var("eax", 32), expr_const(4, 32)).unwrap();
    let c = Expression::add(expr_var("ebx", 32), expr_const(4, 32)).unwrap();

    assert_eq!(a, b);
    assert_eq!(hash(&a), hash(&b));
    assert_ne!(a, c);
}

#[test]
fn constructors_enforce_sorts() {
    assert_eq!(
        Expression::add(expr_var("eax", 32), expr_const(1, 16)),
        Err(Error::Sort)
    );
    assert_eq!(
        Expression::zext(16, expr_var("eax", 32)),
        Err(Error::Sort)
    );
    assert_eq!(
        Expression::trun(32, expr_var("eax", 32)),
        Err(Error::Sort)
    );
    assert!(Expression::cmpeq(expr_var("eax", 32), expr_const(0, 32)).is_ok());
}

#[test]
fn comparison_is_one_bit() {
    let cmp = Expression::cmpltu(expr_var("eax", 32), expr_const(10, 32)).unwrap();
    assert_eq!(cmp.bits(), 1);
}

#[test]
fn collect_variables_includes_memory_addresses() {
    let load = Expression::memory(
        Expression::add(expr_var("ebp", 32), expr_const(8, 32)).unwrap(),
        32,
    )
    .unwrap();
    let expression = Expression::add(load, expr_var("eax", 32)).unwrap();

    let variables = expression.collect_variables();
    assert_eq!(variables.len(), 2);
    assert!(variables.contains(&&var("ebp", 32)));
    assert!(variables.contains(&&var("eax", 32)));
}

#[test]
fn collect_memory_locations_includes_nested_reads() {
    let inner = Expression::memory(expr_var("ebx", 32), 32).unwrap();
    let outer = Expression::memory(inner.clone(), 32).unwrap();

    let locations = outer.collect_memory_locations();
    assert_eq!(locations.len(), 2);

    if let Expression::Memory(inner_location) = &inner {
        assert!(locations.contains(&inner_location.as_ref()));
    } else {
        unreachable!();
    }
}

#[test]
fn eval_constant_expression() {
    let expression = Expression::add(expr_const(10, 32), expr_const(20, 32)).unwrap();
    assert_eq!(eval::eval(&expression).unwrap().value(), 30);

    let expression = Expression::cmplts(expr_const(0xffffffff, 32), expr_const(1, 32)).unwrap();
    assert_eq!(eval::eval(&expression).unwrap().value(), 1);
}

#[test]
fn eval_errors() {
    assert_eq!(
        eval::eval(&expr_var("eax", 32)),
        Err(Error::UnboundVariable("eax".to_string()))
    );
    let division = Expression::divu(expr_const(1, 32), expr_const(0, 32)).unwrap();
    assert_eq!(eval::eval(&division), Err(Error::DivideByZero));
}

#[test]
fn simplify_folds_constant_subtrees() {
    let expression = Expression::add(
        Expression::add(expr_const(100, 32), expr_const(50, 32)).unwrap(),
        expr_var("eax", 32),
    )
    .unwrap();

    let simplified = eval::simplify(&expression).unwrap();
    assert_eq!(
        simplified,
        Expression::add(expr_const(150, 32), expr_var("eax", 32)).unwrap()
    );

    // Simplification is idempotent.
    assert_eq!(eval::simplify(&simplified).unwrap(), simplified);
}

#[test]
fn substitute_is_pure() {
    let mut context = Context::new();
    context.bind(var("eax", 32), expr_const(4, 32)).unwrap();
    let before = context.clone();

    let expression = Expression::add(expr_var("eax", 32), expr_var("ebx", 32)).unwrap();
    let substituted = context.substitute(&expression);

    assert_eq!(
        substituted,
        Expression::add(expr_const(4, 32), expr_var("ebx", 32)).unwrap()
    );
    // Neither input changed.
    assert_eq!(context, before);
    assert_eq!(
        expression,
        Expression::add(expr_var("eax", 32), expr_var("ebx", 32)).unwrap()
    );
}

#[test]
fn bind_enforces_sorts() {
    let mut context = Context::new();
    assert_eq!(
        context.bind(var("eax", 32), expr_const(1, 16)),
        Err(Error::Sort)
    );
}

#[test]
fn display_forms() {
    let expression = Expression::add(expr_var("eax", 32), expr_const(4, 32)).unwrap();
    assert_eq!(expression.to_string(), "(eax + 0x4:32)");

    let load = Expression::memory(expr_var("esp", 32), 32).unwrap();
    assert_eq!(load.to_string(), "mem32[esp]");
}
