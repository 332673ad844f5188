use crate::il::*;

fn fallthrough() -> Statement {
    Statement::unknown_procedure_call(std::sync::Arc::new(Goto::call(expr_var("eax", 32))))
        .unwrap()
}

#[test]
fn assign_used_and_defined() {
    let statement = Statement::assign(
        var("eax", 32),
        Expression::add(expr_var("ebx", 32), expr_const(1, 32)).unwrap(),
    )
    .unwrap();

    assert!(statement.defined_variables().contains(&var("eax", 32)));
    assert_eq!(statement.defined_variables().len(), 1);
    assert!(statement.used_variables().contains(&var("ebx", 32)));
    assert_eq!(statement.used_variables().len(), 1);
    assert!(statement.used_memory_locations().is_empty());
}

#[test]
fn store_defines_nothing() {
    // A write to memory uses the address expression's variables, it does
    // not define any variable.
    let statement = Statement::store(
        MemoryLocation::new(
            Expression::add(expr_var("esp", 32), expr_const(4, 32)).unwrap(),
            32,
        ),
        expr_var("eax", 32),
    )
    .unwrap();

    assert!(statement.defined_variables().is_empty());
    assert!(statement.used_variables().contains(&var("esp", 32)));
    assert!(statement.used_variables().contains(&var("eax", 32)));
    assert!(statement.used_memory_locations().is_empty());
}

#[test]
fn store_counts_nested_loads_only() {
    let load = Expression::memory(expr_var("ebx", 32), 32).unwrap();
    let statement =
        Statement::store(MemoryLocation::new(expr_var("esp", 32), 32), load.clone()).unwrap();

    assert_eq!(statement.used_memory_locations().len(), 1);
    if let Expression::Memory(location) = &load {
        assert!(statement.used_memory_locations().contains(location));
    } else {
        unreachable!();
    }
}

#[test]
fn goto_uses_target_and_condition() {
    let statement = Statement::goto(
        Goto::conditional_jump(
            expr_var("eax", 32),
            Expression::cmpeq(expr_var("ecx", 32), expr_const(0, 32)).unwrap(),
        )
        .unwrap(),
    );

    assert!(statement.defined_variables().is_empty());
    assert!(statement.used_variables().contains(&var("eax", 32)));
    assert!(statement.used_variables().contains(&var("ecx", 32)));
}

#[test]
fn derived_sets_are_deterministic() {
    let statement = fallthrough();

    let defined = statement.defined_variables().clone();
    let used = statement.used_variables().clone();
    let memory = statement.used_memory_locations().clone();

    assert_eq!(statement.defined_variables(), &defined);
    assert_eq!(statement.used_variables(), &used);
    assert_eq!(statement.used_memory_locations(), &memory);
}

#[test]
fn evaluate_specializes_assign() {
    let mut context = Context::new();
    context.bind(var("ebx", 32), expr_const(10, 32)).unwrap();
    let before = context.clone();

    let statement = Statement::assign(
        var("eax", 32),
        Expression::add(expr_var("ebx", 32), expr_const(1, 32)).unwrap(),
    )
    .unwrap();

    let evaluated = statement.evaluate(&context).unwrap();
    assert_eq!(
        evaluated,
        Statement::assign(var("eax", 32), expr_const(11, 32)).unwrap()
    );

    // Pure: context and statement unchanged.
    assert_eq!(context, before);
    assert!(statement.used_variables().contains(&var("ebx", 32)));
}

#[test]
fn evaluate_resolves_goto_target() {
    let mut context = Context::new();
    context.bind(var("eax", 32), expr_const(0x8048000, 32)).unwrap();

    let statement = Statement::goto(Goto::jump(expr_var("eax", 32)));
    let evaluated = statement.evaluate(&context).unwrap();

    assert_eq!(
        evaluated,
        Statement::goto(Goto::jump(expr_const(0x8048000, 32)))
    );
}

#[test]
fn evaluate_prunes_false_branch() {
    let condition = Expression::cmpeq(expr_const(0, 32), expr_const(1, 32)).unwrap();
    let statement =
        Statement::goto(Goto::conditional_jump(expr_const(0x1000, 32), condition).unwrap());

    let evaluated = statement.evaluate(&Context::new()).unwrap();
    assert!(evaluated.is_nop());
}

#[test]
fn evaluate_drops_true_condition() {
    let condition = Expression::cmpeq(expr_const(1, 32), expr_const(1, 32)).unwrap();
    let statement =
        Statement::goto(Goto::conditional_jump(expr_const(0x1000, 32), condition).unwrap());

    let evaluated = statement.evaluate(&Context::new()).unwrap();
    assert_eq!(
        evaluated,
        Statement::goto(Goto::jump(expr_const(0x1000, 32)))
    );
}

#[test]
fn evaluate_is_idempotent_for_specializing_variants() {
    let mut context = Context::new();
    context.bind(var("eax", 32), expr_const(0x8048000, 32)).unwrap();

    let statement = Statement::goto(Goto::jump(expr_var("eax", 32)));
    let once = statement.evaluate(&context).unwrap();
    let twice = once.evaluate(&context).unwrap();
    assert_eq!(once, twice);
}

#[test]
fn evaluate_discharges_true_assumption() {
    let statement = Statement::assume(
        Expression::cmpeq(expr_const(1, 32), expr_const(1, 32)).unwrap(),
    )
    .unwrap();
    assert!(statement.evaluate(&Context::new()).unwrap().is_nop());

    // A failed assumption is kept for the solver to prune.
    let statement = Statement::assume(
        Expression::cmpeq(expr_const(0, 32), expr_const(1, 32)).unwrap(),
    )
    .unwrap();
    assert!(!statement.evaluate(&Context::new()).unwrap().is_nop());
}

#[test]
fn visitor_dispatches_to_matching_operation() {
    struct KindName;

    impl StatementVisitor<&'static str> for KindName {
        fn visit_assign(&mut self, _: &Variable, _: &Expression) -> &'static str {
            "assign"
        }
        fn visit_store(&mut self, _: &MemoryLocation, _: &Expression) -> &'static str {
            "store"
        }
        fn visit_goto(&mut self, _: &Goto) -> &'static str {
            "goto"
        }
        fn visit_unknown_procedure_call(&mut self, _: &UnknownProcedureCall) -> &'static str {
            "unknown_procedure_call"
        }
        fn visit_assume(&mut self, _: &Expression) -> &'static str {
            "assume"
        }
        fn visit_nop(&mut self) -> &'static str {
            "nop"
        }
        fn visit_halt(&mut self) -> &'static str {
            "halt"
        }
    }

    let assign = Statement::assign(var("eax", 32), expr_const(0, 32)).unwrap();
    let goto = Statement::goto(Goto::jump(expr_const(0x1000, 32)));

    assert_eq!(assign.accept(&mut KindName), "assign");
    assert_eq!(goto.accept(&mut KindName), "goto");
    assert_eq!(fallthrough().accept(&mut KindName), "unknown_procedure_call");
}

#[test]
fn serde_round_trip() {
    let statements = vec![
        Statement::assign(var("eax", 32), expr_const(1, 32)).unwrap(),
        Statement::goto(Goto::call(expr_var("eax", 32))),
        fallthrough(),
        Statement::halt(),
    ];

    for statement in statements {
        let json = serde_json::to_string(&statement).unwrap();
        let decoded: Statement = serde_json::from_str(&json).unwrap();
        assert_eq!(decoded, statement);
    }
}

#[test]
fn display_forms() {
    let statement = Statement::assign(
        var("eax", 32),
        Expression::add(expr_var("eax", 32), expr_const(1, 32)).unwrap(),
    )
    .unwrap();
    assert_eq!(statement.to_string(), "eax = (eax + 0x1:32)");

    assert_eq!(Statement::nop().to_string(), "nop");
    assert_eq!(
        Statement::goto(Goto::call(expr_var("eax", 32))).to_string(),
        "call eax"
    );
}
