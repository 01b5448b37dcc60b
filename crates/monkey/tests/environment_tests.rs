//! Session environment tests: persistence, closures and scope reclamation

use monkey::*;
use pretty_assertions::assert_eq;

fn eval_in(env: &mut Environment, src: &str) -> Value {
    let (program, errors) = parse_program(src);
    assert!(errors.is_empty(), "parse errors for {src:?}: {errors:?}");
    eval(&program, env)
}

// ═══════════════════════════════════════════════════════════════════════
// Persistence
// ═══════════════════════════════════════════════════════════════════════

#[test]
fn test_bindings_persist_across_programs() {
    let mut env = Environment::new();
    eval_in(&mut env, "let x = 5;");
    eval_in(&mut env, "let double = fn(n) { n * 2 };");
    assert_eq!(eval_in(&mut env, "double(x)"), Value::Integer(10));
}

#[test]
fn test_rebinding_replaces() {
    let mut env = Environment::new();
    eval_in(&mut env, "let x = 1;");
    eval_in(&mut env, "let x = x + 1;");
    assert_eq!(env.get("x"), Some(&Value::Integer(2)));
}

#[test]
fn test_error_does_not_discard_earlier_bindings() {
    let mut env = Environment::new();
    let result = eval_in(&mut env, "let a = 1; let b = a + true; let c = 3;");
    assert!(result.is_error());
    assert!(env.contains("a"));
    assert!(!env.contains("b"));
    assert!(!env.contains("c"));
}

#[test]
fn test_names_in_root_scope() {
    let mut env = Environment::new();
    eval_in(&mut env, "let b = 1; let a = fn() { 2 };");
    assert_eq!(env.names_in_current_scope(), vec!["a", "b"]);
}

// ═══════════════════════════════════════════════════════════════════════
// Scope Lifetimes
// ═══════════════════════════════════════════════════════════════════════

#[test]
fn test_uncaptured_scopes_are_released_immediately() {
    let mut env = Environment::new();
    eval_in(
        &mut env,
        "let sum = fn(n) { if (n == 0) { 0 } else { n + sum(n - 1) } }; sum(50)",
    );
    assert_eq!(env.live_scopes(), 1);
}

#[test]
fn test_captured_scope_outlives_call() {
    let mut env = Environment::new();
    eval_in(&mut env, "let make = fn(x) { fn() { x } }; let f = make(7);");
    assert_eq!(env.live_scopes(), 2);
    assert_eq!(eval_in(&mut env, "f()"), Value::Integer(7));
}

#[test]
fn test_collect_frees_unreachable_closures() {
    let mut env = Environment::new();
    eval_in(
        &mut env,
        "let make = fn(x) { fn() { x } }; make(1); make(2); let keep = make(3);",
    );
    assert_eq!(env.live_scopes(), 4);

    assert_eq!(env.collect_garbage(&[]), 2);
    assert_eq!(env.live_scopes(), 2);
    assert_eq!(eval_in(&mut env, "keep()"), Value::Integer(3));
}

#[test]
fn test_collect_reclaims_self_referential_closure() {
    let mut env = Environment::new();
    let src = "
let counter = fn() {
  let go = fn(n) { if (n == 0) { 0 } else { go(n - 1) } };
  go
};
let c = counter();
c(3)";
    assert_eq!(eval_in(&mut env, src), Value::Integer(0));
    assert_eq!(env.live_scopes(), 2);

    // The only remaining path to the cycle is `c`
    eval_in(&mut env, "let c = 0;");
    assert_eq!(env.collect_garbage(&[]), 1);
    assert_eq!(env.live_scopes(), 1);
}

#[test]
fn test_collect_keeps_closures_in_collections() {
    let mut env = Environment::new();
    eval_in(
        &mut env,
        r#"let make = fn(x) { fn() { x } }; let fs = [make(1)]; let h = {"g": make(2)};"#,
    );
    assert_eq!(env.collect_garbage(&[]), 0);
    assert_eq!(eval_in(&mut env, r#"fs[0]() + h["g"]()"#), Value::Integer(3));
}

#[test]
fn test_collect_roots_keep_values_alive() {
    let mut env = Environment::new();
    let held = eval_in(&mut env, "fn(x) { fn() { x } }(9)");
    assert_eq!(env.live_scopes(), 2);
    assert_eq!(env.collect_garbage(&[&held]), 0);

    let Value::Function(func) = &held else {
        panic!("expected function, got {held:?}");
    };
    let result = eval::call_value(held.clone(), vec![], &mut env, &EvalContext::default());
    assert_eq!(result.unwrap(), Value::Integer(9));
    assert_eq!(func.arity(), 0);
}

#[test]
fn test_calling_reclaimed_closure_is_an_error() {
    let mut env = Environment::new();
    let held = eval_in(&mut env, "fn(x) { fn() { x } }(9)");
    env.collect_garbage(&[]);

    let err = eval::call_value(held, vec![], &mut env, &EvalContext::default()).unwrap_err();
    assert!(matches!(err, EvalError::DanglingScope));
    assert_eq!(err.to_string(), "dangling scope reference");
}

#[test]
fn test_threshold_triggers_collection() {
    let mut env = Environment::new();
    let ctx = EvalContext {
        gc_threshold: 2,
        ..EvalContext::default()
    };
    let (program, _) = parse_program("let make = fn(x) { fn() { x } }; make(1); make(2); make(3); 0");
    eval_with_context(&program, &mut env, &ctx);
    assert_eq!(env.live_scopes(), 1);
}

#[test]
fn test_captured_scopes_held_until_program_ends() {
    let mut env = Environment::new();
    let result = eval_in(
        &mut env,
        "let count = fn(n) { let f = fn() { n }; if (n == 0) { 0 } else { count(n - 1) } }; count(50)",
    );
    assert_eq!(result, Value::Integer(0));

    // Root plus one captured call scope per activation, none reachable
    assert_eq!(env.live_scopes(), 52);
    assert_eq!(env.collect_garbage(&[]), 51);
    assert_eq!(env.live_scopes(), 1);
}

// ═══════════════════════════════════════════════════════════════════════
// Call Depth
// ═══════════════════════════════════════════════════════════════════════

#[test]
fn test_max_call_depth() {
    let mut env = Environment::new();
    let ctx = EvalContext::with_max_call_depth(10);

    let (program, _) = parse_program(
        "let down = fn(n) { if (n == 0) { 0 } else { down(n - 1) } }; down(9)",
    );
    assert_eq!(eval_with_context(&program, &mut env, &ctx), Value::Integer(0));

    let (program, _) = parse_program("down(10)");
    assert_eq!(
        eval_with_context(&program, &mut env, &ctx),
        Value::error("stack overflow: call depth 11 exceeds limit 10")
    );
    assert_eq!(env.call_depth(), 0);
    assert_eq!(env.live_scopes(), 1);
}
