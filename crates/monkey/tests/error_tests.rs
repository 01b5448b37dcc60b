//! Runtime error reporting tests

use monkey::*;
use pretty_assertions::assert_eq;

fn run(src: &str) -> Value {
    let (program, errors) = parse_program(src);
    assert!(errors.is_empty(), "parse errors for {src:?}: {errors:?}");
    eval(&program, &mut Environment::new())
}

fn error_message(src: &str) -> String {
    match run(src) {
        Value::Error(message) => message.to_string(),
        other => panic!("expected error for {src:?}, got {other:?}"),
    }
}

#[test]
fn test_error_messages() {
    let cases = [
        ("5 + true;", "type mismatch: INTEGER + BOOLEAN"),
        ("5 + true; 5;", "type mismatch: INTEGER + BOOLEAN"),
        ("-true", "unknown operator: -BOOLEAN"),
        ("true + false;", "unknown operator: BOOLEAN + BOOLEAN"),
        ("true + false + true + false;", "unknown operator: BOOLEAN + BOOLEAN"),
        ("5; true + false; 5", "unknown operator: BOOLEAN + BOOLEAN"),
        ("if (10 > 1) { true + false; }", "unknown operator: BOOLEAN + BOOLEAN"),
        (
            "
if (10 > 1) {
  if (10 > 1) {
    return true + false;
  }

  return 1;
}",
            "unknown operator: BOOLEAN + BOOLEAN",
        ),
        ("foobar", "identifier not found: foobar"),
        (r#""Hello" - "World""#, "unknown operator: STRING - STRING"),
        (r#"{"name": "Monkey"}[fn(x) { x }];"#, "unusable as hash key: FUNCTION"),
        ("5(1)", "not a function: INTEGER"),
        ("fn(a, b) { a }(1)", "wrong number of arguments. got=1, want=2"),
        ("1[0]", "index operator not supported: INTEGER"),
        ("10 / 0", "division by zero"),
    ];
    for (src, expected) in cases {
        assert_eq!(error_message(src), expected, "{src}");
    }
}

#[test]
fn test_error_inspect_prefix() {
    assert_eq!(run("foobar").to_string(), "ERROR: identifier not found: foobar");
}

#[test]
fn test_error_stops_argument_evaluation() {
    let mut env = Environment::new();
    let (program, _) = parse_program(
        "let calls = 0; let f = fn(a, b) { a }; f(missing, puts(\"unreachable\"))",
    );
    assert_eq!(
        eval(&program, &mut env),
        Value::error("identifier not found: missing")
    );
}

#[test]
fn test_error_inside_function_propagates() {
    assert_eq!(
        error_message("let f = fn() { let x = 1 + true; 10 }; f() + 1"),
        "type mismatch: INTEGER + BOOLEAN"
    );
}

#[test]
fn test_error_leaves_env_consistent() {
    let mut env = Environment::new();
    let (program, _) = parse_program("let f = fn(x) { if (x) { x + true } }; f(1)");
    assert!(eval(&program, &mut env).is_error());

    assert!(env.is_root_scope());
    assert_eq!(env.call_depth(), 0);
    assert!(env.contains("f"));
}

#[test]
fn test_interrupted_evaluation() {
    let ctx = EvalContext::default();
    ctx.interrupt();

    let (program, _) = parse_program("1 + 1");
    let result = eval_with_context(&program, &mut Environment::new(), &ctx);
    assert_eq!(result, Value::error("evaluation interrupted"));

    ctx.reset_interrupt();
    let result = eval_with_context(&program, &mut Environment::new(), &ctx);
    assert_eq!(result, Value::Integer(2));
}

#[test]
fn test_eval_error_kinds() {
    let (program, _) = parse_program("foobar");
    let err = program
        .eval(&mut Environment::new(), &EvalContext::default())
        .unwrap_err();
    assert!(matches!(err, EvalError::UndefinedIdentifier { ref name } if name == "foobar"));
    assert!(!err.is_control_flow());
}
