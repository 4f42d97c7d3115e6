use monkey::{parse, run, Environment, Value};

fn eval(source: &str) -> Value {
    run(source, &Environment::new()).expect("Parsing failed")
}

#[test]
fn test_arithmetic() {
    assert_eq!(eval("5 + 5 + 5 + 5 - 10"), Value::Integer(10));
    assert_eq!(eval("2 * (5 + 10)"), Value::Integer(30));
    assert_eq!(eval("(5 + 10 * 2 + 15 / 3) * 2 + -10"), Value::Integer(50));
}

#[test]
fn test_sequential_lets() {
    assert_eq!(
        eval("let a = 5; let b = a; let c = a + b + 5; c;"),
        Value::Integer(15)
    );
}

#[test]
fn test_runtime_errors_are_values() {
    assert_eq!(eval("5 + true"), Value::error("type mismatch: INTEGER + BOOL"));
    assert_eq!(eval("foobar"), Value::error("identifier not found: foobar"));
    assert_eq!(
        eval(r#"{"name": "monkey"}[fn(x) { x }]"#),
        Value::error("unusable as hash key: FUNCTION")
    );
    assert_eq!(eval("5 + true").to_string(), "ERROR: type mismatch: INTEGER + BOOL");
}

#[test]
fn test_parse_errors_are_reported() {
    let errors = run("let = 5; (1 + 2", &Environment::new()).unwrap_err();
    assert_eq!(
        errors.messages(),
        vec![
            "expected next token to be IDENT, got = instead",
            "no prefix parse function for = found",
            "expected next token to be ), got EOF instead",
        ]
    );
    assert!(errors.to_string().starts_with("[line 1:5]"));
}

#[test]
fn test_environment_persists_between_runs() {
    let env = Environment::new();
    assert_eq!(run("let x = 40;", &env).unwrap(), Value::Null);
    assert_eq!(run("let add = fn(a) { a + x };", &env).unwrap(), Value::Null);
    assert_eq!(run("add(2)", &env).unwrap(), Value::Integer(42));
}

#[test]
fn test_inspect_output() {
    assert_eq!(eval("[1, 2 * 2, 3 + 3]").to_string(), "[1, 4, 6]");
    assert_eq!(eval(r#"{"a": 1, 2: true}"#).to_string(), "{a: 1, 2: true}");
    assert_eq!(eval("fn(x, y) { x + y }").to_string(), "fn(x, y) {\n(x + y)\n}");
    assert_eq!(eval("len").to_string(), "builtin function");
    assert_eq!(eval("if (false) { 1 }").to_string(), "null");
}

#[test]
fn test_array_builtins() {
    assert_eq!(eval("len([1, 2, 3])"), Value::Integer(3));
    assert_eq!(eval("[1, 2, 3][3]"), Value::Null);
    assert_eq!(eval("[1, 2, 3][-1]"), Value::Null);
    assert_eq!(eval("last(push([1, 2], 3))"), Value::Integer(3));
    assert_eq!(eval("let a = [1]; push(a, 2); len(a)"), Value::Integer(1));
}

#[test]
fn test_canonical_form_is_stable() {
    let source = "let f = fn(a, b) { if (a > b) { return a - b; } else { b * -a } }; f(1, 2)[0]";
    let first = parse(source).unwrap().to_string();
    let second = parse(&first).unwrap().to_string();
    assert_eq!(first, second);
    assert_eq!(
        first,
        "let f = fn(a, b) { if ((a > b)) { return (a - b); } else { (b * (-a)) } };(f(1, 2)[0])"
    );
}
