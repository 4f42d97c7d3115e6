use monkey::{run, Environment, Value};

fn eval(source: &str) -> Value {
    run(source, &Environment::new()).expect("Parsing failed")
}

#[test]
fn test_basic_closure() {
    let source = r#"
        let x = "global";
        let makeClosure = fn() {
            let y = "captured";
            let inner = fn() { x + " " + y };
            inner
        };
        let closure = makeClosure();
        closure()
    "#;
    match eval(source) {
        Value::String(s) => assert_eq!(s, "global captured"),
        other => panic!("Expected string, got {:?}", other),
    }
}

#[test]
fn test_adder() {
    let source = "
        let newAdder = fn(x) { fn(y) { x + y } };
        let addTwo = newAdder(2);
        addTwo(3);
    ";
    assert_eq!(eval(source), Value::Integer(5));
}

#[test]
fn test_each_call_gets_its_own_frame() {
    let source = "
        let newAdder = fn(x) { fn(y) { x + y } };
        let addOne = newAdder(1);
        let addTen = newAdder(10);
        addOne(1) + addTen(1)
    ";
    assert_eq!(eval(source), Value::Integer(13));
}

#[test]
fn test_closure_outlives_defining_call() {
    // the frame holding `a` is gone from the call stack when f1 runs
    let source = r#"
        let make = fn() {
            let a = "first";
            fn() { a }
        };
        let f1 = make();
        f1()
    "#;
    assert_eq!(eval(source), Value::String("first".to_string()));
}

#[test]
fn test_closure_sees_later_bindings_in_captured_scope() {
    let source = "
        let f = fn() { later };
        let later = 7;
        f()
    ";
    assert_eq!(eval(source), Value::Integer(7));
}

#[test]
fn test_recursion_through_captured_scope() {
    let source = "
        let fib = fn(n) {
            if (n < 2) { return n; }
            fib(n - 1) + fib(n - 2)
        };
        fib(15)
    ";
    assert_eq!(eval(source), Value::Integer(610));
}

#[test]
fn test_higher_order_functions() {
    let source = "
        let map = fn(arr, f) {
            let iter = fn(arr, acc) {
                if (len(arr) == 0) {
                    acc
                } else {
                    iter(rest(arr), push(acc, f(first(arr))))
                }
            };
            iter(arr, [])
        };
        let reduce = fn(arr, initial, f) {
            let iter = fn(arr, result) {
                if (len(arr) == 0) {
                    result
                } else {
                    iter(rest(arr), f(result, first(arr)))
                }
            };
            iter(arr, initial)
        };
        let doubled = map([1, 2, 3, 4], fn(x) { x * 2 });
        reduce(doubled, 0, fn(acc, x) { acc + x })
    ";
    assert_eq!(eval(source), Value::Integer(20));
}
