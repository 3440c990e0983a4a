//! Integration tests for the callable abstraction.
//!
//! Covers:
//! - Typed adapters in both directions
//! - Uniform N-ary adaptation with `to_callable_fn`
//! - Piping plain Rust closures

use pond::{
    Callable, MAX_ARITY, MAX_HANDLER_ARITY, PondError, Value, callable_apply, callable_arity,
    pipe, to_callable_fn,
};
use rstest::rstest;

fn int(value: &Value) -> i64 {
    value.as_int().unwrap_or(0)
}

// =============================================================================
// Typed Adapters
// =============================================================================

#[rstest]
fn typed_adapter_of_a_stateful_closure() {
    let counter = pond::construct(
        Value::from(10),
        Callable::from_fn3(|rebuild, total, amount| {
            let total = int(&total) + int(&amount);
            Ok(Value::pair(Value::from(total), rebuild.pipe(&[Value::from(total)])?))
        }),
    )
    .unwrap();

    let add = counter.to_fn1().unwrap();
    let (total, _) = add(Value::from(5)).unwrap().into_pair().unwrap();
    assert_eq!(total, Value::from(15));
}

#[rstest]
fn typed_adapter_outlives_its_source() {
    let function = {
        let triple = Callable::from_fn3(|a, b, c| Ok(Value::from(int(&a) * int(&b) * int(&c))));
        triple.to_fn3().unwrap()
    };
    assert_eq!(
        function(Value::from(2), Value::from(3), Value::from(4)),
        Ok(Value::from(24))
    );
}

#[rstest]
fn widest_primitive_accepts_every_argument() {
    let sum = Callable::primitive(MAX_HANDLER_ARITY, |arguments| {
        Ok(Value::from(arguments.iter().map(int).sum::<i64>()))
    })
    .unwrap();
    let arguments: Vec<Value> = (1..=12_i64).map(Value::from).collect();
    assert_eq!(sum.apply(&arguments), Ok(Value::from(78)));
}

// =============================================================================
// Uniform Adaptation
// =============================================================================

#[rstest]
#[case(0)]
#[case(1)]
#[case(5)]
#[case(MAX_ARITY)]
fn adapter_reports_the_resolved_arity(#[case] arity: usize) {
    let callable = Callable::primitive(arity, |arguments| Ok(Value::from(arguments.len() as i64)))
        .unwrap();
    let adapted = to_callable_fn(&Value::from(&callable)).unwrap();

    assert_eq!(adapted.arity(), arity);
    assert_eq!(adapted.callable(), &callable);
    assert_eq!(
        adapted.call(&vec![Value::Nil; arity]),
        Ok(Value::from(arity as i64))
    );
}

#[rstest]
#[case(Value::Nil, "nil")]
#[case(Value::from("text"), "str")]
#[case(Value::opaque(3_u8), "opaque")]
fn adapter_rejects_data(#[case] value: Value, #[case] kind: &'static str) {
    assert_eq!(to_callable_fn(&value), Err(PondError::unsupported(kind)));
    assert_eq!(callable_arity(&value), Err(PondError::unsupported(kind)));
    assert_eq!(callable_apply(&value, &[]), Err(PondError::unsupported(kind)));
}

#[rstest]
fn adapter_of_a_composite_uses_the_inner_arity() {
    let inner = Callable::from_fn2(|a, b| Ok(Value::pair(a, b)));
    let composite = Callable::composite(Callable::from_fn1(Ok), inner);
    assert_eq!(to_callable_fn(&Value::from(composite)).map(|f| f.arity()), Ok(2));
}

// =============================================================================
// Piping
// =============================================================================

#[rstest]
fn pipe_macro_converts_arguments() {
    let describe = Callable::from_fn3(|flag, number, text| {
        Ok(Value::tuple([flag, number, text]))
    });
    assert_eq!(
        pipe!(describe, true, 7, "seven"),
        Ok(Value::tuple([Value::from(true), Value::from(7), Value::from("seven")]))
    );
}

#[rstest]
fn pipe_function_and_method_agree() {
    let negate = Value::from(Callable::from_fn1(|x| Ok(Value::from(-int(&x)))));
    assert_eq!(pipe(&negate, &[Value::from(4)]), negate.pipe(&[Value::from(4)]));
}
