//! Property-based tests for stateful closures.
//!
//! ## Arity
//! - For every handler arity `H` in `2..=12`, the closure has arity `H - 2`
//!
//! ## Purity
//! - Calling the same closure value twice gives the same result
//! - Rebuilding from the same state gives a closure with the same behaviour

use pond::{Callable, MAX_HANDLER_ARITY, Value, construct};
use proptest::prelude::*;

fn accumulating_counter() -> Callable {
    Callable::from_fn3(|rebuild, total, increment| {
        let total = total.as_int().unwrap_or(0).wrapping_add(increment.as_int().unwrap_or(0));
        Ok(Value::pair(Value::from(total), rebuild.pipe(&[Value::from(total)])?))
    })
}

proptest! {
    #[test]
    fn prop_closure_arity(handler_arity in 2usize..=MAX_HANDLER_ARITY) {
        let handler = Callable::primitive(handler_arity, |_| Ok(Value::Nil)).unwrap();
        let closure = construct(Value::Nil, handler).unwrap();
        prop_assert_eq!(closure.arity(), Ok(handler_arity - 2));
    }

    #[test]
    fn prop_closure_is_pure(initial in -1000i64..1000, increments in prop::collection::vec(-100i64..100, 0..20)) {
        let mut closure = Value::from(construct(Value::from(initial), accumulating_counter()).unwrap());
        for increment in increments {
            let first = closure.pipe(&[Value::from(increment)]).unwrap().into_pair().unwrap();
            let second = closure.pipe(&[Value::from(increment)]).unwrap().into_pair().unwrap();
            prop_assert_eq!(&first.0, &second.0);
            closure = first.1;
        }
    }

    #[test]
    fn prop_chain_matches_fold(initial in -1000i64..1000, increments in prop::collection::vec(-100i64..100, 1..20)) {
        let mut closure = Value::from(construct(Value::from(initial), accumulating_counter()).unwrap());
        let mut last = Value::Nil;
        for increment in &increments {
            let (value, next) = closure.pipe(&[Value::from(*increment)]).unwrap().into_pair().unwrap();
            last = value;
            closure = next;
        }
        let expected = increments.iter().fold(initial, |total, increment| total.wrapping_add(*increment));
        prop_assert_eq!(last, Value::from(expected));
    }
}
