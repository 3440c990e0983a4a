//! Accumulators that collect values while a chain is piped.
//!
//! An accumulator is an arity-1 stateful closure: called with a value it
//! returns the next accumulator, called with the stop sentinel it returns
//! what it has accumulated. [`acc_into`] pairs an accumulator with a
//! generator-style closure (one returning `(value, next)` pairs) so that
//! every [`pipe`](crate::pipe) through the pair feeds the produced value to
//! the accumulator. [`acc_value`] reads the result back out.
//!
//! # Examples
//!
//! ```rust
//! use pond::{Callable, Value, acc_into, acc_list, acc_value, construct};
//!
//! let naturals = construct(
//!     Value::from(1),
//!     Callable::from_fn2(|rebuild, n| {
//!         let next = rebuild.pipe(&[Value::from(n.as_int().unwrap_or(0) + 1)])?;
//!         Ok(Value::pair(n, next))
//!     }),
//! )
//! .unwrap();
//!
//! let piped = acc_into(naturals, acc_list().unwrap()).unwrap();
//! let piped = Value::from(piped).pipe(&[]).unwrap().pipe(&[]).unwrap().pipe(&[]).unwrap();
//!
//! assert_eq!(
//!     acc_value(&piped).unwrap(),
//!     Value::list([Value::from(1), Value::from(2), Value::from(3)])
//! );
//! ```

use crate::callable::{Callable, callable_apply, callable_arity};
use crate::closure::construct;
use crate::error::{PondError, Result};
use crate::trail::Trail;
use crate::value::Value;

/// An accumulator that collects every value, in call order.
///
/// Values are kept in a persistent list between steps, so each step is
/// O(1) and the list is materialised once, on stop.
///
/// # Errors
///
/// Never fails in practice; the error type comes from [`construct`].
pub fn acc_list() -> Result<Callable> {
    construct(
        Value::opaque(Trail::<Value>::default()),
        Callable::from_fn3(|rebuild, collected, value| {
            let collected = collected
                .downcast_ref::<Trail<Value>>()
                .ok_or_else(|| PondError::malformed(collected.kind()))?;
            if value.is_stop() {
                return Ok(Value::List(collected.to_call_order()));
            }
            rebuild.pipe(&[Value::opaque(collected.cons(value))])
        }),
    )
}

/// An accumulator that keeps only the most recent value, `Nil` if none.
///
/// # Errors
///
/// Never fails in practice; the error type comes from [`construct`].
pub fn acc_last() -> Result<Callable> {
    construct(
        Value::Nil,
        Callable::from_fn3(|rebuild, last, value| {
            if value.is_stop() {
                Ok(last)
            } else {
                rebuild.pipe(&[value])
            }
        }),
    )
}

/// An accumulator that folds values with `function(value, accumulated)`.
///
/// Without `initial`, the first value seeds the fold; stopping before any
/// value arrived then yields `Nil`.
///
/// # Errors
///
/// - [`PondError::UnsupportedCallableKind`] if `function` is not callable.
/// - [`PondError::ArityMismatch`] if `function` does not take two arguments.
///
/// # Examples
///
/// ```rust
/// use pond::{Callable, Value, acc_reduce, pipe};
///
/// let sum = Callable::from_fn2(|value, total| {
///     Ok(Value::from(value.as_int().unwrap_or(0) + total.as_int().unwrap_or(0)))
/// });
/// let accumulator = acc_reduce(sum, Some(Value::from(100))).unwrap();
///
/// let accumulator = pipe!(accumulator, 1).unwrap();
/// let accumulator = pipe!(accumulator, 2).unwrap();
/// assert_eq!(pond::acc_value(&accumulator).unwrap(), Value::from(103));
/// ```
pub fn acc_reduce(function: impl Into<Value>, initial: Option<Value>) -> Result<Callable> {
    let function = function.into();
    let arity = callable_arity(&function)?;
    if arity != 2 {
        return Err(PondError::arity_mismatch(2, arity));
    }
    // A stop sentinel as the state means nothing has been folded yet.
    let seed = initial.unwrap_or_else(Value::stop);
    construct(
        seed,
        Callable::from_fn3(move |rebuild, accumulated, value| {
            if value.is_stop() {
                return Ok(if accumulated.is_stop() {
                    Value::Nil
                } else {
                    accumulated
                });
            }
            let folded = if accumulated.is_stop() {
                value
            } else {
                callable_apply(&function, &[value, accumulated])?
            };
            rebuild.pipe(&[folded])
        }),
    )
}

/// Pairs `closure` with `accumulator` for piping.
///
/// # Errors
///
/// - [`PondError::UnsupportedCallableKind`] if either part is not callable.
/// - [`PondError::ArityMismatch`] if the accumulator does not take exactly
///   one argument.
pub fn acc_into(closure: impl Into<Value>, accumulator: impl Into<Value>) -> Result<Callable> {
    let closure = closure.into();
    let accumulator = accumulator.into();
    callable_arity(&closure)?;
    let arity = callable_arity(&accumulator)?;
    if arity != 1 {
        return Err(PondError::arity_mismatch(1, arity));
    }
    Ok(Callable::composite(accumulator, closure))
}

/// Extracts the accumulated value from a composite or from an accumulator.
///
/// # Errors
///
/// - [`PondError::UnsupportedCallableKind`] if `value` is not callable.
/// - [`PondError::ArityMismatch`] if an accumulator does not take exactly
///   one argument.
pub fn acc_value(value: &Value) -> Result<Value> {
    match value {
        Value::Callable(Callable::Composite(composite)) => acc_value(composite.accumulator()),
        accumulator => {
            let arity = callable_arity(accumulator)?;
            if arity != 1 {
                return Err(PondError::arity_mismatch(1, arity));
            }
            callable_apply(accumulator, &[Value::stop()])
        }
    }
}
