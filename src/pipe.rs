//! Forwarding arguments into a callable.
//!
//! [`pipe`] is the function form, [`pipe!`](crate::pipe!) converts each
//! argument with [`Value::from`] first, and [`Value::pipe`] is the method
//! form used for chaining.

use crate::callable::callable_apply;
use crate::error::Result;
use crate::value::Value;

/// Invokes `callable` with `arguments`.
///
/// # Errors
///
/// See [`callable_apply`].
///
/// # Examples
///
/// ```rust
/// use pond::{Callable, Value, pipe};
///
/// let negate = Value::from(Callable::from_fn1(|x| Ok(Value::from(-x.as_int().unwrap_or(0)))));
/// assert_eq!(pipe(&negate, &[Value::from(3)]).unwrap(), Value::from(-3));
/// ```
pub fn pipe(callable: &Value, arguments: &[Value]) -> Result<Value> {
    callable_apply(callable, arguments)
}

/// Invokes a callable, converting every argument with `Value::from`.
///
/// The callable may be a `Value` or a `Callable`; it is borrowed, not moved.
///
/// # Examples
///
/// ```rust
/// use pond::{Callable, Value, pipe};
///
/// let concat = Callable::from_fn2(|a, b| {
///     Ok(Value::from(format!("{}{}", a.as_str().unwrap_or(""), b.as_str().unwrap_or(""))))
/// });
/// assert_eq!(pipe!(concat, "po", "nd").unwrap(), Value::from("pond"));
///
/// let constant = Callable::from_fn0(|| Ok(Value::atom("ok")));
/// assert_eq!(pipe!(constant).unwrap(), Value::atom("ok"));
/// ```
#[macro_export]
macro_rules! pipe {
    ($callable:expr $(, $argument:expr)* $(,)?) => {
        $crate::pipe(
            &$crate::Value::from(&$callable),
            &[$($crate::Value::from($argument)),*],
        )
    };
}
