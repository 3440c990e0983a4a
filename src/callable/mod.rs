//! What it means for a value to be invoked with `N` arguments.
//!
//! A [`Callable`] is one of two closed variants:
//!
//! - [`Primitive`]: a native Rust function with a declared arity.
//! - [`Composite`]: an accumulator paired with an inner callable. Applying a
//!   composite feeds the arguments to the inner callable, expects a
//!   `(value, next)` pair back, threads `value` through the accumulator and
//!   returns a new composite of the advanced accumulator and `next`.
//!
//! Composites are how piping collects values from an evolving chain without
//! the chain itself knowing about accumulation.
//!
//! # Examples
//!
//! ```rust
//! use pond::{Callable, Value, callable_apply, callable_arity};
//!
//! let add = Value::from(Callable::from_fn2(|left, right| {
//!     Ok(Value::from(left.as_int().unwrap_or(0) + right.as_int().unwrap_or(0)))
//! }));
//!
//! assert_eq!(callable_arity(&add).unwrap(), 2);
//! assert_eq!(
//!     callable_apply(&add, &[Value::from(40), Value::from(2)]).unwrap(),
//!     Value::from(42)
//! );
//! ```

mod arity;

use std::fmt;
use std::rc::Rc;

use crate::error::{PondError, Result};
use crate::value::Value;

/// The largest arity a stateful closure, recorder, or [`CallableFn`] may have.
pub const MAX_ARITY: usize = 10;

/// The largest arity a primitive may declare: a handler for a
/// [`MAX_ARITY`]-ary closure also receives the self-reference and the state.
pub const MAX_HANDLER_ARITY: usize = MAX_ARITY + 2;

type Function = Rc<dyn Fn(&[Value]) -> Result<Value>>;

/// A native function with a declared arity.
#[derive(Clone)]
pub struct Primitive {
    arity: usize,
    function: Function,
}

impl Primitive {
    /// Returns the declared arity.
    pub const fn arity(&self) -> usize {
        self.arity
    }
}

impl PartialEq for Primitive {
    fn eq(&self, other: &Self) -> bool {
        self.arity == other.arity && Rc::ptr_eq(&self.function, &other.function)
    }
}

impl fmt::Debug for Primitive {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            formatter,
            "#Primitive<arity/{} {:p}>",
            self.arity,
            Rc::as_ptr(&self.function)
        )
    }
}

/// An accumulator paired with an inner callable.
#[derive(Clone, Debug, PartialEq)]
pub struct Composite {
    accumulator: Value,
    inner: Value,
}

impl Composite {
    /// The arity-1 accumulator that receives every produced value.
    pub const fn accumulator(&self) -> &Value {
        &self.accumulator
    }

    /// The callable the arguments are forwarded to.
    pub const fn inner(&self) -> &Value {
        &self.inner
    }
}

/// A value that can be invoked with a fixed number of arguments.
///
/// The set of variants is closed on purpose; everything in the crate
/// dispatches over exactly these two.
#[derive(Clone, Debug, PartialEq)]
pub enum Callable {
    /// A native function.
    Primitive(Primitive),
    /// An accumulator wrapped around another callable.
    Composite(Rc<Composite>),
}

impl Callable {
    /// Creates a primitive from a function over an argument slice.
    ///
    /// The function is only ever invoked with exactly `arity` arguments.
    ///
    /// # Errors
    ///
    /// Returns [`PondError::ArityTooLarge`] if `arity` exceeds
    /// [`MAX_HANDLER_ARITY`].
    ///
    /// # Examples
    ///
    /// ```rust
    /// use pond::{Callable, PondError, Value};
    ///
    /// let count = Callable::primitive(3, |arguments| Ok(Value::from(arguments.len() as i64))).unwrap();
    /// assert_eq!(count.apply(&[Value::Nil, Value::Nil, Value::Nil]).unwrap(), Value::from(3));
    ///
    /// assert!(matches!(
    ///     Callable::primitive(13, |_| Ok(Value::Nil)),
    ///     Err(PondError::ArityTooLarge { arity: 13, maximum: 12 })
    /// ));
    /// ```
    pub fn primitive<F>(arity: usize, function: F) -> Result<Self>
    where
        F: Fn(&[Value]) -> Result<Value> + 'static,
    {
        if arity > MAX_HANDLER_ARITY {
            return Err(PondError::arity_too_large(arity, MAX_HANDLER_ARITY));
        }
        Ok(Self::primitive_unchecked(arity, function))
    }

    pub(crate) fn primitive_unchecked<F>(arity: usize, function: F) -> Self
    where
        F: Fn(&[Value]) -> Result<Value> + 'static,
    {
        Self::Primitive(Primitive {
            arity,
            function: Rc::new(function),
        })
    }

    /// Pairs `accumulator` with `inner`.
    ///
    /// Neither value is checked here; a non-callable part surfaces as an
    /// error on the first [`arity`](Self::arity) or [`apply`](Self::apply).
    pub fn composite(accumulator: impl Into<Value>, inner: impl Into<Value>) -> Self {
        Self::Composite(Rc::new(Composite {
            accumulator: accumulator.into(),
            inner: inner.into(),
        }))
    }

    /// Returns the number of arguments this callable takes.
    ///
    /// A composite has the arity of its inner callable.
    ///
    /// # Errors
    ///
    /// Returns [`PondError::UnsupportedCallableKind`] if a composite's inner
    /// value is not callable.
    pub fn arity(&self) -> Result<usize> {
        match self {
            Self::Primitive(primitive) => Ok(primitive.arity),
            Self::Composite(composite) => callable_arity(&composite.inner),
        }
    }

    /// Invokes the callable with exactly [`arity`](Self::arity) arguments.
    ///
    /// # Errors
    ///
    /// - [`PondError::ArityMismatch`] if `arguments.len()` differs from the
    ///   arity.
    /// - [`PondError::MalformedResult`] if a composite's inner call does not
    ///   return a 2-tuple.
    /// - Whatever the underlying function returns.
    pub fn apply(&self, arguments: &[Value]) -> Result<Value> {
        let arity = self.arity()?;
        if arguments.len() != arity {
            return Err(PondError::arity_mismatch(arity, arguments.len()));
        }
        match self {
            Self::Primitive(primitive) => (primitive.function)(arguments),
            Self::Composite(composite) => {
                let (value, next) = callable_apply(&composite.inner, arguments)?.into_pair()?;
                let accumulated =
                    callable_apply(&composite.accumulator, std::slice::from_ref(&value))?;
                Ok(Value::Callable(Self::composite(accumulated, next)))
            }
        }
    }
}

fn expect_callable(value: &Value) -> Result<&Callable> {
    value
        .as_callable()
        .ok_or_else(|| PondError::unsupported(value.kind()))
}

/// Returns the arity of `value`.
///
/// # Errors
///
/// Returns [`PondError::UnsupportedCallableKind`] if `value` is not callable.
pub fn callable_arity(value: &Value) -> Result<usize> {
    expect_callable(value)?.arity()
}

/// Invokes `value` with `arguments`.
///
/// # Errors
///
/// Returns [`PondError::UnsupportedCallableKind`] if `value` is not callable,
/// otherwise see [`Callable::apply`].
pub fn callable_apply(value: &Value, arguments: &[Value]) -> Result<Value> {
    expect_callable(value)?.apply(arguments)
}

/// A callable adapted to a uniform N-ary calling convention.
///
/// The arity is resolved once, when the adapter is built.
#[derive(Clone, Debug, PartialEq)]
pub struct CallableFn {
    arity: usize,
    callable: Callable,
}

impl CallableFn {
    /// The number of arguments [`call`](Self::call) expects.
    pub const fn arity(&self) -> usize {
        self.arity
    }

    /// The adapted callable.
    pub const fn callable(&self) -> &Callable {
        &self.callable
    }

    /// Invokes the adapted callable.
    ///
    /// # Errors
    ///
    /// See [`Callable::apply`].
    pub fn call(&self, arguments: &[Value]) -> Result<Value> {
        if arguments.len() != self.arity {
            return Err(PondError::arity_mismatch(self.arity, arguments.len()));
        }
        self.callable.apply(arguments)
    }
}

/// Adapts any callable value into a [`CallableFn`].
///
/// # Errors
///
/// - [`PondError::UnsupportedCallableKind`] if `value` is not callable.
/// - [`PondError::ArityTooLarge`] if its arity exceeds [`MAX_ARITY`].
pub fn to_callable_fn(value: &Value) -> Result<CallableFn> {
    let callable = expect_callable(value)?;
    let arity = callable.arity()?;
    if arity > MAX_ARITY {
        return Err(PondError::arity_too_large(arity, MAX_ARITY));
    }
    Ok(CallableFn {
        arity,
        callable: callable.clone(),
    })
}

static_assertions::assert_not_impl_any!(Callable: Send, Sync);

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn last_argument() -> Callable {
        Callable::from_fn2(|_, second| Ok(second))
    }

    #[rstest]
    fn test_primitive_arity_and_apply() {
        let callable = last_argument();
        assert_eq!(callable.arity(), Ok(2));
        assert_eq!(
            callable.apply(&[Value::from(1), Value::from(2)]),
            Ok(Value::from(2))
        );
    }

    #[rstest]
    #[case(0)]
    #[case(1)]
    #[case(3)]
    fn test_primitive_rejects_wrong_argument_count(#[case] count: usize) {
        let arguments = vec![Value::Nil; count];
        assert_eq!(
            last_argument().apply(&arguments),
            Err(PondError::arity_mismatch(2, count))
        );
    }

    #[rstest]
    fn test_primitive_arity_bound() {
        assert!(Callable::primitive(MAX_HANDLER_ARITY, |_| Ok(Value::Nil)).is_ok());
        assert_eq!(
            Callable::primitive(MAX_HANDLER_ARITY + 1, |_| Ok(Value::Nil)).err(),
            Some(PondError::arity_too_large(13, 12))
        );
    }

    #[rstest]
    fn test_composite_takes_inner_arity() {
        let composite = Callable::composite(Value::Nil, last_argument());
        assert_eq!(composite.arity(), Ok(2));
    }

    #[rstest]
    fn test_composite_with_non_callable_inner() {
        let composite = Callable::composite(Value::Nil, Value::from(7));
        assert_eq!(composite.arity(), Err(PondError::unsupported("int")));
    }

    #[rstest]
    fn test_composite_threads_value_through_accumulator() {
        let inner = Callable::from_fn1(|x| Ok(Value::pair(x, Value::atom("next"))));
        let accumulator = Callable::from_fn1(|x| Ok(Value::tuple([Value::atom("seen"), x])));
        let composite = Callable::composite(accumulator, inner);

        let result = composite.apply(&[Value::from(5)]).unwrap();
        let Value::Callable(Callable::Composite(advanced)) = result else {
            panic!("expected a composite");
        };
        assert_eq!(
            advanced.accumulator(),
            &Value::tuple([Value::atom("seen"), Value::from(5)])
        );
        assert_eq!(advanced.inner(), &Value::atom("next"));
    }

    #[rstest]
    #[case(Value::from(1), "int")]
    #[case(Value::tuple([Value::Nil]), "tuple")]
    #[case(Value::list([Value::Nil, Value::Nil]), "list")]
    fn test_composite_rejects_malformed_inner_result(
        #[case] returned: Value,
        #[case] kind: &'static str,
    ) {
        let inner = Callable::from_fn0(move || Ok(returned.clone()));
        let composite = Callable::composite(Callable::from_fn1(Ok), inner);
        assert_eq!(composite.apply(&[]), Err(PondError::malformed(kind)));
    }

    #[rstest]
    fn test_free_functions_reject_data() {
        assert_eq!(
            callable_arity(&Value::atom("nope")),
            Err(PondError::unsupported("atom"))
        );
        assert_eq!(
            callable_apply(&Value::Nil, &[]),
            Err(PondError::unsupported("nil"))
        );
    }

    #[rstest]
    fn test_to_callable_fn() {
        let adapted = to_callable_fn(&Value::from(last_argument())).unwrap();
        assert_eq!(adapted.arity(), 2);
        assert_eq!(
            adapted.call(&[Value::from(1), Value::from(2)]),
            Ok(Value::from(2))
        );
        assert_eq!(
            adapted.call(&[Value::from(1)]),
            Err(PondError::arity_mismatch(2, 1))
        );
    }

    #[rstest]
    fn test_to_callable_fn_arity_bound() {
        let wide = Callable::primitive(MAX_ARITY + 1, |_| Ok(Value::Nil)).unwrap();
        assert_eq!(
            to_callable_fn(&Value::from(wide)),
            Err(PondError::arity_too_large(11, MAX_ARITY))
        );
    }

    #[rstest]
    fn test_equality_is_identity() {
        let callable = last_argument();
        assert_eq!(callable, callable.clone());
        assert_ne!(callable, last_argument());
    }
}
