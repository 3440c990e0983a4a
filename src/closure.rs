//! Self-referencing stateful closures.
//!
//! [`construct`] turns an initial state and a handler of arity `N + 2` into a
//! callable of arity `N`. Calling it with `N` arguments invokes the handler
//! with `(rebuild, state, arguments...)`, where `rebuild` is an arity-1
//! callable that builds the same kind of closure around a new state. The
//! handler returns whatever it likes, typically a `(value, next)` pair whose
//! `next` is `rebuild(new_state)`.
//!
//! Nothing is ever mutated: every step produces a new closure value, so two
//! holders of the same closure can call it independently and each get the
//! same answer.
//!
//! # Recursion depth
//!
//! Each handler runs on the caller's stack. A handler that keeps calling the
//! next closure instead of returning it (for instance a recorder driving an
//! infinite producer) recurses without bound and will eventually exhaust the
//! stack. That is a caller-level infinite loop; the library does not guard
//! against it.
//!
//! # Examples
//!
//! A closure that greets once and then stays on `:world`:
//!
//! ```rust
//! use pond::{Callable, Value, construct};
//!
//! let handler = Callable::from_fn2(|rebuild, state| {
//!     let next_state = if state == Value::atom("hello") {
//!         Value::atom("world")
//!     } else {
//!         state.clone()
//!     };
//!     Ok(Value::pair(state, rebuild.pipe(&[next_state])?))
//! });
//!
//! let closure = construct(Value::atom("hello"), handler).unwrap();
//! assert_eq!(closure.arity().unwrap(), 0);
//!
//! let (first, next) = closure.apply(&[]).unwrap().into_pair().unwrap();
//! assert_eq!(first, Value::atom("hello"));
//! let (second, _) = next.pipe(&[]).unwrap().into_pair().unwrap();
//! assert_eq!(second, Value::atom("world"));
//! ```

use std::rc::Rc;

use smallvec::SmallVec;

use crate::callable::{Callable, MAX_ARITY, callable_apply, callable_arity};
use crate::error::{PondError, Result};
use crate::value::Value;

/// The callable produced by [`construct`].
///
/// Its arity is always the handler's arity minus two.
pub type StatefulClosure = Callable;

/// A generator that is handed itself when applied.
///
/// Applying a knot to itself (`tie`) is the self-application `f(f)` that lets
/// the rebuild step refer to itself without a named recursive binding.
#[derive(Clone)]
struct Knot(Rc<dyn Fn(&Knot) -> Callable>);

impl Knot {
    fn tie(&self) -> Callable {
        (self.0)(self)
    }
}

/// Returns the fixed point `g` of `step`, so that `g == step(g)`.
///
/// `step` receives an arity-1 stand-in for `g` that re-ties the knot only when
/// it is invoked, which keeps the construction finite.
fn fix<F>(step: F) -> Callable
where
    F: Fn(Callable) -> Callable + 'static,
{
    let knot = Knot(Rc::new(move |knot: &Knot| {
        let knot = knot.clone();
        let recur = Callable::primitive_unchecked(1, move |arguments| knot.tie().apply(arguments));
        step(recur)
    }));
    knot.tie()
}

/// Binds the handler's first two parameters to `(rebuild, state)` and exposes
/// the remaining `arity` parameters.
fn bind(handler: Value, arity: usize, rebuild: Callable, state: Value) -> Callable {
    Callable::primitive_unchecked(arity, move |arguments| {
        let mut bound: SmallVec<[Value; 6]> = SmallVec::with_capacity(arguments.len() + 2);
        bound.push(Value::Callable(rebuild.clone()));
        bound.push(state.clone());
        bound.extend(arguments.iter().cloned());
        callable_apply(&handler, &bound)
    })
}

/// Builds a stateful closure from an initial `state` and a `handler`.
///
/// The handler is applied through [`callable_apply`], so a composite handler
/// works the same way as a primitive one.
///
/// # Errors
///
/// - [`PondError::UnsupportedCallableKind`] if `handler` is not callable.
/// - [`PondError::HandlerArityTooSmall`] if the handler takes fewer than two
///   parameters.
/// - [`PondError::ArityTooLarge`] if the resulting closure would take more
///   than [`MAX_ARITY`] arguments.
///
/// # Examples
///
/// A counter that yields its current value and moves on by the step it is
/// called with:
///
/// ```rust
/// use pond::{Callable, Value, construct};
///
/// let counter = construct(
///     Value::from(0),
///     Callable::from_fn3(|rebuild, count, step| {
///         let next = count.as_int().unwrap_or(0) + step.as_int().unwrap_or(0);
///         Ok(Value::pair(count, rebuild.pipe(&[Value::from(next)])?))
///     }),
/// )
/// .unwrap();
///
/// let (zero, counter) = counter.apply(&[Value::from(5)]).unwrap().into_pair().unwrap();
/// let (five, _) = counter.pipe(&[Value::from(1)]).unwrap().into_pair().unwrap();
/// assert_eq!((zero, five), (Value::from(0), Value::from(5)));
/// ```
pub fn construct(state: Value, handler: impl Into<Value>) -> Result<StatefulClosure> {
    let handler = handler.into();
    let handler_arity = callable_arity(&handler)?;
    if handler_arity < 2 {
        return Err(PondError::HandlerArityTooSmall {
            arity: handler_arity,
        });
    }
    let arity = handler_arity - 2;
    if arity > MAX_ARITY {
        return Err(PondError::arity_too_large(arity, MAX_ARITY));
    }
    tracing::trace!(arity, state = state.kind(), "constructing stateful closure");

    let generator = fix(move |rebuild| {
        let handler = handler.clone();
        Callable::primitive_unchecked(1, move |arguments| {
            let [state] = arguments else {
                return Err(PondError::arity_mismatch(1, arguments.len()));
            };
            Ok(Value::Callable(bind(
                handler.clone(),
                arity,
                rebuild.clone(),
                state.clone(),
            )))
        })
    });
    generator.apply(&[state])?.into_callable()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::cell::Cell;

    #[rstest]
    fn test_fix_builds_a_recursive_callable() {
        let factorial = fix(|recur| {
            Callable::from_fn1(move |n| {
                let n = n.as_int().unwrap_or(0);
                if n <= 1 {
                    return Ok(Value::from(1));
                }
                let rest = recur.apply(&[Value::from(n - 1)])?;
                Ok(Value::from(n * rest.as_int().unwrap_or(0)))
            })
        });
        assert_eq!(factorial.apply(&[Value::from(10)]), Ok(Value::from(3_628_800)));
    }

    #[rstest]
    fn test_fix_reties_only_when_recursing() {
        let ties = Rc::new(Cell::new(0));
        let counter = Rc::clone(&ties);
        let generator = fix(move |recur| {
            counter.set(counter.get() + 1);
            Callable::from_fn1(move |depth| {
                if depth.as_int() == Some(0) {
                    Ok(Value::Nil)
                } else {
                    recur.apply(&[Value::from(depth.as_int().unwrap_or(0) - 1)])
                }
            })
        });
        assert_eq!(ties.get(), 1);
        generator.apply(&[Value::from(3)]).unwrap();
        assert_eq!(ties.get(), 4);
    }

    #[rstest]
    fn test_construct_passes_rebuild_state_and_arguments() {
        let handler = Callable::from_fn4(|rebuild, state, left, right| {
            assert_eq!(rebuild.arity(), Ok(1));
            Ok(Value::list([state, left, right]))
        });
        let closure = construct(Value::atom("state"), handler).unwrap();
        assert_eq!(
            closure.apply(&[Value::from(1), Value::from(2)]),
            Ok(Value::list([Value::atom("state"), Value::from(1), Value::from(2)]))
        );
    }

    #[rstest]
    fn test_construct_rejects_small_handlers() {
        assert_eq!(
            construct(Value::Nil, Callable::from_fn1(Ok)),
            Err(PondError::HandlerArityTooSmall { arity: 1 })
        );
        assert_eq!(
            construct(Value::Nil, Callable::from_fn0(|| Ok(Value::Nil))),
            Err(PondError::HandlerArityTooSmall { arity: 0 })
        );
    }

    #[rstest]
    fn test_construct_rejects_non_callable_handler() {
        assert_eq!(
            construct(Value::Nil, Value::from(2)),
            Err(PondError::unsupported("int"))
        );
    }

    #[rstest]
    fn test_construct_propagates_handler_errors() {
        let handler =
            Callable::from_fn2(|_, _| Err(PondError::malformed("nil")));
        let closure = construct(Value::Nil, handler).unwrap();
        assert_eq!(closure.apply(&[]), Err(PondError::malformed("nil")));
    }
}
