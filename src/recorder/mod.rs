//! Recording the calls made against a chain of stateful closures.
//!
//! A recorder is itself a stateful closure (built with
//! [`construct`](crate::construct)) with the same arity as the callable it
//! watches. In [`RecorderMode::Auto`] it drives the watched chain: every call
//! is forwarded, and as long as the result is another callable of the same
//! arity the recorder moves on to it. The first result that is anything else
//! is the *divergence point*: the recorder keeps that value, stops calling
//! the chain, and queues the argument lists of every later call verbatim. In
//! [`RecorderMode::Record`] it queues from the first call on and never
//! invokes the source.
//!
//! [`recorder_stop`] finalizes a recorder into a [`Rec`]; [`recorder_play`]
//! runs a `Rec`'s queued calls against its callable in a fresh auto-mode
//! recorder.
//!
//! # Known limitation
//!
//! "Is a callable of the same arity" is the only signal used to keep
//! forwarding, so a chain that legitimately returns a same-arity callable as
//! its final answer is forwarded into rather than recorded as terminal.
//!
//! # Examples
//!
//! ```rust
//! use pond::{Callable, RecorderMode, Value, recorder_start, recorder_stop};
//!
//! let shout = Callable::from_fn1(|text| Ok(Value::from(text.as_str().unwrap_or("").to_uppercase())));
//! let recorder = recorder_start(&shout, RecorderMode::Record).unwrap();
//!
//! let recorder = recorder.apply(&[Value::from("a")]).unwrap();
//! let recorder = recorder.pipe(&[Value::from("b")]).unwrap();
//! let rec = recorder_stop(recorder).unwrap();
//!
//! assert_eq!(rec.fun, Some(shout));
//! assert_eq!(rec.value, None);
//! assert_eq!(rec.next, vec![vec![Value::from("a")], vec![Value::from("b")]]);
//! ```

mod rec;

use std::rc::Rc;

pub use rec::Rec;

use crate::callable::{Callable, MAX_ARITY, to_callable_fn};
use crate::closure::construct;
use crate::error::{PondError, Result};
use crate::trail::Trail;
use crate::value::Value;

/// How a recorder treats the calls it receives before divergence.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum RecorderMode {
    /// Forward calls to the source until it diverges, then queue.
    #[default]
    Auto,
    /// Queue every call without invoking the source.
    Record,
}

/// What a recorder watches.
#[derive(Clone, Debug, PartialEq)]
pub enum RecorderSource {
    /// A callable value; the recorder takes its arity.
    Callable(Value),
    /// Only an arity. There is nothing to forward to, so the recorder
    /// queues from the first call whatever the mode.
    Arity(usize),
}

impl From<Value> for RecorderSource {
    fn from(value: Value) -> Self {
        Self::Callable(value)
    }
}

impl From<Callable> for RecorderSource {
    fn from(callable: Callable) -> Self {
        Self::Callable(Value::Callable(callable))
    }
}

impl From<&Callable> for RecorderSource {
    fn from(callable: &Callable) -> Self {
        Self::Callable(Value::Callable(callable.clone()))
    }
}

impl From<usize> for RecorderSource {
    fn from(arity: usize) -> Self {
        Self::Arity(arity)
    }
}

/// The recorder's state once it has started queuing.
#[derive(Clone)]
struct Recording {
    fun: Option<Callable>,
    value: Option<Value>,
    trail: Trail<Vec<Value>>,
}

impl Recording {
    fn new(fun: Option<Callable>) -> Self {
        Self {
            fun,
            value: None,
            trail: Trail::default(),
        }
    }

    fn diverged(fun: Callable, value: Value) -> Self {
        Self {
            fun: Some(fun),
            value: Some(value),
            trail: Trail::default(),
        }
    }

    fn queue(&self, arguments: &[Value]) -> Self {
        Self {
            trail: self.trail.cons(arguments.to_vec()),
            ..self.clone()
        }
    }

    fn finalize(&self) -> Rec {
        Rec {
            fun: self.fun.clone(),
            value: self.value.clone(),
            next: self.trail.to_call_order(),
        }
    }
}

/// One recorder step: `arguments` is `(rebuild, state, call...)`.
///
/// The state is either the raw callable still being forwarded to or an
/// opaque [`Recording`].
fn record(arity: usize, arguments: &[Value]) -> Result<Value> {
    let [rebuild, state, call @ ..] = arguments else {
        return Err(PondError::arity_mismatch(arity + 2, arguments.len()));
    };
    let stopping = call.iter().all(Value::is_stop);

    if let Some(recording) = state.downcast_ref::<Recording>() {
        if stopping {
            tracing::debug!(
                arity,
                queued = recording.trail.len(),
                diverged = recording.value.is_some(),
                "recorder stopped"
            );
            return Ok(Value::from(recording.finalize()));
        }
        return rebuild.pipe(&[Value::opaque(recording.queue(call))]);
    }

    let fun = state
        .as_callable()
        .ok_or_else(|| PondError::unsupported(state.kind()))?;
    if stopping {
        tracing::debug!(arity, "recorder stopped before divergence");
        return Ok(Value::from(Rec {
            fun: Some(fun.clone()),
            value: None,
            next: Vec::new(),
        }));
    }

    let result = fun.apply(call)?;
    if matches!(result.arity(), Ok(next) if next == arity) {
        return rebuild.pipe(&[result]);
    }
    tracing::debug!(arity, kind = result.kind(), "recorder diverged, queuing further calls");
    rebuild.pipe(&[Value::opaque(Recording::diverged(fun.clone(), result))])
}

/// Starts a recorder over `source`.
///
/// The returned closure has the source's arity; every call returns the next
/// recorder closure until it is stopped.
///
/// # Errors
///
/// - [`PondError::UnsupportedCallableKind`] if the source value is not
///   callable.
/// - [`PondError::ArityTooLarge`] if the source arity exceeds [`MAX_ARITY`].
pub fn recorder_start(source: impl Into<RecorderSource>, mode: RecorderMode) -> Result<Callable> {
    let (arity, state) = match source.into() {
        RecorderSource::Callable(value) => {
            let source = to_callable_fn(&value)?;
            let fun = source.callable().clone();
            let state = match mode {
                RecorderMode::Auto => Value::Callable(fun),
                RecorderMode::Record => Value::opaque(Recording::new(Some(fun))),
            };
            (source.arity(), state)
        }
        RecorderSource::Arity(arity) => {
            if arity > MAX_ARITY {
                return Err(PondError::arity_too_large(arity, MAX_ARITY));
            }
            (arity, Value::opaque(Recording::new(None)))
        }
    };
    tracing::trace!(arity, ?mode, "starting recorder");

    let handler = Callable::primitive_unchecked(arity + 2, move |arguments| record(arity, arguments));
    construct(state, handler)
}

/// Finalizes a recorder by calling it with the stop sentinel in every
/// position.
///
/// A recorder of arity zero cannot tell a stop request from an ordinary
/// call, so every call to it finalizes.
///
/// # Errors
///
/// - [`PondError::UnsupportedCallableKind`] if `recorder` is not callable.
/// - [`PondError::MalformedResult`] if the callable is not a recorder and
///   returns something other than a recording.
pub fn recorder_stop(recorder: impl Into<Value>) -> Result<Rec> {
    let recorder = recorder.into();
    let sentinels = vec![Value::stop(); recorder.arity()?];
    match recorder.pipe(&sentinels)? {
        Value::Rec(rec) => Ok(Rc::unwrap_or_clone(rec)),
        other => Err(PondError::malformed(other.kind())),
    }
}

/// Replays `rec.next` against `rec.fun` in a fresh auto-mode recorder and
/// stops it.
///
/// # Errors
///
/// - [`PondError::UnsupportedCallableKind`] if the recording has no `fun`.
/// - Any error raised by the replayed calls.
///
/// # Examples
///
/// ```rust
/// use pond::{Callable, Rec, Value, recorder_play};
///
/// let square = Callable::from_fn1(|x| Ok(Value::from(x.as_int().unwrap_or(0).pow(2))));
/// let rec = Rec {
///     fun: Some(square.clone()),
///     value: None,
///     next: vec![vec![Value::from(7)]],
/// };
///
/// let played = recorder_play(&rec).unwrap();
/// assert_eq!(played.value, Some(Value::from(49)));
/// assert_eq!(played.fun, Some(square));
/// assert!(played.next.is_empty());
/// ```
pub fn recorder_play(rec: &Rec) -> Result<Rec> {
    let fun = rec
        .fun
        .as_ref()
        .ok_or_else(|| PondError::unsupported(Value::Nil.kind()))?;
    tracing::debug!(queued = rec.next.len(), "replaying recording");

    let recorder = Value::from(recorder_start(fun, RecorderMode::Auto)?);
    let recorder = rec
        .next
        .iter()
        .try_fold(recorder, |recorder, arguments| recorder.pipe(arguments))?;
    recorder_stop(recorder)
}
