//! # pond
//!
//! Referentially transparent stateful closures.
//!
//! ## Overview
//!
//! A stateful closure behaves like an ordinary function, but instead of
//! mutating a hidden cell it returns, on every call, a result that usually
//! embeds the *next* closure, built around the updated state. Finite-state
//! machines, generators and push/pull stream protocols can then be written
//! with plain synchronous closures: no shared mutable state, no scheduler.
//!
//! - **Callables**: [`Callable`] abstracts over native functions
//!   ([`Primitive`]) and accumulator pairs ([`Composite`]) behind one
//!   `arity`/`apply` interface.
//! - **Construction**: [`construct`] ties a handler of arity `N + 2` into a
//!   self-referencing closure of arity `N`.
//! - **Piping**: [`pipe`] and the [`pipe!`] macro forward arguments.
//! - **Recording**: [`recorder_start`], [`recorder_stop`] and
//!   [`recorder_play`] observe, queue and replay the calls made against a
//!   chain.
//! - **Accumulators**: [`acc_list`], [`acc_last`], [`acc_reduce`],
//!   [`acc_into`] and [`acc_value`] collect values while piping.
//!
//! Everything is single-threaded: values are reference counted with `Rc` and
//! are neither `Send` nor `Sync`.
//!
//! ## Feature Flags
//!
//! - `recorder`: the invocation recorder
//! - `accumulate`: accumulator helpers
//! - `full`: enable all features
//!
//! ## Example
//!
//! A traffic light that advances on every call:
//!
//! ```rust
//! use pond::prelude::*;
//!
//! let light = construct(
//!     Value::atom("green"),
//!     Callable::from_fn2(|rebuild, colour| {
//!         let next = match colour.as_atom() {
//!             Some("green") => "yellow",
//!             Some("yellow") => "red",
//!             _ => "green",
//!         };
//!         Ok(Value::pair(colour, rebuild.pipe(&[Value::atom(next)])?))
//!     }),
//! )
//! .unwrap();
//!
//! let (now, light) = light.apply(&[]).unwrap().into_pair().unwrap();
//! let (later, _) = light.pipe(&[]).unwrap().into_pair().unwrap();
//! assert_eq!(now, Value::atom("green"));
//! assert_eq!(later, Value::atom("yellow"));
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
// Note: Disabling redundant_closure_for_method_calls due to clippy 0.1.92 panic bug
#![allow(clippy::redundant_closure_for_method_calls)]

/// Prelude module for convenient imports.
///
/// Re-exports commonly used types and functions.
///
/// # Usage
///
/// ```rust
/// use pond::prelude::*;
/// ```
pub mod prelude {
    pub use crate::callable::{Callable, callable_apply, callable_arity};
    pub use crate::closure::construct;
    pub use crate::error::PondError;
    pub use crate::pipe::pipe;
    pub use crate::value::Value;

    #[cfg(feature = "recorder")]
    pub use crate::recorder::{Rec, RecorderMode, recorder_play, recorder_start, recorder_stop};

    #[cfg(feature = "accumulate")]
    pub use crate::accumulate::{acc_into, acc_last, acc_list, acc_reduce, acc_value};
}

pub mod callable;
mod closure;
mod error;
mod pipe;
mod value;

#[cfg(any(feature = "recorder", feature = "accumulate"))]
mod trail;

#[cfg(feature = "recorder")]
pub mod recorder;

#[cfg(feature = "accumulate")]
mod accumulate;

pub use callable::{
    Callable, CallableFn, Composite, MAX_ARITY, MAX_HANDLER_ARITY, Primitive, callable_apply,
    callable_arity, to_callable_fn,
};
pub use closure::{StatefulClosure, construct};
pub use error::{PondError, Result};
pub use pipe::pipe;
pub use value::{Opaque, StopMarker, Value};

#[cfg(feature = "recorder")]
pub use recorder::{Rec, RecorderMode, RecorderSource, recorder_play, recorder_start, recorder_stop};

#[cfg(feature = "accumulate")]
pub use accumulate::{acc_into, acc_last, acc_list, acc_reduce, acc_value};
