//! The dynamic value carried through stateful closures.
//!
//! State, call arguments and results all travel as a [`Value`]. A closure's
//! result may be plain data, another callable, or a finalized recording, and
//! callers (the recorder in particular) inspect which one they got.
//!
//! # Examples
//!
//! ```rust
//! use pond::Value;
//!
//! let pair = Value::pair(Value::atom("hello"), Value::from(42));
//! let (first, second) = pair.into_pair().unwrap();
//! assert_eq!(first.as_atom(), Some("hello"));
//! assert_eq!(second.as_int(), Some(42));
//! ```

use std::any::Any;
use std::fmt;
use std::rc::Rc;

use crate::callable::{self, Callable};
use crate::error::{PondError, Result};
#[cfg(feature = "recorder")]
use crate::recorder::Rec;

/// The stop sentinel.
///
/// A `StopMarker` can be matched on but only this crate can create one, so it
/// never collides with a legitimate domain value. Recorders and accumulators
/// finalize when every positional argument of a call is the sentinel.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct StopMarker(());

impl StopMarker {
    pub(crate) const fn new() -> Self {
        Self(())
    }
}

/// A caller-defined value of any `'static` type.
///
/// Opaque values are shared, never mutated, and compare by identity.
#[derive(Clone)]
pub struct Opaque(Rc<dyn Any>);

impl Opaque {
    /// Wraps `value`.
    pub fn new<T: Any>(value: T) -> Self {
        Self(Rc::new(value))
    }

    /// Returns the wrapped value if it has type `T`.
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.0.downcast_ref::<T>()
    }
}

impl PartialEq for Opaque {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Debug for Opaque {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "#Opaque<{:p}>", Rc::as_ptr(&self.0))
    }
}

/// A dynamically typed value.
///
/// Data variants compare structurally. Callables and opaque values compare by
/// identity: two clones of one closure are equal, two separately built
/// closures are not, even when they would behave the same.
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    /// The absence of a value.
    Nil,
    /// A boolean.
    Bool(bool),
    /// A signed integer.
    Int(i64),
    /// A symbolic constant such as `:hello`.
    Atom(Rc<str>),
    /// A string.
    Str(Rc<str>),
    /// An ordered list.
    List(Vec<Value>),
    /// A fixed-size tuple. A `(value, next)` step result is a 2-tuple.
    Tuple(Vec<Value>),
    /// Something that can be invoked.
    Callable(Callable),
    /// A finalized recording.
    #[cfg(feature = "recorder")]
    Rec(Rc<Rec>),
    /// Caller-defined data.
    Opaque(Opaque),
    /// The stop sentinel.
    Stop(StopMarker),
}

impl Value {
    /// Creates an atom.
    pub fn atom(name: &str) -> Self {
        Self::Atom(Rc::from(name))
    }

    /// Creates a list from any sequence of values.
    pub fn list<I>(values: I) -> Self
    where
        I: IntoIterator<Item = Self>,
    {
        Self::List(values.into_iter().collect())
    }

    /// Creates a tuple from any sequence of values.
    pub fn tuple<I>(values: I) -> Self
    where
        I: IntoIterator<Item = Self>,
    {
        Self::Tuple(values.into_iter().collect())
    }

    /// Creates the `(value, next)` pair returned by a generator step.
    pub fn pair(first: impl Into<Self>, second: impl Into<Self>) -> Self {
        Self::Tuple(vec![first.into(), second.into()])
    }

    /// Wraps caller-defined data.
    pub fn opaque<T: Any>(value: T) -> Self {
        Self::Opaque(Opaque::new(value))
    }

    pub(crate) const fn stop() -> Self {
        Self::Stop(StopMarker::new())
    }

    /// Returns a short name for the variant, used in error messages.
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Nil => "nil",
            Self::Bool(_) => "bool",
            Self::Int(_) => "int",
            Self::Atom(_) => "atom",
            Self::Str(_) => "str",
            Self::List(_) => "list",
            Self::Tuple(_) => "tuple",
            Self::Callable(_) => "callable",
            #[cfg(feature = "recorder")]
            Self::Rec(_) => "rec",
            Self::Opaque(_) => "opaque",
            Self::Stop(_) => "stop",
        }
    }

    /// Returns `true` for [`Value::Nil`].
    pub const fn is_nil(&self) -> bool {
        matches!(self, Self::Nil)
    }

    /// Returns `true` for the stop sentinel.
    pub const fn is_stop(&self) -> bool {
        matches!(self, Self::Stop(_))
    }

    /// Returns `true` if the value can be invoked.
    pub const fn is_callable(&self) -> bool {
        matches!(self, Self::Callable(_))
    }

    /// Returns the boolean, if this is one.
    pub const fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(value) => Some(*value),
            _ => None,
        }
    }

    /// Returns the integer, if this is one.
    pub const fn as_int(&self) -> Option<i64> {
        match self {
            Self::Int(value) => Some(*value),
            _ => None,
        }
    }

    /// Returns the atom's name.
    pub fn as_atom(&self) -> Option<&str> {
        match self {
            Self::Atom(name) => Some(name.as_ref()),
            _ => None,
        }
    }

    /// Returns the string contents.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Str(text) => Some(text.as_ref()),
            _ => None,
        }
    }

    /// Returns the list elements.
    pub fn as_list(&self) -> Option<&[Self]> {
        match self {
            Self::List(values) => Some(values.as_slice()),
            _ => None,
        }
    }

    /// Returns the tuple elements.
    pub fn as_tuple(&self) -> Option<&[Self]> {
        match self {
            Self::Tuple(values) => Some(values.as_slice()),
            _ => None,
        }
    }

    /// Returns the callable, if this is one.
    pub const fn as_callable(&self) -> Option<&Callable> {
        match self {
            Self::Callable(callable) => Some(callable),
            _ => None,
        }
    }

    #[cfg(feature = "recorder")]
    /// Returns the finalized recording.
    pub fn as_rec(&self) -> Option<&Rec> {
        match self {
            Self::Rec(rec) => Some(rec.as_ref()),
            _ => None,
        }
    }

    /// Returns the wrapped caller-defined data if it has type `T`.
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        match self {
            Self::Opaque(opaque) => opaque.downcast_ref::<T>(),
            _ => None,
        }
    }

    /// Converts into a callable.
    ///
    /// # Errors
    ///
    /// Returns [`PondError::UnsupportedCallableKind`] for any other variant.
    pub fn into_callable(self) -> Result<Callable> {
        match self {
            Self::Callable(callable) => Ok(callable),
            other => Err(PondError::unsupported(other.kind())),
        }
    }

    /// Splits a `(value, next)` pair.
    ///
    /// # Errors
    ///
    /// Returns [`PondError::MalformedResult`] unless the value is a 2-tuple.
    pub fn into_pair(self) -> Result<(Self, Self)> {
        match self {
            Self::Tuple(values) if values.len() == 2 => {
                let mut values = values.into_iter();
                match (values.next(), values.next()) {
                    (Some(first), Some(second)) => Ok((first, second)),
                    _ => Err(PondError::malformed("tuple")),
                }
            }
            other => Err(PondError::malformed(other.kind())),
        }
    }

    /// Returns the arity of the value when it is callable.
    ///
    /// # Errors
    ///
    /// See [`callable_arity`](crate::callable_arity).
    pub fn arity(&self) -> Result<usize> {
        callable::callable_arity(self)
    }

    /// Invokes the value with `arguments`.
    ///
    /// # Errors
    ///
    /// See [`callable_apply`](crate::callable_apply).
    ///
    /// # Examples
    ///
    /// ```rust
    /// use pond::{Callable, Value};
    ///
    /// let double = Value::from(Callable::from_fn1(|x| Ok(Value::from(x.as_int().unwrap_or(0) * 2))));
    /// assert_eq!(double.pipe(&[Value::from(21)]).unwrap(), Value::from(42));
    /// ```
    pub fn pipe(&self, arguments: &[Self]) -> Result<Self> {
        callable::callable_apply(self, arguments)
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Self::Int(i64::from(value))
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Self::Str(Rc::from(value))
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Self::Str(Rc::from(value))
    }
}

impl From<Vec<Self>> for Value {
    fn from(values: Vec<Self>) -> Self {
        Self::List(values)
    }
}

impl From<Callable> for Value {
    fn from(callable: Callable) -> Self {
        Self::Callable(callable)
    }
}

impl From<&Callable> for Value {
    fn from(callable: &Callable) -> Self {
        Self::Callable(callable.clone())
    }
}

impl From<&Self> for Value {
    fn from(value: &Self) -> Self {
        value.clone()
    }
}

#[cfg(feature = "recorder")]
impl From<Rec> for Value {
    fn from(rec: Rec) -> Self {
        Self::Rec(Rc::new(rec))
    }
}

static_assertions::assert_not_impl_any!(Value: Send, Sync);
