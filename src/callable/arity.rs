//! Typed adapters between Rust closures and callables, one per arity.
//!
//! Variadic calls are supported through a fixed table rather than unbounded
//! variadics: `from_fn0` through `from_fn12` (handlers need two extra
//! parameters on top of [`MAX_ARITY`](super::MAX_ARITY)) and `to_fn0`
//! through `to_fn10`.

use super::Callable;
use crate::error::{PondError, Result};
use crate::value::Value;

macro_rules! value_type {
    ($argument:ident) => {
        Value
    };
}

macro_rules! from_fn_table {
    ($($arity:literal => ($($argument:ident),*)),* $(,)?) => {
        paste::paste! {
            impl Callable {
                $(
                    #[doc = concat!("Creates a primitive of arity ", stringify!($arity), " from a Rust closure.")]
                    pub fn [<from_fn $arity>]<F>(function: F) -> Self
                    where
                        F: Fn($(value_type!($argument)),*) -> Result<Value> + 'static,
                    {
                        Self::primitive_unchecked($arity, move |arguments: &[Value]| {
                            let [$($argument),*] = arguments else {
                                return Err(PondError::arity_mismatch($arity, arguments.len()));
                            };
                            function($($argument.clone()),*)
                        })
                    }
                )*
            }
        }
    };
}

macro_rules! to_fn_table {
    ($($arity:literal => ($($argument:ident),*)),* $(,)?) => {
        paste::paste! {
            impl Callable {
                $(
                    #[doc = concat!("Adapts this callable into a Rust closure of arity ", stringify!($arity), ".")]
                    ///
                    /// # Errors
                    ///
                    /// Returns [`PondError::ArityMismatch`] if the callable has a
                    /// different arity.
                    pub fn [<to_fn $arity>](
                        &self,
                    ) -> Result<impl Fn($(value_type!($argument)),*) -> Result<Value> + use<>> {
                        let arity = self.arity()?;
                        if arity != $arity {
                            return Err(PondError::arity_mismatch(arity, $arity));
                        }
                        let callable = self.clone();
                        Ok(move |$($argument: Value),*| callable.apply(&[$($argument),*]))
                    }
                )*
            }
        }
    };
}

from_fn_table! {
    0 => (),
    1 => (a1),
    2 => (a1, a2),
    3 => (a1, a2, a3),
    4 => (a1, a2, a3, a4),
    5 => (a1, a2, a3, a4, a5),
    6 => (a1, a2, a3, a4, a5, a6),
    7 => (a1, a2, a3, a4, a5, a6, a7),
    8 => (a1, a2, a3, a4, a5, a6, a7, a8),
    9 => (a1, a2, a3, a4, a5, a6, a7, a8, a9),
    10 => (a1, a2, a3, a4, a5, a6, a7, a8, a9, a10),
    11 => (a1, a2, a3, a4, a5, a6, a7, a8, a9, a10, a11),
    12 => (a1, a2, a3, a4, a5, a6, a7, a8, a9, a10, a11, a12),
}

to_fn_table! {
    0 => (),
    1 => (a1),
    2 => (a1, a2),
    3 => (a1, a2, a3),
    4 => (a1, a2, a3, a4),
    5 => (a1, a2, a3, a4, a5),
    6 => (a1, a2, a3, a4, a5, a6),
    7 => (a1, a2, a3, a4, a5, a6, a7),
    8 => (a1, a2, a3, a4, a5, a6, a7, a8),
    9 => (a1, a2, a3, a4, a5, a6, a7, a8, a9),
    10 => (a1, a2, a3, a4, a5, a6, a7, a8, a9, a10),
}
