use crate::callable::Callable;
use crate::error::Result;
use crate::value::Value;

/// A finalized recording.
///
/// - `fun`: the callable at the point the chain diverged, or the last
///   callable reached if the recorder was stopped before divergence. `None`
///   only for a recorder started from a bare arity.
/// - `value`: the first terminal (non same-arity) result, if any.
/// - `next`: the argument lists received after divergence, in call order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Rec {
    /// The callable to replay against.
    pub fun: Option<Callable>,
    /// The terminal value observed at divergence.
    pub value: Option<Value>,
    /// Queued argument lists, oldest first.
    pub next: Vec<Vec<Value>>,
}

impl Rec {
    /// Replays this recording. See [`recorder_play`](super::recorder_play).
    ///
    /// # Errors
    ///
    /// See [`recorder_play`](super::recorder_play).
    pub fn play(&self) -> Result<Self> {
        super::recorder_play(self)
    }

    /// Returns `true` once a terminal value has been observed.
    pub const fn diverged(&self) -> bool {
        self.value.is_some()
    }
}
