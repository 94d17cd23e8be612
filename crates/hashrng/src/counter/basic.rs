use core::cell::Cell;

#[cfg(feature = "tracing")]
use tracing::instrument;

use crate::counter::{CounterSource, Token};

/// A non-concurrent counter suitable for single-threaded readers.
///
/// This counter is the cheapest strategy, but **not thread-safe**: it is
/// `!Sync`, so a reader built on it cannot be shared between threads.
///
/// ## Recommended When
/// - A reader is owned by a single thread (e.g. stored in a thread-local)
///
/// ## See Also
/// - [`AtomicCounter`]
/// - [`LockCounter`]
///
/// [`AtomicCounter`]: crate::AtomicCounter
/// [`LockCounter`]: crate::LockCounter
#[derive(Debug, Default)]
pub struct BasicCounter {
    state: Cell<u128>,
}

impl BasicCounter {
    /// Creates a counter whose first token is [`Token::ZERO`].
    #[must_use]
    pub const fn new() -> Self {
        Self::starting_at(0)
    }

    pub(crate) const fn starting_at(raw: u128) -> Self {
        Self {
            state: Cell::new(raw),
        }
    }

    /// Issues the next unique token.
    #[cfg_attr(feature = "tracing", instrument(level = "trace", skip(self)))]
    pub fn next_token(&self) -> Token {
        let raw = self.state.get();
        self.state.set(raw.wrapping_add(1));
        Token::from_raw(raw)
    }
}

impl CounterSource for BasicCounter {
    fn new() -> Self {
        Self::new()
    }

    fn next_token(&self) -> Token {
        self.next_token()
    }
}
