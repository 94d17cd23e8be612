use portable_atomic::{AtomicU128, Ordering};
#[cfg(feature = "tracing")]
use tracing::instrument;

use crate::counter::{CounterSource, Token};

/// A lock-free counter suitable for multi-threaded readers.
///
/// The whole 128-bit counter lives in one [`AtomicU128`] and each token is
/// issued by a single `fetch_add`. The low word therefore carries into the
/// high word inside the same atomic step: no caller can ever pair a low word
/// with a stale high word, and no counter space is skipped at the 64-bit
/// boundary.
///
/// ## Features
/// - ✅ Thread-safe
/// - ✅ Lock-free on targets with 128-bit compare-and-swap (x86-64 with
///   `cmpxchg16b`, aarch64). Other targets fall back to `portable-atomic`'s
///   global lock table.
///
/// ## Recommended When
/// - You're in a multi-threaded environment (this is the default strategy)
///
/// ## See Also
/// - [`BasicCounter`]
/// - [`LockCounter`]
///
/// [`BasicCounter`]: crate::BasicCounter
/// [`LockCounter`]: crate::LockCounter
#[derive(Debug, Default)]
pub struct AtomicCounter {
    #[cfg(feature = "cache-padded")]
    state: crossbeam_utils::CachePadded<AtomicU128>,
    #[cfg(not(feature = "cache-padded"))]
    state: AtomicU128,
}

impl AtomicCounter {
    /// Creates a counter whose first token is [`Token::ZERO`].
    #[must_use]
    pub fn new() -> Self {
        Self::starting_at(0)
    }

    pub(crate) fn starting_at(raw: u128) -> Self {
        Self {
            #[cfg(feature = "cache-padded")]
            state: crossbeam_utils::CachePadded::new(AtomicU128::new(raw)),
            #[cfg(not(feature = "cache-padded"))]
            state: AtomicU128::new(raw),
        }
    }

    /// Issues the next unique token.
    ///
    /// Uniqueness only needs the modification order of the single counter
    /// location, so `Relaxed` is sufficient.
    #[cfg_attr(feature = "tracing", instrument(level = "trace", skip(self)))]
    pub fn next_token(&self) -> Token {
        Token::from_raw(self.state.fetch_add(1, Ordering::Relaxed))
    }
}

impl CounterSource for AtomicCounter {
    fn new() -> Self {
        Self::new()
    }

    fn next_token(&self) -> Token {
        self.next_token()
    }
}
