#[cfg(feature = "tracing")]
use tracing::instrument;

use crate::counter::{CounterSource, Token, mutex::Mutex};

/// A lock-based counter suitable for multi-threaded readers.
///
/// The 128-bit counter is guarded by a mutex. Throughput under contention is
/// lower than [`AtomicCounter`], but the strategy works on every target.
///
/// The critical section is a single integer increment that cannot panic, so
/// a poisoned lock still guards a consistent counter and is recovered rather
/// than surfaced to the caller.
///
/// ## Features
/// - ✅ Thread-safe
/// - ✅ Fair access when backed by `parking_lot` (feature `parking-lot`)
///
/// ## Recommended When
/// - Your target lacks 128-bit atomics and you prefer a local lock over
///   `portable-atomic`'s global lock table
///
/// ## See Also
/// - [`BasicCounter`]
/// - [`AtomicCounter`]
///
/// [`BasicCounter`]: crate::BasicCounter
/// [`AtomicCounter`]: crate::AtomicCounter
#[derive(Debug, Default)]
pub struct LockCounter {
    #[cfg(feature = "cache-padded")]
    pub(crate) state: crossbeam_utils::CachePadded<Mutex<u128>>,
    #[cfg(not(feature = "cache-padded"))]
    pub(crate) state: Mutex<u128>,
}

impl LockCounter {
    /// Creates a counter whose first token is [`Token::ZERO`].
    #[must_use]
    pub fn new() -> Self {
        Self::starting_at(0)
    }

    pub(crate) fn starting_at(raw: u128) -> Self {
        Self {
            #[cfg(feature = "cache-padded")]
            state: crossbeam_utils::CachePadded::new(Mutex::new(raw)),
            #[cfg(not(feature = "cache-padded"))]
            state: Mutex::new(raw),
        }
    }

    /// Issues the next unique token.
    #[cfg_attr(feature = "tracing", instrument(level = "trace", skip(self)))]
    pub fn next_token(&self) -> Token {
        let mut raw = {
            #[cfg(feature = "parking-lot")]
            {
                self.state.lock()
            }
            #[cfg(not(feature = "parking-lot"))]
            {
                self.state
                    .lock()
                    .unwrap_or_else(super::mutex::PoisonError::into_inner)
            }
        };
        let token = Token::from_raw(*raw);
        *raw = raw.wrapping_add(1);
        token
    }
}

impl CounterSource for LockCounter {
    fn new() -> Self {
        Self::new()
    }

    fn next_token(&self) -> Token {
        self.next_token()
    }
}
