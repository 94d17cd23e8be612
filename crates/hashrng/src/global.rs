//! The process-wide reader.
//!
//! The seed is read from the operating system the first time any function
//! in this module runs. If that read fails the process aborts: there is no
//! secure fallback, and handing out output from a missing seed would be
//! worse than stopping.
//!
//! # Example
//! ```rust
//! let key = hashrng::bytes(32);
//! assert_eq!(key.len(), 32);
//!
//! let shuffled = hashrng::perm(52);
//! assert_eq!(shuffled.len(), 52);
//! ```

use alloc::vec::Vec;
use std::{io, sync::LazyLock};

#[cfg(feature = "bigint")]
use num_bigint::BigInt;
use rand::{CryptoRng, RngCore};

use crate::{ByteSource, HashReader, Permuter, Result, Sampler};

static GLOBAL_READER: LazyLock<HashReader> = LazyLock::new(|| match HashReader::new() {
    Ok(reader) => reader,
    Err(e) => fatal_entropy(&e),
});

#[cold]
#[inline(never)]
fn fatal_entropy(e: &crate::Error) -> ! {
    #[cfg(feature = "tracing")]
    tracing::error!("hashrng cannot seed the global reader, aborting: {e}");
    #[cfg(not(feature = "tracing"))]
    std::eprintln!("hashrng cannot seed the global reader, aborting: {e}");
    std::process::abort()
}

/// Returns the process-wide reader, seeding it on first use.
///
/// Aborts the process if the operating system cannot supply entropy.
pub fn reader() -> &'static HashReader {
    &GLOBAL_READER
}

/// Fills `buf` completely from the global reader and returns `buf.len()`.
pub fn read(buf: &mut [u8]) -> usize {
    reader().read(buf)
}

/// Returns `n` random bytes from the global reader.
pub fn bytes(n: usize) -> Vec<u8> {
    reader().bytes(n)
}

/// Returns a uniform value in `[0, n)` from the global reader.
///
/// # Errors
/// - [`Error::InvalidArgument`](crate::Error::InvalidArgument) if `n == 0`.
pub fn uint64n(n: u64) -> Result<u64> {
    reader().uint64n(n)
}

/// Returns a uniform index in `[0, n)` from the global reader.
///
/// # Errors
/// - [`Error::InvalidArgument`](crate::Error::InvalidArgument) if `n == 0`.
pub fn intn(n: usize) -> Result<usize> {
    reader().intn(n)
}

/// Returns a uniform big integer in `[0, n)` from the global reader.
///
/// # Errors
/// - [`Error::InvalidArgument`](crate::Error::InvalidArgument) if `n <= 0`.
#[cfg_attr(docsrs, doc(cfg(feature = "bigint")))]
#[cfg(feature = "bigint")]
pub fn big_intn(n: &BigInt) -> Result<BigInt> {
    reader().big_intn(n)
}

/// Returns a uniform random permutation of `0..n` from the global reader.
pub fn perm(n: usize) -> Vec<usize> {
    reader().perm(n)
}

/// A handle to the process-wide reader.
///
/// This type stores nothing; every call goes to [`reader()`]. It is `Copy`,
/// `Send` and `Sync`, and can be passed wherever a [`RngCore`], an
/// [`io::Read`] or a [`ByteSource`] is expected.
///
/// # Example
/// ```
/// use std::io::Read;
///
/// let mut buf = Vec::new();
/// hashrng::GlobalRng.take(1024).read_to_end(&mut buf).unwrap();
/// assert_eq!(buf.len(), 1024);
/// ```
#[derive(Default, Clone, Copy, Debug)]
pub struct GlobalRng;

impl ByteSource for GlobalRng {
    fn fill_bytes(&self, dest: &mut [u8]) {
        reader().read(dest);
    }
}

impl io::Read for GlobalRng {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        Ok(reader().read(buf))
    }
}

impl RngCore for GlobalRng {
    fn next_u32(&mut self) -> u32 {
        let mut buf = [0_u8; 4];
        reader().read(&mut buf);
        u32::from_le_bytes(buf)
    }

    fn next_u64(&mut self) -> u64 {
        reader().uint64()
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        reader().read(dest);
    }
}

impl CryptoRng for GlobalRng {}
