use alloc::format;
use core::fmt;

use rand::{TryRngCore, rngs::OsRng};
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::{Error, Result};

/// Length of the secret seed mixed into every hash invocation.
pub(crate) const SEED_LEN: usize = 32;

/// Bytes requested from the OS. The draw is wider than the seed and
/// compressed with BLAKE3, so a weak prefix in the OS output cannot leak
/// into the seed on its own.
const OS_DRAW_LEN: usize = 64;

/// A one-shot source of secret seed material.
pub(crate) trait EntropySource {
    /// Fills `dest` from the source and returns how many bytes were written.
    fn try_fill(&mut self, dest: &mut [u8]) -> Result<usize>;
}

/// The operating system's CSPRNG.
#[derive(Default, Clone, Copy, Debug)]
pub(crate) struct OsEntropy;

impl EntropySource for OsEntropy {
    fn try_fill(&mut self, dest: &mut [u8]) -> Result<usize> {
        OsRng
            .try_fill_bytes(dest)
            .map_err(|e| Error::EntropyUnavailable {
                reason: format!("{e}"),
            })?;
        Ok(dest.len())
    }
}

/// Secret seed material shared by every hash invocation of a reader.
///
/// The bytes are never exposed: there is no accessor outside the crate, the
/// [`fmt::Debug`] output is redacted, and the memory is zeroized on drop.
#[derive(Zeroize, ZeroizeOnDrop)]
pub(crate) struct Seed([u8; SEED_LEN]);

impl Seed {
    /// Reads a fresh seed from the operating system.
    ///
    /// # Errors
    /// - [`Error::EntropyUnavailable`] if the OS source fails or comes up
    ///   short.
    pub(crate) fn from_os() -> Result<Self> {
        Self::acquire(&mut OsEntropy)
    }

    pub(crate) fn acquire<S: EntropySource>(source: &mut S) -> Result<Self> {
        let mut raw = [0_u8; OS_DRAW_LEN];
        let seed = match source.try_fill(&mut raw) {
            Ok(OS_DRAW_LEN) => Ok(Self(*blake3::hash(&raw).as_bytes())),
            Ok(filled) => Err(Error::EntropyUnavailable {
                reason: format!("short read: {filled} of {OS_DRAW_LEN} bytes"),
            }),
            Err(e) => Err(e),
        };
        raw.zeroize();

        #[cfg(feature = "tracing")]
        match &seed {
            Ok(_) => tracing::debug!("Acquired {SEED_LEN}-byte seed from entropy source"),
            Err(e) => tracing::error!("Failed to acquire seed: {e}"),
        }

        seed
    }

    /// A seed built from a repeated byte, for tests that need reproducible
    /// output.
    #[cfg(test)]
    pub(crate) fn fixed(byte: u8) -> Self {
        Self([byte; SEED_LEN])
    }

    #[inline]
    pub(crate) const fn as_bytes(&self) -> &[u8; SEED_LEN] {
        &self.0
    }
}

impl fmt::Debug for Seed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Seed(..)")
    }
}
