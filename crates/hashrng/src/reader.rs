use core::fmt;
use std::io;

use rand::{CryptoRng, RngCore};
#[cfg(feature = "tracing")]
use tracing::instrument;

use crate::{
    Result,
    counter::{AtomicCounter, CounterSource},
    entropy::Seed,
    expand::expand,
};

/// A source that can always fill a buffer with random bytes.
///
/// This is the contract [`Sampler`] and [`Permuter`] are built on. Filling
/// never fails and always writes the whole buffer.
///
/// [`Sampler`]: crate::Sampler
/// [`Permuter`]: crate::Permuter
pub trait ByteSource {
    /// Overwrites every byte of `dest` with fresh random output.
    fn fill_bytes(&self, dest: &mut [u8]);
}

impl<T: ByteSource + ?Sized> ByteSource for &T {
    fn fill_bytes(&self, dest: &mut [u8]) {
        (**self).fill_bytes(dest);
    }
}

/// A CSPRNG that expands a secret seed by hashing unique counter tokens.
///
/// The seed is read from the operating system once, when the reader is
/// built. Each [`HashReader::read`] takes one token from the counter and
/// hashes `token ‖ chunk index ‖ seed` as many times as the buffer needs, so
/// no hash input is ever repeated and reads never touch the OS again.
///
/// The counter strategy `C` decides how tokens are shared between threads:
/// - [`AtomicCounter`] (default): lock-free, `Sync`
/// - [`LockCounter`]: mutex-guarded, `Sync`
/// - [`BasicCounter`]: single-threaded, `!Sync`
///
/// Most callers want the process-wide reader behind [`crate::reader`] and
/// the free functions instead of building their own.
///
/// # Example
/// ```
/// use hashrng::{HashReader, Sampler};
///
/// let reader: HashReader = HashReader::new().unwrap();
///
/// let mut nonce = [0u8; 24];
/// assert_eq!(reader.read(&mut nonce), 24);
///
/// let die = reader.intn(6).unwrap();
/// assert!(die < 6);
/// ```
///
/// [`LockCounter`]: crate::LockCounter
/// [`BasicCounter`]: crate::BasicCounter
pub struct HashReader<C = AtomicCounter>
where
    C: CounterSource,
{
    seed: Seed,
    counter: C,
}

impl<C> HashReader<C>
where
    C: CounterSource,
{
    /// Creates a reader seeded from the operating system's entropy source.
    ///
    /// # Errors
    /// - [`Error::EntropyUnavailable`] if the OS source fails or returns
    ///   fewer bytes than requested. Do not retry with a weaker source.
    ///
    /// [`Error::EntropyUnavailable`]: crate::Error::EntropyUnavailable
    pub fn new() -> Result<Self> {
        Ok(Self::with_seed(Seed::from_os()?))
    }

    pub(crate) fn with_seed(seed: Seed) -> Self {
        Self {
            seed,
            counter: C::new(),
        }
    }

    #[cfg(test)]
    pub(crate) fn with_parts(seed: Seed, counter: C) -> Self {
        Self { seed, counter }
    }

    /// Fills `buf` completely with random bytes and returns `buf.len()`.
    ///
    /// Never fails. Safe to call concurrently from any number of threads
    /// when `C` is `Sync`; the only shared state touched is the counter.
    #[cfg_attr(feature = "tracing", instrument(level = "trace", skip(self, buf), fields(len = buf.len())))]
    pub fn read(&self, buf: &mut [u8]) -> usize {
        let token = self.counter.next_token();
        expand(&self.seed, token, buf);
        buf.len()
    }
}

impl<C> ByteSource for HashReader<C>
where
    C: CounterSource,
{
    fn fill_bytes(&self, dest: &mut [u8]) {
        self.read(dest);
    }
}

impl<C> io::Read for HashReader<C>
where
    C: CounterSource,
{
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        Ok(HashReader::read(self, buf))
    }
}

impl<C> io::Read for &HashReader<C>
where
    C: CounterSource,
{
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        Ok(HashReader::read(*self, buf))
    }
}

impl<C> RngCore for HashReader<C>
where
    C: CounterSource,
{
    fn next_u32(&mut self) -> u32 {
        let mut buf = [0_u8; 4];
        HashReader::read(self, &mut buf);
        u32::from_le_bytes(buf)
    }

    fn next_u64(&mut self) -> u64 {
        let mut buf = [0_u8; 8];
        HashReader::read(self, &mut buf);
        u64::from_le_bytes(buf)
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        HashReader::read(self, dest);
    }
}

impl<C> CryptoRng for HashReader<C> where C: CounterSource {}

impl<C> fmt::Debug for HashReader<C>
where
    C: CounterSource + fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HashReader")
            .field("seed", &self.seed)
            .field("counter", &self.counter)
            .finish()
    }
}
