use alloc::{vec, vec::Vec};

#[cfg(feature = "bigint")]
use num_bigint::{BigInt, BigUint};
#[cfg(feature = "bigint")]
use num_traits::Signed;
#[cfg(feature = "bigint")]
use zeroize::Zeroize;

use crate::{ByteSource, Error, Result};

/// Unbiased bounded sampling on top of any [`ByteSource`].
///
/// Every bounded draw uses rejection sampling: draws that fall outside the
/// largest range evenly divisible by the bound are thrown away and redrawn,
/// so each result in `[0, n)` is exactly equally likely.
///
/// Implemented for every [`ByteSource`], including
/// [`HashReader`](crate::HashReader) and [`GlobalRng`](crate::GlobalRng).
pub trait Sampler: ByteSource {
    /// Returns `n` fresh random bytes.
    fn bytes(&self, n: usize) -> Vec<u8> {
        let mut buf = vec![0_u8; n];
        self.fill_bytes(&mut buf);
        buf
    }

    /// Returns a uniformly random `u64`.
    fn uint64(&self) -> u64 {
        let mut buf = [0_u8; 8];
        self.fill_bytes(&mut buf);
        u64::from_le_bytes(buf)
    }

    /// Returns a uniform value in `[0, n)`.
    ///
    /// With `max = u64::MAX - (u64::MAX % n)`, draws `r >= max` are
    /// rejected. At worst (`n` just above `u64::MAX / 4`) a draw is accepted
    /// with probability 3/4, i.e. 1.33 draws on average.
    ///
    /// # Errors
    /// - [`Error::InvalidArgument`] if `n == 0`.
    fn uint64n(&self, n: u64) -> Result<u64> {
        if n == 0 {
            return Err(Error::InvalidArgument {
                reason: "bound must be positive",
            });
        }
        Ok(uniform_below(self, n))
    }

    /// Returns a uniform index in `[0, n)`.
    ///
    /// # Errors
    /// - [`Error::InvalidArgument`] if `n == 0`.
    ///
    /// # Example
    /// ```
    /// use hashrng::Sampler;
    ///
    /// let colors = ["red", "green", "blue"];
    /// let pick = colors[hashrng::GlobalRng.intn(colors.len()).unwrap()];
    /// assert!(colors.contains(&pick));
    /// assert!(hashrng::GlobalRng.intn(0).is_err());
    /// ```
    #[allow(clippy::cast_possible_truncation)]
    fn intn(&self, n: usize) -> Result<usize> {
        let r = self.uint64n(n as u64)?;
        Ok(r as usize)
    }

    /// Returns a uniform value in `[0, n)` for an arbitrary-precision bound.
    ///
    /// Draws just enough bytes to cover the bit width of `n`, clears the bits
    /// above it, and rejects candidates `>= n`. Because `n` sets the top
    /// retained bit, each draw is accepted with probability above 1/2.
    ///
    /// # Errors
    /// - [`Error::InvalidArgument`] if `n <= 0`.
    #[cfg_attr(docsrs, doc(cfg(feature = "bigint")))]
    #[cfg(feature = "bigint")]
    fn big_intn(&self, n: &BigInt) -> Result<BigInt> {
        if !n.is_positive() {
            return Err(Error::InvalidArgument {
                reason: "bound must be positive",
            });
        }
        Ok(BigInt::from(uniform_below_big(self, n.magnitude())))
    }
}

impl<T: ByteSource + ?Sized> Sampler for T {}

/// Uniform draw in `[0, n)`. `n` must be non-zero.
pub(crate) fn uniform_below<S: ByteSource + ?Sized>(source: &S, n: u64) -> u64 {
    debug_assert!(n > 0);
    let max = u64::MAX - (u64::MAX % n);
    let mut buf = [0_u8; 8];
    loop {
        source.fill_bytes(&mut buf);
        let r = u64::from_le_bytes(buf);
        if r < max {
            return r % n;
        }
    }
}

/// Uniform draw in `[0, n)`. `n` must be non-zero.
#[cfg(feature = "bigint")]
fn uniform_below_big<S: ByteSource + ?Sized>(source: &S, n: &BigUint) -> BigUint {
    let bits = n.bits();
    debug_assert!(bits > 0);
    let len = bits.div_ceil(8);
    #[allow(clippy::cast_possible_truncation)]
    let excess = (len * 8 - bits) as u32;
    let mask = u8::MAX >> excess;

    #[allow(clippy::cast_possible_truncation)]
    let mut buf = vec![0_u8; len as usize];
    let candidate = loop {
        source.fill_bytes(&mut buf);
        // Big-endian: the first byte holds the most significant bits.
        buf[0] &= mask;
        let candidate = BigUint::from_bytes_be(&buf);
        if &candidate < n {
            break candidate;
        }
    };
    buf.zeroize();
    candidate
}
