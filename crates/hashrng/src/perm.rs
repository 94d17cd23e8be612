use alloc::{vec, vec::Vec};

use crate::{Sampler, sample::uniform_below};

/// Uniform random permutations on top of any [`Sampler`].
pub trait Permuter: Sampler {
    /// Returns a uniformly random permutation of `0..n`.
    ///
    /// Uses the inside-out Fisher–Yates shuffle, which builds the result in a
    /// single pass without initializing it to the identity first. Each of
    /// the `n!` orderings is equally likely.
    ///
    /// # Example
    /// ```
    /// use hashrng::{GlobalRng, Permuter};
    ///
    /// let mut order = GlobalRng.perm(5);
    /// order.sort_unstable();
    /// assert_eq!(order, [0, 1, 2, 3, 4]);
    /// ```
    fn perm(&self, n: usize) -> Vec<usize> {
        let mut m = vec![0; n];
        for i in 1..n {
            #[allow(clippy::cast_possible_truncation)]
            let j = uniform_below(self, i as u64 + 1) as usize;
            m[i] = m[j];
            m[j] = i;
        }
        m
    }
}

impl<T: Sampler + ?Sized> Permuter for T {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::HashReader;
    use std::collections::HashMap;

    fn is_permutation(p: &[usize]) -> bool {
        let mut seen = vec![false; p.len()];
        for &v in p {
            if v >= p.len() || seen[v] {
                return false;
            }
            seen[v] = true;
        }
        true
    }

    #[test]
    fn trivial_sizes() {
        let reader: HashReader = HashReader::new().unwrap();
        assert!(reader.perm(0).is_empty());
        assert_eq!(reader.perm(1), [0]);
    }

    #[test]
    fn always_a_permutation() {
        let reader: HashReader = HashReader::new().unwrap();
        for n in (2..64).chain([150, 4000]) {
            let p = reader.perm(n);
            assert_eq!(p.len(), n);
            assert!(is_permutation(&p), "not a permutation of 0..{n}: {p:?}");
        }
    }

    #[test]
    fn permutations_are_uniform() {
        let chars = b"abcde";
        let reader: HashReader = HashReader::new().unwrap();
        let create_perm = || {
            reader
                .perm(chars.len())
                .into_iter()
                .map(|j| chars[j])
                .collect::<Vec<u8>>()
        };

        // 5! * 100 permutations
        let mut perm_count: HashMap<Vec<u8>, usize> = HashMap::new();
        for _ in 0..12_000 {
            *perm_count.entry(create_perm()).or_default() += 1;
        }

        assert_eq!(perm_count.len(), 120);
        for (p, n) in &perm_count {
            assert!(
                (50..=150).contains(n),
                "saw permutation {} {n} times",
                String::from_utf8_lossy(p)
            );
        }
    }
}
