//! A fast, cryptographically strong pseudorandom generator.
//!
//! `hashrng` reads the operating system's entropy source exactly once and
//! then produces unlimited output by hashing a secret seed together with a
//! 128-bit counter that is never reused. Concurrent callers only share an
//! atomic counter, so throughput scales with the number of cores instead of
//! serializing on the OS source.
//!
//! # Example
//! ```
//! use hashrng::{Permuter, Sampler};
//!
//! let mut key = [0u8; 32];
//! hashrng::read(&mut key);
//!
//! let roll = hashrng::intn(6).unwrap() + 1;
//! assert!((1..=6).contains(&roll));
//!
//! let order = hashrng::reader().perm(10);
//! assert_eq!(order.len(), 10);
//! ```
//!
//! # Feature flags
//! - `bigint` (default): [`Sampler::big_intn`] over [`num_bigint::BigInt`].
//! - `lock`: [`LockCounter`], a mutex-guarded counter strategy.
//! - `parking-lot`: back [`LockCounter`] with `parking_lot::Mutex`.
//! - `cache-padded`: pad the atomic counter to a cache line.
//! - `prefill`: [`PrefillReader`], a worker pool that precomputes output.
//! - `tracing`: structured logs through `tracing`.
#![cfg_attr(docsrs, feature(doc_cfg))]

extern crate alloc;

mod counter;
mod entropy;
mod error;
mod expand;
mod global;
mod perm;
#[cfg(feature = "prefill")]
mod prefill;
mod reader;
mod sample;

pub use crate::counter::*;
pub use crate::error::*;
pub use crate::expand::{OUTPUT_CHUNK, SEED_BLOCK_LEN};
pub use crate::global::*;
pub use crate::perm::*;
#[cfg(feature = "prefill")]
pub use crate::prefill::*;
pub use crate::reader::*;
pub use crate::sample::*;

#[cfg(feature = "bigint")]
pub use num_bigint;
