//! A reader backed by a pool of workers that precompute output.
//!
//! Workers keep a bounded lock-free queue of [`OUTPUT_CHUNK`]-sized blocks
//! topped up. Reads pop blocks instead of hashing on the caller's thread,
//! trading a fixed amount of memory for lower latency under bursty load.
//! When the queue runs dry the read is served directly, so callers never
//! wait on a worker.

use alloc::{sync::Arc, vec::Vec};
use core::{fmt, time::Duration};
use std::{
    io,
    sync::atomic::{AtomicBool, Ordering},
    thread::{self, JoinHandle},
};

use crossbeam_queue::ArrayQueue;
use rand::{CryptoRng, RngCore};

use crate::{AtomicCounter, ByteSource, CounterSource, Error, HashReader, OUTPUT_CHUNK, Result};

type Block = [u8; OUTPUT_CHUNK];

/// How long an idle worker sleeps before checking the queue again, unless a
/// reader wakes it first.
const IDLE_PARK: Duration = Duration::from_millis(1);

/// Sizing for a [`PrefillReader`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PrefillConfig {
    /// Number of precomputed blocks to hold.
    pub capacity: usize,
    /// Number of background worker threads.
    pub workers: usize,
}

impl Default for PrefillConfig {
    fn default() -> Self {
        Self {
            capacity: 1024,
            workers: 1,
        }
    }
}

impl PrefillConfig {
    /// Sets the number of precomputed blocks.
    #[must_use]
    pub const fn with_capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }

    /// Sets the number of worker threads.
    #[must_use]
    pub const fn with_workers(mut self, workers: usize) -> Self {
        self.workers = workers;
        self
    }

    fn validate(&self) -> Result<()> {
        if self.capacity == 0 {
            return Err(Error::InvalidArgument {
                reason: "prefill capacity must be positive",
            });
        }
        if self.workers == 0 {
            return Err(Error::InvalidArgument {
                reason: "prefill workers must be positive",
            });
        }
        Ok(())
    }
}

struct Shared<C: CounterSource> {
    reader: HashReader<C>,
    queue: ArrayQueue<Block>,
    shutdown: AtomicBool,
}

/// A [`HashReader`] fronted by a queue of precomputed output.
///
/// Every block in the queue comes from its own read with its own counter
/// token, and is handed out at most once. When a read needs fewer bytes than
/// a block holds, the rest of the block is discarded.
///
/// Dropping the reader stops and joins its workers.
///
/// # Example
/// ```
/// use hashrng::{PrefillConfig, PrefillReader, Sampler};
///
/// let reader: PrefillReader = PrefillReader::new(PrefillConfig::default()).unwrap();
/// let token = reader.bytes(16);
/// assert_eq!(token.len(), 16);
/// ```
pub struct PrefillReader<C = AtomicCounter>
where
    C: CounterSource + Send + Sync + 'static,
{
    shared: Arc<Shared<C>>,
    workers: Vec<JoinHandle<()>>,
    low_water: usize,
}

impl<C> PrefillReader<C>
where
    C: CounterSource + Send + Sync + 'static,
{
    /// Seeds a reader from the operating system and starts its workers.
    ///
    /// # Errors
    /// - [`Error::InvalidArgument`] if `capacity` or `workers` is zero.
    /// - [`Error::EntropyUnavailable`] if the OS source fails.
    pub fn new(config: PrefillConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::with_reader(HashReader::new()?, config))
    }

    fn with_reader(reader: HashReader<C>, config: PrefillConfig) -> Self {
        let shared = Arc::new(Shared {
            reader,
            queue: ArrayQueue::new(config.capacity),
            shutdown: AtomicBool::new(false),
        });

        let workers = (0..config.workers)
            .map(|worker_id| {
                let shared = Arc::clone(&shared);
                thread::spawn(move || worker_loop(worker_id, &shared))
            })
            .collect();

        #[cfg(feature = "tracing")]
        tracing::debug!(
            "Started {} prefill workers for {} blocks",
            config.workers,
            config.capacity
        );

        Self {
            shared,
            workers,
            low_water: config.capacity / 2,
        }
    }

    /// Number of precomputed blocks currently queued.
    pub fn available(&self) -> usize {
        self.shared.queue.len()
    }

    /// Fills `buf` completely and returns `buf.len()`.
    ///
    /// Queued blocks are used first; whatever they cannot cover is generated
    /// directly in one read.
    pub fn read(&self, buf: &mut [u8]) -> usize {
        let mut filled = 0;
        while filled < buf.len() {
            if let Some(block) = self.shared.queue.pop() {
                let n = OUTPUT_CHUNK.min(buf.len() - filled);
                buf[filled..filled + n].copy_from_slice(&block[..n]);
                filled += n;
            } else {
                self.shared.reader.read(&mut buf[filled..]);
                break;
            }
        }

        if self.shared.queue.len() <= self.low_water {
            self.wake_workers();
        }
        buf.len()
    }

    fn wake_workers(&self) {
        for worker in &self.workers {
            worker.thread().unpark();
        }
    }
}

fn worker_loop<C: CounterSource>(worker_id: usize, shared: &Shared<C>) {
    #[cfg(feature = "tracing")]
    tracing::trace!("Prefill worker {worker_id} started");
    #[cfg(not(feature = "tracing"))]
    let _ = worker_id;

    while !shared.shutdown.load(Ordering::Acquire) {
        if shared.queue.is_full() {
            thread::park_timeout(IDLE_PARK);
            continue;
        }
        let mut block = [0_u8; OUTPUT_CHUNK];
        shared.reader.read(&mut block);
        // Another worker may have filled the last slot; the block is then
        // dropped unused.
        let _ = shared.queue.push(block);
    }

    #[cfg(feature = "tracing")]
    tracing::trace!("Prefill worker {worker_id} stopped");
}

impl<C> Drop for PrefillReader<C>
where
    C: CounterSource + Send + Sync + 'static,
{
    fn drop(&mut self) {
        self.shared.shutdown.store(true, Ordering::Release);
        self.wake_workers();
        for worker in self.workers.drain(..) {
            if worker.join().is_err() {
                #[cfg(feature = "tracing")]
                tracing::error!("Prefill worker panicked");
            }
        }
    }
}

impl<C> ByteSource for PrefillReader<C>
where
    C: CounterSource + Send + Sync + 'static,
{
    fn fill_bytes(&self, dest: &mut [u8]) {
        self.read(dest);
    }
}

impl<C> io::Read for PrefillReader<C>
where
    C: CounterSource + Send + Sync + 'static,
{
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        Ok(PrefillReader::read(self, buf))
    }
}

impl<C> io::Read for &PrefillReader<C>
where
    C: CounterSource + Send + Sync + 'static,
{
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        Ok(PrefillReader::read(*self, buf))
    }
}

impl<C> RngCore for PrefillReader<C>
where
    C: CounterSource + Send + Sync + 'static,
{
    fn next_u32(&mut self) -> u32 {
        let mut buf = [0_u8; 4];
        PrefillReader::read(self, &mut buf);
        u32::from_le_bytes(buf)
    }

    fn next_u64(&mut self) -> u64 {
        let mut buf = [0_u8; 8];
        PrefillReader::read(self, &mut buf);
        u64::from_le_bytes(buf)
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        PrefillReader::read(self, dest);
    }
}

impl<C> CryptoRng for PrefillReader<C> where C: CounterSource + Send + Sync + 'static {}

impl<C> fmt::Debug for PrefillReader<C>
where
    C: CounterSource + Send + Sync + 'static,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PrefillReader")
            .field("available", &self.available())
            .field("capacity", &self.shared.queue.capacity())
            .field("workers", &self.workers.len())
            .finish_non_exhaustive()
    }
}
