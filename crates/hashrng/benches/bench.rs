use core::hint::black_box;
use criterion::{Criterion, Throughput, criterion_group, criterion_main};
#[cfg(feature = "lock")]
use hashrng::LockCounter;
use hashrng::{AtomicCounter, BasicCounter, CounterSource, HashReader, Permuter, Sampler};
use rand::{TryRngCore, rngs::OsRng};
use std::{
    sync::{Arc, Barrier},
    thread::scope,
    time::Instant,
};

const READ_SIZES: [usize; 2] = [32, 512_000];

/// Benchmarks reads from a single thread.
fn bench_read_sequential<C: CounterSource>(c: &mut Criterion, group_name: &str) {
    let mut group = c.benchmark_group(group_name);
    let reader = HashReader::<C>::new().unwrap();

    for size in READ_SIZES {
        let mut buf = vec![0_u8; size];
        group.throughput(Throughput::Bytes(size as u64));
        group.bench_function(format!("bytes/{size}"), |b| {
            b.iter(|| black_box(reader.read(&mut buf)));
        });
    }

    group.finish();
}

/// Benchmarks one shared reader hammered from several threads.
fn bench_read_contended<C>(c: &mut Criterion, group_name: &str)
where
    C: CounterSource + Send + Sync,
{
    let mut group = c.benchmark_group(group_name);
    let max_threads = num_cpus::get().max(4);

    for size in READ_SIZES {
        for thread_count in [4, 64] {
            group.throughput(Throughput::Bytes((size * thread_count) as u64));
            group.bench_function(
                format!("bytes/{size}/threads/{thread_count}/cpus/{max_threads}"),
                |b| {
                    b.iter_custom(|iters| {
                        let reader = Arc::new(HashReader::<C>::new().unwrap());
                        let barrier = Arc::new(Barrier::new(thread_count + 1));
                        let mut elapsed = None;
                        scope(|s| {
                            for _ in 0..thread_count {
                                let reader = Arc::clone(&reader);
                                let barrier = Arc::clone(&barrier);
                                s.spawn(move || {
                                    let mut buf = vec![0_u8; size];
                                    barrier.wait();
                                    for _ in 0..iters {
                                        black_box(reader.read(&mut buf));
                                    }
                                });
                            }
                            barrier.wait();
                            elapsed = Some(Instant::now());
                        });
                        elapsed.map(|start| start.elapsed()).unwrap_or_default()
                    });
                },
            );
        }
    }

    group.finish();
}

/// Baseline: the OS source on every call.
fn bench_os_rng(c: &mut Criterion) {
    let mut group = c.benchmark_group("os_rng");
    for size in READ_SIZES {
        let mut buf = vec![0_u8; size];
        group.throughput(Throughput::Bytes(size as u64));
        group.bench_function(format!("bytes/{size}"), |b| {
            b.iter(|| OsRng.try_fill_bytes(black_box(&mut buf)).unwrap());
        });
    }
    group.finish();
}

fn bench_sampling(c: &mut Criterion) {
    let mut group = c.benchmark_group("sampling");
    let reader: HashReader = HashReader::new().unwrap();

    group.bench_function("intn/4000", |b| {
        b.iter(|| black_box(reader.intn(4000).unwrap()));
    });
    // Chosen to trigger resampling about a quarter of the time.
    group.bench_function("uint64n/max_div_4_plus_1", |b| {
        b.iter(|| black_box(reader.uint64n(u64::MAX / 4 + 1).unwrap()));
    });
    #[cfg(feature = "bigint")]
    {
        let n = hashrng::num_bigint::BigInt::from_bytes_be(
            hashrng::num_bigint::Sign::Plus,
            &reader.bytes(32),
        ) + 1;
        group.bench_function("big_intn/256_bits", |b| {
            b.iter(|| black_box(reader.big_intn(&n).unwrap()));
        });
    }
    for n in [32, 4000] {
        group.throughput(Throughput::Elements(n as u64));
        group.bench_function(format!("perm/{n}"), |b| {
            b.iter(|| black_box(reader.perm(n)));
        });
    }

    group.finish();
}

fn benchmark_sequential_basic(c: &mut Criterion) {
    bench_read_sequential::<BasicCounter>(c, "sequential/basic");
}

fn benchmark_sequential_atomic(c: &mut Criterion) {
    bench_read_sequential::<AtomicCounter>(c, "sequential/atomic");
}

#[cfg(feature = "lock")]
fn benchmark_sequential_lock(c: &mut Criterion) {
    bench_read_sequential::<LockCounter>(c, "sequential/lock");
}
#[cfg(not(feature = "lock"))]
fn benchmark_sequential_lock(_: &mut Criterion) {}

fn benchmark_contended_atomic(c: &mut Criterion) {
    bench_read_contended::<AtomicCounter>(c, "contended/atomic");
}

#[cfg(feature = "lock")]
fn benchmark_contended_lock(c: &mut Criterion) {
    bench_read_contended::<LockCounter>(c, "contended/lock");
}
#[cfg(not(feature = "lock"))]
fn benchmark_contended_lock(_: &mut Criterion) {}

criterion_group!(
    benches,
    benchmark_sequential_basic,
    benchmark_sequential_atomic,
    benchmark_sequential_lock,
    benchmark_contended_atomic,
    benchmark_contended_lock,
    bench_os_rng,
    bench_sampling,
);
criterion_main!(benches);
