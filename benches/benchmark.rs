use criterion::measurement::WallTime;
use criterion::BenchmarkGroup;
use criterion::BenchmarkId;
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use std::{
    sync::{Arc, Mutex},
    thread::spawn,
    time::{Duration, Instant},
};

use liblocks::{FlagLock, Lockable, Locked, NoLock, TicketLock};

const ITERATION: u64 = 1000;

pub fn lock_bench(bencher: &mut Criterion) {
    let mut group = bencher.benchmark_group("Futex Locks");

    for thread in [1, 2, 4, 8].iter() {
        bench_inner::<FlagLock>("flag lock", &mut group, *thread);
        bench_inner::<TicketLock>("ticket lock", &mut group, *thread);
        mutex_bench(&mut group, *thread);
    }

    group.finish();
}

pub fn uncontended_bench(bencher: &mut Criterion) {
    let mut group = bencher.benchmark_group("Uncontended");

    uncontended_inner::<FlagLock>("flag lock", &mut group);
    uncontended_inner::<TicketLock>("ticket lock", &mut group);
    uncontended_inner::<NoLock>("no lock", &mut group);

    group.finish();
}

fn uncontended_inner<L: Lockable + Default>(id: &str, bencher: &mut BenchmarkGroup<WallTime>) {
    let lock = L::default();
    bencher.bench_function(id, |b| {
        b.iter(|| {
            lock.lock();
            black_box(&lock);
            lock.unlock();
        })
    });
}

fn bench_inner<L>(id: &str, bencher: &mut BenchmarkGroup<WallTime>, thread_count: usize)
where
    L: liblocks::Exclusive + Default + Send + Sync + 'static,
{
    bencher.bench_with_input(
        BenchmarkId::new(id, thread_count),
        &thread_count,
        |b, &thread_count| {
            b.iter_custom(|iters| {
                let mut total = Duration::ZERO;
                for _ in 0..iters {
                    let lock: Arc<Locked<u64, L>> = Arc::new(Locked::new(0));
                    let begin = Instant::now();
                    let handles: Vec<_> = (0..thread_count)
                        .map(|_| {
                            let lock = lock.clone();
                            spawn(move || {
                                for _ in 0..ITERATION {
                                    lock.with(|data| *data += 1);
                                }
                            })
                        })
                        .collect();
                    for handle in handles {
                        handle.join().unwrap();
                    }
                    total += begin.elapsed();
                    black_box(lock.with(|data| *data));
                }
                total
            })
        },
    );
}

fn mutex_bench(bencher: &mut BenchmarkGroup<WallTime>, thread_count: usize) {
    bencher.bench_with_input(
        BenchmarkId::new("std mutex", thread_count),
        &thread_count,
        |b, &thread_count| {
            b.iter_custom(|iters| {
                let mut total = Duration::ZERO;
                for _ in 0..iters {
                    let lock = Arc::new(Mutex::new(0u64));
                    let begin = Instant::now();
                    let handles: Vec<_> = (0..thread_count)
                        .map(|_| {
                            let lock = lock.clone();
                            spawn(move || {
                                for _ in 0..ITERATION {
                                    *lock.lock().unwrap() += 1;
                                }
                            })
                        })
                        .collect();
                    for handle in handles {
                        handle.join().unwrap();
                    }
                    total += begin.elapsed();
                }
                total
            })
        },
    );
}

criterion_group!(benches, lock_bench, uncontended_bench);
criterion_main!(benches);
