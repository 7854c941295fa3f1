//! Compares `Vector` with `Vec` and `SmallVec` on the common operations.

use core::hint;
use criterion::{Bencher, Criterion, criterion_group, criterion_main};
use rawvec::Vector;
use smallvec::SmallVec;
use std::sync::OnceLock;

use rand::Rng;

const SMALL_SIZE: usize = 16;
const LARGE_SIZE: usize = 40000;

/// A function used to generate a random amount of data.
///
/// We use random data to simulate real-world scenarios and
/// avoid excessive optimization by the compiler when it knows the context.
#[inline(never)]
fn gen_one(start: usize, end: usize) -> usize {
    let mut rng = rand::rng();
    rng.random_range(start..end)
}

/// The amount of data used in small data testing.
static SMALL_BOUND: OnceLock<usize> = OnceLock::new();

/// The amount of data used in large data testing.
static LARGE_BOUND: OnceLock<usize> = OnceLock::new();

/// Generate an array of random content of a specified length.
#[inline(never)]
fn gen_rand(len: usize, start: u64, end: u64) -> Box<[u64]> {
    let mut rng = rand::rng();
    (0..len).map(|_| rng.random_range(start..end)).collect()
}

/// The operations every benchmarked container offers.
trait VecLike: Clone {
    fn new_empty() -> Self;
    fn new_large() -> Self;
    fn push(&mut self, value: u64);
    fn pop(&mut self) -> Option<u64>;
    fn insert(&mut self, index: usize, value: u64);
    fn remove(&mut self, index: usize) -> u64;
    fn get_mut(&mut self, index: usize) -> &mut u64;
    fn clear(&mut self);
}

impl VecLike for Vec<u64> {
    #[inline(always)]
    fn new_empty() -> Self {
        Self::new()
    }
    #[inline(always)]
    fn new_large() -> Self {
        Self::with_capacity(LARGE_SIZE)
    }
    #[inline(always)]
    fn push(&mut self, value: u64) {
        Vec::push(self, value)
    }
    #[inline(always)]
    fn pop(&mut self) -> Option<u64> {
        Vec::pop(self)
    }
    #[inline(always)]
    fn insert(&mut self, index: usize, value: u64) {
        Vec::insert(self, index, value)
    }
    #[inline(always)]
    fn remove(&mut self, index: usize) -> u64 {
        Vec::remove(self, index)
    }
    #[inline(always)]
    fn get_mut(&mut self, index: usize) -> &mut u64 {
        &mut self[index]
    }
    #[inline(always)]
    fn clear(&mut self) {
        Vec::clear(self)
    }
}

impl VecLike for SmallVec<[u64; SMALL_SIZE]> {
    #[inline(always)]
    fn new_empty() -> Self {
        Self::new()
    }
    #[inline(always)]
    fn new_large() -> Self {
        Self::with_capacity(LARGE_SIZE)
    }
    #[inline(always)]
    fn push(&mut self, value: u64) {
        SmallVec::push(self, value)
    }
    #[inline(always)]
    fn pop(&mut self) -> Option<u64> {
        SmallVec::pop(self)
    }
    #[inline(always)]
    fn insert(&mut self, index: usize, value: u64) {
        SmallVec::insert(self, index, value)
    }
    #[inline(always)]
    fn remove(&mut self, index: usize) -> u64 {
        SmallVec::remove(self, index)
    }
    #[inline(always)]
    fn get_mut(&mut self, index: usize) -> &mut u64 {
        &mut self[index]
    }
    #[inline(always)]
    fn clear(&mut self) {
        SmallVec::clear(self)
    }
}

impl VecLike for Vector<u64> {
    #[inline(always)]
    fn new_empty() -> Self {
        Self::new()
    }
    #[inline(always)]
    fn new_large() -> Self {
        Self::with_capacity(LARGE_SIZE)
    }
    #[inline(always)]
    fn push(&mut self, value: u64) {
        self.push_back(value);
    }
    #[inline(always)]
    fn pop(&mut self) -> Option<u64> {
        self.pop_back()
    }
    #[inline(always)]
    fn insert(&mut self, index: usize, value: u64) {
        Vector::insert(self, index, value);
    }
    #[inline(always)]
    fn remove(&mut self, index: usize) -> u64 {
        Vector::remove(self, index)
    }
    #[inline(always)]
    fn get_mut(&mut self, index: usize) -> &mut u64 {
        &mut self[index]
    }
    #[inline(always)]
    fn clear(&mut self) {
        Vector::clear(self)
    }
}

macro_rules! gen_bench_group {
    ($c:ident => $fn_name:ident) => {{
        let mut group_new = $c.benchmark_group(stringify!($fn_name));
        group_new.bench_function("Vec", |b| $fn_name::<Vec<u64>>(b));
        group_new.bench_function("Vector", |b| $fn_name::<Vector<u64>>(b));
        group_new.bench_function("SmallVec", |b| $fn_name::<SmallVec<[u64; SMALL_SIZE]>>(b));
    }};
}

fn bench_vec(c: &mut Criterion) {
    SMALL_BOUND.get_or_init(|| gen_one(14, 16));
    LARGE_BOUND.get_or_init(|| gen_one(36000, 36003));
    gen_bench_group!(c => push_small_from_empty);
    gen_bench_group!(c => push_large);
    gen_bench_group!(c => push_large_from_empty);
    gen_bench_group!(c => pop_large);
    gen_bench_group!(c => insert_small);
    gen_bench_group!(c => remove_small);
    gen_bench_group!(c => clone_large);
}

/// Not pre allocating memory, every container starts empty.
///
/// The data volume is 14-15.
#[inline(never)]
fn push_small_from_empty<T: VecLike>(b: &mut Bencher) {
    let data = gen_rand(*SMALL_BOUND.get().unwrap(), 0, 9999);
    let index = gen_one(0, *SMALL_BOUND.get().unwrap());

    b.iter(|| {
        let mut vec = T::new_empty();
        // Randomly collect internal data to avoid
        // compiler optimization of these non output codes.
        let mut counter = 0u64;
        for item in &data {
            vec.push(*item);
        }
        counter += *vec.get_mut(index);
        hint::black_box(counter)
    });
}

/// Pre allocate capacity and only test the efficiency of `push`.
///
/// The data volume is 36000-36002.
#[inline(never)]
fn push_large<T: VecLike>(b: &mut Bencher) {
    let mut vec = T::new_large();
    let data = gen_rand(*LARGE_BOUND.get().unwrap(), 0, 9999);
    let index = gen_rand(10, 0, *LARGE_BOUND.get().unwrap() as _);

    b.iter(|| {
        let mut counter = 0u64;
        vec.clear();
        for item in &data {
            vec.push(*item);
        }
        for item in &index {
            counter += *vec.get_mut(*item as usize);
        }
        hint::black_box(counter)
    });
}

/// Not pre allocating memory, all containers need to grow repeatedly.
///
/// The data volume is 36000-36002.
#[inline(never)]
fn push_large_from_empty<T: VecLike>(b: &mut Bencher) {
    let data = gen_rand(*LARGE_BOUND.get().unwrap(), 0, 9999);
    let index = gen_rand(10, 0, *LARGE_BOUND.get().unwrap() as _);

    b.iter(|| {
        let mut vec = T::new_empty();
        let mut counter = 0u64;
        for item in &data {
            vec.push(*item);
        }
        for item in &index {
            counter += *vec.get_mut(*item as usize);
        }
        hint::black_box(counter)
    });
}

/// Fill, then pop everything.
///
/// The data volume is 36000-36002.
#[inline(never)]
fn pop_large<T: VecLike>(b: &mut Bencher) {
    let mut vec = T::new_large();
    let data = gen_rand(*LARGE_BOUND.get().unwrap(), 0, 9999);

    b.iter(|| {
        for item in &data {
            vec.push(*item);
        }
        let mut counter = 0u64;
        while let Some(v) = vec.pop() {
            counter = counter.wrapping_add(v);
        }
        hint::black_box(counter)
    });
}

/// Insert at random positions, including the front.
///
/// The data volume is 14-15.
#[inline(never)]
fn insert_small<T: VecLike>(b: &mut Bencher) {
    let data = gen_rand(*SMALL_BOUND.get().unwrap(), 0, 9999);

    b.iter(|| {
        let mut vec = T::new_empty();
        for (i, item) in data.iter().enumerate() {
            vec.insert((*item as usize) % (i + 1), *item);
        }
        hint::black_box(*vec.get_mut(0))
    });
}

/// Remove from random positions until empty.
///
/// The data volume is 14-15.
#[inline(never)]
fn remove_small<T: VecLike>(b: &mut Bencher) {
    let data = gen_rand(*SMALL_BOUND.get().unwrap(), 0, 9999);
    let mut full = T::new_empty();
    for item in &data {
        full.push(*item);
    }

    b.iter(|| {
        let mut vec = full.clone();
        let mut counter = 0u64;
        for (i, item) in data.iter().enumerate() {
            let len = data.len() - i;
            counter = counter.wrapping_add(vec.remove((*item as usize) % len));
        }
        hint::black_box(counter)
    });
}

/// Deep copy of a large vector.
///
/// The data volume is 36000-36002.
#[inline(never)]
fn clone_large<T: VecLike>(b: &mut Bencher) {
    let data = gen_rand(*LARGE_BOUND.get().unwrap(), 0, 9999);
    let mut full = T::new_large();
    for item in &data {
        full.push(*item);
    }

    b.iter(|| hint::black_box(full.clone()));
}

criterion_group! {
    name = benches;
    config = Criterion::default()
        .sample_size(200)
        .warm_up_time(core::time::Duration::from_secs(3))
        .measurement_time(core::time::Duration::from_secs(8));
    targets = bench_vec,
}
criterion_main!(benches);
