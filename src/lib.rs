//! ## Intro
//!
//! A growable, contiguous vector that manages its own raw storage instead of
//! wrapping [`Vec`].
//!
//! The crate is split into two layers:
//!
//! - a raw storage owner: one uninitialized block sized for a fixed number of
//!   elements, which only allocates and frees bytes;
//! - [`Vector`]: the storage plus a single live-element count, which decides
//!   what is constructed, destroyed and relocated.
//!
//! Slots `[0, len)` hold live elements and slots `[len, capacity)` are raw.
//! Nothing else is tracked.
//!
//! ```
//! # use rawvec::{vector, Vector};
//! let mut vec: Vector<i32> = vector![1, 2, 3];
//!
//! vec.insert(1, 9);
//! vec.erase(0);
//! vec.pop_back();
//! assert_eq!(vec.as_slice(), [9, 2]);
//! ```
//!
//! ## Failure guarantees
//!
//! Every growing operation has a `try_*` variant returning [`TryReserveError`].
//! When it fails, the vector is exactly as it was before the call:
//!
//! ```
//! # use rawvec::{vector, Vector, TryReserveError};
//! let mut vec: Vector<u64> = vector![1, 2, 3];
//!
//! assert_eq!(vec.try_reserve(usize::MAX), Err(TryReserveError::CapacityOverflow));
//! assert_eq!(vec.as_slice(), [1, 2, 3]);
//! assert_eq!(vec.capacity(), 3);
//! ```
//!
//! Elements are relocated by bitwise moves during growth, never cloned. A panic
//! from a user constructor, `Clone` or `Default` drops exactly the elements the
//! failed operation had built before unwinding further.
//!
//! ## `no_std` support
//!
//! This crate requires only `core` and `alloc`.
//!
//! ## Optional features
//!
//! ### `std`
//!
//! Implements [`std::io::Write`] for `Vector<u8>`.
//!
//! [`Vec`]: alloc::vec::Vec
//! [`std::io::Write`]: https://doc.rust-lang.org/std/io/trait.Write.html
#![no_std]

extern crate alloc;

#[cfg(any(test, feature = "std"))]
extern crate std;

mod utils;

mod error;
#[doc(inline)]
pub use error::TryReserveError;

mod raw_buf;

pub mod vector;
#[doc(inline)]
pub use vector::Vector;

#[cfg(feature = "std")]
mod std_io;
