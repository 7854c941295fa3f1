use core::{
    borrow::{Borrow, BorrowMut},
    cmp, fmt,
    iter::FusedIterator,
    mem::{self, ManuallyDrop},
    ops, ptr, slice,
};

use crate::TryReserveError;
use crate::error::handle_reserve;
use crate::raw_buf::{RawBuf, relocate};
use crate::utils::{FillGuard, cold_path};

/// A contiguous growable array that owns its raw storage.
///
/// A `Vector` is a [`RawBuf`] plus a length: slots `[0, len)` hold live
/// elements, slots `[len, capacity)` are uninitialized. There is no per-slot
/// bookkeeping, everything is derived from `len`.
///
/// # Growth
///
/// Appending or inserting into a full vector doubles the capacity (starting at 1).
/// [`reserve`](Vector::reserve) grows to exactly the requested capacity.
/// Growing allocates a new block, relocates the live elements with a bitwise
/// move and releases the old block; elements are never cloned to grow.
///
/// # Failure guarantees
///
/// - Allocation failure is reported by the `try_*` methods as a [`TryReserveError`],
///   and the vector is left exactly as it was.
/// - A panic raised by a constructor closure during `emplace`/`emplace_back`
///   leaves the vector unchanged.
/// - A panic raised by `Clone` or `Default` while filling several slots drops
///   the elements built so far, in reverse order, before unwinding.
///
/// # Invalidation
///
/// Any operation that reallocates or shifts elements invalidates references
/// into the vector. Safe code cannot observe this: the borrow checker rejects
/// holding a reference across `&mut self` calls.
///
/// # Examples
///
/// ```
/// use rawvec::Vector;
///
/// let mut vec: Vector<i32> = Vector::new();
/// assert_eq!(vec.capacity(), 0);
///
/// vec.push_back(1);
/// vec.push_back(2);
/// vec.push_back(3);
/// assert_eq!(vec.as_slice(), [1, 2, 3]);
///
/// vec.insert(1, 9);
/// assert_eq!(vec.as_slice(), [1, 9, 2, 3]);
///
/// vec.erase(0);
/// assert_eq!(vec.as_slice(), [9, 2, 3]);
///
/// vec.pop_back();
/// assert_eq!(vec.as_slice(), [9, 2]);
/// ```
pub struct Vector<T> {
    buf: RawBuf<T>,
    len: usize,
}

impl<T> Drop for Vector<T> {
    // The block itself is released by `RawBuf`.
    fn drop(&mut self) {
        // SAFETY: `[0, len)` are live.
        unsafe {
            ptr::drop_in_place(ptr::slice_from_raw_parts_mut(self.buf.slot(0), self.len));
        }
    }
}

/// Creates a [`Vector`] containing the arguments.
///
/// The syntax is similar to [`vec!`](https://doc.rust-lang.org/std/macro.vec.html).
///
/// # Examples
///
/// ```
/// # use rawvec::{vector, Vector};
/// let vec: Vector<String> = vector![];
/// let vec: Vector<i64> = vector![1; 5]; // Need to support Clone.
/// let vec: Vector<_> = vector![1, 2, 3, 4];
/// assert_eq!(vec.capacity(), 4);
/// ```
#[macro_export]
macro_rules! vector {
    [] => { $crate::Vector::new() };
    [$elem:expr; $n:expr] => { $crate::Vector::from_elem($elem, $n) };
    [$($item:expr),+ $(,)?] => { $crate::Vector::from([ $($item),+ ]) };
}

impl<T> Vector<T> {
    /// Constructs a new, empty `Vector` with capacity 0.
    ///
    /// No memory is allocated until elements are added.
    ///
    /// # Examples
    ///
    /// ```
    /// # use rawvec::Vector;
    /// let vec: Vector<i32> = Vector::new();
    /// assert_eq!(vec.len(), 0);
    /// assert_eq!(vec.capacity(), 0);
    /// ```
    #[inline]
    pub const fn new() -> Self {
        Self {
            buf: RawBuf::new(),
            len: 0,
        }
    }

    /// Constructs a new, empty `Vector` with room for exactly `capacity` elements.
    ///
    /// # Panics
    /// Panics if the capacity exceeds `isize::MAX` bytes.
    ///
    /// # Examples
    ///
    /// ```
    /// # use rawvec::Vector;
    /// let vec: Vector<i32> = Vector::with_capacity(10);
    /// assert_eq!(vec.len(), 0);
    /// assert_eq!(vec.capacity(), 10);
    /// ```
    #[inline]
    pub fn with_capacity(capacity: usize) -> Self {
        handle_reserve(Self::try_with_capacity(capacity))
    }

    /// Fallible version of [`with_capacity`](Vector::with_capacity).
    #[inline]
    pub fn try_with_capacity(capacity: usize) -> Result<Self, TryReserveError> {
        Ok(Self {
            buf: RawBuf::allocate(capacity)?,
            len: 0,
        })
    }

    /// Returns the number of live elements.
    #[inline(always)]
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the vector contains no elements.
    #[inline(always)]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the number of slots the vector can hold without reallocating.
    ///
    /// # Examples
    ///
    /// ```
    /// # use rawvec::Vector;
    /// let mut vec: Vector<i32> = Vector::new();
    /// vec.push_back(1);
    /// assert_eq!(vec.capacity(), 1);
    /// vec.push_back(2);
    /// assert_eq!(vec.capacity(), 2);
    /// vec.push_back(3);
    /// assert_eq!(vec.capacity(), 4);
    /// ```
    #[inline(always)]
    pub const fn capacity(&self) -> usize {
        self.buf.capacity()
    }

    /// Extracts a slice containing the entire vector.
    #[inline(always)]
    pub const fn as_slice(&self) -> &[T] {
        // SAFETY: `[0, len)` are live.
        unsafe { slice::from_raw_parts(self.buf.slot(0), self.len) }
    }

    /// Extracts a mutable slice of the entire vector.
    #[inline(always)]
    pub const fn as_mut_slice(&mut self) -> &mut [T] {
        // SAFETY: `[0, len)` are live.
        unsafe { slice::from_raw_parts_mut(self.buf.slot(0), self.len) }
    }

    /// Returns a reference to the element at `index` without bounds checking.
    ///
    /// The bound is only checked in debug builds.
    ///
    /// # Safety
    /// `index < len`
    #[inline(always)]
    pub unsafe fn get_unchecked(&self, index: usize) -> &T {
        debug_assert!(index < self.len, "index should be < len");
        unsafe { self.buf.at(index) }
    }

    /// Returns a mutable reference to the element at `index` without bounds checking.
    ///
    /// The bound is only checked in debug builds.
    ///
    /// # Safety
    /// `index < len`
    #[inline(always)]
    pub unsafe fn get_unchecked_mut(&mut self, index: usize) -> &mut T {
        debug_assert!(index < self.len, "index should be < len");
        unsafe { self.buf.at_mut(index) }
    }

    /// Moves the live elements into a new block of `new_capacity` slots.
    ///
    /// Only the allocation can fail, and it happens before anything is touched.
    ///
    /// # Safety
    /// `new_capacity >= self.len`
    #[inline(never)]
    unsafe fn grow(&mut self, new_capacity: usize) -> Result<(), TryReserveError> {
        debug_assert!(new_capacity >= self.len);

        let mut new_buf = RawBuf::allocate(new_capacity)?;
        // SAFETY: `[0, len)` are live in the old block and raw in the new one.
        unsafe {
            relocate(self.buf.slot(0), new_buf.slot(0), self.len);
        }
        // The old block now only holds moved-out bytes, `new_buf` frees it on drop.
        self.buf.swap(&mut new_buf);
        Ok(())
    }

    /// Capacity to grow to when a full vector receives one more element.
    #[inline]
    fn grown_capacity(&self) -> Result<usize, TryReserveError> {
        match self.buf.capacity() {
            0 => Ok(1),
            cap => cap.checked_mul(2).ok_or(TryReserveError::CapacityOverflow),
        }
    }

    /// Makes room for `additional` more elements, at least doubling when growing.
    fn reserve_for(&mut self, additional: usize) -> Result<(), TryReserveError> {
        let required = self
            .len
            .checked_add(additional)
            .ok_or(TryReserveError::CapacityOverflow)?;
        if required <= self.buf.capacity() {
            return Ok(());
        }
        let new_capacity = cmp::max(required, self.buf.capacity().saturating_mul(2));
        // SAFETY: new_capacity >= required >= len
        unsafe { self.grow(new_capacity) }
    }

    /// Grows the storage to exactly `new_capacity` slots if it is currently smaller.
    ///
    /// Does nothing when `new_capacity <= capacity()`. Never changes the length
    /// or the elements.
    ///
    /// # Panics
    /// Panics if the new capacity exceeds `isize::MAX` bytes.
    ///
    /// # Examples
    ///
    /// ```
    /// # use rawvec::{vector, Vector};
    /// let mut vec: Vector<i32> = vector![1, 2];
    ///
    /// vec.reserve(10);
    /// assert_eq!(vec.capacity(), 10);
    ///
    /// vec.reserve(4); // do nothing
    /// assert_eq!(vec.capacity(), 10);
    /// assert_eq!(vec.as_slice(), [1, 2]);
    /// ```
    #[inline]
    pub fn reserve(&mut self, new_capacity: usize) {
        handle_reserve(self.try_reserve(new_capacity));
    }

    /// Fallible version of [`reserve`](Vector::reserve).
    ///
    /// On error the vector is unchanged.
    ///
    /// # Examples
    ///
    /// ```
    /// # use rawvec::{vector, Vector, TryReserveError};
    /// let mut vec: Vector<u64> = vector![1, 2, 3];
    ///
    /// assert_eq!(vec.try_reserve(usize::MAX), Err(TryReserveError::CapacityOverflow));
    /// assert_eq!(vec.as_slice(), [1, 2, 3]);
    /// assert_eq!(vec.capacity(), 3);
    /// ```
    #[inline]
    pub fn try_reserve(&mut self, new_capacity: usize) -> Result<(), TryReserveError> {
        if new_capacity <= self.buf.capacity() {
            return Ok(());
        }
        // SAFETY: new_capacity > capacity >= len
        unsafe { self.grow(new_capacity) }
    }

    /// Constructs the value returned by `f` at position `index`, shifting all
    /// elements after it to the right. Returns `index`.
    ///
    /// - If the vector is full, a new block is allocated first, the value is built
    ///   directly into its final slot there, and the old elements are relocated around it.
    /// - Otherwise the value is built first and then moved into the gap.
    ///
    /// Either way a panic in `f` leaves the vector unchanged.
    ///
    /// # Panics
    /// - Panics if `index > len`.
    /// - Panics if the new capacity exceeds `isize::MAX` bytes.
    ///
    /// # Examples
    ///
    /// ```
    /// # use rawvec::{vector, Vector};
    /// let mut vec: Vector<String> = vector!["a".to_string(), "c".to_string()];
    ///
    /// let pos = vec.emplace(1, || "b".to_string());
    /// assert_eq!(pos, 1);
    /// assert_eq!(vec.as_slice(), ["a", "b", "c"]);
    /// ```
    #[inline]
    pub fn emplace<F: FnOnce() -> T>(&mut self, index: usize, f: F) -> usize {
        handle_reserve(self.try_emplace(index, f))
    }

    /// Fallible version of [`emplace`](Vector::emplace).
    ///
    /// The storage is allocated before `f` runs, so on error `f` is never called
    /// and the vector is unchanged.
    ///
    /// # Panics
    /// Panics if `index > len`.
    pub fn try_emplace<F: FnOnce() -> T>(&mut self, index: usize, f: F) -> Result<usize, TryReserveError> {
        let len = self.len;
        assert!(index <= len, "insertion index should be <= len");

        if len == self.buf.capacity() {
            cold_path();

            let mut new_buf = RawBuf::allocate(self.grown_capacity()?)?;
            // SAFETY:
            // - `index <= len < new capacity`, the slots written in `new_buf` are raw.
            // - `[0, len)` are live in the old block.
            // - If `f` panics, only `new_buf` has been touched and it is freed on unwind.
            unsafe {
                ptr::write(new_buf.slot(index), f());
                relocate(self.buf.slot(0), new_buf.slot(0), index);
                relocate(self.buf.slot(index), new_buf.slot(index + 1), len - index);
            }
            self.buf.swap(&mut new_buf);
        } else {
            let value = f();
            // SAFETY: `len < capacity`, so `[index + 1, len + 1)` is inside the block.
            unsafe {
                let slot = self.buf.slot(index);
                ptr::copy(slot, slot.add(1), len - index);
                ptr::write(slot, value);
            }
        }

        self.len = len + 1;
        Ok(index)
    }

    /// Inserts `element` at position `index`, shifting all elements after it to the right.
    /// Returns `index`.
    ///
    /// # Panics
    /// - Panics if `index > len`.
    /// - Panics if the new capacity exceeds `isize::MAX` bytes.
    ///
    /// # Examples
    ///
    /// ```
    /// # use rawvec::{vector, Vector};
    /// let mut vec: Vector<char> = vector!['a', 'b', 'c'];
    ///
    /// vec.insert(1, 'd');
    /// assert_eq!(vec.as_slice(), ['a', 'd', 'b', 'c']);
    ///
    /// vec.insert(4, 'e');
    /// assert_eq!(vec.as_slice(), ['a', 'd', 'b', 'c', 'e']);
    /// ```
    #[inline]
    pub fn insert(&mut self, index: usize, element: T) -> usize {
        self.emplace(index, || element)
    }

    /// Fallible version of [`insert`](Vector::insert).
    ///
    /// On error `element` is dropped and the vector is unchanged.
    ///
    /// # Panics
    /// Panics if `index > len`.
    #[inline]
    pub fn try_insert(&mut self, index: usize, element: T) -> Result<usize, TryReserveError> {
        self.try_emplace(index, || element)
    }

    /// Appends the value returned by `f` and returns a reference to it.
    ///
    /// # Panics
    /// Panics if the new capacity exceeds `isize::MAX` bytes.
    ///
    /// # Examples
    ///
    /// ```
    /// # use rawvec::Vector;
    /// let mut vec: Vector<String> = Vector::new();
    ///
    /// let last = vec.emplace_back(|| "hello".to_string());
    /// last.push_str(", world");
    /// assert_eq!(vec.as_slice(), ["hello, world"]);
    /// ```
    #[inline]
    pub fn emplace_back<F: FnOnce() -> T>(&mut self, f: F) -> &mut T {
        handle_reserve(self.try_emplace_back(f))
    }

    /// Fallible version of [`emplace_back`](Vector::emplace_back).
    #[inline]
    pub fn try_emplace_back<F: FnOnce() -> T>(&mut self, f: F) -> Result<&mut T, TryReserveError> {
        let index = self.try_emplace(self.len, f)?;
        // SAFETY: the slot was just constructed.
        Ok(unsafe { self.buf.at_mut(index) })
    }

    /// Appends an element to the back of the vector and returns a reference to it.
    ///
    /// # Panics
    /// Panics if the new capacity exceeds `isize::MAX` bytes.
    ///
    /// # Time complexity
    /// Amortized O(1)
    ///
    /// # Examples
    ///
    /// ```
    /// # use rawvec::Vector;
    /// let mut vec = Vector::new();
    /// *vec.push_back(1) += 10;
    /// vec.push_back(2);
    /// assert_eq!(vec.as_slice(), [11, 2]);
    /// ```
    #[inline]
    pub fn push_back(&mut self, value: T) -> &mut T {
        self.emplace_back(|| value)
    }

    /// Fallible version of [`push_back`](Vector::push_back).
    ///
    /// On error `value` is dropped and the vector is unchanged.
    #[inline]
    pub fn try_push_back(&mut self, value: T) -> Result<&mut T, TryReserveError> {
        self.try_emplace_back(|| value)
    }

    /// Removes the last element and returns it, or `None` if the vector is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// # use rawvec::{vector, Vector};
    /// let mut vec: Vector<i32> = vector![1];
    /// assert_eq!(vec.pop_back(), Some(1));
    /// assert_eq!(vec.pop_back(), None);
    /// assert!(vec.is_empty());
    /// ```
    #[inline]
    pub fn pop_back(&mut self) -> Option<T> {
        if self.len == 0 {
            cold_path();
            None
        } else {
            self.len -= 1;
            // SAFETY: the slot was live and is now outside `[0, len)`.
            Some(unsafe { ptr::read(self.buf.slot(self.len)) })
        }
    }

    /// Removes and returns the element at `index`, shifting all elements after it to the left.
    ///
    /// # Panics
    /// Panics if `index >= len`.
    ///
    /// # Examples
    ///
    /// ```
    /// # use rawvec::{vector, Vector};
    /// let mut vec: Vector<char> = vector!['a', 'b', 'c'];
    /// assert_eq!(vec.remove(1), 'b');
    /// assert_eq!(vec.as_slice(), ['a', 'c']);
    /// ```
    pub fn remove(&mut self, index: usize) -> T {
        let len = self.len;
        assert!(index < len, "removal index should be < len");

        // SAFETY: `index < len`, the tail `[index + 1, len)` is live.
        unsafe {
            let slot = self.buf.slot(index);
            let value = ptr::read(slot);
            ptr::copy(slot.add(1), slot, len - index - 1);
            self.len = len - 1;
            value
        }
    }

    /// Destroys the element at `index` and shifts all elements after it to the left.
    ///
    /// Returns the position of the element that followed the erased one, which is `index`.
    /// The element is dropped after the vector is consistent again.
    ///
    /// # Panics
    /// Panics if `index >= len`.
    ///
    /// # Examples
    ///
    /// ```
    /// # use rawvec::{vector, Vector};
    /// let mut vec: Vector<i32> = vector![1, 2, 3];
    /// let next = vec.erase(0);
    /// assert_eq!(next, 0);
    /// assert_eq!(vec[next], 2);
    /// ```
    #[inline]
    pub fn erase(&mut self, index: usize) -> usize {
        drop(self.remove(index));
        index
    }

    /// Shortens the vector, keeping the first `len` elements and dropping the rest.
    ///
    /// If `len` is greater or equal to the current length, this has no effect.
    /// The capacity is not changed.
    #[inline]
    pub fn truncate(&mut self, len: usize) {
        if len < self.len {
            let tail = ptr::slice_from_raw_parts_mut(self.buf.slot(len), self.len - len);
            // Shrink first: a panicking destructor leaks instead of double dropping.
            self.len = len;
            // SAFETY: the tail was live and is now outside `[0, len)`.
            unsafe {
                ptr::drop_in_place(tail);
            }
        }
    }

    /// Removes all elements, keeping the capacity.
    #[inline]
    pub fn clear(&mut self) {
        self.truncate(0);
    }

    /// Resizes the vector in place so that its length equals `new_len`.
    ///
    /// - Shrinking drops the trailing elements.
    /// - Growing reserves exactly `new_len` slots then fills them with values returned by `f`.
    ///   If `f` panics, the values already produced are dropped and the length is unchanged.
    ///
    /// # Panics
    /// Panics if the new capacity exceeds `isize::MAX` bytes.
    ///
    /// # Examples
    ///
    /// ```
    /// # use rawvec::{vector, Vector};
    /// let mut vec: Vector<i32> = vector![1, 2, 3, 4];
    /// vec.resize_with(2, Default::default);
    /// assert_eq!(vec.as_slice(), [1, 2]);
    ///
    /// let mut p = 1;
    /// vec.resize_with(5, || { p *= 2; p });
    /// assert_eq!(vec.as_slice(), [1, 2, 2, 4, 8]);
    /// ```
    #[inline]
    pub fn resize_with<F: FnMut() -> T>(&mut self, new_len: usize, f: F) {
        handle_reserve(self.try_resize_with(new_len, f));
    }

    /// Fallible version of [`resize_with`](Vector::resize_with).
    pub fn try_resize_with<F: FnMut() -> T>(&mut self, new_len: usize, mut f: F) -> Result<(), TryReserveError> {
        if new_len <= self.len {
            self.truncate(new_len);
            return Ok(());
        }

        self.try_reserve(new_len)?;

        // SAFETY: `[len, new_len)` are raw slots inside the block.
        let mut guard = unsafe { FillGuard::new(self.buf.slot(0), self.len) };
        for _ in self.len..new_len {
            unsafe { guard.push(f()) };
        }
        self.len += guard.disarm();
        Ok(())
    }

    /// Exchanges storage and length with `other` in O(1) without touching any element.
    #[inline]
    fn swap_contents(&mut self, other: &mut Self) {
        self.buf.swap(&mut other.buf);
        mem::swap(&mut self.len, &mut other.len);
    }
}

impl<T: Default> Vector<T> {
    /// Constructs a vector holding `len` default values, with capacity `len`.
    ///
    /// # Examples
    ///
    /// ```
    /// # use rawvec::Vector;
    /// let vec: Vector<i32> = Vector::with_len(5);
    /// assert_eq!(vec.len(), 5);
    /// assert!(vec.capacity() >= 5);
    /// assert!(vec.iter().all(|v| *v == 0));
    /// ```
    #[inline]
    pub fn with_len(len: usize) -> Self {
        let mut vec = Self::new();
        vec.resize(len);
        vec
    }

    /// Resizes the vector so that its length equals `new_len`,
    /// filling new slots with `T::default()`.
    ///
    /// See [`resize_with`](Vector::resize_with).
    ///
    /// # Examples
    ///
    /// ```
    /// # use rawvec::{vector, Vector};
    /// let mut vec: Vector<u8> = vector![7];
    /// vec.resize(3);
    /// assert_eq!(vec.as_slice(), [7, 0, 0]);
    /// vec.resize(1);
    /// assert_eq!(vec.as_slice(), [7]);
    /// ```
    #[inline]
    pub fn resize(&mut self, new_len: usize) {
        self.resize_with(new_len, T::default);
    }

    /// Fallible version of [`resize`](Vector::resize).
    #[inline]
    pub fn try_resize(&mut self, new_len: usize) -> Result<(), TryReserveError> {
        self.try_resize_with(new_len, T::default)
    }
}

impl<T: Clone> Vector<T> {
    /// Constructs a vector holding `num` clones of `elem`, with capacity `num`.
    ///
    /// `elem` itself becomes the last element.
    ///
    /// # Examples
    ///
    /// ```
    /// # use rawvec::Vector;
    /// let vec = Vector::from_elem("x".to_string(), 3);
    /// assert_eq!(vec.as_slice(), ["x", "x", "x"]);
    /// ```
    pub fn from_elem(elem: T, num: usize) -> Self {
        let mut vec = Self::with_capacity(num);
        if num > 0 {
            // SAFETY: `[0, num)` are raw slots inside the block.
            let mut guard = unsafe { FillGuard::new(vec.buf.slot(0), 0) };
            for _ in 1..num {
                unsafe { guard.push(elem.clone()) };
            }
            unsafe { guard.push(elem) };
            vec.len = guard.disarm();
        }
        vec
    }

    /// Clones and appends all elements of `other`.
    ///
    /// If a clone panics, the clones appended so far are dropped and the length is unchanged.
    ///
    /// # Examples
    ///
    /// ```
    /// # use rawvec::{vector, Vector};
    /// let mut vec: Vector<i32> = vector![1];
    /// vec.extend_from_slice(&[2, 3, 4]);
    /// assert_eq!(vec.as_slice(), [1, 2, 3, 4]);
    /// ```
    pub fn extend_from_slice(&mut self, other: &[T]) {
        handle_reserve(self.reserve_for(other.len()));

        // SAFETY: `[len, len + other.len())` are raw slots inside the block.
        let mut guard = unsafe { FillGuard::new(self.buf.slot(0), self.len) };
        for item in other {
            unsafe { guard.push(item.clone()) };
        }
        self.len += guard.disarm();
    }
}

impl<T> Default for Vector<T> {
    /// Equal to [`Vector::new`].
    #[inline(always)]
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone> Clone for Vector<T> {
    /// Deep-copies the live elements into a block of exactly `len` slots.
    ///
    /// # Examples
    ///
    /// ```
    /// # use rawvec::{vector, Vector};
    /// let vec: Vector<i32> = vector![1, 2, 3];
    /// let mut copy = vec.clone();
    /// copy[0] = 10;
    ///
    /// assert_eq!(vec.as_slice(), [1, 2, 3]);
    /// assert_eq!(copy.as_slice(), [10, 2, 3]);
    /// ```
    fn clone(&self) -> Self {
        let buf = handle_reserve(RawBuf::allocate(self.len));
        // SAFETY: `[0, len)` are raw slots of `buf`. The guard is dropped before `buf` on unwind.
        let mut guard = unsafe { FillGuard::new(buf.slot(0), 0) };
        for item in self.as_slice() {
            unsafe { guard.push(item.clone()) };
        }
        let len = guard.disarm();
        Self { buf, len }
    }

    /// Copy-assignment.
    ///
    /// - If `source` does not fit in the current capacity, a full copy is built
    ///   first and swapped in, so a failure leaves `self` unchanged.
    /// - Otherwise the storage is reused: the common prefix is assigned with
    ///   [`Clone::clone_from`], extra elements are dropped or cloned in.
    ///   A panicking clone leaves a valid vector whose contents are partly assigned.
    ///
    /// # Examples
    ///
    /// ```
    /// # use rawvec::{vector, Vector};
    /// let source: Vector<i32> = vector![1, 2];
    /// let mut vec: Vector<i32> = Vector::with_capacity(8);
    /// vec.push_back(9);
    ///
    /// vec.clone_from(&source);
    /// assert_eq!(vec.as_slice(), [1, 2]);
    /// assert_eq!(vec.capacity(), 8);
    /// ```
    fn clone_from(&mut self, source: &Self) {
        if source.len > self.buf.capacity() {
            let mut copy = source.clone();
            self.swap_contents(&mut copy);
            return;
        }

        let common = cmp::min(self.len, source.len);
        self.as_mut_slice()[..common].clone_from_slice(&source.as_slice()[..common]);
        if source.len < self.len {
            self.truncate(source.len);
        } else {
            self.extend_from_slice(&source.as_slice()[common..]);
        }
    }
}

impl<T> ops::Deref for Vector<T> {
    type Target = [T];
    #[inline]
    fn deref(&self) -> &Self::Target {
        self.as_slice()
    }
}

impl<T> ops::DerefMut for Vector<T> {
    #[inline]
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.as_mut_slice()
    }
}

impl<T: fmt::Debug> fmt::Debug for Vector<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self.as_slice(), f)
    }
}

impl<T> AsRef<[T]> for Vector<T> {
    #[inline]
    fn as_ref(&self) -> &[T] {
        self.as_slice()
    }
}

impl<T> AsMut<[T]> for Vector<T> {
    #[inline]
    fn as_mut(&mut self) -> &mut [T] {
        self.as_mut_slice()
    }
}

impl<T> Borrow<[T]> for Vector<T> {
    #[inline]
    fn borrow(&self) -> &[T] {
        self.as_slice()
    }
}

impl<T> BorrowMut<[T]> for Vector<T> {
    #[inline]
    fn borrow_mut(&mut self) -> &mut [T] {
        self.as_mut_slice()
    }
}

impl<T, I: slice::SliceIndex<[T]>> ops::Index<I> for Vector<T> {
    type Output = I::Output;
    #[inline]
    fn index(&self, index: I) -> &Self::Output {
        ops::Index::index(self.as_slice(), index)
    }
}

impl<T, I: slice::SliceIndex<[T]>> ops::IndexMut<I> for Vector<T> {
    #[inline]
    fn index_mut(&mut self, index: I) -> &mut Self::Output {
        ops::IndexMut::index_mut(self.as_mut_slice(), index)
    }
}

impl<'a, T> IntoIterator for &'a Vector<T> {
    type Item = &'a T;
    type IntoIter = slice::Iter<'a, T>;
    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.as_slice().iter()
    }
}

impl<'a, T> IntoIterator for &'a mut Vector<T> {
    type Item = &'a mut T;
    type IntoIter = slice::IterMut<'a, T>;
    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.as_mut_slice().iter_mut()
    }
}

impl<T> Extend<T> for Vector<T> {
    /// Appends every item of the iterator, reserving for its lower size bound first.
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        let iter = iter.into_iter();
        let (lower, _) = iter.size_hint();
        handle_reserve(self.reserve_for(lower));
        for item in iter {
            self.push_back(item);
        }
    }
}

impl<'a, T: 'a + Clone> Extend<&'a T> for Vector<T> {
    /// Clone values from iterators.
    fn extend<I: IntoIterator<Item = &'a T>>(&mut self, iter: I) {
        Extend::<T>::extend(self, iter.into_iter().cloned());
    }
}

impl<T> FromIterator<T> for Vector<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut vec = Self::new();
        vec.extend(iter);
        vec
    }
}

impl<T, const N: usize> From<[T; N]> for Vector<T> {
    /// Moves the array into a vector of capacity `N`.
    fn from(arr: [T; N]) -> Self {
        let mut vec = Self::with_capacity(N);
        let arr = ManuallyDrop::new(arr);
        // SAFETY: the array elements are moved out exactly once and never dropped in place.
        unsafe {
            relocate(arr.as_ptr(), vec.buf.slot(0), N);
        }
        vec.len = N;
        vec
    }
}

impl<T: Clone> From<&[T]> for Vector<T> {
    #[inline]
    fn from(value: &[T]) -> Self {
        let mut vec = Self::with_capacity(value.len());
        vec.extend_from_slice(value);
        vec
    }
}

/// An iterator that moves out of a [`Vector`].
///
/// Elements that are not yielded are dropped together with the iterator.
pub struct IntoIter<T> {
    buf: RawBuf<T>,
    start: usize,
    end: usize,
}

impl<T> IntoIterator for Vector<T> {
    type Item = T;
    type IntoIter = IntoIter<T>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        let mut vec = ManuallyDrop::new(self);
        IntoIter {
            buf: vec.buf.take(),
            start: 0,
            end: vec.len,
        }
    }
}

impl<T> IntoIter<T> {
    /// Returns the remaining items as a slice.
    #[inline]
    pub fn as_slice(&self) -> &[T] {
        // SAFETY: `[start, end)` are live.
        unsafe { slice::from_raw_parts(self.buf.slot(self.start), self.end - self.start) }
    }

    /// Returns the remaining items as a mutable slice.
    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        // SAFETY: `[start, end)` are live.
        unsafe { slice::from_raw_parts_mut(self.buf.slot(self.start), self.end - self.start) }
    }
}

impl<T> Iterator for IntoIter<T> {
    type Item = T;

    #[inline]
    fn next(&mut self) -> Option<T> {
        if self.start == self.end {
            None
        } else {
            let index = self.start;
            self.start += 1;
            // SAFETY: the slot was live and is now outside `[start, end)`.
            Some(unsafe { ptr::read(self.buf.slot(index)) })
        }
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = self.end - self.start;
        (len, Some(len))
    }
}

impl<T> DoubleEndedIterator for IntoIter<T> {
    #[inline]
    fn next_back(&mut self) -> Option<T> {
        if self.start == self.end {
            None
        } else {
            self.end -= 1;
            // SAFETY: the slot was live and is now outside `[start, end)`.
            Some(unsafe { ptr::read(self.buf.slot(self.end)) })
        }
    }
}

impl<T> ExactSizeIterator for IntoIter<T> {}

impl<T> FusedIterator for IntoIter<T> {}

impl<T> Drop for IntoIter<T> {
    fn drop(&mut self) {
        // SAFETY: `[start, end)` are live, the block is freed by `RawBuf`.
        unsafe {
            ptr::drop_in_place(ptr::slice_from_raw_parts_mut(
                self.buf.slot(self.start),
                self.end - self.start,
            ));
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for IntoIter<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("IntoIter").field(&self.as_slice()).finish()
    }
}
