//! Uninitialized storage for [`Vector`](crate::Vector).
//!
//! [`RawBuf`] owns one contiguous block sized for a fixed number of elements
//! and nothing else. It does not know which slots hold live values: that is
//! reconstructed by its owner from a single length, so dropping a `RawBuf`
//! only frees bytes and never runs element destructors.

use alloc::alloc::{Layout, alloc, dealloc};
use core::{marker::PhantomData, mem, ptr::{self, NonNull}};

use crate::TryReserveError;
use crate::utils::{IsZST, cold_path};

/// An owned, uninitialized block of `capacity` element slots.
///
/// - `capacity == 0` never allocates and stores a dangling pointer.
/// - Zero sized types never allocate, any capacity is accepted.
/// - Not `Clone`: copying bytes without knowing which slots are live is meaningless.
pub(crate) struct RawBuf<T> {
    ptr: NonNull<T>,
    cap: usize,
    _marker: PhantomData<T>,
}

unsafe impl<T> Send for RawBuf<T> where T: Send {}
unsafe impl<T> Sync for RawBuf<T> where T: Sync {}

impl<T> Drop for RawBuf<T> {
    fn drop(&mut self) {
        if let Some(layout) = self.layout() {
            // SAFETY: the block was allocated with this exact layout in `allocate`.
            unsafe {
                dealloc(self.ptr.as_ptr() as *mut u8, layout);
            }
        }
    }
}

impl<T> RawBuf<T> {
    /// An owner without any block.
    #[inline(always)]
    pub(crate) const fn new() -> Self {
        Self {
            ptr: NonNull::dangling(),
            cap: 0,
            _marker: PhantomData,
        }
    }

    /// Allocates uninitialized room for `capacity` elements.
    ///
    /// Failures are returned to the caller, never retried.
    pub(crate) fn allocate(capacity: usize) -> Result<Self, TryReserveError> {
        if capacity == 0 {
            return Ok(Self::new());
        }
        if T::IS_ZST {
            return Ok(Self {
                ptr: NonNull::dangling(),
                cap: capacity,
                _marker: PhantomData,
            });
        }

        let layout = Layout::array::<T>(capacity).map_err(|_| TryReserveError::CapacityOverflow)?;

        // SAFETY: `T` is not zero sized and `capacity > 0`, so the layout has a non-zero size.
        let ptr = unsafe { alloc(layout) } as *mut T;
        match NonNull::new(ptr) {
            Some(ptr) => Ok(Self {
                ptr,
                cap: capacity,
                _marker: PhantomData,
            }),
            None => {
                cold_path();
                Err(TryReserveError::AllocError { layout })
            }
        }
    }

    /// The layout of the owned block, `None` if nothing was allocated.
    #[inline]
    fn layout(&self) -> Option<Layout> {
        if T::IS_ZST || self.cap == 0 {
            None
        } else {
            // SAFETY: the same layout was successfully built in `allocate`.
            Some(unsafe {
                Layout::from_size_align_unchecked(mem::size_of::<T>() * self.cap, mem::align_of::<T>())
            })
        }
    }

    /// Number of slots in the block.
    #[inline(always)]
    pub(crate) const fn capacity(&self) -> usize {
        self.cap
    }

    /// Address of the slot at `offset`.
    ///
    /// The one-past-the-end address (`offset == capacity`) is allowed.
    #[inline(always)]
    pub(crate) const fn slot(&self, offset: usize) -> *mut T {
        debug_assert!(offset <= self.cap, "slot offset out of the block");
        // SAFETY: `offset <= capacity`, the result stays inside (or one past) the block.
        unsafe { self.ptr.as_ptr().add(offset) }
    }

    /// Reference to the element in slot `index`.
    ///
    /// # Safety
    /// - `index < capacity`
    /// - The slot holds a live element.
    #[inline(always)]
    pub(crate) const unsafe fn at(&self, index: usize) -> &T {
        debug_assert!(index < self.cap, "slot index out of the block");
        unsafe { &*self.ptr.as_ptr().add(index) }
    }

    /// Mutable reference to the element in slot `index`.
    ///
    /// # Safety
    /// - `index < capacity`
    /// - The slot holds a live element.
    #[inline(always)]
    pub(crate) const unsafe fn at_mut(&mut self, index: usize) -> &mut T {
        debug_assert!(index < self.cap, "slot index out of the block");
        unsafe { &mut *self.ptr.as_ptr().add(index) }
    }

    /// Exchanges the blocks of two owners without touching any element.
    #[inline(always)]
    pub(crate) fn swap(&mut self, other: &mut Self) {
        mem::swap(self, other);
    }

    /// Moves the block out, leaving `self` empty.
    #[inline(always)]
    pub(crate) fn take(&mut self) -> Self {
        mem::replace(self, Self::new())
    }
}

/// Relocates `count` live elements from `src` to `dst`.
///
/// A move in Rust is a bitwise copy that cannot fail, so every element type
/// offers a non-failing transfer and relocation never falls back to `Clone`.
/// After the call the source slots are raw: their values live on in `dst` and
/// must not be dropped again.
///
/// # Safety
/// - `src..src + count` are live, `dst..dst + count` are raw.
/// - The two ranges do not overlap.
#[inline(always)]
pub(crate) const unsafe fn relocate<T>(src: *const T, dst: *mut T, count: usize) {
    unsafe {
        ptr::copy_nonoverlapping(src, dst, count);
    }
}
