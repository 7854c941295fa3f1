use core::ptr;

/// Compile-time zero-sized-type query.
///
/// Zero sized elements never touch the allocator; only lengths and capacities move.
pub(crate) trait IsZST {
    const IS_ZST: bool;
}

impl<T> IsZST for T {
    const IS_ZST: bool = core::mem::size_of::<T>() == 0;
}

/// Marks the current branch as unlikely.
#[cold]
#[inline(always)]
pub(crate) const fn cold_path() {}

/// Drops the elements written to `[start, start + count)` in reverse order
/// unless it is [`disarm`](FillGuard::disarm)ed.
///
/// Operations that construct a run of elements one by one (cloning, default
/// filling, resizing) keep one of these alive while user code runs, so a panic
/// half way destroys exactly what was built and nothing else.
pub(crate) struct FillGuard<T> {
    base: *mut T,
    start: usize,
    count: usize,
}

impl<T> FillGuard<T> {
    /// # Safety
    /// `base.add(start + n)` must stay valid for writes for every element
    /// pushed through this guard.
    #[inline(always)]
    pub(crate) const unsafe fn new(base: *mut T, start: usize) -> Self {
        Self {
            base,
            start,
            count: 0,
        }
    }

    /// Writes `value` into the next slot.
    ///
    /// # Safety
    /// The next slot is raw and inside the block handed to [`FillGuard::new`].
    #[inline(always)]
    pub(crate) unsafe fn push(&mut self, value: T) {
        unsafe {
            ptr::write(self.base.add(self.start + self.count), value);
        }
        self.count += 1;
    }

    /// Keeps the constructed elements alive and returns how many there are.
    #[inline(always)]
    pub(crate) fn disarm(self) -> usize {
        let count = self.count;
        core::mem::forget(self);
        count
    }
}

impl<T> Drop for FillGuard<T> {
    fn drop(&mut self) {
        cold_path();
        while self.count > 0 {
            self.count -= 1;
            // SAFETY: slots below `start + count` were written by `push`.
            unsafe {
                ptr::drop_in_place(self.base.add(self.start + self.count));
            }
        }
    }
}
