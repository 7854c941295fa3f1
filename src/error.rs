use core::alloc::Layout;

use thiserror::Error;

/// The error type for the `try_*` family of [`Vector`](crate::Vector) methods.
///
/// Whenever one of these is returned, the vector is exactly as it was before the call.
///
/// # Examples
///
/// ```
/// # use rawvec::{Vector, TryReserveError};
/// let mut vec: Vector<u64> = Vector::new();
/// let err = vec.try_reserve(usize::MAX).unwrap_err();
///
/// assert_eq!(err, TryReserveError::CapacityOverflow);
/// assert_eq!(vec.capacity(), 0);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum TryReserveError {
    /// The requested capacity does not fit in `isize::MAX` bytes.
    #[error("capacity overflow")]
    CapacityOverflow,
    /// The allocator could not provide a block of the requested layout.
    #[error("memory allocation of {} bytes failed", .layout.size())]
    AllocError {
        /// The layout of the failed request.
        layout: Layout,
    },
}

/// Turns a reservation failure into the behavior of the infallible API:
/// a panic on overflow, the global allocation error handler otherwise.
#[inline]
pub(crate) fn handle_reserve<R>(result: Result<R, TryReserveError>) -> R {
    match result {
        Ok(value) => value,
        Err(err) => {
            crate::utils::cold_path();
            match err {
                TryReserveError::CapacityOverflow => panic!("capacity overflow"),
                TryReserveError::AllocError { layout } => alloc::alloc::handle_alloc_error(layout),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString;

    #[test]
    fn messages() {
        assert_eq!(TryReserveError::CapacityOverflow.to_string(), "capacity overflow");

        let layout = Layout::array::<u32>(4).unwrap();
        let err = TryReserveError::AllocError { layout };
        assert_eq!(err.to_string(), "memory allocation of 16 bytes failed");
    }

    #[test]
    fn handle_ok_passes_value() {
        assert_eq!(handle_reserve(Ok::<_, TryReserveError>(7)), 7);
    }

    #[test]
    #[should_panic(expected = "capacity overflow")]
    fn handle_overflow_panics() {
        handle_reserve::<()>(Err(TryReserveError::CapacityOverflow));
    }
}
