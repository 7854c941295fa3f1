use std::io::{self, IoSlice, Write};

use crate::Vector;

/// Write is implemented for `Vector<u8>` by appending to the vector.
/// The vector will grow as needed.
///
/// A failed allocation is reported as [`io::ErrorKind::OutOfMemory`] and
/// nothing is written.
impl Write for Vector<u8> {
    #[inline]
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.reserve_bytes(buf.len())?;
        self.extend_from_slice(buf);
        Ok(buf.len())
    }

    #[inline(always)]
    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }

    #[inline]
    fn write_vectored(&mut self, bufs: &[IoSlice<'_>]) -> io::Result<usize> {
        let num = bufs.iter().map(|b| b.len()).sum::<usize>();
        self.reserve_bytes(num)?;
        for buf in bufs {
            self.extend_from_slice(buf);
        }
        Ok(num)
    }

    #[inline]
    fn write_all(&mut self, buf: &[u8]) -> io::Result<()> {
        Write::write(self, buf)?;
        Ok(())
    }
}

impl Vector<u8> {
    /// Grows to fit `additional` more bytes, doubling at least.
    fn reserve_bytes(&mut self, additional: usize) -> io::Result<()> {
        let required = self
            .len()
            .checked_add(additional)
            .ok_or_else(|| io::Error::from(io::ErrorKind::OutOfMemory))?;
        if required <= self.capacity() {
            return Ok(());
        }
        self.try_reserve(required.max(self.capacity().saturating_mul(2)))
            .map_err(|err| io::Error::new(io::ErrorKind::OutOfMemory, err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vector;

    #[test]
    fn write_appends() {
        let mut vec: Vector<u8> = vector![b'>'];
        write!(vec, "{}-{}", 1, 2).unwrap();
        assert_eq!(vec.as_slice(), b">1-2");
    }

    #[test]
    fn write_vectored_appends_all() {
        let mut vec: Vector<u8> = Vector::new();
        let bufs = [IoSlice::new(b"ab"), IoSlice::new(b""), IoSlice::new(b"cde")];
        assert_eq!(vec.write_vectored(&bufs).unwrap(), 5);
        assert_eq!(vec.as_slice(), b"abcde");
        assert_eq!(vec.capacity(), 5);
    }

    #[test]
    fn overflow_is_out_of_memory() {
        let mut vec: Vector<u8> = vector![1];
        let err = vec.reserve_bytes(usize::MAX).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::OutOfMemory);
        assert_eq!(vec.as_slice(), [1]);
    }
}
