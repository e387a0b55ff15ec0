extern crate std;

use core::ptr;
use std::io::{IoSlice, Write};

use crate::StaticVec;

/// Write is implemented for `StaticVec<u8, N>` by appending to the vector.
///
/// The capacity is fixed, so short writes happen: [`Write::write`] appends as
/// many bytes as fit and returns `Ok(0)` once the vector is full, which
/// `write_all` surfaces as [`std::io::ErrorKind::WriteZero`].
impl<const N: usize> Write for StaticVec<u8, N> {
    #[inline]
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        let len = self.len;
        let num = core::cmp::min(N - len, buf.len());

        unsafe {
            ptr::copy_nonoverlapping(buf.as_ptr(), self.as_mut_ptr().add(len), num);
            self.set_len(len + num);
        }

        Ok(num)
    }

    #[inline(always)]
    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }

    #[inline]
    fn write_vectored(&mut self, bufs: &[IoSlice<'_>]) -> std::io::Result<usize> {
        let mut num = 0;
        for buf in bufs {
            if self.is_full() {
                break;
            }
            num += self.write(buf)?;
        }
        Ok(num)
    }
}
