use alloc::{boxed::Box, vec::Vec};
use core::{
    fmt,
    iter::FusedIterator,
    mem::{self, ManuallyDrop, MaybeUninit},
    ptr, slice,
};

use crate::error::CapacityError;
use crate::raw;
use crate::utils::{IsZst, cold_path, zst_init};

/// A vector with a fixed capacity, stored inline.
///
/// `StaticVec<T, N>` holds up to `N` elements directly in its own memory
/// footprint. It never allocates, never reallocates, and never grows beyond
/// `N`: exceeding the capacity is a programming error, not a runtime
/// condition. It mirrors most of the [`Vec`] API while keeping the memory
/// behavior of `[T; N]`.
///
/// The first `len` slots always hold fully constructed elements; the rest of
/// the storage is uninitialized. Every mutating operation preserves that
/// invariant, including when an element's [`Clone`] panics partway through a
/// bulk operation (see the per-method docs for what state is guaranteed
/// afterwards).
///
/// # Panics
/// Any operation that would make `len > N` panics. The `try_*` variants
/// report the overflow as a [`CapacityError`] instead.
///
/// # Examples
///
/// ```
/// use static_vec::StaticVec;
///
/// // Space for 8 coordinates, no heap involved.
/// let mut ring: StaticVec<(f64, f64), 8> = StaticVec::new();
///
/// ring.push((0.0, 0.0));
/// ring.push((4.0, 0.0));
/// ring.push((4.0, 3.0));
///
/// assert_eq!(ring.len(), 3);
/// assert_eq!(ring.capacity(), 8);
/// assert_eq!(ring[1], (4.0, 0.0));
/// ```
///
/// # ZST support
///
/// Zero-sized element types occupy no storage; the capacity bound still
/// applies and is still enforced.
pub struct StaticVec<T, const N: usize> {
    pub(crate) data: [MaybeUninit<T>; N],
    pub(crate) len: usize,
}

unsafe impl<T, const N: usize> Send for StaticVec<T, N> where T: Send {}
unsafe impl<T, const N: usize> Sync for StaticVec<T, N> where T: Sync {}

impl<T, const N: usize> Drop for StaticVec<T, N> {
    // Storage is `MaybeUninit`, so the live prefix is dropped by hand.
    fn drop(&mut self) {
        unsafe { raw::destroy(self.as_mut_ptr(), self.len) }
    }
}

/// Creates a [`StaticVec`] containing the arguments.
///
/// The syntax follows [`vec!`](https://doc.rust-lang.org/std/macro.vec.html),
/// except that the capacity must be nameable from context and the number of
/// elements cannot exceed it.
///
/// # Panics
/// Panics if the number of elements exceeds the capacity.
///
/// # Examples
///
/// ```
/// # use static_vec::{staticvec, StaticVec};
/// let vec: StaticVec<String, 10> = staticvec![];
/// let vec: StaticVec<i64, 10> = staticvec![1; 5]; // needs Clone
/// let vec: StaticVec<_, 10> = staticvec![1, 2, 3, 4];
/// ```
#[macro_export]
macro_rules! staticvec {
    [] => { $crate::StaticVec::new() };
    [$elem:expr; $n:expr] => { $crate::StaticVec::from_elem($elem, $n) };
    [$($item:expr),+ $(,)?] => { $crate::StaticVec::from_buf([ $($item),+ ]) };
}

impl<T, const N: usize> StaticVec<T, N> {
    /// Constructs a new, empty `StaticVec`.
    ///
    /// The capacity is the const generic parameter; the storage for all `N`
    /// slots exists from this point on, uninitialized. Keep `N` moderate when
    /// the vector lives on the stack.
    ///
    /// # Examples
    ///
    /// ```
    /// # use static_vec::StaticVec;
    /// let vec: StaticVec<i32, 8> = StaticVec::new();
    /// assert!(vec.is_empty());
    /// ```
    #[inline]
    pub const fn new() -> Self {
        Self {
            // SAFETY: an array of `MaybeUninit` needs no initialization.
            data: unsafe { MaybeUninit::<[MaybeUninit<T>; N]>::uninit().assume_init() },
            len: 0,
        }
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

    /// Returns `true` if `len == N`.
    ///
    /// # Examples
    /// ```
    /// # use static_vec::{StaticVec, staticvec};
    /// let v: StaticVec<i32, 3> = staticvec![1, 2, 3];
    /// assert!(v.is_full());
    /// ```
    #[inline(always)]
    pub const fn is_full(&self) -> bool {
        self.len >= N
    }

    /// Returns the fixed capacity `N`.
    #[inline(always)]
    pub const fn capacity(&self) -> usize {
        N
    }

    /// Returns a raw pointer to the start of the storage.
    ///
    /// The pointer stays valid for the lifetime of the vector; no operation
    /// ever moves the storage.
    #[inline(always)]
    pub const fn as_ptr(&self) -> *const T {
        &raw const self.data as *const T
    }

    /// Returns a raw mutable pointer to the start of the storage.
    ///
    /// The pointer stays valid for the lifetime of the vector; no operation
    /// ever moves the storage.
    #[inline(always)]
    pub const fn as_mut_ptr(&mut self) -> *mut T {
        &raw mut self.data as *mut T
    }

    /// Forces the length of the vector to `new_len`.
    ///
    /// This maintains none of the type's invariants by itself.
    ///
    /// # Safety
    /// - `new_len <= N`.
    /// - Growing requires the new slots to already hold initialized elements.
    /// - Shrinking leaks the abandoned elements unless handled by the caller.
    #[inline(always)]
    pub const unsafe fn set_len(&mut self, new_len: usize) {
        debug_assert!(new_len <= N);
        self.len = new_len;
    }

    /// Extracts a slice over the live elements.
    #[inline]
    pub const fn as_slice(&self) -> &[T] {
        unsafe { slice::from_raw_parts(self.as_ptr(), self.len) }
    }

    /// Extracts a mutable slice over the live elements.
    #[inline]
    pub const fn as_mut_slice(&mut self) -> &mut [T] {
        unsafe { slice::from_raw_parts_mut(self.as_mut_ptr(), self.len) }
    }

    /// Returns the unused tail of the storage as `MaybeUninit` slots.
    ///
    /// Fill slots and then call [`set_len`](StaticVec::set_len) to commit
    /// them.
    ///
    /// # Examples
    ///
    /// ```
    /// # use static_vec::StaticVec;
    /// let mut v = StaticVec::<i32, 10>::new();
    ///
    /// let uninit = v.spare_capacity_mut();
    /// uninit[0].write(0);
    /// uninit[1].write(1);
    ///
    /// unsafe { v.set_len(2) };
    /// assert_eq!(v, [0, 1]);
    /// ```
    #[inline(always)]
    pub const fn spare_capacity_mut(&mut self) -> &mut [MaybeUninit<T>] {
        unsafe {
            slice::from_raw_parts_mut(
                { &raw mut self.data as *mut MaybeUninit<T> }.add(self.len),
                N - self.len,
            )
        }
    }

    /// Validates that `additional` more elements would fit.
    ///
    /// The storage is fixed, so this performs no allocation; it only asserts
    /// the capacity contract up front so a later `push` cannot be the first
    /// thing to notice the overflow.
    ///
    /// # Panics
    /// Panics if `len + additional > N`.
    #[inline]
    pub const fn reserve(&mut self, additional: usize) {
        // Phrased without addition so a huge `additional` cannot wrap.
        assert!(
            additional <= N - self.len,
            "length overflow during `reserve`"
        );
    }

    /// Creates a `StaticVec` by copying `length` elements from a raw pointer.
    ///
    /// For zero-sized types only the length is recorded.
    ///
    /// # Safety
    /// - `length <= N`.
    /// - `ptr` must point at `length` initialized elements of `T`.
    /// - The source elements must not be dropped again by the caller.
    #[inline]
    pub const unsafe fn copy_from_raw(ptr: *const T, length: usize) -> Self {
        debug_assert!(length <= N);

        let mut vec = Self::new();

        if !T::IS_ZST {
            unsafe {
                ptr::copy_nonoverlapping(ptr, vec.as_mut_ptr(), length);
            }
        }

        vec.len = length;
        vec
    }

    /// Creates a `StaticVec` from an array, taking ownership of its elements.
    ///
    /// # Panics
    /// Panics if `P > N`.
    ///
    /// # Examples
    /// ```
    /// # use static_vec::StaticVec;
    /// let vec: StaticVec<i32, 5> = StaticVec::from_buf([1, 2, 3]);
    /// assert_eq!(vec.len(), 3);
    /// ```
    #[inline]
    pub const fn from_buf<const P: usize>(arr: [T; P]) -> Self {
        assert!(P <= N, "length overflow during `from_buf`");

        unsafe {
            let vec = Self::copy_from_raw(arr.as_ptr(), P);
            mem::forget(arr);
            vec
        }
    }

    /// Moves the contents of a [`Vec`] into a new `StaticVec`, leaving the
    /// `Vec` empty (its allocation is retained by the caller).
    ///
    /// # Panics
    /// Panics if `vec.len() > N`.
    #[inline]
    pub fn from_vec(vec: &mut Vec<T>) -> Self {
        assert!(vec.len() <= N, "length overflow during `from_vec`");

        unsafe {
            let res = Self::copy_from_raw(vec.as_ptr(), vec.len());
            vec.set_len(0);
            res
        }
    }

    /// Moves the elements to the heap as a [`Vec`] with exact capacity,
    /// leaving `self` empty.
    ///
    /// # Examples
    ///
    /// ```
    /// # use static_vec::{StaticVec, staticvec};
    /// let mut vec: StaticVec<String, 5> = staticvec!["ring".to_string()];
    /// let heap = vec.into_vec();
    /// assert_eq!(heap.len(), 1);
    /// assert!(vec.is_empty());
    /// ```
    #[inline]
    pub fn into_vec(&mut self) -> Vec<T> {
        let mut vec: Vec<T> = Vec::with_capacity(self.len);

        unsafe {
            ptr::copy_nonoverlapping(self.as_ptr(), vec.as_mut_ptr(), self.len);
            vec.set_len(self.len);
            self.len = 0;
        }

        vec
    }

    /// Moves the elements into a [`Box<[T]>`](Box), leaving `self` empty.
    #[inline]
    pub fn into_boxed_slice(&mut self) -> Box<[T]> {
        self.into_vec().into_boxed_slice()
    }

    /// Converts into a `StaticVec` with a different capacity, the inline
    /// analog of a converting constructor between compatible containers.
    ///
    /// # Panics
    /// Panics if the current length exceeds the target capacity `P`.
    ///
    /// # Examples
    ///
    /// ```
    /// # use static_vec::{StaticVec, staticvec};
    /// let small: StaticVec<i32, 3> = staticvec![1, 2, 3];
    /// let mut big: StaticVec<i32, 8> = small.cast_capacity();
    /// big.push(4);
    /// assert_eq!(big, [1, 2, 3, 4]);
    /// ```
    #[inline]
    pub fn cast_capacity<const P: usize>(mut self) -> StaticVec<T, P> {
        assert!(self.len <= P, "length overflow during `cast_capacity`");

        let mut vec = StaticVec::<T, P>::new();
        if !T::IS_ZST {
            unsafe {
                ptr::copy_nonoverlapping(self.as_ptr(), vec.as_mut_ptr(), self.len);
            }
        }
        vec.len = self.len;
        self.len = 0;
        vec
    }

    /// Appends an element to the back of the vector.
    ///
    /// The element is constructed before any state changes, so a panic here
    /// (there is none the container itself can raise besides the capacity
    /// assert) leaves the vector untouched.
    ///
    /// # Panics
    /// Panics if the vector is full.
    ///
    /// # Examples
    ///
    /// ```
    /// # use static_vec::StaticVec;
    /// let mut vec = StaticVec::<i32, 5>::new();
    /// vec.push(1);
    /// vec.push(2);
    /// assert_eq!(vec, [1, 2]);
    /// ```
    #[inline(always)]
    pub const fn push(&mut self, value: T) {
        let len = self.len;
        assert!(len < N, "length overflow during `push`");

        if T::IS_ZST {
            mem::forget(value);
        } else {
            unsafe {
                ptr::write(self.as_mut_ptr().add(len), value);
            }
        }

        self.len = len + 1;
    }

    /// Appends an element without the capacity check.
    ///
    /// # Safety
    /// `len < N` before the call.
    #[inline(always)]
    pub const unsafe fn push_unchecked(&mut self, value: T) {
        let len = self.len;

        if T::IS_ZST {
            mem::forget(value);
        } else {
            unsafe {
                ptr::write(self.as_mut_ptr().add(len), value);
            }
        }

        self.len = len + 1;
    }

    /// Appends an element, or returns it inside a [`CapacityError`] if the
    /// vector is full.
    ///
    /// # Examples
    ///
    /// ```
    /// # use static_vec::StaticVec;
    /// let mut vec = StaticVec::<i32, 1>::new();
    /// assert!(vec.try_push(1).is_ok());
    /// assert_eq!(vec.try_push(2).unwrap_err().into_inner(), 2);
    /// ```
    #[inline]
    pub fn try_push(&mut self, value: T) -> Result<(), CapacityError<T>> {
        if self.len < N {
            unsafe { self.push_unchecked(value) };
            Ok(())
        } else {
            cold_path();
            Err(CapacityError::new(value))
        }
    }

    /// Removes the last element and returns it, or `None` if empty.
    ///
    /// # Examples
    ///
    /// ```
    /// # use static_vec::{StaticVec, staticvec};
    /// let mut vec: StaticVec<i32, 5> = staticvec![1];
    /// assert_eq!(vec.pop(), Some(1));
    /// assert_eq!(vec.pop(), None);
    /// ```
    #[inline(always)]
    pub const fn pop(&mut self) -> Option<T> {
        if self.len == 0 {
            cold_path();
            None
        } else {
            unsafe {
                self.len -= 1;
                // Lets the caller know the vector is no longer full.
                core::hint::assert_unchecked(self.len < N);
                if T::IS_ZST {
                    Some(zst_init())
                } else {
                    Some(ptr::read(self.as_ptr().add(self.len)))
                }
            }
        }
    }

    /// Removes and returns the last element if the predicate accepts it.
    ///
    /// The predicate is not called when the vector is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// # use static_vec::{staticvec, StaticVec};
    /// let mut vec: StaticVec<_, 5> = staticvec![1, 2, 3, 4];
    /// assert_eq!(vec.pop_if(|x| *x % 2 == 0), Some(4));
    /// assert_eq!(vec.pop_if(|x| *x % 2 == 0), None);
    /// ```
    #[inline]
    pub fn pop_if(&mut self, predicate: impl FnOnce(&mut T) -> bool) -> Option<T> {
        if self.len == 0 {
            cold_path();
            None
        } else {
            unsafe {
                let ptr = self.as_mut_ptr().add(self.len - 1);
                if predicate(&mut *ptr) {
                    self.len -= 1;
                    Some(ptr::read(ptr))
                } else {
                    None
                }
            }
        }
    }

    /// Inserts an element at `index`, shifting everything after it right.
    ///
    /// The shift is a bitwise relocation and cannot fail; the container is
    /// either fully updated or (if an assert fires) untouched.
    ///
    /// # Panics
    /// Panics if `index > len` or the vector is full.
    ///
    /// # Examples
    ///
    /// ```
    /// # use static_vec::{StaticVec, staticvec};
    /// let mut vec: StaticVec<i32, 5> = staticvec![1, 3];
    /// vec.insert(1, 2);
    /// assert_eq!(vec, [1, 2, 3]);
    /// ```
    #[inline]
    pub const fn insert(&mut self, index: usize, element: T) {
        assert!(index <= self.len, "insertion index should be <= len");
        assert!(self.len < N, "length overflow during `insert`");

        unsafe {
            self.insert_unchecked(index, element);
        }
    }

    /// Inserts an element at `index` without the bounds checks.
    ///
    /// # Safety
    /// `index <= len` and `len < N` before the call.
    #[inline(always)]
    pub(crate) const unsafe fn insert_unchecked(&mut self, index: usize, element: T) {
        debug_assert!(index <= self.len);
        debug_assert!(self.len < N);

        if T::IS_ZST {
            mem::forget(element);
        } else {
            unsafe {
                let ptr = self.as_mut_ptr().add(index);
                if index < self.len {
                    raw::relocate(ptr, ptr.add(1), self.len - index);
                }
                ptr::write(ptr, element);
            }
        }

        self.len += 1;
    }

    /// Inserts an element at `index`, or returns it inside a
    /// [`CapacityError`] if the vector is full.
    ///
    /// An out-of-bounds `index` is still a contract violation and panics.
    #[inline]
    pub fn try_insert(&mut self, index: usize, element: T) -> Result<(), CapacityError<T>> {
        assert!(index <= self.len, "insertion index should be <= len");

        if self.len < N {
            unsafe { self.insert_unchecked(index, element) };
            Ok(())
        } else {
            cold_path();
            Err(CapacityError::new(element))
        }
    }

    /// Removes the element at `index` and returns it, shifting everything
    /// after it left.
    ///
    /// # Panics
    /// Panics if `index >= len`.
    ///
    /// # Examples
    ///
    /// ```
    /// # use static_vec::{StaticVec, staticvec};
    /// let mut vec: StaticVec<i32, 5> = staticvec![1, 2, 3];
    /// assert_eq!(vec.remove(1), 2);
    /// assert_eq!(vec, [1, 3]);
    /// ```
    #[inline]
    pub const fn remove(&mut self, index: usize) -> T {
        assert!(index < self.len, "removal index should be < len");

        unsafe {
            let value: T;

            if T::IS_ZST {
                value = zst_init();
            } else {
                let ptr = self.as_mut_ptr().add(index);
                value = ptr::read(ptr);
                raw::relocate(ptr.add(1), ptr, self.len - index - 1);
            }

            self.len -= 1;
            value
        }
    }

    /// Removes the element at `index` and returns it, replacing it with the
    /// last element. O(1) but does not preserve ordering.
    ///
    /// # Panics
    /// Panics if `index >= len`.
    ///
    /// # Examples
    ///
    /// ```
    /// # use static_vec::{StaticVec, staticvec};
    /// let mut vec: StaticVec<i32, 5> = staticvec![1, 2, 3];
    /// assert_eq!(vec.swap_remove(0), 1);
    /// assert_eq!(vec, [3, 2]);
    /// ```
    #[inline]
    pub const fn swap_remove(&mut self, index: usize) -> T {
        assert!(index < self.len, "removal index should be < len");

        unsafe {
            let value: T;

            if T::IS_ZST {
                value = zst_init();
            } else {
                let base_ptr = self.as_mut_ptr();
                value = ptr::read(base_ptr.add(index));
                raw::relocate(base_ptr.add(self.len - 1), base_ptr.add(index), 1);
            }

            self.len -= 1;
            value
        }
    }

    /// Shortens the vector to `len` elements, dropping the rest.
    ///
    /// No effect when `len` is not smaller than the current length. Cannot
    /// fail (element drops must not panic).
    ///
    /// # Examples
    ///
    /// ```
    /// # use static_vec::{StaticVec, staticvec};
    /// let mut vec: StaticVec<_, 5> = staticvec![1, 2, 3, 4];
    /// vec.truncate(2);
    /// assert_eq!(vec, [1, 2]);
    /// ```
    #[inline]
    pub fn truncate(&mut self, len: usize) {
        if self.len > len {
            let old_len = self.len;
            // Commit the new length first so the dropped tail can never be
            // observed live again.
            self.len = len;
            unsafe { raw::destroy(self.as_mut_ptr().add(len), old_len - len) }
        }
    }

    /// Removes all elements.
    ///
    /// Idempotent: clearing an empty vector does nothing.
    #[inline]
    pub fn clear(&mut self) {
        self.truncate(0);
    }

    /// Splits the vector in two at `at`: `self` keeps `[0, at)` and the
    /// returned vector holds `[at, len)`.
    ///
    /// # Panics
    /// Panics if `at > len`.
    ///
    /// # Examples
    ///
    /// ```
    /// # use static_vec::{StaticVec, staticvec};
    /// let mut vec: StaticVec<_, 5> = staticvec!['a', 'b', 'c'];
    /// let tail = vec.split_off(1);
    /// assert_eq!(vec, ['a']);
    /// assert_eq!(tail, ['b', 'c']);
    /// ```
    #[inline]
    pub const fn split_off(&mut self, at: usize) -> Self {
        assert!(at <= self.len, "the `at` of split off should be <= len");

        let mut other = Self::new();
        unsafe {
            other.len = self.len - at;
            self.len = at;

            if !T::IS_ZST {
                ptr::copy_nonoverlapping(self.as_ptr().add(at), other.as_mut_ptr(), other.len);
            }
        }
        other
    }

    /// Moves all elements of `other` to the back of `self`, leaving `other`
    /// empty. The two capacities may differ.
    ///
    /// # Panics
    /// Panics if the combined length exceeds `N`.
    ///
    /// # Examples
    ///
    /// ```
    /// # use static_vec::{StaticVec, staticvec};
    /// let mut a: StaticVec<_, 6> = staticvec![1, 2];
    /// let mut b: StaticVec<_, 4> = staticvec![3, 4];
    /// a.append(&mut b);
    /// assert_eq!(a, [1, 2, 3, 4]);
    /// assert!(b.is_empty());
    /// ```
    #[inline]
    pub fn append<const P: usize>(&mut self, other: &mut StaticVec<T, P>) {
        let other_len = other.len;
        let self_len = self.len;
        assert!(self_len + other_len <= N, "length overflow during `append`");

        if !T::IS_ZST {
            unsafe {
                ptr::copy_nonoverlapping(
                    other.as_ptr(),
                    self.as_mut_ptr().add(self_len),
                    other_len,
                );
            }
        }

        self.len = self_len + other_len;
        other.len = 0;
    }

    /// Retains only the elements accepted by the predicate, preserving order.
    ///
    /// # Examples
    ///
    /// ```
    /// # use static_vec::{StaticVec, staticvec};
    /// let mut vec: StaticVec<_, 5> = staticvec![1, 2, 3, 4];
    /// vec.retain(|v| *v % 2 == 0);
    /// assert_eq!(vec, [2, 4]);
    /// ```
    #[inline]
    pub fn retain<F: FnMut(&T) -> bool>(&mut self, mut f: F) {
        self.retain_mut(|v| f(v));
    }

    /// Like [`retain`](StaticVec::retain) but with mutable access to each
    /// element.
    ///
    /// Visits each element exactly once, left to right. If the predicate (or
    /// a rejected element's drop) panics, the survivors processed so far are
    /// compacted and the length fixed up before the panic continues.
    pub fn retain_mut<F: FnMut(&mut T) -> bool>(&mut self, mut f: F) {
        let original_len = self.len;
        // Hide the whole vector from an unwinding observer; the guard below
        // reinstates the survivors.
        self.len = 0;

        struct BackshiftOnDrop<'a, T, const N: usize> {
            v: &'a mut StaticVec<T, N>,
            processed_len: usize,
            deleted_cnt: usize,
            original_len: usize,
        }

        impl<T, const N: usize> Drop for BackshiftOnDrop<'_, T, N> {
            fn drop(&mut self) {
                if self.deleted_cnt > 0 {
                    unsafe {
                        raw::relocate(
                            self.v.as_ptr().add(self.processed_len),
                            self.v
                                .as_mut_ptr()
                                .add(self.processed_len - self.deleted_cnt),
                            self.original_len - self.processed_len,
                        );
                    }
                }
                self.v.len = self.original_len - self.deleted_cnt;
            }
        }

        let mut g = BackshiftOnDrop {
            v: self,
            processed_len: 0,
            deleted_cnt: 0,
            original_len,
        };

        while g.processed_len != original_len {
            let cur = unsafe { &mut *g.v.as_mut_ptr().add(g.processed_len) };
            if !f(cur) {
                // Count the slot as deleted before dropping it, so an
                // unwinding drop does not revive it through the guard.
                g.processed_len += 1;
                g.deleted_cnt += 1;
                unsafe { ptr::drop_in_place(cur) };
                continue;
            }
            if g.deleted_cnt > 0 {
                unsafe {
                    let hole = g.v.as_mut_ptr().add(g.processed_len - g.deleted_cnt);
                    ptr::copy_nonoverlapping(cur, hole, 1);
                }
            }
            g.processed_len += 1;
        }
    }

    /// Resizes the vector so that `len == new_len`, producing new elements
    /// with the closure.
    ///
    /// Strong guarantee: if the closure panics while growing, the elements it
    /// already produced are dropped and the vector is exactly as before the
    /// call. Shrinking cannot fail.
    ///
    /// # Panics
    /// Panics if `new_len > N`.
    ///
    /// # Examples
    ///
    /// ```
    /// # use static_vec::{StaticVec, staticvec};
    /// let mut vec: StaticVec<_, 5> = staticvec![1, 2];
    /// let mut p = 1;
    /// vec.resize_with(5, || { p *= 2; p });
    /// assert_eq!(vec, [1, 2, 2, 4, 8]);
    /// ```
    pub fn resize_with<F: FnMut() -> T>(&mut self, new_len: usize, f: F) {
        assert!(new_len <= N, "length overflow during `resize_with`");

        if new_len <= self.len {
            self.truncate(new_len);
        } else {
            unsafe {
                raw::fill_uninit_with(self.as_mut_ptr().add(self.len), new_len - self.len, f);
            }
            self.len = new_len;
        }
    }

    /// Replaces the contents with the elements of an iterator whose length is
    /// not known up front.
    ///
    /// Existing slots are overwritten one by one while both sides have
    /// elements; an unconsumed tail of `self` is then dropped, or the
    /// remaining source elements appended. Each append re-checks the
    /// capacity, so an over-long source panics (contract violation) after the
    /// overwritten prefix has already been replaced (basic guarantee only).
    ///
    /// For sliceable sources prefer
    /// [`assign_from_slice`](StaticVec::assign_from_slice).
    ///
    /// # Panics
    /// Panics if the source yields more than `N` elements.
    ///
    /// # Examples
    ///
    /// ```
    /// # use static_vec::{StaticVec, staticvec};
    /// let mut vec: StaticVec<_, 5> = staticvec![9, 9, 9, 9];
    /// vec.assign_from_iter(1..=2);
    /// assert_eq!(vec, [1, 2]);
    /// ```
    pub fn assign_from_iter<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        let mut iter = iter.into_iter();
        let mut kept = 0;

        while kept < self.len {
            let Some(item) = iter.next() else { break };
            self.as_mut_slice()[kept] = item;
            kept += 1;
        }

        if kept < self.len {
            self.truncate(kept);
            return;
        }

        for item in iter {
            self.push(item);
        }
    }
}

impl<T: Clone, const N: usize> StaticVec<T, N> {
    /// Creates a `StaticVec` with `num` clones of `elem`.
    ///
    /// Strong guarantee: a panicking clone leaves nothing behind.
    ///
    /// # Panics
    /// Panics if `num > N`.
    ///
    /// # Examples
    /// ```
    /// # use static_vec::StaticVec;
    /// let vec: StaticVec<i32, 5> = StaticVec::from_elem(1, 4);
    /// assert_eq!(vec, [1, 1, 1, 1]);
    /// ```
    #[inline]
    pub fn from_elem(elem: T, num: usize) -> Self {
        assert!(num <= N, "length overflow during `from_elem`");

        let mut vec = Self::new();
        vec.resize(num, elem);
        vec
    }

    /// Resizes the vector so that `len == new_len`, filling with clones of
    /// `value` when growing.
    ///
    /// Strong guarantee: if a clone panics while growing, the partial tail is
    /// dropped and the vector is exactly as before the call. Shrinking drops
    /// the trailing elements and cannot fail.
    ///
    /// # Panics
    /// Panics if `new_len > N`.
    ///
    /// # Examples
    ///
    /// ```
    /// # use static_vec::{StaticVec, staticvec};
    /// let mut vec: StaticVec<_, 5> = staticvec!["hi"];
    /// vec.resize(3, "mid");
    /// assert_eq!(vec, ["hi", "mid", "mid"]);
    ///
    /// vec.resize(1, "unused");
    /// assert_eq!(vec, ["hi"]);
    /// ```
    pub fn resize(&mut self, new_len: usize, value: T) {
        assert!(new_len <= N, "length overflow during `resize`");

        let len = self.len;
        if new_len <= len {
            self.truncate(new_len);
        } else {
            unsafe {
                let base = self.as_mut_ptr();
                raw::fill_uninit(base.add(len), new_len - len - 1, &value);
                // The last slot takes `value` itself, saving one clone.
                ptr::write(base.add(new_len - 1), value);
            }
            self.len = new_len;
        }
    }

    /// Appends clones of all elements in the slice.
    ///
    /// The length advances per element, so a panicking clone keeps everything
    /// appended so far (basic guarantee).
    ///
    /// # Panics
    /// Panics if the combined length exceeds `N`.
    ///
    /// # Examples
    ///
    /// ```
    /// # use static_vec::{StaticVec, staticvec};
    /// let mut vec: StaticVec<_, 5> = staticvec![1];
    /// vec.extend_from_slice(&[2, 3, 4]);
    /// assert_eq!(vec, [1, 2, 3, 4]);
    /// ```
    pub fn extend_from_slice(&mut self, other: &[T]) {
        assert!(
            self.len + other.len() <= N,
            "length overflow during `extend_from_slice`"
        );

        unsafe {
            for item in other {
                ptr::write(self.as_mut_ptr().add(self.len), item.clone());
                self.len += 1;
            }
        }
    }

    /// Appends clones of all elements in the slice, or rejects the whole
    /// slice up front if it would not fit.
    ///
    /// Nothing is appended on `Err`.
    #[inline]
    pub fn try_extend_from_slice(&mut self, other: &[T]) -> Result<(), CapacityError> {
        if self.len + other.len() <= N {
            self.extend_from_slice(other);
            Ok(())
        } else {
            cold_path();
            Err(CapacityError::new(()))
        }
    }

    /// Inserts clones of a slice at `index`, shifting the suffix right by
    /// `src.len()`.
    ///
    /// The suffix is relocated first (bitwise, infallible) and the clones are
    /// then constructed into the vacated gap in ascending order. If clone *j*
    /// panics, the suffix is moved back over the unfilled remainder and the
    /// *j* elements already inserted stay: the vector is valid and at least
    /// as long as before (basic guarantee). `len` never decreases during the
    /// operation.
    ///
    /// # Panics
    /// Panics if `index > len` or the combined length exceeds `N`, checked
    /// before any mutation.
    ///
    /// # Examples
    ///
    /// ```
    /// # use static_vec::{StaticVec, staticvec};
    /// let mut vec: StaticVec<_, 8> = staticvec![1, 5, 6];
    /// vec.insert_from_slice(1, &[2, 3, 4]);
    /// assert_eq!(vec, [1, 2, 3, 4, 5, 6]);
    /// ```
    pub fn insert_from_slice(&mut self, index: usize, src: &[T]) {
        assert!(index <= self.len, "insertion index should be <= len");
        assert!(
            self.len + src.len() <= N,
            "length overflow during `insert_from_slice`"
        );

        if src.is_empty() {
            return;
        }
        unsafe { self.insert_clones(index, src.len(), src.iter().cloned()) }
    }

    /// Inserts `count` clones of `value` at `index`.
    ///
    /// Same shifting and rollback behavior as
    /// [`insert_from_slice`](StaticVec::insert_from_slice).
    ///
    /// # Panics
    /// Panics if `index > len` or the combined length exceeds `N`, checked
    /// before any mutation.
    ///
    /// # Examples
    ///
    /// ```
    /// # use static_vec::{StaticVec, staticvec};
    /// let mut vec: StaticVec<_, 8> = staticvec![1, 2];
    /// vec.insert_from_elem(1, 3, &9);
    /// assert_eq!(vec, [1, 9, 9, 9, 2]);
    /// ```
    pub fn insert_from_elem(&mut self, index: usize, count: usize, value: &T) {
        assert!(index <= self.len, "insertion index should be <= len");
        assert!(
            count <= N - self.len,
            "length overflow during `insert_from_elem`"
        );

        if count == 0 {
            return;
        }
        unsafe { self.insert_clones(index, count, core::iter::repeat_with(|| value.clone())) }
    }

    /// Opens a gap of `count` slots at `index` and fills it from `values`.
    ///
    /// # Safety
    /// `index <= len`, `len + count <= N`, `count > 0`, and `values` must
    /// yield at least `count` elements.
    unsafe fn insert_clones<I: Iterator<Item = T>>(
        &mut self,
        index: usize,
        count: usize,
        values: I,
    ) {
        let len = self.len;

        unsafe {
            let base = self.as_mut_ptr();
            raw::relocate(base.add(index), base.add(index + count), len - index);

            let mut guard = InsertGuard {
                vec: ptr::NonNull::new_unchecked(self as *mut Self),
                index,
                gap: count,
                filled: 0,
                tail: len - index,
            };

            for value in values.take(count) {
                ptr::write(base.add(index + guard.filled), value);
                guard.filled += 1;
            }
            debug_assert!(guard.filled == count);

            mem::forget(guard);
        }

        self.len = len + count;
    }

    /// Replaces the contents with clones of a slice.
    ///
    /// The common prefix is overwritten in place (element-level
    /// `clone_from`), then either the excess tail of `self` is dropped or the
    /// missing tail of `src` is clone-constructed into uninitialized slots.
    /// A panicking clone leaves a valid vector whose prefix may already be
    /// replaced (basic guarantee); the length only changes on success paths.
    ///
    /// # Panics
    /// Panics if `src.len() > N`, checked before any mutation.
    ///
    /// # Examples
    ///
    /// ```
    /// # use static_vec::{StaticVec, staticvec};
    /// let mut vec: StaticVec<_, 5> = staticvec![7, 7];
    /// vec.assign_from_slice(&[1, 2, 3]);
    /// assert_eq!(vec, [1, 2, 3]);
    /// ```
    pub fn assign_from_slice(&mut self, src: &[T]) {
        let count = src.len();
        assert!(count <= N, "length overflow during `assign_from_slice`");

        let len = self.len;
        if count <= len {
            self.as_mut_slice()[..count].clone_from_slice(src);
            self.truncate(count);
        } else {
            self.as_mut_slice().clone_from_slice(&src[..len]);
            unsafe {
                raw::clone_to_uninit(&src[len..], self.as_mut_ptr().add(len));
            }
            self.len = count;
        }
    }

    /// Replaces the contents with `count` clones of `value`.
    ///
    /// Same overwrite-then-extend/shrink shape and guarantees as
    /// [`assign_from_slice`](StaticVec::assign_from_slice).
    ///
    /// # Panics
    /// Panics if `count > N`, checked before any mutation.
    ///
    /// # Examples
    ///
    /// ```
    /// # use static_vec::{StaticVec, staticvec};
    /// let mut vec: StaticVec<_, 5> = staticvec![1, 2, 3];
    /// vec.assign_from_elem(2, &0);
    /// assert_eq!(vec, [0, 0]);
    /// ```
    pub fn assign_from_elem(&mut self, count: usize, value: &T) {
        assert!(count <= N, "length overflow during `assign_from_elem`");

        let len = self.len;
        if count <= len {
            for slot in &mut self.as_mut_slice()[..count] {
                slot.clone_from(value);
            }
            self.truncate(count);
        } else {
            for slot in self.as_mut_slice() {
                slot.clone_from(value);
            }
            unsafe {
                raw::fill_uninit(self.as_mut_ptr().add(len), count - len, value);
            }
            self.len = count;
        }
    }
}

/// Closes a partially filled insertion gap when a clone panics.
///
/// Armed for the duration of the gap fill in `insert_clones`; on unwind it
/// relocates the shifted suffix back over the unfilled slots and accounts for
/// the clones that did land, so the container invariant holds with
/// `len >= old_len`.
struct InsertGuard<T, const N: usize> {
    vec: ptr::NonNull<StaticVec<T, N>>,
    index: usize,
    gap: usize,
    filled: usize,
    tail: usize,
}

impl<T, const N: usize> Drop for InsertGuard<T, N> {
    fn drop(&mut self) {
        unsafe {
            let vec = self.vec.as_mut();
            let base = vec.as_mut_ptr();
            raw::relocate(
                base.add(self.index + self.gap),
                base.add(self.index + self.filled),
                self.tail,
            );
            vec.len = self.index + self.filled + self.tail;
        }
    }
}

impl<T, const N: usize> Default for StaticVec<T, N> {
    /// Equivalent to [`StaticVec::new`].
    #[inline(always)]
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone, const N: usize> Clone for StaticVec<T, N> {
    /// Clones element-wise. A panicking clone drops the partially built copy
    /// and leaves the source untouched.
    fn clone(&self) -> Self {
        let mut vec = Self::new();
        for item in self.as_slice() {
            unsafe { vec.push_unchecked(item.clone()) };
        }
        vec
    }

    /// Reuses the existing elements via
    /// [`assign_from_slice`](StaticVec::assign_from_slice).
    fn clone_from(&mut self, source: &Self) {
        self.assign_from_slice(source.as_slice());
    }
}

impl<'a, T: 'a + Clone, const N: usize> Extend<&'a T> for StaticVec<T, N> {
    /// # Panics
    /// Panics on insufficient capacity.
    fn extend<I: IntoIterator<Item = &'a T>>(&mut self, iter: I) {
        for item in iter {
            self.push(item.clone());
        }
    }
}

impl<T, const N: usize> Extend<T> for StaticVec<T, N> {
    /// # Panics
    /// Panics on insufficient capacity.
    #[inline]
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for item in iter {
            self.push(item);
        }
    }
}

crate::utils::impl_slice_traits!(StaticVec<T, N>);

impl<T, U, const N: usize, const P: usize> PartialEq<StaticVec<U, P>> for StaticVec<T, N>
where
    T: PartialEq<U>,
{
    #[inline]
    fn eq(&self, other: &StaticVec<U, P>) -> bool {
        PartialEq::eq(self.as_slice(), other.as_slice())
    }
}

impl<'a, T: Clone, const N: usize> From<&'a StaticVec<T, N>> for alloc::borrow::Cow<'a, [T]> {
    fn from(v: &'a StaticVec<T, N>) -> alloc::borrow::Cow<'a, [T]> {
        alloc::borrow::Cow::Borrowed(v.as_slice())
    }
}

impl<'a, T: Clone, const N: usize> From<StaticVec<T, N>> for alloc::borrow::Cow<'a, [T]> {
    fn from(mut v: StaticVec<T, N>) -> alloc::borrow::Cow<'a, [T]> {
        alloc::borrow::Cow::Owned(v.into_vec())
    }
}

impl<T: Clone, const N: usize> From<&[T]> for StaticVec<T, N> {
    /// # Panics
    /// Panics on insufficient capacity.
    fn from(value: &[T]) -> Self {
        let mut vec = Self::new();
        vec.extend_from_slice(value);
        vec
    }
}

impl<T: Clone, const N: usize, const P: usize> From<&[T; P]> for StaticVec<T, N> {
    /// # Panics
    /// Panics on insufficient capacity.
    #[inline]
    fn from(value: &[T; P]) -> Self {
        <Self as From<&[T]>>::from(value.as_slice())
    }
}

impl<T: Clone, const N: usize> From<&mut [T]> for StaticVec<T, N> {
    #[inline]
    fn from(value: &mut [T]) -> Self {
        <Self as From<&[T]>>::from(value)
    }
}

impl<T, const N: usize, const P: usize> From<[T; P]> for StaticVec<T, N> {
    /// # Panics
    /// Panics on insufficient capacity.
    #[inline]
    fn from(value: [T; P]) -> Self {
        Self::from_buf(value)
    }
}

impl<T, const N: usize> From<Vec<T>> for StaticVec<T, N> {
    /// # Panics
    /// Panics on insufficient capacity.
    #[inline]
    fn from(mut value: Vec<T>) -> Self {
        Self::from_vec(&mut value)
    }
}

impl<T, const N: usize> From<Box<[T]>> for StaticVec<T, N> {
    /// # Panics
    /// Panics on insufficient capacity.
    #[inline]
    fn from(value: Box<[T]>) -> Self {
        Self::from(value.into_vec())
    }
}

impl<T, const N: usize> FromIterator<T> for StaticVec<T, N> {
    /// # Panics
    /// Panics on insufficient capacity.
    ///
    /// # Examples
    ///
    /// ```
    /// # use static_vec::StaticVec;
    /// let vec: StaticVec<i32, 3> = (1..=3).collect();
    /// assert_eq!(vec, [1, 2, 3]);
    /// ```
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut vec = Self::new();
        for item in iter {
            vec.push(item);
        }
        vec
    }
}

/// An iterator that consumes a [`StaticVec`] and yields its items by value.
///
/// # Examples
///
/// ```
/// # use static_vec::{StaticVec, staticvec};
/// let vec: StaticVec<&'static str, 3> = staticvec!["a", "b", "c"];
/// let mut iter = vec.into_iter();
///
/// assert_eq!(iter.next(), Some("a"));
/// assert_eq!(iter.next_back(), Some("c"));
/// ```
pub struct IntoIter<T, const N: usize> {
    vec: ManuallyDrop<StaticVec<T, N>>,
    index: usize,
}

unsafe impl<T, const N: usize> Send for IntoIter<T, N> where T: Send {}
unsafe impl<T, const N: usize> Sync for IntoIter<T, N> where T: Sync {}

impl<T, const N: usize> IntoIterator for StaticVec<T, N> {
    type Item = T;
    type IntoIter = IntoIter<T, N>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        IntoIter {
            vec: ManuallyDrop::new(self),
            index: 0,
        }
    }
}

impl<T, const N: usize> Iterator for IntoIter<T, N> {
    type Item = T;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        if self.index < self.vec.len {
            self.index += 1;
            if T::IS_ZST {
                unsafe { Some(zst_init()) }
            } else {
                unsafe { Some(ptr::read(self.vec.as_ptr().add(self.index - 1))) }
            }
        } else {
            None
        }
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        let v = self.vec.len - self.index;
        (v, Some(v))
    }
}

impl<T, const N: usize> DoubleEndedIterator for IntoIter<T, N> {
    #[inline]
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.index < self.vec.len {
            self.vec.len -= 1;
            if T::IS_ZST {
                unsafe { Some(zst_init()) }
            } else {
                unsafe { Some(ptr::read(self.vec.as_ptr().add(self.vec.len))) }
            }
        } else {
            None
        }
    }
}

impl<T, const N: usize> ExactSizeIterator for IntoIter<T, N> {
    #[inline]
    fn len(&self) -> usize {
        self.vec.len - self.index
    }
}

impl<T, const N: usize> FusedIterator for IntoIter<T, N> {}

impl<T, const N: usize> Drop for IntoIter<T, N> {
    fn drop(&mut self) {
        if self.index < self.vec.len {
            unsafe {
                raw::destroy(
                    self.vec.as_mut_ptr().add(self.index),
                    self.vec.len - self.index,
                );
            }
        }
    }
}

impl<T, const N: usize> IntoIter<T, N> {
    /// Views the remaining items as a slice.
    pub fn as_slice(&self) -> &[T] {
        let len = self.vec.len - self.index;
        unsafe { slice::from_raw_parts(self.vec.as_ptr().add(self.index), len) }
    }

    /// Views the remaining items as a mutable slice.
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        let len = self.vec.len - self.index;
        unsafe { slice::from_raw_parts_mut(self.vec.as_mut_ptr().add(self.index), len) }
    }
}

impl<T: Clone, const N: usize> Clone for IntoIter<T, N> {
    /// Clones only the items not yet yielded.
    fn clone(&self) -> Self {
        let mut vec = StaticVec::new();
        vec.extend_from_slice(self.as_slice());
        vec.into_iter()
    }
}

impl<T, const N: usize> Default for IntoIter<T, N> {
    fn default() -> Self {
        StaticVec::new().into_iter()
    }
}

impl<T: fmt::Debug, const N: usize> fmt::Debug for IntoIter<T, N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("IntoIter").field(&self.as_slice()).finish()
    }
}

/// A draining iterator for [`StaticVec`]; see [`StaticVec::drain`].
pub struct Drain<'a, T: 'a, const N: usize> {
    tail_start: usize,
    tail_len: usize,
    iter: slice::Iter<'a, T>,
    vec: ptr::NonNull<StaticVec<T, N>>,
}

impl<T, const N: usize> StaticVec<T, N> {
    /// Removes the given range from the vector and returns a double-ended
    /// iterator over the removed elements.
    ///
    /// Dropping the iterator (consumed or not) completes the removal: any
    /// unconsumed removed elements are dropped and the elements after the
    /// range are shifted down over it. This is the range-erase operation;
    /// `v.drain(a..b);` as a statement erases `[a, b)` in one move.
    ///
    /// # Panics
    /// Panics if the range is malformed or extends past `len`.
    ///
    /// # Examples
    ///
    /// ```
    /// # use static_vec::{StaticVec, staticvec};
    /// let mut v: StaticVec<_, 5> = staticvec![1, 2, 3, 4];
    /// v.drain(1..3);
    /// assert_eq!(v, [1, 4]);
    ///
    /// let removed: Vec<_> = v.drain(..).collect();
    /// assert_eq!(removed, [1, 4]);
    /// assert!(v.is_empty());
    /// ```
    pub fn drain<R: core::ops::RangeBounds<usize>>(&mut self, range: R) -> Drain<'_, T, N> {
        let len = self.len;
        let (start, end) = crate::utils::split_range_bound(&range, len);

        unsafe {
            // Hide the drained range and tail from an unwinding observer;
            // `Drain::drop` reinstates the tail.
            self.len = start;

            let range_slice = slice::from_raw_parts(self.as_ptr().add(start), end - start);

            Drain {
                tail_start: end,
                tail_len: len - end,
                iter: range_slice.iter(),
                vec: ptr::NonNull::new_unchecked(self as *mut _),
            }
        }
    }
}

impl<T, const N: usize> Drain<'_, T, N> {
    /// Views the elements not yet drained as a slice.
    pub fn as_slice(&self) -> &[T] {
        self.iter.as_slice()
    }
}

impl<T, const N: usize> AsRef<[T]> for Drain<'_, T, N> {
    fn as_ref(&self) -> &[T] {
        self.iter.as_slice()
    }
}

impl<T: fmt::Debug, const N: usize> fmt::Debug for Drain<'_, T, N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Drain").field(&self.iter.as_slice()).finish()
    }
}

impl<T, const N: usize> Iterator for Drain<'_, T, N> {
    type Item = T;

    #[inline]
    fn next(&mut self) -> Option<T> {
        self.iter
            .next()
            .map(|reference| unsafe { ptr::read(reference) })
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.iter.size_hint()
    }
}

impl<T, const N: usize> DoubleEndedIterator for Drain<'_, T, N> {
    #[inline]
    fn next_back(&mut self) -> Option<Self::Item> {
        self.iter
            .next_back()
            .map(|reference| unsafe { ptr::read(reference) })
    }
}

impl<T, const N: usize> ExactSizeIterator for Drain<'_, T, N> {
    #[inline]
    fn len(&self) -> usize {
        self.iter.len()
    }
}

impl<T, const N: usize> FusedIterator for Drain<'_, T, N> {}

impl<'a, T: 'a, const N: usize> Drop for Drain<'a, T, N> {
    fn drop(&mut self) {
        /// Shifts the tail back down and restores `len`, even when dropping a
        /// drained element panics.
        struct TailGuard<'r, 'a, T, const N: usize>(&'r mut Drain<'a, T, N>);

        impl<T, const N: usize> Drop for TailGuard<'_, '_, T, N> {
            fn drop(&mut self) {
                if self.0.tail_len > 0 {
                    unsafe {
                        let source_vec = self.0.vec.as_mut();
                        let start = source_vec.len;
                        let tail = self.0.tail_start;
                        if tail != start {
                            raw::relocate(
                                source_vec.as_ptr().add(tail),
                                source_vec.as_mut_ptr().add(start),
                                self.0.tail_len,
                            );
                        }
                        source_vec.len = start + self.0.tail_len;
                    }
                }
            }
        }

        let iter = mem::take(&mut self.iter);
        let drop_len = iter.len();
        let mut vec = self.vec;

        if T::IS_ZST {
            // ZSTs have no identity; fix the length bookkeeping and let
            // `truncate` drop the right number.
            unsafe {
                let vec = vec.as_mut();
                let old_len = vec.len;
                vec.len = old_len + drop_len + self.tail_len;
                vec.truncate(old_len + self.tail_len);
            }
            return;
        }

        let _guard = TailGuard(self);

        if drop_len == 0 {
            return;
        }

        // Reconstruct a mutable pointer to the undrained elements from the
        // vector itself; the slice iterator only hands out shared provenance.
        let drop_ptr = iter.as_slice().as_ptr();
        unsafe {
            let vec_ptr = vec.as_mut().as_mut_ptr();
            let drop_offset = drop_ptr.offset_from(vec_ptr) as usize;
            let to_drop = ptr::slice_from_raw_parts_mut(vec_ptr.add(drop_offset), drop_len);
            ptr::drop_in_place(to_drop);
        }
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;
    use alloc::string::{String, ToString};
    use alloc::sync::Arc;
    use alloc::vec;
    use core::sync::atomic::{AtomicUsize, Ordering};

    struct DropCounter(i32, Arc<AtomicUsize>);
    impl Drop for DropCounter {
        fn drop(&mut self) {
            self.1.fetch_add(1, Ordering::SeqCst);
        }
    }

    #[test]
    fn push_pop_roundtrip() {
        let mut vec = StaticVec::<i32, 4>::new();
        vec.push(1);
        vec.push(2);
        assert_eq!(vec.len(), 2);
        assert_eq!(vec.pop(), Some(2));
        assert_eq!(vec.pop(), Some(1));
        assert_eq!(vec.pop(), None);
    }

    #[test]
    #[should_panic(expected = "length overflow during `push`")]
    fn push_past_capacity_panics() {
        let mut vec = StaticVec::<i32, 1>::new();
        vec.push(1);
        vec.push(2);
    }

    #[test]
    fn reserve_validates_remaining_capacity() {
        let mut vec: StaticVec<i32, 4> = staticvec![1, 2, 3];
        vec.reserve(0);
        vec.reserve(1);

        let result = std::panic::catch_unwind(core::panic::AssertUnwindSafe(|| {
            vec.reserve(2);
        }));
        assert!(result.is_err());

        // A request large enough to wrap the naive `len + additional` sum
        // must still be rejected.
        let result = std::panic::catch_unwind(core::panic::AssertUnwindSafe(|| {
            vec.reserve(usize::MAX);
        }));
        assert!(result.is_err());
        assert_eq!(vec, [1, 2, 3]);
    }

    #[test]
    fn insert_at_boundaries() {
        let mut vec = StaticVec::<i32, 8>::new();

        vec.insert(0, 1);
        vec.insert(0, 0);
        vec.insert(2, 2);
        assert_eq!(vec, [0, 1, 2]);
    }

    #[test]
    fn erase_range_shifts_suffix_down() {
        let mut vec: StaticVec<i32, 5> = staticvec![1, 2, 3, 4];
        vec.drain(1..3);
        assert_eq!(vec, [1, 4]);
        assert_eq!(vec.len(), 2);
    }

    #[test]
    fn insert_overflow_rejected_before_mutation() {
        let mut vec: StaticVec<i32, 4> = staticvec![1, 2, 3];
        let result = std::panic::catch_unwind(core::panic::AssertUnwindSafe(|| {
            vec.insert_from_elem(1, 2, &9);
        }));
        assert!(result.is_err());
        assert_eq!(vec, [1, 2, 3]);

        // A count large enough to wrap a naive `len + count` sum is rejected
        // the same way.
        let result = std::panic::catch_unwind(core::panic::AssertUnwindSafe(|| {
            vec.insert_from_elem(1, usize::MAX, &9);
        }));
        assert!(result.is_err());
        assert_eq!(vec, [1, 2, 3]);
    }

    #[test]
    fn clear_twice_is_idempotent() {
        let counter = Arc::new(AtomicUsize::new(0));
        let mut vec = StaticVec::<DropCounter, 4>::new();
        vec.push(DropCounter(1, Arc::clone(&counter)));
        vec.push(DropCounter(2, Arc::clone(&counter)));

        vec.clear();
        assert_eq!(vec.len(), 0);
        assert_eq!(counter.load(Ordering::SeqCst), 2);

        vec.clear();
        assert_eq!(vec.len(), 0);
        assert_eq!(counter.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn truncate_and_container_drop() {
        let counter = Arc::new(AtomicUsize::new(0));
        {
            let mut vec = StaticVec::<DropCounter, 4>::new();
            vec.push(DropCounter(1, Arc::clone(&counter)));
            vec.push(DropCounter(2, Arc::clone(&counter)));
            vec.push(DropCounter(3, Arc::clone(&counter)));

            vec.truncate(1);
            assert_eq!(counter.load(Ordering::SeqCst), 2);
        }
        assert_eq!(counter.load(Ordering::SeqCst), 3);
    }

    #[test]
    fn retain_drops_rejected_elements() {
        let counter = Arc::new(AtomicUsize::new(0));
        let mut vec = StaticVec::<DropCounter, 8>::new();
        for i in 1..=4 {
            vec.push(DropCounter(i, Arc::clone(&counter)));
        }

        vec.retain(|dc| dc.0 % 2 == 0);
        assert_eq!(vec.len(), 2);
        assert_eq!(counter.load(Ordering::SeqCst), 2);
        assert_eq!(vec[0].0, 2);
        assert_eq!(vec[1].0, 4);
    }

    #[test]
    fn resize_preserves_overlapping_prefix() {
        let mut vec: StaticVec<i32, 8> = staticvec![1, 2, 3, 4, 5];
        vec.resize(3, 0);
        assert_eq!(vec, [1, 2, 3]);
        vec.resize(6, 9);
        assert_eq!(vec, [1, 2, 3, 9, 9, 9]);
    }

    #[test]
    fn assign_roundtrip_matches_source() {
        let src = vec!["a".to_string(), "b".to_string(), "c".to_string()];
        let mut vec: StaticVec<String, 5> = staticvec!["x".to_string()];
        vec.assign_from_slice(&src);
        assert!(vec.iter().eq(src.iter()));

        vec.assign_from_iter(src.iter().map(|s| s.to_string()).take(2));
        assert_eq!(vec, ["a", "b"]);
    }

    #[test]
    fn assign_from_elem_both_directions() {
        let mut vec: StaticVec<i32, 6> = staticvec![1, 2, 3, 4];
        vec.assign_from_elem(2, &7);
        assert_eq!(vec, [7, 7]);
        vec.assign_from_elem(5, &8);
        assert_eq!(vec, [8, 8, 8, 8, 8]);
    }

    #[test]
    fn bounds_checked_access() {
        let vec: StaticVec<i32, 4> = staticvec![10, 20];
        assert_eq!(vec.get(1), Some(&20));
        assert_eq!(vec.get(2), None);
        assert_eq!(vec.first(), Some(&10));
        assert_eq!(vec.last(), Some(&20));
    }

    #[test]
    fn iteration_forward_and_reverse() {
        let vec: StaticVec<i32, 4> = staticvec![1, 2, 3];
        let fwd: Vec<_> = vec.iter().copied().collect();
        let rev: Vec<_> = vec.iter().rev().copied().collect();
        assert_eq!(fwd, [1, 2, 3]);
        assert_eq!(rev, [3, 2, 1]);
    }

    #[test]
    fn into_iter_drops_unconsumed_tail() {
        let counter = Arc::new(AtomicUsize::new(0));
        let mut vec = StaticVec::<DropCounter, 8>::new();
        for i in 0..3 {
            vec.push(DropCounter(i, Arc::clone(&counter)));
        }

        let mut iter = vec.into_iter();
        iter.next();
        drop(iter);
        assert_eq!(counter.load(Ordering::SeqCst), 3);
    }

    #[test]
    fn drain_partial_consumption_restores_tail() {
        let mut vec: StaticVec<i32, 8> = staticvec![1, 2, 3, 4, 5];
        {
            let mut d = vec.drain(1..4);
            assert_eq!(d.next(), Some(2));
            // 3 and 4 are dropped by the Drain itself.
        }
        assert_eq!(vec, [1, 5]);
    }

    #[test]
    fn zst_elements_respect_capacity() {
        let mut vec = StaticVec::<(), 3>::new();
        vec.push(());
        vec.push(());
        vec.push(());
        assert!(vec.is_full());
        assert!(vec.try_push(()).is_err());
        assert_eq!(vec.pop(), Some(()));
        assert_eq!(vec.len(), 2);
    }

    #[test]
    fn cast_capacity_moves_elements() {
        let small: StaticVec<String, 2> = staticvec!["a".to_string(), "b".to_string()];
        let big: StaticVec<String, 6> = small.cast_capacity();
        assert_eq!(big, ["a", "b"]);
    }

    #[test]
    fn split_off_and_append_roundtrip() {
        let mut vec: StaticVec<i32, 6> = staticvec![1, 2, 3, 4];
        let mut tail = vec.split_off(2);
        assert_eq!(vec, [1, 2]);
        assert_eq!(tail, [3, 4]);

        vec.append(&mut tail);
        assert_eq!(vec, [1, 2, 3, 4]);
        assert!(tail.is_empty());
    }
}
