//! Error type for the fallible (`try_*`) operations.
//!
//! Capacity overflow through the plain mutating API is a contract violation
//! and panics; the `try_*` variants report it as a value instead, handing the
//! rejected element back so nothing is lost.

use core::fmt;

/// The fixed capacity would have been exceeded.
///
/// Carries the value (or the unconsumed borrow) that did not fit, so callers
/// can retry elsewhere or drop it deliberately.
///
/// # Examples
///
/// ```
/// # use static_vec::StaticVec;
/// let mut vec: StaticVec<i32, 2> = StaticVec::new();
/// vec.push(1);
/// vec.push(2);
///
/// let err = vec.try_push(3).unwrap_err();
/// assert_eq!(err.into_inner(), 3);
/// assert_eq!(vec, [1, 2]);
/// ```
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct CapacityError<T = ()> {
    value: T,
}

impl<T> CapacityError<T> {
    #[inline]
    pub(crate) const fn new(value: T) -> Self {
        Self { value }
    }

    /// Returns the value that did not fit.
    #[inline]
    pub fn into_inner(self) -> T {
        self.value
    }
}

impl<T> fmt::Display for CapacityError<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("fixed capacity exceeded")
    }
}

impl<T> fmt::Debug for CapacityError<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("CapacityError")
    }
}

impl<T> core::error::Error for CapacityError<T> {}

#[cfg(test)]
mod tests {
    use super::CapacityError;
    use alloc::string::{String, ToString};
    use core::error::Error;

    fn takes_error(e: &dyn Error) -> String {
        e.to_string()
    }

    #[test]
    fn reports_through_dyn_error() {
        let s = takes_error(&CapacityError::new(()));
        assert!(s.contains("capacity"));
    }

    #[test]
    fn hands_the_value_back() {
        let err = CapacityError::new("overflowed");
        assert_eq!(err.into_inner(), "overflowed");
    }
}
