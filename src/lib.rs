//! A fixed-capacity vector stored inline.
//!
//! [`StaticVec<T, N>`] keeps up to `N` elements directly inside the value
//! itself, like `[T; N]`, while exposing the familiar growable-vector API of
//! [`Vec`](alloc::vec::Vec). It never touches the heap and its capacity never
//! changes; pushing past `N` is a contract violation that panics, with
//! `try_*` variants for callers who want the overflow reported as an error
//! value instead.
//!
//! The crate is `no_std` (`alloc` is used only for the `Vec`/`Box`/`Cow`
//! conversions), and every mutating operation documents what state the vector
//! is in if an element's `Clone` or a user closure panics partway through.
//!
//! ## Examples
//!
//! ```
//! use static_vec::{StaticVec, staticvec};
//!
//! let mut vec: StaticVec<i32, 8> = staticvec![1, 2, 3];
//! vec.push(4);
//! vec.insert_from_slice(1, &[9, 9]);
//! assert_eq!(vec, [1, 9, 9, 2, 3, 4]);
//!
//! vec.drain(1..3);
//! assert_eq!(vec, [1, 2, 3, 4]);
//!
//! assert_eq!(vec.capacity(), 8);
//! ```
//!
//! ## Feature flags
//!
//! | flag | description |
//! | :-: | :- |
//! | `std` | `std::io::Write` for `StaticVec<u8, N>`. |
//! | `serde` | `Serialize`/`Deserialize` through `serde_core`. |

#![no_std]
#![warn(missing_docs)]

#[cfg(feature = "std")]
extern crate std;

extern crate alloc;

mod error;
mod raw;
mod static_vec;
mod utils;

#[cfg(feature = "serde")]
mod serde;

#[cfg(feature = "std")]
mod std_io;

pub use error::CapacityError;
pub use static_vec::{Drain, IntoIter, StaticVec};
