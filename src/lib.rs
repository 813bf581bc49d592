#![cfg_attr(all(not(feature = "std"), not(test)), no_std)]
#![allow(unsafe_code)]

//! ArrayList: a contiguous, growable sequence with explicit capacity control.
//!
//! `ArrayList<T, A>` keeps its elements in a single buffer obtained from a
//! pluggable [`Allocator`]. Unlike `Vec`, every indexed access is checked and
//! the capacity policy is part of the contract:
//!
//! - Appending to a full list grows it to `(capacity + 1) * 2` slots.
//! - Building from a list of `k` values reserves `2 * k` slots up front.
//! - Clearing keeps the capacity; only [`ArrayList::shrink_to_fit`] gives
//!   memory back.
//!
//! On top of the container sits a tiny 1-D vector API ([`ArrayList::dot`],
//! [`ArrayList::sum`], [`ArrayList::shape`]).
//!
//! # Example
//!
//! ```
//! use array_list::{ArrayList, Error, array_list};
//!
//! let mut list = array_list![1, 2, 3];
//! assert_eq!(list.capacity(), 6);
//!
//! list.insert(1, 9).unwrap();
//! assert_eq!(list, [1, 9, 2, 3]);
//! assert_eq!(list.to_string(), "[1, 9, 2, 3]");
//!
//! assert_eq!(list.at(7), Err(Error::IndexOutOfBounds { index: 7, len: 4 }));
//! assert_eq!(list.sum(), Ok(15));
//!
//! let other: ArrayList<i32> = array_list![1, 1, 1, 1];
//! assert_eq!(list.dot(&other), Ok(15.0));
//! ```
//!
//! # Allocators
//!
//! Any `allocator_api2` allocator works, including a `bumpalo` arena:
//!
//! ```ignore
//! let arena = bumpalo::Bump::new();
//! let mut list = ArrayList::new_in(&arena);
//! list.push_back(1u32);
//! ```
//!
//! # Threads
//!
//! There is no internal synchronization. A list may be moved to another
//! thread or shared immutably when its elements and allocator allow it, but
//! concurrent mutation needs external locking.

extern crate alloc;

pub use allocator_api2::alloc::{AllocError, Allocator, Global};

mod array_list;
mod error;
mod fmt;
mod into_iter;
mod math;
mod raw;
mod shape;

pub use crate::array_list::ArrayList;
pub use error::{Error, Result};
pub use into_iter::IntoIter;
pub use math::Scalar;
pub use shape::Shape;

/// Largest capacity an [`ArrayList`] may ever hold.
///
/// Also used as the sentinel second dimension of a 1-D [`Shape`].
pub const MAX_SIZE: usize = isize::MAX as usize;

/// Builds an [`ArrayList`] from a list of values, like `vec!`.
///
/// `array_list![a, b, c]` reserves twice the number of values;
/// `array_list![value; n]` fills exactly `n` slots with clones of `value`.
///
/// ```
/// use array_list::array_list;
///
/// let list = array_list![1, 2, 3];
/// assert_eq!(list.len(), 3);
/// assert_eq!(list.capacity(), 6);
///
/// let zeros = array_list![0u8; 4];
/// assert_eq!(zeros.capacity(), 4);
/// ```
#[macro_export]
macro_rules! array_list {
    () => {
        $crate::ArrayList::new()
    };
    ($value:expr; $n:expr) => {
        $crate::ArrayList::from_elem($n, $value)
    };
    ($($value:expr),+ $(,)?) => {
        $crate::ArrayList::from_values([$($value),+])
    };
}

/// Test utilities for enabling logging in tests
#[cfg(test)]
pub(crate) mod test_utils {
    /// Initialize tracing subscriber for tests with TRACE level
    /// Call this at the start of tests where you want to see buffer events
    pub fn init_test_logging() {
        use tracing_subscriber::{EnvFilter, fmt};

        // Try to initialize, ignore error if already initialized
        let _ = fmt()
            .with_env_filter(
                EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("trace")),
            )
            .with_test_writer()
            .try_init();
    }
}
