//! Error types for list operations.

use core::alloc::Layout;

use thiserror::Error;

use crate::{MAX_SIZE, Shape};

/// Everything that can go wrong when accessing or resizing an
/// [`ArrayList`](crate::ArrayList).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Read or write access past the last live element.
    #[error("index {index} is out of bounds for length {len}")]
    IndexOutOfBounds { index: usize, len: usize },

    /// Insertion position greater than the length.
    #[error("cannot insert at index {index} in a list of length {len}")]
    InsertOutOfBounds { index: usize, len: usize },

    /// Removal position not holding a live element.
    #[error("cannot remove index {index} from a list of length {len}")]
    RemoveOutOfBounds { index: usize, len: usize },

    /// Requested capacity is larger than [`MAX_SIZE`] or does not fit in memory.
    #[error("capacity {requested} exceeds the maximum of {max}", max = MAX_SIZE)]
    CapacityOverflow { requested: usize },

    /// The allocator refused the request.
    #[error("memory allocation of {} bytes failed", .layout.size())]
    AllocFailed { layout: Layout },

    /// Operands of a vector operation have different shapes.
    #[error("shape mismatch: {left} vs {right}")]
    ShapeMismatch { left: Shape, right: Shape },

    /// `sum` needs at least one element to start from.
    #[error("cannot sum an empty list")]
    EmptySum,
}

pub type Result<T, E = Error> = core::result::Result<T, E>;

/// Escalates an error from an infallible API the way `Vec` does.
#[cold]
#[track_caller]
pub(crate) fn handle_error(err: Error) -> ! {
    match err {
        Error::AllocFailed { layout } => alloc::alloc::handle_alloc_error(layout),
        other => panic!("{other}"),
    }
}
