//! Error types for Slat list controls.
//!
//! Only programming-contract violations surface as errors: an index out of
//! range on an accessor, or requesting the 64-bit checked-bits view of a
//! list with more than 64 items. Interactive edge cases (hit-test misses,
//! hover on a disabled item, navigation past the last enabled item) are
//! absorbed as `Option`/no-op and never reach this type.

use std::fmt;

/// The main error type for list-control operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListError {
    /// An item index was outside the collection's bounds.
    IndexOutOfBounds {
        /// The requested index.
        index: usize,
        /// The collection length at the time of the request.
        len: usize,
    },
    /// The checked-bits accessor was used on a list with more than 64 items.
    BitSetOverflow {
        /// The collection length at the time of the request.
        len: usize,
    },
}

impl fmt::Display for ListError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::IndexOutOfBounds { index, len } => {
                write!(f, "item index {index} out of bounds (list has {len} items)")
            }
            Self::BitSetOverflow { len } => {
                write!(
                    f,
                    "checked-bits accessor supports at most 64 items (list has {len})"
                )
            }
        }
    }
}

impl std::error::Error for ListError {}

/// Convenience result alias for list-control operations.
pub type ListResult<T> = Result<T, ListError>;
