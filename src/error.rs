use thiserror::Error;

use crate::heap::HeapKind;

/// Errors surfaced by the heap and window operations
///
/// Every variant is a precondition violation: the operation that returns it
/// has not touched the structure, so the caller can keep using it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MedianError {
    /// A size argument was zero
    #[error("{what} must be at least 1, got {value}")]
    InvalidArgument {
        /// Name of the rejected argument
        what: &'static str,
        /// The rejected value
        value: usize,
    },
    /// Insert attempted on a heap that already holds `capacity` nodes
    #[error("heap is full (capacity {capacity})")]
    CapacityExceeded {
        /// Capacity of the full heap
        capacity: usize,
    },
    /// A median was requested before any sample was added
    #[error("no samples have been added yet")]
    EmptyState,
    /// A root swap was requested while one of the heaps is empty
    #[error("cannot swap roots: one of the heaps is empty")]
    UnpairedSwap,
    /// A node handle was passed to a heap that does not currently own it
    #[error("node does not belong to this {target} heap")]
    ForeignNode {
        /// Kind of the heap the operation was called on
        target: HeapKind,
    },
    /// The two middle samples do not sum to a representable value
    #[error("doubled median overflows the sample type")]
    Overflow,
    /// The window's bookkeeping no longer matches its heaps
    #[error("sliding window invariant broken: {0}")]
    BrokenInvariant(&'static str),
    /// Activity input could not be parsed
    #[error("malformed activity input: {0}")]
    Parse(String),
}

/// Result alias used throughout the crate
pub type Result<T, E = MedianError> = std::result::Result<T, E>;
