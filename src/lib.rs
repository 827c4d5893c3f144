#![doc = include_str!("../README.md")]
#![warn(missing_docs)]

mod error;
pub mod heap;
mod notify;
mod window;

pub use error::{MedianError, Result};
pub use heap::{HeapKind, HeapNode, IndexedHeap, NodeId, NodeStore};
pub use notify::{activity_notifications, parse_activity_input, ActivityInput};
pub use window::{MedianSum, SlidingWindowMedian};
