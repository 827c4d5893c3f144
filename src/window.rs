use crate::error::{MedianError, Result};
use crate::heap::{HeapKind, IndexedHeap, NodeId, NodeStore};

/// Sample types whose two middle values can be summed into a doubled median
///
/// Integer sums are checked, so a window near the type's limits reports [`MedianError::Overflow`]
/// instead of wrapping or panicking. Float sums saturate to infinity on their own.
pub trait MedianSum: Sized {
    /// `self + other`, or `None` if the sum is not representable
    fn median_sum(self, other: Self) -> Option<Self>;
}

macro_rules! checked_median_sum {
    ($($t:ty),*) => {
        $(
            impl MedianSum for $t {
                #[inline]
                fn median_sum(self, other: Self) -> Option<Self> {
                    self.checked_add(other)
                }
            }
        )*
    };
}

checked_median_sum!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize);

impl MedianSum for f32 {
    #[inline]
    fn median_sum(self, other: Self) -> Option<Self> {
        Some(self + other)
    }
}

impl MedianSum for f64 {
    #[inline]
    fn median_sum(self, other: Self) -> Option<Self> {
        Some(self + other)
    }
}

/// Running median of the last `window_size` samples of a stream
///
/// The window is split across two heaps:
/// a max-heap holding the lower half of the samples, and a min-heap holding the upper half.
/// The max-heap is never smaller than the min-heap, and is at most one larger,
/// so the median is always found at the two roots.
///
/// Once [`Self::window_size`] samples have been collected, each new sample overwrites the oldest one in place,
/// so every call to [`Self::add_sample_point`] costs `O(log window_size)`.
///
/// Medians are reported doubled by [`Self::doubled_median`],
/// which keeps the median of an even-sized integer window exact.
#[derive(Debug, Clone)]
pub struct SlidingWindowMedian<T> {
    window_size: usize,

    /// Lower half of the window
    max_heap: IndexedHeap,
    /// Upper half of the window
    min_heap: IndexedHeap,
    /// Nodes of both heaps
    store: NodeStore<T>,

    /// For each of the last `window_size` insertions, the node now holding that sample
    ///
    /// Only the handle is recorded: a root swap may have moved the node into the other heap since.
    sample_slots: Vec<Option<NodeId>>,
    /// Position in [`Self::sample_slots`] of the next sample, which is the oldest once the window is full
    cursor: usize,
}

impl<T: PartialOrd + Copy> SlidingWindowMedian<T> {
    /// Constructs an empty window tracking the median of the last `window_size` samples
    ///
    /// Fails with [`MedianError::InvalidArgument`] if `window_size` is zero.
    pub fn new(window_size: usize) -> Result<Self> {
        if window_size < 1 {
            #[cfg(feature = "log")]
            log::warn!("Rejected sliding window of size 0");

            return Err(MedianError::InvalidArgument {
                what: "window size",
                value: window_size,
            });
        }

        // Odd windows give the extra slot to the lower half.
        // A window of one still needs a valid (always empty) upper heap.
        let max_capacity = window_size.div_ceil(2).max(1);
        let min_capacity = (window_size / 2).max(1);

        #[cfg(feature = "log")]
        log::debug!(
            "Created sliding window median of size {} (heap capacities {}/{})",
            window_size,
            max_capacity,
            min_capacity
        );

        Ok(Self {
            window_size,
            max_heap: IndexedHeap::new(HeapKind::Max, max_capacity)?,
            min_heap: IndexedHeap::new(HeapKind::Min, min_capacity)?,
            store: NodeStore::with_capacity(window_size),
            sample_slots: vec![None; window_size],
            cursor: 0,
        })
    }

    /// Number of samples the window holds once full
    pub fn window_size(&self) -> usize {
        self.window_size
    }

    /// Number of samples currently in the window
    pub fn sample_count(&self) -> usize {
        self.max_heap.len() + self.min_heap.len()
    }

    /// Whether no sample has been added yet
    pub fn is_empty(&self) -> bool {
        self.sample_count() == 0
    }

    /// Whether the window holds [`Self::window_size`] samples, so the next sample evicts the oldest
    pub fn is_full(&self) -> bool {
        self.sample_count() == self.window_size
    }

    /// Adds a sample to the window, evicting the oldest one if the window is full
    ///
    /// Errors from this method indicate a broken internal invariant, and should not occur in practice.
    pub fn add_sample_point(&mut self, value: T) -> Result<()> {
        let sample_count = self.sample_count();

        if sample_count == self.window_size {
            // Overwrite the oldest sample, wherever its node has ended up
            let id = self.sample_slots[self.cursor]
                .ok_or(MedianError::BrokenInvariant("full window has an empty sample slot"))?;
            let heap = match self.store.owner(id) {
                Some(HeapKind::Max) => &mut self.max_heap,
                Some(HeapKind::Min) => &mut self.min_heap,
                None => {
                    return Err(MedianError::BrokenInvariant(
                        "sample slot points outside the node store",
                    ))
                }
            };

            #[cfg(feature = "log")]
            log::trace!("Evicting sample {} from the {} heap", self.cursor, heap.kind());

            heap.update_value(&mut self.store, id, value)?;
        } else {
            // Alternating keeps the max-heap equal in size to the min-heap, or one larger
            let heap = if sample_count % 2 == 0 {
                &mut self.max_heap
            } else {
                &mut self.min_heap
            };

            let id = heap.insert(&mut self.store, value)?;
            self.sample_slots[self.cursor] = Some(id);
        }

        // Each heap is internally ordered again, but the new value may sit on the wrong side of the split
        if let (Some(low), Some(high)) = (
            self.max_heap.root_value(&self.store),
            self.min_heap.root_value(&self.store),
        ) {
            if high < low {
                self.min_heap
                    .swap_root_with(&mut self.max_heap, &mut self.store)?;
            }
        }

        self.cursor = (self.cursor + 1) % self.window_size;

        Ok(())
    }

    /// Adds every sample of `values` in order
    pub fn add_sample_points<I>(&mut self, values: I) -> Result<()>
    where
        I: IntoIterator<Item = T>,
    {
        for v in values {
            self.add_sample_point(v)?;
        }

        Ok(())
    }

    /// The lower of the two middle samples, or the middle sample for an odd count
    ///
    /// Fails with [`MedianError::EmptyState`] if no sample has been added.
    pub fn lower_median(&self) -> Result<T> {
        self.max_heap
            .root_value(&self.store)
            .ok_or(MedianError::EmptyState)
    }

    /// The upper of the two middle samples, or the middle sample for an odd count
    ///
    /// Fails with [`MedianError::EmptyState`] if no sample has been added.
    pub fn upper_median(&self) -> Result<T> {
        if self.max_heap.len() == self.min_heap.len() {
            self.min_heap
                .root_value(&self.store)
                .ok_or(MedianError::EmptyState)
        } else {
            self.lower_median()
        }
    }

    /// Twice the median of the samples in the window
    ///
    /// This is the sum of the two middle samples, or twice the middle sample for an odd count,
    /// so no division is needed.
    /// Fails with [`MedianError::EmptyState`] if no sample has been added,
    /// and with [`MedianError::Overflow`] if the sum does not fit in `T`.
    /// [`Self::lower_median`] and [`Self::upper_median`] never overflow.
    pub fn doubled_median(&self) -> Result<T>
    where
        T: MedianSum,
    {
        self.lower_median()?
            .median_sum(self.upper_median()?)
            .ok_or(MedianError::Overflow)
    }
}
