//! Per-worker search state (spec.md §5): four heaps reused across
//! legs and requests rather than reallocated, so one worker thread
//! owns exactly one `SearchEngineData` for its whole lifetime.

use crate::query::heap::QueryHeap;

/// The four query heaps a leg's bidirectional search needs.
///
/// `forward_heap_2`/`reverse_heap_2` back the second of the two
/// parallel searches spec.md §4.3 describes for a bidirectional
/// starting phantom. The alternative-path engine reuses
/// `forward_heap_1`/`reverse_heap_1` instead: once that primary search
/// settles, its heap keys already carry the exact shortest distance to
/// every settled node, so ranking a via-node candidate never needs a
/// dedicated pair of its own (spec.md §4.4; see `alternative::compute`).
#[derive(Debug, Default)]
pub struct SearchEngineData {
    pub forward_heap_1: QueryHeap,
    pub reverse_heap_1: QueryHeap,
    pub forward_heap_2: QueryHeap,
    pub reverse_heap_2: QueryHeap,
}

impl SearchEngineData {
    pub fn new() -> Self {
        SearchEngineData::default()
    }

    /// Clears all four heaps ahead of the next leg.
    pub fn clear(&mut self) {
        self.forward_heap_1.clear();
        self.reverse_heap_1.clear();
        self.forward_heap_2.clear();
        self.reverse_heap_2.clear();
    }
}
