use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;
use std::sync::Arc;

use crate::engine::core::{CompositeKey, KeyComparator};
use crate::engine::errors::KeyError;
use tracing::trace;

/// Min-heap of active streams keyed by the cached key of their current row.
///
/// Keys are checked against the schema on insertion, so ordering inside the
/// heap never has to deal with a malformed key.
pub struct MergeHeap {
    heap: BinaryHeap<Reverse<HeapItem>>,
    comparator: Arc<KeyComparator>,
}

struct HeapItem {
    key: CompositeKey,
    stream_index: usize,
    comparator: Arc<KeyComparator>,
}

impl PartialEq for HeapItem {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}
impl Eq for HeapItem {}

impl PartialOrd for HeapItem {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
impl Ord for HeapItem {
    fn cmp(&self, other: &Self) -> Ordering {
        self.comparator.compare_checked(&self.key, &other.key)
    }
}

impl MergeHeap {
    pub fn new(comparator: Arc<KeyComparator>, capacity: usize) -> Self {
        Self {
            heap: BinaryHeap::with_capacity(capacity),
            comparator,
        }
    }

    /// Inserts `stream_index` keyed by its current row. A key that does not
    /// fit the schema is rejected and nothing is inserted.
    pub fn push(&mut self, stream_index: usize, key: CompositeKey) -> Result<(), KeyError> {
        self.comparator.check(&key)?;
        debug_assert!(
            !self
                .heap
                .iter()
                .any(|Reverse(item)| item.stream_index == stream_index),
            "stream {stream_index} is already in the heap"
        );

        if tracing::enabled!(tracing::Level::TRACE) {
            trace!(
                target: "seg_merge::merge",
                stream_index,
                dictionary = %hex::encode(&key.dictionary),
                "Pushing stream into heap"
            );
        }

        self.heap.push(Reverse(HeapItem {
            key,
            stream_index,
            comparator: Arc::clone(&self.comparator),
        }));
        Ok(())
    }

    /// Removes the stream holding the smallest key and returns its index.
    pub fn pop(&mut self) -> Option<usize> {
        self.heap.pop().map(|Reverse(item)| item.stream_index)
    }

    pub fn peek_key(&self) -> Option<&CompositeKey> {
        self.heap.peek().map(|Reverse(item)| &item.key)
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }
}
