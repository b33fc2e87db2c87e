use std::fmt;

use crate::error::HeapError;

fn identity<T>(e: &T) -> &T {
    e
}

/// Binary min-heap stored as a complete binary tree in a `Vec`.
///
/// Ordering comes from a key-extraction function: lower keys sit closer to
/// the root. Every non-root index `i` satisfies
/// `key(array[parent(i)]) <= key(array[i])`.
pub struct MinHeap<T, K = T> {
    array: Vec<T>,
    key: fn(&T) -> &K,
}

impl<T: Ord> MinHeap<T, T> {
    /// Create an empty heap ordered by the elements themselves.
    pub fn new() -> Self {
        Self::with_key(identity::<T>)
    }
}

impl<T: Ord> Default for MinHeap<T, T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T, K: Ord> MinHeap<T, K> {
    /// Create an empty heap ordered by `key`.
    pub fn with_key(key: fn(&T) -> &K) -> Self {
        Self {
            array: Vec::new(),
            key,
        }
    }

    /// Wrap a preset backing array without reordering it.
    ///
    /// The caller is responsible for the heap invariant; this exists mostly
    /// so tests can start from a known layout.
    pub fn from_vec(array: Vec<T>, key: fn(&T) -> &K) -> Self {
        Self { array, key }
    }

    pub fn len(&self) -> usize {
        self.array.len()
    }

    pub fn is_empty(&self) -> bool {
        self.array.is_empty()
    }

    /// The backing array in heap order.
    pub fn as_slice(&self) -> &[T] {
        &self.array
    }

    pub fn into_vec(self) -> Vec<T> {
        self.array
    }

    pub fn peek(&self) -> Option<&T> {
        self.array.first()
    }

    /// The ordering key of an element under this heap's key function.
    pub fn key_of<'a>(&self, e: &'a T) -> &'a K {
        (self.key)(e)
    }

    /// Append `e` and sift it up toward the root.
    pub fn insert(&mut self, e: T) {
        self.array.push(e);
        self.sift_up(self.array.len() - 1);
    }

    /// Remove and return the element with the smallest key.
    ///
    /// Returns `None` on an empty heap: exhaustion is ordinary control flow
    /// for the algorithms that drain a heap.
    pub fn remove_min(&mut self) -> Option<T> {
        let last = self.array.len().checked_sub(1)?;
        self.swap(0, last);
        let min = self.array.pop();
        self.sift_down(0);
        min
    }

    /// Restore the invariant upward from `i`.
    ///
    /// Swaps only while the element is strictly smaller than its parent.
    pub fn sift_up(&mut self, mut i: usize) {
        while let Some(p) = self.parent_index(i) {
            if self.key_at(i) < self.key_at(p) {
                self.swap(i, p);
                i = p;
            } else {
                break;
            }
        }
    }

    /// Restore the invariant downward from `i`.
    ///
    /// With two children the right child is taken only when it is strictly
    /// smaller than both the left child and the node; otherwise the left
    /// child is considered on its own. Equal keys never move.
    pub fn sift_down(&mut self, mut i: usize) {
        loop {
            let next = match (self.left_child_index(i), self.right_child_index(i)) {
                (Some(l), Some(r)) => {
                    if self.key_at(r) < self.key_at(l) && self.key_at(r) < self.key_at(i) {
                        Some(r)
                    } else if self.key_at(l) < self.key_at(i) {
                        Some(l)
                    } else {
                        None
                    }
                }
                (Some(l), None) => (self.key_at(l) < self.key_at(i)).then_some(l),
                _ => None,
            };
            match next {
                Some(child) => {
                    self.swap(i, child);
                    i = child;
                }
                None => break,
            }
        }
    }

    /// Exchange the elements at `i` and `j`.
    pub fn swap(&mut self, i: usize, j: usize) {
        self.array.swap(i, j);
    }

    pub fn has_parent(&self, i: usize) -> bool {
        i > 0 && i < self.array.len()
    }

    pub fn parent_index(&self, i: usize) -> Option<usize> {
        self.has_parent(i).then(|| (i - 1) / 2)
    }

    pub fn parent_key(&self, i: usize) -> Result<&K, HeapError> {
        self.parent_index(i)
            .map(|p| self.key_at(p))
            .ok_or(HeapError::NoParent(i))
    }

    pub fn has_left_child(&self, i: usize) -> bool {
        self.left_child_index(i).is_some()
    }

    pub fn left_child_index(&self, i: usize) -> Option<usize> {
        let l = 2 * i + 1;
        (l < self.array.len()).then_some(l)
    }

    pub fn left_child_key(&self, i: usize) -> Result<&K, HeapError> {
        self.left_child_index(i)
            .map(|l| self.key_at(l))
            .ok_or(HeapError::NoLeftChild(i))
    }

    pub fn has_right_child(&self, i: usize) -> bool {
        self.right_child_index(i).is_some()
    }

    pub fn right_child_index(&self, i: usize) -> Option<usize> {
        let r = 2 * i + 2;
        (r < self.array.len()).then_some(r)
    }

    pub fn right_child_key(&self, i: usize) -> Result<&K, HeapError> {
        self.right_child_index(i)
            .map(|r| self.key_at(r))
            .ok_or(HeapError::NoRightChild(i))
    }

    /// Check the heap invariant over every parent/child pair.
    pub fn is_valid(&self) -> bool {
        (1..self.array.len()).all(|i| self.key_at((i - 1) / 2) <= self.key_at(i))
    }

    fn key_at(&self, i: usize) -> &K {
        (self.key)(&self.array[i])
    }
}

impl<T: Clone, K> Clone for MinHeap<T, K> {
    fn clone(&self) -> Self {
        Self {
            array: self.array.clone(),
            key: self.key,
        }
    }
}

/// Heaps compare by layout; the key function is not compared.
impl<T: PartialEq, K> PartialEq for MinHeap<T, K> {
    fn eq(&self, other: &Self) -> bool {
        self.array == other.array
    }
}

impl<T: Eq, K> Eq for MinHeap<T, K> {}

impl<T: fmt::Debug, K> fmt::Debug for MinHeap<T, K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MinHeap").field("array", &self.array).finish()
    }
}

#[cfg(feature = "serde")]
impl<T: serde::Serialize, K> serde::Serialize for MinHeap<T, K> {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.array.serialize(serializer)
    }
}
