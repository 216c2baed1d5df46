use std::collections::VecDeque;

/// Bounded FIFO of occupation vectors, oldest first.
///
/// Once `capacity` entries are stored, each push evicts exactly the oldest
/// one. A zero-capacity history stores nothing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultHistory {
    capacity: usize,
    entries: VecDeque<Vec<u8>>,
}

impl ResultHistory {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            entries: VecDeque::with_capacity(capacity),
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn push(&mut self, configuration: &[u8]) {
        if self.capacity == 0 {
            return;
        }
        if self.entries.len() == self.capacity {
            self.entries.pop_front();
        }
        self.entries.push_back(configuration.to_vec());
    }

    /// The most recently pushed configuration.
    pub fn latest(&self) -> Option<&[u8]> {
        self.entries.back().map(Vec::as_slice)
    }

    pub fn iter(&self) -> impl Iterator<Item = &[u8]> {
        self.entries.iter().map(Vec::as_slice)
    }

    pub fn into_vec(self) -> Vec<Vec<u8>> {
        self.entries.into()
    }
}
