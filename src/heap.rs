use crate::grid::Cost;
use thiserror::Error;

const TOP: usize = 0;

fn parent(i: usize) -> usize {
    (i - 1) / 2
}

fn left(i: usize) -> usize {
    2 * i + 1
}

fn right(i: usize) -> usize {
    2 * i + 2
}

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeapError {
    #[error("cell {0} is already queued")]
    AlreadyQueued(usize),
    #[error("cell {0} is not queued")]
    NotQueued(usize),
    #[error("cell {index} exceeds heap capacity {capacity}")]
    OutOfRange { index: usize, capacity: usize },
}

/// Field order gives the lexicographic `(primary, secondary)` ordering.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord)]
struct Priority {
    primary: Cost,
    secondary: Cost,
}

/// Binary min-heap of cell indices with mutable priorities.
///
/// Sized once for a dense index space (a grid's linear indices). Each
/// queued index remembers its slot in the heap, so re-prioritizing an entry
/// is `O(log n)` without searching for it. Ties on the primary priority
/// are broken by the secondary one.
#[derive(Debug, Clone)]
pub struct PriorityHeap {
    heap: Vec<usize>,
    priorities: Vec<Priority>,
    positions: Vec<Option<usize>>,
}

impl PriorityHeap {
    pub fn with_capacity(capacity: usize) -> Self {
        PriorityHeap {
            heap: Vec::with_capacity(capacity),
            priorities: vec![Priority::default(); capacity],
            positions: vec![None; capacity],
        }
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.positions.len()
    }

    pub fn contains(&self, index: usize) -> bool {
        self.positions.get(index).is_some_and(Option::is_some)
    }

    /// The minimum entry and its primary priority.
    pub fn peek(&self) -> Option<(usize, Cost)> {
        self.heap
            .first()
            .map(|&index| (index, self.priorities[index].primary))
    }

    /// `(primary, secondary)` priorities of a queued entry.
    pub fn priority(&self, index: usize) -> Option<(Cost, Cost)> {
        if !self.contains(index) {
            return None;
        }
        let priority = self.priorities[index];
        Some((priority.primary, priority.secondary))
    }

    /// Queues `index`. Returns the new heap size.
    pub fn push(&mut self, index: usize, primary: Cost, secondary: Cost) -> Result<usize, HeapError> {
        self.check(index)?;
        if self.contains(index) {
            return Err(HeapError::AlreadyQueued(index));
        }
        self.priorities[index] = Priority { primary, secondary };
        self.positions[index] = Some(self.heap.len());
        self.heap.push(index);
        self.sift_up(self.heap.len() - 1);
        Ok(self.heap.len())
    }

    pub fn pop(&mut self) -> Option<(usize, Cost)> {
        let popped = self.peek()?;
        let bottom = self.heap.len() - 1;
        if bottom > TOP {
            self.swap(TOP, bottom);
        }
        self.heap.pop();
        self.positions[popped.0] = None;
        self.sift_down(TOP);
        Some(popped)
    }

    pub fn set_priority(&mut self, index: usize, primary: Cost) -> Result<(), HeapError> {
        let slot = self.slot(index)?;
        let old = self.priorities[index];
        if old.primary == primary {
            return Ok(());
        }
        self.priorities[index].primary = primary;
        self.restore(slot, old);
        Ok(())
    }

    pub fn set_secondary_priority(&mut self, index: usize, secondary: Cost) -> Result<(), HeapError> {
        let slot = self.slot(index)?;
        let old = self.priorities[index];
        if old.secondary == secondary {
            return Ok(());
        }
        self.priorities[index].secondary = secondary;
        self.restore(slot, old);
        Ok(())
    }

    pub fn clear(&mut self) {
        for &index in &self.heap {
            self.positions[index] = None;
        }
        self.heap.clear();
    }

    fn check(&self, index: usize) -> Result<(), HeapError> {
        if index < self.capacity() {
            Ok(())
        } else {
            Err(HeapError::OutOfRange {
                index,
                capacity: self.capacity(),
            })
        }
    }

    fn slot(&self, index: usize) -> Result<usize, HeapError> {
        self.check(index)?;
        self.positions[index].ok_or(HeapError::NotQueued(index))
    }

    // sift up if the priority decreased, down if it increased
    fn restore(&mut self, slot: usize, old: Priority) {
        if self.priorities[self.heap[slot]] < old {
            self.sift_up(slot);
        } else {
            self.sift_down(slot);
        }
    }

    fn less(&self, i: usize, j: usize) -> bool {
        self.priorities[self.heap[i]] < self.priorities[self.heap[j]]
    }

    fn swap(&mut self, i: usize, j: usize) {
        self.heap.swap(i, j);
        self.positions[self.heap[i]] = Some(i);
        self.positions[self.heap[j]] = Some(j);
    }

    fn sift_up(&mut self, mut node: usize) {
        while node > TOP {
            let up = parent(node);
            if !self.less(node, up) {
                break;
            }
            self.swap(node, up);
            node = up;
        }
    }

    fn sift_down(&mut self, mut node: usize) {
        let size = self.heap.len();
        loop {
            let mut smallest = node;
            if left(node) < size && self.less(left(node), smallest) {
                smallest = left(node);
            }
            if right(node) < size && self.less(right(node), smallest) {
                smallest = right(node);
            }
            if smallest == node {
                break;
            }
            self.swap(node, smallest);
            node = smallest;
        }
    }
}
