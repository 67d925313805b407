/// Strict ordering used by [`PriorityQueue`].
///
/// `outranks(a, b)` returns `true` when `a` has strictly higher priority than `b`.
/// Any `Fn(&T, &T) -> bool` closure is a comparator.
pub trait Comparator<T> {
    fn outranks(&self, a: &T, b: &T) -> bool;
}

impl<T, F> Comparator<T> for F
where
    F: Fn(&T, &T) -> bool,
{
    fn outranks(&self, a: &T, b: &T) -> bool {
        self(a, b)
    }
}

/// Binary heap ordered by an injected comparator.
///
/// The element that outranks every other element sits at the root. Ties are resolved
/// arbitrarily, so insertion order is not preserved between equal-priority elements.
pub struct PriorityQueue<T, C> {
    heap: Vec<T>,
    comparator: C,
}

const ROOT: usize = 0;

fn parent(i: usize) -> usize {
    (i - 1) / 2
}

fn left(i: usize) -> usize {
    2 * i + 1
}

fn right(i: usize) -> usize {
    2 * i + 2
}

impl<T: PartialOrd> PriorityQueue<T, fn(&T, &T) -> bool> {
    /// A queue where larger values come out first.
    pub fn max_heap() -> Self {
        let greater: fn(&T, &T) -> bool = |a, b| a > b;
        PriorityQueue::new(greater)
    }
}

impl<T, C: Comparator<T>> PriorityQueue<T, C> {
    pub fn new(comparator: C) -> Self {
        PriorityQueue {
            heap: Vec::new(),
            comparator,
        }
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    pub fn clear(&mut self) {
        self.heap.clear();
    }

    /// Returns the highest-priority element without removing it.
    pub fn peek(&self) -> Option<&T> {
        self.heap.get(ROOT)
    }

    /// Inserts a value and returns the new size of the queue.
    pub fn push(&mut self, value: T) -> usize {
        self.heap.push(value);
        self.sift_up();
        self.heap.len()
    }

    /// Removes and returns the highest-priority element, or `None` when empty.
    pub fn pop(&mut self) -> Option<T> {
        if self.heap.is_empty() {
            return None;
        }
        let bottom = self.heap.len() - 1;
        self.heap.swap(ROOT, bottom);
        let top = self.heap.pop();
        self.sift_down();
        top
    }

    fn outranks(&self, i: usize, j: usize) -> bool {
        self.comparator.outranks(&self.heap[i], &self.heap[j])
    }

    fn sift_up(&mut self) {
        let mut node = self.heap.len() - 1;
        while node > ROOT && self.outranks(node, parent(node)) {
            self.heap.swap(node, parent(node));
            node = parent(node);
        }
    }

    fn sift_down(&mut self) {
        let len = self.heap.len();
        let mut node = ROOT;
        loop {
            // Always descend toward the higher-priority child
            let mut best = node;
            if left(node) < len && self.outranks(left(node), best) {
                best = left(node);
            }
            if right(node) < len && self.outranks(right(node), best) {
                best = right(node);
            }
            if best == node {
                break;
            }
            self.heap.swap(node, best);
            node = best;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{Rng, SeedableRng, rngs::StdRng};

    fn assert_heap_property<T, C: Comparator<T>>(pq: &PriorityQueue<T, C>) {
        for i in 1..pq.heap.len() {
            assert!(
                !pq.comparator.outranks(&pq.heap[i], &pq.heap[parent(i)]),
                "child at {} outranks its parent",
                i
            );
        }
    }

    #[test]
    fn test_pop_order_max_heap() {
        let mut pq = PriorityQueue::max_heap();
        for v in [5, 1, 9, 3, 7, 9, 0] {
            pq.push(v);
        }
        let mut out = Vec::new();
        while let Some(v) = pq.pop() {
            out.push(v);
        }
        assert_eq!(out, vec![9, 9, 7, 5, 3, 1, 0]);
    }

    #[test]
    fn test_custom_comparator_min_heap() {
        let mut pq = PriorityQueue::new(|a: &i32, b: &i32| a < b);
        pq.push(4);
        pq.push(-2);
        pq.push(8);
        assert_eq!(pq.peek(), Some(&-2));
        assert_eq!(pq.pop(), Some(-2));
        assert_eq!(pq.pop(), Some(4));
        assert_eq!(pq.pop(), Some(8));
        assert_eq!(pq.pop(), None);
    }

    #[test]
    fn test_empty_queue() {
        let mut pq = PriorityQueue::max_heap();
        assert!(pq.is_empty());
        assert_eq!(pq.peek(), None::<&u8>);
        assert_eq!(pq.pop(), None);
        assert_eq!(pq.len(), 0);
    }

    #[test]
    fn test_size_and_heap_property_random_ops() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut pq = PriorityQueue::max_heap();
        let mut expected_len = 0;
        for _ in 0..500 {
            if rng.random_bool(0.6) {
                let len = pq.push(rng.random_range(0..100u32));
                expected_len += 1;
                assert_eq!(len, expected_len);
            } else if let Some(top) = pq.pop() {
                expected_len -= 1;
                // Everything left ranks no higher than what came out
                assert!(pq.heap.iter().all(|v| *v <= top));
            }
            assert_eq!(pq.len(), expected_len);
            assert_heap_property(&pq);
            if let Some(&peeked) = pq.peek() {
                assert_eq!(Some(&peeked), pq.heap.iter().max());
            }
        }
    }

    #[test]
    fn test_clear() {
        let mut pq = PriorityQueue::max_heap();
        pq.push(1);
        pq.push(2);
        pq.clear();
        assert!(pq.is_empty());
        pq.push(3);
        assert_eq!(pq.pop(), Some(3));
    }
}
