/// FIFO queue with amortized O(1) enqueue and dequeue.
///
/// Items are appended to a backing vector and read through an offset. Once the offset
/// passes half of the backing length the consumed prefix is dropped.
#[derive(Debug, Clone)]
pub struct Queue<T> {
    items: Vec<T>,
    offset: usize,
}

impl<T> Default for Queue<T> {
    fn default() -> Self {
        Queue {
            items: Vec::new(),
            offset: 0,
        }
    }
}

impl<T> Queue<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.items.len() - self.offset
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&mut self) {
        self.items.clear();
        self.offset = 0;
    }

    pub fn peek(&self) -> Option<&T> {
        self.items.get(self.offset)
    }

    /// Appends a value and returns the new size of the queue.
    pub fn enqueue(&mut self, value: T) -> usize {
        self.items.push(value);
        self.len()
    }

    /// Removes the oldest value, or returns `None` when the queue is empty.
    pub fn dequeue(&mut self) -> Option<T>
    where
        T: Clone,
    {
        let item = self.items.get(self.offset)?.clone();
        self.offset += 1;
        if self.offset * 2 >= self.items.len() {
            self.items.drain(..self.offset);
            self.offset = 0;
        }
        Some(item)
    }
}

impl<T> Extend<T> for Queue<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        self.items.extend(iter);
    }
}
