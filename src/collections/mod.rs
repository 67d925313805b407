//! Frontier containers used by the search engines.

mod priority_queue;
mod queue;

pub use priority_queue::{Comparator, PriorityQueue};
pub use queue::Queue;
