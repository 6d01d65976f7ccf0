//! Round-robin node selection.

use std::sync::atomic::{AtomicUsize, Ordering};

/// Cycles through a fixed node list.
#[derive(Debug)]
pub struct RoundRobin {
    nodes: Vec<String>,
    counter: AtomicUsize,
}

impl RoundRobin {
    pub fn new(nodes: Vec<String>) -> Self {
        Self {
            nodes,
            counter: AtomicUsize::new(0),
        }
    }

    /// Returns the next node in turn, or None if the list is empty.
    pub fn next_node(&self) -> Option<&str> {
        if self.nodes.is_empty() {
            return None;
        }
        let idx = self.counter.fetch_add(1, Ordering::Relaxed) % self.nodes.len();
        self.nodes.get(idx).map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cycles_in_order() {
        let rr = RoundRobin::new(vec!["a".into(), "b".into(), "c".into()]);
        let picked: Vec<&str> = (0..7).filter_map(|_| rr.next_node()).collect();
        assert_eq!(picked, vec!["a", "b", "c", "a", "b", "c", "a"]);
    }

    #[test]
    fn test_single_node() {
        let rr = RoundRobin::new(vec!["only".into()]);
        assert_eq!(rr.next_node(), Some("only"));
        assert_eq!(rr.next_node(), Some("only"));
    }

    #[test]
    fn test_empty_list() {
        let rr = RoundRobin::new(Vec::new());
        assert!(rr.next_node().is_none());
    }
}
