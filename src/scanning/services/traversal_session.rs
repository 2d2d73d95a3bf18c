use crate::scanning::domain::Identity;
use std::collections::{HashSet, VecDeque};

/// Frontier queue and visited set of one traversal run
///
/// State is scoped to the session so independent runs never share it.
/// Each label is handed out by [`TraversalSession::next_unvisited`] at most
/// once, no matter how many times it was enqueued.
#[derive(Debug, Default)]
pub struct TraversalSession {
    frontier: VecDeque<Identity>,
    visited: HashSet<String>,
}

impl TraversalSession {
    pub fn new(seeds: impl IntoIterator<Item = Identity>) -> Self {
        Self {
            frontier: seeds.into_iter().collect(),
            visited: HashSet::new(),
        }
    }

    pub fn enqueue(&mut self, identity: Identity) {
        self.frontier.push_back(identity);
    }

    /// Dequeues the next identity whose label has not been processed yet
    ///
    /// Already-visited identities are dropped. The returned identity's label
    /// is marked visited in the same step.
    pub fn next_unvisited(&mut self) -> Option<Identity> {
        while let Some(identity) = self.frontier.pop_front() {
            if self.visited.insert(identity.label().to_string()) {
                return Some(identity);
            }
            tracing::debug!(identity = %identity.label(), "Skipping already processed identity");
        }
        None
    }

    pub fn is_visited(&self, label: &str) -> bool {
        self.visited.contains(label)
    }

    pub fn visited_count(&self) -> usize {
        self.visited.len()
    }

    pub fn pending_count(&self) -> usize {
        self.frontier.len()
    }
}
