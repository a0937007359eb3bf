//! Pending frontier of deferred template occurrences

use super::types::PendingNode;

/// Depth-ordered stack of templates whose instances are not yet known
#[derive(Debug, Default)]
pub struct PendingFrontier {
    stack: Vec<PendingNode>,
}

impl PendingFrontier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Defer a template occurrence
    pub fn push(&mut self, node: PendingNode) {
        self.stack.push(node);
    }

    /// Take the pending descendants of a template found at `depth`
    ///
    /// Pops entries strictly deeper than `depth` and returns them in original
    /// forest order. The first entry at or above `depth` belongs to an outer
    /// scope and stays on the frontier.
    pub fn collect_descendants(&mut self, depth: u32) -> Vec<PendingNode> {
        let mut collected = Vec::new();
        while let Some(node) = self.stack.pop() {
            if node.depth <= depth {
                self.stack.push(node);
                break;
            }
            collected.push(node);
        }
        collected.reverse();
        collected
    }

    /// Number of deferred occurrences
    pub fn len(&self) -> usize {
        self.stack.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stack.is_empty()
    }

    /// Occurrences left unresolved at the end of a scan, bottom first
    pub fn into_unresolved(self) -> Vec<PendingNode> {
        self.stack
    }
}
