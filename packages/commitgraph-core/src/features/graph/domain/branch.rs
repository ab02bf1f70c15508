/// Branch identities
use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque branch id; only used for grouping and coloring
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BranchId(u64);

impl BranchId {
    pub fn value(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for BranchId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "b{}", self.0)
    }
}

/// A branch segment shared by the nodes and edges drawn in one color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Branch {
    id: BranchId,
}

impl Branch {
    pub fn id(&self) -> BranchId {
        self.id
    }
}

/// Hands out strictly increasing branch ids
///
/// Passed into the graph builder instead of living in a static, so two
/// graphs (or two tests) never share a counter.
#[derive(Debug, Default)]
pub struct BranchIdAllocator {
    next: u64,
}

impl BranchIdAllocator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next_branch(&mut self) -> Branch {
        let id = BranchId(self.next);
        self.next += 1;
        Branch { id }
    }

    /// Number of branches handed out since the last reset
    pub fn allocated(&self) -> u64 {
        self.next
    }

    /// Restart numbering at zero
    pub fn reset(&mut self) {
        self.next = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_increase() {
        let mut allocator = BranchIdAllocator::new();
        let a = allocator.next_branch();
        let b = allocator.next_branch();
        assert!(a.id() < b.id());
        assert_ne!(a, b);
        assert_eq!(allocator.allocated(), 2);
    }

    #[test]
    fn test_reset_restarts_numbering() {
        let mut allocator = BranchIdAllocator::new();
        let first = allocator.next_branch();
        allocator.next_branch();
        allocator.reset();
        assert_eq!(allocator.next_branch().id(), first.id());
    }

    #[test]
    fn test_separate_allocators_are_independent() {
        let mut a = BranchIdAllocator::new();
        let mut b = BranchIdAllocator::new();
        a.next_branch();
        a.next_branch();
        assert_eq!(b.next_branch().id().value(), 0);
        assert_eq!(BranchId(3).to_string(), "b3");
    }
}
