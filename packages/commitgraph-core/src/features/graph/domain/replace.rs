//! Row change descriptors
//!
//! A [`Replace`] tells a view which slice of its row list to swap out:
//! rows `from .. from + removed_count` (old indices) are replaced by
//! `added_count` rows. Rows before `from` and from `to()` on are untouched.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Replace {
    from: usize,
    removed_count: usize,
    added_count: usize,
}

impl Replace {
    pub fn new(from: usize, removed_count: usize, added_count: usize) -> Self {
        Self {
            from,
            removed_count,
            added_count,
        }
    }

    /// Nothing changed
    pub fn empty() -> Self {
        Self::new(0, 0, 0)
    }

    /// Rows strictly between two unchanged boundary rows
    ///
    /// `up_row`/`down_row` are old indices; `new_down_row` is the down
    /// boundary's index after the change.
    pub fn between(up_row: usize, down_row: usize, new_down_row: usize) -> Self {
        Self::new(up_row + 1, down_row - up_row - 1, new_down_row - up_row - 1)
    }

    /// Whole table rebuilt
    pub fn whole(old_len: usize, new_len: usize) -> Self {
        Self::new(0, old_len, new_len)
    }

    /// First changed row
    pub fn from(&self) -> usize {
        self.from
    }

    /// End (exclusive) of the replaced rows, in old indices
    pub fn to(&self) -> usize {
        self.from + self.removed_count
    }

    pub fn removed_count(&self) -> usize {
        self.removed_count
    }

    pub fn added_count(&self) -> usize {
        self.added_count
    }

    pub fn is_empty(&self) -> bool {
        self.removed_count == 0 && self.added_count == 0
    }

    /// Patch a rendered row list; `fresh` yields the new rows for the range
    pub fn apply<T>(&self, rows: &mut Vec<T>, fresh: impl IntoIterator<Item = T>) {
        rows.splice(self.from..self.to(), fresh.into_iter().take(self.added_count));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_between_collapse() {
        // rows 0 (up) .. 4 (down), three rows in between vanish
        let replace = Replace::between(0, 4, 1);
        assert_eq!(replace.from(), 1);
        assert_eq!(replace.to(), 4);
        assert_eq!(replace.removed_count(), 3);
        assert_eq!(replace.added_count(), 0);
    }

    #[test]
    fn test_empty() {
        assert!(Replace::empty().is_empty());
        assert!(!Replace::whole(3, 3).is_empty());
        assert!(Replace::between(2, 3, 3).is_empty());
    }

    #[test]
    fn test_apply_patches_slice() {
        let mut rows = vec!["a", "b", "c", "d"];
        Replace::new(1, 2, 1).apply(&mut rows, ["x"]);
        assert_eq!(rows, vec!["a", "x", "d"]);
    }

    #[test]
    fn test_apply_whole() {
        let mut rows = vec![1, 2];
        Replace::whole(2, 3).apply(&mut rows, vec![7, 8, 9]);
        assert_eq!(rows, vec![7, 8, 9]);
    }
}
