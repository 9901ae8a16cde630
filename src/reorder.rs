//! Category Reorder
//!
//! Order math on the model list and the optimistic two-phase session that
//! wraps a `PUT /categories/sort-order` round trip.

use leptos_dragdrop::DropTarget;
use crate::models::{Category, SortOrderEntry};

/// Move `dragged` to `target`. Unknown ids leave the order unchanged.
pub fn reorder(categories: &[Category], dragged: u32, target: DropTarget) -> Vec<Category> {
    let mut list = categories.to_vec();
    let Some(from) = list.iter().position(|c| c.id == dragged) else {
        return list;
    };
    if target == DropTarget::Before(dragged) {
        return list;
    }
    let moved = list.remove(from);
    let to = match target {
        DropTarget::Before(id) => match list.iter().position(|c| c.id == id) {
            Some(pos) => pos,
            None => {
                list.insert(from, moved);
                return list;
            }
        },
        DropTarget::End => list.len(),
    };
    list.insert(to, moved);
    list
}

/// Assign `sort_order = position + 1`.
pub fn with_dense_sort_order(mut categories: Vec<Category>) -> Vec<Category> {
    for (i, c) in categories.iter_mut().enumerate() {
        c.sort_order = i as i32 + 1;
    }
    categories
}

pub fn sort_order_entries(categories: &[Category]) -> Vec<SortOrderEntry> {
    categories
        .iter()
        .enumerate()
        .map(|(i, c)| SortOrderEntry { id: c.id, sort_order: i as i32 + 1 })
        .collect()
}

fn same_order(a: &[Category], b: &[Category]) -> bool {
    a.len() == b.len() && a.iter().zip(b).all(|(x, y)| x.id == y.id)
}

/// Committed order plus an optional tentative one awaiting the server.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReorderSession {
    committed: Vec<Category>,
    tentative: Option<Vec<Category>>,
}

impl ReorderSession {
    pub fn new(categories: Vec<Category>) -> Self {
        Self { committed: categories, tentative: None }
    }

    /// What the list should show right now
    pub fn visible(&self) -> &[Category] {
        self.tentative.as_deref().unwrap_or(&self.committed)
    }

    pub fn is_pending(&self) -> bool {
        self.tentative.is_some()
    }

    /// Replace the committed list with a fresh server copy.
    pub fn replace(&mut self, categories: Vec<Category>) {
        self.committed = categories;
        self.tentative = None;
    }

    /// Start a reorder. Returns the batch to submit, or None when the drop
    /// does not change the order or another reorder is still in flight.
    pub fn propose(&mut self, dragged: u32, target: DropTarget) -> Option<Vec<SortOrderEntry>> {
        if self.is_pending() {
            return None;
        }
        let next = reorder(&self.committed, dragged, target);
        if same_order(&next, &self.committed) {
            return None;
        }
        let next = with_dense_sort_order(next);
        let entries = sort_order_entries(&next);
        self.tentative = Some(next);
        Some(entries)
    }

    /// Server accepted the batch.
    pub fn confirm(&mut self) {
        if let Some(next) = self.tentative.take() {
            self.committed = next;
        }
    }

    /// Server rejected the batch; back to the pre-drag order.
    pub fn rollback(&mut self) {
        self.tentative = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cat(id: u32, sort_order: i32) -> Category {
        Category { id, name: format!("c{}", id), description: None, sort_order }
    }

    fn ids(list: &[Category]) -> Vec<u32> {
        list.iter().map(|c| c.id).collect()
    }

    fn sample() -> Vec<Category> {
        vec![cat(1, 1), cat(2, 2), cat(3, 3), cat(4, 4)]
    }

    #[test]
    fn test_reorder_before_and_end() {
        assert_eq!(ids(&reorder(&sample(), 4, DropTarget::Before(2))), vec![1, 4, 2, 3]);
        assert_eq!(ids(&reorder(&sample(), 1, DropTarget::Before(4))), vec![2, 3, 1, 4]);
        assert_eq!(ids(&reorder(&sample(), 2, DropTarget::End)), vec![1, 3, 4, 2]);
    }

    #[test]
    fn test_reorder_no_ops() {
        assert_eq!(ids(&reorder(&sample(), 2, DropTarget::Before(2))), vec![1, 2, 3, 4]);
        assert_eq!(ids(&reorder(&sample(), 2, DropTarget::Before(3))), vec![1, 2, 3, 4]);
        assert_eq!(ids(&reorder(&sample(), 9, DropTarget::End)), vec![1, 2, 3, 4]);
        assert_eq!(ids(&reorder(&sample(), 2, DropTarget::Before(9))), vec![1, 2, 3, 4]);
    }

    #[test]
    fn test_dense_sort_order() {
        let entries = sort_order_entries(&reorder(&sample(), 3, DropTarget::Before(1)));
        assert_eq!(
            entries,
            vec![
                SortOrderEntry { id: 3, sort_order: 1 },
                SortOrderEntry { id: 1, sort_order: 2 },
                SortOrderEntry { id: 2, sort_order: 3 },
                SortOrderEntry { id: 4, sort_order: 4 },
            ]
        );
    }

    #[test]
    fn test_unchanged_order_sends_nothing() {
        let mut session = ReorderSession::new(sample());
        assert_eq!(session.propose(4, DropTarget::End), None);
        assert!(!session.is_pending());
    }

    #[test]
    fn test_confirmed_reorder_sticks() {
        let mut session = ReorderSession::new(sample());
        assert!(session.propose(1, DropTarget::End).is_some());
        assert_eq!(ids(session.visible()), vec![2, 3, 4, 1]);
        session.confirm();
        assert!(!session.is_pending());
        assert_eq!(ids(session.visible()), vec![2, 3, 4, 1]);
        assert_eq!(session.visible()[0].sort_order, 1);
    }

    #[test]
    fn test_rejected_reorder_restores_pre_drag_order() {
        let mut session = ReorderSession::new(sample());
        session.propose(1, DropTarget::End);
        assert_eq!(ids(session.visible()), vec![2, 3, 4, 1]);
        session.rollback();
        assert_eq!(session.visible(), sample().as_slice());
    }

    #[test]
    fn test_second_drop_while_pending_is_ignored() {
        let mut session = ReorderSession::new(sample());
        session.propose(1, DropTarget::End);
        assert_eq!(session.propose(2, DropTarget::End), None);
        assert_eq!(ids(session.visible()), vec![2, 3, 4, 1]);
    }
}
