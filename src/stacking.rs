//! Per-space view lists.
//!
//! Every space that has views owns one [`StackingList`]. Each entry has two positions:
//!
//! * its place in the stacking (z) order, from the back to the topmost view;
//! * its place in the tiling order, from the master to the bottom of the stack, which is also the
//!   order [`cycle`](crate::session::Session::cycle) rotates.
//!
//! Both orders always contain exactly the same views. Appending and removing affect both, while
//! raising only moves a view in the z order and rotating only moves it in the tiling order.
//!
//! The orders are intrusive doubly-linked lists keyed by [`ViewId`], so every mutation is O(1)
//! given the handle of the view being moved.

use std::collections::HashMap;

use crate::view::ViewId;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct Link {
    prev: Option<ViewId>,
    next: Option<ViewId>,
}

/// A doubly-linked order over view handles.
#[derive(Debug, Clone, Default)]
pub struct Order {
    head: Option<ViewId>,
    tail: Option<ViewId>,
    links: HashMap<ViewId, Link>,
}

impl Order {
    pub fn len(&self) -> usize {
        self.links.len()
    }

    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }

    pub fn contains(&self, id: ViewId) -> bool {
        self.links.contains_key(&id)
    }

    pub fn first(&self) -> Option<ViewId> {
        self.head
    }

    pub fn last(&self) -> Option<ViewId> {
        self.tail
    }

    /// Entry after `id`, towards the tail.
    pub fn next(&self, id: ViewId) -> Option<ViewId> {
        self.links.get(&id)?.next
    }

    /// Entry before `id`, towards the head.
    pub fn prev(&self, id: ViewId) -> Option<ViewId> {
        self.links.get(&id)?.prev
    }

    /// Like [`Order::next()`], but wraps from the tail to the head.
    pub fn next_wrapping(&self, id: ViewId) -> Option<ViewId> {
        if !self.contains(id) {
            return None;
        }
        self.next(id).or(self.head)
    }

    /// Like [`Order::prev()`], but wraps from the head to the tail.
    pub fn prev_wrapping(&self, id: ViewId) -> Option<ViewId> {
        if !self.contains(id) {
            return None;
        }
        self.prev(id).or(self.tail)
    }

    pub fn push_back(&mut self, id: ViewId) {
        debug_assert!(!self.contains(id));

        let link = Link {
            prev: self.tail,
            next: None,
        };
        match self.tail {
            Some(tail) => self.link_mut(tail).next = Some(id),
            None => self.head = Some(id),
        }
        self.tail = Some(id);
        self.links.insert(id, link);
    }

    pub fn push_front(&mut self, id: ViewId) {
        debug_assert!(!self.contains(id));

        let link = Link {
            prev: None,
            next: self.head,
        };
        match self.head {
            Some(head) => self.link_mut(head).prev = Some(id),
            None => self.tail = Some(id),
        }
        self.head = Some(id);
        self.links.insert(id, link);
    }

    /// Unlinks `id`. Returns whether it was present.
    pub fn remove(&mut self, id: ViewId) -> bool {
        let Some(link) = self.links.remove(&id) else {
            return false;
        };

        match link.prev {
            Some(prev) => self.link_mut(prev).next = link.next,
            None => self.head = link.next,
        }
        match link.next {
            Some(next) => self.link_mut(next).prev = link.prev,
            None => self.tail = link.prev,
        }

        true
    }

    /// Moves `id` to the tail. Returns whether it was present.
    pub fn move_to_back(&mut self, id: ViewId) -> bool {
        if self.tail == Some(id) {
            return self.contains(id);
        }
        if !self.remove(id) {
            return false;
        }
        self.push_back(id);
        true
    }

    /// Moves the tail entry to the head and returns it.
    pub fn rotate_tail_to_head(&mut self) -> Option<ViewId> {
        let tail = self.tail?;
        if self.head != Some(tail) {
            self.remove(tail);
            self.push_front(tail);
        }
        Some(tail)
    }

    /// Iterates from the head to the tail; reverse for tail to head.
    pub fn iter(&self) -> Iter<'_> {
        Iter {
            order: self,
            front: self.head,
            back: self.tail,
            done: self.head.is_none(),
        }
    }

    fn link_mut(&mut self, id: ViewId) -> &mut Link {
        self.links
            .get_mut(&id)
            .expect("linked neighbor must be present")
    }

    #[cfg(test)]
    pub fn verify_invariants(&self) {
        let forward: Vec<_> = self.iter().collect();
        let mut backward: Vec<_> = self.iter().rev().collect();
        backward.reverse();

        assert_eq!(forward, backward, "forward and backward walks must agree");
        assert_eq!(forward.len(), self.links.len(), "every link must be reachable");
        assert_eq!(self.head.is_none(), self.tail.is_none());
        if let Some(head) = self.head {
            assert_eq!(self.links[&head].prev, None);
        }
        if let Some(tail) = self.tail {
            assert_eq!(self.links[&tail].next, None);
        }
    }
}

#[derive(Debug, Clone)]
pub struct Iter<'a> {
    order: &'a Order,
    front: Option<ViewId>,
    back: Option<ViewId>,
    done: bool,
}

impl Iterator for Iter<'_> {
    type Item = ViewId;

    fn next(&mut self) -> Option<ViewId> {
        if self.done {
            return None;
        }
        let id = self.front?;
        if self.front == self.back {
            self.done = true;
        } else {
            self.front = self.order.next(id);
        }
        Some(id)
    }
}

impl DoubleEndedIterator for Iter<'_> {
    fn next_back(&mut self) -> Option<ViewId> {
        if self.done {
            return None;
        }
        let id = self.back?;
        if self.front == self.back {
            self.done = true;
        } else {
            self.back = self.order.prev(id);
        }
        Some(id)
    }
}

/// The views of one space, in stacking and in tiling order.
#[derive(Debug, Clone, Default)]
pub struct StackingList {
    /// Back to front; the tail is the topmost view.
    z: Order,
    /// Master first.
    tiling: Order,
}

impl StackingList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.z.len()
    }

    pub fn is_empty(&self) -> bool {
        self.z.is_empty()
    }

    pub fn contains(&self, id: ViewId) -> bool {
        self.z.contains(id)
    }

    /// Adds a view on top of the stack and at the end of the tiling order.
    pub fn push(&mut self, id: ViewId) {
        if self.contains(id) {
            return;
        }
        self.z.push_back(id);
        self.tiling.push_back(id);
    }

    pub fn remove(&mut self, id: ViewId) -> bool {
        let removed = self.z.remove(id);
        self.tiling.remove(id);
        removed
    }

    /// Brings the view to the front of the stacking order.
    pub fn raise(&mut self, id: ViewId) -> bool {
        self.z.move_to_back(id)
    }

    /// Moves the last view in tiling order to the master position and returns it.
    pub fn rotate(&mut self) -> Option<ViewId> {
        self.tiling.rotate_tail_to_head()
    }

    pub fn stacking(&self) -> &Order {
        &self.z
    }

    pub fn tiling(&self) -> &Order {
        &self.tiling
    }

    pub fn topmost(&self) -> Option<ViewId> {
        self.z.last()
    }

    /// The view directly behind `id` in stacking order.
    pub fn below(&self, id: ViewId) -> Option<ViewId> {
        self.z.prev(id)
    }

    #[cfg(test)]
    pub fn verify_invariants(&self) {
        self.z.verify_invariants();
        self.tiling.verify_invariants();

        assert_eq!(self.z.len(), self.tiling.len());
        for id in self.z.iter() {
            assert!(self.tiling.contains(id), "{id} missing from tiling order");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(order: &Order) -> Vec<u64> {
        order.iter().map(|id| id.0).collect()
    }

    fn list(n: u64) -> StackingList {
        let mut list = StackingList::new();
        for i in 1..=n {
            list.push(ViewId(i));
        }
        list
    }

    #[test]
    fn push_appends_to_both_orders() {
        let list = list(3);
        assert_eq!(ids(list.stacking()), [1, 2, 3]);
        assert_eq!(ids(list.tiling()), [1, 2, 3]);
        assert_eq!(list.topmost(), Some(ViewId(3)));
        list.verify_invariants();
    }

    #[test]
    fn raise_moves_only_stacking_order() {
        let mut list = list(3);
        assert!(list.raise(ViewId(1)));
        assert_eq!(ids(list.stacking()), [2, 3, 1]);
        assert_eq!(ids(list.tiling()), [1, 2, 3]);
        list.verify_invariants();

        assert!(!list.raise(ViewId(7)));
    }

    #[test]
    fn rotate_moves_tail_to_head() {
        let mut list = list(3);
        assert_eq!(list.rotate(), Some(ViewId(3)));
        assert_eq!(ids(list.tiling()), [3, 1, 2]);
        assert_eq!(ids(list.stacking()), [1, 2, 3]);

        list.rotate();
        list.rotate();
        assert_eq!(ids(list.tiling()), [1, 2, 3]);
        list.verify_invariants();
    }

    #[test]
    fn remove_unlinks_from_both_orders() {
        let mut list = list(3);
        list.raise(ViewId(2));
        assert!(list.remove(ViewId(2)));
        assert!(!list.remove(ViewId(2)));
        assert_eq!(ids(list.stacking()), [1, 3]);
        assert_eq!(ids(list.tiling()), [1, 3]);
        list.verify_invariants();

        list.remove(ViewId(1));
        list.remove(ViewId(3));
        assert!(list.is_empty());
        assert_eq!(list.topmost(), None);
        list.verify_invariants();
    }

    #[test]
    fn reverse_iteration() {
        let list = list(4);
        let rev: Vec<_> = list.stacking().iter().rev().map(|id| id.0).collect();
        assert_eq!(rev, [4, 3, 2, 1]);

        let mut iter = list.stacking().iter();
        assert_eq!(iter.next(), Some(ViewId(1)));
        assert_eq!(iter.next_back(), Some(ViewId(4)));
        assert_eq!(iter.next(), Some(ViewId(2)));
        assert_eq!(iter.next_back(), Some(ViewId(3)));
        assert_eq!(iter.next(), None);
        assert_eq!(iter.next_back(), None);
    }

    #[test]
    fn neighbors() {
        let list = list(3);
        let order = list.tiling();
        assert_eq!(order.next(ViewId(1)), Some(ViewId(2)));
        assert_eq!(order.next(ViewId(3)), None);
        assert_eq!(order.next_wrapping(ViewId(3)), Some(ViewId(1)));
        assert_eq!(order.prev_wrapping(ViewId(1)), Some(ViewId(3)));
        assert_eq!(order.prev_wrapping(ViewId(9)), None);

        assert_eq!(list.below(ViewId(2)), Some(ViewId(1)));
        assert_eq!(list.below(ViewId(1)), None);
    }

    #[test]
    fn single_entry_wraps_to_itself() {
        let list = list(1);
        assert_eq!(list.tiling().next_wrapping(ViewId(1)), Some(ViewId(1)));
        assert_eq!(list.tiling().prev_wrapping(ViewId(1)), Some(ViewId(1)));
    }

    #[test]
    fn duplicate_push_is_ignored() {
        let mut list = list(2);
        list.push(ViewId(1));
        assert_eq!(list.len(), 2);
        list.verify_invariants();
    }
}
