use std::collections::HashMap;

use super::arena::Arena;
use super::handle::Handle;
use crate::Key;

/// One node of the ring: the owning key, its neighbours and the payload.
#[derive(Clone)]
struct Link<V> {
    key: Key,
    prev: Handle,
    next: Handle,
    value: V,
}

/// The circular doubly-linked chain backing `XHash`.
///
/// Links refer to their neighbours by arena handle, never by reference, so the
/// ring owns no cycles. The first link is always `last.next`.
#[derive(Clone)]
pub(crate) struct RawRing<V> {
    /// Arena storing every live link.
    links: Arena<Link<V>>,
    /// Key to link lookup.
    index: HashMap<Key, Handle>,
    /// Tail of the ring, `None` iff the ring is empty.
    last: Option<Handle>,
}

impl<V> RawRing<V> {
    pub(crate) fn new() -> Self {
        Self {
            links: Arena::new(),
            index: HashMap::new(),
            last: None,
        }
    }

    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            links: Arena::with_capacity(capacity),
            index: HashMap::with_capacity(capacity),
            last: None,
        }
    }

    pub(crate) fn capacity(&self) -> usize {
        self.links.capacity()
    }

    pub(crate) fn len(&self) -> usize {
        self.index.len()
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.last.is_none()
    }

    /// Drops every link and returns to the empty state.
    pub(crate) fn clear(&mut self) {
        self.links.clear();
        self.index.clear();
        self.last = None;
    }

    pub(crate) fn find(&self, key: &Key) -> Option<Handle> {
        self.index.get(key).copied()
    }

    pub(crate) fn first(&self) -> Option<Handle> {
        self.last.map(|last| self.links.get(last).next)
    }

    pub(crate) fn last(&self) -> Option<Handle> {
        self.last
    }

    /// Successor of `handle`, or `None` once the tail is reached.
    pub(crate) fn next(&self, handle: Handle) -> Option<Handle> {
        if self.last == Some(handle) {
            None
        } else {
            Some(self.links.get(handle).next)
        }
    }

    /// Predecessor of `handle`, or `None` at the head.
    pub(crate) fn prev(&self, handle: Handle) -> Option<Handle> {
        if self.first() == Some(handle) {
            None
        } else {
            Some(self.links.get(handle).prev)
        }
    }

    pub(crate) fn key(&self, handle: Handle) -> &Key {
        &self.links.get(handle).key
    }

    pub(crate) fn value(&self, handle: Handle) -> &V {
        &self.links.get(handle).value
    }

    pub(crate) fn value_mut(&mut self, handle: Handle) -> &mut V {
        &mut self.links.get_mut(handle).value
    }

    /// Appends a new link at the tail. `key` must not already be present.
    pub(crate) fn push_back(&mut self, key: Key, value: V) -> Handle {
        match self.last {
            Some(last) => self.insert_after(last, key, value),
            None => {
                let handle = self.allocate(key, value);
                self.splice(handle, handle, handle);
                self.last = Some(handle);
                handle
            }
        }
    }

    /// Links a new entry directly after `anchor`. `key` must not already be present.
    pub(crate) fn insert_after(&mut self, anchor: Handle, key: Key, value: V) -> Handle {
        let handle = self.allocate(key, value);
        let next = self.links.get(anchor).next;
        self.splice(handle, anchor, next);
        if self.last == Some(anchor) {
            self.last = Some(handle);
        }
        handle
    }

    /// Links a new entry directly before `anchor`. `key` must not already be present.
    pub(crate) fn insert_before(&mut self, anchor: Handle, key: Key, value: V) -> Handle {
        let handle = self.allocate(key, value);
        let prev = self.links.get(anchor).prev;
        self.splice(handle, prev, anchor);
        handle
    }

    /// Relinks `handle` directly after `anchor`.
    pub(crate) fn move_after(&mut self, anchor: Handle, handle: Handle) {
        if anchor == handle {
            return;
        }
        self.detach(handle);
        let next = self.links.get(anchor).next;
        self.splice(handle, anchor, next);
        if self.last == Some(anchor) {
            self.last = Some(handle);
        }
    }

    /// Relinks `handle` directly before `anchor`.
    pub(crate) fn move_before(&mut self, anchor: Handle, handle: Handle) {
        if anchor == handle {
            return;
        }
        self.detach(handle);
        let prev = self.links.get(anchor).prev;
        self.splice(handle, prev, anchor);
    }

    /// Unlinks and frees `handle`, returning its key and value.
    ///
    /// Removing the sole link resets the ring instead of leaving a
    /// self-referencing node behind.
    pub(crate) fn remove(&mut self, handle: Handle) -> (Key, V) {
        let link = if self.index.len() == 1 {
            let link = self.links.remove(handle);
            self.clear();
            link
        } else {
            self.detach(handle);
            let link = self.links.remove(handle);
            self.index.remove(&link.key);
            link
        };
        (link.key, link.value)
    }

    /// Gives every listed link a new key. Ring positions are untouched.
    ///
    /// The caller guarantees the new keys are distinct from each other and
    /// from every key that is not being renamed.
    pub(crate) fn rename_all(&mut self, renames: Vec<(Handle, Key)>) {
        for (handle, _) in &renames {
            let old = &self.links.get(*handle).key;
            self.index.remove(old);
        }
        for (handle, key) in renames {
            self.index.insert(key.clone(), handle);
            self.links.get_mut(handle).key = key;
        }
    }

    fn allocate(&mut self, key: Key, value: V) -> Handle {
        debug_assert!(!self.index.contains_key(&key), "`RawRing::allocate()` - duplicate key `{key}`");
        let handle = self.links.insert(Link {
            key: key.clone(),
            prev: Handle::UNLINKED,
            next: Handle::UNLINKED,
            value,
        });
        self.index.insert(key, handle);
        handle
    }

    fn splice(&mut self, handle: Handle, prev: Handle, next: Handle) {
        {
            let link = self.links.get_mut(handle);
            link.prev = prev;
            link.next = next;
        }
        self.links.get_mut(prev).next = handle;
        self.links.get_mut(next).prev = handle;
    }

    /// Closes the gap around `handle`. The ring must hold at least two links.
    fn detach(&mut self, handle: Handle) {
        let (prev, next) = {
            let link = self.links.get(handle);
            (link.prev, link.next)
        };
        self.links.get_mut(prev).next = next;
        self.links.get_mut(next).prev = prev;
        if self.last == Some(handle) {
            self.last = Some(prev);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    impl<V> RawRing<V> {
        /// Panics if the ring, the arena and the key index disagree.
        pub(crate) fn validate_invariants(&self) {
            let Some(last) = self.last else {
                assert_eq!(self.index.len(), 0, "empty ring should have no keys");
                assert_eq!(self.links.len(), 0, "empty ring should have no links");
                return;
            };

            assert_eq!(self.links.len(), self.index.len(), "arena and index disagree on len");

            let first = self.links.get(last).next;
            let mut seen = 0;
            let mut cursor = first;
            loop {
                let link = self.links.get(cursor);
                assert_eq!(self.links.get(link.next).prev, cursor, "{}.prev does not point back at {cursor}", link.next);
                assert_eq!(self.links.get(link.prev).next, cursor, "{}.next does not point back at {cursor}", link.prev);
                assert_eq!(self.index.get(&link.key), Some(&cursor), "index misses key `{}` at {cursor}", link.key);
                seen += 1;
                assert!(seen <= self.index.len(), "ring is longer than the index");
                if cursor == last {
                    break;
                }
                cursor = link.next;
            }
            assert_eq!(seen, self.index.len(), "ring does not visit every key");
            assert_eq!(self.links.get(last).next, first, "ring is not closed");
        }

        fn keys_in_order(&self) -> Vec<Key> {
            let mut keys = Vec::new();
            let mut cursor = self.first();
            while let Some(handle) = cursor {
                keys.push(self.key(handle).clone());
                cursor = self.next(handle);
            }
            keys
        }
    }

    #[test]
    fn single_link_points_at_itself() {
        let mut ring = RawRing::new();
        let a = ring.push_back(Key::from("a"), 1);
        assert_eq!(ring.first(), Some(a));
        assert_eq!(ring.last(), Some(a));
        assert_eq!(ring.next(a), None);
        assert_eq!(ring.prev(a), None);
        ring.validate_invariants();
    }

    #[test]
    fn removing_sole_link_resets() {
        let mut ring = RawRing::new();
        let a = ring.push_back(Key::from("a"), 1);
        assert_eq!(ring.remove(a), (Key::from("a"), 1));
        assert!(ring.is_empty());
        assert_eq!(ring.first(), None);
        ring.validate_invariants();
    }

    #[test]
    fn moves_keep_ring_closed() {
        let mut ring = RawRing::new();
        let a = ring.push_back(Key::from("a"), ());
        let b = ring.push_back(Key::from("b"), ());
        let c = ring.push_back(Key::from("c"), ());

        ring.move_before(a, c);
        assert_eq!(ring.keys_in_order(), [Key::from("c"), Key::from("a"), Key::from("b")]);
        ring.validate_invariants();

        ring.move_after(b, c);
        assert_eq!(ring.keys_in_order(), [Key::from("a"), Key::from("b"), Key::from("c")]);
        assert_eq!(ring.last(), Some(c));
        ring.validate_invariants();

        ring.move_after(a, c);
        assert_eq!(ring.keys_in_order(), [Key::from("a"), Key::from("c"), Key::from("b")]);
        assert_eq!(ring.last(), Some(b));
        ring.validate_invariants();
    }

    #[test]
    fn rename_all_allows_swaps() {
        let mut ring = RawRing::new();
        let zero = ring.push_back(Key::Index(0), "x");
        let one = ring.push_back(Key::Index(1), "y");
        ring.rename_all(vec![(zero, Key::Index(1)), (one, Key::Index(0))]);

        assert_eq!(ring.keys_in_order(), [Key::Index(1), Key::Index(0)]);
        assert_eq!(ring.find(&Key::Index(0)), Some(one));
        ring.validate_invariants();
    }

    #[derive(Clone, Debug)]
    enum Op {
        PushBack(u8),
        InsertAfter(usize, u8),
        InsertBefore(usize, u8),
        MoveAfter(usize, usize),
        MoveBefore(usize, usize),
        Remove(usize),
    }

    fn op() -> impl Strategy<Value = Op> {
        prop_oneof![
            6 => any::<u8>().prop_map(Op::PushBack),
            3 => (any::<usize>(), any::<u8>()).prop_map(|(at, key)| Op::InsertAfter(at, key)),
            3 => (any::<usize>(), any::<u8>()).prop_map(|(at, key)| Op::InsertBefore(at, key)),
            3 => (any::<usize>(), any::<usize>()).prop_map(|(at, which)| Op::MoveAfter(at, which)),
            3 => (any::<usize>(), any::<usize>()).prop_map(|(at, which)| Op::MoveBefore(at, which)),
            4 => any::<usize>().prop_map(Op::Remove),
        ]
    }

    proptest! {
        #[test]
        fn ring_matches_vec_model(ops in prop::collection::vec(op(), 0..256)) {
            let mut ring: RawRing<()> = RawRing::new();
            let mut model: Vec<Key> = Vec::new();

            for op in ops {
                match op {
                    Op::PushBack(k) => {
                        let key = Key::Index(i64::from(k));
                        if ring.find(&key).is_none() {
                            ring.push_back(key.clone(), ());
                            model.push(key);
                        }
                    }
                    Op::InsertAfter(at, k) | Op::InsertBefore(at, k) if !model.is_empty() => {
                        let key = Key::Index(i64::from(k));
                        if ring.find(&key).is_some() {
                            continue;
                        }
                        let at = at % model.len();
                        let anchor = ring.find(&model[at]).unwrap();
                        if matches!(op, Op::InsertAfter(..)) {
                            ring.insert_after(anchor, key.clone(), ());
                            model.insert(at + 1, key);
                        } else {
                            ring.insert_before(anchor, key.clone(), ());
                            model.insert(at, key);
                        }
                    }
                    Op::MoveAfter(at, which) | Op::MoveBefore(at, which) if !model.is_empty() => {
                        let anchor_key = model[at % model.len()].clone();
                        let moved_key = model[which % model.len()].clone();
                        if anchor_key == moved_key {
                            continue;
                        }
                        let anchor = ring.find(&anchor_key).unwrap();
                        let moved = ring.find(&moved_key).unwrap();
                        model.retain(|k| *k != moved_key);
                        let pos = model.iter().position(|k| *k == anchor_key).unwrap();
                        if matches!(op, Op::MoveAfter(..)) {
                            ring.move_after(anchor, moved);
                            model.insert(pos + 1, moved_key);
                        } else {
                            ring.move_before(anchor, moved);
                            model.insert(pos, moved_key);
                        }
                    }
                    Op::Remove(which) if !model.is_empty() => {
                        let key = model.remove(which % model.len());
                        let handle = ring.find(&key).unwrap();
                        prop_assert_eq!(ring.remove(handle).0, key);
                    }
                    _ => {}
                }

                ring.validate_invariants();
                prop_assert_eq!(ring.keys_in_order(), model.clone());
            }
        }
    }
}
