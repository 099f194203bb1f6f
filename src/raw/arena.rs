use super::handle::Handle;

/// Slot storage for ring links.
///
/// Vacated slots are recycled before the backing vector grows, so handles are
/// stable for as long as the element they name is alive.
#[derive(Clone)]
pub(crate) struct Arena<T> {
    slots: Vec<Option<T>>,
    vacant: Vec<Handle>,
}

impl<T> Arena<T> {
    pub(crate) const fn new() -> Self {
        Self {
            slots: Vec::new(),
            vacant: Vec::new(),
        }
    }

    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: Vec::with_capacity(capacity),
            vacant: Vec::new(),
        }
    }

    pub(crate) fn capacity(&self) -> usize {
        self.slots.capacity()
    }

    pub(crate) const fn len(&self) -> usize {
        self.slots.len().saturating_sub(self.vacant.len())
    }

    pub(crate) fn insert(&mut self, element: T) -> Handle {
        if let Some(handle) = self.vacant.pop() {
            self.slots[handle.slot()] = Some(element);
            return handle;
        }

        let Some(handle) = Handle::try_from_slot(self.slots.len()) else {
            panic!("`Arena::insert()` - arena is at maximum capacity ({})", Handle::MAX);
        };
        self.slots.push(Some(element));
        handle
    }

    #[inline]
    pub(crate) fn get(&self, handle: Handle) -> &T {
        self.slots[handle.slot()].as_ref().expect("`Arena::get()` - `handle` is vacant!")
    }

    #[inline]
    pub(crate) fn get_mut(&mut self, handle: Handle) -> &mut T {
        self.slots[handle.slot()].as_mut().expect("`Arena::get_mut()` - `handle` is vacant!")
    }

    pub(crate) fn remove(&mut self, handle: Handle) -> T {
        let element = self.slots[handle.slot()].take().expect("`Arena::remove()` - `handle` is vacant!");
        self.vacant.push(handle);
        element
    }

    pub(crate) fn clear(&mut self) {
        self.slots.clear();
        self.vacant.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn vacated_slot_is_reused() {
        let mut arena = Arena::new();
        let a = arena.insert("a");
        let b = arena.insert("b");
        assert_eq!(arena.remove(a), "a");

        let c = arena.insert("c");
        assert_eq!(c, a);
        assert_eq!(*arena.get(b), "b");
        assert_eq!(*arena.get(c), "c");
        assert_eq!(arena.len(), 2);
    }

    #[test]
    #[should_panic(expected = "`Arena::get()` - `handle` is vacant!")]
    fn reading_removed_slot_panics() {
        let mut arena = Arena::new();
        let a = arena.insert(1u8);
        arena.remove(a);
        let _ = arena.get(a);
    }

    #[test]
    fn with_capacity_reserves() {
        let arena: Arena<u8> = Arena::with_capacity(16);
        assert!(arena.capacity() >= 16);
    }

    #[derive(Clone, Debug)]
    enum Op {
        Insert(u32),
        Overwrite(usize, u32),
        Remove(usize),
        Clear,
    }

    fn op() -> impl Strategy<Value = Op> {
        prop_oneof![
            10 => any::<u32>().prop_map(Op::Insert),
            4 => (any::<usize>(), any::<u32>()).prop_map(|(at, value)| Op::Overwrite(at, value)),
            6 => any::<usize>().prop_map(Op::Remove),
            1 => Just(Op::Clear),
        ]
    }

    proptest! {
        #[test]
        fn arena_tracks_live_elements(ops in prop::collection::vec(op(), 0..256)) {
            let mut live: Vec<(Handle, u32)> = Vec::new();
            let mut arena = Arena::new();

            for op in ops {
                match op {
                    Op::Insert(value) => live.push((arena.insert(value), value)),
                    Op::Overwrite(at, value) if !live.is_empty() => {
                        let at = at % live.len();
                        *arena.get_mut(live[at].0) = value;
                        live[at].1 = value;
                    }
                    Op::Remove(at) if !live.is_empty() => {
                        let (handle, value) = live.swap_remove(at % live.len());
                        prop_assert_eq!(arena.remove(handle), value);
                    }
                    Op::Clear => {
                        arena.clear();
                        live.clear();
                    }
                    _ => {}
                }

                prop_assert_eq!(arena.len(), live.len());
                for &(handle, value) in &live {
                    prop_assert_eq!(*arena.get(handle), value);
                }
            }
        }
    }
}
