use std::collections::HashSet;

use super::XHash;
use crate::raw::Handle;
use crate::{Key, XHashError};

impl<T> XHash<T> {
    /// Moves `keys` around `reference`, which itself stays where it is.
    ///
    /// Keys listed before the first mention of `reference` end up directly
    /// before it, the remaining keys directly after it, each group in list
    /// order. When `reference` is not listed every key goes after it. Repeated
    /// keys count once, at their first mention. Keys that are not present are
    /// skipped.
    ///
    /// # Errors
    ///
    /// Returns [`XHashError::MissingReference`] if `reference` is not present.
    ///
    /// # Examples
    ///
    /// ```
    /// use xhash::{Key, XHash};
    ///
    /// let mut hash = XHash::from([("a", 1), ("b", 2), ("c", 3), ("d", 4)]);
    /// hash.reorder("b", ["d", "b", "a"])?;
    ///
    /// let keys: Vec<_> = hash.keys().map(Key::to_string).collect();
    /// assert_eq!(keys, ["d", "b", "a", "c"]);
    /// # Ok::<(), xhash::XHashError>(())
    /// ```
    pub fn reorder<I, K>(&mut self, reference: impl Into<Key>, keys: I) -> Result<(), XHashError>
    where
        I: IntoIterator<Item = K>,
        K: Into<Key>,
    {
        let reference = reference.into();
        let anchor = self.ring.find(&reference).ok_or(XHashError::MissingReference { key: reference })?;
        let keys: Vec<Key> = keys.into_iter().map(Into::into).collect();
        self.splice_around(anchor, &keys);
        Ok(())
    }

    /// Gathers every integer key, in ascending order, at the position of the
    /// first integer key.
    ///
    /// # Examples
    ///
    /// ```
    /// use xhash::{Key, XHash};
    ///
    /// let mut hash = XHash::from([("x", 0), ("2", 2), ("y", 0), ("0", 0), ("1", 1)]);
    /// hash.reorder_indices();
    ///
    /// let keys: Vec<_> = hash.keys().map(Key::to_string).collect();
    /// assert_eq!(keys, ["x", "0", "1", "2", "y"]);
    /// ```
    pub fn reorder_indices(&mut self) {
        let Some(anchor) = self.first_index_handle() else {
            return;
        };
        let sorted = self.index_keys(true);
        self.splice_around(anchor, &sorted);
    }

    /// Renames keys according to `mapping`, keeping order and values.
    ///
    /// Sources that are not present are ignored. Renames apply simultaneously,
    /// so keys may be swapped.
    ///
    /// # Errors
    ///
    /// Nothing is renamed if any of these hold:
    ///
    /// - [`XHashError::DuplicateRemapTarget`]: two entries share a target.
    /// - [`XHashError::RemapCollision`]: a target is already a key that is not
    ///   itself being renamed.
    ///
    /// # Examples
    ///
    /// ```
    /// use xhash::{Key, XHash, XHashError};
    ///
    /// let mut hash = XHash::from([("a", 1), ("b", 2)]);
    /// hash.remap([("a", "b"), ("b", "a")])?;
    /// assert_eq!(hash.first_key(), Some(&Key::from("b")));
    ///
    /// let err = hash.remap([("a", "x"), ("b", "x")]).unwrap_err();
    /// assert!(matches!(err, XHashError::DuplicateRemapTarget { .. }));
    /// # Ok::<(), XHashError>(())
    /// ```
    pub fn remap<I, K1, K2>(&mut self, mapping: I) -> Result<(), XHashError>
    where
        I: IntoIterator<Item = (K1, K2)>,
        K1: Into<Key>,
        K2: Into<Key>,
    {
        let mapping: Vec<(Key, Key)> = mapping.into_iter().map(|(old, new)| (old.into(), new.into())).collect();

        let mut targets = HashSet::with_capacity(mapping.len());
        for (_, new) in &mapping {
            if !targets.insert(new) {
                return Err(XHashError::DuplicateRemapTarget { key: new.clone() });
            }
        }

        let mut renames = Vec::with_capacity(mapping.len());
        let mut sources = HashSet::with_capacity(mapping.len());
        for (old, new) in &mapping {
            if let Some(handle) = self.ring.find(old)
                && sources.insert(old)
            {
                renames.push((handle, new.clone()));
            }
        }
        for (handle, new) in &renames {
            if self.ring.find(new).is_some_and(|holder| holder != *handle) && !sources.contains(new) {
                return Err(XHashError::RemapCollision { key: new.clone() });
            }
        }

        self.apply_renames(renames);
        Ok(())
    }

    /// Gives the integer keys consecutive values starting at `from`.
    ///
    /// Without `sorted` the new numbers follow the entries' positions. With
    /// `sorted` they follow the old keys' numeric order. Positions never
    /// change either way. Digit-only names such as `"007"` count as integers
    /// and become plain indices, every other name is untouched.
    ///
    /// # Panics
    ///
    /// Panics if the new numbers would run past `i64::MAX`.
    ///
    /// # Examples
    ///
    /// ```
    /// use xhash::{Key, XHash};
    ///
    /// let mut hash = XHash::from([("5", "a"), ("name", "b"), ("-3", "c")]);
    /// hash.renumber(0, false);
    /// let keys: Vec<_> = hash.keys().map(Key::to_string).collect();
    /// assert_eq!(keys, ["0", "name", "1"]);
    ///
    /// let mut hash = XHash::from([("5", "a"), ("name", "b"), ("-3", "c")]);
    /// hash.renumber(10, true);
    /// let keys: Vec<_> = hash.keys().map(Key::to_string).collect();
    /// assert_eq!(keys, ["11", "name", "10"]);
    /// ```
    pub fn renumber(&mut self, from: i64, sorted: bool) {
        let mut renames = Vec::new();
        let mut next = Some(from);
        for old in self.index_keys(sorted) {
            let new = next.expect("renumbered index overflowed `i64`");
            next = new.checked_add(1);
            if let Some(handle) = self.ring.find(&old) {
                renames.push((handle, Key::Index(new)));
            }
        }
        self.apply_renames(renames);
    }

    fn apply_renames(&mut self, renames: Vec<(Handle, Key)>) {
        let renames: Vec<(Handle, Key)> =
            renames.into_iter().filter(|(handle, new)| self.ring.key(*handle) != new).collect();
        if renames.is_empty() {
            return;
        }
        tracing::trace!(count = renames.len(), "renaming keys");
        self.ring.rename_all(renames);
        self.max_index = None;
    }

    fn first_index_handle(&self) -> Option<Handle> {
        let mut cursor = self.ring.first();
        while let Some(handle) = cursor {
            if self.ring.key(handle).is_index() {
                return Some(handle);
            }
            cursor = self.ring.next(handle);
        }
        None
    }

    fn splice_around(&mut self, anchor: Handle, keys: &[Key]) {
        let reference = self.ring.key(anchor).clone();
        let split = keys.iter().position(|key| *key == reference);

        let mut seen = HashSet::with_capacity(keys.len());
        let mut before = Vec::new();
        let mut after = Vec::new();
        for (i, key) in keys.iter().enumerate() {
            if *key == reference || !seen.insert(key) {
                continue;
            }
            let Some(handle) = self.ring.find(key) else {
                continue;
            };
            match split {
                Some(split) if i < split => before.push(handle),
                _ => after.push(handle),
            }
        }

        tracing::trace!(reference = %reference, before = before.len(), after = after.len(), "reordering keys");
        for handle in before {
            self.ring.move_before(anchor, handle);
        }
        let mut cursor = anchor;
        for handle in after {
            self.ring.move_after(cursor, handle);
            cursor = handle;
        }
    }
}
