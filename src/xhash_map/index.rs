use super::XHash;
use crate::Key;

impl<T> XHash<T> {
    /// Returns the index the next automatic store will use.
    ///
    /// This is one past the largest non-negative integer key, or `0` when
    /// there is none. Negative keys are ignored.
    ///
    /// # Complexity
    ///
    /// O(1) while the cached maximum is known. After the key holding the
    /// maximum is deleted, the next call rescans every key: O(n).
    ///
    /// # Panics
    ///
    /// Panics if the largest key is `i64::MAX`, as no index follows it.
    ///
    /// # Examples
    ///
    /// ```
    /// use xhash::XHash;
    ///
    /// let mut hash: XHash<&str> = XHash::new();
    /// hash.store(-1, "negative");
    /// assert_eq!(hash.next_index(), 0);
    ///
    /// hash.store(4, "four");
    /// assert_eq!(hash.next_index(), 5);
    /// ```
    pub fn next_index(&mut self) -> i64 {
        self.max_auto_index().checked_add(1).expect("automatic index overflowed `i64`")
    }

    /// Largest non-negative integer key, or `-1` when there is none.
    pub(super) fn max_auto_index(&mut self) -> i64 {
        if let Some(max) = self.max_index {
            return max;
        }
        let max = self.keys().filter_map(Key::auto_index).max().unwrap_or(-1);
        tracing::trace!(max_index = max, len = self.len(), "rescanned keys for max index");
        self.max_index = Some(max);
        max
    }

    /// Drops the cached maximum if `key` was holding it.
    pub(super) fn forget_index(&mut self, key: &Key) {
        if key.auto_index().is_some() && key.auto_index() == self.max_index {
            tracing::trace!(key = %key, "invalidated cached max index");
            self.max_index = None;
        }
    }

    /// Returns every integer key, negative ones included.
    ///
    /// With `sorted` the keys come in ascending numeric order, otherwise in
    /// the hash's own order.
    ///
    /// # Examples
    ///
    /// ```
    /// use xhash::{Key, XHash};
    ///
    /// let hash = XHash::from([("0", "a"), ("name", "b"), ("-5", "c"), ("-1", "d")]);
    /// assert_eq!(hash.index_keys(true), [Key::Index(-5), Key::Index(-1), Key::Index(0)]);
    /// assert_eq!(hash.index_keys(false), [Key::Index(0), Key::Index(-5), Key::Index(-1)]);
    /// ```
    #[must_use]
    pub fn index_keys(&self, sorted: bool) -> Vec<Key> {
        let mut keys: Vec<Key> = self.keys().filter(|key| key.is_index()).cloned().collect();
        if sorted {
            keys.sort_by_key(Key::index);
        }
        keys
    }
}

#[cfg(test)]
mod tests {
    use crate::{Key, XHash};

    #[test]
    fn automatic_indices_count_up() {
        let mut hash: XHash<i32> = XHash::new();
        for expected in 0..3 {
            assert_eq!(hash.store_auto(0), Key::Index(expected));
        }
        assert_eq!(hash.next_index(), 3);
        hash.validate_invariants();
    }

    #[test]
    fn deleting_max_invalidates_until_next_request() {
        let mut hash: XHash<i32> = XHash::new();
        hash.store(0, 0);
        hash.store(1, 1);
        hash.store(2, 2);
        hash.delete(2);
        assert_eq!(hash.max_index, None);
        assert_eq!(hash.next_index(), 2);
        assert_eq!(hash.max_index, Some(1));
        hash.validate_invariants();
    }

    #[test]
    fn deleting_non_max_keeps_cache() {
        let mut hash: XHash<i32> = XHash::new();
        hash.store(0, 0);
        hash.store(7, 7);
        hash.delete(0);
        assert_eq!(hash.max_index, Some(7));
    }

    #[test]
    fn overwrite_leaves_cache_alone() {
        let mut hash: XHash<i32> = XHash::new();
        hash.store(3, 0);
        hash.store(1, 0);
        hash.store(1, 9);
        assert_eq!(hash.max_index, Some(3));
    }

    #[test]
    fn deleting_sole_key_resets_accounting() {
        let mut hash: XHash<i32> = XHash::new();
        hash.store(9, 0);
        hash.delete(9);
        assert_eq!(hash.max_index, Some(-1));
        assert_eq!(hash.next_index(), 0);
    }

    #[test]
    fn smaller_explicit_index_does_not_lower_max() {
        let mut hash: XHash<i32> = XHash::new();
        hash.store(10, 0);
        hash.store(4, 0);
        assert_eq!(hash.next_index(), 11);
        hash.validate_invariants();
    }

    #[test]
    fn explicit_keys_after_the_largest_index_never_overflow() {
        let mut hash: XHash<i32> = XHash::new();
        hash.store(i64::MAX, 1);
        hash.store(0i64, 2);
        hash.store("5", 3);
        assert_eq!(hash.max_index, Some(i64::MAX));
        assert_eq!(hash.len(), 3);
        hash.validate_invariants();
    }

    #[test]
    #[should_panic(expected = "automatic index overflowed `i64`")]
    fn allocating_past_the_largest_index_panics() {
        let mut hash: XHash<i32> = XHash::new();
        hash.store(i64::MAX, 1);
        hash.store_auto(2);
    }

    #[test]
    fn padded_digit_names_reserve_their_value() {
        let mut hash: XHash<i32> = XHash::new();
        hash.store("007", 1);
        assert_eq!(hash.next_index(), 8);
        assert_eq!(hash.store_auto(2), Key::Index(8));
        assert_eq!(hash.index_keys(true), [Key::from("007"), Key::Index(8)]);
        hash.validate_invariants();

        let mut hash: XHash<i32> = XHash::new();
        hash.store("007", 1);
        hash.delete("007");
        assert_eq!(hash.next_index(), 0);
    }

    #[test]
    fn signed_padded_names_are_indices_only() {
        let mut hash: XHash<i32> = XHash::new();
        hash.store("-0", 1);
        hash.store("-05", 2);
        assert_eq!(hash.next_index(), 0);
        assert_eq!(hash.index_keys(true), [Key::from("-05"), Key::from("-0")]);
    }
}
