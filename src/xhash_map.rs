use core::fmt;
use core::iter::FusedIterator;
use core::ops::{Index, IndexMut};

use crate::raw::{Handle, RawRing};
use crate::{Item, Key, Value};

mod export;
mod index;
mod reorder;
mod resolve;
mod sequence;
#[cfg(feature = "serde")]
mod serialize;

/// An insertion-ordered hash that doubles as a list.
///
/// Entries are kept in the order they were first stored. Storing an existing
/// key replaces its value in place without moving it. Entries stored without
/// a key receive the next automatic index: one past the largest non-negative
/// integer key present.
///
/// Values may themselves be `XHash`es (see [`Value::Hash`]), forming trees
/// that can be addressed with multi-segment [`Path`](crate::Path)s. Path
/// stores create missing intermediate containers on the way down.
///
/// # Examples
///
/// ```
/// use xhash::{Item, Key, Value, XHash};
///
/// let mut todo: XHash<&str> = XHash::new();
///
/// // auto-indexed entries behave like a list
/// todo.push([Item::scalar("write docs"), Item::scalar("fix bug")]);
/// assert_eq!(todo.fetch(1).and_then(Value::as_scalar), Some(&"fix bug"));
///
/// // named entries keep their place in the order
/// todo.store("owner", "ops");
/// todo.store_auto("release");
///
/// let keys: Vec<_> = todo.keys().cloned().collect();
/// assert_eq!(keys, [Key::Index(0), Key::Index(1), Key::from("owner"), Key::Index(2)]);
///
/// // deleting the largest index frees it for the next automatic store
/// todo.delete(2);
/// assert_eq!(todo.next_index(), 2);
/// ```
///
/// # Index accounting
///
/// The largest non-negative integer key is cached. Deleting the key that holds
/// the cached maximum discards the cache rather than searching for the new
/// maximum; the next allocation rescans all keys. Negative integer keys never
/// influence allocation.
///
/// # Nesting
///
/// Ownership is strictly tree-shaped: each nested container is owned by the
/// entry that holds it. A container cannot hold itself.
#[derive(Clone)]
pub struct XHash<T> {
    ring: RawRing<Value<T>>,
    /// Largest non-negative integer key, `Some(-1)` when there is none and
    /// `None` when it must be recomputed.
    max_index: Option<i64>,
}

/// Where [`XHash::insert_at`] links new entries.
#[derive(Clone, Copy, Debug)]
pub(crate) enum Position {
    Back,
    /// After this link; advances to each newly linked entry.
    After(Handle),
    /// Before this link.
    Before(Handle),
}

impl<T> XHash<T> {
    /// Makes a new, empty `XHash`.
    ///
    /// # Examples
    ///
    /// ```
    /// use xhash::XHash;
    ///
    /// let hash: XHash<u8> = XHash::new();
    /// assert!(hash.is_empty());
    /// assert_eq!(hash.first_key(), None);
    /// ```
    #[must_use]
    pub fn new() -> Self {
        Self {
            ring: RawRing::new(),
            max_index: Some(-1),
        }
    }

    /// Makes a new, empty `XHash` with room for at least `capacity` entries.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            ring: RawRing::with_capacity(capacity),
            max_index: Some(-1),
        }
    }

    #[must_use]
    pub fn capacity(&self) -> usize {
        self.ring.capacity()
    }

    /// Returns the number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.ring.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ring.is_empty()
    }

    /// Returns `true` if the hash holds at least one entry.
    #[must_use]
    pub fn is_non_empty(&self) -> bool {
        !self.ring.is_empty()
    }

    /// Removes every entry and forgets all index accounting.
    ///
    /// # Examples
    ///
    /// ```
    /// use xhash::XHash;
    ///
    /// let mut hash = XHash::from([(5, "five")]);
    /// hash.clear();
    /// assert!(hash.is_empty());
    /// assert_eq!(hash.next_index(), 0);
    /// ```
    pub fn clear(&mut self) {
        self.ring.clear();
        self.max_index = Some(-1);
    }

    /// Returns the value stored under `key`.
    ///
    /// # Complexity
    ///
    /// O(1)
    pub fn fetch(&self, key: impl Into<Key>) -> Option<&Value<T>> {
        let handle = self.ring.find(&key.into())?;
        Some(self.ring.value(handle))
    }

    /// Returns a mutable reference to the value stored under `key`.
    pub fn fetch_mut(&mut self, key: impl Into<Key>) -> Option<&mut Value<T>> {
        let handle = self.ring.find(&key.into())?;
        Some(self.ring.value_mut(handle))
    }

    /// Returns `true` if `key` is present.
    pub fn exists(&self, key: impl Into<Key>) -> bool {
        self.ring.find(&key.into()).is_some()
    }

    /// Stores `value` under `key`, returning the value it replaced.
    ///
    /// A new key is appended to the end of the order. An existing key keeps its
    /// position and only its value changes.
    ///
    /// # Examples
    ///
    /// ```
    /// use xhash::{Key, Value, XHash};
    ///
    /// let mut hash: XHash<i32> = XHash::new();
    /// assert_eq!(hash.store("a", 1), None);
    /// hash.store("b", 2);
    /// assert_eq!(hash.store("a", 10), Some(Value::Scalar(1)));
    ///
    /// let keys: Vec<_> = hash.keys().cloned().collect();
    /// assert_eq!(keys, [Key::from("a"), Key::from("b")]);
    /// ```
    pub fn store(&mut self, key: impl Into<Key>, value: impl Into<Value<T>>) -> Option<Value<T>> {
        self.replace_or_link(key.into(), value.into(), false, &mut Position::Back)
    }

    /// Like [`store`](Self::store), but raw lists and pairs inside `value` are
    /// first converted into nested `XHash`es.
    pub fn store_nested(&mut self, key: impl Into<Key>, value: impl Into<Value<T>>) -> Option<Value<T>> {
        self.replace_or_link(key.into(), value.into(), true, &mut Position::Back)
    }

    /// Stores `value` at the next automatic index and returns that index.
    ///
    /// # Examples
    ///
    /// ```
    /// use xhash::{Key, XHash};
    ///
    /// let mut hash: XHash<&str> = XHash::new();
    /// assert_eq!(hash.store_auto("a"), Key::Index(0));
    /// hash.store(10, "b");
    /// assert_eq!(hash.store_auto("c"), Key::Index(11));
    /// ```
    pub fn store_auto(&mut self, value: impl Into<Value<T>>) -> Key {
        self.store_with(None, value.into(), false)
    }

    /// The general form of [`store`](Self::store): a `None` key means the next
    /// automatic index and `nested` converts raw structures first. Returns the
    /// key the value ended up under.
    pub fn store_with(&mut self, key: Option<Key>, value: Value<T>, nested: bool) -> Key {
        self.insert_at(key, value, nested, &mut Position::Back)
    }

    /// Removes `key`, returning its value.
    ///
    /// Removing the last remaining entry resets the hash to its empty state.
    ///
    /// # Examples
    ///
    /// ```
    /// use xhash::{Value, XHash};
    ///
    /// let mut hash = XHash::from([("a", 1), ("b", 2)]);
    /// assert_eq!(hash.delete("a"), Some(Value::Scalar(1)));
    /// assert_eq!(hash.delete("a"), None);
    /// assert_eq!(hash.len(), 1);
    /// ```
    pub fn delete(&mut self, key: impl Into<Key>) -> Option<Value<T>> {
        let handle = self.ring.find(&key.into())?;
        Some(self.unlink(handle).1)
    }

    /// Returns the first key in order.
    #[must_use]
    pub fn first_key(&self) -> Option<&Key> {
        self.ring.first().map(|handle| self.ring.key(handle))
    }

    /// Returns the last key in order.
    #[must_use]
    pub fn last_key(&self) -> Option<&Key> {
        self.ring.last().map(|handle| self.ring.key(handle))
    }

    /// Returns the key following `key`, or `None` if `key` is absent or last.
    ///
    /// Together with [`first_key`](Self::first_key) this walks the hash
    /// without holding an iterator: each step only reads the stored links.
    ///
    /// # Examples
    ///
    /// ```
    /// use xhash::{Key, XHash};
    ///
    /// let hash = XHash::from([("a", 1), ("b", 2)]);
    /// let mut walked = Vec::new();
    /// let mut key = hash.first_key().cloned();
    /// while let Some(k) = key {
    ///     key = hash.next_key(&k).cloned();
    ///     walked.push(k);
    /// }
    /// assert_eq!(walked, [Key::from("a"), Key::from("b")]);
    /// ```
    pub fn next_key(&self, key: impl Into<Key>) -> Option<&Key> {
        let handle = self.ring.find(&key.into())?;
        self.ring.next(handle).map(|next| self.ring.key(next))
    }

    /// Returns the key preceding `key`, or `None` if `key` is absent or first.
    pub fn prev_key(&self, key: impl Into<Key>) -> Option<&Key> {
        let handle = self.ring.find(&key.into())?;
        self.ring.prev(handle).map(|prev| self.ring.key(prev))
    }

    /// Gets an iterator over the entries, in order.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            ring: &self.ring,
            cursor: self.ring.first(),
            remaining: self.ring.len(),
        }
    }

    /// Gets an iterator over the keys, in order.
    pub fn keys(&self) -> Keys<'_, T> {
        Keys { inner: self.iter() }
    }

    /// Gets an iterator over the values, in order.
    pub fn values(&self) -> Values<'_, T> {
        Values { inner: self.iter() }
    }

    /// Stores at `key` (or the next automatic index) and links new keys at
    /// `position`. Returns the key used.
    pub(crate) fn insert_at(&mut self, key: Option<Key>, value: Value<T>, nested: bool, position: &mut Position) -> Key {
        let key = match key {
            Some(key) => key,
            None => Key::Index(self.next_index()),
        };
        self.replace_or_link(key.clone(), value, nested, position);
        key
    }

    fn replace_or_link(&mut self, key: Key, value: Value<T>, nested: bool, position: &mut Position) -> Option<Value<T>> {
        let value = if nested { value.into_nested() } else { value };

        if let Some(handle) = self.ring.find(&key) {
            return Some(core::mem::replace(self.ring.value_mut(handle), value));
        }

        let bump = key.auto_index().filter(|&n| n > self.max_auto_index());
        let handle = match *position {
            Position::Back => self.ring.push_back(key, value),
            Position::After(anchor) => self.ring.insert_after(anchor, key, value),
            Position::Before(anchor) => self.ring.insert_before(anchor, key, value),
        };
        if let Position::After(_) = position {
            *position = Position::After(handle);
        }
        if bump.is_some() {
            self.max_index = bump;
        }
        None
    }

    /// Removes the entry at `handle`, keeping index accounting in step.
    pub(crate) fn unlink(&mut self, handle: Handle) -> (Key, Value<T>) {
        let (key, value) = self.ring.remove(handle);
        if self.ring.is_empty() {
            self.max_index = Some(-1);
        } else {
            self.forget_index(&key);
        }
        (key, value)
    }

    #[cfg(test)]
    pub(crate) fn validate_invariants(&self) {
        self.ring.validate_invariants();
        if let Some(max) = self.max_index {
            let actual = self.keys().filter_map(Key::auto_index).max().unwrap_or(-1);
            assert_eq!(max, actual, "cached max index is stale");
        }
    }
}

impl<T> Default for XHash<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: fmt::Debug> fmt::Debug for XHash<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

/// Two hashes are equal when they hold equal entries in the same order.
impl<T: PartialEq> PartialEq for XHash<T> {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().eq(other.iter())
    }
}

impl<T: Eq> Eq for XHash<T> {}

impl<T, K: Into<Key>> Index<K> for XHash<T> {
    type Output = Value<T>;

    /// Returns a reference to the value stored under `key`.
    ///
    /// # Panics
    ///
    /// Panics if the key is not present in the `XHash`.
    fn index(&self, key: K) -> &Value<T> {
        self.fetch(key).expect("key not found in XHash")
    }
}

impl<T, K: Into<Key>> IndexMut<K> for XHash<T> {
    fn index_mut(&mut self, key: K) -> &mut Value<T> {
        self.fetch_mut(key).expect("key not found in XHash")
    }
}

impl<T> FromIterator<Item<T>> for XHash<T> {
    fn from_iter<I: IntoIterator<Item = Item<T>>>(iter: I) -> Self {
        let mut hash = Self::new();
        hash.push(iter);
        hash
    }
}

impl<T> Extend<Item<T>> for XHash<T> {
    fn extend<I: IntoIterator<Item = Item<T>>>(&mut self, iter: I) {
        self.push(iter);
    }
}

impl<T, K: Into<Key>, const N: usize> From<[(K, T); N]> for XHash<T> {
    /// Builds an `XHash` from keyed scalars, in array order.
    ///
    /// ```
    /// use xhash::{Key, XHash};
    ///
    /// let hash = XHash::from([("b", 1), ("a", 2)]);
    /// assert_eq!(hash.first_key(), Some(&Key::from("b")));
    /// ```
    fn from(entries: [(K, T); N]) -> Self {
        let mut hash = Self::with_capacity(N);
        for (key, value) in entries {
            hash.store(key.into(), Value::Scalar(value));
        }
        hash
    }
}

/// An iterator over the entries of an `XHash`, in order.
///
/// This `struct` is created by the [`iter`](XHash::iter) method.
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct Iter<'a, T> {
    ring: &'a RawRing<Value<T>>,
    cursor: Option<Handle>,
    remaining: usize,
}

impl<T> Clone for Iter<'_, T> {
    fn clone(&self) -> Self {
        Self {
            ring: self.ring,
            cursor: self.cursor,
            remaining: self.remaining,
        }
    }
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = (&'a Key, &'a Value<T>);

    fn next(&mut self) -> Option<Self::Item> {
        let handle = self.cursor?;
        self.cursor = self.ring.next(handle);
        self.remaining -= 1;
        Some((self.ring.key(handle), self.ring.value(handle)))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}
impl<T> FusedIterator for Iter<'_, T> {}

/// An iterator over the keys of an `XHash`, in order.
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct Keys<'a, T> {
    inner: Iter<'a, T>,
}

impl<'a, T> Iterator for Keys<'a, T> {
    type Item = &'a Key;

    fn next(&mut self) -> Option<&'a Key> {
        self.inner.next().map(|(key, _)| key)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<T> ExactSizeIterator for Keys<'_, T> {}
impl<T> FusedIterator for Keys<'_, T> {}

/// An iterator over the values of an `XHash`, in order.
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct Values<'a, T> {
    inner: Iter<'a, T>,
}

impl<'a, T> Iterator for Values<'a, T> {
    type Item = &'a Value<T>;

    fn next(&mut self) -> Option<&'a Value<T>> {
        self.inner.next().map(|(_, value)| value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<T> ExactSizeIterator for Values<'_, T> {}
impl<T> FusedIterator for Values<'_, T> {}

/// An owning iterator over the entries of an `XHash`, in order.
pub struct IntoIter<T> {
    hash: XHash<T>,
}

impl<T> Iterator for IntoIter<T> {
    type Item = (Key, Value<T>);

    fn next(&mut self) -> Option<(Key, Value<T>)> {
        self.hash.shift()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.hash.len(), Some(self.hash.len()))
    }
}

impl<T> DoubleEndedIterator for IntoIter<T> {
    fn next_back(&mut self) -> Option<(Key, Value<T>)> {
        self.hash.pop()
    }
}

impl<T> ExactSizeIterator for IntoIter<T> {}
impl<T> FusedIterator for IntoIter<T> {}

impl<'a, T> IntoIterator for &'a XHash<T> {
    type Item = (&'a Key, &'a Value<T>);
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Iter<'a, T> {
        self.iter()
    }
}

impl<T> IntoIterator for XHash<T> {
    type Item = (Key, Value<T>);
    type IntoIter = IntoIter<T>;

    fn into_iter(self) -> IntoIter<T> {
        IntoIter { hash: self }
    }
}
