//! Path traversal over nested `XHash`es.
//!
//! Every path operation walks the intermediate segments first, then applies
//! the matching single-key operation to the container the walk ends in.
//! Only stores, and fetches through a container-marked path, create missing
//! containers. The container mark means nothing to exists and delete.
//! Vivification is destructive: an intermediate value that is not a container
//! is replaced by an empty one.

use super::XHash;
use crate::{Key, Path, Segment, Value};

impl<T> XHash<T> {
    /// Returns the value at `path` without modifying anything.
    ///
    /// A container-marked path only matches nested containers. Automatic
    /// segments never match, as the next index is by definition absent.
    ///
    /// # Examples
    ///
    /// ```
    /// use xhash::{Path, Value, XHash};
    ///
    /// let mut hash: XHash<&str> = XHash::new();
    /// hash.store_path(&Path::from(["a", "b"]), "v");
    ///
    /// let leaf = hash.fetch_path(&Path::from(["a", "b"]));
    /// assert_eq!(leaf.and_then(Value::as_scalar), Some(&"v"));
    /// assert!(hash.fetch_path(&Path::from(["a"])).unwrap().is_hash());
    /// assert!(hash.fetch_path(&Path::from(["a", "b"]).container()).is_none());
    /// ```
    pub fn fetch_path(&self, path: &Path) -> Option<&Value<T>> {
        let (container, key) = self.walk(path)?;
        let value = container.fetch(key)?;
        if path.is_container() && !value.is_hash() {
            return None;
        }
        Some(value)
    }

    /// Returns a mutable reference to the value at `path`.
    ///
    /// A plain path never modifies the tree. A container-marked path creates
    /// every missing container down to and including the final segment, and
    /// replaces non-container values met on the way.
    ///
    /// # Examples
    ///
    /// ```
    /// use xhash::{Path, XHash};
    ///
    /// let mut hash: XHash<i32> = XHash::new();
    /// let path = Path::from(["config"]).container();
    ///
    /// let config = hash.fetch_path_mut(&path).unwrap().as_hash_mut().unwrap();
    /// config.store("retries", 3);
    ///
    /// assert_eq!(hash.fetch_path_mut(&path).unwrap().as_hash().unwrap().len(), 1);
    /// ```
    pub fn fetch_path_mut(&mut self, path: &Path) -> Option<&mut Value<T>> {
        let vivify = path.is_container();
        let (container, key) = self.walk_mut(path, vivify, vivify)?;
        let value = container.fetch_mut(key)?;
        if path.is_container() && !value.is_hash() {
            return None;
        }
        Some(value)
    }

    /// Returns `true` if `path` leads to a value. The container mark is
    /// ignored.
    pub fn exists_path(&self, path: &Path) -> bool {
        self.walk(path).is_some_and(|(container, key)| container.exists(key))
    }

    /// Stores `value` at `path`, creating intermediate containers as needed,
    /// and returns the key it was stored under inside the last container.
    ///
    /// Automatic segments resolve to the next index of the container reached
    /// at that point. The container mark has no effect on stores.
    ///
    /// # Examples
    ///
    /// ```
    /// use xhash::{Key, Path, XHash};
    ///
    /// let mut hash: XHash<&str> = XHash::new();
    /// assert_eq!(hash.store_path(&Path::new().key("log").auto(), "boot"), Key::Index(0));
    /// assert_eq!(hash.store_path(&Path::new().key("log").auto(), "ready"), Key::Index(1));
    /// ```
    pub fn store_path(&mut self, path: &Path, value: impl Into<Value<T>>) -> Key {
        self.store_path_with(path, value.into(), false)
    }

    /// Like [`store_path`](Self::store_path), but raw lists and pairs inside
    /// `value` become nested `XHash`es.
    pub fn store_path_nested(&mut self, path: &Path, value: impl Into<Value<T>>) -> Key {
        self.store_path_with(path, value.into(), true)
    }

    /// Removes the value at `path`, whatever it holds. Nothing is created on
    /// the way down and the container mark is ignored.
    ///
    /// # Examples
    ///
    /// ```
    /// use xhash::{Path, Value, XHash};
    ///
    /// let mut hash: XHash<i32> = XHash::new();
    /// hash.store("a", 5);
    /// assert_eq!(hash.delete_path(&Path::from(["a"]).container()), Some(Value::Scalar(5)));
    /// assert!(hash.is_empty());
    /// ```
    pub fn delete_path(&mut self, path: &Path) -> Option<Value<T>> {
        let (container, key) = self.walk_mut(path, false, false)?;
        container.delete(key)
    }

    fn store_path_with(&mut self, path: &Path, value: Value<T>, nested: bool) -> Key {
        match self.walk_mut(path, true, false) {
            Some((container, key)) => container.store_with(Some(key), value, nested),
            None => unreachable!("a vivifying walk always reaches a container"),
        }
    }

    /// Follows the intermediate segments without creating anything.
    fn walk<'p>(&self, path: &'p Path) -> Option<(&Self, &'p Key)> {
        let (intermediate, terminal) = path.split_terminal();
        let mut current = self;
        for segment in intermediate {
            let Segment::Key(key) = segment else {
                return None;
            };
            current = current.fetch(key)?.as_hash()?;
        }
        match terminal {
            Segment::Key(key) => Some((current, key)),
            Segment::Auto => None,
        }
    }

    /// Follows the intermediate segments, creating and coercing containers
    /// when `vivify` is set. With `terminal_container` the final segment is
    /// treated the same way.
    fn walk_mut(&mut self, path: &Path, vivify: bool, terminal_container: bool) -> Option<(&mut Self, Key)> {
        let (intermediate, terminal) = path.split_terminal();
        let mut current = self;
        for segment in intermediate {
            let key = current.resolve_segment(segment);
            current = current.descend(key, vivify)?;
        }
        let key = current.resolve_segment(terminal);
        if terminal_container {
            current.descend(key.clone(), vivify)?;
        }
        Some((current, key))
    }

    fn resolve_segment(&mut self, segment: &Segment) -> Key {
        match segment {
            Segment::Key(key) => key.clone(),
            Segment::Auto => Key::Index(self.next_index()),
        }
    }

    /// Returns the nested container under `key`, creating it (or replacing a
    /// non-container value with it) when `vivify` is set.
    fn descend(&mut self, key: Key, vivify: bool) -> Option<&mut Self> {
        match self.fetch(&key).map(Value::is_hash) {
            Some(true) => {}
            Some(false) if vivify => {
                tracing::debug!(key = %key, "replacing non-container value with an empty hash");
                self.store(key.clone(), Value::Hash(XHash::new()));
            }
            None if vivify => {
                tracing::debug!(key = %key, "vivifying missing container");
                self.store(key.clone(), Value::Hash(XHash::new()));
            }
            _ => return None,
        }
        self.fetch_mut(key)?.as_hash_mut()
    }
}
