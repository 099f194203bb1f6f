use super::{Position, XHash};
use crate::{Item, Key, Value, XHashError};

impl<T> XHash<T> {
    /// Appends `items` to the end of the hash.
    ///
    /// [`Item::Value`] and [`Item::Verbatim`] are stored at the next automatic
    /// index, [`Item::Pairs`] are stored under their own keys. Keys that are
    /// already present are overwritten where they stand.
    ///
    /// # Examples
    ///
    /// ```
    /// use xhash::{Item, Key, XHash};
    ///
    /// let mut hash: XHash<&str> = XHash::new();
    /// hash.push([
    ///     Item::scalar("a"),
    ///     Item::pairs([("name", "b")]),
    ///     Item::scalar("c"),
    /// ]);
    ///
    /// let keys: Vec<_> = hash.keys().cloned().collect();
    /// assert_eq!(keys, [Key::Index(0), Key::from("name"), Key::Index(1)]);
    /// ```
    pub fn push<I>(&mut self, items: I)
    where
        I: IntoIterator<Item = Item<T>>,
    {
        self.insert_items(items, false, Position::Back);
    }

    /// Like [`push`](Self::push), but raw lists and pairs inside the values
    /// become nested `XHash`es. [`Item::Verbatim`] values are left as they are.
    ///
    /// # Examples
    ///
    /// ```
    /// use xhash::{Item, Value, XHash};
    ///
    /// let mut hash: XHash<i32> = XHash::new();
    /// hash.push_nested([Item::Value(Value::List(vec![Value::Scalar(1), Value::Scalar(2)]))]);
    /// assert!(hash.fetch(0).unwrap().is_hash());
    /// ```
    pub fn push_nested<I>(&mut self, items: I)
    where
        I: IntoIterator<Item = Item<T>>,
    {
        self.insert_items(items, true, Position::Back);
    }

    /// Inserts `items` directly after `anchor`, keeping their relative order.
    ///
    /// # Errors
    ///
    /// Returns [`XHashError::MissingAnchor`] if `anchor` is not present. Nothing
    /// is inserted in that case.
    ///
    /// # Examples
    ///
    /// ```
    /// use xhash::{Item, Key, XHash};
    ///
    /// let mut hash = XHash::from([("a", 1), ("z", 26)]);
    /// hash.push_after("a", [Item::pairs([("b", 2), ("c", 3)])], false)?;
    ///
    /// let keys: Vec<_> = hash.keys().map(Key::to_string).collect();
    /// assert_eq!(keys, ["a", "b", "c", "z"]);
    /// # Ok::<(), xhash::XHashError>(())
    /// ```
    pub fn push_after<I>(&mut self, anchor: impl Into<Key>, items: I, nested: bool) -> Result<(), XHashError>
    where
        I: IntoIterator<Item = Item<T>>,
    {
        let anchor = anchor.into();
        let handle = self.ring.find(&anchor).ok_or(XHashError::MissingAnchor { key: anchor })?;
        self.insert_items(items, nested, Position::After(handle));
        Ok(())
    }

    /// Inserts `items` at the front of the hash, keeping their relative order.
    ///
    /// # Examples
    ///
    /// ```
    /// use xhash::{Item, Key, XHash};
    ///
    /// let mut hash: XHash<&str> = XHash::new();
    /// hash.push([Item::scalar("c")]);
    /// hash.unshift([Item::scalar("a"), Item::scalar("b")]);
    ///
    /// let keys: Vec<_> = hash.keys().cloned().collect();
    /// assert_eq!(keys, [Key::Index(1), Key::Index(2), Key::Index(0)]);
    /// ```
    pub fn unshift<I>(&mut self, items: I)
    where
        I: IntoIterator<Item = Item<T>>,
    {
        let position = self.front();
        self.insert_items(items, false, position);
    }

    /// Like [`unshift`](Self::unshift), with nested conversion of raw values.
    pub fn unshift_nested<I>(&mut self, items: I)
    where
        I: IntoIterator<Item = Item<T>>,
    {
        let position = self.front();
        self.insert_items(items, true, position);
    }

    /// Inserts `items` directly before `anchor`, keeping their relative order.
    ///
    /// # Errors
    ///
    /// Returns [`XHashError::MissingAnchor`] if `anchor` is not present.
    pub fn unshift_before<I>(&mut self, anchor: impl Into<Key>, items: I, nested: bool) -> Result<(), XHashError>
    where
        I: IntoIterator<Item = Item<T>>,
    {
        let anchor = anchor.into();
        let handle = self.ring.find(&anchor).ok_or(XHashError::MissingAnchor { key: anchor })?;
        self.insert_items(items, nested, Position::Before(handle));
        Ok(())
    }

    /// Removes and returns the last entry.
    ///
    /// # Examples
    ///
    /// ```
    /// use xhash::{Key, Value, XHash};
    ///
    /// let mut hash = XHash::from([("a", 1), ("b", 2)]);
    /// assert_eq!(hash.pop(), Some((Key::from("b"), Value::Scalar(2))));
    /// assert_eq!(hash.pop(), Some((Key::from("a"), Value::Scalar(1))));
    /// assert_eq!(hash.pop(), None);
    /// ```
    pub fn pop(&mut self) -> Option<(Key, Value<T>)> {
        let handle = self.ring.last()?;
        Some(self.unlink(handle))
    }

    /// Removes and returns the first entry.
    pub fn shift(&mut self) -> Option<(Key, Value<T>)> {
        let handle = self.ring.first()?;
        Some(self.unlink(handle))
    }

    fn front(&self) -> Position {
        match self.ring.first() {
            Some(first) => Position::Before(first),
            None => Position::Back,
        }
    }

    fn insert_items<I>(&mut self, items: I, nested: bool, mut position: Position)
    where
        I: IntoIterator<Item = Item<T>>,
    {
        for item in items {
            match item {
                Item::Value(value) => {
                    self.insert_at(None, value, nested, &mut position);
                }
                Item::Pairs(pairs) => {
                    for (key, value) in pairs {
                        self.insert_at(Some(key), value, nested, &mut position);
                    }
                }
                Item::Verbatim(value) => {
                    self.insert_at(None, value, false, &mut position);
                }
            }
        }
    }
}
