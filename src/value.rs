use crate::{Key, XHash};

/// A value stored in an [`XHash`].
///
/// Only [`Value::Hash`] is a container as far as path traversal is concerned.
/// [`Value::List`] and [`Value::Pairs`] are raw structures: they are stored
/// opaquely unless a `nested` operation converts them into nested `XHash`es.
///
/// # Examples
///
/// ```
/// use xhash::{Value, XHash};
///
/// let raw: Value<i32> = Value::List(vec![Value::Scalar(1), Value::Scalar(2)]);
/// let hash = raw.into_nested();
///
/// let inner = hash.as_hash().unwrap();
/// assert_eq!(inner.fetch(1).and_then(Value::as_scalar), Some(&2));
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Value<T> {
    /// A leaf payload.
    Scalar(T),
    /// A nested container.
    Hash(XHash<T>),
    /// A raw sequential structure.
    List(Vec<Value<T>>),
    /// A raw associative structure, in its own iteration order.
    Pairs(Vec<(Key, Value<T>)>),
}

impl<T> Value<T> {
    /// Returns true if this is a nested container.
    pub fn is_hash(&self) -> bool {
        matches!(self, Value::Hash(_))
    }

    /// Returns true if this is a leaf payload.
    pub fn is_scalar(&self) -> bool {
        matches!(self, Value::Scalar(_))
    }

    /// Returns the leaf payload, if this is one.
    pub fn as_scalar(&self) -> Option<&T> {
        match self {
            Value::Scalar(value) => Some(value),
            _ => None,
        }
    }

    /// Returns the leaf payload mutably, if this is one.
    pub fn as_scalar_mut(&mut self) -> Option<&mut T> {
        match self {
            Value::Scalar(value) => Some(value),
            _ => None,
        }
    }

    /// Returns the nested container, if this is one.
    pub fn as_hash(&self) -> Option<&XHash<T>> {
        match self {
            Value::Hash(hash) => Some(hash),
            _ => None,
        }
    }

    /// Returns the nested container mutably, if this is one.
    pub fn as_hash_mut(&mut self) -> Option<&mut XHash<T>> {
        match self {
            Value::Hash(hash) => Some(hash),
            _ => None,
        }
    }

    /// Unwraps the leaf payload, if this is one.
    pub fn into_scalar(self) -> Option<T> {
        match self {
            Value::Scalar(value) => Some(value),
            _ => None,
        }
    }

    /// Unwraps the nested container, if this is one.
    pub fn into_hash(self) -> Option<XHash<T>> {
        match self {
            Value::Hash(hash) => Some(hash),
            _ => None,
        }
    }

    /// Returns the variant name, for messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Scalar(_) => "scalar",
            Value::Hash(_) => "hash",
            Value::List(_) => "list",
            Value::Pairs(_) => "pairs",
        }
    }

    /// Recursively turns raw [`List`](Value::List) and [`Pairs`](Value::Pairs)
    /// structures into nested [`XHash`]es.
    ///
    /// Lists become auto-indexed entries, pairs become explicitly keyed
    /// entries. Scalars and existing hashes are returned unchanged.
    #[must_use]
    pub fn into_nested(self) -> Self {
        match self {
            Value::List(items) => {
                let mut hash = XHash::with_capacity(items.len());
                for item in items {
                    hash.store_with(None, item, true);
                }
                Value::Hash(hash)
            }
            Value::Pairs(pairs) => {
                let mut hash = XHash::with_capacity(pairs.len());
                for (key, item) in pairs {
                    hash.store_with(Some(key), item, true);
                }
                Value::Hash(hash)
            }
            other => other,
        }
    }
}

impl<T> From<T> for Value<T> {
    fn from(value: T) -> Self {
        Value::Scalar(value)
    }
}

impl<T> From<XHash<T>> for Value<T> {
    fn from(hash: XHash<T>) -> Self {
        Value::Hash(hash)
    }
}

/// One argument to a bulk insertion such as [`XHash::push`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Item<T> {
    /// Stored at the next automatic index. Raw structures are converted when
    /// the insertion is nested.
    Value(Value<T>),
    /// Expanded into one explicitly keyed store per pair, in order.
    Pairs(Vec<(Key, Value<T>)>),
    /// Stored at the next automatic index exactly as given, never expanded
    /// and never converted, even by nested insertions.
    Verbatim(Value<T>),
}

impl<T> Item<T> {
    /// Shorthand for an auto-indexed scalar.
    pub fn scalar(value: T) -> Self {
        Item::Value(Value::Scalar(value))
    }

    /// Shorthand for a list of explicitly keyed scalars.
    pub fn pairs<K, I>(pairs: I) -> Self
    where
        K: Into<Key>,
        I: IntoIterator<Item = (K, T)>,
    {
        Item::Pairs(pairs.into_iter().map(|(key, value)| (key.into(), Value::Scalar(value))).collect())
    }
}

impl<T> From<Value<T>> for Item<T> {
    fn from(value: Value<T>) -> Self {
        Item::Value(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nested_conversion_recurses() {
        let raw: Value<&str> = Value::Pairs(vec![
            (Key::from("name"), Value::Scalar("root")),
            (Key::from("children"), Value::List(vec![Value::Scalar("a"), Value::Scalar("b")])),
        ]);

        let Value::Hash(hash) = raw.into_nested() else {
            panic!("expected a hash");
        };
        let children = hash.fetch("children").and_then(Value::as_hash).unwrap();
        assert_eq!(children.fetch(0).and_then(Value::as_scalar), Some(&"a"));
        assert_eq!(children.fetch(1).and_then(Value::as_scalar), Some(&"b"));
    }

    #[test]
    fn scalars_pass_through_conversion() {
        assert_eq!(Value::Scalar(3).into_nested(), Value::Scalar(3));
        assert_eq!(Value::Scalar(3).type_name(), "scalar");
    }
}
