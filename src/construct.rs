//! Free constructors that build an [`XHash`] and bulk-insert into it.

use crate::{Item, XHash};

/// Builds an `XHash` by pushing `items` into a fresh one.
///
/// # Examples
///
/// ```
/// use xhash::{xhash, Item, Key};
///
/// let hash = xhash([Item::scalar("a"), Item::pairs([("k", "v")]), Item::scalar("b")]);
/// let keys: Vec<_> = hash.keys().map(Key::to_string).collect();
/// assert_eq!(keys, ["0", "k", "1"]);
/// ```
pub fn xhash<T, I>(items: I) -> XHash<T>
where
    I: IntoIterator<Item = Item<T>>,
{
    let mut hash = XHash::new();
    hash.push(items);
    hash
}

/// Like [`xhash`], converting raw lists and pairs into nested `XHash`es.
///
/// # Examples
///
/// ```
/// use xhash::{xhash_nested, Item, Path, Value};
///
/// let tree = xhash_nested([Item::Pairs(vec![(
///     "users".into(),
///     Value::List(vec![Value::Scalar("alice"), Value::Scalar("bob")]),
/// )])]);
///
/// let bob = tree.fetch_path(&Path::from(["users"]).key(1));
/// assert_eq!(bob.and_then(Value::as_scalar), Some(&"bob"));
/// ```
pub fn xhash_nested<T, I>(items: I) -> XHash<T>
where
    I: IntoIterator<Item = Item<T>>,
{
    let mut hash = XHash::new();
    hash.push_nested(items);
    hash
}
