use super::XHash;
use crate::{Key, Value};

impl<T: Clone> XHash<T> {
    /// Exports the hash as a sequence, in order.
    ///
    /// Entries under non-negative integer keys contribute their bare value;
    /// every other entry becomes a single-pair [`Value::Pairs`]. With `nested`
    /// nested hashes are exported the same way instead of being cloned whole.
    ///
    /// # Examples
    ///
    /// ```
    /// use xhash::{Item, Key, Value, XHash};
    ///
    /// let mut hash: XHash<&str> = XHash::new();
    /// hash.push([Item::scalar("a"), Item::pairs([("k", "v")])]);
    ///
    /// assert_eq!(
    ///     hash.as_sequence(false),
    ///     [Value::Scalar("a"), Value::Pairs(vec![(Key::from("k"), Value::Scalar("v"))])]
    /// );
    /// ```
    #[must_use]
    pub fn as_sequence(&self, nested: bool) -> Vec<Value<T>> {
        self.iter()
            .map(|(key, value)| {
                let value = export(value, nested, Form::Sequence);
                if key.is_auto_index() {
                    value
                } else {
                    Value::Pairs(vec![(key.clone(), value)])
                }
            })
            .collect()
    }

    /// Exports the hash as key/value pairs, in order.
    ///
    /// With `nested` every nested hash becomes a [`Value::Pairs`] as well.
    #[must_use]
    pub fn as_pairs(&self, nested: bool) -> Vec<(Key, Value<T>)> {
        self.iter().map(|(key, value)| (key.clone(), export(value, nested, Form::Pairs))).collect()
    }
}

#[derive(Clone, Copy)]
enum Form {
    Sequence,
    Pairs,
}

fn export<T: Clone>(value: &Value<T>, nested: bool, form: Form) -> Value<T> {
    if !nested {
        return value.clone();
    }
    match value {
        Value::Hash(hash) => match form {
            Form::Sequence => Value::List(hash.as_sequence(true)),
            Form::Pairs => Value::Pairs(hash.as_pairs(true)),
        },
        Value::List(items) => Value::List(items.iter().map(|item| export(item, true, form)).collect()),
        Value::Pairs(pairs) => {
            Value::Pairs(pairs.iter().map(|(key, item)| (key.clone(), export(item, true, form))).collect())
        }
        Value::Scalar(_) => value.clone(),
    }
}

#[cfg(test)]
mod tests {
    use crate::{Item, Key, Path, Value, XHash};

    #[test]
    fn negative_keys_are_wrapped_in_sequences() {
        let mut hash: XHash<i32> = XHash::new();
        hash.store(-1, 7);
        hash.store_auto(8);
        assert_eq!(
            hash.as_sequence(false),
            [Value::Pairs(vec![(Key::Index(-1), Value::Scalar(7))]), Value::Scalar(8)]
        );
    }

    #[test]
    fn nested_export_expands_children() {
        let mut hash: XHash<i32> = XHash::new();
        hash.store_path(&Path::new().key("a").auto(), 1);
        hash.store_path(&Path::new().key("a").auto(), 2);

        assert_eq!(
            hash.as_sequence(true),
            [Value::Pairs(vec![(Key::from("a"), Value::List(vec![Value::Scalar(1), Value::Scalar(2)]))])]
        );
        assert_eq!(
            hash.as_pairs(true),
            [(
                Key::from("a"),
                Value::Pairs(vec![(Key::Index(0), Value::Scalar(1)), (Key::Index(1), Value::Scalar(2))])
            )]
        );
    }

    #[test]
    fn opaque_export_keeps_hash_values() {
        let mut hash: XHash<i32> = XHash::new();
        hash.push_nested([Item::Value(Value::List(vec![Value::Scalar(1)]))]);
        assert!(hash.as_pairs(false)[0].1.is_hash());
    }
}
