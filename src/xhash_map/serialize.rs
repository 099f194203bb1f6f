//! `Serialize` support, enabled by the `serde` feature.
//!
//! An `XHash` serializes as a map in its own order, the same shape as
//! [`XHash::as_pairs`] with `nested` set. Integer keys serialize as integers,
//! which text formats such as JSON render as strings.

use serde::ser::{Serialize, SerializeMap, Serializer};

use super::XHash;
use crate::{Key, Value};

impl Serialize for Key {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Key::Index(n) => serializer.serialize_i64(*n),
            Key::Name(name) => serializer.serialize_str(name),
        }
    }
}

impl<T: Serialize> Serialize for Value<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Value::Scalar(value) => value.serialize(serializer),
            Value::Hash(hash) => hash.serialize(serializer),
            Value::List(items) => serializer.collect_seq(items),
            Value::Pairs(pairs) => serializer.collect_map(pairs.iter().map(|(key, value)| (key, value))),
        }
    }
}

impl<T: Serialize> Serialize for XHash<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.len()))?;
        for (key, value) in self {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}
