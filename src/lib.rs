//! Insertion-ordered hashes that double as lists and trees.
//!
//! This crate provides [`XHash`], an ordered associative container that
//! unifies list-like and map-like access:
//!
//! - Entries iterate in insertion order; overwriting a key keeps its place.
//! - Entries stored without a key get the next free integer index
//!   ([`store_auto`](XHash::store_auto), [`push`](XHash::push)).
//! - Values may be nested `XHash`es, addressed with multi-segment [`Path`]s
//!   that create missing containers on store.
//! - Bulk operations reposition, rename and renumber entries
//!   ([`reorder`](XHash::reorder), [`remap`](XHash::remap),
//!   [`renumber`](XHash::renumber)).
//!
//! # Example
//!
//! ```
//! use xhash::{xhash, Item, Key, Path, Value};
//!
//! let mut doc = xhash([Item::scalar("intro"), Item::scalar("body")]);
//! doc.store("title", "Notes");
//! doc.store_path(&Path::new().key("meta").key("tags").auto(), "draft");
//!
//! let keys: Vec<_> = doc.keys().map(Key::to_string).collect();
//! assert_eq!(keys, ["0", "1", "title", "meta"]);
//!
//! let tag = doc.fetch_path(&Path::from(["meta", "tags"]).key(0));
//! assert_eq!(tag.and_then(Value::as_scalar), Some(&"draft"));
//! ```
//!
//! # Features
//!
//! - **`serde`** - `Serialize` implementations; an `XHash` serializes as an
//!   ordered map.
//!
//! # Implementation
//!
//! Entries live in a circular doubly-linked ring stored in an arena. Links
//! name their neighbours by arena handle, and a hash index maps keys to
//! handles, so every single-key operation is O(1) and no reference cycles
//! exist. Nothing is synchronized; share an `XHash` across threads behind a
//! lock.

#![forbid(keyword_idents)]
#![forbid(non_ascii_idents)]
#![forbid(unsafe_code)]
#![forbid(unreachable_pub)]
#![warn(clippy::all)]
#![warn(clippy::cargo)]
#![warn(clippy::pedantic)]
#![allow(clippy::must_use_candidate)]

mod construct;
mod error;
mod key;
mod raw;
mod value;

pub mod path;
pub mod xhash_map;

pub use construct::{xhash, xhash_nested};
pub use error::XHashError;
pub use key::Key;
pub use path::{Path, Segment};
pub use value::{Item, Value};
pub use xhash_map::XHash;
