use core::fmt;

/// A key inside an [`XHash`](crate::XHash).
///
/// Keys are either integer indices or explicit names. Strings that spell a
/// canonical decimal `i64` (`"7"`, `"-3"`, but not `"07"` or `"+7"`) convert to
/// [`Key::Index`], so `Key::from("7") == Key::from(7)`. Other digit strings
/// stay names, distinct from the index they spell, but still count as
/// integers by their value: `"007"` is a separate key from `7` that
/// nevertheless reserves index 7.
///
/// Two overlapping integer classes matter to the container:
///
/// - *auto-index* keys are digits only, without a sign. They drive allocation
///   of the next automatic index.
/// - *index* keys may also carry a leading `-`. They are what
///   [`XHash::index_keys`](crate::XHash::index_keys) and
///   [`XHash::renumber`](crate::XHash::renumber) select.
///
/// A negative key is therefore legal and stable, never handed out
/// automatically, yet still renumbered and sorted with the other indices.
///
/// # Examples
///
/// ```
/// use xhash::Key;
///
/// assert_eq!(Key::from("12"), Key::Index(12));
/// assert_eq!(Key::from("012"), Key::Name("012".to_string()));
/// assert_eq!(Key::from("012").auto_index(), Some(12));
/// assert!(Key::from(-1).is_index());
/// assert!(!Key::from(-1).is_auto_index());
/// assert_eq!(Key::from("-0").index(), Some(0));
/// assert_eq!(Key::from("-0").auto_index(), None);
/// ```
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub enum Key {
    /// An integer index, possibly negative.
    Index(i64),
    /// Any other identifier.
    Name(String),
}

impl Key {
    /// Returns the index when this key is a non-negative integer, written as
    /// digits only when it is a name.
    #[must_use]
    pub fn auto_index(&self) -> Option<i64> {
        match self {
            Key::Index(n) if *n >= 0 => Some(*n),
            Key::Index(_) => None,
            Key::Name(name) => digits_value(name),
        }
    }

    /// Returns `true` for non-negative integer keys.
    #[must_use]
    pub fn is_auto_index(&self) -> bool {
        self.auto_index().is_some()
    }

    /// Returns the index when this key is any integer, negative ones included.
    #[must_use]
    pub fn index(&self) -> Option<i64> {
        match self {
            Key::Index(n) => Some(*n),
            Key::Name(name) => match name.strip_prefix('-') {
                Some(digits) => digits_value(digits).map(|n| -n),
                None => digits_value(name),
            },
        }
    }

    /// Returns `true` for integer keys, negative ones included.
    #[must_use]
    pub fn is_index(&self) -> bool {
        self.index().is_some()
    }

    /// Returns the name for non-integer keys.
    #[must_use]
    pub fn as_name(&self) -> Option<&str> {
        match self {
            Key::Name(name) => Some(name),
            Key::Index(_) => None,
        }
    }
}

/// Value of a non-empty run of ASCII digits, leading zeros allowed.
fn digits_value(text: &str) -> Option<i64> {
    if text.is_empty() || !text.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    text.parse().ok()
}

fn parse_index(text: &str) -> Option<i64> {
    let digits = text.strip_prefix('-').unwrap_or(text);
    let canonical = !digits.is_empty()
        && digits.bytes().all(|b| b.is_ascii_digit())
        && (digits == "0" || !digits.starts_with('0'))
        && text != "-0";
    if canonical { text.parse().ok() } else { None }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Key::Index(n) => write!(f, "{n}"),
            Key::Name(name) => f.write_str(name),
        }
    }
}

impl From<&str> for Key {
    fn from(text: &str) -> Self {
        match parse_index(text) {
            Some(n) => Key::Index(n),
            None => Key::Name(text.to_owned()),
        }
    }
}

impl From<String> for Key {
    fn from(text: String) -> Self {
        match parse_index(&text) {
            Some(n) => Key::Index(n),
            None => Key::Name(text),
        }
    }
}

impl From<&Key> for Key {
    fn from(key: &Key) -> Self {
        key.clone()
    }
}

macro_rules! key_from_int {
    ($($t:ty),*) => {
        $(
            impl From<$t> for Key {
                fn from(n: $t) -> Self {
                    Key::Index(i64::from(n))
                }
            }
        )*
    };
}

key_from_int!(i8, i16, i32, i64, u8, u16, u32);

impl From<usize> for Key {
    fn from(n: usize) -> Self {
        Key::Index(i64::try_from(n).expect("`Key::from()` - index does not fit in an `i64`"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn canonical_integers_become_indices() {
        assert_eq!(Key::from("0"), Key::Index(0));
        assert_eq!(Key::from("42"), Key::Index(42));
        assert_eq!(Key::from("-5"), Key::Index(-5));
        assert_eq!(Key::from(String::from("9")), Key::Index(9));
    }

    #[test]
    fn non_canonical_text_stays_a_name() {
        for text in ["", "-", "-0", "007", "+1", "1.0", " 1", "abc", "99999999999999999999"] {
            assert_eq!(Key::from(text), Key::Name(text.to_owned()), "{text:?}");
        }
    }

    #[test]
    fn classes_differ_on_negatives() {
        let negative = Key::Index(-1);
        assert!(negative.is_index());
        assert!(!negative.is_auto_index());
        assert_eq!(Key::Index(3).auto_index(), Some(3));
        assert_eq!(Key::from("a").index(), None);
    }

    #[test]
    fn padded_digits_count_by_value() {
        let padded = Key::from("007");
        assert_ne!(padded, Key::Index(7));
        assert_eq!(padded.auto_index(), Some(7));
        assert_eq!(padded.index(), Some(7));

        assert_eq!(Key::from("-0").auto_index(), None);
        assert_eq!(Key::from("-0").index(), Some(0));
        assert_eq!(Key::from("-007").index(), Some(-7));

        for text in ["+1", "1.0", " 1", "-", "", "abc", "99999999999999999999"] {
            assert_eq!(Key::from(text).index(), None, "{text:?}");
        }
    }

    #[test]
    fn display_matches_literal_form() {
        assert_eq!(Key::Index(-12).to_string(), "-12");
        assert_eq!(Key::from("name").to_string(), "name");
    }
}
