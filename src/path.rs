//! Multi-segment addresses into trees of nested [`XHash`](crate::XHash)es.
//!
//! A [`Path`] is an ordered list of [`Segment`]s. Each segment is either an
//! explicit [`Key`] or [`Segment::Auto`], which stands for the next automatic
//! index of whichever container the walk has reached. An empty path behaves
//! as a single `Auto` segment.
//!
//! A path may also be marked with [`Path::container`]. The walk then insists
//! that the final segment names a nested container, creating or coercing one
//! as needed.
//!
//! ```
//! use xhash::{Path, XHash};
//!
//! let mut tree: XHash<&str> = XHash::new();
//! tree.store_path(&Path::new().key("users").key("alice").key("role"), "admin");
//!
//! let users = Path::from(["users"]);
//! assert!(tree.fetch_path(&users).unwrap().is_hash());
//! ```

use core::fmt;

use smallvec::SmallVec;

use crate::Key;

static AUTO: Segment = Segment::Auto;

/// One step of a [`Path`].
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Segment {
    /// An explicit key.
    Key(Key),
    /// The next automatic index of the current container.
    Auto,
}

macro_rules! segment_from_key {
    ($($t:ty),*) => {
        $(
            impl From<$t> for Segment {
                fn from(key: $t) -> Self {
                    Segment::Key(Key::from(key))
                }
            }
        )*
    };
}

segment_from_key!(Key, &Key, &str, String, i32, i64, u32, usize);

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Segment::Key(key) => key.fmt(f),
            Segment::Auto => f.write_str("[]"),
        }
    }
}

/// An owned path through nested containers.
///
/// Paths are built incrementally and are infallible to construct.
///
/// ```
/// use xhash::{Path, Segment};
///
/// let path = Path::new().key("a").auto().key(3).container();
/// assert_eq!(path.len(), 3);
/// assert_eq!(path.segments()[1], Segment::Auto);
/// assert!(path.is_container());
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Path {
    segments: SmallVec<[Segment; 4]>,
    container: bool,
}

impl Path {
    /// Creates an empty path, which addresses the next automatic index.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends any segment.
    #[must_use]
    pub fn push(mut self, segment: impl Into<Segment>) -> Self {
        self.segments.push(segment.into());
        self
    }

    /// Appends an explicit key segment.
    #[must_use]
    pub fn key(self, key: impl Into<Key>) -> Self {
        self.push(Segment::Key(key.into()))
    }

    /// Appends an automatic index segment.
    #[must_use]
    pub fn auto(self) -> Self {
        self.push(Segment::Auto)
    }

    /// Marks the final segment as required to hold a nested container.
    #[must_use]
    pub fn container(mut self) -> Self {
        self.container = true;
        self
    }

    pub fn is_container(&self) -> bool {
        self.container
    }

    /// Number of explicit segments. An empty path still walks one `Auto` step.
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Splits the walk into intermediate segments and the final one.
    pub(crate) fn split_terminal(&self) -> (&[Segment], &Segment) {
        match self.segments.split_last() {
            Some((terminal, intermediate)) => (intermediate, terminal),
            None => (&[], &AUTO),
        }
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, segment) in self.segments.iter().enumerate() {
            if i > 0 {
                f.write_str(".")?;
            }
            segment.fmt(f)?;
        }
        if self.container {
            f.write_str("{}")?;
        }
        Ok(())
    }
}

impl<S: Into<Segment>, const N: usize> From<[S; N]> for Path {
    fn from(segments: [S; N]) -> Self {
        segments.into_iter().collect()
    }
}

impl<S: Into<Segment>> From<Vec<S>> for Path {
    fn from(segments: Vec<S>) -> Self {
        segments.into_iter().collect()
    }
}

impl<S: Into<Segment>> FromIterator<S> for Path {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            segments: iter.into_iter().map(Into::into).collect(),
            container: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_path_is_a_single_auto_step() {
        let path = Path::new();
        let (intermediate, terminal) = path.split_terminal();
        assert!(intermediate.is_empty());
        assert_eq!(terminal, &Segment::Auto);
    }

    #[test]
    fn mixed_segments_from_builder() {
        let path = Path::new().key("a").auto().key(-2);
        assert_eq!(
            path.segments(),
            [Segment::Key(Key::from("a")), Segment::Auto, Segment::Key(Key::Index(-2))]
        );
        assert_eq!(path.to_string(), "a.[].-2");
    }

    #[test]
    fn display_marks_container_paths() {
        assert_eq!(Path::from(["a", "b"]).container().to_string(), "a.b{}");
    }
}
