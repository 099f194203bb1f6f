use core::fmt;
use core::num::NonZero;

#[cfg(test)]
type RawHandle = u16;
#[cfg(not(test))]
type RawHandle = u32;

/// Names one ring link by its slot in the link arena.
///
/// Slots are stored plus one, so `Option<Handle>` (the ring tail, iterator
/// cursors) is no larger than a handle.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
#[repr(transparent)]
pub(crate) struct Handle(NonZero<RawHandle>);

impl Handle {
    /// Largest slot a handle can name.
    pub(crate) const MAX: usize = (RawHandle::MAX - 1) as usize;

    /// Neighbour of a link that has been allocated but not spliced yet.
    pub(crate) const UNLINKED: Self = Self::from_slot(0);

    /// Returns the handle for `slot`, or `None` past [`Handle::MAX`].
    #[allow(clippy::cast_possible_truncation)]
    pub(crate) const fn try_from_slot(slot: usize) -> Option<Self> {
        if slot > Self::MAX {
            return None;
        }
        match NonZero::new((slot + 1) as RawHandle) {
            Some(raw) => Some(Self(raw)),
            None => None,
        }
    }

    pub(crate) const fn from_slot(slot: usize) -> Self {
        match Self::try_from_slot(slot) {
            Some(handle) => handle,
            None => panic!("`Handle::from_slot()` - `slot` > `Handle::MAX`!"),
        }
    }

    #[inline]
    pub(crate) const fn slot(self) -> usize {
        (self.0.get() - 1) as usize
    }
}

impl fmt::Display for Handle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "link#{}", self.slot())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use static_assertions::assert_eq_size;

    assert_eq_size!(Handle, Option<Handle>);
    assert_eq_size!(Handle, RawHandle);

    #[test]
    fn slot_past_max_has_no_handle() {
        assert_eq!(Handle::try_from_slot(Handle::MAX + 1), None);
        assert_eq!(Handle::try_from_slot(Handle::MAX).map(Handle::slot), Some(Handle::MAX));
    }

    #[test]
    #[should_panic(expected = "`Handle::from_slot()` - `slot` > `Handle::MAX`!")]
    fn from_slot_past_max_panics() {
        let _ = Handle::from_slot(Handle::MAX + 1);
    }

    #[test]
    fn display_names_the_slot() {
        assert_eq!(Handle::from_slot(41).to_string(), "link#41");
        assert_eq!(Handle::UNLINKED.slot(), 0);
    }

    proptest! {
        #[test]
        fn slot_survives_handle(slot in 0..=Handle::MAX) {
            prop_assert_eq!(Handle::from_slot(slot).slot(), slot);
        }
    }
}
