mod arena;
mod handle;
mod raw_ring;

pub(crate) use handle::Handle;
pub(crate) use raw_ring::RawRing;
