//! Field and function identifiers.

use std::fmt;

/// An interned Texl identifier: a record field, a function or a namespace.
///
/// Texl identifiers are case-sensitive, so `Price` and `price` are two
/// names. Two names are equal exactly when their text is equal, which makes
/// field lookup in record types a plain integer comparison.
///
/// The id packs the interner shard into its top bits and the slot within
/// that shard into the rest. `Ord` therefore follows interning order, not
/// spelling; anything shown to users sorts by looked-up text.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Default)]
#[repr(transparent)]
pub struct Name(u32);

const SHARD_BITS: u32 = 4;
const SLOT_BITS: u32 = u32::BITS - SHARD_BITS;

impl Name {
    /// The empty identifier, interned up front in shard 0.
    pub const EMPTY: Name = Name(0);

    /// Slots available in one shard.
    pub(crate) const MAX_LOCAL: u32 = (1 << SLOT_BITS) - 1;

    pub(crate) const NUM_SHARDS: usize = 1 << SHARD_BITS;

    #[inline]
    pub(crate) const fn new(shard: u32, local: u32) -> Self {
        debug_assert!(shard < (1 << SHARD_BITS));
        debug_assert!(local <= Self::MAX_LOCAL);
        Name((shard << SLOT_BITS) | local)
    }

    #[inline]
    pub(crate) const fn shard(self) -> usize {
        (self.0 >> SLOT_BITS) as usize
    }

    #[inline]
    pub(crate) const fn local(self) -> usize {
        (self.0 & Self::MAX_LOCAL) as usize
    }

    #[inline]
    pub const fn is_empty(self) -> bool {
        self.0 == Self::EMPTY.0
    }
}

impl fmt::Debug for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Name#{}.{}", self.shard(), self.local())
    }
}

#[cfg(test)]
mod tests;
