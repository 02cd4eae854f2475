//! Handles to things the type system refers to but does not own.

use std::fmt;

/// A connected data source, as registered by the host.
///
/// Table and record types produced by reading a source carry its id so the
/// delegation query can ask the host about that source's capabilities.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct DataSourceId(u32);

impl DataSourceId {
    #[inline]
    pub const fn new(raw: u32) -> Self {
        Self(raw)
    }

    #[inline]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl fmt::Debug for DataSourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "DataSource#{}", self.0)
    }
}

/// An option set (or enum) definition owned by the host.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct OptionSetId(u32);

impl OptionSetId {
    #[inline]
    pub const fn new(raw: u32) -> Self {
        Self(raw)
    }

    #[inline]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl fmt::Debug for OptionSetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "OptionSet#{}", self.0)
    }
}
