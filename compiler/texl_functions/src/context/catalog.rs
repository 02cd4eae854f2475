//! The narrow view the checker has of connected data sources.

use rustc_hash::FxHashMap;
use texl_types::DataSourceId;

use crate::DelegationCapability;

/// Host-provided answers about data sources.
///
/// The checker never looks inside a provider; it only asks these
/// questions.
pub trait DataSourceCatalog: Send + Sync {
    /// Display name for diagnostics.
    fn name(&self, source: DataSourceId) -> Option<&str>;

    /// The source can evaluate queries server-side at all.
    fn is_delegatable(&self, source: DataSourceId) -> bool;

    /// The source can evaluate `capability` server-side.
    fn supports_delegation(&self, source: DataSourceId, capability: DelegationCapability) -> bool;

    /// The source is a collection whose rows can be removed by `Clear`.
    fn is_clearable(&self, source: DataSourceId) -> bool;

    /// The source is a connected tabular source usable with `AsType`.
    fn is_connected(&self, source: DataSourceId) -> bool;
}

/// Catalog of a host without data sources.
#[derive(Copy, Clone, Default, Debug)]
pub struct NoDataSources;

impl DataSourceCatalog for NoDataSources {
    fn name(&self, _source: DataSourceId) -> Option<&str> {
        None
    }

    fn is_delegatable(&self, _source: DataSourceId) -> bool {
        false
    }

    fn supports_delegation(&self, _source: DataSourceId, _capability: DelegationCapability) -> bool {
        false
    }

    fn is_clearable(&self, _source: DataSourceId) -> bool {
        false
    }

    fn is_connected(&self, _source: DataSourceId) -> bool {
        false
    }
}

/// What the host knows about one source.
#[derive(Clone, Debug)]
pub struct DataSourceInfo {
    pub name: String,
    /// Operations the source evaluates server-side. Empty means local only.
    pub capabilities: DelegationCapability,
    pub clearable: bool,
    pub connected: bool,
}

impl DataSourceInfo {
    /// A local collection: clearable, nothing delegated.
    pub fn collection(name: impl Into<String>) -> Self {
        DataSourceInfo {
            name: name.into(),
            capabilities: DelegationCapability::empty(),
            clearable: true,
            connected: false,
        }
    }

    /// A connected source delegating `capabilities`.
    pub fn connected(name: impl Into<String>, capabilities: DelegationCapability) -> Self {
        DataSourceInfo {
            name: name.into(),
            capabilities,
            clearable: false,
            connected: true,
        }
    }
}

/// Catalog backed by a fixed map, built before binding starts.
#[derive(Clone, Debug, Default)]
pub struct StaticCatalog {
    sources: FxHashMap<DataSourceId, DataSourceInfo>,
}

impl StaticCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_source(mut self, id: DataSourceId, info: DataSourceInfo) -> Self {
        self.sources.insert(id, info);
        self
    }

    pub fn insert(&mut self, id: DataSourceId, info: DataSourceInfo) -> Option<DataSourceInfo> {
        self.sources.insert(id, info)
    }

    pub fn get(&self, id: DataSourceId) -> Option<&DataSourceInfo> {
        self.sources.get(&id)
    }
}

impl DataSourceCatalog for StaticCatalog {
    fn name(&self, source: DataSourceId) -> Option<&str> {
        self.get(source).map(|info| info.name.as_str())
    }

    fn is_delegatable(&self, source: DataSourceId) -> bool {
        self.get(source).is_some_and(|info| !info.capabilities.is_empty())
    }

    fn supports_delegation(&self, source: DataSourceId, capability: DelegationCapability) -> bool {
        self.get(source)
            .is_some_and(|info| info.capabilities.contains(capability))
    }

    fn is_clearable(&self, source: DataSourceId) -> bool {
        self.get(source).is_some_and(|info| info.clearable)
    }

    fn is_connected(&self, source: DataSourceId) -> bool {
        self.get(source).is_some_and(|info| info.connected)
    }
}
