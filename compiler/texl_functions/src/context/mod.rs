//! Per-pass inputs shared by every call-site check.

mod catalog;

use texl_ir::{NodeArena, StringInterner};
use texl_types::Features;

use crate::delegation::{NoopTelemetry, TelemetrySink};

pub use catalog::{DataSourceCatalog, DataSourceInfo, NoDataSources, StaticCatalog};

static NO_DATA_SOURCES: NoDataSources = NoDataSources;
static NOOP_TELEMETRY: NoopTelemetry = NoopTelemetry;

/// Everything a check may consult besides the call site itself.
///
/// Built by the host once per binding pass. All references are shared, so
/// independent passes over the same registry can run in parallel.
#[derive(Copy, Clone)]
pub struct CheckContext<'a> {
    pub features: &'a Features,
    pub interner: &'a StringInterner,
    pub arena: &'a NodeArena,
    pub catalog: &'a dyn DataSourceCatalog,
    pub telemetry: &'a dyn TelemetrySink,
    /// The formula is a behavior formula, where data may change.
    pub behavior_allowed: bool,
}

impl<'a> CheckContext<'a> {
    /// A data formula with no data sources and telemetry discarded.
    pub fn new(features: &'a Features, interner: &'a StringInterner, arena: &'a NodeArena) -> Self {
        CheckContext {
            features,
            interner,
            arena,
            catalog: &NO_DATA_SOURCES,
            telemetry: &NOOP_TELEMETRY,
            behavior_allowed: false,
        }
    }

    #[must_use]
    pub fn with_catalog(mut self, catalog: &'a dyn DataSourceCatalog) -> Self {
        self.catalog = catalog;
        self
    }

    #[must_use]
    pub fn with_telemetry(mut self, telemetry: &'a dyn TelemetrySink) -> Self {
        self.telemetry = telemetry;
        self
    }

    #[must_use]
    pub fn with_behavior(mut self, allowed: bool) -> Self {
        self.behavior_allowed = allowed;
        self
    }
}

impl std::fmt::Debug for CheckContext<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CheckContext")
            .field("features", self.features)
            .field("nodes", &self.arena.len())
            .field("behavior_allowed", &self.behavior_allowed)
            .finish_non_exhaustive()
    }
}
