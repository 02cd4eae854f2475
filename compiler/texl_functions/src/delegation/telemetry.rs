//! Delegation telemetry: an injected, append-only event sink.

use parking_lot::Mutex;
use texl_ir::NodeId;
use texl_types::DataSourceId;

use super::NotDelegable;

/// One negative delegation decision.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct DelegationTelemetry {
    pub function: &'static str,
    pub node: NodeId,
    pub source: Option<DataSourceId>,
    pub reason: NotDelegable,
}

/// Receives delegation telemetry. Shared by concurrent binding passes.
pub trait TelemetrySink: Send + Sync {
    fn record(&self, event: DelegationTelemetry);
}

/// Discards every event.
#[derive(Copy, Clone, Default, Debug)]
pub struct NoopTelemetry;

impl TelemetrySink for NoopTelemetry {
    fn record(&self, _event: DelegationTelemetry) {}
}

/// Keeps every event in arrival order.
///
/// Events from one pass stay in the order that pass recorded them; events
/// from concurrent passes interleave arbitrarily.
#[derive(Default, Debug)]
pub struct RecordingTelemetry {
    events: Mutex<Vec<DelegationTelemetry>>,
}

impl RecordingTelemetry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of the events recorded so far.
    pub fn events(&self) -> Vec<DelegationTelemetry> {
        self.events.lock().clone()
    }

    pub fn take(&self) -> Vec<DelegationTelemetry> {
        std::mem::take(&mut *self.events.lock())
    }

    pub fn len(&self) -> usize {
        self.events.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.lock().is_empty()
    }
}

impl TelemetrySink for RecordingTelemetry {
    fn record(&self, event: DelegationTelemetry) {
        tracing::trace!(function = event.function, reason = ?event.reason, "delegation telemetry");
        self.events.lock().push(event);
    }
}
