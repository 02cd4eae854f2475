//! Texl function library and call-site checking.
//!
//! The binder hands every call node to [`FunctionRegistry::check_call`]
//! together with the already-checked argument types. The registry picks the
//! overload, runs the checking protocol ([`check_overload`]) and returns a
//! [`CallCheckResult`]: the return type, the conversions to insert at
//! argument nodes and the diagnostics.
//!
//! # Pieces
//!
//! - [`FunctionDescriptor`]: declarative overload data (arity, parameters,
//!   return derivation, purity, delegation capability)
//! - [`FunctionOverload`]: the hooks an overload implements
//! - [`Builtin`]: the generic overload driven by a descriptor row
//! - [`FunctionRegistry`]: name lookup, overload selection, delegation and
//!   signature queries
//! - [`CheckContext`]: features, interner, node arena, data source catalog
//!   and telemetry sink for one binding pass
//!
//! The registry is immutable once built and is shared by reference between
//! concurrent binding passes.

mod bespoke;
mod builtins;
mod check;
mod combinators;
mod context;
pub mod delegation;
mod descriptor;
mod overload;
mod registry;
mod signatures;
mod tracing_setup;

#[cfg(test)]
pub(crate) mod test_support;

pub use builtins::{register_builtins, BUILTINS};
pub use check::{
    check_overload, CallCheckResult, CallChecker, CallSite, CheckPhase, CheckedCall, FailedCall,
};
pub use combinators::{resolve_return, scalar_return, Builtin};
pub use context::{CheckContext, DataSourceCatalog, DataSourceInfo, NoDataSources, StaticCatalog};
pub use delegation::{
    DelegationCheck, DelegationQuery, DelegationTelemetry, NoopTelemetry, NotDelegable,
    RecordingTelemetry, TelemetrySink,
};
pub use descriptor::{
    ArgMask, Arity, DelegationCapability, FunctionCategory, FunctionDescriptor, FunctionFlags,
    ParamSpec, ReturnSpec, Scalar, ScalarReturn, Shape,
};
pub use overload::FunctionOverload;
pub use registry::{FunctionRegistry, RegistryError, Resolution};
pub use signatures::{signature_for_arity, signatures, Signature};
pub use tracing_setup::init_tracing;
