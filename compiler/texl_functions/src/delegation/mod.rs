//! Can a call be evaluated by its data source instead of locally.
//!
//! A call is delegable when its first argument is a data-source table, the
//! source can evaluate the function's capability, and every row-scoped
//! argument is built only from things the source can evaluate too.
//! Negative answers are recorded to the context's telemetry sink and, when
//! the source could otherwise have delegated, surfaced as a warning.

mod eligibility;
mod telemetry;

use std::fmt;

use texl_diagnostic::{Diagnostic, ErrorCode};
use texl_ir::NodeId;
use texl_types::DataSourceId;

use crate::descriptor::{DelegationCapability, FunctionDescriptor};
use crate::{CallSite, CheckContext, FunctionRegistry};

pub use telemetry::{DelegationTelemetry, NoopTelemetry, RecordingTelemetry, TelemetrySink};

/// Why a call stays local.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum NotDelegable {
    /// The function has no server-side counterpart.
    FunctionNotDelegable,
    /// The first argument is not bound to a data source.
    NoDataSource,
    /// The source evaluates nothing server-side.
    SourceNotDelegatable,
    /// The source lacks a capability the call needs.
    MissingCapability(DelegationCapability),
    /// The table reaches its rows through a one-to-many relationship.
    OneToMany,
    /// A row-scoped argument contains a node the source cannot evaluate.
    UnsupportedExpression(NodeId),
    /// The call did not type-check.
    InvalidCall,
}

impl fmt::Display for NotDelegable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::FunctionNotDelegable => f.write_str("function cannot be delegated"),
            Self::NoDataSource => f.write_str("first argument is not a data source"),
            Self::SourceNotDelegatable => f.write_str("data source does not support delegation"),
            Self::MissingCapability(capability) => {
                write!(f, "data source does not support {capability:?}")
            }
            Self::OneToMany => f.write_str("one-to-many relationship"),
            Self::UnsupportedExpression(node) => write!(f, "{node:?} cannot be delegated"),
            Self::InvalidCall => f.write_str("call is not valid"),
        }
    }
}

/// Everything a delegation decision may consult.
#[derive(Copy, Clone)]
pub struct DelegationQuery<'a> {
    pub cx: &'a CheckContext<'a>,
    pub call: &'a CallSite<'a>,
    pub registry: &'a FunctionRegistry,
    pub descriptor: &'a FunctionDescriptor,
}

impl DelegationQuery<'_> {
    /// Source of the first argument.
    pub fn source(&self) -> Option<DataSourceId> {
        self.call.arg_types().first()?.source()
    }

    /// The first argument reaches its rows through a relationship.
    pub fn has_expand_info(&self) -> bool {
        self.call
            .arg_types()
            .first()
            .is_some_and(texl_types::DType::has_expand_info)
    }
}

/// The decision for one call site.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct DelegationCheck {
    pub delegable: bool,
    pub reason: Option<NotDelegable>,
    /// Present when a delegatable source had to fall back to local
    /// evaluation.
    pub diagnostic: Option<Diagnostic>,
}

impl DelegationCheck {
    pub(crate) fn delegable() -> Self {
        DelegationCheck {
            delegable: true,
            reason: None,
            diagnostic: None,
        }
    }

    pub(crate) fn local(reason: NotDelegable, diagnostic: Option<Diagnostic>) -> Self {
        DelegationCheck {
            delegable: false,
            reason: Some(reason),
            diagnostic,
        }
    }
}

/// The rule shared by table functions: a delegatable source that supports
/// `capability`, and delegable row-scoped arguments.
pub fn default_delegation(
    capability: DelegationCapability,
    query: &DelegationQuery<'_>,
) -> Result<(), NotDelegable> {
    if capability.is_empty() {
        return Err(NotDelegable::FunctionNotDelegable);
    }
    let source = query.source().ok_or(NotDelegable::NoDataSource)?;
    let catalog = query.cx.catalog;
    if !catalog.is_delegatable(source) {
        return Err(NotDelegable::SourceNotDelegatable);
    }
    if !catalog.supports_delegation(source, capability) {
        return Err(NotDelegable::MissingCapability(capability));
    }
    for (index, &node) in query.call.args().iter().enumerate() {
        if query.descriptor.is_lambda(index) {
            eligibility::check_row_expr(query, source, node)
                .map_err(NotDelegable::UnsupportedExpression)?;
        }
    }
    Ok(())
}

/// The warning for a negative decision, if the source could delegate in
/// principle. Local-only sources get no warning: there was never anything
/// to lose.
pub(crate) fn fallback_diagnostic(
    query: &DelegationQuery<'_>,
    reason: &NotDelegable,
) -> Option<Diagnostic> {
    let source = query.source()?;
    if !query.cx.catalog.is_delegatable(source) {
        return None;
    }
    let code = match reason {
        NotDelegable::OneToMany => ErrorCode::W4002,
        NotDelegable::MissingCapability(_)
        | NotDelegable::UnsupportedExpression(_)
        | NotDelegable::FunctionNotDelegable => ErrorCode::W4001,
        NotDelegable::NoDataSource | NotDelegable::SourceNotDelegatable | NotDelegable::InvalidCall => {
            return None
        }
    };
    let node = query.call.node();
    let source_name = query.cx.catalog.name(source).unwrap_or("data source");
    Some(
        Diagnostic::new(code)
            .at(node, query.cx.arena.span(node))
            .with_message(format!(
                "{} over {source_name} is evaluated locally: {reason}",
                query.descriptor.name
            ))
            .with_arg(query.descriptor.name)
            .with_arg(source_name),
    )
}
