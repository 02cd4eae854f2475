//! The per-call-site checking protocol.
//!
//! ```text
//! Started ─► ArityChecked ─► BaseTypesChecked ─► OverloadSpecificChecked ─► SemanticsChecked
//!    │             │                  │                     │
//!    └─────────────┴──────────────────┴─────────────────────┴──► Invalid
//! ```
//!
//! 1. Arity is checked before any overload code runs; a failure ends the
//!    check.
//! 2. Every argument is checked against the declared [`ParamSpec`] for its
//!    position, and conversions are recorded.
//! 3. The overload's [`check_types`](crate::FunctionOverload::check_types)
//!    derives the precise return type from the actual argument types.
//! 4. If nothing severe has been reported,
//!    [`check_semantics`](crate::FunctionOverload::check_semantics) runs.
//!
//! Problems are collected as diagnostics in the [`CallCheckResult`]; the
//! check itself never fails. Handing it arguments that do not match their
//! types is a defect in the caller and panics.
//!
//! [`ParamSpec`]: crate::ParamSpec

mod checker;

use texl_diagnostic::{Diagnostic, ErrorCode, ErrorGuaranteed};
use texl_ir::NodeId;
use texl_types::{CoercionMap, DType};

use crate::{CheckContext, FunctionOverload};

pub use checker::CallChecker;
pub(crate) use checker::restrict_to_fields_of;

/// Furthest protocol state a check reached.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug)]
pub enum CheckPhase {
    Started,
    ArityChecked,
    BaseTypesChecked,
    OverloadSpecificChecked,
    SemanticsChecked,
}

/// One call node, its argument nodes and their already-checked types.
#[derive(Copy, Clone, Debug)]
pub struct CallSite<'a> {
    node: NodeId,
    args: &'a [NodeId],
    arg_types: &'a [DType],
}

impl<'a> CallSite<'a> {
    /// # Panics
    ///
    /// If `args` and `arg_types` differ in length.
    pub fn new(node: NodeId, args: &'a [NodeId], arg_types: &'a [DType]) -> Self {
        assert_eq!(
            args.len(),
            arg_types.len(),
            "call site {node:?} has {} argument nodes but {} argument types",
            args.len(),
            arg_types.len()
        );
        CallSite {
            node,
            args,
            arg_types,
        }
    }

    #[inline]
    pub fn node(&self) -> NodeId {
        self.node
    }

    #[inline]
    pub fn args(&self) -> &'a [NodeId] {
        self.args
    }

    #[inline]
    pub fn arg_types(&self) -> &'a [DType] {
        self.arg_types
    }

    #[inline]
    pub fn arg_count(&self) -> usize {
        self.args.len()
    }
}

/// What the binder gets back for one call node.
///
/// `guarantee` is `Some` exactly when a severe diagnostic was reported;
/// the call is then invalid and must not be lowered. `return_type` of an
/// invalid call is a best effort and may be `Error`.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CallCheckResult {
    pub return_type: DType,
    pub coercions: CoercionMap,
    pub diagnostics: Vec<Diagnostic>,
    pub guarantee: Option<ErrorGuaranteed>,
    pub phase: CheckPhase,
}

/// A valid call: its type, its conversions and any warnings.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CheckedCall {
    pub return_type: DType,
    pub coercions: CoercionMap,
    pub warnings: Vec<Diagnostic>,
}

/// An invalid call, with at least one severe diagnostic.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct FailedCall {
    pub diagnostics: Vec<Diagnostic>,
    pub guarantee: ErrorGuaranteed,
}

impl CallCheckResult {
    /// A result ended by one diagnostic before any overload ran.
    pub(crate) fn from_diagnostic(return_type: DType, diagnostic: Diagnostic, phase: CheckPhase) -> Self {
        let guarantee = ErrorGuaranteed::from_diagnostic(&diagnostic);
        CallCheckResult {
            return_type,
            coercions: CoercionMap::new(),
            diagnostics: vec![diagnostic],
            guarantee,
            phase,
        }
    }

    #[inline]
    pub fn is_valid(&self) -> bool {
        self.guarantee.is_none()
    }

    pub fn has_code(&self, code: ErrorCode) -> bool {
        self.diagnostics.iter().any(|d| d.code == code)
    }

    pub fn into_result(self) -> Result<CheckedCall, FailedCall> {
        match self.guarantee {
            None => Ok(CheckedCall {
                return_type: self.return_type,
                coercions: self.coercions,
                warnings: self.diagnostics,
            }),
            Some(guarantee) => Err(FailedCall {
                diagnostics: self.diagnostics,
                guarantee,
            }),
        }
    }
}

/// Run the full protocol for one overload against one call site.
#[tracing::instrument(level = "debug", skip_all, fields(
    function = overload.descriptor().name,
    args = call.arg_count(),
))]
pub fn check_overload(
    overload: &dyn FunctionOverload,
    cx: &CheckContext<'_>,
    call: &CallSite<'_>,
) -> CallCheckResult {
    let descriptor = overload.descriptor();
    let mut checker = CallChecker::new(cx, call, descriptor);

    if !descriptor.arity.contains(call.arg_count()) {
        checker.report_arity(descriptor.arity);
        return checker.finish(DType::ERROR, CheckPhase::Started);
    }
    tracing::trace!(phase = ?CheckPhase::ArityChecked);

    for index in 0..call.arg_count() {
        if let Some(spec) = descriptor.param(index) {
            checker.check_param(index, *spec);
        }
    }
    if checker.has_errors() {
        return checker.finish(DType::ERROR, CheckPhase::ArityChecked);
    }
    tracing::trace!(phase = ?CheckPhase::BaseTypesChecked);

    let return_type = overload.check_types(&mut checker);
    if checker.has_errors() {
        return checker.finish(return_type, CheckPhase::BaseTypesChecked);
    }
    tracing::trace!(phase = ?CheckPhase::OverloadSpecificChecked, return_type = ?return_type);

    if descriptor.is_behavior() && !cx.behavior_allowed {
        let diagnostic = checker
            .at_call(ErrorCode::E3006)
            .with_message(format!(
                "{} changes data and can only be used in a behavior formula",
                descriptor.name
            ))
            .with_arg(descriptor.name);
        checker.report(diagnostic);
    }
    overload.check_semantics(&mut checker, &return_type);
    if checker.has_errors() {
        return checker.finish(return_type, CheckPhase::OverloadSpecificChecked);
    }
    tracing::trace!(phase = ?CheckPhase::SemanticsChecked);

    checker.finish(return_type, CheckPhase::SemanticsChecked)
}
