//! The hooks every overload implements.

use std::fmt;

use texl_types::DType;

use crate::check::CallChecker;
use crate::delegation::{default_delegation, DelegationQuery, NotDelegable};
use crate::descriptor::{DelegationCapability, FunctionDescriptor};
use crate::signatures::{signature_for_arity, Signature};

/// One overload of a named function.
///
/// The protocol in [`check_overload`](crate::check_overload) runs the
/// arity check and the declared-parameter check itself, then calls these
/// hooks. Table-driven builtins only implement [`descriptor`] and
/// [`check_types`]; bespoke overloads override whatever they need.
///
/// [`descriptor`]: FunctionOverload::descriptor
/// [`check_types`]: FunctionOverload::check_types
pub trait FunctionOverload: Send + Sync + fmt::Debug {
    fn descriptor(&self) -> &FunctionDescriptor;

    /// Derive the precise return type from the actual argument types.
    ///
    /// Runs only when arity and every declared parameter checked out.
    /// Report problems through `checker`; the returned type is kept as a
    /// best effort even if the call ends up invalid.
    fn check_types(&self, checker: &mut CallChecker<'_>) -> DType;

    /// Cross-argument and data-source checks. Runs only if nothing severe
    /// was reported by the earlier phases.
    fn check_semantics(&self, checker: &mut CallChecker<'_>, return_type: &DType) {
        let _ = (checker, return_type);
    }

    fn delegation_capability(&self) -> DelegationCapability {
        self.descriptor().delegation
    }

    /// Can this call be evaluated by its data source. The default covers
    /// functions whose first argument is the source table and whose
    /// lambda arguments must themselves be delegable.
    fn is_delegable(&self, query: &DelegationQuery<'_>) -> Result<(), NotDelegable> {
        default_delegation(self.delegation_capability(), query)
    }

    /// Parameter labels for `arity` arguments, or `None` if the overload
    /// does not take that many.
    fn signature(&self, arity: usize) -> Option<Signature> {
        signature_for_arity(self.descriptor(), arity)
    }
}
