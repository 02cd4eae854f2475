//! Type-level proof that a severe diagnostic was reported.

use std::fmt;

use crate::Diagnostic;

/// Proof that at least one severe diagnostic exists.
///
/// Cannot be constructed directly; obtain it from a severe diagnostic.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct ErrorGuaranteed(());

impl ErrorGuaranteed {
    /// `Some` if `diagnostic` is severe.
    pub fn from_diagnostic(diagnostic: &Diagnostic) -> Option<Self> {
        diagnostic.is_severe().then_some(ErrorGuaranteed(()))
    }

    /// `Some` if any of `diagnostics` is severe.
    pub fn from_diagnostics<'a>(
        diagnostics: impl IntoIterator<Item = &'a Diagnostic>,
    ) -> Option<Self> {
        diagnostics
            .into_iter()
            .any(Diagnostic::is_severe)
            .then_some(ErrorGuaranteed(()))
    }
}

impl fmt::Display for ErrorGuaranteed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "severe diagnostic(s) reported")
    }
}
