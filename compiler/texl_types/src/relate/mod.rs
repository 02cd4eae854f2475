//! Acceptance: can a value be used as-is where another type is expected.

use texl_stack::ensure_sufficient_stack;

use crate::{DType, Kind};

impl DType {
    /// True if a value of `candidate` can stand where `self` is expected
    /// without any conversion.
    ///
    /// - Blank is accepted by every non-absorbing type.
    /// - Text accepts the text-backed kinds (hyperlinks and media URIs).
    /// - Records and tables accept candidates of the same aggregate kind
    ///   that have at least the expected fields, each accepted in turn.
    ///   A candidate missing an expected field is rejected.
    /// - Option set values only accept the same option set.
    /// - Nothing accepts, or is accepted as, Error, Unknown or Void.
    pub fn accepts(&self, candidate: &DType) -> bool {
        if self.is_absorbing() || candidate.is_absorbing() {
            return false;
        }
        if candidate.is_blank() {
            return true;
        }

        match (self.kind(), candidate.kind()) {
            (Kind::String, other) if other.is_textual() => true,
            (Kind::Record, Kind::Record) | (Kind::Table, Kind::Table) => {
                ensure_sufficient_stack(|| self.fields_accept(candidate))
            }
            (Kind::OptionSetValue, Kind::OptionSetValue) => {
                self.option_set_id() == candidate.option_set_id()
            }
            (Kind::Polymorphic, Kind::Polymorphic) => candidate
                .polymorphic_sources()
                .iter()
                .all(|source| self.polymorphic_sources().contains(source)),
            (expected, actual) => expected == actual && !expected.is_aggregate(),
        }
    }

    fn fields_accept(&self, candidate: &DType) -> bool {
        self.fields().all(|(name, expected)| {
            candidate
                .field(name)
                .is_some_and(|actual| expected.accepts(actual))
        })
    }
}
