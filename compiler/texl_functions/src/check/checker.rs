//! Accumulator for one call-site check.

use std::ops::Range;

use texl_diagnostic::{Diagnostic, ErrorCode, ErrorGuaranteed};
use texl_ir::{Name, NodeId, NodeKind, Span};
use texl_types::{
    default_numeric_type, try_coerce, try_coerce_to_text, Coercion, CoercionMap, DType, Features,
};

use super::{CallCheckResult, CallSite, CheckPhase};
use crate::descriptor::{Arity, FunctionDescriptor, ParamSpec, Scalar};
use crate::CheckContext;

/// State threaded through one check: the conversions decided so far and
/// the diagnostics reported so far.
///
/// Created fresh for every call site and consumed by `finish`.
pub struct CallChecker<'a> {
    cx: &'a CheckContext<'a>,
    call: &'a CallSite<'a>,
    descriptor: &'a FunctionDescriptor,
    coercions: CoercionMap,
    diagnostics: Vec<Diagnostic>,
}

impl<'a> CallChecker<'a> {
    pub(crate) fn new(
        cx: &'a CheckContext<'a>,
        call: &'a CallSite<'a>,
        descriptor: &'a FunctionDescriptor,
    ) -> Self {
        CallChecker {
            cx,
            call,
            descriptor,
            coercions: CoercionMap::new(),
            diagnostics: Vec::new(),
        }
    }

    // === Inputs ===

    #[inline]
    pub fn cx(&self) -> &'a CheckContext<'a> {
        self.cx
    }

    #[inline]
    pub fn features(&self) -> &'a Features {
        self.cx.features
    }

    #[inline]
    pub fn call(&self) -> &'a CallSite<'a> {
        self.call
    }

    #[inline]
    pub fn descriptor(&self) -> &'a FunctionDescriptor {
        self.descriptor
    }

    #[inline]
    pub fn arg_count(&self) -> usize {
        self.call.arg_count()
    }

    #[inline]
    pub fn arg_type(&self, index: usize) -> &'a DType {
        &self.call.arg_types()[index]
    }

    #[inline]
    pub fn arg_node(&self, index: usize) -> NodeId {
        self.call.args()[index]
    }

    #[inline]
    pub fn arg_kind(&self, index: usize) -> &'a NodeKind {
        self.cx.arena.kind(self.arg_node(index))
    }

    #[inline]
    pub fn arg_span(&self, index: usize) -> Span {
        self.cx.arena.span(self.arg_node(index))
    }

    /// The argument's type after any conversion recorded for it.
    pub fn coerced_type(&self, index: usize) -> &DType {
        self.coercions
            .get(self.arg_node(index))
            .unwrap_or_else(|| self.arg_type(index))
    }

    pub fn intern(&self, text: &str) -> Name {
        self.cx.interner.intern(text)
    }

    /// Name of the single column of tables built from scalars.
    pub fn one_column_name(&self) -> Name {
        self.intern(self.features().one_column_name())
    }

    pub fn display(&self, ty: &DType) -> String {
        ty.display(self.cx.interner).to_string()
    }

    // === Conversions ===

    pub fn coerce(&mut self, index: usize, ty: DType) {
        self.coercions.insert(self.arg_node(index), ty);
    }

    pub fn record(&mut self, index: usize, coercion: Coercion) {
        self.coercions.record(self.arg_node(index), coercion);
    }

    pub fn coercions(&self) -> &CoercionMap {
        &self.coercions
    }

    // === Diagnostics ===

    pub fn report(&mut self, diagnostic: Diagnostic) {
        tracing::debug!(code = %diagnostic.code, message = %diagnostic.message, "call check diagnostic");
        self.diagnostics.push(diagnostic);
    }

    /// A diagnostic about argument `index`.
    pub fn at_arg(&self, index: usize, code: ErrorCode) -> Diagnostic {
        Diagnostic::new(code).at(self.arg_node(index), self.arg_span(index))
    }

    /// A diagnostic about the call as a whole.
    pub fn at_call(&self, code: ErrorCode) -> Diagnostic {
        let node = self.call.node();
        Diagnostic::new(code).at(node, self.cx.arena.span(node))
    }

    pub fn has_errors(&self) -> bool {
        self.diagnostics.iter().any(Diagnostic::is_severe)
    }

    pub(crate) fn report_arity(&mut self, arity: Arity) {
        let diagnostic = self
            .at_call(ErrorCode::E1001)
            .with_message(format!(
                "{} expects {arity} argument(s), found {}",
                self.descriptor.name,
                self.arg_count()
            ))
            .with_arg(self.arg_count())
            .with_arg(arity);
        self.report(diagnostic);
    }

    /// `ErrBadType`: argument `index` is not what the position expects.
    pub fn type_mismatch(&mut self, index: usize, expected: &str) {
        let provided = self.display(self.arg_type(index));
        let diagnostic = self
            .at_arg(index, ErrorCode::E2001)
            .with_message(format!("expected {expected}, found {provided}"))
            .with_arg(expected)
            .with_arg(provided);
        self.report(diagnostic);
    }

    /// `ErrNeedTable`: argument `index` must be a table.
    pub fn need_table(&mut self, index: usize) {
        let diagnostic = self
            .at_arg(index, ErrorCode::E2002)
            .with_message(format!("{} expects a table here", self.descriptor.name))
            .with_arg(self.descriptor.name);
        self.report(diagnostic);
    }

    /// `ErrNeedRecord`: argument `index` must be a record.
    pub fn need_record(&mut self, index: usize) {
        let diagnostic = self
            .at_arg(index, ErrorCode::E2004)
            .with_message(format!("{} expects a record here", self.descriptor.name))
            .with_arg(self.descriptor.name);
        self.report(diagnostic);
    }

    // === Base check ===

    /// Check argument `index` against `spec`, recording any conversion.
    pub fn check_param(&mut self, index: usize, spec: ParamSpec) -> bool {
        let ty = self.arg_type(index);
        match spec {
            ParamSpec::Scalar(scalar) => self.check_scalar(index, scalar),
            ParamSpec::Column(scalar) => self.check_column(index, scalar, spec),
            ParamSpec::Table => {
                let ok = ty.is_table();
                if !ok {
                    self.need_table(index);
                }
                ok
            }
            ParamSpec::Record => {
                let ok = ty.is_record();
                if !ok {
                    self.need_record(index);
                }
                ok
            }
            ParamSpec::Predicate => match try_coerce(ty, &DType::BOOLEAN, self.features()) {
                Some(coercion) => {
                    self.record(index, coercion);
                    true
                }
                None => {
                    self.type_mismatch(index, spec.expected());
                    false
                }
            },
            ParamSpec::RowExpr => {
                let ok = !ty.is_absorbing();
                if !ok {
                    self.type_mismatch(index, spec.expected());
                }
                ok
            }
            ParamSpec::TypeArg => self.check_type_arg(index),
        }
    }

    pub fn check_scalar(&mut self, index: usize, scalar: Scalar) -> bool {
        match scalar_coercion(self.arg_type(index), scalar, self.features()) {
            Some(coercion) => {
                self.record(index, coercion);
                true
            }
            None => {
                self.type_mismatch(index, scalar.expected());
                false
            }
        }
    }

    fn check_column(&mut self, index: usize, scalar: Scalar, spec: ParamSpec) -> bool {
        let ty = self.arg_type(index);
        if !ty.is_table() {
            self.need_table(index);
            return false;
        }
        let Some((column, column_type)) = ty.single_column() else {
            let diagnostic = self
                .at_arg(index, ErrorCode::E2003)
                .with_message(format!(
                    "expected a table with exactly one column, found {} columns",
                    ty.field_count()
                ));
            self.report(diagnostic);
            return false;
        };
        match scalar_coercion(column_type, scalar, self.features()) {
            Some(Coercion::Exact) => true,
            Some(Coercion::To(converted)) => {
                self.coerce(index, ty.add_field(column, converted));
                true
            }
            None => {
                self.type_mismatch(index, spec.expected());
                false
            }
        }
    }

    /// A type literal, or a data source named where a type is expected.
    fn check_type_arg(&mut self, index: usize) -> bool {
        let ty = self.arg_type(index);
        let names_type = match self.arg_kind(index) {
            NodeKind::TypeLiteral => true,
            NodeKind::FirstName(_) => ty.is_table() && ty.source().is_some(),
            _ => false,
        };
        if !names_type {
            let diagnostic = self
                .at_arg(index, ErrorCode::E2009)
                .with_message(format!(
                    "argument {} of {} must be a type",
                    index + 1,
                    self.descriptor.name
                ));
            self.report(diagnostic);
            return false;
        }
        if ty.is_blank() && self.features().strict_type_arguments {
            let diagnostic = self
                .at_arg(index, ErrorCode::E3007)
                .with_message("Blank is not a valid type here");
            self.report(diagnostic);
            return false;
        }
        if ty.is_absorbing() {
            self.type_mismatch(index, "type");
            return false;
        }
        true
    }

    // === Shared derivations ===

    /// Common type of the arguments in `indices`.
    ///
    /// Each argument is unioned into a running type; the first that does
    /// not unify, or that contains Error or Unknown anywhere, is reported
    /// with `code`. Arguments narrower than the final type are recorded as
    /// converting toward it.
    pub fn union_args(&mut self, indices: Range<usize>, code: ErrorCode) -> Option<DType> {
        let mut joined: Option<DType> = None;
        for index in indices.clone() {
            let ty = self.arg_type(index);
            if !ty.is_valid() {
                let found = self.display(ty);
                let diagnostic = self
                    .at_arg(index, code)
                    .with_message(format!("{found} contains an undetermined or erroneous type"))
                    .with_arg(found);
                self.report(diagnostic);
                return None;
            }
            let next = match &joined {
                None => ty.clone(),
                Some(prev) => match prev.union(ty) {
                    Ok(next) => next,
                    Err(err) => {
                        let found = self.display(ty);
                        let expected = self.display(prev);
                        let diagnostic = self
                            .at_arg(index, code)
                            .with_message(format!("{found} is not compatible with {expected}"))
                            .with_arg(expected)
                            .with_arg(found)
                            .with_note(err.to_string());
                        self.report(diagnostic);
                        return None;
                    }
                },
            };
            joined = Some(next);
        }

        let joined = joined?;
        for index in indices {
            let ty = self.arg_type(index);
            let target = restrict_to_fields_of(&joined, ty);
            if let Some(Coercion::To(converted)) = try_coerce(ty, &target, self.features()) {
                self.coerce(index, converted);
            }
        }
        Some(joined)
    }

    pub(crate) fn finish(self, return_type: DType, phase: CheckPhase) -> CallCheckResult {
        let guarantee = ErrorGuaranteed::from_diagnostics(&self.diagnostics);
        CallCheckResult {
            return_type,
            coercions: self.coercions,
            diagnostics: self.diagnostics,
            guarantee,
            phase,
        }
    }
}

/// How a value of `ty` is taken by a `scalar` position.
pub(crate) fn scalar_coercion(ty: &DType, scalar: Scalar, features: &Features) -> Option<Coercion> {
    if ty.is_absorbing() {
        return None;
    }
    match scalar {
        Scalar::Numeric if ty.is_numeric() || ty.is_blank() => Some(Coercion::Exact),
        Scalar::Numeric => try_coerce(ty, &default_numeric_type(features), features),
        Scalar::Text => try_coerce_to_text(ty, features),
        Scalar::Boolean => try_coerce(ty, &DType::BOOLEAN, features),
        Scalar::Of(kind) => try_coerce(ty, &DType::scalar(kind), features),
        Scalar::Any => Some(Coercion::Exact),
    }
}

/// `joined` narrowed to the fields `ty` actually has, so a record missing
/// some union fields can still convert the fields it does have.
pub(crate) fn restrict_to_fields_of(joined: &DType, ty: &DType) -> DType {
    if !joined.is_aggregate() || joined.kind() != ty.kind() {
        return joined.clone();
    }
    joined
        .fields()
        .filter(|(name, _)| !ty.has_field(*name))
        .fold(joined.clone(), |narrowed, (name, _)| narrowed.drop_field(name))
}
