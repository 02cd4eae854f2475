//! `Trace(message, severity, custom_record)`.

use texl_diagnostic::ErrorCode;
use texl_ir::{Name, StringInterner};
use texl_stack::ensure_sufficient_stack;
use texl_types::{DType, Kind};

use crate::check::CallChecker;
use crate::descriptor::{FunctionCategory, FunctionDescriptor, FunctionFlags, ParamSpec, ReturnSpec};
use crate::FunctionOverload;

static TRACE: FunctionDescriptor = FunctionDescriptor::new(
    "Trace",
    FunctionCategory::Behavior,
    &[ParamSpec::TEXT, ParamSpec::ANY, ParamSpec::Record],
    ReturnSpec::BOOLEAN,
)
.optional(2)
.flags(FunctionFlags::empty())
.labels(&["message", "severity", "custom_record"]);

#[derive(Debug)]
pub(crate) struct Trace;

impl FunctionOverload for Trace {
    fn descriptor(&self) -> &FunctionDescriptor {
        &TRACE
    }

    fn check_types(&self, _checker: &mut CallChecker<'_>) -> DType {
        DType::BOOLEAN
    }

    /// The custom record is serialized into the trace event, so every field
    /// must have a serializable type.
    fn check_semantics(&self, checker: &mut CallChecker<'_>, _return_type: &DType) {
        if checker.arg_count() < 3 {
            return;
        }
        let Some((path, kind)) = first_unserializable(checker.arg_type(2)) else {
            return;
        };
        let field = render_path(&path, checker.cx().interner);
        let diagnostic = checker
            .at_arg(2, ErrorCode::E3003)
            .with_message(format!(
                "field {field} of type {} cannot be written to a trace",
                kind.name()
            ))
            .with_arg(&field)
            .with_arg(kind.name());
        checker.report(diagnostic);
    }
}

fn is_serializable(kind: Kind) -> bool {
    !(kind.is_absorbing()
        || matches!(
            kind,
            Kind::Image | Kind::Media | Kind::Blob | Kind::UntypedObject | Kind::Polymorphic
        ))
}

/// Path to the first field, in field order and depth first, whose type
/// cannot be serialized.
fn first_unserializable(ty: &DType) -> Option<(Vec<Name>, Kind)> {
    ensure_sufficient_stack(|| {
        for (name, field) in ty.fields() {
            if field.is_aggregate() {
                if let Some((mut path, kind)) = first_unserializable(field) {
                    path.insert(0, name);
                    return Some((path, kind));
                }
            } else if !is_serializable(field.kind()) {
                return Some((vec![name], field.kind()));
            }
        }
        None
    })
}

fn render_path(path: &[Name], interner: &StringInterner) -> String {
    path.iter()
        .map(|&name| interner.lookup(name))
        .collect::<Vec<_>>()
        .join(".")
}
