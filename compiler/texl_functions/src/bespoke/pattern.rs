//! `IsMatch(text, pattern, options)`.

use texl_diagnostic::ErrorCode;
use texl_ir::NodeKind;
use texl_types::DType;

use crate::check::CallChecker;
use crate::descriptor::{FunctionCategory, FunctionDescriptor, ParamSpec, ReturnSpec};
use crate::FunctionOverload;

static IS_MATCH: FunctionDescriptor = FunctionDescriptor::new(
    "IsMatch",
    FunctionCategory::Text,
    &[ParamSpec::TEXT, ParamSpec::TEXT, ParamSpec::ANY],
    ReturnSpec::BOOLEAN,
)
.optional(1)
.labels(&["text", "pattern", "options"]);

/// The pattern is compiled at check time, so it must be a text literal.
#[derive(Debug)]
pub(crate) struct IsMatch;

impl FunctionOverload for IsMatch {
    fn descriptor(&self) -> &FunctionDescriptor {
        &IS_MATCH
    }

    fn check_types(&self, _checker: &mut CallChecker<'_>) -> DType {
        DType::BOOLEAN
    }

    fn check_semantics(&self, checker: &mut CallChecker<'_>, _return_type: &DType) {
        let NodeKind::StrLit(pattern) = checker.arg_kind(1) else {
            let diagnostic = checker
                .at_arg(1, ErrorCode::E3004)
                .with_message("the regular expression must be a text literal");
            checker.report(diagnostic);
            return;
        };
        let pattern = checker.cx().interner.lookup(*pattern);
        if let Err(err) = regex::Regex::new(pattern) {
            let diagnostic = checker
                .at_arg(1, ErrorCode::E3005)
                .with_message(format!("invalid regular expression {pattern:?}"))
                .with_arg(pattern)
                .with_note(err.to_string());
            checker.report(diagnostic);
        }
    }
}
