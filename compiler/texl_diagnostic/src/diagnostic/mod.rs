//! Core diagnostic types.

use std::fmt;

use texl_ir::{NodeId, Span};

use crate::ErrorCode;

/// How bad a diagnostic is.
///
/// Only `Severe` makes a call invalid. `Warning` and `Suggestion` leave the
/// best-effort return type usable.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, PartialOrd, Ord)]
pub enum Severity {
    Suggestion,
    Warning,
    Severe,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Suggestion => write!(f, "suggestion"),
            Severity::Warning => write!(f, "warning"),
            Severity::Severe => write!(f, "error"),
        }
    }
}

/// A labeled span.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct Label {
    pub span: Span,
    pub message: String,
    pub is_primary: bool,
}

impl Label {
    pub fn primary(span: Span, message: impl Into<String>) -> Self {
        Label {
            span,
            message: message.into(),
            is_primary: true,
        }
    }

    pub fn secondary(span: Span, message: impl Into<String>) -> Self {
        Label {
            span,
            message: message.into(),
            is_primary: false,
        }
    }
}

/// One reported problem at one node.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
#[must_use = "diagnostics should be reported or returned, not silently dropped"]
pub struct Diagnostic {
    pub code: ErrorCode,
    pub severity: Severity,
    /// Node the diagnostic is about. `None` only for diagnostics about the
    /// registry itself rather than a call site.
    pub node: Option<NodeId>,
    /// English rendering of the template, for logs and tests.
    pub message: String,
    /// Template arguments, in template order.
    pub args: Vec<String>,
    pub labels: Vec<Label>,
    pub notes: Vec<String>,
    pub suggestions: Vec<String>,
}

impl Diagnostic {
    fn new_with_severity(code: ErrorCode, severity: Severity) -> Self {
        Diagnostic {
            code,
            severity,
            node: None,
            message: String::new(),
            args: Vec::new(),
            labels: Vec::new(),
            notes: Vec::new(),
            suggestions: Vec::new(),
        }
    }

    /// Diagnostic at the code's default severity.
    #[cold]
    pub fn new(code: ErrorCode) -> Self {
        Self::new_with_severity(code, code.default_severity())
    }

    #[cold]
    pub fn severe(code: ErrorCode) -> Self {
        Self::new_with_severity(code, Severity::Severe)
    }

    #[cold]
    pub fn warning(code: ErrorCode) -> Self {
        Self::new_with_severity(code, Severity::Warning)
    }

    #[cold]
    pub fn suggestion(code: ErrorCode) -> Self {
        Self::new_with_severity(code, Severity::Suggestion)
    }

    /// Attach the offending node and a primary label at its span.
    pub fn at(mut self, node: NodeId, span: Span) -> Self {
        self.node = Some(node);
        self.labels.push(Label::primary(span, String::new()));
        self
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    /// Append one template argument.
    pub fn with_arg(mut self, arg: impl fmt::Display) -> Self {
        self.args.push(arg.to_string());
        self
    }

    pub fn with_label(mut self, span: Span, message: impl Into<String>) -> Self {
        self.labels.push(Label::primary(span, message));
        self
    }

    pub fn with_secondary_label(mut self, span: Span, message: impl Into<String>) -> Self {
        self.labels.push(Label::secondary(span, message));
        self
    }

    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.notes.push(note.into());
        self
    }

    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestions.push(suggestion.into());
        self
    }

    /// Downgrade or upgrade after construction.
    pub fn with_severity(mut self, severity: Severity) -> Self {
        self.severity = severity;
        self
    }

    pub fn primary_span(&self) -> Option<Span> {
        self.labels.iter().find(|l| l.is_primary).map(|l| l.span)
    }

    pub fn is_severe(&self) -> bool {
        matches!(self.severity, Severity::Severe)
    }

    pub fn resource_key(&self) -> &'static str {
        self.code.resource_key()
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} [{}/{}]: {}",
            self.severity,
            self.code,
            self.code.resource_key(),
            self.message
        )?;

        for label in &self.labels {
            let marker = if label.is_primary { "-->" } else { "   " };
            if label.message.is_empty() {
                write!(f, "\n  {} {:?}", marker, label.span)?;
            } else {
                write!(f, "\n  {} {:?}: {}", marker, label.span, label.message)?;
            }
        }

        for note in &self.notes {
            write!(f, "\n  = note: {note}")?;
        }

        for suggestion in &self.suggestions {
            write!(f, "\n  = help: {suggestion}")?;
        }

        Ok(())
    }
}
