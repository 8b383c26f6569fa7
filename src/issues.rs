//! Diagnostics raised while extracting minErr templates.
//!
//! Each issue is self-contained with all information the reporter needs to
//! display it: source context, rule, severity and a human-readable message.

use enum_dispatch::enum_dispatch;

use crate::core::SourceContext;

// ============================================================
// Severity and Rule
// ============================================================

/// Severity level of an issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Error,
    Warning,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
        }
    }
}

/// Rule identifier for each issue type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Rule {
    UnsupportedStringExpression,
    ThrowIsNotMinErrError,
    MultipleMinErrDefinition,
    ParseError,
}

impl std::fmt::Display for Rule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Rule::UnsupportedStringExpression => write!(f, "unsupported-string-expression"),
            Rule::ThrowIsNotMinErrError => write!(f, "throw-is-not-minerr-error"),
            Rule::MultipleMinErrDefinition => write!(f, "multiple-minerr-definition"),
            Rule::ParseError => write!(f, "parse-error"),
        }
    }
}

/// Which argument of a minErr call failed to fold to a constant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArgumentRole {
    Code,
    Message,
}

impl std::fmt::Display for ArgumentRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ArgumentRole::Code => write!(f, "code"),
            ArgumentRole::Message => write!(f, "message"),
        }
    }
}

// ============================================================
// Issue Types
// ============================================================

/// A minErr code or message argument that is not a constant string.
///
/// Fatal: the run aborts and no extraction table is produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnsupportedStringExpressionIssue {
    pub context: SourceContext,
    /// Namespace of the call the argument belongs to.
    pub namespace: String,
    pub argument: ArgumentRole,
}

impl UnsupportedStringExpressionIssue {
    pub fn severity() -> Severity {
        Severity::Error
    }

    pub fn rule() -> Rule {
        Rule::UnsupportedStringExpression
    }
}

/// A minErr call wrapped in `throw new Error(...)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThrowIsNotMinErrErrorIssue {
    pub context: SourceContext,
    pub namespace: String,
    pub code: String,
}

impl ThrowIsNotMinErrErrorIssue {
    pub fn severity() -> Severity {
        Severity::Warning
    }

    pub fn rule() -> Rule {
        Rule::ThrowIsNotMinErrError
    }
}

/// More than one declaration of the factory function.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MultipleMinErrDefinitionIssue {
    /// Location of the second declaration found.
    pub context: SourceContext,
    pub factory_name: String,
    pub count: usize,
}

impl MultipleMinErrDefinitionIssue {
    pub fn severity() -> Severity {
        Severity::Warning
    }

    pub fn rule() -> Rule {
        Rule::MultipleMinErrDefinition
    }
}

/// Input file could not be parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseErrorIssue {
    pub context: SourceContext,
    pub error: String,
}

impl ParseErrorIssue {
    pub fn severity() -> Severity {
        Severity::Error
    }

    pub fn rule() -> Rule {
        Rule::ParseError
    }
}

// ============================================================
// Issue Enum
// ============================================================

/// A diagnostic produced by the extraction pass or its driver.
#[enum_dispatch(Report)]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Issue {
    UnsupportedStringExpression(UnsupportedStringExpressionIssue),
    ThrowIsNotMinErrError(ThrowIsNotMinErrErrorIssue),
    MultipleMinErrDefinition(MultipleMinErrDefinitionIssue),
    ParseError(ParseErrorIssue),
}

impl Issue {
    pub fn severity(&self) -> Severity {
        match self {
            Issue::UnsupportedStringExpression(_) => UnsupportedStringExpressionIssue::severity(),
            Issue::ThrowIsNotMinErrError(_) => ThrowIsNotMinErrErrorIssue::severity(),
            Issue::MultipleMinErrDefinition(_) => MultipleMinErrDefinitionIssue::severity(),
            Issue::ParseError(_) => ParseErrorIssue::severity(),
        }
    }

    pub fn rule(&self) -> Rule {
        match self {
            Issue::UnsupportedStringExpression(_) => UnsupportedStringExpressionIssue::rule(),
            Issue::ThrowIsNotMinErrError(_) => ThrowIsNotMinErrErrorIssue::rule(),
            Issue::MultipleMinErrDefinition(_) => MultipleMinErrDefinitionIssue::rule(),
            Issue::ParseError(_) => ParseErrorIssue::rule(),
        }
    }
}

// ============================================================
// Report Trait (for CLI output)
// ============================================================

/// Trait for types that can be reported to the CLI.
///
/// Uses `enum_dispatch` for zero-cost dispatch on the `Issue` enum.
#[enum_dispatch]
pub trait Report {
    /// Where the issue was found.
    fn context(&self) -> &SourceContext;

    /// Primary message to display.
    fn message(&self) -> String;

    /// Optional hint for fixing the issue.
    fn hint(&self) -> Option<String> {
        None
    }
}

impl Report for UnsupportedStringExpressionIssue {
    fn context(&self) -> &SourceContext {
        &self.context
    }

    fn message(&self) -> String {
        format!(
            "minErr {} argument must be a string literal or a concatenation of string literals",
            self.argument
        )
    }

    fn hint(&self) -> Option<String> {
        Some(format!(
            "inline the {} of this '{}' error as a literal string",
            self.argument, self.namespace
        ))
    }
}

impl Report for ThrowIsNotMinErrErrorIssue {
    fn context(&self) -> &SourceContext {
        &self.context
    }

    fn message(&self) -> String {
        format!(
            "minErr already returns an error object; '{}' error '{}' should be thrown directly",
            self.namespace, self.code
        )
    }

    fn hint(&self) -> Option<String> {
        Some("replace `throw new Error(minErrCall)` with `throw minErrCall`".to_string())
    }
}

impl Report for MultipleMinErrDefinitionIssue {
    fn context(&self) -> &SourceContext {
        &self.context
    }

    fn message(&self) -> String {
        format!(
            "found {} definitions of '{}'; none were substituted",
            self.count, self.factory_name
        )
    }
}

impl Report for ParseErrorIssue {
    fn context(&self) -> &SourceContext {
        &self.context
    }

    fn message(&self) -> String {
        self.error.clone()
    }
}
