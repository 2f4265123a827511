use rowan::TextRange;

/// Diagnostic kinds, grouped by the stage that reports them.
///
/// Parser kinds come first, then the structural lints, then grammar
/// validation. Ordering is also used to sort diagnostics that share a start
/// position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum DiagnosticKind {
    // Delimiters left open until the end of input
    UnclosedNode,
    UnclosedList,
    UnclosedString,

    // User omitted something the parser can't do without
    ExpectedFieldName,
    ExpectedSubtype,
    ExpectedPredicateName,
    ExpectedPredicateType,

    // User wrote something that doesn't belong
    NestingTooDeep,
    BareIdentifier,
    CaptureWithoutTarget,
    UnexpectedToken,

    // Syntactically incomplete constructs
    EmptyGrouping,
    EmptyList,
    HangingCapture,
    MissingFieldValue,
    MissingPredicateParameters,

    // Grammar validation
    UnknownNodeType,
    UnknownField,
    InvalidSubtype,
    NodeHasNoChildren,
    NoLiteralChildren,
    InvalidChildType,
    InvalidChildLiteral,
    InvalidFieldValue,

    // Predicate arguments
    InvalidRegex,

    // Legal but suspicious
    RedundantNegation,
    NegatedRequiredField,
    UnknownPredicate,
}

impl DiagnosticKind {
    pub fn default_severity(&self) -> Severity {
        match self {
            Self::RedundantNegation | Self::NegatedRequiredField | Self::UnknownPredicate => {
                Severity::Warning
            }
            _ => Severity::Error,
        }
    }

    /// Name of the check that reports this kind.
    pub fn source(&self) -> &'static str {
        match self {
            Self::UnclosedNode
            | Self::UnclosedList
            | Self::UnclosedString
            | Self::ExpectedFieldName
            | Self::ExpectedSubtype
            | Self::ExpectedPredicateName
            | Self::ExpectedPredicateType
            | Self::NestingTooDeep
            | Self::BareIdentifier
            | Self::CaptureWithoutTarget
            | Self::UnexpectedToken => "syntax",
            Self::EmptyGrouping | Self::EmptyList => "empty_container",
            Self::HangingCapture => "hanging_capture",
            Self::MissingFieldValue => "missing_field_value",
            Self::MissingPredicateParameters => "missing_parameters",
            Self::UnknownNodeType
            | Self::UnknownField
            | Self::InvalidSubtype
            | Self::NodeHasNoChildren
            | Self::NoLiteralChildren
            | Self::InvalidChildType
            | Self::InvalidChildLiteral
            | Self::InvalidFieldValue
            | Self::RedundantNegation
            | Self::NegatedRequiredField => "node",
            Self::UnknownPredicate => "predicate",
            Self::InvalidRegex => "regex_predicate",
        }
    }

    /// Default hint for this kind, automatically included in diagnostics.
    pub fn default_hint(&self) -> Option<&'static str> {
        match self {
            Self::ExpectedSubtype => Some("e.g., `expression/binary_expression`"),
            Self::ExpectedFieldName => Some("e.g., `!body`"),
            Self::BareIdentifier => Some("wrap it in parentheses to match a named node"),
            Self::EmptyGrouping => Some("use `(_)` to match any named node"),
            Self::EmptyList => Some("a list needs at least one alternative"),
            Self::MissingFieldValue => Some("e.g., `name: (identifier)`"),
            _ => None,
        }
    }

    /// Base message for this diagnostic kind, used when no custom message is provided.
    pub fn fallback_message(&self) -> &'static str {
        match self {
            Self::UnclosedNode => "missing closing `)`",
            Self::UnclosedList => "missing closing `]`",
            Self::UnclosedString => "missing closing `\"`",

            Self::ExpectedFieldName => "expected field name",
            Self::ExpectedSubtype => "expected subtype name",
            Self::ExpectedPredicateName => "expected predicate name",
            Self::ExpectedPredicateType => "expected `?` or `!` after predicate name",

            Self::NestingTooDeep => "pattern is nested too deeply",
            Self::BareIdentifier => "bare identifier is not a pattern",
            Self::CaptureWithoutTarget => "capture has no target",
            Self::UnexpectedToken => "unexpected token",

            Self::EmptyGrouping => "empty grouping",
            Self::EmptyList => "empty list",
            Self::HangingCapture => "capture is missing a name",
            Self::MissingFieldValue => "field is missing a value",
            Self::MissingPredicateParameters => "predicate has no parameters",

            Self::UnknownNodeType => "unrecognized kind",
            Self::UnknownField => "unrecognized field",
            Self::InvalidSubtype => "not a subtype",
            Self::NodeHasNoChildren => "kind has no children",
            Self::NoLiteralChildren => "kind has no literal children",
            Self::InvalidChildType => "kind not valid as a child here",
            Self::InvalidChildLiteral => "literal not valid as a child here",
            Self::InvalidFieldValue => "not a valid value for this field",

            Self::InvalidRegex => "invalid regular expression",

            Self::RedundantNegation => "negated field can never be present",
            Self::NegatedRequiredField => "negated field is required",
            Self::UnknownPredicate => "unknown predicate",
        }
    }

    /// Template for custom messages. Contains `{}` placeholder for caller-provided detail.
    pub fn custom_message(&self) -> String {
        match self {
            Self::UnknownNodeType => "unrecognized kind `{}`".to_string(),
            Self::UnknownField => "unrecognized field `{}`".to_string(),
            Self::InvalidSubtype => "{}".to_string(),
            Self::NodeHasNoChildren => "`{}` has no children".to_string(),
            Self::NoLiteralChildren => "`{}` has no literal children".to_string(),
            Self::InvalidChildType => "{}".to_string(),
            Self::InvalidChildLiteral => "{}".to_string(),
            Self::InvalidFieldValue => "{}".to_string(),
            Self::RedundantNegation => "{}".to_string(),
            Self::NegatedRequiredField => "{}".to_string(),
            Self::UnknownPredicate => "unknown predicate `{}`".to_string(),

            Self::UnclosedNode | Self::UnclosedList | Self::UnclosedString => {
                format!("{}; {{}}", self.fallback_message())
            }

            _ => format!("{}: {{}}", self.fallback_message()),
        }
    }

    /// Render the final message.
    ///
    /// - `None` → returns `fallback_message()`
    /// - `Some(detail)` → returns `custom_message()` with `{}` replaced by detail
    pub fn message(&self, msg: Option<&str>) -> String {
        match msg {
            None => self.fallback_message().to_string(),
            Some(detail) => self.custom_message().replace("{}", detail),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum Severity {
    #[default]
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

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelatedInfo {
    pub(crate) range: TextRange,
    pub(crate) message: String,
}

impl RelatedInfo {
    pub fn new(range: TextRange, message: impl Into<String>) -> Self {
        Self {
            range,
            message: message.into(),
        }
    }

    pub fn range(&self) -> TextRange {
        self.range
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

/// One finding against a query document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub(crate) kind: DiagnosticKind,
    pub(crate) range: TextRange,
    pub(crate) message: String,
    pub(crate) related: Vec<RelatedInfo>,
    pub(crate) hints: Vec<String>,
}

impl Diagnostic {
    pub(crate) fn new(kind: DiagnosticKind, range: TextRange, message: impl Into<String>) -> Self {
        let hints = kind
            .default_hint()
            .map(|hint| vec![hint.to_string()])
            .unwrap_or_default();
        Self {
            kind,
            range,
            message: message.into(),
            related: Vec::new(),
            hints,
        }
    }

    pub(crate) fn with_default_message(kind: DiagnosticKind, range: TextRange) -> Self {
        Self::new(kind, range, kind.fallback_message())
    }

    pub fn kind(&self) -> DiagnosticKind {
        self.kind
    }

    pub fn severity(&self) -> Severity {
        self.kind.default_severity()
    }

    pub fn range(&self) -> TextRange {
        self.range
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn related(&self) -> &[RelatedInfo] {
        &self.related
    }

    pub fn hints(&self) -> &[String] {
        &self.hints
    }

    pub fn is_error(&self) -> bool {
        self.severity() == Severity::Error
    }

    pub fn is_warning(&self) -> bool {
        self.severity() == Severity::Warning
    }
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} at {}..{}: {}",
            self.severity(),
            u32::from(self.range.start()),
            u32::from(self.range.end()),
            self.message
        )?;
        for related in &self.related {
            write!(
                f,
                " (related: {} at {}..{})",
                related.message,
                u32::from(related.range.start()),
                u32::from(related.range.end())
            )?;
        }
        for hint in &self.hints {
            write!(f, " (hint: {})", hint)?;
        }
        Ok(())
    }
}
