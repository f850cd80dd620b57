// ABOUTME: Error types and diagnostic catalog for the VimL parser front end

use std::fmt;
use thiserror::Error;

/// A byte offset into the current source line. Lines are parsed one at a
/// time (spec.md §6 LineGetter contract) so this is always line-relative,
/// never a whole-file offset.
pub type Column = usize;

/// One parser diagnostic: a translated message (numbered the way Vim numbers
/// its own, where a direct analogue exists) plus the column it applies to.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct Diagnostic {
    pub message: String,
    pub column: Column,
}

impl Diagnostic {
    pub fn new(message: impl Into<String>, column: Column) -> Self {
        Diagnostic {
            message: message.into(),
            column,
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (column {})", self.message, self.column)
    }
}

/// Well-known diagnostic messages, numbered the way the original assigns
/// `E<nnn>:` prefixes. Not exhaustive — only the ones the implemented
/// parsers actually raise.
pub mod messages {
    pub const E15_INVALID_EXPRESSION: &str = "E15: Invalid expression";
    pub const E171_MISSING_ENDIF: &str = "E171: Missing :endif";
    pub const E170_MISSING_ENDWHILE: &str = "E170: Missing :endwhile";
    pub const E170_MISSING_ENDFOR: &str = "E170: Missing :endfor";
    pub const E126_MISSING_ENDFUNCTION: &str = "E126: Missing :endfunction";
    pub const E600_MISSING_ENDTRY: &str = "E600: Missing :endtry";
    pub const E488_TRAILING_CHARACTERS: &str = "E488: Trailing characters";
    pub const E492_NOT_AN_EDITOR_COMMAND: &str = "E492: Not an editor command";
    pub const E474_INVALID_ARGUMENT: &str = "E474: Invalid argument";
    pub const E720_MISSING_COLON: &str = "E720: Missing colon in Dictionary";
    pub const E15_UNCLOSED_EXPRESSION: &str = "E15: Unclosed expression";
    pub const TOO_MANY_NESTED_BLOCKS: &str = "too many nested blocks";
    pub const UNEXPECTED_CLOSER: &str = "not inside a matching block";
    pub const DUPLICATE_BLOCK: &str = "duplicate block command";
    pub const NOT_AFTER: &str = "command not allowed after a previous sibling";
    pub const E740_TOO_MANY_ARGS: &str = "E740: Too many arguments for function";
}

/// Errors from the expression parser (spec.md §4.2/§4.3).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExprParseError {
    #[error("{0}")]
    Syntax(Diagnostic),

    #[error("out of memory")]
    Fail,
}

impl ExprParseError {
    pub fn syntax(message: impl Into<String>, column: Column) -> Self {
        ExprParseError::Syntax(Diagnostic::new(message, column))
    }

    pub fn column(&self) -> Option<Column> {
        match self {
            ExprParseError::Syntax(d) => Some(d.column),
            ExprParseError::Fail => None,
        }
    }
}

/// Outcome of a single Ex-command (or per-command argument) parse, matching
/// the three-way `OK | NOTDONE | FAIL` contract of spec.md §4.7/§7.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandParseOutcome<T> {
    Ok(T),
    NotDone(Diagnostic),
    Fail(ParseError),
}

impl<T> CommandParseOutcome<T> {
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> CommandParseOutcome<U> {
        match self {
            CommandParseOutcome::Ok(v) => CommandParseOutcome::Ok(f(v)),
            CommandParseOutcome::NotDone(d) => CommandParseOutcome::NotDone(d),
            CommandParseOutcome::Fail(e) => CommandParseOutcome::Fail(e),
        }
    }

    pub fn is_ok(&self) -> bool {
        matches!(self, CommandParseOutcome::Ok(_))
    }
}

/// Hard failures: allocation or I/O style errors that abort the whole parse
/// (spec.md §7, channel 2).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("out of memory")]
    OutOfMemory,

    #[error("line getter failed: {0}")]
    LineGetter(String),
}
