// ABOUTME: Ex-command and expression parser modules (spec.md §4)

pub mod address;
pub mod command;
pub mod commands;
pub mod expr;
pub mod expr_token;
pub mod pattern;
pub mod sequence;

pub use expr::parse_expr;
pub use sequence::parse_cmd_sequence;

/// Bytes that terminate an unbracketed expression or command argument list:
/// end of line, a command separator, or a comment starter. Shared by several
/// per-command parsers that scan "the rest of the line".
pub(crate) fn is_eol(c: char) -> bool {
    c == '\n' || c == '|' || c == '"'
}
