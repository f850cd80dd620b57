// ABOUTME: Generic "rest of line" argument parsers (spec.md §4.7 closing note)
//
// Several built-in commands have no grammar of their own beyond "whatever
// text follows the command name" — spec.md §4.7 names this bucket directly:
// "Simple commands without specialised parsing accept a single trailing
// string or nothing (`parse_rest_line`, `parse_rest_allow_empty`)." Every
// command dispatched here is still a named `CommandType` resolved by
// `find_command`/`cmddefs`, not an `Unknown` fallback — only the argument
// grammar itself is generic.

use crate::ast::command::CommandArg;
use crate::error::CommandParseOutcome;
use crate::lexer;

/// `parse_rest_line`: the trailing text is required (though it may still be
/// empty after trimming) — used by commands whose argument, when present,
/// is free-form text (`:help {subject}`, `:make {program-args}`, ...).
pub fn parse_rest_line(arg_str: &str) -> CommandParseOutcome<CommandArg> {
    let p = lexer::skipwhite(arg_str, 0);
    if p >= arg_str.len() {
        return CommandParseOutcome::Ok(CommandArg::None);
    }
    CommandParseOutcome::Ok(CommandArg::String(arg_str[p..].trim_end().to_string()))
}

/// `parse_rest_allow_empty`: identical to `parse_rest_line` — kept as a
/// distinct name because the source distinguishes the two entry points even
/// though, once the argument string has already been comment/bar-trimmed by
/// `get_cmd_arg`, both reduce to "keep whatever text is left".
pub fn parse_rest_allow_empty(arg_str: &str) -> CommandParseOutcome<CommandArg> {
    parse_rest_line(arg_str)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rest_line_keeps_trailing_text() {
        assert_eq!(parse_rest_line("quoting"), CommandParseOutcome::Ok(CommandArg::String("quoting".to_string())));
    }

    #[test]
    fn rest_line_empty_is_none() {
        assert_eq!(parse_rest_line("   "), CommandParseOutcome::Ok(CommandArg::None));
    }

    #[test]
    fn rest_allow_empty_matches_rest_line() {
        assert_eq!(parse_rest_allow_empty("x"), parse_rest_line("x"));
    }
}
