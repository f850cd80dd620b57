// ABOUTME: Argument parsers for :if/:elseif/:while/:throw/:call/:return/:catch (spec.md §4.7)

use crate::ast::command::CommandArg;
use crate::error::{messages, CommandParseOutcome};
use crate::lexer;
use crate::parser::expr;

/// Parses `arg_str` as a single expression occupying the whole argument
/// (spec.md §4.7 `:if`) — used by `:if`, `:elseif`, `:while`, `:throw` and
/// `:call`, all of which take exactly one expression and nothing else.
pub fn parse_expression_arg(arg_str: &str) -> CommandParseOutcome<CommandArg> {
    match expr::parse_expr(arg_str, 0) {
        Ok((node, end)) => {
            let rest = lexer::skipwhite(arg_str, end);
            if rest != arg_str.len() {
                return CommandParseOutcome::Fail(crate::error::ParseError::LineGetter(
                    messages::E488_TRAILING_CHARACTERS.to_string(),
                ));
            }
            CommandParseOutcome::Ok(CommandArg::Expression(Box::new(node)))
        }
        Err(e) => CommandParseOutcome::NotDone(crate::error::Diagnostic::new(e.to_string(), e.column().unwrap_or(0))),
    }
}

/// `:return` (spec.md §4.7 `:return`): the expression is optional — a bare
/// `:return` returns nothing.
pub fn parse_optional_expression(arg_str: &str) -> CommandParseOutcome<CommandArg> {
    let trimmed_start = lexer::skipwhite(arg_str, 0);
    if trimmed_start >= arg_str.len() {
        return CommandParseOutcome::Ok(CommandArg::None);
    }
    parse_expression_arg(arg_str)
}

/// `:catch` (spec.md §4.7 `:catch`): an optional `/pattern/` restricting
/// which thrown values are caught; a bare `:catch` catches everything.
pub fn parse_catch(arg_str: &str) -> CommandParseOutcome<CommandArg> {
    let p = lexer::skipwhite(arg_str, 0);
    if p >= arg_str.len() {
        return CommandParseOutcome::Ok(CommandArg::None);
    }
    if !arg_str[p..].starts_with('/') {
        return CommandParseOutcome::Ok(CommandArg::String(arg_str[p..].to_string()));
    }
    match lexer::get_regex(arg_str, p + 1, b'/') {
        Some((re, _end)) => CommandParseOutcome::Ok(CommandArg::Regex(re)),
        None => CommandParseOutcome::NotDone(crate::error::Diagnostic::new(messages::E15_UNCLOSED_EXPRESSION, p)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn if_condition_parses_as_expression() {
        let outcome = parse_expression_arg("a > 1");
        assert!(matches!(outcome, CommandParseOutcome::Ok(CommandArg::Expression(_))));
    }

    #[test]
    fn return_with_no_value_is_none() {
        let outcome = parse_optional_expression("  ");
        assert_eq!(outcome, CommandParseOutcome::Ok(CommandArg::None));
    }

    #[test]
    fn catch_without_pattern_catches_anything() {
        let outcome = parse_catch("");
        assert_eq!(outcome, CommandParseOutcome::Ok(CommandArg::None));
    }

    #[test]
    fn catch_with_pattern_parses_regex() {
        let outcome = parse_catch("/^Vim/");
        match outcome {
            CommandParseOutcome::Ok(CommandArg::Regex(re)) => assert_eq!(re.source, "^Vim"),
            other => panic!("unexpected {:?}", other),
        }
    }
}
