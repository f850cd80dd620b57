// ABOUTME: Argument parser for :echo/:echon/:echomsg/:echoerr/:execute (spec.md §4.7)

use crate::ast::command::CommandArg;
use crate::error::{messages, CommandParseOutcome, Diagnostic};
use crate::lexer;
use crate::parser::expr;

/// All five commands share the same grammar: a whitespace-separated list of
/// one or more expressions, concatenated with a space by whatever the
/// command does at runtime (spec.md §4.7 `:echo`).
pub fn parse_expr_list(arg_str: &str) -> CommandParseOutcome<CommandArg> {
    let mut exprs = Vec::new();
    let mut p = lexer::skipwhite(arg_str, 0);
    if p >= arg_str.len() {
        return CommandParseOutcome::NotDone(Diagnostic::new(messages::E15_INVALID_EXPRESSION, p));
    }
    while p < arg_str.len() {
        match expr::parse_expr(arg_str, p) {
            Ok((node, end)) => {
                exprs.push(node);
                p = lexer::skipwhite(arg_str, end);
            }
            Err(e) => return CommandParseOutcome::NotDone(Diagnostic::new(e.to_string(), e.column().unwrap_or(p))),
        }
    }
    CommandParseOutcome::Ok(CommandArg::Expressions(exprs))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn echo_single_expr() {
        let outcome = parse_expr_list("'hello'");
        match outcome {
            CommandParseOutcome::Ok(CommandArg::Expressions(v)) => assert_eq!(v.len(), 1),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn echo_multiple_exprs() {
        let outcome = parse_expr_list("1 2 3");
        match outcome {
            CommandParseOutcome::Ok(CommandArg::Expressions(v)) => assert_eq!(v.len(), 3),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn echo_with_no_args_is_not_done() {
        let outcome = parse_expr_list("");
        assert!(matches!(outcome, CommandParseOutcome::NotDone(_)));
    }
}
