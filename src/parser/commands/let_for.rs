// ABOUTME: Argument parsers for :let/:unlet/:for (spec.md §4.7)

use crate::ast::command::{AssignOp, CommandArg, ForLoop, LetAssign};
use crate::error::{messages, CommandParseOutcome, Diagnostic};
use crate::lexer;
use crate::parser::expr;

/// Splits `s` on commas that are not nested inside `[...]`/`{...}`, trimming
/// whitespace off each piece. Used for both `:let [a, b] = ...` destructuring
/// and `:for [a, b] in ...` loop variables (spec.md §4.7).
fn split_top_level_commas(s: &str) -> Vec<String> {
    let mut parts = Vec::new();
    let mut depth = 0i32;
    let mut start = 0usize;
    for (i, c) in s.char_indices() {
        match c {
            '[' | '{' | '(' => depth += 1,
            ']' | '}' | ')' => depth -= 1,
            ',' if depth == 0 => {
                parts.push(s[start..i].trim().to_string());
                start = i + 1;
            }
            _ => {}
        }
    }
    let last = s[start..].trim();
    if !last.is_empty() {
        parts.push(last.to_string());
    }
    parts
}

/// Parses a `:let`/`:for` left-hand side: a plain name, or a `[a, b]` /
/// `[a, b; rest]` destructuring list. The rest-capture variable (after `;`)
/// is kept with a `...` prefix so the printer can tell it apart from a plain
/// name (spec.md §4.7 `:let`).
fn parse_lhs(s: &str, pos: usize) -> (Vec<String>, usize) {
    let p = lexer::skipwhite(s, pos);
    if s[p..].starts_with('[') {
        match s[p..].find(']') {
            Some(rel) => {
                let inner = &s[p + 1..p + rel];
                let (list_part, rest_part) = match inner.find(';') {
                    Some(semi) => (&inner[..semi], Some(inner[semi + 1..].trim())),
                    None => (inner, None),
                };
                let mut names = split_top_level_commas(list_part);
                if let Some(rest) = rest_part {
                    if !rest.is_empty() {
                        names.push(format!("...{}", rest));
                    }
                }
                (names, p + rel + 1)
            }
            None => (vec![s[p..].to_string()], s.len()),
        }
    } else {
        let end = lexer::skip_id(s, p).unwrap_or(p);
        (vec![s[p..end].to_string()], end)
    }
}

/// `:let` (spec.md §4.7 `:let`). A bare `:let` (or `:let name`) with no
/// assignment operator lists the current value(s) instead of assigning —
/// represented as `CommandArg::AssignLhs` rather than `LetAssign`.
pub fn parse_let(arg_str: &str) -> CommandParseOutcome<CommandArg> {
    let start = lexer::skipwhite(arg_str, 0);
    if start >= arg_str.len() {
        return CommandParseOutcome::Ok(CommandArg::None);
    }

    let (lhs, after_lhs) = parse_lhs(arg_str, start);
    let p = lexer::skipwhite(arg_str, after_lhs);

    let op = if arg_str[p..].starts_with("+=") {
        Some((AssignOp::Add, 2))
    } else if arg_str[p..].starts_with("-=") {
        Some((AssignOp::Subtract, 2))
    } else if arg_str[p..].starts_with(".=") {
        Some((AssignOp::Concat, 2))
    } else if arg_str[p..].starts_with('=') && !arg_str[p..].starts_with("==") {
        Some((AssignOp::Assign, 1))
    } else {
        None
    };

    let (op, op_len) = match op {
        Some(v) => v,
        None => return CommandParseOutcome::Ok(CommandArg::AssignLhs(lhs)),
    };

    let rhs_start = lexer::skipwhite(arg_str, p + op_len);
    if rhs_start >= arg_str.len() {
        return CommandParseOutcome::NotDone(Diagnostic::new(messages::E15_INVALID_EXPRESSION, rhs_start));
    }
    match expr::parse_expr(arg_str, rhs_start) {
        Ok((rhs, end)) => {
            let rest = lexer::skipwhite(arg_str, end);
            if rest != arg_str.len() {
                return CommandParseOutcome::Fail(crate::error::ParseError::LineGetter(
                    messages::E488_TRAILING_CHARACTERS.to_string(),
                ));
            }
            CommandParseOutcome::Ok(CommandArg::LetAssign(LetAssign {
                lhs,
                op,
                rhs: Some(Box::new(rhs)),
            }))
        }
        Err(e) => CommandParseOutcome::NotDone(Diagnostic::new(e.to_string(), e.column().unwrap_or(rhs_start))),
    }
}

/// `:unlet` (spec.md §4.7 `:unlet`): a whitespace-separated list of variable
/// names, `:unlet!` tolerating names that don't exist.
pub fn parse_unlet(arg_str: &str) -> CommandParseOutcome<CommandArg> {
    let names: Vec<String> = arg_str.split_whitespace().map(|s| s.to_string()).collect();
    if names.is_empty() {
        return CommandParseOutcome::NotDone(Diagnostic::new(messages::E474_INVALID_ARGUMENT, 0));
    }
    CommandParseOutcome::Ok(CommandArg::AssignLhs(names))
}

/// `:for` (spec.md §4.7 `:for`): `{lhs} in {expr}`. The loop body is attached
/// separately to the node's `body` field once `parser::sequence` closes the
/// block (spec.md §4.8).
pub fn parse_for(arg_str: &str) -> CommandParseOutcome<CommandArg> {
    let start = lexer::skipwhite(arg_str, 0);
    let (lhs, after_lhs) = parse_lhs(arg_str, start);
    let p = lexer::skipwhite(arg_str, after_lhs);
    if !arg_str[p..].starts_with("in") || crate::parser::expr::peek(arg_str, p + 2).map(|c| c.is_alphanumeric() || c == '_').unwrap_or(false) {
        return CommandParseOutcome::NotDone(Diagnostic::new("E690: Missing \"in\" after :for", p));
    }
    let rhs_start = lexer::skipwhite(arg_str, p + 2);
    match expr::parse_expr(arg_str, rhs_start) {
        Ok((rhs, end)) => {
            let rest = lexer::skipwhite(arg_str, end);
            if rest != arg_str.len() {
                return CommandParseOutcome::Fail(crate::error::ParseError::LineGetter(
                    messages::E488_TRAILING_CHARACTERS.to_string(),
                ));
            }
            CommandParseOutcome::Ok(CommandArg::ForLoop(ForLoop { lhs, rhs: Box::new(rhs) }))
        }
        Err(e) => CommandParseOutcome::NotDone(Diagnostic::new(e.to_string(), e.column().unwrap_or(rhs_start))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn let_plain_assign() {
        let outcome = parse_let("x = 1");
        match outcome {
            CommandParseOutcome::Ok(CommandArg::LetAssign(a)) => {
                assert_eq!(a.lhs, vec!["x".to_string()]);
                assert_eq!(a.op, AssignOp::Assign);
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn let_destructure_list() {
        let outcome = parse_let("[a, b] = [1, 2]");
        match outcome {
            CommandParseOutcome::Ok(CommandArg::LetAssign(a)) => {
                assert_eq!(a.lhs, vec!["a".to_string(), "b".to_string()]);
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn let_no_operator_lists_value() {
        let outcome = parse_let("x");
        assert_eq!(outcome, CommandParseOutcome::Ok(CommandArg::AssignLhs(vec!["x".to_string()])));
    }

    #[test]
    fn let_compound_operator() {
        let outcome = parse_let("x += 1");
        match outcome {
            CommandParseOutcome::Ok(CommandArg::LetAssign(a)) => assert_eq!(a.op, AssignOp::Add),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn unlet_splits_names() {
        let outcome = parse_unlet("a b c");
        assert_eq!(
            outcome,
            CommandParseOutcome::Ok(CommandArg::AssignLhs(vec!["a".to_string(), "b".to_string(), "c".to_string()]))
        );
    }

    #[test]
    fn for_loop_over_list() {
        let outcome = parse_for("x in [1, 2, 3]");
        match outcome {
            CommandParseOutcome::Ok(CommandArg::ForLoop(f)) => assert_eq!(f.lhs, vec!["x".to_string()]),
            other => panic!("unexpected {:?}", other),
        }
    }
}
