// ABOUTME: Argument parser for :set (spec.md §4.7)

use crate::ast::command::{CommandArg, SetOp, SetOperator};
use crate::config::CommandParserOptions;
use crate::error::{messages, CommandParseOutcome, Diagnostic};
use crate::lexer;

/// Decodes the special-key notation `wildchar`/`wildcharm` store their value
/// in (spec.md §5/§9: these two options hold a key code, not arbitrary
/// text, unlike every other `:set` option this front end leaves
/// uninterpreted). Accepts `<Tab>`/`<Esc>`/`<C-x>`-style angle-bracket names,
/// `^X` caret notation, a bare literal character, or an already-numeric
/// value.
fn resolve_key_notation(value: &str) -> Option<u32> {
    if let Ok(n) = value.parse::<u32>() {
        return Some(n);
    }
    if let Some(inner) = value.strip_prefix('<').and_then(|s| s.strip_suffix('>')) {
        return match inner.to_ascii_lowercase().as_str() {
            "tab" => Some(9),
            "esc" => Some(27),
            "cr" | "enter" | "return" => Some(13),
            "space" => Some(32),
            "bs" | "backspace" => Some(8),
            other => {
                let rest = other.strip_prefix("c-")?;
                let c = rest.chars().next().filter(|_| rest.chars().count() == 1)?;
                Some((c.to_ascii_uppercase() as u32) & 0x1f)
            }
        };
    }
    if let Some(rest) = value.strip_prefix('^') {
        let c = rest.chars().next().filter(|_| rest.chars().count() == 1)?;
        return Some((c.to_ascii_uppercase() as u32) & 0x1f);
    }
    let mut chars = value.chars();
    let c = chars.next()?;
    if chars.next().is_none() {
        return Some(c as u32);
    }
    None
}

fn is_name_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

fn parse_value(s: &str, pos: usize) -> (String, usize) {
    let mut out = String::new();
    let mut i = pos;
    let bytes = s.as_bytes();
    while i < bytes.len() {
        let c = s[i..].chars().next().unwrap();
        if c == '\\' && i + 1 < bytes.len() {
            let next = s[i + 1..].chars().next().unwrap();
            out.push(next);
            i += 1 + next.len_utf8();
            continue;
        }
        if c == ' ' || c == '\t' {
            break;
        }
        out.push(c);
        i += c.len_utf8();
    }
    (out, i)
}

fn parse_one(s: &str, pos: usize) -> (SetOp, usize) {
    if let Some(rest) = s[pos..].strip_prefix("no") {
        if let Some(end) = lexer::skip_id(rest, 0) {
            if end > 0 {
                return (
                    SetOp {
                        name: rest[..end].to_string(),
                        operator: SetOperator::Reset,
                        value: None,
                    },
                    pos + 2 + end,
                );
            }
        }
    }
    if let Some(rest) = s[pos..].strip_prefix("inv") {
        if let Some(end) = lexer::skip_id(rest, 0) {
            if end > 0 {
                return (
                    SetOp {
                        name: rest[..end].to_string(),
                        operator: SetOperator::Invert,
                        value: None,
                    },
                    pos + 3 + end,
                );
            }
        }
    }

    let name_end = lexer::skip_id(s, pos).unwrap_or(pos);
    let name = s[pos..name_end].to_string();
    let mut p = name_end;

    if s[p..].starts_with("?") {
        return (
            SetOp {
                name,
                operator: SetOperator::Query,
                value: None,
            },
            p + 1,
        );
    }
    if s[p..].starts_with('!') {
        return (
            SetOp {
                name,
                operator: SetOperator::Invert,
                value: None,
            },
            p + 1,
        );
    }
    if s[p..].starts_with("&vim") {
        return (
            SetOp {
                name,
                operator: SetOperator::ResetToVim,
                value: None,
            },
            p + 4,
        );
    }
    if s[p..].starts_with("&vi") {
        return (
            SetOp {
                name,
                operator: SetOperator::ResetToVi,
                value: None,
            },
            p + 3,
        );
    }
    if s[p..].starts_with('&') {
        return (
            SetOp {
                name,
                operator: SetOperator::Reset,
                value: None,
            },
            p + 1,
        );
    }

    let op = if s[p..].starts_with("+=") {
        Some((SetOperator::Add, 2))
    } else if s[p..].starts_with("-=") {
        Some((SetOperator::Subtract, 2))
    } else if s[p..].starts_with("^=") {
        Some((SetOperator::Power, 2))
    } else if s[p..].starts_with('=') || s[p..].starts_with(':') {
        Some((SetOperator::Assign, 1))
    } else {
        None
    };

    match op {
        Some((operator, op_len)) => {
            p += op_len;
            let (value, end) = parse_value(s, p);
            (SetOp { name, operator, value: Some(value) }, end)
        }
        None => (
            SetOp {
                name,
                operator: SetOperator::Show,
                value: None,
            },
            p,
        ),
    }
}

/// `:set` (spec.md §4.7 `:set`): a space-separated list of option
/// assignments/queries, each parsed independently.
///
/// `wildchar`/`wildcharm` get special-cased the same way `do_set` special-
/// cases them (spec.md §5 "Cached global state"): an `Assign` must decode to
/// a valid key code via [`resolve_key_notation`], and a bare `Show`/`Query`
/// with no literal value is filled in from `options.wildchar_idx`/
/// `wildcharm_idx` — the parser-instance-scoped cache standing in for the
/// original's lazily-resolved option-table index.
pub fn parse_set(arg_str: &str, options: &CommandParserOptions) -> CommandParseOutcome<CommandArg> {
    let mut ops = Vec::new();
    let mut p = lexer::skipwhite(arg_str, 0);
    if p >= arg_str.len() {
        return CommandParseOutcome::Ok(CommandArg::None);
    }
    while p < arg_str.len() {
        let name_probe = lexer::skip_id(arg_str, p);
        if name_probe.is_none() && !arg_str[p..].starts_with("no") && !arg_str[p..].starts_with("inv") {
            return CommandParseOutcome::NotDone(Diagnostic::new(messages::E474_INVALID_ARGUMENT, p));
        }
        let (mut op, next) = parse_one(arg_str, p);

        let cached = match op.name.as_str() {
            "wildchar" => Some(options.wildchar_idx),
            "wildcharm" => Some(options.wildcharm_idx),
            _ => None,
        };
        if let Some(cached_idx) = cached {
            match op.operator {
                SetOperator::Assign if resolve_key_notation(op.value.as_deref().unwrap_or("")).is_none() => {
                    return CommandParseOutcome::NotDone(Diagnostic::new(messages::E474_INVALID_ARGUMENT, p));
                }
                SetOperator::Show | SetOperator::Query => {
                    if let Some(code) = cached_idx {
                        op.value = Some(code.to_string());
                    }
                }
                _ => {}
            }
        }

        ops.push(op);
        p = lexer::skipwhite(arg_str, next);
    }
    CommandParseOutcome::Ok(CommandArg::Set(ops))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn opts() -> CommandParserOptions {
        CommandParserOptions::default()
    }

    #[test]
    fn boolean_toggle() {
        let outcome = parse_set("number", &opts());
        match outcome {
            CommandParseOutcome::Ok(CommandArg::Set(ops)) => {
                assert_eq!(ops[0].name, "number");
                assert_eq!(ops[0].operator, SetOperator::Show);
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn boolean_reset_via_no_prefix() {
        let outcome = parse_set("nonumber", &opts());
        match outcome {
            CommandParseOutcome::Ok(CommandArg::Set(ops)) => {
                assert_eq!(ops[0].name, "number");
                assert_eq!(ops[0].operator, SetOperator::Reset);
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn assign_string_value() {
        let outcome = parse_set("tabstop=4", &opts());
        match outcome {
            CommandParseOutcome::Ok(CommandArg::Set(ops)) => {
                assert_eq!(ops[0].operator, SetOperator::Assign);
                assert_eq!(ops[0].value.as_deref(), Some("4"));
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn multiple_options_in_one_set() {
        let outcome = parse_set("number nowrap tabstop=2", &opts());
        match outcome {
            CommandParseOutcome::Ok(CommandArg::Set(ops)) => assert_eq!(ops.len(), 3),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn resolve_key_notation_accepts_angle_caret_and_literal() {
        assert_eq!(resolve_key_notation("<Tab>"), Some(9));
        assert_eq!(resolve_key_notation("<C-e>"), Some(5));
        assert_eq!(resolve_key_notation("^I"), Some(9));
        assert_eq!(resolve_key_notation("x"), Some('x' as u32));
        assert_eq!(resolve_key_notation("26"), Some(26));
        assert_eq!(resolve_key_notation("nope"), None);
    }

    #[test]
    fn wildchar_assign_with_invalid_key_notation_is_syntax_error() {
        assert!(matches!(parse_set("wildchar=nope", &opts()), CommandParseOutcome::NotDone(_)));
    }

    #[test]
    fn wildchar_assign_with_valid_key_notation_is_accepted() {
        let outcome = parse_set("wildchar=<Tab>", &opts());
        match outcome {
            CommandParseOutcome::Ok(CommandArg::Set(ops)) => {
                assert_eq!(ops[0].operator, SetOperator::Assign);
                assert_eq!(ops[0].value.as_deref(), Some("<Tab>"));
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn wildcharm_query_is_filled_in_from_cached_index() {
        let mut options = opts();
        options.wildcharm_idx = Some(5);
        let outcome = parse_set("wildcharm?", &options);
        match outcome {
            CommandParseOutcome::Ok(CommandArg::Set(ops)) => {
                assert_eq!(ops[0].operator, SetOperator::Query);
                assert_eq!(ops[0].value.as_deref(), Some("5"));
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn wildchar_show_without_cached_index_stays_empty() {
        let outcome = parse_set("wildchar", &opts());
        match outcome {
            CommandParseOutcome::Ok(CommandArg::Set(ops)) => {
                assert_eq!(ops[0].operator, SetOperator::Show);
                assert_eq!(ops[0].value, None);
            }
            other => panic!("unexpected {:?}", other),
        }
    }
}
