// ABOUTME: Argument parser for :function (spec.md §4.7)

use crate::ast::command::{CommandArg, FunctionFlags, FunctionSignature};
use crate::error::{messages, CommandParseOutcome, Diagnostic};
use crate::lexer;
use crate::parser::expr;

/// `:function` (spec.md §4.7 `:function`). Three shapes: `:function` alone
/// (list all — `CommandArg::None`), `:function /pattern/` (list matching —
/// `by_pattern: true`, no params/body), and `:function name(args) [flags]`
/// (define — the common case).
pub fn parse_function(arg_str: &str) -> CommandParseOutcome<CommandArg> {
    let start = lexer::skipwhite(arg_str, 0);
    if start >= arg_str.len() {
        return CommandParseOutcome::Ok(CommandArg::None);
    }

    if arg_str[start..].starts_with('/') {
        return match lexer::get_regex(arg_str, start + 1, b'/') {
            Some((re, _end)) => CommandParseOutcome::Ok(CommandArg::Function(FunctionSignature {
                name: Box::new(crate::ast::expr::ExpressionNode::SingleQuotedString { text: re.source, start }),
                params: Vec::new(),
                varargs: false,
                flags: FunctionFlags::EMPTY,
                by_pattern: true,
            })),
            None => CommandParseOutcome::NotDone(Diagnostic::new(messages::E15_UNCLOSED_EXPRESSION, start)),
        };
    }

    let (name, after_name) = match expr::parse_name(arg_str, start) {
        Ok(v) => v,
        Err(_) => return CommandParseOutcome::NotDone(Diagnostic::new(messages::E15_INVALID_EXPRESSION, start)),
    };
    // Dict-member function names (`dict.fn`) and autoload names (`a#b#fn`)
    // both fall out of `skip_id`'s `#`/`.`-unaware scan plus a following
    // subscript chain.
    let (name, after_name) = match expr::handle_subscript(arg_str, after_name, name, false) {
        Ok(v) => v,
        Err(_) => (name.clone(), after_name),
    };

    let p = lexer::skipwhite(arg_str, after_name);
    if !arg_str[p..].starts_with('(') {
        // No parameter list: this is the "list one function" form.
        return CommandParseOutcome::Ok(CommandArg::Function(FunctionSignature {
            name: Box::new(name),
            params: Vec::new(),
            varargs: false,
            flags: FunctionFlags::EMPTY,
            by_pattern: false,
        }));
    }

    let close = match arg_str[p..].find(')') {
        Some(rel) => p + rel,
        None => return CommandParseOutcome::NotDone(Diagnostic::new("E124: Missing ')'", p)),
    };
    let inner = &arg_str[p + 1..close];
    let mut params = Vec::new();
    let mut varargs = false;
    for raw in inner.split(',') {
        let param = raw.trim();
        if param.is_empty() {
            continue;
        }
        if param == "..." {
            varargs = true;
        } else {
            params.push(param.to_string());
        }
    }

    let mut flags = FunctionFlags::EMPTY;
    let mut q = lexer::skipwhite(arg_str, close + 1);
    loop {
        let rest = &arg_str[q..];
        if let Some(stripped) = rest.strip_prefix("range") {
            flags.insert(FunctionFlags::RANGE);
            q = arg_str.len() - stripped.len();
        } else if let Some(stripped) = rest.strip_prefix("dict") {
            flags.insert(FunctionFlags::DICT);
            q = arg_str.len() - stripped.len();
        } else if let Some(stripped) = rest.strip_prefix("abort") {
            flags.insert(FunctionFlags::ABORT);
            q = arg_str.len() - stripped.len();
        } else {
            break;
        }
        q = lexer::skipwhite(arg_str, q);
    }

    CommandParseOutcome::Ok(CommandArg::Function(FunctionSignature {
        name: Box::new(name),
        params,
        varargs,
        flags,
        by_pattern: false,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bare_function_lists_all() {
        assert_eq!(parse_function(""), CommandParseOutcome::Ok(CommandArg::None));
    }

    #[test]
    fn function_with_params_and_flags() {
        let outcome = parse_function("s:Foo(a, b, ...) abort");
        match outcome {
            CommandParseOutcome::Ok(CommandArg::Function(sig)) => {
                assert_eq!(sig.params, vec!["a".to_string(), "b".to_string()]);
                assert!(sig.varargs);
                assert!(sig.flags.contains(FunctionFlags::ABORT));
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn function_by_pattern() {
        let outcome = parse_function("/^Foo/");
        match outcome {
            CommandParseOutcome::Ok(CommandArg::Function(sig)) => assert!(sig.by_pattern),
            other => panic!("unexpected {:?}", other),
        }
    }
}
