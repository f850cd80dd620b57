// ABOUTME: Argument parser for :map/:unmap (spec.md §4.7)

use crate::ast::command::{CommandArg, MapFlags, MapSpec};
use crate::config::CommandParserOptions;
use crate::error::{messages, CommandParseOutcome, Diagnostic};
use crate::lexer;
use crate::parser::expr;

const TAGS: &[(&str, MapFlags)] = &[
    ("<buffer>", MapFlags::BUFFER),
    ("<nowait>", MapFlags::NOWAIT),
    ("<silent>", MapFlags::SILENT),
    ("<special>", MapFlags::SPECIAL),
    ("<script>", MapFlags::SCRIPT),
    ("<expr>", MapFlags::EXPR),
    ("<unique>", MapFlags::UNIQUE),
];

/// `:map`/`:unmap` (spec.md §4.7 `:map`): leading `<buffer>`/`<silent>`/...
/// tags, then the LHS key sequence, then everything else as the RHS.
pub fn parse_map(arg_str: &str, options: &CommandParserOptions) -> CommandParseOutcome<CommandArg> {
    let mut flags = MapFlags::EMPTY;
    let mut p = lexer::skipwhite(arg_str, 0);
    'tags: loop {
        for (tag, flag) in TAGS {
            if arg_str[p..].starts_with(tag) {
                flags.insert(*flag);
                p = lexer::skipwhite(arg_str, p + tag.len());
                continue 'tags;
            }
        }
        break;
    }

    if p >= arg_str.len() {
        return CommandParseOutcome::Ok(CommandArg::None);
    }

    let lhs_end = arg_str[p..].find(|c: char| c == ' ' || c == '\t').map(|rel| p + rel).unwrap_or(arg_str.len());
    let lhs = arg_str[p..lhs_end].to_string();
    let rhs = lexer::skipwhite(arg_str, lhs_end);
    let rhs_text = arg_str[rhs..].to_string();

    let rhs_expr = if flags.contains(MapFlags::EXPR) && !rhs_text.is_empty() {
        match expr::parse_expr(&rhs_text, 0) {
            Ok((node, _end)) => Some(Box::new(node)),
            Err(e) => return CommandParseOutcome::NotDone(Diagnostic::new(e.to_string(), rhs + e.column().unwrap_or(0))),
        }
    } else {
        None
    };

    let _ = options;
    if lhs.is_empty() {
        return CommandParseOutcome::NotDone(Diagnostic::new(messages::E474_INVALID_ARGUMENT, p));
    }

    CommandParseOutcome::Ok(CommandArg::Map(MapSpec {
        flags,
        lhs,
        rhs: rhs_text,
        rhs_expr,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn simple_map() {
        let opts = CommandParserOptions::default();
        let outcome = parse_map("<F2> :w<CR>", &opts);
        match outcome {
            CommandParseOutcome::Ok(CommandArg::Map(m)) => {
                assert_eq!(m.lhs, "<F2>");
                assert_eq!(m.rhs, ":w<CR>");
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn map_with_tags() {
        let opts = CommandParserOptions::default();
        let outcome = parse_map("<buffer> <silent> gg :echo 1<CR>", &opts);
        match outcome {
            CommandParseOutcome::Ok(CommandArg::Map(m)) => {
                assert!(m.flags.contains(MapFlags::BUFFER));
                assert!(m.flags.contains(MapFlags::SILENT));
                assert_eq!(m.lhs, "gg");
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn expr_map_parses_rhs_as_expression() {
        let opts = CommandParserOptions::default();
        let outcome = parse_map("<expr> x 1+1", &opts);
        match outcome {
            CommandParseOutcome::Ok(CommandArg::Map(m)) => assert!(m.rhs_expr.is_some()),
            other => panic!("unexpected {:?}", other),
        }
    }
}
