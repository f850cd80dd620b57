// ABOUTME: Block-stack correctness and fuzz-like nesting properties (spec.md §8)

use vimlfe::ast::command::CommandType;
use vimlfe::config::CommandParserOptions;
use vimlfe::parser::sequence::parse_cmd_sequence;

fn parse(src: &'static str) -> Vec<vimlfe::ast::command::CommandNode> {
    let options = CommandParserOptions::default();
    let mut lines = src.lines().map(|s| s.to_string());
    parse_cmd_sequence(move || lines.next(), &options)
}

#[test]
fn missing_endwhile_reports_at_eof() {
    let nodes = parse("while 1\necho 1");
    match &nodes[0].body {
        Some(body) => {
            let last = body.last().unwrap();
            assert_eq!(last.command_type, CommandType::SyntaxError);
            assert!(last.error_message.as_deref().unwrap().contains("endwhile"));
        }
        None => panic!("expected :while body"),
    }
}

#[test]
fn missing_endfunction_reports_at_eof() {
    let nodes = parse("function! F()\nreturn 1");
    match &nodes[0].body {
        Some(body) => {
            let last = body.last().unwrap();
            assert_eq!(last.command_type, CommandType::SyntaxError);
            assert!(last.error_message.as_deref().unwrap().contains("endfunction"));
        }
        None => panic!("expected :function body"),
    }
}

#[test]
fn unmatched_closer_is_reported_in_place() {
    let nodes = parse("echo 1\nendfor\necho 2");
    assert_eq!(nodes.len(), 3);
    assert_eq!(nodes[1].command_type, CommandType::SyntaxError);
}

#[test]
fn deeply_nested_blocks_within_limit_parse_cleanly() {
    // 5 levels of `:if` nesting is well within `MAX_NEST_BLOCKS` — every
    // opener must find its matching `:endif` and no "too many nested
    // blocks" error should appear anywhere in the tree.
    let mut src = String::new();
    for _ in 0..5 {
        src.push_str("if 1\n");
    }
    src.push_str("echo 1\n");
    for _ in 0..5 {
        src.push_str("endif\n");
    }
    let nodes = parse(&src);
    assert_eq!(nodes.len(), 1);

    fn no_syntax_errors(nodes: &[vimlfe::ast::command::CommandNode]) {
        for n in nodes {
            assert_ne!(n.command_type, CommandType::SyntaxError);
            if let Some(body) = &n.body {
                no_syntax_errors(body);
            }
        }
    }
    no_syntax_errors(&nodes);
}

#[test]
fn nesting_past_the_limit_reports_too_many_blocks() {
    // One `:if` per line, far beyond the documented `MAX_NEST_BLOCKS` —
    // the driver must still terminate and must flag the overflow rather
    // than recursing without bound (spec.md §8 fuzz-like properties).
    let mut src = String::new();
    for _ in 0..50 {
        src.push_str("if 1\n");
    }

    let nodes = parse(&src);

    fn contains_too_many_blocks(nodes: &[vimlfe::ast::command::CommandNode]) -> bool {
        nodes.iter().any(|n| {
            n.error_message.as_deref().map(|m| m.contains("too many nested blocks")).unwrap_or(false)
                || n.body.as_ref().map(|body| contains_too_many_blocks(body)).unwrap_or(false)
        })
    }
    assert!(contains_too_many_blocks(&nodes));
}

#[test]
fn while_inside_if_nests_correctly() {
    let nodes = parse("if x\nwhile y\nlet z = 1\nendwhile\nendif");
    assert_eq!(nodes.len(), 1);
    match &nodes[0].body {
        Some(outer) => {
            assert_eq!(outer.len(), 1);
            assert_eq!(outer[0].command_type, CommandType::While);
            match &outer[0].body {
                Some(inner) => {
                    assert_eq!(inner.len(), 1);
                    assert_eq!(inner[0].command_type, CommandType::Let);
                }
                None => panic!("expected :while body"),
            }
        }
        None => panic!("expected :if body"),
    }
}

#[test]
fn try_catch_finally_are_flattened_siblings() {
    let nodes = parse("try\ncall Risky()\ncatch\ncall Handle()\nfinally\ncall Cleanup()\nendtry");
    assert_eq!(nodes[0].command_type, CommandType::Try);
    match &nodes[0].body {
        Some(body) => {
            let types: Vec<_> = body.iter().map(|n| n.command_type).collect();
            assert_eq!(
                types,
                vec![
                    CommandType::Call,
                    CommandType::Catch,
                    CommandType::Call,
                    CommandType::Finally,
                    CommandType::Call,
                ]
            );
        }
        None => panic!("expected :try body"),
    }
}
