// ABOUTME: End-to-end Ex-command parser scenarios from spec.md §8

use vimlfe::ast::command::{CommandArg, CommandType};
use vimlfe::ast::expr::{BinaryOp, ExpressionNode};
use vimlfe::config::CommandParserOptions;
use vimlfe::parser::sequence::parse_cmd_sequence;

fn parse(src: &'static str) -> Vec<vimlfe::ast::command::CommandNode> {
    let options = CommandParserOptions::default();
    let mut lines = src.lines().map(|s| s.to_string());
    parse_cmd_sequence(move || lines.next(), &options)
}

fn assert_no_errors(nodes: &[vimlfe::ast::command::CommandNode]) {
    for n in nodes {
        assert_ne!(n.command_type, CommandType::SyntaxError, "unexpected syntax error: {:?}", n.error_message);
        if let Some(body) = &n.body {
            assert_no_errors(body);
        }
    }
}

#[test]
fn scenario_1_echo_with_precedence() {
    let nodes = parse("echo 1 + 2 * 3");
    assert_no_errors(&nodes);
    assert_eq!(nodes.len(), 1);
    assert_eq!(nodes[0].command_type, CommandType::Echo);
    match &nodes[0].arg {
        CommandArg::Expressions(exprs) => {
            assert_eq!(exprs.len(), 1);
            match &exprs[0] {
                ExpressionNode::Binary { op: BinaryOp::Add, rhs, .. } => {
                    assert!(matches!(**rhs, ExpressionNode::Binary { op: BinaryOp::Multiply, .. }));
                }
                other => panic!("unexpected {:?}", other),
            }
        }
        other => panic!("unexpected {:?}", other),
    }
}

#[test]
fn scenario_2_let_list_destructure() {
    let nodes = parse("let [a, b] = [1, 2]");
    assert_no_errors(&nodes);
    assert_eq!(nodes.len(), 1);
    assert_eq!(nodes[0].command_type, CommandType::Let);
    match &nodes[0].arg {
        CommandArg::LetAssign(assign) => {
            assert_eq!(assign.lhs, vec!["a".to_string(), "b".to_string()]);
            assert!(matches!(assign.rhs.as_deref(), Some(ExpressionNode::List { .. })));
        }
        other => panic!("unexpected {:?}", other),
    }
}

#[test]
fn scenario_3_if_elseif_else_endif() {
    let nodes = parse("if x > 0\n  echo \"pos\"\nelseif x < 0\n  echo \"neg\"\nelse\n  echo \"zero\"\nendif");
    assert_no_errors(&nodes);
    assert_eq!(nodes.len(), 1);
    assert_eq!(nodes[0].command_type, CommandType::If);
    match &nodes[0].body {
        Some(body) => {
            assert_eq!(body.len(), 5);
            assert_eq!(body[0].command_type, CommandType::Echo);
            assert_eq!(body[1].command_type, CommandType::Elseif);
            assert_eq!(body[2].command_type, CommandType::Echo);
            assert_eq!(body[3].command_type, CommandType::Else);
            assert_eq!(body[4].command_type, CommandType::Echo);
        }
        None => panic!("expected :if body"),
    }
}

#[test]
fn scenario_4_map_with_flags() {
    let nodes = parse("map <silent> <buffer> <F2> :echo \"hi\"<CR>");
    assert_no_errors(&nodes);
    assert_eq!(nodes[0].command_type, CommandType::Map);
    match &nodes[0].arg {
        CommandArg::Map(spec) => {
            assert!(spec.flags.contains(vimlfe::ast::command::MapFlags::SILENT));
            assert!(spec.flags.contains(vimlfe::ast::command::MapFlags::BUFFER));
            assert_eq!(spec.lhs, "<F2>");
            assert!(spec.rhs.contains("echo"));
        }
        other => panic!("unexpected {:?}", other),
    }
}

#[test]
fn scenario_5_substitute_with_group_and_flags() {
    let nodes = parse(r"s/foo\(bar\)/baz\1/g");
    assert_no_errors(&nodes);
    assert_eq!(nodes[0].command_type, CommandType::Substitute);
    match &nodes[0].arg {
        CommandArg::Substitute(spec) => {
            assert_eq!(spec.pattern.as_ref().unwrap().source, r"foo\(bar\)");
            assert_eq!(
                spec.replacement,
                vec![
                    vimlfe::ast::command::Replacement::Literal("baz".to_string()),
                    vimlfe::ast::command::Replacement::Group(1),
                ]
            );
            assert!(spec.flags.contains(vimlfe::ast::command::SubstituteFlags::GLOBAL));
        }
        other => panic!("unexpected {:?}", other),
    }
}

#[test]
fn scenario_6_for_loop_split_by_bar() {
    let nodes = parse("for i in range(10) | echo i | endfor");
    assert_no_errors(&nodes);
    assert_eq!(nodes.len(), 1);
    assert_eq!(nodes[0].command_type, CommandType::For);
    match &nodes[0].arg {
        CommandArg::ForLoop(loop_spec) => {
            assert_eq!(loop_spec.lhs, vec!["i".to_string()]);
            match loop_spec.rhs.as_ref() {
                ExpressionNode::Call { func, args } => {
                    assert!(matches!(**func, ExpressionNode::SimpleVariableName { .. }));
                    assert_eq!(args.len(), 1);
                }
                other => panic!("unexpected {:?}", other),
            }
        }
        other => panic!("unexpected {:?}", other),
    }
}

#[test]
fn argument_slot_matches_command_type() {
    // Every command here stores its args under the one `CommandArg` variant
    // its own grammar production uses — a plain-commands cross-check of
    // spec.md §8's "number of occupied args slots" invariant.
    let nodes = parse("echo 1\nlet x = 2\nif 1\nendif");
    assert!(matches!(nodes[0].arg, CommandArg::Expressions(_)));
    assert!(matches!(nodes[1].arg, CommandArg::LetAssign(_)));
    assert!(matches!(nodes[2].arg, CommandArg::Expression(_)));
    assert!(nodes[2].body.is_some());
}
