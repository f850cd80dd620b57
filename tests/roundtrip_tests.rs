// ABOUTME: pretty_print(parse(s)) reparses to a structurally equal AST (spec.md §8)

use vimlfe::config::{CommandParserOptions, PrinterOptions};
use vimlfe::parser::sequence::parse_cmd_sequence;
use vimlfe::printer::print_commands;

fn parse(src: &str) -> Vec<vimlfe::ast::command::CommandNode> {
    let options = CommandParserOptions::default();
    let mut lines = src.lines().map(|s| s.to_string());
    parse_cmd_sequence(move || lines.next(), &options)
}

fn assert_roundtrips(src: &'static str) {
    let first = parse(src);
    let printed = print_commands(&first, &PrinterOptions::default());
    let second = parse(&printed);
    assert_eq!(first, second, "roundtrip mismatch for {:?}\nprinted as:\n{}", src, printed);
}

#[test]
fn simple_let_roundtrips() {
    assert_roundtrips("let x = 1");
}

#[test]
fn echo_with_expression_roundtrips() {
    assert_roundtrips("echo 1 + 2 * 3");
}

#[test]
fn if_elseif_else_endif_roundtrips() {
    assert_roundtrips("if x > 0\n  echo 1\nelseif x < 0\n  echo 2\nelse\n  echo 3\nendif");
}

#[test]
fn while_loop_roundtrips() {
    assert_roundtrips("while x < 10\n  let x = x + 1\nendwhile");
}

#[test]
fn for_loop_roundtrips() {
    assert_roundtrips("for i in range(10)\n  call Foo(i)\nendfor");
}

#[test]
fn function_definition_roundtrips() {
    assert_roundtrips("function! Greet(name)\n  return name\nendfunction");
}

#[test]
fn nested_blocks_roundtrip() {
    assert_roundtrips("if x\n  while y\n    let z = 1\n  endwhile\nendif");
}

#[test]
fn substitute_roundtrips() {
    assert_roundtrips(r"s/foo\(bar\)/baz\1/g");
}

#[test]
fn set_command_roundtrips() {
    assert_roundtrips("set number");
}

#[test]
fn ranged_command_roundtrips() {
    assert_roundtrips("1,$print");
}
