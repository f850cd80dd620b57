// ABOUTME: Precedence/associativity properties for the expression parser (spec.md §8)

use vimlfe::ast::expr::{BinaryOp, CaseCompareStrategy, ExpressionNode};
use vimlfe::parser::parse_expr;

fn parse(src: &str) -> ExpressionNode {
    let (node, consumed) = parse_expr(src, 0).expect("expected a successful parse");
    assert_eq!(consumed, src.len(), "did not consume all of {:?}", src);
    node
}

fn binary_op(node: &ExpressionNode) -> BinaryOp {
    match node {
        ExpressionNode::Binary { op, .. } => *op,
        other => panic!("expected a binary node, got {:?}", other),
    }
}

#[test]
fn multiply_binds_tighter_than_add() {
    let node = parse("a + b * c");
    match node {
        ExpressionNode::Binary { op: BinaryOp::Add, rhs, .. } => {
            assert_eq!(binary_op(&rhs), BinaryOp::Multiply);
        }
        other => panic!("unexpected {:?}", other),
    }
}

#[test]
fn add_after_multiply_keeps_multiply_on_the_left() {
    let node = parse("a * b + c");
    match node {
        ExpressionNode::Binary { op: BinaryOp::Add, lhs, .. } => {
            assert_eq!(binary_op(&lhs), BinaryOp::Multiply);
        }
        other => panic!("unexpected {:?}", other),
    }
}

#[test]
fn concat_is_left_associative() {
    let node = parse("a . b . c");
    match node {
        ExpressionNode::Binary { op: BinaryOp::Concat, lhs, rhs, .. } => {
            assert_eq!(binary_op(&lhs), BinaryOp::Concat);
            assert!(matches!(*rhs, ExpressionNode::SimpleVariableName { .. }));
        }
        other => panic!("unexpected {:?}", other),
    }
}

#[test]
fn ternary_is_right_associative() {
    let node = parse("a ? b : c ? d : e");
    match node {
        ExpressionNode::Ternary { if_false, .. } => {
            assert!(matches!(*if_false, ExpressionNode::Ternary { .. }));
        }
        other => panic!("unexpected {:?}", other),
    }
}

#[test]
fn chained_comparisons_are_non_associative() {
    // The token-based parser (spec.md §4.3) flags this as a diagnostic; the
    // precedence-climbing parser (§4.2) simply stops consuming after the
    // first comparison, leaving `== c` unconsumed — exercised here via the
    // non-full-consumption check that the helper normally asserts away.
    let (_node, consumed) = parse_expr("a == b == c", 0).unwrap();
    assert!(consumed < "a == b == c".len());
}

#[test]
fn case_compare_suffix_is_recorded() {
    let node = parse("a ==# b");
    match node {
        ExpressionNode::Binary { op: BinaryOp::Equals, case, .. } => {
            assert_eq!(case, CaseCompareStrategy::MatchCase);
        }
        other => panic!("unexpected {:?}", other),
    }

    let node = parse("a ==? b");
    match node {
        ExpressionNode::Binary { op: BinaryOp::Equals, case, .. } => {
            assert_eq!(case, CaseCompareStrategy::IgnoreCase);
        }
        other => panic!("unexpected {:?}", other),
    }
}

#[test]
fn unary_minus_binds_tighter_than_multiply() {
    let node = parse("-a * b");
    match node {
        ExpressionNode::Binary { op: BinaryOp::Multiply, lhs, .. } => {
            assert!(matches!(*lhs, ExpressionNode::Unary { .. }));
        }
        other => panic!("unexpected {:?}", other),
    }
}

#[test]
fn float_requires_lookahead_past_second_dot() {
    // `1.2.3` is not a single float — the first number stops right after
    // `1` because a third dot follows its `.2`, so the top level is a
    // concat of `1` with whatever `2.3` turns out to be.
    let node = parse("1.2.3");
    match node {
        ExpressionNode::Binary { op: BinaryOp::Concat, lhs, .. } => {
            assert!(matches!(*lhs, ExpressionNode::Number { .. }));
        }
        other => panic!("unexpected {:?}", other),
    }
}

#[test]
fn simple_float_literal() {
    let node = parse("1.5");
    assert!(matches!(node, ExpressionNode::Float { .. }));
}
