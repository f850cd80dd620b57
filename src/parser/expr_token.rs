// ABOUTME: Token-lexer-driven expression parser with highlighting (spec.md §4.3)
//
// Reuses the recursive-descent parser's primary-value logic (`parse6`,
// `parse_primary`, `handle_subscript`, `parse_name` in `expr.rs`, exposed
// `pub(crate)` for this reason and documented as an Open Question resolution
// in DESIGN.md) and replaces only its *binary-operator* driver with an
// explicit operator-priority stack (`viml_pexpr_handle_bop`), plus a token
// stream that records a highlight span per lexeme. Both parsers build the
// same `ExpressionNode` kinds (spec.md §4.3 closing line).

use crate::ast::expr::{BinaryOp, CaseCompareStrategy, ExpressionNode};
use crate::error::ExprParseError;
use crate::parser::expr;

/// One lexeme, spanning `[start, end)` in the source line.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub start: usize,
    pub end: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    LogicalOr,
    LogicalAnd,
    Comparison(BinaryOp, CaseCompareStrategy),
    Plus,
    Minus,
    Concat,
    Star,
    Slash,
    Percent,
    Question,
    Colon,
    Eof,
}

/// A highlight group assignment over a byte span, e.g. `NVimNumber`,
/// `NVimOperator`, `NVimInvalidComparisonOperator` (spec.md §4.3
/// "Highlighting").
#[derive(Debug, Clone, PartialEq)]
pub struct HighlightSpan {
    pub start: usize,
    pub end: usize,
    pub group: &'static str,
}

fn group_for(kind: TokenKind) -> &'static str {
    match kind {
        TokenKind::LogicalOr | TokenKind::LogicalAnd => "NVimOperator",
        TokenKind::Comparison(..) => "NVimComparisonOperator",
        TokenKind::Plus | TokenKind::Minus | TokenKind::Concat | TokenKind::Star | TokenKind::Slash | TokenKind::Percent => "NVimOperator",
        TokenKind::Question | TokenKind::Colon => "NVimTernary",
        TokenKind::Eof => "",
    }
}

/// Binding priority: higher binds tighter. Mirrors `node_type_to_op_lvl`.
fn priority(op: BinaryOp) -> u8 {
    match op {
        BinaryOp::LogicalOr => 2,
        BinaryOp::LogicalAnd => 3,
        BinaryOp::Greater
        | BinaryOp::GreaterOrEqual
        | BinaryOp::Less
        | BinaryOp::LessOrEqual
        | BinaryOp::Equals
        | BinaryOp::NotEquals
        | BinaryOp::Identical
        | BinaryOp::NotIdentical
        | BinaryOp::Matches
        | BinaryOp::NotMatches => 4,
        BinaryOp::Add | BinaryOp::Subtract | BinaryOp::Concat => 5,
        BinaryOp::Multiply | BinaryOp::Divide | BinaryOp::Modulo => 6,
    }
}

/// Peek the next operator-level token after skipping whitespace, without
/// consuming anything else — this is the `kELFlagPeek` contract (spec.md
/// §4.3): callers can look ahead before committing to a reduction.
fn next_operator_token(line: &str, pos: usize) -> Token {
    let p = crate::lexer::skipwhite(line, pos);
    if let Some((op, after)) = expr::match_comparison_op(line, p) {
        let (case, after) = match expr::peek(line, after) {
            Some('#') => (CaseCompareStrategy::MatchCase, after + 1),
            Some('?') => (CaseCompareStrategy::IgnoreCase, after + 1),
            _ => (CaseCompareStrategy::UseOption, after),
        };
        return Token {
            kind: TokenKind::Comparison(op, case),
            start: p,
            end: after,
        };
    }
    match expr::peek(line, p) {
        Some('|') if expr::starts_with_at(line, p, "||") => Token {
            kind: TokenKind::LogicalOr,
            start: p,
            end: p + 2,
        },
        Some('&') if expr::starts_with_at(line, p, "&&") => Token {
            kind: TokenKind::LogicalAnd,
            start: p,
            end: p + 2,
        },
        Some('+') => Token {
            kind: TokenKind::Plus,
            start: p,
            end: p + 1,
        },
        Some('-') => Token {
            kind: TokenKind::Minus,
            start: p,
            end: p + 1,
        },
        Some('.') => Token {
            kind: TokenKind::Concat,
            start: p,
            end: p + 1,
        },
        Some('*') => Token {
            kind: TokenKind::Star,
            start: p,
            end: p + 1,
        },
        Some('/') => Token {
            kind: TokenKind::Slash,
            start: p,
            end: p + 1,
        },
        Some('%') => Token {
            kind: TokenKind::Percent,
            start: p,
            end: p + 1,
        },
        Some('?') => Token {
            kind: TokenKind::Question,
            start: p,
            end: p + 1,
        },
        Some(':') => Token {
            kind: TokenKind::Colon,
            start: p,
            end: p + 1,
        },
        _ => Token {
            kind: TokenKind::Eof,
            start: p,
            end: p,
        },
    }
}

fn token_to_binop(kind: TokenKind) -> Option<(BinaryOp, CaseCompareStrategy)> {
    match kind {
        TokenKind::LogicalOr => Some((BinaryOp::LogicalOr, CaseCompareStrategy::UseOption)),
        TokenKind::LogicalAnd => Some((BinaryOp::LogicalAnd, CaseCompareStrategy::UseOption)),
        TokenKind::Comparison(op, case) => Some((op, case)),
        TokenKind::Plus => Some((BinaryOp::Add, CaseCompareStrategy::UseOption)),
        TokenKind::Minus => Some((BinaryOp::Subtract, CaseCompareStrategy::UseOption)),
        TokenKind::Concat => Some((BinaryOp::Concat, CaseCompareStrategy::UseOption)),
        TokenKind::Star => Some((BinaryOp::Multiply, CaseCompareStrategy::UseOption)),
        TokenKind::Slash => Some((BinaryOp::Divide, CaseCompareStrategy::UseOption)),
        TokenKind::Percent => Some((BinaryOp::Modulo, CaseCompareStrategy::UseOption)),
        TokenKind::Question | TokenKind::Colon | TokenKind::Eof => None,
    }
}

fn is_comparison(op: BinaryOp) -> bool {
    priority(op) == 4
}

/// Parse one expression via the token-driven shift-reduce algorithm,
/// returning the AST plus the highlight spans collected along the way.
pub fn parse_expr_with_highlights(line: &str, pos: usize) -> Result<(ExpressionNode, usize, Vec<HighlightSpan>), ExprParseError> {
    let mut highlights = Vec::new();
    let (node, end) = parse_ternary(line, pos, &mut highlights)?;
    Ok((node, end, highlights))
}

fn parse_ternary(line: &str, pos: usize, highlights: &mut Vec<HighlightSpan>) -> Result<(ExpressionNode, usize), ExprParseError> {
    let (condition, pos) = parse_binop_chain(line, pos, highlights)?;
    let tok = next_operator_token(line, pos);
    if tok.kind == TokenKind::Question {
        highlights.push(HighlightSpan {
            start: tok.start,
            end: tok.end,
            group: group_for(tok.kind),
        });
        let (if_true, pos) = parse_binop_chain(line, tok.end, highlights)?;
        let colon = next_operator_token(line, pos);
        if colon.kind != TokenKind::Colon {
            return Err(expr::err(crate::error::messages::E15_INVALID_EXPRESSION, colon.start));
        }
        highlights.push(HighlightSpan {
            start: colon.start,
            end: colon.end,
            group: group_for(colon.kind),
        });
        let (if_false, pos) = parse_ternary(line, colon.end, highlights)?;
        Ok((
            ExpressionNode::Ternary {
                condition: Box::new(condition),
                if_true: Box::new(if_true),
                if_false: Box::new(if_false),
            },
            pos,
        ))
    } else {
        Ok((condition, pos))
    }
}

/// The shift-reduce binary-operator driver (`viml_pexpr_handle_bop`):
/// repeatedly reads a value then an operator, popping the operator stack
/// while its top binds at least as tightly as the incoming operator.
/// Comparisons are non-associative: a second comparison at the same level
/// is rejected with a diagnostic instead of silently chaining (spec.md §8).
fn parse_binop_chain(line: &str, pos: usize, highlights: &mut Vec<HighlightSpan>) -> Result<(ExpressionNode, usize), ExprParseError> {
    let (first, mut pos) = expr::parse6(line, pos)?;
    let mut values = vec![first];
    let mut ops: Vec<(BinaryOp, CaseCompareStrategy)> = Vec::new();
    let mut seen_comparison = false;

    loop {
        let tok = next_operator_token(line, pos);
        let Some((op, case)) = token_to_binop(tok.kind) else { break };

        if is_comparison(op) {
            if seen_comparison {
                return Err(expr::err("comparison operators do not associate: chain forbidden", tok.start));
            }
            seen_comparison = true;
        }

        highlights.push(HighlightSpan {
            start: tok.start,
            end: tok.end,
            group: group_for(tok.kind),
        });

        while let Some(&(top_op, _)) = ops.last() {
            if priority(top_op) >= priority(op) {
                let rhs = values.pop().unwrap();
                let lhs = values.pop().unwrap();
                let (popped_op, popped_case) = ops.pop().unwrap();
                values.push(ExpressionNode::Binary {
                    op: popped_op,
                    case: popped_case,
                    lhs: Box::new(lhs),
                    rhs: Box::new(rhs),
                });
            } else {
                break;
            }
        }

        let (rhs, next_pos) = expr::parse6(line, tok.end)?;
        values.push(rhs);
        ops.push((op, case));
        pos = next_pos;
    }

    while let Some((op, case)) = ops.pop() {
        let rhs = values.pop().unwrap();
        let lhs = values.pop().unwrap();
        values.push(ExpressionNode::Binary {
            op,
            case,
            lhs: Box::new(lhs),
            rhs: Box::new(rhs),
        });
    }

    Ok((values.pop().unwrap(), pos))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(s: &str) -> (ExpressionNode, Vec<HighlightSpan>) {
        let (node, pos, spans) = parse_expr_with_highlights(s, 0).unwrap();
        assert_eq!(pos, s.len());
        (node, spans)
    }

    #[test]
    fn shift_reduce_matches_precedence_climbing() {
        let (node, _) = parse("a + b * c");
        match node {
            ExpressionNode::Binary { op: BinaryOp::Add, rhs, .. } => {
                assert!(matches!(*rhs, ExpressionNode::Binary { op: BinaryOp::Multiply, .. }));
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn highlight_spans_cover_operators() {
        let (_node, spans) = parse("a + b");
        assert_eq!(spans.len(), 1);
        assert_eq!(spans[0].group, "NVimOperator");
    }

    #[test]
    fn chained_comparison_is_rejected() {
        let err = parse_expr_with_highlights("a == b == c", 0).unwrap_err();
        assert!(err.column().is_some());
    }

    #[test]
    fn ternary_chain_is_right_associative() {
        let (node, _) = parse("a ? b : c ? d : e");
        match node {
            ExpressionNode::Ternary { if_false, .. } => {
                assert!(matches!(*if_false, ExpressionNode::Ternary { .. }));
            }
            other => panic!("unexpected {:?}", other),
        }
    }
}
