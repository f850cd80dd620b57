// ABOUTME: Precedence-climbing recursive-descent expression parser (spec.md §4.2)
//
// One function per precedence level, named the way the source names them
// (`parse0`..`parse7`) since that naming *is* the documented interface
// (spec.md §6 `parse0_err`) rather than an internal implementation detail.
// Grounded on spec.md §4.2's precedence table and
// examples/original_source/src/nvim/translator/parser/expressions.h for the
// node shapes; lexical primitives are reused from `crate::lexer`.

use crate::ast::expr::{BinaryOp, CaseCompareStrategy, ExpressionNode, NamePiece, NumberLiteralKind, SubscriptIndex, UnaryOp};
use crate::error::ExprParseError;
use crate::lexer;

const MAX_FUNC_ARGS: usize = 20;

pub(crate) type PResult<T> = Result<(T, usize), ExprParseError>;

pub(crate) fn err(message: &str, col: usize) -> ExprParseError {
    ExprParseError::syntax(message, col)
}

pub(crate) fn peek(line: &str, pos: usize) -> Option<char> {
    line[pos..].chars().next()
}

pub(crate) fn starts_with_at(line: &str, pos: usize, needle: &str) -> bool {
    line[pos..].starts_with(needle)
}

/// Top-level entry point: `parse0_err` in spec.md §6.
pub fn parse_expr(line: &str, pos: usize) -> PResult<ExpressionNode> {
    parse0(line, pos)
}

/// Level 1: ternary `?:`, right-associative.
fn parse0(line: &str, pos: usize) -> PResult<ExpressionNode> {
    let (condition, pos) = parse1(line, pos)?;
    let p = lexer::skipwhite(line, pos);
    if peek(line, p) == Some('?') {
        let (if_true, pos) = parse1(line, p + 1)?;
        let p = lexer::skipwhite(line, pos);
        if peek(line, p) != Some(':') {
            return Err(err(crate::error::messages::E15_INVALID_EXPRESSION, p));
        }
        let (if_false, pos) = parse0(line, p + 1)?;
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

/// Level 2: `||`, left-associative.
fn parse1(line: &str, pos: usize) -> PResult<ExpressionNode> {
    let (mut lhs, mut pos) = parse2(line, pos)?;
    loop {
        let p = lexer::skipwhite(line, pos);
        if starts_with_at(line, p, "||") {
            let (rhs, next_pos) = parse2(line, p + 2)?;
            lhs = ExpressionNode::Binary {
                op: BinaryOp::LogicalOr,
                case: CaseCompareStrategy::UseOption,
                lhs: Box::new(lhs),
                rhs: Box::new(rhs),
            };
            pos = next_pos;
        } else {
            break;
        }
    }
    Ok((lhs, pos))
}

/// Level 3: `&&`, left-associative.
fn parse2(line: &str, pos: usize) -> PResult<ExpressionNode> {
    let (mut lhs, mut pos) = parse3(line, pos)?;
    loop {
        let p = lexer::skipwhite(line, pos);
        if starts_with_at(line, p, "&&") {
            let (rhs, next_pos) = parse3(line, p + 2)?;
            lhs = ExpressionNode::Binary {
                op: BinaryOp::LogicalAnd,
                case: CaseCompareStrategy::UseOption,
                lhs: Box::new(lhs),
                rhs: Box::new(rhs),
            };
            pos = next_pos;
        } else {
            break;
        }
    }
    Ok((lhs, pos))
}

/// `>`, `>=`, `<`, `<=`, `==`, `!=`, `is`, `isnot`, `=~`, `!~`, each optionally
/// followed by a one-character case-compare suffix (`#`/`?`).
pub(crate) fn match_comparison_op(line: &str, pos: usize) -> Option<(BinaryOp, usize)> {
    let two = |s: &str| starts_with_at(line, pos, s);
    if two(">=") {
        Some((BinaryOp::GreaterOrEqual, pos + 2))
    } else if two("<=") {
        Some((BinaryOp::LessOrEqual, pos + 2))
    } else if two("==") {
        Some((BinaryOp::Equals, pos + 2))
    } else if two("!=") {
        Some((BinaryOp::NotEquals, pos + 2))
    } else if two("=~") {
        Some((BinaryOp::Matches, pos + 2))
    } else if two("!~") {
        Some((BinaryOp::NotMatches, pos + 2))
    } else if line[pos..].starts_with("isnot") && !next_is_id_char(line, pos + 5) {
        Some((BinaryOp::NotIdentical, pos + 5))
    } else if line[pos..].starts_with("is") && !next_is_id_char(line, pos + 2) {
        Some((BinaryOp::Identical, pos + 2))
    } else if peek(line, pos) == Some('>') {
        Some((BinaryOp::Greater, pos + 1))
    } else if peek(line, pos) == Some('<') {
        Some((BinaryOp::Less, pos + 1))
    } else {
        None
    }
}

pub(crate) fn next_is_id_char(line: &str, pos: usize) -> bool {
    matches!(peek(line, pos), Some(c) if c.is_alphanumeric() || c == '_')
}

/// Level 4: comparisons. Non-associative: builds at most one comparison node
/// and does not loop, so `a == b == c` leaves a trailing `== c` for the
/// caller to report as trailing characters (spec.md §8's diagnostic
/// property is enforced by the token-based parser in `expr_token.rs`, which
/// detects the repeat explicitly).
fn parse3(line: &str, pos: usize) -> PResult<ExpressionNode> {
    let (lhs, pos) = parse4(line, pos)?;
    let p = lexer::skipwhite(line, pos);
    if let Some((op, after_op)) = match_comparison_op(line, p) {
        let (case, after_op) = match peek(line, after_op) {
            Some('#') => (CaseCompareStrategy::MatchCase, after_op + 1),
            Some('?') => (CaseCompareStrategy::IgnoreCase, after_op + 1),
            _ => (CaseCompareStrategy::UseOption, after_op),
        };
        let (rhs, pos) = parse4(line, after_op)?;
        Ok((
            ExpressionNode::Binary {
                op,
                case,
                lhs: Box::new(lhs),
                rhs: Box::new(rhs),
            },
            pos,
        ))
    } else {
        Ok((lhs, pos))
    }
}

/// Level 5: `+`, `-`, `.` (concat), left-associative.
fn parse4(line: &str, pos: usize) -> PResult<ExpressionNode> {
    let (mut lhs, mut pos) = parse5(line, pos)?;
    loop {
        let p = lexer::skipwhite(line, pos);
        let op = match peek(line, p) {
            Some('+') => Some(BinaryOp::Add),
            Some('-') => Some(BinaryOp::Subtract),
            Some('.') => Some(BinaryOp::Concat),
            _ => None,
        };
        match op {
            Some(op) => {
                let (rhs, next_pos) = parse5(line, p + 1)?;
                lhs = ExpressionNode::Binary {
                    op,
                    case: CaseCompareStrategy::UseOption,
                    lhs: Box::new(lhs),
                    rhs: Box::new(rhs),
                };
                pos = next_pos;
            }
            None => break,
        }
    }
    Ok((lhs, pos))
}

/// Level 6: `*`, `/`, `%`, left-associative.
fn parse5(line: &str, pos: usize) -> PResult<ExpressionNode> {
    let (mut lhs, mut pos) = parse6(line, pos)?;
    loop {
        let p = lexer::skipwhite(line, pos);
        let op = match peek(line, p) {
            Some('*') => Some(BinaryOp::Multiply),
            Some('/') => Some(BinaryOp::Divide),
            Some('%') => Some(BinaryOp::Modulo),
            _ => None,
        };
        match op {
            Some(op) => {
                let (rhs, next_pos) = parse6(line, p + 1)?;
                lhs = ExpressionNode::Binary {
                    op,
                    case: CaseCompareStrategy::UseOption,
                    lhs: Box::new(lhs),
                    rhs: Box::new(rhs),
                };
                pos = next_pos;
            }
            None => break,
        }
    }
    Ok((lhs, pos))
}

/// Level 7: unary prefixes `!`, `-`, `+` (collected then applied
/// right-to-left), then a primary value with subscripts.
pub(crate) fn parse6(line: &str, pos: usize) -> PResult<ExpressionNode> {
    parse7_impl(line, pos, true)
}

/// `parse7_nofunc`: identical to `parse7` but `handle_subscript` will not
/// consume a trailing `(args)` call form. Used where a following `(` belongs
/// to the surrounding grammar instead (e.g. immediately inside a `:call`
/// already establishes one call level).
pub fn parse7_nofunc(line: &str, pos: usize) -> PResult<ExpressionNode> {
    parse7_impl(line, pos, false)
}

fn parse7_impl(line: &str, pos: usize, parse_funccall: bool) -> PResult<ExpressionNode> {
    let p = lexer::skipwhite(line, pos);
    match peek(line, p) {
        Some('!') => {
            let (operand, pos) = parse7_impl(line, p + 1, parse_funccall)?;
            Ok((
                ExpressionNode::Unary {
                    op: UnaryOp::Not,
                    operand: Box::new(operand),
                },
                pos,
            ))
        }
        Some('-') => {
            let (operand, pos) = parse7_impl(line, p + 1, parse_funccall)?;
            Ok((
                ExpressionNode::Unary {
                    op: UnaryOp::Minus,
                    operand: Box::new(operand),
                },
                pos,
            ))
        }
        Some('+') => {
            let (operand, pos) = parse7_impl(line, p + 1, parse_funccall)?;
            Ok((
                ExpressionNode::Unary {
                    op: UnaryOp::Plus,
                    operand: Box::new(operand),
                },
                pos,
            ))
        }
        _ => {
            let (primary, pos) = parse_primary(line, p)?;
            handle_subscript(line, pos, primary, parse_funccall)
        }
    }
}

/// Primary dispatch (spec.md §4.2 "Primary parser (level 7)").
pub(crate) fn parse_primary(line: &str, pos: usize) -> PResult<ExpressionNode> {
    match peek(line, pos) {
        Some(c) if c.is_ascii_digit() => parse_number(line, pos),
        Some('"') => parse_double_quoted_string(line, pos),
        Some('\'') => parse_single_quoted_string(line, pos),
        Some('[') => parse_list(line, pos),
        Some('{') => parse_figure_brace(line, pos),
        Some('&') => parse_option(line, pos),
        Some('$') => parse_env(line, pos),
        Some('@') => parse_register(line, pos),
        Some('(') => {
            let (inner, pos) = parse0(line, pos + 1)?;
            let p = lexer::skipwhite(line, pos);
            if peek(line, p) != Some(')') {
                return Err(err(crate::error::messages::E15_UNCLOSED_EXPRESSION, p));
            }
            Ok((ExpressionNode::Parenthesized(Box::new(inner)), p + 1))
        }
        _ => parse_name(line, pos),
    }
}

fn parse_number(line: &str, pos: usize) -> PResult<ExpressionNode> {
    let (end, base) = lexer::find_nr_end(line, pos, true);
    let text = line[pos..end].to_string();
    if base == lexer::NumberBase::Float {
        Ok((ExpressionNode::Float { text, start: pos }, end))
    } else {
        let kind = match base {
            lexer::NumberBase::Decimal => NumberLiteralKind::Decimal,
            lexer::NumberBase::Octal => NumberLiteralKind::Octal,
            lexer::NumberBase::Hex => NumberLiteralKind::Hex,
            lexer::NumberBase::Float => unreachable!(),
        };
        Ok((ExpressionNode::Number { kind, text, start: pos }, end))
    }
}

fn parse_double_quoted_string(line: &str, pos: usize) -> PResult<ExpressionNode> {
    let bytes = line.as_bytes();
    let mut i = pos + 1;
    while i < bytes.len() {
        if bytes[i] == b'\\' && i + 1 < bytes.len() {
            i += 2;
            continue;
        }
        if bytes[i] == b'"' {
            let text = line[pos + 1..i].to_string();
            return Ok((ExpressionNode::DoubleQuotedString { text, start: pos }, i + 1));
        }
        i += 1;
    }
    Err(err(crate::error::messages::E15_UNCLOSED_EXPRESSION, pos))
}

fn parse_single_quoted_string(line: &str, pos: usize) -> PResult<ExpressionNode> {
    let bytes = line.as_bytes();
    let mut i = pos + 1;
    let mut text = String::new();
    while i < bytes.len() {
        if bytes[i] == b'\'' {
            if i + 1 < bytes.len() && bytes[i + 1] == b'\'' {
                text.push('\'');
                i += 2;
                continue;
            }
            return Ok((ExpressionNode::SingleQuotedString { text, start: pos }, i + 1));
        }
        let ch = line[i..].chars().next().unwrap();
        text.push(ch);
        i += ch.len_utf8();
    }
    Err(err(crate::error::messages::E15_UNCLOSED_EXPRESSION, pos))
}

fn parse_list(line: &str, pos: usize) -> PResult<ExpressionNode> {
    let mut items = Vec::new();
    let mut p = lexer::skipwhite(line, pos + 1);
    if peek(line, p) == Some(']') {
        return Ok((ExpressionNode::List { items }, p + 1));
    }
    loop {
        let (item, next) = parse0(line, p)?;
        items.push(item);
        p = lexer::skipwhite(line, next);
        match peek(line, p) {
            Some(',') => {
                p = lexer::skipwhite(line, p + 1);
                if peek(line, p) == Some(']') {
                    return Ok((ExpressionNode::List { items }, p + 1));
                }
            }
            Some(']') => return Ok((ExpressionNode::List { items }, p + 1)),
            _ => return Err(err(crate::error::messages::E15_UNCLOSED_EXPRESSION, p)),
        }
    }
}

/// `{` disambiguation (spec.md §4.2): attempt a dictionary literal first
/// (`key : value` pairs); an empty `{}` is a dictionary. Anything else is a
/// curly-braces variable name piece, handled by `parse_name`'s caller, so
/// this function only ever produces dictionaries or parenthesized-style
/// blocks — `parse_name` is entered directly instead when the first
/// character isn't `{` in name position.
fn parse_figure_brace(line: &str, pos: usize) -> PResult<ExpressionNode> {
    let mut p = lexer::skipwhite(line, pos + 1);
    if peek(line, p) == Some('}') {
        return Ok((ExpressionNode::Dictionary { entries: Vec::new() }, p + 1));
    }
    let mut entries = Vec::new();
    loop {
        let (key, next) = parse0(line, p)?;
        p = lexer::skipwhite(line, next);
        if peek(line, p) != Some(':') {
            return Err(err(crate::error::messages::E720_MISSING_COLON, p));
        }
        p = lexer::skipwhite(line, p + 1);
        let (value, next) = parse0(line, p)?;
        entries.push((key, value));
        p = lexer::skipwhite(line, next);
        match peek(line, p) {
            Some(',') => {
                p = lexer::skipwhite(line, p + 1);
                if peek(line, p) == Some('}') {
                    return Ok((ExpressionNode::Dictionary { entries }, p + 1));
                }
            }
            Some('}') => return Ok((ExpressionNode::Dictionary { entries }, p + 1)),
            _ => return Err(err(crate::error::messages::E15_UNCLOSED_EXPRESSION, p)),
        }
    }
}

fn parse_option(line: &str, pos: usize) -> PResult<ExpressionNode> {
    match lexer::find_option_end(line, pos + 1) {
        Some(end) => Ok((
            ExpressionNode::Option {
                name: line[pos + 1..end].to_string(),
                start: pos,
            },
            end,
        )),
        None => Err(err(crate::error::messages::E15_INVALID_EXPRESSION, pos)),
    }
}

fn parse_env(line: &str, pos: usize) -> PResult<ExpressionNode> {
    match lexer::find_env_end(line, pos + 1) {
        Some(end) => Ok((
            ExpressionNode::EnvironmentVariable {
                name: line[pos + 1..end].to_string(),
                start: pos,
            },
            end,
        )),
        None => Err(err(crate::error::messages::E15_INVALID_EXPRESSION, pos)),
    }
}

/// `@r` register reference. If the string ends right after `@`, the
/// register name is the NUL sentinel `'\0'`, which the printer renders back
/// as a bare `@` (spec.md §4.2).
fn parse_register(line: &str, pos: usize) -> PResult<ExpressionNode> {
    match peek(line, pos + 1) {
        Some(c) => Ok((ExpressionNode::Register { name: c, start: pos }, pos + 1 + c.len_utf8())),
        None => Ok((ExpressionNode::Register { name: '\0', start: pos }, pos + 1)),
    }
}

/// `parse_name` (spec.md §4.2): a plain identifier, or a curly-braces
/// `VariableName` when `{` immediately follows identifier characters.
pub(crate) fn parse_name(line: &str, pos: usize) -> PResult<ExpressionNode> {
    let start = pos;
    let first_end = match lexer::skip_id(line, pos) {
        Some(end) => end,
        None => return Err(err(crate::error::messages::E15_INVALID_EXPRESSION, pos)),
    };

    if peek(line, first_end) != Some('{') {
        return Ok((
            ExpressionNode::SimpleVariableName {
                name: line[start..first_end].to_string(),
                start,
            },
            first_end,
        ));
    }

    // Curly-braces name: alternate Identifier/CurlyName pieces until
    // identifier characters run out.
    let mut pieces = vec![NamePiece::Identifier(line[start..first_end].to_string())];
    let mut p = first_end;
    loop {
        if peek(line, p) == Some('{') {
            let (inner, next) = parse0(line, p + 1)?;
            let next = lexer::skipwhite(line, next);
            if peek(line, next) != Some('}') {
                return Err(err(crate::error::messages::E15_UNCLOSED_EXPRESSION, next));
            }
            pieces.push(NamePiece::CurlyName(Box::new(inner)));
            p = next + 1;
        } else if let Some(end) = lexer::skip_id(line, p) {
            pieces.push(NamePiece::Identifier(line[p..end].to_string()));
            p = end;
        } else {
            break;
        }
    }

    Ok((ExpressionNode::VariableName { pieces, start }, p))
}

/// `handle_subscript` (spec.md §4.2): after a primary value, consume a
/// chain of `.key`, `[idx]`/`[lo:hi]`, and (if `parse_funccall`) `(args)`.
pub(crate) fn handle_subscript(line: &str, pos: usize, mut base: ExpressionNode, parse_funccall: bool) -> PResult<ExpressionNode> {
    let mut pos = pos;
    loop {
        match peek(line, pos) {
            Some('.') => {
                // A numeric/string literal receiver leaves `.` for the
                // parent concat operator instead of reading a subscript.
                if matches!(
                    base,
                    ExpressionNode::Number { .. } | ExpressionNode::Float { .. } | ExpressionNode::DoubleQuotedString { .. } | ExpressionNode::SingleQuotedString { .. }
                ) {
                    break;
                }
                let next = pos + 1;
                match lexer::skip_id(line, next) {
                    Some(end) => {
                        base = ExpressionNode::ConcatOrSubscript {
                            base: Box::new(base),
                            name: line[next..end].to_string(),
                            start: pos,
                        };
                        pos = end;
                    }
                    None => break,
                }
            }
            Some('[') => {
                let (index, next) = parse_subscript_index(line, pos + 1)?;
                base = ExpressionNode::Subscript { base: Box::new(base), index };
                pos = next;
            }
            Some('(') if parse_funccall => {
                let (args, next) = parse_call_args(line, pos + 1)?;
                base = ExpressionNode::Call { func: Box::new(base), args };
                pos = next;
            }
            _ => break,
        }
    }
    Ok((base, pos))
}

fn parse_subscript_index(line: &str, pos: usize) -> PResult<SubscriptIndex> {
    let p = lexer::skipwhite(line, pos);
    if peek(line, p) == Some(':') {
        let p = lexer::skipwhite(line, p + 1);
        if peek(line, p) == Some(']') {
            return Ok((SubscriptIndex::Slice { from: None, to: None }, p + 1));
        }
        let (to, next) = parse0(line, p)?;
        let next = lexer::skipwhite(line, next);
        if peek(line, next) != Some(']') {
            return Err(err(crate::error::messages::E15_UNCLOSED_EXPRESSION, next));
        }
        return Ok((
            SubscriptIndex::Slice {
                from: None,
                to: Some(Box::new(to)),
            },
            next + 1,
        ));
    }

    let (first, next) = parse0(line, p)?;
    let p = lexer::skipwhite(line, next);
    match peek(line, p) {
        Some(']') => Ok((SubscriptIndex::Single(Box::new(first)), p + 1)),
        Some(':') => {
            let p = lexer::skipwhite(line, p + 1);
            if peek(line, p) == Some(']') {
                return Ok((
                    SubscriptIndex::Slice {
                        from: Some(Box::new(first)),
                        to: None,
                    },
                    p + 1,
                ));
            }
            let (to, next) = parse0(line, p)?;
            let next = lexer::skipwhite(line, next);
            if peek(line, next) != Some(']') {
                return Err(err(crate::error::messages::E15_UNCLOSED_EXPRESSION, next));
            }
            Ok((
                SubscriptIndex::Slice {
                    from: Some(Box::new(first)),
                    to: Some(Box::new(to)),
                },
                next + 1,
            ))
        }
        _ => Err(err(crate::error::messages::E15_UNCLOSED_EXPRESSION, p)),
    }
}

fn parse_call_args(line: &str, pos: usize) -> PResult<Vec<ExpressionNode>> {
    let mut args = Vec::new();
    let mut p = lexer::skipwhite(line, pos);
    if peek(line, p) == Some(')') {
        return Ok((args, p + 1));
    }
    loop {
        if args.len() >= MAX_FUNC_ARGS {
            return Err(err(crate::error::messages::E740_TOO_MANY_ARGS, p));
        }
        let (arg, next) = parse0(line, p)?;
        args.push(arg);
        p = lexer::skipwhite(line, next);
        match peek(line, p) {
            Some(',') => p = lexer::skipwhite(line, p + 1),
            Some(')') => return Ok((args, p + 1)),
            _ => return Err(err(crate::error::messages::E15_UNCLOSED_EXPRESSION, p)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::expr::ExpressionType;

    fn parse(s: &str) -> ExpressionNode {
        let (node, pos) = parse_expr(s, 0).unwrap();
        assert_eq!(pos, s.len(), "did not consume all input: {:?}", &s[pos..]);
        node
    }

    #[test]
    fn add_binds_looser_than_multiply() {
        let node = parse("a + b * c");
        match node {
            ExpressionNode::Binary { op: BinaryOp::Add, rhs, .. } => {
                assert_eq!(rhs.expr_type(), ExpressionType::Binary(BinaryOp::Multiply));
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn multiply_then_add_is_left_nested() {
        let node = parse("a * b + c");
        match node {
            ExpressionNode::Binary { op: BinaryOp::Add, lhs, .. } => {
                assert_eq!(lhs.expr_type(), ExpressionType::Binary(BinaryOp::Multiply));
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn concat_is_left_associative() {
        let node = parse("a . b . c");
        match node {
            ExpressionNode::Binary {
                op: BinaryOp::Concat,
                lhs,
                rhs,
                ..
            } => {
                assert_eq!(rhs.expr_type(), ExpressionType::SimpleVariableName);
                assert_eq!(lhs.expr_type(), ExpressionType::Binary(BinaryOp::Concat));
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn ternary_is_right_associative() {
        let node = parse("a ? b : c ? d : e");
        match node {
            ExpressionNode::Ternary { if_false, .. } => {
                assert_eq!(if_false.expr_type(), ExpressionType::TernaryConditional);
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn parses_number_bases() {
        assert_eq!(parse("0x1C").expr_type(), ExpressionType::Number(NumberLiteralKind::Hex));
        assert_eq!(parse("0123").expr_type(), ExpressionType::Number(NumberLiteralKind::Octal));
        assert_eq!(parse("3.14").expr_type(), ExpressionType::Float);
    }

    #[test]
    fn call_with_subscript_and_concat_dispatch() {
        let node = parse("foo(1, 2).bar");
        match node {
            ExpressionNode::ConcatOrSubscript { base, name, .. } => {
                assert_eq!(name, "bar");
                assert_eq!(base.expr_type(), ExpressionType::Call);
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn comparison_with_match_case_suffix() {
        let node = parse("a ==# b");
        match node {
            ExpressionNode::Binary { op: BinaryOp::Equals, case, .. } => {
                assert_eq!(case, CaseCompareStrategy::MatchCase);
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn curly_braces_variable_name() {
        let node = parse("s:my_{suffix}_var");
        match node {
            ExpressionNode::VariableName { pieces, .. } => {
                assert_eq!(pieces.len(), 3);
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn slice_with_both_sides_empty() {
        let node = parse("list[:]");
        match node {
            ExpressionNode::Subscript { index, .. } => {
                assert_eq!(index, SubscriptIndex::Slice { from: None, to: None });
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn register_with_no_name_uses_nul_sentinel() {
        let node = parse("@");
        match node {
            ExpressionNode::Register { name, .. } => assert_eq!(name, '\0'),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn non_associative_comparison_leaves_trailing_input() {
        let (_node, pos) = parse_expr("a == b == c", 0).unwrap();
        assert!(pos < "a == b == c".len());
    }
}
