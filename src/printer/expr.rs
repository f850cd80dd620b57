// ABOUTME: Expression pretty-printer (spec.md §4.9)
//
// One function per `ExpressionNode` variant, the mirror image of
// `crate::parser::expr`'s one-function-per-production shape. Re-parsing the
// output of `print_expr` must reproduce an equivalent AST — the property the
// round-trip tests in `tests/roundtrip_tests.rs` check directly.

use crate::ast::expr::{BinaryOp, CaseCompareStrategy, ExpressionNode, NamePiece, SubscriptIndex};
use crate::config::PrinterOptions;

fn binop_text(op: BinaryOp) -> &'static str {
    match op {
        BinaryOp::LogicalOr => "||",
        BinaryOp::LogicalAnd => "&&",
        BinaryOp::Greater => ">",
        BinaryOp::GreaterOrEqual => ">=",
        BinaryOp::Less => "<",
        BinaryOp::LessOrEqual => "<=",
        BinaryOp::Equals => "==",
        BinaryOp::NotEquals => "!=",
        BinaryOp::Identical => "is",
        BinaryOp::NotIdentical => "isnot",
        BinaryOp::Matches => "=~",
        BinaryOp::NotMatches => "!~",
        BinaryOp::Add => "+",
        BinaryOp::Subtract => "-",
        BinaryOp::Multiply => "*",
        BinaryOp::Divide => "/",
        BinaryOp::Modulo => "%",
        BinaryOp::Concat => ".",
    }
}

fn case_suffix(case: CaseCompareStrategy) -> &'static str {
    match case {
        CaseCompareStrategy::UseOption => "",
        CaseCompareStrategy::MatchCase => "#",
        CaseCompareStrategy::IgnoreCase => "?",
    }
}

fn escape_double_quoted(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            other => out.push(other),
        }
    }
    out
}

fn escape_single_quoted(text: &str) -> String {
    text.replace('\'', "''")
}

/// Prints one expression (spec.md §4.9). `options.space_around_binary_ops`
/// controls only the operator band — unary prefixes, dots on subscripts and
/// commas inside lists/calls are never spaced, matching the original's own
/// (un-configurable) output for those.
pub fn print_expr(node: &ExpressionNode, options: &PrinterOptions) -> String {
    match node {
        ExpressionNode::Ternary { condition, if_true, if_false } => {
            format!(
                "{} ? {} : {}",
                print_expr(condition, options),
                print_expr(if_true, options),
                print_expr(if_false, options)
            )
        }
        ExpressionNode::Binary { op, case, lhs, rhs } => {
            let op_text = format!("{}{}", binop_text(*op), case_suffix(*case));
            if options.space_around_binary_ops {
                format!("{} {} {}", print_expr(lhs, options), op_text, print_expr(rhs, options))
            } else {
                format!("{}{}{}", print_expr(lhs, options), op_text, print_expr(rhs, options))
            }
        }
        ExpressionNode::Unary { op, operand } => {
            let prefix = match op {
                crate::ast::expr::UnaryOp::Not => "!",
                crate::ast::expr::UnaryOp::Minus => "-",
                crate::ast::expr::UnaryOp::Plus => "+",
            };
            format!("{}{}", prefix, print_expr(operand, options))
        }
        ExpressionNode::Number { text, .. } => text.clone(),
        ExpressionNode::Float { text, .. } => text.clone(),
        ExpressionNode::DoubleQuotedString { text, .. } => format!("\"{}\"", escape_double_quoted(text)),
        ExpressionNode::SingleQuotedString { text, .. } => format!("'{}'", escape_single_quoted(text)),
        ExpressionNode::Option { name, .. } => format!("&{}", name),
        ExpressionNode::Register { name, .. } => {
            if *name == '\0' {
                "@".to_string()
            } else {
                format!("@{}", name)
            }
        }
        ExpressionNode::EnvironmentVariable { name, .. } => format!("${}", name),
        ExpressionNode::VariableName { pieces, .. } => pieces
            .iter()
            .map(|p| match p {
                NamePiece::Identifier(s) => s.clone(),
                NamePiece::CurlyName(e) => format!("{{{}}}", print_expr(e, options)),
            })
            .collect::<String>(),
        ExpressionNode::SimpleVariableName { name, .. } => name.clone(),
        ExpressionNode::Parenthesized(inner) => format!("({})", print_expr(inner, options)),
        ExpressionNode::List { items } => {
            format!("[{}]", items.iter().map(|i| print_expr(i, options)).collect::<Vec<_>>().join(", "))
        }
        ExpressionNode::Dictionary { entries } => {
            if entries.is_empty() {
                "{}".to_string()
            } else {
                let body = entries
                    .iter()
                    .map(|(k, v)| format!("{}: {}", print_expr(k, options), print_expr(v, options)))
                    .collect::<Vec<_>>()
                    .join(", ");
                format!("{{{}}}", body)
            }
        }
        ExpressionNode::Subscript { base, index } => match index {
            SubscriptIndex::Single(i) => format!("{}[{}]", print_expr(base, options), print_expr(i, options)),
            SubscriptIndex::Slice { from, to } => format!(
                "{}[{}:{}]",
                print_expr(base, options),
                from.as_deref().map(|e| print_expr(e, options)).unwrap_or_default(),
                to.as_deref().map(|e| print_expr(e, options)).unwrap_or_default()
            ),
        },
        ExpressionNode::ConcatOrSubscript { base, name, .. } => format!("{}.{}", print_expr(base, options), name),
        ExpressionNode::Call { func, args } => {
            format!("{}({})", print_expr(func, options), args.iter().map(|a| print_expr(a, options)).collect::<Vec<_>>().join(", "))
        }
        ExpressionNode::EmptySubscript => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::expr::parse_expr;

    fn roundtrip(s: &str) -> String {
        let (node, pos) = parse_expr(s, 0).unwrap();
        assert_eq!(pos, s.len());
        print_expr(&node, &PrinterOptions::default())
    }

    #[test]
    fn binary_ops_are_spaced_by_default() {
        assert_eq!(roundtrip("a+b"), "a + b");
    }

    #[test]
    fn binary_ops_can_be_tight() {
        let (node, _) = parse_expr("a+b", 0).unwrap();
        let opts = PrinterOptions {
            space_around_binary_ops: false,
            ..PrinterOptions::default()
        };
        assert_eq!(print_expr(&node, &opts), "a+b");
    }

    #[test]
    fn string_literals_roundtrip() {
        assert_eq!(roundtrip("'it''s'"), "'it''s'");
        assert_eq!(roundtrip(r#""a\"b""#), r#""a\"b""#);
    }

    #[test]
    fn ternary_and_call_roundtrip() {
        assert_eq!(roundtrip("a ? b : c"), "a ? b : c");
        assert_eq!(roundtrip("foo(1, 2)"), "foo(1, 2)");
    }

    #[test]
    fn slice_with_empty_sides() {
        assert_eq!(roundtrip("list[:]"), "list[:]");
        assert_eq!(roundtrip("list[1:]"), "list[1:]");
    }

    #[test]
    fn comparison_with_case_suffix_roundtrips() {
        assert_eq!(roundtrip("a ==# b"), "a ==# b");
    }

    #[test]
    fn register_nul_sentinel_prints_bare() {
        assert_eq!(roundtrip("@"), "@");
    }

    #[test]
    fn curly_name_roundtrips() {
        assert_eq!(roundtrip("s:my_{n}_var"), "s:my_{n}_var");
    }
}
