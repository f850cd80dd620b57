// ABOUTME: Expression AST node types (spec.md §4.2/§4.3)
//
// Grounded on examples/original_source/src/nvim/translator/parser/expressions.h,
// whose `ExpressionNode` is a single struct tagged by an `ExpressionType` enum
// with an untyped `children`/`next` linked list standing in for every
// operator's operands. Rust gives us a real sum type instead (spec.md §9
// "Design Notes"): each node only carries the fields its own grammar
// production needs, so a list node can't accidentally end up holding two
// `if_false` branches the way a hand-rolled linked list could.

use serde::Serialize;

/// Binary operators, in the same left-to-right precedence order as
/// `expressions.h`'s `ARITHMETIC_START..ARITHMETIC_END` style bands
/// (spec.md §4.2 parse1..parse6).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum BinaryOp {
    LogicalOr,
    LogicalAnd,
    Greater,
    GreaterOrEqual,
    Less,
    LessOrEqual,
    Equals,
    NotEquals,
    Identical,
    NotIdentical,
    Matches,
    NotMatches,
    Add,
    Subtract,
    Multiply,
    Divide,
    Modulo,
    Concat,
}

impl BinaryOp {
    /// Whether this operator's result (or operand comparison) is sensitive to
    /// a `CaseCompareStrategy` suffix (`==?`, `=~#`, ...). Only the
    /// comparison band is (spec.md §4.2, `COMPARISON_START..COMPARISON_END`).
    pub fn takes_case_suffix(self) -> bool {
        matches!(
            self,
            BinaryOp::Greater
                | BinaryOp::GreaterOrEqual
                | BinaryOp::Less
                | BinaryOp::LessOrEqual
                | BinaryOp::Equals
                | BinaryOp::NotEquals
                | BinaryOp::Identical
                | BinaryOp::NotIdentical
                | BinaryOp::Matches
                | BinaryOp::NotMatches
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum UnaryOp {
    Not,
    Minus,
    Plus,
}

/// Base for a numeric literal, i.e. how its digits should be read back when
/// evaluated (spec.md §4.1 `find_nr_end`). We keep the literal's original
/// text rather than pre-parsing it to a number, so the pretty-printer can
/// round-trip `0x1C` as `0x1C` rather than `28`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum NumberLiteralKind {
    Decimal,
    Octal,
    Hex,
}

/// `==` vs `==#` vs `==?` (spec.md §4.2). `UseOption` defers to `'ignorecase'`
/// at evaluation time, which is out of scope here (spec.md §1 Non-goals) —
/// we keep it as a distinct variant so the printer can round-trip the
/// absence of a suffix instead of inventing one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Default)]
pub enum CaseCompareStrategy {
    #[default]
    UseOption,
    MatchCase,
    IgnoreCase,
}

/// Mirrors `expressions.h`'s `ExpressionType` tag, for diagnostics and the
/// `--emit=ast` JSON `"type"` discriminant that wants a flat name rather
/// than the full node payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ExpressionType {
    TernaryConditional,
    Binary(BinaryOp),
    Unary(UnaryOp),
    Number(NumberLiteralKind),
    Float,
    DoubleQuotedString,
    SingleQuotedString,
    Option,
    Register,
    EnvironmentVariable,
    VariableName,
    SimpleVariableName,
    Identifier,
    CurlyName,
    Expression,
    List,
    Dictionary,
    Subscript,
    ConcatOrSubscript,
    Call,
    EmptySubscript,
}

/// One piece of a curly-brace-capable name such as `s:my_{suffix}_var`
/// (spec.md §4.2 `parse_name`). A plain identifier is a single
/// `Identifier` piece; `{suffix}` pieces hold a nested expression that is
/// evaluated and stringified to build the real name at runtime.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum NamePiece {
    Identifier(String),
    CurlyName(Box<ExpressionNode>),
}

/// Either side of a `[from:to]` slice may be omitted; `EmptySubscript`
/// (spec.md §4.2) marks the gap rather than defaulting it to zero, since
/// `expr[:]` and `expr[0:]` mean different things once the collection's
/// length matters.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum SubscriptIndex {
    Single(Box<ExpressionNode>),
    Slice {
        from: Option<Box<ExpressionNode>>,
        to: Option<Box<ExpressionNode>>,
    },
}

/// One parsed VimL expression (spec.md §4.2/§4.3).
///
/// `start` is a line-relative column, kept only on leaf/value nodes and
/// `ConcatOrSubscript` — the same restriction the original struct documents
/// ("Only valid for value nodes and kTypeConcatOrSubscript"), since operator
/// nodes can always recover their position from their first child.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum ExpressionNode {
    Ternary {
        condition: Box<ExpressionNode>,
        if_true: Box<ExpressionNode>,
        if_false: Box<ExpressionNode>,
    },
    Binary {
        op: BinaryOp,
        case: CaseCompareStrategy,
        lhs: Box<ExpressionNode>,
        rhs: Box<ExpressionNode>,
    },
    Unary {
        op: UnaryOp,
        operand: Box<ExpressionNode>,
    },
    Number {
        kind: NumberLiteralKind,
        text: String,
        start: usize,
    },
    Float {
        text: String,
        start: usize,
    },
    DoubleQuotedString {
        text: String,
        start: usize,
    },
    SingleQuotedString {
        text: String,
        start: usize,
    },
    Option {
        name: String,
        start: usize,
    },
    Register {
        name: char,
        start: usize,
    },
    EnvironmentVariable {
        name: String,
        start: usize,
    },
    /// Top-level variable reference, e.g. `g:foo`, `s:my_{n}_var`.
    VariableName {
        pieces: Vec<NamePiece>,
        start: usize,
    },
    /// A variable name with no curly braces at all — the common case,
    /// kept distinct so the printer never has to special-case a
    /// single-piece `VariableName`.
    SimpleVariableName {
        name: String,
        start: usize,
    },
    /// `(expr)`
    Parenthesized(Box<ExpressionNode>),
    List {
        items: Vec<ExpressionNode>,
    },
    Dictionary {
        entries: Vec<(ExpressionNode, ExpressionNode)>,
    },
    Subscript {
        base: Box<ExpressionNode>,
        index: SubscriptIndex,
    },
    /// `expr.name`, ambiguous between dictionary-member access and string
    /// concatenation with a bareword until the evaluator sees `expr`'s
    /// runtime type (spec.md §4.2, §9 Open Questions).
    ConcatOrSubscript {
        base: Box<ExpressionNode>,
        name: String,
        start: usize,
    },
    Call {
        func: Box<ExpressionNode>,
        args: Vec<ExpressionNode>,
    },
    /// A `[` or `:` subscript bound left empty, e.g. the leading side of
    /// `list[:3]`.
    EmptySubscript,
}

impl ExpressionNode {
    pub fn expr_type(&self) -> ExpressionType {
        match self {
            ExpressionNode::Ternary { .. } => ExpressionType::TernaryConditional,
            ExpressionNode::Binary { op, .. } => ExpressionType::Binary(*op),
            ExpressionNode::Unary { op, .. } => ExpressionType::Unary(*op),
            ExpressionNode::Number { kind, .. } => ExpressionType::Number(*kind),
            ExpressionNode::Float { .. } => ExpressionType::Float,
            ExpressionNode::DoubleQuotedString { .. } => ExpressionType::DoubleQuotedString,
            ExpressionNode::SingleQuotedString { .. } => ExpressionType::SingleQuotedString,
            ExpressionNode::Option { .. } => ExpressionType::Option,
            ExpressionNode::Register { .. } => ExpressionType::Register,
            ExpressionNode::EnvironmentVariable { .. } => ExpressionType::EnvironmentVariable,
            ExpressionNode::VariableName { .. } => ExpressionType::VariableName,
            ExpressionNode::SimpleVariableName { .. } => ExpressionType::SimpleVariableName,
            ExpressionNode::Parenthesized(_) => ExpressionType::Expression,
            ExpressionNode::List { .. } => ExpressionType::List,
            ExpressionNode::Dictionary { .. } => ExpressionType::Dictionary,
            ExpressionNode::Subscript { .. } => ExpressionType::Subscript,
            ExpressionNode::ConcatOrSubscript { .. } => ExpressionType::ConcatOrSubscript,
            ExpressionNode::Call { .. } => ExpressionType::Call,
            ExpressionNode::EmptySubscript => ExpressionType::EmptySubscript,
        }
    }

    /// Best-effort start column, recovering through operator children when
    /// this node itself doesn't carry one (see the struct-level doc comment).
    pub fn start(&self) -> Option<usize> {
        match self {
            ExpressionNode::Number { start, .. }
            | ExpressionNode::Float { start, .. }
            | ExpressionNode::DoubleQuotedString { start, .. }
            | ExpressionNode::SingleQuotedString { start, .. }
            | ExpressionNode::Option { start, .. }
            | ExpressionNode::Register { start, .. }
            | ExpressionNode::EnvironmentVariable { start, .. }
            | ExpressionNode::VariableName { start, .. }
            | ExpressionNode::SimpleVariableName { start, .. }
            | ExpressionNode::ConcatOrSubscript { start, .. } => Some(*start),
            ExpressionNode::Ternary { condition, .. } => condition.start(),
            ExpressionNode::Binary { lhs, .. } => lhs.start(),
            ExpressionNode::Unary { operand, .. } => operand.start(),
            ExpressionNode::Parenthesized(inner) => inner.start(),
            ExpressionNode::Subscript { base, .. } => base.start(),
            ExpressionNode::Call { func, .. } => func.start(),
            ExpressionNode::List { .. } | ExpressionNode::Dictionary { .. } | ExpressionNode::EmptySubscript => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn case_compare_strategy_defaults_to_use_option() {
        assert_eq!(CaseCompareStrategy::default(), CaseCompareStrategy::UseOption);
    }

    #[test]
    fn comparison_ops_take_case_suffix_arithmetic_does_not() {
        assert!(BinaryOp::Equals.takes_case_suffix());
        assert!(BinaryOp::Matches.takes_case_suffix());
        assert!(!BinaryOp::Add.takes_case_suffix());
        assert!(!BinaryOp::Concat.takes_case_suffix());
    }

    #[test]
    fn start_recovers_through_binary_node() {
        let lhs = ExpressionNode::SimpleVariableName {
            name: "x".to_string(),
            start: 4,
        };
        let rhs = ExpressionNode::Number {
            kind: NumberLiteralKind::Decimal,
            text: "1".to_string(),
            start: 8,
        };
        let node = ExpressionNode::Binary {
            op: BinaryOp::Add,
            case: CaseCompareStrategy::UseOption,
            lhs: Box::new(lhs),
            rhs: Box::new(rhs),
        };
        assert_eq!(node.start(), Some(4));
    }

    #[test]
    fn list_and_dictionary_have_no_intrinsic_start() {
        assert_eq!(ExpressionNode::List { items: vec![] }.start(), None);
        assert_eq!(ExpressionNode::Dictionary { entries: vec![] }.start(), None);
    }
}
