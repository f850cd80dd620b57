// ABOUTME: Expression-to-Lua translator (spec.md §4.10)
//
// Every `ExpressionNode` variant becomes one call into the `vim.*` runtime
// surface the generated module's `run` function expects at its call site —
// nothing here ever evaluates anything itself.

use crate::ast::expr::{BinaryOp, CaseCompareStrategy, ExpressionNode, NamePiece, SubscriptIndex, UnaryOp};

fn ignorecase_arg(case: CaseCompareStrategy) -> &'static str {
    match case {
        CaseCompareStrategy::IgnoreCase => "true",
        CaseCompareStrategy::MatchCase => "false",
        // Deferring to 'ignorecase' is out of scope (spec.md §1 Non-goals);
        // the generated call reads the runtime's live option instead of a
        // literal so the emitted module doesn't have to guess.
        CaseCompareStrategy::UseOption => "vim.options.ignorecase",
    }
}

/// Public alias used by `crate::translator::command` to quote names and
/// pattern sources the same way expressions quote string literals.
pub fn lua_string_literal_pub(text: &str) -> String {
    lua_string_literal(text)
}

fn lua_string_literal(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + 2);
    out.push('"');
    for c in text.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            other => out.push(other),
        }
    }
    out.push('"');
    out
}

/// Whether a bare name looks like a scope-prefixed or autoload name
/// (`s:foo`, `g:foo`, `foo#bar`) rather than a plain identifier — these
/// always resolve through the current scope, never through the function
/// tables (spec.md §4.10 "Scope resolution for identifiers").
fn is_scoped_name(name: &str) -> bool {
    name.contains('#') || matches!(name.get(1..2), Some(":")) && matches!(name.get(0..1), Some("s" | "g" | "b" | "w" | "t" | "l" | "a" | "v"))
}

/// Resolves a bare name to its Lua reference. Call positions route through
/// `state.functions` (built-ins, lowercase) or `state.user_functions`
/// (capitalized or autoload names); non-call positions always read through
/// the current scope (spec.md §4.10).
fn resolve_name(name: &str, is_call: bool) -> String {
    if is_call && !is_scoped_name(name) {
        let starts_upper = name.chars().next().map(|c| c.is_ascii_uppercase()).unwrap_or(false);
        if starts_upper {
            return format!("state.user_functions[{}]", lua_string_literal(name));
        }
        return format!("state.functions[{}]", lua_string_literal(name));
    }
    if is_call && is_scoped_name(name) {
        return format!("state.user_functions[{}]", lua_string_literal(name));
    }
    format!("state.current_scope:get({})", lua_string_literal(name))
}

fn piece_name(pieces: &[NamePiece]) -> Option<String> {
    pieces
        .iter()
        .map(|p| match p {
            NamePiece::Identifier(s) => Some(s.clone()),
            NamePiece::CurlyName(_) => None,
        })
        .collect()
}

/// Translates a curly-brace name into a Lua string-concatenation expression
/// building the real name at runtime, e.g. `s:my_{n}_var` becomes
/// `"s:my_" .. tostring(vim.number.new(...):value()) .. "_var"`.
fn curly_name_expr(pieces: &[NamePiece]) -> String {
    pieces
        .iter()
        .map(|p| match p {
            NamePiece::Identifier(s) => lua_string_literal(s),
            NamePiece::CurlyName(e) => format!("tostring({})", translate_expr(e, false)),
        })
        .collect::<Vec<_>>()
        .join(" .. ")
}

/// Translates one expression node. `is_call` is `true` only when this node
/// is the callee of a `Call` node — it changes how a bare name resolves
/// (spec.md §4.10 "Scope resolution for identifiers").
pub fn translate_expr(node: &ExpressionNode, is_call: bool) -> String {
    match node {
        ExpressionNode::Ternary { condition, if_true, if_false } => {
            format!(
                "(function() if vim.truthy({}) then return {} else return {} end end)()",
                translate_expr(condition, false),
                translate_expr(if_true, false),
                translate_expr(if_false, false)
            )
        }
        ExpressionNode::Binary { op, case, lhs, rhs } => translate_binary(*op, *case, lhs, rhs),
        ExpressionNode::Unary { op, operand } => {
            let operand_lua = translate_expr(operand, false);
            match op {
                UnaryOp::Not => format!("vim.negate_logical({})", operand_lua),
                UnaryOp::Minus => format!("vim.negate({})", operand_lua),
                UnaryOp::Plus => format!("vim.promote_integer({})", operand_lua),
            }
        }
        ExpressionNode::Number { text, .. } => format!("vim.number.new({})", lua_string_literal(text)),
        ExpressionNode::Float { text, .. } => format!("vim.float.new({})", text),
        ExpressionNode::DoubleQuotedString { text, .. } => lua_string_literal(text),
        ExpressionNode::SingleQuotedString { text, .. } => lua_string_literal(text),
        ExpressionNode::Option { name, .. } => format!("vim.options[{}]", lua_string_literal(name)),
        ExpressionNode::Register { name, .. } => format!("vim.registers[{}]", lua_string_literal(&name.to_string())),
        ExpressionNode::EnvironmentVariable { name, .. } => format!("vim.env[{}]", lua_string_literal(name)),
        ExpressionNode::VariableName { pieces, .. } => match piece_name(pieces) {
            Some(name) => resolve_name(&name, is_call),
            None => {
                if is_call {
                    format!("state.user_functions[{}]", curly_name_expr(pieces))
                } else {
                    format!("state.current_scope:get({})", curly_name_expr(pieces))
                }
            }
        },
        ExpressionNode::SimpleVariableName { name, .. } => resolve_name(name, is_call),
        ExpressionNode::Parenthesized(inner) => format!("({})", translate_expr(inner, false)),
        ExpressionNode::List { items } => {
            format!("vim.list.new({{{}}})", items.iter().map(|i| translate_expr(i, false)).collect::<Vec<_>>().join(", "))
        }
        ExpressionNode::Dictionary { entries } => {
            let body = entries
                .iter()
                .map(|(k, v)| format!("{{{}, {}}}", translate_expr(k, false), translate_expr(v, false)))
                .collect::<Vec<_>>()
                .join(", ");
            format!("vim.dict.new({{{}}})", body)
        }
        ExpressionNode::Subscript { base, index } => {
            let base_lua = translate_expr(base, false);
            match index {
                SubscriptIndex::Single(i) => format!("vim.subscript({}, {})", base_lua, translate_expr(i, false)),
                SubscriptIndex::Slice { from, to } => {
                    let from_lua = from.as_deref().map(|e| translate_expr(e, false)).unwrap_or_else(|| "nil".to_string());
                    let to_lua = to.as_deref().map(|e| translate_expr(e, false)).unwrap_or_else(|| "nil".to_string());
                    format!("vim.slice({}, {}, {})", base_lua, from_lua, to_lua)
                }
            }
        }
        ExpressionNode::ConcatOrSubscript { base, name, .. } => {
            format!("vim.concat_or_subscript({}, {})", translate_expr(base, false), lua_string_literal(name))
        }
        ExpressionNode::Call { func, args } => {
            let func_lua = translate_expr(func, true);
            let args_lua = args.iter().map(|a| translate_expr(a, false)).collect::<Vec<_>>().join(", ");
            format!("vim.call({}, {{{}}})", func_lua, args_lua)
        }
        ExpressionNode::EmptySubscript => "nil".to_string(),
    }
}

fn translate_binary(op: BinaryOp, case: CaseCompareStrategy, lhs: &ExpressionNode, rhs: &ExpressionNode) -> String {
    let lhs_lua = translate_expr(lhs, false);
    let rhs_lua = translate_expr(rhs, false);
    match op {
        BinaryOp::LogicalOr => format!("vim.truthy({}) and {} or {}", lhs_lua, lhs_lua, rhs_lua),
        BinaryOp::LogicalAnd => format!("vim.truthy({}) and {} or {}", lhs_lua, rhs_lua, lhs_lua),
        BinaryOp::Add => format!("vim.add({}, {})", lhs_lua, rhs_lua),
        BinaryOp::Subtract => format!("vim.subtract({}, {})", lhs_lua, rhs_lua),
        BinaryOp::Multiply => format!("vim.multiply({}, {})", lhs_lua, rhs_lua),
        BinaryOp::Divide => format!("vim.divide({}, {})", lhs_lua, rhs_lua),
        BinaryOp::Modulo => format!("vim.modulo({}, {})", lhs_lua, rhs_lua),
        BinaryOp::Concat => format!("vim.concat({}, {})", lhs_lua, rhs_lua),
        BinaryOp::Equals => format!("vim.equals({}, {}, {})", lhs_lua, rhs_lua, ignorecase_arg(case)),
        BinaryOp::NotEquals => format!("not vim.equals({}, {}, {})", lhs_lua, rhs_lua, ignorecase_arg(case)),
        BinaryOp::Identical => format!("vim.identical({}, {}, {})", lhs_lua, rhs_lua, ignorecase_arg(case)),
        BinaryOp::NotIdentical => format!("not vim.identical({}, {}, {})", lhs_lua, rhs_lua, ignorecase_arg(case)),
        BinaryOp::Matches => format!("vim.matches({}, {}, {})", lhs_lua, rhs_lua, ignorecase_arg(case)),
        BinaryOp::NotMatches => format!("not vim.matches({}, {}, {})", lhs_lua, rhs_lua, ignorecase_arg(case)),
        BinaryOp::Greater => format!("vim.greater({}, {}, {})", lhs_lua, rhs_lua, ignorecase_arg(case)),
        BinaryOp::LessOrEqual => format!("not vim.greater({}, {}, {})", lhs_lua, rhs_lua, ignorecase_arg(case)),
        BinaryOp::Less => format!("vim.less({}, {}, {})", lhs_lua, rhs_lua, ignorecase_arg(case)),
        BinaryOp::GreaterOrEqual => format!("not vim.less({}, {}, {})", lhs_lua, rhs_lua, ignorecase_arg(case)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::expr::parse_expr;

    fn translate(src: &str) -> String {
        let (node, _) = parse_expr(src, 0).unwrap();
        translate_expr(&node, false)
    }

    #[test]
    fn arithmetic_calls_vim_runtime() {
        assert_eq!(translate("1 + 2"), "vim.add(vim.number.new(\"1\"), vim.number.new(\"2\"))");
    }

    #[test]
    fn not_equals_negates_equals() {
        assert_eq!(translate("a != b"), "not vim.equals(state.current_scope:get(\"a\"), state.current_scope:get(\"b\"), vim.options.ignorecase)");
    }

    #[test]
    fn greater_or_equal_negates_less() {
        assert!(translate("a >= b").starts_with("not vim.less("));
    }

    #[test]
    fn call_routes_capitalized_name_through_user_functions() {
        assert!(translate("Foo(1)").starts_with("vim.call(state.user_functions[\"Foo\"]"));
    }

    #[test]
    fn call_routes_lowercase_name_through_builtin_functions() {
        assert!(translate("len(x)").starts_with("vim.call(state.functions[\"len\"]"));
    }

    #[test]
    fn list_and_dict_literals_translate() {
        assert_eq!(translate("[1, 2]"), "vim.list.new({vim.number.new(\"1\"), vim.number.new(\"2\")})");
    }

    #[test]
    fn string_literal_becomes_lua_string() {
        assert_eq!(translate("'hi'"), "\"hi\"");
    }
}
