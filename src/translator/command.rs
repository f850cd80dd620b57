// ABOUTME: Ex-command-to-Lua translator (spec.md §4.10)
//
// Walks a `CommandNode` tree and emits one Lua statement per command at the
// current indent, the structural half of the module emitted by
// `crate::translator::translate_script`.

use crate::ast::address::{Address, AddressFollowup, Range};
use crate::ast::command::{AssignOp, CommandArg, CommandNode, CommandType};
use crate::config::TranslatorOptions;
use crate::translator::expr::translate_expr;

fn indent(depth: usize, options: &TranslatorOptions) -> String {
    " ".repeat(depth * options.indent_width)
}

fn address_ctor(address: &Address) -> String {
    match address {
        Address::Missing => "vim.range.current()".to_string(),
        Address::Fixed(n) => format!("vim.range.fixed({})", n),
        Address::End => "vim.range.last()".to_string(),
        Address::Current => "vim.range.current()".to_string(),
        Address::Mark(c) => format!("vim.range.mark({:?})", c),
        Address::ForwardSearch(re) => format!("vim.range.forward_search({})", crate::translator::expr::lua_string_literal_pub(&re.source)),
        Address::BackwardSearch(re) => format!("vim.range.backward_search({})", crate::translator::expr::lua_string_literal_pub(&re.source)),
        Address::ForwardPreviousSearch => "vim.range.repeat_forward_search()".to_string(),
        Address::BackwardPreviousSearch => "vim.range.repeat_backward_search()".to_string(),
        Address::SubstituteSearch => "vim.range.repeat_substitute_search()".to_string(),
    }
}

fn followup_ctor(followup: &AddressFollowup) -> String {
    match followup {
        AddressFollowup::ForwardPattern(re) => format!(
            "vim.range.apply_followup(state, 'forward_pattern', {})",
            crate::translator::expr::lua_string_literal_pub(&re.source)
        ),
        AddressFollowup::BackwardPattern(re) => format!(
            "vim.range.apply_followup(state, 'backward_pattern', {})",
            crate::translator::expr::lua_string_literal_pub(&re.source)
        ),
        AddressFollowup::Shift(n) => format!("vim.range.apply_followup(state, 'shift', {})", n),
    }
}

/// Builds the `vim.range.compose(...)` call for a full range (spec.md
/// §4.10: "builds a range").
fn range_ctor(range: &Range) -> String {
    if range.is_empty() {
        return "vim.range.current()".to_string();
    }
    let links = range
        .links
        .iter()
        .map(|link| {
            let mut main = address_ctor(&link.address);
            for followup in &link.followups {
                main = format!("{}({})", followup_ctor(followup), main);
            }
            format!("{{{}, {}}}", main, link.setpos)
        })
        .collect::<Vec<_>>()
        .join(", ");
    format!("vim.range.compose(state, {})", links)
}

fn assign_target(name: &str) -> String {
    format!("state.current_scope:assign({}, ", crate::translator::expr::lua_string_literal_pub(name))
}

fn translate_let(assign: &crate::ast::command::LetAssign, depth: usize, options: &TranslatorOptions) -> String {
    let pad = indent(depth, options);
    match &assign.rhs {
        None => format!("{}-- :let (list-all form has no runtime effect)", pad),
        Some(rhs) => {
            let rhs_lua = translate_expr(rhs, false);
            let rhs_lua = match assign.op {
                AssignOp::Assign => rhs_lua,
                AssignOp::Add => format!("vim.add(state.current_scope:get({}), {})", crate::translator::expr::lua_string_literal_pub(&assign.lhs[0]), rhs_lua),
                AssignOp::Subtract => format!(
                    "vim.subtract(state.current_scope:get({}), {})",
                    crate::translator::expr::lua_string_literal_pub(&assign.lhs[0]),
                    rhs_lua
                ),
                AssignOp::Concat => format!(
                    "vim.concat(state.current_scope:get({}), {})",
                    crate::translator::expr::lua_string_literal_pub(&assign.lhs[0]),
                    rhs_lua
                ),
            };
            if assign.lhs.len() == 1 {
                format!("{}{}{})", pad, assign_target(&assign.lhs[0]), rhs_lua)
            } else {
                let names = assign.lhs.iter().map(|n| crate::translator::expr::lua_string_literal_pub(n)).collect::<Vec<_>>().join(", ");
                format!("{}vim.assign_destructure(state, {{{}}}, {})", pad, names, rhs_lua)
            }
        }
    }
}

/// Translates one command (and, for blocks, its body) into Lua statements at
/// `depth`. Returns an empty string for pure-structural nodes that carry no
/// runtime effect (`Missing`, comments).
fn translate_command_node(node: &CommandNode, depth: usize, options: &TranslatorOptions) -> String {
    let pad = indent(depth, options);

    match node.command_type {
        CommandType::Comment | CommandType::HashbangComment | CommandType::Missing | CommandType::SyntaxError => String::new(),

        CommandType::If => translate_if_chain(node, depth, options),
        CommandType::While => {
            let cond = match &node.arg {
                CommandArg::Expression(e) => translate_expr(e, false),
                _ => "false".to_string(),
            };
            let body = translate_block(&node.body, depth + 1, options);
            format!("{}while vim.truthy({}) do\n{}\n{}end", pad, cond, body, pad)
        }
        CommandType::For => {
            let for_loop = match &node.arg {
                CommandArg::ForLoop(f) => f,
                _ => return format!("{}-- malformed :for", pad),
            };
            let var = if for_loop.lhs.len() == 1 {
                for_loop.lhs[0].clone()
            } else {
                format!("__destructure_{}", depth)
            };
            let body = translate_block(&node.body, depth + 1, options);
            format!(
                "{}for _, {} in vim.list.iterator({}) do\n{}\n{}end",
                pad,
                var,
                translate_expr(&for_loop.rhs, false),
                body,
                pad
            )
        }
        CommandType::Function => {
            let sig = match &node.arg {
                CommandArg::Function(sig) => sig,
                _ => return format!("{}-- malformed :function", pad),
            };
            let mut params = vec!["state".to_string()];
            params.extend(sig.params.iter().cloned());
            if sig.varargs {
                params.push("...".to_string());
            }
            let body = translate_block(&node.body, depth + 1, options);
            format!(
                "{}state.user_functions[{}] = function({})\n{}\n{}end",
                pad,
                translate_expr(&sig.name, false),
                params.join(", "),
                body,
                pad
            )
        }
        CommandType::Try => {
            let body = translate_block(&node.body, depth + 1, options);
            format!("{}vim.try(function()\n{}\n{}end)", pad, body, pad)
        }
        CommandType::Let => match &node.arg {
            CommandArg::LetAssign(assign) => translate_let(assign, depth, options),
            _ => format!("{}-- :let", pad),
        },
        CommandType::Unlet => match &node.arg {
            CommandArg::AssignLhs(names) => names
                .iter()
                .map(|n| format!("{}state.current_scope:unset({})", pad, crate::translator::expr::lua_string_literal_pub(n)))
                .collect::<Vec<_>>()
                .join("\n"),
            _ => format!("{}-- :unlet", pad),
        },
        CommandType::Call => match &node.arg {
            CommandArg::Expression(e) => format!("{}{}", pad, translate_expr(e, false)),
            _ => format!("{}-- :call", pad),
        },
        CommandType::Return => match &node.arg {
            CommandArg::Expression(e) => format!("{}return {}", pad, translate_expr(e, false)),
            _ => format!("{}return", pad),
        },
        CommandType::Throw => match &node.arg {
            CommandArg::Expression(e) => format!("{}error({})", pad, translate_expr(e, false)),
            _ => format!("{}error(nil)", pad),
        },
        CommandType::Break => format!("{}break", pad),
        CommandType::Continue => format!("{}goto continue", pad),
        CommandType::Echo | CommandType::Echon | CommandType::Echomsg | CommandType::Echoerr => match &node.arg {
            CommandArg::Expressions(items) => {
                let args = items.iter().map(|e| translate_expr(e, false)).collect::<Vec<_>>().join(", ");
                format!("{}vim.echo({{{}}})", pad, args)
            }
            _ => format!("{}vim.echo({{}})", pad),
        },
        CommandType::Execute => match &node.arg {
            CommandArg::Expressions(items) => {
                let args = items.iter().map(|e| translate_expr(e, false)).collect::<Vec<_>>().join(", ");
                format!("{}vim.execute(state, {{{}}})", pad, args)
            }
            _ => format!("{}vim.execute(state, {{}})", pad),
        },
        CommandType::Set => match &node.arg {
            CommandArg::Set(ops) => ops
                .iter()
                .map(|op| {
                    format!(
                        "{}vim.set_option(state, {}, {:?})",
                        pad,
                        crate::translator::expr::lua_string_literal_pub(&op.name),
                        op.value
                    )
                })
                .collect::<Vec<_>>()
                .join("\n"),
            _ => format!("{}-- :set", pad),
        },
        _ => {
            // Commands without a dedicated Lua mapping defer to the
            // runtime's generic user-command entry point (spec.md §4.10
            // "vim.run_user_command invokes user commands").
            let name = node.name.clone().unwrap_or_else(|| format!("{:?}", node.command_type));
            let arg_text = match &node.arg {
                CommandArg::String(s) => s.clone(),
                _ => String::new(),
            };
            format!(
                "{}vim.run_user_command(state, {}, {}, {}, {})",
                pad,
                crate::translator::expr::lua_string_literal_pub(&name),
                range_ctor(&node.range),
                node.bang,
                crate::translator::expr::lua_string_literal_pub(&arg_text)
            )
        }
    }
}

fn translate_block(body: &Option<Vec<CommandNode>>, depth: usize, options: &TranslatorOptions) -> String {
    match body {
        Some(children) => translate_commands(children, depth, options),
        None => String::new(),
    }
}

/// `:if`/`:elseif`/`:else` are flattened siblings inside the opening `:if`
/// node's `body` (spec.md §9 Design Notes collapsing the original's linked
/// block stack), so rebuilding Lua's `if/elseif/else` chain means walking
/// that sibling list and re-grouping it by branch.
fn translate_if_chain(node: &CommandNode, depth: usize, options: &TranslatorOptions) -> String {
    let pad = indent(depth, options);
    let children = match &node.body {
        Some(children) => children,
        None => return format!("{}-- malformed :if", pad),
    };
    render_if_chain(node, children, depth, options)
}

fn render_if_chain(opener: &CommandNode, body: &[CommandNode], depth: usize, options: &TranslatorOptions) -> String {
    let pad = indent(depth, options);

    // Partition `body` into the `:if` branch's own statements (everything
    // up to the first `:elseif`/`:else`) and the remaining branches.
    let mut branches: Vec<(Option<String>, Vec<CommandNode>)> = Vec::new();
    let mut current_cond = opener.arg.clone();
    let mut current_stmts: Vec<CommandNode> = Vec::new();

    for child in body {
        match child.command_type {
            CommandType::Elseif | CommandType::Else => {
                branches.push((arg_to_cond(&current_cond), std::mem::take(&mut current_stmts)));
                current_cond = child.arg.clone();
                if child.command_type == CommandType::Else {
                    current_cond = CommandArg::None;
                }
            }
            _ => current_stmts.push(child.clone()),
        }
    }
    branches.push((arg_to_cond(&current_cond), current_stmts));

    let mut out = String::new();
    for (i, (cond, stmts)) in branches.iter().enumerate() {
        let stmt_lua = translate_commands(stmts, depth + 1, options);
        match (i, cond) {
            (0, Some(c)) => out.push_str(&format!("{}if vim.truthy({}) then\n{}\n", pad, c, stmt_lua)),
            (0, None) => out.push_str(&format!("{}if true then\n{}\n", pad, stmt_lua)),
            (_, Some(c)) => out.push_str(&format!("{}elseif vim.truthy({}) then\n{}\n", pad, c, stmt_lua)),
            (_, None) => out.push_str(&format!("{}else\n{}\n", pad, stmt_lua)),
        }
    }
    out.push_str(&format!("{}end", pad));
    out
}

fn arg_to_cond(arg: &CommandArg) -> Option<String> {
    match arg {
        CommandArg::Expression(e) => Some(translate_expr(e, false)),
        _ => None,
    }
}

/// Translates a full sibling list, joining non-empty statements with
/// newlines (spec.md §4.10: "each command becomes one Lua statement at the
/// current indent").
pub fn translate_commands(nodes: &[CommandNode], depth: usize, options: &TranslatorOptions) -> String {
    nodes
        .iter()
        .map(|n| translate_command_node(n, depth, options))
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CommandParserOptions;
    use crate::parser::sequence::parse_cmd_sequence;

    fn translate(src: &'static str) -> String {
        let options = CommandParserOptions::new(0);
        let mut lines = src.lines().map(|s| s.to_string());
        let nodes = parse_cmd_sequence(move || lines.next(), &options);
        translate_commands(&nodes, 0, &TranslatorOptions::default())
    }

    #[test]
    fn let_assign_calls_scope_assign() {
        let out = translate("let x = 1");
        assert!(out.contains("state.current_scope:assign(\"x\", vim.number.new(\"1\"))"));
    }

    #[test]
    fn if_else_becomes_lua_if_else() {
        let out = translate("if 1\ncall Foo()\nelse\ncall Bar()\nendif");
        assert!(out.starts_with("if vim.truthy("));
        assert!(out.contains("else"));
        assert!(out.trim_end().ends_with("end"));
    }

    #[test]
    fn while_loop_translates() {
        let out = translate("while 1\nlet x = 1\nendwhile");
        assert!(out.starts_with("while vim.truthy("));
        assert!(out.trim_end().ends_with("end"));
    }

    #[test]
    fn for_loop_uses_list_iterator() {
        let out = translate("for x in [1, 2]\ncall Foo(x)\nendfor");
        assert!(out.contains("for _, x in vim.list.iterator("));
    }

    #[test]
    fn function_def_becomes_lua_function() {
        let out = translate("function! Greet(name)\nreturn name\nendfunction");
        assert!(out.contains("state.user_functions[\"Greet\"] = function(state, name)"));
        assert!(out.contains("return state.current_scope:get(\"name\")"));
    }
}
