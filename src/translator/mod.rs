// ABOUTME: AST→Lua translator entry point (spec.md §4.10)
//
// Wraps `translate_commands` (the per-command walker in `command.rs`) in the
// module shape spec.md §4.10 prescribes: a `vim = require 'vim'` header, a
// script-local scope, and a `run` function the embedding runtime calls with
// its own `state`.

pub mod command;
pub mod expr;

use crate::ast::command::CommandNode;
use crate::config::TranslatorOptions;

pub use command::translate_commands;
pub use expr::translate_expr;

/// Translates a parsed script into a complete Lua module (spec.md §4.10).
pub fn translate_script(nodes: &[CommandNode], options: &TranslatorOptions) -> String {
    let body = translate_commands(nodes, 2, options);
    let indent = " ".repeat(options.indent_width);
    let mut out = String::new();
    out.push_str("vim = require 'vim'\n");
    out.push_str("s = vim.new_scope(false)\n");
    out.push_str("return { run = function(state)\n");
    out.push_str(&format!("{}state = state:set_script_locals(s)\n", indent));
    if !body.is_empty() {
        out.push_str(&body);
        out.push('\n');
    }
    out.push_str("end }\n");
    out
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
        translate_script(&nodes, &TranslatorOptions::default())
    }

    #[test]
    fn wraps_body_in_module_shape() {
        let out = translate("let x = 1");
        assert!(out.starts_with("vim = require 'vim'\n"));
        assert!(out.contains("s = vim.new_scope(false)"));
        assert!(out.contains("return { run = function(state)"));
        assert!(out.contains("state = state:set_script_locals(s)"));
        assert!(out.contains("state.current_scope:assign(\"x\", vim.number.new(\"1\"))"));
        assert!(out.trim_end().ends_with("end }"));
    }

    #[test]
    fn empty_script_still_has_module_shape() {
        let out = translate("");
        assert!(out.contains("return { run = function(state)"));
        assert!(out.trim_end().ends_with("end }"));
    }
}
