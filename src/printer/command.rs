// ABOUTME: Ex-command pretty-printer (spec.md §4.9)
//
// Renders a `CommandNode` tree back to VimL text, one function per AST shape,
// mirroring the one-module-per-command-family layout under
// `src/parser/commands/`. Block bodies (the `body` field) are indented
// by `PrinterOptions.indent_width` and closed with the matching `:end*`/
// `:else*`/`:catch`/`:finally` keyword, the inverse of the opener/closer
// table `parser::sequence` drives from.

use crate::ast::address::{Address, AddressFollowup, Range};
use crate::ast::command::{
    AssignOp, CommandArg, CommandNode, CommandType, MenuToggle, Replacement, SetOperator,
};
use crate::ast::pattern::{Glob, Pattern};
use crate::config::PrinterOptions;
use crate::printer::expr::print_expr;

fn print_address(address: &Address) -> String {
    match address {
        Address::Missing => String::new(),
        Address::Fixed(n) => n.to_string(),
        Address::End => "$".to_string(),
        Address::Current => ".".to_string(),
        Address::Mark(c) => format!("'{}", c),
        Address::ForwardSearch(re) => format!("/{}/", re.source),
        Address::BackwardSearch(re) => format!("?{}?", re.source),
        Address::ForwardPreviousSearch => "\\/".to_string(),
        Address::BackwardPreviousSearch => "\\?".to_string(),
        Address::SubstituteSearch => "\\&".to_string(),
    }
}

fn print_range(range: &Range) -> String {
    let mut out = String::new();
    for (i, link) in range.links.iter().enumerate() {
        if i > 0 {
            out.push_str(if link.setpos { ";" } else { "," });
        }
        out.push_str(&print_address(&link.address));
        for followup in &link.followups {
            match followup {
                AddressFollowup::ForwardPattern(re) => out.push_str(&format!("/{}/", re.source)),
                AddressFollowup::BackwardPattern(re) => out.push_str(&format!("?{}?", re.source)),
                AddressFollowup::Shift(n) => {
                    if *n >= 0 {
                        out.push_str(&format!("+{}", n));
                    } else {
                        out.push_str(&n.to_string());
                    }
                }
            }
        }
    }
    out
}

fn print_pattern(pattern: &Pattern) -> String {
    match pattern {
        Pattern::Literal(s) => s.clone(),
        Pattern::Home => "~".to_string(),
        Pattern::Environment(name) => format!("${}", name),
        Pattern::Current => "%".to_string(),
        Pattern::Alternate => "#".to_string(),
        Pattern::Bufname(n) => format!("#{}", n),
        Pattern::OldFile(n) => format!("#<{}", n),
        Pattern::Arguments => "##".to_string(),
        Pattern::Character => "?".to_string(),
        Pattern::Anything => "*".to_string(),
        Pattern::AnyRecurse => "**".to_string(),
        Pattern::Collection(s) => format!("[{}]", s),
        Pattern::Branch(alts) => {
            let body = alts
                .iter()
                .map(|chain| chain.iter().map(print_pattern).collect::<String>())
                .collect::<Vec<_>>()
                .join(",");
            format!("{{{}}}", body)
        }
        Pattern::ShellExpansion(cmd) => format!("`{}`", cmd),
        Pattern::ExpressionExpansion(e) => format!("`={}`", print_expr(e, &PrinterOptions::default())),
        Pattern::AutocmdPattern(text) => text.clone(),
    }
}

fn print_glob(glob: &Glob) -> String {
    glob.chunks.iter().map(print_pattern).collect()
}

fn print_replacement(items: &[Replacement], options: &PrinterOptions) -> String {
    items
        .iter()
        .map(|item| match item {
            Replacement::Literal(s) => s.clone(),
            Replacement::Expr(e) => format!("\\={}", print_expr(e, options)),
            Replacement::EscLiteral(c) => format!("\\{}", c),
            Replacement::Escaped(c) => c.to_string(),
            Replacement::Matched => "&".to_string(),
            Replacement::Group(n) => format!("\\{}", n),
            Replacement::PrevSub => "~".to_string(),
            Replacement::CharUpCase => "\\u".to_string(),
            Replacement::UpCase => "\\U".to_string(),
            Replacement::CharDownCase => "\\l".to_string(),
            Replacement::DownCase => "\\L".to_string(),
            Replacement::CaseEnd => "\\e".to_string(),
            Replacement::NewLine => "\\r".to_string(),
        })
        .collect()
}

fn assign_op_text(op: AssignOp) -> &'static str {
    match op {
        AssignOp::Assign => "=",
        AssignOp::Add => "+=",
        AssignOp::Subtract => "-=",
        AssignOp::Concat => ".=",
    }
}

fn print_lhs(names: &[String]) -> String {
    if names.len() == 1 {
        names[0].clone()
    } else {
        format!("[{}]", names.join(", "))
    }
}

fn set_op_text(op: &crate::ast::command::SetOp) -> String {
    match op.operator {
        SetOperator::Show => op.name.clone(),
        SetOperator::Query => format!("{}?", op.name),
        SetOperator::Invert => format!("{}!", op.name),
        SetOperator::Reset => format!("no{}", op.name),
        SetOperator::ResetToVi => format!("{}&vi", op.name),
        SetOperator::ResetToVim => format!("{}&vim", op.name),
        SetOperator::Assign => format!("{}={}", op.name, op.value.as_deref().unwrap_or("")),
        SetOperator::Add => format!("{}+={}", op.name, op.value.as_deref().unwrap_or("")),
        SetOperator::Subtract => format!("{}-={}", op.name, op.value.as_deref().unwrap_or("")),
        SetOperator::Power => format!("{}^={}", op.name, op.value.as_deref().unwrap_or("")),
    }
}

/// The bare command keyword for a `CommandType`, as typed (minus leading `:`
/// and any `!`/range/count which `print_command_node` prepends separately).
fn command_keyword(command_type: CommandType, name: Option<&str>) -> String {
    match command_type {
        CommandType::If => "if".to_string(),
        CommandType::Elseif => "elseif".to_string(),
        CommandType::Else => "else".to_string(),
        CommandType::Endif => "endif".to_string(),
        CommandType::While => "while".to_string(),
        CommandType::Endwhile => "endwhile".to_string(),
        CommandType::For => "for".to_string(),
        CommandType::Endfor => "endfor".to_string(),
        CommandType::Break => "break".to_string(),
        CommandType::Continue => "continue".to_string(),
        CommandType::Function => "function".to_string(),
        CommandType::Endfunction => "endfunction".to_string(),
        CommandType::Return => "return".to_string(),
        CommandType::Try => "try".to_string(),
        CommandType::Catch => "catch".to_string(),
        CommandType::Finally => "finally".to_string(),
        CommandType::Endtry => "endtry".to_string(),
        CommandType::Throw => "throw".to_string(),
        CommandType::Let => "let".to_string(),
        CommandType::Unlet => "unlet".to_string(),
        CommandType::Call => "call".to_string(),
        CommandType::Echo => "echo".to_string(),
        CommandType::Echon => "echon".to_string(),
        CommandType::Echomsg => "echomsg".to_string(),
        CommandType::Echoerr => "echoerr".to_string(),
        CommandType::Execute => "execute".to_string(),
        CommandType::Set => "set".to_string(),
        CommandType::Map => "map".to_string(),
        CommandType::Unmap => "unmap".to_string(),
        CommandType::Menu => "menu".to_string(),
        CommandType::Unmenu => "unmenu".to_string(),
        CommandType::Autocmd => "autocmd".to_string(),
        CommandType::Augroup => "augroup".to_string(),
        CommandType::Command => "command".to_string(),
        CommandType::Delcommand => "delcommand".to_string(),
        CommandType::Substitute => "substitute".to_string(),
        CommandType::Global => "global".to_string(),
        CommandType::Print => "print".to_string(),
        CommandType::Append => "append".to_string(),
        CommandType::Insert => "insert".to_string(),
        CommandType::Change => "change".to_string(),
        CommandType::Put => "put".to_string(),
        CommandType::Normal => "normal".to_string(),
        CommandType::Highlight => "highlight".to_string(),
        CommandType::Sort => "sort".to_string(),
        CommandType::Wincmd => "wincmd".to_string(),
        CommandType::Marks => "marks".to_string(),
        CommandType::Delmarks => "delmarks".to_string(),
        CommandType::Winpos => "winpos".to_string(),
        CommandType::Winsize => "winsize".to_string(),
        CommandType::Redir => "redir".to_string(),
        CommandType::Language => "language".to_string(),
        CommandType::Vimgrep => "vimgrep".to_string(),
        CommandType::Vglobal => "vglobal".to_string(),
        CommandType::Mapclear => "mapclear".to_string(),
        CommandType::Z => "z".to_string(),
        CommandType::Help => "help".to_string(),
        CommandType::Helpgrep => "helpgrep".to_string(),
        CommandType::Display => "display".to_string(),
        CommandType::Digraphs => "digraphs".to_string(),
        CommandType::Later => "later".to_string(),
        CommandType::Filetype => "filetype".to_string(),
        CommandType::History => "history".to_string(),
        CommandType::Popup => "popup".to_string(),
        CommandType::Make => "make".to_string(),
        CommandType::Retab => "retab".to_string(),
        CommandType::Resize => "resize".to_string(),
        CommandType::Script => "script".to_string(),
        CommandType::Open => "open".to_string(),
        CommandType::Gui => "gui".to_string(),
        CommandType::Match => "match".to_string(),
        CommandType::Sleep => "sleep".to_string(),
        CommandType::Syntime => "syntime".to_string(),
        CommandType::Behave => "behave".to_string(),
        CommandType::Breakadd => "breakadd".to_string(),
        CommandType::Profile => "profile".to_string(),
        CommandType::Profdel => "profdel".to_string(),
        CommandType::USER | CommandType::Unknown => name.unwrap_or_default().to_string(),
        CommandType::Missing | CommandType::Comment | CommandType::HashbangComment | CommandType::SyntaxError => {
            String::new()
        }
    }
}

fn indent(depth: usize, options: &PrinterOptions) -> String {
    " ".repeat(depth * options.indent_width)
}

/// The `:end*` keyword that closes a block opener. `parser::sequence` drops
/// the closer line itself once it has matched an opener (spec.md §4.8), so
/// the printer re-derives it from the opener's own type on the way back out.
fn closer_keyword(opener: CommandType) -> Option<&'static str> {
    match opener {
        CommandType::If => Some("endif"),
        CommandType::While => Some("endwhile"),
        CommandType::For => Some("endfor"),
        CommandType::Function => Some("endfunction"),
        CommandType::Try => Some("endtry"),
        _ => None,
    }
}

/// Prints one command, recursing into block bodies at `depth + 1`. Blank for
/// `Missing` (bare-range lines carry their own range and nothing else, so the
/// caller's range-printing already produced the whole line) and for a
/// `SyntaxError` node, whose original text isn't retained anywhere.
fn print_command_node(node: &CommandNode, depth: usize, options: &PrinterOptions) -> String {
    let pad = indent(depth, options);

    if node.command_type == CommandType::Comment {
        return format!("{}\"{}", pad, arg_as_string(&node.arg));
    }
    if node.command_type == CommandType::HashbangComment {
        return format!("#!{}", arg_as_string(&node.arg));
    }

    let mut head = pad.clone();
    if !node.range.is_empty() {
        head.push_str(&print_range(&node.range));
    }
    head.push_str(&command_keyword(node.command_type, node.name.as_deref()));
    if node.bang {
        head.push('!');
    }
    if let Some(count) = node.count {
        head.push(' ');
        head.push_str(&count.to_string());
    }
    if let Some(reg) = &node.register {
        head.push(' ');
        head.push(reg.name);
    }

    let body = print_arg(&node.arg, options);
    if !body.is_empty() {
        head.push(' ');
        head.push_str(&body);
    }

    if !node.doc.is_empty() {
        let mut with_docs: Vec<String> = node.doc.iter().map(|doc| format!("{}\"{}", pad, doc)).collect();
        with_docs.push(head);
        head = with_docs.join("\n");
    }

    match &node.body {
        Some(children) => {
            let mut lines = vec![head];
            for child in children {
                // `:elseif`/`:else`/`:catch`/`:finally` are flattened
                // siblings of their opener in the AST (spec.md §9 Design
                // Notes), but print at the opener's own depth, the way Vim
                // aligns them, rather than nested one level deeper.
                let child_depth = if is_block_separator(child.command_type) { depth } else { depth + 1 };
                lines.push(print_command_node(child, child_depth, options));
            }
            if let Some(closer) = closer_keyword(node.command_type) {
                lines.push(format!("{}{}", pad, closer));
            }
            lines.join("\n")
        }
        None => head,
    }
}

fn is_block_separator(command_type: CommandType) -> bool {
    matches!(command_type, CommandType::Elseif | CommandType::Else | CommandType::Catch | CommandType::Finally)
}

fn arg_as_string(arg: &CommandArg) -> String {
    match arg {
        CommandArg::String(s) => s.clone(),
        _ => String::new(),
    }
}

fn print_arg(arg: &CommandArg, options: &PrinterOptions) -> String {
    match arg {
        CommandArg::None => String::new(),
        CommandArg::Expression(e) => print_expr(e, options),
        CommandArg::Expressions(items) => items.iter().map(|e| print_expr(e, options)).collect::<Vec<_>>().join(" "),
        CommandArg::String(s) => s.clone(),
        CommandArg::Strings(items) => items.join(" "),
        CommandArg::Number(n) => n.to_string(),
        CommandArg::UNumber(n) => n.to_string(),
        CommandArg::Numbers(items) => items.iter().map(|n| n.to_string()).collect::<Vec<_>>().join(" "),
        CommandArg::UNumbers(items) => items.iter().map(|n| n.to_string()).collect::<Vec<_>>().join(" "),
        CommandArg::Flags(_) => String::new(),
        CommandArg::Char(c) => c.to_string(),
        CommandArg::Pattern(p) => print_pattern(p),
        CommandArg::Glob(g) => print_glob(g),
        CommandArg::Regex(re) => format!("/{}/", re.source),
        CommandArg::Replacement(items) => print_replacement(items, options),
        CommandArg::MenuName(path) => path.join("."),
        CommandArg::Address(range) => print_range(range),
        CommandArg::AuEvents(events) => events.join(","),
        CommandArg::CmdComplete(c) => match &c.custom_function {
            Some(f) => format!("-complete={},{}", c.kind, f),
            None => format!("-complete={}", c.kind),
        },
        CommandArg::Register(reg) => match &reg.expr {
            Some(e) => format!("={}", print_expr(e, options)),
            None => reg.name.to_string(),
        },
        CommandArg::HighlightColor(color) => match color {
            crate::ast::command::HighlightColor::Name(n) => n.clone(),
            crate::ast::command::HighlightColor::Rgb { red, green, blue } => format!("#{:02x}{:02x}{:02x}", red, green, blue),
            crate::ast::command::HighlightColor::Idx(i) => i.to_string(),
            crate::ast::command::HighlightColor::Fg => "fg".to_string(),
            crate::ast::command::HighlightColor::Bg => "bg".to_string(),
            crate::ast::command::HighlightColor::None => "NONE".to_string(),
        },
        CommandArg::AssignLhs(names) => print_lhs(names),
        CommandArg::LetAssign(assign) => match &assign.rhs {
            Some(rhs) => format!("{} {} {}", print_lhs(&assign.lhs), assign_op_text(assign.op), print_expr(rhs, options)),
            None => print_lhs(&assign.lhs),
        },
        CommandArg::ForLoop(for_loop) => format!("{} in {}", print_lhs(&for_loop.lhs), print_expr(&for_loop.rhs, options)),
        CommandArg::Function(sig) => {
            if sig.by_pattern {
                return match sig.name.as_ref() {
                    crate::ast::expr::ExpressionNode::SingleQuotedString { text, .. } => format!("/{}/", text),
                    other => print_expr(other, options),
                };
            }
            let name = print_expr(&sig.name, options);
            if sig.params.is_empty() && !sig.varargs && sig.flags == crate::ast::command::FunctionFlags::EMPTY {
                return name;
            }
            let mut params = sig.params.clone();
            if sig.varargs {
                params.push("...".to_string());
            }
            let mut flags = Vec::new();
            if sig.flags.contains(crate::ast::command::FunctionFlags::RANGE) {
                flags.push("range");
            }
            if sig.flags.contains(crate::ast::command::FunctionFlags::DICT) {
                flags.push("dict");
            }
            if sig.flags.contains(crate::ast::command::FunctionFlags::ABORT) {
                flags.push("abort");
            }
            let mut out = format!("{}({})", name, params.join(", "));
            if !flags.is_empty() {
                out.push(' ');
                out.push_str(&flags.join(" "));
            }
            out
        }
        CommandArg::Set(ops) => ops.iter().map(set_op_text).collect::<Vec<_>>().join(" "),
        CommandArg::Map(map) => {
            let mut tags = Vec::new();
            if map.flags.contains(crate::ast::command::MapFlags::BUFFER) {
                tags.push("<buffer>");
            }
            if map.flags.contains(crate::ast::command::MapFlags::NOWAIT) {
                tags.push("<nowait>");
            }
            if map.flags.contains(crate::ast::command::MapFlags::SILENT) {
                tags.push("<silent>");
            }
            if map.flags.contains(crate::ast::command::MapFlags::SPECIAL) {
                tags.push("<special>");
            }
            if map.flags.contains(crate::ast::command::MapFlags::SCRIPT) {
                tags.push("<script>");
            }
            if map.flags.contains(crate::ast::command::MapFlags::EXPR) {
                tags.push("<expr>");
            }
            if map.flags.contains(crate::ast::command::MapFlags::UNIQUE) {
                tags.push("<unique>");
            }
            let prefix = if tags.is_empty() { String::new() } else { format!("{} ", tags.join(" ")) };
            format!("{}{} {}", prefix, map.lhs, map.rhs)
        }
        CommandArg::Menu(menu) => {
            let mut out = String::new();
            if !menu.priority.is_empty() {
                out.push_str(&menu.priority.iter().map(|p| p.to_string()).collect::<Vec<_>>().join("."));
                out.push(' ');
            }
            if menu.flags.contains(crate::ast::command::MenuFlags::SILENT) {
                out.push_str("<silent> ");
            }
            if menu.flags.contains(crate::ast::command::MenuFlags::SCRIPT) {
                out.push_str("<script> ");
            }
            if menu.flags.contains(crate::ast::command::MenuFlags::SPECIAL) {
                out.push_str("<special> ");
            }
            if let Some(icon) = &menu.icon {
                out.push_str(&format!("icon={} ", icon));
            }
            match menu.toggle {
                MenuToggle::Enable => out.push_str("enable "),
                MenuToggle::Disable => out.push_str("disable "),
                MenuToggle::None => {}
            }
            out.push_str(&menu.path.join("."));
            if let Some(rhs) = &menu.rhs {
                out.push(' ');
                out.push_str(rhs);
            }
            out
        }
        CommandArg::UserCommand(def) => format!("{} {}", def.name, def.body),
        CommandArg::Autocmd(spec) => {
            let mut out = String::new();
            if let Some(group) = &spec.group {
                out.push_str(group);
                out.push(' ');
            }
            out.push_str(&spec.events.join(","));
            out.push(' ');
            out.push_str(&spec.patterns.iter().map(print_pattern).collect::<Vec<_>>().join(","));
            if spec.nested {
                out.push_str(" nested");
            }
            if let Some(cmd) = &spec.command {
                out.push(' ');
                out.push_str(cmd);
            }
            out
        }
        CommandArg::Substitute(sub) => {
            let pattern = sub.pattern.as_ref().map(|re| re.source.clone()).unwrap_or_default();
            let mut out = format!("/{}/{}/", pattern, print_replacement(&sub.replacement, options));
            if sub.flags.contains(crate::ast::command::SubstituteFlags::GLOBAL) {
                out.push('g');
            }
            if sub.flags.contains(crate::ast::command::SubstituteFlags::IGNORE_CASE) {
                out.push('i');
            }
            if sub.flags.contains(crate::ast::command::SubstituteFlags::MATCH_CASE) {
                out.push('I');
            }
            if sub.flags.contains(crate::ast::command::SubstituteFlags::CONFIRM) {
                out.push('c');
            }
            if sub.flags.contains(crate::ast::command::SubstituteFlags::NO_ERROR) {
                out.push('e');
            }
            if sub.flags.contains(crate::ast::command::SubstituteFlags::PRINT) {
                out.push('p');
            }
            if sub.flags.contains(crate::ast::command::SubstituteFlags::LIST) {
                out.push('l');
            }
            if sub.flags.contains(crate::ast::command::SubstituteFlags::NUMBER) {
                out.push('n');
            }
            if sub.flags.contains(crate::ast::command::SubstituteFlags::HASH_NR) {
                out.push('#');
            }
            if let Some(count) = sub.count {
                out.push(' ');
                out.push_str(&count.to_string());
            }
            out
        }
        CommandArg::Global(spec) => format!("/{}/{}", spec.pattern.source, spec.command),
    }
}

/// Prints a full command tree: top-level siblings separated by newlines
/// (spec.md §4.9).
pub fn print_commands(nodes: &[CommandNode], options: &PrinterOptions) -> String {
    nodes.iter().map(|n| print_command_node(n, 0, options)).collect::<Vec<_>>().join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CommandParserOptions;
    use crate::parser::sequence::parse_cmd_sequence;

    fn render(src: &'static str) -> String {
        let options = CommandParserOptions::new(0);
        let mut lines = src.lines().map(|s| s.to_string());
        let nodes = parse_cmd_sequence(move || lines.next(), &options);
        print_commands(&nodes, &PrinterOptions::default())
    }

    #[test]
    fn simple_let_roundtrips() {
        assert_eq!(render("let x = 1"), "let x = 1");
    }

    #[test]
    fn if_block_is_indented_and_closed() {
        let out = render("if x\ncall Foo()\nendif");
        assert_eq!(out, "if x\n  call Foo()\nendif");
    }

    #[test]
    fn nested_while_inside_if() {
        let out = render("if x\nwhile y\nlet z = 1\nendwhile\nendif");
        assert_eq!(out, "if x\n  while y\n    let z = 1\n  endwhile\nendif");
    }

    #[test]
    fn range_prefixes_command() {
        let out = render("1,$print");
        assert_eq!(out, "1,$print");
    }
}
