// ABOUTME: Argument parser for :menu/:unmenu (spec.md §4.7)

use crate::ast::command::{CommandArg, MenuFlags, MenuSpec, MenuToggle};
use crate::error::{messages, CommandParseOutcome, Diagnostic};
use crate::lexer;

const TAGS: &[(&str, MenuFlags)] = &[("<silent>", MenuFlags::SILENT), ("<script>", MenuFlags::SCRIPT), ("<special>", MenuFlags::SPECIAL)];

/// Splits a menu path on unescaped `.`, the way `&File.&New` parses to
/// `["&File", "&New"]` (spec.md §4.7 `:menu`). The leading `&` accelerator
/// marker is kept verbatim — stripping it is the printer's job, not the
/// parser's.
fn split_menu_path(s: &str) -> Vec<String> {
    let mut parts = Vec::new();
    let mut current = String::new();
    let mut chars = s.char_indices().peekable();
    while let Some((_, c)) = chars.next() {
        if c == '\\' {
            if let Some((_, next)) = chars.next() {
                current.push(next);
            }
            continue;
        }
        if c == '.' {
            parts.push(std::mem::take(&mut current));
            continue;
        }
        current.push(c);
    }
    parts.push(current);
    parts
}

/// `:menu`/`:unmenu` (spec.md §4.7 `:menu`): optional priority (`10.400`),
/// optional `<silent>`/`<script>`/`<special>` tags, an `icon=` pragma, a
/// dot-separated menu path, then either `enable`/`disable` or the RHS text.
pub fn parse_menu(arg_str: &str) -> CommandParseOutcome<CommandArg> {
    let mut p = lexer::skipwhite(arg_str, 0);

    let mut priority = Vec::new();
    let priority_end = {
        let mut i = p;
        let bytes = arg_str.as_bytes();
        while i < bytes.len() && (bytes[i].is_ascii_digit() || bytes[i] == b'.') {
            i += 1;
        }
        i
    };
    if priority_end > p && arg_str.as_bytes().get(p).is_some_and(|b| b.is_ascii_digit()) {
        for piece in arg_str[p..priority_end].split('.') {
            if !piece.is_empty() {
                priority.push(piece.parse::<u32>().unwrap_or(0));
            }
        }
        p = lexer::skipwhite(arg_str, priority_end);
    }

    let mut flags = MenuFlags::EMPTY;
    'tags: loop {
        for (tag, flag) in TAGS {
            if arg_str[p..].starts_with(tag) {
                flags.insert(*flag);
                p = lexer::skipwhite(arg_str, p + tag.len());
                continue 'tags;
            }
        }
        break;
    }

    let mut icon = None;
    if let Some(rest) = arg_str[p..].strip_prefix("icon=") {
        let end = rest.find(char::is_whitespace).unwrap_or(rest.len());
        icon = Some(rest[..end].to_string());
        p = lexer::skipwhite(arg_str, p + 5 + end);
    }

    if p >= arg_str.len() {
        return CommandParseOutcome::NotDone(Diagnostic::new(messages::E474_INVALID_ARGUMENT, p));
    }

    let path_end = arg_str[p..].find(|c: char| c == ' ' || c == '\t').map(|rel| p + rel).unwrap_or(arg_str.len());
    let path = split_menu_path(&arg_str[p..path_end]);
    let rest = lexer::skipwhite(arg_str, path_end);
    let tail = arg_str[rest..].trim();

    let (toggle, rhs) = if tail == "enable" {
        (MenuToggle::Enable, None)
    } else if tail == "disable" {
        (MenuToggle::Disable, None)
    } else if tail.is_empty() {
        (MenuToggle::None, None)
    } else {
        (MenuToggle::None, Some(tail.to_string()))
    };

    CommandParseOutcome::Ok(CommandArg::Menu(MenuSpec {
        flags,
        icon,
        priority,
        toggle,
        path,
        tooltip: None,
        rhs,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn menu_with_priority_and_path() {
        let outcome = parse_menu("10.400 &File.&New :enew<CR>");
        match outcome {
            CommandParseOutcome::Ok(CommandArg::Menu(m)) => {
                assert_eq!(m.priority, vec![10, 400]);
                assert_eq!(m.path, vec!["&File".to_string(), "&New".to_string()]);
                assert_eq!(m.rhs.as_deref(), Some(":enew<CR>"));
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn menu_enable_toggle() {
        let outcome = parse_menu("File.New enable");
        match outcome {
            CommandParseOutcome::Ok(CommandArg::Menu(m)) => assert_eq!(m.toggle, MenuToggle::Enable),
            other => panic!("unexpected {:?}", other),
        }
    }
}
