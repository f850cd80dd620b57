// ABOUTME: Argument parsers for :command/:delcommand (spec.md §4.7)

use crate::ast::command::{CmdComplete, CommandArg, NArgs, UserCommandDef, UserCommandFlags};
use crate::error::{messages, CommandParseOutcome, Diagnostic};
use crate::lexer;

fn take_token(s: &str, pos: usize) -> (&str, usize) {
    let end = s[pos..].find(|c: char| c == ' ' || c == '\t').map(|rel| pos + rel).unwrap_or(s.len());
    (&s[pos..end], end)
}

/// `:command[!] [-attrs] {name} {rep}` (spec.md §4.7 `:command`). A bare
/// `:command` (no name) lists every user command — `CommandArg::None`.
pub fn parse_command(arg_str: &str) -> CommandParseOutcome<CommandArg> {
    let mut flags = UserCommandFlags::EMPTY;
    let mut nargs = NArgs::Zero;
    let mut range = None;
    let mut count = None;
    let mut complete = None;

    let mut p = lexer::skipwhite(arg_str, 0);
    while p < arg_str.len() && arg_str[p..].starts_with('-') {
        let (token, next) = take_token(arg_str, p);
        let attr = &token[1..];
        if attr == "bang" {
            flags.insert(UserCommandFlags::BANG);
        } else if attr == "buffer" {
            flags.insert(UserCommandFlags::BUFFER);
        } else if attr == "bar" {
            flags.insert(UserCommandFlags::BAR);
        } else if attr == "register" {
            flags.insert(UserCommandFlags::REGISTER);
        } else if let Some(value) = attr.strip_prefix("nargs=") {
            nargs = match value {
                "0" => NArgs::Zero,
                "1" => NArgs::One,
                "*" => NArgs::Any,
                "?" => NArgs::ZeroOrOne,
                "+" => NArgs::OneOrMore,
                _ => NArgs::Any,
            };
        } else if let Some(value) = attr.strip_prefix("range") {
            range = Some(if let Some(n) = value.strip_prefix('=') { n.to_string() } else { "%".to_string() });
        } else if let Some(value) = attr.strip_prefix("count") {
            count = Some(if let Some(n) = value.strip_prefix('=') { n.to_string() } else { String::new() });
        } else if let Some(value) = attr.strip_prefix("complete=") {
            let (kind, custom_function) = match value.split_once(',') {
                Some((k, f)) => (k.to_string(), Some(f.to_string())),
                None => (value.to_string(), None),
            };
            complete = Some(CmdComplete { kind, custom_function });
        }
        p = lexer::skipwhite(arg_str, next);
    }

    if p >= arg_str.len() {
        return CommandParseOutcome::Ok(CommandArg::None);
    }

    let (name, after_name) = take_token(arg_str, p);
    if !name.starts_with(|c: char| c.is_ascii_uppercase()) {
        return CommandParseOutcome::NotDone(Diagnostic::new(messages::E474_INVALID_ARGUMENT, p));
    }
    let body = lexer::skipwhite(arg_str, after_name);

    CommandParseOutcome::Ok(CommandArg::UserCommand(UserCommandDef {
        flags,
        nargs,
        range,
        count,
        complete,
        name: name.to_string(),
        body: arg_str[body..].to_string(),
    }))
}

/// `:delcommand[!] {name}` (spec.md §4.7 `:command`).
pub fn parse_delcommand(arg_str: &str) -> CommandParseOutcome<CommandArg> {
    let name = arg_str.trim();
    if name.is_empty() {
        CommandParseOutcome::NotDone(Diagnostic::new(messages::E474_INVALID_ARGUMENT, 0))
    } else {
        CommandParseOutcome::Ok(CommandArg::String(name.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn command_with_nargs_and_body() {
        let outcome = parse_command("-nargs=1 Greet echo 'hi ' . <q-args>");
        match outcome {
            CommandParseOutcome::Ok(CommandArg::UserCommand(c)) => {
                assert_eq!(c.name, "Greet");
                assert_eq!(c.nargs, NArgs::One);
                assert!(c.body.starts_with("echo"));
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn bare_command_lists_all() {
        assert_eq!(parse_command(""), CommandParseOutcome::Ok(CommandArg::None));
    }

    #[test]
    fn delcommand_takes_name() {
        assert_eq!(parse_delcommand("Greet"), CommandParseOutcome::Ok(CommandArg::String("Greet".to_string())));
    }
}
