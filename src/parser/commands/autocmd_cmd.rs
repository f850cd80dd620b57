// ABOUTME: Argument parsers for :autocmd/:augroup (spec.md §4.7)

use crate::ast::command::{AutocmdSpec, CommandArg};
use crate::error::CommandParseOutcome;
use crate::lexer;
use crate::parser::pattern;

/// `:autocmd[!] [group] {event},{event} {pat},{pat} [++nested] {cmd}`
/// (spec.md §4.7 `:autocmd`). Without a live augroup table to consult (out
/// of scope, spec.md §1 excludes execution), group detection is not
/// attempted — the first comma-separated token is always read as the event
/// list. A bare `:autocmd` with no arguments lists everything
/// (`CommandArg::None`).
pub fn parse_autocmd(arg_str: &str) -> CommandParseOutcome<CommandArg> {
    let p = lexer::skipwhite(arg_str, 0);
    if p >= arg_str.len() {
        return CommandParseOutcome::Ok(CommandArg::None);
    }

    let events_end = arg_str[p..].find(|c: char| c == ' ' || c == '\t').map(|rel| p + rel).unwrap_or(arg_str.len());
    let events: Vec<String> = arg_str[p..events_end].split(',').filter(|s| !s.is_empty()).map(|s| s.to_string()).collect();

    let pat_start = lexer::skipwhite(arg_str, events_end);
    if pat_start >= arg_str.len() {
        return CommandParseOutcome::Ok(CommandArg::Autocmd(AutocmdSpec {
            group: None,
            events,
            patterns: Vec::new(),
            nested: false,
            command: None,
        }));
    }
    let pat_end = arg_str[pat_start..].find(|c: char| c == ' ' || c == '\t').map(|rel| pat_start + rel).unwrap_or(arg_str.len());
    let (patterns, _) = pattern::get_comma_separated_patterns(&arg_str[pat_start..pat_end], 0);

    let mut rest = lexer::skipwhite(arg_str, pat_end);
    let nested = if arg_str[rest..].starts_with("++nested") {
        rest = lexer::skipwhite(arg_str, rest + "++nested".len());
        true
    } else if arg_str[rest..].starts_with("nested") {
        rest = lexer::skipwhite(arg_str, rest + "nested".len());
        true
    } else {
        false
    };

    let command = if rest < arg_str.len() { Some(arg_str[rest..].to_string()) } else { None };

    CommandParseOutcome::Ok(CommandArg::Autocmd(AutocmdSpec {
        group: None,
        events,
        patterns,
        nested,
        command,
    }))
}

/// `:augroup {name}` / `:augroup END` (spec.md §4.7 `:autocmd`).
pub fn parse_augroup(arg_str: &str) -> CommandParseOutcome<CommandArg> {
    let name = arg_str.trim();
    if name.is_empty() {
        CommandParseOutcome::Ok(CommandArg::None)
    } else {
        CommandParseOutcome::Ok(CommandArg::String(name.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn autocmd_events_patterns_and_command() {
        let outcome = parse_autocmd("BufEnter,BufLeave *.rs echo 'rust'");
        match outcome {
            CommandParseOutcome::Ok(CommandArg::Autocmd(a)) => {
                assert_eq!(a.events, vec!["BufEnter".to_string(), "BufLeave".to_string()]);
                assert_eq!(a.patterns.len(), 1);
                assert_eq!(a.command.as_deref(), Some("echo 'rust'"));
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn autocmd_nested_flag() {
        let outcome = parse_autocmd("User Foo ++nested doautocmd User Bar");
        match outcome {
            CommandParseOutcome::Ok(CommandArg::Autocmd(a)) => assert!(a.nested),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn augroup_end() {
        assert_eq!(parse_augroup("END"), CommandParseOutcome::Ok(CommandArg::String("END".to_string())));
    }
}
