// ABOUTME: Argument parsers for :sort/:wincmd/:marks/:delmarks/:winpos/:winsize/:redir/:language/:mapclear (spec.md §4.7)

use crate::ast::command::CommandArg;
use crate::error::{messages, CommandParseOutcome, Diagnostic};
use crate::lexer;

/// `:sort[!] [i][n][u][r] [/pattern/]` (spec.md §4.7 `:sort`): a run of
/// single-letter flags (`i` ignorecase, `n` numeric, `u` unique, `r` use
/// the pattern as the sort key rather than excluding it), then an optional
/// `/pattern/` delimiter-quoted sort key. Reverse order is carried on
/// `bang`, not here. Stored as `Strings` of only the pieces actually
/// present, so an empty invocation prints as nothing rather than stray
/// whitespace.
pub fn parse_sort(arg_str: &str) -> CommandParseOutcome<CommandArg> {
    let mut i = lexer::skipwhite(arg_str, 0);
    let bytes = arg_str.as_bytes();
    let flags_start = i;
    while i < bytes.len() && matches!(bytes[i] as char, 'i' | 'n' | 'u' | 'r') {
        i += 1;
    }
    let flags = &arg_str[flags_start..i];

    i = lexer::skipwhite(arg_str, i);
    let mut parts = Vec::new();
    if !flags.is_empty() {
        parts.push(flags.to_string());
    }
    if i < bytes.len() && bytes[i] == b'/' {
        let rest = &arg_str[i..];
        match rest[1..].find('/') {
            Some(end) => parts.push(rest[..end + 2].to_string()),
            None => parts.push(rest.to_string()),
        }
    }
    CommandParseOutcome::Ok(CommandArg::Strings(parts))
}

/// `:wincmd {char}` (spec.md §4.7 `:wincmd`): exactly one keystroke
/// character naming the window command to run.
pub fn parse_wincmd(arg_str: &str) -> CommandParseOutcome<CommandArg> {
    let p = lexer::skipwhite(arg_str, 0);
    match arg_str[p..].chars().next() {
        Some(c) => CommandParseOutcome::Ok(CommandArg::Char(c)),
        None => CommandParseOutcome::NotDone(Diagnostic::new(messages::E474_INVALID_ARGUMENT, p)),
    }
}

/// `:marks [{arg}]` / `:delmarks[!] {marks}` (spec.md §4.7): a
/// whitespace-separated list of mark names, or none at all (`:marks` lists
/// everything, `:delmarks!` with no names clears all lowercase marks).
pub fn parse_mark_names(arg_str: &str) -> CommandParseOutcome<CommandArg> {
    let p = lexer::skipwhite(arg_str, 0);
    if p >= arg_str.len() {
        return CommandParseOutcome::Ok(CommandArg::None);
    }
    let names: Vec<String> = arg_str[p..].split_whitespace().map(|s| s.to_string()).collect();
    CommandParseOutcome::Ok(CommandArg::Strings(names))
}

/// `:winpos [X Y]` / `:winsize width height` (spec.md §4.7): zero or two
/// whitespace-separated numbers. `:winpos` alone queries the current
/// position, so an empty argument is `None` rather than a syntax error.
pub fn parse_two_numbers(arg_str: &str) -> CommandParseOutcome<CommandArg> {
    let p = lexer::skipwhite(arg_str, 0);
    if p >= arg_str.len() {
        return CommandParseOutcome::Ok(CommandArg::None);
    }
    let nums: Vec<i64> = arg_str[p..].split_whitespace().filter_map(|tok| tok.parse::<i64>().ok()).collect();
    if nums.len() != 2 {
        return CommandParseOutcome::NotDone(Diagnostic::new(messages::E474_INVALID_ARGUMENT, p));
    }
    CommandParseOutcome::Ok(CommandArg::Numbers(nums))
}

/// `:redir[!] > file` / `>> file` / `@{register}[>]` / `=> {var}` / `END`
/// (spec.md §4.7 `:redir`): classifies the target's leading punctuation but
/// keeps the target text itself verbatim, since the destination (file name,
/// register, variable name) is never interpreted here.
pub fn parse_redir(arg_str: &str) -> CommandParseOutcome<CommandArg> {
    let p = lexer::skipwhite(arg_str, 0);
    if p >= arg_str.len() {
        return CommandParseOutcome::Ok(CommandArg::None);
    }
    CommandParseOutcome::Ok(CommandArg::String(arg_str[p..].trim_end().to_string()))
}

/// `:language {locale}` (spec.md §4.7 `:language`): a single trailing
/// locale/category name (e.g. `messages en_US.UTF-8`), kept verbatim.
pub fn parse_language(arg_str: &str) -> CommandParseOutcome<CommandArg> {
    let p = lexer::skipwhite(arg_str, 0);
    if p >= arg_str.len() {
        return CommandParseOutcome::Ok(CommandArg::None);
    }
    CommandParseOutcome::Ok(CommandArg::String(arg_str[p..].trim_end().to_string()))
}

/// `:mapclear[!] [<buffer>]` (spec.md §4.7 `:mapclear`): the only argument
/// this front end recognizes is the `<buffer>` tag; anything else is kept
/// verbatim the same way an unrecognized map-option would be.
pub fn parse_mapclear(arg_str: &str) -> CommandParseOutcome<CommandArg> {
    let trimmed = arg_str.trim();
    if trimmed.is_empty() {
        return CommandParseOutcome::Ok(CommandArg::None);
    }
    CommandParseOutcome::Ok(CommandArg::String(trimmed.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sort_flags_and_pattern() {
        let outcome = parse_sort("iu /^#/");
        assert_eq!(outcome, CommandParseOutcome::Ok(CommandArg::Strings(vec!["iu".to_string(), "/^#/".to_string()])));
    }

    #[test]
    fn sort_with_nothing() {
        assert_eq!(parse_sort(""), CommandParseOutcome::Ok(CommandArg::Strings(vec![])));
    }

    #[test]
    fn wincmd_single_char() {
        assert_eq!(parse_wincmd("j"), CommandParseOutcome::Ok(CommandArg::Char('j')));
    }

    #[test]
    fn wincmd_missing_char_is_syntax_error() {
        assert!(matches!(parse_wincmd(""), CommandParseOutcome::NotDone(_)));
    }

    #[test]
    fn marks_name_list() {
        let outcome = parse_mark_names("a b Z");
        assert_eq!(
            outcome,
            CommandParseOutcome::Ok(CommandArg::Strings(vec!["a".to_string(), "b".to_string(), "Z".to_string()]))
        );
    }

    #[test]
    fn marks_with_no_names_lists_all() {
        assert_eq!(parse_mark_names(""), CommandParseOutcome::Ok(CommandArg::None));
    }

    #[test]
    fn winpos_two_numbers() {
        assert_eq!(parse_two_numbers("10 20"), CommandParseOutcome::Ok(CommandArg::Numbers(vec![10, 20])));
    }

    #[test]
    fn winpos_query_form_has_no_argument() {
        assert_eq!(parse_two_numbers(""), CommandParseOutcome::Ok(CommandArg::None));
    }

    #[test]
    fn redir_keeps_target_verbatim() {
        assert_eq!(parse_redir("> myfile.txt"), CommandParseOutcome::Ok(CommandArg::String("> myfile.txt".to_string())));
    }
}
