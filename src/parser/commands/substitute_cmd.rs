// ABOUTME: Argument parsers for :substitute/:global (spec.md §4.7)

use crate::ast::command::{CommandArg, GlobalSpec, Replacement, SubstituteFlags, SubstituteSpec};
use crate::error::{messages, CommandParseOutcome, Diagnostic};
use crate::lexer::{self, Regex};
use crate::parser::expr;

fn is_delimiter_char(c: char) -> bool {
    !c.is_ascii_alphanumeric() && c != ' ' && c != '\t' && c != '"' && c != '|' && c != '\\'
}

/// Consumes one delimiter-separated chunk starting right after the opening
/// delimiter, honoring `\<delim>` escapes. Returns the raw text (escapes
/// kept verbatim) and the offset just past the closing delimiter, or the
/// offset at end-of-line if the delimiter is never closed.
fn take_chunk(s: &str, pos: usize, delim: char) -> (String, usize, bool) {
    let mut out = String::new();
    let mut i = pos;
    let bytes = s.as_bytes();
    while i < bytes.len() {
        let c = s[i..].chars().next().unwrap();
        if c == '\\' && i + c.len_utf8() < bytes.len() {
            let next = s[i + 1..].chars().next().unwrap();
            out.push('\\');
            out.push(next);
            i += c.len_utf8() + next.len_utf8();
            continue;
        }
        if c == delim {
            return (out, i + c.len_utf8(), true);
        }
        out.push(c);
        i += c.len_utf8();
    }
    (out, i, false)
}

/// Parses a `:substitute` replacement string into its `Replacement` items
/// (spec.md §4.7 `:substitute`): `&`/`\0` for the whole match, `\1`.."\9" for
/// capture groups, `~` for the previous replacement, case-modifier escapes,
/// `\r` for newline and `\=expr` for an expression replacement.
fn parse_replacement(text: &str) -> Vec<Replacement> {
    let mut items = Vec::new();
    let mut literal = String::new();
    let mut chars = text.char_indices().peekable();

    macro_rules! flush {
        () => {
            if !literal.is_empty() {
                items.push(Replacement::Literal(std::mem::take(&mut literal)));
            }
        };
    }

    while let Some((i, c)) = chars.next() {
        if c == '&' {
            flush!();
            items.push(Replacement::Matched);
        } else if c == '~' {
            flush!();
            items.push(Replacement::PrevSub);
        } else if c == '\\' {
            match chars.peek().copied() {
                Some((_, '0')) => {
                    flush!();
                    items.push(Replacement::Matched);
                    chars.next();
                }
                Some((_, d)) if d.is_ascii_digit() && d != '0' => {
                    flush!();
                    items.push(Replacement::Group(d as u8 - b'0'));
                    chars.next();
                }
                Some((_, 'u')) => {
                    flush!();
                    items.push(Replacement::CharUpCase);
                    chars.next();
                }
                Some((_, 'U')) => {
                    flush!();
                    items.push(Replacement::UpCase);
                    chars.next();
                }
                Some((_, 'l')) => {
                    flush!();
                    items.push(Replacement::CharDownCase);
                    chars.next();
                }
                Some((_, 'L')) => {
                    flush!();
                    items.push(Replacement::DownCase);
                    chars.next();
                }
                Some((_, 'e')) | Some((_, 'E')) => {
                    flush!();
                    items.push(Replacement::CaseEnd);
                    chars.next();
                }
                Some((_, 'r')) => {
                    flush!();
                    items.push(Replacement::NewLine);
                    chars.next();
                }
                Some((_, '=')) => {
                    flush!();
                    chars.next();
                    let rest = &text[i + 2..];
                    if let Ok((node, _end)) = expr::parse_expr(rest, 0) {
                        items.push(Replacement::Expr(Box::new(node)));
                    }
                    break;
                }
                Some((_, next)) => {
                    flush!();
                    items.push(Replacement::EscLiteral(next));
                    chars.next();
                }
                None => literal.push('\\'),
            }
        } else {
            literal.push(c);
        }
    }
    flush!();
    items
}

/// `:substitute`/`:&`/`:~` (spec.md §4.7 `:substitute`): `/pat/rep/flags
/// [count]`, any punctuation character usable as the delimiter, and an empty
/// pattern reusing the previous search.
pub fn parse_substitute(arg_str: &str, _options: &crate::config::CommandParserOptions) -> CommandParseOutcome<CommandArg> {
    let p = lexer::skipwhite(arg_str, 0);
    if p >= arg_str.len() {
        return CommandParseOutcome::Ok(CommandArg::Substitute(SubstituteSpec {
            pattern: None,
            replacement: Vec::new(),
            flags: SubstituteFlags::EMPTY,
            count: None,
        }));
    }

    let delim = arg_str[p..].chars().next().unwrap();
    if !is_delimiter_char(delim) {
        return parse_substitute_flags_only(&arg_str[p..]);
    }

    let (pattern_text, after_pattern, closed) = take_chunk(arg_str, p + delim.len_utf8(), delim);
    let pattern = if pattern_text.is_empty() { None } else { Some(Regex { source: pattern_text }) };

    if !closed {
        return CommandParseOutcome::Ok(CommandArg::Substitute(SubstituteSpec {
            pattern,
            replacement: Vec::new(),
            flags: SubstituteFlags::EMPTY,
            count: None,
        }));
    }

    let (rep_text, after_rep, _rep_closed) = take_chunk(arg_str, after_pattern, delim);
    let replacement = parse_replacement(&rep_text);

    parse_flags_and_count(arg_str, after_rep, pattern, replacement)
}

fn parse_substitute_flags_only(rest: &str) -> CommandParseOutcome<CommandArg> {
    parse_flags_and_count(rest, 0, None, Vec::new())
}

fn parse_flags_and_count(s: &str, start: usize, pattern: Option<Regex>, replacement: Vec<Replacement>) -> CommandParseOutcome<CommandArg> {
    let mut flags = SubstituteFlags::EMPTY;
    let mut i = start;
    let bytes = s.as_bytes();
    while i < bytes.len() {
        match bytes[i] as char {
            'c' => flags.insert(SubstituteFlags::CONFIRM),
            'e' => flags.insert(SubstituteFlags::NO_ERROR),
            'g' => flags.insert(SubstituteFlags::GLOBAL),
            'i' => flags.insert(SubstituteFlags::IGNORE_CASE),
            'I' => flags.insert(SubstituteFlags::MATCH_CASE),
            'n' => flags.insert(SubstituteFlags::NUMBER),
            'l' => flags.insert(SubstituteFlags::LIST),
            'p' => flags.insert(SubstituteFlags::PRINT),
            '#' => flags.insert(SubstituteFlags::HASH_NR),
            'r' => flags.insert(SubstituteFlags::RANGE_PREV),
            '&' => flags.insert(SubstituteFlags::EXPR_REPL),
            ' ' | '\t' => {}
            _ => break,
        }
        i += 1;
    }
    let count_start = lexer::skipwhite(s, i);
    let count_end = lexer::skipdigits(s, count_start);
    let count = if count_end > count_start { s[count_start..count_end].parse().ok() } else { None };

    CommandParseOutcome::Ok(CommandArg::Substitute(SubstituteSpec { pattern, replacement, flags, count }))
}

/// `:global`/`:vglobal` (spec.md §4.7 `:global`): `/pattern/{cmd}`.
pub fn parse_global(arg_str: &str) -> CommandParseOutcome<CommandArg> {
    let p = lexer::skipwhite(arg_str, 0);
    if p >= arg_str.len() {
        return CommandParseOutcome::NotDone(Diagnostic::new(messages::E474_INVALID_ARGUMENT, p));
    }
    let delim = arg_str[p..].chars().next().unwrap();
    let (pattern_text, after_pattern, closed) = take_chunk(arg_str, p + delim.len_utf8(), delim);
    if !closed {
        return CommandParseOutcome::NotDone(Diagnostic::new(messages::E15_UNCLOSED_EXPRESSION, p));
    }
    CommandParseOutcome::Ok(CommandArg::Global(GlobalSpec {
        pattern: Regex { source: pattern_text },
        command: arg_str[after_pattern..].to_string(),
    }))
}

/// `:vglobal/pattern/{cmd}` (spec.md §4.7 `:global`): `:vglobal` is
/// `:global!` under a different name, same `/pattern/{cmd}` grammar.
pub fn parse_vglobal(arg_str: &str) -> CommandParseOutcome<CommandArg> {
    parse_global(arg_str)
}

/// `:vimgrep[!] /pattern/[g][j] {file} ...` (spec.md §4.7): the pattern is
/// delimiter-quoted like `:substitute`'s, followed by optional `g` (every
/// match, not just the first per line) and `j` (don't jump to the first
/// match) flags; the file-glob argument text is kept verbatim since this
/// front end never resolves file globs against a filesystem.
pub fn parse_vimgrep(arg_str: &str) -> CommandParseOutcome<CommandArg> {
    let p = lexer::skipwhite(arg_str, 0);
    if p >= arg_str.len() {
        return CommandParseOutcome::NotDone(Diagnostic::new(messages::E474_INVALID_ARGUMENT, p));
    }
    let delim = arg_str[p..].chars().next().unwrap();
    if !is_delimiter_char(delim) {
        return CommandParseOutcome::NotDone(Diagnostic::new(messages::E474_INVALID_ARGUMENT, p));
    }
    let (pattern_text, after_pattern, closed) = take_chunk(arg_str, p + delim.len_utf8(), delim);
    if !closed {
        return CommandParseOutcome::NotDone(Diagnostic::new(messages::E15_UNCLOSED_EXPRESSION, p));
    }

    let mut i = after_pattern;
    let bytes = arg_str.as_bytes();
    let flags_start = i;
    while i < bytes.len() && matches!(bytes[i] as char, 'g' | 'j') {
        i += 1;
    }
    let pattern_flags = &arg_str[flags_start..i];

    let files = arg_str[lexer::skipwhite(arg_str, i)..].trim_end().to_string();
    let mut parts = vec![format!("/{}/{}", pattern_text, pattern_flags)];
    if !files.is_empty() {
        parts.push(files);
    }
    CommandParseOutcome::Ok(CommandArg::Strings(parts))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CommandParserOptions;

    #[test]
    fn substitute_basic() {
        let opts = CommandParserOptions::default();
        let outcome = parse_substitute("/foo/bar/g", &opts);
        match outcome {
            CommandParseOutcome::Ok(CommandArg::Substitute(spec)) => {
                assert_eq!(spec.pattern.unwrap().source, "foo");
                assert_eq!(spec.replacement, vec![Replacement::Literal("bar".to_string())]);
                assert!(spec.flags.contains(SubstituteFlags::GLOBAL));
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn substitute_alternate_delimiter() {
        let opts = CommandParserOptions::default();
        let outcome = parse_substitute("#/usr#/opt#", &opts);
        match outcome {
            CommandParseOutcome::Ok(CommandArg::Substitute(spec)) => {
                assert_eq!(spec.pattern.unwrap().source, "/usr");
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn substitute_replacement_with_group_refs() {
        let opts = CommandParserOptions::default();
        let outcome = parse_substitute(r"/\(a\)\(b\)/\2\1/", &opts);
        match outcome {
            CommandParseOutcome::Ok(CommandArg::Substitute(spec)) => {
                assert_eq!(spec.replacement, vec![Replacement::Group(2), Replacement::Group(1)]);
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn substitute_count_after_flags() {
        let opts = CommandParserOptions::default();
        let outcome = parse_substitute("/a/b/g 3", &opts);
        match outcome {
            CommandParseOutcome::Ok(CommandArg::Substitute(spec)) => assert_eq!(spec.count, Some(3)),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn substitute_n_and_l_flags_are_distinct() {
        let opts = CommandParserOptions::default();
        let outcome = parse_substitute("/a/b/nl", &opts);
        match outcome {
            CommandParseOutcome::Ok(CommandArg::Substitute(spec)) => {
                assert!(spec.flags.contains(SubstituteFlags::NUMBER));
                assert!(spec.flags.contains(SubstituteFlags::LIST));
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn global_basic() {
        let outcome = parse_global("/TODO/d");
        match outcome {
            CommandParseOutcome::Ok(CommandArg::Global(g)) => {
                assert_eq!(g.pattern.source, "TODO");
                assert_eq!(g.command, "d");
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn vglobal_reuses_global_grammar() {
        assert_eq!(parse_vglobal("/TODO/d"), parse_global("/TODO/d"));
    }

    #[test]
    fn vimgrep_pattern_flags_and_files() {
        let outcome = parse_vimgrep("/foo/gj **/*.rs");
        match outcome {
            CommandParseOutcome::Ok(CommandArg::Strings(parts)) => {
                assert_eq!(parts, vec!["/foo/gj".to_string(), "**/*.rs".to_string()]);
            }
            other => panic!("unexpected {:?}", other),
        }
    }
}
