// ABOUTME: File-glob and :autocmd pattern parser (spec.md §4.4)

use crate::ast::pattern::{Glob, Pattern};
use crate::error::ExprParseError;
use crate::lexer;
use crate::parser::expr;

type PResult<T> = Result<(T, usize), ExprParseError>;

fn peek(line: &str, pos: usize) -> Option<char> {
    line[pos..].chars().next()
}

/// Escapes that lose their special meaning when preceded by `\` inside a
/// pattern literal (spec.md §4.4).
const SPECIAL_CHARS: &str = "`#*?%\\[{}]$ \t";

/// `get_pattern(is_branch, is_glob)`: parse one chunk of a glob/pattern.
/// `is_branch` restricts `,`/`}` from being consumed as literals (they
/// terminate the enclosing `{a,b,c}` branch instead); `is_glob` enables the
/// glob-only backtick expansions.
pub fn get_pattern(line: &str, pos: usize, is_branch: bool, is_glob: bool) -> PResult<Pattern> {
    match peek(line, pos) {
        None => Err(expr::err("E15: Unexpected end of pattern", pos)),
        Some('~') if pos == 0 => Ok((Pattern::Home, pos + 1)),
        Some('%') => Ok((Pattern::Current, pos + 1)),
        Some('#') => {
            if line[pos..].starts_with("##") {
                Ok((Pattern::Arguments, pos + 2))
            } else if let Some(rest) = line[pos + 1..].strip_prefix('<') {
                let end = rest.find(|c: char| !c.is_ascii_digit()).map(|i| pos + 2 + i).unwrap_or(line.len());
                let n: u32 = line[pos + 2..end].parse().unwrap_or(0);
                Ok((Pattern::OldFile(n), end))
            } else {
                let end = lexer::skipdigits(line, pos + 1);
                if end > pos + 1 {
                    let n: u32 = line[pos + 1..end].parse().unwrap_or(0);
                    Ok((Pattern::Bufname(n), end))
                } else {
                    Ok((Pattern::Alternate, pos + 1))
                }
            }
        }
        Some('*') => {
            if line[pos..].starts_with("**") {
                Ok((Pattern::AnyRecurse, pos + 2))
            } else {
                Ok((Pattern::Anything, pos + 1))
            }
        }
        Some('?') => Ok((Pattern::Character, pos + 1)),
        Some('[') => match line[pos..].find(']') {
            Some(rel) => Ok((Pattern::Collection(line[pos + 1..pos + rel].to_string()), pos + rel + 1)),
            None => Ok((Pattern::Literal(line[pos..pos + 1].to_string()), pos + 1)),
        },
        Some('{') => parse_branch(line, pos),
        Some('$') => match lexer::find_env_end(line, pos + 1) {
            Some(end) => Ok((Pattern::Environment(line[pos + 1..end].to_string()), end)),
            None => Ok((Pattern::Literal("$".to_string()), pos + 1)),
        },
        Some('`') if is_glob => parse_backtick(line, pos),
        Some(',') if is_branch => Err(expr::err("branch separator", pos)),
        Some('}') if is_branch => Err(expr::err("branch terminator", pos)),
        Some(_) => parse_literal_run(line, pos, is_branch),
    }
}

fn parse_literal_run(line: &str, pos: usize, is_branch: bool) -> PResult<Pattern> {
    let mut text = String::new();
    let mut i = pos;
    let bytes = line.as_bytes();
    while i < bytes.len() {
        let c = line[i..].chars().next().unwrap();
        if c == '\\' && i + 1 < bytes.len() {
            let next = line[i + 1..].chars().next().unwrap();
            if SPECIAL_CHARS.contains(next) {
                text.push(next);
                i += 1 + next.len_utf8();
                continue;
            }
        }
        if "~%#*?[{$`".contains(c) || (is_branch && (c == ',' || c == '}')) {
            break;
        }
        text.push(c);
        i += c.len_utf8();
    }
    if text.is_empty() {
        // Nothing literal to take and nothing else matched: consume one
        // character so the caller always makes progress.
        let c = line[pos..].chars().next().unwrap();
        return Ok((Pattern::Literal(c.to_string()), pos + c.len_utf8()));
    }
    Ok((Pattern::Literal(text), i))
}

fn parse_branch(line: &str, pos: usize) -> PResult<Pattern> {
    let mut p = pos + 1;
    let mut alternatives = Vec::new();
    let mut current = Vec::new();
    loop {
        match peek(line, p) {
            Some('}') => {
                alternatives.push(current);
                return Ok((Pattern::Branch(alternatives), p + 1));
            }
            Some(',') => {
                alternatives.push(std::mem::take(&mut current));
                p += 1;
            }
            None => {
                // Unterminated branch falls back to a literal `{`.
                return Ok((Pattern::Literal("{".to_string()), pos + 1));
            }
            _ => match get_pattern(line, p, true, false) {
                Ok((chunk, next)) => {
                    current.push(chunk);
                    p = next;
                }
                Err(_) => {
                    alternatives.push(current);
                    return Ok((Pattern::Branch(alternatives), p));
                }
            },
        }
    }
}

fn parse_backtick(line: &str, pos: usize) -> PResult<Pattern> {
    if line[pos..].starts_with("`=") {
        let (expr, end) = expr::parse_expr(line, pos + 2)?;
        let p = end;
        if peek(line, p) == Some('`') {
            return Ok((crate::ast::pattern::Pattern::ExpressionExpansion(Box::new(expr)), p + 1));
        }
        return Err(expr::err("E15: Unterminated expression glob", p));
    }
    match line[pos + 1..].find('`') {
        Some(rel) => Ok((Pattern::ShellExpansion(line[pos + 1..pos + 1 + rel].to_string()), pos + 2 + rel)),
        None => Ok((Pattern::Literal("`".to_string()), pos + 1)),
    }
}

/// `parse_files`: loop `get_pattern` chunks, separated by whitespace, into
/// one `Glob` per whitespace-delimited filename argument.
pub fn parse_files(line: &str, pos: usize) -> (Vec<Glob>, usize) {
    let mut globs = Vec::new();
    let mut p = lexer::skipwhite(line, pos);
    while p < line.len() {
        let mut chunks = Vec::new();
        loop {
            match peek(line, p) {
                None => break,
                Some(c) if c == ' ' || c == '\t' => break,
                _ => match get_pattern(line, p, false, true) {
                    Ok((chunk, next)) => {
                        chunks.push(chunk);
                        p = next;
                    }
                    Err(_) => break,
                },
            }
        }
        if !chunks.is_empty() {
            globs.push(Glob { chunks });
        }
        p = lexer::skipwhite(line, p);
    }
    (globs, p)
}

/// `get_comma_separated_patterns`, used by `:autocmd` — patterns separated
/// by `,`, kept as raw text chunks (spec.md §4.5 — autocmd matching is its
/// own grammar, not glob expansion).
pub fn get_comma_separated_patterns(line: &str, pos: usize) -> (Vec<Pattern>, usize) {
    let mut patterns = Vec::new();
    let mut p = lexer::skipwhite(line, pos);
    loop {
        let start = p;
        while p < line.len() && !matches!(peek(line, p), Some(',') | Some(' ') | Some('\t') | None) {
            p += 1;
        }
        if p > start {
            patterns.push(Pattern::AutocmdPattern(line[start..p].to_string()));
        }
        if peek(line, p) == Some(',') {
            p += 1;
            continue;
        }
        break;
    }
    (patterns, p)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn literal_run_stops_at_special_char() {
        let (pat, end) = get_pattern("foo*bar", 0, false, false).unwrap();
        assert_eq!(pat, Pattern::Literal("foo".to_string()));
        assert_eq!(end, 3);
    }

    #[test]
    fn double_star_is_any_recurse() {
        let (pat, end) = get_pattern("**/x", 0, false, false).unwrap();
        assert_eq!(pat, Pattern::AnyRecurse);
        assert_eq!(end, 2);
    }

    #[test]
    fn branch_collects_alternatives() {
        let (pat, end) = get_pattern("{c,h}", 0, false, false).unwrap();
        match pat {
            Pattern::Branch(alts) => assert_eq!(alts.len(), 2),
            other => panic!("unexpected {:?}", other),
        }
        assert_eq!(end, 5);
    }

    #[test]
    fn parse_files_splits_on_whitespace() {
        let (globs, end) = parse_files("a.txt b.txt", 0);
        assert_eq!(globs.len(), 2);
        assert_eq!(end, 11);
    }

    #[test]
    fn comma_separated_autocmd_patterns() {
        let (patterns, end) = get_comma_separated_patterns("*.rs,*.toml", 0);
        assert_eq!(patterns.len(), 2);
        assert_eq!(end, 11);
    }
}
