// ABOUTME: Syntax highlighter for the REPL with color support
// Implements rustyline's Highlighter trait to provide ANSI color codes
// for VimL syntax elements while preserving display width

use rustyline::completion::Completer;
use rustyline::highlight::{CmdKind, Highlighter};
use rustyline::hint::Hinter;
use rustyline::validate::Validator;
use rustyline::Helper;
use std::borrow::Cow;
use std::collections::HashSet;

// ANSI color codes (3-bit/4-bit colors for maximum terminal compatibility)
const COLOR_RESET: &str = "\x1b[0m";
const COLOR_COMMAND: &str = "\x1b[1;35m"; // Bold magenta
const COLOR_MODIFIER: &str = "\x1b[36m"; // Cyan
const COLOR_NUMBER: &str = "\x1b[33m"; // Yellow
const COLOR_STRING: &str = "\x1b[32m"; // Green
const COLOR_COMMENT: &str = "\x1b[90m"; // Bright black (gray)
const COLOR_SIGIL: &str = "\x1b[1;33m"; // Bold yellow — `&opt`, `$ENV`, `@reg`

/// Rustyline helper providing syntax-aware color highlighting for one line
/// of VimL entered at the `vimlfe>` prompt.
pub struct ViHelper;

impl ViHelper {
    pub fn new() -> Self {
        ViHelper
    }
}

impl Default for ViHelper {
    fn default() -> Self {
        Self::new()
    }
}

impl Helper for ViHelper {}

impl Completer for ViHelper {
    type Candidate = String;
}

impl Hinter for ViHelper {
    type Hint = String;
}

impl Validator for ViHelper {}

impl Highlighter for ViHelper {
    fn highlight<'l>(&self, line: &'l str, _pos: usize) -> Cow<'l, str> {
        let commands = ex_commands();
        let modifiers = ex_modifiers();
        let highlighted = highlight_line(line, &commands, &modifiers);

        if highlighted == line {
            Cow::Borrowed(line)
        } else {
            Cow::Owned(highlighted)
        }
    }

    fn highlight_char(&self, _line: &str, _pos: usize, _kind: CmdKind) -> bool {
        true
    }
}

/// Tokenizes one line and applies color codes. Mirrors only enough of the
/// real lexer (spec.md §4.1) to colorize — it never has to agree with the
/// parser about where a token ends, since a wrong guess here only costs a
/// dropped color, not a parse error.
fn highlight_line(line: &str, commands: &HashSet<&'static str>, modifiers: &HashSet<&'static str>) -> String {
    let mut result = String::new();
    let chars: Vec<char> = line.chars().collect();
    let mut i = 0;
    let mut at_command_start = true;

    while i < chars.len() {
        match chars[i] {
            '"' if at_command_start => {
                // A leading `"` starts a whole-line comment (spec.md §4.8).
                result.push_str(COLOR_COMMENT);
                result.extend(&chars[i..]);
                result.push_str(COLOR_RESET);
                i = chars.len();
            }

            '"' | '\'' => {
                let quote = chars[i];
                result.push_str(COLOR_STRING);
                result.push(quote);
                i += 1;
                while i < chars.len() {
                    if quote == '"' && chars[i] == '\\' && i + 1 < chars.len() {
                        result.push(chars[i]);
                        result.push(chars[i + 1]);
                        i += 2;
                        continue;
                    }
                    if chars[i] == quote {
                        result.push(quote);
                        i += 1;
                        break;
                    }
                    result.push(chars[i]);
                    i += 1;
                }
                result.push_str(COLOR_RESET);
                at_command_start = false;
            }

            '&' | '$' | '@' => {
                result.push_str(COLOR_SIGIL);
                result.push(chars[i]);
                i += 1;
                while i < chars.len() && is_name_char(chars[i]) {
                    result.push(chars[i]);
                    i += 1;
                }
                result.push_str(COLOR_RESET);
                at_command_start = false;
            }

            '0'..='9' => {
                let start = i;
                while i < chars.len() && (chars[i].is_ascii_alphanumeric() || chars[i] == '.') {
                    i += 1;
                }
                let text: String = chars[start..i].iter().collect();
                result.push_str(COLOR_NUMBER);
                result.push_str(&text);
                result.push_str(COLOR_RESET);
                at_command_start = false;
            }

            ' ' | '\t' => {
                result.push(chars[i]);
                i += 1;
            }

            '|' => {
                result.push(chars[i]);
                i += 1;
                at_command_start = true;
            }

            c if at_command_start && (c.is_ascii_alphabetic() || c == ':' || c == '!') => {
                let start = i;
                while i < chars.len() && (chars[i].is_ascii_alphanumeric() || chars[i] == ':' || chars[i] == '!' || chars[i] == '#') {
                    i += 1;
                }
                let word: String = chars[start..i].iter().collect();
                let bare = word.trim_start_matches(':').trim_end_matches('!');
                if modifiers.contains(bare) {
                    result.push_str(COLOR_MODIFIER);
                    result.push_str(&word);
                    result.push_str(COLOR_RESET);
                } else if commands.contains(bare) {
                    result.push_str(COLOR_COMMAND);
                    result.push_str(&word);
                    result.push_str(COLOR_RESET);
                    at_command_start = false;
                } else {
                    result.push_str(&word);
                    at_command_start = false;
                }
            }

            _ => {
                result.push(chars[i]);
                i += 1;
                at_command_start = false;
            }
        }
    }

    result
}

fn is_name_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_' || c == ':' || c == '#'
}

/// Built-in Ex command names worth highlighting distinctly — not
/// exhaustive, just the ones a user is likely to type interactively.
fn ex_commands() -> HashSet<&'static str> {
    [
        "echo", "echon", "echomsg", "let", "unlet", "lockvar", "unlockvar", "if", "elseif", "else", "endif", "while", "endwhile", "for", "endfor",
        "break", "continue", "function", "endfunction", "return", "try", "catch", "finally", "endtry", "call", "execute", "normal", "map", "nmap",
        "vmap", "imap", "noremap", "unmap", "menu", "unmenu", "autocmd", "augroup", "command", "delcommand", "set", "substitute", "global", "vglobal",
        "edit", "write", "quit", "sort", "source", "syntax", "highlight",
    ]
    .iter()
    .copied()
    .collect()
}

/// Modifier commands (spec.md §3 "Modifier command") highlighted apart from
/// ordinary commands since their target lives in `children`, not `next`.
fn ex_modifiers() -> HashSet<&'static str> {
    ["silent", "verbose", "debug", "sandbox"].iter().copied().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn highlights_command_name() {
        let out = highlight_line("echo 1", &ex_commands(), &ex_modifiers());
        assert!(out.contains(COLOR_COMMAND));
    }

    #[test]
    fn highlights_string_literal() {
        let out = highlight_line("echo \"hi\"", &ex_commands(), &ex_modifiers());
        assert!(out.contains(COLOR_STRING));
    }

    #[test]
    fn highlights_leading_comment_whole_line() {
        let out = highlight_line("\" a note", &ex_commands(), &ex_modifiers());
        assert!(out.contains(COLOR_COMMENT));
    }

    #[test]
    fn highlights_number() {
        let out = highlight_line("echo 42", &ex_commands(), &ex_modifiers());
        assert!(out.contains(COLOR_NUMBER));
    }

    #[test]
    fn highlights_option_sigil() {
        let out = highlight_line("echo &magic", &ex_commands(), &ex_modifiers());
        assert!(out.contains(COLOR_SIGIL));
    }

    #[test]
    fn highlights_modifier_distinctly() {
        let out = highlight_line("silent echo 1", &ex_commands(), &ex_modifiers());
        assert!(out.contains(COLOR_MODIFIER));
        assert!(out.contains(COLOR_COMMAND));
    }
}
