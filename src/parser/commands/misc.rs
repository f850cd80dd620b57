// ABOUTME: Argument parsers for :put/:normal/:highlight (spec.md §4.7)

use crate::ast::command::{CommandArg, HighlightColor};
use crate::error::CommandParseOutcome;
use crate::lexer;

/// `:put` (spec.md §4.7 `:put`): the register is already captured on the
/// owning `CommandNode::register` by `parser::sequence`, so there is nothing
/// left for the argument itself to carry.
pub fn parse_put(_arg_str: &str) -> CommandParseOutcome<CommandArg> {
    CommandParseOutcome::Ok(CommandArg::None)
}

/// `:normal[!] {commands}` (spec.md §4.7 `:normal`): the keystrokes are kept
/// verbatim — they are not VimL and are never re-parsed (spec.md §1
/// Non-goals exclude execution, and there is nothing to parse here anyway).
pub fn parse_normal(arg_str: &str) -> CommandParseOutcome<CommandArg> {
    CommandParseOutcome::Ok(CommandArg::String(arg_str.to_string()))
}

fn parse_color(value: &str) -> HighlightColor {
    if value.eq_ignore_ascii_case("none") || value == "NONE" {
        HighlightColor::None
    } else if value.eq_ignore_ascii_case("fg") {
        HighlightColor::Fg
    } else if value.eq_ignore_ascii_case("bg") {
        HighlightColor::Bg
    } else if let Some(hex) = value.strip_prefix('#') {
        if hex.len() == 6 {
            let r = u8::from_str_radix(&hex[0..2], 16);
            let g = u8::from_str_radix(&hex[2..4], 16);
            let b = u8::from_str_radix(&hex[4..6], 16);
            if let (Ok(red), Ok(green), Ok(blue)) = (r, g, b) {
                return HighlightColor::Rgb { red, green, blue };
            }
        }
        HighlightColor::Name(value.to_string())
    } else if let Ok(idx) = value.parse::<u8>() {
        HighlightColor::Idx(idx)
    } else {
        HighlightColor::Name(value.to_string())
    }
}

/// `:highlight[!] {group} {key}={value} ...` (spec.md §4.7 `:highlight`).
/// Parsed as a flat string list (`name=value`), leaving color classification
/// to the printer/translator by way of `HighlightColor` — a bare
/// `:highlight` (or `:highlight {group}` alone) lists current settings, kept
/// as `CommandArg::Strings` either way so both shapes round-trip.
pub fn parse_highlight(arg_str: &str) -> CommandParseOutcome<CommandArg> {
    let p = lexer::skipwhite(arg_str, 0);
    if p >= arg_str.len() {
        return CommandParseOutcome::Ok(CommandArg::None);
    }
    let mut tokens = Vec::new();
    for word in arg_str[p..].split_whitespace() {
        match word.split_once('=') {
            Some((key, value)) => {
                let color = parse_color(value);
                tokens.push(format!("{}={}", key, describe_color(&color)));
            }
            None => tokens.push(word.to_string()),
        }
    }
    CommandParseOutcome::Ok(CommandArg::Strings(tokens))
}

fn describe_color(color: &HighlightColor) -> String {
    match color {
        HighlightColor::Name(n) => n.clone(),
        HighlightColor::Rgb { red, green, blue } => format!("#{:02x}{:02x}{:02x}", red, green, blue),
        HighlightColor::Idx(i) => i.to_string(),
        HighlightColor::Fg => "fg".to_string(),
        HighlightColor::Bg => "bg".to_string(),
        HighlightColor::None => "NONE".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normal_keeps_keystrokes_verbatim() {
        assert_eq!(parse_normal("dd"), CommandParseOutcome::Ok(CommandArg::String("dd".to_string())));
    }

    #[test]
    fn highlight_parses_key_value_pairs() {
        let outcome = parse_highlight("Comment ctermfg=grey guifg=#808080");
        match outcome {
            CommandParseOutcome::Ok(CommandArg::Strings(tokens)) => {
                assert_eq!(tokens[0], "Comment");
                assert_eq!(tokens[1], "ctermfg=grey");
                assert_eq!(tokens[2], "guifg=#808080");
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn put_has_no_argument() {
        assert_eq!(parse_put(""), CommandParseOutcome::Ok(CommandArg::None));
    }
}
