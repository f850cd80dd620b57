// ABOUTME: Ex-command address and range parser (spec.md §4.5)

use crate::ast::address::{Address, AddressFollowup, AddressLink, Range};
use crate::config::CommandParserOptions;
use crate::error::ExprParseError;
use crate::lexer;

fn peek(line: &str, pos: usize) -> Option<char> {
    line[pos..].chars().next()
}

/// `get_address`: classify a single address by its first character.
/// Returns `None` (no progress) when there is no address at `pos` at all —
/// this is not an error, just "no address was written here".
pub fn get_address(line: &str, pos: usize) -> Option<(Address, usize)> {
    match peek(line, pos) {
        Some(c) if c.is_ascii_digit() => {
            let end = lexer::skipdigits(line, pos);
            let n: u64 = line[pos..end].parse().unwrap_or(0);
            Some((Address::Fixed(n), end))
        }
        Some('$') => Some((Address::End, pos + 1)),
        Some('.') => Some((Address::Current, pos + 1)),
        Some('\'') => peek(line, pos + 1).map(|m| (Address::Mark(m), pos + 2)),
        Some('/') => lexer::get_regex(line, pos + 1, b'/').map(|(re, end)| (Address::ForwardSearch(re), end)),
        Some('?') => lexer::get_regex(line, pos + 1, b'?').map(|(re, end)| (Address::BackwardSearch(re), end)),
        Some('\\') => match peek(line, pos + 1) {
            Some('/') => Some((Address::ForwardPreviousSearch, pos + 2)),
            Some('?') => Some((Address::BackwardPreviousSearch, pos + 2)),
            Some('&') => Some((Address::SubstituteSearch, pos + 2)),
            _ => None,
        },
        _ => None,
    }
}

/// `get_address_followups`: consume a chain of `+N`/`-N` shifts or
/// `/pat/`/`?pat?` pattern followups.
pub fn get_address_followups(line: &str, pos: usize) -> Result<(Vec<AddressFollowup>, usize), ExprParseError> {
    let mut followups = Vec::new();
    let mut p = pos;
    loop {
        let skip = lexer::skipwhite(line, p);
        match peek(line, skip) {
            Some('+') | Some('-') => {
                let negative = peek(line, skip) == Some('-');
                let digits_start = skip + 1;
                let digits_end = lexer::skipdigits(line, digits_start);
                let magnitude: i64 = if digits_end > digits_start {
                    line[digits_start..digits_end].parse().unwrap_or(1)
                } else {
                    1
                };
                let shift = if negative { -magnitude } else { magnitude };
                followups.push(AddressFollowup::Shift(shift));
                p = digits_end;
            }
            Some('/') => match lexer::get_regex(line, skip + 1, b'/') {
                Some((re, end)) => {
                    followups.push(AddressFollowup::ForwardPattern(re));
                    p = end;
                }
                None => return Err(crate::parser::expr::err(crate::error::messages::E15_UNCLOSED_EXPRESSION, skip)),
            },
            Some('?') => match lexer::get_regex(line, skip + 1, b'?') {
                Some((re, end)) => {
                    followups.push(AddressFollowup::BackwardPattern(re));
                    p = end;
                }
                None => return Err(crate::parser::expr::err(crate::error::messages::E15_UNCLOSED_EXPRESSION, skip)),
            },
            _ => break,
        }
    }
    Ok((followups, p))
}

/// `parse_range`: repeatedly parse an address plus its followups, separated
/// by `,`/`;`. A bare `%` expands to `1,$`; a bare `*` expands to `'<,'>`
/// unless `cpo*` is set (spec.md §4.5).
pub fn parse_range(line: &str, pos: usize, options: &CommandParserOptions) -> Result<(Range, usize), ExprParseError> {
    let p = lexer::skipwhite(line, pos);
    if peek(line, p) == Some('%') {
        return Ok((
            Range {
                links: vec![
                    AddressLink {
                        address: Address::Fixed(1),
                        followups: Vec::new(),
                        setpos: false,
                    },
                    AddressLink {
                        address: Address::End,
                        followups: Vec::new(),
                        setpos: false,
                    },
                ],
            },
            p + 1,
        ));
    }
    if peek(line, p) == Some('*') && !options.cpo_star() {
        return Ok((
            Range {
                links: vec![
                    AddressLink {
                        address: Address::Mark('<'),
                        followups: Vec::new(),
                        setpos: false,
                    },
                    AddressLink {
                        address: Address::Mark('>'),
                        followups: Vec::new(),
                        setpos: false,
                    },
                ],
            },
            p + 1,
        ));
    }

    let mut links = Vec::new();
    let mut p = p;
    loop {
        let address_start = lexer::skipwhite(line, p);
        let (address, after_addr) = get_address(line, address_start).unwrap_or((Address::Missing, address_start));
        let (followups, after_followups) = get_address_followups(line, after_addr)?;
        let after_ws = lexer::skipwhite(line, after_followups);
        let setpos = peek(line, after_ws) == Some(';');
        let has_content = !matches!(address, Address::Missing) || !followups.is_empty();
        if has_content || !links.is_empty() {
            links.push(AddressLink { address, followups, setpos });
        }
        match peek(line, after_ws) {
            Some(',') | Some(';') => {
                p = after_ws + 1;
            }
            _ => {
                p = after_followups;
                break;
            }
        }
    }
    Ok((Range { links }, p))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bare_percent_expands_to_full_range() {
        let opts = CommandParserOptions::default();
        let (range, end) = parse_range("%", 0, &opts).unwrap();
        assert_eq!(range.links.len(), 2);
        assert_eq!(range.links[0].address, Address::Fixed(1));
        assert_eq!(range.links[1].address, Address::End);
        assert_eq!(end, 1);
    }

    #[test]
    fn fixed_comma_end_range() {
        let opts = CommandParserOptions::default();
        let (range, _) = parse_range("10,$", 0, &opts).unwrap();
        assert_eq!(range.links.len(), 2);
        assert_eq!(range.links[0].address, Address::Fixed(10));
        assert_eq!(range.links[1].address, Address::End);
    }

    #[test]
    fn semicolon_sets_setpos() {
        let opts = CommandParserOptions::default();
        let (range, _) = parse_range("1;$", 0, &opts).unwrap();
        assert!(range.links[0].setpos);
        assert!(!range.links[1].setpos);
    }

    #[test]
    fn shift_followup_on_search() {
        let opts = CommandParserOptions::default();
        let (range, _) = parse_range("/pat/+2", 0, &opts).unwrap();
        assert_eq!(range.links[0].followups.len(), 1);
        assert!(matches!(range.links[0].followups[0], AddressFollowup::Shift(2)));
    }
}
