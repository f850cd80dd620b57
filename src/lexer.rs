// ABOUTME: Lexer primitives shared by the expression and Ex-command parsers
//
// Pure position-advancing helpers over a line (spec.md §4.1). Every helper
// takes the remaining slice of the current line and returns the end index
// reached; on failure the index is left where it started and no allocation
// happens on that path, matching the source contract.

/// Advance past spaces and tabs, returning the new offset.
pub fn skipwhite(line: &str, pos: usize) -> usize {
    let bytes = line.as_bytes();
    let mut i = pos;
    while i < bytes.len() && (bytes[i] == b' ' || bytes[i] == b'\t') {
        i += 1;
    }
    i
}

/// Advance past ASCII digits, returning the new offset.
pub fn skipdigits(line: &str, pos: usize) -> usize {
    let bytes = line.as_bytes();
    let mut i = pos;
    while i < bytes.len() && bytes[i].is_ascii_digit() {
        i += 1;
    }
    i
}

fn is_id_char(c: u8) -> bool {
    c.is_ascii_alphanumeric() || c == b'_' || c == b':' || c == b'#'
}

/// Advance while the character is a VimL identifier character. Returns
/// `None` (no progress) if the cursor did not move, matching `skip_id`'s
/// "fail by leaving the cursor unmoved" contract.
pub fn skip_id(line: &str, pos: usize) -> Option<usize> {
    let bytes = line.as_bytes();
    let mut i = pos;
    while i < bytes.len() && is_id_char(bytes[i]) {
        i += 1;
    }
    if i == pos {
        None
    } else {
        Some(i)
    }
}

/// Advance past an `$ENV`-style environment variable name (after the `$`).
pub fn find_env_end(line: &str, pos: usize) -> Option<usize> {
    let bytes = line.as_bytes();
    let mut i = pos;
    while i < bytes.len() && (bytes[i].is_ascii_alphanumeric() || bytes[i] == b'_') {
        i += 1;
    }
    if i == pos {
        None
    } else {
        Some(i)
    }
}

/// Advance past an `&option`-style option name (after the `&`), honoring the
/// `g:`/`l:` scope prefix and the 4-char `t_XX` terminal-option form.
pub fn find_option_end(line: &str, pos: usize) -> Option<usize> {
    let bytes = line.as_bytes();
    let mut i = pos;

    // optional g: or l: scope
    if i + 1 < bytes.len() && (bytes[i] == b'g' || bytes[i] == b'l') && bytes[i + 1] == b':' {
        i += 2;
    }

    // t_XX terminal option: exactly "t_" + 2 more characters
    if i + 1 < bytes.len() && bytes[i] == b't' && bytes[i + 1] == b'_' {
        let end = (i + 4).min(bytes.len());
        if end == i + 4 {
            return Some(end);
        }
    }

    let start = i;
    while i < bytes.len() && bytes[i].is_ascii_alphabetic() {
        i += 1;
    }
    if i == start {
        None
    } else {
        Some(i)
    }
}

/// Classification of a numeric literal's base, as determined by `find_nr_end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub enum NumberBase {
    Decimal,
    Octal,
    Hex,
    Float,
}

/// Classify and measure the numeric literal starting at `pos` (which must
/// point at a digit). `allow_float` controls whether a trailing
/// `.digits([eE][+-]?digits)?` promotes the result to `Float` — promotion is
/// suppressed when a third `.` or a letter would immediately follow, to keep
/// `1.2.3` (a version-like dotted number) and `1.2e` (no exponent digits)
/// from being misread.
pub fn find_nr_end(line: &str, pos: usize, allow_float: bool) -> (usize, NumberBase) {
    let bytes = line.as_bytes();
    debug_assert!(pos < bytes.len() && bytes[pos].is_ascii_digit());

    if bytes[pos] == b'0'
        && pos + 1 < bytes.len()
        && (bytes[pos + 1] == b'x' || bytes[pos + 1] == b'X')
        && pos + 2 < bytes.len()
        && bytes[pos + 2].is_ascii_hexdigit()
    {
        let mut i = pos + 2;
        while i < bytes.len() && bytes[i].is_ascii_hexdigit() {
            i += 1;
        }
        return (i, NumberBase::Hex);
    }

    let int_start = pos;
    let mut i = pos;
    while i < bytes.len() && bytes[i].is_ascii_digit() {
        i += 1;
    }
    let int_end = i;

    let is_octal = bytes[int_start] == b'0'
        && int_end > int_start + 1
        && bytes[int_start + 1..int_end].iter().all(|b| (b'0'..=b'7').contains(b));

    if allow_float && i < bytes.len() && bytes[i] == b'.' && i + 1 < bytes.len() && bytes[i + 1].is_ascii_digit() {
        let dot = i;
        let mut j = i + 1;
        while j < bytes.len() && bytes[j].is_ascii_digit() {
            j += 1;
        }
        // A third dot or a trailing letter means this isn't a float after all
        // (e.g. version numbers like 1.2.3, or 1.2x).
        let looks_like_float = !(j < bytes.len() && (bytes[j] == b'.' || bytes[j].is_ascii_alphabetic()));
        if looks_like_float {
            let mut end = j;
            if end < bytes.len() && (bytes[end] == b'e' || bytes[end] == b'E') {
                let mut k = end + 1;
                if k < bytes.len() && (bytes[k] == b'+' || bytes[k] == b'-') {
                    k += 1;
                }
                let exp_digits_start = k;
                while k < bytes.len() && bytes[k].is_ascii_digit() {
                    k += 1;
                }
                if k > exp_digits_start {
                    end = k;
                }
            }
            return (end, NumberBase::Float);
        }
        let _ = dot;
    }

    if is_octal {
        (int_end, NumberBase::Octal)
    } else {
        (int_end, NumberBase::Decimal)
    }
}

/// An owned, scanned-but-uncompiled regular expression (spec.md §4.1,
/// `get_regex`). Compilation (`vim_regcomp`) is an opaque external service
/// out of scope for this front end (spec.md §1); we only retain the source
/// text between the delimiters.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct Regex {
    pub source: String,
}

/// Consume a regex body up to (and including) `endch`, honoring `\` escapes.
/// Returns the regex and the offset just past the closing delimiter, or
/// `None` if the line ends before `endch` is found (an unterminated regex is
/// reported by the caller using `no_end_message`).
pub fn get_regex(line: &str, pos: usize, endch: u8) -> Option<(Regex, usize)> {
    let bytes = line.as_bytes();
    let mut i = pos;
    while i < bytes.len() {
        if bytes[i] == b'\\' && i + 1 < bytes.len() {
            i += 2;
            continue;
        }
        if bytes[i] == endch {
            return Some((
                Regex {
                    source: line[pos..i].to_string(),
                },
                i + 1,
            ));
        }
        i += 1;
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_skipwhite() {
        assert_eq!(skipwhite("   abc", 0), 3);
        assert_eq!(skipwhite("abc", 0), 0);
        assert_eq!(skipwhite("\t\t x", 0), 3);
    }

    #[test]
    fn test_skipdigits() {
        assert_eq!(skipdigits("123abc", 0), 3);
        assert_eq!(skipdigits("abc", 0), 0);
    }

    #[test]
    fn test_skip_id() {
        assert_eq!(skip_id("foo_bar#baz s:x", 0), Some(12));
        assert_eq!(skip_id("   x", 0), None);
    }

    #[test]
    fn test_find_env_end() {
        assert_eq!(find_env_end("HOME/foo", 0), Some(4));
        assert_eq!(find_env_end("", 0), None);
    }

    #[test]
    fn test_find_option_end_plain() {
        assert_eq!(find_option_end("ignorecase xyz", 0), Some(10));
    }

    #[test]
    fn test_find_option_end_scoped() {
        assert_eq!(find_option_end("g:ignorecase", 0), Some(12));
    }

    #[test]
    fn test_find_option_end_terminal() {
        assert_eq!(find_option_end("t_Co rest", 0), Some(4));
    }

    #[test]
    fn test_find_nr_end_decimal() {
        assert_eq!(find_nr_end("123abc", 0, false), (3, NumberBase::Decimal));
    }

    #[test]
    fn test_find_nr_end_octal() {
        assert_eq!(find_nr_end("0123 ", 0, false), (4, NumberBase::Octal));
    }

    #[test]
    fn test_find_nr_end_hex() {
        assert_eq!(find_nr_end("0x1C ", 0, false), (4, NumberBase::Hex));
    }

    #[test]
    fn test_find_nr_end_float() {
        assert_eq!(find_nr_end("3.14 ", 0, true), (4, NumberBase::Float));
        assert_eq!(find_nr_end("3.14e+10 ", 0, true), (8, NumberBase::Float));
    }

    #[test]
    fn test_find_nr_end_float_suppressed_by_dotted() {
        // 1.2.3 should not promote to float: the `.3` following would make
        // a third dot look-ahead.
        let (end, base) = find_nr_end("1.2.3", 0, true);
        assert_eq!(base, NumberBase::Decimal);
        assert_eq!(end, 1);
    }

    #[test]
    fn test_find_nr_end_float_suppressed_by_letter() {
        let (end, base) = find_nr_end("1.2x", 0, true);
        assert_eq!(base, NumberBase::Decimal);
        assert_eq!(end, 1);
    }

    #[test]
    fn test_get_regex_simple() {
        let (re, end) = get_regex("foo/bar", 0, b'/').unwrap();
        assert_eq!(re.source, "foo");
        assert_eq!(end, 4);
    }

    #[test]
    fn test_get_regex_escaped_delimiter() {
        let (re, end) = get_regex(r"foo\/bar/baz", 0, b'/').unwrap();
        assert_eq!(re.source, r"foo\/bar");
        assert_eq!(end, 9);
    }

    #[test]
    fn test_get_regex_unterminated() {
        assert!(get_regex("foo", 0, b'/').is_none());
    }
}
