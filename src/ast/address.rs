// ABOUTME: Ex-command address and range AST types (spec.md §4.4)
//
// Grounded on examples/original_source/src/nvim/viml/parser/ex_commands.h's
// `Address`/`AddressFollowup`/`Range` structs. The original keeps `followups`
// as a singly-linked list and `Range` as a chain of `Address`es joined by a
// `next` pointer plus a `setpos` bool on each link; we flatten both into
// `Vec`s, since nothing here needs to splice a link out of the middle of a
// chain the way the C editor's command dispatcher occasionally does.

use crate::lexer::Regex;
use serde::Serialize;

/// `10/abc/` — the `+10`/`/abc/` tail following the first address token.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum AddressFollowup {
    /// `/pattern/`, searching forward from the address so far.
    ForwardPattern(Regex),
    /// `?pattern?`, searching backward.
    BackwardPattern(Regex),
    /// `+N` / `-N` (signed; `-` with no digits is `-1`).
    Shift(i64),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum AddressFollowupType {
    ForwardPattern,
    BackwardPattern,
    Shift,
}

impl AddressFollowup {
    pub fn followup_type(&self) -> AddressFollowupType {
        match self {
            AddressFollowup::ForwardPattern(_) => AddressFollowupType::ForwardPattern,
            AddressFollowup::BackwardPattern(_) => AddressFollowupType::BackwardPattern,
            AddressFollowup::Shift(_) => AddressFollowupType::Shift,
        }
    }
}

/// One Ex address (spec.md §4.4), e.g. the `.`, `$`, `'t`, `/pat/` or `10` in
/// `:10,$print` — followups (`+1` etc.) apply after the base address is
/// resolved.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Address {
    /// No address was written at all (e.g. a bare `:print`).
    Missing,
    /// `10`
    Fixed(u64),
    /// `$`
    End,
    /// `.`
    Current,
    /// `'t`
    Mark(char),
    /// `/pattern/`
    ForwardSearch(Regex),
    /// `?pattern?`
    BackwardSearch(Regex),
    /// `\/` — repeat the last forward search pattern.
    ForwardPreviousSearch,
    /// `\?` — repeat the last backward search pattern.
    BackwardPreviousSearch,
    /// `\&` — repeat the last `:substitute` pattern.
    SubstituteSearch,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum AddressType {
    Missing,
    Fixed,
    End,
    Current,
    Mark,
    ForwardSearch,
    BackwardSearch,
    ForwardPreviousSearch,
    BackwardPreviousSearch,
    SubstituteSearch,
}

impl Address {
    pub fn address_type(&self) -> AddressType {
        match self {
            Address::Missing => AddressType::Missing,
            Address::Fixed(_) => AddressType::Fixed,
            Address::End => AddressType::End,
            Address::Current => AddressType::Current,
            Address::Mark(_) => AddressType::Mark,
            Address::ForwardSearch(_) => AddressType::ForwardSearch,
            Address::BackwardSearch(_) => AddressType::BackwardSearch,
            Address::ForwardPreviousSearch => AddressType::ForwardPreviousSearch,
            Address::BackwardPreviousSearch => AddressType::BackwardPreviousSearch,
            Address::SubstituteSearch => AddressType::SubstituteSearch,
        }
    }
}

/// One link of an Ex range, e.g. each of `10`, `/pat/+1`, `$` in
/// `10,/pat/+1,$`. `setpos` marks a `;`-separated link, which re-anchors the
/// current line to this address before the next one is resolved (spec.md
/// §4.4 edge cases).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AddressLink {
    pub address: Address,
    pub followups: Vec<AddressFollowup>,
    pub setpos: bool,
}

/// A full Ex range: zero or more comma/semicolon-separated addresses. An
/// empty `links` vec means no range was written at all.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Range {
    pub links: Vec<AddressLink>,
}

impl Range {
    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_range_reports_empty() {
        assert!(Range::default().is_empty());
    }

    #[test]
    fn address_type_matches_variant() {
        assert_eq!(Address::Mark('t').address_type(), AddressType::Mark);
        assert_eq!(Address::End.address_type(), AddressType::End);
    }
}
