// ABOUTME: File-glob and :autocmd pattern AST types (spec.md §4.5)
//
// Grounded on examples/original_source/src/nvim/viml/parser/ex_commands.h's
// `Pattern`/`Glob` structs — a chunked pattern (`kPatLiteral`, `kPatHome`,
// `kPatBranch`, ...) chained by `next`, with `Glob` a thin wrapper adding
// shell-backtick and `` `=expr` `` expansions on top. We keep the chunk enum
// but store the chain as a `Vec` rather than an intrusive linked list.

use crate::ast::expr::ExpressionNode;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Pattern {
    /// Literal text with no special meaning.
    Literal(String),
    /// `~` — home directory expansion.
    Home,
    /// `$VAR` inside a glob/pattern.
    Environment(String),
    /// `%` — current file name.
    Current,
    /// `#` — alternate file name.
    Alternate,
    /// `#N` — buffer name by number.
    Bufname(u32),
    /// `#<N` — old file list entry by number.
    OldFile(u32),
    /// `##` — full argument list expansion.
    Arguments,
    /// `?` — single-character wildcard.
    Character,
    /// `*` — any run of characters (not crossing `/`).
    Anything,
    /// `**` — any run of characters, crossing `/`.
    AnyRecurse,
    /// `[abc]` — character collection.
    Collection(String),
    /// `{a,b,c}` — brace alternation, each alternative itself a glob chain.
    Branch(Vec<Vec<Pattern>>),
    /// `` `cmd` `` — shell backtick expansion (glob-only).
    ShellExpansion(String),
    /// `` `=expr` `` — expression expansion (glob-only).
    ExpressionExpansion(Box<ExpressionNode>),
    /// An `:autocmd` pattern list entry, kept as raw text (spec.md §4.5 —
    /// autocommand patterns use their own matching rules, not glob
    /// expansion, so there's nothing to decompose further here).
    AutocmdPattern(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum PatternType {
    Literal,
    Home,
    Environment,
    Current,
    Alternate,
    Bufname,
    OldFile,
    Arguments,
    Character,
    Anything,
    AnyRecurse,
    Collection,
    Branch,
    ShellExpansion,
    ExpressionExpansion,
    AutocmdPattern,
}

impl Pattern {
    pub fn pattern_type(&self) -> PatternType {
        match self {
            Pattern::Literal(_) => PatternType::Literal,
            Pattern::Home => PatternType::Home,
            Pattern::Environment(_) => PatternType::Environment,
            Pattern::Current => PatternType::Current,
            Pattern::Alternate => PatternType::Alternate,
            Pattern::Bufname(_) => PatternType::Bufname,
            Pattern::OldFile(_) => PatternType::OldFile,
            Pattern::Arguments => PatternType::Arguments,
            Pattern::Character => PatternType::Character,
            Pattern::Anything => PatternType::Anything,
            Pattern::AnyRecurse => PatternType::AnyRecurse,
            Pattern::Collection(_) => PatternType::Collection,
            Pattern::Branch(_) => PatternType::Branch,
            Pattern::ShellExpansion(_) => PatternType::ShellExpansion,
            Pattern::ExpressionExpansion(_) => PatternType::ExpressionExpansion,
            Pattern::AutocmdPattern(_) => PatternType::AutocmdPattern,
        }
    }
}

/// A full glob: an ordered chain of pattern chunks, e.g. `~/foo*.{c,h}`
/// lexes to `[Home, Literal("/foo"), Anything, Literal("."), Branch([[Literal("c")], [Literal("h")]])]`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Glob {
    pub chunks: Vec<Pattern>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pattern_type_matches_variant() {
        assert_eq!(Pattern::Anything.pattern_type(), PatternType::Anything);
        assert_eq!(Pattern::Bufname(3).pattern_type(), PatternType::Bufname);
    }

    #[test]
    fn branch_nests_sub_globs() {
        let p = Pattern::Branch(vec![vec![Pattern::Literal("c".into())], vec![Pattern::Literal("h".into())]]);
        if let Pattern::Branch(alts) = &p {
            assert_eq!(alts.len(), 2);
        } else {
            panic!("expected Branch");
        }
    }
}
