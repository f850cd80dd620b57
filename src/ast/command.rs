// ABOUTME: Ex-command AST types (spec.md §4.6)
//
// Grounded on examples/original_source/src/nvim/viml/parser/ex_commands.h's
// `CommandNode`, whose single struct carries every command's fields through
// a `union command_argument` keyed by `type`. We split that union into a
// `CommandArg` sum type per argument kind and keep only the fields each
// command actually has, rather than one struct with thirty mostly-unused
// members.

use crate::ast::address::Range;
use crate::ast::expr::ExpressionNode;
use crate::ast::pattern::{Glob, Pattern};
use serde::Serialize;

/// A small closed bitset, built the same plain-`const`-shift way as
/// `config.rs`'s `poc` module rather than pulling in the `bitflags` crate
/// for these few, never-extended flag sets (see `DESIGN.md`).
macro_rules! flagset {
    ($(#[$meta:meta])* pub struct $name:ident : $repr:ty { $(const $variant:ident = $value:expr;)* }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
        pub struct $name(pub $repr);

        #[allow(dead_code)]
        impl $name {
            $(pub const $variant: $name = $name($value);)*
            pub const EMPTY: $name = $name(0);

            pub fn contains(self, other: $name) -> bool {
                self.0 & other.0 == other.0
            }

            pub fn insert(&mut self, other: $name) {
                self.0 |= other.0;
            }
        }

        impl std::ops::BitOr for $name {
            type Output = $name;
            fn bitor(self, rhs: $name) -> $name {
                $name(self.0 | rhs.0)
            }
        }
    };
}

/// `kRep*` replacement-string item kinds from a `:substitute` replacement
/// (spec.md §4.6 `:substitute`).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Replacement {
    Literal(String),
    Expr(Box<ExpressionNode>),
    EscLiteral(char),
    Escaped(char),
    /// `\0` / `&` — the whole matched text.
    Matched,
    /// `\1`.."\9" — a capture group, always in `1..=9`.
    Group(u8),
    /// `~` — the previous substitution's replacement string.
    PrevSub,
    CharUpCase,
    UpCase,
    CharDownCase,
    DownCase,
    CaseEnd,
    NewLine,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ReplacementType {
    Literal,
    Expr,
    EscLiteral,
    Escaped,
    Matched,
    Group,
    PrevSub,
    CharUpCase,
    UpCase,
    CharDownCase,
    DownCase,
    CaseEnd,
    NewLine,
}

impl Replacement {
    pub fn replacement_type(&self) -> ReplacementType {
        match self {
            Replacement::Literal(_) => ReplacementType::Literal,
            Replacement::Expr(_) => ReplacementType::Expr,
            Replacement::EscLiteral(_) => ReplacementType::EscLiteral,
            Replacement::Escaped(_) => ReplacementType::Escaped,
            Replacement::Matched => ReplacementType::Matched,
            Replacement::Group(_) => ReplacementType::Group,
            Replacement::PrevSub => ReplacementType::PrevSub,
            Replacement::CharUpCase => ReplacementType::CharUpCase,
            Replacement::UpCase => ReplacementType::UpCase,
            Replacement::CharDownCase => ReplacementType::CharDownCase,
            Replacement::DownCase => ReplacementType::DownCase,
            Replacement::CaseEnd => ReplacementType::CaseEnd,
            Replacement::NewLine => ReplacementType::NewLine,
        }
    }
}

/// `:highlight` color definitions (spec.md §4.6 `:highlight`).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum HighlightColor {
    Name(String),
    Rgb { red: u8, green: u8, blue: u8 },
    Idx(u8),
    Fg,
    Bg,
    None,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum HighlightColorType {
    Name,
    Rgb,
    Idx,
    Fg,
    Bg,
    None,
}

impl HighlightColor {
    pub fn color_type(&self) -> HighlightColorType {
        match self {
            HighlightColor::Name(_) => HighlightColorType::Name,
            HighlightColor::Rgb { .. } => HighlightColorType::Rgb,
            HighlightColor::Idx(_) => HighlightColorType::Idx,
            HighlightColor::Fg => HighlightColorType::Fg,
            HighlightColor::Bg => HighlightColorType::Bg,
            HighlightColor::None => HighlightColorType::None,
        }
    }
}

/// A register reference, e.g. the `a` in `:put a` or the expression in
/// `:put ={1+1}` (the `=` register).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RegisterRef {
    pub name: char,
    pub expr: Option<Box<ExpressionNode>>,
}

/// A menu path piece, e.g. `File.Save` parses to `["File", "Save"]`
/// (spec.md §4.6 `:menu`).
pub type MenuName = Vec<String>;

/// One parsed `:autocmd`-style event name (spec.md §4.6 `:autocmd`). Kept
/// as a string rather than a closed enum — Neovim's event list is long and
/// user-extensible via plugins, so rejecting an unrecognized name here would
/// be a regression relative to the original parser, which accepts anything
/// and only complains on the later dispatch (out of scope, spec.md §1).
pub type AuEvent = String;

/// `:command -complete=...` completion spec.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CmdComplete {
    pub kind: String,
    pub custom_function: Option<String>,
}

/// `=` / `+=` / `-=` / `.=` on a `:let` (spec.md §4.7 `:let`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum AssignOp {
    Assign,
    Add,
    Subtract,
    Concat,
}

/// `:let`/`:unlet` assignment (spec.md §4.7 `:let`). `rhs` is `None` only for
/// the list-all form (`:let` with no `=`, listing every variable's value).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LetAssign {
    pub lhs: Vec<String>,
    pub op: AssignOp,
    pub rhs: Option<Box<ExpressionNode>>,
}

/// `:for` loop header (spec.md §4.7 `:for`): LHS as in `:let`, `in`, then an
/// iterable expression. The loop body lives in the owning `CommandNode`'s
/// `body` field, per spec.md §4.8.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ForLoop {
    pub lhs: Vec<String>,
    pub rhs: Box<ExpressionNode>,
}

flagset! {
    /// `:function` modifier flags (spec.md §4.7 `:function`): `range`,
    /// `dict`, `abort`.
    pub struct FunctionFlags: u8 {
        const RANGE = 1 << 0;
        const DICT = 1 << 1;
        const ABORT = 1 << 2;
    }
}

/// `:function` signature (spec.md §4.7 `:function`). `name` is kept as a
/// full expression since curly-braces function names (`function s:my_{n}()`)
/// are legal; the common plain-identifier case is still representable as a
/// `SimpleVariableName`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FunctionSignature {
    pub name: Box<ExpressionNode>,
    pub params: Vec<String>,
    pub varargs: bool,
    pub flags: FunctionFlags,
    /// `true` when the name was given as a `/regex/` (list-by-pattern form)
    /// rather than a name to define — such a `:function` has no body.
    pub by_pattern: bool,
}

/// One `:set` operation (spec.md §4.7 `:set`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SetOperator {
    /// Bare name: toggle a boolean on, or show a non-boolean's value.
    Show,
    Assign,
    Add,
    Subtract,
    Power,
    Invert,
    Reset,
    ResetToVi,
    ResetToVim,
    Query,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SetOp {
    pub name: String,
    pub operator: SetOperator,
    pub value: Option<String>,
}

flagset! {
    /// `:map`/`:unmap` option flags (spec.md §4.7 `:map`).
    pub struct MapFlags: u16 {
        const BUFFER = 1 << 0;
        const NOWAIT = 1 << 1;
        const SILENT = 1 << 2;
        const SPECIAL = 1 << 3;
        const SCRIPT = 1 << 4;
        const EXPR = 1 << 5;
        const UNIQUE = 1 << 6;
    }
}

/// `:map`/`:noremap`/`:unmap` (spec.md §4.7 `:map`).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MapSpec {
    pub flags: MapFlags,
    pub lhs: String,
    pub rhs: String,
    /// Parsed only when `flags.contains(MapFlags::EXPR)` (spec.md §4.7).
    pub rhs_expr: Option<Box<ExpressionNode>>,
}

flagset! {
    /// `:menu`/`:unmenu` option flags (spec.md §4.7 `:menu`).
    pub struct MenuFlags: u16 {
        const SILENT = 1 << 0;
        const SCRIPT = 1 << 1;
        const SPECIAL = 1 << 2;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum MenuToggle {
    None,
    Enable,
    Disable,
}

/// `:menu` (spec.md §4.7 `:menu`).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MenuSpec {
    pub flags: MenuFlags,
    pub icon: Option<String>,
    pub priority: Vec<u32>,
    pub toggle: MenuToggle,
    pub path: MenuName,
    pub tooltip: Option<String>,
    pub rhs: Option<String>,
}

flagset! {
    /// `:command` definition flags (spec.md §4.7 `:command`).
    pub struct UserCommandFlags: u32 {
        const BANG = 1 << 0;
        const BUFFER = 1 << 1;
        const BAR = 1 << 2;
        const REGISTER = 1 << 3;
    }
}

/// `:command -nargs=...` argument-count spec.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum NArgs {
    Zero,
    One,
    Any,
    ZeroOrOne,
    OneOrMore,
}

/// `:command` (spec.md §4.7 `:command`).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UserCommandDef {
    pub flags: UserCommandFlags,
    pub nargs: NArgs,
    pub range: Option<String>,
    pub count: Option<String>,
    pub complete: Option<CmdComplete>,
    pub name: String,
    pub body: String,
}

/// `:autocmd` (spec.md §4.7 `:autocmd`). `nested` is consumed only when
/// followed by a non-empty command (spec.md §9 Open Questions).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AutocmdSpec {
    pub group: Option<String>,
    pub events: Vec<AuEvent>,
    pub patterns: Vec<Pattern>,
    pub nested: bool,
    pub command: Option<String>,
}

flagset! {
    /// `:substitute` trailing flags (spec.md §4.7 `:substitute`).
    pub struct SubstituteFlags: u32 {
        const CONFIRM = 1 << 0;
        const NO_ERROR = 1 << 1;
        const EXPR_REPL = 1 << 2;
        const RANGE_PREV = 1 << 3;
        const PRINT = 1 << 4;
        const HASH_NR = 1 << 5;
        const LIST = 1 << 6;
        const IGNORE_CASE = 1 << 7;
        const MATCH_CASE = 1 << 8;
        const GLOBAL = 1 << 9;
        /// `n` — count matches instead of substituting (spec.md §4.7
        /// `:substitute`). Distinct from `l` (`LIST`).
        const NUMBER = 1 << 10;
    }
}

/// `:substitute`/`:&`/`:~` (spec.md §4.7 `:substitute`). `pattern` is `None`
/// when the body is empty (reuse the previous substitution's pattern).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SubstituteSpec {
    pub pattern: Option<crate::lexer::Regex>,
    pub replacement: Vec<Replacement>,
    pub flags: SubstituteFlags,
    pub count: Option<u32>,
}

/// `:global`/`:vglobal` (spec.md §4.7 `:global`).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GlobalSpec {
    pub pattern: crate::lexer::Regex,
    /// The nested command text to run on each matching line; kept as a
    /// string rather than eagerly reparsed (spec.md §1 Non-goals exclude
    /// execution, so there is no reason to parse a command body that will
    /// never run against actual buffer lines).
    pub command: String,
}

/// Every shape of per-command payload a `CommandNode` can carry. Each
/// built-in command's argument parser (spec.md §4.6, one module per command
/// family under `src/parser/commands/`) picks exactly one of these.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum CommandArg {
    /// No arguments at all (e.g. `:endif`).
    None,
    Expression(Box<ExpressionNode>),
    Expressions(Vec<ExpressionNode>),
    String(String),
    Strings(Vec<String>),
    Number(i64),
    UNumber(u64),
    Numbers(Vec<i64>),
    UNumbers(Vec<u64>),
    /// Generic bitflags, e.g. `:set` flag-only options or `++opt` flags.
    Flags(u32),
    Char(char),
    Pattern(Pattern),
    Glob(Glob),
    Regex(crate::lexer::Regex),
    Replacement(Vec<Replacement>),
    MenuName(MenuName),
    /// `:1,3` in Ex-mode style commands that take a literal range argument
    /// rather than the leading command range.
    Address(Range),
    AuEvents(Vec<AuEvent>),
    CmdComplete(CmdComplete),
    Register(RegisterRef),
    HighlightColor(HighlightColor),
    /// The left-hand side of a `:let`/`:for` assignment — one or more names,
    /// optionally destructured (`:let [a, b] = ...`).
    AssignLhs(Vec<String>),
    LetAssign(LetAssign),
    ForLoop(ForLoop),
    Function(FunctionSignature),
    Set(Vec<SetOp>),
    Map(MapSpec),
    Menu(MenuSpec),
    UserCommand(UserCommandDef),
    Autocmd(AutocmdSpec),
    Substitute(SubstituteSpec),
    Global(GlobalSpec),
}

/// Every built-in command kind this front end recognizes (spec.md §4.6), plus
/// the handful of non-command pseudo-nodes the block/comment scanner
/// produces. Mirrors `ex_cmds.h`'s `CMD_*` table via `cmddefs`
/// (spec.md §4.6/§6) rather than enumerating every one of Vim's ~300
/// commands — unrecognized text becomes `Unknown`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum CommandType {
    If,
    Elseif,
    Else,
    Endif,
    While,
    Endwhile,
    For,
    Endfor,
    Break,
    Continue,
    Function,
    Endfunction,
    Return,
    Try,
    Catch,
    Finally,
    Endtry,
    Throw,
    Let,
    Unlet,
    Call,
    Echo,
    Echon,
    Echomsg,
    Echoerr,
    Execute,
    Set,
    Map,
    Unmap,
    Menu,
    Unmenu,
    Autocmd,
    Augroup,
    Command,
    Delcommand,
    Substitute,
    Global,
    Print,
    Append,
    Insert,
    Change,
    Put,
    Normal,
    Highlight,
    Sort,
    Wincmd,
    Marks,
    Delmarks,
    Winpos,
    Winsize,
    Redir,
    Language,
    Vimgrep,
    Vglobal,
    Mapclear,
    Z,
    Help,
    Helpgrep,
    Display,
    Digraphs,
    Later,
    Filetype,
    History,
    Popup,
    Make,
    Retab,
    Resize,
    Script,
    Open,
    Gui,
    Match,
    Sleep,
    Syntime,
    Behave,
    Breakadd,
    Profile,
    Profdel,
    /// A recognized name whose full argument grammar this front end hasn't
    /// implemented — its argument text is kept verbatim rather than
    /// discarded (spec.md §4.6 edge cases).
    USER,
    /// No text matched any known command name at all.
    Unknown,
    /// An Ex line consisting only of a range and no command — e.g. bare
    /// `:5` — which Vim treats as `:5print` (spec.md §4.4 edge cases). Kept
    /// distinct from `Missing` so the printer doesn't invent a `:print`.
    Missing,
    /// `"` comment line.
    Comment,
    /// `#!` hashbang on line one of a script.
    HashbangComment,
    /// A line that failed to parse as any command at all; its diagnostic is
    /// carried on the `CommandNode` (spec.md §7 channel 1).
    SyntaxError,
}

/// One parsed Ex command (spec.md §4.6). Sibling commands at the same
/// nesting level are represented as `Vec<CommandNode>` on the parent, rather
/// than the original's intrusive `prev`/`next` pointers — spec.md §9 "Design
/// Notes" calls this out explicitly: a `Vec` can't end up with a dangling
/// `prev` the way a hand-patched linked list can.
///
/// A block opener's own argument (e.g. `:if`'s condition, `:function`'s
/// signature) and its nested body are two different things in the original
/// (`command_argument` vs. `children`, spec.md §3) and stay that way here:
/// `arg` keeps the opener's own argument exactly as parsed, and `body` is
/// filled in separately by `parser::sequence` once the matching `:end*` is
/// found, so closing a block never overwrites the data that opened it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CommandNode {
    pub command_type: CommandType,
    /// Name as written, for `USER`/`Unknown`/custom `:command`-defined
    /// commands where `command_type` alone doesn't capture identity.
    pub name: Option<String>,
    pub range: Range,
    pub bang: bool,
    pub has_count: bool,
    pub count: Option<i64>,
    pub register: Option<RegisterRef>,
    pub glob: Option<Glob>,
    pub arg: CommandArg,
    /// The nested command sequence for `:if`/`:while`/`:for`/`:function`/
    /// `:try` block openers (spec.md §4.8); `None` for every other command.
    pub body: Option<Vec<CommandNode>>,
    /// Byte offsets where characters were elided while unescaping the
    /// argument string (spec.md §3 `skips`), so a later diagnostic raised
    /// against the argument-relative text can be re-mapped to the original
    /// source column.
    pub skips: Vec<usize>,
    /// Start line/column, kept for diagnostics and `--emit=ast` spans.
    pub line: usize,
    pub column: usize,
    /// Set only on `SyntaxError` nodes.
    pub error_message: Option<String>,
    /// Leading `;;;` doc-comment lines immediately above a `:function`,
    /// re-emitted verbatim by the printer (SPEC_FULL.md §2.6).
    pub doc: Vec<String>,
}

impl CommandNode {
    pub fn new(command_type: CommandType, line: usize, column: usize) -> Self {
        CommandNode {
            command_type,
            name: None,
            range: Range::default(),
            bang: false,
            has_count: false,
            count: None,
            register: None,
            glob: None,
            arg: CommandArg::None,
            body: None,
            skips: Vec::new(),
            line,
            column,
            error_message: None,
            doc: Vec::new(),
        }
    }

    pub fn syntax_error(message: impl Into<String>, line: usize, column: usize) -> Self {
        CommandNode {
            error_message: Some(message.into()),
            ..CommandNode::new(CommandType::SyntaxError, line, column)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_command_has_no_range_by_default() {
        let node = CommandNode::new(CommandType::Echo, 1, 0);
        assert!(node.range.is_empty());
        assert_eq!(node.arg, CommandArg::None);
    }

    #[test]
    fn syntax_error_carries_message() {
        let node = CommandNode::syntax_error("E492: Not an editor command", 3, 2);
        assert_eq!(node.command_type, CommandType::SyntaxError);
        assert_eq!(node.error_message.as_deref(), Some("E492: Not an editor command"));
    }
}
