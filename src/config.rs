// ABOUTME: Configuration and constants for the VimL parser front end
// This module contains version info, CLI banner text, and parser option flags

#[allow(dead_code)]
pub const VERSION: &str = "0.1.0";
pub const WELCOME_MESSAGE: &str = "VimL front end v0.1";
pub const WELCOME_SUBTITLE: &str = "A parser, pretty-printer and Lua translator for VimL";

// ============================================================================
// Parser option flags (spec.md §6 CommandParserOptions.flags)
// ============================================================================

pub mod poc {
    pub const EXMODE: u16 = 0x01;
    pub const CPO_STAR: u16 = 0x02;
    pub const CPO_BSLASH: u16 = 0x04;
    pub const CPO_SPECI: u16 = 0x08;
    pub const CPO_KEYCODE: u16 = 0x10;
    pub const CPO_BAR: u16 = 0x20;
    pub const CPO_SUBPC: u16 = 0x40;
    pub const ALTKEYMAP: u16 = 0x80;
    pub const RL: u16 = 0x100;
    pub const MAGIC: u16 = 0x200;
    pub const ED: u16 = 0x400;
}

/// Parser-wide options, threaded through every entry point in spec.md §6.
///
/// `wildcharm_idx`/`wildchar_idx` are modeled as fields here rather than as
/// process-global caches (spec.md §9 "Cached global state"): the currently
/// resolved key code for the `wildchar`/`wildcharm` options, scoped to this
/// options instance instead of a lazily-initialised static. `:set`'s parser
/// (`crate::parser::commands::set_cmd`) reads them to answer a bare
/// `wildchar?`/`wildcharm?` query and to validate an `=` assignment's value
/// decodes to a real key code.
#[derive(Debug, Clone, Copy, Default)]
pub struct CommandParserOptions {
    pub flags: u16,
    pub early_return: bool,
    pub wildcharm_idx: Option<u32>,
    pub wildchar_idx: Option<u32>,
}

impl CommandParserOptions {
    pub fn new(flags: u16) -> Self {
        CommandParserOptions {
            flags,
            early_return: false,
            wildcharm_idx: None,
            wildchar_idx: None,
        }
    }

    pub fn has(&self, flag: u16) -> bool {
        self.flags & flag != 0
    }

    pub fn magic(&self) -> bool {
        self.has(poc::MAGIC)
    }

    pub fn cpo_bar(&self) -> bool {
        self.has(poc::CPO_BAR)
    }

    pub fn cpo_bslash(&self) -> bool {
        self.has(poc::CPO_BSLASH)
    }

    pub fn cpo_star(&self) -> bool {
        self.has(poc::CPO_STAR)
    }
}

// ============================================================================
// Pretty-printer style options (spec.md §4.9)
// ============================================================================

#[derive(Debug, Clone, Copy)]
pub struct PrinterOptions {
    /// Insert a space on each side of binary operators (`a + b` vs `a+b`).
    pub space_around_binary_ops: bool,
    /// Indent width (in spaces) for each nested block level.
    pub indent_width: usize,
}

impl Default for PrinterOptions {
    fn default() -> Self {
        PrinterOptions {
            space_around_binary_ops: true,
            indent_width: 2,
        }
    }
}

// ============================================================================
// Translator style options (spec.md §4.10)
// ============================================================================

#[derive(Debug, Clone, Copy)]
pub struct TranslatorOptions {
    /// Indent width (in spaces) for each nested Lua block level.
    pub indent_width: usize,
}

impl Default for TranslatorOptions {
    fn default() -> Self {
        TranslatorOptions { indent_width: 2 }
    }
}

#[allow(dead_code)]
pub const HELP_TEXT: &str = r#"
Available commands:
  :quit / :q          - Exit the REPL
  :help               - Show this help message

Type an Ex command or `=<expr>` to parse and pretty-print it.
Nothing here is ever executed -- this front end only parses, prints and
translates.
"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_roundtrip() {
        let opts = CommandParserOptions::new(poc::MAGIC | poc::CPO_BAR);
        assert!(opts.magic());
        assert!(opts.cpo_bar());
        assert!(!opts.cpo_star());
    }
}
