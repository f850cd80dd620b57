// ABOUTME: Abstract syntax tree types for VimL expressions, addresses, patterns and Ex commands

pub mod address;
pub mod command;
pub mod expr;
pub mod pattern;

pub use address::{Address, AddressFollowup, AddressFollowupType, AddressType, Range};
pub use command::{CommandArg, CommandNode, CommandType, HighlightColor, HighlightColorType, Replacement, ReplacementType};
pub use expr::{CaseCompareStrategy, ExpressionNode, ExpressionType};
pub use pattern::{Glob, Pattern, PatternType};
