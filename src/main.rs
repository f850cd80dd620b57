// ABOUTME: CLI entry point — parses VimL and emits an AST dump, pretty-printed
// ABOUTME: VimL, or translated Lua, or starts a line-editing REPL

mod ast;
mod config;
mod error;
mod highlighter;
mod lexer;
mod parser;
mod printer;
mod translator;

use clap::{Parser, ValueEnum};
use config::{poc, CommandParserOptions, PrinterOptions, TranslatorOptions};
use error::ExprParseError;
use highlighter::ViHelper;
use parser::sequence::parse_cmd_sequence;
use rustyline::error::ReadlineError;
use rustyline::{Config, Editor};
use std::path::PathBuf;

/// What to emit after parsing: the AST as JSON, canonical VimL, or Lua.
#[derive(Copy, Clone, Debug, ValueEnum)]
enum Emit {
    Ast,
    Viml,
    Lua,
}

/// A parser, pretty-printer and Lua translator for VimL — never executes
/// anything it parses (spec.md §1 Non-goals).
#[derive(Parser, Debug)]
#[command(name = "vimlfe")]
#[command(version = config::VERSION)]
#[command(about = "VimL parser, AST, pretty-printer and Lua translator front end")]
struct CliArgs {
    /// Script file to parse (omit to start the REPL, unless --expr is given)
    #[arg(value_name = "FILE")]
    file: Option<PathBuf>,

    /// Parse a single expression instead of a script (`parse0_err`, spec.md §6)
    #[arg(long = "expr", value_name = "EXPR")]
    expr: Option<String>,

    /// What to print: the AST as JSON, canonical VimL, or translated Lua
    #[arg(long = "emit", value_enum, default_value = "viml")]
    emit: Emit,

    /// Comma-separated `cpo` flags: star,bslash,speci,keycode,bar,subpc
    #[arg(long = "cpo", value_name = "FLAGS", value_delimiter = ',')]
    cpo: Vec<String>,

    /// Parse as though running under `:ex` / Ex mode
    #[arg(long = "exmode")]
    exmode: bool,

    /// Parse as though `altkeymap` is set
    #[arg(long = "altkeymap")]
    altkeymap: bool,

    /// Parse as though `rightleft` is set
    #[arg(long = "rl")]
    rl: bool,

    /// Parse as though `magic` is set (the default; pass to make it explicit)
    #[arg(long = "magic")]
    magic: bool,

    /// Parse as though `compatible`'s `ed` flag is set
    #[arg(long = "ed")]
    ed: bool,

    /// Indent width for translated Lua blocks
    #[arg(long = "lua-indent", value_name = "N", default_value_t = 2)]
    lua_indent: usize,

    /// Print a space on each side of binary operators (default)
    #[arg(long = "spaces-around-ops", conflicts_with = "no_spaces_around_ops")]
    spaces_around_ops: bool,

    /// Don't print spaces around binary operators
    #[arg(long = "no-spaces-around-ops")]
    no_spaces_around_ops: bool,
}

fn main() {
    let args = CliArgs::parse();
    let options = build_parser_options(&args);

    if let Some(expr_src) = &args.expr {
        run_expr(expr_src, args.emit);
        return;
    }

    match &args.file {
        Some(path) => run_file(path, &args, &options),
        None => run_repl(&options, &args),
    }
}

fn build_parser_options(args: &CliArgs) -> CommandParserOptions {
    let mut flags = 0u16;
    for name in &args.cpo {
        flags |= match name.as_str() {
            "star" => poc::CPO_STAR,
            "bslash" => poc::CPO_BSLASH,
            "speci" => poc::CPO_SPECI,
            "keycode" => poc::CPO_KEYCODE,
            "bar" => poc::CPO_BAR,
            "subpc" => poc::CPO_SUBPC,
            other => {
                eprintln!("warning: unknown --cpo flag {:?}, ignoring", other);
                0
            }
        };
    }
    if args.exmode {
        flags |= poc::EXMODE;
    }
    if args.altkeymap {
        flags |= poc::ALTKEYMAP;
    }
    if args.rl {
        flags |= poc::RL;
    }
    if args.magic {
        flags |= poc::MAGIC;
    }
    if args.ed {
        flags |= poc::ED;
    }
    CommandParserOptions::new(flags)
}

fn printer_options(args: &CliArgs) -> PrinterOptions {
    let mut opts = PrinterOptions::default();
    if args.no_spaces_around_ops {
        opts.space_around_binary_ops = false;
    } else if args.spaces_around_ops {
        opts.space_around_binary_ops = true;
    }
    opts
}

fn translator_options(args: &CliArgs) -> TranslatorOptions {
    TranslatorOptions { indent_width: args.lua_indent }
}

fn run_file(path: &PathBuf, args: &CliArgs, options: &CommandParserOptions) {
    let contents = match std::fs::read_to_string(path) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("vimlfe: cannot read {}: {}", path.display(), e);
            std::process::exit(1);
        }
    };

    let mut lines = contents.lines().map(|s| s.to_string());
    let nodes = parse_cmd_sequence(move || lines.next(), options);

    match args.emit {
        Emit::Ast => match serde_json::to_string_pretty(&nodes) {
            Ok(json) => println!("{}", json),
            Err(e) => {
                eprintln!("vimlfe: failed to serialize AST: {}", e);
                std::process::exit(1);
            }
        },
        Emit::Viml => println!("{}", printer::print_commands(&nodes, &printer_options(args))),
        Emit::Lua => println!("{}", translator::translate_script(&nodes, &translator_options(args))),
    }
}

fn run_expr(src: &str, emit: Emit) {
    match parser::parse_expr(src, 0) {
        Ok((node, consumed)) => {
            if consumed < src.len() && !src[consumed..].trim().is_empty() {
                eprintln!(
                    "vimlfe: {} at column {}",
                    error::messages::E488_TRAILING_CHARACTERS,
                    consumed
                );
                std::process::exit(1);
            }
            match emit {
                Emit::Ast => match serde_json::to_string_pretty(&node) {
                    Ok(json) => println!("{}", json),
                    Err(e) => {
                        eprintln!("vimlfe: failed to serialize AST: {}", e);
                        std::process::exit(1);
                    }
                },
                Emit::Viml => println!("{}", printer::print_expr(&node, &PrinterOptions::default())),
                Emit::Lua => println!("{}", translator::translate_expr(&node, false)),
            }
        }
        Err(e) => report_expr_error(src, &e),
    }
}

fn report_expr_error(src: &str, err: &ExprParseError) {
    eprintln!("vimlfe: {}", err);
    if let Some(col) = err.column() {
        eprintln!("{}", src);
        eprintln!("{}^", " ".repeat(col));
    }
    std::process::exit(1);
}

/// Line-editing REPL: each line is parsed as one Ex command (or, if it
/// starts with `=`, a bare expression) and the re-serialized VimL or a
/// syntax error with a `^` column marker is printed. Nothing is ever
/// executed (spec.md §1 Non-goals).
fn run_repl(options: &CommandParserOptions, args: &CliArgs) {
    let config = Config::builder().auto_add_history(true).build();
    let mut rl = match Editor::with_config(config) {
        Ok(rl) => rl,
        Err(e) => {
            eprintln!("vimlfe: failed to initialize REPL: {}", e);
            std::process::exit(1);
        }
    };
    rl.set_helper(Some(ViHelper::new()));

    let history_file = ".vimlfe_history";
    let _ = rl.load_history(history_file);

    println!("{}", config::WELCOME_MESSAGE);
    println!("{}", config::WELCOME_SUBTITLE);

    let print_opts = printer_options(args);

    loop {
        match rl.readline("vimlfe> ") {
            Ok(line) => {
                let trimmed = line.trim();
                if trimmed.is_empty() {
                    continue;
                }
                if trimmed == ":quit" || trimmed == ":q" {
                    break;
                }
                if trimmed == ":help" {
                    println!("{}", config::HELP_TEXT);
                    continue;
                }

                if let Some(expr_src) = trimmed.strip_prefix('=') {
                    match parser::parse_expr(expr_src, 0) {
                        Ok((node, _)) => println!("{}", printer::print_expr(&node, &print_opts)),
                        Err(e) => report_repl_error(expr_src, &e.to_string(), e.column()),
                    }
                    continue;
                }

                let mut one_line = std::iter::once(line.clone());
                let nodes = parse_cmd_sequence(move || one_line.next(), options);
                let has_error = nodes.iter().any(|n| n.command_type == ast::command::CommandType::SyntaxError);
                if has_error {
                    for node in &nodes {
                        if let Some(msg) = &node.error_message {
                            report_repl_error(&line, msg, Some(node.column));
                        }
                    }
                } else {
                    println!("{}", printer::print_commands(&nodes, &print_opts));
                }
            }
            Err(ReadlineError::Interrupted) => {
                println!("^C");
                continue;
            }
            Err(ReadlineError::Eof) => {
                println!("\nGoodbye!");
                break;
            }
            Err(err) => {
                eprintln!("vimlfe: {}", err);
                break;
            }
        }
    }

    let _ = rl.save_history(history_file);
}

fn report_repl_error(src: &str, message: &str, column: Option<usize>) {
    eprintln!("Error: {}", message);
    if let Some(col) = column {
        eprintln!("{}", src);
        eprintln!("{}^", " ".repeat(col));
    }
}
