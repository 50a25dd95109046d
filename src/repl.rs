// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright (c) 2025 Misti contributors

//! Interactive REPL (Read-Eval-Print Loop) for the Misti lexer.

use chrono::Datelike;
use misti_core::lexer::identifier::KEYWORDS;
use misti_core::{ConstructionError, LexError, Parser, Scanner, Token, TokenKind};
use owo_colors::OwoColorize;
use rustyline::completion::{Completer, Pair};
use rustyline::error::ReadlineError;
use rustyline::highlight::Highlighter;
use rustyline::hint::Hinter;
use rustyline::history::DefaultHistory;
use rustyline::validate::{ValidationContext, ValidationResult, Validator};
use rustyline::{Editor, Helper};
use std::borrow::Cow;
use std::path::PathBuf;

use crate::config::{Config, Mode};
use crate::output::{Printer, token_style};

/// REPL commands that can be executed with a dot prefix
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplCommand {
    Help,
    Exit,
    Clear,
    Version,
    Mode,
    Load,
}

impl ReplCommand {
    /// Parse a REPL command from input string
    pub fn parse(input: &str) -> Option<(Self, Option<&str>)> {
        let input = input.trim();
        let rest = input.strip_prefix('.')?;

        let parts: Vec<&str> = rest.splitn(2, char::is_whitespace).collect();
        let cmd = parts.first()?.to_lowercase();
        let arg = parts.get(1).map(|a| a.trim()).filter(|a| !a.is_empty());

        match cmd.as_str() {
            "help" | "h" | "?" => Some((ReplCommand::Help, arg)),
            "exit" | "quit" | "q" => Some((ReplCommand::Exit, arg)),
            "clear" | "cls" => Some((ReplCommand::Clear, arg)),
            "version" | "v" => Some((ReplCommand::Version, arg)),
            "mode" | "m" => Some((ReplCommand::Mode, arg)),
            "load" | "l" => Some((ReplCommand::Load, arg)),
            _ => None,
        }
    }

    /// Get all available commands for help/completion
    pub fn all_commands() -> &'static [(&'static str, &'static str)] {
        &[
            (".help", "Show this help message"),
            (".exit", "Exit the REPL"),
            (".clear", "Clear the screen"),
            (".version", "Show version information"),
            (".mode <tokens|expr>", "Print tokens, or parse an expression"),
            (".load <file>", "Scan a file in this session"),
        ]
    }
}

/// Source accumulated over a REPL session.
///
/// Every entry is appended to one buffer and scanned from where the previous
/// entry ended, so reported lines and offsets keep counting.
#[derive(Debug, Default)]
pub struct Session {
    source: String,
    chars: usize,
    lines: usize,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `entry` and returns a scanner positioned at its start.
    pub fn feed(&mut self, entry: &str) -> Result<Scanner, ConstructionError> {
        let start = self.chars;
        let line = self.lines;

        self.source.push_str(entry);
        if !entry.ends_with('\n') {
            self.source.push('\n');
        }
        self.chars = self.source.chars().count();
        self.lines = self.source.matches('\n').count();

        Scanner::with_start(&self.source, start, line)
    }

    /// Number of lines entered so far.
    pub fn lines(&self) -> usize {
        self.lines
    }
}

/// Helper struct for rustyline that provides completion, hints, and validation
struct MistiHelper {
    /// Keywords and REPL commands for completion
    words: Vec<String>,
    color: bool,
}

impl MistiHelper {
    fn new(color: bool) -> Self {
        let words = KEYWORDS
            .iter()
            .map(|(word, _)| word.to_string())
            .chain([".help", ".exit", ".clear", ".version", ".mode", ".load"].map(String::from))
            .chain(["tokens", "expr"].map(String::from))
            .collect();

        Self { words, color }
    }

    /// Rest of the first word that extends the word ending the line.
    fn completion_hint(&self, line: &str) -> Option<String> {
        let word = &line[word_start(line, line.len())..];
        if word.len() < 2 {
            return None;
        }

        self.words
            .iter()
            .find(|w| w.starts_with(word) && w.len() > word.len())
            .map(|w| (&w[word.len()..]).dimmed().to_string())
    }
}

/// Start of the word ending at `pos`.
fn word_start(line: &str, pos: usize) -> usize {
    line[..pos]
        .char_indices()
        .rev()
        .find(|(_, c)| !c.is_ascii_alphanumeric() && *c != '_' && *c != '.')
        .map(|(i, c)| i + c.len_utf8())
        .unwrap_or(0)
}

impl Completer for MistiHelper {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &rustyline::Context<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        let word = &line[word_start(line, pos)..pos];
        if word.is_empty() {
            return Ok((pos, vec![]));
        }

        let matches: Vec<Pair> = self
            .words
            .iter()
            .filter(|w| w.starts_with(word))
            .map(|w| Pair {
                display: w.clone(),
                replacement: w[word.len()..].to_string(),
            })
            .collect();

        Ok((pos, matches))
    }
}

impl Hinter for MistiHelper {
    type Hint = String;

    fn hint(&self, line: &str, pos: usize, _ctx: &rustyline::Context<'_>) -> Option<Self::Hint> {
        if pos < line.len() {
            return None;
        }
        self.completion_hint(line)
    }
}

impl Highlighter for MistiHelper {
    fn highlight<'l>(&self, line: &'l str, _pos: usize) -> Cow<'l, str> {
        if !self.color || line.starts_with('.') {
            return Cow::Borrowed(line);
        }
        Cow::Owned(highlight_source(line))
    }

    fn highlight_char(&self, _line: &str, _pos: usize, _forced: bool) -> bool {
        self.color
    }
}

/// Colors `line` using the lexer's own tokens.
///
/// Unrecognized characters are shown in red; whitespace is left alone.
fn highlight_source(line: &str) -> String {
    let chars: Vec<char> = line.chars().collect();
    let mut scanner = Scanner::new(line);
    let tokens: Vec<Token> = scanner.by_ref().filter(|t| !t.is_synthetic()).collect();
    let bad: Vec<usize> = scanner
        .diagnostics()
        .iter()
        .filter_map(|d| match d {
            LexError::UnrecognizedCharacter { offset, .. } => Some(*offset),
            _ => None,
        })
        .collect();

    let mut out = String::with_capacity(line.len() * 2);
    let mut pos = 0;

    let push_gap = |out: &mut String, from: usize, to: usize| {
        for (i, ch) in chars.iter().enumerate().take(to).skip(from) {
            if bad.contains(&i) {
                out.push_str(&ch.red().to_string());
            } else {
                out.push(*ch);
            }
        }
    };

    for (i, token) in tokens.iter().enumerate() {
        let next = tokens.get(i + 1).map_or(chars.len(), |t| t.offset);
        let end = lexeme_end(token, &chars, next);

        push_gap(&mut out, pos, token.offset);
        let lexeme: String = chars[token.offset..end].iter().collect();
        if token.kind == TokenKind::Identifier {
            out.push_str(&lexeme);
        } else {
            out.push_str(&lexeme.style(token_style(token.kind)).to_string());
        }
        pos = end;
    }
    push_gap(&mut out, pos, chars.len());

    out
}

/// End of the source characters a token was scanned from.
fn lexeme_end(token: &Token, chars: &[char], next: usize) -> usize {
    match token.kind {
        // Decoded text differs from the source; stop before the next token.
        TokenKind::String | TokenKind::Unit => {
            let span = &chars[token.offset..next];
            token.offset + span.iter().rposition(|c| !c.is_whitespace()).map_or(0, |p| p + 1)
        }
        _ => (token.offset + token.len()).min(next),
    }
}

impl Validator for MistiHelper {
    fn validate(&self, ctx: &mut ValidationContext<'_>) -> rustyline::Result<ValidationResult> {
        let input = ctx.input();

        if input.trim_start().starts_with('.') {
            return Ok(ValidationResult::Valid(None));
        }

        if !is_balanced(input) {
            return Ok(ValidationResult::Incomplete);
        }

        // A trailing operator expects a continuation, usually an indented block
        let trimmed = input.trim_end();
        if trimmed
            .chars()
            .last()
            .is_some_and(misti_core::lexer::operators::is_operator_char)
        {
            return Ok(ValidationResult::Incomplete);
        }

        Ok(ValidationResult::Valid(None))
    }
}

/// Check if brackets, braces, and parentheses are balanced
///
/// Strings never span lines, so a newline closes an open string.
fn is_balanced(input: &str) -> bool {
    let mut stack = Vec::new();
    let mut in_string = false;
    let mut escape_next = false;

    for c in input.chars() {
        if escape_next {
            escape_next = false;
            continue;
        }

        if in_string {
            match c {
                '\\' => escape_next = true,
                '"' | '\n' => in_string = false,
                _ => {}
            }
            continue;
        }

        match c {
            '"' => in_string = true,
            '(' => stack.push(')'),
            '[' => stack.push(']'),
            '{' => stack.push('}'),
            ')' | ']' | '}' => {
                if stack.pop() != Some(c) {
                    return true; // Unbalanced, but the parser reports it
                }
            }
            _ => {}
        }
    }

    stack.is_empty()
}

impl Helper for MistiHelper {}

/// The interactive REPL for Misti
pub struct Repl {
    editor: Editor<MistiHelper, DefaultHistory>,
    history_path: PathBuf,
    session: Session,
    mode: Mode,
    printer: Printer,
}

impl Repl {
    /// Create a new REPL instance
    pub fn new(config: &Config) -> rustyline::Result<Self> {
        let editor_config = rustyline::Config::builder()
            .history_ignore_dups(true)?
            .history_ignore_space(true)
            .max_history_size(config.max_history_size)?
            .auto_add_history(true)
            .build();

        let mut editor = Editor::with_config(editor_config)?;
        editor.set_helper(Some(MistiHelper::new(config.color)));

        let history_path = config.history_path();

        if let Some(parent) = history_path.parent() {
            let _ = std::fs::create_dir_all(parent);
        }

        if let Err(err) = editor.load_history(&history_path) {
            tracing::debug!(path = %history_path.display(), %err, "no history loaded");
        }

        Ok(Self {
            editor,
            history_path,
            session: Session::new(),
            mode: config.mode,
            printer: Printer {
                color: config.color,
                show_positions: config.show_positions,
            },
        })
    }

    /// Run the REPL main loop
    pub fn run(&mut self) -> rustyline::Result<()> {
        self.print_banner();

        loop {
            let prompt = self.format_prompt();

            match self.editor.readline(&prompt) {
                Ok(line) => {
                    if line.trim().is_empty() {
                        continue;
                    }

                    if let Some((cmd, arg)) = ReplCommand::parse(&line) {
                        match self.execute_command(cmd, arg) {
                            CommandResult::Continue => continue,
                            CommandResult::Exit => break,
                        }
                    }

                    self.scan_and_print(&line);
                }
                Err(ReadlineError::Interrupted) => {
                    println!("{}", "^C".dimmed());
                    continue;
                }
                Err(ReadlineError::Eof) => {
                    println!("{}", "^D".dimmed());
                    break;
                }
                Err(err) => {
                    eprintln!("{}: {:?}", "Error".red().bold(), err);
                    break;
                }
            }
        }

        if let Err(err) = self.editor.save_history(&self.history_path) {
            tracing::warn!(path = %self.history_path.display(), %err, "failed to save history");
        }

        Ok(())
    }

    fn print_banner(&self) {
        println!("{}", banner_line(env!("CARGO_PKG_VERSION")).bright_cyan().bold());
        println!(
            "{}",
            copyright_line(chrono::Local::now().year(), env!("CARGO_PKG_AUTHORS")).dimmed()
        );
        println!(
            "{} {} {}",
            "Type".dimmed(),
            ".help".cyan(),
            "for available commands".dimmed()
        );
        println!();
    }

    fn format_prompt(&self) -> String {
        let prompt = format!("misti:{}>", self.session.lines());
        if self.printer.color {
            format!("{} ", prompt.bright_green().bold())
        } else {
            format!("{prompt} ")
        }
    }

    fn execute_command(&mut self, cmd: ReplCommand, arg: Option<&str>) -> CommandResult {
        match cmd {
            ReplCommand::Help => self.print_help(),
            ReplCommand::Exit => return CommandResult::Exit,
            ReplCommand::Clear => print!("\x1B[2J\x1B[H"),
            ReplCommand::Version => self.print_version(),
            ReplCommand::Mode => match arg.map(Mode::from_name) {
                None => println!("{}", self.mode.name()),
                Some(Some(mode)) => self.mode = mode,
                Some(None) => eprintln!("{}", self.printer.error("expected `tokens` or `expr`")),
            },
            ReplCommand::Load => match arg {
                Some(path) => self.load_file(path),
                None => eprintln!("{}", self.printer.error(".load requires a file path")),
            },
        }
        CommandResult::Continue
    }

    fn print_help(&self) {
        println!();
        println!("{}", "REPL Commands:".white().bold());
        println!();

        for (cmd, desc) in ReplCommand::all_commands() {
            println!("  {:22} {}", cmd.cyan(), desc.dimmed());
        }

        println!();
        println!("{}", "Keyboard Shortcuts:".white().bold());
        println!();
        println!("  {:22} {}", "Ctrl+C".yellow(), "Cancel current input".dimmed());
        println!("  {:22} {}", "Ctrl+D".yellow(), "Exit REPL".dimmed());
        println!("  {:22} {}", "Tab".yellow(), "Autocomplete".dimmed());
        println!("  {:22} {}", "↑/↓".yellow(), "Navigate history".dimmed());
        println!();
    }

    fn print_version(&self) {
        println!("{}: {}", "Misti".bright_cyan().bold(), env!("CARGO_PKG_VERSION").yellow());
        println!("{}: {}", "Rust".dimmed(), env!("CARGO_PKG_RUST_VERSION"));
    }

    fn load_file(&mut self, path: &str) {
        match std::fs::read_to_string(path) {
            Ok(source) => self.scan_and_print(&source),
            Err(err) => eprintln!("{}", self.printer.error(&format!("{path}: {err}"))),
        }
    }

    fn scan_and_print(&mut self, input: &str) {
        let scanner = match self.session.feed(input) {
            Ok(scanner) => scanner,
            Err(err) => {
                eprintln!("{}", self.printer.error(&err.to_string()));
                return;
            }
        };

        let diagnostics = match self.mode {
            Mode::Tokens => {
                let mut scanner = scanner;
                let tokens = scanner.tokens();
                print!("{}", self.printer.tokens(&tokens));
                scanner.into_diagnostics()
            }
            Mode::Expr => {
                let mut parser = Parser::from_scanner(scanner);
                match parser.parse_expression() {
                    Ok(expr) => println!("{}", self.printer.expr(&expr)),
                    Err(err) => eprintln!("{}", self.printer.error(&err.to_string())),
                }
                parser.into_diagnostics()
            }
        };

        for diagnostic in &diagnostics {
            eprintln!("{}", self.printer.diagnostic(diagnostic));
        }
    }
}

/// Result of executing a REPL command
enum CommandResult {
    Continue,
    Exit,
}

/// First banner line.
fn banner_line(version: &str) -> String {
    format!("Misti {version}")
}

/// Second banner line. Cargo joins several authors with `:`.
fn copyright_line(year: i32, authors: &str) -> String {
    format!("Copyright (c) {year} {}.", authors.replace(':', ", "))
}
