//! go.mod syntax tree
//!
//! Handles:
//! - single-line directives (`require module/path v1.2.3`)
//! - parenthesised blocks (`require ( ... )`)
//! - comments directly above a line, which stay attached to it
//! - suffix comments (`// indirect`)
//! - standalone comments and blank lines, kept in place
//!
//! Formatting a parsed file writes top-level lines flush left and block
//! entries indented with a single tab.

use crate::error::ManifestError;
use std::path::{Path, PathBuf};

/// Directive that declares a requirement
const REQUIRE: &str = "require";

/// Directives accepted at the top level
const KNOWN_VERBS: &[&str] = &[
    "module",
    "go",
    "toolchain",
    "godebug",
    REQUIRE,
    "exclude",
    "replace",
    "retract",
    "tool",
    "ignore",
];

/// Directives that cannot open a block
const SINGLE_LINE_VERBS: &[&str] = &["module", "go", "toolchain"];

/// A parsed go.mod file
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct GoModFile {
    /// Top-level entries in file order
    pub(crate) entries: Vec<Entry>,
}

/// One top-level entry, or one entry inside a block
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Entry {
    /// Empty line
    Blank,
    /// Comment line not directly followed by a statement
    Comment(String),
    /// A statement
    Line(Line),
    /// A parenthesised block (top level only)
    Block(Block),
}

/// A statement with its attached comments
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub(crate) struct Line {
    /// Comment lines directly above the statement
    pub before: Vec<String>,
    /// Tokens of the statement. Inside a block the verb is omitted.
    pub tokens: Vec<String>,
    /// Trailing `//` comment
    pub suffix: Option<String>,
}

/// A `verb ( ... )` block
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub(crate) struct Block {
    /// Comment lines directly above the block
    pub before: Vec<String>,
    /// Directive the block belongs to
    pub verb: String,
    /// Comment after the opening parenthesis
    pub open_suffix: Option<String>,
    /// Entries between the parentheses
    pub items: Vec<Entry>,
    /// Comment after the closing parenthesis
    pub close_suffix: Option<String>,
}

/// A require entry found in the file, with mutable access to its line
pub(crate) struct RequireEntry<'a> {
    /// Module path, unquoted
    pub path: String,
    /// The statement that requires it
    pub line: &'a mut Line,
}

impl Line {
    fn render(&self, indent: &str, out: &mut Vec<String>) {
        render_comments(&self.before, indent, out);
        let mut text = format!("{}{}", indent, join_tokens(&self.tokens));
        push_suffix(&mut text, self.suffix.as_deref());
        out.push(text);
    }
}

impl GoModFile {
    /// Parse go.mod content. `path` is only used in error messages.
    pub fn parse(content: &str, path: &Path) -> Result<Self, ManifestError> {
        Parser::new(path).parse(content)
    }

    /// Module paths of every require entry, in file order
    pub fn require_paths(&self) -> Vec<String> {
        let mut paths = Vec::new();
        for entry in &self.entries {
            match entry {
                Entry::Line(line) if is_require_line(line) => {
                    if let Some(path) = line.tokens.get(1) {
                        paths.push(unquote(path).to_string());
                    }
                }
                Entry::Block(block) if block.verb == REQUIRE => {
                    for item in &block.items {
                        if let Entry::Line(line) = item {
                            if let Some(path) = line.tokens.first() {
                                paths.push(unquote(path).to_string());
                            }
                        }
                    }
                }
                _ => {}
            }
        }
        paths
    }

    /// Every require entry with mutable access to its statement
    pub(crate) fn requirements_mut(&mut self) -> Vec<RequireEntry<'_>> {
        let mut found = Vec::new();
        for entry in self.entries.iter_mut() {
            match entry {
                Entry::Line(line) if is_require_line(line) => {
                    if let Some(path) = line.tokens.get(1).map(|p| unquote(p).to_string()) {
                        found.push(RequireEntry { path, line });
                    }
                }
                Entry::Block(block) if block.verb == REQUIRE => {
                    for item in block.items.iter_mut() {
                        if let Entry::Line(line) = item {
                            if let Some(path) = line.tokens.first().map(|p| unquote(p).to_string())
                            {
                                found.push(RequireEntry { path, line });
                            }
                        }
                    }
                }
                _ => {}
            }
        }
        found
    }

    /// Serialize back to go.mod text, always ending with a newline
    pub fn format(&self) -> String {
        let mut out = Vec::new();
        for entry in &self.entries {
            render_entry(entry, "", &mut out);
        }

        let mut text = out.join("\n");
        text.push('\n');
        text
    }
}

fn is_require_line(line: &Line) -> bool {
    line.tokens.first().map(String::as_str) == Some(REQUIRE)
}

fn render_entry(entry: &Entry, indent: &str, out: &mut Vec<String>) {
    match entry {
        Entry::Blank => out.push(String::new()),
        Entry::Comment(comment) => out.push(format!("{}{}", indent, comment)),
        Entry::Line(line) => line.render(indent, out),
        Entry::Block(block) => {
            render_comments(&block.before, indent, out);
            let mut open = format!("{}{} (", indent, block.verb);
            push_suffix(&mut open, block.open_suffix.as_deref());
            out.push(open);

            let inner = format!("{}\t", indent);
            for item in &block.items {
                render_entry(item, &inner, out);
            }

            let mut close = format!("{})", indent);
            push_suffix(&mut close, block.close_suffix.as_deref());
            out.push(close);
        }
    }
}

/// Join tokens with single spaces, without padding inside brackets or before commas
fn join_tokens(tokens: &[String]) -> String {
    let mut text = String::new();
    let mut sep = "";
    for token in tokens {
        if matches!(token.as_str(), "," | ")" | "]" | "}") {
            sep = "";
        }
        text.push_str(sep);
        text.push_str(token);
        sep = if matches!(token.as_str(), "(" | "[" | "{") {
            ""
        } else {
            " "
        };
    }
    text
}

fn render_comments(comments: &[String], indent: &str, out: &mut Vec<String>) {
    out.extend(comments.iter().map(|c| format!("{}{}", indent, c)));
}

fn push_suffix(text: &mut String, suffix: Option<&str>) {
    if let Some(comment) = suffix {
        if !text.trim().is_empty() {
            text.push(' ');
        }
        text.push_str(comment);
    }
}

/// Strip surrounding double or back quotes from a token
fn unquote(token: &str) -> &str {
    for quote in ['"', '`'] {
        if let Some(inner) = token
            .strip_prefix(quote)
            .and_then(|t| t.strip_suffix(quote))
        {
            return inner;
        }
    }
    token
}

/// Tokens and trailing comment of one physical line
struct Lexed {
    tokens: Vec<String>,
    comment: Option<String>,
}

/// Characters that always form a token of their own
fn is_punct(c: char) -> bool {
    matches!(c, '(' | ')' | '[' | ']' | '{' | '}' | ',')
}

/// Split a line into tokens, honouring quoted strings and `//` comments.
/// Brackets, braces, parentheses and commas are tokens even when glued to
/// other text (`require(`).
fn lex(line: &str) -> Result<Lexed, String> {
    let mut tokens = Vec::new();
    let mut comment = None;
    let mut chars = line.char_indices().peekable();

    while let Some(&(start, ch)) = chars.peek() {
        if ch.is_whitespace() {
            chars.next();
            continue;
        }

        if line[start..].starts_with("//") {
            comment = Some(line[start..].trim_end().to_string());
            break;
        }

        if is_punct(ch) {
            chars.next();
            tokens.push(ch.to_string());
            continue;
        }

        if ch == '"' || ch == '`' {
            chars.next();
            let mut escaped = false;
            let mut end = None;
            for (i, c) in chars.by_ref() {
                if ch == '"' && escaped {
                    escaped = false;
                    continue;
                }
                if ch == '"' && c == '\\' {
                    escaped = true;
                    continue;
                }
                if c == ch {
                    end = Some(i + c.len_utf8());
                    break;
                }
            }
            let end = end.ok_or_else(|| "unterminated quoted string".to_string())?;
            tokens.push(line[start..end].to_string());
            continue;
        }

        let mut end = line.len();
        while let Some(&(i, c)) = chars.peek() {
            if c.is_whitespace() || is_punct(c) || line[i..].starts_with("//") {
                end = i;
                break;
            }
            chars.next();
        }
        tokens.push(line[start..end].to_string());
    }

    Ok(Lexed { tokens, comment })
}

/// A single version, or a `[low, high]` interval split into its five tokens
fn is_retract_target(args: &[String]) -> bool {
    let is_version = |t: &String| !t.chars().any(is_punct);
    match args {
        [version] => is_version(version),
        [open, low, comma, high, close] => {
            open == "["
                && comma == ","
                && close == "]"
                && is_version(low)
                && is_version(high)
        }
        _ => false,
    }
}

/// Line-by-line go.mod parser
struct Parser {
    path: PathBuf,
    entries: Vec<Entry>,
    /// Comment lines waiting to be attached to the next statement
    pending: Vec<String>,
    /// Currently open block and the line it started on
    block: Option<(Block, usize)>,
}

impl Parser {
    fn new(path: &Path) -> Self {
        Self {
            path: path.to_path_buf(),
            entries: Vec::new(),
            pending: Vec::new(),
            block: None,
        }
    }

    fn error(&self, line: usize, message: impl Into<String>) -> ManifestError {
        ManifestError::parse_error(&self.path, line, message)
    }

    fn parse(mut self, content: &str) -> Result<GoModFile, ManifestError> {
        for (index, raw) in content.lines().enumerate() {
            let lineno = index + 1;
            let lexed = lex(raw).map_err(|message| self.error(lineno, message))?;
            self.accept(lexed, lineno)?;
        }

        if let Some((block, started)) = &self.block {
            return Err(self.error(*started, format!("unterminated {} block", block.verb)));
        }

        self.flush_pending();
        Ok(GoModFile {
            entries: self.entries,
        })
    }

    /// Where new entries go: the open block, or the top level
    fn target(&mut self) -> &mut Vec<Entry> {
        match self.block.as_mut() {
            Some((block, _)) => &mut block.items,
            None => &mut self.entries,
        }
    }

    /// Pending comments not followed by a statement become standalone entries
    fn flush_pending(&mut self) {
        let pending = std::mem::take(&mut self.pending);
        self.target().extend(pending.into_iter().map(Entry::Comment));
    }

    fn accept(&mut self, lexed: Lexed, lineno: usize) -> Result<(), ManifestError> {
        let Lexed { tokens, comment } = lexed;

        if tokens.is_empty() {
            match comment {
                Some(comment) => self.pending.push(comment),
                None => {
                    self.flush_pending();
                    self.target().push(Entry::Blank);
                }
            }
            return Ok(());
        }

        if tokens.len() == 1 && tokens[0] == ")" {
            return self.close_block(comment, lineno);
        }

        if tokens.len() == 2 && tokens[1] == "(" {
            return self.open_block(&tokens[0], comment, lineno);
        }

        if tokens.iter().any(|t| t == "(" || t == ")") {
            return Err(self.error(lineno, "unexpected parenthesis"));
        }

        let verb = match &self.block {
            Some((block, _)) => block.verb.clone(),
            None => {
                let verb = tokens[0].clone();
                if !KNOWN_VERBS.contains(&verb.as_str()) {
                    return Err(self.error(lineno, format!("unknown directive: {}", verb)));
                }
                verb
            }
        };

        let args = if self.block.is_some() {
            &tokens[..]
        } else {
            &tokens[1..]
        };
        self.validate(&verb, args, lineno)?;

        let line = Line {
            before: std::mem::take(&mut self.pending),
            tokens,
            suffix: comment,
        };
        self.target().push(Entry::Line(line));
        Ok(())
    }

    fn open_block(
        &mut self,
        verb: &str,
        comment: Option<String>,
        lineno: usize,
    ) -> Result<(), ManifestError> {
        if self.block.is_some() {
            return Err(self.error(lineno, "nested blocks are not allowed"));
        }
        if !KNOWN_VERBS.contains(&verb) {
            return Err(self.error(lineno, format!("unknown directive: {}", verb)));
        }
        if SINGLE_LINE_VERBS.contains(&verb) {
            return Err(self.error(lineno, format!("{} cannot be used as a block", verb)));
        }

        let block = Block {
            before: std::mem::take(&mut self.pending),
            verb: verb.to_string(),
            open_suffix: comment,
            items: Vec::new(),
            close_suffix: None,
        };
        self.block = Some((block, lineno));
        Ok(())
    }

    fn close_block(&mut self, comment: Option<String>, lineno: usize) -> Result<(), ManifestError> {
        if self.block.is_none() {
            return Err(self.error(lineno, "unexpected )"));
        }
        self.flush_pending();

        if let Some((mut block, _)) = self.block.take() {
            block.close_suffix = comment;
            self.entries.push(Entry::Block(block));
        }
        Ok(())
    }

    /// Check argument shape for a directive
    fn validate(&self, verb: &str, args: &[String], lineno: usize) -> Result<(), ManifestError> {
        let expect = |ok: bool, usage: &str| {
            if ok {
                Ok(())
            } else {
                Err(self.error(lineno, format!("usage: {}", usage)))
            }
        };

        match verb {
            "module" => expect(args.len() == 1, "module module/path"),
            "go" => expect(args.len() == 1, "go 1.23"),
            "toolchain" => expect(args.len() == 1, "toolchain go1.23.0"),
            REQUIRE => expect(args.len() == 2, "require module/path v1.2.3"),
            "exclude" => expect(args.len() == 2, "exclude module/path v1.2.3"),
            "retract" => expect(
                is_retract_target(args),
                "retract v1.2.3 or retract [v1.2.3, v1.2.4]",
            ),
            "replace" => {
                let arrow = args.iter().position(|a| a == "=>");
                let ok = match arrow {
                    Some(i) => (1..=2).contains(&i) && (1..=2).contains(&(args.len() - i - 1)),
                    None => false,
                };
                expect(
                    ok,
                    "replace module/path [v1.2.3] => other/module [v1.4.5]",
                )
            }
            "tool" => expect(args.len() == 1, "tool module/path/cmd"),
            "ignore" => expect(args.len() == 1, "ignore ./path"),
            _ => expect(!args.is_empty(), &format!("{} arguments", verb)),
        }
    }
}
