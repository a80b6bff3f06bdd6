//! Textual Document Index
//!
//! A line-oriented scan of a TLA+ module that recovers what the completion
//! engine needs from the host: the names declared in the module and the line
//! spans of embedded PlusCal algorithms. It is not a parser; definitions are
//! recognized by their shape at the start of a line.

use std::borrow::Cow;

use ropey::Rope;
use tla_completion::{DocumentInfo, Position, SymbolKind, SymbolRecord};

/// Symbols and algorithm spans for one document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DocumentIndex {
    symbols: Vec<SymbolRecord>,
    /// Zero-based `(first, last)` line spans, both inclusive.
    algorithms: Vec<(u32, u32)>,
}

impl DocumentIndex {
    /// Scans `content` and builds the index.
    ///
    /// Lines are numbered the way the rope numbers them, which is also how
    /// cursor positions are resolved.
    pub fn build(content: &Rope) -> Self {
        let mut scanner = Scanner::default();
        for (line_num, line) in content.lines().enumerate() {
            let line: Cow<'_, str> = line.into();
            scanner.scan_line(line_num as u32, line.trim_end_matches(is_line_break));
        }
        scanner.finish()
    }

    /// Algorithm spans, in source order.
    pub fn algorithms(&self) -> &[(u32, u32)] {
        &self.algorithms
    }
}

impl DocumentInfo for DocumentIndex {
    fn symbols(&self) -> &[SymbolRecord] {
        &self.symbols
    }

    fn is_inside_sub_block(&self, position: Position) -> bool {
        self.algorithms
            .iter()
            .any(|&(first, last)| position.line >= first && position.line <= last)
    }
}

#[derive(Default)]
struct Scanner {
    symbols: Vec<SymbolRecord>,
    algorithms: Vec<(u32, u32)>,
    comment_depth: u32,
    algorithm: Option<OpenAlgorithm>,
    /// Declaration keyword whose list continues on the next line.
    continuation: Option<SymbolKind>,
}

/// An algorithm whose end has not been seen yet.
#[derive(Debug, Clone, Copy)]
struct OpenAlgorithm {
    start: u32,
    /// Comment depth before the `--algorithm` line.
    base_depth: u32,
    /// Whether the enclosing block comment has been opened.
    in_comment: bool,
}

impl Scanner {
    fn scan_line(&mut self, line_num: u32, line: &str) {
        let raw = line.trim();

        if self.algorithm.is_none() && is_algorithm_start(raw) {
            self.algorithm = Some(OpenAlgorithm {
                start: line_num,
                base_depth: self.comment_depth,
                in_comment: false,
            });
        }

        if let Some(mut open) = self.algorithm {
            let code = strip_line_comment(line);
            self.scan_pluscal(code.trim());
            strip_block_comments(line, &mut self.comment_depth);
            open.in_comment |= self.comment_depth > open.base_depth;

            // P-syntax ends at `end algorithm`; C-syntax only at the close
            // of the comment that holds it.
            let comment_closed = open.in_comment && self.comment_depth <= open.base_depth;
            if raw.starts_with("end algorithm") || comment_closed {
                self.algorithms.push((open.start, line_num));
                self.algorithm = None;
                self.continuation = None;
            } else {
                self.algorithm = Some(open);
            }
            return;
        }

        let code = strip_block_comments(line, &mut self.comment_depth);
        let code = strip_line_comment(&code);
        self.scan_module(code);
    }

    fn scan_module(&mut self, code: &str) {
        let trimmed = code.trim();
        if trimmed.is_empty() {
            return;
        }

        if let Some(kind) = self.continuation.take() {
            self.push_list(trimmed, kind);
            return;
        }

        if let Some(name) = module_header(trimmed) {
            self.push(name, SymbolKind::Module);
            return;
        }

        let (keyword, rest) = split_keyword(trimmed);
        match keyword {
            "VARIABLE" | "VARIABLES" => self.push_list(rest, SymbolKind::Variable),
            "CONSTANT" | "CONSTANTS" => self.push_list(rest, SymbolKind::Constant),
            "THEOREM" | "LEMMA" | "PROPOSITION" | "COROLLARY" => {
                if let Some(name) = named_statement(rest) {
                    self.push(name, SymbolKind::Theorem);
                }
            }
            "ASSUME" | "ASSUMPTION" | "AXIOM" => {
                if let Some(name) = named_statement(rest) {
                    self.push(name, SymbolKind::Property);
                }
            }
            _ => {
                // Definitions start in the first column, possibly after LOCAL.
                if code.starts_with(char::is_whitespace) {
                    return;
                }
                let definition = trimmed.strip_prefix("LOCAL ").map(str::trim_start).unwrap_or(trimmed);
                if let Some((name, body)) = definition_head(definition) {
                    let kind = if body.trim_start().starts_with("INSTANCE") {
                        SymbolKind::Namespace
                    } else {
                        SymbolKind::Function
                    };
                    self.push(name, kind);
                }
            }
        }
    }

    fn scan_pluscal(&mut self, code: &str) {
        if code.is_empty() {
            return;
        }

        if let Some(kind) = self.continuation.take() {
            self.push_list(code, kind);
            return;
        }

        let (keyword, rest) = split_keyword(code);
        match keyword {
            "variable" | "variables" => self.push_list(rest, SymbolKind::Variable),
            "procedure" | "macro" => {
                if let Some(name) = leading_identifier(rest) {
                    self.push(name, SymbolKind::Method);
                }
            }
            _ => {}
        }
    }

    /// Pushes the leading identifier of each top-level comma segment.
    ///
    /// A bare keyword or a trailing comma continues the list on the next line.
    fn push_list(&mut self, list: &str, kind: SymbolKind) {
        for segment in split_top_level(list) {
            if let Some(name) = leading_identifier(segment.trim()) {
                self.push(name, kind);
            }
        }
        let tail = list.trim_end();
        if tail.is_empty() || tail.ends_with(',') {
            self.continuation = Some(kind);
        }
    }

    fn push(&mut self, name: &str, kind: SymbolKind) {
        self.symbols.push(SymbolRecord::new(name, kind));
    }

    fn finish(mut self) -> DocumentIndex {
        if let Some(open) = self.algorithm.take() {
            self.algorithms.push((open.start, u32::MAX));
        }
        DocumentIndex {
            symbols: self.symbols,
            algorithms: self.algorithms,
        }
    }
}

/// Line terminators the rope splits on.
pub(crate) fn is_line_break(c: char) -> bool {
    matches!(
        c,
        '\n' | '\r' | '\u{0B}' | '\u{0C}' | '\u{85}' | '\u{2028}' | '\u{2029}'
    )
}

fn is_algorithm_start(line: &str) -> bool {
    line.contains("--algorithm") || line.contains("--fair algorithm")
}

/// `---- MODULE Name ----`
fn module_header(line: &str) -> Option<&str> {
    if !line.starts_with("----") {
        return None;
    }
    let rest = line.trim_start_matches('-').trim_start();
    let rest = rest.strip_prefix("MODULE")?;
    leading_identifier(rest.trim_start())
}

/// Splits off the first whitespace-delimited word.
fn split_keyword(line: &str) -> (&str, &str) {
    match line.find(char::is_whitespace) {
        Some(idx) => (&line[..idx], line[idx..].trim_start()),
        None => (line, ""),
    }
}

/// `Name == ...` after THEOREM-like keywords.
fn named_statement(rest: &str) -> Option<&str> {
    let name = leading_identifier(rest)?;
    rest[name.len()..].trim_start().starts_with("==").then_some(name)
}

/// Recognizes `Name ==`, `Name(p, q) ==` and `Name[x \in S] ==`.
///
/// Returns the name and the text after `==`.
fn definition_head(line: &str) -> Option<(&str, &str)> {
    let name = leading_identifier(line)?;
    let mut rest = line[name.len()..].trim_start();

    if let Some(open) = rest.chars().next().filter(|c| matches!(c, '(' | '[')) {
        let close = if open == '(' { ')' } else { ']' };
        let end = matching_close(rest, open, close)?;
        rest = rest[end + 1..].trim_start();
    }

    let body = rest.strip_prefix("==")?;
    // `===` is a module terminator, not a definition.
    if body.starts_with('=') {
        return None;
    }
    Some((name, body))
}

fn matching_close(text: &str, open: char, close: char) -> Option<usize> {
    let mut depth = 0usize;
    for (idx, c) in text.char_indices() {
        if c == open {
            depth += 1;
        } else if c == close {
            depth = depth.checked_sub(1)?;
            if depth == 0 {
                return Some(idx);
            }
        }
    }
    None
}

fn leading_identifier(text: &str) -> Option<&str> {
    let mut chars = text.char_indices();
    let (_, first) = chars.next()?;
    if !(first.is_alphabetic() || first == '_') {
        return None;
    }
    let end = chars
        .find(|(_, c)| !(c.is_alphanumeric() || *c == '_'))
        .map(|(idx, _)| idx)
        .unwrap_or(text.len());
    Some(&text[..end])
}

/// Splits on `,` and `;` outside brackets and `<< >>` tuples.
fn split_top_level(text: &str) -> Vec<&str> {
    let mut segments = Vec::new();
    let mut depth = 0i32;
    let mut start = 0;
    let bytes = text.as_bytes();

    for (idx, &b) in bytes.iter().enumerate() {
        match b {
            b'(' | b'[' | b'{' => depth += 1,
            b')' | b']' | b'}' => depth -= 1,
            b'<' if bytes.get(idx + 1) == Some(&b'<') => depth += 1,
            b'>' if idx > 0 && bytes[idx - 1] == b'>' => depth -= 1,
            b',' | b';' if depth <= 0 => {
                segments.push(&text[start..idx]);
                start = idx + 1;
            }
            _ => {}
        }
    }
    segments.push(&text[start..]);
    segments
}

fn strip_line_comment(line: &str) -> &str {
    match line.find("\\*") {
        Some(idx) => &line[..idx],
        None => line,
    }
}

/// Removes `(* ... *)` spans, tracking nesting across lines.
fn strip_block_comments(line: &str, depth: &mut u32) -> String {
    let mut code = String::with_capacity(line.len());
    let mut rest = line;

    while !rest.is_empty() {
        if rest.starts_with("(*") {
            *depth += 1;
            rest = &rest[2..];
        } else if *depth > 0 && rest.starts_with("*)") {
            *depth -= 1;
            rest = &rest[2..];
        } else {
            let c = rest.chars().next().unwrap_or_default();
            if *depth == 0 {
                code.push(c);
            }
            rest = &rest[c.len_utf8()..];
        }
    }
    code
}
