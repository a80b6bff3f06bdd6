//! Completion Item Model
//!
//! Editor-neutral completion records produced by the engine. The LSP layer
//! converts these into `lsp_types::CompletionItem`s; nothing in this module
//! knows about the wire protocol.

use std::fmt;

/// A position in a text document expressed as line and character offset.
///
/// Line and character are both zero-based. Character offset is measured in
/// UTF-16 code units (as per LSP specification).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Position {
    /// Zero-based line number.
    pub line: u32,
    /// Zero-based character offset (UTF-16 code units).
    pub character: u32,
}

impl Position {
    /// Creates a new position at the given line and character.
    pub fn new(line: u32, character: u32) -> Self {
        Self { line, character }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line + 1, self.character + 1)
    }
}

/// A replacement range on the cursor's line, in UTF-16 columns.
///
/// `start` is inclusive and `end` exclusive, so `start == end` is an empty
/// insertion point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EditRange {
    /// First replaced column.
    pub start: u32,
    /// Column just past the replaced text (the cursor).
    pub end: u32,
}

impl EditRange {
    pub fn new(start: u32, end: u32) -> Self {
        Self { start, end }
    }
}

/// The kind of a completion item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CompletionKind {
    /// A language keyword.
    Keyword,
    /// A backslash-prefixed operator such as `\in`.
    Operator,
    /// A constant, either built in (`TRUE`) or declared.
    Constant,
    /// A module name.
    Module,
    /// A record field.
    Field,
    /// A state variable.
    Variable,
    /// An operator definition.
    Function,
    /// A method.
    Method,
    /// A namespace.
    Namespace,
    /// Plain text, used when nothing more specific applies.
    Text,
}

/// A single completion suggestion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletionItem {
    /// The completion label (shown in the list). Never empty.
    pub label: String,
    /// The kind of completion.
    pub kind: CompletionKind,
    /// Short detail text (shown next to label).
    pub detail: Option<String>,
    /// The text to insert. Filled in by the resolver, not when listing.
    pub insert_text: Option<String>,
    /// Replacement range, when the default word range would be wrong.
    pub range: Option<EditRange>,
}

impl CompletionItem {
    /// Creates a new completion item.
    pub fn new(label: impl Into<String>, kind: CompletionKind) -> Self {
        let label = label.into();
        debug_assert!(!label.is_empty(), "completion labels must not be empty");
        Self {
            label,
            kind,
            detail: None,
            insert_text: None,
            range: None,
        }
    }

    /// Sets the detail text.
    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }

    /// Sets the explicit replacement range.
    pub fn with_range(mut self, range: EditRange) -> Self {
        self.range = Some(range);
        self
    }
}

/// The result of a completion request.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CompletionList {
    /// Candidates in categorical order.
    pub items: Vec<CompletionItem>,
    /// Always `false`: the engine never asks the client to re-query.
    pub is_incomplete: bool,
}

impl CompletionList {
    /// A complete list with the given items.
    pub fn complete(items: Vec<CompletionItem>) -> Self {
        Self {
            items,
            is_incomplete: false,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }
}
