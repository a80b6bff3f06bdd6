//! Lexical Context Classifier
//!
//! Decides which class of suggestions is valid at the cursor by looking only
//! at the text between the start of the line and the cursor. There is no
//! parser involved; the classification is an ordered table of small lexical
//! rules, and the first rule that fires wins.
//!
//! | order | rule          | fires when                                          | bucket                      |
//! |-------|---------------|-----------------------------------------------------|-----------------------------|
//! | 1     | module import | line starts with `EXTENDS `                         | [`ContextBucket::StdModulesOnly`] |
//! | 2     | declaration   | line starts with `CONSTANT(S) ` or `RECURSIVE `     | [`ContextBucket::NoCompletions`]  |
//! | 3     | operator      | prefix ends in `\word`, not part of `/\`            | [`ContextBucket::OperatorsOnly`]  |
//! | 4     | general       | always                                              | one of the `General*` buckets     |
//!
//! The rules do not commute: `EXTENDS \in` is still a module list, and
//! `CONSTANT \` offers nothing.

use tracing::trace;

use crate::catalog::{ESCAPE_MARKER, MODULE_IMPORT_KEYWORD, NO_COMPLETION_KEYWORDS};
use crate::item::EditRange;

/// The class of completions valid at the cursor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContextBucket {
    /// After `EXTENDS`: standard module names only.
    StdModulesOnly,
    /// After a constant or recursive declaration keyword: nothing at all.
    NoCompletions,
    /// After an escape marker: operators only, replacing `range`.
    OperatorsOnly {
        /// Span from the escape marker to the cursor.
        range: EditRange,
    },
    /// At the start of a line: starting keywords plus the general set.
    GeneralWithStartingKeywords,
    /// After a proof step number: proof keywords plus the general set.
    GeneralWithProofKeywords,
    /// Keywords, constants and symbols.
    GeneralOnly,
}

impl ContextBucket {
    /// Short name used in logs.
    pub fn name(&self) -> &'static str {
        match self {
            ContextBucket::StdModulesOnly => "std-modules",
            ContextBucket::NoCompletions => "none",
            ContextBucket::OperatorsOnly { .. } => "operators",
            ContextBucket::GeneralWithStartingKeywords => "general+starting",
            ContextBucket::GeneralWithProofKeywords => "general+proof",
            ContextBucket::GeneralOnly => "general",
        }
    }
}

/// What the classifier sees of the document.
#[derive(Debug, Clone, Copy)]
pub struct LineContext<'a> {
    /// Text from the start of the line up to the cursor.
    pub prefix: &'a str,
    /// Whether the cursor is inside an embedded algorithm block.
    pub inside_sub_block: bool,
}

impl<'a> LineContext<'a> {
    pub fn new(prefix: &'a str, inside_sub_block: bool) -> Self {
        Self {
            prefix,
            inside_sub_block,
        }
    }
}

type Rule = fn(&LineContext<'_>) -> Option<ContextBucket>;

/// The decision table, in precedence order.
const RULES: &[(&str, Rule)] = &[
    ("module-import", module_import_rule),
    ("declaration", declaration_rule),
    ("operator", operator_rule),
    ("general", general_rule),
];

/// Classifies the cursor context. Never fails; unrecognized input lands in
/// [`ContextBucket::GeneralOnly`].
pub fn classify(prefix: &str, inside_sub_block: bool) -> ContextBucket {
    let ctx = LineContext::new(prefix, inside_sub_block);

    for (name, rule) in RULES {
        if let Some(bucket) = rule(&ctx) {
            trace!(rule = name, bucket = bucket.name(), "classified completion context");
            return bucket;
        }
    }

    ContextBucket::GeneralOnly
}

fn module_import_rule(ctx: &LineContext<'_>) -> Option<ContextBucket> {
    (leading_keyword(ctx.prefix)? == MODULE_IMPORT_KEYWORD).then_some(ContextBucket::StdModulesOnly)
}

fn declaration_rule(ctx: &LineContext<'_>) -> Option<ContextBucket> {
    let keyword = leading_keyword(ctx.prefix)?;
    NO_COMPLETION_KEYWORDS
        .contains(&keyword)
        .then_some(ContextBucket::NoCompletions)
}

fn operator_rule(ctx: &LineContext<'_>) -> Option<ContextBucket> {
    operator_range(ctx.prefix).map(|range| ContextBucket::OperatorsOnly { range })
}

fn general_rule(ctx: &LineContext<'_>) -> Option<ContextBucket> {
    if ctx.inside_sub_block {
        return Some(ContextBucket::GeneralOnly);
    }

    let bucket = if is_proof_step(ctx.prefix) {
        ContextBucket::GeneralWithProofKeywords
    } else if is_line_start(ctx.prefix) {
        ContextBucket::GeneralWithStartingKeywords
    } else {
        ContextBucket::GeneralOnly
    };
    Some(bucket)
}

/// Returns the replacement range for an operator being typed, if any.
///
/// The prefix must end in the escape marker followed by word characters, and
/// the marker must not be the tail of the `/\` conjunction. The range starts
/// at the marker itself: editors compute word ranges without it, which would
/// leave a stray `\` in front of an inserted glyph.
pub fn operator_range(prefix: &str) -> Option<EditRange> {
    let head = prefix.trim_end_matches(is_word_char);
    let before_marker = head.strip_suffix(ESCAPE_MARKER)?;
    if before_marker.ends_with('/') {
        return None;
    }

    Some(EditRange::new(utf16_len(before_marker), utf16_len(prefix)))
}

/// Matches `<level>label<whitespace>partial`, e.g. `<1>2a. QE` or `<3> `.
///
/// Levels are decimal numbers, `*` or `+`; labels are letters, digits and
/// dots.
pub fn is_proof_step(prefix: &str) -> bool {
    let Some(rest) = prefix.trim_start().strip_prefix('<') else {
        return false;
    };
    let Some(close) = rest.find('>') else {
        return false;
    };

    let level = &rest[..close];
    let valid_level = matches!(level, "*" | "+")
        || (!level.is_empty() && level.bytes().all(|b| b.is_ascii_digit()));
    if !valid_level {
        return false;
    }

    let after_level = &rest[close + 1..];
    let label_end = after_level
        .find(|c: char| !(c.is_ascii_alphanumeric() || c == '.'))
        .unwrap_or(after_level.len());
    let after_label = &after_level[label_end..];

    let partial = after_label.trim_start();
    partial.len() < after_label.len() && partial.chars().all(is_word_char)
}

/// Only whitespace and a partial identifier precede the cursor.
pub fn is_line_start(prefix: &str) -> bool {
    prefix.trim_start().chars().all(is_word_char)
}

/// The first word of the line, if it is followed by whitespace.
fn leading_keyword(prefix: &str) -> Option<&str> {
    let line = prefix.trim_start();
    let end = line.find(|c: char| !is_word_char(c))?;
    let (word, rest) = line.split_at(end);

    (!word.is_empty() && rest.starts_with(char::is_whitespace)).then_some(word)
}

fn is_word_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

fn utf16_len(s: &str) -> u32 {
    s.encode_utf16().count() as u32
}
