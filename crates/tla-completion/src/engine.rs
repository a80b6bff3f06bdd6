//! Item Assembler and Resolver
//!
//! The engine answers two questions. When the user asks for completions it
//! classifies the cursor context and assembles the matching catalog and
//! symbol items, in categorical order. When the user is about to accept one
//! item it finalizes that item's insert text.
//!
//! ```text
//!   line prefix + sub-block flag
//!              |
//!              v
//!        classify()  ------------------+
//!              |                       |
//!         ContextBucket          operator range
//!              |                       |
//!              v                       v
//!   catalog items  +  symbol items  ->  CompletionList
//!
//!   accepted item + UnicodePreference -> resolve() -> insert text
//! ```

use rustc_hash::FxHashSet;
use tracing::debug;

use crate::catalog;
use crate::context::{classify, ContextBucket};
use crate::item::{CompletionItem, CompletionKind, CompletionList, EditRange, Position};
use crate::symbols::{symbol_items, DocumentInfo};
use crate::unicode::{resolve_operator, UnicodePreference};

/// The completion engine.
///
/// Holds no per-request state; one instance can serve any number of
/// concurrent requests.
#[derive(Debug, Clone, Copy, Default)]
pub struct CompletionEngine;

impl CompletionEngine {
    /// Creates a new completion engine.
    pub fn new() -> Self {
        Self
    }

    /// Computes completions for a cursor.
    ///
    /// `prefix` is the text of the cursor's line up to `position`. The result
    /// is always complete; an empty list is a real answer, not a missing one.
    pub fn provide<D>(&self, prefix: &str, position: Position, document: &D) -> CompletionList
    where
        D: DocumentInfo + ?Sized,
    {
        let inside_sub_block = document.is_inside_sub_block(position);
        let bucket = classify(prefix, inside_sub_block);

        debug!(
            "Completion at {} classified as {} (sub-block: {})",
            position,
            bucket.name(),
            inside_sub_block
        );

        let items = self.assemble(bucket, document);
        CompletionList::complete(items)
    }

    /// Builds the ordered item list for a bucket.
    pub fn assemble<D>(&self, bucket: ContextBucket, document: &D) -> Vec<CompletionItem>
    where
        D: DocumentInfo + ?Sized,
    {
        match bucket {
            ContextBucket::StdModulesOnly => module_items(),
            ContextBucket::NoCompletions => Vec::new(),
            ContextBucket::OperatorsOnly { range } => operator_items(range),
            ContextBucket::GeneralWithStartingKeywords => {
                general_items(catalog::STARTING_KEYWORDS, document)
            }
            ContextBucket::GeneralWithProofKeywords => {
                general_items(catalog::PROOF_STARTING_KEYWORDS, document)
            }
            ContextBucket::GeneralOnly => general_items(&[], document),
        }
    }

    /// Finalizes the insert text of an accepted item.
    ///
    /// Keywords get a trailing space, operators are rendered according to
    /// the preference as it is right now, everything else is unchanged.
    /// Resolving an item twice under the same preference gives the same text.
    pub fn resolve<P>(&self, mut item: CompletionItem, preference: &P) -> CompletionItem
    where
        P: UnicodePreference + ?Sized,
    {
        match item.kind {
            CompletionKind::Keyword => {
                item.insert_text = Some(format!("{} ", item.label));
            }
            CompletionKind::Operator => {
                item.insert_text = Some(resolve_operator(&item.label, preference.prefer_unicode()));
            }
            _ => {}
        }
        item
    }
}

fn module_items() -> Vec<CompletionItem> {
    catalog::STANDARD_MODULES
        .iter()
        .map(|(name, detail)| CompletionItem::new(*name, CompletionKind::Module).with_detail(*detail))
        .collect()
}

fn operator_items(range: EditRange) -> Vec<CompletionItem> {
    catalog::OPERATORS
        .iter()
        .map(|name| {
            let item = CompletionItem::new(catalog::operator_label(name), CompletionKind::Operator)
                .with_range(range);
            match catalog::glyph(name) {
                Some(glyph) => item.with_detail(glyph),
                None => item,
            }
        })
        .collect()
}

/// Leading keyword class, then general keywords, then constants, then
/// symbols. Catalog entries appear once; symbols pass through as given.
fn general_items<D>(leading: &[(&str, &str)], document: &D) -> Vec<CompletionItem>
where
    D: DocumentInfo + ?Sized,
{
    let symbols = document.symbols();
    let catalog_len = leading.len() + catalog::GENERAL_KEYWORDS.len() + catalog::CONSTANTS.len();
    let mut items = Vec::with_capacity(catalog_len + symbols.len());
    let mut seen = FxHashSet::default();

    let keywords = leading
        .iter()
        .chain(catalog::GENERAL_KEYWORDS)
        .map(|entry| (entry, CompletionKind::Keyword));
    let constants = catalog::CONSTANTS
        .iter()
        .map(|entry| (entry, CompletionKind::Constant));

    for ((label, detail), kind) in keywords.chain(constants) {
        if seen.insert(*label) {
            items.push(CompletionItem::new(*label, kind).with_detail(*detail));
        }
    }

    items.extend(symbol_items(symbols));
    items
}
