//! Symbol Bridge
//!
//! Turns the in-scope symbols reported by the host's document index into
//! completion items. The engine does not own or compute these symbols; it
//! reads them through [`DocumentInfo`].

use crate::item::{CompletionItem, CompletionKind, Position};

/// Semantic kind of a symbol, as reported by the document index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SymbolKind {
    Field,
    Variable,
    Function,
    Method,
    Namespace,
    Module,
    Constant,
    Theorem,
    Property,
    Other,
}

/// A symbol visible at the cursor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SymbolRecord {
    pub name: String,
    pub kind: SymbolKind,
}

impl SymbolRecord {
    pub fn new(name: impl Into<String>, kind: SymbolKind) -> Self {
        Self {
            name: name.into(),
            kind,
        }
    }
}

/// Read-only view of a document supplied by the host.
pub trait DocumentInfo {
    /// Symbols in scope for the document, in the order the index produced them.
    fn symbols(&self) -> &[SymbolRecord];

    /// Whether `position` lies inside an embedded algorithm block.
    fn is_inside_sub_block(&self, position: Position) -> bool;
}

impl<T: DocumentInfo + ?Sized> DocumentInfo for &T {
    fn symbols(&self) -> &[SymbolRecord] {
        (**self).symbols()
    }

    fn is_inside_sub_block(&self, position: Position) -> bool {
        (**self).is_inside_sub_block(position)
    }
}

/// Maps a symbol kind to a completion kind. `None` means no specific mapping.
pub fn completion_kind(kind: SymbolKind) -> Option<CompletionKind> {
    match kind {
        SymbolKind::Field => Some(CompletionKind::Field),
        SymbolKind::Variable => Some(CompletionKind::Variable),
        SymbolKind::Function => Some(CompletionKind::Function),
        SymbolKind::Method => Some(CompletionKind::Method),
        SymbolKind::Namespace | SymbolKind::Module => Some(CompletionKind::Module),
        SymbolKind::Constant => Some(CompletionKind::Constant),
        SymbolKind::Theorem | SymbolKind::Property | SymbolKind::Other => None,
    }
}

/// One completion item per symbol. Order and duplicates are preserved.
pub fn symbol_items(symbols: &[SymbolRecord]) -> impl Iterator<Item = CompletionItem> + '_ {
    symbols.iter().filter(|s| !s.name.is_empty()).map(|symbol| {
        let kind = completion_kind(symbol.kind).unwrap_or(CompletionKind::Text);
        CompletionItem::new(symbol.name.clone(), kind)
    })
}
