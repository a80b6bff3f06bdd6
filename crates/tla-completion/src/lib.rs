//! TLA+ Completion Engine
//!
//! This crate decides what can be completed at a cursor in a TLA+ module and
//! produces the matching items: top-level keywords, proof-step keywords,
//! backslash operators, standard module names and in-scope symbols.
//!
//! # Architecture
//!
//! - **Catalog**: immutable keyword, operator and module tables
//! - **Classifier**: ordered lexical rules over the text before the cursor
//! - **Symbol Bridge**: host-supplied symbols mapped to completion kinds
//! - **Engine**: assembles items per context and resolves accepted items
//!
//! Operators can be inserted either as ASCII (`\in`) or as Unicode glyphs
//! (`∈`). The choice is made when an item is resolved, using whatever the
//! [`UnicodePreference`] reports at that moment.
//!
//! # Modules
//!
//! - [`catalog`]: Classification tables and the operator glyph map
//! - [`context`]: The lexical context classifier
//! - [`engine`]: Item assembly and resolution
//! - [`item`]: Completion records
//! - [`symbols`]: The document info capability and symbol mapping
//! - [`unicode`]: ASCII / Unicode operator rendering

pub mod catalog;
pub mod context;
pub mod engine;
pub mod item;
pub mod symbols;
pub mod unicode;

pub use context::{classify, ContextBucket};
pub use engine::CompletionEngine;
pub use item::{CompletionItem, CompletionKind, CompletionList, EditRange, Position};
pub use symbols::{DocumentInfo, SymbolKind, SymbolRecord};
pub use unicode::{resolve_operator, UnicodePreference};
