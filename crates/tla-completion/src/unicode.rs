//! Unicode Resolution Policy
//!
//! Decides whether an accepted operator is inserted as its ASCII spelling
//! (`\in `) or as its Unicode glyph (`∈ `).

use crate::catalog::{glyph, ESCAPE_MARKER};

/// Read access to the user's rendering preference.
///
/// Queried each time an item is resolved, so a preference changed at runtime
/// takes effect on the next accepted completion.
pub trait UnicodePreference {
    /// Whether operators should be inserted as Unicode glyphs.
    fn prefer_unicode(&self) -> bool;
}

impl UnicodePreference for bool {
    fn prefer_unicode(&self) -> bool {
        *self
    }
}

impl<T: UnicodePreference + ?Sized> UnicodePreference for &T {
    fn prefer_unicode(&self) -> bool {
        (**self).prefer_unicode()
    }
}

/// Computes the insert text for an operator label.
///
/// The label may carry a leading escape marker or not. Operators without a
/// glyph always fall back to the escaped ASCII form. The result ends in
/// exactly one space.
pub fn resolve_operator(label: &str, prefer_unicode: bool) -> String {
    let name = label.strip_prefix(ESCAPE_MARKER).unwrap_or(label);

    match glyph(name) {
        Some(g) if prefer_unicode => format!("{g} "),
        _ => format!("{ESCAPE_MARKER}{name} "),
    }
}
