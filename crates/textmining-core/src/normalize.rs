//! Case and accent folding applied to both terms and page lines

use unicode_normalization::{char::is_combining_mark, UnicodeNormalization};

/// Text folding used before every containment test
///
/// Lower-casing is always applied. Diacritic folding is opt-in so that the
/// default matching stays a plain case-insensitive substring test.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Normalizer {
    pub fold_diacritics: bool,
}

impl Normalizer {
    pub fn new(fold_diacritics: bool) -> Self {
        Self { fold_diacritics }
    }

    /// Fold a page line (no trimming, offsets inside the line still matter)
    pub fn fold(&self, text: &str) -> String {
        if self.fold_diacritics {
            remove_diacritics(text).to_lowercase()
        } else {
            text.to_lowercase()
        }
    }

    /// Fold a condition term: trimmed, then folded like a line
    pub fn fold_term(&self, term: &str) -> String {
        self.fold(term.trim()).trim().to_string()
    }
}

/// Strip combining marks after canonical decomposition ("Ação" -> "Acao")
pub fn remove_diacritics(text: &str) -> String {
    text.nfd()
        .filter(|c| !is_combining_mark(*c))
        .nfc()
        .collect()
}
