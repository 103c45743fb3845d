//! String interner for names shared across the type index.
//!
//! Uses `Arc<str>` so interned names can cross threads (symbol services are
//! `Send + Sync`). Identical strings share the same allocation.

use rustc_hash::FxHashSet;
use std::sync::Arc;

/// An interned string - cheap to clone (just an atomic increment)
pub type IStr = Arc<str>;

/// String interner that deduplicates strings.
#[derive(Debug, Default, Clone)]
pub struct Interner {
    strings: FxHashSet<Arc<str>>,
}

impl Interner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Intern a string, returning a cheap-to-clone reference.
    ///
    /// If the string was already interned, returns the existing `Arc`.
    pub fn intern(&mut self, s: &str) -> IStr {
        if let Some(existing) = self.strings.get(s) {
            Arc::clone(existing)
        } else {
            let arc: Arc<str> = Arc::from(s);
            self.strings.insert(Arc::clone(&arc));
            arc
        }
    }
}
