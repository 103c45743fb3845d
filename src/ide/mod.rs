//! IDE features: chain completion on top of the semantic layer.
//!
//! ## Design Principles
//!
//! 1. **Pure functions**: take a symbol service and a request, return items
//! 2. **No LSP types**: uses our own types, converted at the LSP boundary
//! 3. **Composable**: built on `hir` lookups and the chain search
//!
//! ## Usage
//!
//! ```ignore
//! use chainsearch::ide::{ChainRequest, LocalVar, chain_completions};
//!
//! let request = ChainRequest::new(current_class, [expected])
//!     .with_local(LocalVar::new(LocalId(0), "order", "Order"));
//! let items = chain_completions(&index, &request, &CancellationToken::new());
//! ```

pub mod chains;
mod completion;

pub use chains::{
    ChainOptions, ChainPath, ChainSearchEngine, EntryPointCollector, LocalVar, SearchBounds,
    SearchStats, render_chain, render_chain_snippet,
};
pub use completion::{ChainRequest, CompletionItem, CompletionKind, chain_completions};
