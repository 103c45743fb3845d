//! Chain completion: find member-access chains that produce a value of an
//! expected type.
//!
//! ```text
//! EntryPointCollector ──► ChainSearchEngine ──► ChainPath ──► render_chain
//!   locals, receiver        BFS over MemberLookup,            dotted text /
//!   members, anchors        bounded by SearchBounds           LSP snippet
//! ```
//!
//! Every search owns its caches; construct one engine per request.

mod arena;
mod cancel;
mod engine;
mod entry;
mod options;
mod path;
mod render;

pub use arena::{ChainArena, NodeId};
pub use cancel::{AnyCancel, CancelCheck, Deadline, NeverCancel};
pub use engine::{ChainSearchEngine, ExcludedTypes, SearchStats};
pub use entry::{EntryPointCollector, LocalVar};
pub use options::{ChainOptions, DEFAULT_IGNORED_TYPES, DEFAULT_TIMEOUT, MAX_QUEUE_SIZE, SearchBounds};
pub use path::ChainPath;
pub use render::{render_chain, render_chain_snippet};
