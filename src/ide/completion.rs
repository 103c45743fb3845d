//! Chain completion items.

use std::sync::Arc;

use rustc_hash::FxHashSet;
use tokio_util::sync::CancellationToken;

use crate::base::TypeId;
use crate::hir::{MemberKind, SymbolService, TypeDescriptor};

use super::chains::{
    ChainOptions, ChainPath, ChainSearchEngine, EntryPointCollector, LocalVar, render_chain,
    render_chain_snippet,
};

/// Kind of completion item.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CompletionKind {
    Method,
    Field,
    Variable,
}

impl CompletionKind {
    /// Convert to LSP completion item kind number.
    pub fn to_lsp(&self) -> u32 {
        match self {
            CompletionKind::Method => 2,
            CompletionKind::Field => 5,
            CompletionKind::Variable => 6,
        }
    }

    fn of_chain(path: &ChainPath) -> Self {
        match path.last().kind() {
            MemberKind::Method => CompletionKind::Method,
            MemberKind::Field => CompletionKind::Field,
            MemberKind::LocalVariable | MemberKind::TypeRef => CompletionKind::Variable,
        }
    }
}

/// A completion suggestion.
#[derive(Clone, Debug)]
pub struct CompletionItem {
    /// The text shown in the list.
    pub label: Arc<str>,
    /// The kind of completion.
    pub kind: CompletionKind,
    /// Detail text (shown after label).
    pub detail: Option<Arc<str>>,
    /// Documentation (shown in popup).
    pub documentation: Option<Arc<str>>,
    /// Text to insert (if different from label).
    pub insert_text: Option<Arc<str>>,
    /// Sort priority (lower = higher priority).
    pub sort_priority: u32,
}

impl CompletionItem {
    /// Create a new completion item.
    pub fn new(label: impl Into<Arc<str>>, kind: CompletionKind) -> Self {
        Self {
            label: label.into(),
            kind,
            detail: None,
            documentation: None,
            insert_text: None,
            sort_priority: 100,
        }
    }

    /// Set the detail text.
    pub fn with_detail(mut self, detail: impl Into<Arc<str>>) -> Self {
        self.detail = Some(detail.into());
        self
    }

    /// Set the documentation.
    pub fn with_documentation(mut self, doc: impl Into<Arc<str>>) -> Self {
        self.documentation = Some(doc.into());
        self
    }

    /// Set the insert text.
    pub fn with_insert_text(mut self, text: impl Into<Arc<str>>) -> Self {
        self.insert_text = Some(text.into());
        self
    }

    /// Set the sort priority.
    pub fn with_priority(mut self, priority: u32) -> Self {
        self.sort_priority = priority;
        self
    }

    /// Create from a discovered chain.
    ///
    /// Label is the plain expression, insert text the snippet form, detail
    /// the type the chain produces and documentation the types it passes
    /// through (`Order → Customer → Address`).
    pub fn from_chain<S: SymbolService + ?Sized>(service: &S, path: &ChainPath) -> Self {
        let last = path.last();
        let result_type = last.return_type().with_dimension(path.expected_dimension());
        let route = path
            .elements()
            .iter()
            .map(|element| service.display_type(&element.return_type()))
            .collect::<Vec<_>>()
            .join(" → ");

        Self::new(render_chain(service, path), CompletionKind::of_chain(path))
            .with_detail(service.display_type(&result_type))
            .with_documentation(route)
            .with_insert_text(render_chain_snippet(service, path))
            .with_priority(path.len() as u32)
    }
}

/// Everything known about one completion location.
#[derive(Clone, Debug)]
pub struct ChainRequest {
    /// The class the completion happens in; accessibility is computed from it.
    pub receiver: TypeId,
    /// True inside a static method or initializer.
    pub static_context: bool,
    /// Locals in scope, in declaration order.
    pub locals: Vec<LocalVar>,
    /// Types whose static members may start a chain.
    pub static_anchors: Vec<TypeId>,
    /// Types the expression at the cursor may have.
    pub expected_types: Vec<TypeDescriptor>,
    pub options: ChainOptions,
}

impl ChainRequest {
    pub fn new(receiver: TypeId, expected_types: impl IntoIterator<Item = TypeDescriptor>) -> Self {
        Self {
            receiver,
            static_context: false,
            locals: Vec::new(),
            static_anchors: Vec::new(),
            expected_types: expected_types.into_iter().collect(),
            options: ChainOptions::default(),
        }
    }

    pub fn with_static_context(mut self, static_context: bool) -> Self {
        self.static_context = static_context;
        self
    }

    pub fn with_local(mut self, local: LocalVar) -> Self {
        self.locals.push(local);
        self
    }

    pub fn with_static_anchor(mut self, ty: TypeId) -> Self {
        self.static_anchors.push(ty);
        self
    }

    pub fn with_options(mut self, options: ChainOptions) -> Self {
        self.options = options;
        self
    }
}

/// Get chain completion suggestions for a location.
///
/// Collects entry points, searches under the request's bounds until done,
/// `token` is canceled or the configured timeout passes, and returns one
/// item per distinct rendered chain, shorter chains first.
pub fn chain_completions<S: SymbolService + ?Sized>(
    service: &S,
    request: &ChainRequest,
    token: &CancellationToken,
) -> Vec<CompletionItem> {
    let cancel = request.options.cancel_policy(token);
    let mut engine = ChainSearchEngine::new(service, request.receiver)
        .with_bounds(request.options.bounds)
        .with_excluded_types(&request.options.ignored_types);

    let excluded = engine.excluded().clone();
    let entry_points = EntryPointCollector::new()
        .with_static_context(request.static_context)
        .with_locals(request.locals.iter().cloned())
        .with_static_anchors(request.static_anchors.iter().copied())
        .collect(engine.lookup_mut(), &excluded);

    let chains = engine.search(&entry_points, &request.expected_types, &cancel);

    let mut items: Vec<CompletionItem> = chains
        .iter()
        .map(|path| CompletionItem::from_chain(service, path))
        .collect();

    // Sort by priority
    items.sort_by_key(|item| item.sort_priority);

    // Deduplicate by label
    let mut seen = FxHashSet::default();
    items.retain(|item| seen.insert(item.label.clone()));

    tracing::debug!(
        items = items.len(),
        canceled = engine.stats().canceled,
        "chain completions"
    );
    items
}
