//! Rendering chains as source expressions.

use crate::hir::{MemberDescriptor, MemberKind, SymbolService};

use super::path::ChainPath;

/// Render a chain as a dotted expression, e.g.
/// `order.getCustomer().getAddress()`.
///
/// Method arguments are filled in with parameter names and extra array
/// dimensions with empty indexers (`items()[]`).
pub fn render_chain<S: SymbolService + ?Sized>(service: &S, path: &ChainPath) -> String {
    let mut writer = ChainWriter::new(false);
    writer.write_chain(service, path);
    writer.out
}

/// Render a chain as an LSP snippet: method arguments and array indices
/// become `${n:name}` tab stops.
pub fn render_chain_snippet<S: SymbolService + ?Sized>(service: &S, path: &ChainPath) -> String {
    let mut writer = ChainWriter::new(true);
    writer.write_chain(service, path);
    writer.out
}

struct ChainWriter {
    out: String,
    snippet: bool,
    next_tab_stop: u32,
}

impl ChainWriter {
    fn new(snippet: bool) -> Self {
        Self {
            out: String::new(),
            snippet,
            next_tab_stop: 1,
        }
    }

    fn write_chain<S: SymbolService + ?Sized>(&mut self, service: &S, path: &ChainPath) {
        for (i, element) in path.elements().iter().enumerate() {
            if i == 0 {
                if let Some(qualifier) = explicit_receiver(service, element) {
                    self.text(&qualifier);
                    self.out.push('.');
                }
            } else {
                self.out.push('.');
            }
            self.element(element);
        }
        for _ in 0..path.extra_dimensions() {
            self.out.push('[');
            self.tab_stop("i", "");
            self.out.push(']');
        }
    }

    fn element(&mut self, element: &MemberDescriptor) {
        self.text(element.name());
        if element.kind() != MemberKind::Method {
            return;
        }
        self.out.push('(');
        for (i, param) in element.parameters().iter().enumerate() {
            if i > 0 {
                self.out.push_str(", ");
            }
            self.tab_stop(param, param);
        }
        self.out.push(')');
    }

    fn text(&mut self, text: &str) {
        if self.snippet {
            push_escaped(&mut self.out, text);
        } else {
            self.out.push_str(text);
        }
    }

    /// A tab stop in snippets, `plain` otherwise.
    fn tab_stop(&mut self, default: &str, plain: &str) {
        if !self.snippet {
            self.out.push_str(plain);
            return;
        }
        self.out.push_str("${");
        self.out.push_str(&self.next_tab_stop.to_string());
        self.out.push(':');
        push_escaped(&mut self.out, default);
        self.out.push('}');
        self.next_tab_stop += 1;
    }
}

/// `this` or the declaring type's simple name, when the first element needs
/// a qualifier to be reachable.
fn explicit_receiver<S: SymbolService + ?Sized>(
    service: &S,
    element: &MemberDescriptor,
) -> Option<String> {
    if !element.requires_explicit_receiver() {
        return None;
    }
    if !element.is_static() {
        return Some("this".to_string());
    }
    let declaring = element.declaring_type()?;
    service
        .type_data(declaring)
        .ok()
        .map(|data| data.name.to_string())
}

fn push_escaped(out: &mut String, text: &str) {
    for c in text.chars() {
        if matches!(c, '$' | '}' | '\\') {
            out.push('\\');
        }
        out.push(c);
    }
}
