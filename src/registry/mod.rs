//! Runtime icon registry.
//!
//! Turns svg text handed to an icon component into either a shared sprite
//! symbol (rendered through `<use>`) or an inline fragment, deduplicated by
//! [`ContentIdentity`]. Two independent caches back the two paths: a symbol
//! entry owns a live DOM node, an inline entry owns plain markup.
//!
//! ```text
//! icon text ──► identity ──► cache hit? ──yes──► stored entry
//!                                │
//!                                no
//!                                ▼
//!            ensure xmlns ─► parse ─► normalize ─┬─► <symbol> in container (symbol path)
//!                                                └─► inner markup string  (inline path)
//! ```
//!
//! All state sits behind one mutex, so lookup-then-insert is atomic and
//! at most one symbol is ever created per (content, colorless) pair.

mod cache;
pub mod dom;

pub use cache::ContentCache;
pub use dom::{DomHost, MemoryDom, NodeId};

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};

use crate::svg::{self, Attributes, SvgDocument, identity};
use crate::{debug, log};

/// Fixed id of the hidden element holding every symbol.
pub const CONTAINER_ID: &str = "__svg_icon_container__";

const CONTAINER_STYLE: &str =
    "position: absolute;width: 0;height: 0;overflow: hidden;visibility: hidden";

/// A registered sprite symbol.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SymbolEntry {
    pub symbol_id: String,
    /// Root attributes minus `width`/`height`.
    pub attrs: Attributes,
}

/// Inner markup of a normalized icon.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InlineEntry {
    /// Serialized element children of the root; the root tag is excluded.
    pub content: String,
    pub attrs: Attributes,
}

/// Props an icon component passes to the registry.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct IconProps {
    pub icon: String,
    pub colorless: bool,
    pub inline: bool,
}

impl Default for IconProps {
    fn default() -> Self {
        Self {
            icon: String::new(),
            colorless: true,
            inline: false,
        }
    }
}

impl IconProps {
    pub fn new(icon: impl Into<String>) -> Self {
        Self {
            icon: icon.into(),
            ..Default::default()
        }
    }
}

/// What a component renders for one icon.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderedIcon {
    Symbol(SymbolEntry),
    Inline(InlineEntry),
}

impl RenderedIcon {
    /// Markup for the usage site: a `<use>` reference or the inline fragment.
    pub fn to_markup(&self) -> String {
        let (attrs, body) = match self {
            Self::Symbol(entry) => (&entry.attrs, format!("<use href=\"#{}\"/>", entry.symbol_id)),
            Self::Inline(entry) => (&entry.attrs, entry.content.clone()),
        };

        let mut out = String::from(r#"<svg class="v-icon-svg" width="1em" height="1em""#);
        for (name, value) in attrs.iter() {
            out.push_str(&format!(
                " {name}=\"{}\"",
                quick_xml::escape::escape(value)
            ));
        }
        out.push('>');
        out.push_str(&body);
        out.push_str("</svg>");
        out
    }
}

struct CachedSymbol<N> {
    /// The `<symbol>` element the entry's `<use>` references.
    node: N,
    entry: SymbolEntry,
}

struct RegistryState<D: DomHost> {
    dom: D,
    container: Option<D::Node>,
    symbols: ContentCache<CachedSymbol<D::Node>>,
    inline: ContentCache<InlineEntry>,
}

/// Registry context: one per document.
///
/// Construct once and share; tests build isolated instances.
pub struct IconRegistry<D: DomHost> {
    state: Mutex<RegistryState<D>>,
}

impl<D: DomHost> IconRegistry<D> {
    pub fn new(dom: D) -> Self {
        Self {
            state: Mutex::new(RegistryState {
                dom,
                container: None,
                symbols: ContentCache::new(),
                inline: ContentCache::new(),
            }),
        }
    }

    /// Register `content` as a sprite symbol, or return the existing one.
    ///
    /// Returns `None` for empty content or unparseable svg (logged).
    pub fn get_or_create_symbol(&self, content: &str, colorless: bool) -> Option<SymbolEntry> {
        if content.is_empty() {
            return None;
        }

        let id = identity(content, colorless);
        let mut state = self.state.lock();

        if let Some(cached) = state.symbols.get(id, content, colorless) {
            return Some(cached.entry.clone());
        }

        let doc = prepare(content, colorless)?;
        let attrs = doc.retained_attrs();

        let slot = state.symbols.next_slot(id);
        let symbol_id = if slot == 0 {
            id.symbol_id()
        } else {
            log!("warning"; "identity collision on {}, using slot {}", id, slot);
            format!("{}-{}", id.symbol_id(), slot)
        };

        let container = state.container();
        let dom = &mut state.dom;
        let symbol = dom.create_element("symbol");
        dom.set_attribute(symbol, "id", &symbol_id);
        for (name, value) in attrs.iter() {
            dom.set_attribute(symbol, name, value);
        }
        for child in doc.root.element_children() {
            let node = dom.import_element(child);
            dom.append_child(symbol, node);
        }
        dom.append_child(container, symbol);

        debug!("registry"; "registered symbol {}", symbol_id);

        let entry = SymbolEntry { symbol_id, attrs };
        state.symbols.insert(
            id,
            content,
            colorless,
            CachedSymbol {
                node: symbol,
                entry: entry.clone(),
            },
        );
        Some(entry)
    }

    /// Normalized inner markup for `content`, cached separately from symbols.
    ///
    /// Never touches the DOM.
    pub fn get_inline_content(&self, content: &str, colorless: bool) -> Option<InlineEntry> {
        if content.is_empty() {
            return None;
        }

        let id = identity(content, colorless);
        let mut state = self.state.lock();

        if let Some(cached) = state.inline.get(id, content, colorless) {
            return Some(cached.clone());
        }

        let doc = prepare(content, colorless)?;
        let entry = InlineEntry {
            content: doc.root.element_children_markup(),
            attrs: doc.retained_attrs(),
        };

        if state.inline.next_slot(id) > 0 {
            log!("warning"; "identity collision on {} (inline)", id);
        }
        state.inline.insert(id, content, colorless, entry.clone());
        Some(entry)
    }

    /// Dispatch on `props.inline` the way an icon component does.
    pub fn render(&self, props: &IconProps) -> Option<RenderedIcon> {
        if props.inline {
            self.get_inline_content(&props.icon, props.colorless)
                .map(RenderedIcon::Inline)
        } else {
            self.get_or_create_symbol(&props.icon, props.colorless)
                .map(RenderedIcon::Symbol)
        }
    }

    pub fn symbol_count(&self) -> usize {
        self.state.lock().symbols.len()
    }

    pub fn inline_count(&self) -> usize {
        self.state.lock().inline.len()
    }

    /// The `<symbol>` registered for `content`, if any.
    pub fn symbol_node(&self, content: &str, colorless: bool) -> Option<D::Node> {
        let id = identity(content, colorless);
        self.state
            .lock()
            .symbols
            .get(id, content, colorless)
            .map(|cached| cached.node)
    }

    /// Current container handle, if one has been created or found.
    pub fn container(&self) -> Option<D::Node> {
        self.state.lock().container
    }

    /// Read access to the document.
    pub fn with_dom<R>(&self, f: impl FnOnce(&D) -> R) -> R {
        f(&self.state.lock().dom)
    }

    /// Write access to the document, for hosts that mutate it between renders.
    pub fn with_dom_mut<R>(&self, f: impl FnOnce(&mut D) -> R) -> R {
        f(&mut self.state.lock().dom)
    }

    pub fn into_dom(self) -> D {
        self.state.into_inner().dom
    }
}

impl<D: DomHost> RegistryState<D> {
    /// The symbol container: cached handle if still attached, else found by
    /// id, else created as the body's first child.
    fn container(&mut self) -> D::Node {
        if let Some(node) = self.container
            && self.dom.is_attached(node)
        {
            return node;
        }

        let node = match self.dom.element_by_id(CONTAINER_ID) {
            Some(node) => node,
            None => {
                let node = self.dom.create_element("svg");
                self.dom.set_attribute(node, "id", CONTAINER_ID);
                self.dom.set_attribute(node, "style", CONTAINER_STYLE);
                self.dom.prepend_to_body(node);
                node
            }
        };
        self.container = Some(node);
        node
    }
}

/// Ensure namespace, parse and normalize. Failures are logged, never raised.
fn prepare(content: &str, colorless: bool) -> Option<SvgDocument> {
    let source = svg::ensure_namespace(content);
    match svg::parse(&source) {
        Ok(mut doc) => {
            svg::normalize(&mut doc.root, colorless);
            Some(doc)
        }
        Err(err) => {
            log!("error"; "failed to parse svg icon: {}", err);
            debug!("registry"; "rejected source: {}", source);
            None
        }
    }
}
