//! DOM-like environment used by the runtime registry.
//!
//! [`DomHost`] is the narrow surface the registry needs from a document.
//! [`MemoryDom`] is an arena-backed implementation used by the CLI sprite
//! command and by tests.

use std::fmt;

use quick_xml::escape::escape;

use crate::svg::{Attributes, Element, Node};

/// Operations the registry performs against a document.
pub trait DomHost {
    /// Handle to a live node. Cheap to copy, stable while the node exists.
    type Node: Copy + Eq + fmt::Debug;

    /// Find an attached element by its `id` attribute.
    fn element_by_id(&self, id: &str) -> Option<Self::Node>;

    /// Whether `node` is reachable from the document body.
    fn is_attached(&self, node: Self::Node) -> bool;

    fn create_element(&mut self, tag: &str) -> Self::Node;

    fn create_text(&mut self, text: &str) -> Self::Node;

    fn set_attribute(&mut self, node: Self::Node, name: &str, value: &str);

    /// Append `child` to `parent`, detaching it from any previous parent.
    fn append_child(&mut self, parent: Self::Node, child: Self::Node);

    /// Insert `node` as the first child of the body.
    fn prepend_to_body(&mut self, node: Self::Node);

    /// Deep-clone a parsed element into this document (not yet attached).
    fn import_element(&mut self, elem: &Element) -> Self::Node {
        let root = self.create_element(&elem.tag);
        let mut stack = vec![(root, elem)];

        while let Some((node, source)) = stack.pop() {
            for (name, value) in source.attrs.iter() {
                self.set_attribute(node, name, value);
            }
            for child in &source.children {
                match child {
                    Node::Element(child) => {
                        let created = self.create_element(&child.tag);
                        self.append_child(node, created);
                        stack.push((created, child));
                    }
                    Node::Text(text) => {
                        let created = self.create_text(text);
                        self.append_child(node, created);
                    }
                    Node::CData(data) => {
                        let created = self.create_text(&format!("<![CDATA[{data}]]>"));
                        self.append_child(node, created);
                    }
                    Node::Comment(_) => {}
                }
            }
        }

        root
    }
}

// ============================================================================
// MemoryDom
// ============================================================================

/// Index of a node in a [`MemoryDom`] arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

#[derive(Debug)]
enum NodeData {
    Element { tag: String, attrs: Attributes },
    /// Escaped markup, written verbatim.
    Text(String),
}

#[derive(Debug)]
struct DomNode {
    data: NodeData,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

/// Arena-backed document with a single `body` root.
///
/// Nodes are never freed; detached subtrees stay in the arena but are
/// unreachable from the body.
#[derive(Debug)]
pub struct MemoryDom {
    nodes: Vec<DomNode>,
    body: NodeId,
}

impl Default for MemoryDom {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryDom {
    pub fn new() -> Self {
        let body = DomNode {
            data: NodeData::Element {
                tag: "body".to_string(),
                attrs: Attributes::new(),
            },
            parent: None,
            children: Vec::new(),
        };
        Self {
            nodes: vec![body],
            body: NodeId(0),
        }
    }

    #[inline]
    pub fn body(&self) -> NodeId {
        self.body
    }

    pub fn tag(&self, node: NodeId) -> Option<&str> {
        match &self.nodes[node.0].data {
            NodeData::Element { tag, .. } => Some(tag),
            NodeData::Text(_) => None,
        }
    }

    pub fn attribute(&self, node: NodeId, name: &str) -> Option<&str> {
        match &self.nodes[node.0].data {
            NodeData::Element { attrs, .. } => attrs.get(name),
            NodeData::Text(_) => None,
        }
    }

    pub fn children(&self, node: NodeId) -> &[NodeId] {
        &self.nodes[node.0].children
    }

    pub fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.nodes[node.0].parent
    }

    /// Remove `node` from its parent. The subtree stays intact.
    pub fn detach(&mut self, node: NodeId) {
        if let Some(parent) = self.nodes[node.0].parent.take() {
            self.nodes[parent.0].children.retain(|&c| c != node);
        }
    }

    /// Serialize `node` and its subtree.
    pub fn outer_markup(&self, node: NodeId) -> String {
        enum Frame {
            Open(NodeId),
            Close(NodeId),
        }

        let mut out = String::new();
        let mut stack = vec![Frame::Open(node)];

        while let Some(frame) = stack.pop() {
            match frame {
                Frame::Open(id) => {
                    let dom_node = &self.nodes[id.0];
                    match &dom_node.data {
                        NodeData::Text(text) => out.push_str(text),
                        NodeData::Element { tag, attrs } => {
                            out.push('<');
                            out.push_str(tag);
                            for (name, value) in attrs.iter() {
                                out.push_str(&format!(" {name}=\"{}\"", escape(value)));
                            }
                            if dom_node.children.is_empty() {
                                out.push_str("/>");
                                continue;
                            }
                            out.push('>');
                            stack.push(Frame::Close(id));
                            stack.extend(dom_node.children.iter().rev().map(|&c| Frame::Open(c)));
                        }
                    }
                }
                Frame::Close(id) => {
                    if let Some(tag) = self.tag(id) {
                        out.push_str("</");
                        out.push_str(tag);
                        out.push('>');
                    }
                }
            }
        }

        out
    }

    fn push(&mut self, data: NodeData) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(DomNode {
            data,
            parent: None,
            children: Vec::new(),
        });
        id
    }
}

impl DomHost for MemoryDom {
    type Node = NodeId;

    fn element_by_id(&self, id: &str) -> Option<NodeId> {
        let mut stack = vec![self.body];
        while let Some(node) = stack.pop() {
            if self.attribute(node, "id") == Some(id) {
                return Some(node);
            }
            stack.extend(self.children(node).iter().rev().copied());
        }
        None
    }

    fn is_attached(&self, node: NodeId) -> bool {
        let mut current = Some(node);
        while let Some(id) = current {
            if id == self.body {
                return true;
            }
            current = self.parent(id);
        }
        false
    }

    fn create_element(&mut self, tag: &str) -> NodeId {
        self.push(NodeData::Element {
            tag: tag.to_string(),
            attrs: Attributes::new(),
        })
    }

    fn create_text(&mut self, text: &str) -> NodeId {
        self.push(NodeData::Text(text.to_string()))
    }

    fn set_attribute(&mut self, node: NodeId, name: &str, value: &str) {
        if let NodeData::Element { attrs, .. } = &mut self.nodes[node.0].data {
            attrs.set(name, value);
        }
    }

    fn append_child(&mut self, parent: NodeId, child: NodeId) {
        self.detach(child);
        self.nodes[child.0].parent = Some(parent);
        self.nodes[parent.0].children.push(child);
    }

    fn prepend_to_body(&mut self, node: NodeId) {
        self.detach(node);
        let body = self.body;
        self.nodes[node.0].parent = Some(body);
        self.nodes[body.0].children.insert(0, node);
    }
}
