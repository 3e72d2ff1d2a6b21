//! Markup output for [`Element`] trees.

use quick_xml::escape::escape;

use super::{Element, Node};

impl Element {
    /// The element itself, with all descendants.
    pub fn outer_markup(&self) -> String {
        let mut out = String::with_capacity(256);
        write_element(&mut out, self);
        out
    }

    /// All child nodes, root tag excluded.
    pub fn inner_markup(&self) -> String {
        let mut out = String::with_capacity(256);
        for node in &self.children {
            write_node(&mut out, node);
        }
        out
    }

    /// Element children only, each as outer markup, concatenated.
    pub fn element_children_markup(&self) -> String {
        let mut out = String::with_capacity(256);
        for child in self.element_children() {
            write_element(&mut out, child);
        }
        out
    }
}

fn write_node(out: &mut String, node: &Node) {
    match node {
        Node::Element(elem) => write_element(out, elem),
        Node::Text(text) => out.push_str(text),
        Node::CData(data) => {
            out.push_str("<![CDATA[");
            out.push_str(data);
            out.push_str("]]>");
        }
        Node::Comment(comment) => {
            out.push_str("<!--");
            out.push_str(comment);
            out.push_str("-->");
        }
    }
}

/// Iterative writer: an explicit frame stack replaces recursion so depth is unbounded.
fn write_element(out: &mut String, root: &Element) {
    enum Frame<'a> {
        Element(&'a Element),
        Node(&'a Node),
        Close(&'a str),
    }

    let mut stack = vec![Frame::Element(root)];

    while let Some(frame) = stack.pop() {
        match frame {
            Frame::Element(elem) => {
                out.push('<');
                out.push_str(&elem.tag);
                for (name, value) in elem.attrs.iter() {
                    out.push(' ');
                    out.push_str(name);
                    out.push_str("=\"");
                    out.push_str(&escape(value));
                    out.push('"');
                }
                if elem.children.is_empty() {
                    out.push_str("/>");
                    continue;
                }
                out.push('>');
                stack.push(Frame::Close(&elem.tag));
                stack.extend(elem.children.iter().rev().map(|child| match child {
                    Node::Element(child) => Frame::Element(child),
                    other => Frame::Node(other),
                }));
            }
            Frame::Node(node) => write_node(out, node),
            Frame::Close(tag) => {
                out.push_str("</");
                out.push_str(tag);
                out.push('>');
            }
        }
    }
}
