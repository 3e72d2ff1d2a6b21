//! SVG text → [`SvgDocument`] using quick-xml.
//!
//! The reader is event based; elements are assembled on an explicit stack so
//! deeply nested markup never recurses.

use std::borrow::Cow;

use quick_xml::{
    Reader,
    escape::unescape,
    events::{BytesStart, Event},
};
use thiserror::Error;

use super::{Element, Node, SvgDocument};

/// The SVG namespace URI.
pub const SVG_NAMESPACE: &str = "http://www.w3.org/2000/svg";

/// Errors produced while turning text into an [`SvgDocument`].
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("XML syntax error at position {position}: {message}")]
    Syntax { position: u64, message: String },

    #[error("unclosed element `<{0}>` at end of input")]
    Unclosed(String),

    #[error("unexpected closing tag `</{0}>`")]
    UnexpectedEnd(String),

    #[error("more than one top-level element")]
    MultipleRoots,

    #[error("invalid attribute `{name}`: {message}")]
    Attribute { name: String, message: String },

    #[error("invalid UTF-8 in SVG content")]
    Utf8(#[from] std::str::Utf8Error),

    #[error("no root <svg> element found")]
    MissingRoot,
}

/// Trim and make sure the first `<svg` carries the SVG namespace declaration.
pub fn ensure_namespace(content: &str) -> Cow<'_, str> {
    let trimmed = content.trim();
    if trimmed.contains(r#"xmlns="http://www.w3.org/2000/svg""#)
        || trimmed.contains("xmlns='http://www.w3.org/2000/svg'")
    {
        return Cow::Borrowed(trimmed);
    }

    match trimmed.find("<svg") {
        Some(pos) => {
            let (head, tail) = trimmed.split_at(pos);
            Cow::Owned(format!(
                "{head}<svg xmlns=\"{SVG_NAMESPACE}\"{}",
                &tail["<svg".len()..]
            ))
        }
        None => Cow::Borrowed(trimmed),
    }
}

/// Parse SVG text into a document.
///
/// When the top-level element is not `svg`, the first `svg` descendant in
/// document order becomes the root.
pub fn parse(text: &str) -> Result<SvgDocument, ParseError> {
    let mut reader = Reader::from_str(text);
    let mut stack: Vec<Element> = Vec::new();
    let mut top: Option<Element> = None;
    // Whitespace-only run held until we know whether text or markup follows
    let mut pending: Option<String> = None;

    loop {
        let event = reader.read_event().map_err(|e| ParseError::Syntax {
            position: reader.error_position() as u64,
            message: e.to_string(),
        })?;

        if !matches!(event, Event::Text(_) | Event::GeneralRef(_)) {
            pending = None;
        }

        match event {
            Event::Start(start) => stack.push(start_element(&start)?),
            Event::Empty(start) => {
                let elem = start_element(&start)?;
                attach(&mut stack, &mut top, elem)?;
            }
            Event::End(end) => {
                let name = std::str::from_utf8(end.name().as_ref())?.to_string();
                match stack.pop() {
                    Some(elem) if elem.tag == name => attach(&mut stack, &mut top, elem)?,
                    Some(elem) => return Err(ParseError::Unclosed(elem.tag)),
                    None => return Err(ParseError::UnexpectedEnd(name)),
                }
            }
            Event::Text(text) => {
                let text = std::str::from_utf8(&text)?;
                push_text(&mut stack, &mut pending, text);
            }
            Event::GeneralRef(entity) => {
                let name = std::str::from_utf8(&entity)?;
                push_text(&mut stack, &mut pending, &format!("&{name};"));
            }
            Event::CData(data) => {
                if let Some(parent) = stack.last_mut() {
                    let data = std::str::from_utf8(&data)?;
                    parent.children.push(Node::CData(data.to_string()));
                }
            }
            Event::Comment(comment) => {
                if let Some(parent) = stack.last_mut() {
                    let comment = std::str::from_utf8(&comment)?;
                    parent.children.push(Node::Comment(comment.to_string()));
                }
            }
            Event::Eof => break,
            // Declarations, processing instructions and doctypes carry no icon content
            _ => {}
        }
    }

    if let Some(open) = stack.pop() {
        return Err(ParseError::Unclosed(open.tag));
    }

    let top = top.ok_or(ParseError::MissingRoot)?;
    let root = if top.is_tag("svg") {
        top
    } else {
        top.find("svg").cloned().ok_or(ParseError::MissingRoot)?
    };

    Ok(SvgDocument { root })
}

/// Build an element (no children yet) from a start tag.
fn start_element(start: &BytesStart<'_>) -> Result<Element, ParseError> {
    let qname = start.name();
    let tag = std::str::from_utf8(qname.as_ref())?;
    let mut elem = Element::new(tag);

    for attr in start.attributes() {
        let attr = attr.map_err(|e| ParseError::Attribute {
            name: tag.to_string(),
            message: e.to_string(),
        })?;
        let name = std::str::from_utf8(attr.key.as_ref())?;
        let raw = std::str::from_utf8(&attr.value)?;
        let value = unescape(raw).map_err(|e| ParseError::Attribute {
            name: name.to_string(),
            message: e.to_string(),
        })?;
        elem.attrs.set(name, value);
    }

    Ok(elem)
}

/// Attach a finished element to its parent, or make it the top-level element.
fn attach(
    stack: &mut [Element],
    top: &mut Option<Element>,
    elem: Element,
) -> Result<(), ParseError> {
    match stack.last_mut() {
        Some(parent) => parent.children.push(Node::Element(elem)),
        None if top.is_some() => return Err(ParseError::MultipleRoots),
        None => *top = Some(elem),
    }
    Ok(())
}

/// Append text, merging with a preceding text node.
///
/// A whitespace-only run that opens a text node is parked in `pending`: it is
/// kept if an entity or more text follows, and dropped as formatting when the
/// next event is markup.
fn push_text(stack: &mut [Element], pending: &mut Option<String>, text: &str) {
    let Some(parent) = stack.last_mut() else {
        return;
    };
    match parent.children.last_mut() {
        Some(Node::Text(prev)) => prev.push_str(text),
        _ if text.trim().is_empty() => pending.get_or_insert_default().push_str(text),
        _ => {
            let mut run = pending.take().unwrap_or_default();
            run.push_str(text);
            parent.children.push(Node::Text(run));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simple() {
        let doc = parse(r#"<svg viewBox="0 0 24 24"><path d="M0 0h24"/></svg>"#).unwrap();
        assert_eq!(doc.root.tag, "svg");
        assert_eq!(doc.root.attrs.get("viewBox"), Some("0 0 24 24"));
        let children: Vec<_> = doc.root.element_children().collect();
        assert_eq!(children.len(), 1);
        assert_eq!(children[0].attrs.get("d"), Some("M0 0h24"));
    }

    #[test]
    fn test_parse_drops_formatting_whitespace() {
        let doc = parse("<svg>\n  <g>\n    <path/>\n  </g>\n</svg>").unwrap();
        assert_eq!(doc.root.children.len(), 1);
        let g = doc.root.element_children().next().unwrap();
        assert_eq!(g.children.len(), 1);
    }

    #[test]
    fn test_parse_keeps_text_with_entities() {
        let doc = parse("<svg><text>a &amp; b</text></svg>").unwrap();
        let text = doc.root.element_children().next().unwrap();
        assert_eq!(text.children, vec![Node::Text("a &amp; b".to_string())]);
    }

    #[test]
    fn test_parse_keeps_space_before_entity() {
        let doc = parse("<svg><text><tspan>x</tspan> &amp; y</text></svg>").unwrap();
        assert_eq!(
            doc.root.inner_markup(),
            "<text><tspan>x</tspan> &amp; y</text>"
        );

        let doc = parse("<svg><text> &lt;</text></svg>").unwrap();
        let text = doc.root.element_children().next().unwrap();
        assert_eq!(text.children, vec![Node::Text(" &lt;".to_string())]);
    }

    #[test]
    fn test_parse_drops_space_before_markup() {
        let doc = parse("<svg><text>a</text>\n  <g/>\n</svg>").unwrap();
        assert_eq!(doc.root.children.len(), 2);
        assert!(doc.root.children.iter().all(|n| matches!(n, Node::Element(_))));
    }

    #[test]
    fn test_parse_unescapes_attributes() {
        let doc = parse(r#"<svg data-x="a &quot;b&quot;"/>"#).unwrap();
        assert_eq!(doc.root.attrs.get("data-x"), Some(r#"a "b""#));
    }

    #[test]
    fn test_parse_truncated_fails() {
        assert!(parse("<svg><path").is_err());
    }

    #[test]
    fn test_parse_unclosed_fails() {
        assert!(matches!(parse("<svg><g>"), Err(ParseError::Unclosed(_))));
    }

    #[test]
    fn test_parse_missing_root() {
        assert!(matches!(parse("<div><p/></div>"), Err(ParseError::MissingRoot)));
        assert!(matches!(parse(""), Err(ParseError::MissingRoot)));
        assert!(matches!(parse("just text"), Err(ParseError::MissingRoot)));
    }

    #[test]
    fn test_parse_finds_nested_svg() {
        let doc = parse(r#"<div><svg id="inner"/></div>"#).unwrap();
        assert_eq!(doc.root.attrs.get("id"), Some("inner"));
    }

    #[test]
    fn test_parse_skips_declaration() {
        let doc = parse(r#"<?xml version="1.0"?><!-- icon --><svg/>"#).unwrap();
        assert!(doc.root.children.is_empty());
    }

    #[test]
    fn test_ensure_namespace_inserts() {
        assert_eq!(
            ensure_namespace("  <svg fill=\"red\"/>\n"),
            r#"<svg xmlns="http://www.w3.org/2000/svg" fill="red"/>"#
        );
        assert_eq!(
            ensure_namespace("<svg></svg>"),
            r#"<svg xmlns="http://www.w3.org/2000/svg"></svg>"#
        );
    }

    #[test]
    fn test_ensure_namespace_keeps_existing() {
        let svg = r#"<svg xmlns="http://www.w3.org/2000/svg"/>"#;
        assert!(matches!(ensure_namespace(svg), Cow::Borrowed(_)));
        assert_eq!(ensure_namespace(svg), svg);
    }
}
