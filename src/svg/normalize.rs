//! Colorless normalization.
//!
//! Rewrites paint attributes so an icon inherits the surrounding text color:
//!
//! | attribute        | rewrite                          |
//! |------------------|----------------------------------|
//! | `fill`           | `currentColor` (unless `none`)   |
//! | `stroke`         | `currentColor` (unless `none`)   |
//! | `fill-opacity`   | `1`                              |
//! | `stroke-opacity` | `1`                              |
//!
//! Only attributes already present are touched. A `mask` subtree keeps its
//! paint: there it controls clipping rather than visible color.

use super::{Element, Node};

const CURRENT_COLOR: &str = "currentColor";

/// Paint attributes rewritten to `currentColor` unless set to `none`.
const COLOR_ATTRS: [&str; 2] = ["fill", "stroke"];

/// Opacity attributes forced to `1`.
const OPACITY_ATTRS: [&str; 2] = ["fill-opacity", "stroke-opacity"];

/// Normalize `root` and all descendants in place.
///
/// No-op when `colorless` is false. Idempotent.
pub fn normalize(root: &mut Element, colorless: bool) {
    if !colorless {
        return;
    }

    let mut stack: Vec<&mut Element> = vec![root];
    while let Some(elem) = stack.pop() {
        if elem.is_tag("mask") {
            continue;
        }
        rewrite_paint(elem);
        for child in elem.children.iter_mut() {
            if let Node::Element(child) = child {
                stack.push(child);
            }
        }
    }
}

fn rewrite_paint(elem: &mut Element) {
    for name in COLOR_ATTRS {
        let paints = elem
            .attrs
            .get(name)
            .is_some_and(|value| value != "none" && value != CURRENT_COLOR);
        if paints {
            elem.attrs.set(name, CURRENT_COLOR);
        }
    }
    for name in OPACITY_ATTRS {
        let translucent = elem.attrs.get(name).is_some_and(|value| value != "1");
        if translucent {
            elem.attrs.set(name, "1");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::svg::parse;

    fn normalized(src: &str, colorless: bool) -> String {
        let mut doc = parse(src).unwrap();
        normalize(&mut doc.root, colorless);
        doc.root.outer_markup()
    }

    #[test]
    fn test_rewrites_present_paint() {
        assert_eq!(
            normalized(
                r##"<svg fill="#f00" width="24" height="24"><path fill="#f00" stroke="blue" fill-opacity=".5" stroke-opacity="0.2"/></svg>"##,
                true
            ),
            r#"<svg fill="currentColor" width="24" height="24"><path fill="currentColor" stroke="currentColor" fill-opacity="1" stroke-opacity="1"/></svg>"#
        );
    }

    #[test]
    fn test_none_is_preserved() {
        let src = r#"<svg stroke="none"><path stroke="none" fill="none"/></svg>"#;
        assert_eq!(normalized(src, true), src);
    }

    #[test]
    fn test_absent_attributes_not_synthesized() {
        let src = r#"<svg><g><path d="M0 0"/></g></svg>"#;
        assert_eq!(normalized(src, true), src);
    }

    #[test]
    fn test_mask_exempt() {
        let out = normalized(
            r##"<svg><mask id="m" fill="#fff" stroke="#000"><rect fill="#fff"/></mask><path fill="red"/></svg>"##,
            true,
        );
        assert!(out.contains(r##"<mask id="m" fill="#fff" stroke="#000"><rect fill="#fff"/></mask>"##));
        assert!(out.contains(r#"<path fill="currentColor"/>"#));
    }

    #[test]
    fn test_colorless_false_is_noop() {
        let src = r##"<svg fill="#123"><path stroke="#456" fill-opacity="0.3"/></svg>"##;
        assert_eq!(normalized(src, false), src);
    }

    #[test]
    fn test_idempotent() {
        let src = r##"<svg fill="#f00"><g stroke="red" stroke-opacity=".4"><path fill="none"/><mask fill="#fff"/></g></svg>"##;
        let mut doc = parse(src).unwrap();
        normalize(&mut doc.root, true);
        let once = doc.root.outer_markup();
        normalize(&mut doc.root, true);
        assert_eq!(doc.root.outer_markup(), once);
    }

    #[test]
    fn test_deep_nesting_does_not_overflow() {
        let depth = 2_000;
        let mut src = String::from("<svg>");
        for _ in 0..depth {
            src.push_str(r#"<g fill="red">"#);
        }
        for _ in 0..depth {
            src.push_str("</g>");
        }
        src.push_str("</svg>");

        let mut doc = parse(&src).unwrap();
        normalize(&mut doc.root, true);
        let out = doc.root.outer_markup();
        assert_eq!(out.matches("currentColor").count(), depth);
    }
}
