//! Component naming, attribute inlining and the fixed wrapper template.

use std::path::Path;

use quick_xml::escape::escape;

use crate::svg::{Attributes, SIZE_ATTRS};

use super::compiler::TemplateVariant;

const BASE_STYLE: &str = "display:inline-block;vertical-align:-0.15em;overflow:hidden;";

/// Component name from a source path: file stem in PascalCase, prefixed `Svg`.
///
/// Any non-alphanumeric character separates words, so the result is always a
/// valid identifier: `arrow-left.svg` → `SvgArrowLeft`.
pub fn component_name(path: &Path) -> String {
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy())
        .unwrap_or_default();

    let mut name = String::from("Svg");
    for word in stem.split(|c: char| !c.is_alphanumeric()) {
        let mut chars = word.chars();
        if let Some(first) = chars.next() {
            name.extend(first.to_uppercase());
            name.push_str(chars.as_str());
        }
    }
    name
}

/// Root attributes (minus `width`/`height`) as `name="value"` pairs.
///
/// Values are escaped, embedded double quotes included, so they can be
/// spliced into generated markup.
pub fn attribute_string(attrs: &Attributes) -> String {
    attrs
        .without(&SIZE_ATTRS)
        .iter()
        .map(|(name, value)| format!("{name}=\"{}\"", escape(value)))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Wrap inner icon markup in the `v-icon-svg` root.
///
/// Sizing is forced to `1em`; the render-function variant also bakes
/// `fill:currentColor` into the inline style.
pub fn wrapper_template(attributes: &str, inner: &str, variant: TemplateVariant) -> String {
    let style = match variant {
        TemplateVariant::RenderFunction => format!("{BASE_STYLE}fill:currentColor;"),
        TemplateVariant::Template => BASE_STYLE.to_string(),
    };
    let attributes = if attributes.is_empty() {
        String::new()
    } else {
        format!("{attributes} ")
    };

    format!(
        "<svg\n  class=\"v-icon-svg\"\n  width=\"1em\"\n  height=\"1em\"\n  style=\"{style}\"\n  {attributes}>\n  {inner}\n</svg>"
    )
}
