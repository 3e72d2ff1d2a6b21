//! Single-icon commands: `svg-icon inline`, `svg-icon render` and `svg-icon id`.

use anyhow::{Context, Result, bail};

use crate::{
    cli::{IconArgs, RenderArgs, common::read_icon},
    config::IconConfig,
    registry::{IconProps, IconRegistry, MemoryDom},
    svg::identity,
};

/// The inline fragment of one icon as `{content, attrs}` JSON.
pub fn inline_json(config: &IconConfig, args: &IconArgs) -> Result<String> {
    let content = read_icon(&args.file)?;
    let registry = IconRegistry::new(MemoryDom::new());

    let Some(entry) = registry.get_inline_content(&content, config.registry.colorless) else {
        bail!("`{}` is not a usable svg icon", args.file.display());
    };
    serde_json::to_string_pretty(&entry).context("Failed to serialize inline entry")
}

/// Usage-site markup for one icon with the configured props.
///
/// A symbol reference is followed by the container holding its `<symbol>`,
/// so the output renders on its own.
pub fn render_markup(config: &IconConfig, args: &RenderArgs) -> Result<String> {
    let props = IconProps {
        icon: read_icon(&args.icon.file)?,
        colorless: config.registry.colorless,
        inline: config.registry.inline,
    };
    let registry = IconRegistry::new(MemoryDom::new());

    let Some(rendered) = registry.render(&props) else {
        bail!("`{}` is not a usable svg icon", args.icon.file.display());
    };
    let mut markup = rendered.to_markup();
    if let Some(container) = registry.container() {
        markup.push('\n');
        markup.push_str(&registry.with_dom(|dom| dom.outer_markup(container)));
    }
    Ok(markup)
}

/// Content identity and symbol id of one icon, tab separated.
pub fn identity_line(config: &IconConfig, args: &IconArgs) -> Result<String> {
    let content = read_icon(&args.file)?;
    let id = identity(&content, config.registry.colorless);
    Ok(format!("{id}\t{}", id.symbol_id()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn icon(content: &str, colorless: Option<bool>) -> (tempfile::TempDir, IconArgs) {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("icon.svg");
        fs::write(&file, content).unwrap();
        (dir, IconArgs { file, colorless })
    }

    #[test]
    fn test_inline_json() {
        let (_dir, args) = icon(
            r##"<svg width="16" viewBox="0 0 16 16"><path stroke="#000" d="M0 0"/></svg>"##,
            None,
        );
        let json = inline_json(&IconConfig::default(), &args).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(
            value["content"],
            r#"<path stroke="currentColor" d="M0 0"/>"#
        );
        assert_eq!(value["attrs"]["viewBox"], "0 0 16 16");
        assert!(value["attrs"].get("width").is_none());
    }

    #[test]
    fn test_inline_rejects_garbage() {
        let (_dir, args) = icon("not svg at all", None);
        assert!(inline_json(&IconConfig::default(), &args).is_err());
    }

    fn render_args(args: IconArgs) -> RenderArgs {
        RenderArgs { icon: args, inline: None }
    }

    #[test]
    fn test_render_follows_registry_inline() {
        let (_dir, args) = icon(r##"<svg viewBox="0 0 4 4"><path fill="#123"/></svg>"##, None);
        let args = render_args(args);
        let mut config = IconConfig::default();

        let symbol = render_markup(&config, &args).unwrap();
        assert!(symbol.contains("<use href=\"#svg-icon-"));
        assert!(symbol.contains("<symbol "));

        config.registry.inline = true;
        let inline = render_markup(&config, &args).unwrap();
        assert!(!inline.contains("<use"));
        assert!(!inline.contains("<symbol"));
        assert!(inline.contains(r#"<path fill="currentColor"/>"#));
        assert!(inline.contains(r#"viewBox="0 0 4 4""#));
    }

    #[test]
    fn test_render_rejects_garbage() {
        let (_dir, args) = icon("<svg><path", None);
        assert!(render_markup(&IconConfig::default(), &render_args(args)).is_err());
    }

    #[test]
    fn test_identity_depends_on_mode() {
        let (_dir, args) = icon(r##"<svg><path fill="#000"/></svg>"##, None);
        let mut config = IconConfig::default();
        let colorless = identity_line(&config, &args).unwrap();
        config.registry.colorless = false;
        let colored = identity_line(&config, &args).unwrap();

        assert_ne!(colorless, colored);
        let (hex, symbol) = colorless.split_once('\t').unwrap();
        assert_eq!(hex.len(), 8);
        assert_eq!(symbol, format!("svg-icon-{hex}"));
    }
}
