//! `svg-icon sprite`: register icons and emit the symbol container.

use std::path::PathBuf;

use anyhow::{Result, bail};

use crate::{
    cli::{
        SpriteArgs,
        common::{collect_svg_files, read_icon, write_output},
    },
    config::IconConfig,
    debug, log,
    registry::{DomHost, IconRegistry, MemoryDom},
    svg::parse::SVG_NAMESPACE,
};

/// A rendered sprite sheet.
#[derive(Debug)]
pub struct Sprite {
    pub markup: String,
    /// Icons read from disk.
    pub icons: usize,
    /// Distinct symbols registered.
    pub symbols: usize,
    /// Icons the registry rejected.
    pub rejected: Vec<PathBuf>,
}

/// Register every icon in a fresh document and serialize its container.
pub fn build_sprite(config: &IconConfig, args: &SpriteArgs) -> Result<Sprite> {
    let files = collect_svg_files(&args.paths, &config.build.input)?;
    let colorless = config.registry.colorless;
    let registry = IconRegistry::new(MemoryDom::new());

    let mut rejected = Vec::new();
    for path in &files {
        let content = read_icon(path)?;
        match registry.get_or_create_symbol(&content, colorless) {
            Some(entry) => debug!("sprite"; "{} -> #{}", path.display(), entry.symbol_id),
            None => rejected.push(path.clone()),
        }
    }

    let symbols = registry.symbol_count();
    let Some(container) = registry.container() else {
        bail!("no icons registered");
    };

    let mut dom = registry.into_dom();
    // Standalone sheets need the namespace the in-page container inherits
    dom.set_attribute(container, "xmlns", SVG_NAMESPACE);

    Ok(Sprite {
        markup: dom.outer_markup(container),
        icons: files.len(),
        symbols,
        rejected,
    })
}

pub fn run_sprite(config: &IconConfig, args: &SpriteArgs) -> Result<()> {
    let sprite = build_sprite(config, args)?;
    write_output(args.output.as_deref(), &sprite.markup)?;

    let registered = sprite.icons - sprite.rejected.len();
    log!(
        "sprite";
        "{} icons, {} symbols ({} deduplicated)",
        registered,
        sprite.symbols,
        registered - sprite.symbols
    );

    if !sprite.rejected.is_empty() {
        for path in &sprite.rejected {
            eprintln!("- {}", path.display());
        }
        bail!("{} icons could not be registered", sprite.rejected.len());
    }
    Ok(())
}
