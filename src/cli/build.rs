//! `svg-icon build`: one component module per svg file.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use rayon::prelude::*;
use rustc_hash::{FxHashMap, FxHashSet};

use crate::{
    cli::{BuildArgs, common::collect_svg_files},
    config::IconConfig,
    debug, log,
    logger::ProgressLine,
    svg::ContentIdentity,
    transform::{Transformer, component_name},
};

/// Outcome of a successful build.
#[derive(Debug, Default)]
pub struct BuildReport {
    /// Generated module paths, in input order.
    pub written: Vec<PathBuf>,
    /// Icons whose content matches an earlier icon in the batch.
    pub duplicates: usize,
}

pub fn build_components(config: &IconConfig, args: &BuildArgs) -> Result<BuildReport> {
    let files = collect_svg_files(&args.paths, &config.build.input)?;
    if files.is_empty() {
        log!("build"; "no svg files found");
        return Ok(BuildReport::default());
    }

    // Resolve the compiler before touching any file
    let transformer = Transformer::from_config(&config.build)?;
    debug!("build"; "{} icons, {:?} templates", files.len(), transformer.variant());

    check_name_conflicts(&files)?;

    let output_dir = &config.build.output;
    fs::create_dir_all(output_dir)
        .with_context(|| format!("Failed to create `{}`", output_dir.display()))?;

    let progress = ProgressLine::new("build", &[("icons", files.len())]);
    let results: Vec<_> = files
        .par_iter()
        .map(|path| {
            let result = build_one(&transformer, path, output_dir, config.build.extension());
            if result.is_ok() {
                progress.inc("icons");
            }
            result
        })
        .collect();
    progress.finish();

    let mut report = BuildReport::default();
    let mut seen = FxHashSet::default();
    let mut failed = 0usize;
    for (path, result) in files.iter().zip(results) {
        match result {
            Ok((written, identity)) => {
                if !seen.insert(identity) {
                    report.duplicates += 1;
                }
                report.written.push(written);
            }
            Err(e) => {
                failed += 1;
                log!("error"; "{}: {:#}", path.display(), e);
            }
        }
    }

    if failed > 0 {
        bail!("{failed} of {} icons failed", files.len());
    }

    log!(
        "build";
        "generated {} components in {}",
        report.written.len(),
        output_dir.display()
    );
    if report.duplicates > 0 {
        log!("build"; "{} icons share content with another icon", report.duplicates);
    }

    Ok(report)
}

fn build_one(
    transformer: &Transformer,
    path: &Path,
    output_dir: &Path,
    extension: &str,
) -> Result<(PathBuf, ContentIdentity)> {
    let component = transformer.transform_file(path)?;
    let target = output_dir.join(format!("{}.{extension}", component.name));
    fs::write(&target, &component.code)
        .with_context(|| format!("Failed to write `{}`", target.display()))?;
    debug!("build"; "{} -> {}", path.display(), target.display());
    Ok((target, component.identity))
}

/// Distinct inputs that map to the same component name would overwrite
/// each other's output.
fn check_name_conflicts(files: &[PathBuf]) -> Result<()> {
    let mut names: FxHashMap<String, Vec<&Path>> = FxHashMap::default();
    for path in files {
        names.entry(component_name(path)).or_default().push(path);
    }

    let mut conflicts: Vec<_> = names.iter().filter(|(_, paths)| paths.len() > 1).collect();
    if conflicts.is_empty() {
        return Ok(());
    }

    conflicts.sort_by(|a, b| a.0.cmp(b.0));
    for (name, paths) in &conflicts {
        log!("error"; "component name `{name}` is produced by:");
        for path in paths.iter() {
            eprintln!("- {}", path.display());
        }
    }
    bail!("{} component name conflicts", conflicts.len())
}
