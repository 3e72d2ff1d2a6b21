//! Common utilities shared across CLI commands.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use jwalk::WalkDir;

/// Whether `path` has an `.svg` extension (any case).
pub fn is_svg(path: &Path) -> bool {
    path.extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("svg"))
}

/// Collect svg files from CLI paths, or from `input_dir` when none are given.
///
/// Directories are walked recursively; explicit files are taken as-is.
/// The result is sorted and free of duplicates.
pub fn collect_svg_files(paths: &[PathBuf], input_dir: &Path) -> Result<Vec<PathBuf>> {
    let roots = if paths.is_empty() {
        if !input_dir.is_dir() {
            bail!("input directory `{}` not found", input_dir.display());
        }
        vec![input_dir.to_path_buf()]
    } else {
        paths.to_vec()
    };

    let mut files = Vec::new();
    for root in &roots {
        if root.is_dir() {
            files.extend(walk_svg_files(root));
        } else if root.is_file() {
            files.push(root.clone());
        } else {
            bail!("path `{}` not found", root.display());
        }
    }

    files.sort();
    files.dedup();
    Ok(files)
}

fn walk_svg_files(dir: &Path) -> Vec<PathBuf> {
    WalkDir::new(dir)
        .sort(true)
        .into_iter()
        .filter_map(Result::ok)
        .filter(|e| e.file_type().is_file())
        .map(|e| e.path())
        .filter(|p| is_svg(p))
        .collect()
}

pub fn read_icon(path: &Path) -> Result<String> {
    fs::read_to_string(path).with_context(|| format!("Failed to read `{}`", path.display()))
}

/// Write command output to `path`, or stdout when `None`.
pub fn write_output(path: Option<&Path>, content: &str) -> Result<()> {
    match path {
        Some(path) => {
            if let Some(parent) = path.parent()
                && !parent.as_os_str().is_empty()
            {
                fs::create_dir_all(parent)
                    .with_context(|| format!("Failed to create `{}`", parent.display()))?;
            }
            fs::write(path, content)
                .with_context(|| format!("Failed to write `{}`", path.display()))
        }
        None => {
            println!("{content}");
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collect_walks_input_dir() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("arrows");
        fs::create_dir_all(&nested).unwrap();
        fs::write(dir.path().join("home.svg"), "<svg/>").unwrap();
        fs::write(nested.join("left.SVG"), "<svg/>").unwrap();
        fs::write(dir.path().join("README.md"), "").unwrap();

        let files = collect_svg_files(&[], dir.path()).unwrap();
        assert_eq!(files, [nested.join("left.SVG"), dir.path().join("home.svg")]);
    }

    #[test]
    fn test_collect_explicit_paths_dedup() {
        let dir = tempfile::tempdir().unwrap();
        let icon = dir.path().join("a.svg");
        fs::write(&icon, "<svg/>").unwrap();

        let files =
            collect_svg_files(&[icon.clone(), dir.path().to_path_buf()], Path::new("unused"))
                .unwrap();
        assert_eq!(files, [icon]);
    }

    #[test]
    fn test_collect_missing_path_fails() {
        let dir = tempfile::tempdir().unwrap();
        assert!(collect_svg_files(&[dir.path().join("nope.svg")], dir.path()).is_err());
        assert!(collect_svg_files(&[], &dir.path().join("icons")).is_err());
    }

    #[test]
    fn test_write_output_creates_parent() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("dist/sprite.svg");
        write_output(Some(&out), "<svg/>").unwrap();
        assert_eq!(fs::read_to_string(out).unwrap(), "<svg/>");
    }
}
