//! Directory introspection backing the developer-only component structure page.

use crate::utils::error::Result;
use serde::Serialize;
use std::fs;
use std::path::Path;

const SKIPPED_DIRS: &[&str] = &["node_modules", "target", "dist", "build"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    Dir,
    File,
}

#[derive(Debug, Clone, Serialize)]
pub struct TreeNode {
    pub name: String,
    /// Relative to the scanned root, `/`-separated.
    pub path: String,
    pub kind: NodeKind,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<TreeNode>,
}

fn is_skipped(name: &str) -> bool {
    name.starts_with('.') || SKIPPED_DIRS.contains(&name)
}

fn join_rel(parent: &str, name: &str) -> String {
    if parent.is_empty() {
        name.to_string()
    } else {
        format!("{}/{}", parent, name)
    }
}

fn scan_dir(dir: &Path, rel: &str, depth_left: usize) -> Result<Vec<TreeNode>> {
    let mut dirs = Vec::new();
    let mut files = Vec::new();

    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let name = entry.file_name().to_string_lossy().into_owned();
        if is_skipped(&name) {
            continue;
        }

        let path = join_rel(rel, &name);
        let file_type = entry.file_type()?;
        if file_type.is_dir() {
            let children = if depth_left > 1 {
                scan_dir(&entry.path(), &path, depth_left - 1)?
            } else {
                Vec::new()
            };
            dirs.push(TreeNode {
                name,
                path,
                kind: NodeKind::Dir,
                children,
            });
        } else if file_type.is_file() {
            files.push(TreeNode {
                name,
                path,
                kind: NodeKind::File,
                children: Vec::new(),
            });
        }
    }

    dirs.sort_by(|a, b| a.name.cmp(&b.name));
    files.sort_by(|a, b| a.name.cmp(&b.name));
    dirs.extend(files);
    Ok(dirs)
}

/// Walks `root` up to `max_depth` levels. Directories come before files,
/// both alphabetical; hidden entries and build output are skipped.
pub fn scan_tree(root: &Path, max_depth: usize) -> Result<TreeNode> {
    let name = root
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| root.display().to_string());

    let children = if max_depth == 0 {
        Vec::new()
    } else {
        scan_dir(root, "", max_depth)?
    };
    tracing::debug!("Scanned {} ({} top-level entries)", root.display(), children.len());

    Ok(TreeNode {
        name,
        path: String::new(),
        kind: NodeKind::Dir,
        children,
    })
}
