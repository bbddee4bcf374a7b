use std::path::{Path, PathBuf};

/// File that marks a directory as a usable assets root.
const MARKER: &str = "assets/voxels/materials.toml";

/// Locate the directory containing `assets/`. Precedence: explicit CLI
/// path, then the `SCREE_ASSETS` environment variable, then a walk up
/// from the working directory, then the working directory itself.
pub fn resolve_assets_root(cli: Option<String>) -> PathBuf {
    if let Some(root) = cli {
        return PathBuf::from(root);
    }
    if let Ok(root) = std::env::var("SCREE_ASSETS") {
        if !root.is_empty() {
            return PathBuf::from(root);
        }
    }
    let mut dir = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    loop {
        if dir.join(MARKER).is_file() {
            return dir;
        }
        if !dir.pop() {
            break;
        }
    }
    PathBuf::from(".")
}

pub fn materials_path(root: &Path) -> PathBuf {
    root.join("assets").join("voxels").join("materials.toml")
}

pub fn hotbar_path(root: &Path) -> PathBuf {
    root.join("assets").join("voxels").join("hotbar.toml")
}

pub fn worldgen_path(root: &Path) -> PathBuf {
    root.join("assets").join("worldgen.toml")
}
