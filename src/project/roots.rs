use std::env;
use std::path::{Path, PathBuf};

use crate::language::{is_source_file, PACKAGE_INIT_FILE, SOURCE_EXTENSION};

use super::settings::Settings;

pub const ENV_PATH_VAR: &str = "MIRAPATH";

// Ordered by priority: the first root that is an ancestor of a file
// decides its module name.
#[derive(Debug, Clone, Default)]
pub struct SearchRoots {
    roots: Vec<PathBuf>,
}

impl SearchRoots {
    pub fn discover(workspace_root: Option<&Path>, settings: &Settings) -> Self {
        let mut roots = Vec::new();
        if let Some(root) = workspace_root {
            push_unique(&mut roots, root.to_path_buf());
            let lib = root.join("lib");
            if lib.is_dir() {
                push_unique(&mut roots, lib);
            }
        }
        for raw in &settings.search_paths {
            if let Some(path) = resolve_search_path(raw, workspace_root) {
                push_unique(&mut roots, path);
            }
        }
        if settings.use_environment_path {
            if let Some(list) = env::var_os(ENV_PATH_VAR) {
                for path in env::split_paths(&list) {
                    if !path.as_os_str().is_empty() {
                        push_unique(&mut roots, path);
                    }
                }
            }
        }
        SearchRoots { roots }
    }

    pub fn from_paths(roots: Vec<PathBuf>) -> Self {
        SearchRoots { roots }
    }

    pub fn iter(&self) -> std::slice::Iter<'_, PathBuf> {
        self.roots.iter()
    }

    pub fn len(&self) -> usize {
        self.roots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.roots.is_empty()
    }

    pub fn module_name_for(&self, path: &Path) -> Option<String> {
        let root = self.roots.iter().find(|root| path.starts_with(root))?;
        if !is_source_file(path) {
            return None;
        }
        let relative = path.strip_prefix(root).ok()?;
        let mut segments = Vec::new();
        for component in relative.components() {
            segments.push(component.as_os_str().to_str()?.to_string());
        }
        let file_name = segments.pop()?;
        if file_name != PACKAGE_INIT_FILE {
            // strip the extension; the initializer instead names its directory
            let stem = file_name.strip_suffix(SOURCE_EXTENSION)?;
            let stem = stem.strip_suffix('.')?;
            if stem.is_empty() {
                return None;
            }
            segments.push(stem.to_string());
        }
        if segments.is_empty() {
            return None;
        }
        Some(segments.join("."))
    }
}

fn resolve_search_path(raw: &str, workspace_root: Option<&Path>) -> Option<PathBuf> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    if trimmed == "~" {
        return dirs::home_dir();
    }
    if let Some(rest) = trimmed
        .strip_prefix("~/")
        .or_else(|| trimmed.strip_prefix("~\\"))
    {
        return dirs::home_dir().map(|home| home.join(rest));
    }
    let path = PathBuf::from(trimmed);
    if path.is_absolute() {
        return Some(path);
    }
    workspace_root.map(|root| root.join(path))
}

fn push_unique(roots: &mut Vec<PathBuf>, candidate: PathBuf) {
    if !roots.contains(&candidate) {
        roots.push(candidate);
    }
}
