use std::collections::HashMap;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tokio::sync::RwLock;
use tokio::task::JoinSet;
use walkdir::WalkDir;

use crate::language::{extract_symbols, is_source_file, SymbolTable};

use super::roots::SearchRoots;

// housekeeping directories never worth descending into
pub const SKIP_DIRS: &[&str] = &[
    ".git",
    ".hg",
    ".svn",
    "node_modules",
    "__pycache__",
    "build",
    "dist",
    "target",
    ".venv",
];

#[derive(Debug, Error)]
pub enum IndexError {
    #[error("failed to read `{path}`: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("`{0}` does not resolve to a module under the configured search roots")]
    UnresolvedModule(PathBuf),
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ScanSummary {
    pub indexed: usize,
    pub failed: usize,
}

// Owned indexing service: constructed once per session and shared by
// handle. The module map is the only shared mutable state; a full scan
// clears it up front, so readers mid-scan see a partially repopulated
// view rather than a stale one.
#[derive(Default)]
pub struct WorkspaceIndex {
    roots: RwLock<SearchRoots>,
    modules: RwLock<HashMap<String, SymbolTable>>,
}

impl WorkspaceIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn set_roots(&self, roots: SearchRoots) {
        *self.roots.write().await = roots;
    }

    pub async fn roots(&self) -> SearchRoots {
        self.roots.read().await.clone()
    }

    pub async fn module_name_for(&self, path: &Path) -> Option<String> {
        self.roots.read().await.module_name_for(path)
    }

    // Walks every root and reparses the workspace. Reads run as
    // concurrent I/O tasks; when two files resolve to one module name,
    // whichever read finishes last keeps the slot.
    pub async fn full_scan(&self) -> ScanSummary {
        let roots = self.roots.read().await.clone();
        self.modules.write().await.clear();

        let mut tasks = JoinSet::new();
        for file in discover_source_files(&roots) {
            let Some(module) = roots.module_name_for(&file) else {
                continue;
            };
            tasks.spawn(async move {
                match tokio::fs::read_to_string(&file).await {
                    Ok(text) => Ok((module, extract_symbols(&text))),
                    Err(source) => Err(IndexError::Read { path: file, source }),
                }
            });
        }

        let mut summary = ScanSummary::default();
        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok(Ok((module, table))) => {
                    self.modules.write().await.insert(module, table);
                    summary.indexed += 1;
                }
                Ok(Err(err)) => {
                    tracing::warn!("workspace scan: {err}");
                    summary.failed += 1;
                }
                Err(err) => {
                    tracing::warn!("workspace scan task: {err}");
                    summary.failed += 1;
                }
            }
        }
        summary
    }

    // Replaces a single module entry from in-memory text, so completion
    // requests reflect unsaved edits immediately.
    pub async fn update_document(&self, path: &Path, text: &str) -> Result<String, IndexError> {
        let module = self
            .module_name_for(path)
            .await
            .ok_or_else(|| IndexError::UnresolvedModule(path.to_path_buf()))?;
        let table = extract_symbols(text);
        self.modules.write().await.insert(module.clone(), table);
        Ok(module)
    }

    pub async fn table_for(&self, module: &str) -> Option<SymbolTable> {
        self.modules.read().await.get(module).cloned()
    }

    pub async fn module_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.modules.read().await.keys().cloned().collect();
        names.sort();
        names
    }

    pub async fn snapshot(&self) -> Vec<(String, SymbolTable)> {
        let map = self.modules.read().await;
        let mut entries: Vec<(String, SymbolTable)> = map
            .iter()
            .map(|(name, table)| (name.clone(), table.clone()))
            .collect();
        entries.sort_by(|a, b| a.0.cmp(&b.0));
        entries
    }

    pub async fn module_count(&self) -> usize {
        self.modules.read().await.len()
    }
}

fn discover_source_files(roots: &SearchRoots) -> Vec<PathBuf> {
    let mut files = Vec::new();
    for root in roots.iter() {
        let walker = WalkDir::new(root)
            .into_iter()
            .filter_entry(|entry| entry.depth() == 0 || !is_skipped(entry));
        for entry in walker {
            let entry = match entry {
                Ok(entry) => entry,
                Err(err) => {
                    tracing::warn!("workspace scan: {err}");
                    continue;
                }
            };
            if entry.file_type().is_file() && is_source_file(entry.path()) {
                files.push(entry.into_path());
            }
        }
    }
    files
}

fn is_skipped(entry: &walkdir::DirEntry) -> bool {
    let Some(name) = entry.file_name().to_str() else {
        return true;
    };
    if name.starts_with('.') {
        return true;
    }
    entry.file_type().is_dir() && SKIP_DIRS.contains(&name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::project::settings::Settings;
    use std::fs;
    use tempfile::tempdir;

    async fn index_for(root: &Path) -> WorkspaceIndex {
        let index = WorkspaceIndex::new();
        index
            .set_roots(SearchRoots::discover(Some(root), &Settings::default()))
            .await;
        index
    }

    #[tokio::test]
    async fn full_scan_indexes_nested_modules() {
        let dir = tempdir().expect("tempdir");
        fs::create_dir_all(dir.path().join("core")).expect("mkdir");
        fs::write(dir.path().join("app.mira"), "fun main():\n    pass\n").expect("write");
        fs::write(
            dir.path().join("core/util.mira"),
            "fun helper():\n    pass\n",
        )
        .expect("write");
        fs::write(dir.path().join("core/__init__.mira"), "exported = 1\n").expect("write");

        let index = index_for(dir.path()).await;
        let summary = index.full_scan().await;
        assert_eq!(summary.failed, 0);

        let names = index.module_names().await;
        assert_eq!(names, vec!["app", "core", "core.util"]);
        let app = index.table_for("app").await.expect("app table");
        assert!(app.functions.contains("main"));
    }

    #[tokio::test]
    async fn scan_skips_housekeeping_and_hidden_entries() {
        let dir = tempdir().expect("tempdir");
        fs::create_dir_all(dir.path().join("node_modules/dep")).expect("mkdir");
        fs::create_dir_all(dir.path().join(".cache")).expect("mkdir");
        fs::write(
            dir.path().join("node_modules/dep/ignored.mira"),
            "fun nope():\n    pass\n",
        )
        .expect("write");
        fs::write(dir.path().join(".cache/hidden.mira"), "x = 1\n").expect("write");
        fs::write(dir.path().join(".secret.mira"), "y = 1\n").expect("write");
        fs::write(dir.path().join("kept.mira"), "z = 1\n").expect("write");

        let index = index_for(dir.path()).await;
        index.full_scan().await;
        assert_eq!(index.module_names().await, vec!["kept"]);
    }

    #[tokio::test]
    async fn colliding_module_names_keep_a_single_entry() {
        let first = tempdir().expect("tempdir");
        let second = tempdir().expect("tempdir");
        for root in [first.path(), second.path()] {
            fs::create_dir_all(root.join("core")).expect("mkdir");
        }
        fs::write(first.path().join("core/util.mira"), "fun a():\n    pass\n").expect("write");
        fs::write(second.path().join("core/util.mira"), "fun b():\n    pass\n").expect("write");

        let index = WorkspaceIndex::new();
        index
            .set_roots(SearchRoots::from_paths(vec![
                first.path().to_path_buf(),
                second.path().to_path_buf(),
            ]))
            .await;
        index.full_scan().await;

        // which file wins is a documented race; the entry must be singular
        assert_eq!(index.module_names().await, vec!["core.util"]);
    }

    #[tokio::test]
    async fn unreadable_file_is_skipped_not_fatal() {
        let dir = tempdir().expect("tempdir");
        fs::write(dir.path().join("good.mira"), "fun ok():\n    pass\n").expect("write");
        fs::write(dir.path().join("bad.mira"), [0xff, 0xfe, 0xfd]).expect("write");

        let index = index_for(dir.path()).await;
        let summary = index.full_scan().await;
        assert_eq!(summary.indexed, 1);
        assert_eq!(summary.failed, 1);
        assert_eq!(index.module_names().await, vec!["good"]);
    }

    #[tokio::test]
    async fn update_document_replaces_entry_without_rescan() {
        let dir = tempdir().expect("tempdir");
        let path = dir.path().join("live.mira");
        fs::write(&path, "fun stale():\n    pass\n").expect("write");

        let index = index_for(dir.path()).await;
        index.full_scan().await;
        let module = index
            .update_document(&path, "fun fresh():\n    pass\n")
            .await
            .expect("update");
        assert_eq!(module, "live");
        let table = index.table_for("live").await.expect("table");
        assert!(table.functions.contains("fresh"));
        assert!(!table.functions.contains("stale"));
    }

    #[tokio::test]
    async fn update_outside_roots_is_rejected() {
        let dir = tempdir().expect("tempdir");
        let index = index_for(dir.path()).await;
        let foreign = Path::new("/elsewhere/zzz.mira");
        let err = index
            .update_document(foreign, "x = 1\n")
            .await
            .expect_err("foreign path must not index");
        assert!(matches!(err, IndexError::UnresolvedModule(_)));
    }
}
