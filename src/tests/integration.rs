use std::fs;
use std::path::Path;

use tempfile::tempdir;

use crate::lsp::completion::{classify_line, resolve};
use crate::project::{SearchRoots, Settings, WorkspaceIndex};

async fn scanned_index(root: &Path) -> WorkspaceIndex {
    let index = WorkspaceIndex::new();
    index
        .set_roots(SearchRoots::discover(Some(root), &Settings::default()))
        .await;
    index.full_scan().await;
    index
}

#[tokio::test]
async fn scan_then_complete_across_modules() {
    let dir = tempdir().expect("tempdir");
    fs::create_dir_all(dir.path().join("mapper")).expect("mkdir");
    fs::write(
        dir.path().join("mapper/utils.mira"),
        "fun remap():\n    pass\n",
    )
    .expect("write");
    fs::write(
        dir.path().join("app.mira"),
        r#"
class User:
    fun name(this):
        pass

user = User()
"#,
    )
    .expect("write");

    let index = scanned_index(dir.path()).await;
    let workspace = index.snapshot().await;

    // import context merges the builtin `math` with the indexed module
    let items = resolve(&classify_line("import ma"), None, &workspace);
    let labels: Vec<&str> = items.iter().map(|item| item.label.as_str()).collect();
    assert_eq!(labels, vec!["math", "mapper.utils"]);

    // member context answers from the requesting document's table
    let app = index.table_for("app").await.expect("app table");
    let items = resolve(&classify_line("user."), Some(&app), &workspace);
    let labels: Vec<&str> = items.iter().map(|item| item.label.as_str()).collect();
    assert_eq!(labels, vec!["name"]);
}

#[tokio::test]
async fn unsaved_edits_are_visible_to_completion() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("draft.mira");
    fs::write(&path, "fun old_name():\n    pass\n").expect("write");

    let index = scanned_index(dir.path()).await;
    index
        .update_document(&path, "fun renamed():\n    pass\n")
        .await
        .expect("update");

    let workspace = index.snapshot().await;
    let items = resolve(&classify_line("from draft import "), None, &workspace);
    let labels: Vec<&str> = items.iter().map(|item| item.label.as_str()).collect();
    assert_eq!(labels, vec!["renamed"]);
}

#[tokio::test]
async fn rescan_reconciles_with_disk_after_discarded_buffer() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("doc.mira");
    fs::write(&path, "on_disk = 1\n").expect("write");

    let index = scanned_index(dir.path()).await;
    index
        .update_document(&path, "in_buffer = 2\n")
        .await
        .expect("update");
    let table = index.table_for("doc").await.expect("table");
    assert!(table.variables.contains("in_buffer"));

    // the document-close trigger runs a full scan, dropping buffer state
    index.full_scan().await;
    let table = index.table_for("doc").await.expect("table");
    assert!(table.variables.contains("on_disk"));
    assert!(!table.variables.contains("in_buffer"));
}
