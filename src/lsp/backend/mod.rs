use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;

use tokio::sync::RwLock;
use tower_lsp::jsonrpc::Result as RpcResult;
use tower_lsp::lsp_types::{
    CompletionItem, CompletionOptions, CompletionParams, CompletionResponse,
    DidChangeConfigurationParams, DidChangeTextDocumentParams, DidChangeWatchedFilesParams,
    DidCloseTextDocumentParams, DidOpenTextDocumentParams, DidSaveTextDocumentParams,
    InitializeParams, InitializeResult, InitializedParams, MessageType, Position,
    ServerCapabilities, TextDocumentSyncCapability, TextDocumentSyncKind, Url,
};
use tower_lsp::{Client, LanguageServer};

use crate::language::{is_source_file, SymbolTable};
use crate::project::{SearchRoots, Settings, WorkspaceIndex};

use super::completion::{classify_line, completion_trigger_characters, resolve};
use super::text::{line_prefix_at, url_to_path};

mod server;
mod state;

use state::Documents;

pub struct Backend {
    client: Client,
    docs: Arc<Documents>,
    index: Arc<WorkspaceIndex>,
    settings: RwLock<Settings>,
    workspace_root: RwLock<Option<PathBuf>>,
}

impl Backend {
    pub fn new(client: Client) -> Self {
        Self {
            client,
            docs: Arc::new(Documents::default()),
            index: Arc::new(WorkspaceIndex::new()),
            settings: RwLock::new(Settings::default()),
            workspace_root: RwLock::new(None),
        }
    }

    async fn apply_settings(&self, settings: Settings) {
        let root = self.workspace_root.read().await.clone();
        let roots = SearchRoots::discover(root.as_deref(), &settings);
        self.index.set_roots(roots).await;
        *self.settings.write().await = settings;
    }

    // Scans never cancel each other; a later generation wins by
    // finishing last.
    fn spawn_full_scan(&self) {
        let index = self.index.clone();
        let client = self.client.clone();
        tokio::spawn(async move {
            let summary = index.full_scan().await;
            tracing::info!(
                indexed = summary.indexed,
                failed = summary.failed,
                "workspace scan finished"
            );
            if summary.failed > 0 {
                let _ = client
                    .log_message(
                        MessageType::WARNING,
                        format!(
                            "mira-lang: {} file(s) could not be indexed",
                            summary.failed
                        ),
                    )
                    .await;
            }
        });
    }

    // Applied before the handler returns, so the next completion request
    // already sees the unsaved text.
    async fn refresh_document(&self, uri: &Url, text: &str) {
        if let Some(path) = url_to_path(uri) {
            // a path outside the search roots simply stays unindexed
            let _ = self.index.update_document(&path, text).await;
        }
    }

    async fn document_table(&self, uri: &Url) -> Option<SymbolTable> {
        let path = url_to_path(uri)?;
        let module = self.index.module_name_for(&path).await?;
        self.index.table_for(&module).await
    }

    async fn completion_items(
        &self,
        uri: &Url,
        position: Position,
    ) -> Option<Vec<CompletionItem>> {
        let text = self.docs.get(uri).await?;
        let prefix = line_prefix_at(&text, position);
        let context = classify_line(&prefix);
        let document_table = self.document_table(uri).await;
        let workspace = self.index.snapshot().await;
        Some(resolve(&context, document_table.as_ref(), &workspace))
    }
}
