use super::*;

#[tower_lsp::async_trait]
impl LanguageServer for Backend {
    async fn initialize(&self, params: InitializeParams) -> RpcResult<InitializeResult> {
        #[allow(deprecated)]
        let root = params.root_uri.as_ref().and_then(url_to_path);
        *self.workspace_root.write().await = root;
        let settings = params
            .initialization_options
            .as_ref()
            .map(Settings::from_value)
            .unwrap_or_default();
        self.apply_settings(settings).await;
        Ok(InitializeResult {
            capabilities: ServerCapabilities {
                text_document_sync: Some(TextDocumentSyncCapability::Kind(
                    TextDocumentSyncKind::FULL,
                )),
                completion_provider: Some(CompletionOptions {
                    trigger_characters: Some(completion_trigger_characters()),
                    ..Default::default()
                }),
                ..Default::default()
            },
            ..Default::default()
        })
    }

    async fn initialized(&self, _: InitializedParams) {
        let _ = self
            .client
            .log_message(MessageType::INFO, "mira-lang LSP ready")
            .await;
        self.spawn_full_scan();
    }

    async fn shutdown(&self) -> RpcResult<()> {
        Ok(())
    }

    async fn did_open(&self, params: DidOpenTextDocumentParams) {
        let uri = params.text_document.uri;
        let text = params.text_document.text;
        self.docs.insert(uri.clone(), text.clone()).await;
        self.refresh_document(&uri, &text).await;
    }

    async fn did_change(&self, params: DidChangeTextDocumentParams) {
        if let Some(change) = params.content_changes.last() {
            let uri = params.text_document.uri.clone();
            let text = change.text.clone();
            self.docs.insert(uri.clone(), text.clone()).await;
            self.refresh_document(&uri, &text).await;
        }
    }

    async fn did_save(&self, params: DidSaveTextDocumentParams) {
        let uri = params.text_document.uri.clone();
        if let Some(text) = params.text {
            self.docs.insert(uri.clone(), text.clone()).await;
            self.refresh_document(&uri, &text).await;
        } else if let Some(current) = self.docs.get(&uri).await {
            self.refresh_document(&uri, &current).await;
        }
    }

    async fn did_close(&self, params: DidCloseTextDocumentParams) {
        self.docs.remove(&params.text_document.uri).await;
        // reconcile with on-disk state now that the buffer is discarded
        self.spawn_full_scan();
    }

    async fn did_change_configuration(&self, params: DidChangeConfigurationParams) {
        let settings = Settings::from_value(&params.settings);
        self.apply_settings(settings).await;
        self.spawn_full_scan();
    }

    async fn did_change_watched_files(&self, params: DidChangeWatchedFilesParams) {
        let touches_source = params.changes.iter().any(|change| {
            url_to_path(&change.uri).is_some_and(|path| is_source_file(&path))
        });
        if touches_source {
            self.spawn_full_scan();
        }
    }

    async fn completion(
        &self,
        params: CompletionParams,
    ) -> RpcResult<Option<CompletionResponse>> {
        let uri = params.text_document_position.text_document.uri;
        let position = params.text_document_position.position;
        match self.completion_items(&uri, position).await {
            Some(items) if !items.is_empty() => Ok(Some(CompletionResponse::Array(items))),
            _ => Ok(None),
        }
    }
}
