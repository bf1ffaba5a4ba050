//! LSP Backend implementation for norminette
//!
//! Every open/change/save of a document runs one validation cycle: resolve
//! the document's settings, run the linter on the file, map its report and
//! publish the result as the document's complete diagnostic set.

use std::collections::HashMap;
use std::sync::Arc;

use norminette_core::config::ServerConfig;
use norminette_core::settings::SECTION;
use norminette_core::{check_file, LinterInvocationError, Session, Settings};
use serde_json::Value;
use thiserror::Error;
use tokio::sync::RwLock;
use tower_lsp::jsonrpc::Result;
use tower_lsp::lsp_types::notification::Notification;
use tower_lsp::lsp_types::*;
use tower_lsp::{Client, LanguageServer};

use crate::capabilities::{server_capabilities, ClientSupport};
use crate::quickfix::{self, DEFAULT_LANGUAGE_ID};
use crate::validation::to_lsp_diagnostic;

/// Custom notification carrying a human-readable failure message.
///
/// The editor extension shows it as an error popup.
pub enum LinterErrorNotification {}

impl Notification for LinterErrorNotification {
    type Params = String;
    const METHOD: &'static str = "error";
}

#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("{0} is not a file on disk")]
    NotAFile(Url),

    #[error(transparent)]
    Linter(#[from] LinterInvocationError),
}

/// Document state stored for each open file
#[derive(Debug, Clone)]
pub struct DocumentState {
    pub version: i32,
    pub language_id: String,
}

/// Settings from a `workspace/didChangeConfiguration` payload, for clients
/// that cannot answer `workspace/configuration`.
pub fn settings_from_change(payload: &Value, defaults: &Settings) -> Settings {
    Settings::from_value(payload.get(SECTION).unwrap_or(&Value::Null), defaults)
}

/// The norminette language server backend
pub struct NorminetteBackend {
    client: Client,
    /// Server-wide defaults from `norminette-lsp.toml` / environment.
    defaults: Settings,
    /// Used for every document when the client has no `workspace/configuration`.
    global_settings: Arc<RwLock<Settings>>,
    support: Arc<RwLock<ClientSupport>>,
    documents: Arc<RwLock<HashMap<Url, DocumentState>>>,
    session: Arc<RwLock<Session>>,
}

impl NorminetteBackend {
    pub fn new(client: Client, config: ServerConfig) -> Self {
        Self {
            client,
            global_settings: Arc::new(RwLock::new(config.defaults.clone())),
            defaults: config.defaults,
            support: Arc::new(RwLock::new(ClientSupport::default())),
            documents: Arc::new(RwLock::new(HashMap::new())),
            session: Arc::new(RwLock::new(Session::new())),
        }
    }

    /// Resolve settings for a document, fetching and caching them on a miss.
    async fn document_settings(&self, uri: &Url) -> Settings {
        let key = uri.as_str();
        if let Some(settings) = self.session.read().await.cached_settings(key) {
            return settings.clone();
        }

        if !self.support.read().await.configuration {
            return self.global_settings.read().await.clone();
        }

        let generation = self.session.read().await.settings_generation();
        let item = ConfigurationItem {
            scope_uri: Some(uri.clone()),
            section: Some(SECTION.to_string()),
        };
        let settings = match self.client.configuration(vec![item]).await {
            Ok(values) => values
                .first()
                .map(|value| Settings::from_value(value, &self.defaults))
                .unwrap_or_else(|| self.defaults.clone()),
            Err(e) => {
                tracing::warn!(%uri, "workspace/configuration failed, using defaults: {}", e);
                return self.defaults.clone();
            }
        };

        // Only keep settings for open documents, and not across a clear
        if self.documents.read().await.contains_key(uri)
            && !self
                .session
                .write()
                .await
                .cache_settings_from(generation, key, settings.clone())
        {
            tracing::debug!(%uri, "Configuration changed during fetch, not caching");
        }
        settings
    }

    async fn run_validation(&self, uri: &Url) -> std::result::Result<Vec<Diagnostic>, ValidationError> {
        let path = uri
            .to_file_path()
            .map_err(|_| ValidationError::NotAFile(uri.clone()))?;
        let settings = self.document_settings(uri).await;

        let records = check_file(&path, &settings).await?;

        let related = self
            .support
            .read()
            .await
            .related_information
            .then_some(uri);
        Ok(records
            .iter()
            .map(|record| to_lsp_diagnostic(record, related))
            .collect())
    }

    /// Run the linter for a document and publish the full replacement set.
    async fn validate(&self, uri: Url) {
        let token = self.session.write().await.begin_run(uri.as_str());
        let result = self.run_validation(&uri).await;

        if !self.session.write().await.finish_run(&token) {
            tracing::debug!(%uri, generation = token.generation(), "Discarding superseded validation");
            return;
        }

        match result {
            Ok(diagnostics) => {
                tracing::debug!(%uri, count = diagnostics.len(), "Publishing diagnostics");
                let version = self.documents.read().await.get(&uri).map(|d| d.version);
                self.client
                    .publish_diagnostics(uri, diagnostics, version)
                    .await;
            }
            Err(ValidationError::NotAFile(uri)) => {
                tracing::debug!(%uri, "Skipping validation of non-file document");
            }
            Err(ValidationError::Linter(e)) => {
                tracing::warn!(%uri, "Linter invocation failed: {}", e);
                self.client
                    .send_notification::<LinterErrorNotification>(e.to_string())
                    .await;
            }
        }
    }

    async fn validate_all(&self) {
        let uris: Vec<Url> = self.documents.read().await.keys().cloned().collect();
        for uri in uris {
            self.validate(uri).await;
        }
    }
}

#[tower_lsp::async_trait]
impl LanguageServer for NorminetteBackend {
    async fn initialize(&self, params: InitializeParams) -> Result<InitializeResult> {
        let support = ClientSupport::from_capabilities(&params.capabilities);
        tracing::info!(?support, "Client capabilities");
        *self.support.write().await = support;

        Ok(InitializeResult {
            capabilities: server_capabilities(&support),
            server_info: Some(ServerInfo {
                name: "norminette-lsp".to_string(),
                version: Some(env!("CARGO_PKG_VERSION").to_string()),
            }),
        })
    }

    async fn initialized(&self, _: InitializedParams) {
        if self.support.read().await.configuration {
            let registration = Registration {
                id: "norminette-did-change-configuration".to_string(),
                method: "workspace/didChangeConfiguration".to_string(),
                register_options: None,
            };
            if let Err(e) = self.client.register_capability(vec![registration]).await {
                tracing::warn!("Failed to register for configuration changes: {}", e);
            }
        }

        self.client
            .log_message(MessageType::INFO, "Norminette language server initialized")
            .await;
    }

    async fn shutdown(&self) -> Result<()> {
        Ok(())
    }

    async fn did_open(&self, params: DidOpenTextDocumentParams) {
        let doc = params.text_document;
        self.documents.write().await.insert(
            doc.uri.clone(),
            DocumentState {
                version: doc.version,
                language_id: doc.language_id,
            },
        );
        self.validate(doc.uri).await;
    }

    async fn did_change(&self, params: DidChangeTextDocumentParams) {
        let uri = params.text_document.uri;
        if let Some(doc) = self.documents.write().await.get_mut(&uri) {
            doc.version = params.text_document.version;
        }
        self.validate(uri).await;
    }

    async fn did_save(&self, params: DidSaveTextDocumentParams) {
        self.validate(params.text_document.uri).await;
    }

    async fn did_close(&self, params: DidCloseTextDocumentParams) {
        let uri = params.text_document.uri;
        self.documents.write().await.remove(&uri);
        self.session.write().await.evict(uri.as_str());
        self.client.publish_diagnostics(uri, Vec::new(), None).await;
    }

    async fn did_change_configuration(&self, params: DidChangeConfigurationParams) {
        if self.support.read().await.configuration {
            // Reset all cached document settings
            self.session.write().await.clear_settings();
        } else {
            *self.global_settings.write().await = settings_from_change(&params.settings, &self.defaults);
        }

        self.validate_all().await;
    }

    async fn did_change_watched_files(&self, params: DidChangeWatchedFilesParams) {
        tracing::debug!(changes = params.changes.len(), "Watched files changed");
    }

    async fn code_action(&self, params: CodeActionParams) -> Result<Option<CodeActionResponse>> {
        if params.context.diagnostics.is_empty() {
            return Ok(Some(Vec::new()));
        }

        let docs = self.documents.read().await;
        let Some(doc) = docs.get(&params.text_document.uri) else {
            return Ok(Some(Vec::new()));
        };
        let language_id = if doc.language_id.is_empty() {
            DEFAULT_LANGUAGE_ID
        } else {
            doc.language_id.as_str()
        };

        Ok(Some(quickfix::code_actions(
            &params.context.diagnostics,
            language_id,
        )))
    }
}
