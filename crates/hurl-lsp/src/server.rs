//! LSP server implementation

use std::collections::HashMap;
use std::sync::Arc;

use hurl_parse::Document;
use tokio::sync::RwLock;
use tower_lsp::jsonrpc::Result;
use tower_lsp::lsp_types::*;
use tower_lsp::{Client, LanguageServer, LspService, Server};
use tracing::{debug, info, warn};

use crate::completion::complete;
use crate::config;
use crate::openapi::ApiSpec;
use crate::signature_help::signature_help;
use crate::source::{read_lines, uri_to_path};

/// Document state tracked by the server
struct DocumentState {
    /// Raw lines of the text `document` was parsed from
    lines: Arc<[String]>,
    /// Parsed tree, `None` if no text has parsed yet
    document: Option<Arc<Document>>,
    /// Document version
    #[allow(dead_code)]
    version: i32,
}

/// A consistent view of one document for the duration of a request.
struct Snapshot {
    lines: Arc<[String]>,
    document: Option<Arc<Document>>,
}

/// The Hurl language server
pub struct HurlLanguageServer {
    /// LSP client for sending notifications
    client: Client,
    /// Open documents
    documents: Arc<RwLock<HashMap<Url, DocumentState>>>,
    /// API definition used for paths and request documentation
    api: Arc<RwLock<ApiSpec>>,
    /// Whether `initialized` should read the config file
    load_config: bool,
}

impl HurlLanguageServer {
    pub fn new(client: Client) -> Self {
        Self {
            client,
            documents: Arc::new(RwLock::new(HashMap::new())),
            api: Arc::new(RwLock::new(ApiSpec::default())),
            load_config: true,
        }
    }

    /// A server using `api` instead of the one named by the config file.
    pub fn with_api_spec(client: Client, api: ApiSpec) -> Self {
        Self {
            api: Arc::new(RwLock::new(api)),
            load_config: false,
            ..Self::new(client)
        }
    }

    /// Re-parse a document and store the result.
    ///
    /// A structural parse failure keeps the previous state whole, lines
    /// and tree together, so every request sees the text its tree was
    /// built from. Without a previous state the new lines are stored with
    /// no tree.
    async fn update_document(&self, uri: Url, text: &str, version: i32) {
        let lines: Arc<[String]> = hurl_parse::split_lines(text)
            .into_iter()
            .map(str::to_string)
            .collect();
        let parsed = hurl_parse::parse_lines(&lines[..]);

        let mut docs = self.documents.write().await;
        let document = match parsed {
            Ok(document) => {
                debug!(%uri, version, entries = document.entries.len(), "Parsed document");
                Some(Arc::new(document))
            }
            Err(error) if docs.contains_key(&uri) => {
                warn!(%uri, version, %error, "Parse failed, keeping previous state");
                return;
            }
            Err(error) => {
                warn!(%uri, version, %error, "Parse failed");
                None
            }
        };

        docs.insert(
            uri,
            DocumentState {
                lines,
                document,
                version,
            },
        );
    }

    /// The stored state of a document, read from disk if it isn't open.
    async fn snapshot(&self, uri: &Url) -> Option<Snapshot> {
        {
            let docs = self.documents.read().await;
            if let Some(state) = docs.get(uri) {
                return Some(Snapshot {
                    lines: state.lines.clone(),
                    document: state.document.clone(),
                });
            }
        }

        let lines = match read_lines(&uri_to_path(uri.as_str())) {
            Ok(lines) => lines,
            Err(error) => {
                warn!(%uri, %error, "Request for unknown document");
                return None;
            }
        };

        let document = match hurl_parse::parse_lines(&lines) {
            Ok(document) => Some(Arc::new(document)),
            Err(error) => {
                warn!(%uri, %error, "Parse failed");
                None
            }
        };

        Some(Snapshot {
            lines: lines.into(),
            document,
        })
    }

    /// Load the API definition named by the config file, if any.
    async fn load_api_spec(&self) {
        let config = match config::load_config() {
            Ok(Some(config)) => config,
            Ok(None) => return,
            Err(error) => {
                warn!(%error, "Ignoring config");
                self.client
                    .log_message(MessageType::WARNING, error.to_string())
                    .await;
                return;
            }
        };

        let Some(path) = config.openapi_def else {
            return;
        };

        match ApiSpec::load(&path) {
            Ok(api) => {
                info!(?path, "Loaded API definition");
                *self.api.write().await = api;
            }
            Err(error) => {
                warn!(?path, %error, "Failed to load API definition");
                self.client
                    .log_message(MessageType::WARNING, error.to_string())
                    .await;
            }
        }
    }
}

/// Query coordinates for a cursor: the column of the character before it.
fn query_point(position: Position) -> (u32, u32) {
    (position.line, position.character.saturating_sub(1))
}

#[tower_lsp::async_trait]
impl LanguageServer for HurlLanguageServer {
    async fn initialize(&self, _params: InitializeParams) -> Result<InitializeResult> {
        Ok(InitializeResult {
            capabilities: ServerCapabilities {
                // Full document sync - we get the whole document on each change
                text_document_sync: Some(TextDocumentSyncCapability::Kind(
                    TextDocumentSyncKind::FULL,
                )),
                completion_provider: Some(CompletionOptions {
                    trigger_characters: Some(vec![" ".into(), "[".into(), "{".into()]),
                    resolve_provider: Some(false),
                    ..Default::default()
                }),
                signature_help_provider: Some(SignatureHelpOptions {
                    trigger_characters: Some(vec![" ".into()]),
                    retrigger_characters: None,
                    work_done_progress_options: WorkDoneProgressOptions::default(),
                }),
                ..Default::default()
            },
            server_info: Some(ServerInfo {
                name: "hurl-ls".to_string(),
                version: Some(env!("CARGO_PKG_VERSION").to_string()),
            }),
        })
    }

    async fn initialized(&self, _: InitializedParams) {
        if self.load_config {
            self.load_api_spec().await;
        }

        self.client
            .log_message(MessageType::INFO, "Hurl language server initialized")
            .await;
    }

    async fn shutdown(&self) -> Result<()> {
        Ok(())
    }

    async fn did_open(&self, params: DidOpenTextDocumentParams) {
        let doc = params.text_document;
        self.update_document(doc.uri, &doc.text, doc.version).await;
    }

    async fn did_change(&self, params: DidChangeTextDocumentParams) {
        let uri = params.text_document.uri;
        let version = params.text_document.version;

        // With FULL sync, we get the entire document content
        if let Some(change) = params.content_changes.into_iter().next() {
            self.update_document(uri, &change.text, version).await;
        }
    }

    async fn did_close(&self, params: DidCloseTextDocumentParams) {
        let mut docs = self.documents.write().await;
        docs.remove(&params.text_document.uri);
    }

    async fn completion(&self, params: CompletionParams) -> Result<Option<CompletionResponse>> {
        let uri = params.text_document_position.text_document.uri;
        let (line, col) = query_point(params.text_document_position.position);

        let Some(document) = self.snapshot(&uri).await.and_then(|s| s.document) else {
            return Ok(None);
        };

        let api = self.api.read().await;
        let items = complete(&document, &api, line, col);
        Ok(Some(CompletionResponse::Array(items)))
    }

    async fn signature_help(&self, params: SignatureHelpParams) -> Result<Option<SignatureHelp>> {
        let uri = params.text_document_position_params.text_document.uri;
        let (line, col) = query_point(params.text_document_position_params.position);

        let Some(snapshot) = self.snapshot(&uri).await else {
            return Ok(None);
        };

        let api = self.api.read().await;
        Ok(signature_help(
            &snapshot.lines[..],
            snapshot.document.as_deref(),
            &api,
            line,
            col,
        ))
    }
}

/// Run the LSP server on stdin/stdout
pub async fn run() -> eyre::Result<()> {
    // Set up logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let stdin = tokio::io::stdin();
    let stdout = tokio::io::stdout();

    let (service, socket) = LspService::new(HurlLanguageServer::new);
    Server::new(stdin, stdout, socket).serve(service).await;

    Ok(())
}
