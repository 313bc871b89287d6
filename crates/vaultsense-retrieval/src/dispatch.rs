//! Tool-call boundary: tool name + JSON arguments in, text out.
//!
//! A call never fails at this layer. Operation errors come back as an
//! output with `is_error` set and the text `[CODE] message`, so one bad
//! call never ends the caller's session.

use std::path::Path;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::{debug, info, warn};

use vaultsense_core::config::{ConfigOverrides, ReaderConfig, RetrievalConfig};
use vaultsense_core::errors::{ErrorCode, VaultError, VaultResult};
use vaultsense_core::tracing::init_tracing;
use vaultsense_core::{RecordKind, SearchHit, SearchOptions, SimilarOptions, VaultConfig};
use vaultsense_embeddings::create_encoder;
use vaultsense_storage::{read_note, SnapshotStore};

use crate::engine::RetrievalEngine;

pub const SEARCH_NOTES: &str = "search_notes";
pub const FIND_SIMILAR: &str = "find_similar";
pub const GET_STATS: &str = "get_stats";
pub const READ_NOTE: &str = "read_note";
pub const RELOAD: &str = "reload";

/// Every tool name the dispatcher answers to.
pub const TOOL_NAMES: [&str; 5] = [SEARCH_NOTES, FIND_SIMILAR, GET_STATS, READ_NOTE, RELOAD];

/// Rendered result of one tool call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ToolOutput {
    pub text: String,
    pub is_error: bool,
}

impl ToolOutput {
    fn success(value: &Value) -> Self {
        Self {
            text: serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string()),
            is_error: false,
        }
    }

    fn failure(error: &VaultError) -> Self {
        Self {
            text: error.display_string(),
            is_error: true,
        }
    }
}

#[derive(Debug, Deserialize)]
struct SearchArgs {
    query: String,
    limit: Option<i64>,
    threshold: Option<f64>,
    #[serde(rename = "type")]
    kind: Option<String>,
    folder: Option<String>,
}

#[derive(Debug, Deserialize)]
struct SimilarArgs {
    path: String,
    limit: Option<i64>,
    threshold: Option<f64>,
    #[serde(rename = "type")]
    kind: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ReadArgs {
    path: String,
}

pub struct ToolDispatcher {
    engine: RetrievalEngine,
    retrieval: RetrievalConfig,
    reader: ReaderConfig,
}

impl ToolDispatcher {
    pub fn new(engine: RetrievalEngine, config: &VaultConfig) -> Self {
        Self {
            engine,
            retrieval: config.retrieval.clone(),
            reader: config.reader.clone(),
        }
    }

    /// Load the vault at `root` and build the configured encoder.
    pub fn open(root: impl AsRef<Path>, config: &VaultConfig) -> Self {
        let store = SnapshotStore::open(root);
        let encoder = create_encoder(&config.embedding);
        Self::new(RetrievalEngine::new(store, encoder), config)
    }

    /// Process entry point: install tracing, resolve layered config for
    /// `root`, then [`open`](Self::open).
    pub fn initialize(root: &Path, overrides: Option<&ConfigOverrides>) -> VaultResult<Self> {
        init_tracing();
        let config = VaultConfig::load(root, overrides)?;
        info!(root = %root.display(), "vaultsense initialized");
        Ok(Self::open(root, &config))
    }

    pub fn engine(&self) -> &RetrievalEngine {
        &self.engine
    }

    /// Run one tool call. Never panics on bad input.
    pub fn call(&self, tool: &str, arguments: &Value) -> ToolOutput {
        match self.dispatch(tool, arguments) {
            Ok(value) => ToolOutput::success(&value),
            Err(e) => {
                warn!(tool, code = e.error_code(), error = %e, "tool call failed");
                ToolOutput::failure(&e)
            }
        }
    }

    fn dispatch(&self, tool: &str, arguments: &Value) -> VaultResult<Value> {
        debug!(tool, "dispatching tool call");
        match tool {
            SEARCH_NOTES => {
                let args: SearchArgs = parse_args(arguments)?;
                let mut options = SearchOptions {
                    limit: self.resolve_limit(args.limit),
                    threshold: self.resolve_threshold(args.threshold),
                    kind: parse_kind(args.kind.as_deref())?,
                    path_prefix: None,
                };
                if let Some(folder) = args.folder.filter(|f| !f.trim().is_empty()) {
                    options = options.with_path_prefix(folder);
                }
                let hits = self.engine.search(&args.query, &options)?;
                Ok(json!({ "query": args.query, "results": hits_json(&hits) }))
            }
            FIND_SIMILAR => {
                let args: SimilarArgs = parse_args(arguments)?;
                let options = SimilarOptions {
                    limit: self.resolve_limit(args.limit),
                    threshold: self.resolve_threshold(args.threshold),
                    kind: parse_kind(args.kind.as_deref())?,
                };
                let hits = self.engine.find_similar(&args.path, &options)?;
                Ok(json!({ "path": args.path, "results": hits_json(&hits) }))
            }
            GET_STATS => Ok(json!(self.engine.stats())),
            READ_NOTE => {
                let args: ReadArgs = parse_args(arguments)?;
                let note = read_note(
                    self.engine.store().root(),
                    &args.path,
                    self.reader.effective_max_bytes(),
                )?;
                Ok(json!(note))
            }
            RELOAD => {
                let summary = self.engine.reload();
                Ok(json!({
                    "previousCount": summary.previous_len,
                    "currentCount": summary.current_len,
                    "loadedAt": summary.loaded_at.to_rfc3339(),
                }))
            }
            other => Err(VaultError::UnknownTool {
                name: other.to_string(),
            }),
        }
    }

    /// Missing, zero or negative: the configured default. Above the
    /// maximum: the maximum.
    fn resolve_limit(&self, requested: Option<i64>) -> usize {
        let max = self.retrieval.effective_max_limit();
        let limit = match requested {
            Some(n) if n > 0 => usize::try_from(n).unwrap_or(max),
            _ => self.retrieval.effective_default_limit(),
        };
        limit.min(max)
    }

    /// Missing or non-finite: the configured default. Otherwise clamped
    /// into [-1, 1].
    fn resolve_threshold(&self, requested: Option<f64>) -> f64 {
        match requested {
            Some(t) if t.is_finite() => t.clamp(-1.0, 1.0),
            _ => self.retrieval.effective_default_threshold(),
        }
    }
}

fn parse_args<T: DeserializeOwned>(arguments: &Value) -> VaultResult<T> {
    let arguments = match arguments {
        Value::Null => json!({}),
        other => other.clone(),
    };
    serde_json::from_value(arguments).map_err(|e| VaultError::InvalidArgument {
        field: "arguments".to_string(),
        reason: e.to_string(),
    })
}

fn parse_kind(kind: Option<&str>) -> VaultResult<Option<RecordKind>> {
    kind.map(|k| {
        k.parse::<RecordKind>().map_err(|reason| VaultError::InvalidArgument {
            field: "type".to_string(),
            reason,
        })
    })
    .transpose()
}

fn hits_json(hits: &[SearchHit]) -> Value {
    json!(hits)
}
