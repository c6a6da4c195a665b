//! trawl — source tree search indexer.
//!
//! Entry point: parses the CLI, builds the configuration, wires the
//! embedding backend and index store, and runs either a one-shot
//! rebuild or the watching indexer.

#![allow(clippy::module_name_repetitions)]

use std::sync::Arc;

use anyhow::Context;
use clap::Parser;

use trawl::embeddings;
use trawl::index::{Indexer, WatcherHandle};
use trawl::observability::init_tracing;
use trawl::scan::IgnoreRules;
use trawl::store::{IndexStore, RestStore};
use trawl::{Config, EmbedderKind};

/// Keep a vector + keyword search index in sync with a source tree
#[derive(Parser, Debug)]
#[command(name = "trawl")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Root directory of the source tree to index
    #[arg(short, long, env = "TRAWL_ROOT", default_value = ".")]
    root: std::path::PathBuf,

    /// Collection name in the search engine
    #[arg(short, long, env = "TRAWL_COLLECTION", default_value = "trawl")]
    collection: String,

    /// Base URL of the search engine
    #[arg(long, env = "TRAWL_STORE_URL", default_value = "http://127.0.0.1:7700")]
    store_url: String,

    /// API key sent as a bearer token to the search engine
    #[arg(long, env = "TRAWL_STORE_API_KEY")]
    store_api_key: Option<String>,

    /// Embedding backend variant
    #[arg(long, env = "TRAWL_EMBEDDER", value_enum, default_value = "batch")]
    embedder: EmbedderKind,

    /// Base URL of the embedding backend
    #[arg(long, env = "TRAWL_EMBED_URL", default_value = "http://127.0.0.1:11434")]
    embed_url: String,

    /// Embedding model name
    #[arg(long, env = "TRAWL_EMBED_MODEL", default_value = "nomic-embed-text")]
    embed_model: String,

    /// Maximum lines per chunk
    #[arg(long, env = "TRAWL_CHUNK_LINES", default_value = "50")]
    chunk_lines: usize,

    /// Lines of overlap between consecutive chunks
    #[arg(long, env = "TRAWL_CHUNK_OVERLAP", default_value = "5")]
    chunk_overlap: usize,

    /// Skip files larger than this many bytes
    #[arg(long, env = "TRAWL_MAX_FILE_BYTES", default_value = "1048576")]
    max_file_bytes: u64,

    /// Documents per upsert request to the search engine
    #[arg(long, env = "TRAWL_BATCH_SIZE", default_value = "64")]
    batch_size: usize,

    /// Quiet period before filesystem events are processed (ms)
    #[arg(long, env = "TRAWL_DEBOUNCE_MS", default_value = "500")]
    debounce_ms: u64,

    /// Keep watching the tree after the initial rebuild
    #[arg(short, long, env = "TRAWL_WATCH")]
    watch: bool,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, env = "TRAWL_LOG_LEVEL", default_value = "info")]
    log_level: String,

    /// Enable JSON logging output
    #[arg(long, env = "TRAWL_LOG_JSON")]
    log_json: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    init_tracing(&cli.log_level, cli.log_json);

    tracing::info!("trawl v{} starting...", env!("CARGO_PKG_VERSION"));

    let config = Config {
        root: cli.root,
        collection: cli.collection,
        store_url: cli.store_url,
        store_api_key: cli.store_api_key,
        embedder: cli.embedder,
        embed_url: cli.embed_url,
        embed_model: cli.embed_model,
        chunk_lines: cli.chunk_lines,
        chunk_overlap: cli.chunk_overlap,
        max_file_bytes: cli.max_file_bytes,
        batch_size: cli.batch_size,
        debounce_ms: cli.debounce_ms,
        watch: cli.watch,
        log_level: cli.log_level,
        log_json: cli.log_json,
    };

    tracing::debug!(?config, "Configuration loaded");
    config.validate().context("invalid configuration")?;

    let embedder = embeddings::from_config(&config);
    let store: Arc<dyn IndexStore> = Arc::new(RestStore::new(&config, embedder.name()));
    let indexer = Arc::new(Indexer::new(&config, embedder, Arc::clone(&store)));

    indexer
        .prepare()
        .await
        .context("failed to prepare the index collection")?;

    if config.watch {
        let (handle, summary) = WatcherHandle::start(&config, indexer)
            .await
            .context("failed to start watching")?;
        tracing::info!(
            files = summary.files_indexed,
            chunks = summary.chunks_indexed,
            "Initial rebuild complete, watching for changes"
        );

        tokio::signal::ctrl_c()
            .await
            .context("failed to listen for shutdown signal")?;
        tracing::info!("Shutting down, letting queued tasks finish");
        handle.close().await;
    } else {
        let rules = IgnoreRules::load(&config.root)?;
        let summary = indexer.rebuild(&rules).await?;
        tracing::info!(
            files = summary.files_indexed,
            chunks = summary.chunks_indexed,
            "Rebuild complete"
        );
        report_store_health(store.as_ref()).await;
    }

    Ok(())
}

/// Log collection stats and recently failed store tasks. Best-effort:
/// a store that cannot answer only produces warnings.
async fn report_store_health(store: &dyn IndexStore) {
    match store.stats().await {
        Ok(stats) => tracing::info!(
            documents = stats.number_of_documents,
            indexing = stats.is_indexing,
            "Store stats"
        ),
        Err(err) => tracing::warn!(error = %err, "Could not fetch store stats"),
    }

    match store.recent_tasks(20).await {
        Ok(tasks) => {
            for task in tasks.iter().filter(|task| task.is_failed()) {
                tracing::warn!(uid = task.uid, error = ?task.error, "Store reported a failed task");
            }
        }
        Err(err) => tracing::warn!(error = %err, "Could not fetch recent store tasks"),
    }
}
