use std::sync::Arc;

use rig::client::{CompletionClient, EmbeddingsClient};
use rig::providers::openai;
use tracing_subscriber::FmtSubscriber;

use lawsmith::api::{AppState, create_router};
use lawsmith::config::AppConfig;
use lawsmith::embeddings::RigEmbeddingProvider;
use lawsmith::engine::QueryEngine;
use lawsmith::generation::RigGenerator;
use lawsmith::ingestion::ingest_document;
use lawsmith::stores::{SectionStore, SqliteSectionStore};
use lawsmith::types::PipelineError;

#[tokio::main]
async fn main() -> Result<(), PipelineError> {
    init_tracing();

    let config = AppConfig::from_env()?;
    let openai_key = config.require_openai_key()?.to_string();

    let client = openai::Client::new(&openai_key);
    let embedding_model =
        client.embedding_model_with_ndims(&config.embedding_model, config.embedding_dims);
    let embeddings = Arc::new(RigEmbeddingProvider::new(
        embedding_model,
        config.embedding_model.clone(),
    ));
    let agent = client.agent(&config.completion_model).build();
    let generator = Arc::new(RigGenerator::new(agent, config.completion_model.clone()));

    let store = Arc::new(SqliteSectionStore::open(&config.db_path, config.embedding_dims).await?);

    let indexed = store.count().await?;
    if indexed == 0 || config.rebuild {
        let text = tokio::fs::read_to_string(&config.document_path).await?;
        let cleared = store.clear().await?;
        if cleared > 0 {
            tracing::info!(cleared, "dropped previously indexed sections");
        }
        let outcome = ingest_document(store.as_ref(), embeddings.as_ref(), &text).await?;
        tracing::info!(
            pages = outcome.pages,
            sections = outcome.sections,
            stored = outcome.stored,
            skipped = outcome.skipped,
            document = %config.document_path.display(),
            "index built"
        );
    } else {
        tracing::info!(indexed, db = %config.db_path.display(), "reusing existing index");
    }

    let engine =
        Arc::new(QueryEngine::new(store, embeddings, generator).with_default_top_k(config.top_k));
    let bind_addr = config.bind_addr.clone();
    let state = AppState::new(engine, Arc::new(config));

    let app = create_router(state);
    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    tracing::info!(addr = %bind_addr, "listening");
    axum::serve(listener, app).await?;
    Ok(())
}

fn init_tracing() {
    static INIT: std::sync::Once = std::sync::Once::new();
    INIT.call_once(|| {
        let filter = std::env::var("RUST_LOG")
            .unwrap_or_else(|_| "lawsmith=info,tower_http=info".to_string());
        let subscriber = FmtSubscriber::builder().with_env_filter(filter).finish();
        let _ = tracing::subscriber::set_global_default(subscriber);
    });
}
