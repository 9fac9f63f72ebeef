use anyhow::{Context, Result};
use clap::Parser;
use meetingd::store::MemoryStore;
use meetingd::{
    create_router, AppState, ChatClient, Config, IngestPipeline, MeetingOrchestrator,
    SessionRegistry, WhisperClient,
};
use std::sync::Arc;
use tracing::info;

#[derive(Debug, Parser)]
#[command(name = "meetingd", about = "Meeting recording and analysis daemon")]
struct Args {
    /// Path to the configuration file (extension optional)
    #[arg(long, default_value = "config/meetingd")]
    config: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let args = Args::parse();
    let cfg = Config::load(&args.config)
        .with_context(|| format!("Failed to load config from {}", args.config))?;

    info!("{} starting", cfg.service.name);

    let api_key = std::env::var("OPENAI_API_KEY").ok();
    if api_key.is_none() {
        info!("OPENAI_API_KEY not set; service requests will be unauthenticated");
    }

    let store = Arc::new(MemoryStore::new());
    let transcriber = Arc::new(
        WhisperClient::new(&cfg.transcription, api_key.clone())
            .context("Failed to build transcription client")?,
    );
    let answerer = Arc::new(
        ChatClient::new(&cfg.answering, api_key).context("Failed to build answering client")?,
    );

    let registry = Arc::new(SessionRegistry::new(
        store.clone(),
        store.clone(),
        store.clone(),
    ));
    let ingest = Arc::new(IngestPipeline::new(
        store.clone(),
        store.clone(),
        transcriber,
        store.clone(),
    ));
    let orchestrator = Arc::new(MeetingOrchestrator::new(
        registry.clone(),
        store.clone(),
        store.clone(),
        answerer,
        store.clone(),
    ));

    let state = AppState::new(
        registry,
        ingest,
        orchestrator,
        store,
        cfg.audio.sample_rate,
    );
    let router = create_router(state);

    let addr = format!("{}:{}", cfg.service.http.bind, cfg.service.http.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;

    info!("Listening on {}", addr);

    axum::serve(listener, router)
        .await
        .context("HTTP server exited")?;

    Ok(())
}
