//! Booking Concierge server.
//!
//! Loads configuration from the environment, wires the recognizer and
//! conversation store adapters into a dialog manager and serves the
//! conversation API.

use std::error::Error;
use std::sync::Arc;

use axum::http::{header, HeaderValue, Method};
use axum::Router;
use sqlx::postgres::PgPoolOptions;
use tower_http::cors::CorsLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

use booking_concierge::adapters::http::{conversation_router, ConversationAppState};
use booking_concierge::adapters::postgres::PostgresConversationStore;
use booking_concierge::adapters::recognizer::{
    CluConfig, CluRecognizer, KeywordRecognizer, UnconfiguredRecognizer,
};
use booking_concierge::adapters::storage::{FileConversationStore, InMemoryConversationStore};
use booking_concierge::application::DialogManager;
use booking_concierge::config::{
    AppConfig, RecognizerConfig, RecognizerProvider, StorageBackend, StorageConfig,
};
use booking_concierge::domain::dialog::{DialogRegistry, InterruptionFilter, TurnEngine};
use booking_concierge::ports::{ConversationStore, Recognizer};

type BoxError = Box<dyn Error + Send + Sync>;

#[tokio::main]
async fn main() -> Result<(), BoxError> {
    let config = AppConfig::load()?;
    init_tracing(&config);
    config.validate()?;

    let recognizer = build_recognizer(&config.recognizer)?;
    let store = build_store(&config.storage).await?;
    let engine = TurnEngine::new(
        DialogRegistry::hotel(config.dialog.max_date_attempts),
        InterruptionFilter::default(),
        config.dialog.cascade_limit,
    );
    let manager = Arc::new(DialogManager::new(engine, recognizer, store));

    let mut app: Router = conversation_router(ConversationAppState::new(manager))
        .layer(TimeoutLayer::new(config.server.request_timeout()))
        .layer(cors_layer(&config.server.cors_origins_list()));
    if config.features.enable_tracing {
        app = app.layer(TraceLayer::new_for_http());
    }

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(%addr, environment = ?config.server.environment, "Booking concierge listening");
    axum::serve(listener, app).await?;
    Ok(())
}

fn init_tracing(config: &AppConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.server.log_level));
    let registry = tracing_subscriber::registry().with(filter);
    if config.features.json_logs {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}

fn build_recognizer(config: &RecognizerConfig) -> Result<Arc<dyn Recognizer>, BoxError> {
    let recognizer: Arc<dyn Recognizer> = match config.provider {
        RecognizerProvider::Clu => match (
            &config.clu_project_name,
            &config.clu_deployment_name,
            &config.clu_api_host,
            &config.clu_api_key,
        ) {
            (Some(project), Some(deployment), Some(host), Some(key))
                if config.is_clu_configured() =>
            {
                let clu = CluConfig::new(
                    project.clone(),
                    deployment.clone(),
                    host.clone(),
                    key.clone(),
                )
                .with_language(config.language.clone())
                .with_timeout(config.timeout());
                Arc::new(CluRecognizer::new(clu)?)
            }
            _ => {
                warn!("CLU settings incomplete, running without a recognizer");
                Arc::new(UnconfiguredRecognizer)
            }
        },
        RecognizerProvider::Keyword => Arc::new(KeywordRecognizer::new()),
        RecognizerProvider::None => Arc::new(UnconfiguredRecognizer),
    };
    info!(recognizer = recognizer.name(), "Recognizer ready");
    Ok(recognizer)
}

async fn build_store(config: &StorageConfig) -> Result<Arc<dyn ConversationStore>, BoxError> {
    let store: Arc<dyn ConversationStore> = match config.backend {
        StorageBackend::Memory => Arc::new(InMemoryConversationStore::new()),
        StorageBackend::File => Arc::new(FileConversationStore::new(&config.directory)),
        StorageBackend::Postgres => {
            let url = config.database_url.as_deref().unwrap_or_default();
            let pool = PgPoolOptions::new()
                .min_connections(config.min_connections)
                .max_connections(config.max_connections)
                .acquire_timeout(config.acquire_timeout())
                .connect(url)
                .await?;
            let store = PostgresConversationStore::new(pool);
            store.ensure_schema().await?;
            Arc::new(store)
        }
    };
    info!(backend = ?config.backend, "Conversation store ready");
    Ok(store)
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    let origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();
    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST, Method::DELETE])
        .allow_headers([header::CONTENT_TYPE])
}
