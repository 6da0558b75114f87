//! portal-gateway server entry point.
//!
//! Starts the Axum HTTP server with REST and WebSocket endpoints.

use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use axum::routing::get;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use portal_gateway::api;
use portal_gateway::app_state::AppState;
use portal_gateway::config::PortalConfig;
use portal_gateway::domain::{AccountRegistry, EventBus, MatchBook};
use portal_gateway::persistence::{PortalPersistence, recorder::run_recorder};
use portal_gateway::service::{ChatService, EconomyService, GamesService, WagerService};
use portal_gateway::textgen::{HttpTextGenerator, TextGenerator};
use portal_gateway::ws::handler::ws_handler;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // Load configuration
    let config = PortalConfig::from_env()?;
    tracing::info!(addr = %config.listen_addr, "starting portal-gateway");

    // Build domain layer
    let registry = Arc::new(AccountRegistry::new());
    let event_bus = EventBus::new(config.event_bus_capacity);
    let match_book = Arc::new(MatchBook::with_fixtures());

    // Build service layer
    let economy = Arc::new(EconomyService::new(
        Arc::clone(&registry),
        event_bus.clone(),
        config.portal_password.clone(),
        config.starting_balance,
    ));
    let games = Arc::new(GamesService::new(Arc::clone(&registry), event_bus.clone()));
    let wagers = Arc::new(WagerService::new(
        Arc::clone(&registry),
        Arc::clone(&match_book),
        event_bus.clone(),
    ));

    let generator: Option<Arc<dyn TextGenerator>> = match &config.textgen_endpoint {
        Some(endpoint) => match HttpTextGenerator::new(
            endpoint.clone(),
            config.textgen_api_key.clone(),
            config.textgen_model.clone(),
            Duration::from_secs(config.textgen_timeout_secs),
        ) {
            Ok(g) => Some(Arc::new(g)),
            Err(err) => {
                tracing::warn!(error = %err, "text generator disabled, chat will use fallback replies");
                None
            }
        },
        None => {
            tracing::info!("no text-generation endpoint configured, chat will use fallback replies");
            None
        }
    };
    let chat = Arc::new(ChatService::new(Arc::clone(&registry), generator));

    // Telemetry sidecar: best-effort, never blocks startup
    if config.persistence_enabled {
        match PortalPersistence::connect(&config).await {
            Ok(persistence) => match persistence.ensure_schema().await {
                Ok(()) => {
                    tokio::spawn(run_recorder(
                        persistence,
                        Arc::clone(&registry),
                        event_bus.subscribe(),
                    ));
                    tracing::info!("telemetry recorder started");
                }
                Err(err) => {
                    tracing::warn!(error = %err, "telemetry schema setup failed, recorder disabled");
                }
            },
            Err(err) => {
                tracing::warn!(error = %err, "database unreachable, telemetry recorder disabled");
            }
        }
    }

    // Build application state
    let app_state = AppState {
        economy,
        games,
        wagers,
        chat,
        event_bus,
        account_name: Arc::from(config.account_name.as_str()),
    };

    // Build router
    let app = Router::new()
        .merge(api::build_router())
        .route("/ws", get(ws_handler))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(app_state);

    // Start server
    let listener = tokio::net::TcpListener::bind(config.listen_addr).await?;
    tracing::info!(addr = %config.listen_addr, "server listening");

    axum::serve(listener, app).await?;

    Ok(())
}
