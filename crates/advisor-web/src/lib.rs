//! Web console for the advisor demo assistant.
//!
//! Serves the static page chrome plus the JSON API the page calls. Every
//! interaction is one request in, one completion call out, one response
//! back; there is no conversation state beyond the per-session flags.

pub mod api;
pub mod state;

use anyhow::Result;
use axum::routing::{get, post};
use axum::Router;
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use tracing::info;

use advisor_config::Config;

use api::briefing::{get_briefing, refresh_briefing};
use api::chat::{chat, quick_action};
use api::practice::get_practice;
use api::session::create_session;
use api::version::get_version;
use state::AppState;

#[derive(Parser, Debug)]
#[command(name = "advisor")]
#[command(about = "Web console for the financial-advisor demo assistant")]
pub struct Args {
    /// Port to bind to
    #[arg(long, default_value = "8880")]
    pub port: u16,

    /// Host to bind to
    #[arg(long, default_value = "127.0.0.1")]
    pub host: String,

    /// Path to the configuration file
    #[arg(long)]
    pub config: Option<String>,

    /// Enable debug logging
    #[arg(long)]
    pub verbose: bool,

    /// Auto-open browser
    #[arg(long)]
    pub open: bool,
}

pub async fn run() -> Result<()> {
    let args = Args::parse();

    initialize_logging(args.verbose);

    let config = Config::load(args.config.as_deref())?;
    info!(
        "Using provider '{}'",
        config.providers.default_provider
    );

    let state = Arc::new(AppState::from_config(&config)?);
    let app = router(state);

    let addr = format!("{}:{}", args.host, args.port);
    info!("Starting advisor console on http://{}", addr);

    if args.open {
        let url = format!("http://{}", addr);
        let _ = open::that(&url);
    }

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Build the app: JSON API under /api, static page chrome for everything
/// else.
pub fn router(state: Arc<AppState>) -> Router {
    let api_routes = Router::new()
        .route("/session", post(create_session))
        .route("/briefing/:session_id", get(get_briefing))
        .route("/briefing/:session_id/refresh", post(refresh_briefing))
        .route("/chat", post(chat))
        .route("/action", post(quick_action))
        .route("/practice", get(get_practice))
        .route("/version", get(get_version))
        .with_state(state);

    // Serve static files from the web directory
    let web_dir = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("web");
    let static_service = ServeDir::new(web_dir);

    Router::new()
        .nest("/api", api_routes)
        .fallback_service(static_service)
        .layer(CorsLayer::permissive())
}

fn initialize_logging(verbose: bool) {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

    let level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::from_default_env()
        .add_directive(format!("advisor_web={}", level).parse().unwrap())
        .add_directive(format!("advisor_core={}", level).parse().unwrap())
        .add_directive(format!("advisor_providers={}", level).parse().unwrap())
        .add_directive(format!("advisor_config={}", level).parse().unwrap());

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(filter)
        .init();
}
