use std::sync::Arc;

use todo_board::{
    app_state::{AppState, SharedState},
    authentication::auth::JwtSettings,
    data_access::{data_context::DataContext, redb_task_store::RedbTaskStore},
    map_routes,
    settings::Settings,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

fn init_tracing() {
    #[cfg(feature = "profile-console")]
    {
        console_subscriber::init();
    }

    #[cfg(not(feature = "profile-console"))]
    {
        use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

        tracing_subscriber::registry()
            .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
            .with(tracing_subscriber::fmt::layer())
            .init();
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();

    // ── Settings ───────────────────────────────────────────────
    let settings = Settings::load()?;

    // ── Storage ────────────────────────────────────────────────
    let store = RedbTaskStore::open(&settings.database_path)?;
    tracing::info!(path = %settings.database_path, "board store opened");

    // ── Shared state ───────────────────────────────────────────
    let state: SharedState = Arc::new(AppState {
        data_context: DataContext::new(Arc::new(store)),
        jwt: JwtSettings::from(&settings),
    });

    // ── Router ─────────────────────────────────────────────────
    let app = map_routes(state)
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        );

    // ── Start ──────────────────────────────────────────────────
    let addr = settings.socket_address();
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("board API listening on http://{addr}");

    axum::serve(listener, app).await?;
    Ok(())
}
