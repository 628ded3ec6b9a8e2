mod routes;
mod singleton;
mod state;

use agenda_core::{AgendaConfig, EventManager};
use anyhow::{Context, Result};
use tracing::info;

use crate::state::AppState;

/// Compact console logging. RUST_LOG takes precedence over the defaults.
fn init_tracing() {
    use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,agenda_core=debug,agenda_server=debug"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt::layer().compact().with_target(true))
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();

    let config = AgendaConfig::load()?;
    let database = config.database_path();

    // Ensure only one instance writes this database
    let _lock = singleton::acquire_lock(&database)?;

    let manager = EventManager::open(database.clone())
        .with_context(|| format!("Failed to load database {}", database.display()))?;

    let app = routes::app(AppState::new(manager));

    let listener = tokio::net::TcpListener::bind(config.bind_address())
        .await
        .with_context(|| format!("Failed to bind {}", config.bind_address()))?;
    info!(
        database = %database.display(),
        "agenda-server listening on http://{}",
        listener.local_addr()?
    );

    axum::serve(listener, app).await?;

    Ok(())
}
