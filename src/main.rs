mod api_doc;
mod app;
mod config;
mod error;
mod extract;
mod handlers;
mod models;
mod repository;
mod routes;
mod state;
mod store;
#[cfg(test)]
mod testing;

use anyhow::Context;
use config::Config;
use repository::TodoRepository;
use state::AppState;
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // A missing .env file is fine
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("todo_kv=info,tower_http=info")),
        )
        .init();

    tracing::info!("todo-kv starting");

    let config = Config::from_env()?;
    config.log_startup();

    let store = store::from_config(&config).await?;
    let bind_addr = config.bind_addr();

    let state = AppState {
        todos: TodoRepository::new(store),
    };
    let app = app::build_router(state);

    let listener = TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("Failed to bind {}", bind_addr))?;
    tracing::info!("Listening on http://{}", bind_addr);

    axum::serve(listener, app).await.context("Server error")?;

    Ok(())
}
