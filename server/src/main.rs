use std::sync::Arc;

use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::EnvFilter;

use todo_server::{db, Config, SqliteTodoRepository, TodoService};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .compact()
        .init();

    let config = Config::from_env()?;
    let pool = db::connect(&config.database_url, config.max_connections).await?;
    let service = TodoService::new(Arc::new(SqliteTodoRepository::new(pool)));

    let listener = TcpListener::bind(config.bind_addr()).await?;
    info!("listening on {}", listener.local_addr()?);
    todo_server::run(listener, service).await?;
    Ok(())
}
