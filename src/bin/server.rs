use anyhow::Context;
use trivia_api::db::{self, run_migrations};
use trivia_api::server::app::run_server;
use trivia_api::telemetry::init_tracing;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();
    let database_url = dotenv::var("DATABASE_URL").context("DATABASE_URL must be set")?;
    let pool = db::establish_connection(&database_url)
        .await
        .context("Failed to connect to the database")?;

    tracing::info!("Running db migrations...");
    run_migrations(&pool).await?;

    run_server(pool).await
}
