use console::{config::Config, database::MIGRATOR, run_server};
use sqlx::PgPool;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

fn init_logging() {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer().pretty())
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_logging();
    let config = Config::from_env();

    tracing::info!("Connecting to database");

    let pool = PgPool::connect(&config.database_url).await?;

    MIGRATOR.run(&pool).await?;

    run_server(pool, config).await
}
