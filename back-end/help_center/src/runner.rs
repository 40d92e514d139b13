use crate::api::servers::{app_state::AppState, rest};
use crate::bootstrap::config::{Config, DbConfig};
use errors::AppError;
use migration::{Migrator, MigratorTrait};
use sea_orm::{ConnectOptions, DatabaseConnection};
use tracing::info;

pub async fn run() -> Result<(), AppError> {
    dotenvy::dotenv().ok();
    init_tracing();

    let config = Config::from_env()?;
    info!("Configuration loaded. Initializing help center...");

    let db_conn = setup_database(&config.db).await?;
    let app_state = AppState::new(db_conn, config.server.api_prefix.clone());

    run_servers(app_state, config).await
}

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_target(true)
        .with_thread_ids(true)
        .with_file(true)
        .with_line_number(true)
        .init();
}

/// Connect the pool and bring the schema up to date.
pub async fn setup_database(db_config: &DbConfig) -> Result<DatabaseConnection, AppError> {
    info!("Setting up Database");

    let mut opt = ConnectOptions::new(&db_config.url);

    opt.max_connections(db_config.max_connections)
        .min_connections(db_config.min_connections)
        .connect_timeout(db_config.connect_timeout)
        .idle_timeout(db_config.idle_timeout)
        .max_lifetime(db_config.max_lifetime)
        .sqlx_logging(db_config.logging_enabled);

    let connection = sea_orm::Database::connect(opt)
        .await
        .map_err(|db_err| AppError::Storage(Box::new(db_err)))?;

    info!("Running database migrations...");
    Migrator::up(&connection, None)
        .await
        .map_err(|db_err| AppError::Migration(Box::new(db_err)))?;

    Ok(connection)
}

async fn run_servers(app_state: AppState, config: Config) -> Result<(), AppError> {
    info!("Starting servers...");

    tokio::select! {
        result = rest::start(&app_state, &config) => result?,
        _ = tokio::signal::ctrl_c() => {
            info!("Shutdown signal received");

            if let Err(e) = app_state.db.clone().close().await {
                tracing::error!("Failed to close database pool: {}", e);
            }
        },
    }

    info!("Application shutdown complete.");
    Ok(())
}
