use std::sync::Arc;

use clap::{Parser, Subcommand};

use companies_api::api::{self, AppState};
use companies_api::config::AppConfig;
use companies_api::infrastructure::db::{self, MIGRATOR};
use companies_api::infrastructure::events::KafkaEventPublisher;
use companies_api::infrastructure::repositories::PostgresCompanyRepository;
use companies_api::service::CompanyService;

#[derive(Parser)]
#[command(name = "companies-api", about = "Companies store HTTP service", version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run the HTTP server
    Http,
    /// Migrate the database
    MigrateDb {
        /// Revert migrations instead of applying them
        #[arg(long)]
        down: bool,
    },
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    // Load environment variables
    dotenv::dotenv().ok();

    let config = AppConfig::from_env();
    let cli = Cli::parse();

    match cli.command {
        Command::Http => serve(config).await,
        Command::MigrateDb { down } => migrate(config, down).await,
    }
}

async fn serve(config: AppConfig) {
    tracing::info!("Connecting to database...");
    let pool = db::connect(&config.database)
        .await
        .expect("Failed to connect to database");
    tracing::info!("Database connected successfully");

    let publisher =
        KafkaEventPublisher::new(&config.kafka).expect("Failed to create kafka producer");

    let service = CompanyService::new(
        pool,
        Arc::new(PostgresCompanyRepository::new()),
        Arc::new(publisher),
    );
    let state = AppState::new(service, &config.auth);

    let app = api::router(state);

    tracing::info!(addr = %config.server.addr, "Server listening");
    let listener = tokio::net::TcpListener::bind(config.server.addr.as_str())
        .await
        .expect("Failed to bind address");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Server failed");
}

async fn migrate(config: AppConfig, down: bool) {
    let pool = db::connect(&config.database)
        .await
        .expect("Failed to connect to database");

    if down {
        MIGRATOR
            .undo(&pool, 0)
            .await
            .expect("Failed to revert migrations");
        tracing::info!("migrations reverted");
    } else {
        MIGRATOR.run(&pool).await.expect("Failed to run migrations");
        tracing::info!("migrations applied");
    }
}

async fn shutdown_signal() {
    tokio::signal::ctrl_c()
        .await
        .expect("Failed to install shutdown signal handler");
    tracing::info!("shutting down HTTP service...");
}
