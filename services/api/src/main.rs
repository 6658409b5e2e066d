use sea_orm::{ConnectOptions, Database};
use sea_orm_migration::MigratorTrait;
use tracing::info;

use degreedash_api::config::ApiConfig;
use degreedash_api::router::build_router;
use degreedash_api::state::AppState;
use degreedash_api_migration::Migrator;
use degreedash_core::config::Config;
use degreedash_core::tracing::init_tracing;

#[tokio::main]
async fn main() {
    init_tracing("degreedash_api=info,tower_http=info");

    let config = ApiConfig::from_env();

    let mut options = ConnectOptions::new(config.database_url.clone());
    options.sqlx_logging(false);
    let db = Database::connect(options)
        .await
        .expect("failed to connect to database");

    Migrator::up(&db, None)
        .await
        .expect("failed to apply migrations");

    let state = AppState::new(db, &config);
    let router = build_router(state);

    let http_addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&http_addr)
        .await
        .expect("failed to bind");

    info!(admins = config.admin_emails.len(), "api listening on {http_addr}");
    axum::serve(listener, router).await.expect("server error");
}
