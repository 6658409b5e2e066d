use anyhow::{Context, Result};
use clap::Parser;
use sea_orm::{ConnectOptions, Database};
use sea_orm_migration::MigratorTrait;

use degreedash_api::seed::seed_catalogue;
use degreedash_api_migration::Migrator;
use degreedash_core::tracing::init_tracing;

#[derive(Parser)]
#[command(about = "Load the sample course catalogue into the DegreeDash store")]
struct Args {
    /// SQLite connection URL
    #[arg(long, env = "DATABASE_URL", default_value = "sqlite://degreedash.db?mode=rwc")]
    database_url: String,

    /// Drop every table and re-run all migrations before seeding
    #[arg(long)]
    fresh: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing("seed=info,degreedash_api=info");
    let args = Args::parse();

    let mut options = ConnectOptions::new(args.database_url.clone());
    options.sqlx_logging(false);
    let db = Database::connect(options)
        .await
        .context("connect to database")?;

    if args.fresh {
        Migrator::fresh(&db).await.context("reset schema")?;
    } else {
        Migrator::up(&db, None).await.context("apply migrations")?;
    }

    let report = seed_catalogue(&db).await.context("seed catalogue")?;
    println!(
        "Seeded {} professor(s), {} course(s), {} review(s)",
        report.professors, report.courses, report.reviews
    );
    Ok(())
}
