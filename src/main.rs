//! teamattr - team attribute management server
//!
//! Serves the team attributes REST API and manages its database schema.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::net::SocketAddr;
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use teamattr_api::{ApiServer, ApiServerConfig};

/// teamattr - Manage custom attributes of teams
#[derive(Parser, Debug)]
#[command(name = "teamattr")]
#[command(about = "teamattr - Manage custom attributes of teams")]
#[command(version)]
struct Cli {
    /// Log level (trace, debug, info, warn, error); RUST_LOG takes precedence
    #[arg(long, global = true, default_value = "info")]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run migrations and serve the REST API
    #[command(long_about = r#"
Run pending database migrations, then serve the team attributes REST API.
Every route except /api/health needs a session JWT, passed in the
session_token cookie or as "Authorization: Bearer <token>".

EXAMPLES:
  # Local development with SQLite
  teamattr serve --database-url "sqlite://./teamattr.db?mode=rwc" \
    --jwt-secret dev-secret

  # PostgreSQL behind a proxy, CORS disabled
  teamattr serve --bind 0.0.0.0:8080 \
    --database-url postgres://teamattr:secret@db/teamattr \
    --no-cors

ENVIRONMENT VARIABLES:
  TEAMATTR_BIND          Address to bind the API server
  TEAMATTR_DATABASE_URL  SeaORM database URL
  TEAMATTR_JWT_SECRET    Secret session tokens are signed with
    "#)]
    Serve {
        /// Address to bind the API server
        #[arg(long, env = "TEAMATTR_BIND", default_value = "127.0.0.1:8080")]
        bind: SocketAddr,

        /// Database URL (postgres://..., sqlite://..., sqlite::memory:)
        #[arg(long, env = "TEAMATTR_DATABASE_URL")]
        database_url: String,

        /// Secret session tokens are signed with
        #[arg(long, env = "TEAMATTR_JWT_SECRET", hide_env_values = true)]
        jwt_secret: String,

        /// Disable CORS for local development origins
        #[arg(long)]
        no_cors: bool,
    },

    /// Apply pending database migrations and exit
    Migrate {
        /// Database URL (postgres://..., sqlite://...)
        #[arg(long, env = "TEAMATTR_DATABASE_URL")]
        database_url: String,
    },
}

/// Setup logging with the specified log level
fn setup_logging(log_level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(log_level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(true).with_thread_ids(false))
        .with(filter)
        .init();
}

async fn open_database(database_url: &str) -> Result<sea_orm::DatabaseConnection> {
    let db = teamattr_db::connect(database_url)
        .await
        .context("Failed to connect to database")?;

    teamattr_db::migrate(&db)
        .await
        .context("Failed to run database migrations")?;

    Ok(db)
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    setup_logging(&cli.log_level);

    match cli.command {
        Commands::Serve {
            bind,
            database_url,
            jwt_secret,
            no_cors,
        } => {
            let db = open_database(&database_url).await?;

            let mut config = ApiServerConfig::new(bind, jwt_secret);
            config.enable_cors = !no_cors;

            ApiServer::new(config, db)
                .start()
                .await
                .context("API server failed")?;
        }
        Commands::Migrate { database_url } => {
            open_database(&database_url).await?;
            info!("Database is up to date");
        }
    }

    Ok(())
}
