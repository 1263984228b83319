mod auth;
mod config;
mod db;
pub mod error;
mod models;
mod routes;
mod schema;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::auth::{GoogleOAuthClient, PgUserDirectory, TokenAuthenticator, TokenVerifier};
use crate::config::{AppConfig, TokenSource};
use crate::db::DbPool;

/// Shared application state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub pool: DbPool,
    pub verifier: Arc<TokenVerifier>,
    pub authenticator: Arc<TokenAuthenticator>,
    pub oauth: Arc<GoogleOAuthClient>,
    pub token_source: TokenSource,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "backend=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    dotenvy::dotenv().ok();
    let config = AppConfig::from_env()?;

    tracing::info!("Starting auth backend server");

    // Initialize database pool
    let pool = db::establish_connection_pool(&config.database_url)?;
    tracing::info!("Database connection pool initialized");

    let verifier = Arc::new(TokenVerifier::new(&config.jwt_secret, config.token_ttl_days));
    let directory = Arc::new(PgUserDirectory::new(pool.clone()));
    let authenticator = Arc::new(TokenAuthenticator::new(
        verifier.clone(),
        directory,
        config.allow_expired_claim_extraction,
    ));

    let state = AppState {
        pool,
        verifier,
        authenticator,
        oauth: Arc::new(GoogleOAuthClient::new()),
        token_source: config.token_source,
    };

    let app = routes::app_routes(state);

    // Run server
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!("Server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
