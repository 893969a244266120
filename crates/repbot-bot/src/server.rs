//! Process setup
//!
//! Connects to PostgreSQL, builds the service context, starts the optional
//! liveness endpoint and runs the Discord client until it stops.

use std::sync::Arc;

use axum::Router;
use serenity::all::{ApplicationId, Client, GatewayIntents};
use tokio::net::TcpListener;
use tracing::{error, info};

use repbot_common::{AppConfig, AppError, ServerConfig};
use repbot_db::{create_pool, run_migrations, PgPool, PgRuleRepository, PgScoreRepository};
use repbot_service::ServiceContext;

use crate::handler::Handler;
use crate::liveness::{create_router, LivenessState};

/// Connect to the database and make sure the schema exists
pub async fn connect_database(config: &AppConfig) -> Result<PgPool, AppError> {
    info!("Connecting to PostgreSQL...");
    let db_config = repbot_db::DatabaseConfig {
        url: config.database.url.clone(),
        max_connections: config.database.max_connections,
        min_connections: config.database.min_connections,
        ..Default::default()
    };
    let pool = create_pool(&db_config)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;
    run_migrations(&pool)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;
    info!("PostgreSQL connection established");
    Ok(pool)
}

/// Build the service context over PostgreSQL repositories
pub fn create_service_context(pool: PgPool, config: &AppConfig) -> Result<ServiceContext, AppError> {
    ServiceContext::builder()
        .rule_repo(Arc::new(PgRuleRepository::new(pool.clone())))
        .score_repo(Arc::new(PgScoreRepository::new(pool)))
        .policy(config.policy)
        .build()
        .map_err(AppError::from)
}

/// Serve the liveness router until the process exits
pub async fn run_liveness(app: Router, server: ServerConfig) -> Result<(), AppError> {
    let addr = server.address();
    let listener = TcpListener::bind(&addr).await.map_err(AppError::internal)?;

    info!("Liveness endpoint listening on http://{}", addr);

    axum::serve(listener, app).await.map_err(AppError::internal)
}

/// Run the bot with configuration
pub async fn run(config: AppConfig) -> Result<(), AppError> {
    let pool = connect_database(&config).await?;
    let services = create_service_context(pool.clone(), &config)?;

    if let Some(server) = config.liveness.clone() {
        let app = create_router(LivenessState::new(pool));
        tokio::spawn(async move {
            if let Err(e) = run_liveness(app, server).await {
                error!(error = %e, "Liveness endpoint stopped");
            }
        });
    }

    let intents = GatewayIntents::GUILDS
        | GatewayIntents::GUILD_MESSAGES
        | GatewayIntents::GUILD_MESSAGE_REACTIONS;
    let handler = Handler::new(services, config.discord.command_scope.clone());

    let mut client = Client::builder(&config.discord.token, intents)
        .event_handler(handler)
        .application_id(ApplicationId::new(config.discord.application_id))
        .await
        .map_err(AppError::discord)?;

    info!("Connecting to the Discord gateway...");
    client.start().await.map_err(AppError::discord)
}
