use std::sync::Arc;

use account_service::config::Config;
use account_service::domain::account::service::AccountService;
use account_service::inbound::http::router::create_router;
use account_service::inbound::http::router::AppState;
use account_service::outbound::events::KafkaEventProducer;
use account_service::outbound::repositories::PostgresCredentialRepository;
use auth::PasswordHasher;
use auth::TokenIssuer;
use auth::TokenValidator;
use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "account_service=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        service = "account-service",
        version = env!("CARGO_PKG_VERSION"),
        "Service starting"
    );

    let config = Config::load()?;

    tracing::info!(
        http_port = config.server.http_port,
        kafka_brokers = %config.kafka.brokers,
        kafka_topic = %config.kafka.topic,
        access_ttl_minutes = config.auth.access_ttl_minutes,
        refresh_ttl_hours = config.auth.refresh_ttl_hours,
        "Configuration loaded"
    );

    let pg_pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&config.database.url)
        .await?;
    tracing::info!(
        max_connections = 5,
        database = "postgresql",
        "Database connection pool created"
    );

    sqlx::migrate!("./migrations").run(&pg_pool).await?;
    tracing::info!(database = "postgresql", "Database migrations completed");

    let token_ttl = config.auth.token_ttl();
    let token_issuer = Arc::new(TokenIssuer::new(
        config.auth.secret_key.as_bytes(),
        token_ttl,
    ));
    let token_validator = Arc::new(TokenValidator::new(config.auth.secret_key.as_bytes()));
    let password_hasher = PasswordHasher::with_cost(config.auth.hash_cost)?;

    let credential_repository = Arc::new(PostgresCredentialRepository::new(pg_pool));
    let event_producer = Arc::new(KafkaEventProducer::new(&config)?);

    let account_service = Arc::new(AccountService::new(
        credential_repository,
        event_producer,
        password_hasher,
        Arc::clone(&token_issuer),
    ));

    let state = AppState {
        account_service,
        token_issuer,
        token_validator,
    };

    let http_address = format!("0.0.0.0:{}", config.server.http_port);
    let http_listener = tokio::net::TcpListener::bind(&http_address).await?;
    tracing::info!(
        address = %http_address,
        port = config.server.http_port,
        protocol = "http",
        "Http server listening"
    );

    axum::serve(http_listener, create_router(state)).await?;

    Ok(())
}
