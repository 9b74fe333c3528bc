//! SymptoScore API server.

use std::error::Error;
use std::sync::Arc;

use axum::http::HeaderValue;
use sqlx::PgPool;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::timeout::TimeoutLayer;

use symptoscore::adapters::auth::{JwtConfig, JwtSessionValidator};
use symptoscore::adapters::http::{app_router, AppState};
use symptoscore::adapters::memory::{InMemoryProfileReader, InMemoryReportRepository};
use symptoscore::adapters::postgres::{PostgresProfileReader, PostgresReportRepository};
use symptoscore::adapters::scoring::{HttpScoringClient, HttpScoringConfig};
use symptoscore::config::{AppConfig, DatabaseConfig, ScoringConfig, ServerConfig};
use symptoscore::domain::questionnaire::QuestionCatalog;
use symptoscore::ports::{ProfileReader, ReportRepository};
use symptoscore::telemetry;

type BoxError = Box<dyn Error + Send + Sync>;

#[tokio::main]
async fn main() -> Result<(), BoxError> {
    let config = AppConfig::load()?;
    telemetry::init(&config.server)?;
    config.validate()?;

    let catalog = load_catalog(&config.scoring)?;
    tracing::info!(questions = catalog.len(), "question catalog loaded");

    let scoring = HttpScoringClient::new(
        HttpScoringConfig::new(config.scoring.base_url.clone())
            .with_secret_api_key(config.scoring.api_key.clone())
            .with_timeout(config.scoring.timeout()),
    )?;

    let (reports, profiles) = match &config.database {
        Some(database) => connect_postgres(database).await?,
        None => {
            tracing::warn!("no database configured, records are kept in memory");
            let reports: Arc<dyn ReportRepository> = Arc::new(InMemoryReportRepository::new());
            let profiles: Arc<dyn ProfileReader> = Arc::new(InMemoryProfileReader::new());
            (reports, profiles)
        }
    };

    let mut jwt =
        JwtConfig::from_secret(config.auth.jwt_secret.clone(), config.auth.audience.clone());
    if let Some(issuer) = &config.auth.issuer {
        jwt = jwt.with_issuer(issuer.clone());
    }

    let state = AppState {
        catalog,
        scoring: Arc::new(scoring),
        reports,
        profiles,
        validator: Arc::new(JwtSessionValidator::new(jwt)),
    };

    let app = app_router(state)
        .layer(TimeoutLayer::new(config.server.request_timeout()))
        .layer(cors_layer(&config.server)?);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(
        %addr,
        environment = ?config.server.environment,
        scoring_url = %config.scoring.base_url,
        "symptoscore listening"
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("server stopped");
    Ok(())
}

fn load_catalog(config: &ScoringConfig) -> Result<Arc<QuestionCatalog>, BoxError> {
    match &config.catalog_path {
        Some(path) => {
            tracing::info!(path = %path.display(), "loading question catalog from file");
            Ok(Arc::new(QuestionCatalog::from_yaml_file(path)?))
        }
        None => Ok(QuestionCatalog::standard()),
    }
}

async fn connect_postgres(
    config: &DatabaseConfig,
) -> Result<(Arc<dyn ReportRepository>, Arc<dyn ProfileReader>), BoxError> {
    let pool: PgPool = config.pool_options().connect(&config.url).await?;

    if config.run_migrations {
        sqlx::migrate!("./migrations").run(&pool).await?;
        tracing::info!("database migrations applied");
    }

    Ok((
        Arc::new(PostgresReportRepository::new(pool.clone())),
        Arc::new(PostgresProfileReader::new(pool)),
    ))
}

fn cors_layer(config: &ServerConfig) -> Result<CorsLayer, BoxError> {
    let origins = config.cors_origins_list();
    let layer = CorsLayer::new().allow_methods(Any).allow_headers(Any);

    if origins.is_empty() {
        return Ok(layer.allow_origin(Any));
    }

    let values = origins
        .iter()
        .map(|o| HeaderValue::from_str(o))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(layer.allow_origin(AllowOrigin::list(values)))
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutdown signal received");
}
