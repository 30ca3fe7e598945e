use std::time::Duration;

use anyhow::Context;
use storage::Database;
use tower_http::cors::{Any, CorsLayer};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

mod config;
mod error;
mod features;
mod routes;

use config::Config;

#[derive(OpenApi)]
#[openapi(
    paths(
        features::rankings::handlers::get_division_ranking,
        features::rankings::handlers::recompute_division_ranking,
        features::rankings::handlers::get_division_settings,
        features::movements::handlers::get_division_bands,
        features::movements::handlers::process_stage,
        features::movements::handlers::list_movements,
        features::movements::handlers::backfill_scores,
        features::playoffs::handlers::create_playoffs,
        features::playoffs::handlers::list_playoffs,
        features::playoffs::handlers::record_result,
        features::playoffs::handlers::apply_movements,
    ),
    components(
        schemas(
            storage::dto::common::PaginationMeta,
            storage::dto::ranking::RankingEntry,
            storage::dto::movement::BandPartition,
            storage::dto::movement::DivisionBands,
            storage::dto::movement::DivisionTransition,
            storage::dto::movement::StageProcessingReport,
            storage::dto::movement::BackfillResponse,
            storage::dto::playoff::CreatePlayoffsRequest,
            storage::dto::playoff::RecordPlayoffResultRequest,
            storage::dto::playoff::AppliedMovementsResponse,
            storage::models::Division,
            storage::models::DivisionMovement,
            storage::models::LeagueSettings,
            storage::models::MovementKind,
            storage::models::MovementTrigger,
            storage::models::PlayerRanking,
            storage::models::Playoff,
            storage::models::PlayoffStatus,
            storage::models::Team,
        )
    ),
    tags(
        (name = "rankings", description = "Division ranking endpoints"),
        (name = "movements", description = "Promotion and relegation endpoints"),
        (name = "playoffs", description = "Playoff tie endpoints"),
    )
)]
struct ApiDoc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .with_target(true)
        .with_file(true)
        .with_line_number(true)
        .init();

    tracing::info!("Starting league API");

    let config = Config::from_env().context("Failed to load API configuration")?;
    tracing::info!("Configuration loaded successfully");

    tracing::info!(
        "Connecting to database at: {}",
        config
            .database_url
            .split('@')
            .next_back()
            .unwrap_or("unknown")
    );
    let db = Database::new(&config.database_url)
        .await
        .context("Failed to initialize database")?;
    tracing::info!("Database connection established");

    tracing::info!("Running database migrations");
    db.run_migrations()
        .await
        .context("Failed to run migrations")?;
    tracing::info!("Database migrations completed successfully");

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any)
        .max_age(Duration::from_secs(3600));

    let app = routes::router(db)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(cors);

    let bind_address = config.bind_address();
    tracing::info!("Starting server at http://{}", bind_address);
    tracing::info!(
        "Swagger UI available at http://{}/swagger-ui/",
        bind_address
    );

    let listener = tokio::net::TcpListener::bind(&bind_address)
        .await
        .with_context(|| format!("Failed to bind {bind_address}"))?;
    axum::serve(listener, app).await?;

    Ok(())
}
