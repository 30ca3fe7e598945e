use axum::{
    Router,
    routing::{get, post},
};
use storage::Database;

use super::handlers::{backfill_scores, get_division_bands, list_movements, process_stage};

pub fn routes() -> Router<Database> {
    Router::new()
        .route(
            "/:stage_id/divisions/:division_id/bands",
            get(get_division_bands),
        )
        .route("/:stage_id/movements", get(list_movements))
        .route("/:stage_id/movements/process", post(process_stage))
        .route("/:stage_id/movements/backfill", post(backfill_scores))
}
