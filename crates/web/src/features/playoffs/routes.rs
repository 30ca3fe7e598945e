use axum::{
    Router,
    routing::{get, post, put},
};
use storage::Database;

use super::handlers::{apply_movements, create_playoffs, list_playoffs, record_result};

/// Routes nested under `/api/stages`
pub fn stage_routes() -> Router<Database> {
    Router::new()
        .route(
            "/:stage_id/divisions/:division_id/playoffs",
            post(create_playoffs),
        )
        .route("/:stage_id/playoffs", get(list_playoffs))
}

/// Routes nested under `/api/playoffs`
pub fn routes() -> Router<Database> {
    Router::new()
        .route("/:playoff_id/result", put(record_result))
        .route("/:playoff_id/movements", post(apply_movements))
}
