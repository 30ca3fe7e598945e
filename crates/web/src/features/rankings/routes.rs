use axum::{
    Router,
    routing::{get, post},
};
use storage::Database;

use super::handlers::{get_division_ranking, get_division_settings, recompute_division_ranking};

pub fn routes() -> Router<Database> {
    Router::new()
        .route(
            "/:stage_id/divisions/:division_id/ranking",
            get(get_division_ranking),
        )
        .route(
            "/:stage_id/divisions/:division_id/ranking/recompute",
            post(recompute_division_ranking),
        )
        .route(
            "/:stage_id/divisions/:division_id/settings",
            get(get_division_settings),
        )
}
