use crate::handlers;
use crate::state::AppState;
use axum::{
    routing::{get, post, put},
    Router,
};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/days/add", post(handlers::add_form))
        .route(
            "/api/records",
            get(handlers::list_records)
                .post(handlers::add_record)
                .delete(handlers::clear_records),
        )
        .route(
            "/api/records/:index",
            put(handlers::edit_record).delete(handlers::remove_record),
        )
        .route("/api/summary", get(handlers::get_summary))
        .route("/api/export", get(handlers::export_report))
        .with_state(state)
}
