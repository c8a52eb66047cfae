use crate::handlers;
use crate::state::AppState;
use axum::{
    Router,
    routing::{delete, get, post},
};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::landing))
        .route("/quiz", get(handlers::quiz))
        .route("/checkout", get(handlers::checkout))
        .route("/app", get(handlers::dashboard))
        .route("/api/subscription", get(handlers::get_subscription))
        .route("/api/checkout", post(handlers::submit_checkout))
        .route("/api/today", get(handlers::get_today))
        .route("/api/nutrition", post(handlers::update_nutrition))
        .route("/api/stats", get(handlers::get_stats))
        .route(
            "/api/injections",
            get(handlers::list_injections).post(handlers::add_injection),
        )
        .route("/api/injections/:id", delete(handlers::delete_injection))
        .route(
            "/api/routine",
            get(handlers::get_routine)
                .put(handlers::save_routine)
                .delete(handlers::delete_routine),
        )
        .route("/api/routine/toggle", post(handlers::toggle_routine))
        .with_state(state)
}
