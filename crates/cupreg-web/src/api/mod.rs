mod auth_handlers;

use axum::routing::post;
use axum::Router;

use crate::state::AppState;

pub fn auth_router() -> Router<AppState> {
    Router::new()
        .route("/admin/login", post(auth_handlers::admin_login))
        .route("/captains/login", post(auth_handlers::captain_login))
        .route("/captains/register", post(auth_handlers::register_team))
}
