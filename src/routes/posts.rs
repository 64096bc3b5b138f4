use axum::{
    routing::{get, put},
    Router,
};

use crate::handlers::posts;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(posts::list_posts).post(posts::create_post))
        .route("/:id", put(posts::update_post))
}
