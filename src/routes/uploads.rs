use axum::{routing::get, Router};

use crate::handlers::uploads;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new().route("/:filename", get(uploads::serve_upload))
}
