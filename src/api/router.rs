//! Route table for the patient API.
//!
//! Returns a composable `Router`. `/buscar` is registered as a static
//! segment so it wins over `/:id`; uploaded photos are served from
//! `/uploads`, the same prefix stored on the records.
//!
//! NOTE: Path params use `:param` syntax (matchit 0.7 / axum 0.7).

use axum::extract::DefaultBodyLimit;
use axum::routing::get;
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;

use crate::api::endpoints;
use crate::api::types::ApiContext;

/// Upload requests larger than this are rejected outright.
const MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// Build the patient API router.
pub fn api_router(ctx: ApiContext) -> Router {
    let uploads_dir = ctx.uploads_dir.clone();

    let pacientes = Router::new()
        .route(
            "/",
            get(endpoints::pacientes::list).post(endpoints::pacientes::create),
        )
        .route("/buscar", get(endpoints::pacientes::search))
        .route(
            "/:id",
            get(endpoints::pacientes::detail)
                .put(endpoints::pacientes::update)
                .delete(endpoints::pacientes::remove),
        )
        .with_state(ctx)
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES));

    Router::new()
        .nest("/api/pacientes", pacientes)
        .nest_service("/uploads", ServeDir::new(uploads_dir))
        .layer(CorsLayer::permissive())
}
