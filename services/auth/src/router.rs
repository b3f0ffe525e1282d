use std::time::Duration;

use axum::{
    BoxError, Router,
    error_handling::HandleErrorLayer,
    middleware,
    routing::{get, post},
};
use tower::ServiceBuilder;
use tower::timeout::error::Elapsed;
use tower_http::trace::TraceLayer;
use tracing::warn;

use signage_core::health::healthz;
use signage_core::middleware::{propagate_request_id_layer, request_id_layer};

use crate::error::AuthServiceError;
use crate::gate::{require_admin_api, require_admin_page};
use crate::handlers::{
    health::readyz,
    pages::{admin_page, login_page},
    password::change_password,
    reset::{forgot_password, reset_password},
    session::{current_session, login, logout},
};
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    let admin_pages = Router::new()
        .route("/admin", get(admin_page))
        .route("/admin/", get(admin_page))
        .route("/admin/{*rest}", get(admin_page))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            require_admin_page,
        ));

    let admin_api = Router::new()
        .route("/api/session", get(current_session))
        .route("/api/change-password", post(change_password))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            require_admin_api,
        ));

    let routes = Router::new()
        // Health
        .route("/healthz", get(healthz))
        .route("/readyz", get(readyz))
        // Public
        .route("/login", get(login_page))
        .route("/api/login", post(login))
        .route("/api/logout", post(logout))
        .route("/api/forgot-password", post(forgot_password))
        .route("/api/reset-password", post(reset_password))
        .merge(admin_pages)
        .merge(admin_api);

    with_request_timeout(routes, state.request_timeout)
        .layer(TraceLayer::new_for_http())
        .layer(propagate_request_id_layer())
        .layer(request_id_layer())
        .with_state(state)
}

/// Bound every route by `timeout`. Elapsed requests answer with the `TIMEOUT` JSON error.
pub fn with_request_timeout<S>(router: Router<S>, timeout: Duration) -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    router.layer(
        ServiceBuilder::new()
            .layer(HandleErrorLayer::new(request_timeout_error))
            .timeout(timeout),
    )
}

async fn request_timeout_error(err: BoxError) -> AuthServiceError {
    if err.is::<Elapsed>() {
        warn!("request timed out");
        AuthServiceError::Timeout
    } else {
        AuthServiceError::Internal(anyhow::anyhow!(err))
    }
}
