//! Session gate middleware for the admin area.
//!
//! Browser-facing pages redirect to the login entry point on any failure; API
//! routes answer with the JSON error body and 401/403 instead.

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::CookieJar;
use tracing::debug;

use signage_auth_types::cookie::SESSION_COOKIE;
use signage_auth_types::token::SessionInfo;

use crate::error::AuthServiceError;
use crate::state::AppState;
use crate::usecase::session::verify_session;

/// Where the UI gate sends unauthenticated browsers.
pub const LOGIN_PATH: &str = "/login";

fn check(state: &AppState, jar: &CookieJar) -> Result<SessionInfo, AuthServiceError> {
    let token = jar.get(SESSION_COOKIE).map(|c| c.value());
    verify_session(token, &state.jwt_secret, state.clock.now_secs())
}

/// Gate for admin pages: 303 to `/login` on failure.
pub async fn require_admin_page(
    State(state): State<AppState>,
    jar: CookieJar,
    mut request: Request,
    next: Next,
) -> Response {
    match check(&state, &jar) {
        Ok(session) => {
            request.extensions_mut().insert(session);
            next.run(request).await
        }
        Err(e) => {
            debug!(path = %request.uri().path(), kind = e.kind(), "admin page gate rejected");
            Redirect::to(LOGIN_PATH).into_response()
        }
    }
}

/// Gate for admin API routes: JSON 401/403 on failure.
pub async fn require_admin_api(
    State(state): State<AppState>,
    jar: CookieJar,
    mut request: Request,
    next: Next,
) -> Result<Response, AuthServiceError> {
    let session = check(&state, &jar)?;
    request.extensions_mut().insert(session);
    Ok(next.run(request).await)
}
