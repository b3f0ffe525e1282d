use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use axum_extra::extract::CookieJar;
use serde::{Deserialize, Serialize};

use signage_auth_types::cookie::{clear_session_cookie, set_session_cookie};
use signage_auth_types::identity::AdminIdentity;

use crate::error::AuthServiceError;
use crate::handlers::MessageResponse;
use crate::handlers::json::JsonBody;
use crate::state::AppState;
use crate::usecase::session::{LoginInput, LoginUseCase};

// ── POST /api/login ───────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    JsonBody(body): JsonBody<LoginRequest>,
) -> Result<impl IntoResponse, AuthServiceError> {
    let usecase = LoginUseCase {
        credentials: state.credential_repo(),
        hasher: state.hasher,
        clock: state.clock.clone(),
        jwt_secret: state.jwt_secret.clone(),
    };

    let out = usecase
        .execute(LoginInput {
            email: body.email,
            password: body.password,
        })
        .await?;

    let jar = set_session_cookie(jar, out.token, state.secure_cookies);
    Ok((
        StatusCode::OK,
        jar,
        Json(MessageResponse {
            message: "Admin login successful",
        }),
    ))
}

// ── POST /api/logout ──────────────────────────────────────────────────────────

pub async fn logout(State(state): State<AppState>, jar: CookieJar) -> impl IntoResponse {
    let jar = clear_session_cookie(jar, state.secure_cookies);
    (
        StatusCode::OK,
        jar,
        Json(MessageResponse {
            message: "Logged out",
        }),
    )
}

// ── GET /api/session ──────────────────────────────────────────────────────────

#[derive(Serialize)]
pub struct SessionResponse {
    pub id: uuid::Uuid,
    pub email: String,
    pub role: String,
    pub exp: u64,
}

pub async fn current_session(AdminIdentity(session): AdminIdentity) -> Json<SessionResponse> {
    Json(SessionResponse {
        id: session.admin_id,
        email: session.email,
        role: session.role.as_str().to_owned(),
        exp: session.expires_at,
    })
}
