use axum::{Json, extract::State};
use serde::{Deserialize, Serialize};

use crate::error::AuthServiceError;
use crate::handlers::MessageResponse;
use crate::handlers::json::JsonBody;
use crate::state::AppState;
use crate::usecase::reset::{
    RedeemResetInput, RedeemResetUseCase, RequestResetInput, RequestResetUseCase,
};

// ── POST /api/forgot-password ─────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct ForgotPasswordRequest {
    #[serde(default)]
    pub email: String,
}

#[derive(Serialize)]
pub struct ForgotPasswordResponse {
    pub message: &'static str,
    pub email: String,
}

pub async fn forgot_password(
    State(state): State<AppState>,
    JsonBody(body): JsonBody<ForgotPasswordRequest>,
) -> Result<Json<ForgotPasswordResponse>, AuthServiceError> {
    let usecase = RequestResetUseCase {
        credentials: state.credential_repo(),
        otps: state.otp_repo(),
        mailer: state.mailer.clone(),
        clock: state.clock.clone(),
    };
    let out = usecase
        .execute(RequestResetInput { email: body.email })
        .await?;
    Ok(Json(ForgotPasswordResponse {
        message: "OTP sent successfully",
        email: out.email,
    }))
}

// ── POST /api/reset-password ──────────────────────────────────────────────────

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResetPasswordRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub otp: String,
    #[serde(default)]
    pub new_password: String,
}

pub async fn reset_password(
    State(state): State<AppState>,
    JsonBody(body): JsonBody<ResetPasswordRequest>,
) -> Result<Json<MessageResponse>, AuthServiceError> {
    let usecase = RedeemResetUseCase {
        otps: state.otp_repo(),
        hasher: state.hasher,
        clock: state.clock.clone(),
    };
    usecase
        .execute(RedeemResetInput {
            email: body.email,
            code: body.otp,
            new_password: body.new_password,
        })
        .await?;
    Ok(Json(MessageResponse {
        message: "Password reset successful",
    }))
}
