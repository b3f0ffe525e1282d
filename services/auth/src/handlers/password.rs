use axum::{Json, extract::State};
use serde::Deserialize;

use signage_auth_types::identity::AdminIdentity;

use crate::error::AuthServiceError;
use crate::handlers::MessageResponse;
use crate::handlers::json::JsonBody;
use crate::state::AppState;
use crate::usecase::password::{ChangePasswordInput, ChangePasswordUseCase};

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangePasswordRequest {
    #[serde(default)]
    pub current_password: String,
    #[serde(default)]
    pub new_password: String,
}

/// `POST /api/change-password`, behind the API gate.
pub async fn change_password(
    State(state): State<AppState>,
    AdminIdentity(session): AdminIdentity,
    JsonBody(body): JsonBody<ChangePasswordRequest>,
) -> Result<Json<MessageResponse>, AuthServiceError> {
    let usecase = ChangePasswordUseCase {
        credentials: state.credential_repo(),
        hasher: state.hasher,
    };
    usecase
        .execute(
            &session,
            ChangePasswordInput {
                current_password: body.current_password,
                new_password: body.new_password,
            },
        )
        .await?;
    Ok(Json(MessageResponse {
        message: "Password updated successfully",
    }))
}
