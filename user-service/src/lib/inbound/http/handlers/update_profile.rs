use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;

use super::ApiError;
use crate::domain::user::models::FullName;
use crate::domain::user::models::PhoneNumber;
use crate::domain::user::models::UpdateProfileCommand;
use crate::domain::user::ports::UserServicePort;
use crate::inbound::http::middleware::AuthenticatedUser;
use crate::inbound::http::router::AppState;
use crate::user::errors::ValidationError;

pub async fn update_profile<US: UserServicePort>(
    State(state): State<AppState<US>>,
    user: AuthenticatedUser,
    body: Result<Json<UpdateProfileRequest>, JsonRejection>,
) -> Result<StatusCode, ApiError> {
    let Json(body) = body?;

    state
        .user_service
        .update_profile(&user.user_id, body.try_into_command()?)
        .await
        .map_err(ApiError::from)
        .map(|_| StatusCode::OK)
}

/// HTTP request body for profile update. Empty strings count as absent.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProfileRequest {
    #[serde(default)]
    full_name: Option<String>,
    #[serde(default)]
    phone_number: Option<String>,
}

impl UpdateProfileRequest {
    fn try_into_command(self) -> Result<UpdateProfileCommand, ValidationError> {
        let phone_number = self
            .phone_number
            .filter(|value| !value.is_empty())
            .map(PhoneNumber::new)
            .transpose();
        let full_name = self
            .full_name
            .filter(|value| !value.is_empty())
            .map(FullName::new)
            .transpose();

        match (phone_number, full_name) {
            (Ok(phone_number), Ok(full_name)) => Ok(UpdateProfileCommand {
                full_name,
                phone_number,
            }),
            (phone_number, full_name) => Err(ValidationError::collect([
                phone_number.err(),
                full_name.err(),
            ])
            .unwrap_or_else(|| ValidationError::new("invalid profile update"))),
        }
    }
}
