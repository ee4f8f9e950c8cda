use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use crate::domain::user::models::FullName;
use crate::domain::user::models::Password;
use crate::domain::user::models::PhoneNumber;
use crate::domain::user::models::RegisterUserCommand;
use crate::domain::user::models::UserId;
use crate::domain::user::ports::UserServicePort;
use crate::inbound::http::router::AppState;
use crate::user::errors::ValidationError;

pub async fn registration<US: UserServicePort>(
    State(state): State<AppState<US>>,
    body: Result<Json<RegistrationRequest>, JsonRejection>,
) -> Result<ApiSuccess<RegistrationResponseData>, ApiError> {
    let Json(body) = body?;

    state
        .user_service
        .register(body.try_into_command()?)
        .await
        .map_err(ApiError::from)
        .map(|id| ApiSuccess::new(StatusCode::CREATED, id.into()))
}

/// HTTP request body for registration (raw JSON).
///
/// Missing fields deserialize as empty strings so they are reported by the
/// field rules instead of as a shape error.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationRequest {
    #[serde(default)]
    full_name: String,
    #[serde(default)]
    phone_number: String,
    #[serde(default)]
    password: String,
}

impl RegistrationRequest {
    /// Validate every field, reporting all failures in phone, name, password order.
    fn try_into_command(self) -> Result<RegisterUserCommand, ValidationError> {
        let phone_number = PhoneNumber::new(self.phone_number);
        let full_name = FullName::new(self.full_name);
        let password = Password::new(self.password);

        match (phone_number, full_name, password) {
            (Ok(phone_number), Ok(full_name), Ok(password)) => Ok(RegisterUserCommand::new(
                full_name,
                phone_number,
                password,
            )),
            (phone_number, full_name, password) => Err(ValidationError::collect([
                phone_number.err(),
                full_name.err(),
                password.err(),
            ])
            .unwrap_or_else(|| ValidationError::new("invalid registration request"))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RegistrationResponseData {
    pub id: i64,
}

impl From<UserId> for RegistrationResponseData {
    fn from(id: UserId) -> Self {
        Self { id: id.0 }
    }
}
