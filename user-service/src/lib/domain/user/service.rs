use std::sync::Arc;

use async_trait::async_trait;
use auth::AuthenticationError;
use auth::Authenticator;
use auth::HashedPassword;

use crate::domain::user::models::LoginCommand;
use crate::domain::user::models::LoginOutcome;
use crate::domain::user::models::NewUser;
use crate::domain::user::models::PhoneNumber;
use crate::domain::user::models::RegisterUserCommand;
use crate::domain::user::models::UpdateProfileCommand;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::user::errors::UserError;
use crate::user::errors::ValidationError;
use crate::user::ports::UserRepository;
use crate::user::ports::UserServicePort;

/// Domain service implementation for user operations.
///
/// Concrete implementation of UserServicePort with dependency injection.
/// Argon2 work is moved to the blocking pool so request tasks keep running.
pub struct UserService<UR>
where
    UR: UserRepository,
{
    repository: Arc<UR>,
    authenticator: Arc<Authenticator>,
}

impl<UR> UserService<UR>
where
    UR: UserRepository,
{
    /// Create a new user service with injected dependencies.
    ///
    /// # Arguments
    /// * `repository` - User persistence implementation
    /// * `authenticator` - Password hasher and token signer
    ///
    /// # Returns
    /// Configured user service instance
    pub fn new(repository: Arc<UR>, authenticator: Arc<Authenticator>) -> Self {
        Self {
            repository,
            authenticator,
        }
    }

    async fn hash_password(&self, password: String) -> Result<HashedPassword, UserError> {
        let authenticator = Arc::clone(&self.authenticator);

        let hashed = tokio::task::spawn_blocking(move || authenticator.hash_password(&password))
            .await
            .map_err(|e| UserError::Unknown(format!("Password hashing task failed: {}", e)))??;

        Ok(hashed)
    }

    /// Verify the password against the stored credentials and mint a token.
    async fn authenticate(&self, password: String, user: &User) -> Result<String, UserError> {
        let authenticator = Arc::clone(&self.authenticator);
        let stored_hash = user.password_hash.clone();
        let stored_salt = user.password_salt.clone();
        let user_id = user.id.0;

        let authenticated = tokio::task::spawn_blocking(move || {
            authenticator.authenticate(&password, &stored_hash, &stored_salt, user_id)
        })
        .await
        .map_err(|e| UserError::Unknown(format!("Password verification task failed: {}", e)))?;

        match authenticated {
            Ok(result) => Ok(result.access_token),
            Err(AuthenticationError::InvalidCredentials) => {
                tracing::warn!(user_id = %user.id, "Login rejected: wrong password");
                Err(UserError::InvalidCredentials)
            }
            Err(AuthenticationError::PasswordError(e)) => {
                tracing::warn!(
                    user_id = %user.id,
                    error = %e,
                    "Login rejected: stored credentials unusable"
                );
                Err(UserError::InvalidCredentials)
            }
            Err(AuthenticationError::JwtError(e)) => Err(e.into()),
        }
    }

    /// Answer a login for an unknown phone number exactly like a wrong password.
    async fn reject_unknown_user(&self, password: String) -> UserError {
        let authenticator = Arc::clone(&self.authenticator);

        if let Err(e) =
            tokio::task::spawn_blocking(move || authenticator.reject_unknown_user(&password)).await
        {
            tracing::error!(error = %e, "Password verification task failed");
        }
        tracing::warn!("Login rejected: unknown phone number");

        UserError::InvalidCredentials
    }
}

#[async_trait]
impl<UR> UserServicePort for UserService<UR>
where
    UR: UserRepository,
{
    async fn register(&self, command: RegisterUserCommand) -> Result<UserId, UserError> {
        if self.repository.is_exist_user(&command.phone_number).await? {
            return Err(UserError::PhoneNumberAlreadyExists(
                command.phone_number.to_string(),
            ));
        }

        let hashed = self
            .hash_password(command.password.as_str().to_string())
            .await?;

        let new_user = NewUser {
            full_name: command.full_name,
            phone_number: command.phone_number,
            password_hash: hashed.hash,
            password_salt: hashed.salt.as_str().to_string(),
        };

        let user_id = self.repository.create_user(new_user).await?;

        tracing::info!(user_id = %user_id, "User registered");

        Ok(user_id)
    }

    async fn login(&self, command: LoginCommand) -> Result<LoginOutcome, UserError> {
        if command.phone_number.is_empty() {
            return Err(ValidationError::new("phone number must not be empty").into());
        }
        if command.password.is_empty() {
            return Err(ValidationError::new("password must not be empty").into());
        }

        let user = match PhoneNumber::new(command.phone_number) {
            Ok(phone_number) => {
                self.repository
                    .get_user_by_phone_number(&phone_number)
                    .await?
            }
            // No account can hold a number that fails validation.
            Err(_) => None,
        };

        let Some(user) = user else {
            return Err(self.reject_unknown_user(command.password).await);
        };

        let token = self.authenticate(command.password, &user).await?;

        self.repository.update_user_login_success(&user.id).await?;

        tracing::info!(user_id = %user.id, "User logged in");

        Ok(LoginOutcome {
            user_id: user.id,
            token,
        })
    }

    async fn get_profile(&self, id: &UserId) -> Result<User, UserError> {
        self.repository
            .get_user_by_id(id)
            .await?
            .ok_or(UserError::NotFound)
    }

    async fn update_profile(
        &self,
        id: &UserId,
        command: UpdateProfileCommand,
    ) -> Result<(), UserError> {
        if command.is_empty() {
            return Err(ValidationError::new("nothing to update").into());
        }

        self.repository.update_user_profile(id, &command).await?;

        tracing::info!(user_id = %id, "User profile updated");

        Ok(())
    }
}
