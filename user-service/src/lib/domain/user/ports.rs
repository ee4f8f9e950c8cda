use async_trait::async_trait;

use crate::domain::user::models::LoginCommand;
use crate::domain::user::models::LoginOutcome;
use crate::domain::user::models::NewUser;
use crate::domain::user::models::PhoneNumber;
use crate::domain::user::models::RegisterUserCommand;
use crate::domain::user::models::UpdateProfileCommand;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::user::errors::UserError;

/// Port for user domain service operations.
#[async_trait]
pub trait UserServicePort: Send + Sync + 'static {
    /// Register a new user with validated fields.
    ///
    /// # Arguments
    /// * `command` - Validated command containing full name, phone number, and password
    ///
    /// # Returns
    /// Identifier of the created user
    ///
    /// # Errors
    /// * `PhoneNumberAlreadyExists` - Phone number is already registered
    /// * `Password` - Salt generation or hashing failed
    /// * `DatabaseError` - Database operation failed
    async fn register(&self, command: RegisterUserCommand) -> Result<UserId, UserError>;

    /// Verify credentials and issue an access token.
    ///
    /// # Arguments
    /// * `command` - Phone number and plaintext password
    ///
    /// # Returns
    /// User identifier and signed token
    ///
    /// # Errors
    /// * `Validation` - Phone number or password is empty
    /// * `NotFound` - No user with this phone number
    /// * `InvalidCredentials` - Password does not match
    /// * `Token` - Token signing failed
    /// * `DatabaseError` - Database operation failed
    async fn login(&self, command: LoginCommand) -> Result<LoginOutcome, UserError>;

    /// Retrieve the profile of an authenticated user.
    ///
    /// # Errors
    /// * `NotFound` - User does not exist
    /// * `DatabaseError` - Database operation failed
    async fn get_profile(&self, id: &UserId) -> Result<User, UserError>;

    /// Update full name and/or phone number of an authenticated user.
    ///
    /// # Arguments
    /// * `id` - User ID to update
    /// * `command` - Command with optional full name and phone number
    ///
    /// # Errors
    /// * `Validation` - Neither field was provided
    /// * `PhoneNumberAlreadyExists` - New phone number belongs to another user
    /// * `DatabaseError` - Database operation failed
    async fn update_profile(
        &self,
        id: &UserId,
        command: UpdateProfileCommand,
    ) -> Result<(), UserError>;
}

/// Persistence operations for user aggregate.
#[async_trait]
pub trait UserRepository: Send + Sync + 'static {
    /// Persist new user to storage.
    ///
    /// # Arguments
    /// * `user` - Validated fields plus password hash and salt
    ///
    /// # Returns
    /// Identifier assigned by storage
    ///
    /// # Errors
    /// * `PhoneNumberAlreadyExists` - Phone number is already registered
    /// * `DatabaseError` - Database operation failed
    async fn create_user(&self, user: NewUser) -> Result<UserId, UserError>;

    /// Check whether a phone number is already registered.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn is_exist_user(&self, phone_number: &PhoneNumber) -> Result<bool, UserError>;

    /// Retrieve user by phone number.
    ///
    /// # Returns
    /// Optional user entity (None if not found)
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn get_user_by_phone_number(
        &self,
        phone_number: &PhoneNumber,
    ) -> Result<Option<User>, UserError>;

    /// Retrieve user by identifier.
    ///
    /// # Returns
    /// Optional user entity (None if not found)
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn get_user_by_id(&self, id: &UserId) -> Result<Option<User>, UserError>;

    /// Record a successful login: stamp `last_login_at` and bump the counter.
    ///
    /// # Errors
    /// * `NotFound` - User does not exist
    /// * `DatabaseError` - Database operation failed
    async fn update_user_login_success(&self, id: &UserId) -> Result<(), UserError>;

    /// Overwrite only the fields present in `command`.
    ///
    /// # Errors
    /// * `NotFound` - User does not exist
    /// * `PhoneNumberAlreadyExists` - New phone number belongs to another user
    /// * `DatabaseError` - Database operation failed
    async fn update_user_profile(
        &self,
        id: &UserId,
        command: &UpdateProfileCommand,
    ) -> Result<(), UserError>;
}
