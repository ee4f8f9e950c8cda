use async_trait::async_trait;
use chrono::DateTime;
use chrono::Utc;
use sqlx::FromRow;
use sqlx::PgPool;

use crate::domain::user::models::FullName;
use crate::domain::user::models::NewUser;
use crate::domain::user::models::PhoneNumber;
use crate::domain::user::models::UpdateProfileCommand;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::domain::user::ports::UserRepository;
use crate::user::errors::UserError;
use crate::user::errors::ValidationError;

const PHONE_NUMBER_CONSTRAINT: &str = "users_phone_number_key";

pub struct PostgresUserRepository {
    pool: PgPool,
}

impl PostgresUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct UserRow {
    id: i64,
    full_name: String,
    phone_number: String,
    password: String,
    password_salt: String,
    created_at: DateTime<Utc>,
    last_login_at: Option<DateTime<Utc>>,
    successful_logins: i64,
}

impl TryFrom<UserRow> for User {
    type Error = UserError;

    fn try_from(row: UserRow) -> Result<Self, Self::Error> {
        let id = row.id;
        let corrupt = move |e: ValidationError| {
            UserError::DatabaseError(format!("Stored user {} is invalid: {}", id, e))
        };

        Ok(User {
            id: UserId(row.id),
            full_name: FullName::new(row.full_name).map_err(corrupt)?,
            phone_number: PhoneNumber::new(row.phone_number).map_err(corrupt)?,
            password_hash: row.password,
            password_salt: row.password_salt,
            created_at: row.created_at,
            last_login_at: row.last_login_at,
            successful_logins: row.successful_logins,
        })
    }
}

/// Map a failed write, turning the phone number unique violation into a conflict.
fn map_write_error(e: sqlx::Error, phone_number: Option<&PhoneNumber>) -> UserError {
    if let Some(db_err) = e.as_database_error() {
        if db_err.is_unique_violation() && db_err.constraint() == Some(PHONE_NUMBER_CONSTRAINT) {
            return UserError::PhoneNumberAlreadyExists(
                phone_number.map(ToString::to_string).unwrap_or_default(),
            );
        }
    }
    UserError::DatabaseError(e.to_string())
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn create_user(&self, user: NewUser) -> Result<UserId, UserError> {
        let id: i64 = sqlx::query_scalar(
            r#"
            INSERT INTO users (full_name, phone_number, password, password_salt)
            VALUES ($1, $2, $3, $4)
            RETURNING id
            "#,
        )
        .bind(user.full_name.as_str())
        .bind(user.phone_number.as_str())
        .bind(&user.password_hash)
        .bind(&user.password_salt)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_write_error(e, Some(&user.phone_number)))?;

        Ok(UserId(id))
    }

    async fn is_exist_user(&self, phone_number: &PhoneNumber) -> Result<bool, UserError> {
        let exists: bool =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM users WHERE phone_number = $1)")
                .bind(phone_number.as_str())
                .fetch_one(&self.pool)
                .await
                .map_err(|e| UserError::DatabaseError(e.to_string()))?;

        Ok(exists)
    }

    async fn get_user_by_phone_number(
        &self,
        phone_number: &PhoneNumber,
    ) -> Result<Option<User>, UserError> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT id, full_name, phone_number, password, password_salt,
                   created_at, last_login_at, successful_logins
            FROM users
            WHERE phone_number = $1
            "#,
        )
        .bind(phone_number.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| UserError::DatabaseError(e.to_string()))?;

        row.map(User::try_from).transpose()
    }

    async fn get_user_by_id(&self, id: &UserId) -> Result<Option<User>, UserError> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT id, full_name, phone_number, password, password_salt,
                   created_at, last_login_at, successful_logins
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id.0)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| UserError::DatabaseError(e.to_string()))?;

        row.map(User::try_from).transpose()
    }

    async fn update_user_login_success(&self, id: &UserId) -> Result<(), UserError> {
        let result = sqlx::query(
            r#"
            UPDATE users
            SET last_login_at = NOW(), successful_logins = successful_logins + 1
            WHERE id = $1
            "#,
        )
        .bind(id.0)
        .execute(&self.pool)
        .await
        .map_err(|e| UserError::DatabaseError(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(UserError::NotFound);
        }

        Ok(())
    }

    async fn update_user_profile(
        &self,
        id: &UserId,
        command: &UpdateProfileCommand,
    ) -> Result<(), UserError> {
        let result = sqlx::query(
            r#"
            UPDATE users
            SET full_name = COALESCE($2, full_name),
                phone_number = COALESCE($3, phone_number)
            WHERE id = $1
            "#,
        )
        .bind(id.0)
        .bind(command.full_name.as_ref().map(FullName::as_str))
        .bind(command.phone_number.as_ref().map(PhoneNumber::as_str))
        .execute(&self.pool)
        .await
        .map_err(|e| map_write_error(e, command.phone_number.as_ref()))?;

        if result.rows_affected() == 0 {
            return Err(UserError::NotFound);
        }

        Ok(())
    }
}
