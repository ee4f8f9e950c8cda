use std::collections::HashMap;
use std::sync::Arc;
use std::sync::Mutex;

use async_trait::async_trait;
use auth::Authenticator;
use auth::JwtSigner;
use auth::KeyPair;
use chrono::Duration;
use chrono::Utc;
use sqlx::postgres::PgConnectOptions;
use sqlx::postgres::PgPoolOptions;
use sqlx::Connection;
use sqlx::Executor;
use sqlx::PgConnection;
use sqlx::PgPool;
use user_service::domain::user::models::NewUser;
use user_service::domain::user::models::PhoneNumber;
use user_service::domain::user::models::UpdateProfileCommand;
use user_service::domain::user::models::User;
use user_service::domain::user::models::UserId;
use user_service::domain::user::ports::UserRepository;
use user_service::domain::user::service::UserService;
use user_service::inbound::http::router::create_router;
use user_service::user::errors::UserError;

const PRIVATE_PEM: &[u8] = include_bytes!(concat!(
    env!("CARGO_MANIFEST_DIR"),
    "/../auth/fixtures/keys/private.pem"
));
const PUBLIC_PEM: &[u8] = include_bytes!(concat!(
    env!("CARGO_MANIFEST_DIR"),
    "/../auth/fixtures/keys/public.pem"
));

/// Test application that spawns a real server
pub struct TestApp {
    pub address: String,
    pub repository: Arc<InMemoryUserRepository>,
    pub api_client: reqwest::Client,
    pub jwt_signer: JwtSigner,
}

impl TestApp {
    /// Spawn the application in a background task and return TestApp
    pub async fn spawn() -> Self {
        // Use random port (0 = OS assigns)
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind random port");
        let port = listener.local_addr().unwrap().port();
        let address = format!("http://127.0.0.1:{}", port);

        let (jwt_signer, jwt_verifier) =
            KeyPair::from_pem(PRIVATE_PEM, PUBLIC_PEM, Duration::hours(24))
                .expect("Failed to load test keys")
                .into_parts();

        let repository = Arc::new(InMemoryUserRepository::default());
        let authenticator = Arc::new(Authenticator::new(jwt_signer.clone()));
        let user_service = Arc::new(UserService::new(Arc::clone(&repository), authenticator));

        let router = create_router(user_service, Arc::new(jwt_verifier));

        // Spawn server in background
        tokio::spawn(async move {
            axum::serve(listener, router).await.expect("Server error");
        });

        Self {
            address,
            repository,
            api_client: reqwest::Client::new(),
            jwt_signer,
        }
    }

    /// Helper to make GET request
    pub fn get(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.get(format!("{}{}", self.address, path))
    }

    /// Helper to make POST request
    pub fn post(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.post(format!("{}{}", self.address, path))
    }

    /// Helper to make GET request with Bearer token
    pub fn get_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.get(path).bearer_auth(token)
    }

    /// Helper to make PUT request with Bearer token
    pub fn put_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.api_client
            .put(format!("{}{}", self.address, path))
            .bearer_auth(token)
    }
}

/// Repository keeping users in memory, enforcing phone number uniqueness the
/// way the `users_phone_number_key` constraint does.
#[derive(Default)]
pub struct InMemoryUserRepository {
    state: Mutex<InMemoryState>,
}

#[derive(Default)]
struct InMemoryState {
    next_id: i64,
    users: HashMap<i64, User>,
}

impl InMemoryUserRepository {
    pub fn find(&self, id: i64) -> Option<User> {
        self.state.lock().unwrap().users.get(&id).cloned()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn create_user(&self, user: NewUser) -> Result<UserId, UserError> {
        let mut state = self.state.lock().unwrap();

        if state
            .users
            .values()
            .any(|u| u.phone_number == user.phone_number)
        {
            return Err(UserError::PhoneNumberAlreadyExists(
                user.phone_number.to_string(),
            ));
        }

        state.next_id += 1;
        let id = state.next_id;
        state.users.insert(
            id,
            User {
                id: UserId(id),
                full_name: user.full_name,
                phone_number: user.phone_number,
                password_hash: user.password_hash,
                password_salt: user.password_salt,
                created_at: Utc::now(),
                last_login_at: None,
                successful_logins: 0,
            },
        );

        Ok(UserId(id))
    }

    async fn is_exist_user(&self, phone_number: &PhoneNumber) -> Result<bool, UserError> {
        let state = self.state.lock().unwrap();
        Ok(state.users.values().any(|u| &u.phone_number == phone_number))
    }

    async fn get_user_by_phone_number(
        &self,
        phone_number: &PhoneNumber,
    ) -> Result<Option<User>, UserError> {
        let state = self.state.lock().unwrap();
        Ok(state
            .users
            .values()
            .find(|u| &u.phone_number == phone_number)
            .cloned())
    }

    async fn get_user_by_id(&self, id: &UserId) -> Result<Option<User>, UserError> {
        let state = self.state.lock().unwrap();
        Ok(state.users.get(&id.0).cloned())
    }

    async fn update_user_login_success(&self, id: &UserId) -> Result<(), UserError> {
        let mut state = self.state.lock().unwrap();
        let user = state.users.get_mut(&id.0).ok_or(UserError::NotFound)?;

        user.last_login_at = Some(Utc::now());
        user.successful_logins += 1;

        Ok(())
    }

    async fn update_user_profile(
        &self,
        id: &UserId,
        command: &UpdateProfileCommand,
    ) -> Result<(), UserError> {
        let mut state = self.state.lock().unwrap();

        if let Some(phone_number) = &command.phone_number {
            if state
                .users
                .values()
                .any(|u| u.id != *id && &u.phone_number == phone_number)
            {
                return Err(UserError::PhoneNumberAlreadyExists(
                    phone_number.to_string(),
                ));
            }
        }

        let user = state.users.get_mut(&id.0).ok_or(UserError::NotFound)?;
        if let Some(full_name) = &command.full_name {
            user.full_name = full_name.clone();
        }
        if let Some(phone_number) = &command.phone_number {
            user.phone_number = phone_number.clone();
        }

        Ok(())
    }
}

/// Throwaway Postgres database with migrations applied.
///
/// Needs `DATABASE_URL` pointing at a server the tests may create databases
/// on; without it the caller skips.
pub struct TestDb {
    pub pool: PgPool,
    pub db_name: String,
    server_url: String,
}

impl TestDb {
    /// Create a new test database with a unique name
    pub async fn new() -> Option<Self> {
        let Ok(server_url) = std::env::var("DATABASE_URL") else {
            eprintln!("DATABASE_URL not set, skipping Postgres test");
            return None;
        };

        let db_name = format!(
            "test_user_service_{}",
            uuid::Uuid::new_v4().to_string().replace('-', "_")
        );

        let mut conn = PgConnection::connect(&server_url)
            .await
            .expect("Failed to connect to Postgres");

        conn.execute(format!(r#"CREATE DATABASE "{}";"#, db_name).as_str())
            .await
            .expect("Failed to create test database");

        let options = server_url
            .parse::<PgConnectOptions>()
            .expect("Failed to parse DATABASE_URL")
            .database(&db_name);

        let pool = PgPoolOptions::new()
            .max_connections(5)
            .connect_with(options)
            .await
            .expect("Failed to connect to test database");

        sqlx::migrate!("./migrations")
            .run(&pool)
            .await
            .expect("Failed to run migrations");

        Some(Self {
            pool,
            db_name,
            server_url,
        })
    }
}

impl Drop for TestDb {
    fn drop(&mut self) {
        let db_name = self.db_name.clone();
        let server_url = self.server_url.clone();
        let pool = self.pool.clone();

        tokio::spawn(async move {
            pool.close().await;

            if let Ok(mut conn) = PgConnection::connect(&server_url).await {
                let _ = conn
                    .execute(format!(r#"DROP DATABASE IF EXISTS "{}" WITH (FORCE);"#, db_name).as_str())
                    .await;
            }
        });
    }
}
