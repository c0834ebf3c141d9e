/// Common test utilities for integration tests
///
/// Provides shared infrastructure:
/// - Test database setup (connects to `DATABASE_URL`, runs migrations)
/// - Test user creation with unique emails
/// - JWT token generation
/// - A request helper that drives the router as a tower `Service`
///
/// Integration tests require a live PostgreSQL database and are `#[ignore]`d
/// by default; run them with `cargo test -- --ignored`.

use axum::body::Body;
use axum::http::Request;
use axum::http::StatusCode;
use serde_json::Value;
use sqlx::PgPool;
use taskhub_api::app::{build_router, AppState};
use taskhub_api::config::Config;
use taskhub_shared::auth::jwt::{create_token, Claims, TokenType};
use taskhub_shared::auth::password::hash_password;
use taskhub_shared::models::task::{CreateTask, Task};
use taskhub_shared::models::user::{CreateUser, User};
use tower::Service as _;
use uuid::Uuid;

/// Test context containing the router and a ready-made authenticated user
pub struct TestContext {
    pub db: PgPool,
    pub app: axum::Router,
    pub config: Config,
    pub user: User,
    pub token: String,
}

impl TestContext {
    /// Creates a new test context against the configured test database
    pub async fn new() -> anyhow::Result<Self> {
        let config = Config::from_env()?;

        let db = PgPool::connect(&config.database.url).await?;

        taskhub_shared::db::migrations::run_migrations(&db).await?;

        let user = create_test_user(&db, "owner").await?;
        let token = token_for(&config, &user);

        let state = AppState::new(db.clone(), config.clone());
        let app = build_router(state);

        Ok(Self {
            db,
            app,
            config,
            user,
            token,
        })
    }

    /// Issues an access token for an arbitrary user
    pub fn token_for(&self, user: &User) -> String {
        token_for(&self.config, user)
    }
}

/// Issues an access token signed with the test secret
pub fn token_for(config: &Config, user: &User) -> String {
    let claims = Claims::new(user.id, TokenType::Access);
    create_token(&claims, &config.jwt.secret).expect("token creation should succeed")
}

/// Creates a user with a unique email
pub async fn create_test_user(db: &PgPool, name: &str) -> anyhow::Result<User> {
    let user = User::create(
        db,
        CreateUser {
            username: name.to_string(),
            email: format!("{}+{}@example.com", name, Uuid::new_v4()),
            password_hash: hash_password("Str0ng!Pass")?,
        },
    )
    .await?;

    Ok(user)
}

/// Creates a task directly through the model layer
///
/// Used where tests need states the API never produces, e.g. an unassigned
/// task.
pub async fn create_raw_task(
    db: &PgPool,
    project_id: Uuid,
    title: &str,
    assigned_to: Option<Uuid>,
) -> anyhow::Result<Task> {
    let task = Task::create(
        db,
        CreateTask {
            title: title.to_string(),
            description: String::new(),
            priority: None,
            deadline: None,
            project_id,
            assigned_to,
        },
    )
    .await?;

    Ok(task)
}

/// Sends a request through the router and parses the JSON response
pub async fn send(
    app: &axum::Router,
    method: &str,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);

    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {}", token));
    }

    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().call(request).await.unwrap();
    let status = response.status();

    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };

    (status, value)
}
