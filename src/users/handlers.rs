use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use tracing::{info, instrument, warn};

use crate::{
    error::{conflict_on_unique, ApiError, IdPath, JsonBody},
    state::AppState,
    users::{
        dto::{
            CreateUserRequest, PublicUser, UserResponse, UserStatus, UsersResponse,
            EMAIL_MAX_CHARS,
        },
        password::hash_password,
        repo,
    },
};

const USER_EXISTS: &str = "User already exists";

pub fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/users", get(list_users))
        .route("/user", post(create_user))
        .route("/user/:id", get(get_user))
}

#[instrument(skip(state))]
pub async fn list_users(State(state): State<AppState>) -> Result<Json<UsersResponse>, ApiError> {
    let users = repo::list_all(&state.db).await?;
    Ok(Json(UsersResponse {
        msg: "Users retrieved successfully",
        users: users.into_iter().map(PublicUser::from).collect(),
    }))
}

#[instrument(skip(state))]
pub async fn get_user(
    State(state): State<AppState>,
    IdPath(id): IdPath<i64>,
) -> Result<Json<UserResponse<UserStatus>>, ApiError> {
    let Some(user) = repo::find_by_id(&state.db, id).await? else {
        warn!(user_id = id, "user not found");
        return Err(ApiError::NotFound("User not found"));
    };
    Ok(Json(UserResponse {
        msg: "User found successfully",
        user: UserStatus::from(user),
    }))
}

#[instrument(skip(state, payload))]
pub async fn create_user(
    State(state): State<AppState>,
    JsonBody(payload): JsonBody<CreateUserRequest>,
) -> Result<(StatusCode, Json<UserResponse<PublicUser>>), ApiError> {
    let (Some(email), Some(password)) = (
        payload.email.filter(|v| !v.is_empty()),
        payload.password.filter(|v| !v.is_empty()),
    ) else {
        warn!("email or password missing");
        return Err(ApiError::Validation("Email and password are required"));
    };
    if email.chars().count() > EMAIL_MAX_CHARS {
        warn!("email too long");
        return Err(ApiError::Validation("Email must be at most 120 characters"));
    }

    // Fast path only; the unique index on email is what actually guarantees it.
    if repo::find_by_email(&state.db, &email).await?.is_some() {
        warn!(%email, "email already registered");
        return Err(ApiError::Conflict(USER_EXISTS));
    }

    let hash = hash_password(&password)?;
    let user = repo::create(&state.db, &email, &hash, true)
        .await
        .map_err(|e| conflict_on_unique(e, USER_EXISTS))?;

    info!(user_id = user.id, email = %user.email, "user created");
    Ok((
        StatusCode::CREATED,
        Json(UserResponse {
            msg: "User created successfully",
            user: PublicUser::from(user),
        }),
    ))
}
