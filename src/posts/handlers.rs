use axum::{
    extract::State,
    http::StatusCode,
    routing::{delete, get, post},
    Json, Router,
};
use tracing::{info, instrument, warn};

use crate::{
    error::{not_found_on_foreign_key, ApiError, IdPath, JsonBody, MessageResponse},
    posts::{
        dto::{
            CompactPost, CreatePostRequest, FullPost, PostResponse, CONTENT_MAX_CHARS,
            TITLE_MAX_CHARS,
        },
        repo,
    },
    state::AppState,
    users::{
        self,
        dto::{UserResponse, UserWithPosts},
    },
};

const USER_NOT_FOUND: &str = "User not found";

pub fn post_routes() -> Router<AppState> {
    Router::new()
        .route("/user/posts/:id", get(list_user_posts))
        .route("/user/post", post(create_post))
        .route("/user/post/:id", delete(delete_post))
}

#[instrument(skip(state))]
pub async fn list_user_posts(
    State(state): State<AppState>,
    IdPath(user_id): IdPath<i64>,
) -> Result<Json<UserResponse<UserWithPosts>>, ApiError> {
    let Some(user) = users::repo::find_by_id(&state.db, user_id).await? else {
        warn!(user_id, "user not found");
        return Err(ApiError::NotFound(USER_NOT_FOUND));
    };
    let posts = repo::list_by_user(&state.db, user.id).await?;

    Ok(Json(UserResponse {
        msg: "Posts retrieved successfully",
        user: UserWithPosts {
            id: user.id,
            email: user.email,
            posts: posts.into_iter().map(CompactPost::from).collect(),
        },
    }))
}

#[instrument(skip(state, payload))]
pub async fn create_post(
    State(state): State<AppState>,
    JsonBody(payload): JsonBody<CreatePostRequest>,
) -> Result<(StatusCode, Json<PostResponse>), ApiError> {
    let (Some(title), Some(content), Some(user_id)) = (
        payload.title.filter(|v| !v.is_empty()),
        payload.content.filter(|v| !v.is_empty()),
        payload.user_id,
    ) else {
        warn!("title, content or user_id missing");
        return Err(ApiError::Validation("Title, content and user_id are required"));
    };
    if title.chars().count() > TITLE_MAX_CHARS {
        return Err(ApiError::Validation("Title must be at most 200 characters"));
    }
    if content.chars().count() > CONTENT_MAX_CHARS {
        return Err(ApiError::Validation("Content must be at most 500 characters"));
    }

    if users::repo::find_by_id(&state.db, user_id).await?.is_none() {
        warn!(user_id, "post owner not found");
        return Err(ApiError::NotFound(USER_NOT_FOUND));
    }

    let post = repo::create(&state.db, &title, &content, user_id)
        .await
        .map_err(|e| not_found_on_foreign_key(e, USER_NOT_FOUND))?;

    info!(post_id = post.id, user_id, "post created");
    Ok((
        StatusCode::CREATED,
        Json(PostResponse {
            msg: "Post created successfully",
            post: FullPost::from(post),
        }),
    ))
}

#[instrument(skip(state))]
pub async fn delete_post(
    State(state): State<AppState>,
    IdPath(id): IdPath<i64>,
) -> Result<Json<MessageResponse>, ApiError> {
    if !repo::delete(&state.db, id).await? {
        warn!(post_id = id, "post not found");
        return Err(ApiError::NotFound("Post not found"));
    }
    info!(post_id = id, "post deleted");
    Ok(Json(MessageResponse {
        msg: "Post deleted successfully",
    }))
}

#[cfg(test)]
mod tests {
    use crate::test_support::TestApp;
    use axum::http::StatusCode;
    use serde_json::json;

    #[tokio::test]
    async fn create_then_list() {
        let app = TestApp::new().await;
        let user_id = app.create_user("writer@example.com").await;

        let (status, body) = app
            .post("/user/post", json!({ "title": "T", "content": "C", "user_id": user_id }))
            .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["msg"], "Post created successfully");
        let post_id = body["post"]["id"].as_i64().unwrap();
        assert_eq!(
            body["post"],
            json!({ "id": post_id, "title": "T", "content": "C", "user_id": user_id })
        );

        let (status, body) = app.get(&format!("/user/posts/{user_id}")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body,
            json!({
                "msg": "Posts retrieved successfully",
                "user": {
                    "id": user_id,
                    "email": "writer@example.com",
                    "posts": [{ "id": post_id, "title": "T", "content": "C" }]
                }
            })
        );
    }

    #[tokio::test]
    async fn user_without_posts_lists_empty() {
        let app = TestApp::new().await;
        let user_id = app.create_user("quiet@example.com").await;
        let (status, body) = app.get(&format!("/user/posts/{user_id}")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["user"]["posts"], json!([]));
    }

    #[tokio::test]
    async fn listing_posts_of_unknown_user_is_404() {
        let app = TestApp::new().await;
        let (status, body) = app.get("/user/posts/77").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body, json!({ "msg": "User not found" }));
    }

    #[tokio::test]
    async fn unknown_owner_is_404_and_creates_nothing() {
        let app = TestApp::new().await;
        let (status, body) = app
            .post("/user/post", json!({ "title": "T", "content": "C", "user_id": 999 }))
            .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body, json!({ "msg": "User not found" }));
        assert_eq!(app.count("posts").await, 0);
    }

    #[tokio::test]
    async fn missing_fields_are_400() {
        let app = TestApp::new().await;
        let user_id = app.create_user("a@example.com").await;
        for payload in [
            json!({ "content": "C", "user_id": user_id }),
            json!({ "title": "T", "user_id": user_id }),
            json!({ "title": "T", "content": "C" }),
            json!({ "title": "", "content": "C", "user_id": user_id }),
        ] {
            let (status, body) = app.post("/user/post", payload).await;
            assert_eq!(status, StatusCode::BAD_REQUEST);
            assert_eq!(body, json!({ "msg": "Title, content and user_id are required" }));
        }
        assert_eq!(app.count("posts").await, 0);
    }

    #[tokio::test]
    async fn oversized_fields_are_400() {
        let app = TestApp::new().await;
        let user_id = app.create_user("long@example.com").await;

        let (status, _) = app
            .post(
                "/user/post",
                json!({ "title": "x".repeat(201), "content": "C", "user_id": user_id }),
            )
            .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, _) = app
            .post(
                "/user/post",
                json!({ "title": "T", "content": "x".repeat(501), "user_id": user_id }),
            )
            .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, _) = app
            .post(
                "/user/post",
                json!({ "title": "é".repeat(200), "content": "x".repeat(500), "user_id": user_id }),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(app.count("posts").await, 1);
    }

    #[tokio::test]
    async fn delete_removes_post_but_keeps_owner() {
        let app = TestApp::new().await;
        let user_id = app.create_user("owner@example.com").await;
        let (_, body) = app
            .post("/user/post", json!({ "title": "T", "content": "C", "user_id": user_id }))
            .await;
        let post_id = body["post"]["id"].as_i64().unwrap();

        let (status, body) = app.delete(&format!("/user/post/{post_id}")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({ "msg": "Post deleted successfully" }));

        let (status, body) = app.get(&format!("/user/posts/{user_id}")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["user"]["posts"], json!([]));

        let (status, _) = app.get(&format!("/user/{user_id}")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(app.count("users").await, 1);
    }

    #[tokio::test]
    async fn deleting_unknown_post_is_404() {
        let app = TestApp::new().await;
        let (status, body) = app.delete("/user/post/31337").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body, json!({ "msg": "Post not found" }));
    }
}
