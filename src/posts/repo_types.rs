use sqlx::FromRow;

/// Post row in the database. `user_id` always references an existing user.
#[derive(Debug, Clone, FromRow)]
pub struct Post {
    pub id: i64,
    pub title: String,
    pub content: String,
    pub user_id: i64,
}
