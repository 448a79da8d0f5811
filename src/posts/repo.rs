use sqlx::SqlitePool;

use crate::posts::repo_types::Post;

/// All posts owned by `user_id`, oldest first.
pub async fn list_by_user(db: &SqlitePool, user_id: i64) -> Result<Vec<Post>, sqlx::Error> {
    sqlx::query_as::<_, Post>(
        r#"
        SELECT id, title, content, user_id
        FROM posts
        WHERE user_id = $1
        ORDER BY id
        "#,
    )
    .bind(user_id)
    .fetch_all(db)
    .await
}

/// Insert a post. An unknown owner fails with a foreign-key violation.
pub async fn create(
    db: &SqlitePool,
    title: &str,
    content: &str,
    user_id: i64,
) -> Result<Post, sqlx::Error> {
    sqlx::query_as::<_, Post>(
        r#"
        INSERT INTO posts (title, content, user_id)
        VALUES ($1, $2, $3)
        RETURNING id, title, content, user_id
        "#,
    )
    .bind(title)
    .bind(content)
    .bind(user_id)
    .fetch_one(db)
    .await
}

/// Delete a post by id. Returns `false` when there was nothing to delete.
pub async fn delete(db: &SqlitePool, id: i64) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM posts WHERE id = $1")
        .bind(id)
        .execute(db)
        .await?;
    Ok(result.rows_affected() > 0)
}
