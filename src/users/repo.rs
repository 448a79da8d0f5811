use sqlx::SqlitePool;

use crate::users::repo_types::User;

pub async fn list_all(db: &SqlitePool) -> Result<Vec<User>, sqlx::Error> {
    sqlx::query_as::<_, User>(
        r#"
        SELECT id, email, is_active
        FROM users
        ORDER BY id
        "#,
    )
    .fetch_all(db)
    .await
}

/// Point lookup; `None` when no user has this id.
pub async fn find_by_id(db: &SqlitePool, id: i64) -> Result<Option<User>, sqlx::Error> {
    sqlx::query_as::<_, User>(
        r#"
        SELECT id, email, is_active
        FROM users
        WHERE id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(db)
    .await
}

pub async fn find_by_email(db: &SqlitePool, email: &str) -> Result<Option<User>, sqlx::Error> {
    sqlx::query_as::<_, User>(
        r#"
        SELECT id, email, is_active
        FROM users
        WHERE email = $1
        "#,
    )
    .bind(email)
    .fetch_optional(db)
    .await
}

/// Insert a user. A duplicate email fails with a unique violation.
pub async fn create(
    db: &SqlitePool,
    email: &str,
    password_hash: &str,
    is_active: bool,
) -> Result<User, sqlx::Error> {
    sqlx::query_as::<_, User>(
        r#"
        INSERT INTO users (email, password_hash, is_active)
        VALUES ($1, $2, $3)
        RETURNING id, email, is_active
        "#,
    )
    .bind(email)
    .bind(password_hash)
    .bind(is_active)
    .fetch_one(db)
    .await
}
