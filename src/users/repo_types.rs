use sqlx::FromRow;

/// User row as read back from the store. The password hash is write-only
/// and is never selected.
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: i64,
    pub email: String,
    pub is_active: bool,
}
