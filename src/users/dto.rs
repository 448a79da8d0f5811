use serde::{Deserialize, Serialize};

use crate::posts::dto::CompactPost;
use crate::users::repo_types::User;

pub const EMAIL_MAX_CHARS: usize = 120;

/// Request body for user creation. Fields are optional so a missing one
/// reaches the handler and is answered as a validation error.
#[derive(Debug, Deserialize)]
pub struct CreateUserRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

/// Default view of a user; never includes the password.
#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct PublicUser {
    pub id: i64,
    pub email: String,
}

/// Public view plus the activity flag.
#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct UserStatus {
    pub id: i64,
    pub email: String,
    pub is_active: bool,
}

/// Public view plus the user's posts in compact form.
#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct UserWithPosts {
    pub id: i64,
    pub email: String,
    pub posts: Vec<CompactPost>,
}

impl From<User> for PublicUser {
    fn from(u: User) -> Self {
        Self {
            id: u.id,
            email: u.email,
        }
    }
}

impl From<User> for UserStatus {
    fn from(u: User) -> Self {
        Self {
            id: u.id,
            email: u.email,
            is_active: u.is_active,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct UsersResponse {
    pub msg: &'static str,
    pub users: Vec<PublicUser>,
}

#[derive(Debug, Serialize)]
pub struct UserResponse<U> {
    pub msg: &'static str,
    pub user: U,
}
