use serde::{Deserialize, Serialize};

use crate::posts::repo_types::Post;

pub const TITLE_MAX_CHARS: usize = 200;
pub const CONTENT_MAX_CHARS: usize = 500;

#[derive(Debug, Deserialize)]
pub struct CreatePostRequest {
    pub title: Option<String>,
    pub content: Option<String>,
    pub user_id: Option<i64>,
}

/// Post as nested inside a user's listing.
#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct CompactPost {
    pub id: i64,
    pub title: String,
    pub content: String,
}

#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct FullPost {
    pub id: i64,
    pub title: String,
    pub content: String,
    pub user_id: i64,
}

impl From<Post> for CompactPost {
    fn from(p: Post) -> Self {
        Self {
            id: p.id,
            title: p.title,
            content: p.content,
        }
    }
}

impl From<Post> for FullPost {
    fn from(p: Post) -> Self {
        Self {
            id: p.id,
            title: p.title,
            content: p.content,
            user_id: p.user_id,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct PostResponse {
    pub msg: &'static str,
    pub post: FullPost,
}
