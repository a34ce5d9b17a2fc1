use crate::domain::value_objects::{CommentId, PostId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Comment {
    pub id: CommentId,
    pub post_id: PostId,
    pub author: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

impl Comment {
    pub fn new(
        id: CommentId,
        post_id: PostId,
        author: String,
        content: String,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            post_id,
            author,
            content,
            created_at,
        }
    }

    /// サーバー確定前の楽観的なコメント行を作る。
    pub fn pending(post_id: PostId, author: String, content: String) -> Self {
        Self {
            id: CommentId::pending(),
            post_id,
            author,
            content,
            created_at: Utc::now(),
        }
    }

    pub fn is_pending(&self) -> bool {
        self.id.is_pending()
    }
}
