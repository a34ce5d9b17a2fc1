use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// コメント ID。サーバー確定前の楽観的な行はクライアント採番の
/// 一時 ID を持ち、確定レスポンスで置き換えられる。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CommentId {
    Server(i64),
    Pending(Uuid),
}

impl CommentId {
    pub fn pending() -> Self {
        CommentId::Pending(Uuid::new_v4())
    }

    pub fn is_pending(&self) -> bool {
        matches!(self, CommentId::Pending(_))
    }
}

impl fmt::Display for CommentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CommentId::Server(id) => write!(f, "{id}"),
            CommentId::Pending(uuid) => write!(f, "pending:{uuid}"),
        }
    }
}

impl From<i64> for CommentId {
    fn from(value: i64) -> Self {
        CommentId::Server(value)
    }
}
