use crate::domain::value_objects::PostId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum NotificationKind {
    Like,
    Comment,
    Follow,
}

/// サーバー生成の通知。クライアントからは読み取り専用。
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Notification {
    pub id: i64,
    pub sender: String,
    pub kind: NotificationKind,
    pub message: String,
    /// フォロー通知には紐づく投稿がない
    pub post_id: Option<PostId>,
    pub read: bool,
    pub created_at: DateTime<Utc>,
}
