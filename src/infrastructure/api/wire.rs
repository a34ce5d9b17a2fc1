//! バックエンドの JSON 表現。欠けた数値は 0、欠けたフラグは false に
//! 正規化してからドメイン型へ変換する。

use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::application::ports::FollowStats;
use crate::domain::entities::{Comment, Notification, NotificationKind, Post, Profile};
use crate::domain::value_objects::{CommentId, PostId, ProfileId};

#[derive(Debug, Clone, Deserialize)]
pub struct PostDto {
    pub id: i64,
    pub author: String,
    pub content: String,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub liked: bool,
    #[serde(default)]
    pub total_likes: u32,
    #[serde(default)]
    pub total_comments: u32,
}

impl From<PostDto> for Post {
    fn from(dto: PostDto) -> Self {
        Post {
            id: PostId::new(dto.id),
            author: dto.author,
            content: dto.content,
            image_url: dto.image_url,
            liked_by_me: dto.liked,
            like_count: dto.total_likes,
            comment_count: dto.total_comments,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct CommentDto {
    pub id: i64,
    pub author: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

impl CommentDto {
    /// コメント一覧 API は親投稿 ID を行に含めないため、呼び出し側が補う
    pub fn into_comment(self, post_id: PostId) -> Comment {
        Comment {
            id: CommentId::Server(self.id),
            post_id,
            author: self.author,
            content: self.content,
            created_at: self.created_at,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ProfileDto {
    pub id: i64,
    pub username: String,
    #[serde(default)]
    pub bio: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub avatar_url: Option<String>,
    #[serde(default)]
    pub is_me: bool,
    #[serde(default)]
    pub followers_count: u32,
    #[serde(default)]
    pub following_count: u32,
}

impl From<ProfileDto> for Profile {
    fn from(dto: ProfileDto) -> Self {
        Profile {
            id: ProfileId::new(dto.id),
            username: dto.username,
            bio: dto.bio.unwrap_or_default(),
            location: dto.location.unwrap_or_default(),
            avatar_url: dto.avatar_url,
            is_self: dto.is_me,
            follower_count: dto.followers_count,
            following_count: dto.following_count,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct FollowStatsDto {
    #[serde(default)]
    pub followers_count: u32,
    #[serde(default)]
    pub following_count: u32,
    #[serde(default)]
    pub followers_ids: Vec<i64>,
}

impl From<FollowStatsDto> for FollowStats {
    fn from(dto: FollowStatsDto) -> Self {
        FollowStats {
            follower_count: dto.followers_count,
            following_count: dto.following_count,
            follower_ids: dto.followers_ids.into_iter().map(ProfileId::new).collect(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct NotificationDto {
    pub id: i64,
    pub sender_username: String,
    pub notification_type: NotificationKind,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub post: Option<i64>,
    #[serde(default)]
    pub read: bool,
    pub created_at: DateTime<Utc>,
}

impl From<NotificationDto> for Notification {
    fn from(dto: NotificationDto) -> Self {
        Notification {
            id: dto.id,
            sender: dto.sender_username,
            kind: dto.notification_type,
            message: dto.message,
            post_id: dto.post.map(PostId::new),
            read: dto.read,
            created_at: dto.created_at,
        }
    }
}
