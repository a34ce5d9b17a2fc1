use std::collections::{HashMap, VecDeque};
use std::sync::atomic::AtomicUsize;
use std::sync::atomic::Ordering;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::{oneshot, Mutex};

use crate::application::ports::{FollowStats, ProfileUpdate, SocialApi, Viewer};
use crate::domain::entities::{Comment, Notification, Post, Profile};
use crate::domain::value_objects::{CommentId, PostId, ProfileId};
use crate::infrastructure::session::InMemorySession;
use crate::shared::error::AppError;

/// 記録型の SocialApi モック。結果はキューで注入し、
/// 決着のタイミングはゲートで制御できる。
#[derive(Default)]
pub struct MockApi {
    pub post_lists: Mutex<VecDeque<Result<Vec<Post>, AppError>>>,
    pub post_gates: Mutex<VecDeque<oneshot::Receiver<()>>>,
    pub post_list_calls: AtomicUsize,

    pub comment_lists: Mutex<VecDeque<Result<Vec<Comment>, AppError>>>,
    pub comment_lists_by_post: Mutex<HashMap<PostId, Vec<Comment>>>,
    pub comment_list_calls: AtomicUsize,

    pub like_outcomes: Mutex<VecDeque<Result<(), AppError>>>,
    pub like_gates: Mutex<VecDeque<oneshot::Receiver<()>>>,
    pub like_calls: AtomicUsize,

    pub comment_outcomes: Mutex<VecDeque<Result<Comment, AppError>>>,
    pub comment_calls: AtomicUsize,

    pub follow_outcomes: Mutex<VecDeque<Result<(), AppError>>>,
    pub follow_calls: AtomicUsize,

    pub profile_gets: Mutex<VecDeque<Result<Profile, AppError>>>,
    pub stats_outcomes: Mutex<VecDeque<Result<FollowStats, AppError>>>,
    pub update_outcomes: Mutex<VecDeque<Result<Profile, AppError>>>,

    pub search_outcomes: Mutex<VecDeque<Result<Vec<Profile>, AppError>>>,
    pub search_queries: Mutex<Vec<String>>,

    pub notification_lists: Mutex<VecDeque<Result<Vec<Notification>, AppError>>>,
}

#[async_trait]
impl SocialApi for MockApi {
    async fn list_posts(&self) -> Result<Vec<Post>, AppError> {
        self.post_list_calls.fetch_add(1, Ordering::SeqCst);
        let gate = self.post_gates.lock().await.pop_front();
        if let Some(rx) = gate {
            let _ = rx.await;
        }
        self.post_lists.lock().await.pop_front().unwrap_or(Ok(vec![]))
    }

    async fn list_comments(&self, post_id: PostId) -> Result<Vec<Comment>, AppError> {
        self.comment_list_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(next) = self.comment_lists.lock().await.pop_front() {
            return next;
        }
        Ok(self
            .comment_lists_by_post
            .lock()
            .await
            .get(&post_id)
            .cloned()
            .unwrap_or_default())
    }

    async fn like_post(&self, _post_id: PostId) -> Result<(), AppError> {
        self.like_calls.fetch_add(1, Ordering::SeqCst);
        // 結果は呼び出し順に束縛する。ゲート待ちの間に後続の呼び出しが
        // 先頭の結果を奪わないよう、ゲートより先に取り出す
        let outcome = self.like_outcomes.lock().await.pop_front().unwrap_or(Ok(()));
        let gate = self.like_gates.lock().await.pop_front();
        if let Some(rx) = gate {
            let _ = rx.await;
        }
        outcome
    }

    async fn create_comment(&self, post_id: PostId, content: &str) -> Result<Comment, AppError> {
        self.comment_calls.fetch_add(1, Ordering::SeqCst);
        self.comment_outcomes
            .lock()
            .await
            .pop_front()
            .unwrap_or_else(|| {
                Ok(Comment::new(
                    CommentId::Server(999),
                    post_id,
                    "me".to_string(),
                    content.to_string(),
                    Utc::now(),
                ))
            })
    }

    async fn follow(&self, _target: ProfileId) -> Result<(), AppError> {
        self.follow_calls.fetch_add(1, Ordering::SeqCst);
        self.follow_outcomes.lock().await.pop_front().unwrap_or(Ok(()))
    }

    async fn get_profile(&self, _username: &str) -> Result<Profile, AppError> {
        self.profile_gets
            .lock()
            .await
            .pop_front()
            .unwrap_or_else(|| Err(AppError::Internal("no profile queued".to_string())))
    }

    async fn get_follow_stats(&self, _profile_id: ProfileId) -> Result<FollowStats, AppError> {
        self.stats_outcomes
            .lock()
            .await
            .pop_front()
            .unwrap_or_else(|| Err(AppError::Internal("no stats queued".to_string())))
    }

    async fn update_profile(&self, _update: ProfileUpdate) -> Result<Profile, AppError> {
        self.update_outcomes
            .lock()
            .await
            .pop_front()
            .unwrap_or_else(|| Err(AppError::Internal("no outcome queued".to_string())))
    }

    async fn search_profiles(&self, query: &str) -> Result<Vec<Profile>, AppError> {
        self.search_queries.lock().await.push(query.to_string());
        self.search_outcomes.lock().await.pop_front().unwrap_or(Ok(vec![]))
    }

    async fn list_notifications(&self) -> Result<Vec<Notification>, AppError> {
        self.notification_lists
            .lock()
            .await
            .pop_front()
            .unwrap_or(Ok(vec![]))
    }
}

pub fn network_err() -> AppError {
    AppError::Network("connection reset".to_string())
}

/// profile_id=1, username="me" でログイン済みのセッション
pub fn session() -> Arc<InMemorySession> {
    let session = InMemorySession::new();
    session.set_token("token".to_string());
    session.set_viewer(Viewer {
        profile_id: ProfileId::new(1),
        username: "me".to_string(),
    });
    Arc::new(session)
}

pub fn post_with_likes(id: i64, like_count: u32) -> Post {
    let mut p = Post::new(PostId::new(id), "alice".to_string(), "hello".to_string());
    p.like_count = like_count;
    p
}

pub fn server_comment(post_id: i64, id: i64, content: &str) -> Comment {
    Comment::new(
        CommentId::Server(id),
        PostId::new(post_id),
        "alice".to_string(),
        content.to_string(),
        Utc::now(),
    )
}

pub fn profile_with_followers(id: i64, follower_count: u32) -> Profile {
    let mut p = Profile::new(ProfileId::new(id), format!("user{id}"));
    p.follower_count = follower_count;
    p
}
