use std::sync::Arc;

use crate::domain::entities::{Comment, Notification, Post, Profile};
use crate::domain::value_objects::ProfileId;
use crate::infrastructure::cache::EntityStore;

/// フィード 1 行分の描画データ。
#[derive(Debug, Clone, PartialEq)]
pub struct FeedItem {
    pub post: Post,
    pub comments: Vec<Comment>,
    /// コメント列がサーバーから取得済みか（未取得なら count は推定値）
    pub comments_loaded: bool,
}

/// 閲覧者から見たフォローボタンの状態。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FollowAffordance {
    /// 自分のプロフィール。編集のみ
    Editable,
    /// フォロー可能
    Follow,
    /// フォロー済み（片方向のため無効化された表示のみ）
    Following,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProfileView {
    pub profile: Profile,
    pub affordance: FollowAffordance,
}

/// キャッシュから各画面の描画データへの読み取り専用の射影。
/// ネットワーク I/O もキャッシュへの変更も行わない。
pub struct ViewService {
    store: Arc<EntityStore>,
}

impl ViewService {
    pub fn new(store: Arc<EntityStore>) -> Self {
        Self { store }
    }

    /// ダッシュボード用。フィード順の投稿と現在のいいね/コメント状態。
    pub async fn feed_view(&self) -> Vec<FeedItem> {
        let posts = self.store.feed_posts().await;
        let mut items = Vec::with_capacity(posts.len());
        for post in posts {
            let comments = self.store.comments(post.id).await;
            let comments_loaded = self.store.comments_loaded(post.id).await;
            items.push(FeedItem {
                post,
                comments,
                comments_loaded,
            });
        }
        items
    }

    /// プロフィール画面用。閲覧者との関係からボタン状態を導出する。
    pub async fn profile_view(&self, id: ProfileId) -> Option<ProfileView> {
        let profile = self.store.get_profile(id).await?;
        let affordance = if profile.is_self {
            FollowAffordance::Editable
        } else if self.store.is_following(id).await {
            FollowAffordance::Following
        } else {
            FollowAffordance::Follow
        };
        Some(ProfileView {
            profile,
            affordance,
        })
    }

    /// 検索画面用。バックエンドが返した集合をそのままの順序で返す。
    pub async fn search_view(&self) -> Vec<Profile> {
        self.store.search_results().await
    }

    pub async fn notifications_view(&self) -> Vec<Notification> {
        self.store.notifications().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::services::test_support::{post_with_likes, profile_with_followers};
    use crate::domain::entities::Comment;
    use crate::domain::value_objects::PostId;

    #[tokio::test]
    async fn feed_view_keeps_feed_order_and_pending_rows() {
        let store = Arc::new(EntityStore::new());
        store
            .upsert_posts(vec![post_with_likes(1, 4), post_with_likes(2, 0)])
            .await;
        store.set_comments(PostId::new(1), vec![]).await;
        store
            .append_comment(Comment::pending(
                PostId::new(1),
                "me".to_string(),
                "draft".to_string(),
            ))
            .await;

        let views = ViewService::new(store).feed_view().await;
        assert_eq!(views.len(), 2);
        assert_eq!(views[0].post.id, PostId::new(1));
        assert!(views[0].comments_loaded);
        // 楽観的に追加された行も描画対象
        assert_eq!(views[0].comments.len(), 1);
        assert!(views[0].comments[0].is_pending());
        assert!(!views[1].comments_loaded);
    }

    #[tokio::test]
    async fn profile_view_derives_follow_affordance() {
        let store = Arc::new(EntityStore::new());
        let mut me = profile_with_followers(1, 0);
        me.is_self = true;
        store
            .upsert_profiles(vec![me, profile_with_followers(2, 0), profile_with_followers(3, 0)])
            .await;
        store.set_follow_state(ProfileId::new(3), true).await;

        let views = ViewService::new(store);
        assert_eq!(
            views.profile_view(ProfileId::new(1)).await.unwrap().affordance,
            FollowAffordance::Editable
        );
        assert_eq!(
            views.profile_view(ProfileId::new(2)).await.unwrap().affordance,
            FollowAffordance::Follow
        );
        assert_eq!(
            views.profile_view(ProfileId::new(3)).await.unwrap().affordance,
            FollowAffordance::Following
        );
        assert!(views.profile_view(ProfileId::new(9)).await.is_none());
    }
}
