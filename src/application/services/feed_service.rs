use std::sync::Arc;

use futures::future::join_all;
use tracing::{debug, warn};

use crate::application::ports::SocialApi;
use crate::domain::value_objects::{PostId, ViewGeneration};
use crate::infrastructure::cache::EntityStore;
use crate::shared::config::FeedConfig;
use crate::shared::error::AppError;

/// 取得結果がキャッシュに適用されたか、世代遅れで破棄されたか。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchOutcome {
    Applied,
    /// 発行元のビューが既に破棄されていたため無視された
    Discarded,
}

/// フィード・コメント・通知の取得とキャッシュへの反映。
pub struct FeedService {
    store: Arc<EntityStore>,
    api: Arc<dyn SocialApi>,
    config: FeedConfig,
}

impl FeedService {
    pub fn new(store: Arc<EntityStore>, api: Arc<dyn SocialApi>, config: FeedConfig) -> Self {
        Self { store, api, config }
    }

    /// フィードを取得してキャッシュを populate する。設定に応じて
    /// 表示中の全投稿分のコメントを並行して先読みする。完了順に
    /// 保証はなく、マージは無関係なレコード同士で可換。
    pub async fn load_feed(&self, generation: ViewGeneration) -> Result<FetchOutcome, AppError> {
        let posts = self.api.list_posts().await?;
        if !self.store.is_current(generation) {
            debug!("feed response for superseded view dropped");
            return Ok(FetchOutcome::Discarded);
        }

        let ids: Vec<PostId> = posts.iter().map(|p| p.id).collect();
        self.store.upsert_posts(posts).await;

        if self.config.prefetch_comments {
            let fetches = ids
                .iter()
                .map(|&id| self.load_comments(generation, id))
                .collect::<Vec<_>>();
            for (id, result) in ids.iter().zip(join_all(fetches).await) {
                if let Err(err) = result {
                    warn!(post_id = %id, %err, "comment prefetch failed");
                }
            }
        }

        Ok(FetchOutcome::Applied)
    }

    /// 投稿 1 件分のコメント列を取得して差し替える。
    /// コメント欄の展開時に遅延ロードされる。
    pub async fn load_comments(
        &self,
        generation: ViewGeneration,
        post_id: PostId,
    ) -> Result<FetchOutcome, AppError> {
        let comments = self.api.list_comments(post_id).await?;
        if !self.store.is_current(generation) {
            debug!(%post_id, "comment response for superseded view dropped");
            return Ok(FetchOutcome::Discarded);
        }
        self.store.set_comments(post_id, comments).await;
        Ok(FetchOutcome::Applied)
    }

    pub async fn load_notifications(
        &self,
        generation: ViewGeneration,
    ) -> Result<FetchOutcome, AppError> {
        let notifications = self.api.list_notifications().await?;
        if !self.store.is_current(generation) {
            debug!("notification response for superseded view dropped");
            return Ok(FetchOutcome::Discarded);
        }
        self.store.set_notifications(notifications).await;
        Ok(FetchOutcome::Applied)
    }
}
