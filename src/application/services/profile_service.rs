use std::sync::Arc;

use tracing::debug;

use crate::application::ports::{Session, SocialApi};
use crate::application::services::feed_service::FetchOutcome;
use crate::domain::value_objects::ViewGeneration;
use crate::infrastructure::cache::EntityStore;
use crate::shared::error::AppError;

/// プロフィール画面と検索のための取得層。
pub struct ProfileService {
    store: Arc<EntityStore>,
    api: Arc<dyn SocialApi>,
    session: Arc<dyn Session>,
}

impl ProfileService {
    pub fn new(
        store: Arc<EntityStore>,
        api: Arc<dyn SocialApi>,
        session: Arc<dyn Session>,
    ) -> Self {
        Self { store, api, session }
    }

    /// プロフィール本体とフォロー統計を取得し、閲覧者の
    /// フォロー状態を follower_ids から導出してキャッシュする。
    pub async fn load_profile(
        &self,
        generation: ViewGeneration,
        username: &str,
    ) -> Result<FetchOutcome, AppError> {
        let mut profile = self.api.get_profile(username).await?;
        let stats = self.api.get_follow_stats(profile.id).await?;
        if !self.store.is_current(generation) {
            debug!(username, "profile response for superseded view dropped");
            return Ok(FetchOutcome::Discarded);
        }

        profile.follower_count = stats.follower_count;
        profile.following_count = stats.following_count;

        let following = !profile.is_self
            && self
                .session
                .viewer()
                .map(|viewer| stats.follower_ids.contains(&viewer.profile_id))
                .unwrap_or(false);

        let target = profile.id;
        self.store.upsert_profiles(vec![profile]).await;
        self.store.set_follow_state(target, following).await;
        Ok(FetchOutcome::Applied)
    }

    /// プロフィール検索。クエリはそのままバックエンドに転送され、
    /// 返ってきた集合を verbatim に記録する（クライアント側での
    /// あいまい一致は行わない）。空クエリは結果クリアのみ。
    pub async fn search(
        &self,
        generation: ViewGeneration,
        query: &str,
    ) -> Result<FetchOutcome, AppError> {
        if query.is_empty() {
            if self.store.is_current(generation) {
                self.store.set_search_results(vec![]).await;
            }
            return Ok(FetchOutcome::Applied);
        }

        let profiles = self.api.search_profiles(query).await?;
        if !self.store.is_current(generation) {
            debug!(query, "search response for superseded view dropped");
            return Ok(FetchOutcome::Discarded);
        }

        let ids = profiles.iter().map(|p| p.id).collect();
        self.store.upsert_profiles(profiles).await;
        self.store.set_search_results(ids).await;
        Ok(FetchOutcome::Applied)
    }
}
