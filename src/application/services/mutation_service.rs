use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use crate::application::ports::{ProfileUpdate, Session, SocialApi};
use crate::domain::entities::{Comment, Profile};
use crate::domain::value_objects::{PostId, ProfileId, ViewGeneration};
use crate::infrastructure::cache::EntityStore;
use crate::shared::error::AppError;
use crate::shared::validation::ValidationFailureKind;

/// ミューテーション 1 件の決着。
/// `IDLE -> OPTIMISTIC_APPLIED -> (REMOTE_OK -> SETTLED) | (REMOTE_FAIL -> FAILED)`
#[derive(Debug)]
pub enum Settlement {
    /// リモートが成功し、楽観的状態が確定した
    Confirmed,
    /// 前提条件により何も起こらなかった（冪等 no-op）
    Noop,
    /// リモートが失敗し、楽観的変更を巻き戻した
    RolledBack(AppError),
    /// 後続のローカル変更またはナビゲーションに追い越された失敗。
    /// 新しい状態を上書きしないよう無視される
    Superseded(AppError),
}

/// ユーザー操作を「即時のローカル遷移 + 遅延するリモート確認」に
/// 変換するエンジン。like / comment / follow は楽観的適用と
/// 失敗時ロールバックに統一されている。
pub struct MutationService {
    store: Arc<EntityStore>,
    api: Arc<dyn SocialApi>,
    session: Arc<dyn Session>,
    /// 投稿ごとのいいね操作連番。古い操作の決着を判別する
    like_ops: Mutex<HashMap<PostId, u64>>,
    follow_ops: Mutex<HashMap<ProfileId, u64>>,
}

impl MutationService {
    pub fn new(store: Arc<EntityStore>, api: Arc<dyn SocialApi>, session: Arc<dyn Session>) -> Self {
        Self {
            store,
            api,
            session,
            like_ops: Mutex::new(HashMap::new()),
            follow_ops: Mutex::new(HashMap::new()),
        }
    }

    /// いいねのトグル。常に現在のローカル状態から反転する
    /// （ローカルは last-writer-wins）。
    pub async fn toggle_like(
        &self,
        generation: ViewGeneration,
        post_id: PostId,
    ) -> Result<Settlement, AppError> {
        let (my_seq, liked, like_count) = {
            let mut ops = self.like_ops.lock().await;
            let Some((liked, like_count)) = self.store.apply_like_flip(post_id).await else {
                return Err(AppError::NotFound(format!("Post not found: {post_id}")));
            };
            let seq = ops.entry(post_id).or_insert(0);
            *seq += 1;
            (*seq, liked, like_count)
        };
        info!(%post_id, liked, like_count, "optimistic like applied");

        match self.api.like_post(post_id).await {
            Ok(()) => Ok(Settlement::Confirmed),
            Err(err) => {
                if !self.store.is_current(generation) {
                    debug!(%post_id, %err, "like failure settled after navigation, dropped");
                    return Ok(Settlement::Superseded(err));
                }
                let ops = self.like_ops.lock().await;
                if ops.get(&post_id).copied().unwrap_or(0) != my_seq {
                    debug!(%post_id, %err, "like failure superseded by newer flip, dropped");
                    return Ok(Settlement::Superseded(err));
                }
                self.store.apply_like_flip(post_id).await;
                warn!(%post_id, %err, "like rejected by server, optimistic flip reverted");
                Ok(Settlement::RolledBack(err))
            }
        }
    }

    /// コメントの追加。空白のみの本文は副作用なしの no-op。
    /// 成功時はその投稿のコメント列を取り直して置き換える
    /// （合成行の追記は権威的リストとの重複を生むため）。
    pub async fn add_comment(
        &self,
        generation: ViewGeneration,
        post_id: PostId,
        text: &str,
    ) -> Result<Settlement, AppError> {
        let content = text.trim();
        if content.is_empty() {
            debug!(%post_id, "empty comment ignored");
            return Ok(Settlement::Noop);
        }
        let Some(viewer) = self.session.viewer() else {
            return Err(AppError::Unauthorized("No active session".to_string()));
        };
        if self.store.get_post(post_id).await.is_none() {
            return Err(AppError::NotFound(format!("Post not found: {post_id}")));
        }

        let pending = Comment::pending(post_id, viewer.username, content.to_string());
        let pending_id = pending.id;
        self.store.append_comment(pending).await;
        info!(%post_id, %pending_id, "optimistic comment appended");

        match self.api.create_comment(post_id, content).await {
            Ok(confirmed) => {
                if !self.store.is_current(generation) {
                    debug!(%post_id, "comment confirmed after navigation, reconciliation skipped");
                    return Ok(Settlement::Confirmed);
                }
                match self.api.list_comments(post_id).await {
                    Ok(fresh) => {
                        if self.store.is_current(generation) {
                            self.store.set_comments(post_id, fresh).await;
                        }
                    }
                    Err(refresh_err) => {
                        // 取り直しに失敗したら確定行との差し替えだけ行う
                        warn!(%post_id, %refresh_err, "comment refresh failed, swapping pending row");
                        self.store.replace_comment(post_id, pending_id, confirmed).await;
                    }
                }
                Ok(Settlement::Confirmed)
            }
            Err(err) => {
                if !self.store.is_current(generation) {
                    debug!(%post_id, %err, "comment failure settled after navigation, dropped");
                    return Ok(Settlement::Superseded(err));
                }
                self.store.remove_comment(post_id, pending_id).await;
                warn!(%post_id, %err, "comment rejected by server, pending row removed");
                Ok(Settlement::RolledBack(err))
            }
        }
    }

    /// フォロー。片方向・冪等で、アンフォローは存在しない。
    pub async fn follow(
        &self,
        generation: ViewGeneration,
        target: ProfileId,
    ) -> Result<Settlement, AppError> {
        let Some(profile) = self.store.get_profile(target).await else {
            return Err(AppError::NotFound(format!("Profile not found: {target}")));
        };
        let is_self = profile.is_self
            || self
                .session
                .viewer()
                .map(|v| v.profile_id == target)
                .unwrap_or(false);
        if is_self {
            return Err(AppError::validation(
                ValidationFailureKind::SelfFollow,
                "You cannot follow your own account",
            ));
        }
        if self.store.is_following(target).await {
            debug!(%target, "already following, request not re-issued");
            return Ok(Settlement::Noop);
        }

        let my_seq = {
            let mut ops = self.follow_ops.lock().await;
            self.store.apply_follow_transition(target, true).await;
            let seq = ops.entry(target).or_insert(0);
            *seq += 1;
            *seq
        };
        info!(%target, "optimistic follow applied");

        match self.api.follow(target).await {
            Ok(()) => Ok(Settlement::Confirmed),
            Err(err) => {
                if !self.store.is_current(generation) {
                    debug!(%target, %err, "follow failure settled after navigation, dropped");
                    return Ok(Settlement::Superseded(err));
                }
                let ops = self.follow_ops.lock().await;
                if ops.get(&target).copied().unwrap_or(0) != my_seq {
                    debug!(%target, %err, "follow failure superseded, dropped");
                    return Ok(Settlement::Superseded(err));
                }
                self.store.apply_follow_transition(target, false).await;
                warn!(%target, %err, "follow rejected by server, reverted");
                Ok(Settlement::RolledBack(err))
            }
        }
    }

    /// プロフィール更新。楽観的ではなく、リモートが返した正準レコードで
    /// キャッシュを丸ごと置き換える。失敗はそのまま呼び出し側へ伝播し、
    /// フォーム状態は温存される。
    pub async fn update_profile(
        &self,
        generation: ViewGeneration,
        update: ProfileUpdate,
    ) -> Result<Profile, AppError> {
        let profile = self.api.update_profile(update).await?;
        if self.store.is_current(generation) {
            self.store.upsert_profiles(vec![profile.clone()]).await;
        } else {
            debug!("profile update settled after navigation, cache not touched");
        }
        Ok(profile)
    }
}
