use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};

use tokio::sync::RwLock;
use tracing::debug;

use crate::domain::entities::{Comment, Notification, Post, Profile};
use crate::domain::value_objects::{CommentId, PostId, ProfileId, ViewGeneration};

#[derive(Debug, Clone, Default)]
struct CommentSlot {
    items: Vec<Comment>,
    /// サーバーから一度でも取得済みか。取得済みの列に対しては
    /// comment_count が常に items.len() と一致するよう再計算される。
    fetched: bool,
}

#[derive(Default)]
struct StoreInner {
    posts: HashMap<PostId, Post>,
    feed_order: Vec<PostId>,
    comments: HashMap<PostId, CommentSlot>,
    profiles: HashMap<ProfileId, Profile>,
    usernames: HashMap<String, ProfileId>,
    follow_state: HashMap<ProfileId, bool>,
    notifications: Vec<Notification>,
    search_results: Vec<ProfileId>,
}

/// セッション中の全エンティティを所有するインメモリストア。
/// 変更はすべてここを通り、派生カウンターは元の列/フラグと
/// 同じ遷移の中でだけ動く。
pub struct EntityStore {
    inner: RwLock<StoreInner>,
    generation: AtomicU64,
}

impl EntityStore {
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(StoreInner::default()),
            generation: AtomicU64::new(0),
        }
    }

    // --- ビュー世代 ---

    /// 新しいビューを開始する。世代を進め、前のビューが所有していた
    /// 状態を破棄する。以降、古い世代でタグ付けされた完了結果は
    /// 適用されない。
    pub async fn begin_view(&self) -> ViewGeneration {
        let mut inner = self.inner.write().await;
        *inner = StoreInner::default();
        let gen = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        debug!(generation = gen, "view generation advanced");
        ViewGeneration::new(gen)
    }

    pub fn current_generation(&self) -> ViewGeneration {
        ViewGeneration::new(self.generation.load(Ordering::SeqCst))
    }

    pub fn is_current(&self, generation: ViewGeneration) -> bool {
        self.current_generation() == generation
    }

    // --- 投稿 ---

    /// ID でマージし、既存レコードを置き換える。新規 ID は
    /// 受け取った順でフィード順序に追加される。互いに素な
    /// バッチ同士の適用順序は結果に影響しない。
    pub async fn upsert_posts(&self, posts: Vec<Post>) {
        let mut inner = self.inner.write().await;
        for post in posts {
            if !inner.posts.contains_key(&post.id) {
                inner.feed_order.push(post.id);
            }
            inner.posts.insert(post.id, post);
        }
    }

    pub async fn get_post(&self, id: PostId) -> Option<Post> {
        self.inner.read().await.posts.get(&id).cloned()
    }

    /// 投稿を部分更新する。対象が存在しなければ false。
    pub async fn patch_post<F>(&self, id: PostId, patch: F) -> bool
    where
        F: FnOnce(&mut Post),
    {
        let mut inner = self.inner.write().await;
        match inner.posts.get_mut(&id) {
            Some(post) => {
                patch(post);
                true
            }
            None => false,
        }
    }

    /// いいねフラグを現在のローカル状態から反転する。
    /// 戻り値は反転後の (liked_by_me, like_count)。
    pub async fn apply_like_flip(&self, id: PostId) -> Option<(bool, u32)> {
        let mut inner = self.inner.write().await;
        let post = inner.posts.get_mut(&id)?;
        let liked = post.flip_like();
        Some((liked, post.like_count))
    }

    /// フィード順の投稿一覧。
    pub async fn feed_posts(&self) -> Vec<Post> {
        let inner = self.inner.read().await;
        inner
            .feed_order
            .iter()
            .filter_map(|id| inner.posts.get(id).cloned())
            .collect()
    }

    // --- コメント ---

    /// 投稿のコメント列を権威的な取得結果で丸ごと差し替える。
    /// 追記ではなく置換（楽観的に追加した行が確定版と重複しないように）。
    pub async fn set_comments(&self, post_id: PostId, comments: Vec<Comment>) {
        let mut inner = self.inner.write().await;
        let len = comments.len();
        inner.comments.insert(
            post_id,
            CommentSlot {
                items: comments,
                fetched: true,
            },
        );
        if let Some(post) = inner.posts.get_mut(&post_id) {
            post.reconcile_comment_count(len);
        }
    }

    /// コメントを末尾に追加する（挿入順維持）。取得済みの列なら
    /// カウンターを列長に再計算し、未取得ならサーバー推定値を +1 する。
    pub async fn append_comment(&self, comment: Comment) {
        let mut inner = self.inner.write().await;
        let post_id = comment.post_id;
        let slot = inner.comments.entry(post_id).or_default();
        slot.items.push(comment);
        let (len, fetched) = (slot.items.len(), slot.fetched);
        if let Some(post) = inner.posts.get_mut(&post_id) {
            if fetched {
                post.reconcile_comment_count(len);
            } else {
                post.comment_count += 1;
            }
        }
    }

    /// コメントを取り除く（ロールバック経路）。true なら削除された。
    pub async fn remove_comment(&self, post_id: PostId, comment_id: CommentId) -> bool {
        let mut inner = self.inner.write().await;
        let Some(slot) = inner.comments.get_mut(&post_id) else {
            return false;
        };
        let before = slot.items.len();
        slot.items.retain(|c| c.id != comment_id);
        if slot.items.len() == before {
            return false;
        }
        let (len, fetched) = (slot.items.len(), slot.fetched);
        if let Some(post) = inner.posts.get_mut(&post_id) {
            if fetched {
                post.reconcile_comment_count(len);
            } else {
                post.comment_count = post.comment_count.saturating_sub(1);
            }
        }
        true
    }

    /// 一時 ID の行をサーバー確定版で置き換える。位置と長さは変わらない。
    pub async fn replace_comment(
        &self,
        post_id: PostId,
        pending_id: CommentId,
        confirmed: Comment,
    ) -> bool {
        let mut inner = self.inner.write().await;
        let Some(slot) = inner.comments.get_mut(&post_id) else {
            return false;
        };
        match slot.items.iter_mut().find(|c| c.id == pending_id) {
            Some(row) => {
                *row = confirmed;
                true
            }
            None => false,
        }
    }

    pub async fn comments(&self, post_id: PostId) -> Vec<Comment> {
        self.inner
            .read()
            .await
            .comments
            .get(&post_id)
            .map(|slot| slot.items.clone())
            .unwrap_or_default()
    }

    pub async fn comments_loaded(&self, post_id: PostId) -> bool {
        self.inner
            .read()
            .await
            .comments
            .get(&post_id)
            .map(|slot| slot.fetched)
            .unwrap_or(false)
    }

    // --- プロフィール ---

    pub async fn upsert_profiles(&self, profiles: Vec<Profile>) {
        let mut inner = self.inner.write().await;
        for profile in profiles {
            inner.usernames.insert(profile.username.clone(), profile.id);
            inner.profiles.insert(profile.id, profile);
        }
    }

    pub async fn get_profile(&self, id: ProfileId) -> Option<Profile> {
        self.inner.read().await.profiles.get(&id).cloned()
    }

    pub async fn get_profile_by_username(&self, username: &str) -> Option<Profile> {
        let inner = self.inner.read().await;
        let id = inner.usernames.get(username)?;
        inner.profiles.get(id).cloned()
    }

    pub async fn patch_profile<F>(&self, id: ProfileId, patch: F) -> bool
    where
        F: FnOnce(&mut Profile),
    {
        let mut inner = self.inner.write().await;
        match inner.profiles.get_mut(&id) {
            Some(profile) => {
                patch(profile);
                true
            }
            None => false,
        }
    }

    // --- フォロー状態 ---

    /// サーバー統計から導出したフォロー状態をそのまま記録する。
    /// カウンターは統計ペイロード側の値を使うためここでは動かさない。
    pub async fn set_follow_state(&self, target: ProfileId, following: bool) {
        let mut inner = self.inner.write().await;
        inner.follow_state.insert(target, following);
    }

    /// フォローフラグの遷移。フラグが実際に変わるときだけ
    /// フォロワー数を ±1 する（同じ遷移が二度適用されることはない）。
    /// 戻り値はフラグが変わったかどうか。
    pub async fn apply_follow_transition(&self, target: ProfileId, following: bool) -> bool {
        let mut inner = self.inner.write().await;
        let current = inner.follow_state.get(&target).copied().unwrap_or(false);
        if current == following {
            return false;
        }
        inner.follow_state.insert(target, following);
        if let Some(profile) = inner.profiles.get_mut(&target) {
            if following {
                profile.apply_follow();
            } else {
                profile.revert_follow();
            }
        }
        true
    }

    pub async fn is_following(&self, target: ProfileId) -> bool {
        self.inner
            .read()
            .await
            .follow_state
            .get(&target)
            .copied()
            .unwrap_or(false)
    }

    // --- 通知・検索結果 ---

    pub async fn set_notifications(&self, notifications: Vec<Notification>) {
        self.inner.write().await.notifications = notifications;
    }

    pub async fn notifications(&self) -> Vec<Notification> {
        self.inner.read().await.notifications.clone()
    }

    /// バックエンドが返した検索結果集合をそのままの順序で記録する。
    pub async fn set_search_results(&self, ids: Vec<ProfileId>) {
        self.inner.write().await.search_results = ids;
    }

    pub async fn search_results(&self) -> Vec<Profile> {
        let inner = self.inner.read().await;
        inner
            .search_results
            .iter()
            .filter_map(|id| inner.profiles.get(id).cloned())
            .collect()
    }
}

impl Default for EntityStore {
    fn default() -> Self {
        Self::new()
    }
}
