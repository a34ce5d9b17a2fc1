use crate::domain::entities::{Comment, Notification, Post, Profile};
use crate::domain::value_objects::{PostId, ProfileId};
use crate::shared::error::AppError;
use async_trait::async_trait;

/// フォロー統計エンドポイントのレスポンス。
/// `follower_ids` から閲覧者のフォロー状態を導出する。
#[derive(Debug, Clone, PartialEq)]
pub struct FollowStats {
    pub follower_count: u32,
    pub following_count: u32,
    pub follower_ids: Vec<ProfileId>,
}

/// プロフィール更新リクエスト。multipart で送信される。
#[derive(Debug, Clone, Default)]
pub struct ProfileUpdate {
    pub bio: String,
    pub location: String,
    pub avatar: Option<AvatarUpload>,
}

#[derive(Debug, Clone)]
pub struct AvatarUpload {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

/// リモート REST バックエンドへのポート。
/// エンドポイントは不透明な要求/応答契約として扱い、
/// レスポンスはドメインエンティティに写像して返す。
#[async_trait]
pub trait SocialApi: Send + Sync {
    /// フィードの投稿一覧を取得
    async fn list_posts(&self) -> Result<Vec<Post>, AppError>;

    /// 投稿単位のコメント列を取得（挿入順）
    async fn list_comments(&self, post_id: PostId) -> Result<Vec<Comment>, AppError>;

    /// いいねのトグルを送信。成功ボディは無視される
    async fn like_post(&self, post_id: PostId) -> Result<(), AppError>;

    /// コメントを作成し、サーバー確定版を返す
    async fn create_comment(&self, post_id: PostId, content: &str) -> Result<Comment, AppError>;

    /// フォローを送信。成功ボディは無視される
    async fn follow(&self, target: ProfileId) -> Result<(), AppError>;

    /// ユーザー名（または "me"）でプロフィールを取得
    async fn get_profile(&self, username: &str) -> Result<Profile, AppError>;

    /// フォロワー/フォロー数と follower_ids を取得
    async fn get_follow_stats(&self, profile_id: ProfileId) -> Result<FollowStats, AppError>;

    /// プロフィールを更新し、正準化された結果を返す
    async fn update_profile(&self, update: ProfileUpdate) -> Result<Profile, AppError>;

    /// クエリ文字列をそのまま転送してプロフィールを検索
    async fn search_profiles(&self, query: &str) -> Result<Vec<Profile>, AppError>;

    /// 通知一覧を取得
    async fn list_notifications(&self) -> Result<Vec<Notification>, AppError>;
}
