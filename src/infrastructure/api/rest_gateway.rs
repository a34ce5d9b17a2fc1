use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::{Client, Response, StatusCode};
use tracing::debug;

use super::wire::{CommentDto, FollowStatsDto, NotificationDto, PostDto, ProfileDto};
use crate::application::ports::{FollowStats, ProfileUpdate, Session, SocialApi};
use crate::domain::entities::{Comment, Notification, Post, Profile};
use crate::domain::value_objects::{PostId, ProfileId};
use crate::shared::config::ApiConfig;
use crate::shared::error::AppError;
use crate::shared::validation::ValidationFailureKind;

/// REST バックエンドへのゲートウェイ。全リクエストに Bearer トークンを付け、
/// ステータスコードをドメインエラーへ写像する。
pub struct RestGateway {
    client: Client,
    base_url: String,
    session: Arc<dyn Session>,
}

impl RestGateway {
    pub fn new(config: &ApiConfig, session: Arc<dyn Session>) -> Result<Self, AppError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()?;
        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            session,
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// トークンなしではリクエストを発行しない
    fn bearer(&self) -> Result<String, AppError> {
        self.session
            .access_token()
            .ok_or_else(|| AppError::Unauthorized("No access token in session".to_string()))
    }

    async fn check(response: Response) -> Result<Response, AppError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let message = response.text().await.unwrap_or_default();
        debug!(status = status.as_u16(), "backend rejected request");
        match status {
            StatusCode::UNAUTHORIZED => Err(AppError::Unauthorized(message)),
            StatusCode::NOT_FOUND => Err(AppError::NotFound(message)),
            other => Err(AppError::RejectedByServer {
                status: other.as_u16(),
                message,
            }),
        }
    }
}

#[async_trait]
impl SocialApi for RestGateway {
    async fn list_posts(&self) -> Result<Vec<Post>, AppError> {
        let token = self.bearer()?;
        let response = self
            .client
            .get(self.url("/api/posts/"))
            .bearer_auth(token)
            .send()
            .await?;
        let dtos: Vec<PostDto> = Self::check(response).await?.json().await?;
        Ok(dtos.into_iter().map(Post::from).collect())
    }

    async fn list_comments(&self, post_id: PostId) -> Result<Vec<Comment>, AppError> {
        let token = self.bearer()?;
        let response = self
            .client
            .get(self.url(&format!("/api/posts/{}/comments/", post_id)))
            .bearer_auth(token)
            .send()
            .await?;
        let dtos: Vec<CommentDto> = Self::check(response).await?.json().await?;
        Ok(dtos
            .into_iter()
            .map(|dto| dto.into_comment(post_id))
            .collect())
    }

    async fn like_post(&self, post_id: PostId) -> Result<(), AppError> {
        let token = self.bearer()?;
        let response = self
            .client
            .post(self.url(&format!("/api/posts/{}/like/", post_id)))
            .bearer_auth(token)
            .json(&serde_json::json!({}))
            .send()
            .await?;
        Self::check(response).await?;
        Ok(())
    }

    async fn create_comment(&self, post_id: PostId, content: &str) -> Result<Comment, AppError> {
        let token = self.bearer()?;
        let response = self
            .client
            .post(self.url(&format!("/api/posts/{}/comments/create/", post_id)))
            .bearer_auth(token)
            .json(&serde_json::json!({ "content": content }))
            .send()
            .await?;
        let dto: CommentDto = Self::check(response).await?.json().await?;
        Ok(dto.into_comment(post_id))
    }

    async fn follow(&self, target: ProfileId) -> Result<(), AppError> {
        let token = self.bearer()?;
        let response = self
            .client
            .post(self.url(&format!("/api/followers/{}/follow/", target)))
            .bearer_auth(token)
            .json(&serde_json::json!({}))
            .send()
            .await?;
        Self::check(response).await?;
        Ok(())
    }

    async fn get_profile(&self, username: &str) -> Result<Profile, AppError> {
        let token = self.bearer()?;
        let response = self
            .client
            .get(self.url(&format!("/api/users/{}/", username)))
            .bearer_auth(token)
            .send()
            .await?;
        let dto: ProfileDto = Self::check(response).await?.json().await?;
        Ok(Profile::from(dto))
    }

    async fn get_follow_stats(&self, profile_id: ProfileId) -> Result<FollowStats, AppError> {
        let token = self.bearer()?;
        let response = self
            .client
            .get(self.url(&format!("/api/followers/{}/stats/", profile_id)))
            .bearer_auth(token)
            .send()
            .await?;
        let dto: FollowStatsDto = Self::check(response).await?.json().await?;
        Ok(FollowStats::from(dto))
    }

    async fn update_profile(&self, update: ProfileUpdate) -> Result<Profile, AppError> {
        let token = self.bearer()?;
        let mut form = Form::new()
            .text("bio", update.bio)
            .text("location", update.location);
        if let Some(avatar) = update.avatar {
            let part = Part::bytes(avatar.bytes)
                .file_name(avatar.file_name)
                .mime_str(&avatar.content_type)
                .map_err(|e| {
                    AppError::validation(
                        ValidationFailureKind::Generic,
                        format!("Invalid avatar content type: {}", e),
                    )
                })?;
            form = form.part("avatar", part);
        }
        let response = self
            .client
            .put(self.url("/api/users/me/update/"))
            .bearer_auth(token)
            .multipart(form)
            .send()
            .await?;
        let dto: ProfileDto = Self::check(response).await?.json().await?;
        Ok(Profile::from(dto))
    }

    async fn search_profiles(&self, query: &str) -> Result<Vec<Profile>, AppError> {
        let token = self.bearer()?;
        let response = self
            .client
            .get(self.url("/api/users/search-users/"))
            .query(&[("q", query)])
            .bearer_auth(token)
            .send()
            .await?;
        let dtos: Vec<ProfileDto> = Self::check(response).await?.json().await?;
        Ok(dtos.into_iter().map(Profile::from).collect())
    }

    async fn list_notifications(&self) -> Result<Vec<Notification>, AppError> {
        let token = self.bearer()?;
        let response = self
            .client
            .get(self.url("/api/posts/notifications/"))
            .bearer_auth(token)
            .send()
            .await?;
        let dtos: Vec<NotificationDto> = Self::check(response).await?.json().await?;
        Ok(dtos.into_iter().map(Notification::from).collect())
    }
}
