use std::sync::Arc;

use tracing::info;

use crate::application::ports::{Session, SocialApi};
use crate::application::services::{FeedService, MutationService, ProfileService, ViewService};
use crate::infrastructure::api::RestGateway;
use crate::infrastructure::cache::EntityStore;
use crate::infrastructure::session::InMemorySession;
use crate::shared::config::AppConfig;
use crate::shared::error::AppError;

/// クレートの組み立て地点。ストアと各サービスを共有参照で束ねる。
/// シェルアプリはこれを一つ持ち、UI イベントをサービス呼び出しに変える。
pub struct AppContext {
    pub config: AppConfig,
    pub store: Arc<EntityStore>,
    pub session: Arc<InMemorySession>,
    pub feed: FeedService,
    pub profiles: ProfileService,
    pub mutations: Arc<MutationService>,
    pub views: ViewService,
}

impl AppContext {
    pub fn new(config: AppConfig) -> Result<Self, AppError> {
        let session = Arc::new(InMemorySession::new());
        let api: Arc<dyn SocialApi> =
            Arc::new(RestGateway::new(&config.api, session.clone())?);
        info!(base_url = %config.api.base_url, "app context initialized");
        Ok(Self::assemble(config, api, session))
    }

    /// ゲートウェイを差し替えて組み立てる。テストや別バックエンド向け。
    pub fn with_api(config: AppConfig, api: Arc<dyn SocialApi>) -> Self {
        let session = Arc::new(InMemorySession::new());
        Self::assemble(config, api, session)
    }

    fn assemble(
        config: AppConfig,
        api: Arc<dyn SocialApi>,
        session: Arc<InMemorySession>,
    ) -> Self {
        let store = Arc::new(EntityStore::new());
        let session_port: Arc<dyn Session> = session.clone();
        let feed = FeedService::new(store.clone(), api.clone(), config.feed.clone());
        let profiles = ProfileService::new(store.clone(), api.clone(), session_port.clone());
        let mutations = Arc::new(MutationService::new(
            store.clone(),
            api.clone(),
            session_port,
        ));
        let views = ViewService::new(store.clone());
        Self {
            config,
            store,
            session,
            feed,
            profiles,
            mutations,
            views,
        }
    }
}
