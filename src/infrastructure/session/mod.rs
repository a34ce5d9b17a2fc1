use std::sync::RwLock;

use crate::application::ports::{Session, Viewer};

#[derive(Debug, Default)]
struct SessionState {
    token: Option<String>,
    viewer: Option<Viewer>,
}

/// プロセス内セッション。トークンの永続化はこのクレートの外
/// （シェルアプリ側のセッションストレージ）が担う。
pub struct InMemorySession {
    state: RwLock<SessionState>,
}

impl InMemorySession {
    pub fn new() -> Self {
        Self {
            state: RwLock::new(SessionState::default()),
        }
    }

    pub fn set_token(&self, token: String) {
        self.state.write().expect("session state poisoned").token = Some(token);
    }

    pub fn set_viewer(&self, viewer: Viewer) {
        self.state.write().expect("session state poisoned").viewer = Some(viewer);
    }

    /// ログアウト。トークンと閲覧者情報を破棄する
    pub fn clear(&self) {
        let mut state = self.state.write().expect("session state poisoned");
        *state = SessionState::default();
    }
}

impl Session for InMemorySession {
    fn access_token(&self) -> Option<String> {
        self.state.read().expect("session state poisoned").token.clone()
    }

    fn viewer(&self) -> Option<Viewer> {
        self.state.read().expect("session state poisoned").viewer.clone()
    }
}

impl Default for InMemorySession {
    fn default() -> Self {
        Self::new()
    }
}
