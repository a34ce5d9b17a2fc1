use crate::domain::value_objects::ProfileId;

/// ログイン中の閲覧者。楽観的コメントの author と
/// 自己フォロー判定に使われる。
#[derive(Debug, Clone, PartialEq)]
pub struct Viewer {
    pub profile_id: ProfileId,
    pub username: String,
}

/// セッションストレージへのポート。トークンの保存・取得自体は
/// このクレートの外にある。
pub trait Session: Send + Sync {
    /// Bearer トークン。無ければ未認証として扱う
    fn access_token(&self) -> Option<String>;

    fn viewer(&self) -> Option<Viewer>;
}
