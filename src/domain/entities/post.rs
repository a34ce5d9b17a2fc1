use crate::domain::value_objects::PostId;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Post {
    pub id: PostId,
    pub author: String,
    pub content: String,
    pub image_url: Option<String>,
    pub liked_by_me: bool,
    pub like_count: u32,
    /// コメント列が未ロードの間はサーバー提供の推定値。
    /// ロード後は常に列の長さと一致する。
    pub comment_count: u32,
}

impl Post {
    pub fn new(id: PostId, author: String, content: String) -> Self {
        Self {
            id,
            author,
            content,
            image_url: None,
            liked_by_me: false,
            like_count: 0,
            comment_count: 0,
        }
    }

    pub fn with_image(mut self, image_url: Option<String>) -> Self {
        self.image_url = image_url;
        self
    }

    /// いいねフラグを反転し、カウンターを同じ遷移で ±1 する。
    /// フラグとカウンターが別々に動くことはない。戻り値は新しいフラグ。
    pub fn flip_like(&mut self) -> bool {
        self.liked_by_me = !self.liked_by_me;
        if self.liked_by_me {
            self.like_count += 1;
        } else {
            self.like_count = self.like_count.saturating_sub(1);
        }
        self.liked_by_me
    }

    /// ロード済みコメント列の長さに合わせてカウンターを再計算する。
    pub fn reconcile_comment_count(&mut self, sequence_len: usize) {
        self.comment_count = sequence_len as u32;
    }
}
