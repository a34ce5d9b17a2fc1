use serde::{Deserialize, Serialize};
use std::fmt;

/// ビュー世代。ナビゲーションごとに単調増加し、発行済みリクエストに
/// タグ付けされる。古い世代の完了結果はキャッシュに適用されない。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ViewGeneration(u64);

impl ViewGeneration {
    pub fn new(value: u64) -> Self {
        Self(value)
    }

    pub fn value(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for ViewGeneration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
