use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

/// クライアント側で解決されるバリデーション失敗理由。
/// ネットワーク層には到達しない（§参照: 空コメント・自己フォロー）。
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum ValidationFailureKind {
    /// 汎用的なバリデーションエラー。
    Generic,
    /// 空白のみのコメント本文。
    EmptyComment,
    /// 自分自身のプロフィールへのフォロー要求。
    SelfFollow,
}

impl ValidationFailureKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ValidationFailureKind::Generic => "generic",
            ValidationFailureKind::EmptyComment => "empty_comment",
            ValidationFailureKind::SelfFollow => "self_follow",
        }
    }
}

impl fmt::Display for ValidationFailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ValidationFailureKind {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "generic" => Ok(ValidationFailureKind::Generic),
            "empty_comment" => Ok(ValidationFailureKind::EmptyComment),
            "self_follow" => Ok(ValidationFailureKind::SelfFollow),
            _ => Err(()),
        }
    }
}
