use crate::domain::value_objects::ProfileId;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Profile {
    pub id: ProfileId,
    pub username: String,
    pub bio: String,
    pub location: String,
    pub avatar_url: Option<String>,
    pub is_self: bool,
    pub follower_count: u32,
    pub following_count: u32,
}

impl Profile {
    pub fn new(id: ProfileId, username: String) -> Self {
        Self {
            id,
            username,
            bio: String::new(),
            location: String::new(),
            avatar_url: None,
            is_self: false,
            follower_count: 0,
            following_count: 0,
        }
    }

    pub fn apply_follow(&mut self) {
        self.follower_count += 1;
    }

    pub fn revert_follow(&mut self) {
        self.follower_count = self.follower_count.saturating_sub(1);
    }
}
