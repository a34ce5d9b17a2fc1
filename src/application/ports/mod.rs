pub mod api_gateway;
pub mod session;

pub use api_gateway::{AvatarUpload, FollowStats, ProfileUpdate, SocialApi};
pub use session::{Session, Viewer};
