mod comment;
mod notification;
mod post;
mod profile;

pub use comment::Comment;
pub use notification::{Notification, NotificationKind};
pub use post::Post;
pub use profile::Profile;
