mod comment_id;
mod generation;
mod post_id;
mod profile_id;

pub use comment_id::CommentId;
pub use generation::ViewGeneration;
pub use post_id::PostId;
pub use profile_id::ProfileId;
