pub mod feed_service;
pub mod mutation_service;
pub mod profile_service;
pub mod view_service;

#[cfg(test)]
pub(crate) mod test_support;

pub use feed_service::{FeedService, FetchOutcome};
pub use mutation_service::{MutationService, Settlement};
pub use profile_service::ProfileService;
pub use view_service::{FeedItem, FollowAffordance, ProfileView, ViewService};
