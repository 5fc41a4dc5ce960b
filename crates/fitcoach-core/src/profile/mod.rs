//! Body profile and locally tracked progress.

pub mod progress;
pub mod service;

use std::future::Future;

use fitcoach_types::error::ApiError;
use fitcoach_types::profile::UserProfile;

pub use progress::{ChartLayout, ChartPoint, ProgressTracker};
pub use service::{ProfileOverview, ProfileService};

/// Backend `/users/me/profile` endpoints.
pub trait ProfileApi: Send + Sync {
    fn profile(&self) -> impl Future<Output = Result<UserProfile, ApiError>> + Send;

    fn update_profile(
        &self,
        profile: &UserProfile,
    ) -> impl Future<Output = Result<(), ApiError>> + Send;
}
