//! Lookup adapter: turns an application id into store data.

pub mod payload;
pub mod steam;
pub mod types;

use async_trait::async_trait;

use crate::card::AppId;

pub use steam::SteamClient;
pub use types::{GameDetails, LookupError, ReviewSummary};

/// Source of game details and review summaries.
#[async_trait]
pub trait GameLookup: Send + Sync {
    async fn details(&self, app_id: AppId) -> Result<GameDetails, LookupError>;

    async fn reviews(&self, app_id: AppId) -> Result<ReviewSummary, LookupError>;
}

#[async_trait]
impl<T: GameLookup + ?Sized> GameLookup for std::sync::Arc<T> {
    async fn details(&self, app_id: AppId) -> Result<GameDetails, LookupError> {
        (**self).details(app_id).await
    }

    async fn reviews(&self, app_id: AppId) -> Result<ReviewSummary, LookupError> {
        (**self).reviews(app_id).await
    }
}
