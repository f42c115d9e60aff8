use serde::Serialize;
use thiserror::Error;

/// Store details consumed by the card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GameDetails {
    pub name: String,
    pub header_image: Option<String>,
    /// `price_overview.final_formatted`; `None` when the game has no listed price.
    pub price: Option<String>,
}

/// Aggregated user review counts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReviewSummary {
    pub total_positive: u64,
    pub total_reviews: u64,
    pub review_score_desc: String,
}

impl ReviewSummary {
    /// Share of positive reviews in `0.0..=1.0`; zero when there are no reviews.
    pub fn positive_ratio(&self) -> f64 {
        if self.total_reviews == 0 {
            return 0.0;
        }
        self.total_positive.min(self.total_reviews) as f64 / self.total_reviews as f64
    }
}

/// Failure of a single upstream lookup.
///
/// Callers fold every variant into one "lookup failed" outcome; the variants
/// only exist to produce a useful message.
#[derive(Debug, Error)]
pub enum LookupError {
    #[error("request failed: {0}")]
    Transport(#[source] reqwest::Error),

    #[error("store responded with HTTP {0}")]
    Status(u16),

    #[error("response is not valid JSON: {0}")]
    Decode(String),

    #[error("{0}")]
    Unsuccessful(String),

    #[error("unexpected response shape: {0}")]
    Shape(String),

    #[error("lookup cancelled")]
    Cancelled,

    #[error("failed to build HTTP client: {0}")]
    Client(String),
}
