#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use steamcard_core::card::AppId;
use steamcard_core::lookup::{GameDetails, GameLookup, LookupError, ReviewSummary};

/// In-memory store double that counts calls and tracks concurrency.
#[derive(Clone, Default)]
pub struct FakeStore {
    details: HashMap<u32, Result<GameDetails, String>>,
    reviews: HashMap<u32, Result<ReviewSummary, String>>,
    delay: Duration,
    pub detail_calls: Arc<AtomicUsize>,
    pub review_calls: Arc<AtomicUsize>,
    in_flight: Arc<AtomicUsize>,
    pub peak_in_flight: Arc<AtomicUsize>,
}

impl FakeStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_game(mut self, id: u32, name: &str, price: Option<&str>) -> Self {
        self.details.insert(
            id,
            Ok(GameDetails {
                name: name.to_string(),
                header_image: Some(format!("https://cdn.example/{id}/header.jpg")),
                price: price.map(String::from),
            }),
        );
        self
    }

    pub fn with_reviews(mut self, id: u32, positive: u64, total: u64, desc: &str) -> Self {
        self.reviews.insert(
            id,
            Ok(ReviewSummary {
                total_positive: positive,
                total_reviews: total,
                review_score_desc: desc.to_string(),
            }),
        );
        self
    }

    pub fn failing_details(mut self, id: u32, reason: &str) -> Self {
        self.details.insert(id, Err(reason.to_string()));
        self
    }

    pub fn failing_reviews(mut self, id: u32, reason: &str) -> Self {
        self.reviews.insert(id, Err(reason.to_string()));
        self
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn total_calls(&self) -> usize {
        self.detail_calls.load(Ordering::SeqCst) + self.review_calls.load(Ordering::SeqCst)
    }

    async fn enter(&self) {
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak_in_flight.fetch_max(now, Ordering::SeqCst);
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        self.in_flight.fetch_sub(1, Ordering::SeqCst);
    }
}

#[async_trait]
impl GameLookup for FakeStore {
    async fn details(&self, app_id: AppId) -> Result<GameDetails, LookupError> {
        self.detail_calls.fetch_add(1, Ordering::SeqCst);
        self.enter().await;
        match self.details.get(&app_id.get()) {
            Some(Ok(d)) => Ok(d.clone()),
            Some(Err(reason)) => Err(LookupError::Unsuccessful(reason.clone())),
            None => Err(LookupError::Unsuccessful("Invalid appId".to_string())),
        }
    }

    async fn reviews(&self, app_id: AppId) -> Result<ReviewSummary, LookupError> {
        self.review_calls.fetch_add(1, Ordering::SeqCst);
        self.enter().await;
        match self.reviews.get(&app_id.get()) {
            Some(Ok(r)) => Ok(r.clone()),
            Some(Err(reason)) => Err(LookupError::Unsuccessful(reason.clone())),
            None => Err(LookupError::Unsuccessful("Invalid appId".to_string())),
        }
    }
}
