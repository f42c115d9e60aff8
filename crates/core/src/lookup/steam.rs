use async_trait::async_trait;
use reqwest::header::{ACCEPT_LANGUAGE, HeaderMap, HeaderValue};
use serde_json::Value;
use tracing::debug;

use crate::card::AppId;
use crate::config::types::SteamSettings;
use crate::lookup::GameLookup;
use crate::lookup::payload::{parse_details, parse_reviews};
use crate::lookup::types::{GameDetails, LookupError, ReviewSummary};

/// Store API client backed by `reqwest`.
#[derive(Debug, Clone)]
pub struct SteamClient {
    http: reqwest::Client,
    api_base: String,
    locale: String,
}

impl SteamClient {
    pub fn new(settings: &SteamSettings) -> Result<Self, LookupError> {
        let mut headers = HeaderMap::new();
        let language = HeaderValue::from_str(&settings.accept_language)
            .map_err(|e| LookupError::Client(format!("invalid Accept-Language: {e}")))?;
        headers.insert(ACCEPT_LANGUAGE, language);

        let http = reqwest::Client::builder()
            .user_agent(settings.user_agent.as_str())
            .default_headers(headers)
            .timeout(settings.timeout)
            .build()
            .map_err(|e| LookupError::Client(e.to_string()))?;

        Ok(Self {
            http,
            api_base: settings.api_base.trim_end_matches('/').to_string(),
            locale: settings.locale.clone(),
        })
    }

    pub fn details_url(&self, app_id: AppId) -> String {
        format!("{}/api/appdetails?appids={app_id}&l={}", self.api_base, self.locale)
    }

    pub fn reviews_url(&self, app_id: AppId) -> String {
        format!("{}/appreviews/{app_id}?json=1&l={}", self.api_base, self.locale)
    }

    async fn get_json(&self, url: &str) -> Result<Value, LookupError> {
        debug!(url, "fetching");

        let resp = self.http.get(url).send().await.map_err(LookupError::Transport)?;

        let status = resp.status();
        if !status.is_success() {
            return Err(LookupError::Status(status.as_u16()));
        }

        resp.json::<Value>().await.map_err(|e| LookupError::Decode(e.to_string()))
    }
}

#[async_trait]
impl GameLookup for SteamClient {
    async fn details(&self, app_id: AppId) -> Result<GameDetails, LookupError> {
        let body = self.get_json(&self.details_url(app_id)).await?;
        parse_details(app_id, body)
    }

    async fn reviews(&self, app_id: AppId) -> Result<ReviewSummary, LookupError> {
        let body = self.get_json(&self.reviews_url(app_id)).await?;
        parse_reviews(body)
    }
}
