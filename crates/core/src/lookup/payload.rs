//! Shape checks for store API payloads.
//!
//! Bodies are decoded into explicit structs; anything that does not fit fails
//! closed with [`LookupError`] instead of leaking partial data into a card.

use std::collections::HashMap;

use serde::Deserialize;
use serde_json::Value;

use crate::card::AppId;
use crate::lookup::types::{GameDetails, LookupError, ReviewSummary};

#[derive(Debug, Deserialize)]
struct DetailsEnvelope {
    #[serde(default)]
    success: bool,
    #[serde(default)]
    data: Option<DetailsData>,
}

#[derive(Debug, Deserialize)]
struct DetailsData {
    name: String,
    #[serde(default)]
    header_image: Option<String>,
    #[serde(default)]
    price_overview: Option<PriceOverview>,
}

#[derive(Debug, Deserialize)]
struct PriceOverview {
    final_formatted: String,
}

#[derive(Debug, Deserialize)]
struct ReviewsEnvelope {
    #[serde(default)]
    success: Value,
    #[serde(default)]
    query_summary: Option<QuerySummary>,
}

#[derive(Debug, Deserialize)]
struct QuerySummary {
    total_positive: u64,
    total_reviews: u64,
    review_score_desc: String,
}

/// Parse an `appdetails` body: `{"<id>": {"success": true, "data": {...}}}`.
pub fn parse_details(app_id: AppId, body: Value) -> Result<GameDetails, LookupError> {
    let mut envelopes: HashMap<String, DetailsEnvelope> =
        serde_json::from_value(body).map_err(|e| LookupError::Shape(e.to_string()))?;

    let key = app_id.to_string();
    let envelope = envelopes
        .remove(&key)
        .ok_or_else(|| LookupError::Shape(format!("no entry for app {key}")))?;

    if !envelope.success {
        return Err(LookupError::Unsuccessful("Invalid appId".to_string()));
    }

    let data = envelope
        .data
        .ok_or_else(|| LookupError::Shape(format!("no data for app {key}")))?;

    Ok(GameDetails {
        name: data.name,
        header_image: data.header_image.filter(|url| !url.is_empty()),
        price: data.price_overview.map(|p| p.final_formatted),
    })
}

/// Parse an `appreviews` body: `{"success": 1, "query_summary": {...}}`.
pub fn parse_reviews(body: Value) -> Result<ReviewSummary, LookupError> {
    let envelope: ReviewsEnvelope =
        serde_json::from_value(body).map_err(|e| LookupError::Shape(e.to_string()))?;

    if !is_truthy(&envelope.success) {
        return Err(LookupError::Unsuccessful("Invalid appId".to_string()));
    }

    let summary = envelope
        .query_summary
        .ok_or_else(|| LookupError::Shape("missing query_summary".to_string()))?;

    Ok(ReviewSummary {
        total_positive: summary.total_positive,
        total_reviews: summary.total_reviews,
        review_score_desc: summary.review_score_desc,
    })
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
        Value::Null => false,
    }
}
