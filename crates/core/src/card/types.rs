use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::lookup::{GameDetails, ReviewSummary};

/// A validated Steam application id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct AppId(u32);

impl AppId {
    pub fn new(id: u32) -> Self {
        Self(id)
    }

    pub fn get(self) -> u32 {
        self.0
    }
}

impl fmt::Display for AppId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("not a Steam application id: {0:?}")]
pub struct InvalidAppId(pub String);

impl FromStr for AppId {
    type Err = InvalidAppId;

    /// Accepts decimal digits only; signs, whitespace and overflow are rejected.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
            return Err(InvalidAppId(s.to_string()));
        }
        s.parse::<u32>().map(AppId).map_err(|_| InvalidAppId(s.to_string()))
    }
}

/// Names that mark a card placeholder in a document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarkerNames {
    /// Custom element tag, e.g. `<steam-game appId="570">`.
    pub tag: String,
    /// Leaf directive name, e.g. `::steamgame{appId="570"}`.
    pub directive: String,
}

impl Default for MarkerNames {
    fn default() -> Self {
        Self { tag: "steam-game".to_string(), directive: "steamgame".to_string() }
    }
}

impl MarkerNames {
    pub fn kind_of(&self, tag_name: &str) -> Option<MarkerKind> {
        if tag_name.eq_ignore_ascii_case(&self.tag) {
            Some(MarkerKind::Tag)
        } else if tag_name.eq_ignore_ascii_case(&self.directive) {
            Some(MarkerKind::Directive)
        } else {
            None
        }
    }
}

/// How a marker was written in the source document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkerKind {
    Tag,
    /// Leaf directive; must not carry child content.
    Directive,
}

/// Everything needed to render a populated card.
#[derive(Debug, Clone, PartialEq)]
pub struct GameCard {
    pub app_id: AppId,
    pub details: GameDetails,
    pub reviews: Option<ReviewSummary>,
}

/// Why a marker could not be turned into a card.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CardError {
    /// No usable `appId`; the marker is left untouched.
    #[error("marker has no appId")]
    MissingIdentifier,

    /// Rejected before any lookup was attempted.
    #[error("{0}")]
    InvalidInput(String),

    /// Transport, status, payload or cancellation failure from the store.
    #[error("{0}")]
    LookupFailed(String),
}

/// Outcome counts for one resolver pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ResolveReport {
    /// Markers replaced by a card (populated or loading).
    pub resolved: usize,
    /// Markers replaced by an error fragment.
    pub failed: usize,
    /// Markers left untouched for lack of an `appId`.
    pub skipped: usize,
}

impl ResolveReport {
    pub fn total(&self) -> usize {
        self.resolved + self.failed + self.skipped
    }
}
