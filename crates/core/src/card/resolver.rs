use futures::stream::{self, StreamExt};
use tracing::{debug, info, warn};

use crate::card::cancel::CancelSignal;
use crate::card::fragment::{error_card, game_card};
use crate::card::scanner::scan;
use crate::card::types::{AppId, CardError, GameCard, MarkerKind, ResolveReport};
use crate::card::validate::{raw_app_id, validate};
use crate::client::{loading_card, script_element};
use crate::config::{CardSettings, RenderMode};
use crate::document::{Element, Node, NodePath, TreeEditor};
use crate::lookup::{GameLookup, LookupError};

/// What to do with one marker once it has been validated.
enum Plan {
    Skip,
    Fail { raw_id: String, error: CardError },
    Lookup { app_id: AppId },
}

/// Replaces card markers in a document tree.
pub struct Resolver<L> {
    settings: CardSettings,
    lookup: L,
}

impl<L: GameLookup> Resolver<L> {
    pub fn new(settings: CardSettings, lookup: L) -> Self {
        Self { settings, lookup }
    }

    pub fn settings(&self) -> &CardSettings {
        &self.settings
    }

    pub fn lookup(&self) -> &L {
        &self.lookup
    }

    /// Resolve every marker in `tree`.
    pub async fn resolve(&self, tree: &mut Node) -> ResolveReport {
        self.resolve_with_cancel(tree, CancelSignal::never()).await
    }

    /// Resolve every marker in `tree`, stopping outstanding lookups once
    /// `cancel` fires. Markers whose lookup was cut short render as errors.
    pub async fn resolve_with_cancel(&self, tree: &mut Node, cancel: CancelSignal) -> ResolveReport {
        let markers = scan(tree, &self.settings.markers);
        let mut report = ResolveReport::default();
        if markers.is_empty() {
            return report;
        }

        let plans: Vec<(NodePath, Plan)> = markers
            .into_iter()
            .map(|m| {
                let plan = match tree.node_at(&m.path).and_then(Node::as_element) {
                    Some(el) => self.plan(el, m.kind),
                    None => Plan::Skip,
                };
                (m.path, plan)
            })
            .collect();

        match self.settings.mode {
            RenderMode::Build => self.splice_fetched(tree, plans, &cancel, &mut report).await,
            RenderMode::Client => self.splice_loading(tree, plans, &mut report),
        }

        info!(
            resolved = report.resolved,
            failed = report.failed,
            skipped = report.skipped,
            "steam cards resolved"
        );
        report
    }

    fn plan(&self, el: &Element, kind: MarkerKind) -> Plan {
        match validate(el, kind, &self.settings.markers) {
            Ok(app_id) => Plan::Lookup { app_id },
            Err(CardError::MissingIdentifier) => {
                debug!(tag = %el.tag_name, "marker without appId left untouched");
                Plan::Skip
            }
            Err(error) => Plan::Fail {
                raw_id: raw_app_id(el).unwrap_or_default().to_string(),
                error,
            },
        }
    }

    async fn splice_fetched(
        &self,
        tree: &mut Node,
        plans: Vec<(NodePath, Plan)>,
        cancel: &CancelSignal,
        report: &mut ResolveReport,
    ) {
        let lookups: Vec<AppId> = plans
            .iter()
            .filter_map(|(_, plan)| match plan {
                Plan::Lookup { app_id } => Some(*app_id),
                _ => None,
            })
            .collect();

        // `buffered` keeps results in document order.
        let mut results = stream::iter(lookups)
            .map(|app_id| self.fetch(app_id, cancel))
            .buffered(self.settings.max_in_flight.max(1))
            .collect::<Vec<_>>()
            .await
            .into_iter();

        for (path, plan) in plans {
            let fragment = match plan {
                Plan::Skip => {
                    report.skipped += 1;
                    continue;
                }
                Plan::Fail { raw_id, error } => self.failed(&raw_id, &error, report),
                Plan::Lookup { app_id } => match results.next() {
                    Some(Ok(card)) => {
                        report.resolved += 1;
                        game_card(&card)
                    }
                    Some(Err(error)) => self.failed(&app_id.to_string(), &error, report),
                    None => {
                        let error = CardError::LookupFailed("no lookup result".to_string());
                        self.failed(&app_id.to_string(), &error, report)
                    }
                },
            };
            self.splice(tree, &path, fragment);
        }
    }

    fn splice_loading(
        &self,
        tree: &mut Node,
        plans: Vec<(NodePath, Plan)>,
        report: &mut ResolveReport,
    ) {
        for (path, plan) in plans {
            let fragment = match plan {
                Plan::Skip => {
                    report.skipped += 1;
                    continue;
                }
                Plan::Fail { raw_id, error } => self.failed(&raw_id, &error, report),
                Plan::Lookup { app_id } => {
                    let ordinal = report.resolved;
                    report.resolved += 1;
                    loading_card(app_id, ordinal)
                }
            };
            self.splice(tree, &path, fragment);
        }

        if report.resolved > 0 {
            if let Err(e) = tree.append_child(&[], script_element(&self.settings).into()) {
                warn!("could not attach client module reference: {e}");
            }
        }
    }

    async fn fetch(&self, app_id: AppId, cancel: &CancelSignal) -> Result<GameCard, CardError> {
        let result = tokio::select! {
            biased;
            () = cancel.cancelled() => Err(LookupError::Cancelled),
            result = self.fetch_card(app_id) => result,
        };

        result.map_err(|e| {
            warn!(%app_id, "lookup failed: {e}");
            CardError::LookupFailed(e.to_string())
        })
    }

    /// Details are required; a failed review lookup only drops the review line.
    async fn fetch_card(&self, app_id: AppId) -> Result<GameCard, LookupError> {
        if !self.settings.fetch_reviews {
            let details = self.lookup.details(app_id).await?;
            return Ok(GameCard { app_id, details, reviews: None });
        }

        let (details, reviews) =
            tokio::join!(self.lookup.details(app_id), self.lookup.reviews(app_id));
        let details = details?;
        let reviews = match reviews {
            Ok(summary) => Some(summary),
            Err(e) => {
                warn!(%app_id, "review lookup failed, rendering card without reviews: {e}");
                None
            }
        };

        Ok(GameCard { app_id, details, reviews })
    }

    fn failed(&self, raw_id: &str, error: &CardError, report: &mut ResolveReport) -> Element {
        report.failed += 1;
        error_card(&self.settings.error_prefix, raw_id, &error.to_string())
    }

    fn splice(&self, tree: &mut Node, path: &[usize], fragment: Element) {
        if let Err(e) = tree.replace(path, fragment) {
            warn!("could not replace marker: {e}");
        }
    }
}
