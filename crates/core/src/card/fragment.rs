//! Card and error fragments that replace resolved markers.

use crate::card::types::{AppId, GameCard};
use crate::document::Element;
use crate::lookup::ReviewSummary;

/// Canonical store page base; links always point here regardless of API host.
pub const STORE_PAGE_BASE: &str = "https://store.steampowered.com/app";

/// Price text when the store reports no price (free, unreleased, region locked).
pub const NO_PRICE: &str = "N/A";

/// Static styling for error fragments; legible without any script running.
pub const ERROR_STYLE: &str = "color: #b91c1c; background-color: #fef2f2; \
border: 1px solid #ef4444; border-radius: 0.5rem; margin: 0.5rem 0; padding: 1.1rem 1.5rem;";

pub fn store_page_url(app_id: AppId) -> String {
    format!("{STORE_PAGE_BASE}/{app_id}/")
}

/// Hue on a 0 (red) to 120 (green) scale from the share of positive reviews.
pub fn review_hue(summary: &ReviewSummary) -> f64 {
    if summary.total_reviews == 0 {
        return 0.0;
    }
    let positive = summary.total_positive.min(summary.total_reviews);
    positive as f64 * 120.0 / summary.total_reviews as f64
}

pub fn review_text(summary: &ReviewSummary) -> String {
    format!(
        "{} / {} ({})",
        summary.total_positive, summary.total_reviews, summary.review_score_desc
    )
}

pub fn review_color(summary: &ReviewSummary) -> String {
    format!("hsl({}, 100%, 30%)", format_hue(review_hue(summary)))
}

fn format_hue(hue: f64) -> String {
    let rounded = (hue * 10.0).round() / 10.0;
    if rounded.fract() == 0.0 { format!("{rounded:.0}") } else { format!("{rounded:.1}") }
}

/// Build the populated card for a resolved game.
pub fn game_card(card: &GameCard) -> Element {
    let details = &card.details;

    let mut info = Element::new("div")
        .with_property("class", "game-info")
        .with_child(div("game-title").with_text(&details.name))
        .with_child(div("game-price").with_text(details.price.as_deref().unwrap_or(NO_PRICE)));

    if let Some(reviews) = &card.reviews {
        info = info.with_child(
            div("game-review")
                .with_property("style", format!("color: {}", review_color(reviews)))
                .with_text(review_text(reviews)),
        );
    }

    let mut link = card_link(card.app_id, "steam-game").with_child(info);

    if let Some(src) = &details.header_image {
        link = link.with_child(
            div("game-cover").with_child(
                Element::new("img")
                    .with_property("src", src)
                    .with_property("alt", &details.name)
                    .with_property("loading", "lazy"),
            ),
        );
    }

    link
}

/// Build the inline error fragment shown in place of a failed marker.
pub fn error_card(prefix: &str, app_id: &str, message: &str) -> Element {
    Element::new("div")
        .with_property("class", "steam-game-error")
        .with_property("style", ERROR_STYLE)
        .with_text(format!("{prefix} ({app_id}): {message}"))
}

pub(crate) fn card_link(app_id: AppId, class: &str) -> Element {
    Element::new("a")
        .with_property("class", class)
        .with_property("href", store_page_url(app_id))
        .with_property("target", "_blank")
        .with_property("rel", "noopener noreferrer")
}

pub(crate) fn div(class: &str) -> Element {
    Element::new("div").with_property("class", class)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::Node;
    use crate::lookup::GameDetails;

    fn details(price: Option<&str>, image: Option<&str>) -> GameDetails {
        GameDetails {
            name: "Dota 2".to_string(),
            header_image: image.map(String::from),
            price: price.map(String::from),
        }
    }

    fn find<'a>(el: &'a Element, class: &str) -> Option<&'a Element> {
        if el.property("class") == Some(class) {
            return Some(el);
        }
        el.children.iter().filter_map(Node::as_element).find_map(|child| find(child, class))
    }

    #[test]
    fn formatted_price_is_shown_verbatim() {
        let card = GameCard {
            app_id: AppId::new(570),
            details: details(Some("$9.99"), None),
            reviews: None,
        };
        let el = game_card(&card);
        assert_eq!(find(&el, "game-price").unwrap().text_content(), "$9.99");
        assert_eq!(find(&el, "game-title").unwrap().text_content(), "Dota 2");
    }

    #[test]
    fn missing_price_renders_na() {
        let card =
            GameCard { app_id: AppId::new(570), details: details(None, None), reviews: None };
        let el = game_card(&card);
        assert_eq!(find(&el, "game-price").unwrap().text_content(), "N/A");
        assert!(find(&el, "game-review").is_none());
        assert!(find(&el, "game-cover").is_none());
    }

    #[test]
    fn link_targets_canonical_store_page() {
        let card =
            GameCard { app_id: AppId::new(570), details: details(None, None), reviews: None };
        let el = game_card(&card);
        assert_eq!(el.tag_name, "a");
        assert_eq!(el.property("href"), Some("https://store.steampowered.com/app/570/"));
        assert_eq!(el.property("target"), Some("_blank"));
    }

    #[test]
    fn cover_image_is_lazy_with_alt_text() {
        let card = GameCard {
            app_id: AppId::new(570),
            details: details(None, Some("https://cdn.example/570.jpg")),
            reviews: None,
        };
        let el = game_card(&card);
        let cover = find(&el, "game-cover").unwrap();
        let img = cover.children[0].as_element().unwrap();
        assert_eq!(img.tag_name, "img");
        assert_eq!(img.property("src"), Some("https://cdn.example/570.jpg"));
        assert_eq!(img.property("alt"), Some("Dota 2"));
        assert_eq!(img.property("loading"), Some("lazy"));
    }

    #[test]
    fn review_text_and_hue() {
        let reviews = ReviewSummary {
            total_positive: 8000,
            total_reviews: 10000,
            review_score_desc: "Very Positive".to_string(),
        };
        assert_eq!(review_text(&reviews), "8000 / 10000 (Very Positive)");
        assert_eq!(review_hue(&reviews), 96.0);
        assert_eq!(review_color(&reviews), "hsl(96, 100%, 30%)");

        let card = GameCard {
            app_id: AppId::new(570),
            details: details(None, None),
            reviews: Some(reviews),
        };
        let el = game_card(&card);
        let review = find(&el, "game-review").unwrap();
        assert_eq!(review.text_content(), "8000 / 10000 (Very Positive)");
        assert_eq!(review.property("style"), Some("color: hsl(96, 100%, 30%)"));
    }

    #[test]
    fn hue_spans_red_to_green() {
        let mut summary = ReviewSummary {
            total_positive: 0,
            total_reviews: 10,
            review_score_desc: "Overwhelmingly Negative".into(),
        };
        assert_eq!(review_hue(&summary), 0.0);
        summary.total_positive = 10;
        assert_eq!(review_hue(&summary), 120.0);
        summary.total_positive = 1;
        summary.total_reviews = 3;
        assert_eq!(review_color(&summary), "hsl(40, 100%, 30%)");
    }

    #[test]
    fn error_card_is_static_markup() {
        let el = error_card("Failed to load Steam game", "570", "Invalid appId");
        assert_eq!(el.tag_name, "div");
        assert_eq!(el.children.len(), 1);
        assert_eq!(el.text_content(), "Failed to load Steam game (570): Invalid appId");
        assert_eq!(el.property("style"), Some(ERROR_STYLE));
    }
}
