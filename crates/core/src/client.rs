//! View-time rendering.
//!
//! In client mode markers become loading cards carrying a small JSON config,
//! and the page references one static module (`CLIENT_MODULE`) that fetches
//! store data in the browser and fills every card in.

use serde::Serialize;

use crate::card::AppId;
use crate::card::fragment::{card_link, div};
use crate::config::CardSettings;
use crate::document::Element;

/// Browser module that fills in loading cards.
pub const CLIENT_MODULE: &str = include_str!("../assets/steam-card.js");

/// File name the CLI writes the module to.
pub const CLIENT_MODULE_FILE: &str = "steam-card.js";

/// Attribute holding the per-card JSON config.
pub const CARD_CONFIG_ATTR: &str = "data-steam-card";

/// Id of the module's script element.
pub const SCRIPT_ELEMENT_ID: &str = "steam-card-client";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ElementIds {
    pub card: String,
    pub title: String,
    pub price: String,
    pub review: String,
    pub cover: String,
}

impl ElementIds {
    /// Ids are derived from the app id and the card's ordinal so output is reproducible.
    pub fn new(app_id: AppId, ordinal: usize) -> Self {
        let base = format!("sg-{app_id}-{ordinal}");
        Self {
            card: format!("{base}-card"),
            title: format!("{base}-title"),
            price: format!("{base}-price"),
            review: format!("{base}-review"),
            cover: format!("{base}-cover"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CardConfig {
    pub app_id: String,
    pub element_ids: ElementIds,
}

/// Loading card for `app_id`; the module replaces its placeholders.
pub fn loading_card(app_id: AppId, ordinal: usize) -> Element {
    let ids = ElementIds::new(app_id, ordinal);
    let config = CardConfig { app_id: app_id.to_string(), element_ids: ids.clone() };
    // Serializing a struct of strings cannot fail.
    let config_json = serde_json::to_string(&config).unwrap_or_default();

    let info = div("game-info")
        .with_child(div("game-title").with_property("id", &ids.title).with_text("Loading..."))
        .with_child(div("game-price").with_property("id", &ids.price).with_text("•••"))
        .with_child(div("game-review").with_property("id", &ids.review).with_text("•••"));

    card_link(app_id, "steam-game sg-loading")
        .with_property("id", &ids.card)
        .with_property(CARD_CONFIG_ATTR, config_json)
        .with_child(info)
        .with_child(div("game-cover").with_property("id", &ids.cover))
}

/// The single module reference appended once per document.
pub fn script_element(settings: &CardSettings) -> Element {
    Element::new("script")
        .with_property("type", "module")
        .with_property("id", SCRIPT_ELEMENT_ID)
        .with_property("src", &settings.client_script_url)
        .with_property("data-api-base", &settings.client_api_base)
        .with_property("data-locale", &settings.locale)
        .with_property("data-reviews", if settings.fetch_reviews { "true" } else { "false" })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn loading_card_carries_config() {
        let el = loading_card(AppId::new(570), 2);
        assert_eq!(el.tag_name, "a");
        assert_eq!(el.property("id"), Some("sg-570-2-card"));
        assert_eq!(el.property("class"), Some("steam-game sg-loading"));
        assert_eq!(el.property("href"), Some("https://store.steampowered.com/app/570/"));

        let config: serde_json::Value =
            serde_json::from_str(el.property(CARD_CONFIG_ATTR).unwrap()).unwrap();
        assert_eq!(config["appId"], "570");
        assert_eq!(config["elementIds"]["title"], "sg-570-2-title");
        assert_eq!(config["elementIds"]["cover"], "sg-570-2-cover");
    }

    #[test]
    fn script_element_points_at_module() {
        let settings = CardSettings::default();
        let el = script_element(&settings);
        assert_eq!(el.property("type"), Some("module"));
        assert_eq!(el.property("src"), Some("/steam-card.js"));
        assert_eq!(el.property("data-api-base"), Some("https://store.steampowered.com"));
        assert_eq!(el.property("data-reviews"), Some("true"));
        assert!(el.children.is_empty());
    }

    #[test]
    fn script_element_turns_reviews_off() {
        let settings = CardSettings { fetch_reviews: false, ..CardSettings::default() };
        let el = script_element(&settings);
        assert_eq!(el.property("data-reviews"), Some("false"));
    }

    #[test]
    fn module_reads_card_config() {
        assert!(CLIENT_MODULE.contains(CARD_CONFIG_ATTR));
        assert!(CLIENT_MODULE.contains(SCRIPT_ELEMENT_ID));
        assert!(CLIENT_MODULE.contains("dataset.reviews"));
    }
}
