use crate::card::types::{AppId, CardError, MarkerKind, MarkerNames};
use crate::document::Element;

/// Property carrying the application id.
pub const APP_ID_PROPERTY: &str = "appId";

/// Check a marker before any lookup.
///
/// Returns [`CardError::MissingIdentifier`] when there is nothing to resolve,
/// and [`CardError::InvalidInput`] for input that must render as an error.
pub fn validate(marker: &Element, kind: MarkerKind, names: &MarkerNames) -> Result<AppId, CardError> {
    let raw = raw_app_id(marker).ok_or(CardError::MissingIdentifier)?;

    if kind == MarkerKind::Directive && has_content(marker) {
        return Err(CardError::InvalidInput(invalid_directive_message(&names.directive)));
    }

    raw.parse::<AppId>().map_err(|_| CardError::InvalidInput(invalid_app_id_message()))
}

/// The `appId` as written, if present and non-blank.
pub fn raw_app_id(marker: &Element) -> Option<&str> {
    marker.property(APP_ID_PROPERTY).filter(|id| !id.trim().is_empty())
}

fn has_content(marker: &Element) -> bool {
    !marker.children.is_empty()
}

fn invalid_directive_message(directive: &str) -> String {
    format!(
        "Invalid directive. (\"{directive}\" directive must be leaf type \
         \"::{directive}{{appId=\"12345\"}}\")"
    )
}

fn invalid_app_id_message() -> String {
    "Invalid app ID. (\"appId\" must be a valid Steam application number)".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::Node;

    fn names() -> MarkerNames {
        MarkerNames::default()
    }

    #[test]
    fn accepts_numeric_ids() {
        let el = Element::new("steam-game").with_property("appId", "570");
        assert_eq!(validate(&el, MarkerKind::Tag, &names()), Ok(AppId::new(570)));
    }

    #[test]
    fn missing_or_blank_id_is_skipped() {
        let el = Element::new("steam-game");
        assert_eq!(validate(&el, MarkerKind::Tag, &names()), Err(CardError::MissingIdentifier));

        let blank = Element::new("steam-game").with_property("appId", "  ");
        assert_eq!(
            validate(&blank, MarkerKind::Tag, &names()),
            Err(CardError::MissingIdentifier)
        );
    }

    #[test]
    fn non_numeric_id_is_invalid() {
        let el = Element::new("steam-game").with_property("appId", "portal");
        let err = validate(&el, MarkerKind::Tag, &names()).unwrap_err();
        assert!(matches!(err, CardError::InvalidInput(msg) if msg.starts_with("Invalid app ID")));
    }

    #[test]
    fn directive_with_children_is_invalid() {
        let el = Element::new("steamgame")
            .with_property("appId", "570")
            .with_child(Node::text("label"));
        let err = validate(&el, MarkerKind::Directive, &names()).unwrap_err();
        assert_eq!(
            err,
            CardError::InvalidInput(
                "Invalid directive. (\"steamgame\" directive must be leaf type \
                 \"::steamgame{appId=\"12345\"}\")"
                    .to_string()
            )
        );
    }

    #[test]
    fn tag_markers_may_carry_children() {
        let el = Element::new("steam-game")
            .with_property("appId", "570")
            .with_child(Node::text("fallback"));
        assert!(validate(&el, MarkerKind::Tag, &names()).is_ok());
    }
}
