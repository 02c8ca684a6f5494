//! Directive Parsing
//!
//! Template attributes whose name starts with the `v-` prefix are
//! directives. The sub-name after the prefix selects the binding strategy,
//! parsed into a closed variant so dispatch is exhaustive:
//!
//! - `v-on:<eventType>="method"` is an event binding.
//! - Any other sub-name is a model binding on the property named by the
//!   attribute value. The sub-name itself is not validated; anything other
//!   than `model` is reported but still bound as a model, preserving the
//!   original fall-through behavior.
//!
//! An `on:` sub-name with an empty event type has no binding to fall
//! through to; it is reported and skipped.

use tracing::warn;

/// Attribute-name prefix marking a directive.
pub const DIRECTIVE_PREFIX: &str = "v-";

/// Sub-name prefix selecting an event binding.
const EVENT_MARKER: &str = "on:";

/// A parsed directive attribute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Directive {
    /// `v-on:<event>="method"`: call a host method when the event fires.
    Event { event: String, method: String },

    /// `v-model="property"` (or any non-event sub-name): two-way
    /// synchronization between a host property and the element's value.
    Model { property: String },
}

/// Check whether an attribute name carries the directive prefix.
pub fn is_directive(name: &str) -> bool {
    name.starts_with(DIRECTIVE_PREFIX)
}

/// Parse a directive attribute into its binding strategy.
///
/// Returns `None` for non-directive attributes and for directive shapes
/// with nothing to bind (reported, not silent).
pub fn parse(name: &str, value: &str) -> Option<Directive> {
    let sub = name.strip_prefix(DIRECTIVE_PREFIX)?;

    if let Some(event) = sub.strip_prefix(EVENT_MARKER) {
        if event.is_empty() {
            warn!(attribute = name, "event directive has no event type, skipping");
            return None;
        }
        return Some(Directive::Event {
            event: event.to_string(),
            method: value.to_string(),
        });
    }

    if sub != "model" {
        warn!(
            attribute = name,
            "unrecognized directive `{sub}`, binding as a model"
        );
    }

    Some(Directive::Model {
        property: value.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn event_directive() {
        assert_eq!(
            parse("v-on:click", "greet"),
            Some(Directive::Event {
                event: "click".to_string(),
                method: "greet".to_string(),
            })
        );
    }

    #[test]
    fn model_directive() {
        assert_eq!(
            parse("v-model", "name"),
            Some(Directive::Model {
                property: "name".to_string(),
            })
        );
    }

    #[test]
    fn unknown_sub_name_falls_through_to_model() {
        assert_eq!(
            parse("v-bind", "name"),
            Some(Directive::Model {
                property: "name".to_string(),
            })
        );
        // `v-on` without the colon is not an event shape either.
        assert_eq!(
            parse("v-on", "name"),
            Some(Directive::Model {
                property: "name".to_string(),
            })
        );
    }

    #[test]
    fn empty_event_type_is_skipped() {
        assert_eq!(parse("v-on:", "greet"), None);
    }

    #[test]
    fn plain_attributes_are_not_directives() {
        assert!(!is_directive("class"));
        assert_eq!(parse("class", "wide"), None);
    }
}
