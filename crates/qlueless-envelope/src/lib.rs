//! Qlueless reply envelopes.
//!
//! Every endpoint answers with a [`BaseReply`]: a human readable message, the
//! request locator (`self`) and an optional payload. Callers may ask for that
//! reply to be nested inside named layers with the `wrap_with` query
//! parameter, e.g. `?wrap_with=message.self` produces
//! `{"message": {"self": "/orders/3"}}`.
//!
//! - [`parse_directive`] validates the raw parameter into a [`WrapDirective`]
//! - [`build_envelope`] folds the directive over the reply
//! - [`wrap`] does both in one call

#![deny(unsafe_code)]

mod directive;
mod envelope;
mod reply;

pub use directive::{
    parse_directive, DirectiveFault, InvalidDirective, UnknownProperty, WrapDirective,
    WrapperProperty, SEGMENT_SEPARATOR,
};
pub use envelope::{build_envelope, Envelope};
pub use reply::BaseReply;

/// Name of the query parameter carrying the wrap directive.
pub const WRAP_WITH_PARAM: &str = "wrap_with";

/// Parse `raw` and build the envelope for `reply`.
///
/// `raw` is `None` when the request carried no `wrap_with` parameter, in which
/// case the reply is returned unwrapped.
pub fn wrap(reply: &BaseReply, raw: Option<&str>) -> Result<Envelope, InvalidDirective> {
    let directive = parse_directive(raw)?;
    Ok(build_envelope(reply, &directive))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn found_order() -> BaseReply {
        BaseReply::new("Found order", "/orders/3").with_data(json!({ "id": 3 }))
    }

    #[test]
    fn test_wrap_without_directive_returns_reply() {
        let envelope = wrap(&found_order(), None).unwrap();
        assert_eq!(
            envelope.to_value().unwrap(),
            json!({ "message": "Found order", "self": "/orders/3", "data": { "id": 3 } })
        );
    }

    #[test]
    fn test_wrap_single_property() {
        let envelope = wrap(&found_order(), Some("message")).unwrap();
        assert_eq!(envelope.to_value().unwrap(), json!({ "message": "Found order" }));
    }

    #[test]
    fn test_wrap_two_properties() {
        let envelope = wrap(&found_order(), Some("message.self")).unwrap();
        assert_eq!(envelope.to_value().unwrap(), json!({ "message": { "self": "/orders/3" } }));
    }

    #[test]
    fn test_wrap_rejects_invalid_directives() {
        for raw in ["", "message..self", "invalid", "message.invalid"] {
            let err = wrap(&found_order(), Some(raw)).unwrap_err();
            assert_eq!(err.raw(), raw);
        }
    }

    #[test]
    fn test_wrap_accepts_long_directives() {
        let raw = vec!["data"; 65].join(".");
        let envelope = wrap(&found_order(), Some(&raw)).unwrap();
        assert_eq!(envelope.depth(), 65);
    }
}
