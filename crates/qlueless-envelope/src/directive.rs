//! Parsing of the `wrap_with` directive.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Separator between segments of a directive.
pub const SEGMENT_SEPARATOR: char = '.';

/// A field of [`crate::BaseReply`] that may be used as a wrapper layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WrapperProperty {
    Message,
    #[serde(rename = "self")]
    SelfLink,
    Data,
}

impl WrapperProperty {
    /// All recognised properties.
    pub const ALL: [WrapperProperty; 3] = [Self::Message, Self::SelfLink, Self::Data];

    /// Name used both in the directive and as the JSON key.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Message => "message",
            Self::SelfLink => "self",
            Self::Data => "data",
        }
    }
}

impl fmt::Display for WrapperProperty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a string names no wrapper property.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown wrapper property '{0}'")]
pub struct UnknownProperty(pub String);

impl FromStr for WrapperProperty {
    type Err = UnknownProperty;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "message" => Ok(Self::Message),
            "self" => Ok(Self::SelfLink),
            "data" => Ok(Self::Data),
            other => Err(UnknownProperty(other.to_string())),
        }
    }
}

/// Why a directive was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DirectiveFault {
    #[error("directive is empty")]
    Empty,

    #[error("segment {position} is empty")]
    EmptySegment { position: usize },

    #[error("segment {position} ('{segment}') is not one of message, self, data")]
    UnknownSegment { position: usize, segment: String },
}

/// A `wrap_with` value that could not be honoured.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid wrap_with directive '{raw}': {fault}")]
pub struct InvalidDirective {
    raw: String,
    fault: DirectiveFault,
}

impl InvalidDirective {
    fn new(raw: &str, fault: DirectiveFault) -> Self {
        Self {
            raw: raw.to_string(),
            fault,
        }
    }

    /// The directive exactly as the caller sent it.
    pub fn raw(&self) -> &str {
        &self.raw
    }

    pub fn fault(&self) -> &DirectiveFault {
        &self.fault
    }
}

/// Ordered wrapper layers, outermost first.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WrapDirective(Vec<WrapperProperty>);

impl WrapDirective {
    /// Directive that leaves the reply untouched.
    pub fn none() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn properties(&self) -> &[WrapperProperty] {
        &self.0
    }

    pub fn iter(&self) -> std::slice::Iter<'_, WrapperProperty> {
        self.0.iter()
    }
}

impl From<Vec<WrapperProperty>> for WrapDirective {
    fn from(properties: Vec<WrapperProperty>) -> Self {
        Self(properties)
    }
}

impl<'a> IntoIterator for &'a WrapDirective {
    type Item = &'a WrapperProperty;
    type IntoIter = std::slice::Iter<'a, WrapperProperty>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl fmt::Display for WrapDirective {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, property) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, "{}", SEGMENT_SEPARATOR)?;
            }
            write!(f, "{}", property)?;
        }
        Ok(())
    }
}

impl FromStr for WrapDirective {
    type Err = InvalidDirective;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_directive(Some(s))
    }
}

/// Validate the raw `wrap_with` value.
///
/// `None` means the parameter was absent and yields an empty directive. A
/// present value is rejected as a whole if it is empty or if any segment is
/// empty or unrecognised; repeated segments are kept in order.
pub fn parse_directive(raw: Option<&str>) -> Result<WrapDirective, InvalidDirective> {
    let Some(raw) = raw else {
        return Ok(WrapDirective::none());
    };

    if raw.is_empty() {
        return Err(InvalidDirective::new(raw, DirectiveFault::Empty));
    }

    raw.split(SEGMENT_SEPARATOR)
        .enumerate()
        .map(|(position, segment)| {
            if segment.is_empty() {
                return Err(InvalidDirective::new(
                    raw,
                    DirectiveFault::EmptySegment { position },
                ));
            }
            segment.parse::<WrapperProperty>().map_err(|_| {
                InvalidDirective::new(
                    raw,
                    DirectiveFault::UnknownSegment {
                        position,
                        segment: segment.to_string(),
                    },
                )
            })
        })
        .collect::<Result<Vec<_>, _>>()
        .map(WrapDirective)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_property_names_round_trip() {
        for property in WrapperProperty::ALL {
            assert_eq!(property.as_str().parse::<WrapperProperty>(), Ok(property));
        }
    }

    #[test]
    fn test_property_names_are_case_sensitive() {
        assert!("Message".parse::<WrapperProperty>().is_err());
        assert!("SELF".parse::<WrapperProperty>().is_err());
        assert!("".parse::<WrapperProperty>().is_err());
    }

    #[test]
    fn test_absent_directive_is_empty() {
        let directive = parse_directive(None).unwrap();
        assert!(directive.is_empty());
    }

    #[test]
    fn test_empty_directive_is_rejected() {
        let err = parse_directive(Some("")).unwrap_err();
        assert_eq!(err.fault(), &DirectiveFault::Empty);
        assert_eq!(err.raw(), "");
    }

    #[test]
    fn test_empty_segments_are_rejected() {
        let cases = [
            ("message..self", 1),
            (".message", 0),
            ("message.", 1),
            (".", 0),
        ];
        for (raw, position) in cases {
            let err = parse_directive(Some(raw)).unwrap_err();
            assert_eq!(err.fault(), &DirectiveFault::EmptySegment { position }, "{raw}");
            assert_eq!(err.raw(), raw);
        }
    }

    #[test]
    fn test_unknown_segments_are_rejected() {
        let err = parse_directive(Some("invalid")).unwrap_err();
        assert_eq!(
            err.fault(),
            &DirectiveFault::UnknownSegment {
                position: 0,
                segment: "invalid".to_string()
            }
        );

        let err = parse_directive(Some("message.invalid")).unwrap_err();
        assert!(matches!(
            err.fault(),
            DirectiveFault::UnknownSegment { position: 1, .. }
        ));
    }

    #[test]
    fn test_single_segment() {
        let directive = parse_directive(Some("message")).unwrap();
        assert_eq!(directive.properties(), &[WrapperProperty::Message]);
    }

    #[test]
    fn test_segments_keep_order_and_repeats() {
        let directive = parse_directive(Some("message.self")).unwrap();
        assert_eq!(
            directive.properties(),
            &[WrapperProperty::Message, WrapperProperty::SelfLink]
        );

        let directive = parse_directive(Some("data.data.self")).unwrap();
        assert_eq!(
            directive.properties(),
            &[
                WrapperProperty::Data,
                WrapperProperty::Data,
                WrapperProperty::SelfLink
            ]
        );
    }

    #[test]
    fn test_long_directives_are_accepted() {
        let raw = vec!["data"; 65].join(".");
        let directive = parse_directive(Some(&raw)).unwrap();
        assert_eq!(directive.len(), 65);
        assert!(directive.iter().all(|p| *p == WrapperProperty::Data));
    }

    #[test]
    fn test_display_matches_input() {
        let directive: WrapDirective = "self.data.message".parse().unwrap();
        assert_eq!(directive.to_string(), "self.data.message");
    }

    #[test]
    fn test_error_message_names_input() {
        let err = parse_directive(Some("abc.efg")).unwrap_err();
        assert!(err.to_string().contains("abc.efg"));
    }

    fn property_strategy() -> impl Strategy<Value = WrapperProperty> {
        prop_oneof![
            Just(WrapperProperty::Message),
            Just(WrapperProperty::SelfLink),
            Just(WrapperProperty::Data),
        ]
    }

    proptest! {
        #[test]
        fn property_valid_directives_parse_in_order(
            properties in proptest::collection::vec(property_strategy(), 1..8)
        ) {
            let raw = properties
                .iter()
                .map(|p| p.as_str())
                .collect::<Vec<_>>()
                .join(".");
            let first = parse_directive(Some(&raw)).unwrap();
            let second = parse_directive(Some(&raw)).unwrap();
            prop_assert_eq!(first.properties(), properties.as_slice());
            prop_assert_eq!(first, second);
        }

        #[test]
        fn property_unknown_segment_poisons_directive(
            properties in proptest::collection::vec(property_strategy(), 0..5),
            insert_at in 0usize..6,
            junk in "[a-z]{1,8}",
        ) {
            prop_assume!(junk.parse::<WrapperProperty>().is_err());
            let mut segments: Vec<String> =
                properties.iter().map(|p| p.as_str().to_string()).collect();
            let at = insert_at.min(segments.len());
            segments.insert(at, junk);
            let raw = segments.join(".");
            let is_unknown = matches!(
                parse_directive(Some(&raw)).unwrap_err().fault(),
                DirectiveFault::UnknownSegment { .. }
            );
            prop_assert!(is_unknown);
        }

        #[test]
        fn property_empty_segment_poisons_directive(
            properties in proptest::collection::vec(property_strategy(), 1..5),
            insert_at in 0usize..6,
        ) {
            let mut segments: Vec<&str> = properties.iter().map(|p| p.as_str()).collect();
            let at = insert_at.min(segments.len());
            segments.insert(at, "");
            let raw = segments.join(".");
            let is_empty_segment = matches!(
                parse_directive(Some(&raw)).unwrap_err().fault(),
                DirectiveFault::EmptySegment { .. }
            );
            prop_assert!(is_empty_segment);
        }
    }
}
