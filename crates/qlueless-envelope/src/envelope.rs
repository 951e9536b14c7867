//! Construction of nested reply envelopes.

use crate::{BaseReply, WrapDirective, WrapperProperty};
use serde::ser::{Serialize, SerializeMap, Serializer};
use serde_json::Value;

/// A reply ready to be serialized as a response body.
#[derive(Debug, Clone, PartialEq)]
pub enum Envelope {
    /// The reply itself, no wrapping requested
    Reply(BaseReply),

    /// `{ property: inner }`
    Layer {
        property: WrapperProperty,
        inner: Box<Envelope>,
    },

    /// A reply field value sitting inside the innermost layer
    Field(Value),
}

impl Envelope {
    fn layer(property: WrapperProperty, inner: Envelope) -> Self {
        Self::Layer {
            property,
            inner: Box::new(inner),
        }
    }

    /// Number of wrapper layers above the innermost value.
    pub fn depth(&self) -> usize {
        let mut depth = 0;
        let mut current = self;
        while let Self::Layer { inner, .. } = current {
            depth += 1;
            current = inner;
        }
        depth
    }

    pub fn to_value(&self) -> serde_json::Result<Value> {
        serde_json::to_value(self)
    }

    /// Walk a serialized envelope back down through `directive`.
    ///
    /// Returns the innermost value, or the whole body when the directive is
    /// empty. `None` if the body does not have the expected shape.
    pub fn locate<'a>(body: &'a Value, directive: &WrapDirective) -> Option<&'a Value> {
        directive
            .iter()
            .try_fold(body, |value, property| value.get(property.as_str()))
    }
}

impl Serialize for Envelope {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Reply(reply) => reply.serialize(serializer),
            Self::Layer { property, inner } => {
                let mut map = serializer.serialize_map(Some(1))?;
                map.serialize_entry(property.as_str(), inner.as_ref())?;
                map.end()
            }
            Self::Field(value) => value.serialize(serializer),
        }
    }
}

/// Fold `directive` over `reply`, innermost layer last.
///
/// `[p1, p2, .., pn]` yields `{p1: {p2: .. {pn: reply.pn}}}`; an empty
/// directive yields the reply unchanged.
pub fn build_envelope(reply: &BaseReply, directive: &WrapDirective) -> Envelope {
    let mut layers = directive.iter().rev();
    let Some(&innermost) = layers.next() else {
        return Envelope::Reply(reply.clone());
    };

    let seed = Envelope::layer(innermost, Envelope::Field(reply.field(innermost)));
    layers.fold(seed, |inner, &property| Envelope::layer(property, inner))
}
