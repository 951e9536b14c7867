use crate::WrapperProperty;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// The unwrapped reply produced by a request handler.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BaseReply {
    /// Human readable summary of the outcome
    pub message: String,

    /// Path and query of the request being answered
    #[serde(rename = "self")]
    pub self_link: String,

    /// Payload, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

impl BaseReply {
    pub fn new(message: impl Into<String>, self_link: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            self_link: self_link.into(),
            data: None,
        }
    }

    pub fn with_data(mut self, data: Value) -> Self {
        self.data = Some(data);
        self
    }

    /// Value of the field named by `property`.
    ///
    /// An absent payload is reported as JSON `null`.
    pub fn field(&self, property: WrapperProperty) -> Value {
        match property {
            WrapperProperty::Message => Value::String(self.message.clone()),
            WrapperProperty::SelfLink => Value::String(self.self_link.clone()),
            WrapperProperty::Data => self.data.clone().unwrap_or(Value::Null),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_absent_data_is_not_serialized() {
        let reply = BaseReply::new("Resource not found", "/nowhere");
        assert_eq!(
            serde_json::to_value(&reply).unwrap(),
            json!({ "message": "Resource not found", "self": "/nowhere" })
        );
    }

    #[test]
    fn test_decode_reply_without_data() {
        let reply: BaseReply =
            serde_json::from_str(r#"{"message":"Cheese","self":"/?wrap"}"#).unwrap();
        assert_eq!(reply, BaseReply::new("Cheese", "/?wrap"));
    }

    #[test]
    fn test_field_lookup() {
        let reply = BaseReply::new("Found order", "/orders/3").with_data(json!([1, 2]));
        assert_eq!(reply.field(WrapperProperty::Message), json!("Found order"));
        assert_eq!(reply.field(WrapperProperty::SelfLink), json!("/orders/3"));
        assert_eq!(reply.field(WrapperProperty::Data), json!([1, 2]));
        assert_eq!(
            BaseReply::new("m", "/").field(WrapperProperty::Data),
            Value::Null
        );
    }
}
