//! Ventures, aka projects, and the payloads used to create and modify them.

use crate::validation::{split_csv, strip_whitespace, ValidationError, Violations};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

const MSG_DESCRIPTION: &str = "Ventures must have a description.";
const MSG_STATE: &str = "Ventures must have a state.";
const MSG_ID: &str = "Ventures must have a positive integer ID.";
const MSG_ORDER_IDS: &str = "Child OrderIDs within a Venture must all be positive integers.";

fn is_zero(value: &i64) -> bool {
    *value == 0
}

/// A stored venture.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Venture {
    #[serde(rename = "venture_id", skip_serializing_if = "String::is_empty")]
    pub id: String,

    /// Unix time in milliseconds of the last write
    #[serde(skip_serializing_if = "is_zero")]
    pub last_modified: i64,

    pub description: String,

    #[serde(skip_serializing_if = "String::is_empty")]
    pub order_ids: String,

    pub state: String,

    pub is_alive: bool,

    #[serde(skip_serializing_if = "String::is_empty")]
    pub extra: String,
}

impl Venture {
    /// Remove redundant whitespace except where it is allowed.
    pub fn clean(&mut self) {
        self.id = self.id.trim().to_string();
        self.description = self.description.trim().to_string();
        self.order_ids = strip_whitespace(&self.order_ids);
        self.state = self.state.trim().to_string();
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        let mut violations = Violations::new();
        violations.require_non_empty(&self.description, MSG_DESCRIPTION);
        violations.require_positive_int(&self.id, MSG_ID);
        if !self.order_ids.is_empty() {
            violations.require_positive_int_csv(&self.order_ids, MSG_ORDER_IDS);
        }
        violations.require_non_empty(&self.state, MSG_STATE);
        violations.into_result()
    }
}

/// Payload for creating a venture.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NewVenture {
    pub description: String,
    pub order_ids: String,
    pub state: String,
    pub extra: String,
}

impl NewVenture {
    pub fn clean(&mut self) {
        self.description = self.description.trim().to_string();
        self.order_ids = strip_whitespace(&self.order_ids);
        self.state = self.state.trim().to_string();
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        let mut violations = Violations::new();
        violations.require_non_empty(&self.description, MSG_DESCRIPTION);
        if !self.order_ids.is_empty() {
            violations.require_positive_int_csv(&self.order_ids, MSG_ORDER_IDS);
        }
        violations.require_non_empty(&self.state, MSG_STATE);
        violations.into_result()
    }

    /// The living venture this payload becomes once it has an ID.
    pub fn into_venture(self, id: String, last_modified: i64) -> Venture {
        Venture {
            id,
            last_modified,
            description: self.description,
            order_ids: self.order_ids,
            state: self.state,
            is_alive: true,
            extra: self.extra,
        }
    }
}

/// A venture field that may be targeted by a [`ModVenture`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VentureProperty {
    Description,
    OrderIds,
    State,
    IsAlive,
    Extra,
}

impl VentureProperty {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Description => "description",
            Self::OrderIds => "order_ids",
            Self::State => "state",
            Self::IsAlive => "is_alive",
            Self::Extra => "extra",
        }
    }
}

impl fmt::Display for VentureProperty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for VentureProperty {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "description" => Ok(Self::Description),
            "order_ids" => Ok(Self::OrderIds),
            "state" => Ok(Self::State),
            "is_alive" => Ok(Self::IsAlive),
            "extra" => Ok(Self::Extra),
            other => Err(other.to_string()),
        }
    }
}

/// Payload applying the same property values to several ventures.
///
/// `ids` and `props` are both CSVs; only the properties named in `props` are
/// copied from `values`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModVenture {
    pub ids: String,
    pub props: String,
    pub values: Venture,
}

impl ModVenture {
    pub fn clean(&mut self) {
        self.ids = strip_whitespace(&self.ids);
        self.props = strip_whitespace(&self.props);
        self.values.clean();
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        let mut violations = Violations::new();
        violations.require_positive_int_csv(
            &self.ids,
            "The IDs of the Ventures to modify must all be positive integers.",
        );

        if self.props.is_empty() {
            violations.push("At least one property to modify must be named.");
        }
        for prop in split_csv(&self.props) {
            if let Err(unknown) = prop.parse::<VentureProperty>() {
                violations.push(format!("'{}' is not a modifiable Venture property.", unknown));
            }
        }

        violations.into_result()
    }

    pub fn id_list(&self) -> Vec<String> {
        split_csv(&self.ids)
    }

    /// Targeted properties; unknown names are skipped, `validate` reports them.
    pub fn properties(&self) -> Vec<VentureProperty> {
        split_csv(&self.props)
            .iter()
            .filter_map(|prop| prop.parse().ok())
            .collect()
    }

    /// Copy the targeted values onto `venture`.
    pub fn apply(&self, venture: &mut Venture) {
        for prop in self.properties() {
            match prop {
                VentureProperty::Description => {
                    venture.description = self.values.description.clone()
                }
                VentureProperty::OrderIds => venture.order_ids = self.values.order_ids.clone(),
                VentureProperty::State => venture.state = self.values.state.clone(),
                VentureProperty::IsAlive => venture.is_alive = self.values.is_alive,
                VentureProperty::Extra => venture.extra = self.values.extra.clone(),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn stored_venture() -> Venture {
        Venture {
            id: "1".to_string(),
            last_modified: 1_560_000_000_000,
            description: "White wizard".to_string(),
            order_ids: "1,2".to_string(),
            state: "Not started".to_string(),
            is_alive: true,
            extra: "colour: white; power: 9000".to_string(),
        }
    }

    #[test]
    fn test_venture_json_shape() {
        let value = serde_json::to_value(stored_venture()).unwrap();
        assert_eq!(
            value,
            json!({
                "venture_id": "1",
                "last_modified": 1_560_000_000_000i64,
                "description": "White wizard",
                "order_ids": "1,2",
                "state": "Not started",
                "is_alive": true,
                "extra": "colour: white; power: 9000"
            })
        );
    }

    #[test]
    fn test_venture_omits_empty_optionals() {
        let venture = Venture {
            description: "Green lizard".to_string(),
            state: "In progress".to_string(),
            ..Default::default()
        };
        let value = serde_json::to_value(venture).unwrap();
        assert_eq!(
            value,
            json!({ "description": "Green lizard", "state": "In progress", "is_alive": false })
        );
    }

    #[test]
    fn test_venture_clean_and_validate() {
        let mut venture = stored_venture();
        venture.id = " 1 ".to_string();
        venture.order_ids = " 1, 2 ,3".to_string();
        venture.clean();
        assert_eq!(venture.id, "1");
        assert_eq!(venture.order_ids, "1,2,3");
        assert!(venture.validate().is_ok());
    }

    #[test]
    fn test_venture_validate_reports_every_violation() {
        let venture = Venture {
            order_ids: "invalid".to_string(),
            ..Default::default()
        };
        let err = venture.validate().unwrap_err();
        assert_eq!(err.messages, vec![MSG_DESCRIPTION, MSG_ID, MSG_ORDER_IDS, MSG_STATE]);
    }

    #[test]
    fn test_new_venture_becomes_living_venture() {
        let mut new = NewVenture {
            description: "  A new Venture ".to_string(),
            order_ids: "1, 2, 3".to_string(),
            state: "Not started".to_string(),
            extra: String::new(),
        };
        new.clean();
        assert!(new.validate().is_ok());

        let venture = new.into_venture("6".to_string(), 42);
        assert_eq!(venture.id, "6");
        assert_eq!(venture.description, "A new Venture");
        assert_eq!(venture.order_ids, "1,2,3");
        assert!(venture.is_alive);
    }

    #[test]
    fn test_new_venture_invalid() {
        let new = NewVenture {
            order_ids: "invalid".to_string(),
            ..Default::default()
        };
        let err = new.validate().unwrap_err();
        assert_eq!(err.messages.len(), 3);
    }

    #[test]
    fn test_mod_venture_applies_only_named_props() {
        let mut modification = ModVenture {
            ids: "1, 2".to_string(),
            props: "state, is_alive".to_string(),
            values: Venture {
                description: "ignored".to_string(),
                state: "Finished".to_string(),
                is_alive: false,
                ..Default::default()
            },
        };
        modification.clean();
        assert!(modification.validate().is_ok());
        assert_eq!(modification.id_list(), vec!["1", "2"]);

        let mut venture = stored_venture();
        modification.apply(&mut venture);
        assert_eq!(venture.description, "White wizard");
        assert_eq!(venture.state, "Finished");
        assert!(!venture.is_alive);
    }

    #[test]
    fn test_mod_venture_rejects_unknown_props() {
        let modification = ModVenture {
            ids: "1".to_string(),
            props: "state,colour".to_string(),
            values: Venture::default(),
        };
        let err = modification.validate().unwrap_err();
        assert_eq!(err.messages, vec!["'colour' is not a modifiable Venture property."]);
        assert_eq!(modification.properties(), vec![VentureProperty::State]);
    }

    #[test]
    fn test_mod_venture_requires_ids_and_props() {
        let err = ModVenture::default().validate().unwrap_err();
        assert_eq!(err.messages.len(), 2);
    }
}
