//! Work items: the things and orders moving along the assembly line.

use crate::validation::{is_positive_int, ValidationError, Violations};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Which collection a work item belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WorkItemKind {
    Thing,
    Order,
}

impl WorkItemKind {
    /// Capitalised singular used in client messages.
    pub fn noun(self) -> &'static str {
        match self {
            Self::Thing => "Thing",
            Self::Order => "Order",
        }
    }

    pub fn plural(self) -> &'static str {
        match self {
            Self::Thing => "things",
            Self::Order => "orders",
        }
    }
}

impl fmt::Display for WorkItemKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.noun())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorkItem {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub id: String,

    pub description: String,

    #[serde(skip_serializing_if = "String::is_empty")]
    pub parent_id: String,

    pub status_id: String,

    #[serde(skip_serializing_if = "String::is_empty")]
    pub additional: String,
}

impl WorkItem {
    pub fn new(description: impl Into<String>, status_id: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            status_id: status_id.into(),
            ..Default::default()
        }
    }

    pub fn with_parent(mut self, parent_id: impl Into<String>) -> Self {
        self.parent_id = parent_id.into();
        self
    }

    pub fn with_additional(mut self, additional: impl Into<String>) -> Self {
        self.additional = additional.into();
        self
    }

    pub fn clean(&mut self) {
        self.id = self.id.trim().to_string();
        self.description = self.description.trim().to_string();
        self.parent_id = self.parent_id.trim().to_string();
        self.status_id = self.status_id.trim().to_string();
    }

    /// Check a payload submitted by a client; IDs are assigned by the server.
    pub fn validate_new(&self, kind: WorkItemKind) -> Result<(), ValidationError> {
        let mut violations = Violations::new();
        violations.require_non_empty(
            &self.description,
            &format!("{}s must have a description.", kind.noun()),
        );
        if !self.id.is_empty() {
            violations.push(format!("New {}s must not specify an ID.", kind.plural()));
        }
        if !self.parent_id.is_empty() && !is_positive_int(&self.parent_id) {
            violations.push(format!(
                "Parent IDs of {} must be positive integers.",
                kind.plural()
            ));
        }
        violations.require_non_empty(
            &self.status_id,
            &format!("{}s must have a status.", kind.noun()),
        );
        violations.into_result()
    }
}

/// Work items present in a freshly started service.
pub fn dummy_work_items() -> Vec<WorkItem> {
    vec![
        WorkItem::new(
            "# Outline the saga\nCreate a rough outline of the new saga.",
            "in_progress",
        ),
        WorkItem::new("# Name the saga\nThink of a name for the saga.", "potential")
            .with_parent("1"),
        WorkItem::new("# Outline the first chapter", "delivered")
            .with_parent("1")
            .with_additional("archive_note:Done but not a compelling start"),
        WorkItem::new("# Outline the second chapter", "in_progress").with_parent("1"),
    ]
}
