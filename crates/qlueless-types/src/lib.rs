//! Qlueless domain types.
//!
//! Entities served by the API and the validation rules applied to client
//! input before it reaches storage.

#![deny(unsafe_code)]

pub mod validation;
pub mod venture;
pub mod work_item;

pub use validation::{ValidationError, Violations};
pub use venture::{ModVenture, NewVenture, Venture, VentureProperty};
pub use work_item::{dummy_work_items, WorkItem, WorkItemKind};
