//! API request handlers

mod content;
mod home;
mod ventures;
mod work_items;

pub use content::*;
pub use home::*;
pub use ventures::*;
pub use work_items::*;

use crate::error::{ApiError, ApiResult};
use axum::body::Bytes;
use serde::de::DeserializeOwned;

/// Decode a JSON request body.
pub(crate) fn decode_body<T: DeserializeOwned>(body: &Bytes, what: &str) -> ApiResult<T> {
    serde_json::from_slice(body)
        .map_err(|e| ApiError::BadRequest(format!("Unable to decode request body as {}: {}", what, e)))
}
