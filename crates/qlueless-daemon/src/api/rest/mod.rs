//! REST resources and the reply presentation shared by their handlers

pub mod handlers;
pub mod reply;
pub mod router;
pub mod state;

pub use reply::{Reply, ReplyContext};
pub use router::create_router;
pub use state::AppState;
