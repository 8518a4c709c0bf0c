//! V1 API handlers.

mod chat;
mod models;

pub use chat::chat;
pub use models::list_models;
