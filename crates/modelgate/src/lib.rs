//! modelgate - Route chat completions to hosted LLM providers, with a
//! deterministic offline reply when a provider cannot be reached.

pub mod build_info;
pub mod config;
pub mod fallback;
pub mod gateway;
pub mod handlers;
pub mod llm;
pub mod response;
pub mod server;
