//! HTTP access to the generation services.
//!
//! Both backends speak plain JSON over HTTP. The main entry point is [`ApiClient`].

mod client;

// Re-export public API
pub use client::ApiClient;
