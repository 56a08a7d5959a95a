//! Entry-point surface for the orchestrator.
//!
//! [`HookHandler`] abstracts what an entry point does; [`OrchestratorAdapter`]
//! is the ready-to-use implementation wiring the request validator and the
//! orchestrator together. The HTTP router is feature-gated as in the rest of
//! the workspace's deployments.

mod error;
pub use error::ApiError;

mod handler;
pub use handler::HookHandler;

mod adapter;
pub use adapter::OrchestratorAdapter;

#[cfg(feature = "http")]
mod http;

#[cfg(feature = "http")]
pub use http::HttpApi;

#[cfg(feature = "http")]
pub use axum;
