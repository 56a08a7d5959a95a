//! Orchestration logic for parking and waking the CI server.
//!
//! The start path checks cluster state, wakes the backing instance, waits for
//! it to report running, launches the CI task and arms a stop schedule. The
//! stop path tears both down again. All provider access goes through the
//! seams in `cidle-cloud`, so every piece here is testable against the
//! in-memory backend.

mod config;
pub use config::OrchestratorConfig;

mod error;
pub use error::OrchestratorError;

mod clock;
pub use clock::{Clock, FixedClock, SystemClock};

mod auth;
pub use auth::SignatureValidator;

mod locate;
pub use locate::InstanceLocator;

mod schedule;
pub use schedule::StopScheduler;

mod orchestrate;
pub use orchestrate::Orchestrator;
