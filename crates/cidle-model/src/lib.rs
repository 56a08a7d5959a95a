//! Domain types shared across the `cidle` workspace.
//!
//! Everything here describes external control-plane state (tasks, instances,
//! schedule rules); this program owns none of it and only requests
//! transitions.

mod domain;
pub use domain::*;
