//! Provider seams for the external control planes `cidle` talks to.
//!
//! The cluster, compute, schedule and secret APIs are consumed interfaces;
//! real SDK clients live outside this workspace. [`MemoryCloud`] is an
//! in-memory simulation of all four, used by the orchestrator tests and the
//! local daemon harness.

mod error;
pub use error::CloudError;

mod cluster;
pub use cluster::ClusterApi;

mod instance;
pub use instance::InstanceApi;

mod schedule;
pub use schedule::ScheduleApi;

mod secrets;
pub use secrets::SecretStore;

mod memory;
pub use memory::{CallLog, MemoryCloud};
