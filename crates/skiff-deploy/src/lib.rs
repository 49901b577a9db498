//! Skiff Deploy - reconciliation and publication engine
//!
//! Two cooperating components over the API client:
//!
//! - [`ProjectReconciler`] converges a Pages project toward its declared
//!   state: create it, update it in place, or (only with explicit
//!   authorization) delete and recreate it when its source integration
//!   cannot be edited.
//! - [`ArtifactPublisher`] publishes the companion Worker under a
//!   branch-scoped deployment identity with its translated binding set.
//!
//! Control flow is strictly sequential: reconciliation completes, including
//! its confirmatory re-read, before publication starts. Neither component
//! reads ambient environment state; everything arrives as explicit
//! parameters.

#![deny(unsafe_code)]

pub mod build;
pub mod error;
pub mod outputs;
pub mod publisher;
pub mod reconciler;

pub use build::run_build;
pub use error::{DeployError, DeployResult};
pub use outputs::{FileOutputs, MemoryOutputs, OutputSink};
pub use publisher::{ArtifactPublisher, PublishOutcome};
pub use reconciler::{ProjectOutcome, ProjectReconciler, ReconcileAction};
