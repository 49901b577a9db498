//! Skiff Types - shared configuration and naming model
//!
//! These types describe the desired state of a deployment: a Cloudflare
//! Pages project wired to a GitHub repository, and an optional companion
//! Worker published under a branch-scoped identity.
//!
//! ## Key Concepts
//!
//! - **PagesConfig**: desired state for the Pages project
//! - **WorkerConfig**: desired state for the companion Worker
//! - **Binding**: a named resource injected into the Worker at publish time
//! - **Deployment identity**: the deterministic, branch-aware name a Worker
//!   is published under
//!
//! Everything here is pure data plus pure functions; no I/O happens in this
//! crate. The config loader in `skiff-cli` validates shape at the boundary,
//! so consumers can assume well-formed values.

#![deny(unsafe_code)]

pub mod bindings;
pub mod config;
pub mod identity;

// Re-export main types
pub use bindings::{Binding, BindingSet};
pub use config::{BuildSettings, PagesConfig, VarValue, WorkerConfig};
pub use identity::{deployment_identity, normalize_branch};
