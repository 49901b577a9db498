//! Skiff API - Cloudflare v4 API client
//!
//! Thin typed wrapper over the account-scoped endpoints skiff drives: Pages
//! project CRUD, Worker script upsert, and the workers.dev subdomain lookup.
//! A missing resource is reported as [`ApiError::NotFound`], distinguishable
//! from every other failure, so the reconciler can branch on it; all other
//! platform errors preserve the structured detail the API attached.

#![deny(unsafe_code)]

pub mod client;
pub mod error;
pub mod models;

pub use client::CloudflareClient;
pub use error::{ApiError, ApiMessage, ApiResult};
pub use models::{
    BuildConfig, Envelope, PagesProject, ProjectRequest, ProjectSource, SourceConfig, WorkerUpload,
};
