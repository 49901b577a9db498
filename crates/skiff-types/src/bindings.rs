//! Worker binding model and translation
//!
//! A binding is a named resource reference injected into a Worker at publish
//! time. The serialized shape matches the `bindings` array of the Workers
//! script-upload metadata.

use crate::config::WorkerConfig;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A single Worker binding in metadata wire form
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Binding {
    /// Plain-text environment variable
    PlainText { name: String, text: String },

    /// Secret value, write-only on the platform
    SecretText { name: String, text: String },

    /// KV namespace handle
    KvNamespace { name: String, namespace_id: String },

    /// D1 database handle
    D1 { name: String, id: String },

    /// R2 bucket handle
    R2Bucket { name: String, bucket_name: String },
}

impl Binding {
    /// The name the Worker sees this binding under
    pub fn name(&self) -> &str {
        match self {
            Binding::PlainText { name, .. }
            | Binding::SecretText { name, .. }
            | Binding::KvNamespace { name, .. }
            | Binding::D1 { name, .. }
            | Binding::R2Bucket { name, .. } => name,
        }
    }
}

/// Ordered set of bindings submitted with a Worker upload
///
/// Order is fixed so uploads are deterministic: variables, then secrets,
/// then KV namespaces, then D1 databases, then R2 buckets, each category
/// sorted by binding name. Name uniqueness across categories is the config
/// loader's responsibility.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BindingSet(Vec<Binding>);

impl BindingSet {
    /// Translate a Worker's declared bindings plus the out-of-band secret
    /// map into wire form. Pure: the same inputs always produce the same
    /// sequence.
    pub fn translate(worker: &WorkerConfig, secrets: &BTreeMap<String, String>) -> Self {
        let mut bindings = Vec::new();

        for (name, value) in &worker.vars {
            bindings.push(Binding::PlainText {
                name: name.clone(),
                text: value.as_text(),
            });
        }

        for (name, value) in secrets {
            bindings.push(Binding::SecretText {
                name: name.clone(),
                text: value.clone(),
            });
        }

        for (name, namespace_id) in &worker.kv_namespaces {
            bindings.push(Binding::KvNamespace {
                name: name.clone(),
                namespace_id: namespace_id.clone(),
            });
        }

        for (name, id) in &worker.d1_databases {
            bindings.push(Binding::D1 {
                name: name.clone(),
                id: id.clone(),
            });
        }

        for (name, bucket_name) in &worker.r2_buckets {
            bindings.push(Binding::R2Bucket {
                name: name.clone(),
                bucket_name: bucket_name.clone(),
            });
        }

        BindingSet(bindings)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Binding> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_slice(&self) -> &[Binding] {
        &self.0
    }
}
