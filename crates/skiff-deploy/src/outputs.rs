//! Named result outputs
//!
//! A deploy run records its resulting URLs and the computed Worker identity
//! for downstream pipeline steps. Recording is fire-and-forget: a sink
//! never fails the run.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::PathBuf;

/// Sink for named string results produced by a deploy run
pub trait OutputSink {
    /// Record a key/value result
    fn record(&mut self, key: &str, value: &str);
}

/// Appends `key=value` lines to a file, the workflow output-file contract
pub struct FileOutputs {
    path: PathBuf,
}

impl FileOutputs {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl OutputSink for FileOutputs {
    fn record(&mut self, key: &str, value: &str) {
        let written = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .and_then(|mut file| writeln!(file, "{key}={value}"));

        if let Err(error) = written {
            tracing::warn!(key = %key, error = %error, "Failed to record output");
        }
    }
}

/// In-memory sink for tests and dry runs
#[derive(Debug, Default)]
pub struct MemoryOutputs {
    entries: Vec<(String, String)>,
}

impl MemoryOutputs {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> &[(String, String)] {
        &self.entries
    }
}

impl OutputSink for MemoryOutputs {
    fn record(&mut self, key: &str, value: &str) {
        self.entries.push((key.to_string(), value.to_string()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_outputs_append_lines() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("outputs");

        let mut sink = FileOutputs::new(&path);
        sink.record("pages-url", "https://site.pages.dev");
        sink.record("worker-name", "feature-auth-api");

        let contents = std::fs::read_to_string(&path).unwrap();
        assert_eq!(contents, "pages-url=https://site.pages.dev\nworker-name=feature-auth-api\n");
    }

    #[test]
    fn test_file_outputs_never_panic_on_bad_path() {
        let mut sink = FileOutputs::new("/nonexistent-dir/outputs");
        sink.record("pages-url", "https://site.pages.dev");
    }

    #[test]
    fn test_memory_outputs_keep_order() {
        let mut sink = MemoryOutputs::new();
        sink.record("a", "1");
        sink.record("b", "2");

        assert_eq!(
            sink.entries(),
            [("a".to_string(), "1".to_string()), ("b".to_string(), "2".to_string())]
        );
    }
}
