use async_trait::async_trait;
use inventory_lens::prelude::*;
use serde_json::Value;
use std::collections::HashMap;
use std::path::Path;
use std::sync::{Arc, Mutex};

/// Mock FixtureSource serving in-memory documents
///
/// Kinds without a document fail like a 404; kinds marked failing fail
/// like a 500. Every requested cache-bust token is recorded.
#[derive(Default, Clone)]
pub struct MockFixtureSource {
    fixtures: HashMap<FixtureKind, Value>,
    failing: Vec<FixtureKind>,
    pub requests: Arc<Mutex<Vec<(FixtureKind, u64)>>>,
}

impl MockFixtureSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads every `*.json` fixture present in `dir`.
    pub fn from_dir(dir: &Path) -> Self {
        let mut source = Self::new();
        for kind in FixtureKind::ALL {
            if let Ok(content) = std::fs::read_to_string(dir.join(kind.file_name())) {
                source = source.with_fixture(kind, serde_json::from_str(&content).unwrap());
            }
        }
        source
    }

    pub fn with_fixture(mut self, kind: FixtureKind, value: Value) -> Self {
        self.fixtures.insert(kind, value);
        self
    }

    pub fn failing(mut self, kind: FixtureKind) -> Self {
        self.failing.push(kind);
        self
    }

    pub fn request_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

#[async_trait]
impl FixtureSource for MockFixtureSource {
    async fn fetch_fixture(&self, kind: FixtureKind, cache_bust: u64) -> Result<Value> {
        self.requests.lock().unwrap().push((kind, cache_bust));
        if self.failing.contains(&kind) {
            anyhow::bail!("{} returned status code 500", kind.resource_path());
        }
        match self.fixtures.get(&kind) {
            Some(value) => Ok(value.clone()),
            None => anyhow::bail!("{} returned status code 404", kind.resource_path()),
        }
    }

    fn describe(&self) -> String {
        "mock fixtures".to_string()
    }
}
