use serde::Serialize;
use serde_json::{json, Value};
use std::collections::BTreeMap;
use std::fmt;

/// The ten JSON documents the dashboard is built from.
///
/// Three of them are required: if any of those fails to load the whole batch
/// is treated as failed. The rest are optional and simply absent on failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FixtureKind {
    MicroservicesInventory,
    RepoActivity,
    ImageInventory,
    SecurityFindings,
    OpensourceSecurity,
    BaseImages,
    Technologies,
    Dependencies,
    ServiceOwner,
    ServiceInventory,
}

impl FixtureKind {
    pub const ALL: [FixtureKind; 10] = [
        FixtureKind::MicroservicesInventory,
        FixtureKind::RepoActivity,
        FixtureKind::ImageInventory,
        FixtureKind::SecurityFindings,
        FixtureKind::OpensourceSecurity,
        FixtureKind::BaseImages,
        FixtureKind::Technologies,
        FixtureKind::Dependencies,
        FixtureKind::ServiceOwner,
        FixtureKind::ServiceInventory,
    ];

    /// File name under the `data` directory.
    pub fn file_name(self) -> &'static str {
        match self {
            FixtureKind::MicroservicesInventory => "microservices_inventory.json",
            FixtureKind::RepoActivity => "repo_activity_summary.json",
            FixtureKind::ImageInventory => "image_inventory.json",
            FixtureKind::SecurityFindings => "security_findings.json",
            FixtureKind::OpensourceSecurity => "opensource_security.json",
            FixtureKind::BaseImages => "base_images_data.json",
            FixtureKind::Technologies => "technologies_data.json",
            FixtureKind::Dependencies => "dependencies_data.json",
            FixtureKind::ServiceOwner => "service_owner_data.json",
            FixtureKind::ServiceInventory => "service_inventory.json",
        }
    }

    /// Same-origin resource path, e.g. `/data/image_inventory.json`.
    pub fn resource_path(self) -> String {
        format!("/data/{}", self.file_name())
    }

    pub fn is_required(self) -> bool {
        matches!(
            self,
            FixtureKind::MicroservicesInventory
                | FixtureKind::RepoActivity
                | FixtureKind::ImageInventory
        )
    }

    pub fn required() -> impl Iterator<Item = FixtureKind> {
        Self::ALL.into_iter().filter(|kind| kind.is_required())
    }

    pub fn optional() -> impl Iterator<Item = FixtureKind> {
        Self::ALL.into_iter().filter(|kind| !kind.is_required())
    }

    /// Well-typed empty document substituted for a required fixture when the
    /// batch fails, so every downstream path resolves to an empty collection.
    /// Optional fixtures have no empty form; they are absent instead.
    pub fn empty_fixture(self) -> Option<Value> {
        match self {
            FixtureKind::MicroservicesInventory => Some(json!({
                "services": {"services": []},
                "technologies": {"languages": {}},
                "dependencies": {},
                "apis": {"endpoints": []}
            })),
            FixtureKind::RepoActivity => Some(json!({"summary": {}})),
            FixtureKind::ImageInventory => Some(json!({"images": [], "infrastructure": {}})),
            _ => None,
        }
    }
}

impl fmt::Display for FixtureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.resource_path())
    }
}

/// Raw fixtures from one accepted load, keyed by kind.
///
/// Replaced wholesale by each refresh; never merged.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FixtureSet {
    slots: BTreeMap<FixtureKind, Value>,
}

impl FixtureSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// A set holding only the empty required fixtures.
    pub fn with_empty_required() -> Self {
        let mut set = Self::new();
        for kind in FixtureKind::required() {
            if let Some(empty) = kind.empty_fixture() {
                set.insert(kind, empty);
            }
        }
        set
    }

    /// Stores a fixture. `null` documents are treated as absent.
    pub fn insert(&mut self, kind: FixtureKind, value: Value) {
        if value.is_null() {
            self.slots.remove(&kind);
        } else {
            self.slots.insert(kind, value);
        }
    }

    pub fn with(mut self, kind: FixtureKind, value: Value) -> Self {
        self.insert(kind, value);
        self
    }

    pub fn get(&self, kind: FixtureKind) -> Option<&Value> {
        self.slots.get(&kind)
    }

    pub fn contains(&self, kind: FixtureKind) -> bool {
        self.slots.contains_key(&kind)
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn kinds(&self) -> impl Iterator<Item = FixtureKind> + '_ {
        self.slots.keys().copied()
    }
}
