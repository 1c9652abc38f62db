use crate::dashboard::domain::DependencyRecord;
use crate::dashboard::services::grouping::FACET_ALL;
use crate::shared::Result;

/// Maximum length of a search term
const MAX_SEARCH_LENGTH: usize = 255;

/// DependencyFilter - Narrows a dependency table by name, type and source
///
/// The name test is a case-insensitive substring match. Type and source are
/// exact matches, and the facet value `"all"` turns a facet off.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DependencyFilter {
    search: String,
    dependency_type: String,
    source: String,
}

impl DependencyFilter {
    /// Creates a new DependencyFilter
    ///
    /// # Arguments
    /// * `search` - Name substring; empty matches everything
    /// * `dependency_type` - Exact type, or `"all"`
    /// * `source` - Exact source, or `"all"`
    ///
    /// # Errors
    /// Returns an error if the search term is unreasonably long or contains
    /// control characters.
    pub fn new(
        search: impl Into<String>,
        dependency_type: impl Into<String>,
        source: impl Into<String>,
    ) -> Result<Self> {
        let search = search.into();
        if search.chars().count() > MAX_SEARCH_LENGTH {
            anyhow::bail!(
                "Search term is too long: {} characters (maximum: {})",
                search.chars().count(),
                MAX_SEARCH_LENGTH
            );
        }
        if search.chars().any(char::is_control) {
            anyhow::bail!("Search term contains control characters");
        }

        Ok(Self {
            search: search.to_lowercase(),
            dependency_type: dependency_type.into(),
            source: source.into(),
        })
    }

    /// Filter that lets every record through.
    pub fn all() -> Self {
        Self {
            search: String::new(),
            dependency_type: FACET_ALL.to_string(),
            source: FACET_ALL.to_string(),
        }
    }

    pub fn matches(&self, dependency: &DependencyRecord) -> bool {
        let name_matches =
            self.search.trim().is_empty() || dependency.name.to_lowercase().contains(&self.search);
        let type_matches =
            self.dependency_type == FACET_ALL || dependency.dependency_type == self.dependency_type;
        let source_matches = self.source == FACET_ALL || dependency.source == self.source;

        name_matches && type_matches && source_matches
    }

    /// Records passing every active facet, in input order.
    pub fn apply(&self, dependencies: &[DependencyRecord]) -> Vec<DependencyRecord> {
        dependencies
            .iter()
            .filter(|dep| self.matches(dep))
            .cloned()
            .collect()
    }

    pub fn is_active(&self) -> bool {
        !self.search.trim().is_empty() || self.dependency_type != FACET_ALL || self.source != FACET_ALL
    }
}

impl Default for DependencyFilter {
    fn default() -> Self {
        Self::all()
    }
}
