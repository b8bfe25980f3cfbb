use std::collections::HashMap;
use std::sync::Arc;

use docket_types::{Artefact, ListType};

use crate::error::FileResult;

/// The byte bundles one rendering pass produces.
///
/// An empty/absent bundle means "not applicable for this list type", not an
/// error: some list types never render a spreadsheet, single-language
/// publications never render a secondary PDF.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenderedFiles {
    pub primary: Vec<u8>,
    pub secondary_language: Option<Vec<u8>>,
    pub spreadsheet: Option<Vec<u8>>,
}

/// Rendering collaborator.
///
/// Per-list-type formatting rules live outside this crate; implementations
/// turn a committed payload into the derived byte bundles. Returning
/// `Ok(None)` declares the artefact non-renderable (again: not an error).
pub trait FileGenerator: Send + Sync {
    fn generate(&self, artefact: &Artefact, payload: &[u8]) -> FileResult<Option<RenderedFiles>>;
}

/// Closed per-list-type strategy table, resolved once at startup.
///
/// Every list type maps to a generator; types without an explicit entry use
/// the default. Lookups after construction never allocate and never miss.
pub struct GeneratorTable {
    entries: HashMap<ListType, Arc<dyn FileGenerator>>,
    default: Arc<dyn FileGenerator>,
}

impl GeneratorTable {
    /// Build a table where every list type uses `default`.
    pub fn new(default: Arc<dyn FileGenerator>) -> Self {
        Self {
            entries: HashMap::new(),
            default,
        }
    }

    /// Register a list-type-specific generator.
    pub fn with(mut self, list_type: ListType, generator: Arc<dyn FileGenerator>) -> Self {
        self.entries.insert(list_type, generator);
        self
    }

    /// The generator for `list_type`.
    pub fn resolve(&self, list_type: ListType) -> &Arc<dyn FileGenerator> {
        self.entries.get(&list_type).unwrap_or(&self.default)
    }

    /// Number of list-type-specific entries (excluding the default).
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl std::fmt::Debug for GeneratorTable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeneratorTable")
            .field("specialised", &self.entries.len())
            .finish()
    }
}
