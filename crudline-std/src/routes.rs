//! Named-route table.

use crudline_core::{RoutingError, UrlGenerator};
use indexmap::IndexMap;

/// Route name to URL, implementing [`UrlGenerator`].
#[derive(Debug, Clone, Default)]
pub struct NamedRoutes {
    routes: IndexMap<String, String>,
}

impl NamedRoutes {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a named route.
    pub fn add(mut self, name: impl Into<String>, url: impl Into<String>) -> Self {
        self.routes.insert(name.into(), url.into());
        self
    }

    /// Add the collection routes of a resource: `<base>.index` and
    /// `<base>.create`.
    pub fn resource(self, base: &str, path: &str) -> Self {
        let path = path.trim_end_matches('/');
        self.add(format!("{base}.index"), path)
            .add(format!("{base}.create"), format!("{path}/create"))
    }
}

impl UrlGenerator for NamedRoutes {
    fn route(&self, name: &str) -> Result<String, RoutingError> {
        self.routes
            .get(name)
            .cloned()
            .ok_or_else(|| RoutingError::UnknownRoute(name.to_string()))
    }
}
