//! Catalogue selector
//!
//! Two backing stores hold game records: a flat object-storage catalogue
//! (`/games/*`) and a document-database catalogue (`/games-fs/*`). The client
//! shape is identical; only the path family and a few capabilities differ.

use std::fmt;

/// Which backing store a request or view targets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Catalogue {
    /// Object-storage backed catalogue (`/games`)
    Storage,
    /// Document-database backed catalogue (`/games-fs`)
    Document,
}

/// Optional features only some catalogues expose
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Capability {
    /// `GET {prefix}/search?platform=&query=|tag=`
    Search,
    /// `GET {prefix}/tag-stats?platform=`
    TagStats,
    /// Records carry a last-update timestamp worth showing
    Timestamps,
}

impl Catalogue {
    pub const ALL: [Catalogue; 2] = [Catalogue::Storage, Catalogue::Document];

    /// Path family under the API base URL
    pub fn path_prefix(self) -> &'static str {
        match self {
            Catalogue::Storage => "games",
            Catalogue::Document => "games-fs",
        }
    }

    pub fn supports(self, capability: Capability) -> bool {
        match self {
            Catalogue::Storage => false,
            Catalogue::Document => matches!(
                capability,
                Capability::Search | Capability::TagStats | Capability::Timestamps
            ),
        }
    }

    /// Short label used in tab titles
    pub fn label(self) -> &'static str {
        match self {
            Catalogue::Storage => "Storage",
            Catalogue::Document => "Document",
        }
    }

    /// Stable index for per-catalogue arrays
    pub fn index(self) -> usize {
        match self {
            Catalogue::Storage => 0,
            Catalogue::Document => 1,
        }
    }
}

impl fmt::Display for Catalogue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.path_prefix())
    }
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Capability::Search => write!(f, "search"),
            Capability::TagStats => write!(f, "tag statistics"),
            Capability::Timestamps => write!(f, "timestamps"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_document_catalogue_has_extras() {
        for cap in [Capability::Search, Capability::TagStats, Capability::Timestamps] {
            assert!(!Catalogue::Storage.supports(cap));
            assert!(Catalogue::Document.supports(cap));
        }
    }

    #[test]
    fn test_indices_are_distinct() {
        assert_eq!(Catalogue::Storage.index(), 0);
        assert_eq!(Catalogue::Document.index(), 1);
        assert_eq!(Catalogue::Document.path_prefix(), "games-fs");
    }
}
