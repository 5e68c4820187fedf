//! Declarative index descriptors.
//!
//! An [`IndexSpec`] maps a document field to a named index. Backends consume
//! these specs in an explicit setup step at startup and expand each one into
//! their native index declaration. The expansion is deterministic: the same
//! spec always produces the same declaration.
//!
//! A backend that has no expansion rule for a given [`IndexKind`] must skip
//! that descriptor with a warning rather than fail; the field is simply
//! left unindexed.

use serde::{Deserialize, Serialize};

/// The kind of index to build over a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IndexKind {
    /// Planar 2D geo index over a coordinate pair.
    Geo2d,
    /// Spherical geo index over GeoJSON-style coordinates.
    Geo2dSphere,
    /// Ascending single-field index.
    Ascending,
    /// Descending single-field index.
    Descending,
}

impl std::fmt::Display for IndexKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            IndexKind::Geo2d => "2d",
            IndexKind::Geo2dSphere => "2dsphere",
            IndexKind::Ascending => "ascending",
            IndexKind::Descending => "descending",
        };
        write!(f, "{}", name)
    }
}

/// A named index over a single document field.
///
/// Index names are unique per collection; the setup step rejects duplicate
/// names rather than silently overwriting an existing declaration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexSpec {
    /// Document field the index covers.
    pub field: String,
    /// Index name, unique within the collection.
    pub name: String,
    /// Index kind to expand into the backend's native declaration.
    pub kind: IndexKind,
}

impl IndexSpec {
    /// Create an index spec for a field.
    pub fn new(field: impl Into<String>, name: impl Into<String>, kind: IndexKind) -> Self {
        Self {
            field: field.into(),
            name: name.into(),
            kind,
        }
    }

    /// Shorthand for a planar 2D geo index.
    pub fn geo2d(field: impl Into<String>, name: impl Into<String>) -> Self {
        Self::new(field, name, IndexKind::Geo2d)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_geo2d_shorthand() {
        let spec = IndexSpec::geo2d("location", "venue_location");
        assert_eq!(spec.field, "location");
        assert_eq!(spec.name, "venue_location");
        assert_eq!(spec.kind, IndexKind::Geo2d);
    }

    #[test]
    fn test_kind_display() {
        assert_eq!(IndexKind::Geo2d.to_string(), "2d");
        assert_eq!(IndexKind::Geo2dSphere.to_string(), "2dsphere");
    }
}
