//! The venue document model.

use serde::{Deserialize, Serialize};

use crate::geo::GeoPoint;
use crate::index::IndexSpec;
use crate::store::Document;

/// A venue: an address with an optional 2D location.
///
/// Immutable after construction as far as callers are concerned; the store
/// assigns the identifier on first write and it never changes afterwards.
/// Construct either via `Venue::default()` (fields populated later by the
/// mapping layer) or [`Venue::new`] with an address and a point. The type
/// performs no validation of its own.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Venue {
    /// Store-assigned identifier, absent until the first write.
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// Free-text address.
    #[serde(default)]
    pub address: String,

    /// Location of the venue, indexed for planar geo queries.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<GeoPoint>,
}

impl Venue {
    /// Create an unsaved venue from an address and a location.
    ///
    /// Reading the fields back returns exactly the supplied values; no
    /// normalization happens here.
    pub fn new(address: impl Into<String>, location: GeoPoint) -> Self {
        Self {
            id: None,
            address: address.into(),
            location: Some(location),
        }
    }
}

impl Document for Venue {
    fn collection_name() -> &'static str {
        "venues"
    }

    fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    fn set_id(&mut self, id: String) {
        self.id = Some(id);
    }

    fn index_specs() -> Vec<IndexSpec> {
        vec![IndexSpec::geo2d("location", "venue_location")]
    }
}
