//! Index descriptor expansion.
//!
//! Expands declarative [`IndexSpec`]s into the driver's `IndexModel`. The
//! expansion is a pure function: the same spec always produces the same
//! model, so re-running setup at every startup is safe.

use gazetteer_core::{IndexKind, IndexSpec};
use mongodb::bson::{Bson, Document as BsonDocument};
use mongodb::options::IndexOptions;
use mongodb::IndexModel;

/// Expand one index spec into a driver index model.
///
/// This backend registers an expansion rule for every [`IndexKind`]:
/// geo kinds become the server's `2d`/`2dsphere` index types, the plain
/// kinds become single-field `1`/`-1` indexes. The descriptor's name is
/// carried into the model so repeated creation is idempotent on the server
/// side.
pub fn index_model_for(spec: &IndexSpec) -> IndexModel {
    let key: Bson = match spec.kind {
        IndexKind::Geo2d => Bson::String("2d".to_string()),
        IndexKind::Geo2dSphere => Bson::String("2dsphere".to_string()),
        IndexKind::Ascending => Bson::Int32(1),
        IndexKind::Descending => Bson::Int32(-1),
    };

    let mut keys = BsonDocument::new();
    keys.insert(spec.field.clone(), key);

    IndexModel::builder()
        .keys(keys)
        .options(IndexOptions::builder().name(spec.name.clone()).build())
        .build()
}
