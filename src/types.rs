//! Public types for the scenedex API.

use std::collections::BTreeMap;
use std::path::PathBuf;

use serde::Serialize;

use crate::footprint::Coord;

/// Descriptor for one eligible metadata file, produced by the crawler and
/// consumed by the builder. Immutable once created.
#[derive(Clone, Debug, Serialize)]
pub struct ItemDescriptor {
    /// Path to the metadata file (manifest.safe, *.dim, ...).
    pub path: PathBuf,
    /// File name shown in the host catalog.
    pub display_name: String,
    /// Routing tag for the host's processing path (e.g. `SAR-Preview`, `MS`).
    pub tag: String,
    /// Name of the dataset directory the metadata file sits in.
    pub group_name: String,
    /// Product type read from the document (e.g. `GRD`, `L1C`).
    pub product_name: String,
}

/// Scalar value of a catalog field. `Absent` is an explicit marker for a
/// missing value (serialized as `null`), never a crash.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(untagged)]
pub enum FieldValue {
    Text(String),
    /// Date/time string truncated to second precision (`YYYY-MM-DD hh:mm:ss`).
    Date(String),
    Double(f64),
    /// Enumerated numeric flag (0 / 1).
    Flag(i64),
    Absent,
}

impl FieldValue {
    pub fn is_absent(&self) -> bool {
        matches!(self, FieldValue::Absent)
    }
}

/// Spatial reference of a footprint: either a numeric EPSG code (SAFE
/// `srsName` fragments) or a WKT string (DIMAP projection nodes). The host
/// resolves both.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(untagged)]
pub enum SpatialReference {
    Epsg(u32),
    Wkt(String),
}

/// One normalized catalog item, handed to the host per descriptor and then
/// discarded.
#[derive(Clone, Debug, Serialize)]
pub struct CatalogItem {
    /// The descriptor this item was built from.
    pub item_uri: ItemDescriptor,
    /// Raster source the host should open (quicklook or data file), when known.
    pub raster_uri: Option<PathBuf>,
    /// Ground outline as an ordered list of vertices. Empty when the
    /// document carries no footprint.
    pub footprint: Vec<Coord>,
    pub spatial_reference: Option<SpatialReference>,
    /// Field name -> value. Every key corresponds to a declared field in
    /// the profile's schema.
    pub key_properties: BTreeMap<String, FieldValue>,
}

/// Options for one crawl over a set of root paths.
#[derive(Clone, Debug, Default)]
pub struct CrawlOpts {
    /// Root paths: files or directories, in enumeration order.
    pub paths: Vec<PathBuf>,
    /// Walk every subdirectory instead of a flat scan.
    pub recurse: bool,
    /// Filename filter for non-recursive directory scans (glob syntax).
    /// When None or empty, the profile's data source filter is used.
    pub filter: Option<String>,
    /// Override the parsed-document cache capacity.
    pub cache_capacity: Option<usize>,
}

/// End-of-run accounting for a crawl.
#[derive(Clone, Copy, Debug, Default, Serialize)]
pub struct CrawlReport {
    /// Items successfully built.
    pub built: usize,
    /// Candidate files the crawler skipped (wrong family, no product type,
    /// unparsable).
    pub skipped_candidates: usize,
    /// Descriptors that failed in the builder.
    pub failed_builds: usize,
}
