//! Metadata document parsing and route-driven field extraction.
//!
//! `MetadataParser` owns a bounded LRU cache of parsed documents and walks
//! the routes declared by its `SensorProfile` to derive the normalized
//! fields: sensor identity, eligibility, tag, product type, acquisition
//! date, footprint, spatial reference and quicklook path.

pub mod cache;
pub mod dom;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use log::warn;

use crate::error::ParseError;
use crate::footprint::{self, Coord};
use crate::profile::{
    FootprintRoute, QuicklookRoute, Route, SensorIdentity, SensorProfile, TagPolicy,
};
use crate::types::SpatialReference;
use crate::utils::config::ACQUISITION_DATE_LEN;
use cache::DocumentCache;
use dom::Element;

/// One parsed metadata document. Immutable; shared out of the cache.
#[derive(Debug)]
pub struct Document {
    root: Element,
}

impl Document {
    pub fn root(&self) -> &Element {
        &self.root
    }

    /// `metadataSection` child with a matching `ID` attribute (SAFE).
    /// Linear scan over direct children.
    pub fn metadata_object(&self, id: &str) -> Option<&Element> {
        let section = self.root.child("metadataSection")?;
        section
            .children()
            .iter()
            .find(|c| c.name() == "metadataObject" && c.attr("ID") == Some(id))
    }

    /// `dataObjectSection/dataObject` with a matching `ID` attribute (SAFE).
    pub fn data_object(&self, id: &str) -> Option<&Element> {
        let section = self.root.child("dataObjectSection")?;
        section
            .children()
            .iter()
            .find(|c| c.name() == "dataObject" && c.attr("ID") == Some(id))
    }

    /// Resolve a profile route to an element.
    pub fn find(&self, route: &Route) -> Option<&Element> {
        match route {
            Route::Root(path) => self.root.find_path(path),
            Route::MetadataObject { id, path } => self.metadata_object(id)?.find_path(path),
            Route::DataObject { id, path } => self.data_object(id)?.find_path(path),
        }
    }

    /// Non-empty text of the leaf at a route.
    pub fn find_text(&self, route: &Route) -> Option<&str> {
        let text = self.find(route)?.text();
        if text.is_empty() { None } else { Some(text) }
    }

    #[cfg(test)]
    pub(crate) fn for_tests(root: Element) -> Self {
        Document { root }
    }
}

/// Truncate an ISO-8601-like timestamp to second precision and replace the
/// date/time separator with a space. Idempotent.
pub fn truncate_start_time(raw: &str) -> String {
    raw.chars()
        .take(ACQUISITION_DATE_LEN)
        .map(|c| if c == 'T' { ' ' } else { c })
        .collect()
}

/// Trailing numeric component of a namespaced identifier such as
/// `http://www.opengis.net/gml/srs/epsg.xml#4326`.
pub fn epsg_from_srs_name(srs_name: &str) -> Option<u32> {
    srs_name.rsplit_once('#')?.1.trim().parse().ok()
}

pub struct MetadataParser {
    profile: SensorProfile,
    cache: DocumentCache,
}

impl MetadataParser {
    pub fn new(profile: SensorProfile) -> Self {
        Self::with_cache_capacity(profile, crate::utils::config::DOCUMENT_CACHE_CAPACITY)
    }

    pub fn with_cache_capacity(profile: SensorProfile, capacity: usize) -> Self {
        MetadataParser {
            profile,
            cache: DocumentCache::new(capacity),
        }
    }

    pub fn profile(&self) -> &SensorProfile {
        &self.profile
    }

    /// Parse `path`, reusing the cached document on repeated lookups.
    pub fn parse(&mut self, path: &Path) -> Result<Arc<Document>, ParseError> {
        if let Some(doc) = self.cache.get(path) {
            return Ok(doc);
        }
        let root = dom::parse_file(path)?;
        let doc = Arc::new(Document { root });
        self.cache.insert(path.to_path_buf(), doc.clone());
        Ok(doc)
    }

    /// Parse `path` and treat failures as "no document", logging once.
    pub fn parse_or_none(&mut self, path: &Path) -> Option<Arc<Document>> {
        match self.parse(path) {
            Ok(doc) => Some(doc),
            Err(e) => {
                warn!("{}", e);
                None
            }
        }
    }

    /// Sensor identity string, e.g. `SENTINEL-1A` or `DEIMOS-2`.
    pub fn sensor_name(&self, doc: &Document) -> Option<String> {
        match &self.profile.identity {
            SensorIdentity::Concat { family, number, .. } => {
                let family = doc.find_text(family)?;
                let number = doc.find_text(number)?;
                Some(format!("{family}{number}"))
            }
            SensorIdentity::Probe { name, probe, expect } => {
                let mission = doc.find_text(probe)?;
                if mission.contains(expect) {
                    Some((*name).to_string())
                } else {
                    None
                }
            }
        }
    }

    /// Eligibility test for this sensor family.
    pub fn is_target(&self, doc: &Document) -> bool {
        match &self.profile.identity {
            SensorIdentity::Concat { prefix, .. } => self
                .sensor_name(doc)
                .is_some_and(|name| name.starts_with(prefix)),
            SensorIdentity::Probe { .. } => self.sensor_name(doc).is_some(),
        }
    }

    /// Routing tag for an eligible document; `None` makes it ineligible.
    pub fn tag(&self, doc: &Document) -> Option<String> {
        if !self.is_target(doc) {
            return None;
        }
        match &self.profile.tag {
            TagPolicy::Fixed(tag) => Some((*tag).to_string()),
            TagPolicy::BandCount {
                route,
                single,
                multi,
            } => {
                let bands: u32 = doc.find_text(route)?.parse().ok()?;
                match bands {
                    1 => Some((*single).to_string()),
                    n if n >= 3 => Some((*multi).to_string()),
                    _ => None,
                }
            }
        }
    }

    /// Product type leaf; required for eligibility.
    pub fn product_name(&self, doc: &Document) -> Option<String> {
        doc.find_text(&self.profile.product).map(str::to_string)
    }

    /// Acquisition date at second precision (`YYYY-MM-DD hh:mm:ss`).
    pub fn acquisition_date(&self, doc: &Document) -> Option<String> {
        doc.find_text(&self.profile.acquisition)
            .map(truncate_start_time)
    }

    /// Footprint vertices plus the spatial reference they are expressed in.
    pub fn footprint(&self, doc: &Document) -> Option<(Vec<Coord>, Option<SpatialReference>)> {
        match self.profile.footprint.as_ref()? {
            FootprintRoute::FrameSet { frame_set } => {
                let frame_set = doc.find(frame_set)?;
                let mut srs = None;
                let mut rings = Vec::new();
                for frame in frame_set.children().iter().filter(|c| c.name() == "frame") {
                    let foot = match frame.child("footPrint") {
                        Some(f) => f,
                        None => continue,
                    };
                    if srs.is_none() {
                        srs = foot
                            .attr("srsName")
                            .and_then(epsg_from_srs_name)
                            .map(SpatialReference::Epsg);
                    }
                    if let Some(ring) = foot
                        .child("coordinates")
                        .and_then(|c| footprint::parse_coord_list(c.text()))
                    {
                        rings.push(ring);
                    }
                }
                footprint::combine_rings(rings).map(|coords| (coords, srs))
            }
            FootprintRoute::VertexList { frame, x, y, wkt } => {
                let frame = doc.find(frame)?;
                let mut coords = Vec::new();
                for vertex in frame.children() {
                    let (Some(vx), Some(vy)) = (vertex.child(x), vertex.child(y)) else {
                        continue;
                    };
                    let (Ok(vx), Ok(vy)) = (vx.text().parse::<f64>(), vy.text().parse::<f64>())
                    else {
                        continue;
                    };
                    coords.push(Coord { lat: vy, lon: vx });
                }
                if coords.is_empty() {
                    return None;
                }
                let srs = wkt
                    .iter()
                    .find_map(|route| doc.find_text(route))
                    .map(|text| SpatialReference::Wkt(text.to_string()));
                Some((coords, srs))
            }
        }
    }

    /// Absolute quicklook path: metadata file directory joined with the
    /// relative `href` under the byte-stream file location.
    pub fn quicklook_path(&self, doc: &Document, metadata_path: &Path) -> Option<PathBuf> {
        match &self.profile.quicklook {
            QuicklookRoute::DataObjectHref { id } => {
                let href = doc
                    .data_object(id)?
                    .find_path(&["byteStream", "fileLocation"])?
                    .attr("href")?;
                Some(join_relative(metadata_path, href))
            }
            QuicklookRoute::None => None,
        }
    }
}

/// Join a relative `href` from a metadata document onto the directory of
/// the metadata file itself.
pub fn join_relative(metadata_path: &Path, href: &str) -> PathBuf {
    let href = href.strip_prefix("./").unwrap_or(href);
    metadata_path
        .parent()
        .unwrap_or_else(|| Path::new("."))
        .join(href)
}
