//! Catalog item assembly from crawler descriptors.
//!
//! The builder re-parses the metadata file behind each descriptor (its
//! parser's cache absorbs the duplicate cost) and assembles the normalized
//! item. Failures are typed so the caller can tell "skip, try next" from
//! "malformed input, log and skip"; one bad item never halts catalog
//! population.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use log::warn;

use crate::error::BuildError;
use crate::parser::{Document, MetadataParser};
use crate::profile::{PropSource, QuicklookPolicy, RasterRoute, SensorProfile};
use crate::types::{CatalogItem, FieldValue, ItemDescriptor};

pub struct ItemBuilder {
    parser: MetadataParser,
}

impl ItemBuilder {
    pub fn new(profile: SensorProfile) -> Self {
        ItemBuilder {
            parser: MetadataParser::new(profile),
        }
    }

    pub fn with_cache_capacity(profile: SensorProfile, capacity: usize) -> Self {
        ItemBuilder {
            parser: MetadataParser::with_cache_capacity(profile, capacity),
        }
    }

    pub fn profile(&self) -> &SensorProfile {
        self.parser.profile()
    }

    /// Host boundary: can this path be opened by this raster type?
    pub fn can_open(&mut self, path: &Path) -> bool {
        match self.parser.parse_or_none(path) {
            Some(doc) => self.parser.is_target(&doc),
            None => false,
        }
    }

    /// Build one catalog item from a crawler descriptor.
    pub fn build(&mut self, descriptor: &ItemDescriptor) -> Result<CatalogItem, BuildError> {
        if descriptor.path.as_os_str().is_empty() {
            return Err(BuildError::EmptyDescriptor);
        }
        let path = descriptor.path.clone();
        let doc = self.parser.parse(&path)?;

        if !self.parser.is_target(&doc) {
            return Err(BuildError::Ineligible {
                path,
                family: self.parser.profile().name.to_string(),
            });
        }

        let (footprint, spatial_reference) = match self.parser.footprint(&doc) {
            Some((coords, srs)) => (coords, srs),
            None => (Vec::new(), None),
        };
        let quicklook = self.parser.quicklook_path(&doc, &path);
        let raster_uri = self.raster_uri(&doc, &path, quicklook.as_deref())?;
        let key_properties = self.key_properties(&doc, quicklook.as_deref());

        Ok(CatalogItem {
            item_uri: descriptor.clone(),
            raster_uri,
            footprint,
            spatial_reference,
            key_properties,
        })
    }

    fn raster_uri(
        &self,
        doc: &Document,
        path: &Path,
        quicklook: Option<&Path>,
    ) -> Result<Option<PathBuf>, BuildError> {
        match &self.parser.profile().raster {
            RasterRoute::Quicklook => Ok(quicklook.map(Path::to_path_buf)),
            RasterRoute::Href(route) => {
                let href = doc
                    .find(route)
                    .and_then(|el| el.attr("href"))
                    .ok_or_else(|| BuildError::MissingField {
                        path: path.to_path_buf(),
                        what: "data file reference",
                    })?;
                Ok(Some(crate::parser::join_relative(path, href)))
            }
        }
    }

    /// Assemble key properties from the profile's property table. Missing
    /// values become the explicit `Absent` marker; every emitted key is a
    /// declared schema field.
    fn key_properties(
        &self,
        doc: &Document,
        quicklook: Option<&Path>,
    ) -> BTreeMap<String, FieldValue> {
        let profile = self.parser.profile();
        let mut props = BTreeMap::new();
        for (name, source) in profile.properties {
            if !profile.declares_field(name) {
                debug_assert!(false, "property {name} not in schema");
                warn!("dropping undeclared property {name}");
                continue;
            }
            let value = match source {
                PropSource::SensorName => self
                    .parser
                    .sensor_name(doc)
                    .map_or(FieldValue::Absent, FieldValue::Text),
                PropSource::AcquisitionDate => self
                    .parser
                    .acquisition_date(doc)
                    .map_or(FieldValue::Absent, FieldValue::Date),
                PropSource::QuicklookPath => self.quicklook_value(quicklook),
                PropSource::QuicklookFlag => FieldValue::Flag(i64::from(quicklook.is_some())),
                PropSource::Text(route) => doc
                    .find_text(route)
                    .map_or(FieldValue::Absent, |t| FieldValue::Text(t.to_string())),
                PropSource::Double(route) => doc
                    .find_text(route)
                    .and_then(|t| t.parse().ok())
                    .map_or(FieldValue::Absent, FieldValue::Double),
            };
            props.insert((*name).to_string(), value);
        }
        props
    }

    fn quicklook_value(&self, quicklook: Option<&Path>) -> FieldValue {
        match (quicklook, &self.parser.profile().quicklook_policy) {
            (Some(p), _) => FieldValue::Text(p.to_string_lossy().into_owned()),
            (None, QuicklookPolicy::Placeholder { image, .. }) => {
                FieldValue::Text((*image).to_string())
            }
            (None, QuicklookPolicy::Absent) => FieldValue::Absent,
        }
    }
}
