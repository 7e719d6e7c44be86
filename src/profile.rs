//! Per-sensor-family configuration: filename conventions, field schemas,
//! and the metadata routes the generic parser walks.
//!
//! One `SensorProfile` replaces what used to be a copy-pasted plugin module
//! per satellite family. All route tables are static data; adding a family
//! means adding a constructor here, not another parser.

use serde::Serialize;

/// Scalar type of a declared catalog field.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldKind {
    /// Short text with a maximum length.
    Text(u32),
    /// Unbounded text.
    LongText,
    /// Date/time at second precision.
    Date,
    /// Floating point with a display precision.
    Double { precision: u32 },
    /// Enumerated numeric flag.
    Flag,
}

/// One declared field of a profile's schema. The ordered schema is part of
/// the host contract and must match the host-side registration exactly.
#[derive(Clone, Copy, Debug, Serialize)]
pub struct FieldDef {
    pub name: &'static str,
    pub alias: &'static str,
    pub kind: FieldKind,
}

/// Where an element lives in a metadata document. Path steps are local
/// element names; namespace prefixes in the document are ignored.
#[derive(Clone, Copy, Debug)]
pub enum Route {
    /// Descend from the document root.
    Root(&'static [&'static str]),
    /// SAFE manifest: `metadataSection` child with a matching `ID`
    /// attribute, then descend.
    MetadataObject {
        id: &'static str,
        path: &'static [&'static str],
    },
    /// SAFE manifest: `dataObjectSection/dataObject` with a matching `ID`,
    /// then descend.
    DataObject {
        id: &'static str,
        path: &'static [&'static str],
    },
}

/// How the sensor identity is derived and tested for eligibility.
#[derive(Clone, Copy, Debug)]
pub enum SensorIdentity {
    /// Sensor name is the concatenation of two leaves (family name and
    /// unit number); eligible when the result starts with `prefix`.
    Concat {
        family: Route,
        number: Route,
        prefix: &'static str,
    },
    /// Fixed sensor name; eligible when the leaf at `probe` contains
    /// `expect`.
    Probe {
        name: &'static str,
        probe: Route,
        expect: &'static str,
    },
}

/// How the routing tag is chosen for an eligible document.
#[derive(Clone, Copy, Debug)]
pub enum TagPolicy {
    Fixed(&'static str),
    /// Tag from the band count leaf at `route`: one band maps to `single`,
    /// three or more to `multi`, anything else to no tag.
    BandCount {
        route: Route,
        single: &'static str,
        multi: &'static str,
    },
}

/// Where the footprint vertices come from.
#[derive(Clone, Copy, Debug)]
pub enum FootprintRoute {
    /// SAFE frame set: every `frame/footPrint` under `frame_set` holds a
    /// ring of "lat,lon" pairs in a `coordinates` leaf; the `srsName`
    /// attribute carries the EPSG id after a `#`.
    FrameSet { frame_set: Route },
    /// DIMAP vertex list: each child of `frame` holds `x`/`y` leaves;
    /// spatial reference is the first WKT leaf in `wkt` that resolves.
    VertexList {
        frame: Route,
        x: &'static str,
        y: &'static str,
        wkt: &'static [Route],
    },
}

/// Where the quicklook preview reference comes from.
#[derive(Clone, Copy, Debug)]
pub enum QuicklookRoute {
    /// SAFE data object: `byteStream/fileLocation@href`, relative to the
    /// metadata file's directory.
    DataObjectHref { id: &'static str },
    None,
}

/// What to do when a document has no quicklook.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum QuicklookPolicy {
    /// Leave the field absent.
    Absent,
    /// Substitute a fixed placeholder image and record a 0/1 flag field.
    Placeholder {
        image: &'static str,
        flag_field: &'static str,
    },
}

/// Where the raster URI the host opens comes from.
#[derive(Clone, Copy, Debug)]
pub enum RasterRoute {
    /// The quicklook path doubles as the raster source (preview products).
    Quicklook,
    /// `href` attribute at `route`, relative to the metadata file's
    /// directory. Required: an item cannot be built without it.
    Href(Route),
}

/// Source of one key property value.
#[derive(Clone, Copy, Debug)]
pub enum PropSource {
    SensorName,
    AcquisitionDate,
    QuicklookPath,
    /// 1 when a quicklook exists, 0 otherwise (placeholder policy).
    QuicklookFlag,
    /// Text of the leaf at the route.
    Text(Route),
    /// Text of the leaf parsed as f64.
    Double(Route),
}

/// Filename convention a metadata file must satisfy during recursive walks
/// and for single-file root paths.
#[derive(Clone, Copy, Debug)]
pub enum FilenameConvention {
    /// Name starts with `prefix` and ends with `suffix` (e.g. SAFE
    /// `manifest*.safe`).
    PrefixSuffix {
        prefix: &'static str,
        suffix: &'static str,
    },
    /// Name ends with `suffix` (e.g. DIMAP `*.dim`).
    Suffix(&'static str),
}

impl FilenameConvention {
    pub fn matches(&self, file_name: &str) -> bool {
        match *self {
            FilenameConvention::PrefixSuffix { prefix, suffix } => {
                file_name.starts_with(prefix) && file_name.ends_with(suffix)
            }
            FilenameConvention::Suffix(suffix) => file_name.ends_with(suffix),
        }
    }
}

/// Everything the generic parser/crawler/builder needs to support one
/// sensor family.
#[derive(Clone, Debug)]
pub struct SensorProfile {
    /// Raster type name reported to the host.
    pub name: &'static str,
    pub description: &'static str,
    /// Default glob for non-recursive directory scans.
    pub data_source_filter: &'static str,
    pub convention: FilenameConvention,
    /// Ordered field schema, reproduced exactly for host compatibility.
    pub schema: &'static [FieldDef],
    pub identity: SensorIdentity,
    pub tag: TagPolicy,
    /// Product type leaf. A document without it is ineligible.
    pub product: Route,
    /// Acquisition start/stop time leaf, truncated to second precision.
    pub acquisition: Route,
    pub footprint: Option<FootprintRoute>,
    pub quicklook: QuicklookRoute,
    pub quicklook_policy: QuicklookPolicy,
    pub raster: RasterRoute,
    /// Key property table: field name -> value source. Names must appear
    /// in `schema`.
    pub properties: &'static [(&'static str, PropSource)],
}

impl SensorProfile {
    /// True when `name` is a declared schema field.
    pub fn declares_field(&self, name: &str) -> bool {
        self.schema.iter().any(|f| f.name == name)
    }
}

// ---- Sentinel-1 (SAFE manifest) ----

const SENTINEL1_FIELDS: &[FieldDef] = &[
    FieldDef {
        name: "SensorName",
        alias: "Sensor Name",
        kind: FieldKind::Text(50),
    },
    FieldDef {
        name: "AcquisitionDate",
        alias: "Acquisition Date",
        kind: FieldKind::Date,
    },
    FieldDef {
        name: "QuickLookPath",
        alias: "Quick Look",
        kind: FieldKind::Text(2048),
    },
];

const SENTINEL1_FIELDS_PLACEHOLDER: &[FieldDef] = &[
    FieldDef {
        name: "SensorName",
        alias: "Sensor Name",
        kind: FieldKind::Text(50),
    },
    FieldDef {
        name: "AcquisitionDate",
        alias: "Acquisition Date",
        kind: FieldKind::Date,
    },
    FieldDef {
        name: "QuickLookPath",
        alias: "Quick Look",
        kind: FieldKind::Text(2048),
    },
    FieldDef {
        name: "HasQuickLook",
        alias: "Has Quick Look",
        kind: FieldKind::Flag,
    },
];

const SENTINEL1_PROPS: &[(&str, PropSource)] = &[
    ("SensorName", PropSource::SensorName),
    ("AcquisitionDate", PropSource::AcquisitionDate),
    ("QuickLookPath", PropSource::QuicklookPath),
];

const SENTINEL1_PROPS_PLACEHOLDER: &[(&str, PropSource)] = &[
    ("SensorName", PropSource::SensorName),
    ("AcquisitionDate", PropSource::AcquisitionDate),
    ("QuickLookPath", PropSource::QuicklookPath),
    ("HasQuickLook", PropSource::QuicklookFlag),
];

/// Sentinel-1 SAFE manifests (`manifest.safe`).
pub fn sentinel1() -> SensorProfile {
    SensorProfile {
        name: "Sentinel-1",
        description: "Sentinel-1 SAFE product manifests",
        data_source_filter: "manifest.safe",
        convention: FilenameConvention::PrefixSuffix {
            prefix: "manifest",
            suffix: ".safe",
        },
        schema: SENTINEL1_FIELDS,
        identity: SensorIdentity::Concat {
            family: Route::MetadataObject {
                id: "platform",
                path: &["metadataWrap", "xmlData", "platform", "familyName"],
            },
            number: Route::MetadataObject {
                id: "platform",
                path: &["metadataWrap", "xmlData", "platform", "number"],
            },
            prefix: "SENTINEL-1",
        },
        tag: TagPolicy::Fixed("SAR-Preview"),
        product: Route::MetadataObject {
            id: "generalProductInformation",
            path: &[
                "metadataWrap",
                "xmlData",
                "standAloneProductInformation",
                "productType",
            ],
        },
        acquisition: Route::MetadataObject {
            id: "acquisitionPeriod",
            path: &["metadataWrap", "xmlData", "acquisitionPeriod", "startTime"],
        },
        footprint: Some(FootprintRoute::FrameSet {
            frame_set: Route::MetadataObject {
                id: "measurementFrameSet",
                path: &["metadataWrap", "xmlData", "frameSet"],
            },
        }),
        quicklook: QuicklookRoute::DataObjectHref { id: "quicklook" },
        quicklook_policy: QuicklookPolicy::Absent,
        raster: RasterRoute::Quicklook,
        properties: SENTINEL1_PROPS,
    }
}

/// Sentinel-1 with the placeholder quicklook policy: products without a
/// preview get a fixed placeholder image and a `HasQuickLook` flag field
/// instead of an absent value.
pub fn sentinel1_with_placeholder() -> SensorProfile {
    SensorProfile {
        schema: SENTINEL1_FIELDS_PLACEHOLDER,
        quicklook_policy: QuicklookPolicy::Placeholder {
            image: "no_quicklook.png",
            flag_field: "HasQuickLook",
        },
        properties: SENTINEL1_PROPS_PLACEHOLDER,
        ..sentinel1()
    }
}

// ---- Deimos-2 (DIMAP) ----

const DEIMOS2_FIELDS: &[FieldDef] = &[
    FieldDef {
        name: "SensorName",
        alias: "Sensor Name",
        kind: FieldKind::Text(50),
    },
    FieldDef {
        name: "AcquisitionDate",
        alias: "Acquisition Date",
        kind: FieldKind::Date,
    },
    FieldDef {
        name: "Instrument",
        alias: "Instrument",
        kind: FieldKind::Text(50),
    },
    FieldDef {
        name: "SunAzimuth",
        alias: "Sun Azimuth",
        kind: FieldKind::Double { precision: 5 },
    },
    FieldDef {
        name: "SunElevation",
        alias: "Sun Elevation",
        kind: FieldKind::Double { precision: 5 },
    },
];

const DEIMOS2_PROPS: &[(&str, PropSource)] = &[
    ("SensorName", PropSource::SensorName),
    ("AcquisitionDate", PropSource::AcquisitionDate),
    (
        "Instrument",
        PropSource::Text(Route::Root(&[
            "Dataset_Sources",
            "Source_Information",
            "Scene_Source",
            "INSTRUMENT",
        ])),
    ),
    (
        "SunAzimuth",
        PropSource::Double(Route::Root(&[
            "Dataset_Sources",
            "Source_Information",
            "Scene_Source",
            "SUN_AZIMUTH",
        ])),
    ),
    (
        "SunElevation",
        PropSource::Double(Route::Root(&[
            "Dataset_Sources",
            "Source_Information",
            "Scene_Source",
            "SUN_ELEVATION",
        ])),
    ),
];

/// Deimos-2 DIMAP metadata files (`*.dim`).
pub fn deimos2() -> SensorProfile {
    SensorProfile {
        name: "DEIMOS-2",
        description: "DEIMOS-2 Level 1B / 1C DIMAP product metadata",
        data_source_filter: "*.dim",
        convention: FilenameConvention::Suffix(".dim"),
        schema: DEIMOS2_FIELDS,
        identity: SensorIdentity::Probe {
            name: "DEIMOS-2",
            probe: Route::Root(&[
                "Dataset_Sources",
                "Source_Information",
                "Scene_Source",
                "MISSION",
            ]),
            expect: "Deimos 2",
        },
        tag: TagPolicy::BandCount {
            route: Route::Root(&["Raster_Dimensions", "NBANDS"]),
            single: "Pan",
            multi: "MS",
        },
        product: Route::Root(&["Production", "PRODUCT_TYPE"]),
        acquisition: Route::Root(&[
            "Dataset_Sources",
            "Source_Information",
            "Scene_Source",
            "STOP_TIME",
        ]),
        footprint: Some(FootprintRoute::VertexList {
            frame: Route::Root(&["Dataset_Frame"]),
            x: "FRAME_X",
            y: "FRAME_Y",
            wkt: &[
                Route::Root(&["Coordinate_Reference_System", "PROJECTION"]),
                Route::Root(&[
                    "Dataset_Sources",
                    "Source_Information",
                    "Coordinate_Reference_System",
                    "Projection_OGCWKT",
                ]),
            ],
        }),
        quicklook: QuicklookRoute::None,
        quicklook_policy: QuicklookPolicy::Absent,
        raster: RasterRoute::Href(Route::Root(&[
            "Data_Access",
            "Data_File",
            "DATA_FILE_PATH",
        ])),
        properties: DEIMOS2_PROPS,
    }
}
