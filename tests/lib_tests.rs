use scenedex::FieldValue;
use scenedex::crawler::glob_match;
use scenedex::footprint::{Coord, combine_rings, convex_hull, parse_coord_list};
use scenedex::parser::{epsg_from_srs_name, truncate_start_time};
use scenedex::profile::FilenameConvention;

// --- glob_match ---

#[test]
fn test_glob_match_literal() {
    assert!(glob_match("manifest.safe", "manifest.safe"));
    assert!(!glob_match("manifest.safe", "manifest.saf"));
}

#[test]
fn test_glob_match_star() {
    assert!(glob_match("*.dim", "scene.dim"));
    assert!(glob_match("*.dim", ".dim"));
    assert!(!glob_match("*.dim", "scene.dim.bak"));
    assert!(glob_match("MTD_MSI*.xml", "MTD_MSIL1C.xml"));
}

#[test]
fn test_glob_match_question() {
    assert!(glob_match("scene?.dim", "scene1.dim"));
    assert!(!glob_match("scene?.dim", "scene.dim"));
}

// --- filename conventions ---

#[test]
fn test_prefix_suffix_convention() {
    let conv = FilenameConvention::PrefixSuffix {
        prefix: "manifest",
        suffix: ".safe",
    };
    assert!(conv.matches("manifest.safe"));
    assert!(conv.matches("manifest-v2.safe"));
    assert!(!conv.matches("report.safe"));
    assert!(!conv.matches("manifest.xml"));
}

#[test]
fn test_suffix_convention() {
    let conv = FilenameConvention::Suffix(".dim");
    assert!(conv.matches("DE2_MS4_L1C.dim"));
    assert!(!conv.matches("DE2_MS4_L1C.tif"));
}

// --- acquisition date truncation ---

#[test]
fn test_truncate_start_time_example() {
    assert_eq!(
        truncate_start_time("2020-10-21T03:15:42.123Z"),
        "2020-10-21 03:15:42"
    );
}

#[test]
fn test_truncate_start_time_idempotent() {
    let once = truncate_start_time("2016-05-04T10:31:00.123456");
    let twice = truncate_start_time(&once);
    assert_eq!(once, twice);
    assert_eq!(once, "2016-05-04 10:31:00");
}

// --- coordinate list parsing ---

#[test]
fn test_parse_coord_list_preserves_order() {
    let coords = parse_coord_list("23.9,111.7 24.3,114.1 22.6,114.4").unwrap();
    assert_eq!(
        coords,
        vec![
            Coord::new(23.9, 111.7),
            Coord::new(24.3, 114.1),
            Coord::new(22.6, 114.4),
        ]
    );
}

#[test]
fn test_parse_coord_list_rejects_malformed() {
    assert!(parse_coord_list("").is_none());
    assert!(parse_coord_list("23.9,111.7 garbage").is_none());
    assert!(parse_coord_list("23.9").is_none());
}

// --- convex hull / ring combine ---

#[test]
fn test_convex_hull_drops_interior_point() {
    let pts = [
        Coord::new(0.0, 0.0),
        Coord::new(0.0, 4.0),
        Coord::new(4.0, 4.0),
        Coord::new(4.0, 0.0),
        Coord::new(2.0, 2.0), // interior
    ];
    let hull = convex_hull(&pts);
    assert_eq!(hull.len(), 4);
    assert!(!hull.contains(&Coord::new(2.0, 2.0)));
}

#[test]
fn test_combine_rings_single_ring_untouched() {
    let ring = vec![
        Coord::new(23.9, 111.7),
        Coord::new(24.3, 114.1),
        Coord::new(22.6, 114.4),
    ];
    assert_eq!(combine_rings(vec![ring.clone()]).unwrap(), ring);
}

#[test]
fn test_combine_rings_multi_ring_hulls() {
    let a = vec![
        Coord::new(0.0, 0.0),
        Coord::new(1.0, 0.0),
        Coord::new(1.0, 1.0),
        Coord::new(0.0, 1.0),
    ];
    let b = vec![
        Coord::new(0.0, 2.0),
        Coord::new(1.0, 2.0),
        Coord::new(1.0, 3.0),
        Coord::new(0.0, 3.0),
    ];
    let combined = combine_rings(vec![a, b]).unwrap();
    // Hull of two side-by-side unit squares is the bounding quad.
    assert_eq!(combined.len(), 4);
    assert!(combined.contains(&Coord::new(0.0, 0.0)));
    assert!(combined.contains(&Coord::new(1.0, 3.0)));
}

#[test]
fn test_combine_rings_empty() {
    assert!(combine_rings(vec![]).is_none());
    assert!(combine_rings(vec![vec![]]).is_none());
}

// --- srs identifiers ---

#[test]
fn test_epsg_from_srs_name_fragment() {
    assert_eq!(
        epsg_from_srs_name("http://www.opengis.net/gml/srs/epsg.xml#4326"),
        Some(4326)
    );
    assert_eq!(epsg_from_srs_name("epsg.xml"), None);
}

// --- field value serialization ---

#[test]
fn test_field_value_absent_serializes_as_null() {
    assert_eq!(serde_json::to_string(&FieldValue::Absent).unwrap(), "null");
    assert_eq!(
        serde_json::to_string(&FieldValue::Text("SENTINEL-1A".into())).unwrap(),
        "\"SENTINEL-1A\""
    );
    assert_eq!(serde_json::to_string(&FieldValue::Flag(1)).unwrap(), "1");
}
