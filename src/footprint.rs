//! Scene footprint coordinates: "lat,lon" list parsing and the multi-ring
//! convex hull combine.

use serde::Serialize;

/// One footprint vertex in geographic order (latitude, longitude).
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Coord {
    pub lat: f64,
    pub lon: f64,
}

impl Coord {
    pub fn new(lat: f64, lon: f64) -> Self {
        Coord { lat, lon }
    }
}

/// Parse a whitespace-separated list of `lat,lon` pairs, preserving input
/// order. Returns `None` when any pair is malformed or the list is empty.
pub fn parse_coord_list(text: &str) -> Option<Vec<Coord>> {
    let mut coords = Vec::new();
    for pair in text.split_whitespace() {
        let (lat, lon) = pair.split_once(',')?;
        coords.push(Coord {
            lat: lat.trim().parse().ok()?,
            lon: lon.trim().parse().ok()?,
        });
    }
    if coords.is_empty() { None } else { Some(coords) }
}

/// Combine the vertices of several rings into one outline.
///
/// A single ring is passed through untouched (input order preserved);
/// multiple rings are merged via the convex hull of all their vertices.
pub fn combine_rings(rings: Vec<Vec<Coord>>) -> Option<Vec<Coord>> {
    let mut rings: Vec<Vec<Coord>> = rings.into_iter().filter(|r| !r.is_empty()).collect();
    match rings.len() {
        0 => None,
        1 => rings.pop(),
        _ => {
            let all: Vec<Coord> = rings.into_iter().flatten().collect();
            Some(convex_hull(&all))
        }
    }
}

/// Monotone-chain convex hull. Returns vertices in counter-clockwise order
/// (lon as x, lat as y); inputs with fewer than three distinct points come
/// back as-is, deduplicated and sorted.
pub fn convex_hull(points: &[Coord]) -> Vec<Coord> {
    let mut pts: Vec<Coord> = points.to_vec();
    pts.sort_by(|a, b| {
        (a.lon, a.lat)
            .partial_cmp(&(b.lon, b.lat))
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    pts.dedup_by(|a, b| a.lon == b.lon && a.lat == b.lat);
    if pts.len() < 3 {
        return pts;
    }

    // Cross product of (o->a) x (o->b); > 0 means a counter-clockwise turn.
    fn cross(o: Coord, a: Coord, b: Coord) -> f64 {
        (a.lon - o.lon) * (b.lat - o.lat) - (a.lat - o.lat) * (b.lon - o.lon)
    }

    let mut lower: Vec<Coord> = Vec::with_capacity(pts.len());
    for &p in &pts {
        while lower.len() >= 2 && cross(lower[lower.len() - 2], lower[lower.len() - 1], p) <= 0.0 {
            lower.pop();
        }
        lower.push(p);
    }
    let mut upper: Vec<Coord> = Vec::with_capacity(pts.len());
    for &p in pts.iter().rev() {
        while upper.len() >= 2 && cross(upper[upper.len() - 2], upper[upper.len() - 1], p) <= 0.0 {
            upper.pop();
        }
        upper.push(p);
    }
    // Last point of each chain is the first point of the other.
    lower.pop();
    upper.pop();
    lower.extend(upper);
    lower
}
