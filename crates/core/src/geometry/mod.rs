//! Areal geometry input resolution.
//!
//! Centerline extraction operates on polygons. Incoming features can carry
//! any `geo_types::Geometry`, so the areal content is resolved exactly once
//! at the pipeline entry into an [`AreaInput`] variant instead of re-checking
//! the geometry type at every stage.

use geo_types::{Geometry, MultiPolygon, Polygon};

/// Areal geometry accepted by the extraction pipeline.
///
/// Non-areal geometries (points, lines, collections) resolve to
/// [`AreaInput::Empty`] and produce an empty result rather than an error,
/// so a mixed feature source never aborts a run.
#[derive(Debug, Clone, PartialEq)]
pub enum AreaInput {
    /// A single polygon, possibly with holes
    Polygon(Polygon<f64>),
    /// Several disjoint polygons processed independently
    MultiPolygon(MultiPolygon<f64>),
    /// No areal content
    Empty,
}

impl AreaInput {
    /// Resolve a generic geometry into its areal content.
    ///
    /// `Rect` and `Triangle` are promoted to polygons; everything without
    /// an interior becomes [`AreaInput::Empty`].
    pub fn from_geometry(geometry: Geometry<f64>) -> Self {
        match geometry {
            Geometry::Polygon(p) => AreaInput::Polygon(p),
            Geometry::MultiPolygon(mp) if mp.0.is_empty() => AreaInput::Empty,
            Geometry::MultiPolygon(mp) => AreaInput::MultiPolygon(mp),
            Geometry::Rect(r) => AreaInput::Polygon(r.to_polygon()),
            Geometry::Triangle(t) => AreaInput::Polygon(t.to_polygon()),
            _ => AreaInput::Empty,
        }
    }

    /// Iterate over the constituent polygons, in input order.
    pub fn polygons(&self) -> impl Iterator<Item = &Polygon<f64>> {
        let slice: &[Polygon<f64>] = match self {
            AreaInput::Polygon(p) => std::slice::from_ref(p),
            AreaInput::MultiPolygon(mp) => &mp.0,
            AreaInput::Empty => &[],
        };
        slice.iter()
    }

    /// True when there is no areal content to process
    pub fn is_empty(&self) -> bool {
        matches!(self, AreaInput::Empty)
    }
}

impl From<Geometry<f64>> for AreaInput {
    fn from(geometry: Geometry<f64>) -> Self {
        AreaInput::from_geometry(geometry)
    }
}
