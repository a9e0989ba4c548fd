//! Centerline extraction pipeline
//!
//! Chains the six stages for one polygon: densify the boundary, build the
//! Voronoi diagram over the boundary points, keep interior edges, assemble
//! the skeleton graph, prune spurs, emit paths. Each stage is also public
//! on its own for callers that want intermediate results.

use geo::{BoundingRect, LineString, Polygon};
use skelgis_core::{Algorithm, AreaInput, Error, Result};

use crate::skeleton::{
    assemble_graph, build_diagram, emit_paths, filter_interior, prune_spurs, segmentize_boundary,
    SkeletonWarning,
};

/// Parameters for centerline extraction
#[derive(Debug, Clone, PartialEq)]
pub struct CenterlineParams {
    /// Boundary densification step, in map units
    pub max_segment_length: f64,
    /// Pruning threshold for dangling skeleton branches.
    /// `None` defaults to `2.0 * max_segment_length`.
    pub min_spur_length: Option<f64>,
    /// Vertex merge tolerance, relative to the polygon's bounding-box diagonal
    pub vertex_merge_epsilon: f64,
    /// Number of interior samples tested on diagram edges longer than the
    /// densification step
    pub max_interior_samples: usize,
}

impl Default for CenterlineParams {
    fn default() -> Self {
        Self {
            max_segment_length: 10.0,
            min_spur_length: None,
            vertex_merge_epsilon: 1e-6,
            max_interior_samples: 1,
        }
    }
}

impl CenterlineParams {
    /// Effective pruning threshold
    pub fn spur_length(&self) -> f64 {
        self.min_spur_length
            .unwrap_or(2.0 * self.max_segment_length)
    }

    fn validate(&self) -> Result<()> {
        if !self.max_segment_length.is_finite() || self.max_segment_length <= 0.0 {
            return Err(Error::InvalidParameter {
                name: "max_segment_length",
                value: format!("{}", self.max_segment_length),
                reason: "must be a positive finite number".into(),
            });
        }
        if let Some(spur) = self.min_spur_length {
            if !spur.is_finite() || spur < 0.0 {
                return Err(Error::InvalidParameter {
                    name: "min_spur_length",
                    value: format!("{spur}"),
                    reason: "must be a non-negative finite number".into(),
                });
            }
        }
        if !self.vertex_merge_epsilon.is_finite() || self.vertex_merge_epsilon <= 0.0 {
            return Err(Error::InvalidParameter {
                name: "vertex_merge_epsilon",
                value: format!("{}", self.vertex_merge_epsilon),
                reason: "must be a positive finite number".into(),
            });
        }
        if self.max_interior_samples == 0 {
            return Err(Error::InvalidParameter {
                name: "max_interior_samples",
                value: "0".into(),
                reason: "at least one interior sample is required".into(),
            });
        }
        Ok(())
    }
}

/// Extraction result for one input geometry
#[derive(Debug, Clone, PartialEq)]
pub struct Centerlines {
    /// One polyline per skeleton branch
    pub paths: Vec<LineString<f64>>,
    /// Recoverable conditions encountered along the way
    pub warnings: Vec<SkeletonWarning>,
}

impl Centerlines {
    fn none() -> Self {
        Self { paths: Vec::new(), warnings: Vec::new() }
    }

    /// True when no path was produced
    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    /// Summed Euclidean length of all paths
    pub fn total_length(&self) -> f64 {
        self.paths
            .iter()
            .map(|path| {
                path.0
                    .windows(2)
                    .map(|w| ((w[1].x - w[0].x).powi(2) + (w[1].y - w[0].y).powi(2)).sqrt())
                    .sum::<f64>()
            })
            .sum()
    }
}

/// Extract the centerline network of one polygon.
///
/// # Arguments
/// * `polygon` - A valid polygon; holes are respected
/// * `params` - Extraction parameters, see [`CenterlineParams`]
///
/// # Returns
/// The pruned centerline paths. A polygon too small or narrow for its
/// thresholds yields an empty path list plus a
/// [`SkeletonWarning::TrivialSkeleton`] warning rather than an error.
///
/// # Errors
/// `InvalidParameter` for unusable parameters, `InvalidGeometry` for
/// malformed rings, `DegenerateSiteSet` / `NumericInstability` when the
/// boundary cannot seed a Voronoi diagram.
pub fn extract_centerlines(polygon: &Polygon<f64>, params: &CenterlineParams) -> Result<Centerlines> {
    params.validate()?;

    let boundary = segmentize_boundary(polygon, params.max_segment_length)?;
    let diagram = build_diagram(&boundary.sites())?;

    let rect = polygon
        .bounding_rect()
        .ok_or_else(|| Error::invalid_geometry("polygon has no extent"))?;
    let diagonal = (rect.width().powi(2) + rect.height().powi(2)).sqrt();
    let merge_epsilon = params.vertex_merge_epsilon * diagonal;

    let interior = filter_interior(
        diagram,
        polygon,
        params.max_segment_length,
        params.max_interior_samples,
    );

    let mut graph = assemble_graph(&interior, merge_epsilon);
    let mut warnings = prune_spurs(&mut graph, params.spur_length());
    let paths = emit_paths(&graph);

    // An empty result is always accounted for: a polygon whose interior
    // held no usable skeleton in the first place is reported as trivial.
    if paths.is_empty() && warnings.is_empty() {
        warnings.push(SkeletonWarning::TrivialSkeleton { component_length: 0.0 });
    }

    Ok(Centerlines { paths, warnings })
}

/// Extract centerlines from resolved areal input.
///
/// MultiPolygon parts are processed independently and their paths and
/// warnings concatenated in part order; empty input yields an empty result.
pub fn extract_from_geometry(input: &AreaInput, params: &CenterlineParams) -> Result<Centerlines> {
    let mut all = Centerlines::none();
    for polygon in input.polygons() {
        let part = extract_centerlines(polygon, params)?;
        all.paths.extend(part.paths);
        all.warnings.extend(part.warnings);
    }
    Ok(all)
}

/// Centerline extraction as a registrable [`Algorithm`]
#[derive(Debug, Clone, Copy, Default)]
pub struct CenterlineExtraction;

impl Algorithm for CenterlineExtraction {
    type Input = Polygon<f64>;
    type Output = Centerlines;
    type Params = CenterlineParams;
    type Error = Error;

    fn name(&self) -> &'static str {
        "centerline_extraction"
    }

    fn description(&self) -> &'static str {
        "Extract medial-axis centerlines from polygon area features"
    }

    fn execute(&self, input: Self::Input, params: Self::Params) -> Result<Self::Output> {
        extract_centerlines(&input, &params)
    }
}
