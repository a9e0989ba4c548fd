//! Batch and streaming centerline extraction
//!
//! Per-feature error policy: a malformed feature is recorded in the run
//! report, keyed by the feature's id, and never aborts the batch. A run
//! always finishes with a summary of succeeded, empty, failed and cancelled
//! features. Cancellation is cooperative and checked between features only;
//! an in-flight feature runs to completion.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crossbeam_channel::{unbounded, Receiver};
use tracing::{debug, warn};

use skelgis_algorithms::skeleton::{extract_from_geometry, CenterlineParams, Centerlines};
use skelgis_core::vector::{Feature, FeatureCollection};
use skelgis_core::Error;

use crate::strategy::{ParallelStrategy, ProcessingMode};

/// Parameters for a batch run
#[derive(Debug, Clone, Default)]
pub struct BatchParams {
    /// Per-polygon extraction parameters
    pub centerline: CenterlineParams,
    /// Worker distribution across features
    pub mode: ProcessingMode,
}

/// Cooperative cancellation flag shared between the caller and the workers
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cancellation; features not yet started report as cancelled
    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// Result of processing one feature
#[derive(Debug)]
pub enum BatchOutcome {
    /// Extraction finished, possibly with an empty path list plus warnings
    Extracted(Centerlines),
    /// Extraction failed; the rest of the batch is unaffected
    Failed(Error),
    /// The run was cancelled before this feature started
    Cancelled,
}

/// One feature's outcome, keyed by feature identity
#[derive(Debug)]
pub struct FeatureOutcome {
    /// Feature id, or the collection index when the feature has none
    pub key: String,
    /// Position in the input collection
    pub index: usize,
    pub outcome: BatchOutcome,
}

/// Run-level counts
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchSummary {
    pub total: usize,
    /// Features that produced at least one centerline path
    pub succeeded: usize,
    /// Features whose extraction came back empty (trivial or non-areal)
    pub empty: usize,
    pub failed: usize,
    pub cancelled: usize,
}

/// Outcomes in input order plus the run summary
#[derive(Debug)]
pub struct BatchReport {
    pub outcomes: Vec<FeatureOutcome>,
    pub summary: BatchSummary,
}

fn feature_key(feature: &Feature, index: usize) -> String {
    feature.id.clone().unwrap_or_else(|| index.to_string())
}

fn process_one(
    features: &FeatureCollection,
    index: usize,
    params: &BatchParams,
    cancel: &CancelToken,
) -> FeatureOutcome {
    let feature = &features.features[index];
    let key = feature_key(feature, index);

    if cancel.is_cancelled() {
        return FeatureOutcome { key, index, outcome: BatchOutcome::Cancelled };
    }

    match extract_from_geometry(&feature.area_input(), &params.centerline) {
        Ok(centerlines) => FeatureOutcome {
            key,
            index,
            outcome: BatchOutcome::Extracted(centerlines),
        },
        Err(error) => {
            warn!(feature = %key, %error, "centerline extraction failed");
            FeatureOutcome { key, index, outcome: BatchOutcome::Failed(error) }
        }
    }
}

/// Extract centerlines for every feature of a collection.
///
/// Work is distributed according to `params.mode`; outcomes come back in
/// input order regardless of the mode, and are bitwise identical between
/// sequential and parallel runs.
pub fn extract_batch(
    features: &FeatureCollection,
    params: &BatchParams,
    cancel: &CancelToken,
) -> BatchReport {
    let outcomes = params
        .mode
        .par_map(0..features.len(), |index| process_one(features, index, params, cancel));

    let mut summary = BatchSummary { total: features.len(), ..Default::default() };
    for feature_outcome in &outcomes {
        match &feature_outcome.outcome {
            BatchOutcome::Extracted(centerlines) if centerlines.paths.is_empty() => {
                summary.empty += 1;
            }
            BatchOutcome::Extracted(_) => summary.succeeded += 1,
            BatchOutcome::Failed(_) => summary.failed += 1,
            BatchOutcome::Cancelled => summary.cancelled += 1,
        }
    }
    debug!(?summary, "batch finished");

    BatchReport { outcomes, summary }
}

/// Stream per-feature outcomes from a background worker.
///
/// Results arrive in completion order, which differs from input order in
/// parallel modes. The channel closes once the whole collection has been
/// visited, so the receiver can simply be iterated.
pub fn stream_centerlines(
    features: FeatureCollection,
    params: BatchParams,
    cancel: CancelToken,
) -> Receiver<FeatureOutcome> {
    let (tx, rx) = unbounded();
    std::thread::spawn(move || {
        params.mode.par_for_each(0..features.len(), |index| {
            let outcome = process_one(&features, index, &params, &cancel);
            let _ = tx.send(outcome);
        });
    });
    rx
}

#[cfg(test)]
mod tests {
    use super::*;
    use geo_types::{Geometry, LineString, Point, Polygon};

    fn rectangle_feature(id: &str, origin: (f64, f64)) -> Feature {
        let (x, y) = origin;
        let polygon = Polygon::new(
            LineString::from(vec![
                (x, y),
                (x + 20.0, y),
                (x + 20.0, y + 4.0),
                (x, y + 4.0),
                (x, y),
            ]),
            vec![],
        );
        Feature::with_id(Geometry::Polygon(polygon), id)
    }

    fn bowtie_feature() -> Feature {
        let polygon = Polygon::new(
            LineString::from(vec![
                (0.0, 0.0),
                (10.0, 10.0),
                (10.0, 0.0),
                (0.0, 10.0),
                (0.0, 0.0),
            ]),
            vec![],
        );
        Feature::new(Geometry::Polygon(polygon))
    }

    fn batch_params(mode: ProcessingMode) -> BatchParams {
        BatchParams {
            centerline: CenterlineParams {
                max_segment_length: 1.0,
                min_spur_length: Some(3.0),
                ..Default::default()
            },
            mode,
        }
    }

    fn mixed_collection() -> FeatureCollection {
        let mut features = FeatureCollection::new();
        features.push(rectangle_feature("road-1", (0.0, 0.0)));
        features.push(bowtie_feature());
        features.push(Feature::new(Geometry::Point(Point::new(1.0, 2.0))));
        features.push(rectangle_feature("road-2", (100.0, 100.0)));
        features
    }

    #[test]
    fn test_failures_never_abort_the_batch() {
        let features = mixed_collection();
        let report = extract_batch(
            &features,
            &batch_params(ProcessingMode::Sequential),
            &CancelToken::new(),
        );

        assert_eq!(report.summary.total, 4);
        assert_eq!(report.summary.succeeded, 2);
        assert_eq!(report.summary.failed, 1);
        assert_eq!(report.summary.empty, 1);
        assert_eq!(report.summary.cancelled, 0);

        assert!(matches!(report.outcomes[1].outcome, BatchOutcome::Failed(_)));
        assert!(matches!(report.outcomes[3].outcome, BatchOutcome::Extracted(_)));
    }

    #[test]
    fn test_outcomes_are_keyed_by_identity() {
        let features = mixed_collection();
        let report = extract_batch(
            &features,
            &batch_params(ProcessingMode::Sequential),
            &CancelToken::new(),
        );

        let keys: Vec<&str> = report.outcomes.iter().map(|o| o.key.as_str()).collect();
        assert_eq!(keys, vec!["road-1", "1", "2", "road-2"]);
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let features = mixed_collection();
        let cancel = CancelToken::new();
        let sequential =
            extract_batch(&features, &batch_params(ProcessingMode::Sequential), &cancel);
        let parallel =
            extract_batch(&features, &batch_params(ProcessingMode::ParallelWith(2)), &cancel);

        assert_eq!(sequential.summary, parallel.summary);
        for (a, b) in sequential.outcomes.iter().zip(&parallel.outcomes) {
            assert_eq!(a.key, b.key);
            match (&a.outcome, &b.outcome) {
                (BatchOutcome::Extracted(left), BatchOutcome::Extracted(right)) => {
                    assert_eq!(left, right, "paths must not depend on the processing mode");
                }
                (BatchOutcome::Failed(_), BatchOutcome::Failed(_)) => {}
                (left, right) => panic!("outcome mismatch: {left:?} vs {right:?}"),
            }
        }
    }

    #[test]
    fn test_cancelled_run_skips_features() {
        let features = mixed_collection();
        let cancel = CancelToken::new();
        cancel.cancel();

        let report = extract_batch(&features, &batch_params(ProcessingMode::Sequential), &cancel);
        assert_eq!(report.summary.cancelled, 4);
        assert!(report
            .outcomes
            .iter()
            .all(|o| matches!(o.outcome, BatchOutcome::Cancelled)));
    }

    #[test]
    fn test_stream_delivers_every_feature() {
        let features = mixed_collection();
        let rx = stream_centerlines(
            features,
            batch_params(ProcessingMode::Parallel),
            CancelToken::new(),
        );

        let mut outcomes: Vec<FeatureOutcome> = rx.iter().collect();
        assert_eq!(outcomes.len(), 4);

        outcomes.sort_by_key(|o| o.index);
        let keys: Vec<&str> = outcomes.iter().map(|o| o.key.as_str()).collect();
        assert_eq!(keys, vec!["road-1", "1", "2", "road-2"]);
    }
}
