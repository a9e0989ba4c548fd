//! # SkelGis Parallel
//!
//! Batch processing for centerline extraction.
//!
//! Polygons are independent: each feature's pipeline is a pure function of
//! its geometry and the extraction parameters, so feature collections are
//! processed by a worker pool with no shared state. This crate provides:
//! - `ProcessingMode` / `ParallelStrategy`: sequential or rayon execution
//! - `extract_batch`: synchronous batch run with a per-run summary
//! - `stream_centerlines`: background worker streaming results over a channel
//! - `CancelToken`: cooperative cancellation, checked between features

pub mod batch;
pub mod strategy;

pub use batch::{
    extract_batch, stream_centerlines, BatchOutcome, BatchParams, BatchReport, BatchSummary,
    CancelToken, FeatureOutcome,
};
pub use strategy::{ParallelStrategy, ProcessingMode};
