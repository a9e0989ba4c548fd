//! Parallel processing strategies

use rayon::prelude::*;

/// Processing mode for batch runs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProcessingMode {
    /// Single-threaded processing
    Sequential,
    /// Parallel processing using all available cores
    Parallel,
    /// Parallel with specified number of threads
    ParallelWith(usize),
}

impl Default for ProcessingMode {
    fn default() -> Self {
        ProcessingMode::Parallel
    }
}

/// Strategy for distributing per-feature work
pub trait ParallelStrategy {
    /// Execute a function over indices and discard results
    fn par_for_each<F>(&self, range: std::ops::Range<usize>, f: F)
    where
        F: Fn(usize) + Sync + Send;

    /// Map a function over indices and collect results in index order
    fn par_map<T, F>(&self, range: std::ops::Range<usize>, f: F) -> Vec<T>
    where
        T: Send,
        F: Fn(usize) -> T + Sync + Send;
}

impl ParallelStrategy for ProcessingMode {
    fn par_for_each<F>(&self, range: std::ops::Range<usize>, f: F)
    where
        F: Fn(usize) + Sync + Send,
    {
        match self {
            ProcessingMode::Sequential => {
                for i in range {
                    f(i);
                }
            }
            ProcessingMode::Parallel => {
                range.into_par_iter().for_each(f);
            }
            ProcessingMode::ParallelWith(threads) => {
                with_pool(*threads, || range.into_par_iter().for_each(f));
            }
        }
    }

    fn par_map<T, F>(&self, range: std::ops::Range<usize>, f: F) -> Vec<T>
    where
        T: Send,
        F: Fn(usize) -> T + Sync + Send,
    {
        match self {
            ProcessingMode::Sequential => range.map(f).collect(),
            ProcessingMode::Parallel => range.into_par_iter().map(f).collect(),
            ProcessingMode::ParallelWith(threads) => {
                with_pool(*threads, || range.into_par_iter().map(f).collect())
            }
        }
    }
}

fn with_pool<T: Send>(threads: usize, work: impl FnOnce() -> T + Send) -> T {
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(threads)
        .build()
        .expect("Failed to build thread pool");
    pool.install(work)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn test_par_map_preserves_index_order() {
        for mode in [
            ProcessingMode::Sequential,
            ProcessingMode::Parallel,
            ProcessingMode::ParallelWith(2),
        ] {
            let doubled = mode.par_map(0..100, |i| i * 2);
            let expected: Vec<usize> = (0..100).map(|i| i * 2).collect();
            assert_eq!(doubled, expected, "mode {mode:?} broke index order");
        }
    }

    #[test]
    fn test_par_for_each_visits_everything() {
        for mode in [ProcessingMode::Sequential, ProcessingMode::Parallel] {
            let visits = AtomicUsize::new(0);
            mode.par_for_each(0..50, |_| {
                visits.fetch_add(1, Ordering::Relaxed);
            });
            assert_eq!(visits.load(Ordering::Relaxed), 50);
        }
    }
}
