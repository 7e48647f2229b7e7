//! This crate provides tools for measuring the synchrony of spike trains in Rust.
//!
//! # Building Spike Trains
//!
//! ## From Spike Times
//!
//! ```rust
//! use rusty_sync::spike_train::SpikeTrain;
//!
//! let train = SpikeTrain::build(&[0.0, 12.5, 50.0]).unwrap();
//! assert_eq!(train.len(), 3);
//! ```
//!
//! ## At Random
//!
//! ```rust
//! use rusty_sync::spike_train::SpikeTrain;
//!
//! // Sample 20 spikes every 50 ms, each jittered by up to 4 ms, trimmed at 500 ms
//! let train = SpikeTrain::periodic(20, 50.0, 4.0, 500.0, 42).unwrap();
//! assert!(train.times().iter().all(|t| *t < 500.0));
//!
//! // Sample a homogeneous Poisson train at 20 spikes per second over 1 second
//! let train = SpikeTrain::poisson(20.0, 1000.0, 42).unwrap();
//! ```
//!
//! # Measuring Coincidences
//!
//! ```rust
//! use rusty_sync::matcher::Matcher;
//! use rusty_sync::spike_train::SpikeTrain;
//!
//! let ref_train = SpikeTrain::build(&[0.0, 50.0, 100.0]).unwrap();
//! let comp_train = SpikeTrain::build(&[1.0, 49.0, 200.0]).unwrap();
//!
//! // Match the spikes of both trains within a 5 ms window
//! let matcher = Matcher::build(5.0).unwrap();
//! let result = matcher.measure(&ref_train, &comp_train);
//!
//! assert_eq!(result.coincidence_count(), 2);
//! assert_eq!(result.total_events(), 6);
//! ```
//!
//! # Sweeping Lags
//!
//! ```rust
//! use rusty_sync::correlogram::Correlogram;
//! use rusty_sync::spike_train::SpikeTrain;
//! use rusty_sync::utils::linspace;
//!
//! let reference = SpikeTrain::periodic(20, 50.0, 4.0, 500.0, 42).unwrap();
//! let comparison = SpikeTrain::periodic(20, 50.0, 4.0, 500.0, 43).unwrap();
//!
//! // Measure the synchrony of the two trains at 7 lags between -7.5 and 7.5 ms
//! let correlogram = Correlogram::new(reference, comparison);
//! let points = correlogram.sweep(5.0, &linspace(-7.5, 7.5, 7)).unwrap();
//!
//! assert_eq!(points.len(), 7);
//! ```

pub mod correlogram;
pub mod error;
pub mod matcher;
pub mod spike_train;
pub mod utils;

/// The default half-width of the coincidence window, in milliseconds.
pub const DEFAULT_WINDOW: f64 = 5.0;
/// Minimum number of lags to consider parallel processing.
pub const MIN_PARALLEL_LAGS: usize = 64;
