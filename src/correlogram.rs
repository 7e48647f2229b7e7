//! This module provides the lag sweep producing a correlogram.
//!
//! # Examples
//!
//! ```rust
//! use rusty_sync::correlogram::Correlogram;
//! use rusty_sync::spike_train::SpikeTrain;
//!
//! // Create a jitter-free periodic train and compare it with itself
//! let reference = SpikeTrain::periodic(20, 50.0, 0.0, 1000.0, 1).unwrap();
//! let comparison = reference.clone();
//!
//! // Sweep three lags with a 5 ms window
//! let correlogram = Correlogram::new(reference, comparison);
//! let points = correlogram.sweep(5.0, &[-10.0, 0.0, 10.0]).unwrap();
//!
//! // The trains are identical, so the synchrony peaks at zero lag
//! assert_eq!(points[1].ratio(), 1.0);
//! assert_eq!(points[0].ratio(), 0.0);
//! assert_eq!(points[2].ratio(), 0.0);
//! ```

use log::{debug, info};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::MIN_PARALLEL_LAGS;

use super::error::SyncError;
use super::matcher::Matcher;
use super::spike_train::SpikeTrain;

/// Represents a synchrony measurement at a given lag.
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct CorrelogramPoint {
    /// The lag applied to the comparison train, in milliseconds.
    lag: f64,
    /// The synchrony ratio at this lag.
    ratio: f64,
    /// The number of coincident spike pairs at this lag.
    coincidence_count: usize,
    /// The total number of spikes in both trains.
    total_events: usize,
}

impl CorrelogramPoint {
    /// Returns the lag applied to the comparison train.
    pub fn lag(&self) -> f64 {
        self.lag
    }

    /// Returns the synchrony ratio at this lag.
    pub fn ratio(&self) -> f64 {
        self.ratio
    }

    /// Returns the number of coincident spike pairs at this lag.
    pub fn coincidence_count(&self) -> usize {
        self.coincidence_count
    }

    /// Returns the total number of spikes in both trains.
    pub fn total_events(&self) -> usize {
        self.total_events
    }
}

/// Represents a correlogram between a reference and a comparison spike train.
#[derive(Debug, PartialEq, Clone)]
pub struct Correlogram {
    /// The reference spike train.
    reference: SpikeTrain,
    /// The comparison spike train, shifted during the sweep.
    comparison: SpikeTrain,
}

impl Correlogram {
    /// Create a new correlogram from the provided spike trains.
    pub fn new(reference: SpikeTrain, comparison: SpikeTrain) -> Correlogram {
        Correlogram {
            reference,
            comparison,
        }
    }

    /// Returns the reference spike train.
    pub fn reference(&self) -> &SpikeTrain {
        &self.reference
    }

    /// Returns the comparison spike train.
    pub fn comparison(&self) -> &SpikeTrain {
        &self.comparison
    }

    /// Sweep the lags and measure the synchrony of the two trains at each of them.
    ///
    /// The comparison train is shifted by every lag in turn and matched against
    /// the reference. The caller's lag order is preserved in the output,
    /// repeated lags included. An invalid window aborts the whole sweep with
    /// the matcher error, propagated unchanged.
    pub fn sweep(&self, window: f64, lags: &[f64]) -> Result<Vec<CorrelogramPoint>, SyncError> {
        let matcher = Matcher::build(window)?;

        // Every iteration is a pure computation over immutable inputs
        let points: Vec<CorrelogramPoint> = if lags.len() < MIN_PARALLEL_LAGS {
            lags.iter().map(|&lag| self.point_at(&matcher, lag)).collect()
        } else {
            lags.par_iter()
                .map(|&lag| self.point_at(&matcher, lag))
                .collect()
        };

        info!(
            "Lag sweep done! {} points with a {} ms window",
            points.len(),
            window
        );
        Ok(points)
    }

    /// Measure the synchrony of the two trains at a single lag.
    fn point_at(&self, matcher: &Matcher, lag: f64) -> CorrelogramPoint {
        let result = matcher.measure(&self.reference, &self.comparison.shifted(lag));
        debug!(
            "Lag {}: {} coincidences out of {} spikes",
            lag,
            result.coincidence_count(),
            result.total_events()
        );

        CorrelogramPoint {
            lag,
            ratio: result.ratio(),
            coincidence_count: result.coincidence_count(),
            total_events: result.total_events(),
        }
    }
}
