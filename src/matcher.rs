//! This module provides a coincidence matcher for spike trains.
//!
//! # Examples
//!
//! ```rust
//! use rusty_sync::matcher::Matcher;
//! use rusty_sync::spike_train::SpikeTrain;
//!
//! // Create a reference and a comparison spike train
//! let ref_train = SpikeTrain::build(&[0.0, 50.0, 100.0]).unwrap();
//! let comp_train = SpikeTrain::build(&[1.0, 49.0, 200.0]).unwrap();
//!
//! // Match the spikes of both trains within a 5 ms window
//! let matcher = Matcher::build(5.0).unwrap();
//! let result = matcher.measure(&ref_train, &comp_train);
//!
//! assert_eq!(result.coincidence_count(), 2);
//! assert_eq!(result.mask_a(), &[true, true, false]);
//! assert_eq!(result.mask_b(), &[true, true, false]);
//! ```

use itertools::{Itertools, MinMaxResult};
use serde::{Deserialize, Serialize};

use super::error::SyncError;
use super::spike_train::SpikeTrain;

/// Represents a coincidence detector for spike trains.
#[derive(Debug, PartialEq, Clone)]
pub struct Matcher {
    /// The half-width of the coincidence window, in milliseconds.
    window: f64,
}

/// Represents the outcome of matching two spike trains.
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct MatchResult {
    /// For every spike of the first train, whether it has a coincident counterpart.
    mask_a: Vec<bool>,
    /// For every spike of the second train, whether it has a coincident counterpart.
    mask_b: Vec<bool>,
    /// The number of coincident spike pairs.
    coincidence_count: usize,
    /// The total number of spikes in both trains.
    total_events: usize,
    /// The synchrony ratio.
    ratio: f64,
}

impl MatchResult {
    /// Returns the coincidence mask over the first train.
    pub fn mask_a(&self) -> &[bool] {
        &self.mask_a[..]
    }

    /// Returns the coincidence mask over the second train.
    pub fn mask_b(&self) -> &[bool] {
        &self.mask_b[..]
    }

    /// Returns the number of coincident spike pairs.
    pub fn coincidence_count(&self) -> usize {
        self.coincidence_count
    }

    /// Returns the total number of spikes in both trains.
    pub fn total_events(&self) -> usize {
        self.total_events
    }

    /// Returns the synchrony ratio, i.e., twice the number of coincident pairs
    /// over the total number of spikes, or 0 if both trains are empty.
    pub fn ratio(&self) -> f64 {
        self.ratio
    }
}

impl Matcher {
    /// Create a new matcher with the specified coincidence window.
    /// Returns an error if the window is negative or non-finite.
    pub fn build(window: f64) -> Result<Self, SyncError> {
        if window < 0.0 {
            return Err(SyncError::InvalidParameter(
                "The coincidence window must be non-negative".to_string(),
            ));
        }

        if !window.is_finite() {
            return Err(SyncError::InvalidParameter(
                "The coincidence window must be finite".to_string(),
            ));
        }

        Ok(Matcher { window })
    }

    /// Returns the half-width of the coincidence window.
    pub fn window(&self) -> f64 {
        self.window
    }

    /// Match the spikes of the two trains within the coincidence window.
    ///
    /// The matching is one-to-one: every spike of `a`, in increasing time order,
    /// is paired with the closest unmatched spike of `b` at most `window` away,
    /// and paired spikes leave the pool. On equal distances, the earlier spike
    /// of `b` wins. With a window of 0, only identical spike times coincide.
    /// The coincidence counts of `measure(a, b)` and `measure(b, a)` agree
    /// whenever consecutive spikes of each train are more than twice the window
    /// apart; for denser trains, the order of the arguments is part of the
    /// contract.
    pub fn measure(&self, a: &SpikeTrain, b: &SpikeTrain) -> MatchResult {
        let times_a = a.times();
        let times_b = b.times();

        let mut mask_a = vec![false; times_a.len()];
        let mut mask_b = vec![false; times_b.len()];
        let mut coincidence_count = 0;

        // Position of the first spike of b that can still coincide with the
        // current (and any later) spike of a.
        let mut start = 0;
        for (i, &ta) in times_a.iter().enumerate() {
            start += times_b[start..].partition_point(|tb| *tb < ta - self.window);

            let mut best: Option<usize> = None;
            for (j, &tb) in times_b.iter().enumerate().skip(start) {
                if tb > ta + self.window {
                    break;
                }
                if mask_b[j] {
                    continue;
                }
                if best.map_or(true, |k| (ta - tb).abs() < (ta - times_b[k]).abs()) {
                    best = Some(j);
                }
            }

            if let Some(j) = best {
                mask_a[i] = true;
                mask_b[j] = true;
                coincidence_count += 1;
            }
        }

        let total_events = times_a.len() + times_b.len();
        let ratio = match total_events {
            0 => 0.0,
            _ => 2.0 * coincidence_count as f64 / total_events as f64,
        };

        MatchResult {
            mask_a,
            mask_b,
            coincidence_count,
            total_events,
            ratio,
        }
    }

    /// Returns the expected number of coincidences between two independent
    /// stationary spike trains with the same spike counts over the same span.
    ///
    /// The span is the distance between the earliest and the latest spike of
    /// both trains taken together. Empty trains or a degenerate span yield 0.
    pub fn expected_coincidences(&self, a: &SpikeTrain, b: &SpikeTrain) -> f64 {
        if a.is_empty() || b.is_empty() {
            return 0.0;
        }

        let span = match a
            .times()
            .iter()
            .chain(b.times().iter())
            .minmax_by(|t1, t2| t1.partial_cmp(t2).unwrap())
        {
            MinMaxResult::MinMax(min, max) => max - min,
            _ => 0.0,
        };

        if span <= 0.0 {
            return 0.0;
        }

        2.0 * self.window * (a.len() * b.len()) as f64 / span
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const SEED: u64 = 42;

    #[test]
    fn test_matcher_build() {
        let matcher = Matcher::build(5.0).unwrap();
        assert_eq!(matcher.window(), 5.0);

        // The zero window is valid
        assert!(Matcher::build(0.0).is_ok());

        // Negative and non-finite windows are not
        assert!(matches!(
            Matcher::build(-1.0),
            Err(SyncError::InvalidParameter(_))
        ));
        assert!(matches!(
            Matcher::build(f64::NAN),
            Err(SyncError::InvalidParameter(_))
        ));
        assert!(matches!(
            Matcher::build(f64::INFINITY),
            Err(SyncError::InvalidParameter(_))
        ));
    }

    #[test]
    fn test_measure() {
        let a = SpikeTrain::build(&[0.0, 50.0, 100.0]).unwrap();
        let b = SpikeTrain::build(&[1.0, 49.0, 200.0]).unwrap();

        let matcher = Matcher::build(5.0).unwrap();
        let result = matcher.measure(&a, &b);

        assert_eq!(result.coincidence_count(), 2);
        assert_eq!(result.total_events(), 6);
        assert_eq!(result.mask_a(), &[true, true, false]);
        assert_eq!(result.mask_b(), &[true, true, false]);
        assert_relative_eq!(result.ratio(), 2.0 / 3.0);
    }

    #[test]
    fn test_measure_empty() {
        let matcher = Matcher::build(5.0).unwrap();

        let empty = SpikeTrain::build(&[]).unwrap();
        let b = SpikeTrain::build(&[10.0, 20.0]).unwrap();

        let result = matcher.measure(&empty, &b);
        assert_eq!(result.coincidence_count(), 0);
        assert_eq!(result.mask_a(), &[] as &[bool]);
        assert_eq!(result.mask_b(), &[false, false]);
        assert_eq!(result.ratio(), 0.0);

        let result = matcher.measure(&b, &empty);
        assert_eq!(result.coincidence_count(), 0);
        assert_eq!(result.mask_a(), &[false, false]);
        assert_eq!(result.ratio(), 0.0);

        // Both trains empty: the ratio is defined as 0
        let result = matcher.measure(&empty, &empty);
        assert_eq!(result.total_events(), 0);
        assert_eq!(result.ratio(), 0.0);
    }

    #[test]
    fn test_measure_contention() {
        // Both spikes of a are within the window of the single spike of b,
        // which goes to the first one
        let a = SpikeTrain::build(&[0.0, 1.0]).unwrap();
        let b = SpikeTrain::build(&[0.5]).unwrap();

        let matcher = Matcher::build(1.0).unwrap();
        let result = matcher.measure(&a, &b);

        assert_eq!(result.coincidence_count(), 1);
        assert_eq!(result.mask_a(), &[true, false]);
        assert_eq!(result.mask_b(), &[true]);
    }

    #[test]
    fn test_measure_nearest_available() {
        // The first spike of a grabs the closest spike of b, the second one
        // falls back to the remaining one
        let a = SpikeTrain::build(&[0.0, 0.4]).unwrap();
        let b = SpikeTrain::build(&[0.1, 0.5]).unwrap();

        let matcher = Matcher::build(1.0).unwrap();
        let result = matcher.measure(&a, &b);

        assert_eq!(result.coincidence_count(), 2);
        assert_eq!(result.mask_a(), &[true, true]);
        assert_eq!(result.mask_b(), &[true, true]);
    }

    #[test]
    fn test_measure_equidistant_tie_break() {
        // The two spikes of b are equally far from the spike of a: the earlier wins
        let a = SpikeTrain::build(&[1.0]).unwrap();
        let b = SpikeTrain::build(&[0.5, 1.5]).unwrap();

        let matcher = Matcher::build(1.0).unwrap();
        let result = matcher.measure(&a, &b);

        assert_eq!(result.coincidence_count(), 1);
        assert_eq!(result.mask_b(), &[true, false]);
    }

    #[test]
    fn test_measure_zero_window() {
        let a = SpikeTrain::build(&[0.0, 1.0, 2.0]).unwrap();
        let b = SpikeTrain::build(&[0.0, 1.5, 2.0]).unwrap();

        let matcher = Matcher::build(0.0).unwrap();
        let result = matcher.measure(&a, &b);

        assert_eq!(result.coincidence_count(), 2);
        assert_eq!(result.mask_a(), &[true, false, true]);
        assert_eq!(result.mask_b(), &[true, false, true]);
    }

    #[test]
    fn test_measure_duplicated_times() {
        // Duplicated spike times are distinct events, each matched at most once
        let a = SpikeTrain::build(&[1.0, 1.0]).unwrap();
        let b = SpikeTrain::build(&[1.0]).unwrap();

        let matcher = Matcher::build(0.0).unwrap();
        let result = matcher.measure(&a, &b);

        assert_eq!(result.coincidence_count(), 1);
        assert_eq!(result.mask_a(), &[true, false]);
        assert_eq!(result.mask_b(), &[true]);
    }

    #[test]
    fn test_measure_window_boundary() {
        // A pair exactly at the window boundary coincides
        let a = SpikeTrain::build(&[0.0]).unwrap();
        let b = SpikeTrain::build(&[5.0]).unwrap();

        assert_eq!(Matcher::build(5.0).unwrap().measure(&a, &b).coincidence_count(), 1);
        assert_eq!(Matcher::build(4.9).unwrap().measure(&a, &b).coincidence_count(), 0);
    }

    #[test]
    fn test_measure_symmetry() {
        let a = SpikeTrain::build(&[0.0, 50.0, 100.0]).unwrap();
        let b = SpikeTrain::build(&[1.0, 49.0, 200.0]).unwrap();

        let matcher = Matcher::build(5.0).unwrap();
        assert_eq!(
            matcher.measure(&a, &b).coincidence_count(),
            matcher.measure(&b, &a).coincidence_count()
        );

        let a = SpikeTrain::periodic(20, 50.0, 4.0, 500.0, SEED).unwrap();
        let b = SpikeTrain::periodic(20, 50.0, 4.0, 500.0, SEED + 1).unwrap();

        let matcher = Matcher::build(5.0).unwrap();
        assert_eq!(
            matcher.measure(&a, &b).coincidence_count(),
            matcher.measure(&b, &a).coincidence_count()
        );
    }

    #[test]
    fn test_measure_monotonicity_in_window() {
        let a = SpikeTrain::periodic(20, 50.0, 4.0, 500.0, SEED).unwrap();
        let b = SpikeTrain::periodic(20, 50.0, 4.0, 500.0, SEED + 1).unwrap();

        let mut prev_count = 0;
        for window in [0.0, 1.0, 2.0, 5.0, 10.0, 25.0] {
            let result = Matcher::build(window).unwrap().measure(&a, &b);

            // The coincidence count grows with the window and is bounded by the
            // size of the smaller train
            assert!(result.coincidence_count() >= prev_count);
            assert!(result.coincidence_count() <= a.len().min(b.len()));

            // The ratio always lies in [0, 1] and vanishes with the count
            assert!(result.ratio() >= 0.0 && result.ratio() <= 1.0);
            assert_eq!(result.ratio() == 0.0, result.coincidence_count() == 0);

            prev_count = result.coincidence_count();
        }
    }

    #[test]
    fn test_measure_shift_invariance() {
        let a = SpikeTrain::periodic(20, 50.0, 4.0, 500.0, SEED).unwrap();
        let b = SpikeTrain::periodic(20, 50.0, 4.0, 500.0, SEED + 1).unwrap();

        let matcher = Matcher::build(5.0).unwrap();
        assert_eq!(
            matcher.measure(&a, &b.shifted(0.0)),
            matcher.measure(&a, &b)
        );
    }

    #[test]
    fn test_expected_coincidences() {
        let matcher = Matcher::build(5.0).unwrap();

        // Empty trains have no expected coincidences
        let empty = SpikeTrain::build(&[]).unwrap();
        let b = SpikeTrain::build(&[10.0, 20.0]).unwrap();
        assert_eq!(matcher.expected_coincidences(&empty, &b), 0.0);
        assert_eq!(matcher.expected_coincidences(&b, &empty), 0.0);

        // A degenerate span has no expected coincidences
        let a = SpikeTrain::build(&[1.0]).unwrap();
        assert_eq!(matcher.expected_coincidences(&a, &a), 0.0);

        // 2 * window * len(a) * len(b) / span
        let a = SpikeTrain::build(&[0.0, 50.0, 100.0]).unwrap();
        let b = SpikeTrain::build(&[1.0, 49.0]).unwrap();
        assert_relative_eq!(matcher.expected_coincidences(&a, &b), 2.0 * 5.0 * 6.0 / 100.0);

        // The expectation scales linearly with the window
        assert_relative_eq!(
            Matcher::build(10.0).unwrap().expected_coincidences(&a, &b),
            2.0 * matcher.expected_coincidences(&a, &b)
        );
    }
}
