//! Module implementing the concept of a spike train.

use rand::distributions::{Distribution, Uniform};
use rand::SeedableRng;
use rand_chacha::ChaCha12Rng;
use rand_distr::Exp;
use serde::{Deserialize, Serialize};

use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

use super::error::SyncError;

/// Represents an ordered sequence of spike times, in milliseconds.
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct SpikeTrain {
    /// The times at which the spikes occur, in non-decreasing order.
    times: Vec<f64>,
}

impl SpikeTrain {
    /// Create a spike train with the specified spike times.
    /// If necessary, the times are sorted.
    /// The function returns an error for non-finite times.
    pub fn build(times: &[f64]) -> Result<Self, SyncError> {
        for t in times {
            if !t.is_finite() {
                return Err(SyncError::InvalidTimes(format!(
                    "{} is not a finite spike time",
                    t
                )));
            }
        }

        let mut times = times.to_vec();
        times.sort_by(|t1, t2| {
            t1.partial_cmp(t2).unwrap_or_else(|| {
                panic!("Comparison failed: NaN values should have been caught earlier")
            })
        });

        Ok(SpikeTrain { times })
    }

    /// Sample a jittered periodic spike train.
    ///
    /// # Parameters
    /// - `num_spikes`: The number of spikes before trimming.
    /// - `isi`: The nominal inter-spike interval, in milliseconds.
    /// - `jitter`: The half-width of the uniform perturbation applied to every spike time.
    /// - `horizon`: The end of the analysis window; spikes at or beyond it are trimmed.
    /// - `seed`: The seed of the random number generator.
    ///
    /// # Returns
    /// A spike train whose n-th spike occurs at n * `isi` up to a perturbation in
    /// [-`jitter`, `jitter`), without the trailing spikes falling at or beyond `horizon`.
    pub fn periodic(
        num_spikes: usize,
        isi: f64,
        jitter: f64,
        horizon: f64,
        seed: u64,
    ) -> Result<Self, SyncError> {
        if num_spikes == 0 {
            return Err(SyncError::InvalidParameter(
                "The number of spikes must be positive".to_string(),
            ));
        }

        if isi <= 0.0 {
            return Err(SyncError::InvalidParameter(
                "The inter-spike interval must be positive".to_string(),
            ));
        }

        if jitter < 0.0 {
            return Err(SyncError::InvalidParameter(
                "The jitter half-width must be non-negative".to_string(),
            ));
        }

        let mut rng = ChaCha12Rng::seed_from_u64(seed);

        let mut times: Vec<f64> = (1..=num_spikes).map(|n| n as f64 * isi).collect();

        if jitter > 0.0 {
            let uniform = Uniform::new(-jitter, jitter);
            for t in times.iter_mut() {
                *t += uniform.sample(&mut rng);
            }
        }

        times.sort_by(|t1, t2| {
            t1.partial_cmp(t2)
                .expect("Problem with sorting the jittered spike times while sampling.")
        });

        times.truncate(times.partition_point(|t| *t < horizon));

        Ok(SpikeTrain { times })
    }

    /// Sample a homogeneous Poisson spike train.
    ///
    /// # Parameters
    /// - `rate`: The firing rate, in spikes per second.
    /// - `duration`: The duration of the train, in milliseconds.
    /// - `seed`: The seed of the random number generator.
    pub fn poisson(rate: f64, duration: f64, seed: u64) -> Result<Self, SyncError> {
        if rate <= 0.0 {
            return Err(SyncError::InvalidParameter(
                "The firing rate must be positive".to_string(),
            ));
        }

        if duration <= 0.0 {
            return Err(SyncError::InvalidParameter(
                "The duration must be positive".to_string(),
            ));
        }

        let mut rng = ChaCha12Rng::seed_from_u64(seed);
        let exp = Exp::new(rate / 1000.0).map_err(|e| SyncError::InvalidParameter(e.to_string()))?;

        let mut times: Vec<f64> = vec![];
        let mut time = exp.sample(&mut rng);
        while time < duration {
            times.push(time);
            time += exp.sample(&mut rng);
        }

        Ok(SpikeTrain { times })
    }

    /// Returns the spike times, in non-decreasing order.
    pub fn times(&self) -> &[f64] {
        &self.times[..]
    }

    /// Returns the number of spikes in the train.
    pub fn len(&self) -> usize {
        self.times.len()
    }

    /// Returns true if the train contains no spike.
    pub fn is_empty(&self) -> bool {
        self.times.is_empty()
    }

    /// Returns a new spike train with every spike time offset by the provided lag.
    /// The receiver is left untouched; a constant offset preserves the ordering.
    pub fn shifted(&self, lag: f64) -> SpikeTrain {
        SpikeTrain {
            times: self.times.iter().map(|t| t + lag).collect(),
        }
    }

    /// Save the spike train to the specified path in JSON format.
    pub fn save_to<P: AsRef<Path>>(&self, path: P) -> Result<(), SyncError> {
        let file = File::create(path).map_err(|e| SyncError::IOError(e.to_string()))?;
        serde_json::to_writer(BufWriter::new(file), self)
            .map_err(|e| SyncError::IOError(e.to_string()))
    }

    /// Load a spike train from the specified path.
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, SyncError> {
        let file = File::open(path).map_err(|e| SyncError::IOError(e.to_string()))?;
        serde_json::from_reader(BufReader::new(file)).map_err(|e| SyncError::IOError(e.to_string()))
    }
}
