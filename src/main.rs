use clap::Parser;
use log::LevelFilter;
use log4rs::append::file::FileAppender;
use log4rs::config::{Appender, Config, Root};
use log4rs::encode::pattern::PatternEncoder;
use sha2::{Digest, Sha256};

use rusty_sync::correlogram::Correlogram;
use rusty_sync::error::SyncError;
use rusty_sync::spike_train::SpikeTrain;
use rusty_sync::utils::linspace;
use rusty_sync::DEFAULT_WINDOW;

#[derive(Parser, Debug)]
struct Args {
    /// The seed used for sampling the reference spike train
    #[arg(long)]
    seed: u64,
    /// The seed used for sampling the comparison spike train
    #[arg(long, default_value = "1")]
    comp_seed: u64,
    /// The number of spikes per train before trimming
    #[arg(short = 'N', long, default_value = "20")]
    num_spikes: usize,
    /// The nominal inter-spike interval, in milliseconds
    #[arg(long, default_value = "50.0")]
    isi: f64,
    /// The half-width of the uniform spike time jitter, in milliseconds
    #[arg(short = 'r', long, default_value = "4.0")]
    jitter: f64,
    /// The end of the analysis window, in milliseconds
    #[arg(long, default_value = "500.0")]
    horizon: f64,
    /// The half-width of the coincidence window, in milliseconds
    #[arg(short = 'w', long, default_value_t = DEFAULT_WINDOW)]
    window: f64,
    /// The magnitude of the largest lag applied to the comparison train, in milliseconds
    #[arg(long, default_value = "7.5")]
    lag_lim: f64,
    /// The number of lags to sweep
    #[arg(long, default_value = "7")]
    num_lags: usize,
}

fn main() -> Result<(), SyncError> {
    let args = Args::parse();

    let mut hasher = Sha256::new();
    hasher.update(format!("{:?}", args));
    let hash = hasher.finalize();
    let log_path = format!("log/{:x}.log", hash);
    let correlogram_path = format!("correlogram/{:x}.json", hash);

    let logfile = FileAppender::builder()
        .encoder(Box::new(PatternEncoder::new("{l} - {m}\n")))
        .build(log_path)
        .map_err(|e| SyncError::IOError(e.to_string()))?;

    let config = Config::builder()
        .appender(Appender::builder().build("logfile", Box::new(logfile)))
        .build(Root::builder().appender("logfile").build(LevelFilter::Info))
        .map_err(|e| SyncError::IOError(e.to_string()))?;

    log4rs::init_config(config).map_err(|e| SyncError::IOError(e.to_string()))?;

    log::info!("{:?}", args);

    // Sample the reference and comparison spike trains
    let reference = SpikeTrain::periodic(
        args.num_spikes,
        args.isi,
        args.jitter,
        args.horizon,
        args.seed,
    )?;
    let comparison = SpikeTrain::periodic(
        args.num_spikes,
        args.isi,
        args.jitter,
        args.horizon,
        args.comp_seed,
    )?;
    log::info!(
        "Spike train sampling done! {} reference and {} comparison spikes",
        reference.len(),
        comparison.len()
    );

    // Sweep the lags and measure the synchrony at each of them
    let lags = linspace(-args.lag_lim, args.lag_lim, args.num_lags);
    let correlogram = Correlogram::new(reference, comparison);
    let points = correlogram.sweep(args.window, &lags)?;
    for point in points.iter() {
        log::info!(
            "Lag {:+.3}: synchronized fraction is {:.3} ({} coincidences out of {} spikes)",
            point.lag(),
            point.ratio(),
            2 * point.coincidence_count(),
            point.total_events(),
        );
    }

    // Save the correlogram
    std::fs::create_dir_all("correlogram").map_err(|e| SyncError::IOError(e.to_string()))?;
    let file =
        std::fs::File::create(&correlogram_path).map_err(|e| SyncError::IOError(e.to_string()))?;
    serde_json::to_writer_pretty(file, &points).map_err(|e| SyncError::IOError(e.to_string()))?;
    log::info!("Correlogram saving: done! Saved to {}", correlogram_path);

    Ok(())
}
